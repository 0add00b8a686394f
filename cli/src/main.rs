//! gtest-report CLI - GoogleTest XML report summaries
//!
//! A command-line tool for summarizing gtest XML reports with rounded
//! percentages that always add up to 100.

use clap::{Parser, Subcommand, ValueEnum};
use colored::*;
use gtest_report::render::{segment_label, JsonFormat, RenderOptions};
use gtest_report::{Breakdown, Counts, Outcome, ParseOptions, ReportParser};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// GoogleTest XML report summaries
#[derive(Parser)]
#[command(
    name = "gtest-report",
    version,
    about = "Summarize GoogleTest XML reports",
    long_about = "gtest-report - GoogleTest XML report summaries.\n\n\
                  Reads --gtest_output=xml reports and prints pass/fail/disabled \
                  breakdowns whose percentages always add up to 100."
)]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "warn")]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a plain text summary of a report
    Summary {
        /// Input report path
        input: PathBuf,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// List every test case
        #[arg(long)]
        cases: bool,

        /// Leave failure messages out of the test case listing
        #[arg(long)]
        no_failures: bool,

        /// Width of the progress bars (0 disables them)
        #[arg(long, default_value = "40")]
        width: u32,

        /// Append reader warnings to the summary
        #[arg(long)]
        warnings: bool,

        /// Project name used when the report has none
        #[arg(long)]
        project: Option<String>,

        /// Author used when the report has none
        #[arg(long)]
        author: Option<String>,
    },

    /// Convert a report to JSON
    Json {
        /// Input report path
        input: PathBuf,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output compact JSON (no indentation)
        #[arg(long)]
        compact: bool,
    },

    /// Round percentages so that they sum to exactly 100
    Round {
        /// Percentages summing to 100
        #[arg(required = true, allow_negative_numbers = true)]
        percentages: Vec<f64>,
    },

    /// Show the rounded breakdown of raw test counts
    Breakdown {
        /// Total number of tests
        total: u32,

        /// Number of failed tests
        fail: u32,

        /// Number of disabled tests
        disabled: u32,

        /// Print the breakdown as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show version information
    Version,
}

/// Log level
#[derive(Clone, Copy, ValueEnum)]
enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => Level::TRACE,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warn => Level::WARN,
            LogLevel::Error => Level::ERROR,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    setup_logging(cli.log_level);

    if let Err(e) = run(cli) {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn setup_logging(level: LogLevel) {
    let level: Level = level.into();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(level.to_string().to_lowercase()))
        .with_writer(io::stderr)
        .without_time()
        .init();
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Summary {
            input,
            output,
            cases,
            no_failures,
            width,
            warnings,
            project,
            author,
        } => {
            let pb = create_spinner("Reading report...");

            let mut parse_options = ParseOptions::new();
            if let Some(project) = project {
                parse_options = parse_options.with_project(project);
            }
            if let Some(author) = author {
                parse_options = parse_options.with_author(author);
            }
            let report = ReportParser::new(parse_options).parse_file(&input)?;
            pb.set_message("Rendering summary...");

            let options = RenderOptions::new()
                .with_bar_width(width)
                .with_cases(cases)
                .with_failures(!no_failures)
                .with_warnings(warnings);
            let text = gtest_report::render::to_text(&report, &options)?;

            pb.finish_and_clear();
            write_output(output.as_ref(), &text)?;

            if let Some(path) = output {
                println!("{} Summary written: {}", "✓".green().bold(), path.display());
            }
        }

        Commands::Json {
            input,
            output,
            compact,
        } => {
            let pb = create_spinner("Reading report...");

            let report = gtest_report::parse_file(&input)?;
            pb.set_message("Rendering to JSON...");

            let format = if compact {
                JsonFormat::Compact
            } else {
                JsonFormat::Pretty
            };
            let json = gtest_report::render::to_json(&report, format)?;

            pb.finish_and_clear();
            write_output(output.as_ref(), &json)?;

            if let Some(path) = output {
                println!("{} Converted to JSON: {}", "✓".green().bold(), path.display());
            }
        }

        Commands::Round { percentages } => {
            let rounded = gtest_report::round_to_100(&percentages)?;
            let line: Vec<String> = rounded.iter().map(u32::to_string).collect();
            println!("{}", line.join(" "));
        }

        Commands::Breakdown {
            total,
            fail,
            disabled,
            json,
        } => {
            let counts = Counts::from_report(total, fail, disabled)?;
            let breakdown = Breakdown::from_counts(&counts)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&breakdown)?);
            } else {
                print_breakdown(&breakdown);
            }
        }

        Commands::Version => {
            print_version();
        }
    }

    Ok(())
}

fn print_breakdown(breakdown: &Breakdown) {
    println!("{}", "Breakdown".cyan().bold());
    println!("{}", "─".repeat(40));
    for segment in breakdown.visible_segments() {
        let label = segment_label(segment);
        let label = match segment.outcome {
            Outcome::Success => label.green(),
            Outcome::Fail => label.red(),
            Outcome::Disabled => label.yellow(),
        };
        println!("{}", label);
    }
}

fn print_version() {
    println!(
        "{} {}",
        "gtest-report".green().bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!("GoogleTest XML report summaries with percentages that add up to 100");
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
            .template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

fn write_output(path: Option<&PathBuf>, content: &str) -> Result<(), Box<dyn std::error::Error>> {
    match path {
        Some(p) => {
            if let Some(parent) = p.parent().filter(|d| !d.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            fs::write(p, content)?;
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            writeln!(handle, "{}", content)?;
        }
    }
    Ok(())
}
