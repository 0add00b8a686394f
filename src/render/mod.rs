//! Output rendering for reports.
//!
//! This module provides renderers for converting a parsed [`Report`] and its
//! percentage breakdowns to plain text and JSON.
//!
//! # Example
//!
//! ```no_run
//! use gtest_report::{parse_file, render::*};
//!
//! let report = parse_file("test_detail.xml")?;
//!
//! // Render to plain text
//! let text = to_text(&report, &RenderOptions::default())?;
//!
//! // Render to JSON
//! let json = to_json(&report, JsonFormat::Pretty)?;
//! # Ok::<(), gtest_report::Error>(())
//! ```
//!
//! [`Report`]: crate::model::Report

mod bar;
mod json;
mod options;
mod text;

pub use bar::{bar, bar_glyph, segment_label};
pub use json::{to_json, to_json_default, JsonFormat};
pub use options::RenderOptions;
pub use text::to_text;
