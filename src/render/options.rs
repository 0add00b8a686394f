//! Rendering options configuration.

/// Options for rendering reports.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Number of cells in a progress bar (0 disables bars)
    pub bar_width: u32,

    /// List every test case under its suite
    pub list_cases: bool,

    /// Include failure messages in the test case listing
    pub include_failures: bool,

    /// Append the warnings raised while reading the report
    pub include_warnings: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            bar_width: 40,
            list_cases: false,
            include_failures: true,
            include_warnings: false,
        }
    }
}

impl RenderOptions {
    /// Create new render options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the progress bar width, capped at 200 cells.
    pub fn with_bar_width(mut self, width: u32) -> Self {
        self.bar_width = width.min(200);
        self
    }

    /// List test cases under each suite.
    pub fn with_cases(mut self, list: bool) -> Self {
        self.list_cases = list;
        self
    }

    /// Include failure messages.
    pub fn with_failures(mut self, include: bool) -> Self {
        self.include_failures = include;
        self
    }

    /// Include reader warnings.
    pub fn with_warnings(mut self, include: bool) -> Self {
        self.include_warnings = include;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let opts = RenderOptions::default();
        assert_eq!(opts.bar_width, 40);
        assert!(!opts.list_cases);
        assert!(opts.include_failures);
    }

    #[test]
    fn test_builder_pattern() {
        let opts = RenderOptions::new()
            .with_bar_width(20)
            .with_cases(true)
            .with_failures(false);

        assert_eq!(opts.bar_width, 20);
        assert!(opts.list_cases);
        assert!(!opts.include_failures);
    }

    #[test]
    fn test_bar_width_cap() {
        let opts = RenderOptions::new().with_bar_width(10_000);
        assert_eq!(opts.bar_width, 200);
    }
}
