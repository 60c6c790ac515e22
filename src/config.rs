//! Analysis configuration.

/// Largest number of distinct input variables enumerated by default.
pub const DEFAULT_MAX_INPUTS: usize = 6;

/// Configuration options for circuit analysis.
///
/// Use `AnalysisConfig::default()` for the standard settings.
///
/// # Examples
///
/// ```
/// use logic_rs::config::AnalysisConfig;
///
/// let config = AnalysisConfig::default().with_max_inputs(4).strict();
/// assert_eq!(config.max_inputs, 4);
/// assert!(config.strict);
/// ```
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct AnalysisConfig {
    /// Upper bound on distinct input labels for exhaustive enumeration (default: 6).
    /// Values above [`MAX_VARIABLES`][crate::table::MAX_VARIABLES] act as that cap.
    pub max_inputs: usize,
    /// Reject malformed graph descriptions instead of falling back to 0-valued defaults (default: false)
    pub strict: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            max_inputs: DEFAULT_MAX_INPUTS,
            strict: false,
        }
    }
}

impl AnalysisConfig {
    pub fn with_max_inputs(mut self, max_inputs: usize) -> Self {
        self.max_inputs = max_inputs;
        self
    }

    pub fn strict(mut self) -> Self {
        self.strict = true;
        self
    }
}
