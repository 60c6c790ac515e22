//! Error types for circuit analysis.

use thiserror::Error;

/// Errors that can occur while analysing a circuit.
///
/// Capacity limits are not errors: an oversized circuit yields a
/// [`TableWarning`][crate::table::TableWarning] inside an empty table.
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// The graph contains a cycle; `unordered` lists the node ids that could not be ordered.
    #[error("Cycle detected through nodes: {}", unordered.join(", "))]
    CycleDetected { unordered: Vec<String> },

    /// Malformed graph rejected in strict mode
    #[error("Invalid graph: {0}")]
    InvalidGraph(String),

    /// Node record with an unrecognised `kind`
    #[error("Unknown node kind '{0}'")]
    UnknownNodeKind(String),

    /// Graph description is not valid JSON for the expected shape
    #[error("Invalid graph description: {0}")]
    Description(#[from] serde_json::Error),

    /// Text could not be parsed as a two-level expression
    #[error("Invalid expression: {0}")]
    InvalidExpression(String),
}

impl AnalysisError {
    pub fn is_cycle(&self) -> bool {
        matches!(self, AnalysisError::CycleDetected { .. })
    }
}
