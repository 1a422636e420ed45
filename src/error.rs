//! Error types for the analysis engine.
//!
//! Missing data is never an error here: empty portfolios and absent fields
//! produce absent values in the results. Only operations with a hard minimum
//! input size can fail.

use thiserror::Error;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, AnalysisError>;

/// Errors that can occur during portfolio analysis.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    /// Fewer records than the operation requires.
    #[error("At least {required} properties required for {operation}, got {found}")]
    InsufficientInput {
        operation: &'static str,
        required: usize,
        found: usize,
    },
}

impl AnalysisError {
    pub fn insufficient_input(operation: &'static str, required: usize, found: usize) -> Self {
        Self::InsufficientInput {
            operation,
            required,
            found,
        }
    }
}
