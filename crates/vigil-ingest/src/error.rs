//! Ingest error types.

use thiserror::Error;

/// Errors from epidemiological table normalization.
///
/// Field-level problems never surface here; they degrade to unknown values.
#[derive(Debug, Error)]
pub enum EpiError {
    /// No column matched any of the accepted date spellings.
    #[error("no date column found (available columns: {columns:?})")]
    MissingDateColumn { columns: Vec<String> },
}
