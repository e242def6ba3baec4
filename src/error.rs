// src/error.rs
//! Errors surfaced by the batch entry point. Scoring a single comment never fails.

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AnalysisError {
    /// Batch entry point called with no comments; no partial result is produced.
    #[error("no comments provided for analysis")]
    EmptyInput,
}
