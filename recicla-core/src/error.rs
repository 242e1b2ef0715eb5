//! Core error types for Ser Recicla

use thiserror::Error;

/// Errors raised while turning raw input into domain values
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("Invalid waste type: {0}")]
    InvalidWasteType(String),

    #[error("Invalid shift: {0}")]
    InvalidShift(String),

    #[error("Invalid statistics period: {0}")]
    InvalidPeriod(String),
}

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, CoreError>;
