use thiserror::Error;

use crate::domain::DomainError;

/// Engine-level errors for building and iterating expressions
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Cannot multiply: operand {index} is not an expression node")]
    NotANode { index: usize },

    #[error("Zipped streams are not the same length: stream {exhausted} ended at step {step}")]
    LengthMismatch { step: usize, exhausted: usize },

    #[error("Key collision on '{key}' between values that do not combine")]
    KeyCollision { key: String },

    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),
}
