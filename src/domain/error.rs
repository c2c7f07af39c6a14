use thiserror::Error;

/// Domain-level errors for values flowing through the algebra
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Expected a record, found {found}")]
    NotARecord { found: String },
}
