use std::io;
use thiserror::Error;

use crate::domain::DomainError;
use crate::engine::EngineError;

/// IO-level errors for writing materialized sweeps
#[derive(Error, Debug)]
pub enum IoError {
    #[error("CSV writing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),
}
