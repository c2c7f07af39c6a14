pub mod error;
pub mod label;
pub mod record;
pub mod value;

// Re-export commonly used types
pub use error::DomainError;
pub use label::{Combining, Label, fold_combining};
pub use record::Record;
pub use value::Value;
