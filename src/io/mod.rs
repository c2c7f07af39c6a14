pub mod csv_writer;
pub mod error;

// Re-export commonly used types
pub use csv_writer::{write_records, write_records_to_path};
pub use error::IoError;
