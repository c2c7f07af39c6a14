pub mod adapter;

// Re-export commonly used types
pub use adapter::{RecordStream, collect_stream};
