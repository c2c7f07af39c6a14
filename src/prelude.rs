//! Prelude module for convenient imports
//!
//! Import everything you need with: `use cdict::prelude::*;`

// Domain types
pub use crate::domain::{Combining, DomainError, Label, Record, Value};

// Engine types
pub use crate::engine::{
    CDict, CollisionPolicy, EngineError, Expr, Field, Fields, Item, Product, Records,
};

// IO types
pub use crate::io::{IoError, write_records, write_records_to_path};

// Streaming types
pub use crate::streaming::{RecordStream, collect_stream};

pub use crate::dict;
