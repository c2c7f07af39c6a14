pub mod apply;
mod cartesian;
pub mod error;
pub mod item;
pub mod node;
pub mod product;
pub mod sum;
pub mod zip;

// Re-export commonly used types
pub use apply::Apply;
pub use error::EngineError;
pub use item::{Field, Fields, Item};
pub use node::{CDict, Expr, Precedence, Records};
pub use product::{CollisionPolicy, Product, merge_records};
pub use sum::Sum;
pub use zip::Zip;
