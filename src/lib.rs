//! Lazy combinatorial algebra over streams of records.
//!
//! Expressions are built from lists and mappings with `+` (concatenate),
//! `*` (cartesian product with label merging) and `|` (strict zip), and only
//! produce records when iterated.
//!
//! ```
//! use cdict::prelude::*;
//!
//! let sweep = dict! { lr: CDict::list([0.1, 0.01]), seed: CDict::list([1, 2]) };
//! assert_eq!(sweep.count().unwrap(), 4);
//! ```

pub mod domain;
pub mod engine;
pub mod io;
pub mod prelude;
pub mod streaming;

pub use domain::{Label, Record, Value};
pub use engine::{CDict, Fields};

/// Build a fanned-out mapping from keyword fields.
///
/// `dict! { a: CDict::list([1, 2]), b: 10 }` yields `{a: 1, b: 10}` and
/// `{a: 2, b: 10}`.
#[macro_export]
macro_rules! dict {
    () => {
        $crate::CDict::dict($crate::Fields::new())
    };
    ($($key:ident : $value:expr),+ $(,)?) => {
        $crate::CDict::dict($crate::Fields::new()$(.with(stringify!($key), $value))+)
    };
}
