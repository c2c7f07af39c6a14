use std::fmt;
use std::iter;

use super::node::{CDict, Expr, Records};
use crate::domain::Value;

type FlatMapFn = dyn Fn(Value) -> Box<dyn Iterator<Item = Value> + Send> + Send + Sync;

/// Flat-map of a function over an inner node
pub struct Apply {
    inner: CDict,
    f: Box<FlatMapFn>,
    name: &'static str,
}

impl Apply {
    /// Apply `f` to every value of `inner`, yielding everything it returns
    pub fn new<F, I>(inner: CDict, f: F) -> Self
    where
        F: Fn(Value) -> I + Send + Sync + 'static,
        I: IntoIterator<Item = Value>,
        I::IntoIter: Send + 'static,
    {
        Self::named(inner, std::any::type_name::<F>(), f)
    }

    /// Like `new`, with an explicit name for the description
    pub fn named<F, I>(inner: CDict, name: &'static str, f: F) -> Self
    where
        F: Fn(Value) -> I + Send + Sync + 'static,
        I: IntoIterator<Item = Value>,
        I::IntoIter: Send + 'static,
    {
        Self {
            inner,
            f: Box::new(move |value| Box::new(f(value).into_iter())),
            name,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl Expr for Apply {
    fn records(&self) -> Records<'_> {
        Box::new(self.inner.iter().flat_map(move |result| -> Records<'static> {
            match result {
                Ok(value) => Box::new((self.f)(value).map(Ok)),
                Err(e) => Box::new(iter::once(Err(e))),
            }
        }))
    }

    fn describe(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "apply({}, {})", self.name, self.inner)
    }
}

impl From<Apply> for CDict {
    fn from(apply: Apply) -> Self {
        CDict::from_expr(apply)
    }
}
