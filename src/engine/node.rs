use std::fmt;
use std::ops::{Add, BitOr, Mul};
use std::sync::Arc;

use super::apply::Apply;
use super::error::EngineError;
use super::item::{Fields, Item};
use super::product::Product;
use super::sum::Sum;
use super::zip::Zip;
use crate::domain::{Record, Value};

/// Lazy sequence of values produced by iterating an expression
pub type Records<'a> = Box<dyn Iterator<Item = Result<Value, EngineError>> + Send + 'a>;

/// Binding strength of a node's operator, loosest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    Zip,
    Sum,
    Product,
    Atom,
}

/// An expression node of the algebra
///
/// Implementations must be restartable: every call to `records` starts an
/// independent pass over the same output.
pub trait Expr: Send + Sync {
    /// Start a fresh lazy iteration
    fn records(&self) -> Records<'_>;

    /// Write the structural description, without the `cdict(..)` wrapper
    fn describe(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result;

    fn precedence(&self) -> Precedence {
        Precedence::Atom
    }
}

/// Immutable, cheaply cloneable handle to an expression tree
#[derive(Clone)]
pub struct CDict(Arc<dyn Expr>);

impl CDict {
    /// Wrap a custom expression node
    pub fn from_expr<E: Expr + 'static>(expr: E) -> Self {
        Self(Arc::new(expr))
    }

    /// Expand a mapping into one record per combination of its fields.
    ///
    /// Node fields contribute each of their values, plain fields are
    /// constant. The last field varies fastest.
    pub fn fan_out(fields: Fields) -> Self {
        Sum::new(vec![Item::Fields(fields)]).into()
    }

    /// Same as `fan_out`; the usual entry point via the `dict!` macro
    pub fn dict(fields: Fields) -> Self {
        Self::fan_out(fields)
    }

    /// Wrap a sequence of items; mappings among them are fanned out and
    /// nodes are flattened in place
    pub fn list<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Item>,
    {
        Sum::new(items.into_iter().map(Into::into).collect()).into()
    }

    /// Build a node from any iterator; the items are collected up front so
    /// the node can be iterated again
    pub fn from_items<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Item>,
    {
        Self::list(items)
    }

    /// Concatenate streams in order
    pub fn concat(nodes: impl IntoIterator<Item = CDict>) -> Self {
        Sum::new(nodes.into_iter().map(Item::Node).collect()).into()
    }

    /// Cartesian product with the default collision policy
    pub fn product(children: impl IntoIterator<Item = CDict>) -> Self {
        Product::new(children).into()
    }

    /// Cartesian product that validates its operands up front
    pub fn try_product(items: impl IntoIterator<Item = Item>) -> Result<Self, EngineError> {
        Ok(Product::try_new(items)?.into())
    }

    /// Strict lockstep zip; iteration fails if the lengths differ
    pub fn zip(children: impl IntoIterator<Item = CDict>) -> Self {
        Zip::new(children).into()
    }

    /// Flat-map every value through `f`
    pub fn apply<F, I>(&self, f: F) -> Self
    where
        F: Fn(Value) -> I + Send + Sync + 'static,
        I: IntoIterator<Item = Value>,
        I::IntoIter: Send + 'static,
    {
        Apply::new(self.clone(), f).into()
    }

    /// Transform every value through `f`
    pub fn map<F>(&self, f: F) -> Self
    where
        F: Fn(Value) -> Value + Send + Sync + 'static,
    {
        Apply::named(self.clone(), std::any::type_name::<F>(), move |value| {
            std::iter::once(f(value))
        })
        .into()
    }

    /// Start a fresh iteration; it stops after the first error
    pub fn iter(&self) -> Records<'_> {
        Box::new(StopOnError {
            inner: self.0.records(),
            failed: false,
        })
    }

    /// Number of values, by iterating the whole expression
    pub fn count(&self) -> Result<usize, EngineError> {
        self.iter().try_fold(0, |n, value| value.map(|_| n + 1))
    }

    pub fn collect_values(&self) -> Result<Vec<Value>, EngineError> {
        self.iter().collect()
    }

    /// Collect every value, failing if any of them is not a record
    pub fn collect_records(&self) -> Result<Vec<Record>, EngineError> {
        self.iter()
            .map(|value| -> Result<Record, EngineError> { Ok(value?.into_record()?) })
            .collect()
    }

    pub fn precedence(&self) -> Precedence {
        self.0.precedence()
    }

    /// Write this node's description as operand `index` of the enclosing
    /// operator.
    ///
    /// Looser children are parenthesized, as are equal-precedence children
    /// after the first, so `a * (b * c)` keeps its grouping.
    pub(crate) fn describe_within(
        &self,
        f: &mut fmt::Formatter<'_>,
        parent: Precedence,
        index: usize,
    ) -> fmt::Result {
        let own = self.precedence();
        if own < parent || (index > 0 && own == parent) {
            f.write_str("(")?;
            self.0.describe(f)?;
            f.write_str(")")
        } else {
            self.0.describe(f)
        }
    }
}

struct StopOnError<'a> {
    inner: Records<'a>,
    failed: bool,
}

impl Iterator for StopOnError<'_> {
    type Item = Result<Value, EngineError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let next = self.inner.next();
        if matches!(next, Some(Err(_))) {
            self.failed = true;
        }
        next
    }
}

impl<'a> IntoIterator for &'a CDict {
    type Item = Result<Value, EngineError>;
    type IntoIter = Records<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: Into<Item>> FromIterator<T> for CDict {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_items(iter)
    }
}

impl fmt::Display for CDict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("cdict(")?;
        self.0.describe(f)?;
        f.write_str(")")
    }
}

impl fmt::Debug for CDict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl Add for CDict {
    type Output = CDict;

    fn add(self, rhs: CDict) -> CDict {
        CDict::concat([self, rhs])
    }
}

impl Add for &CDict {
    type Output = CDict;

    fn add(self, rhs: Self) -> CDict {
        CDict::concat([self.clone(), rhs.clone()])
    }
}

impl Mul for CDict {
    type Output = CDict;

    fn mul(self, rhs: CDict) -> CDict {
        CDict::product([self, rhs])
    }
}

impl Mul for &CDict {
    type Output = CDict;

    fn mul(self, rhs: Self) -> CDict {
        CDict::product([self.clone(), rhs.clone()])
    }
}

impl BitOr for CDict {
    type Output = CDict;

    fn bitor(self, rhs: CDict) -> CDict {
        CDict::zip([self, rhs])
    }
}

impl BitOr for &CDict {
    type Output = CDict;

    fn bitor(self, rhs: Self) -> CDict {
        CDict::zip([self.clone(), rhs.clone()])
    }
}
