use std::fmt;

use indexmap::IndexMap;
use tracing::{debug, warn};

use super::cartesian::Cartesian;
use super::error::EngineError;
use super::item::Item;
use super::node::{CDict, Expr, Precedence, Records};
use crate::domain::{Record, Value};

/// What a product does when values that do not combine share a key
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CollisionPolicy {
    /// Fail the iteration with `EngineError::KeyCollision` (default)
    #[default]
    Reject,

    /// Keep the value from the rightmost contributing record
    LastWins,
}

/// Cartesian product of child nodes, each combination merged into one record
pub struct Product {
    children: Vec<CDict>,
    policy: CollisionPolicy,
}

impl Product {
    pub fn new(children: impl IntoIterator<Item = CDict>) -> Self {
        Self {
            children: children.into_iter().collect(),
            policy: CollisionPolicy::default(),
        }
    }

    /// Build from arbitrary items, rejecting anything that is not a node
    pub fn try_new(items: impl IntoIterator<Item = Item>) -> Result<Self, EngineError> {
        let children = items
            .into_iter()
            .enumerate()
            .map(|(index, item)| match item {
                Item::Node(node) => Ok(node),
                _ => Err(EngineError::NotANode { index }),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(children))
    }

    /// Set the collision policy (defaults to `Reject`)
    pub fn with_collision_policy(mut self, policy: CollisionPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn collision_policy(&self) -> CollisionPolicy {
        self.policy
    }

    pub fn children(&self) -> &[CDict] {
        &self.children
    }
}

impl Expr for Product {
    fn records(&self) -> Records<'_> {
        debug!(
            children = self.children.len(),
            policy = ?self.policy,
            "Iterating product"
        );
        let sources = self.children.iter().map(CDict::iter).collect();
        let policy = self.policy;
        Box::new(
            Cartesian::new(sources)
                .map(move |combination| -> Result<Value, EngineError> {
                    merge_records(&combination?, policy)
                }),
        )
    }

    fn describe(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, child) in self.children.iter().enumerate() {
            if i > 0 {
                f.write_str(" * ")?;
            }
            child.describe_within(f, Precedence::Product, i)?;
        }
        Ok(())
    }

    fn precedence(&self) -> Precedence {
        if self.children.len() > 1 {
            Precedence::Product
        } else {
            Precedence::Atom
        }
    }
}

impl From<Product> for CDict {
    fn from(product: Product) -> Self {
        CDict::from_expr(product)
    }
}

/// Merge records into one, keys in first-introduced order.
///
/// A key held by one record passes through. A key held by several records
/// is left-folded when every value is a combining value, otherwise resolved
/// by `policy`.
pub fn merge_records(values: &[Value], policy: CollisionPolicy) -> Result<Value, EngineError> {
    let mut buckets: IndexMap<&str, Vec<&Value>> = IndexMap::new();
    for value in values {
        for (key, field) in value.expect_record()?.iter() {
            buckets.entry(key).or_default().push(field);
        }
    }

    let mut merged = Record::with_capacity(buckets.len());
    for (key, bucket) in buckets {
        let resolved = resolve(key, &bucket, policy)?;
        merged.insert(key, resolved);
    }
    Ok(Value::Record(merged))
}

fn resolve(key: &str, bucket: &[&Value], policy: CollisionPolicy) -> Result<Value, EngineError> {
    if let [single] = bucket {
        return Ok((*single).clone());
    }

    if let Some(combined) = Value::fold_combining(bucket) {
        return Ok(combined);
    }

    match (policy, bucket.last()) {
        (CollisionPolicy::LastWins, Some(last)) => {
            debug!(key, colliding = bucket.len(), "Key collision resolved by last value");
            Ok((*last).clone())
        }
        _ => {
            warn!(key, colliding = bucket.len(), "Key collision between non-combining values");
            Err(EngineError::KeyCollision {
                key: key.to_string(),
            })
        }
    }
}
