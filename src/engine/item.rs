use std::fmt;

use indexmap::IndexMap;

use super::node::CDict;
use crate::domain::{Label, Record, Value};

/// One entry of a list-like node
#[derive(Debug, Clone)]
pub enum Item {
    /// Yielded unchanged
    Value(Value),
    /// Fanned out into one record per combination of its fields
    Fields(Fields),
    /// Flattened in place
    Node(CDict),
}

/// The value side of a mapping field
#[derive(Debug, Clone)]
pub enum Field {
    Value(Value),
    Node(CDict),
}

/// Ordered mapping whose fields may be streams
#[derive(Debug, Clone, Default)]
pub struct Fields(IndexMap<String, Field>);

impl Fields {
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, field: impl Into<Field>) -> Self {
        self.insert(key, field);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, field: impl Into<Field>) -> Option<Field> {
        self.0.insert(key.into(), field.into())
    }

    pub fn get(&self, key: &str) -> Option<&Field> {
        self.0.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Field)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, F: Into<Field>> FromIterator<(K, F)> for Fields {
    fn from_iter<I: IntoIterator<Item = (K, F)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, f)| (k.into(), f.into()))
                .collect(),
        )
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(value) => write!(f, "{}", value),
            Self::Node(node) => write!(f, "{}", node),
        }
    }
}

impl fmt::Display for Fields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (key, field)) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}: {}", key, field)?;
        }
        f.write_str("}")
    }
}

impl From<CDict> for Item {
    fn from(node: CDict) -> Self {
        Self::Node(node)
    }
}

impl From<Fields> for Item {
    fn from(fields: Fields) -> Self {
        Self::Fields(fields)
    }
}

impl From<CDict> for Field {
    fn from(node: CDict) -> Self {
        Self::Node(node)
    }
}

macro_rules! from_value {
    ($target:ty => $($t:ty),*) => {
        $(
            impl From<$t> for $target {
                fn from(value: $t) -> Self {
                    Self::Value(Value::from(value))
                }
            }
        )*
    };
}

from_value!(Item => Value, i8, i16, i32, i64, u8, u16, u32, f32, f64, bool, &str, String, Label, Record, Vec<Value>);
from_value!(Field => Value, i8, i16, i32, i64, u8, u16, u32, f32, f64, bool, &str, String, Label, Record, Vec<Value>);
