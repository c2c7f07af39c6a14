use std::fmt;

use serde::Serialize;

use super::error::DomainError;
use super::label::{Label, fold_combining};
use super::record::Record;

/// A concrete value produced by the algebra
///
/// Records and raw values share one type, so a node's output can be any mix
/// of the two.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Label(Label),
    List(Vec<Value>),
    Record(Record),
}

impl Value {
    /// Whether this value merges with others on key collision
    pub fn is_combining(&self) -> bool {
        matches!(self, Self::Label(_))
    }

    /// Left-fold colliding values into one.
    ///
    /// `None` when the slice is empty or any value is not combining.
    pub fn fold_combining(values: &[&Value]) -> Option<Value> {
        if !values.iter().all(|value| value.is_combining()) {
            return None;
        }
        let labels: Vec<&Label> = values.iter().filter_map(|value| value.as_label()).collect();
        fold_combining(&labels).map(Value::Label)
    }

    pub fn as_label(&self) -> Option<&Label> {
        match self {
            Self::Label(label) => Some(label),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Self::Record(record) => Some(record),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Borrow as a record or fail with `NotARecord`
    pub fn expect_record(&self) -> Result<&Record, DomainError> {
        self.as_record().ok_or_else(|| DomainError::NotARecord {
            found: self.to_string(),
        })
    }

    /// Convert into a record or fail with `NotARecord`
    pub fn into_record(self) -> Result<Record, DomainError> {
        match self {
            Self::Record(record) => Ok(record),
            other => Err(DomainError::NotARecord {
                found: other.to_string(),
            }),
        }
    }
}

/// Text form used when a value is appended to a label or written to CSV.
///
/// `Null` prints `null` and booleans print `true`/`false`. Floats use the
/// shortest round-trip form, switching to exponent notation outside
/// `1e-4..1e16` with no exponent padding (`1e-5`, `1e16`).
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{}", b),
            Self::Int(i) => write!(f, "{}", i),
            Self::Float(x) => write!(f, "{:?}", x),
            Self::Str(s) => f.write_str(s),
            Self::Label(label) => write!(f, "{}", label),
            Self::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
            Self::Record(record) => write!(f, "{}", record),
        }
    }
}

macro_rules! value_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(i: $t) -> Self {
                    Self::Int(i64::from(i))
                }
            }
        )*
    };
}

value_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<f32> for Value {
    fn from(x: f32) -> Self {
        Self::Float(f64::from(x))
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Self::Float(x)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<Label> for Value {
    fn from(label: Label) -> Self {
        Self::Label(label)
    }
}

impl From<Record> for Value {
    fn from(record: Record) -> Self {
        Self::Record(record)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Self::List(items)
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Self::Null
    }
}
