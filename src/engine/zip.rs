use std::fmt;

use tracing::{debug, warn};

use super::error::EngineError;
use super::node::{CDict, Expr, Precedence, Records};
use crate::domain::{Record, Value};

/// Lockstep pairing of equal-length nodes
///
/// Each step's records are merged by plain overwrite, later children winning.
/// Labels are not combined here.
pub struct Zip {
    children: Vec<CDict>,
}

impl Zip {
    pub fn new(children: impl IntoIterator<Item = CDict>) -> Self {
        Self {
            children: children.into_iter().collect(),
        }
    }

    pub fn children(&self) -> &[CDict] {
        &self.children
    }
}

impl Expr for Zip {
    fn records(&self) -> Records<'_> {
        debug!(children = self.children.len(), "Iterating zip");
        Box::new(Lockstep {
            iters: self.children.iter().map(CDict::iter).collect(),
            step: 0,
            done: self.children.is_empty(),
        })
    }

    fn describe(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, child) in self.children.iter().enumerate() {
            if i > 0 {
                f.write_str(" | ")?;
            }
            child.describe_within(f, Precedence::Zip, i)?;
        }
        Ok(())
    }

    fn precedence(&self) -> Precedence {
        if self.children.len() > 1 {
            Precedence::Zip
        } else {
            Precedence::Atom
        }
    }
}

impl From<Zip> for CDict {
    fn from(zip: Zip) -> Self {
        CDict::from_expr(zip)
    }
}

struct Lockstep<'a> {
    iters: Vec<Records<'a>>,
    step: usize,
    done: bool,
}

impl Iterator for Lockstep<'_> {
    type Item = Result<Value, EngineError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        // Pull from every child before deciding, like a zip-longest
        let mut row = Vec::with_capacity(self.iters.len());
        let mut exhausted = None;
        for (index, iter) in self.iters.iter_mut().enumerate() {
            match iter.next() {
                Some(Ok(value)) => row.push(value),
                Some(Err(e)) => {
                    self.done = true;
                    return Some(Err(e));
                }
                None => {
                    exhausted.get_or_insert(index);
                }
            }
        }

        match exhausted {
            None => {
                self.step += 1;
                Some(overwrite(row))
            }
            Some(_) if row.is_empty() => {
                self.done = true;
                None
            }
            Some(exhausted) => {
                self.done = true;
                warn!(step = self.step, exhausted, "Zipped streams ended unevenly");
                Some(Err(EngineError::LengthMismatch {
                    step: self.step,
                    exhausted,
                }))
            }
        }
    }
}

fn overwrite(row: Vec<Value>) -> Result<Value, EngineError> {
    let mut merged = Record::new();
    for value in row {
        for (key, field) in value.into_record()? {
            merged.insert(key, field);
        }
    }
    Ok(Value::Record(merged))
}
