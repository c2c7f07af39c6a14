use std::fmt;
use std::iter;

use tracing::debug;

use super::cartesian::Cartesian;
use super::node::{CDict, Expr, Precedence, Records};
use super::item::{Field, Fields, Item};
use crate::domain::{Record, Value};

/// Concatenation of items, with mapping items fanned out
pub struct Sum {
    items: Vec<Item>,
}

impl Sum {
    pub fn new(items: Vec<Item>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }
}

impl Expr for Sum {
    fn records(&self) -> Records<'_> {
        debug!(items = self.items.len(), "Iterating sum");
        Box::new(self.items.iter().flat_map(expand))
    }

    fn describe(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, item) in self.items.iter().enumerate() {
            if i > 0 {
                f.write_str(" + ")?;
            }
            match item {
                Item::Value(value) => write!(f, "{}", value)?,
                Item::Fields(fields) => write!(f, "{}", fields)?,
                Item::Node(node) => node.describe_within(f, Precedence::Sum, i)?,
            }
        }
        Ok(())
    }

    fn precedence(&self) -> Precedence {
        if self.items.len() > 1 {
            Precedence::Sum
        } else {
            Precedence::Atom
        }
    }
}

impl From<Sum> for CDict {
    fn from(sum: Sum) -> Self {
        CDict::from_expr(sum)
    }
}

fn expand(item: &Item) -> Records<'_> {
    match item {
        Item::Node(node) => node.iter(),
        Item::Fields(fields) => fan_out(fields),
        Item::Value(value) => Box::new(iter::once(Ok(value.clone()))),
    }
}

/// One record per combination of field values, last field varying fastest
fn fan_out(fields: &Fields) -> Records<'_> {
    let keys: Vec<&str> = fields.iter().map(|(key, _)| key).collect();
    let sources = fields.iter().map(|(_, field)| field_source(field)).collect();

    Box::new(Cartesian::new(sources).map(move |combination| {
        combination.map(|values| {
            Value::Record(keys.iter().copied().zip(values).collect::<Record>())
        })
    }))
}

fn field_source(field: &Field) -> Records<'_> {
    match field {
        Field::Node(node) => node.iter(),
        Field::Value(value) => Box::new(iter::once(Ok(value.clone()))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Label;
    use crate::engine::EngineError;

    fn pairs(node: &CDict) -> Vec<Vec<(String, i64)>> {
        node.collect_records()
            .unwrap()
            .into_iter()
            .map(|record| {
                record
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.as_int().unwrap()))
                    .collect()
            })
            .collect()
    }

    fn kv(entries: &[(&str, i64)]) -> Vec<(String, i64)> {
        entries.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn concatenates_in_order() {
        let node = CDict::list([1, 2]) + CDict::list([3]);
        assert_eq!(
            node.collect_values().unwrap(),
            vec![Value::Int(1), Value::Int(2), Value::Int(3)]
        );
    }

    #[test]
    fn flattens_nested_nodes_depth_first() {
        let inner = CDict::list([2, 3]);
        let node = CDict::list([Item::from(1), Item::from(inner), Item::from(4)]);
        assert_eq!(
            node.collect_values().unwrap(),
            vec![Value::Int(1), Value::Int(2), Value::Int(3), Value::Int(4)]
        );
    }

    #[test]
    fn fans_out_last_key_fastest() {
        let node = CDict::dict(
            Fields::new()
                .with("a", CDict::list([1, 2]))
                .with("b", CDict::list([10, 20])),
        );

        assert_eq!(
            pairs(&node),
            vec![
                kv(&[("a", 1), ("b", 10)]),
                kv(&[("a", 1), ("b", 20)]),
                kv(&[("a", 2), ("b", 10)]),
                kv(&[("a", 2), ("b", 20)]),
            ]
        );
    }

    #[test]
    fn constant_fields_repeat_in_every_record() {
        let node = CDict::dict(
            Fields::new()
                .with("seed", 7)
                .with("lr", CDict::list([1, 2, 3])),
        );

        assert_eq!(
            pairs(&node),
            vec![
                kv(&[("seed", 7), ("lr", 1)]),
                kv(&[("seed", 7), ("lr", 2)]),
                kv(&[("seed", 7), ("lr", 3)]),
            ]
        );
    }

    #[test]
    fn fan_out_values_can_be_records() {
        let options = CDict::list([
            Item::from(Fields::new().with("depth", 2)),
            Item::from(Fields::new().with("depth", 4)),
        ]);
        let node = CDict::dict(Fields::new().with("model", options));

        let records = node.collect_records().unwrap();
        assert_eq!(records.len(), 2);
        let model = records[1].get("model").and_then(Value::as_record).unwrap();
        assert_eq!(model.get("depth"), Some(&Value::Int(4)));
    }

    #[test]
    fn empty_mapping_yields_one_empty_record() {
        let records = CDict::dict(Fields::new()).collect_records().unwrap();
        assert_eq!(records.len(), 1);
        assert!(records[0].is_empty());
    }

    #[test]
    fn empty_field_stream_yields_nothing() {
        let node = CDict::dict(
            Fields::new()
                .with("a", 1)
                .with("b", CDict::list(Vec::<Value>::new())),
        );
        assert_eq!(node.count().unwrap(), 0);
    }

    #[test]
    fn raw_values_pass_through_verbatim() {
        let label = Label::new("tag");
        let node = CDict::list([Item::from(label.clone()), Item::from("text")]);
        assert_eq!(
            node.collect_values().unwrap(),
            vec![Value::Label(label), Value::from("text")]
        );
    }

    #[test]
    fn field_errors_propagate() {
        let bad = CDict::list([Item::from(Fields::new().with("a", 1))])
            | CDict::list(Vec::<Value>::new());
        let node = CDict::dict(Fields::new().with("x", bad));
        assert!(matches!(
            node.count(),
            Err(EngineError::LengthMismatch { .. })
        ));
    }

    #[test]
    fn restartable() {
        let node = CDict::dict(Fields::new().with("a", CDict::list([1, 2])));
        assert_eq!(pairs(&node), pairs(&node));
    }

    #[test]
    fn describes_items() {
        assert_eq!(CDict::list([1, 2, 3]).to_string(), "cdict(1 + 2 + 3)");
        assert_eq!(CDict::list(Vec::<Value>::new()).to_string(), "cdict()");
        assert_eq!(
            CDict::dict(Fields::new().with("a", CDict::list([1, 2])).with("b", 3)).to_string(),
            "cdict({a: cdict(1 + 2), b: 3})"
        );
    }
}
