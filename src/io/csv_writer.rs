use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use indexmap::IndexSet;
use tracing::debug;

use super::error::IoError;
use crate::domain::{Record, Value};
use crate::engine::{CDict, EngineError};

/// Write records as a CSV table, returning the number of rows written.
///
/// The whole iteration is materialized first so the header can be the union
/// of all keys, in first-seen order. Missing keys are written as empty cells.
/// Nothing is written when no record has any key.
pub fn write_records<I, W>(records: I, writer: W) -> Result<usize, IoError>
where
    I: IntoIterator<Item = Result<Value, EngineError>>,
    W: Write,
{
    let records = records
        .into_iter()
        .map(|value| -> Result<Record, IoError> { Ok(value?.into_record()?) })
        .collect::<Result<Vec<_>, _>>()?;

    let header: IndexSet<&str> = records.iter().flat_map(Record::keys).collect();
    if header.is_empty() {
        return Ok(0);
    }

    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(&header)?;
    for record in &records {
        csv_writer.write_record(header.iter().map(|key| {
            record
                .get(key)
                .map(ToString::to_string)
                .unwrap_or_default()
        }))?;
    }
    csv_writer.flush()?;

    debug!(rows = records.len(), columns = header.len(), "Wrote records");
    Ok(records.len())
}

/// Iterate `node` and write its records to a CSV file at `path`
pub fn write_records_to_path(node: &CDict, path: impl AsRef<Path>) -> Result<usize, IoError> {
    let file = File::create(path.as_ref())?;
    write_records(node, BufWriter::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Label;
    use crate::engine::Fields;

    fn render(node: &CDict) -> String {
        let mut output = Vec::new();
        write_records(node, &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn writes_header_and_rows() {
        let node = CDict::dict(
            Fields::new()
                .with("lr", CDict::list([0.1, 0.2]))
                .with("label", Label::new("run")),
        );
        assert_eq!(render(&node), "lr,label\n0.1,run\n0.2,run\n");
    }

    #[test]
    fn header_is_union_of_keys() {
        let node =
            CDict::dict(Fields::new().with("a", 1)) + CDict::dict(Fields::new().with("b", 2));
        assert_eq!(render(&node), "a,b\n1,\n,2\n");
    }

    #[test]
    fn writes_nothing_for_empty_iteration() {
        let node = CDict::list(Vec::<Value>::new());
        assert_eq!(render(&node), "");
    }

    #[test]
    fn returns_row_count() {
        let node = CDict::dict(Fields::new().with("a", CDict::list([1, 2, 3])));
        let mut output = Vec::new();
        assert_eq!(write_records(&node, &mut output).unwrap(), 3);
    }

    #[test]
    fn rejects_raw_values() {
        let mut output = Vec::new();
        let err = write_records(&CDict::list([1]), &mut output).unwrap_err();
        assert!(matches!(err, IoError::Domain(_)));
    }

    #[test]
    fn propagates_engine_errors() {
        let node =
            CDict::dict(Fields::new().with("a", 1)) * CDict::dict(Fields::new().with("a", 2));
        let mut output = Vec::new();
        let err = write_records(&node, &mut output).unwrap_err();
        assert!(matches!(err, IoError::Engine(EngineError::KeyCollision { .. })));
    }

    #[test]
    fn writes_to_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sweep.csv");
        let node = CDict::dict(Fields::new().with("seed", CDict::list([1, 2])));

        let rows = write_records_to_path(&node, &path).unwrap();

        assert_eq!(rows, 2);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "seed\n1\n2\n");
    }
}
