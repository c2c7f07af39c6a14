//! Example: Hyperparameter Sweep
//!
//! Builds the cross product of optimizer, learning-rate and seed choices,
//! labels every configuration, and writes the sweep as CSV.
//!
//! Usage:
//!   cargo run --example sweep                 # CSV to stdout
//!   cargo run --example sweep -- sweep.csv    # CSV to a file
//!   RUST_LOG=debug cargo run --example sweep  # show iteration logs

use std::env;
use std::io;

use cdict::prelude::*;

fn named(name: &str, fields: Fields) -> Item {
    Item::from(fields.with("name", Label::new(name)))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let optimizers = CDict::list([
        named("sgd", Fields::new().with("optimizer", "sgd").with("momentum", 0.9)),
        named("adam", Fields::new().with("optimizer", "adam").with("momentum", 0.0)),
    ]);

    let rates = CDict::list([0.1, 0.01, 0.001]).map(|lr| {
        let mut record = Record::new();
        record.insert("name", Label::with_separator("lr", "=").append(&lr));
        record.insert("lr", lr);
        Value::Record(record)
    });

    // Two seeds per configuration, each repeated with and without warmup
    let seeds = dict! { seed: CDict::list([0, 1]) }
        .apply(|record| {
            [false, true].map(|warmup| {
                let mut record = record.as_record().cloned().unwrap_or_default();
                record.insert("warmup", warmup);
                Value::Record(record)
            })
        });

    let sweep = optimizers * rates * seeds;

    eprintln!("=== Sweep ===");
    eprintln!("{}", sweep);
    eprintln!("{} configurations", sweep.count()?);
    eprintln!();

    let rows = match env::args().nth(1) {
        Some(path) => write_records_to_path(&sweep, path)?,
        None => write_records(&sweep, io::stdout().lock())?,
    };
    eprintln!("Wrote {} rows", rows);

    Ok(())
}
