//! Synthetic CSV documents.

use super::{parse_options, CountRange, GenerateContext, GeneratorKind, RangeOptions, ValueGenerator};
use crate::error::Result;
use crate::names;
use rand::Rng;
use serde::Deserialize;
use serde_json::Value;

const DEFAULT_COLUMNS: CountRange = CountRange::new(2, 8);
const DEFAULT_ROWS: CountRange = CountRange::new(1, 20);
const CELL_MAX: u32 = 1000;

#[derive(Debug, Default, Deserialize)]
struct CsvOptions {
    #[serde(default)]
    columns: Option<RangeOptions>,
    #[serde(default)]
    rows: Option<RangeOptions>,
}

/// Header of random identifiers followed by rows of integers in `[0, 1000)`,
/// comma separated, one line per row
#[derive(Debug, Clone)]
pub struct CsvGenerator {
    columns: CountRange,
    rows: CountRange,
}

impl CsvGenerator {
    pub fn new(columns: CountRange, rows: CountRange) -> Self {
        Self { columns, rows }
    }

    pub fn from_spec(spec: &Value) -> Result<Self> {
        let opts: CsvOptions = parse_options(GeneratorKind::Csv, spec)?;
        Ok(Self::new(
            CountRange::with_defaults(opts.columns, DEFAULT_COLUMNS),
            CountRange::with_defaults(opts.rows, DEFAULT_ROWS),
        ))
    }
}

impl ValueGenerator for CsvGenerator {
    fn generate(&mut self, ctx: &mut GenerateContext<'_>) -> Result<Value> {
        let columns = self.columns.sample_count(ctx.rng);
        let rows = self.rows.sample_count(ctx.rng);

        let header: Vec<String> = (0..columns).map(|_| names::identifier(ctx.rng)).collect();
        let mut lines = Vec::with_capacity(rows + 1);
        lines.push(header.join(","));

        for _ in 0..rows {
            let cells: Vec<String> = (0..columns)
                .map(|_| ctx.rng.random_range(0..CELL_MAX).to_string())
                .collect();
            lines.push(cells.join(","));
        }

        Ok(Value::String(lines.join("\n")))
    }

    fn kind(&self) -> GeneratorKind {
        GeneratorKind::Csv
    }
}
