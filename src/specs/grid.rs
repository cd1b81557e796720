// src/specs/grid.rs
//
// Grid tables: a panel table scraped as two text regions. The header region
// lists column names one per line; the body region is the cells flattened
// column-major, so every `headers.len()` lines make one record.

use crate::core::record::{Cell, Record};
use crate::core::sanitize::non_blank_lines;
use crate::core::units::size_to_megabytes;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridTable {
    headers: String,
    data: String,
}

impl GridTable {
    pub fn new(headers: impl Into<String>, data: impl Into<String>) -> Self {
        Self { headers: headers.into(), data: data.into() }
    }

    pub fn headers(&self) -> Vec<&str> {
        non_blank_lines(&self.headers)
    }

    /// Records in order. A trailing group shorter than the header count is dropped.
    pub fn parse(&self) -> Vec<Record<Cell>> {
        let headers = self.headers();
        let stride = headers.len();
        if stride == 0 {
            return Vec::new();
        }

        let lines = non_blank_lines(&self.data);
        let dropped = lines.len() % stride;
        if dropped > 0 {
            logd!("Grid: dropping {dropped} trailing cells (stride {stride})");
        }

        lines
            .chunks_exact(stride)
            .map(|group| {
                headers
                    .iter()
                    .zip(group)
                    .map(|(h, raw)| (*h, Cell::parse(raw)))
                    .collect()
            })
            .collect()
    }

    /// Largest value in `column` (last column when `None`), with storage
    /// sizes brought to megabytes. Cells that are neither numbers nor sizes
    /// are skipped.
    pub fn table_max(&self, column: Option<&str>) -> Option<f64> {
        self.table_max_entry(column).map(|(_, v)| v)
    }

    /// The record behind [`table_max`](Self::table_max).
    pub fn table_max_record(&self, column: Option<&str>) -> Option<Record<Cell>> {
        let (rec, _) = self.table_max_entry(column)?;
        Some(rec)
    }

    fn table_max_entry(&self, column: Option<&str>) -> Option<(Record<Cell>, f64)> {
        let records = self.parse();
        let column = match column {
            Some(c) => c.to_string(),
            None => records.first()?.last_key()?.to_string(),
        };

        let mut best: Option<(usize, f64)> = None;
        for (i, rec) in records.iter().enumerate() {
            let Some(v) = rec.get(&column).and_then(cell_megabytes) else { continue };
            match best {
                Some((_, b)) if v <= b => {}
                _ => best = Some((i, v)),
            }
        }

        let (ix, v) = best?;
        records.into_iter().nth(ix).map(|rec| (rec, v))
    }
}

/// Uniform numeric view of a cell: numbers as-is, sizes in megabytes.
pub fn cell_megabytes(cell: &Cell) -> Option<f64> {
    let v = match cell {
        Cell::Text(t) => size_to_megabytes(t)?,
        other => other.as_f64()?,
    };
    (!v.is_nan()).then_some(v)
}
