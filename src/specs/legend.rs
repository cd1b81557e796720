// src/specs/legend.rs
//
// Legend tables: the text a panel legend renders in "table" mode.
//
//   Name Mean Max
//   gw_elk1
//   79.3% 79.5%
//   gw_elk2
//   77.8% 78.1%
//
// First line holds the column names, then each entity is a name line followed
// by one metrics line. A block is treated as unit-homogeneous: the unit family
// is sniffed once from the first metric lines and applied to every line.

use std::sync::OnceLock;

use regex::Regex;

use crate::core::record::Record;
use crate::core::sanitize::{header_tokens, non_blank_lines, normalize_ws};
use crate::core::units::{convert_to_comparable, round4};

pub const NAME_FIELD: &str = "Name";
pub const MAX_FIELD: &str = "Max";
pub const MEAN_FIELD: &str = "Mean";

/// How many metric lines are looked at to pick the block's unit family.
const SAMPLE_LINES: usize = 2;

/// Unit family of a legend block.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DataKind {
    /// `79.5%`
    Percentage,
    /// Storage sizes: `1.2 GiB`, `300 MB`
    FullUnits,
    /// Counts: `1.2 K`, `3 Mil`
    ShortUnits,
    /// Durations: `200 ms`, `3 s`
    TimeUnits,
    /// Bare numbers
    Plain,
}

fn storage_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\d\s*(?:KiB|MiB|GiB|TiB|KB|MB|GB|TB)\b").expect("storage regex")
    })
}

fn count_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\d\s*(?:Mil|K|M|G)\b").expect("count regex"))
}

fn time_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\d\s*(?:ms|s)\b").expect("time regex"))
}

/// Number with an optional size/count suffix kept attached.
fn unit_token_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"-?\d+(?:\.\d+)?(?:\s*(?:KiB|MiB|GiB|TiB|KB|MB|GB|TB|Mil|K|M|G)\b)?")
            .expect("unit token regex")
    })
}

/// Number followed by `ms` or `s`.
fn time_token_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"-?\d+(?:\.\d+)?\s*(?:ms|s)\b").expect("time token regex"))
}

impl DataKind {
    /// Classify one piece of metric text.
    pub fn detect(sample: &str) -> Self {
        if sample.contains('%') {
            DataKind::Percentage
        } else if storage_re().is_match(sample) {
            DataKind::FullUnits
        } else if count_re().is_match(sample) {
            DataKind::ShortUnits
        } else if time_re().is_match(sample) {
            DataKind::TimeUnits
        } else {
            DataKind::Plain
        }
    }

    /// Split a metrics line into value tokens for this family.
    pub fn tokens(self, line: &str) -> Vec<String> {
        match self {
            DataKind::Percentage | DataKind::Plain => {
                line.split_whitespace().map(String::from).collect()
            }
            DataKind::FullUnits | DataKind::ShortUnits => {
                unit_token_re().find_iter(line).map(|m| s!(m.as_str())).collect()
            }
            DataKind::TimeUnits => {
                time_token_re().find_iter(line).map(|m| s!(m.as_str())).collect()
            }
        }
    }
}

/// Block kind from the first metric lines (body lines 1, 3, …).
fn detect_block(body: &[&str]) -> DataKind {
    let sample: Vec<&str> = body
        .iter()
        .skip(1)
        .step_by(2)
        .take(SAMPLE_LINES)
        .copied()
        .collect();
    DataKind::detect(&sample.join(" "))
}

/// Tokens for one metrics line. If the block kind comes up short, the line is
/// classified on its own and the longer result is kept. A line that yields
/// enough tokens under the block kind is never re-read, so a `1.2 GiB 3 GiB`
/// line in a `Plain` block still splits on whitespace.
fn metric_tokens(kind: DataKind, line: &str, want: usize) -> Vec<String> {
    let toks = kind.tokens(line);
    if toks.len() >= want {
        return toks;
    }
    let own = DataKind::detect(line);
    if own == kind {
        return toks;
    }
    let alt = own.tokens(line);
    if alt.len() > toks.len() {
        logd!("Legend: line {:?} re-read as {:?} (block is {:?})", line, own, kind);
        alt
    } else {
        toks
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LegendTable {
    text: String,
}

impl LegendTable {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Column names from the header line (`Name` first), empty for a blank block.
    pub fn headers(&self) -> Vec<String> {
        non_blank_lines(&self.text)
            .first()
            .map(|l| header_tokens(l))
            .unwrap_or_default()
    }

    /// Detected unit family, `None` when there is nothing to parse.
    pub fn kind(&self) -> Option<DataKind> {
        let lines = non_blank_lines(&self.text);
        if lines.len() < 2 {
            return None;
        }
        Some(detect_block(&lines[1..]))
    }

    /// Records in block order. Never fails: short metric lines leave empty
    /// strings, fewer than two lines give an empty list.
    pub fn parse(&self) -> Vec<Record<String>> {
        let lines = non_blank_lines(&self.text);
        if lines.len() < 2 {
            return Vec::new();
        }

        let headers = header_tokens(lines[0]);
        let columns = headers.get(1..).unwrap_or_default();
        let body = &lines[1..];
        let kind = detect_block(body);
        logd!("Legend: {} columns, {} body lines, kind {:?}", headers.len(), body.len(), kind);

        let mut out = Vec::with_capacity(body.len().div_ceil(2));
        for pair in body.chunks(2) {
            let name = normalize_ws(pair[0]);
            let tokens = match pair.get(1) {
                Some(line) => metric_tokens(kind, line, columns.len()),
                None => Vec::new(),
            };
            if tokens.len() < columns.len() {
                logd!("Legend: {name}: {} of {} values", tokens.len(), columns.len());
            }

            let mut rec = Record::with_capacity(columns.len() + 1);
            rec.insert(NAME_FIELD, name);
            for (i, col) in columns.iter().enumerate() {
                rec.insert(col.as_str(), tokens.get(i).cloned().unwrap_or_default());
            }
            out.push(rec);
        }
        out
    }

    /// Record with the largest `field` under unit-aware ordering.
    /// `None` if nothing parsed or the first record has no such column.
    pub fn max_record(&self, field: &str) -> Option<Record<String>> {
        let records = self.parse();
        let (ix, _) = extremum(&records, field, |v, best| v > best)?;
        records.into_iter().nth(ix)
    }

    /// Normalised value behind [`max_record`](Self::max_record), 4 decimal places.
    pub fn max_numeric(&self, field: &str) -> Option<f64> {
        extremum(&self.parse(), field, |v, best| v > best).map(|(_, v)| round4(v))
    }

    pub fn min_record(&self, field: &str) -> Option<Record<String>> {
        let records = self.parse();
        let (ix, _) = extremum(&records, field, |v, best| v < best)?;
        records.into_iter().nth(ix)
    }

    pub fn min_numeric(&self, field: &str) -> Option<f64> {
        extremum(&self.parse(), field, |v, best| v < best).map(|(_, v)| round4(v))
    }

    /// Record with the highest `Mean`.
    pub fn mean_max_record(&self) -> Option<Record<String>> {
        self.max_record(MEAN_FIELD)
    }

    pub fn mean_max_numeric(&self) -> Option<f64> {
        self.max_numeric(MEAN_FIELD)
    }
}

/// Index and comparable value of the winning record. Only a strict
/// improvement replaces the current pick, so the first of equals wins.
fn extremum(
    records: &[Record<String>],
    field: &str,
    better: fn(f64, f64) -> bool,
) -> Option<(usize, f64)> {
    if !records.first()?.contains_key(field) {
        return None;
    }
    let mut best: Option<(usize, f64)> = None;
    for (i, rec) in records.iter().enumerate() {
        let v = convert_to_comparable(rec.get(field).map(String::as_str).unwrap_or(""));
        match best {
            Some((_, b)) if !better(v, b) => {}
            _ => best = Some((i, v)),
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_unit_family() {
        assert_eq!(DataKind::detect("70.3% 79.5%"), DataKind::Percentage);
        assert_eq!(DataKind::detect("1.2 GiB 3 GiB"), DataKind::FullUnits);
        assert_eq!(DataKind::detect("500MB 1GB"), DataKind::FullUnits);
        assert_eq!(DataKind::detect("1.2 K 3 Mil"), DataKind::ShortUnits);
        assert_eq!(DataKind::detect("272 ms 1.5 s"), DataKind::TimeUnits);
        assert_eq!(DataKind::detect("12 40"), DataKind::Plain);
    }

    #[test]
    fn unit_tokens_keep_suffix() {
        assert_eq!(
            DataKind::FullUnits.tokens("1.2 GiB 300MiB 7"),
            vec!["1.2 GiB", "300MiB", "7"]
        );
        assert_eq!(DataKind::ShortUnits.tokens("2 Mil 1.5K"), vec!["2 Mil", "1.5K"]);
        assert_eq!(DataKind::TimeUnits.tokens("272 ms 1.5s"), vec!["272 ms", "1.5s"]);
        assert_eq!(DataKind::Plain.tokens(" 1  2 "), vec!["1", "2"]);
    }

    #[test]
    fn short_line_falls_back_to_own_kind() {
        // Block sniffed as durations, one line carries bare numbers
        let toks = metric_tokens(DataKind::TimeUnits, "12 40", 2);
        assert_eq!(toks, vec!["12", "40"]);
    }

    #[test]
    fn block_kind_wins_when_it_yields_enough() {
        let toks = metric_tokens(DataKind::Plain, "1.2 GiB 3 GiB", 2);
        assert_eq!(toks, vec!["1.2", "GiB", "3", "GiB"]);
    }

    #[test]
    fn sample_is_metric_lines_only() {
        // Names that look like units must not steer detection
        let body = ["node 5s", "12 40", "node 6s", "13 41"];
        assert_eq!(detect_block(&body), DataKind::Plain);
    }
}
