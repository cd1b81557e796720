// src/report.rs
//
// The result file: one `title<TAB>value` line per inspected panel, appended
// as panels are processed and read back when the report is assembled.

use std::{
    fs::{self, OpenOptions},
    io::{self, BufWriter, Write},
    path::Path,
};

use chrono::{DateTime, TimeZone};
use serde::Serialize;

use crate::config::consts::{REPORT_DATE_FORMAT, RESULT_SEP};
use crate::core::record::Record;
use crate::core::units::round4;
use crate::series::{Extremum, Labels, Mean};
use crate::specs::legend::NAME_FIELD;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ReportEntry {
    pub title: String,
    pub value: String,
}

impl ReportEntry {
    pub fn new(title: impl Into<String>, value: impl Into<String>) -> Self {
        Self { title: title.into(), value: value.into() }
    }

    /// `"<name> <field value>"` from a legend record, e.g. `gw_elk1 79.5%`.
    pub fn from_legend(title: &str, record: Option<&Record<String>>, field: &str) -> Self {
        let value = match record {
            Some(rec) => {
                let name = rec.get(NAME_FIELD).map(String::as_str).unwrap_or("");
                let v = rec.get(field).map(String::as_str).unwrap_or("");
                join!(name, " ", v).trim().to_string()
            }
            None => s!(NO_DATA),
        };
        Self::new(title, value)
    }

    /// `"<value> {labels} @ <time>"` from a max/min result.
    pub fn from_extremum(title: &str, ext: &Extremum) -> Self {
        let value = match ext.value {
            Some(v) => {
                let mut out = format_number(v);
                if let Some(labels) = ext.labels.as_ref().filter(|l| !l.is_empty()) {
                    out.push(' ');
                    out.push_str(&format_labels(labels));
                }
                if let Some(ts) = &ext.timestamp_formatted {
                    out.push_str(" @ ");
                    out.push_str(ts);
                }
                out
            }
            None => s!(NO_DATA),
        };
        Self::new(title, value)
    }

    /// `"<mean> (<n> samples)"`
    pub fn from_mean(title: &str, mean: &Mean) -> Self {
        let value = match mean.value {
            Some(v) => format!("{} ({} samples)", format_number(v), mean.total_samples),
            None => s!(NO_DATA),
        };
        Self::new(title, value)
    }
}

/// Value written when a panel produced nothing.
pub const NO_DATA: &str = "no data";

pub fn format_number(v: f64) -> String {
    format!("{}", round4(v))
}

/// `{instance="a", job="node"}`
pub fn format_labels(labels: &Labels) -> String {
    let inner: Vec<String> = labels.iter().map(|(k, v)| format!("{k}=\"{v}\"")).collect();
    join!("{", &inner.join(", "), "}")
}

pub fn ensure_directory(dir: &Path) -> io::Result<()> {
    if dir.exists() && !dir.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("Path exists but is not a directory: {}", dir.display()),
        ));
    }
    if !dir.exists() { fs::create_dir_all(dir)?; }
    Ok(())
}

/// One `title<TAB>value` line, no quoting. Tabs and line breaks inside
/// either part become spaces.
pub fn entry_line(entry: &ReportEntry) -> String {
    format!("{}{RESULT_SEP}{}\n", one_line(&entry.title), one_line(&entry.value))
}

fn one_line(s: &str) -> String {
    s.replace(['\t', '\r', '\n'], " ")
}

/// Append one entry, creating the file and its parent directories as needed.
pub fn append_entry(path: &Path, entry: &ReportEntry) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let mut out = BufWriter::new(file);
    out.write_all(entry_line(entry).as_bytes())?;
    out.flush()?;
    logf!("Report: {} -> {}", entry.title, path.display());
    Ok(())
}

/// Entries in file order, split at the first tab. A line without one is a
/// title with an empty value; blank lines are skipped.
pub fn load_entries(path: &Path) -> io::Result<Vec<ReportEntry>> {
    let text = fs::read_to_string(path)?;
    Ok(text
        .lines()
        .map(|l| l.trim_end_matches('\r'))
        .filter(|l| !l.trim().is_empty())
        .map(|l| match l.split_once(RESULT_SEP) {
            Some((title, value)) => ReportEntry::new(title, value),
            None => ReportEntry::new(l, ""),
        })
        .collect())
}

/// `"<name> <YYYY-MM-DD> inspection report"`, dated in `now`'s zone.
pub fn report_title<Tz: TimeZone>(name: &str, now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!("{name} {} inspection report", now.format(REPORT_DATE_FORMAT))
}

/// `"<name>_<YYYY-MM-DD>.zip"` for the screenshot archive.
pub fn archive_name<Tz: TimeZone>(name: &str, now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!("{name}_{}.zip", now.format(REPORT_DATE_FORMAT))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    #[test]
    fn labels_render_sorted() {
        let labels: Labels = [("job", "node"), ("instance", "10.0.0.1:9100")]
            .into_iter()
            .map(|(k, v)| (s!(k), s!(v)))
            .collect();
        assert_eq!(format_labels(&labels), r#"{instance="10.0.0.1:9100", job="node"}"#);
    }

    #[test]
    fn title_uses_callers_zone() {
        // 2026-01-01 20:00 UTC is already Jan 2 in UTC+8
        let utc = Utc.with_ymd_and_hms(2026, 1, 1, 20, 0, 0).unwrap();
        let cst = utc.with_timezone(&FixedOffset::east_opt(8 * 3600).unwrap());
        assert_eq!(report_title("gw", &utc), "gw 2026-01-01 inspection report");
        assert_eq!(report_title("gw", &cst), "gw 2026-01-02 inspection report");
        assert_eq!(archive_name("gw", &cst), "gw_2026-01-02.zip");
    }

    #[test]
    fn entry_lines_are_raw() {
        let labels: Labels = [(s!("instance"), s!("10.0.0.1:9100"))].into_iter().collect();
        let ext = Extremum {
            value: Some(4.25),
            labels: Some(labels),
            timestamp: Some(1767232800.0),
            timestamp_formatted: Some(s!("2026-01-01 02:00:00")),
        };
        assert_eq!(
            entry_line(&ReportEntry::from_extremum("Load", &ext)),
            "Load\t4.25 {instance=\"10.0.0.1:9100\"} @ 2026-01-01 02:00:00\n"
        );
        assert_eq!(entry_line(&ReportEntry::new("a\tb", "x\ny")), "a b\tx y\n");
    }

    #[test]
    fn no_data_entries() {
        assert_eq!(ReportEntry::from_extremum("cpu", &Extremum::default()).value, NO_DATA);
        assert_eq!(ReportEntry::from_mean("cpu", &Mean::default()).value, NO_DATA);
        assert_eq!(ReportEntry::from_legend("cpu", None, "Max").value, NO_DATA);
    }
}
