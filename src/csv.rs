// src/csv.rs
use std::fmt::Display;
use std::io::{self, Write};

use crate::core::record::Record;

/* ---------------- Writing ---------------- */

fn needs_quotes(field: &str, sep: char) -> bool {
    field.contains(sep) || field.contains('"') || field.contains('\n') || field.contains('\r')
}

/// Write a single CSV/TSV row to any writer.
pub fn write_row<W: Write, S: AsRef<str>>(mut w: W, row: &[S], sep: char) -> io::Result<()> {
    let mut first = true;
    for cell in row {
        let cell = cell.as_ref();
        if !first { write!(w, "{}", sep)?; } else { first = false; }
        if needs_quotes(cell, sep) {
            let escaped = cell.replace('"', "\"\"");
            write!(w, "\"{}\"", escaped)?;
        } else {
            write!(w, "{}", cell)?;
        }
    }
    writeln!(w)
}

/// Header line from the first record's columns, then one line per record.
/// Records missing a column get an empty cell.
pub fn records_to_string<V: Display>(records: &[Record<V>], sep: char) -> String {
    let Some(first) = records.first() else { return s!() };
    let headers: Vec<&str> = first.keys().collect();

    let mut buf: Vec<u8> = Vec::new();
    let _ = write_row(&mut buf, &headers, sep);
    for rec in records {
        let row: Vec<String> = headers
            .iter()
            .map(|h| rec.get(h).map(|v| v.to_string()).unwrap_or_default())
            .collect();
        let _ = write_row(&mut buf, &row, sep);
    }

    match String::from_utf8(buf) {
        Ok(s) => s,
        Err(e) => String::from_utf8_lossy(&e.into_bytes()).into_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::record::Cell;

    #[test]
    fn fields_are_quoted_when_needed() {
        let mut buf = Vec::new();
        write_row(&mut buf, &["a,b", "say \"hi\"", "plain"], ',').unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text, "\"a,b\",\"say \"\"hi\"\"\",plain\n");
    }

    #[test]
    fn records_render_in_column_order() {
        let recs: Vec<Record<Cell>> = vec![
            vec![("Pod", Cell::parse("a")), ("Restarts", Cell::parse("0"))].into_iter().collect(),
            vec![("Pod", Cell::parse("b")), ("Restarts", Cell::parse("9"))].into_iter().collect(),
        ];
        assert_eq!(records_to_string(&recs, ','), "Pod,Restarts\na,0\nb,9\n");
        assert_eq!(records_to_string::<Cell>(&[], ','), "");
    }
}
