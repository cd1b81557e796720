// src/core/record.rs
//
// One parsed row: column name → value, in header order, keys unique.
// Legend tables keep raw strings; grid tables keep typed cells.

use std::fmt;

use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};

/// A grid cell, typed the way the scraped text reads.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Int(i64),
    Float(f64),
    Text(String),
}

impl Cell {
    /// All-digit → `Int`, float-parsable → `Float`, otherwise `Text`.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(i) = raw.parse::<i64>() {
                return Cell::Int(i);
            }
        }
        match raw.parse::<f64>() {
            Ok(f) => Cell::Float(f),
            Err(_) => Cell::Text(s!(raw)),
        }
    }

    /// Numeric view of the cell; text is not a number.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Int(i) => Some(*i as f64),
            Cell::Float(f) => Some(*f),
            Cell::Text(_) => None,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Int(i) => write!(f, "{i}"),
            Cell::Float(v) => write!(f, "{v}"),
            Cell::Text(t) => f.write_str(t),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Record<V> {
    fields: Vec<(String, V)>,
}

impl<V> Default for Record<V> {
    fn default() -> Self {
        Self { fields: Vec::new() }
    }
}

impl<V> Record<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(n: usize) -> Self {
        Self { fields: Vec::with_capacity(n) }
    }

    /// Set `key`. An existing key keeps its position and takes the new value.
    pub fn insert(&mut self, key: impl Into<String>, value: V) {
        let key = key.into();
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    /// Name of the last column, if any.
    pub fn last_key(&self) -> Option<&str> {
        self.fields.last().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V> FromIterator<(K, V)> for Record<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut rec = Record::new();
        for (k, v) in iter {
            rec.insert(k, v);
        }
        rec
    }
}

/// Serialized as a JSON object in column order.
impl<V: Serialize> Serialize for Record<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (k, v) in &self.fields {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_typing() {
        assert_eq!(Cell::parse("9"), Cell::Int(9));
        assert_eq!(Cell::parse(" 12 "), Cell::Int(12));
        assert_eq!(Cell::parse("1.25"), Cell::Float(1.25));
        assert_eq!(Cell::parse("-3"), Cell::Float(-3.0));
        assert_eq!(Cell::parse("73.4 GiB"), Cell::Text(s!("73.4 GiB")));
        assert_eq!(Cell::parse("2025-07-29 23:32:09.486").as_f64(), None);
    }

    #[test]
    fn insert_keeps_order_and_uniqueness() {
        let mut r: Record<String> = Record::new();
        r.insert("Name", s!("a"));
        r.insert("Max", s!("1"));
        r.insert("Name", s!("b"));
        assert_eq!(r.len(), 2);
        assert_eq!(r.keys().collect::<Vec<_>>(), vec!["Name", "Max"]);
        assert_eq!(r.get("Name").map(String::as_str), Some("b"));
        assert_eq!(r.last_key(), Some("Max"));
    }

    #[test]
    fn serializes_in_column_order() {
        let r: Record<Cell> = vec![
            ("Pod", Cell::parse("web-1")),
            ("Restarts", Cell::parse("3")),
            ("Load", Cell::parse("0.5")),
        ]
        .into_iter()
        .collect();
        let json = serde_json::to_string(&r).unwrap();
        assert_eq!(json, r#"{"Pod":"web-1","Restarts":3,"Load":0.5}"#);
    }
}
