// src/series.rs
//
// Reductions over a Prometheus-style range-query response:
//
//   { "data": { "result": [ { "metric": {..labels}, "values": [[ts, "v"], ..] }, .. ] } }
//
// Max / min keep the label set and timestamp of the winning sample; mean keeps
// the sample count. Malformed pieces are skipped, and a response with nothing
// usable yields `value: None` rather than an error. NaN samples never count.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{Local, TimeZone};
use serde::Serialize;
use serde_json::Value;

use crate::config::consts::TIMESTAMP_FORMAT;

pub type Labels = BTreeMap<String, String>;

/// Max or min sample across all series.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Extremum {
    pub value: Option<f64>,
    pub labels: Option<Labels>,
    pub timestamp: Option<f64>,
    pub timestamp_formatted: Option<String>,
}

impl Extremum {
    pub fn is_empty(&self) -> bool {
        self.value.is_none()
    }
}

/// Mean over every valid sample of every series.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Mean {
    pub value: Option<f64>,
    pub total_samples: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Reduction {
    Max,
    Min,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct TimeSeriesPoint {
    pub timestamp: f64,
    pub value: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct LabeledSeries {
    pub labels: Labels,
    pub points: Vec<TimeSeriesPoint>,
}

/// A sample that got past shape checks. The timestamp is kept optional so the
/// mean can still use a sample whose timestamp is junk.
struct RawSample<'a> {
    series: &'a Value,
    timestamp: Option<f64>,
    value: f64,
}

fn result_array(response: &Value) -> Option<&Vec<Value>> {
    let Some(obj) = response.as_object() else {
        logd!("Series: response is not an object");
        return None;
    };
    let Some(result) = obj.get("data").and_then(|d| d.get("result")) else {
        logd!("Series: response has no data.result");
        return None;
    };
    let arr = result.as_array();
    if arr.is_none() {
        logd!("Series: data.result is not an array");
    }
    arr
}

/// String or JSON number. Booleans, nulls and the rest are not values.
fn parse_scalar(v: &Value) -> Option<f64> {
    match v {
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Number(n) => n.as_f64(),
        _ => None,
    }
}

fn labels_of(series: &Value) -> Labels {
    let Some(metric) = series.get("metric").and_then(Value::as_object) else {
        return Labels::new();
    };
    metric
        .iter()
        .map(|(k, v)| {
            let v = match v {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            (k.clone(), v)
        })
        .collect()
}

/// Sample arrays of one series: range queries carry `values`, instant
/// queries a single `value`.
fn sample_arrays(series: &Value) -> Vec<&Value> {
    if let Some(values) = series.get("values").and_then(Value::as_array) {
        return values.iter().collect();
    }
    series.get("value").into_iter().collect()
}

fn raw_samples(response: &Value) -> Vec<RawSample<'_>> {
    let Some(result) = result_array(response) else {
        return Vec::new();
    };
    let mut out = Vec::new();
    for series in result {
        for sample in sample_arrays(series) {
            let Some(pair) = sample.as_array().filter(|a| a.len() >= 2) else {
                logd!("Series: skipping sample {sample}");
                continue;
            };
            let Some(value) = parse_scalar(&pair[1]) else {
                logd!("Series: unparsable value {}", pair[1]);
                continue;
            };
            out.push(RawSample { series, timestamp: parse_scalar(&pair[0]), value });
        }
    }
    out
}

/// Typed view of the response. Samples with an unusable timestamp or value
/// are left out; NaN values are kept as reported.
pub fn labeled_series(response: &Value) -> Vec<LabeledSeries> {
    let Some(result) = result_array(response) else {
        return Vec::new();
    };
    result
        .iter()
        .map(|series| {
            let points = sample_arrays(series)
                .into_iter()
                .filter_map(|sample| {
                    let pair = sample.as_array().filter(|a| a.len() >= 2)?;
                    Some(TimeSeriesPoint {
                        timestamp: parse_scalar(&pair[0])?,
                        value: parse_scalar(&pair[1])?,
                    })
                })
                .collect();
            LabeledSeries { labels: labels_of(series), points }
        })
        .collect()
}

/// Epoch seconds as `%Y-%m-%d %H:%M:%S` in `tz`.
pub fn format_timestamp_in<Tz: TimeZone>(ts: f64, tz: &Tz) -> Option<String>
where
    Tz::Offset: fmt::Display,
{
    if !ts.is_finite() {
        return None;
    }
    let secs = ts.floor();
    let nanos = (((ts - secs) * 1e9) as u32).min(999_999_999);
    tz.timestamp_opt(secs as i64, nanos)
        .earliest()
        .map(|dt| dt.format(TIMESTAMP_FORMAT).to_string())
}

/// Max or min across all series, timestamp formatted in `tz`.
/// Only a strict improvement moves the pick, so the first of equal samples wins.
pub fn extremum_in<Tz: TimeZone>(response: &Value, reduction: Reduction, tz: &Tz) -> Extremum
where
    Tz::Offset: fmt::Display,
{
    let mut running = match reduction {
        Reduction::Max => f64::NEG_INFINITY,
        Reduction::Min => f64::INFINITY,
    };
    let mut pick: Option<(&Value, f64)> = None;

    for s in raw_samples(response) {
        if s.value.is_nan() {
            continue;
        }
        let Some(ts) = s.timestamp else {
            logd!("Series: sample {} has no usable timestamp", s.value);
            continue;
        };
        let better = match reduction {
            Reduction::Max => s.value > running,
            Reduction::Min => s.value < running,
        };
        if better {
            running = s.value;
            pick = Some((s.series, ts));
        }
    }

    let Some((series, ts)) = pick else {
        return Extremum::default();
    };
    Extremum {
        value: Some(running),
        labels: Some(labels_of(series)),
        timestamp: Some(ts),
        timestamp_formatted: format_timestamp_in(ts, tz),
    }
}

pub fn max_with_labels_in<Tz: TimeZone>(response: &Value, tz: &Tz) -> Extremum
where
    Tz::Offset: fmt::Display,
{
    extremum_in(response, Reduction::Max, tz)
}

pub fn min_with_labels_in<Tz: TimeZone>(response: &Value, tz: &Tz) -> Extremum
where
    Tz::Offset: fmt::Display,
{
    extremum_in(response, Reduction::Min, tz)
}

/// Largest sample with its labels; timestamp formatted in local time.
pub fn max_with_labels(response: &Value) -> Extremum {
    max_with_labels_in(response, &Local)
}

/// Smallest sample with its labels; timestamp formatted in local time.
pub fn min_with_labels(response: &Value) -> Extremum {
    min_with_labels_in(response, &Local)
}

pub fn avg_with_labels(response: &Value) -> Mean {
    let (sum, count) = raw_samples(response)
        .iter()
        .filter(|s| !s.value.is_nan())
        .fold((0.0, 0usize), |(sum, n), s| (sum + s.value, n + 1));
    Mean {
        value: (count > 0).then(|| sum / count as f64),
        total_samples: count,
    }
}
