// src/query.rs
//
// Building range queries against a Prometheus-compatible backend, and
// resolving the dashboard time-picker expressions that bound them.
// No clock is read here: callers pass `now`.

use chrono::{DateTime, Datelike, Duration, NaiveDateTime, TimeZone, Utc};

use crate::config::consts::*;

/// Parameters of one `/api/v1/query_range` call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RangeQuery {
    pub query: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub step: String,
}

impl RangeQuery {
    /// Pick the step from the span and expand `$__range` to whole days.
    pub fn new(expr: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        let days = (end - start).num_days();
        let query = if expr.contains(RANGE_PLACEHOLDER) {
            expr.replace(RANGE_PLACEHOLDER, &format!("{days}d"))
        } else {
            s!(expr)
        };
        let step = s!(step_for_days(days));
        logd!("Query: {query} [{start} .. {end}] step {step}");
        Self { query, start, end, step }
    }

    /// `<base>/api/v1/query_range`
    pub fn endpoint(&self, base_url: &str) -> String {
        join!(base_url.trim_end_matches('/'), QUERY_RANGE_PATH)
    }

    /// Query-string pairs, unencoded; the HTTP client encodes them.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("query", self.query.clone()),
            ("start", self.start.format(QUERY_TIME_FORMAT).to_string()),
            ("end", self.end.format(QUERY_TIME_FORMAT).to_string()),
            ("step", self.step.clone()),
        ]
    }
}

pub fn step_for_days(days: i64) -> &'static str {
    if days > STEP_WIDE_DAYS {
        STEP_WIDE
    } else if days > STEP_MEDIUM_DAYS {
        STEP_MEDIUM
    } else {
        STEP_NARROW
    }
}

/// Resolve a time-picker expression against `now`:
/// `now`, `now/M` (start of month), `now-<N>d`. Anything else is returned as is.
pub fn resolve_time_expr(expr: &str, now: DateTime<Utc>) -> String {
    let expr = expr.trim();
    let at = match expr {
        "now" => Some(now),
        "now/M" => start_of_month(now),
        _ => expr
            .strip_prefix("now-")
            .and_then(|rest| rest.strip_suffix('d'))
            .and_then(|n| n.parse::<i64>().ok())
            .and_then(Duration::try_days)
            .and_then(|back| now.checked_sub_signed(back)),
    };
    match at {
        Some(t) => t.format(PANEL_TIME_FORMAT).to_string(),
        None => s!(expr),
    }
}

fn start_of_month(now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    Utc.with_ymd_and_hms(now.year(), now.month(), 1, 0, 0, 0).single()
}

/// Parse an absolute instant: RFC 3339 (`2026-01-02T00:00:00.000Z`) or the
/// query format without fractional seconds.
pub fn parse_instant(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(s, QUERY_TIME_FORMAT)
        .ok()
        .map(|naive| naive.and_utc())
}

/// Resolve and parse in one go; `None` when the expression is not a time.
pub fn resolve_instant(expr: &str, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    parse_instant(&resolve_time_expr(expr, now))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(s: &str) -> DateTime<Utc> {
        parse_instant(s).unwrap()
    }

    #[test]
    fn step_follows_span() {
        assert_eq!(step_for_days(0), "5m");
        assert_eq!(step_for_days(5), "5m");
        assert_eq!(step_for_days(6), "1h");
        assert_eq!(step_for_days(15), "1h");
        assert_eq!(step_for_days(16), "6h");
    }

    #[test]
    fn range_placeholder_becomes_days() {
        let q = RangeQuery::new(
            r#"sum(increase(http_requests_total[$__range])) by (service)"#,
            at("2025-12-17T00:00:00Z"),
            at("2026-01-01T23:00:00Z"),
        );
        assert_eq!(q.query, "sum(increase(http_requests_total[15d])) by (service)");
        assert_eq!(q.step, "1h");
        assert_eq!(
            q.params(),
            vec![
                ("query", q.query.clone()),
                ("start", s!("2025-12-17T00:00:00Z")),
                ("end", s!("2026-01-01T23:00:00Z")),
                ("step", s!("1h")),
            ]
        );
        assert_eq!(q.endpoint("http://prom:9090/"), "http://prom:9090/api/v1/query_range");
    }

    #[test]
    fn time_expressions() {
        let now = at("2026-01-15T10:20:30Z");
        assert_eq!(resolve_time_expr("now", now), "2026-01-15T10:20:30.000Z");
        assert_eq!(resolve_time_expr("now/M", now), "2026-01-01T00:00:00.000Z");
        assert_eq!(resolve_time_expr("now-7d", now), "2026-01-08T10:20:30.000Z");
        assert_eq!(resolve_time_expr("2023-10-01T00:00:00.000Z", now), "2023-10-01T00:00:00.000Z");
        assert_eq!(resolve_time_expr("now-xd", now), "now-xd");
    }

    #[test]
    fn instants_round_trip() {
        let now = at("2026-01-15T10:20:30Z");
        assert_eq!(resolve_instant("now-1d", now), Some(at("2026-01-14T10:20:30Z")));
        assert_eq!(resolve_instant("yesterday", now), None);
    }
}
