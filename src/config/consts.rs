// src/config/consts.rs

// Range queries
pub const QUERY_RANGE_PATH: &str = "/api/v1/query_range";
pub const RANGE_PLACEHOLDER: &str = "$__range";
pub const DASHBOARD_API_PATH: &str = "/api/dashboards/uid/";
pub const STEP_WIDE: &str = "6h";   // span > STEP_WIDE_DAYS
pub const STEP_MEDIUM: &str = "1h"; // span > STEP_MEDIUM_DAYS
pub const STEP_NARROW: &str = "5m";
pub const STEP_WIDE_DAYS: i64 = 15;
pub const STEP_MEDIUM_DAYS: i64 = 5;

// Time formats
pub const QUERY_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";
pub const PANEL_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S.000Z";
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
pub const REPORT_DATE_FORMAT: &str = "%Y-%m-%d";

// Dashboard time picker defaults
pub const DEFAULT_FROM: &str = "now-1d";
pub const DEFAULT_TO: &str = "now";

// Report output
pub const DEFAULT_OUT_DIR: &str = "out";
pub const DEFAULT_RESULT_FILE: &str = "result.tsv";
pub const RESULT_SEP: char = '\t';
