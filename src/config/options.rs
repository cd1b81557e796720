// src/config/options.rs
use std::path::PathBuf;

use super::consts::*;

/// Environment keys read by [`InspectOptions::from_env`].
pub const ENV_PROMETHEUS_URL: &str = "PROMETHEUS_URL";
pub const ENV_GRAFANA_URL: &str = "GF_URL";
pub const ENV_DASHBOARD_UID: &str = "GF_UID";
pub const ENV_FROM: &str = "INSPECT_FROM";
pub const ENV_TO: &str = "INSPECT_TO";
pub const ENV_OUT_DIR: &str = "INSPECT_OUT_DIR";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InspectOptions {
    pub prometheus_url: Option<String>,
    pub grafana_url: Option<String>,
    pub dashboard_uid: Option<String>,
    /// Time-picker expressions (`now-1d`, `now/M`, RFC 3339, …)
    pub date_from: String,
    pub date_to: String,
    pub out_dir: PathBuf,
    pub result_file: String,
}

impl Default for InspectOptions {
    fn default() -> Self {
        Self {
            prometheus_url: None,
            grafana_url: None,
            dashboard_uid: None,
            date_from: s!(DEFAULT_FROM),
            date_to: s!(DEFAULT_TO),
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
            result_file: s!(DEFAULT_RESULT_FILE),
        }
    }
}

impl InspectOptions {
    /// Defaults overlaid with the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overlaid with whatever `lookup` knows. Empty values are ignored.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let mut opts = Self::default();

        opts.prometheus_url = get(ENV_PROMETHEUS_URL);
        opts.grafana_url = get(ENV_GRAFANA_URL);
        opts.dashboard_uid = get(ENV_DASHBOARD_UID);
        if let Some(v) = get(ENV_FROM) { opts.date_from = v; }
        if let Some(v) = get(ENV_TO) { opts.date_to = v; }
        if let Some(v) = get(ENV_OUT_DIR) { opts.out_dir = PathBuf::from(v); }
        opts
    }

    pub fn result_path(&self) -> PathBuf {
        self.out_dir.join(&self.result_file)
    }

    /// `<GF_URL>/api/dashboards/uid/<GF_UID>`, the call that returns the
    /// dashboard definition. `None` unless both are set.
    pub fn dashboard_endpoint(&self) -> Option<String> {
        let base = self.grafana_url.as_deref()?;
        let uid = self.dashboard_uid.as_deref()?;
        Some(join!(base.trim_end_matches('/'), DASHBOARD_API_PATH, uid))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
    Tsv,
}

impl ExportFormat {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Some(ExportFormat::Json),
            "csv" => Some(ExportFormat::Csv),
            "tsv" => Some(ExportFormat::Tsv),
            _ => None,
        }
    }
    /// Field separator; JSON has none.
    pub fn delim(&self) -> Option<char> {
        match self { ExportFormat::Json => None, ExportFormat::Csv => Some(','), ExportFormat::Tsv => Some('\t') }
    }
}
