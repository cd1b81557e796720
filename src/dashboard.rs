// src/dashboard.rs
//
// Reading a dashboard definition (the JSON the dashboard API returns for a
// uid): template variables and the list of panels to inspect.

use std::collections::HashMap;
use std::sync::OnceLock;

use regex::{Captures, Regex};
use serde::Serialize;
use serde_json::Value;

/// One inspectable panel. Row panels are not listed themselves; they only
/// provide `row` for the panels they own.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PanelInfo {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// Target expressions with template variables substituted.
    pub exprs: Vec<String>,
    pub row: Option<String>,
}

pub struct Dashboard {
    json: Value,
    variables: HashMap<String, String>,
}

/// `${var}`, `${var:fmt}` and bare `$var`. A format suffix is only read
/// inside braces, so `$node:9100` keeps its port.
fn variable_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\$\{(\w+)(?::[^}]*)?\}|\$(\w+)").expect("variable regex")
    })
}

impl Dashboard {
    pub fn from_value(json: Value) -> Self {
        let variables = read_variables(&json);
        logd!("Dashboard: {} template variables", variables.len());
        Self { json, variables }
    }

    pub fn parse(text: &str) -> serde_json::Result<Self> {
        Ok(Self::from_value(serde_json::from_str(text)?))
    }

    /// Current values of the template variables. Multi-value selections are
    /// joined with `|`.
    pub fn variables(&self) -> &HashMap<String, String> {
        &self.variables
    }

    /// Replace known variables in `query`; unknown ones stay as written.
    pub fn substitute(&self, query: &str) -> String {
        variable_re()
            .replace_all(query, |caps: &Captures<'_>| {
                let name = caps.get(1).or_else(|| caps.get(2)).map(|m| m.as_str());
                match name.and_then(|n| self.variables.get(n)) {
                    Some(v) => v.clone(),
                    None => s!(&caps[0]),
                }
            })
            .into_owned()
    }

    /// Non-row panels in dashboard order. Collapsed rows carry their panels
    /// nested; an expanded row owns the top-level panels that follow it.
    pub fn panels(&self) -> Vec<PanelInfo> {
        let mut out = Vec::new();
        let Some(top) = self.json.pointer("/dashboard/panels").and_then(Value::as_array) else {
            logd!("Dashboard: no dashboard.panels");
            return out;
        };

        let mut current_row: Option<String> = None;
        for panel in top {
            if panel_type(panel) == Some("row") {
                current_row = panel.get("title").and_then(Value::as_str).map(String::from);
                if panel.get("collapsed").and_then(Value::as_bool).unwrap_or(false) {
                    let nested = panel.get("panels").and_then(Value::as_array);
                    for sub in nested.into_iter().flatten() {
                        if panel_type(sub) != Some("row") {
                            self.push_panel(&mut out, sub, current_row.as_deref());
                        }
                    }
                }
            } else {
                self.push_panel(&mut out, panel, current_row.as_deref());
            }
        }
        out
    }

    fn push_panel(&self, out: &mut Vec<PanelInfo>, panel: &Value, row: Option<&str>) {
        let (Some(id), Some(title)) = (
            panel.get("id").and_then(Value::as_i64),
            panel.get("title").and_then(Value::as_str),
        ) else {
            return;
        };

        let exprs = panel
            .get("targets")
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
            .filter_map(|t| t.get("expr").and_then(Value::as_str))
            .map(|e| self.substitute(e))
            .collect();

        out.push(PanelInfo {
            id,
            title: s!(title),
            description: panel.get("description").and_then(Value::as_str).map(String::from),
            kind: panel_type(panel).map(String::from),
            exprs,
            row: row.map(String::from),
        });
    }
}

fn panel_type(panel: &Value) -> Option<&str> {
    panel.get("type").and_then(Value::as_str)
}

fn read_variables(json: &Value) -> HashMap<String, String> {
    let mut vars = HashMap::new();
    let Some(list) = json.pointer("/dashboard/templating/list").and_then(Value::as_array) else {
        return vars;
    };
    for var in list {
        let Some(name) = var.get("name").and_then(Value::as_str) else { continue };
        let value = match var.pointer("/current/value") {
            Some(Value::Array(items)) => items.iter().map(scalar_text).collect::<Vec<_>>().join("|"),
            Some(Value::Null) | None => continue,
            Some(other) => scalar_text(other),
        };
        vars.insert(s!(name), value);
    }
    vars
}

fn scalar_text(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
