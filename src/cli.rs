// src/cli.rs
//
// Offline command surface: every command reads local files (or stdin via
// `-`) that the scraping / query layers saved, and prints the result.
use std::{
    env, fs,
    io::{self, Read},
    path::{Path, PathBuf},
};

use chrono::{Local, Utc};
use color_eyre::eyre::{bail, eyre, Result, WrapErr};
use serde::Serialize;
use serde_json::{json, Value};

use crate::config::options::{ExportFormat, InspectOptions};
use crate::core::record::Record;
use crate::csv::records_to_string;
use crate::dashboard::Dashboard;
use crate::query::{resolve_instant, RangeQuery};
use crate::report::{self, ReportEntry};
use crate::series::{self, Reduction};
use crate::specs::grid::GridTable;
use crate::specs::legend::{LegendTable, MAX_FIELD};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeriesOp {
    Max,
    Min,
    Avg,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Legend { file: PathBuf, field: String, min: bool, all: bool },
    Grid { headers: PathBuf, data: PathBuf, column: Option<String>, all: bool },
    Series { file: PathBuf, op: SeriesOp, utc: bool },
    Panels { file: PathBuf },
    Query { expr: String, from: Option<String>, to: Option<String> },
    Record { title: String, value: String },
    Report,
    Help,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Params {
    pub command: Command,
    pub format: ExportFormat,
    /// Append the result to the report file under this title.
    pub record: Option<String>,
}

pub fn run() -> Result<()> {
    let params = parse_args(env::args().skip(1))?;
    let opts = InspectOptions::from_env();
    execute(&params, &opts)
}

pub fn execute(params: &Params, opts: &InspectOptions) -> Result<()> {
    match &params.command {
        Command::Help => {
            eprintln!("{}", include_str!("cli_help.txt"));
            Ok(())
        }
        Command::Legend { file, field, min, all } => {
            let table = LegendTable::new(read_input(file)?);
            if *all {
                return print_records(&table.parse(), params.format);
            }
            let (rec, value) = if *min {
                (table.min_record(field), table.min_numeric(field))
            } else {
                (table.max_record(field), table.max_numeric(field))
            };
            if let Some(title) = &params.record {
                record(opts, &ReportEntry::from_legend(title, rec.as_ref(), field))?;
            }
            match params.format {
                ExportFormat::Json => print_json(&json!({ "record": rec, "value": value })),
                _ => print_records(rec.as_slice(), params.format),
            }
        }
        Command::Grid { headers, data, column, all } => {
            let table = GridTable::new(read_input(headers)?, read_input(data)?);
            if *all {
                return print_records(&table.parse(), params.format);
            }
            let rec = table.table_max_record(column.as_deref());
            let value = table.table_max(column.as_deref());
            if let Some(title) = &params.record {
                let v = value.map(report::format_number).unwrap_or_else(|| s!(report::NO_DATA));
                record(opts, &ReportEntry::new(title.as_str(), v))?;
            }
            match params.format {
                ExportFormat::Json => print_json(&json!({ "record": rec, "value": value })),
                _ => print_records(rec.as_slice(), params.format),
            }
        }
        Command::Series { file, op, utc } => {
            let text = read_input(file)?;
            let response: Value = serde_json::from_str(&text)
                .wrap_err_with(|| format!("{} is not JSON", file.display()))?;
            let (out, entry) = match op {
                SeriesOp::Avg => {
                    let mean = series::avg_with_labels(&response);
                    let entry = params.record.as_deref().map(|t| ReportEntry::from_mean(t, &mean));
                    (serde_json::to_value(&mean)?, entry)
                }
                SeriesOp::Max | SeriesOp::Min => {
                    let reduction = if *op == SeriesOp::Max { Reduction::Max } else { Reduction::Min };
                    let ext = if *utc {
                        series::extremum_in(&response, reduction, &Utc)
                    } else {
                        series::extremum_in(&response, reduction, &Local)
                    };
                    let entry = params.record.as_deref().map(|t| ReportEntry::from_extremum(t, &ext));
                    (serde_json::to_value(&ext)?, entry)
                }
            };
            if let Some(entry) = entry {
                record(opts, &entry)?;
            }
            print_json(&out)
        }
        Command::Panels { file } => {
            let dashboard = Dashboard::parse(&read_input(file)?)
                .wrap_err_with(|| format!("{} is not a dashboard JSON", file.display()))?;
            print_json(&json!({
                "source": opts.dashboard_endpoint(),
                "panels": dashboard.panels(),
            }))
        }
        Command::Query { expr, from, to } => {
            let now = Utc::now();
            let from = from.as_deref().unwrap_or(&opts.date_from);
            let to = to.as_deref().unwrap_or(&opts.date_to);
            let start = resolve_instant(from, now).ok_or_else(|| eyre!("Bad --from time: {from}"))?;
            let end = resolve_instant(to, now).ok_or_else(|| eyre!("Bad --to time: {to}"))?;
            if end < start {
                bail!("--to ({to}) is before --from ({from})");
            }
            let query = RangeQuery::new(expr, start, end);
            let params_map: serde_json::Map<String, Value> = query
                .params()
                .into_iter()
                .map(|(k, v)| (s!(k), Value::String(v)))
                .collect();
            print_json(&json!({
                "endpoint": opts.prometheus_url.as_deref().map(|base| query.endpoint(base)),
                "params": params_map,
            }))
        }
        Command::Record { title, value } => record(opts, &ReportEntry::new(title.as_str(), value.as_str())),
        Command::Report => {
            let path = opts.result_path();
            let entries = report::load_entries(&path)
                .wrap_err_with(|| format!("Cannot read {}", path.display()))?;
            print_json(&entries)
        }
    }
}

fn record(opts: &InspectOptions, entry: &ReportEntry) -> Result<()> {
    let path = opts.result_path();
    report::append_entry(&path, entry)
        .inspect_err(|e| loge!("Report: {} not recorded: {e}", entry.title))
        .wrap_err_with(|| format!("Cannot append to {}", path.display()))
}

fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf).wrap_err("Cannot read stdin")?;
        return Ok(buf);
    }
    fs::read_to_string(path).wrap_err_with(|| format!("Cannot read {}", path.display()))
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_records<V>(records: &[Record<V>], format: ExportFormat) -> Result<()>
where
    V: Serialize + std::fmt::Display,
{
    match format.delim() {
        Some(sep) => {
            print!("{}", records_to_string(records, sep));
            Ok(())
        }
        None => print_json(records),
    }
}

pub fn parse_args<I>(args: I) -> Result<Params>
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter();
    let mut format = ExportFormat::Json;
    let mut record = None;
    let mut positional: Vec<String> = Vec::new();

    let mut field = s!(MAX_FIELD);
    let mut column = None;
    let mut from = None;
    let mut to = None;
    let (mut min, mut all, mut utc) = (false, false, false);
    let mut op = SeriesOp::Max;

    while let Some(a) = args.next() {
        match a.as_str() {
            "--format" => {
                let v = args.next().ok_or_else(|| eyre!("Missing value for --format"))?;
                format = ExportFormat::parse(&v).ok_or_else(|| eyre!("Unknown format: {v}"))?;
            }
            "--record" => record = Some(args.next().ok_or_else(|| eyre!("Missing title for --record"))?),
            "--field" => field = args.next().ok_or_else(|| eyre!("Missing value for --field"))?,
            "--column" => column = Some(args.next().ok_or_else(|| eyre!("Missing value for --column"))?),
            "--from" => from = Some(args.next().ok_or_else(|| eyre!("Missing value for --from"))?),
            "--to" => to = Some(args.next().ok_or_else(|| eyre!("Missing value for --to"))?),
            "--mean" => field = s!(crate::specs::legend::MEAN_FIELD),
            "--min" => { min = true; op = SeriesOp::Min; }
            "--max" => { min = false; op = SeriesOp::Max; }
            "--avg" => op = SeriesOp::Avg,
            "--all" => all = true,
            "--utc" => utc = true,
            "-h" | "--help" => {
                return Ok(Params { command: Command::Help, format, record });
            }
            flag if flag.starts_with("--") => bail!("Unknown arg: {flag}"),
            _ => positional.push(a),
        }
    }

    let mut pos = positional.into_iter();
    let Some(sub) = pos.next() else {
        return Ok(Params { command: Command::Help, format, record });
    };
    let mut need = |what: &str| pos.next().ok_or_else(|| eyre!("{sub}: missing {what}"));

    let command = match sub.as_str() {
        "legend" => Command::Legend { file: need("<file>")?.into(), field, min, all },
        "grid" => Command::Grid {
            headers: need("<headers-file>")?.into(),
            data: need("<data-file>")?.into(),
            column,
            all,
        },
        "series" => Command::Series { file: need("<response.json>")?.into(), op, utc },
        "panels" => Command::Panels { file: need("<dashboard.json>")?.into() },
        "query" => Command::Query { expr: need("<expr>")?, from, to },
        "record" => Command::Record { title: need("<title>")?, value: need("<value>")? },
        "report" => Command::Report,
        other => bail!("Unknown command: {other}"),
    };
    if let Some(extra) = pos.next() {
        bail!("Unexpected argument: {extra}");
    }

    Ok(Params { command, format, record })
}
