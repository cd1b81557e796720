// tests/grid_table.rs
//
// Column-major table panels: header block + flattened data block.
//
use panel_inspect::core::record::Cell;
use panel_inspect::specs::grid::GridTable;

const HEADERS: &str = "Time\nPod\nRestarts\n";
const DATA: &str = "2026-01-01 10:00:00\nweb-1\n3\n2026-01-01 10:00:00\nweb-2\n9\n2026-01-01 10:00:00\nweb-3\n0\n";

#[test]
fn groups_cells_by_header_count() {
    let grid = GridTable::new(HEADERS, DATA);
    assert_eq!(grid.headers(), vec!["Time", "Pod", "Restarts"]);
    let recs = grid.parse();
    assert_eq!(recs.len(), 3);
    assert_eq!(recs[1].get("Pod"), Some(&Cell::Text("web-2".into())));
    assert_eq!(recs[1].get("Restarts"), Some(&Cell::Int(9)));
}

#[test]
fn max_defaults_to_last_column() {
    let grid = GridTable::new(HEADERS, DATA);
    assert_eq!(grid.table_max(None), Some(9.0));
    assert_eq!(grid.table_max(Some("Restarts")), Some(9.0));
    let rec = grid.table_max_record(None).unwrap();
    assert_eq!(rec.get("Pod"), Some(&Cell::Text("web-2".into())));
    // Timestamps are neither numbers nor sizes
    assert_eq!(grid.table_max(Some("Time")), None);
}

#[test]
fn short_trailing_group_is_dropped() {
    let grid = GridTable::new(HEADERS, format!("{DATA}2026-01-01 10:00:00\nweb-4\n"));
    assert_eq!(grid.parse().len(), 3);
    assert_eq!(grid.table_max(None), Some(9.0));
}

#[test]
fn sizes_are_compared_in_megabytes() {
    let grid = GridTable::new("Volume\nUsed\n", "data-0\n900 MiB\ndata-1\n1.5 GiB\ndata-2\n1200 MiB\n");
    assert_eq!(grid.table_max(None), Some(1536.0));
    let rec = grid.table_max_record(Some("Used")).unwrap();
    assert_eq!(rec.get("Volume"), Some(&Cell::Text("data-1".into())));
}

#[test]
fn empty_inputs() {
    assert!(GridTable::new("", DATA).parse().is_empty());
    assert_eq!(GridTable::new(HEADERS, "").table_max(None), None);
}
