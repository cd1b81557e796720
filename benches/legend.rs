// benches/legend.rs
use criterion::{black_box, criterion_group, criterion_main, Criterion};

use panel_inspect::specs::grid::GridTable;
use panel_inspect::specs::legend::LegendTable;

fn legend_block(rows: usize) -> String {
    let mut text = String::from("Name Mean Max Last *\n");
    for i in 0..rows {
        text.push_str(&format!("node-{i}\n{}.5 GiB {} MiB {}.25 GiB\n", i % 7, 300 + i, i % 11));
    }
    text
}

fn grid_block(rows: usize) -> (String, String) {
    let headers = String::from("Pod\nRestarts\nUsed\n");
    let mut data = String::new();
    for i in 0..rows {
        data.push_str(&format!("web-{i}\n{}\n{} MiB\n", i % 13, 100 + i));
    }
    (headers, data)
}

fn bench_legend(c: &mut Criterion) {
    let legend = LegendTable::new(legend_block(500));
    c.bench_function("legend_parse", |b| {
        b.iter(|| black_box(black_box(&legend).parse().len()))
    });
    c.bench_function("legend_max_record", |b| {
        b.iter(|| black_box(black_box(&legend).max_record("Max")))
    });

    let (headers, data) = grid_block(500);
    let grid = GridTable::new(headers, data);
    c.bench_function("grid_table_max", |b| {
        b.iter(|| black_box(black_box(&grid).table_max(None)))
    });
}

criterion_group!(benches, bench_legend);
criterion_main!(benches);
