//! Expansion performance benchmarks.
//!
//! Measures widening cost across table heights and selection counts.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use widen::{ColumnExpander, Delimiter, MultiValueFieldSpec, Table, Value, expand};

/// Generate a table with an id column and two multi-response columns.
fn generate_table(rows: usize, max_selections: usize) -> Table {
    let options = ["alpha", "beta", "gamma", "delta", "epsilon", "zeta", "eta", "theta"];

    let data: Vec<Vec<Value>> = (0..rows)
        .map(|row| {
            let n = row % max_selections + 1;
            let picks: Vec<&str> = (0..n).map(|i| options[(row + i) % options.len()]).collect();
            vec![
                Value::from(row as i64),
                Value::from(picks.join(", ")),
                Value::from(picks.join(";")),
            ]
        })
        .collect();

    Table::from_rows(["id", "first", "second"], data).expect("valid table")
}

/// Benchmark a single expansion over growing heights.
fn bench_expand_rows(c: &mut Criterion) {
    let mut group = c.benchmark_group("expand_rows");
    let spec = MultiValueFieldSpec::new("first", Delimiter::literal(",")).with_count();

    for rows in [100, 1_000, 10_000].iter() {
        let table = generate_table(*rows, 5);

        group.throughput(Throughput::Elements(*rows as u64));
        group.bench_with_input(BenchmarkId::new("rows", rows), &table, |b, table| {
            b.iter(|| expand(black_box(table), black_box(&spec)).expect("expand"));
        });
    }

    group.finish();
}

/// Benchmark widening with many selections per cell.
fn bench_expand_width(c: &mut Criterion) {
    let mut group = c.benchmark_group("expand_width");
    let spec = MultiValueFieldSpec::new("first", Delimiter::any_of([",", ";", " "]));

    for width in [2, 8].iter() {
        let table = generate_table(1_000, *width);

        group.bench_with_input(BenchmarkId::new("max_selections", width), &table, |b, table| {
            b.iter(|| expand(black_box(table), black_box(&spec)).expect("expand"));
        });
    }

    group.finish();
}

/// Benchmark the sequential multi-column fold.
fn bench_apply_batch(c: &mut Criterion) {
    let table = generate_table(5_000, 6);
    let specs = vec![
        MultiValueFieldSpec::new("first", Delimiter::literal(",")).with_count(),
        MultiValueFieldSpec::new("second", Delimiter::literal(";")).keep_source(),
    ];
    let expander = ColumnExpander::new();

    c.bench_function("apply_two_specs_5000_rows", |b| {
        b.iter(|| expander.apply(black_box(&table), black_box(&specs)).expect("apply"));
    });
}

criterion_group!(benches, bench_expand_rows, bench_expand_width, bench_apply_batch);
criterion_main!(benches);
