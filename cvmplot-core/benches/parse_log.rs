use criterion::{black_box, criterion_group, criterion_main, Criterion};
use cvmplot_core::{read_series, Family, NaiveFilter};
use std::io::Cursor;

fn synthetic_naive_log(rows: u64) -> String {
    let mut out = String::new();
    for i in 0..rows {
        let x = 1u64 << (i % 24);
        let eps = 1 + i % 9;
        let delta = if i % 3 == 0 { 100 } else { 10 };
        out.push_str(&format!("{x}/{eps}/{delta} {}\n", 1_000 + i * 37));
    }
    out
}

fn bench_parse(c: &mut Criterion) {
    let text = synthetic_naive_log(20_000);

    c.bench_function("read_series_naive_20k", |b| {
        b.iter(|| read_series(Cursor::new(black_box(text.as_bytes())), Family::Naive, None))
    });
    c.bench_function("read_series_naive_20k_filtered", |b| {
        b.iter(|| read_series(Cursor::new(black_box(text.as_bytes())), Family::Naive, Some(NaiveFilter::default())))
    });
}

criterion_group!(parse, bench_parse);
criterion_main!(parse);
