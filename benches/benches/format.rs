use criterion::{black_box, criterion_group, criterion_main, Criterion};

use benches::{synthetic, HEREDOC, MULTI_STAGE};
use formatter::{format_source, Config};

fn bench_parser(c: &mut Criterion) {
    c.bench_function("parse_multi_stage", |b| {
        b.iter(|| parser::parse(black_box(MULTI_STAGE)).unwrap())
    });
}

fn bench_formatter(c: &mut Criterion) {
    let config = Config::default();
    c.bench_function("format_multi_stage", |b| {
        b.iter(|| format_source(black_box(MULTI_STAGE), black_box(&config)).unwrap())
    });
    c.bench_function("format_heredoc", |b| {
        b.iter(|| format_source(black_box(HEREDOC), black_box(&config)).unwrap())
    });
}

fn bench_throughput(c: &mut Criterion) {
    let config = Config::default();
    let large = synthetic(200);
    c.bench_function("format_200_stages", |b| {
        b.iter(|| format_source(black_box(&large), black_box(&config)).unwrap())
    });
}

criterion_group!(benches, bench_parser, bench_formatter, bench_throughput);
criterion_main!(benches);
