//! Performance analysis and optimization tools
//!
//! This module provides benchmarks for analyzing performance characteristics
//! and identifying optimization opportunities in the sql2awk translator:
//! memory-size estimation, scaling behavior, per-stage bottleneck
//! identification, repeated-translation cache effects, error-path cost, and
//! dialect-specific characteristics.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use sql2awk::{Datatype, Dialect, Schema, Translator};

fn net_schema() -> Schema {
    let mut schema = Schema::new();
    schema
        .push("src", Datatype::Str)
        .push("dst", Datatype::Str)
        .push("bytes", Datatype::Int)
        .push("dur", Datatype::Real);
    schema
}

fn query_with_projection_count(n: usize) -> String {
    let columns = ["src", "dst", "bytes", "dur"];
    let projection = columns
        .iter()
        .cycle()
        .take(n)
        .cloned()
        .collect::<Vec<_>>()
        .join(", ");
    format!("SELECT {projection} WHERE bytes > 0")
}

fn benchmark_memory_usage_estimation(c: &mut Criterion) {
    let translator = Translator::new(Dialect::Portable);
    let schema = net_schema();

    let mut group = c.benchmark_group("output_size_by_projection_count");
    for n in [1usize, 2, 4, 8] {
        let query = query_with_projection_count(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &query, |b, query| {
            b.iter(|| {
                let program = translator
                    .translate(black_box(query), black_box(&schema))
                    .unwrap();
                black_box(program.len())
            })
        });
    }
    group.finish();
}

fn benchmark_scaling_analysis(c: &mut Criterion) {
    let translator = Translator::new(Dialect::Portable);
    let schema = net_schema();

    let mut group = c.benchmark_group("scaling_by_where_clause_depth");
    for depth in [1usize, 3, 6, 10] {
        let conditions = (1..=depth)
            .map(|i| format!("bytes > {i}"))
            .collect::<Vec<_>>()
            .join(" AND ");
        let query = format!("SELECT src WHERE {conditions}");

        group.bench_with_input(BenchmarkId::from_parameter(depth), &query, |b, query| {
            b.iter(|| {
                black_box(
                    translator
                        .translate(black_box(query), black_box(&schema))
                        .unwrap(),
                )
            })
        });
    }
    group.finish();
}

fn benchmark_bottleneck_identification(c: &mut Criterion) {
    let translator = Translator::new(Dialect::Portable);
    let schema = net_schema();
    let query = "SELECT src, dst, sum(bytes) AS total, count(DISTINCT dst) AS fanout \
                 WHERE bytes > 100 AND dur < 10.0 LIMIT 50";

    let mut group = c.benchmark_group("pipeline_stage_breakdown");

    group.bench_function("lex_and_parse", |b| {
        b.iter(|| black_box(translator.parse(black_box(query)).unwrap()))
    });

    let parsed = translator.parse(query).unwrap();
    group.bench_function("typecheck", |b| {
        b.iter(|| {
            black_box(
                translator
                    .resolve(black_box(&parsed), black_box(&schema))
                    .unwrap(),
            )
        })
    });

    group.bench_function("codegen", |b| {
        b.iter(|| {
            black_box(
                translator
                    .generate(black_box(&parsed), black_box(&schema))
                    .unwrap(),
            )
        })
    });

    group.bench_function("full_pipeline", |b| {
        b.iter(|| {
            black_box(
                translator
                    .translate(black_box(query), black_box(&schema))
                    .unwrap(),
            )
        })
    });

    group.finish();
}

fn benchmark_cache_efficiency(c: &mut Criterion) {
    let translator = Translator::new(Dialect::Portable);
    let schema = net_schema();
    let query = "SELECT src WHERE bytes > 1000";

    c.bench_function("identical_query_repeated_translation", |b| {
        b.iter(|| {
            for _ in 0..20 {
                black_box(translator.translate(black_box(query), black_box(&schema)).unwrap());
            }
        })
    });

    let varied_queries: Vec<String> = (0..20).map(|i| format!("SELECT src WHERE bytes > {i}")).collect();
    c.bench_function("varied_query_repeated_translation", |b| {
        b.iter(|| {
            for query in &varied_queries {
                black_box(translator.translate(black_box(query), black_box(&schema)).unwrap());
            }
        })
    });
}

fn benchmark_error_handling_performance(c: &mut Criterion) {
    let translator = Translator::new(Dialect::Portable);
    let schema = net_schema();

    c.bench_function("syntax_error_path", |b| {
        b.iter(|| black_box(translator.translate(black_box("SELECT FROM"), black_box(&schema))))
    });

    c.bench_function("type_error_path", |b| {
        b.iter(|| {
            black_box(translator.translate(black_box("SELECT nonexistent"), black_box(&schema)))
        })
    });

    c.bench_function("aggregate_in_where_error_path", |b| {
        b.iter(|| {
            black_box(translator.translate(
                black_box("SELECT src WHERE sum(bytes) > 10"),
                black_box(&schema),
            ))
        })
    });
}

fn benchmark_dialect_performance_characteristics(c: &mut Criterion) {
    let schema = net_schema();
    let mut group = c.benchmark_group("dialect_specific_functions");

    let gawk_only_query = "SELECT sqrt(bytes) AS root, length(src) AS src_len";
    let gawk = Translator::new(Dialect::Gawk);
    group.bench_function("gawk_only_functions_under_gawk", |b| {
        b.iter(|| {
            black_box(
                gawk.translate(black_box(gawk_only_query), black_box(&schema))
                    .unwrap(),
            )
        })
    });

    let portable_query = "SELECT src, dst WHERE bytes > 0 AND dur < 10.0";
    let portable = Translator::new(Dialect::Portable);
    group.bench_function("portable_query_under_portable", |b| {
        b.iter(|| {
            black_box(
                portable
                    .translate(black_box(portable_query), black_box(&schema))
                    .unwrap(),
            )
        })
    });
    group.bench_function("portable_query_under_gawk", |b| {
        b.iter(|| {
            black_box(
                gawk.translate(black_box(portable_query), black_box(&schema))
                    .unwrap(),
            )
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_memory_usage_estimation,
    benchmark_scaling_analysis,
    benchmark_bottleneck_identification,
    benchmark_cache_efficiency,
    benchmark_error_handling_performance,
    benchmark_dialect_performance_characteristics,
);
criterion_main!(benches);
