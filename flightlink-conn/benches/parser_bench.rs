//! Benchmarks for connection URL parsing and configuration resolution.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use flightlink_conn::{FlightSqlDriver, Properties, parse_url_args};
use std::hint::black_box;

/// Benchmark URL parsing across parameter styles.
fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_url_args");

    let urls = [
        ("authority_only", "jdbc:arrow-flight://localhost:32010".to_string()),
        (
            "query_params",
            "jdbc:arrow-flight-sql://localhost:32010?useEncryption=false&user=admin&catalog=main"
                .to_string(),
        ),
        (
            "semicolon_params",
            "jdbc:arrow-flight://localhost:32010/;useEncryption=false;user=admin;catalog=main"
                .to_string(),
        ),
        (
            "escaped_params",
            "jdbc:arrow-flight://0.0.0.0:2222?test1=test1value&test2%26continue=test2value&note=a+b%3Dc"
                .to_string(),
        ),
    ];

    for (name, url) in &urls {
        group.bench_with_input(BenchmarkId::from_parameter(name), url, |b, url| {
            b.iter(|| black_box(parse_url_args(black_box(url))))
        });
    }

    group.bench_function("many_params_32", |b| {
        let params: Vec<String> = (0..32).map(|i| format!("key{}=value{}", i, i)).collect();
        let url = format!("jdbc:arrow-flight://localhost:32010?{}", params.join("&"));
        b.iter(|| black_box(parse_url_args(black_box(&url))))
    });

    group.bench_function("unknown_scheme", |b| {
        b.iter(|| black_box(parse_url_args(black_box("jdbc:mysql://localhost:3306"))))
    });

    group.finish();
}

/// Benchmark full resolution through the driver.
fn bench_connect(c: &mut Criterion) {
    let driver = FlightSqlDriver::new();
    let props = Properties::new()
        .set("user", "admin")
        .set("password", "password");

    c.bench_function("driver_connect", |b| {
        b.iter(|| {
            black_box(driver.connect(
                black_box("jdbc:arrow-flight-sql://127.0.0.1:50060?useEncryption=false&threadPoolSize=4"),
                &props,
            ))
        })
    });
}

criterion_group!(benches, bench_parse, bench_connect);
criterion_main!(benches);
