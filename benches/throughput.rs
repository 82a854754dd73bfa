// Allow our units.fraction digit grouping convention (e.g., 44_2600 = 44.26)
#![allow(clippy::inconsistent_digit_grouping)]

//! Throughput benchmarks for the incremental pricer.
//!
//! Measures performance of core operations:
//! - Applying add / reduce events to the book
//! - Walking a side to value the target size
//! - Parsing wire lines
//! - Full session runs over a synthetic stream

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use book_pricer::{Config, Event, OrderBook, Price, Session, Side, evaluate};

/// Build a book with N price levels on each side, 100 shares per order.
fn build_book(levels: usize, orders_per_level: usize, target: u64) -> OrderBook {
    let mut book = OrderBook::new(target);
    let mut n = 0;

    // Bid levels: 99.00, 98.99, 98.98, ...
    for i in 0..levels {
        let price = Price(99_0000 - (i as i64) * 100);
        for _ in 0..orders_per_level {
            book.apply(Event::add(n, format!("b{n}").as_str(), Side::Buy, price, 100))
                .unwrap();
            n += 1;
        }
    }

    // Ask levels: 101.00, 101.01, 101.02, ...
    for i in 0..levels {
        let price = Price(101_0000 + (i as i64) * 100);
        for _ in 0..orders_per_level {
            book.apply(Event::add(n, format!("a{n}").as_str(), Side::Sell, price, 100))
                .unwrap();
            n += 1;
        }
    }

    book
}

/// Synthetic wire stream: adds around a mid price, every third line a reduce.
fn synthetic_stream(num_events: usize) -> String {
    let mut out = String::new();
    for i in 0..num_events {
        if i % 3 == 2 {
            out.push_str(&format!("{i} R o{} 50\n", i - 2));
        } else {
            let side = if i % 2 == 0 { 'B' } else { 'S' };
            let offset = (i % 50) as f64 * 0.01;
            let price = if side == 'B' { 44.00 - offset } else { 44.50 + offset };
            out.push_str(&format!("{i} A o{i} {side} {price:.2} 100\n"));
        }
    }
    out
}

/// Benchmark: Add an order outside the valuation boundary (no recompute)
fn bench_add_outside_boundary(c: &mut Criterion) {
    let mut group = c.benchmark_group("add_outside_boundary");

    for levels in [10, 100, 1000] {
        group.throughput(Throughput::Elements(1));
        group.bench_with_input(
            BenchmarkId::from_parameter(levels),
            &levels,
            |b, &levels| {
                let mut book = build_book(levels, 1, 200);
                evaluate(&mut book, Side::Buy, 200);
                let mut n = 0i64;

                b.iter(|| {
                    // Far below the boundary; no level ever gets large
                    let price = Price(10_0000 - n % 1000);
                    n += 1;
                    black_box(
                        book.apply(Event::add(n, format!("x{n}").as_str(), Side::Buy, price, 1))
                            .unwrap(),
                    )
                });
            },
        );
    }

    group.finish();
}

/// Benchmark: Add then fully reduce an order inside the boundary
fn bench_add_reduce_inside(c: &mut Criterion) {
    let mut group = c.benchmark_group("add_reduce_inside");

    for levels in [10, 100, 1000] {
        group.throughput(Throughput::Elements(2));
        group.bench_with_input(
            BenchmarkId::from_parameter(levels),
            &levels,
            |b, &levels| {
                let mut book = build_book(levels, 1, 200);

                b.iter(|| {
                    book.apply(Event::add(0, "in", Side::Sell, Price(100_5000), 100))
                        .unwrap();
                    black_box(book.apply(Event::reduce(1, "in", 100)).unwrap())
                });
            },
        );
    }

    group.finish();
}

/// Benchmark: Value the target size, walking more levels as it grows
fn bench_evaluate(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluate");

    for target in [100u64, 10_000, 100_000] {
        group.throughput(Throughput::Elements(1));
        group.bench_with_input(
            BenchmarkId::from_parameter(target),
            &target,
            |b, &target| {
                let mut book = build_book(1000, 1, target);

                b.iter(|| black_box(evaluate(&mut book, Side::Sell, target)));
            },
        );
    }

    group.finish();
}

/// Benchmark: Parse one wire line
fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");
    group.throughput(Throughput::Elements(1));

    group.bench_function("add", |b| {
        b.iter(|| black_box(Event::parse(black_box("28800538 A b S 44.26 100")).unwrap()))
    });
    group.bench_function("reduce", |b| {
        b.iter(|| black_box(Event::parse(black_box("28800744 R b 100")).unwrap()))
    });

    group.finish();
}

/// Benchmark: Full session over a synthetic stream
fn bench_session_run(c: &mut Criterion) {
    let mut group = c.benchmark_group("session_run");

    for num_events in [1_000, 10_000, 100_000] {
        let input = synthetic_stream(num_events);
        group.throughput(Throughput::Elements(num_events as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(num_events),
            &input,
            |b, input| {
                let config = Config::with_target(200).unwrap();
                b.iter(|| {
                    let mut session = Session::new(&config);
                    black_box(session.run(input.as_bytes(), std::io::sink()).unwrap())
                });
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_add_outside_boundary,
    bench_add_reduce_inside,
    bench_evaluate,
    bench_parse,
    bench_session_run,
);

criterion_main!(benches);
