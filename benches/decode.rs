//! Decode benchmarks for rowdecode
//!
//! These benchmarks measure field resolution (cold versus cached) and
//! per-row decode throughput through the in-memory cursor.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box as hint_black_box;
use rowdecode::{record, Decoder, FieldResolver, OwnedValue, Row, RowCursor};

record! {
    #[derive(Debug, Default)]
    pub struct Payment {
        pub natural: i64 as "id",
        pub amount: f64,
        pub truth: bool as "is_truth",
        pub description: String,
        pub note: Option<String>,
    }
}

const COLUMNS: [&str; 6] = ["id", "amount", "is_truth", "description", "note", "extra"];

fn payment_rows(count: usize) -> Vec<Row> {
    (0..count)
        .map(|i| {
            Row::new(vec![
                OwnedValue::Int(i as i64),
                OwnedValue::Float(i as f64 * 0.5),
                OwnedValue::Bool(i % 2 == 0),
                OwnedValue::Text(format!("payment {}", i)),
                OwnedValue::Null,
                OwnedValue::Blob(vec![0u8; 16]),
            ])
        })
        .collect()
}

fn bench_resolution(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolution");

    group.bench_function("cold", |b| {
        b.iter(|| {
            let mut resolver = FieldResolver::new();
            hint_black_box(resolver.resolve::<Payment>().map(|index| index.len()).ok())
        });
    });

    group.bench_function("cached", |b| {
        let mut resolver = FieldResolver::new();
        let _ = resolver.resolve::<Payment>();
        b.iter(|| hint_black_box(resolver.resolve::<Payment>().map(|index| index.len()).ok()));
    });

    group.finish();
}

fn bench_decode_rows(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_rows");

    for count in [100usize, 10_000] {
        let rows = payment_rows(count);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &rows, |b, rows| {
            b.iter(|| {
                let mut decoder = Decoder::new(RowCursor::new(COLUMNS, rows.clone()));
                let mut payment = Payment::default();
                let mut decoded = 0usize;
                while let Ok(outcome) = decoder.decode(black_box(&mut payment)) {
                    if outcome.is_end() {
                        break;
                    }
                    decoded += 1;
                }
                hint_black_box(decoded)
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_resolution, bench_decode_rows);
criterion_main!(benches);
