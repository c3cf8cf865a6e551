//! Benchmarks variable and arrayable dispatch against a full `Value` decode.
#![allow(missing_docs)]

use std::{fmt::Write, hint::black_box, time::Duration};

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use jsonpour::{
    ArrayableFn, DecodeError, Decoder, DecoderOptions, DecoderPool, ObjectFn, Value, VariableFn,
};

/// Builds `{"items":[...]}` with `n` items whose `id` alternates between a
/// number and a string and whose `tags` alternates between a bare object and
/// an array.
fn make_payload(n: usize) -> String {
    let mut s = String::from(r#"{"items":["#);
    for i in 0..n {
        if i > 0 {
            s.push(',');
        }
        if i % 2 == 0 {
            write!(s, r#"{{"id":{i},"tags":{{"name":"t{i}"}}}}"#).unwrap();
        } else {
            write!(
                s,
                r#"{{"id":"s{i}","tags":[{{"name":"a{i}"}},{{"name":"b{i}"}}]}}"#
            )
            .unwrap();
        }
    }
    s.push_str("]}");
    s
}

/// Decodes the payload through the dispatch paths and returns how many ids
/// and tags were seen.
fn run_dispatch(dec: &mut Decoder<'_>) -> Result<usize, DecodeError> {
    let mut seen = 0usize;
    dec.decode_object(&mut ObjectFn::new(|dec, key| {
        if key != "items" {
            return Ok(());
        }
        dec.array(&mut jsonpour::ArrayFn::new(|dec| {
            dec.object(&mut ObjectFn::new(|dec, key| match key {
                "id" => dec.variable(&mut VariableFn::new(|dec, leading| {
                    seen += 1;
                    if leading == b'"' {
                        let mut s = String::new();
                        dec.string(&mut s)
                    } else {
                        let mut n = 0i64;
                        dec.int(&mut n)
                    }
                })),
                "tags" => dec.arrayable(&mut ArrayableFn::new(|dec| {
                    seen += 1;
                    dec.skip_value()
                })),
                _ => Ok(()),
            }))
        }))
    }))?;
    Ok(seen)
}

fn bench_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("dispatch");

    for &items in &[10usize, 1_000] {
        let payload = make_payload(items);
        group.bench_with_input(BenchmarkId::new("callbacks", items), &payload, |b, p| {
            b.iter(|| {
                let mut dec = Decoder::from_slice(black_box(p.as_bytes()));
                black_box(run_dispatch(&mut dec).unwrap());
            });
        });
        group.bench_with_input(BenchmarkId::new("pooled", items), &payload, |b, p| {
            let pool = DecoderPool::new(DecoderOptions::default());
            b.iter(|| {
                let mut dec = pool.lease(black_box(p.as_bytes()));
                black_box(run_dispatch(&mut dec).unwrap());
            });
        });
        group.bench_with_input(BenchmarkId::new("value", items), &payload, |b, p| {
            b.iter(|| {
                let mut v = Value::Null;
                Decoder::from_slice(black_box(p.as_bytes()))
                    .decode_variable(&mut v)
                    .unwrap();
                black_box(v);
            });
        });
    }
    group.finish();
}

fn criterion() -> Criterion {
    let mut c = Criterion::default();
    if cfg!(feature = "bench-fast") {
        c = c
            .warm_up_time(Duration::from_millis(10))
            .measurement_time(Duration::from_millis(100))
            .sample_size(10);
    } else {
        c = c
            .warm_up_time(Duration::from_secs(3))
            .measurement_time(Duration::from_secs(5));
    }
    c
}

criterion_group! { name = benches; config = criterion(); targets = bench_dispatch }
criterion_main!(benches);
