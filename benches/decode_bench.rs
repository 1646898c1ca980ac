//! Criterion benchmarks for the 5-in-1 decoder
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use bresser5in1::encoder::{encode_payload, transmission};
use bresser5in1::{decode, BitBuffer, Bresser5in1, Decoder, Reading, Variant};

fn sample_capture(lead_bits: usize) -> BitBuffer {
    let reading = Reading {
        wind_gust_raw: 52,
        wind_speed_raw: 31,
        wind_dir: 225,
        variant: Variant::Full {
            temperature_dc: 187,
            humidity: 64,
        },
    };
    transmission(&encode_payload(&reading).unwrap(), lead_bits)
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");

    // Byte-aligned and unaligned preamble positions
    for lead in [0usize, 5, 24, 37] {
        let capture = sample_capture(lead);
        group.bench_with_input(BenchmarkId::new("reading", lead), &capture, |b, capture| {
            b.iter(|| black_box(decode(black_box(capture)).unwrap()));
        });
    }

    let capture = sample_capture(8);
    group.bench_function("record", |b| {
        b.iter(|| black_box(Bresser5in1.decode(black_box(&capture)).unwrap()));
    });

    group.finish();
}

fn bench_reject(c: &mut Criterion) {
    let noise = BitBuffer::from_row(&[0x5Au8; 28], 224);
    c.bench_function("reject_noise", |b| {
        b.iter(|| black_box(decode(black_box(&noise)).is_err()));
    });

    let mut two_rows = sample_capture(8);
    two_rows.push_row(&[0xFF; 4], 32);
    c.bench_function("reject_shape", |b| {
        b.iter(|| black_box(decode(black_box(&two_rows)).is_err()));
    });
}

criterion_group!(benches, bench_decode, bench_reject);
criterion_main!(benches);
