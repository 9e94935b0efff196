//! Benchmarks for segmentrs.
//!
//! Run with:
//!     cargo bench

use std::io::Cursor;

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};

use segmentrs::{SegmentConfig, StreamSegment};

/// Deterministic text with lines of varying length.
fn text(size: usize) -> Vec<u8> {
    (0..size)
        .map(|i| if i % 97 == 96 { b'\n' } else { b'a' + (i % 26) as u8 })
        .collect()
}

fn bench_materialize(c: &mut Criterion) {
    let mut group = c.benchmark_group("materialize");

    for size in [64 * 1024, 1024 * 1024, 16 * 1024 * 1024] {
        let data = text(size);

        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(format!("drain_{}kb", size / 1024), &data, |b, data| {
            b.iter(|| {
                let segment = StreamSegment::new(Cursor::new(black_box(data)), size).unwrap();
                black_box(segment.materialized_len())
            });
        });
    }

    group.finish();
}

fn bench_lines(c: &mut Criterion) {
    let mut group = c.benchmark_group("lines");
    let size = 1024 * 1024;
    let data = text(size);
    group.throughput(Throughput::Bytes(size as u64));

    for chunk in [64, 1024, 8192] {
        group.bench_function(format!("chunk_{chunk}"), |b| {
            let config = SegmentConfig::new(size).with_line_chunk_size(chunk);
            b.iter(|| {
                let mut segment = StreamSegment::with_config(&data[..], config).unwrap();
                black_box(segment.lines().count())
            });
        });
    }

    group.finish();
}

fn bench_reads(c: &mut Criterion) {
    let mut group = c.benchmark_group("reads");
    let size = 1024 * 1024;
    let data = text(size);
    group.throughput(Throughput::Bytes(size as u64));

    group.bench_function("read_4k_with_pushback", |b| {
        b.iter(|| {
            let mut segment = StreamSegment::new(&data[..], size).unwrap();
            while let Ok(chunk) = segment.read(4096) {
                if chunk.len() > 16 {
                    segment.unread(&chunk[chunk.len() - 16..]);
                    segment.read(16).unwrap();
                }
            }
            black_box(segment.offset())
        });
    });

    group.finish();
}

criterion_group!(benches, bench_materialize, bench_lines, bench_reads);
criterion_main!(benches);
