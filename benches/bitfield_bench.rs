//! Performance benchmarks for Bitfield operations.
//!
//! Sizes follow real torrents: a few hundred pieces up to tens of thousands.
//! - Single bit access
//! - Word-level counting and scans (`count`, `all_set`, `find_*`)
//! - Wire import (`assign`) and export (`as_bytes`)
//! - Resize one bit at a time across word boundaries

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::{Rng, SeedableRng};
use torrent_bitfield::{Bitfield, PieceIndex, TypedBitfield};

const SIZES: [usize; 4] = [256, 1024, 16384, 65536];

fn random_field(n: usize, pct: f64) -> Bitfield {
    let mut rng = rand::rngs::StdRng::seed_from_u64(0);
    let mut field = Bitfield::with_size(n, false);
    for i in 0..n {
        if rng.gen_bool(pct) {
            field.set_bit(i);
        }
    }
    field
}

// =============================================================================
// Single Bit Operations
// =============================================================================

fn bench_set_bit(c: &mut Criterion) {
    let mut field = Bitfield::with_size(10000, false);

    c.bench_function("set_bit", |b| {
        let mut i = 0;
        b.iter(|| {
            field.set_bit(black_box(i % 10000));
            i += 1;
        });
    });
}

fn bench_get_bit(c: &mut Criterion) {
    let field = Bitfield::with_size(10000, true);

    c.bench_function("get_bit", |b| {
        let mut i = 0;
        b.iter(|| {
            let _ = black_box(field.get_bit(black_box(i % 10000)));
            i += 1;
        });
    });
}

// =============================================================================
// Counting and Search Operations
// =============================================================================

fn bench_count(c: &mut Criterion) {
    let mut group = c.benchmark_group("count");

    for size in SIZES.iter() {
        let field = random_field(*size, 0.2);

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| black_box(field.count()));
        });
    }
    group.finish();
}

fn bench_all_set(c: &mut Criterion) {
    let mut group = c.benchmark_group("all_set");

    for size in SIZES.iter() {
        let field = Bitfield::with_size(*size, true);

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| black_box(field.all_set()));
        });
    }
    group.finish();
}

fn bench_find_first_set(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_first_set");

    for size in SIZES.iter() {
        let mut field = Bitfield::with_size(*size, false);
        field.set_bit(size - 1);

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| black_box(field.find_first_set()));
        });
    }
    group.finish();
}

fn bench_find_last_clear(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_last_clear");

    for size in SIZES.iter() {
        let mut field = Bitfield::with_size(*size, true);
        field.clear_bit(0);

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| black_box(field.find_last_clear()));
        });
    }
    group.finish();
}

// =============================================================================
// Wire Import / Export
// =============================================================================

fn bench_assign(c: &mut Criterion) {
    let mut group = c.benchmark_group("assign");

    for size in SIZES.iter() {
        let bytes = random_field(*size, 0.5).to_bytes();
        let mut field = Bitfield::new();

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &n| {
            b.iter(|| field.assign(black_box(&bytes), n));
        });
    }
    group.finish();
}

fn bench_as_bytes(c: &mut Criterion) {
    let field = random_field(16384, 0.5);

    c.bench_function("as_bytes", |b| {
        b.iter(|| black_box(field.as_bytes().len()));
    });
}

// =============================================================================
// Resize and Iteration
// =============================================================================

fn bench_resize_grow_by_one(c: &mut Criterion) {
    c.bench_function("resize_grow_by_one_1024", |b| {
        b.iter(|| {
            let mut field = Bitfield::new();
            for n in 1..=1024 {
                field.resize(n, true);
            }
            black_box(field.count())
        });
    });
}

fn bench_cursor_range_count(c: &mut Criterion) {
    let field = random_field(16384, 0.3);

    c.bench_function("cursor_range_count", |b| {
        b.iter(|| {
            let from = field.begin() + black_box(1000isize);
            let to = field.begin() + black_box(9000isize);
            black_box(from.to(to).filter(|&bit| bit).count())
        });
    });
}

fn bench_typed_range(c: &mut Criterion) {
    let have: TypedBitfield<PieceIndex> = random_field(16384, 0.5).into();

    c.bench_function("typed_missing_pieces", |b| {
        b.iter(|| black_box(have.range().filter(|&p| !have.get_bit(p)).count()));
    });
}

criterion_group!(
    benches,
    bench_set_bit,
    bench_get_bit,
    bench_count,
    bench_all_set,
    bench_find_first_set,
    bench_find_last_clear,
    bench_assign,
    bench_as_bytes,
    bench_resize_grow_by_one,
    bench_cursor_range_count,
    bench_typed_range,
);
criterion_main!(benches);
