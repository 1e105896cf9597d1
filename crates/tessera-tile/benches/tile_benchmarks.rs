//! Benchmarks for the hot paths: spatial hashing, registry resolution,
//! and record round-trips.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use tessera_tile::codec;
use tessera_tile::prelude::*;
use tessera_tile::variants::register_builtin;

fn bench_block_hash(c: &mut Criterion) {
    let positions: Vec<BlockPos> = (0..1024)
        .map(|i| BlockPos::new(i * 31 - 500, (i % 256) as i32, i * 17 - 900))
        .collect();
    c.bench_function("block_hash_1024", |b| {
        b.iter(|| {
            let mut acc = 0u64;
            for pos in &positions {
                acc ^= black_box(pos).hash();
            }
            acc
        })
    });
}

fn bench_registry_resolve(c: &mut Criterion) {
    let mut registry = TileRegistry::new();
    register_builtin(&mut registry);
    c.bench_function("resolve_hit", |b| {
        b.iter(|| registry.resolve(black_box("minecraft:chest")))
    });
    c.bench_function("resolve_miss", |b| {
        b.iter(|| registry.resolve(black_box("minecraft:conduit")))
    });
}

fn bench_record_roundtrip(c: &mut Criterion) {
    let mut registry = TileRegistry::new();
    register_builtin(&mut registry);

    let mut record = Record::new();
    record.set_string(TAG_ID, "Furnace");
    BlockPos::new(12, 64, -7).write_into(&mut record);
    record.set_int("BurnTime", 160);
    record.set_int("CookTime", 45);
    record.set_int("MaxTime", 200);

    c.bench_function("furnace_load_save", |b| {
        b.iter(|| {
            let furnace = Furnace::from_record(black_box(&record)).unwrap();
            codec::save(&registry, &furnace)
        })
    });
}

criterion_group!(
    benches,
    bench_block_hash,
    bench_registry_resolve,
    bench_record_roundtrip
);
criterion_main!(benches);
