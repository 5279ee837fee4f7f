//! argon2-fill Criterion Benchmark
//!
//! Whole-memory fill throughput across memory sizes, variants and lane
//! counts, plus lane scaling on a single thread vs the full Rayon pool.

#![allow(clippy::pedantic, clippy::nursery)]
#![allow(clippy::unwrap_used, clippy::expect_used)]

use argon2_fill::{fill_memory, Block, Instance, Params, Variant, Version, BLOCK_SIZE};
use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use rand::prelude::*;
use std::hint::black_box;

const MIB: u32 = 1024;

fn setup(lanes: u32, m_cost_kib: u32, passes: u32, variant: Variant) -> (Instance, Vec<Block>) {
    let instance = Instance::new(Params {
        lanes,
        memory_blocks: Params::memory_blocks_for(m_cost_kib, lanes),
        passes,
        variant,
        version: Version::V0x13,
    })
    .unwrap();

    let layout = instance.layout();
    let mut memory = vec![Block::ZERO; layout.memory_blocks()];
    for lane in 0..layout.lanes() {
        for index in 0..2 {
            let mut bytes = [0u8; BLOCK_SIZE];
            rand::rng().fill(&mut bytes[..]);
            memory[layout.absolute_offset(lane, index)] = Block::from_bytes(&bytes);
        }
    }
    (instance, memory)
}

fn processed_bytes(instance: &Instance) -> u64 {
    (instance.layout().memory_blocks() * BLOCK_SIZE) as u64 * u64::from(instance.passes())
}

// =============================================================================
// BENCHMARK 1: MEMORY SIZE
// =============================================================================

/// Single-lane Argon2id fill, one pass, growing memory.
fn bench_memory_size(c: &mut Criterion) {
    let mut group = c.benchmark_group("1-Memory-Size");
    group.sample_size(20);

    let sizes = [(MIB, "1MiB"), (16 * MIB, "16MiB"), (64 * MIB, "64MiB")];

    for (m_cost, name) in sizes {
        let (instance, seeded) = setup(1, m_cost, 1, Variant::Argon2id);
        group.throughput(Throughput::Bytes(processed_bytes(&instance)));

        group.bench_function(name, |b| {
            let mut memory = seeded.clone();
            b.iter(|| fill_memory(&instance, black_box(&mut memory)).unwrap());
        });
    }
    group.finish();
}

// =============================================================================
// BENCHMARK 2: VARIANTS
// =============================================================================

/// Addressing cost: data-dependent vs data-independent vs hybrid.
fn bench_variants(c: &mut Criterion) {
    let mut group = c.benchmark_group("2-Variants");
    group.sample_size(20);

    for variant in [Variant::Argon2d, Variant::Argon2i, Variant::Argon2id] {
        let (instance, seeded) = setup(1, 16 * MIB, 3, variant);
        group.throughput(Throughput::Bytes(processed_bytes(&instance)));

        group.bench_function(format!("{variant:?}"), |b| {
            let mut memory = seeded.clone();
            b.iter(|| fill_memory(&instance, black_box(&mut memory)).unwrap());
        });
    }
    group.finish();
}

// =============================================================================
// BENCHMARK 3: LANE SCALING
// =============================================================================

/// Same memory split over more lanes, on one thread and on the full pool.
fn bench_lane_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("3-Lane-Scaling");
    group.sample_size(10);

    let single = rayon::ThreadPoolBuilder::new().num_threads(1).build().unwrap();
    let threads = rayon::current_num_threads();

    for lanes in [1, 2, 4, 8] {
        let (instance, seeded) = setup(lanes, 64 * MIB, 1, Variant::Argon2id);
        group.throughput(Throughput::Bytes(processed_bytes(&instance)));

        group.bench_function(format!("{lanes} lanes - 1 thread"), |b| {
            let mut memory = seeded.clone();
            b.iter(|| single.install(|| fill_memory(&instance, black_box(&mut memory)).unwrap()));
        });

        group.bench_function(format!("{lanes} lanes - {threads} threads"), |b| {
            let mut memory = seeded.clone();
            b.iter(|| fill_memory(&instance, black_box(&mut memory)).unwrap());
        });
    }
    group.finish();
}

criterion_group!(benches, bench_memory_size, bench_variants, bench_lane_scaling);
criterion_main!(benches);
