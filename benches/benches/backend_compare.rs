//! Backend Comparison Benchmark
//!
//! Compares a single compression call across the runtime dispatcher and the
//! explicit SSSE3 and portable kernels, in both fill modes.

#![allow(missing_docs)]
#![allow(unsafe_code)]
#![allow(clippy::unwrap_used)]
use argon2_fill::{best_kernel, kernels, Block, FillMode, Kernel, BLOCK_SIZE};
use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use rand::prelude::*;
use std::hint::black_box;

fn random_block() -> Block {
    let mut bytes = [0u8; BLOCK_SIZE];
    rand::rng().fill(&mut bytes[..]);
    Block::from_bytes(&bytes)
}

// =============================================================================
// BENCHMARKS
// =============================================================================

fn bench_backends(c: &mut Criterion) {
    let mut group = c.benchmark_group("Argon2 Compression");
    group.throughput(Throughput::Bytes(BLOCK_SIZE as u64));

    let reference = random_block();
    let best = best_kernel();

    for mode in [FillMode::Overwrite, FillMode::Accumulate] {
        let mut register = random_block();
        let mut target = random_block();

        // 1. Dispatched (Production Path)
        // Measures the function-pointer call + fastest available kernel
        group.bench_function(format!("{} (Default) - {mode:?}", best.name()), |b| {
            b.iter(|| best.compress(&mut register, black_box(&reference), &mut target, mode));
        });

        // 2. SSSE3 - Explicit kernel (bypasses dispatcher)
        #[cfg(target_arch = "x86_64")]
        {
            if is_x86_feature_detected!("ssse3") {
                group.bench_function(format!("SSSE3 Native - {mode:?}"), |b| {
                    b.iter(|| unsafe {
                        kernels::ssse3::compress(
                            &mut register,
                            black_box(&reference),
                            &mut target,
                            mode,
                        );
                    });
                });
            }
        }

        // 3. Portable - Pure Rust, no SIMD
        // Baseline to quantify the speedup from hardware acceleration
        group.bench_function(format!("Portable (No SIMD) - {mode:?}"), |b| {
            b.iter(|| {
                Kernel::PORTABLE.compress(&mut register, black_box(&reference), &mut target, mode);
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_backends);
criterion_main!(benches);
