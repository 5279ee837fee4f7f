use argon2_fill::{
    fill_memory, fill_segment, Block, Instance, Kernel, Params, SegmentPosition, Variant, Version,
    SYNC_POINTS,
};
use bolero::check;

#[test]
fn fuzz_parallel_consistency() {
    check!()
        .with_type::<(u8, u8, u64)>()
        .for_each(|&(shape, kind, seed)| {
            // =============================================================================
            // INSTANCE
            // =============================================================================

            let lanes = u32::from(shape % 4) + 1;
            let passes = u32::from(shape >> 6) + 1;
            let variant = match kind % 3 {
                0 => Variant::Argon2d,
                1 => Variant::Argon2i,
                _ => Variant::Argon2id,
            };
            let version = if kind & 0x80 == 0 {
                Version::V0x13
            } else {
                Version::V0x10
            };
            let Ok(instance) = Instance::with_kernel(
                Params {
                    lanes,
                    memory_blocks: lanes * 16,
                    passes,
                    variant,
                    version,
                },
                Kernel::PORTABLE,
            ) else {
                return;
            };

            let layout = *instance.layout();
            let mut memory = vec![Block::ZERO; layout.memory_blocks()];
            let mut rng = seed;
            for lane in 0..lanes {
                for index in 0..2 {
                    rng = rng.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1);
                    memory[layout.absolute_offset(lane, index)] = Block::splat(rng);
                }
            }

            // =============================================================================
            // PARALLEL EXECUTION (RAYON)
            // =============================================================================

            let mut parallel = memory.clone();
            if fill_memory(&instance, &mut parallel).is_err() {
                panic!("fill_memory rejected a valid instance");
            }

            // =============================================================================
            // SEQUENTIAL REFERENCE
            // =============================================================================

            for pass in 0..passes {
                for slice in 0..SYNC_POINTS {
                    for lane in 0..lanes {
                        let position = SegmentPosition::new(pass, lane, slice);
                        if fill_segment(&instance, &mut memory, position).is_err() {
                            panic!("fill_segment rejected {position:?}");
                        }
                    }
                }
            }

            assert_eq!(parallel, memory, "Parallel fill mismatch (Rayon vs Sequential)");
        });
}
