#![no_main]

use argon2_fill::{
    fill_memory, fill_segment, Block, Instance, Params, SegmentPosition, Variant, Version,
    BLOCK_SIZE, SYNC_POINTS,
};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }

    // =============================================================================
    // PREPARATION
    // =============================================================================

    // Shape from the first two bytes, seeds from the rest
    let lanes = u32::from(data[0] % 4) + 1;
    let passes = u32::from(data[0] >> 6) + 1;
    let variant = match data[1] % 3 {
        0 => Variant::Argon2d,
        1 => Variant::Argon2i,
        _ => Variant::Argon2id,
    };
    let version = if data[1] & 0x80 == 0 {
        Version::V0x13
    } else {
        Version::V0x10
    };

    let instance = Instance::new(Params {
        lanes,
        memory_blocks: lanes * 16,
        passes,
        variant,
        version,
    })
    .unwrap();
    let layout = *instance.layout();

    let mut memory = vec![Block::ZERO; layout.memory_blocks()];
    let seed = &data[2..];
    for lane in 0..lanes {
        for index in 0..2 {
            let mut bytes = [0u8; BLOCK_SIZE];
            for (i, b) in bytes.iter_mut().enumerate() {
                let byte = seed.get(i % seed.len().max(1)).copied().unwrap_or(0);
                *b = byte ^ (lane * 2 + index) as u8;
            }
            memory[layout.absolute_offset(lane, index)] = Block::from_bytes(&bytes);
        }
    }

    // =============================================================================
    // 1. WHOLE-MEMORY FILL
    // =============================================================================

    let mut parallel = memory.clone();
    fill_memory(&instance, &mut parallel).unwrap();

    // =============================================================================
    // 2. SEGMENT-BY-SEGMENT FILL
    // =============================================================================

    for pass in 0..passes {
        for slice in 0..SYNC_POINTS {
            for lane in 0..lanes {
                fill_segment(&instance, &mut memory, SegmentPosition::new(pass, lane, slice))
                    .unwrap();
            }
        }
    }

    assert_eq!(parallel, memory, "Parallel fill diverged from segment order");
});
