#![no_main]

use argon2_fill::{best_kernel, Block, FillMode, Kernel, BLOCK_SIZE};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() < 3 * BLOCK_SIZE + 1 {
        return;
    }

    // =============================================================================
    // PREPARATION
    // =============================================================================

    let block = |i: usize| {
        let mut bytes = [0u8; BLOCK_SIZE];
        bytes.copy_from_slice(&data[i * BLOCK_SIZE..(i + 1) * BLOCK_SIZE]);
        Block::from_bytes(&bytes)
    };
    let (register, reference, target) = (block(0), block(1), block(2));
    let mode = if data[3 * BLOCK_SIZE] & 1 == 0 {
        FillMode::Overwrite
    } else {
        FillMode::Accumulate
    };

    // =============================================================================
    // PORTABLE VS DISPATCHED
    // =============================================================================

    let (mut reg_p, mut out_p) = (register, target);
    Kernel::PORTABLE.compress(&mut reg_p, &reference, &mut out_p, mode);

    let best = best_kernel();
    let (mut reg_b, mut out_b) = (register, target);
    best.compress(&mut reg_b, &reference, &mut out_b, mode);

    assert_eq!(out_p, out_b, "{} diverged from portable", best.name());
    assert_eq!(reg_p, reg_b);
});
