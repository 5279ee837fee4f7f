use argon2_fill::{best_kernel, Block, FillMode, Kernel};
use bolero::check;

/// Spread fuzzer bytes over a block, repeating short inputs.
fn block_from(data: &[u8], salt: u8) -> Block {
    let mut block = Block::ZERO;
    if data.is_empty() {
        return block;
    }
    for (i, word) in block.0.iter_mut().enumerate() {
        let byte = data[i % data.len()] ^ salt;
        *word = u64::from(byte).wrapping_mul(0x0101_0101_0101_0101) ^ (i as u64);
    }
    block
}

#[test]
fn fuzz_kernel_equivalence() {
    let best = best_kernel();

    check!().with_type::<(Vec<u8>, bool)>().for_each(|(data, accumulate)| {
        // =============================================================================
        // INPUTS
        // =============================================================================

        let register = block_from(data, 0x00);
        let reference = block_from(data, 0x5A);
        let target = block_from(data, 0xA5);
        let mode = if *accumulate {
            FillMode::Accumulate
        } else {
            FillMode::Overwrite
        };

        // =============================================================================
        // PORTABLE VS DISPATCHED
        // =============================================================================

        let (mut reg_p, mut out_p) = (register, target);
        Kernel::PORTABLE.compress(&mut reg_p, &reference, &mut out_p, mode);

        let (mut reg_b, mut out_b) = (register, target);
        best.compress(&mut reg_b, &reference, &mut out_b, mode);

        assert_eq!(out_p, out_b, "Kernel mismatch ({})", best.name());
        assert_eq!(reg_p, out_p, "Register must track the written block");
    });
}
