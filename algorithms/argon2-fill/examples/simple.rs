//! argon2-fill Basic Example
//!
//! Seeds a small Argon2id memory, fills it, and prints the XOR of the lanes'
//! last blocks (the value a full Argon2 hash would finalize).

#![allow(clippy::pedantic, clippy::nursery)]

use argon2_fill::{fill_memory, Block, FillError, Instance, Params};

fn main() -> Result<(), FillError> {
    // 1 MiB over 4 lanes, 3 passes
    let params = Params {
        lanes: 4,
        memory_blocks: Params::memory_blocks_for(1024, 4),
        ..Params::default()
    };
    let instance = Instance::new(params)?;
    let layout = instance.layout();

    // Stand-in seeds; a real hash derives these from H0
    let mut memory = vec![Block::ZERO; layout.memory_blocks()];
    for lane in 0..layout.lanes() {
        for index in 0..2 {
            memory[layout.absolute_offset(lane, index)] =
                Block::splat(0x9E37_79B9_7F4A_7C15 ^ u64::from((lane << 1) | index));
        }
    }

    fill_memory(&instance, &mut memory)?;

    let mut last = Block::ZERO;
    for lane in 0..layout.lanes() {
        last ^= &memory[layout.absolute_offset(lane, layout.lane_length() - 1)];
    }

    println!("Backend: {}", argon2_fill::active_backend());
    println!("Blocks:  {}", layout.memory_blocks());
    println!("Final:   {}", hex::encode(&last.to_bytes()[..32]));
    Ok(())
}
