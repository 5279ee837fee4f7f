//! Portable implementation of the Argon2 compression function.
//!
//! Pure scalar Rust, the mandatory fallback for every target. Produces
//! bit-identical results to the SIMD kernels.

#![allow(clippy::many_single_char_names)]

use crate::block::Block;
use crate::types::FillMode;

// =============================================================================
// BLAMKA
// =============================================================================

/// `a + b + 2 * lo32(a) * lo32(b)`, all wrapping.
#[inline(always)]
const fn blamka(a: u64, b: u64) -> u64 {
    let product = (a & 0xFFFF_FFFF).wrapping_mul(b & 0xFFFF_FFFF);
    a.wrapping_add(b).wrapping_add(product.wrapping_mul(2))
}

/// `BLAKE2b` quarter-round with the `BlaMka` adder.
#[inline(always)]
fn gb(v: &mut [u64; 16], a: usize, b: usize, c: usize, d: usize) {
    v[a] = blamka(v[a], v[b]);
    v[d] = (v[d] ^ v[a]).rotate_right(32);
    v[c] = blamka(v[c], v[d]);
    v[b] = (v[b] ^ v[c]).rotate_right(24);
    v[a] = blamka(v[a], v[b]);
    v[d] = (v[d] ^ v[a]).rotate_right(16);
    v[c] = blamka(v[c], v[d]);
    v[b] = (v[b] ^ v[c]).rotate_right(63);
}

/// One `BLAKE2b` round over a 4x4 matrix: columns, then diagonals.
#[inline(always)]
fn round(v: &mut [u64; 16]) {
    gb(v, 0, 4, 8, 12);
    gb(v, 1, 5, 9, 13);
    gb(v, 2, 6, 10, 14);
    gb(v, 3, 7, 11, 15);

    gb(v, 0, 5, 10, 15);
    gb(v, 1, 6, 11, 12);
    gb(v, 2, 7, 8, 13);
    gb(v, 3, 4, 9, 14);
}

// =============================================================================
// PERMUTATION
// =============================================================================

/// Word indices of interleaved column `col`: pairs `(2col, 2col+1)` from each
/// of the eight 16-word rows.
#[inline(always)]
const fn column_index(col: usize, k: usize) -> usize {
    2 * col + 16 * (k / 2) + (k % 2)
}

/// The permutation P: 8 rounds over rows, then 8 over interleaved columns.
pub fn permute(block: &mut Block) {
    let w = &mut block.0;

    for row in 0..8 {
        let base = 16 * row;
        let mut v = [0u64; 16];
        v.copy_from_slice(&w[base..base + 16]);
        round(&mut v);
        w[base..base + 16].copy_from_slice(&v);
    }

    for col in 0..8 {
        let mut v: [u64; 16] = core::array::from_fn(|k| w[column_index(col, k)]);
        round(&mut v);
        for (k, value) in v.iter().enumerate() {
            w[column_index(col, k)] = *value;
        }
    }
}

// =============================================================================
// COMPRESSION
// =============================================================================

/// Compression function G with feed-forward (see [`crate::CompressFn`]).
pub fn compress(register: &mut Block, reference: &Block, target: &mut Block, mode: FillMode) {
    // R = register ^ reference
    *register ^= reference;

    // Feed-forward term: R, plus the old target when accumulating
    let mut feed = *register;
    if mode == FillMode::Accumulate {
        feed ^= &*target;
    }

    permute(register);
    *register ^= &feed;
    *target = *register;
}
