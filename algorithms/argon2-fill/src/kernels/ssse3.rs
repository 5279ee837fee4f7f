//! SSSE3 Compression Kernel
//!
//! Keeps the whole block in 64 XMM values. Each `BLAKE2b` round works on two
//! 128-bit lanes at a time; 32/24/16-bit rotations are byte shuffles and the
//! diagonal step is an `alignr` lane rotation.

#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::similar_names)]
#![allow(clippy::many_single_char_names)]

use crate::block::Block;
use crate::kernels::constants::OWORDS_IN_BLOCK;
use crate::types::FillMode;

use core::arch::x86_64::{
    __m128i, _mm_add_epi64, _mm_alignr_epi8, _mm_loadu_si128, _mm_mul_epu32, _mm_setr_epi8,
    _mm_setzero_si128, _mm_shuffle_epi32, _mm_shuffle_epi8, _mm_srli_epi64, _mm_storeu_si128,
    _mm_xor_si128,
};

// =============================================================================
// PRIMITIVES
// =============================================================================

/// `x + y + 2 * lo32(x) * lo32(y)` on both 64-bit lanes.
#[inline]
#[target_feature(enable = "ssse3")]
#[allow(unsafe_code)]
unsafe fn blamka(x: __m128i, y: __m128i) -> __m128i {
    let z = _mm_mul_epu32(x, y);
    _mm_add_epi64(_mm_add_epi64(x, y), _mm_add_epi64(z, z))
}

#[inline]
#[target_feature(enable = "ssse3")]
#[allow(unsafe_code)]
unsafe fn rotr32(x: __m128i) -> __m128i {
    _mm_shuffle_epi32(x, 0b10_11_00_01)
}

#[inline]
#[target_feature(enable = "ssse3")]
#[allow(unsafe_code)]
unsafe fn rotr24(x: __m128i) -> __m128i {
    let r24 = _mm_setr_epi8(3, 4, 5, 6, 7, 0, 1, 2, 11, 12, 13, 14, 15, 8, 9, 10);
    _mm_shuffle_epi8(x, r24)
}

#[inline]
#[target_feature(enable = "ssse3")]
#[allow(unsafe_code)]
unsafe fn rotr16(x: __m128i) -> __m128i {
    let r16 = _mm_setr_epi8(2, 3, 4, 5, 6, 7, 0, 1, 10, 11, 12, 13, 14, 15, 8, 9);
    _mm_shuffle_epi8(x, r16)
}

/// Rotate right by 63 == rotate left by 1.
#[inline]
#[target_feature(enable = "ssse3")]
#[allow(unsafe_code)]
unsafe fn rotr63(x: __m128i) -> __m128i {
    _mm_xor_si128(_mm_srli_epi64(x, 63), _mm_add_epi64(x, x))
}

/// Quarter-round on two columns at once.
#[inline]
#[target_feature(enable = "ssse3")]
#[allow(unsafe_code)]
unsafe fn gb(a: &mut __m128i, b: &mut __m128i, c: &mut __m128i, d: &mut __m128i) {
    *a = blamka(*a, *b);
    *d = rotr32(_mm_xor_si128(*d, *a));
    *c = blamka(*c, *d);
    *b = rotr24(_mm_xor_si128(*b, *c));
    *a = blamka(*a, *b);
    *d = rotr16(_mm_xor_si128(*d, *a));
    *c = blamka(*c, *d);
    *b = rotr63(_mm_xor_si128(*b, *c));
}

// =============================================================================
// ROUND
// =============================================================================

/// One `BLAKE2b` round over `[a0, a1, b0, b1, c0, c1, d0, d1]`, where each
/// value holds two consecutive words of the 4x4 matrix.
#[inline]
#[target_feature(enable = "ssse3")]
#[allow(unsafe_code)]
unsafe fn round(r: &mut [__m128i; 8]) {
    let [mut a0, mut a1, mut b0, mut b1, mut c0, mut c1, mut d0, mut d1] = *r;

    // 1. Columns
    gb(&mut a0, &mut b0, &mut c0, &mut d0);
    gb(&mut a1, &mut b1, &mut c1, &mut d1);

    // 2. Diagonalize: b <<< 1 word, c <<< 2 words, d <<< 3 words
    let (t0, t1) = (_mm_alignr_epi8(b1, b0, 8), _mm_alignr_epi8(b0, b1, 8));
    b0 = t0;
    b1 = t1;
    core::mem::swap(&mut c0, &mut c1);
    let (t0, t1) = (_mm_alignr_epi8(d1, d0, 8), _mm_alignr_epi8(d0, d1, 8));
    d0 = t1;
    d1 = t0;

    // 3. Diagonals
    gb(&mut a0, &mut b0, &mut c0, &mut d0);
    gb(&mut a1, &mut b1, &mut c1, &mut d1);

    // 4. Undiagonalize
    let (t0, t1) = (_mm_alignr_epi8(b0, b1, 8), _mm_alignr_epi8(b1, b0, 8));
    b0 = t0;
    b1 = t1;
    core::mem::swap(&mut c0, &mut c1);
    let (t0, t1) = (_mm_alignr_epi8(d0, d1, 8), _mm_alignr_epi8(d1, d0, 8));
    d0 = t1;
    d1 = t0;

    *r = [a0, a1, b0, b1, c0, c1, d0, d1];
}

// =============================================================================
// COMPRESSION
// =============================================================================

/// Compression function G with feed-forward (see [`crate::CompressFn`]).
///
/// # Safety
/// The CPU must support SSSE3.
// SAFETY: Requires SSSE3 (enforced by dispatcher / caller feature check).
// Loads and stores use unaligned intrinsics on in-bounds offsets of 1024-byte blocks.
#[target_feature(enable = "ssse3")]
#[allow(unsafe_code)]
pub unsafe fn compress(
    register: &mut Block,
    reference: &Block,
    target: &mut Block,
    mode: FillMode,
) {
    let reg_ptr = register.0.as_mut_ptr().cast::<__m128i>();
    let ref_ptr = reference.0.as_ptr().cast::<__m128i>();
    let tgt_ptr = target.0.as_mut_ptr().cast::<__m128i>();

    // 1. R = register ^ reference; feed-forward = R (^ old target)
    let mut state = [_mm_setzero_si128(); OWORDS_IN_BLOCK];
    for (i, s) in state.iter_mut().enumerate() {
        *s = _mm_xor_si128(_mm_loadu_si128(reg_ptr.add(i)), _mm_loadu_si128(ref_ptr.add(i)));
    }

    let mut feed = state;
    if mode == FillMode::Accumulate {
        for (i, f) in feed.iter_mut().enumerate() {
            *f = _mm_xor_si128(*f, _mm_loadu_si128(tgt_ptr.add(i)));
        }
    }

    // 2. Rows: 8 consecutive XMM values each
    for row in 0..8 {
        let mut r = [_mm_setzero_si128(); 8];
        r.copy_from_slice(&state[8 * row..8 * row + 8]);
        round(&mut r);
        state[8 * row..8 * row + 8].copy_from_slice(&r);
    }

    // 3. Columns: one XMM value from each row
    for col in 0..8 {
        let mut r = [_mm_setzero_si128(); 8];
        for (k, value) in r.iter_mut().enumerate() {
            *value = state[8 * k + col];
        }
        round(&mut r);
        for (k, value) in r.iter().enumerate() {
            state[8 * k + col] = *value;
        }
    }

    // 4. Feed-forward, write both outputs
    for (i, (s, f)) in state.iter().zip(feed.iter()).enumerate() {
        let out = _mm_xor_si128(*s, *f);
        _mm_storeu_si128(reg_ptr.add(i), out);
        _mm_storeu_si128(tgt_ptr.add(i), out);
    }
}
