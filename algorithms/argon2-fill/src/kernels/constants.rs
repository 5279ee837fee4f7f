//! Argon2 Structural Constants
//!
//! Sizes follow RFC 9106. The decoded-parameter limits at the bottom are
//! enforced by the string encoder upstream, not by this engine; they are
//! published here so callers share one definition.

// =============================================================================
// BLOCK GEOMETRY
// =============================================================================

/// Block size in bytes.
pub const BLOCK_SIZE: usize = 1024;

/// 64-bit words per block.
pub const QWORDS_IN_BLOCK: usize = BLOCK_SIZE / 8;

/// 128-bit words per block (SIMD register view).
pub const OWORDS_IN_BLOCK: usize = BLOCK_SIZE / 16;

/// Pseudo-random values produced by one address block.
pub const ADDRESSES_IN_BLOCK: usize = 128;

// =============================================================================
// MEMORY ORGANISATION
// =============================================================================

/// Slices per lane; the end of each slice is a cross-lane barrier.
pub const SYNC_POINTS: u32 = 4;

/// Blocks per lane seeded before filling starts.
pub const PRESEEDED_BLOCKS: u32 = 2;

// =============================================================================
// PARAMETER LIMITS
// =============================================================================

/// Minimum lane count.
pub const MIN_LANES: u32 = 1;

/// Maximum lane count accepted by the encoded form.
pub const MAX_LANES: u32 = 255;

/// Minimum salt length accepted by the encoded form.
pub const MIN_SALT_LEN: usize = 8;

/// Minimum output length accepted by the encoded form.
pub const MIN_OUTPUT_LEN: usize = 12;
