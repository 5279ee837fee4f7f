//! Shared types used across the engine.

use crate::block::Block;

// =============================================================================
// KERNEL INTERFACE
// =============================================================================

/// Unified compression signature: `(register, reference, target, mode)`.
///
/// Computes `R = register ^ reference`, then `P(R) ^ R` (overwrite) or
/// `P(R) ^ R ^ target` (accumulate), and stores the result in both
/// `register` and `target`.
///
/// The portable kernel and the SIMD kernels implement this same signature so
/// the dispatcher can swap them at runtime.
pub type CompressFn = fn(&mut Block, &Block, &mut Block, FillMode);

/// How a freshly compressed block is combined with the block it replaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillMode {
    /// Replace the target block with `G(register, reference)`.
    Overwrite,
    /// XOR `G(register, reference)` into the existing target block.
    Accumulate,
}

impl FillMode {
    /// Mode used for every block of the given pass.
    ///
    /// Version 0x10 always overwrites. Version 0x13 overwrites on the first
    /// pass and accumulates on every later one.
    #[must_use]
    pub const fn select(version: Version, pass: u32) -> Self {
        match version {
            Version::V0x10 => Self::Overwrite,
            Version::V0x13 if pass == 0 => Self::Overwrite,
            Version::V0x13 => Self::Accumulate,
        }
    }
}

// =============================================================================
// ALGORITHM IDENTIFIERS
// =============================================================================

/// Argon2 variant. The discriminant is the type id mixed into address blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum Variant {
    /// Data-dependent addressing.
    Argon2d = 0,
    /// Data-independent addressing.
    Argon2i = 1,
    /// Data-independent for the first half of pass 0, data-dependent afterwards.
    Argon2id = 2,
}

impl Variant {
    /// Numeric type id.
    #[must_use]
    pub const fn to_u32(self) -> u32 {
        self as u32
    }
}

/// Argon2 version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum Version {
    /// Legacy 1.0: blocks are always overwritten.
    V0x10 = 0x10,
    /// Current 1.3: later passes XOR into the previous content.
    V0x13 = 0x13,
}

impl Version {
    /// Numeric version as encoded in H0.
    #[must_use]
    pub const fn to_u32(self) -> u32 {
        self as u32
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Precondition violations reported by the engine.
///
/// Everything here is a caller bug: the engine never fails on valid inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FillError {
    /// Lane count outside `MIN_LANES..=MAX_LANES`.
    #[error("lane count {0} out of range (1..=255)")]
    InvalidLanes(u32),

    /// Zero passes requested.
    #[error("pass count must be at least 1")]
    InvalidPasses,

    /// Fewer than `2 * SYNC_POINTS` blocks per lane.
    #[error("{blocks} blocks is too small for {lanes} lanes (need at least {minimum})")]
    MemoryTooSmall {
        /// Requested block count.
        blocks: u32,
        /// Requested lane count.
        lanes: u32,
        /// Smallest acceptable block count.
        minimum: u32,
    },

    /// Block count not a multiple of `SYNC_POINTS * lanes`.
    #[error("{blocks} blocks is not a multiple of 4 x {lanes} lanes")]
    MemoryNotAligned {
        /// Requested block count.
        blocks: u32,
        /// Requested lane count.
        lanes: u32,
    },

    /// The memory slice handed to the engine does not match the instance.
    #[error("memory holds {actual} blocks, instance expects {expected}")]
    MemoryLengthMismatch {
        /// Block count described by the instance.
        expected: usize,
        /// Length of the slice that was passed in.
        actual: usize,
    },

    /// Pass, lane or slice outside the instance bounds.
    #[error("segment (pass {pass}, lane {lane}, slice {slice}) is outside the instance")]
    PositionOutOfRange {
        /// Requested pass.
        pass: u32,
        /// Requested lane.
        lane: u32,
        /// Requested slice.
        slice: u32,
    },

    /// A reference resolved into the slice being filled or, on the first
    /// pass, into a later slice that has not been filled yet. Segments of
    /// earlier slices are assumed finished: calling `fill_segment` out of
    /// order is not detected.
    #[error("reference to unfinished block {index} of lane {lane}")]
    UnfinishedReference {
        /// Referenced lane.
        lane: u32,
        /// Referenced index within that lane.
        index: u32,
    },
}
