//! Data-independent address generation.
//!
//! Argon2i (and the first half of Argon2id's first pass) derives reference
//! positions from a counter-driven stream instead of memory contents, so the
//! access pattern leaks nothing about the password.

use crate::block::Block;
use crate::engine::dispatcher::Kernel;
use crate::kernels::constants::ADDRESSES_IN_BLOCK;
use crate::layout::SegmentPosition;
use crate::params::Instance;
use crate::types::{FillMode, Variant};

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

/// Word slot of the batch counter in the input block.
const COUNTER_WORD: usize = 6;

// =============================================================================
// ADDRESSING MODE
// =============================================================================

/// Where a segment takes its pseudo-random values from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Addressing {
    /// From the address generator; memory contents never influence positions.
    DataIndependent,
    /// From word 0 of the previously produced block.
    DataDependent,
}

impl Addressing {
    /// Addressing used by segment `(pass, slice)` of `variant`.
    #[must_use]
    pub const fn select(variant: Variant, pass: u32, slice: u32) -> Self {
        match variant {
            Variant::Argon2i => Self::DataIndependent,
            Variant::Argon2id if pass == 0 && slice < 2 => Self::DataIndependent,
            Variant::Argon2id | Variant::Argon2d => Self::DataDependent,
        }
    }
}

// =============================================================================
// GENERATOR
// =============================================================================

/// Pseudo-random value stream for one segment.
///
/// Batch `k` (counter `k + 1`) is `G(0, G(0, input))`; value `i` of the
/// segment is word `i % 128` of batch `i / 128`.
#[derive(Debug, Clone)]
pub struct AddressGenerator {
    kernel: Kernel,
    input: Block,
    addresses: Block,
    index: u32,
    end: u32,
}

impl AddressGenerator {
    /// Generator positioned at the segment's starting index.
    #[must_use]
    pub fn new(instance: &Instance, segment: SegmentPosition) -> Self {
        let mut input = Block::ZERO;
        input[0] = u64::from(segment.pass);
        input[1] = u64::from(segment.lane);
        input[2] = u64::from(segment.slice);
        input[3] = u64::from(instance.params().memory_blocks);
        input[4] = u64::from(instance.passes());
        input[5] = u64::from(instance.variant().to_u32());

        let mut generator = Self {
            kernel: instance.kernel(),
            input,
            addresses: Block::ZERO,
            index: segment.starting_index(),
            end: instance.layout().segment_length(),
        };

        // Starting mid-batch: the batch the skipped values came from is still needed
        if generator.index as usize % ADDRESSES_IN_BLOCK != 0 {
            generator.refill();
        }
        generator
    }

    /// Segment index the next value belongs to.
    #[must_use]
    pub const fn position(&self) -> u32 {
        self.index
    }

    /// Next pseudo-random value.
    pub fn next_value(&mut self) -> u64 {
        let slot = self.index as usize % ADDRESSES_IN_BLOCK;
        if slot == 0 {
            self.refill();
        }
        self.index += 1;
        self.addresses[slot]
    }

    /// Every remaining value of the segment, in index order.
    #[must_use]
    pub fn segment_values(mut self) -> Vec<u64> {
        let remaining = self.end.saturating_sub(self.index) as usize;
        let mut values = Vec::with_capacity(remaining);
        for _ in 0..remaining {
            values.push(self.next_value());
        }
        values
    }

    /// Advance the counter and compute the next batch of 128 values.
    fn refill(&mut self) {
        self.input[COUNTER_WORD] = self.input[COUNTER_WORD].wrapping_add(1);

        let mut register = Block::ZERO;
        let mut first = Block::ZERO;
        self.kernel
            .compress(&mut register, &self.input, &mut first, FillMode::Overwrite);

        let mut register = Block::ZERO;
        self.kernel
            .compress(&mut register, &first, &mut self.addresses, FillMode::Overwrite);
    }
}

impl Iterator for AddressGenerator {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        (self.index < self.end).then(|| self.next_value())
    }
}
