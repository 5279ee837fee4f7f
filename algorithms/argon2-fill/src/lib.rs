#![cfg_attr(not(feature = "std"), no_std)]

//! # argon2-fill
//!
//! The memory-filling engine of Argon2 (RFC 9106).
//! Accelerated by SSSE3 on `x86_64`, portable everywhere else.
//!
//! The engine takes a memory region whose first two blocks per lane are
//! already seeded and fills every other block with the `BlaMka` compression
//! function, using data-dependent (Argon2d), data-independent (Argon2i) or
//! hybrid (Argon2id) addressing. Seeding and tag extraction live elsewhere.

//! # Usage
//! ```rust
//! use argon2_fill::{fill_memory, Block, Instance, Params, Variant, Version};
//!
//! let params = Params {
//!     lanes: 2,
//!     memory_blocks: 64,
//!     passes: 2,
//!     variant: Variant::Argon2id,
//!     version: Version::V0x13,
//! };
//! let instance = Instance::new(params)?;
//!
//! // 1. Seed the first two blocks of every lane (normally H' of H0).
//! let mut memory = vec![Block::ZERO; instance.layout().memory_blocks()];
//! for lane in 0..instance.layout().lanes() {
//!     for index in 0..2 {
//!         let offset = instance.layout().absolute_offset(lane, index);
//!         memory[offset] = Block::splat(u64::from(lane * 2 + index + 1));
//!     }
//! }
//!
//! // 2. Fill everything else.
//! fill_memory(&instance, &mut memory)?;
//! # Ok::<(), argon2_fill::FillError>(())
//! ```

// =============================================================================
// MODULES
// =============================================================================

#[cfg(not(feature = "std"))]
extern crate alloc;

mod block;
mod engine;
// Re-export internal kernels for benchmarking/testing, but hide from docs
#[doc(hidden)]
pub mod kernels; // Public for test/bench use only
mod layout;
mod params;
pub(crate) mod types;

// =============================================================================
// EXPORTS
// =============================================================================

pub use block::Block;
pub use engine::addressing::{AddressGenerator, Addressing};
pub use engine::dispatcher::{best_kernel, Kernel};
pub use engine::parallel::fill_memory;
pub use engine::reference::{reference_position, BlockRef};
pub use engine::segment::fill_segment;
pub use kernels::constants::{
    ADDRESSES_IN_BLOCK, BLOCK_SIZE, MAX_LANES, MIN_LANES, MIN_OUTPUT_LEN, MIN_SALT_LEN,
    QWORDS_IN_BLOCK, SYNC_POINTS,
};
pub use layout::{Layout, Position, SegmentPosition};
pub use params::{Instance, Params};
pub use types::{CompressFn, FillError, FillMode, Variant, Version};

/// Returns the name of the compression backend selected for this CPU.
#[must_use]
pub fn active_backend() -> &'static str {
    engine::dispatcher::best_kernel().name()
}
