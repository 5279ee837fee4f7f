//! Parallel Fill Engine
//!
//! Runs every pass and slice in order. Within a slice the lanes are
//! independent:
//! 1. Memory is split into the active segments plus read-only lane views
//! 2. Segments are filled in parallel via Rayon if `multithread` is enabled,
//!    serially otherwise
//! 3. Dropping the split borrows is the slice barrier

use crate::block::Block;
use crate::engine::segment::{fill_active, initial_register, split_slice};
use crate::kernels::constants::SYNC_POINTS;
use crate::layout::SegmentPosition;
use crate::params::Instance;
use crate::types::FillError;

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

// =============================================================================
// ORCHESTRATOR
// =============================================================================

/// Fill every non-seeded block of `memory`.
///
/// The first two blocks of each lane must already be seeded. Equivalent to
/// calling [`crate::fill_segment`] for every pass, slice and lane in order.
///
/// # Errors
/// Returns an error if `memory` does not hold exactly the instance's block
/// count.
pub fn fill_memory(instance: &Instance, memory: &mut [Block]) -> Result<(), FillError> {
    instance.check_memory(memory)?;

    tracing::debug!(
        blocks = memory.len(),
        passes = instance.passes(),
        lanes = instance.layout().lanes(),
        backend = instance.kernel().name(),
        "fill started"
    );

    let layout = instance.layout();
    for pass in 0..instance.passes() {
        tracing::trace!(pass, "pass started");

        for slice in 0..SYNC_POINTS {
            let finished: &[Block] = memory;
            let registers: Vec<Block> = (0..layout.lanes())
                .map(|lane| {
                    initial_register(layout, finished, SegmentPosition::new(pass, lane, slice))
                })
                .collect();
            let (segments, views) = split_slice(layout, memory, pass, slice);
            segments.process_lanes(|lane, segment| {
                fill_active(
                    instance,
                    segment,
                    &views,
                    SegmentPosition::new(pass, lane, slice),
                    registers[lane as usize],
                )
            })?;
        }
    }

    tracing::debug!("fill finished");
    Ok(())
}

/// Helper for feature-agnostic lane processing
trait LaneProcessor {
    fn process_lanes<F>(self, f: F) -> Result<(), FillError>
    where
        F: Fn(u32, &mut [Block]) -> Result<(), FillError> + Sync + Send;
}

impl LaneProcessor for Vec<&mut [Block]> {
    #[allow(clippy::cast_possible_truncation)]
    fn process_lanes<F>(self, f: F) -> Result<(), FillError>
    where
        F: Fn(u32, &mut [Block]) -> Result<(), FillError> + Sync + Send,
    {
        #[cfg(feature = "multithread")]
        {
            use rayon::prelude::*;
            self.into_par_iter()
                .enumerate()
                .try_for_each(|(lane, segment)| f(lane as u32, segment))
        }
        #[cfg(not(feature = "multithread"))]
        {
            self.into_iter()
                .enumerate()
                .try_for_each(|(lane, segment)| f(lane as u32, segment))
        }
    }
}
