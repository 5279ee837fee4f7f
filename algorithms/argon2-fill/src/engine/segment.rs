//! Segment filler.
//!
//! Produces every block of one `(pass, lane, slice)` segment. Memory is
//! borrowed as split slices: the active segment mutably, every lane's
//! blocks outside the active slice read-only. A reference that would land in
//! unfinished memory is reported instead of read.

use crate::block::Block;
use crate::engine::addressing::{AddressGenerator, Addressing};
use crate::engine::reference::reference_position;
use crate::layout::{Layout, SegmentPosition};
use crate::params::Instance;
use crate::types::{FillError, FillMode};

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

// =============================================================================
// MEMORY SPLITTING
// =============================================================================

/// Read-only view of one lane with the active slice cut out.
#[derive(Debug, Clone, Copy)]
pub(crate) struct LaneView<'a> {
    before: &'a [Block],
    after: &'a [Block],
    active_len: usize,
}

impl<'a> LaneView<'a> {
    /// Block `index` of the lane, unless it belongs to the active slice or
    /// to a slice the current pass has not reached.
    pub(crate) fn get(&self, index: u32) -> Option<&'a Block> {
        let index = index as usize;
        let after_start = self.before.len() + self.active_len;
        if index < self.before.len() {
            self.before.get(index)
        } else if index >= after_start {
            self.after.get(index - after_start)
        } else {
            None
        }
    }
}

/// Split lane-major memory for one slice.
///
/// Returns each lane's active segment plus the read-only remainder of every
/// lane. Lanes can then be filled independently; the slice ends when all
/// segment borrows are released. On the first pass the remainder stops at
/// the active slice, since nothing after it has been produced.
pub(crate) fn split_slice<'a>(
    layout: &Layout,
    memory: &'a mut [Block],
    pass: u32,
    slice: u32,
) -> (Vec<&'a mut [Block]>, Vec<LaneView<'a>>) {
    let lanes = layout.lanes() as usize;
    let start = layout.slice_start(slice) as usize;
    let active_len = layout.segment_length() as usize;

    let mut segments = Vec::with_capacity(lanes);
    let mut views = Vec::with_capacity(lanes);

    for lane in memory.chunks_exact_mut(layout.lane_length() as usize) {
        let (before, rest) = lane.split_at_mut(start);
        let (active, after) = rest.split_at_mut(active_len);
        let after: &[Block] = if pass == 0 { &[] } else { after };
        segments.push(active);
        views.push(LaneView {
            before,
            after,
            active_len,
        });
    }

    (segments, views)
}

/// Block preceding the first one `position` produces: the last block of the
/// previous slice, wrapping to the lane end for slice 0.
///
/// `memory` must hold the instance's full block count.
pub(crate) fn initial_register(
    layout: &Layout,
    memory: &[Block],
    position: SegmentPosition,
) -> Block {
    let first = position.at(position.starting_index()).index_in_lane(layout);
    memory[layout.previous_offset(layout.absolute_offset(position.lane, first))]
}

// =============================================================================
// SEGMENT FILL
// =============================================================================

/// Fill one segment of `memory` in place.
///
/// `memory` must hold the instance's full block count with every earlier
/// segment (in pass/slice order) already produced.
///
/// # Errors
/// Returns an error on a memory length mismatch, a position outside the
/// instance, or a reference into memory that is not finished yet.
pub fn fill_segment(
    instance: &Instance,
    memory: &mut [Block],
    position: SegmentPosition,
) -> Result<(), FillError> {
    instance.check_memory(memory)?;
    instance.check_segment(position)?;

    let layout = instance.layout();
    let register = initial_register(layout, memory, position);
    let (mut segments, views) = split_slice(layout, memory, position.pass, position.slice);
    let segment = segments.swap_remove(position.lane as usize);
    fill_active(instance, segment, &views, position, register)
}

/// Fill the active `segment` of `position.lane`, starting from `register`
/// and reading finished blocks through `views`.
pub(crate) fn fill_active(
    instance: &Instance,
    segment: &mut [Block],
    views: &[LaneView<'_>],
    position: SegmentPosition,
    mut register: Block,
) -> Result<(), FillError> {
    let layout = instance.layout();
    let slice_start = layout.slice_start(position.slice);
    let active = slice_start..slice_start + layout.segment_length();

    // 1. Per-segment modes
    let mode = FillMode::select(instance.version(), position.pass);
    let addresses = match Addressing::select(instance.variant(), position.pass, position.slice) {
        Addressing::DataIndependent => {
            Some(AddressGenerator::new(instance, position).segment_values())
        }
        Addressing::DataDependent => None,
    };

    // 2. Blocks
    for (n, index) in (position.starting_index()..layout.segment_length()).enumerate() {
        let pseudo_rand = match &addresses {
            Some(values) => values[n],
            None => register[0],
        };
        let r = reference_position(instance, position.at(index), pseudo_rand);

        let (done, rest) = segment.split_at_mut(index as usize);
        let reference = if r.lane == position.lane && active.contains(&r.index) {
            done.get((r.index - slice_start) as usize)
        } else {
            views.get(r.lane as usize).and_then(|view| view.get(r.index))
        }
        .ok_or(FillError::UnfinishedReference {
            lane: r.lane,
            index: r.index,
        })?;

        instance.compress(&mut register, reference, &mut rest[0], mode);
    }

    Ok(())
}
