//! Reference block selection.
//!
//! Maps a 64-bit pseudo-random value to the block that feeds the next
//! compression: the high half picks the lane, the low half picks an index
//! inside the window of blocks that are guaranteed to be finished.

use crate::kernels::constants::SYNC_POINTS;
use crate::layout::{Layout, Position};
use crate::params::Instance;

/// Location of a reference block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockRef {
    /// Lane holding the block.
    pub lane: u32,
    /// Index within that lane.
    pub index: u32,
}

/// Block referenced while producing `position`.
///
/// `position` must be a block the filler produces: its lane and slice inside
/// the instance, its index in `starting_index()..segment_length`. The
/// reference window is empty before the starting index.
///
/// # Panics
/// In debug builds, if `position` is outside that range.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn reference_position(instance: &Instance, position: Position, pseudo_rand: u64) -> BlockRef {
    let layout = instance.layout();
    debug_assert!(
        position.lane < layout.lanes() && position.slice < SYNC_POINTS,
        "segment ({}, {}, {}) outside the instance",
        position.pass,
        position.lane,
        position.slice
    );
    debug_assert!(
        (position.segment().starting_index()..layout.segment_length()).contains(&position.index),
        "index {} is not produced by its segment",
        position.index
    );

    // 1. Lane: the current one until other lanes have finished a slice
    let lane = if position.segment().is_lane_local() {
        position.lane
    } else {
        ((pseudo_rand >> 32) % u64::from(layout.lanes())) as u32
    };

    // 2. Window size
    let area = reference_area(layout, position, lane == position.lane);

    // 3. Non-uniform map of the low half into the window, biased toward recent blocks
    let j1 = pseudo_rand & 0xFFFF_FFFF;
    let x = (j1 * j1) >> 32;
    let relative = area - 1 - ((area * x) >> 32);

    // 4. Window start: right after the current segment, once a full pass exists
    let start = if position.pass == 0 || position.slice == 3 {
        0
    } else {
        u64::from(layout.slice_start(position.slice + 1))
    };

    BlockRef {
        lane,
        index: layout.wrap_to_lane_start(start + relative),
    }
}

/// Number of blocks the reference may be drawn from.
fn reference_area(layout: &Layout, position: Position, same_lane: bool) -> u64 {
    let segment_length = u64::from(layout.segment_length());
    let index = u64::from(position.index);
    let first_in_segment = u64::from(position.index == 0);

    if position.pass == 0 {
        let finished = u64::from(position.slice) * segment_length;
        if position.slice == 0 {
            index - 1
        } else if same_lane {
            finished + index - 1
        } else {
            finished - first_in_segment
        }
    } else {
        let finished = u64::from(layout.lane_length()) - segment_length;
        if same_lane {
            finished + index - 1
        } else {
            finished - first_in_segment
        }
    }
}
