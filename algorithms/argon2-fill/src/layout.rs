//! Memory geometry and block positions.
//!
//! Memory is lane-major: lane `l` owns the contiguous range
//! `l * lane_length .. (l + 1) * lane_length`, split into `SYNC_POINTS`
//! equal slices. All offset arithmetic lives here.

use crate::kernels::constants::{PRESEEDED_BLOCKS, SYNC_POINTS};
use core::ops::Range;

// =============================================================================
// LAYOUT
// =============================================================================

/// Lane/segment dimensions of a validated instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    lanes: u32,
    lane_length: u32,
    segment_length: u32,
}

impl Layout {
    /// Build from an already validated block count (multiple of `4 * lanes`).
    pub(crate) const fn new(lanes: u32, memory_blocks: u32) -> Self {
        let lane_length = memory_blocks / lanes;
        Self {
            lanes,
            lane_length,
            segment_length: lane_length / SYNC_POINTS,
        }
    }

    /// Number of lanes.
    #[must_use]
    pub const fn lanes(&self) -> u32 {
        self.lanes
    }

    /// Blocks per lane.
    #[must_use]
    pub const fn lane_length(&self) -> u32 {
        self.lane_length
    }

    /// Blocks per segment (one lane, one slice).
    #[must_use]
    pub const fn segment_length(&self) -> u32 {
        self.segment_length
    }

    /// Total number of blocks.
    #[must_use]
    pub const fn memory_blocks(&self) -> usize {
        self.lanes as usize * self.lane_length as usize
    }

    /// First index (within a lane) of `slice`.
    #[must_use]
    pub const fn slice_start(&self, slice: u32) -> u32 {
        slice * self.segment_length
    }

    /// Offset in memory of block `index` of `lane`.
    #[must_use]
    pub const fn absolute_offset(&self, lane: u32, index: u32) -> usize {
        lane as usize * self.lane_length as usize + index as usize
    }

    /// Memory offsets covered by one segment.
    #[must_use]
    pub const fn segment_range(&self, lane: u32, slice: u32) -> Range<usize> {
        let start = self.absolute_offset(lane, self.slice_start(slice));
        start..start + self.segment_length as usize
    }

    /// Reduce a (possibly overflowing) in-lane index back into the lane.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn wrap_to_lane_start(&self, index: u64) -> u32 {
        (index % self.lane_length as u64) as u32
    }

    /// In-lane index of the block before `index`; the lane's last block
    /// precedes its first.
    #[must_use]
    pub const fn previous_index(&self, index: u32) -> u32 {
        if index == 0 {
            self.lane_length - 1
        } else {
            index - 1
        }
    }

    /// Memory offset of the block before `offset` within the same lane.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn previous_offset(&self, offset: usize) -> usize {
        let lane_length = self.lane_length as usize;
        let lane_start = offset - offset % lane_length;
        lane_start + self.previous_index((offset - lane_start) as u32) as usize
    }
}

// =============================================================================
// POSITIONS
// =============================================================================

/// Coordinates of one segment-fill call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SegmentPosition {
    /// Pass number, starting at 0.
    pub pass: u32,
    /// Lane being filled.
    pub lane: u32,
    /// Slice within the pass (`0..SYNC_POINTS`).
    pub slice: u32,
}

impl SegmentPosition {
    /// Create a segment position.
    #[must_use]
    pub const fn new(pass: u32, lane: u32, slice: u32) -> Self {
        Self { pass, lane, slice }
    }

    /// First index of the segment the filler produces; the first two blocks
    /// of every lane are seeded before pass 0.
    #[must_use]
    pub const fn starting_index(&self) -> u32 {
        if self.pass == 0 && self.slice == 0 {
            PRESEEDED_BLOCKS
        } else {
            0
        }
    }

    /// Cross-lane references are only possible after the first slice.
    #[must_use]
    pub const fn is_lane_local(&self) -> bool {
        self.pass == 0 && self.slice == 0
    }

    /// Position of block `index` within this segment.
    #[must_use]
    pub const fn at(&self, index: u32) -> Position {
        Position {
            pass: self.pass,
            lane: self.lane,
            slice: self.slice,
            index,
        }
    }
}

/// Coordinates of a single block being produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    /// Pass number, starting at 0.
    pub pass: u32,
    /// Lane being filled.
    pub lane: u32,
    /// Slice within the pass.
    pub slice: u32,
    /// Index within the segment.
    pub index: u32,
}

impl Position {
    /// The segment this block belongs to.
    #[must_use]
    pub const fn segment(&self) -> SegmentPosition {
        SegmentPosition::new(self.pass, self.lane, self.slice)
    }

    /// Index of the block within its lane.
    #[must_use]
    pub const fn index_in_lane(&self, layout: &Layout) -> u32 {
        layout.slice_start(self.slice) + self.index
    }
}
