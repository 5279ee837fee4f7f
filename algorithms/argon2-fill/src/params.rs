//! Cost parameters and the validated, immutable fill instance.

use crate::block::Block;
use crate::engine::dispatcher::{self, Kernel};
use crate::kernels::constants::{MAX_LANES, MIN_LANES, SYNC_POINTS};
use crate::layout::{Layout, SegmentPosition};
use crate::types::{FillError, FillMode, Variant, Version};

// =============================================================================
// PARAMETERS
// =============================================================================

/// Cost parameters of one fill run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Params {
    /// Degree of parallelism (`1..=255`).
    pub lanes: u32,
    /// Total number of 1 KiB blocks; a multiple of `4 * lanes`, at least `8 * lanes`.
    pub memory_blocks: u32,
    /// Number of passes over memory (time cost, at least 1).
    pub passes: u32,
    /// Addressing variant.
    pub variant: Variant,
    /// Algorithm version.
    pub version: Version,
}

impl Default for Params {
    /// Argon2id v1.3, 4 MiB, 3 passes, 1 lane.
    fn default() -> Self {
        Self {
            lanes: 1,
            memory_blocks: 4096,
            passes: 3,
            variant: Variant::Argon2id,
            version: Version::V0x13,
        }
    }
}

impl Params {
    /// Block count used for a memory cost of `m_cost_kib` KiB: at least
    /// `2 * SYNC_POINTS` blocks per lane, rounded down to a whole number of
    /// segments per lane.
    ///
    /// `lanes` is clamped to `MIN_LANES..=MAX_LANES` first, so the result is
    /// always defined; [`Params::validate`] still rejects the unclamped value.
    #[must_use]
    pub const fn memory_blocks_for(m_cost_kib: u32, lanes: u32) -> u32 {
        let lanes = if lanes < MIN_LANES {
            MIN_LANES
        } else if lanes > MAX_LANES {
            MAX_LANES
        } else {
            lanes
        };
        let minimum = 2 * SYNC_POINTS * lanes;
        let m = if m_cost_kib < minimum { minimum } else { m_cost_kib };
        let unit = SYNC_POINTS * lanes;
        (m / unit) * unit
    }

    /// Check every precondition of the fill engine.
    ///
    /// # Errors
    /// Returns the first violated bound.
    pub const fn validate(&self) -> Result<(), FillError> {
        if self.lanes < MIN_LANES || self.lanes > MAX_LANES {
            return Err(FillError::InvalidLanes(self.lanes));
        }
        if self.passes == 0 {
            return Err(FillError::InvalidPasses);
        }

        let minimum = 2 * SYNC_POINTS * self.lanes;
        if self.memory_blocks < minimum {
            return Err(FillError::MemoryTooSmall {
                blocks: self.memory_blocks,
                lanes: self.lanes,
                minimum,
            });
        }
        if self.memory_blocks % (SYNC_POINTS * self.lanes) != 0 {
            return Err(FillError::MemoryNotAligned {
                blocks: self.memory_blocks,
                lanes: self.lanes,
            });
        }
        Ok(())
    }
}

// =============================================================================
// INSTANCE
// =============================================================================

/// Validated parameters plus the compression backend chosen for this run.
#[derive(Debug, Clone, Copy)]
pub struct Instance {
    params: Params,
    layout: Layout,
    kernel: Kernel,
}

impl Instance {
    /// Validate `params` and select the fastest kernel for this CPU.
    ///
    /// # Errors
    /// Returns an error if any parameter is out of bounds.
    pub fn new(params: Params) -> Result<Self, FillError> {
        Self::with_kernel(params, dispatcher::best_kernel())
    }

    /// Validate `params` and pin a specific kernel.
    ///
    /// # Errors
    /// Returns an error if any parameter is out of bounds.
    pub fn with_kernel(params: Params, kernel: Kernel) -> Result<Self, FillError> {
        params.validate()?;
        let layout = Layout::new(params.lanes, params.memory_blocks);

        tracing::debug!(
            lanes = params.lanes,
            memory_blocks = params.memory_blocks,
            passes = params.passes,
            variant = ?params.variant,
            version = ?params.version,
            backend = kernel.name(),
            "argon2 instance ready"
        );

        Ok(Self {
            params,
            layout,
            kernel,
        })
    }

    /// Parameters this instance was built from.
    #[must_use]
    pub const fn params(&self) -> &Params {
        &self.params
    }

    /// Memory geometry.
    #[must_use]
    pub const fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Compression backend.
    #[must_use]
    pub const fn kernel(&self) -> Kernel {
        self.kernel
    }

    /// Number of passes.
    #[must_use]
    pub const fn passes(&self) -> u32 {
        self.params.passes
    }

    /// Addressing variant.
    #[must_use]
    pub const fn variant(&self) -> Variant {
        self.params.variant
    }

    /// Algorithm version.
    #[must_use]
    pub const fn version(&self) -> Version {
        self.params.version
    }

    /// Run the selected compression kernel once.
    #[inline]
    pub fn compress(
        &self,
        register: &mut Block,
        reference: &Block,
        target: &mut Block,
        mode: FillMode,
    ) {
        self.kernel.compress(register, reference, target, mode);
    }

    /// Ensure `memory` has exactly the instance's block count.
    ///
    /// # Errors
    /// Returns [`FillError::MemoryLengthMismatch`] otherwise.
    pub const fn check_memory(&self, memory: &[Block]) -> Result<(), FillError> {
        let expected = self.layout.memory_blocks();
        if memory.len() == expected {
            Ok(())
        } else {
            Err(FillError::MemoryLengthMismatch {
                expected,
                actual: memory.len(),
            })
        }
    }

    /// Ensure a segment position lies inside the instance.
    ///
    /// # Errors
    /// Returns [`FillError::PositionOutOfRange`] otherwise.
    pub const fn check_segment(&self, position: SegmentPosition) -> Result<(), FillError> {
        if position.pass < self.params.passes
            && position.lane < self.params.lanes
            && position.slice < SYNC_POINTS
        {
            Ok(())
        } else {
            Err(FillError::PositionOutOfRange {
                pass: position.pass,
                lane: position.lane,
                slice: position.slice,
            })
        }
    }
}
