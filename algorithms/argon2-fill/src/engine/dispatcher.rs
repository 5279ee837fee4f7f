//! Hardware Dispatcher
//!
//! Selects the fastest available compression kernel (SSSE3 or portable) for
//! the current CPU. Selection happens once per [`crate::Instance`].

use crate::block::Block;
use crate::kernels;
use crate::types::{CompressFn, FillMode};

// =============================================================================
// KERNEL
// =============================================================================

/// A named compression backend.
#[derive(Clone, Copy)]
pub struct Kernel {
    name: &'static str,
    compress: CompressFn,
}

impl core::fmt::Debug for Kernel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("Kernel").field(&self.name).finish()
    }
}

impl Kernel {
    /// Scalar kernel, available on every target.
    pub const PORTABLE: Self = Self {
        name: "Portable",
        compress: kernels::portable::compress,
    };

    /// SSSE3 kernel. Only hand this out after confirming CPU support.
    #[cfg(target_arch = "x86_64")]
    const SSSE3: Self = Self {
        name: "SSSE3",
        compress: safe_ssse3_wrapper,
    };

    /// SSSE3 kernel if the running CPU supports it.
    #[must_use]
    pub fn ssse3() -> Option<Self> {
        #[cfg(target_arch = "x86_64")]
        {
            if has_ssse3() {
                return Some(Self::SSSE3);
            }
        }
        None
    }

    /// Human-readable backend name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Run the kernel once.
    #[inline]
    pub fn compress(
        &self,
        register: &mut Block,
        reference: &Block,
        target: &mut Block,
        mode: FillMode,
    ) {
        (self.compress)(register, reference, target, mode);
    }
}

// =============================================================================
// DISPATCHER
// =============================================================================

cfg_if::cfg_if! {
    if #[cfg(all(feature = "std", target_arch = "x86_64"))] {
        // 1. Runtime Dispatch (Std-only)
        fn has_ssse3() -> bool {
            is_x86_feature_detected!("ssse3")
        }
    } else if #[cfg(target_arch = "x86_64")] {
        // 2. Compile-Time Dispatch (no_std)
        const fn has_ssse3() -> bool {
            cfg!(target_feature = "ssse3")
        }
    }
}

/// Returns the fastest kernel for this CPU; portable when nothing else fits.
#[must_use]
pub fn best_kernel() -> Kernel {
    let kernel = Kernel::ssse3().unwrap_or(Kernel::PORTABLE);
    tracing::debug!(backend = kernel.name(), "compression kernel selected");
    kernel
}

// =============================================================================
// WRAPPERS
// =============================================================================

/// SSSE3 wrapper with the safe [`CompressFn`] signature.
#[cfg(target_arch = "x86_64")]
#[inline]
#[allow(unsafe_code)]
fn safe_ssse3_wrapper(
    register: &mut Block,
    reference: &Block,
    target: &mut Block,
    mode: FillMode,
) {
    // SAFETY: Only reachable through `Kernel::SSSE3`, which is handed out after
    // CPUID validation (std) or when SSSE3 is enabled at compile time (no_std).
    unsafe { kernels::ssse3::compress(register, reference, target, mode) }
}
