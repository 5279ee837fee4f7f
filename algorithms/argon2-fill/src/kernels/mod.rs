//! Compression Kernels
//!
//! Hardware-specific implementations of the Argon2 compression function G.

pub mod constants;
pub mod portable;
#[cfg(target_arch = "x86_64")]
pub mod ssse3;
