//! Memory block: 1024 bytes viewed as 128 little-endian `u64` words.

use crate::kernels::constants::{BLOCK_SIZE, QWORDS_IN_BLOCK};
use core::ops::{BitXorAssign, Index, IndexMut};
use static_assertions::const_assert_eq;

// =============================================================================
// BLOCK
// =============================================================================

/// One unit of Argon2 working memory.
#[derive(Clone, Copy, PartialEq, Eq)]
#[repr(C, align(64))]
pub struct Block(pub [u64; QWORDS_IN_BLOCK]);

const_assert_eq!(core::mem::size_of::<Block>(), BLOCK_SIZE);

impl Block {
    /// All-zero block.
    pub const ZERO: Self = Self([0; QWORDS_IN_BLOCK]);

    /// Block with every word set to `word`.
    #[must_use]
    pub const fn splat(word: u64) -> Self {
        Self([word; QWORDS_IN_BLOCK])
    }

    /// Decode 1024 little-endian bytes.
    #[must_use]
    pub fn from_bytes(bytes: &[u8; BLOCK_SIZE]) -> Self {
        let mut block = Self::ZERO;
        for (word, chunk) in block.0.iter_mut().zip(bytes.chunks_exact(8)) {
            let mut le = [0u8; 8];
            le.copy_from_slice(chunk);
            *word = u64::from_le_bytes(le);
        }
        block
    }

    /// Encode as 1024 little-endian bytes.
    #[must_use]
    pub fn to_bytes(&self) -> [u8; BLOCK_SIZE] {
        let mut out = [0u8; BLOCK_SIZE];
        for (chunk, word) in out.chunks_exact_mut(8).zip(self.0.iter()) {
            chunk.copy_from_slice(&word.to_le_bytes());
        }
        out
    }
}

impl Default for Block {
    fn default() -> Self {
        Self::ZERO
    }
}

impl BitXorAssign<&Self> for Block {
    fn bitxor_assign(&mut self, rhs: &Self) {
        for (dst, src) in self.0.iter_mut().zip(rhs.0.iter()) {
            *dst ^= src;
        }
    }
}

impl Index<usize> for Block {
    type Output = u64;

    fn index(&self, index: usize) -> &u64 {
        &self.0[index]
    }
}

impl IndexMut<usize> for Block {
    fn index_mut(&mut self, index: usize) -> &mut u64 {
        &mut self.0[index]
    }
}

// Full dumps of 128 words are useless in test failures.
impl core::fmt::Debug for Block {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "Block([{:016x}, {:016x}, .., {:016x}])",
            self.0[0],
            self.0[1],
            self.0[QWORDS_IN_BLOCK - 1]
        )
    }
}
