use num::bigint::BigUint;

use crate::comb::precision::Precision;
use crate::error::{Error, Result};

/// Width of the scalars the comb covers.
pub const SCALAR_BITS: u32 = 256;

/// Partition of the 256-bit scalar into fixed-width blocks.
///
/// Every block but the last is `bits_per_block` wide; the last one takes the
/// remainder when the width does not divide 256.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct CombLayout {
    bits_per_block: u32,
}

impl CombLayout {
    pub const MAX_BLOCK_BITS: u32 = 16;

    pub fn new(bits_per_block: u32) -> Result<Self> {
        if bits_per_block == 0 || bits_per_block > Self::MAX_BLOCK_BITS {
            return Err(Error::InvalidBlockWidth(bits_per_block));
        }
        Ok(Self { bits_per_block })
    }

    #[inline]
    pub fn bits_per_block(&self) -> u32 {
        self.bits_per_block
    }

    /// ⌈256 / bits_per_block⌉
    #[inline]
    pub fn blocks(&self) -> usize {
        SCALAR_BITS.div_ceil(self.bits_per_block) as usize
    }

    /// Window width of `block`; the final block may be narrower.
    pub fn block_bits(&self, block: usize) -> u32 {
        let last = self.blocks() - 1;
        if block < last {
            self.bits_per_block
        } else {
            SCALAR_BITS - last as u32 * self.bits_per_block
        }
    }

    #[inline]
    pub fn entries_in_block(&self, block: usize) -> usize {
        1 << self.block_bits(block)
    }

    pub fn total_entries(&self) -> usize {
        (0..self.blocks()).map(|b| self.entries_in_block(b)).sum()
    }

    /// True when every block has the same width.
    #[inline]
    pub fn is_uniform(&self) -> bool {
        SCALAR_BITS % self.bits_per_block == 0
    }

    /// Bit offset of the first scalar bit covered by `block`.
    #[inline]
    pub fn shift(&self, block: usize) -> u64 {
        block as u64 * u64::from(self.bits_per_block)
    }

    /// Splits `k` into one window value per block, lowest block first.
    /// Bits at or above 2²⁵⁶ are ignored.
    pub fn digits(&self, k: &BigUint) -> Vec<usize> {
        (0..self.blocks())
            .map(|block| {
                let shift = self.shift(block);
                (0..u64::from(self.block_bits(block)))
                    .filter(|&i| k.bit(shift + i))
                    .fold(0usize, |acc, i| acc | (1 << i))
            })
            .collect()
    }
}

impl From<Precision> for CombLayout {
    fn from(precision: Precision) -> Self {
        Self {
            bits_per_block: precision.bits(),
        }
    }
}
