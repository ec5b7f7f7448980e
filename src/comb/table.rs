//! Fixed-base comb table for the generator.
//!
//! `table[b][v] = v · 2^(b · bits_per_block) · G`. A scalar `k` is recovered
//! by summing one entry per block, indexed by the block's window of `k`.

use log::{debug, info};
use num::bigint::BigUint;
use num::One;

use crate::comb::layout::CombLayout;
use crate::comb::precision::Precision;
use crate::curve::curve_types::{AffinePoint, ProjectivePoint};
use crate::curve::secp256k1::Secp256k1;
use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CombTable {
    layout: CombLayout,
    blocks: Vec<Vec<AffinePoint>>,
}

impl CombTable {
    pub fn for_precision(generator: &AffinePoint, precision: Precision) -> Result<Self> {
        Self::build(generator, precision.layout())
    }

    /// Builds every block from its base `B_b = 2^(b · w) · G`.
    ///
    /// Within a block, entry `v` is entry `v − 2^j` plus `2^j · B_b`, where `j`
    /// is the lowest set bit of `v`. Block bases are chained by doubling.
    pub fn build(generator: &AffinePoint, layout: CombLayout) -> Result<Self> {
        let mut base = generator.to_projective();
        let mut blocks = Vec::with_capacity(layout.blocks());

        for block in 0..layout.blocks() {
            let bits = layout.block_bits(block) as usize;

            // powers[j] = 2^j · B_b
            let mut powers = Vec::with_capacity(bits);
            powers.push(base);
            for j in 1..bits {
                powers.push(powers[j - 1].double());
            }

            let size = 1usize << bits;
            let mut entries = Vec::with_capacity(size);
            entries.push(ProjectivePoint::Identity);
            for v in 1..size {
                let j = v.trailing_zeros() as usize;
                let entry = entries[v - (1 << j)] + powers[j];
                entries.push(entry);
            }

            blocks.push(ProjectivePoint::batch_to_affine(&entries)?);
            debug!("built comb block {block} ({size} entries)");

            base = powers[bits - 1].double();
        }

        info!(
            "built comb table: {} blocks, {} entries",
            layout.blocks(),
            layout.total_entries()
        );
        Ok(Self { layout, blocks })
    }

    /// Re-derives every entry independently of `build` and compares.
    ///
    /// Each block base is recomputed with a fresh double-and-add of the
    /// generator; entries are then checked against a running sum of that base.
    pub fn verify(&self, generator: &AffinePoint) -> Result<()> {
        if self.blocks.len() != self.layout.blocks() {
            return Err(Error::TableVerification {
                block: self.blocks.len().min(self.layout.blocks()),
                value: 0,
            });
        }

        let g = generator.to_projective();
        let n = Secp256k1::order();
        for (block, entries) in self.blocks.iter().enumerate() {
            if entries.len() != self.layout.entries_in_block(block) {
                return Err(Error::TableVerification {
                    block,
                    value: entries.len(),
                });
            }

            let shift = (BigUint::one() << self.layout.shift(block)) % &n;
            let block_base = g.scalar_multiply(&shift);

            let mut expected = ProjectivePoint::Identity;
            for (value, entry) in entries.iter().enumerate() {
                if !entry.is_on_curve() || expected != *entry {
                    return Err(Error::TableVerification { block, value });
                }
                expected = expected + block_base;
            }
        }

        info!("verified {} comb table entries", self.layout.total_entries());
        Ok(())
    }

    /// `k · G` as the sum of one entry per block.
    pub fn multiply(&self, k: &BigUint) -> ProjectivePoint {
        let k = k % Secp256k1::order();
        self.layout
            .digits(&k)
            .into_iter()
            .zip(self.blocks.iter())
            .fold(ProjectivePoint::Identity, |acc, (digit, entries)| {
                acc + entries[digit]
            })
    }

    #[inline]
    pub fn layout(&self) -> CombLayout {
        self.layout
    }

    #[inline]
    pub fn blocks(&self) -> &[Vec<AffinePoint>] {
        &self.blocks
    }

    pub fn get(&self, block: usize, value: usize) -> Option<&AffinePoint> {
        self.blocks.get(block).and_then(|entries| entries.get(value))
    }

    /// All entries in (block, value) order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &AffinePoint)> {
        self.blocks.iter().enumerate().flat_map(|(block, entries)| {
            entries
                .iter()
                .enumerate()
                .map(move |(value, point)| (block, value, point))
        })
    }
}

#[cfg(test)]
mod tests {
    use k256::elliptic_curve::sec1::ToEncodedPoint;
    use num::bigint::RandBigInt;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use rstest::rstest;

    use super::*;
    use crate::field::secp256k1_base::Secp256k1Base;

    const G: AffinePoint = Secp256k1::GENERATOR_AFFINE;

    #[rstest]
    #[case(Precision::Two)]
    #[case(Precision::Four)]
    #[case(Precision::Eight)]
    fn table_shape_and_identity_column(#[case] precision: Precision) {
        let table = CombTable::for_precision(&G, precision).unwrap();
        let bits = precision.bits() as usize;
        assert_eq!(table.blocks().len(), 256 / bits);
        for entries in table.blocks() {
            assert_eq!(entries.len(), 1 << bits);
            assert!(entries[0].is_identity());
            assert!(entries.iter().all(|p| p.is_on_curve()));
        }
        assert_eq!(table.get(0, 1), Some(&G));
        assert_eq!(table.iter().count(), table.layout().total_entries());
    }

    #[rstest]
    #[case(Precision::Two)]
    #[case(Precision::Four)]
    #[case(Precision::Eight)]
    fn table_passes_verification(#[case] precision: Precision) {
        let table = CombTable::for_precision(&G, precision).unwrap();
        table.verify(&G).unwrap();
    }

    #[rstest]
    #[case(Precision::Two)]
    #[case(Precision::Four)]
    #[case(Precision::Eight)]
    fn reconstructs_random_multiples(#[case] precision: Precision) {
        let table = CombTable::for_precision(&G, precision).unwrap();
        let g = G.to_projective();
        let n = Secp256k1::order();
        let mut rng = StdRng::seed_from_u64(u64::from(precision.bits()));

        let mut scalars = vec![BigUint::default(), BigUint::one(), &n - 1u32];
        scalars.extend((0..8).map(|_| rng.gen_biguint_below(&n)));
        for k in scalars {
            assert_eq!(table.multiply(&k), g.scalar_multiply(&k), "k = {k:x}");
        }
    }

    #[test]
    fn partial_final_block_is_complete() {
        let layout = CombLayout::new(7).unwrap();
        let table = CombTable::build(&G, layout).unwrap();
        assert_eq!(table.blocks().len(), 37);
        assert_eq!(table.blocks()[35].len(), 128);
        assert_eq!(table.blocks()[36].len(), 16);
        table.verify(&G).unwrap();

        let top = BigUint::one() << 255u32;
        assert_eq!(table.multiply(&top), G.to_projective().scalar_multiply(&top));
    }

    #[test]
    fn matches_k256_multiples() {
        let table = CombTable::for_precision(&G, Precision::Four).unwrap();
        let mut base = k256::ProjectivePoint::GENERATOR;
        for block in 0..table.blocks().len() {
            if block % 9 == 0 {
                for value in [1u64, 7, 15] {
                    let expected = (base * k256::Scalar::from(value)).to_affine();
                    let encoded = expected.to_encoded_point(false);
                    let x: [u8; 32] = encoded.x().unwrap().as_slice().try_into().unwrap();
                    let y: [u8; 32] = encoded.y().unwrap().as_slice().try_into().unwrap();
                    let (ours_x, ours_y) = table.get(block, value as usize).unwrap().coordinates().unwrap();
                    assert_eq!(ours_x, Secp256k1Base::from_be_bytes(&x).unwrap());
                    assert_eq!(ours_y, Secp256k1Base::from_be_bytes(&y).unwrap());
                }
            }
            for _ in 0..4 {
                base = base.double();
            }
        }
    }

    #[test]
    fn tampered_entry_fails_verification() {
        let mut table = CombTable::for_precision(&G, Precision::Two).unwrap();
        table.blocks[5].swap(1, 2);
        assert!(matches!(
            table.verify(&G),
            Err(Error::TableVerification { block: 5, value: 1 })
        ));
    }

    #[test]
    fn off_curve_entry_fails_verification() {
        let mut table = CombTable::for_precision(&G, Precision::Two).unwrap();
        table.blocks[3][2] = AffinePoint::Finite {
            x: Secp256k1Base::ONE,
            y: Secp256k1Base::ONE,
        };
        assert!(matches!(
            table.verify(&G),
            Err(Error::TableVerification { block: 3, value: 2 })
        ));
    }

    #[test]
    fn missing_block_fails_verification() {
        let mut table = CombTable::for_precision(&G, Precision::Eight).unwrap();
        table.blocks.pop();
        assert!(table.verify(&G).is_err());
    }
}
