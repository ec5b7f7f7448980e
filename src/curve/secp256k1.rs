//! Curve-level constants for secp256k1: y² = x³ + 7 over the base field.

use num::bigint::BigUint;

use crate::curve::curve_types::AffinePoint;
use crate::field::secp256k1_base::Secp256k1Base;

#[derive(Debug, Copy, Clone, Eq, Hash, PartialEq)]
pub struct Secp256k1;

impl Secp256k1 {
    /// *b* = 7
    pub const B: Secp256k1Base = Secp256k1Base::from_canonical_u64(7);

    /// SEC 2 base point **G**
    pub const GENERATOR_AFFINE: AffinePoint = AffinePoint::Finite {
        x: SECP256K1_GENERATOR_X,
        y: SECP256K1_GENERATOR_Y,
    };

    /// Group order
    /// ```text
    /// n = 0xfffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141
    /// ```
    pub fn order() -> BigUint {
        BigUint::from_slice(&[
            0xD0364141, 0xBFD25E8C, 0xAF48A03B, 0xBAAEDCE6, 0xFFFFFFFE, 0xFFFFFFFF, 0xFFFFFFFF,
            0xFFFFFFFF,
        ])
    }
}

/* -------------------------------------------------------------------------- */
/*                               Base-point                                   */
/* -------------------------------------------------------------------------- */

/// Gₓ = `79BE667EF9DCBBAC55A06295CE870B07029BFCDB2DCE28D959F2815B16F81798`
const SECP256K1_GENERATOR_X: Secp256k1Base = Secp256k1Base::from_canonical_limbs([
    0x59F2815B16F81798,
    0x029BFCDB2DCE28D9,
    0x55A06295CE870B07,
    0x79BE667EF9DCBBAC,
]);

/// Gᵧ = `483ADA7726A3C4655DA4FBFC0E1108A8FD17B448A68554199C47D08FFB10D4B8`
const SECP256K1_GENERATOR_Y: Secp256k1Base = Secp256k1Base::from_canonical_limbs([
    0x9C47D08FFB10D4B8,
    0xFD17B448A6855419,
    0x5DA4FBFC0E1108A8,
    0x483ADA7726A3C465,
]);

/* -------------------------------------------------------------------------- */
/*                                   tests                                    */
/* -------------------------------------------------------------------------- */
