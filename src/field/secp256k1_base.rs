//! Base field of the secp256k1 curve.
//!
//! Field modulus
//! ```text
//! p = 0xfffffffffffffffffffffffffffffffffffffffffffffffffffffffefffffc2f
//!   = 115792089237316195423570985008687907853269984665640564039457584007908834671663
//!   = 2²⁵⁶ − 2³² − 977
//! ```

use core::fmt::{self, Debug, Display, Formatter};
use core::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use itertools::Itertools;
use num::bigint::BigUint;
use num::Integer;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/* -------------------------------------------------------------------------- */
/*                                 constants                                  */
/* -------------------------------------------------------------------------- */

/// p (little-endian 64-bit limbs)
const MODULUS: [u64; 4] = [
    0xFFFFFFFEFFFFFC2F,
    0xFFFFFFFFFFFFFFFF,
    0xFFFFFFFFFFFFFFFF,
    0xFFFFFFFFFFFFFFFF,
];

/// p − 2, the Fermat inversion exponent.
const MODULUS_MINUS_TWO: [u64; 4] = [
    0xFFFFFFFEFFFFFC2D,
    0xFFFFFFFFFFFFFFFF,
    0xFFFFFFFFFFFFFFFF,
    0xFFFFFFFFFFFFFFFF,
];

/// 2²⁵⁶ mod p = 2³² + 977
const FOLD: u64 = 0x1_0000_03D1;

/* -------------------------------------------------------------------------- */
/*                              limb helpers                                  */
/* -------------------------------------------------------------------------- */

/// a + b + carry -> (result, carry_out)
#[inline(always)]
const fn adc(a: u64, b: u64, carry: u64) -> (u64, u64) {
    let res = a as u128 + b as u128 + carry as u128;
    (res as u64, (res >> 64) as u64)
}

/// a − b − borrow -> (result, borrow_out), borrows are 0 or 1.
#[inline(always)]
const fn sbb(a: u64, b: u64, borrow: u64) -> (u64, u64) {
    let res = (a as u128).wrapping_sub(b as u128 + borrow as u128);
    (res as u64, (res >> 127) as u64)
}

/// acc + a·b + carry -> (result, carry_out)
#[inline(always)]
const fn mac(acc: u64, a: u64, b: u64, carry: u64) -> (u64, u64) {
    let res = acc as u128 + (a as u128 * b as u128) + carry as u128;
    (res as u64, (res >> 64) as u64)
}

fn is_below_modulus(limbs: &[u64; 4]) -> bool {
    let (_, b) = sbb(limbs[0], MODULUS[0], 0);
    let (_, b) = sbb(limbs[1], MODULUS[1], b);
    let (_, b) = sbb(limbs[2], MODULUS[2], b);
    let (_, b) = sbb(limbs[3], MODULUS[3], b);
    b == 1
}

/// Maps a value in [0, 2p) into [0, p).
fn subtract_modulus_if_needed(limbs: [u64; 4]) -> [u64; 4] {
    let (r0, b) = sbb(limbs[0], MODULUS[0], 0);
    let (r1, b) = sbb(limbs[1], MODULUS[1], b);
    let (r2, b) = sbb(limbs[2], MODULUS[2], b);
    let (r3, b) = sbb(limbs[3], MODULUS[3], b);
    if b == 0 {
        [r0, r1, r2, r3]
    } else {
        limbs
    }
}

fn biguint_from_array(arr: [u64; 4]) -> BigUint {
    BigUint::from_slice(&[
        arr[0] as u32,
        (arr[0] >> 32) as u32,
        arr[1] as u32,
        (arr[1] >> 32) as u32,
        arr[2] as u32,
        (arr[2] >> 32) as u32,
        arr[3] as u32,
        (arr[3] >> 32) as u32,
    ])
}

/* -------------------------------------------------------------------------- */
/*                                 new type                                   */
/* -------------------------------------------------------------------------- */

/// Base field element of **secp256k1**, always fully reduced into [0, p).
///
/// Limbs are little-endian: `limbs()[0]` holds the least significant 64 bits.
#[derive(Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "[u64; 4]", into = "[u64; 4]")]
pub struct Secp256k1Base([u64; 4]);

impl Secp256k1Base {
    pub const ZERO: Self = Self([0; 4]);
    pub const ONE: Self = Self([1, 0, 0, 0]);
    pub const BITS: usize = 256;

    /// The caller guarantees `limbs < p`; used for curve constants.
    pub(crate) const fn from_canonical_limbs(limbs: [u64; 4]) -> Self {
        Self(limbs)
    }

    /// Rejects values outside [0, p) rather than reducing them.
    pub fn from_limbs(limbs: [u64; 4]) -> Result<Self> {
        if is_below_modulus(&limbs) {
            Ok(Self(limbs))
        } else {
            Err(Error::NonCanonicalCoordinate)
        }
    }

    #[inline]
    pub const fn from_canonical_u64(n: u64) -> Self {
        Self([n, 0, 0, 0])
    }

    pub fn from_noncanonical_biguint(val: BigUint) -> Self {
        let reduced = val.mod_floor(&Self::modulus());
        let limbs: Vec<u64> = reduced
            .to_u64_digits()
            .into_iter()
            .pad_using(4, |_| 0)
            .collect();
        Self([limbs[0], limbs[1], limbs[2], limbs[3]])
    }

    pub fn modulus() -> BigUint {
        biguint_from_array(MODULUS)
    }

    pub fn to_canonical_biguint(&self) -> BigUint {
        biguint_from_array(self.0)
    }

    #[inline]
    pub const fn limbs(&self) -> [u64; 4] {
        self.0
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0 == [0; 4]
    }

    /// Big-endian 32-bit words, most significant word first.
    pub fn to_be_words(&self) -> [u32; 8] {
        let mut words = [0u32; 8];
        for (i, limb) in self.0.iter().rev().enumerate() {
            words[2 * i] = (limb >> 32) as u32;
            words[2 * i + 1] = *limb as u32;
        }
        words
    }

    pub fn from_be_words(words: &[u32; 8]) -> Result<Self> {
        let mut limbs = [0u64; 4];
        for (i, pair) in words.chunks_exact(2).enumerate() {
            limbs[3 - i] = (u64::from(pair[0]) << 32) | u64::from(pair[1]);
        }
        Self::from_limbs(limbs)
    }

    pub fn to_be_bytes(&self) -> [u8; 32] {
        let mut bytes = [0u8; 32];
        for (chunk, limb) in bytes.chunks_exact_mut(8).zip(self.0.iter().rev()) {
            chunk.copy_from_slice(&limb.to_be_bytes());
        }
        bytes
    }

    pub fn from_be_bytes(bytes: &[u8; 32]) -> Result<Self> {
        let mut limbs = [0u64; 4];
        for (i, chunk) in bytes.chunks_exact(8).enumerate() {
            let mut buf = [0u8; 8];
            buf.copy_from_slice(chunk);
            limbs[3 - i] = u64::from_be_bytes(buf);
        }
        Self::from_limbs(limbs)
    }

    #[inline]
    pub fn square(&self) -> Self {
        *self * *self
    }

    #[inline]
    pub fn double(&self) -> Self {
        *self + *self
    }

    /// Left-to-right square-and-multiply. Variable time.
    pub fn exp_limbs(&self, exponent: [u64; 4]) -> Self {
        let mut result = Self::ONE;
        for limb in exponent.iter().rev() {
            for bit in (0..64).rev() {
                result = result.square();
                if (limb >> bit) & 1 == 1 {
                    result *= *self;
                }
            }
        }
        result
    }

    /// a^(p−2) by Fermat's little theorem.
    pub fn try_inverse(&self) -> Option<Self> {
        if self.is_zero() {
            return None;
        }
        Some(self.exp_limbs(MODULUS_MINUS_TWO))
    }

    pub fn inverse(&self) -> Result<Self> {
        self.try_inverse().ok_or(Error::InverseOfZero)
    }

    /// Folds a 512-bit product using 2²⁵⁶ ≡ 2³² + 977 (mod p).
    fn reduce_wide(wide: [u64; 8]) -> Self {
        let mut folded = [0u64; 5];
        let mut carry = 0u64;
        for i in 0..4 {
            let (lo, hi) = mac(wide[i], wide[i + 4], FOLD, carry);
            folded[i] = lo;
            carry = hi;
        }
        folded[4] = carry;

        // folded[4] < 2³⁴, so the second fold fits in a single limb product.
        let (r0, c) = mac(folded[0], folded[4], FOLD, 0);
        let (r1, c) = adc(folded[1], 0, c);
        let (r2, c) = adc(folded[2], 0, c);
        let (r3, c) = adc(folded[3], 0, c);

        // A final carry leaves only a tiny remainder below 2²⁵⁶.
        let limbs = if c != 0 {
            let (r0, c) = adc(r0, FOLD, 0);
            let (r1, c) = adc(r1, 0, c);
            let (r2, c) = adc(r2, 0, c);
            let (r3, _) = adc(r3, 0, c);
            [r0, r1, r2, r3]
        } else {
            [r0, r1, r2, r3]
        };
        Self(subtract_modulus_if_needed(limbs))
    }
}

/* -------------------------------------------------------------------------- */
/*                                conversions                                 */
/* -------------------------------------------------------------------------- */

impl TryFrom<[u64; 4]> for Secp256k1Base {
    type Error = Error;

    fn try_from(limbs: [u64; 4]) -> Result<Self> {
        Self::from_limbs(limbs)
    }
}

impl From<Secp256k1Base> for [u64; 4] {
    fn from(value: Secp256k1Base) -> Self {
        value.0
    }
}

impl Display for Secp256k1Base {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "0x{:016x}{:016x}{:016x}{:016x}",
            self.0[3], self.0[2], self.0[1], self.0[0]
        )
    }
}

impl Debug for Secp256k1Base {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Secp256k1Base({self})")
    }
}

/* -------------------------------------------------------------------------- */
/*                             arithmetic impls                               */
/* -------------------------------------------------------------------------- */

impl Add for Secp256k1Base {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        let (a, b) = (self.0, rhs.0);
        let (r0, c) = adc(a[0], b[0], 0);
        let (r1, c) = adc(a[1], b[1], c);
        let (r2, c) = adc(a[2], b[2], c);
        let (r3, c) = adc(a[3], b[3], c);
        if c != 0 {
            // sum − 2²⁵⁶ + FOLD = sum − p, already below p
            let (r0, c) = adc(r0, FOLD, 0);
            let (r1, c) = adc(r1, 0, c);
            let (r2, c) = adc(r2, 0, c);
            let (r3, _) = adc(r3, 0, c);
            Self([r0, r1, r2, r3])
        } else {
            Self(subtract_modulus_if_needed([r0, r1, r2, r3]))
        }
    }
}

impl AddAssign for Secp256k1Base {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Secp256k1Base {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        let (a, b) = (self.0, rhs.0);
        let (r0, borrow) = sbb(a[0], b[0], 0);
        let (r1, borrow) = sbb(a[1], b[1], borrow);
        let (r2, borrow) = sbb(a[2], b[2], borrow);
        let (r3, borrow) = sbb(a[3], b[3], borrow);
        if borrow != 0 {
            let (r0, c) = adc(r0, MODULUS[0], 0);
            let (r1, c) = adc(r1, MODULUS[1], c);
            let (r2, c) = adc(r2, MODULUS[2], c);
            let (r3, _) = adc(r3, MODULUS[3], c);
            Self([r0, r1, r2, r3])
        } else {
            Self([r0, r1, r2, r3])
        }
    }
}

impl SubAssign for Secp256k1Base {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl Neg for Secp256k1Base {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self::ZERO - self
    }
}

impl Mul for Secp256k1Base {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        let (a, b) = (self.0, rhs.0);
        let mut wide = [0u64; 8];
        for i in 0..4 {
            let mut carry = 0u64;
            for j in 0..4 {
                let (lo, hi) = mac(wide[i + j], a[i], b[j], carry);
                wide[i + j] = lo;
                carry = hi;
            }
            wide[i + 4] = carry;
        }
        Self::reduce_wide(wide)
    }
}

impl MulAssign for Secp256k1Base {
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

#[cfg(test)]
mod tests {
    use num::bigint::RandBigInt;
    use num::One;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    fn random_element(rng: &mut StdRng) -> (Secp256k1Base, BigUint) {
        let value = rng.gen_biguint_below(&Secp256k1Base::modulus());
        (Secp256k1Base::from_noncanonical_biguint(value.clone()), value)
    }

    #[test]
    fn modulus_matches_known_value() {
        let expected = (BigUint::one() << 256) - (BigUint::one() << 32) - BigUint::from(977u32);
        assert_eq!(Secp256k1Base::modulus(), expected);
    }

    #[test]
    fn arithmetic_agrees_with_biguint() {
        let mut rng = StdRng::seed_from_u64(0x5ec9_256b);
        let p = Secp256k1Base::modulus();
        for _ in 0..200 {
            let (a, a_big) = random_element(&mut rng);
            let (b, b_big) = random_element(&mut rng);

            assert_eq!((a + b).to_canonical_biguint(), (&a_big + &b_big) % &p);
            assert_eq!((a - b).to_canonical_biguint(), (&a_big + &p - &b_big) % &p);
            assert_eq!((a * b).to_canonical_biguint(), (&a_big * &b_big) % &p);
            assert_eq!(a.square(), a * a);
        }
    }

    #[test]
    fn wraparound_at_the_modulus() {
        let neg_one = -Secp256k1Base::ONE;
        assert_eq!(neg_one.to_canonical_biguint(), Secp256k1Base::modulus() - 1u32);
        assert_eq!(neg_one + Secp256k1Base::ONE, Secp256k1Base::ZERO);
        assert_eq!(Secp256k1Base::ZERO - Secp256k1Base::ONE, neg_one);
        assert_eq!(neg_one * neg_one, Secp256k1Base::ONE);
        assert_eq!(neg_one + neg_one, -Secp256k1Base::from_canonical_u64(2));
        assert_eq!(-Secp256k1Base::ZERO, Secp256k1Base::ZERO);
    }

    #[test]
    fn inverse_of_random_elements() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let (a, _) = random_element(&mut rng);
            if a.is_zero() {
                continue;
            }
            assert_eq!(a * a.inverse().unwrap(), Secp256k1Base::ONE);
        }
    }

    #[test]
    fn inverse_of_zero_is_an_error() {
        assert!(Secp256k1Base::ZERO.try_inverse().is_none());
        assert!(matches!(Secp256k1Base::ZERO.inverse(), Err(Error::InverseOfZero)));
    }

    #[test]
    fn rejects_non_canonical_limbs() {
        assert!(Secp256k1Base::from_limbs(MODULUS).is_err());
        assert!(Secp256k1Base::from_limbs([u64::MAX; 4]).is_err());
        let p_minus_one = [MODULUS[0] - 1, MODULUS[1], MODULUS[2], MODULUS[3]];
        assert!(Secp256k1Base::from_limbs(p_minus_one).is_ok());
    }

    #[test]
    fn big_endian_views_agree() {
        let x = Secp256k1Base::from_canonical_limbs([
            0x59F2815B16F81798,
            0x029BFCDB2DCE28D9,
            0x55A06295CE870B07,
            0x79BE667EF9DCBBAC,
        ]);
        let words = x.to_be_words();
        assert_eq!(words[0], 0x79BE667E);
        assert_eq!(words[7], 0x16F81798);
        let bytes = x.to_be_bytes();
        assert_eq!(bytes[0], 0x79);
        assert_eq!(bytes[31], 0x98);
        assert_eq!(Secp256k1Base::from_be_words(&words).unwrap(), x);
        assert_eq!(Secp256k1Base::from_be_bytes(&bytes).unwrap(), x);
    }

    #[test]
    fn serde_rejects_non_canonical_limbs() {
        let x = Secp256k1Base::from_canonical_u64(42);
        let json = serde_json::to_string(&x).unwrap();
        assert_eq!(serde_json::from_str::<Secp256k1Base>(&json).unwrap(), x);

        let p = serde_json::to_string(&MODULUS).unwrap();
        assert!(serde_json::from_str::<Secp256k1Base>(&p).is_err());
    }
}
