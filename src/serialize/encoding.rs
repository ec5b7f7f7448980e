//! Per-point encoding shared by every renderer.
//!
//! A point is 16 unsigned 32-bit words: words `0..8` hold x and words `8..16`
//! hold y, each most significant word first. This is the argument order of
//! libsecp256k1's `SECP256K1_GE_STORAGE_CONST`. The identity is all zeros;
//! `(0, 0)` is not on the curve, so the sentinel cannot collide with a point.

use crate::curve::curve_types::AffinePoint;
use crate::error::Result;
use crate::field::secp256k1_base::Secp256k1Base;

pub const WORDS_PER_POINT: usize = 16;

pub type EncodedPoint = [u32; WORDS_PER_POINT];

pub fn encode_point(point: &AffinePoint) -> EncodedPoint {
    let mut words = [0u32; WORDS_PER_POINT];
    if let Some((x, y)) = point.coordinates() {
        words[..8].copy_from_slice(&x.to_be_words());
        words[8..].copy_from_slice(&y.to_be_words());
    }
    words
}

/// Rejects non-canonical coordinates and points off the curve.
pub fn decode_point(words: &EncodedPoint) -> Result<AffinePoint> {
    if words.iter().all(|&w| w == 0) {
        return Ok(AffinePoint::Identity);
    }
    let mut x_words = [0u32; 8];
    let mut y_words = [0u32; 8];
    x_words.copy_from_slice(&words[..8]);
    y_words.copy_from_slice(&words[8..]);
    AffinePoint::from_affine(
        Secp256k1Base::from_be_words(&x_words)?,
        Secp256k1Base::from_be_words(&y_words)?,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::secp256k1::Secp256k1;
    use crate::error::Error;

    #[test]
    fn generator_encoding_is_big_endian_words() {
        let words = encode_point(&Secp256k1::GENERATOR_AFFINE);
        assert_eq!(&words[..2], &[0x79BE667E, 0xF9DCBBAC]);
        assert_eq!(words[7], 0x16F81798);
        assert_eq!(words[8], 0x483ADA77);
        assert_eq!(words[15], 0xFB10D4B8);
    }

    #[test]
    fn identity_is_the_zero_sentinel() {
        assert_eq!(encode_point(&AffinePoint::Identity), [0u32; WORDS_PER_POINT]);
        assert_eq!(decode_point(&[0u32; WORDS_PER_POINT]).unwrap(), AffinePoint::Identity);
    }

    #[test]
    fn decode_inverts_encode() {
        let g = Secp256k1::GENERATOR_AFFINE.to_projective();
        let mut p = g;
        for _ in 0..5 {
            let affine = p.to_affine().unwrap();
            let words = encode_point(&affine);
            assert_eq!(decode_point(&words).unwrap(), affine);
            assert_eq!(encode_point(&decode_point(&words).unwrap()), words);
            p = p.double() + g;
        }
    }

    #[test]
    fn decode_rejects_invalid_words() {
        let mut off_curve = encode_point(&Secp256k1::GENERATOR_AFFINE);
        off_curve[15] ^= 1;
        assert!(matches!(decode_point(&off_curve), Err(Error::NotOnCurve)));

        let mut too_large = [u32::MAX; WORDS_PER_POINT];
        too_large[8..].fill(0);
        assert!(matches!(decode_point(&too_large), Err(Error::NonCanonicalCoordinate)));
    }
}
