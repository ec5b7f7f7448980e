//! Affine and Jacobian point types for y² = x³ + 7.
//!
//! Both types carry the point at infinity as an explicit variant; no
//! coordinate value stands in for it.

use core::ops::{Add, Neg};

use num::bigint::BigUint;

use crate::curve::secp256k1::Secp256k1;
use crate::error::{Error, Result};
use crate::field::secp256k1_base::Secp256k1Base;

/* -------------------------------------------------------------------------- */
/*                                  affine                                    */
/* -------------------------------------------------------------------------- */

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum AffinePoint {
    Identity,
    Finite { x: Secp256k1Base, y: Secp256k1Base },
}

impl AffinePoint {
    /// Builds a finite point, rejecting coordinates off the curve.
    pub fn from_affine(x: Secp256k1Base, y: Secp256k1Base) -> Result<Self> {
        let point = Self::Finite { x, y };
        if point.is_on_curve() {
            Ok(point)
        } else {
            Err(Error::NotOnCurve)
        }
    }

    pub fn coordinates(&self) -> Option<(Secp256k1Base, Secp256k1Base)> {
        match *self {
            Self::Identity => None,
            Self::Finite { x, y } => Some((x, y)),
        }
    }

    #[inline]
    pub fn is_identity(&self) -> bool {
        matches!(self, Self::Identity)
    }

    /// The identity counts as a group element and passes.
    pub fn is_on_curve(&self) -> bool {
        match *self {
            Self::Identity => true,
            Self::Finite { x, y } => y.square() == x.square() * x + Secp256k1::B,
        }
    }

    #[inline]
    pub fn to_projective(&self) -> ProjectivePoint {
        ProjectivePoint::from(*self)
    }
}

impl Neg for AffinePoint {
    type Output = Self;

    fn neg(self) -> Self {
        match self {
            Self::Identity => Self::Identity,
            Self::Finite { x, y } => Self::Finite { x, y: -y },
        }
    }
}

/* -------------------------------------------------------------------------- */
/*                                 jacobian                                   */
/* -------------------------------------------------------------------------- */

/// Jacobian coordinates: `(X : Y : Z)` represents `(X/Z², Y/Z³)`, with `Z ≠ 0`.
#[derive(Copy, Clone, Debug)]
pub enum ProjectivePoint {
    Identity,
    Jacobian {
        x: Secp256k1Base,
        y: Secp256k1Base,
        z: Secp256k1Base,
    },
}

impl ProjectivePoint {
    #[inline]
    pub fn is_identity(&self) -> bool {
        matches!(self, Self::Identity)
    }

    /// dbl-2009-l with a = 0.
    pub fn double(&self) -> Self {
        let (x, y, z) = match *self {
            Self::Identity => return Self::Identity,
            Self::Jacobian { x, y, z } => (x, y, z),
        };
        if y.is_zero() {
            return Self::Identity;
        }

        // T0 = x², T1 = y², T2 = y⁴
        let t0 = x.square();
        let t1 = y.square();
        let t2 = t1.square();
        // S = 4·x·y² = 2·((y² + x)² − x² − y⁴)
        let s = ((t1 + x).square() - t0 - t2).double();
        // M = 3·x²
        let m = t0.double() + t0;

        let x3 = m.square() - s.double();
        let y3 = m * (s - x3) - t2.double().double().double();
        let z3 = (y * z).double();
        Self::Jacobian {
            x: x3,
            y: y3,
            z: z3,
        }
    }

    /// add-2007-bl, falling back to doubling for equal inputs.
    fn add_jacobian(&self, other: &Self) -> Self {
        let ((x1, y1, z1), (x2, y2, z2)) = match (*self, *other) {
            (Self::Identity, _) => return *other,
            (_, Self::Identity) => return *self,
            (
                Self::Jacobian {
                    x: x1,
                    y: y1,
                    z: z1,
                },
                Self::Jacobian {
                    x: x2,
                    y: y2,
                    z: z2,
                },
            ) => ((x1, y1, z1), (x2, y2, z2)),
        };

        let z1z1 = z1.square();
        let z2z2 = z2.square();
        let u1 = x1 * z2z2;
        let u2 = x2 * z1z1;
        let s1 = y1 * z2 * z2z2;
        let s2 = y2 * z1 * z1z1;

        let h = u2 - u1;
        let f = s2 - s1;
        if h.is_zero() {
            return if f.is_zero() {
                self.double()
            } else {
                Self::Identity
            };
        }

        let r = f.double();
        let i = h.double().square();
        let j = h * i;
        let v = u1 * i;

        let x3 = r.square() - j - v.double();
        let y3 = r * (v - x3) - (s1 * j).double();
        let z3 = ((z1 + z2).square() - z1z1 - z2z2) * h;
        Self::Jacobian {
            x: x3,
            y: y3,
            z: z3,
        }
    }

    /// Plain double-and-add over the bits of `k`, most significant first.
    ///
    /// Variable time; only ever fed public constants.
    pub fn scalar_multiply(&self, k: &BigUint) -> Self {
        let mut acc = Self::Identity;
        for i in (0..k.bits()).rev() {
            acc = acc.double();
            if k.bit(i) {
                acc = acc + *self;
            }
        }
        acc
    }

    /// Y² = X³ + 7·Z⁶
    pub fn is_on_curve(&self) -> bool {
        match *self {
            Self::Identity => true,
            Self::Jacobian { x, y, z } => {
                let z2 = z.square();
                let z6 = z2.square() * z2;
                y.square() == x.square() * x + Secp256k1::B * z6
            }
        }
    }

    pub fn to_affine(&self) -> Result<AffinePoint> {
        match *self {
            Self::Identity => Ok(AffinePoint::Identity),
            Self::Jacobian { x, y, z } => {
                let z_inv = z.inverse()?;
                let zz_inv = z_inv.square();
                Ok(AffinePoint::Finite {
                    x: x * zz_inv,
                    y: y * zz_inv * z_inv,
                })
            }
        }
    }

    /// Converts many points with a single field inversion (Montgomery's trick).
    /// Identities pass through untouched.
    pub fn batch_to_affine(points: &[Self]) -> Result<Vec<AffinePoint>> {
        let mut prefix = Vec::with_capacity(points.len());
        let mut acc = Secp256k1Base::ONE;
        for point in points {
            prefix.push(acc);
            if let Self::Jacobian { z, .. } = point {
                acc *= *z;
            }
        }

        let mut acc_inv = acc.inverse()?;
        let mut out = vec![AffinePoint::Identity; points.len()];
        for (i, point) in points.iter().enumerate().rev() {
            if let Self::Jacobian { x, y, z } = *point {
                let z_inv = acc_inv * prefix[i];
                acc_inv *= z;
                let zz_inv = z_inv.square();
                out[i] = AffinePoint::Finite {
                    x: x * zz_inv,
                    y: y * zz_inv * z_inv,
                };
            }
        }
        Ok(out)
    }
}

impl From<AffinePoint> for ProjectivePoint {
    fn from(point: AffinePoint) -> Self {
        match point {
            AffinePoint::Identity => Self::Identity,
            AffinePoint::Finite { x, y } => Self::Jacobian {
                x,
                y,
                z: Secp256k1Base::ONE,
            },
        }
    }
}

impl Add for ProjectivePoint {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        self.add_jacobian(&rhs)
    }
}

impl Add<AffinePoint> for ProjectivePoint {
    type Output = Self;

    fn add(self, rhs: AffinePoint) -> Self {
        self.add_jacobian(&rhs.into())
    }
}

impl Neg for ProjectivePoint {
    type Output = Self;

    fn neg(self) -> Self {
        match self {
            Self::Identity => Self::Identity,
            Self::Jacobian { x, y, z } => Self::Jacobian { x, y: -y, z },
        }
    }
}

impl PartialEq for ProjectivePoint {
    fn eq(&self, other: &Self) -> bool {
        match (*self, *other) {
            (Self::Identity, Self::Identity) => true,
            (
                Self::Jacobian {
                    x: x1,
                    y: y1,
                    z: z1,
                },
                Self::Jacobian {
                    x: x2,
                    y: y2,
                    z: z2,
                },
            ) => {
                let z1z1 = z1.square();
                let z2z2 = z2.square();
                x1 * z2z2 == x2 * z1z1 && y1 * z2z2 * z2 == y2 * z1z1 * z1
            }
            _ => false,
        }
    }
}

impl Eq for ProjectivePoint {}

impl PartialEq<AffinePoint> for ProjectivePoint {
    fn eq(&self, other: &AffinePoint) -> bool {
        *self == ProjectivePoint::from(*other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn g() -> ProjectivePoint {
        Secp256k1::GENERATOR_AFFINE.to_projective()
    }

    #[test]
    fn identity_is_neutral() {
        let g = g();
        assert_eq!(g + ProjectivePoint::Identity, g);
        assert_eq!(ProjectivePoint::Identity + g, g);
        assert!(ProjectivePoint::Identity.double().is_identity());
    }

    #[test]
    fn adding_a_point_to_itself_doubles() {
        let g = g();
        assert_eq!(g + g, g.double());
        let two_g = g.double();
        assert_eq!(two_g + two_g, g.double().double());
    }

    #[test]
    fn adding_the_negation_gives_identity() {
        let g = g();
        assert!((g + (-g)).is_identity());
        let three_g = g + g + g;
        assert!((three_g + (-three_g)).is_identity());
    }

    #[test]
    fn addition_is_associative_and_commutative() {
        let g = g();
        let a = g.double();
        let b = a + g;
        let c = b.double();
        assert_eq!((a + b) + c, a + (b + c));
        assert_eq!(a + c, c + a);
    }

    #[test]
    fn rejects_points_off_the_curve() {
        let x = Secp256k1Base::from_canonical_u64(1);
        let y = Secp256k1Base::from_canonical_u64(1);
        assert!(matches!(AffinePoint::from_affine(x, y), Err(Error::NotOnCurve)));
        assert!(!AffinePoint::Finite {
            x: Secp256k1Base::ZERO,
            y: Secp256k1Base::ZERO
        }
        .is_on_curve());
    }

    #[test]
    fn affine_round_trip_preserves_the_point() {
        let p = g().double() + g();
        assert!(p.is_on_curve());
        let affine = p.to_affine().unwrap();
        assert!(affine.is_on_curve());
        assert_eq!(p, affine);
        assert_eq!(ProjectivePoint::Identity.to_affine().unwrap(), AffinePoint::Identity);
    }

    #[test]
    fn batch_conversion_matches_single_conversion() {
        let g = g();
        let points = vec![
            g,
            ProjectivePoint::Identity,
            g.double(),
            g.double() + g,
            ProjectivePoint::Identity,
            g.double().double(),
        ];
        let batch = ProjectivePoint::batch_to_affine(&points).unwrap();
        for (point, affine) in points.iter().zip(batch.iter()) {
            assert_eq!(point.to_affine().unwrap(), *affine);
        }
        assert!(ProjectivePoint::batch_to_affine(&[]).unwrap().is_empty());
    }

    #[test]
    fn scalar_multiply_small_scalars() {
        let g = g();
        assert!(g.scalar_multiply(&BigUint::from(0u32)).is_identity());
        assert_eq!(g.scalar_multiply(&BigUint::from(1u32)), g);
        assert_eq!(g.scalar_multiply(&BigUint::from(5u32)), g.double().double() + g);
    }
}
