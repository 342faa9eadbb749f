// -*- mode: rust; -*-
//
// This file is part of monero-dalek.
// See LICENSE for licensing information.

//! Curve representations used while clearing the cofactor of a freshly
//! mapped point.
//!
//! # Curve representations
//!
//! The affine equation for the curve is
//!
//! ```text
//!     -x² + y² = 1 + dx²y².
//! ```
//!
//! Following the ref10 strategy (and curve25519-dalek's internal
//! `curve_models`), three models are used:
//!
//! * `ProjectivePoint`: points \\((X:Y:Z)\\) in \\(\mathbb P\^2\\), with
//!   \\(x = X/Z\\), \\(y = Y/Z\\), and no \\(T\\) coordinate;
//! * `CompletedPoint`: points \\(((X:Z),(Y:T))\\) in
//!   \\(\mathbb P\^1 \times \mathbb P\^1\\), the output of doubling;
//! * `ExtendedPoint`: points \\((X:Y:Z:T)\\) in \\(\mathbb P\^3\\) with
//!   \\(XY = ZT\\).
//!
//! The hash-to-curve map produces a `ProjectivePoint`.  Doubling it
//! never reads \\(T\\), so the first two doublings of cofactor clearing
//! return to \\(\mathbb P\^2\\) and only the last one completes the
//! extended coordinates.  General addition and scalar multiplication
//! are left to `curve25519_dalek::EdwardsPoint`; an `ExtendedPoint`
//! is handed over through its compressed encoding.

#![allow(non_snake_case)]

use core::fmt::Debug;

use curve25519_dalek::edwards::{CompressedEdwardsY, EdwardsPoint};

#[cfg(any(test, debug_assertions))]
use crate::backend::u32::constants;
use crate::field::FieldElement;
#[cfg(any(test, debug_assertions))]
use crate::traits::ValidityCheck;

// ------------------------------------------------------------------------
// Internal point representations
// ------------------------------------------------------------------------

/// A `ProjectivePoint` is a point on the curve in \\(\mathbb P\^2\\).
/// A point \\((x,y)\\) in the affine model corresponds to
/// \\((x:y:1)\\).
///
/// This is the output type of the hash-to-curve map.  It carries no
/// \\(T\\) coordinate, so the only things it offers are doubling and
/// cofactor clearing.
#[derive(Copy, Clone)]
pub struct ProjectivePoint {
    pub(crate) X: FieldElement,
    pub(crate) Y: FieldElement,
    pub(crate) Z: FieldElement,
}

/// A `CompletedPoint` is a point \\(((X:Z), (Y:T))\\) in
/// \\(\mathbb P\^1 \times \mathbb P\^1\\).  A point \\((x,y)\\) in the
/// affine model corresponds to \\(((x:1),(y:1))\\).
#[derive(Copy, Clone)]
pub struct CompletedPoint {
    pub(crate) X: FieldElement,
    pub(crate) Y: FieldElement,
    pub(crate) Z: FieldElement,
    pub(crate) T: FieldElement,
}

/// An `ExtendedPoint` is a point \\((X:Y:Z:T)\\) in \\(\mathbb P\^3\\),
/// with \\(x = X/Z\\), \\(y = Y/Z\\) and \\(xy = T/Z\\).
#[derive(Copy, Clone)]
pub struct ExtendedPoint {
    pub(crate) X: FieldElement,
    pub(crate) Y: FieldElement,
    pub(crate) Z: FieldElement,
    pub(crate) T: FieldElement,
}

// ------------------------------------------------------------------------
// Validity checks (for debugging, not CT)
// ------------------------------------------------------------------------

#[cfg(any(test, debug_assertions))]
impl ValidityCheck for ProjectivePoint {
    fn is_valid(&self) -> bool {
        // Curve equation is    -x^2 + y^2 = 1 + d*x^2*y^2,
        // homogenized as (-X^2 + Y^2)*Z^2 = Z^4 + d*X^2*Y^2
        let XX = self.X.square();
        let YY = self.Y.square();
        let ZZ = self.Z.square();
        let ZZZZ = ZZ.square();
        let lhs = &(&YY - &XX) * &ZZ;
        let rhs = &ZZZZ + &(&constants::EDWARDS_D * &(&XX * &YY));

        lhs == rhs && !bool::from(self.Z.is_zero())
    }
}

#[cfg(any(test, debug_assertions))]
impl ValidityCheck for ExtendedPoint {
    fn is_valid(&self) -> bool {
        let point_on_curve = self.as_projective().is_valid();
        let on_segre_image = (&self.X * &self.Y) == (&self.Z * &self.T);

        point_on_curve && on_segre_image
    }
}

// ------------------------------------------------------------------------
// Point conversions
// ------------------------------------------------------------------------

impl CompletedPoint {
    /// Convert this point from the \\( \mathbb P\^1 \times \mathbb P\^1
    /// \\) model to the \\( \mathbb P\^2 \\) model.
    ///
    /// This costs \\(3 \mathrm M \\).
    pub fn as_projective(&self) -> ProjectivePoint {
        ProjectivePoint {
            X: &self.X * &self.T,
            Y: &self.Y * &self.Z,
            Z: &self.Z * &self.T,
        }
    }

    /// Convert this point from the \\( \mathbb P\^1 \times \mathbb P\^1
    /// \\) model to the \\( \mathbb P\^3 \\) model.
    ///
    /// This costs \\(4 \mathrm M \\).
    pub fn as_extended(&self) -> ExtendedPoint {
        ExtendedPoint {
            X: &self.X * &self.T,
            Y: &self.Y * &self.Z,
            Z: &self.Z * &self.T,
            T: &self.X * &self.Y,
        }
    }
}

impl ExtendedPoint {
    /// Drop the \\(T\\) coordinate.
    pub fn as_projective(&self) -> ProjectivePoint {
        ProjectivePoint {
            X: self.X,
            Y: self.Y,
            Z: self.Z,
        }
    }

    /// Compress this point to `CompressedEdwardsY` format: the
    /// canonical encoding of \\(y\\), with the sign of \\(x\\) in the
    /// top bit.
    pub fn compress(&self) -> CompressedEdwardsY {
        let recip = self.Z.invert();
        let x = &self.X * &recip;
        let y = &self.Y * &recip;
        let mut s: [u8; 32];

        s = y.as_bytes();
        s[31] ^= x.is_negative().unwrap_u8() << 7;
        CompressedEdwardsY(s)
    }

    /// Hand this point over to curve25519-dalek.
    pub fn to_edwards(&self) -> EdwardsPoint {
        self.compress()
            .decompress()
            .expect("compressed encoding of a point on the curve decompresses")
    }
}

// ------------------------------------------------------------------------
// Doubling
// ------------------------------------------------------------------------

impl ProjectivePoint {
    /// Double this point: return self + self
    pub fn double(&self) -> CompletedPoint {
        // Double()
        let XX = self.X.square();
        let YY = self.Y.square();
        let ZZ2 = self.Z.square2();
        let X_plus_Y = &self.X + &self.Y;
        let X_plus_Y_sq = X_plus_Y.square();
        let YY_plus_XX = &YY + &XX;
        let YY_minus_XX = &YY - &XX;

        CompletedPoint {
            X: &X_plus_Y_sq - &YY_plus_XX,
            Y: YY_plus_XX,
            Z: YY_minus_XX,
            T: &ZZ2 - &YY_minus_XX,
        }
    }

    /// Multiply by the cofactor: return \\(\[8\]P\\).
    ///
    /// The first two doublings stay in \\(\mathbb P\^2\\); the last one
    /// completes the extended coordinates.
    pub fn mul_by_cofactor(&self) -> ExtendedPoint {
        self.double()
            .as_projective()
            .double()
            .as_projective()
            .double()
            .as_extended()
    }
}

// ------------------------------------------------------------------------
// Debug traits
// ------------------------------------------------------------------------

impl Debug for ProjectivePoint {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "ProjectivePoint{{\n\tX: {:?},\n\tY: {:?},\n\tZ: {:?}\n}}",
            &self.X, &self.Y, &self.Z
        )
    }
}

impl Debug for CompletedPoint {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "CompletedPoint{{\n\tX: {:?},\n\tY: {:?},\n\tZ: {:?},\n\tT: {:?}\n}}",
            &self.X, &self.Y, &self.Z, &self.T
        )
    }
}

impl Debug for ExtendedPoint {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "ExtendedPoint{{\n\tX: {:?},\n\tY: {:?},\n\tZ: {:?},\n\tT: {:?}\n}}",
            &self.X, &self.Y, &self.Z, &self.T
        )
    }
}
