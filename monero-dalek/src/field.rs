// -*- mode: rust; -*-
//
// This file is part of monero-dalek.
// See LICENSE for licensing information.

//! Field arithmetic modulo \\(p = 2\^{255} - 19\\).
//!
//! The `field` module provides a type alias `monero_dalek::field::FieldElement`
//! to the backend's field element type, and implements the field
//! operations that are defined in terms of its primitives: sign and
//! zero tests, inversion, and the \\((p-5)/8\\) power used to take
//! square roots of ratios.
//!
//! Field operations defined in terms of machine operations, such as
//! field multiplication or squaring, are in
//! `backend::u32::field`.

use subtle::Choice;
use subtle::ConstantTimeEq;

use crate::backend;

/// A `FieldElement` represents an element of the field
/// \\( \mathbb Z / (2\^{255} - 19)\\).
///
/// The `FieldElement` type is an alias for the backend's
/// `FieldElement2625`.
pub(crate) type FieldElement = backend::u32::field::FieldElement2625;

impl Eq for FieldElement {}

impl PartialEq for FieldElement {
    fn eq(&self, other: &FieldElement) -> bool {
        self.ct_eq(other).into()
    }
}

impl ConstantTimeEq for FieldElement {
    /// Test equality between two `FieldElement`s.  Since the
    /// internal representation is not canonical, the field elements
    /// are normalized to wire format before comparison.
    fn ct_eq(&self, other: &FieldElement) -> Choice {
        self.as_bytes().ct_eq(&other.as_bytes())
    }
}

impl FieldElement {
    /// Determine if this `FieldElement` is negative, in the sense
    /// used in the ed25519 paper: `x` is negative if the low bit is
    /// set.
    ///
    /// # Return
    ///
    /// If negative, return `Choice(1)`.  Otherwise, return `Choice(0)`.
    pub(crate) fn is_negative(&self) -> Choice {
        let bytes = self.as_bytes();
        (bytes[0] & 1).into()
    }

    /// Determine if this `FieldElement` is zero.
    ///
    /// # Return
    ///
    /// If zero, return `Choice(1)`.  Otherwise, return `Choice(0)`.
    pub(crate) fn is_zero(&self) -> Choice {
        self.ct_eq(&FieldElement::ZERO)
    }

    /// Compute (self^(2^250-1), self^11), used as a helper function
    /// within invert().
    #[rustfmt::skip] // keep alignment of explanatory comments
    fn pow22501(&self) -> (FieldElement, FieldElement) {
        // Instead of managing which temporary variables are used
        // for what, we define as many as we need and leave stack
        // allocation to the compiler
        //
        // Each temporary variable t_i is of the form (self)^e_i.
        // Squaring t_i corresponds to multiplying e_i by 2,
        // so the pow2k function shifts e_i left by k places.
        // Multiplying t_i and t_j corresponds to adding e_i + e_j.
        //
        // Temporary t_i                      Nonzero bits of e_i
        //
        let t0  = self.square();           // 1         e_0 = 2^1
        let t1  = t0.square().square();    // 3         e_1 = 2^3
        let t2  = self * &t1;              // 3,0       e_2 = 2^3 + 2^0
        let t3  = &t0 * &t2;               // 3,1,0
        let t4  = t3.square();             // 4,2,1
        let t5  = &t2 * &t4;               // 4,3,2,1,0
        let t6  = t5.pow2k(5);             // 9,8,7,6,5
        let t7  = &t6 * &t5;               // 9,8,7,6,5,4,3,2,1,0
        let t8  = t7.pow2k(10);            // 19..10
        let t9  = &t8 * &t7;               // 19..0
        let t10 = t9.pow2k(20);            // 39..20
        let t11 = &t10 * &t9;              // 39..0
        let t12 = t11.pow2k(10);           // 49..10
        let t13 = &t12 * &t7;              // 49..0
        let t14 = t13.pow2k(50);           // 99..50
        let t15 = &t14 * &t13;             // 99..0
        let t16 = t15.pow2k(100);          // 199..100
        let t17 = &t16 * &t15;             // 199..0
        let t18 = t17.pow2k(50);           // 249..50
        let t19 = &t18 * &t13;             // 249..0

        (t19, t3)
    }

    /// Given a nonzero field element, compute its inverse.
    ///
    /// The inverse is computed as self^(p-2), since
    /// x^(p-2)x = x^(p-1) = 1 (mod p).
    ///
    /// This function returns zero on input zero.
    pub(crate) fn invert(&self) -> FieldElement {
        // The bits of p-2 = 2^255 -19 -2 are 11010111111...11.
        //
        //                                 nonzero bits of exponent
        let (t19, t3) = self.pow22501(); // t19: 249..0 ; t3: 3,1,0
        let t20 = t19.pow2k(5);          // 254..5
        let t21 = &t20 * &t3;            // 254..5,3,1,0

        t21
    }

    /// Compute \\( u^{(p+3)/8} v^{-(p+3)/8} \\), a candidate square root
    /// of \\(u/v\\), as \\( u v^3 (u v^7)^{(p-5)/8} \\).
    ///
    /// The square of the result is \\( \pm u/v \\) or
    /// \\( \pm \sqrt{-1} \cdot u/v \\); callers tell the cases apart by
    /// comparing \\(v r^2\\) with \\(u\\).
    ///
    /// The exponent \\((p-5)/8 = 2\^{252} - 3\\) is reached by a fixed
    /// chain of 251 squarings and 11 multiplications.  `v` must be
    /// nonzero; for `v = 0` the result is zero.
    #[rustfmt::skip] // keep alignment of explanatory comments
    pub(crate) fn pow_p58_divide(u: &FieldElement, v: &FieldElement) -> FieldElement {
        let v3  = &v.square() * v;          // v^3
        let uv7 = &(&v3.square() * v) * u;  // u v^7

        // uv7^(2^252 - 3), with e_i the exponent of uv7 in t_i
        //
        // Temporary t_i                      Nonzero bits of e_i
        //
        let t0  = uv7.square();             // 1
        let t1  = t0.pow2k(2);              // 3
        let t1  = &uv7 * &t1;               // 3,0
        let t0  = &t0 * &t1;                // 3,1,0
        let t0  = t0.square();              // 4,2,1
        let t0  = &t1 * &t0;                // 4..0
        let t1  = t0.pow2k(5);              // 9..5
        let t0  = &t1 * &t0;                // 9..0
        let t1  = t0.pow2k(10);             // 19..10
        let t1  = &t1 * &t0;                // 19..0
        let t2  = t1.pow2k(20);             // 39..20
        let t1  = &t2 * &t1;                // 39..0
        let t1  = t1.pow2k(10);             // 49..10
        let t0  = &t1 * &t0;                // 49..0
        let t1  = t0.pow2k(50);             // 99..50
        let t1  = &t1 * &t0;                // 99..0
        let t2  = t1.pow2k(100);            // 199..100
        let t1  = &t2 * &t1;                // 199..0
        let t1  = t1.pow2k(50);             // 249..50
        let t0  = &t1 * &t0;                // 249..0
        let t0  = t0.pow2k(2);              // 251..2
        let t0  = &t0 * &uv7;               // 251..2,0

        let t0  = &t0 * &v3;
        &t0 * u
    }
}
