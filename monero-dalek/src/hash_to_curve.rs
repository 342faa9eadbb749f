// -*- mode: rust; -*-
//
// This file is part of monero-dalek.
// See LICENSE for licensing information.

//! Monero's hash-to-point, an Elligator 2 style map onto the Edwards
//! curve followed by cofactor clearing.
//!
//! A 32-byte Keccak digest is read as a field element \\(u\\) and
//! mapped through the Montgomery form of Curve25519:
//!
//! ```text
//!     v = 2u²,   w = v + 1,   x = w² - A²v,   r = (w/x)^((p+3)/8)
//! ```
//!
//! Squaring \\(r\\) recovers \\(w/x\\) only up to a factor of
//! \\(\pm 1\\) or \\(\pm\sqrt{-1}\\).  Which of the four holds decides
//! the correction root multiplied into \\(r\\), and whether the point
//! lands on the curve or its twist (see [`RootCase`]).
//!
//! The map yields a point in \\(\mathbb P\^2\\) without a \\(T\\)
//! coordinate.  That is all cofactor clearing needs, and
//! [`hash_to_point`] only returns the cleared point, so no partial
//! point escapes.
//!
//! The inputs of the map are public hash outputs, so the case split
//! branches.

use curve25519_dalek::edwards::EdwardsPoint;

use subtle::ConditionallyNegatable;

use crate::backend::u32::constants;
use crate::curve_models::ProjectivePoint;
use crate::field::FieldElement;
use crate::hash::keccak256;
#[cfg(debug_assertions)]
use crate::traits::ValidityCheck;

/// The relation between \\(x r\^2\\) and \\(w\\) after the
/// \\((p+3)/8\\) power, which selects the branch of the map.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum RootCase {
    /// \\(x r\^2 = w\\)
    Direct,
    /// \\(x r\^2 = -w\\)
    Negated,
    /// \\(\sqrt{-1} \cdot x r\^2 = w\\)
    Twisted,
    /// \\(\sqrt{-1} \cdot x r\^2 = -w\\)
    TwistedNegated,
}

impl RootCase {
    /// Classify `xr2` (that is, \\(x r\^2\\)) against `w`.
    fn classify(w: &FieldElement, xr2: &FieldElement) -> RootCase {
        if bool::from((w - xr2).is_zero()) {
            return RootCase::Direct;
        }
        if bool::from((w + xr2).is_zero()) {
            return RootCase::Negated;
        }
        let xr2i = xr2 * &constants::SQRT_M1;
        if bool::from((w - &xr2i).is_zero()) {
            RootCase::Twisted
        } else {
            debug_assert!(bool::from((w + &xr2i).is_zero()));
            RootCase::TwistedNegated
        }
    }

    /// The square root multiplied into \\(r\\) for this case.
    pub(crate) fn correction(&self) -> &'static FieldElement {
        match self {
            RootCase::Direct => &constants::FFFB2,
            RootCase::Negated => &constants::FFFB1,
            RootCase::Twisted => &constants::FFFB4,
            RootCase::TwistedNegated => &constants::FFFB3,
        }
    }

    /// Whether this case goes through the quadratic twist, in which
    /// case the x-coordinate is made negative rather than positive.
    pub fn is_twisted(&self) -> bool {
        matches!(self, RootCase::Twisted | RootCase::TwistedNegated)
    }
}

/// Map a 32-byte digest to a curve point, also reporting which branch
/// was taken.
///
/// The point is the same one [`map_to_curve`] returns.
pub fn map_with_case(digest: &[u8; 32]) -> (ProjectivePoint, RootCase) {
    let u = FieldElement::expand_reduce(digest);
    let v = {
        let uu = u.square();
        &uu + &uu
    };
    let w = &v + &FieldElement::ONE;
    let x = &w.square() + &(&constants::MINUS_A_SQUARED * &v);

    let r = FieldElement::pow_p58_divide(&w, &x);
    let xr2 = &r.square() * &x;
    let case = RootCase::classify(&w, &xr2);

    let (mut rx, z) = if case.is_twisted() {
        (&r * case.correction(), constants::MINUS_A)
    } else {
        (&(&r * case.correction()) * &u, &constants::MINUS_A * &v)
    };

    let sign = subtle::Choice::from(case.is_twisted() as u8);
    rx.conditional_negate(rx.is_negative() ^ sign);

    let z_plus_w = &z + &w;
    let point = ProjectivePoint {
        X: &rx * &z_plus_w,
        Y: &z - &w,
        Z: z_plus_w,
    };

    #[cfg(debug_assertions)]
    debug_assert!(point.is_valid());

    (point, case)
}

/// Map a 32-byte digest to a point on the curve.
///
/// The result generally has a torsion component; pass it to
/// [`clear_cofactor`] to land in the prime-order subgroup.
pub fn map_to_curve(digest: &[u8; 32]) -> ProjectivePoint {
    map_with_case(digest).0
}

/// Multiply a mapped point by the cofactor \\(8\\) and hand it to
/// curve25519-dalek.
pub fn clear_cofactor(point: &ProjectivePoint) -> EdwardsPoint {
    point.mul_by_cofactor().to_edwards()
}

/// Hash arbitrary bytes to a point of the prime-order subgroup.
///
/// This is Monero's `hash_to_ec`: Keccak-256, the map above, then
/// multiplication by \\(8\\).
///
/// # Example
///
/// ```
/// use monero_dalek::hash_to_point;
///
/// let p = hash_to_point(b"key image");
/// assert!(p.is_torsion_free());
/// ```
pub fn hash_to_point(data: impl AsRef<[u8]>) -> EdwardsPoint {
    clear_cofactor(&map_to_curve(&keccak256(data)))
}
