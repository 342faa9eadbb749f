// -*- mode: rust; -*-
//
// This file is part of monero-dalek.
// See LICENSE for licensing information.

//! Curve parameters and the square roots used by the hash-to-curve map,
//! written in the \\(2\^{25.5}\\) limb layout, and the scalar constants
//! used by Barrett reduction.
//!
//! Here \\(A = 486662\\) is the Montgomery coefficient of Curve25519.

use crate::backend::u32::field::FieldElement2625;
use crate::backend::u32::scalar::Scalar30;

/// Edwards `d` value, equal to `-121665/121666 mod p`.
#[cfg(any(test, debug_assertions))]
#[rustfmt::skip]
pub(crate) const EDWARDS_D: FieldElement2625 = FieldElement2625([
    0x35978a3, 0x0d37284, 0x3156ebd, 0x06a0a0e, 0x001c029,
    0x179e898, 0x3a03cbb, 0x1ce7198, 0x2e2b6ff, 0x1480db3,
]);

/// Precomputed value of one of the square roots of -1 (mod p)
#[rustfmt::skip]
pub(crate) const SQRT_M1: FieldElement2625 = FieldElement2625([
    0x20ea0b0, 0x186c9d2, 0x08f189d, 0x035697f, 0x0bd0c60,
    0x1fbd7a7, 0x2804c9e, 0x1e16569, 0x004fc1d, 0x0ae0c92,
]);

/// `-A`
#[rustfmt::skip]
pub(crate) const MINUS_A: FieldElement2625 = FieldElement2625([
    0x3f892e7, 0x1ffffff, 0x3ffffff, 0x1ffffff, 0x3ffffff,
    0x1ffffff, 0x3ffffff, 0x1ffffff, 0x3ffffff, 0x1ffffff,
]);

/// `-A^2`
#[rustfmt::skip]
pub(crate) const MINUS_A_SQUARED: FieldElement2625 = FieldElement2625([
    0x33de3c9, 0x1fff236, 0x3ffffff, 0x1ffffff, 0x3ffffff,
    0x1ffffff, 0x3ffffff, 0x1ffffff, 0x3ffffff, 0x1ffffff,
]);

/// `sqrt(-2 * A * (A + 2))`
#[rustfmt::skip]
pub(crate) const FFFB1: FieldElement2625 = FieldElement2625([
    0x1e3bdff, 0x025a2b3, 0x18e5bab, 0x0ba36ac, 0x0b9afed,
    0x004e61c, 0x31d645f, 0x09d1bea, 0x102529e, 0x0063810,
]);

/// `sqrt(2 * A * (A + 2))`
#[rustfmt::skip]
pub(crate) const FFFB2: FieldElement2625 = FieldElement2625([
    0x383650d, 0x066df27, 0x10405a4, 0x1cfdd48, 0x2b887f2,
    0x1e9a041, 0x1d7241f, 0x0612dc5, 0x35fba5d, 0x0cbe787,
]);

/// `sqrt(-sqrt(-1) * A * (A + 2))`
#[rustfmt::skip]
pub(crate) const FFFB3: FieldElement2625 = FieldElement2625([
    0x0cfd387, 0x1209e3a, 0x3bad4fc, 0x18ad34d, 0x2ff6c02,
    0x0f25d12, 0x15cdfe0, 0x0e208ed, 0x32eb3df, 0x062d7bb,
]);

/// `sqrt(sqrt(-1) * A * (A + 2))`
#[rustfmt::skip]
pub(crate) const FFFB4: FieldElement2625 = FieldElement2625([
    0x2b39186, 0x14640ed, 0x14930a7, 0x04509fa, 0x3b91bf0,
    0x0f7432e, 0x07a443f, 0x17f24d8, 0x031067d, 0x0690fcc,
]);

/// `L` is the order of base point, i.e. 2^252 +
/// 27742317777372353535851937790883648493
#[rustfmt::skip]
pub(crate) const L: Scalar30 = Scalar30([
    0x1cf5d3ed, 0x20498c69, 0x2f79cd65, 0x37be77a8, 0x00000014,
    0x00000000, 0x00000000, 0x00000000, 0x00001000,
]);

/// `MU` = floor(2^512 / L), the Barrett reduction constant
#[rustfmt::skip]
pub(crate) const MU: Scalar30 = Scalar30([
    0x0a2c131b, 0x3673968c, 0x06329a7e, 0x01885742, 0x3fffeb21,
    0x3fffffff, 0x3fffffff, 0x3fffffff, 0x000fffff,
]);
