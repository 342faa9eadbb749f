// -*- mode: rust; -*-
//
// This file is part of monero-dalek.
// See LICENSE for licensing information.

//! Monero constants: the amount generator \\(H\\) and the range-proof
//! width.

#![allow(non_snake_case)]

use curve25519_dalek::edwards::{CompressedEdwardsY, EdwardsPoint};

/// The compressed encoding of Monero's amount generator
/// \\(H = 8 \cdot \mathrm{decompress}(\mathrm{keccak}(G))\\).
pub const H_COMPRESSED: CompressedEdwardsY = CompressedEdwardsY([
    0x8b, 0x65, 0x59, 0x70, 0x15, 0x37, 0x99, 0xaf, 0x2a, 0xea, 0xdc, 0x9f, 0xf1, 0xad, 0xd0, 0xea,
    0x6c, 0x72, 0x51, 0xd5, 0x41, 0x54, 0xcf, 0xa9, 0x2c, 0x17, 0x3a, 0x0d, 0xd3, 0x9c, 0x1f, 0x94,
]);

/// Monero's alternate generator \\(H\\), used for amounts in Pedersen
/// commitments.  Nobody knows its discrete logarithm to base \\(G\\).
pub fn H() -> EdwardsPoint {
    H_COMPRESSED
        .decompress()
        .expect("H_COMPRESSED is the encoding of a curve point")
}

/// Number of bits proven by a Borromean range proof.
pub const RANGE_PROOF_BITS: usize = 64;
