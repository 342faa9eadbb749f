// -*- mode: rust; -*-
//
// This file is part of monero-dalek.
// See LICENSE for licensing information.

//! Pedersen commitments and the one-time key derivations built on the
//! hash-to-scalar oracle.
//!
//! A sender with transaction secret \\(r\\) and a recipient with view
//! secret \\(a\\) share the derivation \\(D = 8 r A = 8 a R\\).  The
//! \\(i\\)-th output of the transaction is then keyed by
//! \\(H_s(D \,\|\, i) G + B\\), whose secret the recipient recovers as
//! \\(H_s(D \,\|\, i) + b\\).

#![allow(non_snake_case)]

use curve25519_dalek::edwards::{CompressedEdwardsY, EdwardsPoint};

use crate::constants;
use crate::errors::{Error, Result};
use crate::hash::KeccakTranscript;
use crate::scalar::Scalar;

/// Longest varint encoding of a `u64`.
const MAX_VARINT_LEN: usize = 10;

/// Encode `value` as a Monero varint: seven bits per byte, least
/// significant group first, with the high bit set on every byte but the
/// last.  Returns the buffer and the number of bytes used.
pub(crate) fn write_varint(mut value: u64) -> ([u8; MAX_VARINT_LEN], usize) {
    let mut buf = [0u8; MAX_VARINT_LEN];
    let mut len = 0;
    while value >= 0x80 {
        buf[len] = (value as u8 & 0x7f) | 0x80;
        value >>= 7;
        len += 1;
    }
    buf[len] = value as u8;
    (buf, len + 1)
}

fn decompress(point: &CompressedEdwardsY) -> Result<EdwardsPoint> {
    point.decompress().ok_or(Error::PointDecompression)
}

/// The Pedersen commitment \\(C = x G + a H\\) to `amount` under `mask`.
pub fn commit(mask: &Scalar, amount: u64) -> EdwardsPoint {
    EdwardsPoint::mul_base(&mask.to_dalek())
        + constants::H() * Scalar::from(amount).to_dalek()
}

/// \\(a G + b B\\)
pub fn add_keys1(a: &Scalar, b: &Scalar, B: &EdwardsPoint) -> EdwardsPoint {
    EdwardsPoint::vartime_double_scalar_mul_basepoint(&b.to_dalek(), B, &a.to_dalek())
}

/// \\(a A + b B\\)
pub fn add_keys2(a: &Scalar, A: &EdwardsPoint, b: &Scalar, B: &EdwardsPoint) -> EdwardsPoint {
    A * a.to_dalek() + B * b.to_dalek()
}

/// The shared derivation \\(D = 8 \cdot s P\\) of a public key `P`
/// and a secret key `s`.
///
/// Returns `Error::PointDecompression` if `public` is not a curve
/// point.
pub fn generate_key_derivation(public: &CompressedEdwardsY, secret: &Scalar) -> Result<EdwardsPoint> {
    let P = decompress(public)?;
    Ok((P * secret.to_dalek()).mul_by_cofactor())
}

/// \\(H_s(D \,\|\, \mathrm{varint}(i))\\)
pub fn derivation_to_scalar(derivation: &EdwardsPoint, output_index: u64) -> Scalar {
    let (index, len) = write_varint(output_index);
    let mut transcript = KeccakTranscript::new();
    transcript.append_point(derivation);
    transcript.append_message(&index[..len]);
    transcript.finalize_scalar()
}

/// The one-time secret key \\(H_s(D \,\|\, i) + b\\) of output `i`.
pub fn derive_private_key(derivation: &EdwardsPoint, output_index: u64, base: &Scalar) -> Scalar {
    derivation_to_scalar(derivation, output_index) + base
}

/// The one-time public key \\(H_s(D \,\|\, i) G + B\\) of output `i`.
///
/// Returns `Error::PointDecompression` if `base` is not a curve point.
pub fn derive_public_key(
    derivation: &EdwardsPoint,
    output_index: u64,
    base: &CompressedEdwardsY,
) -> Result<EdwardsPoint> {
    let B = decompress(base)?;
    let s = derivation_to_scalar(derivation, output_index);
    Ok(EdwardsPoint::mul_base(&s.to_dalek()) + B)
}

/// The secret offset of subaddress `(major, minor)` under the view
/// secret `view`.
pub fn subaddress_secret_key(major: u32, minor: u32, view: &Scalar) -> Scalar {
    let mut transcript = KeccakTranscript::new();
    transcript.append_message(b"SubAddr\0");
    transcript.append_message(&view.to_bytes());
    transcript.append_message(&major.to_le_bytes());
    transcript.append_message(&minor.to_le_bytes());
    transcript.finalize_scalar()
}
