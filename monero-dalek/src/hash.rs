// -*- mode: rust; -*-
//
// This file is part of monero-dalek.
// See LICENSE for licensing information.

//! Keccak-256 and the hash-to-scalar random oracle.
//!
//! Monero hashes with the original Keccak padding, not the SHA3-256
//! padding standardized in FIPS 202.  Every digest reduced into a
//! scalar is read as a little-endian integer and reduced mod
//! \\(\ell\\).

use core::fmt;

use curve25519_dalek::edwards::EdwardsPoint;
use sha3::{Digest, Keccak256};

use crate::scalar::Scalar;

/// One-shot Keccak-256.
pub fn keccak256(data: impl AsRef<[u8]>) -> [u8; 32] {
    Keccak256::digest(data).into()
}

/// Hash arbitrary bytes to a scalar: Keccak-256, then reduce mod \\(\ell\\).
///
/// # Example
///
/// ```
/// use monero_dalek::hash_to_scalar;
///
/// let s = hash_to_scalar(b"SubAddr\0");
/// assert_eq!(s, hash_to_scalar(b"SubAddr\0"));
/// ```
pub fn hash_to_scalar(data: impl AsRef<[u8]>) -> Scalar {
    Scalar::from_bytes_mod_order(keccak256(data))
}

/// Hash the compressed encoding of a point to a scalar.
///
/// This is the per-bit challenge \\( c = H_s(L) \\) of the
/// Borromean ring.
pub fn hash_point_to_scalar(point: &EdwardsPoint) -> Scalar {
    hash_to_scalar(point.compress().as_bytes())
}

/// An incremental Keccak-256 transcript.
///
/// Points and messages are absorbed in order; finalizing yields either
/// the raw digest or the digest reduced to a scalar.
#[derive(Clone, Default)]
pub struct KeccakTranscript {
    hasher: Keccak256,
}

impl fmt::Debug for KeccakTranscript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("KeccakTranscript { .. }")
    }
}

impl KeccakTranscript {
    /// Start an empty transcript.
    pub fn new() -> Self {
        Self::default()
    }

    /// Absorb raw bytes.
    pub fn append_message(&mut self, message: &[u8]) {
        self.hasher.update(message);
    }

    /// Absorb the 32-byte compressed encoding of `point`.
    pub fn append_point(&mut self, point: &EdwardsPoint) {
        self.hasher.update(point.compress().as_bytes());
    }

    /// Finalize into the raw 32-byte digest.
    pub fn finalize(self) -> [u8; 32] {
        self.hasher.finalize().into()
    }

    /// Finalize and reduce the digest mod \\(\ell\\).
    pub fn finalize_scalar(self) -> Scalar {
        Scalar::from_bytes_mod_order(self.finalize())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    use curve25519_dalek::constants::ED25519_BASEPOINT_POINT;

    #[test]
    fn keccak_is_not_sha3() {
        // Keccak-256 of the empty string
        assert_eq!(
            hex::encode(keccak256(b"")),
            "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
    }

    #[test]
    fn keccak_of_basepoint() {
        assert_eq!(
            hex::encode(keccak256(ED25519_BASEPOINT_POINT.compress().as_bytes())),
            "1e609dc09abbd7bca35029ffbf164d05496b441a97d9f13020d869762acd0ee1"
        );
    }

    #[test]
    fn hash_to_scalar_vector() {
        let data =
            hex::decode("259ef2aba8feb473cf39058a0fe30b9ff6d245b42b6826687ebd6b63128aff6405")
                .unwrap();
        assert_eq!(
            hex::encode(hash_to_scalar(&data).to_bytes()),
            "9907925b254e12162609fc0dfd0fef2aa4d605b0d10e6507cac253dd31a3ec06"
        );
    }

    #[test]
    fn transcript_matches_one_shot() {
        let points = [
            ED25519_BASEPOINT_POINT,
            ED25519_BASEPOINT_POINT + ED25519_BASEPOINT_POINT,
        ];
        let mut transcript = KeccakTranscript::new();
        let mut concatenated = [0u8; 64];
        for (i, point) in points.iter().enumerate() {
            transcript.append_point(point);
            concatenated[32 * i..32 * (i + 1)].copy_from_slice(point.compress().as_bytes());
        }
        assert_eq!(transcript.clone().finalize(), keccak256(concatenated));
        assert_eq!(transcript.finalize_scalar(), hash_to_scalar(concatenated));
    }

    #[test]
    fn empty_transcript_is_keccak_of_nothing() {
        assert_eq!(KeccakTranscript::new().finalize(), keccak256(b""));
        assert_eq!(
            KeccakTranscript::default().finalize_scalar(),
            hash_to_scalar(b"")
        );
    }

    #[test]
    fn hash_point_to_scalar_uses_compressed_encoding() {
        let p = ED25519_BASEPOINT_POINT;
        assert_eq!(
            hash_point_to_scalar(&p),
            hash_to_scalar(p.compress().as_bytes())
        );
    }
}
