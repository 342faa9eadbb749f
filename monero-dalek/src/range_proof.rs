// -*- mode: rust; -*-
//
// This file is part of monero-dalek.
// See LICENSE for licensing information.

//! Borromean range proofs over 64-bit amounts.
//!
//! An amount \\(v = \sum_i b_i 2\^i\\) is committed bit by bit as
//! \\(C_i = a_i G + b_i 2\^i H\\), so that \\(\sum_i C_i = v H + a G\\)
//! with \\(a = \sum_i a_i\\).  For each bit a two-member ring proves
//! knowledge of the discrete log to base \\(G\\) of either \\(C_i\\) or
//! \\(C_i - 2\^i H\\); the 64 rings are chained through the single
//! challenge \\(e\\) hashed from all of their first-round points.
//!
//! A verifier recomputes, for every bit,
//!
//! ```text
//!     L_i  = s0_i G + e C_i
//!     L'_i = s1_i G + H_s(L_i) (C_i - 2^i H)
//! ```
//!
//! and accepts when \\(e = H_s(L'_0 \,\|\, \cdots \,\|\, L'_{63})\\).
//!
//! ```
//! use monero_dalek::generate_range_proof;
//! use monero_dalek::keys::commit;
//! use rand_core::OsRng;
//!
//! let proof = generate_range_proof(1_000, None, &mut OsRng);
//! assert_eq!(proof.commitment, commit(&proof.mask, 1_000));
//! ```

#![allow(non_snake_case)]

use core::fmt;

use curve25519_dalek::edwards::{CompressedEdwardsY, EdwardsPoint};
use curve25519_dalek::traits::Identity;

use rand_core::CryptoRngCore;

use zeroize::Zeroizing;

use crate::constants::{self, RANGE_PROOF_BITS};
use crate::errors::{Error, Result};
use crate::hash::{hash_point_to_scalar, KeccakTranscript};
use crate::keys::add_keys1;
use crate::scalar::Scalar;

/// Length in bytes of an encoded [`RangeSignature`].
pub const RANGE_SIGNATURE_LENGTH: usize = (3 * RANGE_PROOF_BITS + 1) * 32;

/// The Borromean ring signature of a range proof: two responses per
/// bit and the shared challenge.
#[derive(Clone, PartialEq, Eq)]
pub struct BorromeanSignature {
    pub s0: [Scalar; RANGE_PROOF_BITS],
    pub s1: [Scalar; RANGE_PROOF_BITS],
    pub ee: Scalar,
}

/// A range signature: the per-bit commitments and the ring signature
/// over them.
#[derive(Clone, PartialEq, Eq)]
pub struct RangeSignature {
    pub Ci: [CompressedEdwardsY; RANGE_PROOF_BITS],
    pub asig: BorromeanSignature,
}

/// The output of [`generate_range_proof`].
#[derive(Clone)]
pub struct RangeProof {
    /// \\(v H + a G\\), the sum of the per-bit commitments.
    pub commitment: EdwardsPoint,
    /// The blinding factor \\(a\\), to be sent to the recipient.
    pub mask: Scalar,
    pub signature: RangeSignature,
}

impl fmt::Debug for BorromeanSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BorromeanSignature {{ ee: {:?}, .. }}", &self.ee)
    }
}

impl fmt::Debug for RangeSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RangeSignature")
            .field("Ci", &self.Ci)
            .field("asig", &self.asig)
            .finish()
    }
}

impl fmt::Debug for RangeProof {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RangeProof")
            .field("commitment", &self.commitment.compress())
            .field("signature", &self.signature)
            .finish_non_exhaustive()
    }
}

impl RangeSignature {
    /// Encode as `Ci || s0 || s1 || ee`, 32 bytes per element, with no
    /// length prefixes.
    pub fn to_bytes(&self) -> [u8; RANGE_SIGNATURE_LENGTH] {
        let mut out = [0u8; RANGE_SIGNATURE_LENGTH];
        let elements = self
            .Ci
            .iter()
            .map(|c| c.to_bytes())
            .chain(self.asig.s0.iter().map(Scalar::to_bytes))
            .chain(self.asig.s1.iter().map(Scalar::to_bytes))
            .chain(core::iter::once(self.asig.ee.to_bytes()));
        for (chunk, element) in out.chunks_exact_mut(32).zip(elements) {
            chunk.copy_from_slice(&element);
        }
        out
    }

    /// Decode the encoding produced by [`RangeSignature::to_bytes`].
    ///
    /// The commitments are not decompressed.  Scalars must be
    /// canonical.
    pub fn from_bytes(bytes: &[u8]) -> Result<RangeSignature> {
        if bytes.len() != RANGE_SIGNATURE_LENGTH {
            return Err(Error::BytesLength {
                name: "RangeSignature",
                length: RANGE_SIGNATURE_LENGTH,
            });
        }
        let (Ci_bytes, rest) = bytes.split_at(32 * RANGE_PROOF_BITS);
        let (s0_bytes, rest) = rest.split_at(32 * RANGE_PROOF_BITS);
        let (s1_bytes, ee_bytes) = rest.split_at(32 * RANGE_PROOF_BITS);

        let mut Ci = [CompressedEdwardsY::default(); RANGE_PROOF_BITS];
        for (c, chunk) in Ci.iter_mut().zip(Ci_bytes.chunks_exact(32)) {
            *c = CompressedEdwardsY::from_slice(chunk).map_err(|_| Error::BytesLength {
                name: "CompressedEdwardsY",
                length: 32,
            })?;
        }

        let mut s0 = [Scalar::ZERO; RANGE_PROOF_BITS];
        for (s, chunk) in s0.iter_mut().zip(s0_bytes.chunks_exact(32)) {
            *s = Scalar::from_slice(chunk)?;
        }
        let mut s1 = [Scalar::ZERO; RANGE_PROOF_BITS];
        for (s, chunk) in s1.iter_mut().zip(s1_bytes.chunks_exact(32)) {
            *s = Scalar::from_slice(chunk)?;
        }
        let ee = Scalar::from_slice(ee_bytes)?;

        Ok(RangeSignature {
            Ci,
            asig: BorromeanSignature { s0, s1, ee },
        })
    }
}

/// \\(x G\\) for a secret `x`, wiping the converted scalar afterwards.
fn secret_mul_base(secret: &Scalar) -> EdwardsPoint {
    let x = Zeroizing::new(secret.to_dalek());
    EdwardsPoint::mul_base(&x)
}

/// Prove that a commitment opens to `amount` with a 64-bit range proof.
///
/// Every mask share \\(a_i\\) is drawn from `rng`, except that when
/// `total_mask` is given the last share is chosen so that the shares sum
/// to it.  The returned [`RangeProof`] carries the commitment
/// \\(\sum_i C_i\\), the total mask and the signature.
///
/// Secret shares and nonces are wiped before returning.
pub fn generate_range_proof<R: CryptoRngCore + ?Sized>(
    amount: u64,
    total_mask: Option<&Scalar>,
    rng: &mut R,
) -> RangeProof {
    let bit = |i: usize| (amount >> i) & 1 == 1;

    let mut ai = Zeroizing::new([Scalar::ZERO; RANGE_PROOF_BITS]);
    let mut alpha = Zeroizing::new([Scalar::ZERO; RANGE_PROOF_BITS]);
    let mut mask = Zeroizing::new(Scalar::ZERO);

    let mut C = [EdwardsPoint::identity(); RANGE_PROOF_BITS];
    let mut C_acc = EdwardsPoint::identity();
    let mut s0 = [Scalar::ZERO; RANGE_PROOF_BITS];
    let mut s1 = [Scalar::ZERO; RANGE_PROOF_BITS];

    let H = constants::H();
    let mut transcript = KeccakTranscript::new();

    // Commit to every bit and simulate the ring member we cannot sign
    // for yet.
    let mut C_h = H;
    for i in 0..RANGE_PROOF_BITS {
        ai[i] = match total_mask {
            Some(total) if i == RANGE_PROOF_BITS - 1 => total - &*mask,
            _ => Scalar::random(rng),
        };
        *mask += &ai[i];
        alpha[i] = Scalar::random(rng);

        let mut L = secret_mul_base(&alpha[i]);
        C[i] = secret_mul_base(&ai[i]);
        if bit(i) {
            C[i] += C_h;
        }
        C_acc += C[i];

        if !bit(i) {
            s1[i] = Scalar::random(rng);
            let c = hash_point_to_scalar(&L);
            L = add_keys1(&s1[i], &c, &(C[i] - C_h));
        }

        transcript.append_point(&L);
        C_h = C_h + C_h;
    }

    let ee = transcript.finalize_scalar();

    // Close every ring.
    for i in 0..RANGE_PROOF_BITS {
        if !bit(i) {
            s0[i] = Scalar::mul_sub(&alpha[i], &ai[i], &ee);
        } else {
            s0[i] = Scalar::random(rng);
            let L = add_keys1(&s0[i], &ee, &C[i]);
            let c = hash_point_to_scalar(&L);
            s1[i] = Scalar::mul_sub(&alpha[i], &ai[i], &c);
        }
    }

    let mut Ci = [CompressedEdwardsY::default(); RANGE_PROOF_BITS];
    for (compressed, point) in Ci.iter_mut().zip(C.iter()) {
        *compressed = point.compress();
    }

    RangeProof {
        commitment: C_acc,
        mask: *mask,
        signature: RangeSignature {
            Ci,
            asig: BorromeanSignature { s0, s1, ee },
        },
    }
}

#[cfg(feature = "serde")]
use serde::de::Visitor;
#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[cfg(feature = "serde")]
impl Serialize for RangeSignature {
    fn serialize<S>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_bytes(&self.to_bytes())
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for RangeSignature {
    fn deserialize<D>(deserializer: D) -> core::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct RangeSignatureVisitor;

        impl<'de> Visitor<'de> for RangeSignatureVisitor {
            type Value = RangeSignature;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(
                    formatter,
                    "a {} byte range signature encoding",
                    RANGE_SIGNATURE_LENGTH
                )
            }

            fn visit_bytes<E>(self, v: &[u8]) -> core::result::Result<RangeSignature, E>
            where
                E: serde::de::Error,
            {
                RangeSignature::from_bytes(v).map_err(E::custom)
            }

            fn visit_seq<A>(self, mut seq: A) -> core::result::Result<RangeSignature, A::Error>
            where
                A: serde::de::SeqAccess<'de>,
            {
                let mut bytes = [0u8; RANGE_SIGNATURE_LENGTH];
                #[allow(clippy::needless_range_loop)]
                for i in 0..RANGE_SIGNATURE_LENGTH {
                    bytes[i] = seq
                        .next_element()?
                        .ok_or_else(|| serde::de::Error::invalid_length(i, &self))?;
                }
                RangeSignature::from_bytes(&bytes).map_err(serde::de::Error::custom)
            }
        }

        deserializer.deserialize_bytes(RangeSignatureVisitor)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use crate::hash::hash_to_scalar;
    use crate::keys::commit;

    #[test]
    fn commitment_opens_to_amount() {
        let mut rng = StdRng::seed_from_u64(7);
        for amount in [0u64, 1, 0x8000_0000_0000_0000, 123_456_789] {
            let proof = generate_range_proof(amount, None, &mut rng);
            assert_eq!(proof.commitment, commit(&proof.mask, amount));
        }
    }

    #[test]
    fn total_mask_is_honoured() {
        let mut rng = StdRng::seed_from_u64(8);
        let total = hash_to_scalar(b"agreed mask");
        let proof = generate_range_proof(42, Some(&total), &mut rng);
        assert_eq!(proof.mask, total);
        assert_eq!(proof.commitment, commit(&total, 42));
    }

    #[test]
    fn commitments_sum_to_commitment() {
        let mut rng = StdRng::seed_from_u64(9);
        let proof = generate_range_proof(0xdead_beef, None, &mut rng);
        let sum = proof
            .signature
            .Ci
            .iter()
            .map(|c| c.decompress().unwrap())
            .fold(EdwardsPoint::identity(), |acc, c| acc + c);
        assert_eq!(sum, proof.commitment);
    }

    #[test]
    fn secret_mul_base_matches_commitment_to_zero() {
        let mut rng = StdRng::seed_from_u64(13);
        let x = Scalar::random(&mut rng);
        assert_eq!(secret_mul_base(&x), commit(&x, 0));
        assert_eq!(secret_mul_base(&Scalar::ZERO), EdwardsPoint::identity());
    }

    #[test]
    fn encoding_layout() {
        let mut rng = StdRng::seed_from_u64(10);
        let sig = generate_range_proof(5, None, &mut rng).signature;
        let bytes = sig.to_bytes();

        assert_eq!(bytes.len(), 6176);
        assert_eq!(&bytes[..32], sig.Ci[0].as_bytes());
        assert_eq!(&bytes[64 * 32..65 * 32], &sig.asig.s0[0].to_bytes());
        assert_eq!(&bytes[128 * 32..129 * 32], &sig.asig.s1[0].to_bytes());
        assert_eq!(&bytes[192 * 32..], &sig.asig.ee.to_bytes());
        assert_eq!(RangeSignature::from_bytes(&bytes), Ok(sig));
    }

    #[test]
    fn decoding_rejects_bad_input() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut bytes = generate_range_proof(5, None, &mut rng).signature.to_bytes();

        assert_eq!(
            RangeSignature::from_bytes(&bytes[..RANGE_SIGNATURE_LENGTH - 1]),
            Err(Error::BytesLength {
                name: "RangeSignature",
                length: RANGE_SIGNATURE_LENGTH
            })
        );

        // set the high bit of ee
        bytes[RANGE_SIGNATURE_LENGTH - 1] |= 0x80;
        assert_eq!(RangeSignature::from_bytes(&bytes), Err(Error::ScalarFormat));
    }

    #[test]
    #[cfg(feature = "serde")]
    fn serde_bincode_range_signature_roundtrip() {
        let mut rng = StdRng::seed_from_u64(12);
        let sig = generate_range_proof(77, None, &mut rng).signature;
        let encoded = bincode::serialize(&sig).unwrap();
        // bincode prefixes byte strings with a u64 length
        assert_eq!(encoded.len(), 8 + RANGE_SIGNATURE_LENGTH);
        let decoded: RangeSignature = bincode::deserialize(&encoded).unwrap();
        assert_eq!(decoded, sig);
    }
}
