// -*- mode: rust; -*-
//
// This file is part of monero-dalek.
// See LICENSE for licensing information.

//! Arithmetic on scalars (integers mod the group order).
//!
//! Both the Ed25519 basepoint \\( G \\) and Monero's commitment
//! generator \\( H \\) have prime order
//! \\( \ell = 2\^{252} + 27742317777372353535851937790883648493 \\).
//!
//! This code is intended to be useful with both the Ed25519 group
//! operations of curve25519-dalek and the range proofs of this crate,
//! and so the `Scalar` struct provides the operations the Monero
//! protocols need: construction from a `u64`, from bytes reduced mod
//! \\(\ell\\) and from canonical bytes, the ring operations, constant-time
//! equality, ordering and zero tests, and the fused
//! \\( a - b c \\) used by Borromean signatures.
//!
//! Every `Scalar` holds a fully reduced value: all constructors reduce
//! or reject, and every operation reduces its result.  Comparisons can
//! therefore work limb by limb.
//!
//! ## Constructing a scalar
//!
//! ```
//! use monero_dalek::scalar::Scalar;
//!
//! let amount = Scalar::from(1_000_000u64);
//!
//! let l_plus_two_bytes = [
//!     0xef, 0xd3, 0xf5, 0x5c, 0x1a, 0x63, 0x12, 0x58, 0xd6, 0x9c, 0xf7, 0xa2, 0xde, 0xf9,
//!     0xde, 0x14, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
//!     0x00, 0x00, 0x00, 0x10,
//! ];
//! // l + 2 is reduced to 2 ...
//! let two = Scalar::from_bytes_mod_order(l_plus_two_bytes);
//! assert_eq!(two, Scalar::from(2u64));
//! // ... but is not a canonical encoding.
//! assert!(Scalar::from_canonical_bytes(l_plus_two_bytes).is_err());
//! assert_eq!(amount.to_bytes()[..3], [0x40, 0x42, 0x0f]);
//! ```

use core::cmp::Ordering;
use core::fmt::Debug;
use core::ops::Neg;
use core::ops::{Add, AddAssign};
use core::ops::{Mul, MulAssign};
use core::ops::{Sub, SubAssign};

use rand_core::CryptoRngCore;

use subtle::Choice;
use subtle::ConditionallySelectable;
use subtle::ConstantTimeEq;

use zeroize::Zeroize;

use crate::backend::u32::scalar::Scalar30;
use crate::errors::Error;

/// The `Scalar` struct holds an integer \\(s < \ell\\) which
/// represents an element of \\(\mathbb Z / \ell \mathbb Z\\).
#[derive(Copy, Clone)]
pub struct Scalar {
    /// The value, as nine 30-bit limbs.
    ///
    /// # Invariant
    ///
    /// The limbs always encode an integer below \\(\ell\\).
    pub(crate) inner: Scalar30,
}

impl Debug for Scalar {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Scalar{{\n\tbytes: {:?},\n}}", &self.to_bytes())
    }
}

impl Eq for Scalar {}
impl PartialEq for Scalar {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl ConstantTimeEq for Scalar {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.inner.ct_eq(&other.inner)
    }
}

impl ConditionallySelectable for Scalar {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Scalar {
            inner: Scalar30::conditional_select(&a.inner, &b.inner, choice),
        }
    }
}

impl<'a, 'b> Add<&'b Scalar> for &'a Scalar {
    type Output = Scalar;
    fn add(self, rhs: &'b Scalar) -> Scalar {
        Scalar {
            inner: Scalar30::add(&self.inner, &rhs.inner),
        }
    }
}

define_add_variants!(LHS = Scalar, RHS = Scalar, Output = Scalar);

impl<'b> AddAssign<&'b Scalar> for Scalar {
    fn add_assign(&mut self, rhs: &'b Scalar) {
        *self = &*self + rhs;
    }
}

define_add_assign_variants!(LHS = Scalar, RHS = Scalar);

impl<'a, 'b> Sub<&'b Scalar> for &'a Scalar {
    type Output = Scalar;
    fn sub(self, rhs: &'b Scalar) -> Scalar {
        Scalar {
            inner: Scalar30::sub(&self.inner, &rhs.inner),
        }
    }
}

define_sub_variants!(LHS = Scalar, RHS = Scalar, Output = Scalar);

impl<'b> SubAssign<&'b Scalar> for Scalar {
    fn sub_assign(&mut self, rhs: &'b Scalar) {
        *self = &*self - rhs;
    }
}

define_sub_assign_variants!(LHS = Scalar, RHS = Scalar);

impl<'a, 'b> Mul<&'b Scalar> for &'a Scalar {
    type Output = Scalar;
    fn mul(self, rhs: &'b Scalar) -> Scalar {
        Scalar {
            inner: Scalar30::mul(&self.inner, &rhs.inner),
        }
    }
}

define_mul_variants!(LHS = Scalar, RHS = Scalar, Output = Scalar);

impl<'b> MulAssign<&'b Scalar> for Scalar {
    fn mul_assign(&mut self, rhs: &'b Scalar) {
        *self = &*self * rhs;
    }
}

define_mul_assign_variants!(LHS = Scalar, RHS = Scalar);

impl<'a> Neg for &'a Scalar {
    type Output = Scalar;
    fn neg(self) -> Scalar {
        Scalar {
            inner: Scalar30::neg(&self.inner),
        }
    }
}

impl Neg for Scalar {
    type Output = Scalar;
    fn neg(self) -> Scalar {
        -&self
    }
}

impl From<u64> for Scalar {
    /// Construct a scalar from the given `u64`.
    ///
    /// # Inputs
    ///
    /// An `u64` to convert to a `Scalar`.
    ///
    /// # Returns
    ///
    /// A `Scalar` corresponding to the input `u64`.  Every `u64` is
    /// below \\(\ell\\), so no reduction takes place.
    ///
    /// # Example
    ///
    /// ```
    /// use monero_dalek::scalar::Scalar;
    ///
    /// let fourtytwo = Scalar::from(42u64);
    /// let six = Scalar::from(6u64);
    /// let seven = Scalar::from(7u64);
    ///
    /// assert!(fourtytwo == six * seven);
    /// ```
    fn from(x: u64) -> Scalar {
        Scalar {
            inner: Scalar30::from_u64(x),
        }
    }
}

impl Default for Scalar {
    fn default() -> Scalar {
        Scalar::ZERO
    }
}

impl Zeroize for Scalar {
    fn zeroize(&mut self) {
        self.inner.zeroize();
    }
}

#[cfg(feature = "serde")]
use serde::de::Visitor;
#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[cfg(feature = "serde")]
impl Serialize for Scalar {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeTuple;
        let mut tup = serializer.serialize_tuple(32)?;
        for byte in self.to_bytes().iter() {
            tup.serialize_element(byte)?;
        }
        tup.end()
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Scalar {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ScalarVisitor;

        impl<'de> Visitor<'de> for ScalarVisitor {
            type Value = Scalar;

            fn expecting(&self, formatter: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                formatter.write_str(
                    "a sequence of 32 bytes whose little-endian interpretation is less than the \
                    basepoint order ℓ",
                )
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Scalar, A::Error>
            where
                A: serde::de::SeqAccess<'de>,
            {
                let mut bytes = [0u8; 32];
                #[allow(clippy::needless_range_loop)]
                for i in 0..32 {
                    bytes[i] = seq
                        .next_element()?
                        .ok_or_else(|| serde::de::Error::invalid_length(i, &"expected 32 bytes"))?;
                }
                Scalar::from_canonical_bytes(bytes)
                    .map_err(|_| serde::de::Error::custom("scalar was not canonically encoded"))
            }
        }

        deserializer.deserialize_tuple(32, ScalarVisitor)
    }
}

impl Scalar {
    /// The scalar \\( 0 \\).
    pub const ZERO: Self = Scalar {
        inner: Scalar30::ZERO,
    };

    /// The scalar \\( 1 \\).
    pub const ONE: Self = Scalar {
        inner: Scalar30::ONE,
    };

    /// Construct a `Scalar` by reducing a 256-bit little-endian integer
    /// modulo the group order \\( \ell \\).
    pub fn from_bytes_mod_order(bytes: [u8; 32]) -> Scalar {
        Scalar {
            inner: Scalar30::from_bytes(&bytes),
        }
    }

    /// Construct a `Scalar` by reducing a 512-bit little-endian integer
    /// modulo the group order \\( \ell \\).
    pub fn from_bytes_mod_order_wide(input: &[u8; 64]) -> Scalar {
        Scalar {
            inner: Scalar30::from_bytes_wide(input),
        }
    }

    /// Attempt to construct a `Scalar` from a canonical byte
    /// representation.
    ///
    /// # Return
    ///
    /// - `Ok(s)`, where `s` is the `Scalar` corresponding to `bytes`,
    ///   if `bytes` is a canonical byte representation modulo the group
    ///   order \\( \ell \\);
    /// - `Err(Error::ScalarFormat)` if `bytes` is not a canonical byte
    ///   representation.
    pub fn from_canonical_bytes(bytes: [u8; 32]) -> Result<Scalar, Error> {
        let high_bit_unset = Choice::from(((bytes[31] >> 7) ^ 1) & 1);
        let candidate = Scalar::from_bytes_mod_order(bytes);
        let is_canonical = candidate.to_bytes().ct_eq(&bytes);

        if bool::from(high_bit_unset & is_canonical) {
            Ok(candidate)
        } else {
            Err(Error::ScalarFormat)
        }
    }

    /// Attempt to construct a `Scalar` from a byte slice, which must
    /// be exactly 32 bytes of canonical encoding.
    pub fn from_slice(bytes: &[u8]) -> Result<Scalar, Error> {
        let array: [u8; 32] = bytes.try_into().map_err(|_| Error::BytesLength {
            name: "Scalar",
            length: 32,
        })?;
        Scalar::from_canonical_bytes(array)
    }

    /// Return a `Scalar` chosen uniformly at random using a user-provided RNG.
    ///
    /// # Inputs
    ///
    /// * `rng`: any RNG which implements `CryptoRngCore`
    ///   (i.e. `CryptoRng` + `RngCore`) interface.
    ///
    /// # Returns
    ///
    /// A random scalar within \\(\mathbb{Z} / \ell\mathbb{Z}\\).
    ///
    /// # Example
    ///
    /// ```
    /// use monero_dalek::scalar::Scalar;
    ///
    /// use rand_core::OsRng;
    ///
    /// let mut csprng = OsRng;
    /// let a: Scalar = Scalar::random(&mut csprng);
    /// # let _ = a;
    /// ```
    pub fn random<R: CryptoRngCore + ?Sized>(rng: &mut R) -> Self {
        let mut scalar_bytes = [0u8; 64];
        rng.fill_bytes(&mut scalar_bytes);
        let s = Scalar::from_bytes_mod_order_wide(&scalar_bytes);
        scalar_bytes.zeroize();
        s
    }

    /// Convert this `Scalar` to its underlying sequence of bytes: the
    /// canonical 32-byte little-endian encoding.
    ///
    /// # Example
    ///
    /// ```
    /// use monero_dalek::scalar::Scalar;
    ///
    /// let s: Scalar = Scalar::ZERO;
    ///
    /// assert!(s.to_bytes() == [0u8; 32]);
    /// ```
    pub fn to_bytes(&self) -> [u8; 32] {
        self.inner.as_bytes()
    }

    /// Check whether this `Scalar` is zero, in constant time.
    pub fn is_zero(&self) -> Choice {
        self.inner.ct_eq(&Scalar30::ZERO)
    }

    /// Compare two scalars as integers in \\([0, \ell)\\).
    ///
    /// The comparison runs in constant time; only the resulting
    /// `Ordering` depends on the values.
    pub fn compare(&self, other: &Scalar) -> Ordering {
        Scalar30::ct_compare(&self.inner, &other.inner)
    }

    /// Compute \\( a - b c \bmod \ell \\) with a single reduction.
    ///
    /// This is the response equation of a Schnorr-style ring member,
    /// \\( s = \alpha - x c \\).
    ///
    /// # Example
    ///
    /// ```
    /// use monero_dalek::scalar::Scalar;
    ///
    /// let a = Scalar::from(100u64);
    /// let b = Scalar::from(7u64);
    /// let c = Scalar::from(11u64);
    ///
    /// assert_eq!(Scalar::mul_sub(&a, &b, &c), Scalar::from(23u64));
    /// assert_eq!(Scalar::mul_sub(&b, &a, &c), -Scalar::from(1093u64));
    /// ```
    pub fn mul_sub(a: &Scalar, b: &Scalar, c: &Scalar) -> Scalar {
        Scalar {
            inner: Scalar30::mul_sub(&a.inner, &b.inner, &c.inner),
        }
    }

    /// Convert into curve25519-dalek's scalar type, for use with its
    /// group operations.
    pub fn to_dalek(&self) -> curve25519_dalek::Scalar {
        curve25519_dalek::Scalar::from_bytes_mod_order(self.to_bytes())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    use std::string::String;

    use rand::rngs::OsRng;

    fn from_hex(s: &str) -> Scalar {
        let mut bytes = [0u8; 32];
        hex::decode_to_slice(s, &mut bytes).unwrap();
        Scalar::from_bytes_mod_order(bytes)
    }

    fn to_hex(s: &Scalar) -> String {
        hex::encode(s.to_bytes())
    }

    #[test]
    fn modl_add() {
        let tests = [
            [
                "0000000000000000000000000000000000000000000000000000000000000000",
                "0000000000000000000000000000000000000000000000000000000000000000",
                "0000000000000000000000000000000000000000000000000000000000000000",
            ],
            [
                "eef80ad5a9aad8b35b84f6a4eb3a7e2b222f403d455d8cdf40ad27e4cd5ae90a",
                "0000000000000000000000000000000000000000000000000000000000000000",
                "eef80ad5a9aad8b35b84f6a4eb3a7e2b222f403d455d8cdf40ad27e4cd5ae90a",
            ],
            [
                "0000000000000000000000000000000000000000000000000000000000000000",
                "eef80ad5a9aad8b35b84f6a4eb3a7e2b222f403d455d8cdf40ad27e4cd5ae90a",
                "eef80ad5a9aad8b35b84f6a4eb3a7e2b222f403d455d8cdf40ad27e4cd5ae90a",
            ],
            [
                "0100000000000000000000000000000000000000000000000000000000000000",
                "0200000000000000000000000000000000000000000000000000000000000000",
                "0300000000000000000000000000000000000000000000000000000000000000",
            ],
            [
                "e3d3f55c1a631258d69cf7a2def9de1400000000000000000000000000000010",
                "0a00000000000000000000000000000000000000000000000000000000000000",
                "0000000000000000000000000000000000000000000000000000000000000000",
            ],
            [
                "f7bb3bf42b3e58e2edd06f173fc7bfbc7aaf657217946b75648447101136aa08",
                "3c16b013109cc27ff39805be2abe04ba4cd6a8526a1d3023047693e950936c06",
                "33d2eb073cda1a62e16975d56985c476c7850ec581b19b9868fadaf961c9160f",
            ],
        ];

        for [a, b, c] in tests.iter() {
            assert_eq!(to_hex(&(from_hex(a) + from_hex(b))), *c);
        }
    }

    #[test]
    fn modl_neg() {
        let tests = [
            [
                "05d0f55c1a631258d69cf7a2def9de1400000000000000000000000000000010",
                "e803000000000000000000000000000000000000000000000000000000000000",
            ],
            [
                "4d4df45c1a631258d69cf7a2def9de1400000000000000000000000000000010",
                "a086010000000000000000000000000000000000000000000000000000000000",
            ],
            [
                "25958944a1b7d4073975ca48996a1d740d0ed98ceec366760c5358da681e9608",
                "c83e6c1879ab3d509d272d5a458fc1a0f2f12673113c9989f3aca72597e16907",
            ],
            [
                "0100000000000000000000000000000000000000000000000000000000000000",
                "ecd3f55c1a631258d69cf7a2def9de1400000000000000000000000000000010",
            ],
            [
                "ecd3f55c1a631258d69cf7a2def9de1400000000000000000000000000000010",
                "0100000000000000000000000000000000000000000000000000000000000000",
            ],
            [
                "0000000000000000000000000000000000000000000000000000000000000000",
                "0000000000000000000000000000000000000000000000000000000000000000",
            ],
        ];

        for [a, b] in tests.iter() {
            assert_eq!(to_hex(&-from_hex(a)), *b);
        }
    }

    #[test]
    fn modl_sub() {
        let tests = [
            [
                "0000000000000000000000000000000000000000000000000000000000000000",
                "0000000000000000000000000000000000000000000000000000000000000000",
                "0000000000000000000000000000000000000000000000000000000000000000",
            ],
            [
                "eef80ad5a9aad8b35b84f6a4eb3a7e2b222f403d455d8cdf40ad27e4cd5ae90a",
                "53732f60e51ee3a48d21d2d526548c0dadbb79a185678fd7710613d0e76aad0c",
                "8859d1d1deee0767a4ff1b72a3e0d0327573c69bbff5fc07cfa61414e6ef3b0e",
            ],
            [
                "9d91e26dbe7a14fdca9f5b20d13e828dc8c1ffe03fe90136a6bba507436ce500",
                "9ca406705ccce65eb8cbf63706d3df09fcc67216c0dc3990270731aacbb2e607",
                "eec0d15a7c1140f6e8705c8ba9658198ccfa8cca7f0cc8a57eb4745d77b9fe08",
            ],
            [
                "eef80ad5a9aad8b35b84f6a4eb3a7e2b222f403d455d8cdf40ad27e4cd5ae90a",
                "0000000000000000000000000000000000000000000000000000000000000000",
                "eef80ad5a9aad8b35b84f6a4eb3a7e2b222f403d455d8cdf40ad27e4cd5ae90a",
            ],
            [
                "0000000000000000000000000000000000000000000000000000000000000000",
                "39897fbebf137a34572b014b0638ac0186d17874e3cc142ebdfe24327f5b8509",
                "b44a769e5a4f98237f71f657d8c132137a2e878b1c33ebd14201dbcd80a47a06",
            ],
            [
                "0200000000000000000000000000000000000000000000000000000000000000",
                "e3d3f55c1a631258d69cf7a2def9de1400000000000000000000000000000010",
                "0c00000000000000000000000000000000000000000000000000000000000000",
            ],
            [
                "e3d3f55c1a631258d69cf7a2def9de1400000000000000000000000000000010",
                "0800000000000000000000000000000000000000000000000000000000000000",
                "dbd3f55c1a631258d69cf7a2def9de1400000000000000000000000000000010",
            ],
            [
                "ecd3f55c1a631258d69cf7a2def9de1400000000000000000000000000000010",
                "0000000000000000000000000000000000000000000000000000000000000000",
                "ecd3f55c1a631258d69cf7a2def9de1400000000000000000000000000000010",
            ],
            [
                "0000000000000000000000000000000000000000000000000000000000000000",
                "ecd3f55c1a631258d69cf7a2def9de1400000000000000000000000000000010",
                "0100000000000000000000000000000000000000000000000000000000000000",
            ],
            [
                "0000000000000000000000000000000000000000000000000000000000000000",
                "0000000000000000000000000000000000000000000000000000000000000010",
                "edd3f55c1a631258d69cf7a2def9de1400000000000000000000000000000000",
            ],
            [
                "0000000000000000000000000000000000000000000000000000000000000000",
                "ffffff3f00000000000000000000000000000000000000000000000000000010",
                "eed3f51c1a631258d69cf7a2def9de1400000000000000000000000000000000",
            ],
            [
                "0000000000000000000000000000000000000000000000000000000000000000",
                "edd3f55c1a631258d69cf7a2def9de1400000000000000000000000000000000",
                "0000000000000000000000000000000000000000000000000000000000000010",
            ],
            [
                "0000000000000000000000000000000000000000000000000000000000000000",
                "e75f947f11d49d25a137fac8757538a980dec23811235cf63c48ee6bc6e4ed03",
                "067461dd088f74323565fdd96884a66b7f213dc7eedca309c3b71194391b120c",
            ],
            [
                "0000000000000000000000000000000000000000000000000000000000000000",
                "ecd3f55c1a631258d69cf7a2def9de140000000000000000000000000000ff0f",
                "0100000000000000000000000000000000000000000000000000000000000100",
            ],
            [
                "0000000000000000000000000000000000000000000000000000000000000000",
                "edd3f55c1a631258d69cf7a2def9de140000000000000000000004000000ff0f",
                "0000000000000000000000000000000000000000000000000000fcffffff0000",
            ],
            [
                "0000000000000000000000000000000000000000000000000000000000000000",
                "edd3f55c1a631258d69cf7a2def9de150000c0ffffffffffffffffffffffff0f",
                "000000000000000000000000000000ffffff3f00000000000000000000000000",
            ],
            [
                "0000000000000000000000000000000000000000000000000000000000000000",
                "edd3f55c1a631258d69cf7a2def9de1200000000000000000000000000000110",
                "edd3f55c1a631258d69cf7a2def9de160000000000000000000000000000ff0f",
            ],
            [
                "0000000000000000000000000000000000000000000000000000000000000000",
                "edd3f55c1a631258d69cf7a2def9de1300000000000000000000000000000010",
                "0000000000000000000000000000000100000000000000000000000000000000",
            ],
        ];

        for [a, b, c] in tests.iter() {
            assert_eq!(to_hex(&(from_hex(a) - from_hex(b))), *c);
        }
    }

    #[test]
    fn from_u64_is_little_endian() {
        let s = Scalar::from(0x0102030405060708u64);
        let mut expected = [0u8; 32];
        expected[..8].copy_from_slice(&[8, 7, 6, 5, 4, 3, 2, 1]);
        assert_eq!(s.to_bytes(), expected);
    }

    #[test]
    fn canonical_decoding() {
        // l - 1 is the largest canonical encoding
        let l_minus_one = -Scalar::ONE;
        assert_eq!(
            Scalar::from_canonical_bytes(l_minus_one.to_bytes()),
            Ok(l_minus_one)
        );

        // l itself is not canonical
        let mut l_bytes = l_minus_one.to_bytes();
        l_bytes[0] += 1;
        assert_eq!(Scalar::from_canonical_bytes(l_bytes), Err(Error::ScalarFormat));

        // nor is anything with the high bit set
        let mut high_bit = [0u8; 32];
        high_bit[31] = 0x80;
        assert_eq!(Scalar::from_canonical_bytes(high_bit), Err(Error::ScalarFormat));
    }

    #[test]
    fn from_slice_checks_length() {
        assert_eq!(
            Scalar::from_slice(&[0u8; 31]),
            Err(Error::BytesLength {
                name: "Scalar",
                length: 32
            })
        );
        assert_eq!(Scalar::from_slice(&[0u8; 32]), Ok(Scalar::ZERO));
    }

    #[test]
    fn is_zero_and_equality() {
        assert!(bool::from(Scalar::ZERO.is_zero()));
        assert!(!bool::from(Scalar::ONE.is_zero()));
        assert!(bool::from((Scalar::ONE - Scalar::ONE).is_zero()));
        assert_eq!(Scalar::from(5u64), Scalar::from(2u64) + Scalar::from(3u64));
        assert_ne!(Scalar::from(5u64), Scalar::from(6u64));
    }

    #[test]
    fn compare() {
        let small = Scalar::from(3u64);
        let large = -Scalar::ONE;
        assert_eq!(small.compare(&large), Ordering::Less);
        assert_eq!(large.compare(&small), Ordering::Greater);
        assert_eq!(large.compare(&large), Ordering::Equal);
        // chunks below the top differ, top chunks equal
        let a = Scalar::from(0x1_0000u64);
        let b = Scalar::from(0xffffu64);
        assert_eq!(a.compare(&b), Ordering::Greater);
    }

    #[test]
    fn mul_sub_matches_separate_operations() {
        let mut rng = OsRng;
        for _ in 0..100 {
            let a = Scalar::random(&mut rng);
            let b = Scalar::random(&mut rng);
            let c = Scalar::random(&mut rng);
            assert_eq!(Scalar::mul_sub(&a, &b, &c), a - b * c);
        }
    }

    #[test]
    fn to_dalek_agrees_on_arithmetic() {
        let mut rng = OsRng;
        let a = Scalar::random(&mut rng);
        let b = Scalar::random(&mut rng);
        assert_eq!((a * b).to_dalek(), a.to_dalek() * b.to_dalek());
        assert_eq!((a + b).to_dalek(), a.to_dalek() + b.to_dalek());
        assert_eq!((-a).to_dalek(), -a.to_dalek());
    }

    #[test]
    fn wide_reduction_agrees_with_dalek() {
        let mut bytes = [0u8; 64];
        for (i, byte) in bytes.iter_mut().enumerate() {
            *byte = (i as u8).wrapping_mul(37).wrapping_add(11);
        }
        let ours = Scalar::from_bytes_mod_order_wide(&bytes);
        let theirs = curve25519_dalek::Scalar::from_bytes_mod_order_wide(&bytes);
        assert_eq!(ours.to_bytes(), theirs.to_bytes());
    }

    #[test]
    fn zeroize_clears() {
        let mut s = Scalar::from(123u64);
        s.zeroize();
        assert_eq!(s, Scalar::ZERO);
    }

    #[test]
    #[cfg(feature = "serde")]
    fn serde_bincode_scalar_roundtrip() {
        let x = Scalar::from(0xdead_beefu64) * Scalar::from(0xcafe_babeu64);
        let encoded = bincode::serialize(&x).unwrap();
        let parsed: Scalar = bincode::deserialize(&encoded).unwrap();
        assert_eq!(parsed, x);

        // Check that the encoding is 32 bytes exactly
        assert_eq!(encoded.len(), 32);

        // Check that the encoding itself matches the usual one
        assert_eq!(x, bincode::deserialize(&x.to_bytes()).unwrap());
    }
}
