// -*- mode: rust; -*-
//
// This file is part of monero-dalek.
// See LICENSE for licensing information.

#![no_std]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]
#![warn(
    clippy::unwrap_used,
    missing_debug_implementations,
    rust_2018_idioms,
    unused_lifetimes,
    unused_qualifications
)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

//------------------------------------------------------------------------
// External dependencies:
//------------------------------------------------------------------------

#[cfg(any(feature = "std", test))]
#[macro_use]
extern crate std;

// Internal macros. Must come first!
#[macro_use]
pub(crate) mod macros;

//------------------------------------------------------------------------
// monero-dalek public modules
//------------------------------------------------------------------------

// Scalar arithmetic mod l = 2^252 + ..., the order of G and H
pub mod scalar;

// Keccak-256 and hashing to scalars
pub mod hash;

// Hashing to points of the prime-order subgroup
pub mod hash_to_curve;

// The T-less point models produced by the hash-to-curve map
pub mod curve_models;

// Monero's H and the range-proof width
pub mod constants;

// Pedersen commitments and key derivation
pub mod keys;

// Borromean range proofs
pub mod range_proof;

// Decoding errors
pub mod errors;

//------------------------------------------------------------------------
// monero-dalek internal modules
//------------------------------------------------------------------------

// Finite field arithmetic mod p = 2^255 - 19
pub(crate) mod field;

// The u32 limb arithmetic for field elements and scalars
pub(crate) mod backend;

// Debug-only validity checks
pub(crate) mod traits;

//------------------------------------------------------------------------
// Re-exports
//------------------------------------------------------------------------

pub use crate::errors::Error;
pub use crate::hash::hash_to_scalar;
pub use crate::hash_to_curve::hash_to_point;
pub use crate::range_proof::{generate_range_proof, RangeProof, RangeSignature};
pub use crate::scalar::Scalar;
