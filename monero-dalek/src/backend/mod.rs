// -*- mode: rust; -*-
//
// This file is part of monero-dalek.
// See LICENSE for licensing information.

//! Pluggable implementations for the arithmetic this crate owns.
//!
//! The group law itself comes from curve25519-dalek.  What lives here
//! is the field and scalar arithmetic behind the hash-to-curve map and
//! the range proof, in the limb layouts of the Monero reference code:
//!
//! * `u32::field`, with ten limbs of \\(2\^{25.5}\\) radix;
//! * `u32::scalar`, with nine limbs of \\(30\\) bits;
//! * `u32::constants`, their constant tables.

pub(crate) mod u32;
