// -*- mode: rust; -*-
//
// This file is part of monero-dalek.
// See LICENSE for licensing information.

//! The `u32` backend uses `u32`s and a `(u32, u32) -> u64` multiplier.
//!
//! Field elements use the radix \\(2\^{25.5}\\) layout of ref10 and
//! ed25519-donna; scalars use nine \\(30\\)-bit limbs with Barrett
//! reduction.

pub(crate) mod field;

pub(crate) mod scalar;

pub(crate) mod constants;
