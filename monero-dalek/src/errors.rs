// -*- mode: rust; -*-
//
// This file is part of monero-dalek.
// See LICENSE for licensing information.

//! Errors which may occur when parsing scalars, points and range
//! signatures from their wire formats.

/// Errors raised while decoding.
#[derive(thiserror::Error, Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Error {
    /// A 32-byte string was not the encoding of a curve point.
    #[error("cannot decompress Edwards point")]
    PointDecompression,

    /// A 32-byte string was not the canonical encoding of a scalar.
    #[error("scalar is not canonically encoded")]
    ScalarFormat,

    /// An error in the length of bytes handed to a constructor.
    ///
    /// To use this, pass a string specifying the `name` of the type which is
    /// returning the error, and the `length` in bytes which its constructor
    /// expects.
    #[error("{name} must be {length} bytes in length")]
    BytesLength { name: &'static str, length: usize },
}

pub type Result<T> = core::result::Result<T, Error>;
