// -*- mode: rust; -*-
//
// This file is part of monero-dalek.
// See LICENSE for licensing information.

//! Field arithmetic modulo \\(p = 2\^{255} - 19\\), using \\(32\\)-bit
//! limbs with \\(64\\)-bit products.
//!
//! This is the limb layout of the Monero reference code (and of
//! curve25519-donna and ref10), which lets the constant tables used by
//! the hash-to-curve map be written down limb for limb.

use core::fmt::Debug;
use core::ops::Neg;
use core::ops::{Add, AddAssign};
use core::ops::{Mul, MulAssign};
use core::ops::{Sub, SubAssign};

use subtle::Choice;
use subtle::ConditionallySelectable;

use zeroize::Zeroize;

/// A `FieldElement2625` represents an element of the field
/// \\( \mathbb Z / (2\^{255} - 19)\\).
///
/// The element is stored in radix \\(2\^{25.5}\\) as ten `u32`s, so that
/// limbs \\(x\_0, \ldots, x\_9\\) represent the integer
/// $$
/// x\_0 + x\_1 2\^{26} + x\_2 2\^{51} + x\_3 2\^{77} + x\_4 2\^{102} +
/// x\_5 2\^{128} + x\_6 2\^{153} + x\_7 2\^{179} + x\_8 2\^{204} + x\_9 2\^{230}.
/// $$
///
/// After `reduce`, even limbs are below \\(2\^{26}\\) and odd limbs are
/// below \\(2\^{25}\\), up to a small excess in limb 1.  Multiplication and
/// squaring accept the sum of two reduced elements as either operand.
#[derive(Copy, Clone)]
pub(crate) struct FieldElement2625(pub(crate) [u32; 10]);

impl Debug for FieldElement2625 {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "FieldElement2625({:?})", &self.0[..])
    }
}

impl Zeroize for FieldElement2625 {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

impl<'b> AddAssign<&'b FieldElement2625> for FieldElement2625 {
    fn add_assign(&mut self, rhs: &'b FieldElement2625) {
        for i in 0..10 {
            self.0[i] += rhs.0[i];
        }
    }
}

impl<'a, 'b> Add<&'b FieldElement2625> for &'a FieldElement2625 {
    type Output = FieldElement2625;
    fn add(self, rhs: &'b FieldElement2625) -> FieldElement2625 {
        let mut output = *self;
        output += rhs;
        output
    }
}

impl<'b> SubAssign<&'b FieldElement2625> for FieldElement2625 {
    #[rustfmt::skip] // keep alignment of bias terms
    fn sub_assign(&mut self, rhs: &'b FieldElement2625) {
        // Add 16p to self before subtracting, so that no limb underflows
        // as long as rhs's limbs are below 2^29.
        let b = &rhs.0;
        self.0 = FieldElement2625::reduce([
            ((self.0[0] + (0x3ffffed << 4)) - b[0]) as u64,
            ((self.0[1] + (0x1ffffff << 4)) - b[1]) as u64,
            ((self.0[2] + (0x3ffffff << 4)) - b[2]) as u64,
            ((self.0[3] + (0x1ffffff << 4)) - b[3]) as u64,
            ((self.0[4] + (0x3ffffff << 4)) - b[4]) as u64,
            ((self.0[5] + (0x1ffffff << 4)) - b[5]) as u64,
            ((self.0[6] + (0x3ffffff << 4)) - b[6]) as u64,
            ((self.0[7] + (0x1ffffff << 4)) - b[7]) as u64,
            ((self.0[8] + (0x3ffffff << 4)) - b[8]) as u64,
            ((self.0[9] + (0x1ffffff << 4)) - b[9]) as u64,
        ])
        .0;
    }
}

impl<'a, 'b> Sub<&'b FieldElement2625> for &'a FieldElement2625 {
    type Output = FieldElement2625;
    fn sub(self, rhs: &'b FieldElement2625) -> FieldElement2625 {
        let mut output = *self;
        output -= rhs;
        output
    }
}

impl<'b> MulAssign<&'b FieldElement2625> for FieldElement2625 {
    fn mul_assign(&mut self, rhs: &'b FieldElement2625) {
        let result = &*self * rhs;
        self.0 = result.0;
    }
}

impl<'a, 'b> Mul<&'b FieldElement2625> for &'a FieldElement2625 {
    type Output = FieldElement2625;

    #[rustfmt::skip] // keep alignment of z* calculations
    fn mul(self, rhs: &'b FieldElement2625) -> FieldElement2625 {
        /// Helper function to multiply two 32-bit integers with 64 bits
        /// of output.
        #[inline(always)]
        fn m(x: u32, y: u32) -> u64 {
            (x as u64) * (y as u64)
        }

        // Alias self, rhs for more readable formulas
        let x: &[u32; 10] = &self.0;
        let y: &[u32; 10] = &rhs.0;

        // Precompute 19 times the limbs of y that wrap around, and twice
        // the odd limbs of x, whose products with odd limbs of y carry an
        // extra factor of two from the half-bit radix.
        let y1_19 = 19 * y[1];
        let y2_19 = 19 * y[2];
        let y3_19 = 19 * y[3];
        let y4_19 = 19 * y[4];
        let y5_19 = 19 * y[5];
        let y6_19 = 19 * y[6];
        let y7_19 = 19 * y[7];
        let y8_19 = 19 * y[8];
        let y9_19 = 19 * y[9];

        let x1_2 = 2 * x[1];
        let x3_2 = 2 * x[3];
        let x5_2 = 2 * x[5];
        let x7_2 = 2 * x[7];
        let x9_2 = 2 * x[9];

        let z0 = m(x[0], y[0]) + m(x1_2, y9_19) + m(x[2], y8_19) + m(x3_2, y7_19) + m(x[4], y6_19) + m(x5_2, y5_19) + m(x[6], y4_19) + m(x7_2, y3_19) + m(x[8], y2_19) + m(x9_2, y1_19);
        let z1 = m(x[0], y[1]) + m(x[1], y[0])  + m(x[2], y9_19) + m(x[3], y8_19) + m(x[4], y7_19) + m(x[5], y6_19) + m(x[6], y5_19) + m(x[7], y4_19) + m(x[8], y3_19) + m(x[9], y2_19);
        let z2 = m(x[0], y[2]) + m(x1_2, y[1])  + m(x[2], y[0])  + m(x3_2, y9_19) + m(x[4], y8_19) + m(x5_2, y7_19) + m(x[6], y6_19) + m(x7_2, y5_19) + m(x[8], y4_19) + m(x9_2, y3_19);
        let z3 = m(x[0], y[3]) + m(x[1], y[2])  + m(x[2], y[1])  + m(x[3], y[0])  + m(x[4], y9_19) + m(x[5], y8_19) + m(x[6], y7_19) + m(x[7], y6_19) + m(x[8], y5_19) + m(x[9], y4_19);
        let z4 = m(x[0], y[4]) + m(x1_2, y[3])  + m(x[2], y[2])  + m(x3_2, y[1])  + m(x[4], y[0])  + m(x5_2, y9_19) + m(x[6], y8_19) + m(x7_2, y7_19) + m(x[8], y6_19) + m(x9_2, y5_19);
        let z5 = m(x[0], y[5]) + m(x[1], y[4])  + m(x[2], y[3])  + m(x[3], y[2])  + m(x[4], y[1])  + m(x[5], y[0])  + m(x[6], y9_19) + m(x[7], y8_19) + m(x[8], y7_19) + m(x[9], y6_19);
        let z6 = m(x[0], y[6]) + m(x1_2, y[5])  + m(x[2], y[4])  + m(x3_2, y[3])  + m(x[4], y[2])  + m(x5_2, y[1])  + m(x[6], y[0])  + m(x7_2, y9_19) + m(x[8], y8_19) + m(x9_2, y7_19);
        let z7 = m(x[0], y[7]) + m(x[1], y[6])  + m(x[2], y[5])  + m(x[3], y[4])  + m(x[4], y[3])  + m(x[5], y[2])  + m(x[6], y[1])  + m(x[7], y[0])  + m(x[8], y9_19) + m(x[9], y8_19);
        let z8 = m(x[0], y[8]) + m(x1_2, y[7])  + m(x[2], y[6])  + m(x3_2, y[5])  + m(x[4], y[4])  + m(x5_2, y[3])  + m(x[6], y[2])  + m(x7_2, y[1])  + m(x[8], y[0])  + m(x9_2, y9_19);
        let z9 = m(x[0], y[9]) + m(x[1], y[8])  + m(x[2], y[7])  + m(x[3], y[6])  + m(x[4], y[5])  + m(x[5], y[4])  + m(x[6], y[3])  + m(x[7], y[2])  + m(x[8], y[1])  + m(x[9], y[0]);

        FieldElement2625::reduce([z0, z1, z2, z3, z4, z5, z6, z7, z8, z9])
    }
}

impl<'a> Neg for &'a FieldElement2625 {
    type Output = FieldElement2625;
    fn neg(self) -> FieldElement2625 {
        let mut output = *self;
        output.negate();
        output
    }
}

impl ConditionallySelectable for FieldElement2625 {
    fn conditional_select(
        a: &FieldElement2625,
        b: &FieldElement2625,
        choice: Choice,
    ) -> FieldElement2625 {
        let mut limbs = [0u32; 10];
        for i in 0..10 {
            limbs[i] = u32::conditional_select(&a.0[i], &b.0[i], choice);
        }
        FieldElement2625(limbs)
    }

    fn conditional_assign(&mut self, other: &FieldElement2625, choice: Choice) {
        for i in 0..10 {
            self.0[i].conditional_assign(&other.0[i], choice);
        }
    }
}

impl FieldElement2625 {
    /// The field element \\( 0 \\).
    pub(crate) const ZERO: FieldElement2625 = FieldElement2625([0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
    /// The field element \\( 1 \\).
    pub(crate) const ONE: FieldElement2625 = FieldElement2625([1, 0, 0, 0, 0, 0, 0, 0, 0, 0]);

    /// Invert the sign of this field element.
    #[rustfmt::skip] // keep alignment of bias terms
    pub(crate) fn negate(&mut self) {
        // Compute -b as 16p - b.
        let neg = FieldElement2625::reduce([
            ((0x3ffffed << 4) - self.0[0]) as u64,
            ((0x1ffffff << 4) - self.0[1]) as u64,
            ((0x3ffffff << 4) - self.0[2]) as u64,
            ((0x1ffffff << 4) - self.0[3]) as u64,
            ((0x3ffffff << 4) - self.0[4]) as u64,
            ((0x1ffffff << 4) - self.0[5]) as u64,
            ((0x3ffffff << 4) - self.0[6]) as u64,
            ((0x1ffffff << 4) - self.0[7]) as u64,
            ((0x3ffffff << 4) - self.0[8]) as u64,
            ((0x1ffffff << 4) - self.0[9]) as u64,
        ]);
        self.0 = neg.0;
    }

    /// Given `u64` coefficients of unreduced limbs, carry them back into
    /// the `u32` radix \\(2\^{25.5}\\) representation.
    ///
    /// Carries are interleaved in two chains, \\(0 \to 4\\) and
    /// \\(5 \to 9\\), so that each limb is carried only once before the
    /// wraparound from limb 9 into limb 0 by a factor of \\(19\\).
    #[inline(always)]
    #[rustfmt::skip] // keep alignment of carry chain
    fn reduce(mut z: [u64; 10]) -> FieldElement2625 {
        const LOW_25_BITS: u64 = (1 << 25) - 1;
        const LOW_26_BITS: u64 = (1 << 26) - 1;

        /// Carry the value from limb i = 0..8 to limb i+1
        #[inline(always)]
        fn carry(z: &mut [u64; 10], i: usize) {
            debug_assert!(i < 9);
            if i % 2 == 0 {
                // Even limbs have 26 bits
                z[i + 1] += z[i] >> 26;
                z[i] &= LOW_26_BITS;
            } else {
                // Odd limbs have 25 bits
                z[i + 1] += z[i] >> 25;
                z[i] &= LOW_25_BITS;
            }
        }

        carry(&mut z, 0); carry(&mut z, 4);
        carry(&mut z, 1); carry(&mut z, 5);
        carry(&mut z, 2); carry(&mut z, 6);
        carry(&mut z, 3); carry(&mut z, 7);
        // Since z[3] < 2^64, c < 2^(64-25) = 2^39,
        // so    z[4] < 2^26 + 2^39 < 2^39.0002
        carry(&mut z, 4); carry(&mut z, 8);
        // Now z[4] < 2^26
        // and z[5] < 2^25 + 2^13.0002 < 2^25.0004 (good enough)

        // Last carry has a multiplication by 19:
        z[0] += 19 * (z[9] >> 25);
        z[9] &= LOW_25_BITS;

        // Since z[9] < 2^64, c < 2^(64-25) = 2^39,
        //    so z[0] + 19*c < 2^26 + 2^43.248 < 2^43.249.
        carry(&mut z, 0);
        // Now z[1] < 2^25 - 2^(43.249 - 26)
        //          < 2^25.007 (good enough)
        // and we're done.

        FieldElement2625([
            z[0] as u32, z[1] as u32, z[2] as u32, z[3] as u32, z[4] as u32,
            z[5] as u32, z[6] as u32, z[7] as u32, z[8] as u32, z[9] as u32,
        ])
    }

    /// Load a `FieldElement2625` from the low 255 bits of a 256-bit
    /// input.  The high bit is ignored.
    #[cfg(test)]
    #[rustfmt::skip] // keep alignment of h[*] values
    pub(crate) fn from_bytes(data: &[u8; 32]) -> FieldElement2625 {
        const LOW_23_BITS: u64 = (1 << 23) - 1;

        let mut h = [0u64; 10];
        h[0] =  load4(&data[ 0..]);
        h[1] =  load3(&data[ 4..]) << 6;
        h[2] =  load3(&data[ 7..]) << 5;
        h[3] =  load3(&data[10..]) << 3;
        h[4] =  load3(&data[13..]) << 2;
        h[5] =  load4(&data[16..]);
        h[6] =  load3(&data[20..]) << 7;
        h[7] =  load3(&data[23..]) << 5;
        h[8] =  load3(&data[26..]) << 4;
        h[9] = (load3(&data[29..]) & LOW_23_BITS) << 2;

        FieldElement2625::reduce(h)
    }

    /// Interpret all 256 bits of a hash digest as an integer and fold it
    /// into the field.
    ///
    /// The eight little-endian words are split straight into limbs, and
    /// bit 255 (the only bit that overflows limb 9) is folded back into
    /// limb 0 as \\(19\\), once.  The result is a valid, not necessarily
    /// canonical, representative of the digest modulo \\(p\\).
    #[rustfmt::skip] // keep alignment of out[*] values
    pub(crate) fn expand_reduce(data: &[u8; 32]) -> FieldElement2625 {
        const LOW_25_BITS: u64 = (1 << 25) - 1;
        const LOW_26_BITS: u64 = (1 << 26) - 1;

        let mut x = [0u64; 8];
        for i in 0..8 {
            x[i] = load4(&data[4 * i..]);
        }

        let mut out = [0u64; 10];
        out[0] =   x[0]                         & LOW_26_BITS;
        out[1] = (((x[1] << 32) | x[0]) >> 26)  & LOW_25_BITS;
        out[2] = (((x[2] << 32) | x[1]) >> 19)  & LOW_26_BITS;
        out[3] = (((x[3] << 32) | x[2]) >> 13)  & LOW_25_BITS;
        out[4] =  (x[3] >> 6)                   & LOW_26_BITS;
        out[5] =   x[4]                         & LOW_25_BITS;
        out[6] = (((x[5] << 32) | x[4]) >> 25)  & LOW_26_BITS;
        out[7] = (((x[6] << 32) | x[5]) >> 19)  & LOW_25_BITS;
        out[8] = (((x[7] << 32) | x[6]) >> 12)  & LOW_26_BITS;
        out[9] =   x[7] >> 6;

        out[0] += 19 * (out[9] >> 25);
        out[9] &= LOW_25_BITS;

        FieldElement2625([
            out[0] as u32, out[1] as u32, out[2] as u32, out[3] as u32, out[4] as u32,
            out[5] as u32, out[6] as u32, out[7] as u32, out[8] as u32, out[9] as u32,
        ])
    }

    /// Serialize this `FieldElement2625` to a 32-byte array.  The
    /// encoding is canonical.
    pub(crate) fn as_bytes(&self) -> [u8; 32] {
        let inp = &self.0;
        // Reduce the value represented by `in` to the range [0,2*p)
        let mut h: [u32; 10] = FieldElement2625::reduce([
            inp[0] as u64, inp[1] as u64, inp[2] as u64, inp[3] as u64, inp[4] as u64,
            inp[5] as u64, inp[6] as u64, inp[7] as u64, inp[8] as u64, inp[9] as u64,
        ])
        .0;

        // Compute q = 1 if h >= p, else q = 0, by propagating the
        // carry of h + 19 up through the limbs.
        let mut q: u32 = (h[0] + 19) >> 26;
        q = (h[1] + q) >> 25;
        q = (h[2] + q) >> 26;
        q = (h[3] + q) >> 25;
        q = (h[4] + q) >> 26;
        q = (h[5] + q) >> 25;
        q = (h[6] + q) >> 26;
        q = (h[7] + q) >> 25;
        q = (h[8] + q) >> 26;
        q = (h[9] + q) >> 25;

        debug_assert!(q == 0 || q == 1);

        // Now we can compute r as r = h - pq = r - (2^255-19)q = r + 19q - 2^255q
        const LOW_25_BITS: u32 = (1 << 25) - 1;
        const LOW_26_BITS: u32 = (1 << 26) - 1;

        h[0] += 19 * q;

        // Now carry the result to compute r + 19q...
        for i in 0..9 {
            if i % 2 == 0 {
                h[i + 1] += h[i] >> 26;
                h[i] &= LOW_26_BITS;
            } else {
                h[i + 1] += h[i] >> 25;
                h[i] &= LOW_25_BITS;
            }
        }
        // ... but instead of carrying the value
        // (h[9] >> 25) = q*2^255 into another limb,
        // discard it, subtracting the value from h.
        debug_assert!((h[9] >> 25) == 0 || (h[9] >> 25) == 1);
        h[9] &= LOW_25_BITS;

        // Pack the 255 bits of the limbs into bytes, least significant
        // first.
        let mut s = [0u8; 32];
        let mut acc: u64 = 0;
        let mut bits: u32 = 0;
        let mut k = 0;
        for (i, limb) in h.iter().enumerate() {
            acc |= (*limb as u64) << bits;
            bits += if i % 2 == 0 { 26 } else { 25 };
            while bits >= 8 {
                s[k] = acc as u8;
                acc >>= 8;
                bits -= 8;
                k += 1;
            }
        }
        s[31] = acc as u8;

        s
    }

    /// Compute `self^2`, before reduction.
    #[rustfmt::skip] // keep alignment of h[*] calculations
    fn square_inner(&self) -> [u64; 10] {
        #[inline(always)]
        fn m(x: u32, y: u32) -> u64 {
            (x as u64) * (y as u64)
        }

        let f = &self.0;

        let f0_2 = 2 * f[0];
        let f1_2 = 2 * f[1];
        let f2_2 = 2 * f[2];
        let f3_2 = 2 * f[3];
        let f4_2 = 2 * f[4];
        let f5_2 = 2 * f[5];
        let f6_2 = 2 * f[6];
        let f7_2 = 2 * f[7];

        let f5_38 = 38 * f[5];
        let f6_19 = 19 * f[6];
        let f7_38 = 38 * f[7];
        let f8_19 = 19 * f[8];
        let f9_38 = 38 * f[9];

        let mut h = [0u64; 10];
        h[0] = m(f[0], f[0]) + m(f1_2, f9_38) + m(f2_2, f8_19) + m(f3_2, f7_38) + m(f4_2, f6_19) + m(f[5], f5_38);
        h[1] = m(f0_2, f[1]) + m(f[2], f9_38) + m(f3_2, f8_19) + m(f[4], f7_38) + m(f5_2, f6_19);
        h[2] = m(f0_2, f[2]) + m(f1_2, f[1])  + m(f3_2, f9_38) + m(f4_2, f8_19) + m(f5_2, f7_38) + m(f[6], f6_19);
        h[3] = m(f0_2, f[3]) + m(f1_2, f[2])  + m(f[4], f9_38) + m(f5_2, f8_19) + m(f[6], f7_38);
        h[4] = m(f0_2, f[4]) + m(f1_2, f3_2)  + m(f[2], f[2])  + m(f5_2, f9_38) + m(f6_2, f8_19) + m(f[7], f7_38);
        h[5] = m(f0_2, f[5]) + m(f1_2, f[4])  + m(f2_2, f[3])  + m(f[6], f9_38) + m(f7_2, f8_19);
        h[6] = m(f0_2, f[6]) + m(f1_2, f5_2)  + m(f2_2, f[4])  + m(f3_2, f[3])  + m(f7_2, f9_38) + m(f[8], f8_19);
        h[7] = m(f0_2, f[7]) + m(f1_2, f[6])  + m(f2_2, f[5])  + m(f3_2, f[4])  + m(f[8], f9_38);
        h[8] = m(f0_2, f[8]) + m(f1_2, f7_2)  + m(f2_2, f[6])  + m(f3_2, f5_2)  + m(f[4], f[4])  + m(f[9], f9_38);
        h[9] = m(f0_2, f[9]) + m(f1_2, f[8])  + m(f2_2, f[7])  + m(f3_2, f[6])  + m(f4_2, f[5]);

        h
    }

    /// Compute `self^2`.
    pub(crate) fn square(&self) -> FieldElement2625 {
        FieldElement2625::reduce(self.square_inner())
    }

    /// Compute `2*self^2`.
    pub(crate) fn square2(&self) -> FieldElement2625 {
        let mut coeffs = self.square_inner();
        for coeff in coeffs.iter_mut() {
            *coeff += *coeff;
        }
        FieldElement2625::reduce(coeffs)
    }

    /// Given `k > 0`, return `self^(2^k)`.
    pub(crate) fn pow2k(&self, k: u32) -> FieldElement2625 {
        debug_assert!(k > 0);
        let mut z = self.square();
        for _ in 1..k {
            z = z.square();
        }
        z
    }
}

#[cfg(test)]
#[inline(always)]
fn load3(input: &[u8]) -> u64 {
    (input[0] as u64) | ((input[1] as u64) << 8) | ((input[2] as u64) << 16)
}

#[inline(always)]
fn load4(input: &[u8]) -> u64 {
    (input[0] as u64)
        | ((input[1] as u64) << 8)
        | ((input[2] as u64) << 16)
        | ((input[3] as u64) << 24)
}
