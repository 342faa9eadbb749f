// -*- mode: rust; -*-
//
// This file is part of monero-dalek.
// See LICENSE for licensing information.

//! Arithmetic mod \\(\ell = 2\^{252} + 27742317777372353535851937790883648493\\)
//! with nine \\(30\\)-bit unsigned limbs, reduced with Barrett's method.
//!
//! Nine limbs hold \\(270\\) bits, enough for any sum of two reduced
//! scalars.  A \\(9\times 9\\) product of \\(30\\)-bit limbs has at most nine
//! terms per output column, each below \\(2\^{60}\\), so the widest column
//! stays under \\(2\^{63.2}\\) and fits a `u64`, with room left to fold in
//! the addend of `mul_sub`.

use core::cmp::Ordering;
use core::fmt::Debug;
use core::ops::{Index, IndexMut};

use subtle::{Choice, ConditionallySelectable, ConstantTimeEq, ConstantTimeGreater};

use zeroize::Zeroize;

use crate::backend::u32::constants;

const MASK_30: u32 = (1 << 30) - 1;
const MASK_24: u32 = (1 << 24) - 1;

/// The `Scalar30` struct represents an element in
/// \\(\mathbb Z / \ell \mathbb Z\\) as 9 \\(30\\)-bit limbs.
#[derive(Copy, Clone)]
pub(crate) struct Scalar30(pub(crate) [u32; 9]);

impl Debug for Scalar30 {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Scalar30: {:?}", &self.0[..])
    }
}

impl Zeroize for Scalar30 {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

impl Index<usize> for Scalar30 {
    type Output = u32;
    fn index(&self, index: usize) -> &u32 {
        &(self.0[index])
    }
}

impl IndexMut<usize> for Scalar30 {
    fn index_mut(&mut self, index: usize) -> &mut u32 {
        &mut (self.0[index])
    }
}

impl ConditionallySelectable for Scalar30 {
    fn conditional_select(a: &Scalar30, b: &Scalar30, choice: Choice) -> Scalar30 {
        let mut limbs = [0u32; 9];
        for i in 0..9 {
            limbs[i] = u32::conditional_select(&a.0[i], &b.0[i], choice);
        }
        Scalar30(limbs)
    }
}

/// u32 * u32 = u64 multiply helper
#[inline(always)]
fn m(x: u32, y: u32) -> u64 {
    (x as u64) * (y as u64)
}

/// Split a little-endian byte string into `N` limbs of 30 bits.  The
/// last limb takes whatever bits remain.
fn load_limbs<const N: usize>(bytes: &[u8]) -> [u32; N] {
    let mut limbs = [0u32; N];
    let mut acc: u64 = 0;
    let mut bits: u32 = 0;
    let mut k = 0;
    for byte in bytes {
        acc |= (*byte as u64) << bits;
        bits += 8;
        if bits >= 30 {
            limbs[k] = (acc as u32) & MASK_30;
            acc >>= 30;
            bits -= 30;
            k += 1;
        }
    }
    if k < N {
        limbs[k] = acc as u32;
    }
    limbs
}

/// Compute `a - b` over nine limbs, returning the limbs modulo
/// \\(2\^{270}\\) and the final borrow bit.
#[inline(always)]
fn sub_with_borrow(a: &[u32; 9], b: &[u32; 9]) -> ([u32; 9], u32) {
    let mut difference = [0u32; 9];
    let mut borrow: u32 = 0;
    for i in 0..9 {
        // A borrow out of a 30-bit limb wraps into bit 31.
        let t = a[i].wrapping_sub(b[i] + borrow);
        borrow = t >> 31;
        difference[i] = t & MASK_30;
    }
    (difference, borrow)
}

impl Scalar30 {
    /// The scalar \\( 0 \\).
    pub(crate) const ZERO: Scalar30 = Scalar30([0, 0, 0, 0, 0, 0, 0, 0, 0]);

    /// The scalar \\( 1 \\).
    pub(crate) const ONE: Scalar30 = Scalar30([1, 0, 0, 0, 0, 0, 0, 0, 0]);

    /// Decompose a `u64` into limbs.  Since \\(2\^{64} < \ell\\), the
    /// result is always reduced.
    pub(crate) fn from_u64(x: u64) -> Scalar30 {
        Scalar30([
            (x & (MASK_30 as u64)) as u32,
            ((x >> 30) & (MASK_30 as u64)) as u32,
            (x >> 60) as u32,
            0,
            0,
            0,
            0,
            0,
            0,
        ])
    }

    /// Reduce a 32 byte / 256 bit integer mod l.
    pub(crate) fn from_bytes(bytes: &[u8; 32]) -> Scalar30 {
        Scalar30::barrett_reduce(&load_limbs::<18>(bytes))
    }

    /// Reduce a 64 byte / 512 bit integer mod l.
    pub(crate) fn from_bytes_wide(bytes: &[u8; 64]) -> Scalar30 {
        Scalar30::barrett_reduce(&load_limbs::<18>(bytes))
    }

    /// Pack the limbs of this `Scalar30` into 32 bytes.  The scalar must
    /// be reduced.
    pub(crate) fn as_bytes(&self) -> [u8; 32] {
        let mut s = [0u8; 32];
        let mut acc: u64 = 0;
        let mut bits: u32 = 0;
        let mut k = 0;
        for limb in self.0.iter() {
            acc |= (*limb as u64) << bits;
            bits += 30;
            while bits >= 8 && k < 32 {
                s[k] = acc as u8;
                acc >>= 8;
                bits -= 8;
                k += 1;
            }
        }
        s
    }

    /// Compute `a + b` (mod l)
    pub(crate) fn add(a: &Scalar30, b: &Scalar30) -> Scalar30 {
        let mut sum = [0u32; 9];

        // a + b
        let mut carry: u32 = 0;
        for i in 0..9 {
            carry = a[i] + b[i] + (carry >> 30);
            sum[i] = carry & MASK_30;
        }

        // subtract l if the sum is >= l
        Scalar30::sub(&Scalar30(sum), &constants::L)
    }

    /// Compute `a - b` (mod l)
    pub(crate) fn sub(a: &Scalar30, b: &Scalar30) -> Scalar30 {
        let (mut difference, borrow) = sub_with_borrow(&a.0, &b.0);

        // conditionally add l if the difference is negative
        let underflow_mask = 0u32.wrapping_sub(borrow);
        let mut carry: u32 = 0;
        for i in 0..9 {
            carry = (carry >> 30) + difference[i] + (constants::L[i] & underflow_mask);
            difference[i] = carry & MASK_30;
        }

        Scalar30(difference)
    }

    /// Compute `-a` (mod l)
    pub(crate) fn neg(a: &Scalar30) -> Scalar30 {
        Scalar30::sub(&Scalar30::ZERO, a)
    }

    /// Compute `a * b`
    #[inline(always)]
    fn mul_internal(a: &[u32; 9], b: &[u32; 9]) -> [u64; 17] {
        let mut z = [0u64; 17];
        for i in 0..9 {
            for j in 0..9 {
                z[i + j] += m(a[i], b[j]);
            }
        }
        z
    }

    /// Propagate carries through the columns of a product, yielding
    /// eighteen \\(30\\)-bit limbs.
    #[inline(always)]
    fn carry_wide(z: &[u64; 17]) -> [u32; 18] {
        let mut limbs = [0u32; 18];
        let mut carry: u64 = 0;
        for i in 0..17 {
            let t = z[i] + carry;
            limbs[i] = (t as u32) & MASK_30;
            carry = t >> 30;
        }
        limbs[17] = carry as u32;
        limbs
    }

    /// Barrett reduction of a value below \\(2\^{512}\\), given as
    /// eighteen \\(30\\)-bit limbs, using
    /// \\(\mu = \lfloor 2\^{512} / \ell \rfloor\\) and \\(k = 264\\) bits.
    #[rustfmt::skip] // keep alignment of quotient shifts
    fn barrett_reduce(x: &[u32; 18]) -> Scalar30 {
        // q1 = x >> 248
        let mut q1 = [0u32; 9];
        for i in 0..9 {
            q1[i] = ((x[8 + i] >> 8) | (x[9 + i] << 22)) & MASK_30;
        }

        // q3 = (q1 * mu) >> 264
        let q2 = Scalar30::carry_wide(&Scalar30::mul_internal(&q1, &constants::MU.0));
        let mut q3 = [0u32; 9];
        for i in 0..9 {
            q3[i] = ((q2[8 + i] >> 24) | (q2[9 + i] << 6)) & MASK_30;
        }

        // r1 = x mod 2^264
        let mut r1 = [0u32; 9];
        r1.copy_from_slice(&x[0..9]);
        r1[8] &= MASK_24;

        // r2 = (q3 * l) mod 2^264, keeping only the low columns
        let mut z = [0u64; 9];
        for i in 0..9 {
            for j in 0..(9 - i) {
                z[i + j] += m(q3[i], constants::L[j]);
            }
        }
        let mut r2 = [0u32; 9];
        let mut carry: u64 = 0;
        for i in 0..9 {
            let t = z[i] + carry;
            r2[i] = (t as u32) & MASK_30;
            carry = t >> 30;
        }
        r2[8] &= MASK_24;

        // r = (r1 - r2) mod 2^264, now below 3l
        let (mut r, _) = sub_with_borrow(&r1, &r2);
        r[8] &= MASK_24;

        // at most two subtractions of l bring r into [0, l)
        for _ in 0..2 {
            let (t, borrow) = sub_with_borrow(&r, &constants::L.0);
            let no_borrow = Choice::from((borrow ^ 1) as u8);
            for i in 0..9 {
                r[i].conditional_assign(&t[i], no_borrow);
            }
        }

        Scalar30(r)
    }

    /// Compute `a * b` (mod l)
    pub(crate) fn mul(a: &Scalar30, b: &Scalar30) -> Scalar30 {
        let wide = Scalar30::mul_internal(&a.0, &b.0);
        Scalar30::barrett_reduce(&Scalar30::carry_wide(&wide))
    }

    /// Compute `a - b * c` (mod l) with a single reduction.
    ///
    /// The product is formed as \\((\ell - b) \cdot c\\), so that adding `a`
    /// into its low columns gives a nonnegative value below
    /// \\(2\^{507}\\), which one Barrett pass reduces.
    pub(crate) fn mul_sub(a: &Scalar30, b: &Scalar30, c: &Scalar30) -> Scalar30 {
        // l - b lies in [1, l] for reduced b.
        let (minus_b, _) = sub_with_borrow(&constants::L.0, &b.0);

        let mut wide = Scalar30::mul_internal(&minus_b, &c.0);
        for i in 0..9 {
            wide[i] += a[i] as u64;
        }

        Scalar30::barrett_reduce(&Scalar30::carry_wide(&wide))
    }

    /// Compare two reduced scalars in constant time, over 16-bit chunks
    /// from the most significant down.
    pub(crate) fn ct_compare(a: &Scalar30, b: &Scalar30) -> Ordering {
        let mut a_gt = Choice::from(0);
        let mut b_gt = Choice::from(0);

        for chunk in (0..18).rev() {
            let shift = 16 * (chunk & 1);
            let x = (a[chunk >> 1] >> shift) & 0xffff;
            let y = (b[chunk >> 1] >> shift) & 0xffff;

            a_gt |= x.ct_gt(&y) & !b_gt;
            b_gt |= y.ct_gt(&x) & !a_gt;
        }

        if bool::from(a_gt) {
            Ordering::Greater
        } else if bool::from(b_gt) {
            Ordering::Less
        } else {
            Ordering::Equal
        }
    }
}

impl ConstantTimeEq for Scalar30 {
    fn ct_eq(&self, other: &Scalar30) -> Choice {
        self.0.ct_eq(&other.0)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    /// x = (2^253 - 1) mod l
    fn x() -> Scalar30 {
        let mut bytes = [0xffu8; 32];
        bytes[31] = 0x1f;
        Scalar30::from_bytes(&bytes)
    }

    fn limbs_eq(a: &Scalar30, b: &Scalar30) -> bool {
        bool::from(a.ct_eq(b))
    }

    #[test]
    fn from_bytes_reduces_l_to_zero() {
        let l_bytes = constants::L.as_bytes();
        assert!(limbs_eq(&Scalar30::from_bytes(&l_bytes), &Scalar30::ZERO));
    }

    #[test]
    fn as_bytes_of_l_minus_one() {
        let l_minus_one = Scalar30::sub(&Scalar30::ZERO, &Scalar30::ONE);
        let mut expected = constants::L.as_bytes();
        expected[0] -= 1;
        assert_eq!(l_minus_one.as_bytes(), expected);
    }

    #[test]
    fn from_bytes_wide_max() {
        // (2^512 - 1) mod l
        let expected: [u8; 32] = [
            0x00, 0x0f, 0x9c, 0x44, 0xe3, 0x11, 0x06, 0xa4, 0x47, 0x93, 0x85, 0x68, 0xa7, 0x1b,
            0x0e, 0xd0, 0x65, 0xbe, 0xf5, 0x17, 0xd2, 0x73, 0xec, 0xce, 0x3d, 0x9a, 0x30, 0x7c,
            0x1b, 0x41, 0x99, 0x03,
        ];
        let reduced = Scalar30::from_bytes_wide(&[0xff; 64]);
        assert_eq!(reduced.as_bytes(), expected);
    }

    #[test]
    fn from_u64_limbs() {
        let s = Scalar30::from_u64(u64::MAX);
        assert_eq!(s[0], MASK_30);
        assert_eq!(s[1], MASK_30);
        assert_eq!(s[2], 0xf);
        let mut bytes = [0u8; 32];
        bytes[..8].copy_from_slice(&u64::MAX.to_le_bytes());
        assert_eq!(s.as_bytes(), bytes);
    }

    #[test]
    fn add_wraps_to_zero() {
        let minus_one = Scalar30::neg(&Scalar30::ONE);
        let res = Scalar30::add(&minus_one, &Scalar30::ONE);
        assert!(limbs_eq(&res, &Scalar30::ZERO));
    }

    #[test]
    fn neg_zero_is_zero() {
        assert!(limbs_eq(&Scalar30::neg(&Scalar30::ZERO), &Scalar30::ZERO));
    }

    #[test]
    fn mul_max() {
        // (l-1)^2 = 1 mod l
        let minus_one = Scalar30::neg(&Scalar30::ONE);
        let res = Scalar30::mul(&minus_one, &minus_one);
        assert!(limbs_eq(&res, &Scalar30::ONE));
    }

    #[test]
    fn mul_sub_extremes() {
        let minus_one = Scalar30::neg(&Scalar30::ONE);
        // 0 - (l-1)(l-1) = -1
        let res = Scalar30::mul_sub(&Scalar30::ZERO, &minus_one, &minus_one);
        assert!(limbs_eq(&res, &minus_one));
        // (l-1) - 0 * 5 = l-1
        let res = Scalar30::mul_sub(&minus_one, &Scalar30::ZERO, &Scalar30::from_u64(5));
        assert!(limbs_eq(&res, &minus_one));
        // x - x * 1 = 0
        let res = Scalar30::mul_sub(&x(), &x(), &Scalar30::ONE);
        assert!(limbs_eq(&res, &Scalar30::ZERO));
    }

    #[test]
    fn compare_orders_by_value() {
        let two = Scalar30::from_u64(2);
        let big = Scalar30::from_u64(1 << 40);
        assert_eq!(Scalar30::ct_compare(&two, &big), Ordering::Less);
        assert_eq!(Scalar30::ct_compare(&big, &two), Ordering::Greater);
        assert_eq!(Scalar30::ct_compare(&x(), &x()), Ordering::Equal);
        let minus_one = Scalar30::neg(&Scalar30::ONE);
        assert_eq!(Scalar30::ct_compare(&minus_one, &big), Ordering::Greater);
    }
}
