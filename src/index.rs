//! Index domains for Fenwick trees.
//!
//! A Fenwick tree walks its slots by repeatedly adding or subtracting the
//! lowest set bit of the current (1-based) slot number. Any unsigned primitive
//! integer supports that, so the domain is abstracted over [`FenwickIndex`]
//! instead of being pinned to `usize`. This is what lets a sparse tree address
//! a `u64` domain of 10^15 elements without allocating it.

use core::fmt::Debug;
use core::hash::Hash;
use num_traits::{PrimInt, Unsigned};

/// An unsigned integer usable as a Fenwick slot number.
pub trait FenwickIndex: PrimInt + Unsigned + Hash + Debug {
    /// Isolates the least significant set bit. Returns zero for zero.
    #[inline]
    fn low_bit(self) -> Self {
        // `!x + 1` is the two's complement negation of `x`.
        self & (!self).wrapping_inc()
    }

    /// `self + 1`, wrapping at the type's maximum.
    fn wrapping_inc(self) -> Self;
}

macro_rules! impl_fenwick_index {
    ($($ty:ty),*) => {
        $(
            impl FenwickIndex for $ty {
                #[inline]
                fn wrapping_inc(self) -> Self {
                    self.wrapping_add(1)
                }
            }
        )*
    };
}

impl_fenwick_index!(u8, u16, u32, u64, u128, usize);
