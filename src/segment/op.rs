//! Aggregation operations for [`LazySegmentTree`](super::LazySegmentTree).
//!
//! A range-add tree needs more than an associative combine and its identity:
//! it must also know how adding `delta` to every cell of a node changes that
//! node's aggregate. [`RangeOp::apply`] supplies that.

use core::ops::Add;
use num_traits::{Bounded, Zero};
use serde::{Deserialize, Serialize};

/// An associative aggregation with an identity, compatible with range-add.
pub trait RangeOp<T> {
    /// The neutral element: `combine(identity, x) == x`.
    fn identity(&self) -> T;

    /// Combines the aggregates of two adjacent ranges.
    fn combine(&self, left: &T, right: &T) -> T;

    /// Returns the aggregate of `width` cells after `delta` is added to each.
    fn apply(&self, aggregate: &T, delta: &T, width: usize) -> T;
}

/// Range minimum. Identity is the maximum representable value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Min;

impl<T> RangeOp<T> for Min
where
    T: Copy + PartialOrd + Bounded + Add<Output = T>,
{
    #[inline]
    fn identity(&self) -> T {
        T::max_value()
    }

    #[inline]
    fn combine(&self, left: &T, right: &T) -> T {
        if right < left {
            *right
        } else {
            *left
        }
    }

    #[inline]
    fn apply(&self, aggregate: &T, delta: &T, _width: usize) -> T {
        *aggregate + *delta
    }
}

/// Range maximum. Identity is the minimum representable value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Max;

impl<T> RangeOp<T> for Max
where
    T: Copy + PartialOrd + Bounded + Add<Output = T>,
{
    #[inline]
    fn identity(&self) -> T {
        T::min_value()
    }

    #[inline]
    fn combine(&self, left: &T, right: &T) -> T {
        if right > left {
            *right
        } else {
            *left
        }
    }

    #[inline]
    fn apply(&self, aggregate: &T, delta: &T, _width: usize) -> T {
        *aggregate + *delta
    }
}

/// Range sum. Identity is zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sum;

impl<T> RangeOp<T> for Sum
where
    T: Copy + Zero,
{
    #[inline]
    fn identity(&self) -> T {
        T::zero()
    }

    #[inline]
    fn combine(&self, left: &T, right: &T) -> T {
        *left + *right
    }

    fn apply(&self, aggregate: &T, delta: &T, width: usize) -> T {
        *aggregate + scale(*delta, width)
    }
}

/// `delta` added to itself `times` times, by doubling.
fn scale<T: Copy + Zero>(delta: T, mut times: usize) -> T {
    let mut result = T::zero();
    let mut base = delta;
    while times > 0 {
        if times & 1 == 1 {
            result = result + base;
        }
        times >>= 1;
        if times > 0 {
            base = base + base;
        }
    }
    result
}

/// A caller-supplied combinator and identity for any aggregation that shifts
/// uniformly under range-add (`combine(a + d, b + d) == combine(a, b) + d`),
/// such as min, max, or lexicographic variants of them.
#[derive(Clone)]
pub struct ShiftInvariant<F, T> {
    combinator: F,
    identity: T,
}

impl<F, T> ShiftInvariant<F, T>
where
    F: Fn(&T, &T) -> T,
{
    /// Wraps `combinator` with its neutral element `identity`.
    pub fn new(combinator: F, identity: T) -> Self {
        Self {
            combinator,
            identity,
        }
    }
}

impl<F, T> RangeOp<T> for ShiftInvariant<F, T>
where
    F: Fn(&T, &T) -> T,
    T: Copy + Add<Output = T>,
{
    fn identity(&self) -> T {
        self.identity
    }

    fn combine(&self, left: &T, right: &T) -> T {
        (self.combinator)(left, right)
    }

    fn apply(&self, aggregate: &T, delta: &T, _width: usize) -> T {
        *aggregate + *delta
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_min_max_identity() {
        assert_eq!(RangeOp::<i32>::identity(&Min), i32::MAX);
        assert_eq!(RangeOp::<i32>::identity(&Max), i32::MIN);
        assert_eq!(Min.combine(&3, &RangeOp::<i32>::identity(&Min)), 3);
        assert_eq!(Max.combine(&-3, &RangeOp::<i32>::identity(&Max)), -3);
    }

    #[test]
    fn test_sum_apply_scales_by_width() {
        assert_eq!(Sum.apply(&10i64, &3, 0), 10);
        assert_eq!(Sum.apply(&10i64, &3, 1), 13);
        assert_eq!(Sum.apply(&10i64, &3, 7), 31);
        assert_eq!(Sum.apply(&0i64, &-2, 1024), -2048);
    }

    #[test]
    fn test_shift_invariant_wraps_closure() {
        let op = ShiftInvariant::new(|a: &i32, b: &i32| *a.min(b), i32::MAX);
        assert_eq!(op.combine(&4, &2), 2);
        assert_eq!(op.identity(), i32::MAX);
        assert_eq!(op.apply(&4, &3, 100), 7);
    }
}
