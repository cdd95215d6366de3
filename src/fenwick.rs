//! `FenwickTree` — a Binary Indexed Tree over a dense or sparse index domain.
//!
//! A Fenwick Tree provides efficient methods for calculation and manipulation
//! of the prefix sums of a table of values.
//!
//! Time Complexity:
//! - Update: O(log n)
//! - Prefix Sum: O(log n)
//! - Range Sum: O(log n)
//!
//! Space Complexity: O(n) for [`DenseFenwickTree`], O(k log n) for
//! [`SparseFenwickTree`] after `k` updates.
//!
//! Slot `i` (1-based) holds the sum of the logical elements in
//! `(i - lowbit(i), i]`, never a raw element value.
//!
//! ```rust
//! use rangetree::{DenseFenwickTree, SparseFenwickTree};
//!
//! // [0, 0, 0, 0, 0]
//! let mut ft = DenseFenwickTree::<i64>::new(5)?;
//! ft.add(2, 2)?;
//! ft.add(4, 1)?;
//! // [0, 0, 2, 0, 1]
//! assert_eq!(ft.range_sum(2, 4)?, 3);
//!
//! // A domain of 10^15 elements costs nothing until it is touched.
//! let mut sparse = SparseFenwickTree::<u64, i64>::new(1_000_000_000_000_000)?;
//! sparse.add(999_999_999_999_999, 1)?;
//! assert_eq!(sparse.prefix_sum(999_999_999_999_999)?, 1);
//! # Ok::<(), rangetree::RangeError>(())
//! ```

use crate::error::RangeError;
use crate::index::FenwickIndex;
use crate::storage::{DenseStorage, SlotStorage, SparseStorage};
use core::marker::PhantomData;
use core::ops::Sub;
use num_traits::{NumCast, Zero};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::hash_map::RandomState;
use std::hash::BuildHasher;

/// A Fenwick Tree over `len` logical elements indexed by `I`, with element
/// type `T` and slot storage `S`.
///
/// Deserialization checks that the storage matches `len`, so a snapshot that
/// loads successfully is as safe to use as a freshly built tree.
#[derive(Debug, Clone, Serialize)]
pub struct FenwickTree<I, T, S> {
    /// 1-indexed slots; slot 0 is never used.
    storage: S,
    len: I,
    #[serde(skip)]
    _marker: PhantomData<T>,
}

#[derive(Deserialize)]
struct FenwickTreeRaw<I, S> {
    storage: S,
    len: I,
}

impl<'de, I, T, S> Deserialize<'de> for FenwickTree<I, T, S>
where
    I: FenwickIndex + Deserialize<'de>,
    T: Copy + Zero,
    S: SlotStorage<I, T> + Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = FenwickTreeRaw::<I, S>::deserialize(deserializer)?;
        if !raw.storage.fits_len(raw.len) {
            return Err(serde::de::Error::custom(RangeError::corrupt_snapshot(
                "storage does not match tree length",
            )));
        }
        Ok(Self {
            storage: raw.storage,
            len: raw.len,
            _marker: PhantomData,
        })
    }
}

/// A Fenwick Tree backed by a contiguous array, indexed by `usize`.
pub type DenseFenwickTree<T> = FenwickTree<usize, T, DenseStorage<T>>;

/// A Fenwick Tree backed by a hash map, for domains too large to allocate.
pub type SparseFenwickTree<I, T, H = RandomState> = FenwickTree<I, T, SparseStorage<I, T, H>>;

impl<I, T, S> FenwickTree<I, T, S>
where
    I: FenwickIndex,
    T: Copy + Zero + Sub<Output = T>,
    S: SlotStorage<I, T>,
{
    /// Creates a tree of `len` elements indexed `0..len`, all zero.
    ///
    /// # Errors
    /// Returns [`RangeError::CapacityExceeded`] if the storage cannot address
    /// `len` elements. Only dense storage can fail.
    pub fn new(len: I) -> Result<Self, RangeError> {
        let storage = S::with_len(len)?;
        crate::cfg_tracing! { tracing::debug!(len = ?len, "created fenwick tree"); }
        Ok(Self::from_storage(storage, len))
    }

    /// Creates a tree sized to `values`, adding each value at its position in
    /// order. O(n log n).
    ///
    /// # Errors
    /// Returns [`RangeError::CapacityExceeded`] if the sequence length is not
    /// representable in `I` or the storage cannot hold it.
    pub fn from_values<V: IntoIterator<Item = T>>(values: V) -> Result<Self, RangeError> {
        let values: Vec<T> = values.into_iter().collect();
        let len = <I as NumCast>::from(values.len())
            .ok_or_else(|| RangeError::capacity_exceeded(values.len()))?;
        let mut tree = Self::new(len)?;
        let mut pos = I::zero();
        for value in values {
            tree.add_unchecked(pos, value);
            pos = pos + I::one();
        }
        Ok(tree)
    }

    fn from_storage(storage: S, len: I) -> Self {
        Self {
            storage,
            len,
            _marker: PhantomData,
        }
    }

    /// Returns the number of logical elements.
    pub fn len(&self) -> I {
        self.len
    }

    /// Returns true if the tree has no elements.
    pub fn is_empty(&self) -> bool {
        self.len.is_zero()
    }

    /// Returns the backing storage.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Adds `delta` to the element at `pos`. Repeated calls accumulate.
    ///
    /// # Errors
    /// Returns [`RangeError::IndexOutOfBounds`] if `pos >= len`.
    pub fn add(&mut self, pos: I, delta: T) -> Result<(), RangeError> {
        self.check_index(pos)?;
        self.add_unchecked(pos, delta);
        Ok(())
    }

    fn add_unchecked(&mut self, pos: I, delta: T) {
        // pos < len, so pos + 1 cannot overflow.
        let mut slot = pos + I::one();
        while slot <= self.len {
            self.storage.add(slot, delta);
            // Near I::MAX the next slot may not exist.
            match slot.checked_add(&slot.low_bit()) {
                Some(next) => slot = next,
                None => break,
            }
        }
    }

    /// Computes the sum of the elements in `[0, to_inclusive]`.
    ///
    /// # Errors
    /// Returns [`RangeError::IndexOutOfBounds`] if `to_inclusive >= len`.
    pub fn prefix_sum(&self, to_inclusive: I) -> Result<T, RangeError> {
        self.check_index(to_inclusive)?;
        Ok(self.prefix_sum_unchecked(to_inclusive))
    }

    fn prefix_sum_unchecked(&self, to_inclusive: I) -> T {
        self.slot_prefix(to_inclusive + I::one())
    }

    /// Sum of slots on the descending walk from `slot`; zero for slot 0.
    fn slot_prefix(&self, mut slot: I) -> T {
        let mut sum = T::zero();
        while !slot.is_zero() {
            sum = sum + self.storage.get(slot);
            slot = slot - slot.low_bit();
        }
        sum
    }

    /// Computes the sum of the elements in `[from_inclusive, to_inclusive]`.
    ///
    /// # Errors
    /// Returns [`RangeError::InvalidRange`] if `from_inclusive > to_inclusive`
    /// and [`RangeError::IndexOutOfBounds`] if `to_inclusive >= len`.
    pub fn range_sum(&self, from_inclusive: I, to_inclusive: I) -> Result<T, RangeError> {
        if from_inclusive > to_inclusive {
            return Err(RangeError::invalid_range(from_inclusive, to_inclusive));
        }
        self.check_index(to_inclusive)?;

        let upper = self.prefix_sum_unchecked(to_inclusive);
        if from_inclusive.is_zero() {
            Ok(upper)
        } else {
            Ok(upper - self.prefix_sum_unchecked(from_inclusive - I::one()))
        }
    }

    /// Returns the current value of the element at `pos`.
    ///
    /// # Errors
    /// Returns [`RangeError::IndexOutOfBounds`] if `pos >= len`.
    pub fn get(&self, pos: I) -> Result<T, RangeError> {
        self.range_sum(pos, pos)
    }

    /// Resets every element to zero, keeping the length.
    pub fn clear(&mut self) {
        self.storage.clear();
    }

    #[inline]
    fn check_index(&self, pos: I) -> Result<(), RangeError> {
        if pos < self.len {
            Ok(())
        } else {
            Err(RangeError::out_of_bounds(pos, self.len))
        }
    }
}

impl<T> FenwickTree<usize, T, DenseStorage<T>>
where
    T: Copy + Zero + Sub<Output = T>,
{
    /// Pushes a new value to the end of the tree.
    pub fn push(&mut self, value: T) {
        // The new slot covers (slot - lowbit(slot), slot]; every element in
        // that range except the new one is already stored.
        let slot = self.len + 1;
        let covered = self.slot_prefix(slot - 1) - self.slot_prefix(slot - slot.low_bit());
        self.storage.push(value + covered);
        self.len = slot;
    }
}

impl<I, T, H> FenwickTree<I, T, SparseStorage<I, T, H>>
where
    I: FenwickIndex,
    T: Copy + Zero + Sub<Output = T>,
    H: BuildHasher + Default,
{
    /// Creates a sparse tree of `len` elements that hashes slots with `hasher`.
    pub fn with_hasher(len: I, hasher: H) -> Self {
        Self::from_storage(SparseStorage::with_hasher(hasher), len)
    }

    /// Number of slots currently materialized in memory.
    pub fn touched_slots(&self) -> usize {
        self.storage.touched()
    }
}

/// Construction from iterator.
/// This performs an O(n) build of the Fenwick Tree.
impl<T> FromIterator<T> for FenwickTree<usize, T, DenseStorage<T>>
where
    T: Copy + Zero + Sub<Output = T>,
{
    fn from_iter<It: IntoIterator<Item = T>>(iter: It) -> Self {
        let iter = iter.into_iter();
        let (lower, _) = iter.size_hint();
        let mut storage = DenseStorage::empty();
        storage.reserve(lower);

        // Push raw values first, then fold each slot into its parent.
        for item in iter {
            storage.push(item);
        }
        storage.fold_into_parents();

        let len = storage.len();
        Self::from_storage(storage, len)
    }
}
