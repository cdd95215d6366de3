//! Backing stores for Fenwick slots.
//!
//! A Fenwick tree only ever needs two things from its storage: read a slot
//! (absent slots read as zero) and write a slot. [`SlotStorage`] captures
//! exactly that, and the tree takes its store as a type parameter so the
//! dense path compiles down to plain indexing.
//!
//! - [`DenseStorage`]: a contiguous `Vec`, one slot per position.
//! - [`SparseStorage`]: a hash map that only materializes touched slots.

pub mod dense;
pub mod sparse;

pub use dense::DenseStorage;
pub use sparse::SparseStorage;

use crate::error::RangeError;
use crate::index::FenwickIndex;
use num_traits::Zero;

/// Slot store addressed by 1-based Fenwick slot numbers of type `I`.
///
/// Slot `0` is never read or written. Callers guarantee `1 <= slot <= len`
/// where `len` is the value passed to [`SlotStorage::with_len`]; after that
/// validation no operation can fail.
pub trait SlotStorage<I: FenwickIndex, T: Copy + Zero> {
    /// Creates a store able to hold slots `1..=len`, all zero.
    ///
    /// # Errors
    /// Returns [`RangeError::CapacityExceeded`] if the store cannot address
    /// `len` slots.
    fn with_len(len: I) -> Result<Self, RangeError>
    where
        Self: Sized;

    /// Returns the value in `slot`, or zero if it was never written.
    fn get(&self, slot: I) -> T;

    /// Overwrites `slot` with `value`.
    fn set(&mut self, slot: I, value: T);

    /// Adds `delta` to `slot`.
    #[inline]
    fn add(&mut self, slot: I, delta: T) {
        let value = self.get(slot) + delta;
        self.set(slot, value);
    }

    /// Resets every slot to zero.
    fn clear(&mut self);

    /// Returns true if the store can back a tree of `len` elements: every
    /// slot in `1..=len` is addressable and nothing is held outside it.
    fn fits_len(&self, len: I) -> bool;
}
