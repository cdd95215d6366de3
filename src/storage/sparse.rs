//! `SparseStorage` — hash-map slot storage for huge index domains.

use super::SlotStorage;
use crate::error::RangeError;
use crate::index::FenwickIndex;
use num_traits::Zero;
use serde::{Deserialize, Serialize};
use std::collections::hash_map::RandomState;
use std::collections::HashMap;
use std::hash::BuildHasher;

/// Slot storage that materializes only slots holding a non-zero value.
///
/// Memory is proportional to the number of slots touched by updates, never to
/// the size of the index domain.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(
    serialize = "I: FenwickIndex + Serialize, T: Serialize, S: BuildHasher",
    deserialize = "I: FenwickIndex + Deserialize<'de>, T: Deserialize<'de>, S: BuildHasher + Default"
))]
pub struct SparseStorage<I, T, S = RandomState> {
    slots: HashMap<I, T, S>,
}

impl<I, T, S> SparseStorage<I, T, S>
where
    I: FenwickIndex,
    T: Copy + Zero,
    S: BuildHasher,
{
    /// Creates an empty store using `hasher` for slot lookups.
    pub fn with_hasher(hasher: S) -> Self {
        Self {
            slots: HashMap::with_hasher(hasher),
        }
    }

    /// Number of materialized (non-zero) slots.
    pub fn touched(&self) -> usize {
        self.slots.len()
    }
}

impl<I, T, S> SlotStorage<I, T> for SparseStorage<I, T, S>
where
    I: FenwickIndex,
    T: Copy + Zero,
    S: BuildHasher + Default,
{
    fn with_len(_len: I) -> Result<Self, RangeError> {
        Ok(Self::with_hasher(S::default()))
    }

    #[inline]
    fn get(&self, slot: I) -> T {
        self.slots.get(&slot).copied().unwrap_or_else(T::zero)
    }

    #[inline]
    fn set(&mut self, slot: I, value: T) {
        if value.is_zero() {
            self.slots.remove(&slot);
        } else {
            self.slots.insert(slot, value);
        }
    }

    fn clear(&mut self) {
        self.slots.clear();
    }

    fn fits_len(&self, len: I) -> bool {
        self.slots.keys().all(|&slot| !slot.is_zero() && slot <= len)
    }
}
