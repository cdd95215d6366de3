//! `DenseStorage` — contiguous slot storage.

use super::SlotStorage;
use crate::error::RangeError;
use num_traits::Zero;
use serde::{Deserialize, Deserializer, Serialize};

/// A contiguous, zero-initialized slot array.
///
/// Holds `len + 1` slots; index 0 is an unused dummy so slot numbers can be
/// used directly as offsets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DenseStorage<T> {
    slots: Vec<T>,
}

#[derive(Deserialize)]
struct DenseStorageRaw<T> {
    slots: Vec<T>,
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for DenseStorage<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = DenseStorageRaw::<T>::deserialize(deserializer)?;
        if raw.slots.is_empty() {
            return Err(serde::de::Error::custom(RangeError::corrupt_snapshot(
                "dense storage is missing its dummy slot",
            )));
        }
        Ok(Self { slots: raw.slots })
    }
}

impl<T: Copy + Zero> DenseStorage<T> {
    /// Creates a store with no addressable slots.
    pub(crate) fn empty() -> Self {
        Self {
            slots: vec![T::zero()],
        }
    }

    /// Number of addressable slots (excluding the dummy).
    pub fn len(&self) -> usize {
        self.slots.len() - 1
    }

    /// Returns true if no slot is addressable.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Appends a slot holding `value`.
    pub(crate) fn push(&mut self, value: T) {
        self.slots.push(value);
    }

    /// Reserves room for `additional` more slots.
    pub(crate) fn reserve(&mut self, additional: usize) {
        self.slots.reserve(additional);
    }

    /// Folds every slot into its Fenwick parent, turning raw values into
    /// partial sums. Linear time.
    pub(crate) fn fold_into_parents(&mut self) {
        let len = self.slots.len();
        for i in 1..len {
            let parent = i + (i & (!i + 1));
            if parent < len {
                let child = self.slots[i];
                self.slots[parent] = self.slots[parent] + child;
            }
        }
    }
}

impl<T: Copy + Zero> SlotStorage<usize, T> for DenseStorage<T> {
    fn with_len(len: usize) -> Result<Self, RangeError> {
        let slots = len
            .checked_add(1)
            .filter(|&slots| {
                slots
                    .checked_mul(core::mem::size_of::<T>())
                    .is_some_and(|bytes| bytes <= isize::MAX as usize)
            })
            .ok_or_else(|| RangeError::capacity_exceeded(len))?;

        let mut storage = Vec::new();
        storage
            .try_reserve_exact(slots)
            .map_err(|_| RangeError::capacity_exceeded(len))?;
        storage.resize(slots, T::zero());
        Ok(Self { slots: storage })
    }

    #[inline]
    fn get(&self, slot: usize) -> T {
        self.slots[slot]
    }

    #[inline]
    fn set(&mut self, slot: usize, value: T) {
        self.slots[slot] = value;
    }

    #[inline]
    fn add(&mut self, slot: usize, delta: T) {
        let cell = &mut self.slots[slot];
        *cell = *cell + delta;
    }

    fn clear(&mut self) {
        self.slots.fill(T::zero());
    }

    fn fits_len(&self, len: usize) -> bool {
        self.len() == len
    }
}
