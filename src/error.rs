//! Error type shared by every range structure in the crate.
//!
//! All operations validate their arguments before touching backing storage, so
//! an `Err` always leaves the structure exactly as it was.

use core::fmt;
use num_traits::ToPrimitive;

/// The error type for range-structure operations.
///
/// Indices are widened to `u128` so that any supported index type
/// (including `u64` sparse domains) can be reported losslessly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RangeError {
    /// A range was requested with `from > to`.
    InvalidRange {
        /// Left bound (inclusive).
        from: u128,
        /// Right bound (inclusive).
        to: u128,
    },
    /// A position lies outside `0..len`.
    IndexOutOfBounds {
        /// The offending position.
        index: u128,
        /// Number of logical elements.
        len: u128,
    },
    /// A dense structure was asked for more slots than one contiguous
    /// allocation can hold. Switch to a sparse backing store instead.
    CapacityExceeded {
        /// Requested number of logical elements.
        requested: u128,
    },
    /// A deserialized structure does not satisfy its own shape invariants.
    CorruptSnapshot {
        /// Which invariant the snapshot breaks.
        reason: &'static str,
    },
}

impl RangeError {
    pub(crate) fn invalid_range(from: impl ToPrimitive, to: impl ToPrimitive) -> Self {
        let err = RangeError::InvalidRange {
            from: widen(&from),
            to: widen(&to),
        };
        crate::cfg_tracing! { tracing::trace!(error = %err, "rejected range"); }
        err
    }

    pub(crate) fn out_of_bounds(index: impl ToPrimitive, len: impl ToPrimitive) -> Self {
        let err = RangeError::IndexOutOfBounds {
            index: widen(&index),
            len: widen(&len),
        };
        crate::cfg_tracing! { tracing::trace!(error = %err, "rejected index"); }
        err
    }

    pub(crate) fn capacity_exceeded(requested: impl ToPrimitive) -> Self {
        let err = RangeError::CapacityExceeded {
            requested: widen(&requested),
        };
        crate::cfg_tracing! { tracing::debug!(error = %err, "dense allocation refused"); }
        err
    }

    pub(crate) fn corrupt_snapshot(reason: &'static str) -> Self {
        let err = RangeError::CorruptSnapshot { reason };
        crate::cfg_tracing! { tracing::warn!(error = %err, "rejected snapshot"); }
        err
    }
}

fn widen(value: &impl ToPrimitive) -> u128 {
    value.to_u128().unwrap_or(u128::MAX)
}

impl fmt::Display for RangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RangeError::InvalidRange { from, to } => {
                write!(f, "invalid range: from ({from}) is greater than to ({to})")
            }
            RangeError::IndexOutOfBounds { index, len } => {
                write!(f, "index {index} out of bounds for length {len}")
            }
            RangeError::CapacityExceeded { requested } => write!(
                f,
                "cannot allocate dense storage for {requested} elements"
            ),
            RangeError::CorruptSnapshot { reason } => write!(f, "corrupt snapshot: {reason}"),
        }
    }
}

impl std::error::Error for RangeError {}
