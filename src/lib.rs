//! # `rangetree` - Indexed Range Aggregation
//!
//! Two self-contained structures for answering aggregate queries over ranges of
//! an indexed sequence in O(log n):
//!
//! - [`FenwickTree`]: point update, prefix/range sum. Its slot storage is a type
//!   parameter, so the same tree runs over a contiguous array
//!   ([`DenseFenwickTree`]) or over a hash map addressing a `u64` domain far too
//!   large to allocate ([`SparseFenwickTree`]).
//! - [`LazySegmentTree`]: range-add update, range aggregate query (minimum by
//!   default, or any [`RangeOp`]) using lazy propagation over an implicit
//!   binary tree in a flat array.
//!
//! ## Errors
//!
//! Every operation validates its arguments before it writes anything and
//! reports violations as a [`RangeError`]. A rejected call never leaves a
//! structure half-updated.
//!
//! ## Features
//!
//! - `tracing`: emit `tracing` events on construction and on rejected calls.
//!
//! ## Example
//!
//! ```rust
//! use rangetree::{DenseFenwickTree, LazySegmentTree};
//!
//! let mut ft = DenseFenwickTree::<i64>::new(10)?;
//! ft.add(5, 4)?;
//! assert_eq!(ft.range_sum(2, 6)?, 4);
//!
//! let mut st = LazySegmentTree::new(vec![3, 2, 4, 6, 1]);
//! st.add(2, 4, 2)?;
//! assert_eq!(st.query(0, 4)?, 2);
//! # Ok::<(), rangetree::RangeError>(())
//! ```

#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

#[macro_use]
mod macros;

pub mod error;
pub mod fenwick;
pub mod index;
pub mod math;
pub mod segment;
pub mod storage;

pub use error::RangeError;
pub use fenwick::{DenseFenwickTree, FenwickTree, SparseFenwickTree};
pub use index::FenwickIndex;
pub use math::{mod_inverse, mod_pow};
pub use segment::{LazySegmentTree, Max, Min, RangeOp, ShiftInvariant, Sum};
pub use storage::{DenseStorage, SlotStorage, SparseStorage};
