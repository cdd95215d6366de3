//! `LazySegmentTree` — range-add updates and range aggregate queries with lazy
//! propagation.
//!
//! The tree is implicit: node `k` (1-based) has children `2k` and `2k + 1`, all
//! stored in one flat vector. The input is padded to the next power of two
//! with the operation's identity so padding never affects a query.
//!
//! Each node keeps its aggregate, which already includes every update applied
//! to it, and an optional pending delta that its children have not seen yet.
//! A node is propagated (pending delta pushed into both children) before it is
//! descended into, so reads never observe a stale child.
//!
//! Time Complexity:
//! - Build: O(n)
//! - Range add: O(log n)
//! - Range query: O(log n)
//!
//! ```rust
//! use rangetree::LazySegmentTree;
//!
//! let mut st = LazySegmentTree::new(vec![3, 2, 4, 6, 1]);
//! assert_eq!(st.query(0, 4)?, 1);
//!
//! st.add(2, 4, 2)?;
//! // [3, 2, 6, 8, 3]
//! assert_eq!(st.query(2, 4)?, 3);
//! assert_eq!(st.query(2, 3)?, 6);
//! # Ok::<(), rangetree::RangeError>(())
//! ```

pub mod op;

pub use op::{Max, Min, RangeOp, ShiftInvariant, Sum};

use crate::error::RangeError;
use core::ops::Add;
use serde::{Deserialize, Deserializer, Serialize};

/// A lazy-propagation segment tree over `len` elements, aggregated by `O`.
///
/// Deserialization rejects snapshots whose heap layout does not match `len`.
#[derive(Debug, Clone, Serialize)]
pub struct LazySegmentTree<T, O = Min> {
    /// Aggregates, 1-based heap order. Index 0 is unused.
    tree: Vec<T>,
    /// Deltas not yet pushed to the children of each node.
    pending: Vec<Option<T>>,
    /// Number of leaves (a power of two).
    size: usize,
    len: usize,
    op: O,
}

#[derive(Deserialize)]
struct LazySegmentTreeRaw<T, O> {
    tree: Vec<T>,
    pending: Vec<Option<T>>,
    size: usize,
    len: usize,
    op: O,
}

impl<T, O> LazySegmentTreeRaw<T, O> {
    fn check_shape(&self) -> Result<(), RangeError> {
        if self.size != self.len.next_power_of_two() {
            return Err(RangeError::corrupt_snapshot(
                "leaf count is not the padded length",
            ));
        }
        let nodes = self.size.checked_mul(2);
        if nodes != Some(self.tree.len()) || nodes != Some(self.pending.len()) {
            return Err(RangeError::corrupt_snapshot(
                "node vectors do not hold 2 * size entries",
            ));
        }
        if self.pending[self.size..].iter().any(Option::is_some) {
            return Err(RangeError::corrupt_snapshot("leaf holds a pending delta"));
        }
        Ok(())
    }
}

impl<'de, T, O> Deserialize<'de> for LazySegmentTree<T, O>
where
    T: Deserialize<'de>,
    O: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = LazySegmentTreeRaw::<T, O>::deserialize(deserializer)?;
        raw.check_shape().map_err(serde::de::Error::custom)?;
        Ok(Self {
            tree: raw.tree,
            pending: raw.pending,
            size: raw.size,
            len: raw.len,
            op: raw.op,
        })
    }
}

impl<T> LazySegmentTree<T, Min>
where
    Min: RangeOp<T>,
    T: Copy + Add<Output = T>,
{
    /// Builds a range-minimum tree over `values`.
    pub fn new(values: Vec<T>) -> Self {
        Self::with_op(values, Min)
    }
}

impl<T, F> LazySegmentTree<T, ShiftInvariant<F, T>>
where
    F: Fn(&T, &T) -> T,
    T: Copy + Add<Output = T>,
{
    /// Builds a tree aggregated by `combinator`, whose neutral element is
    /// `identity`. The combinator must shift uniformly under range-add.
    pub fn with_combinator(values: Vec<T>, combinator: F, identity: T) -> Self {
        Self::with_op(values, ShiftInvariant::new(combinator, identity))
    }
}

impl<T, O> LazySegmentTree<T, O>
where
    O: RangeOp<T>,
    T: Copy + Add<Output = T>,
{
    /// Builds a tree over `values` aggregated by `op`.
    pub fn with_op(mut values: Vec<T>, op: O) -> Self {
        let len = values.len();
        let size = len.next_power_of_two();
        values.resize(size, op.identity());

        let mut tree = Self {
            tree: vec![op.identity(); 2 * size],
            pending: vec![None; 2 * size],
            size,
            len,
            op,
        };
        tree.build(&values, 1, 0, size - 1);
        crate::cfg_tracing! { tracing::debug!(len, size, "built lazy segment tree"); }
        tree
    }

    fn build(&mut self, values: &[T], node: usize, left: usize, right: usize) {
        if left == right {
            self.tree[node] = values[left];
            return;
        }
        let mid = left + (right - left) / 2;
        self.build(values, 2 * node, left, mid);
        self.build(values, 2 * node + 1, mid + 1, right);
        self.pull(node);
    }

    /// Returns the number of elements.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the tree has no elements.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the aggregation operation.
    pub fn op(&self) -> &O {
        &self.op
    }

    /// Aggregates the elements in `[left, right]`.
    ///
    /// Takes `&mut self` because pending deltas on the visited path are pushed
    /// down.
    ///
    /// # Errors
    /// Returns [`RangeError::InvalidRange`] if `left > right` and
    /// [`RangeError::IndexOutOfBounds`] if `right >= len`.
    pub fn query(&mut self, left: usize, right: usize) -> Result<T, RangeError> {
        self.check_range(left, right)?;
        Ok(self.query_impl(1, 0, self.size - 1, left, right))
    }

    /// Returns the current value of the element at `pos`.
    ///
    /// # Errors
    /// Returns [`RangeError::IndexOutOfBounds`] if `pos >= len`.
    pub fn query_at(&mut self, pos: usize) -> Result<T, RangeError> {
        self.query(pos, pos)
    }

    /// Adds `value` to every element in `[left, right]`.
    ///
    /// # Errors
    /// Returns [`RangeError::InvalidRange`] if `left > right` and
    /// [`RangeError::IndexOutOfBounds`] if `right >= len`. Nothing is
    /// modified on error.
    pub fn add(&mut self, left: usize, right: usize, value: T) -> Result<(), RangeError> {
        self.check_range(left, right)?;
        self.add_impl(1, 0, self.size - 1, left, right, value);
        Ok(())
    }

    /// Adds `value` to the element at `pos`.
    ///
    /// # Errors
    /// Returns [`RangeError::IndexOutOfBounds`] if `pos >= len`.
    pub fn add_at(&mut self, pos: usize, value: T) -> Result<(), RangeError> {
        self.add(pos, pos, value)
    }

    /// Materializes the current logical array.
    pub fn to_vec(&mut self) -> Vec<T> {
        (0..self.len)
            .map(|pos| self.query_impl(1, 0, self.size - 1, pos, pos))
            .collect()
    }

    fn check_range(&self, left: usize, right: usize) -> Result<(), RangeError> {
        if left > right {
            return Err(RangeError::invalid_range(left, right));
        }
        if right >= self.len {
            return Err(RangeError::out_of_bounds(right, self.len));
        }
        Ok(())
    }

    /// Recomputes `node` from its children.
    #[inline]
    fn pull(&mut self, node: usize) {
        self.tree[node] = self
            .op
            .combine(&self.tree[2 * node], &self.tree[2 * node + 1]);
    }

    /// Adds `delta` to every cell under `node`: its aggregate absorbs it now,
    /// its children absorb it on the next propagation.
    #[inline]
    fn apply(&mut self, node: usize, width: usize, delta: T) {
        self.tree[node] = self.op.apply(&self.tree[node], &delta, width);
        if node < self.size {
            self.pending[node] = Some(match self.pending[node] {
                Some(held) => held + delta,
                None => delta,
            });
        }
    }

    /// Pushes the pending delta of `node` into both children.
    #[inline]
    fn propagate(&mut self, node: usize, left: usize, right: usize) {
        if let Some(delta) = self.pending[node].take() {
            let half = (right - left + 1) / 2;
            self.apply(2 * node, half, delta);
            self.apply(2 * node + 1, half, delta);
        }
    }

    fn query_impl(
        &mut self,
        node: usize,
        left: usize,
        right: usize,
        q_left: usize,
        q_right: usize,
    ) -> T {
        if q_left > right || q_right < left {
            return self.op.identity();
        }
        if q_left <= left && right <= q_right {
            return self.tree[node];
        }

        self.propagate(node, left, right);
        let mid = left + (right - left) / 2;
        let l_res = self.query_impl(2 * node, left, mid, q_left, q_right);
        let r_res = self.query_impl(2 * node + 1, mid + 1, right, q_left, q_right);
        self.op.combine(&l_res, &r_res)
    }

    fn add_impl(
        &mut self,
        node: usize,
        left: usize,
        right: usize,
        q_left: usize,
        q_right: usize,
        value: T,
    ) {
        if q_left > right || q_right < left {
            return;
        }
        if q_left <= left && right <= q_right {
            self.apply(node, right - left + 1, value);
            return;
        }

        self.propagate(node, left, right);
        let mid = left + (right - left) / 2;
        self.add_impl(2 * node, left, mid, q_left, q_right, value);
        self.add_impl(2 * node + 1, mid + 1, right, q_left, q_right, value);
        self.pull(node);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_min_build() {
        // { 3, 2, 4, 6, 1 }
        let mut st = LazySegmentTree::new(vec![3, 2, 4, 6, 1]);

        assert_eq!(st.query(0, 4), Ok(1));
        assert_eq!(st.query(2, 4), Ok(1));
        assert_eq!(st.query(1, 3), Ok(2));
        assert_eq!(st.query(2, 3), Ok(4));
        assert_eq!(st.query(0, 0), Ok(3));
        assert_eq!(st.query(3, 3), Ok(6));
    }

    #[test]
    fn test_min_point_add() {
        let mut st = LazySegmentTree::new(vec![3, 2, 4, 6, 1]);

        st.add_at(2, 2).unwrap();
        // { 3, 2, 6, 6, 1 }
        assert_eq!(st.query(2, 4), Ok(1));

        st.add_at(4, 1).unwrap();
        // { 3, 2, 6, 6, 2 }
        assert_eq!(st.query(2, 4), Ok(2));
        assert_eq!(st.query(1, 3), Ok(2));
        assert_eq!(st.query(0, 4), Ok(2));
        assert_eq!(st.query_at(0), Ok(3));
        assert_eq!(st.query(2, 3), Ok(6));

        st.add_at(0, 5).unwrap();
        // { 8, 2, 6, 6, 2 }
        assert_eq!(st.query(0, 4), Ok(2));
        assert_eq!(st.query_at(0), Ok(8));

        st.add_at(2, 1).unwrap();
        // { 8, 2, 7, 6, 2 }
        assert_eq!(st.query_at(2), Ok(7));
        assert_eq!(st.query(0, 4), Ok(2));
        assert_eq!(st.query(2, 3), Ok(6));
    }

    #[test]
    fn test_min_range_add() {
        let mut st = LazySegmentTree::new(vec![3, 2, 4, 6, 1]);

        st.add(2, 4, 2).unwrap();
        // { 3, 2, 6, 8, 3 }
        assert_eq!(st.query(2, 4), Ok(3));
        assert_eq!(st.query(2, 3), Ok(6));

        st.add(1, 2, 1).unwrap();
        // { 3, 3, 7, 8, 3 }
        assert_eq!(st.query(2, 4), Ok(3));
        assert_eq!(st.query(1, 3), Ok(3));
        assert_eq!(st.query(0, 4), Ok(3));
        assert_eq!(st.query_at(1), Ok(3));
        assert_eq!(st.query(2, 3), Ok(7));

        st.add(0, 2, 5).unwrap();
        // { 8, 8, 12, 8, 3 }
        assert_eq!(st.query(0, 4), Ok(3));
        assert_eq!(st.query_at(0), Ok(8));
        assert_eq!(st.query(1, 2), Ok(8));
        assert_eq!(st.query_at(2), Ok(12));
        assert_eq!(st.query(1, 3), Ok(8));

        st.add(2, 4, 10).unwrap();
        // { 8, 8, 22, 18, 13 }
        assert_eq!(st.query_at(2), Ok(22));
        assert_eq!(st.query(0, 4), Ok(8));
        assert_eq!(st.query(2, 3), Ok(18));
        assert_eq!(st.query(2, 4), Ok(13));
        assert_eq!(st.query(1, 2), Ok(8));
        assert_eq!(st.to_vec(), vec![8, 8, 22, 18, 13]);
    }

    #[test]
    fn test_stacked_pending_deltas_accumulate() {
        let mut st = LazySegmentTree::new(vec![0i64; 2]);
        // Root gets a pending delta while a child already holds an update.
        st.add(0, 0, 1).unwrap();
        st.add(0, 1, 1).unwrap();
        assert_eq!(st.query_at(0), Ok(2));
        assert_eq!(st.query_at(1), Ok(1));

        let mut st = LazySegmentTree::new(vec![0i64; 8]);
        st.add(0, 3, 1).unwrap();
        st.add(0, 7, 10).unwrap();
        st.add(0, 1, 100).unwrap();
        assert_eq!(st.to_vec(), vec![111, 111, 11, 11, 10, 10, 10, 10]);
        assert_eq!(st.query(0, 7), Ok(10));
    }

    #[test]
    fn test_sum_op() {
        let mut st = LazySegmentTree::with_op(vec![1i64, 2, 3, 4, 5], Sum);
        assert_eq!(st.query(0, 4), Ok(15));

        st.add(1, 3, 10).unwrap();
        // { 1, 12, 13, 14, 5 }
        assert_eq!(st.query(0, 4), Ok(45));
        assert_eq!(st.query(2, 4), Ok(32));
        assert_eq!(st.query_at(3), Ok(14));
    }

    #[test]
    fn test_max_op() {
        let mut st = LazySegmentTree::with_op(vec![3, 2, 4, 6, 1], Max);
        assert_eq!(st.query(0, 4), Ok(6));
        st.add(0, 2, 5).unwrap();
        // { 8, 7, 9, 6, 1 }
        assert_eq!(st.query(0, 4), Ok(9));
        assert_eq!(st.query(3, 4), Ok(6));
    }

    #[test]
    fn test_with_combinator() {
        let mut st = LazySegmentTree::with_combinator(
            vec![5i32, 1, 9],
            |a: &i32, b: &i32| *a.max(b),
            i32::MIN,
        );
        assert_eq!(st.query(0, 2), Ok(9));
        st.add(1, 1, 20).unwrap();
        assert_eq!(st.query(0, 1), Ok(21));
    }

    #[test]
    fn test_errors_leave_tree_untouched() {
        let mut st = LazySegmentTree::new(vec![3, 2, 4]);
        assert_eq!(
            st.add(2, 1, 7),
            Err(RangeError::InvalidRange { from: 2, to: 1 })
        );
        assert_eq!(
            st.add(0, 3, 7),
            Err(RangeError::IndexOutOfBounds { index: 3, len: 3 })
        );
        assert_eq!(
            st.query(0, 3),
            Err(RangeError::IndexOutOfBounds { index: 3, len: 3 })
        );
        assert_eq!(st.to_vec(), vec![3, 2, 4]);
    }

    #[test]
    fn test_empty_segment_tree() {
        let mut st = LazySegmentTree::<i32>::new(Vec::new());
        assert!(st.is_empty());
        assert!(st.query(0, 0).is_err());
        assert!(st.to_vec().is_empty());
    }

    #[test]
    fn test_deserialize_rejects_malformed_heap() {
        let cases = [
            // tree and pending too short for eight leaves
            r#"{"tree":[0,1],"pending":[null,null],"size":8,"len":8,"op":null}"#,
            // size not a power of two
            r#"{"tree":[0,0,0,0,0,0],"pending":[null,null,null,null,null,null],"size":3,"len":3,"op":null}"#,
            // more elements than leaves
            r#"{"tree":[0,0,0,0],"pending":[null,null,null,null],"size":2,"len":5,"op":null}"#,
            // pending delta parked on a leaf
            r#"{"tree":[0,0,0,0],"pending":[null,null,null,4],"size":2,"len":2,"op":null}"#,
        ];
        for json in cases {
            let err = serde_json::from_str::<LazySegmentTree<i64>>(json).unwrap_err();
            assert!(err.to_string().contains("corrupt snapshot"), "{json}: {err}");
        }

        let mut st: LazySegmentTree<i64> = serde_json::from_str(
            r#"{"tree":[0,1,1,2],"pending":[null,null,null,null],"size":2,"len":2,"op":null}"#,
        )
        .unwrap();
        assert_eq!(st.query(0, 1), Ok(1));
    }
}
