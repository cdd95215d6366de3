//! Small walkthrough of the range structures.
//!
//! Builds a dense accumulator, a sparse accumulator over a 10^15 domain, and a
//! lazy min tree, then prints a few query results and a JSON snapshot.

use anyhow::{Context, Result};
use rangetree::{DenseFenwickTree, LazySegmentTree, SparseFenwickTree};
use std::io::{self, Write};

fn main() -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let mut bit = DenseFenwickTree::<i64>::new(10).context("allocating dense accumulator")?;
    bit.add(5, 4)?;
    writeln!(out, "dense sum(2, 6) = {}", bit.range_sum(2, 6)?)?;

    let domain: u64 = 1_000_000_000_000_000;
    let mut sparse = SparseFenwickTree::<u64, i64>::new(domain)?;
    sparse.add(999_999_999_999, 2)?;
    sparse.add(1_000_000_000_000, 3)?;
    sparse.add(domain - 1, 1)?;
    writeln!(
        out,
        "sparse sum(0, 10^12) = {}, slots in memory = {}",
        sparse.range_sum(0, 1_000_000_000_000)?,
        sparse.touched_slots()
    )?;

    let mut st = LazySegmentTree::new(vec![3i64, 2, 4, 6, 1]);
    st.add(2, 4, 2)?;
    writeln!(out, "min tree after add(2, 4, 2): {:?}", st.to_vec())?;
    writeln!(out, "min(2, 3) = {}", st.query(2, 3)?)?;

    let snapshot = serde_json::to_string(&bit).context("serializing accumulator")?;
    writeln!(out, "dense snapshot: {snapshot}")?;

    Ok(())
}
