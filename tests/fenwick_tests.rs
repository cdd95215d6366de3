use rangetree::{DenseFenwickTree, RangeError, SparseFenwickTree};

#[test]
fn test_dense_concrete_sums() {
    let mut ft = DenseFenwickTree::<i32>::new(5).unwrap();
    ft.add(2, 2).unwrap();
    ft.add(4, 1).unwrap();

    assert_eq!(ft.range_sum(2, 4), Ok(3));
    assert_eq!(ft.range_sum(1, 3), Ok(2));
    assert_eq!(ft.range_sum(0, 4), Ok(3));
}

#[test]
fn test_sparse_concrete_sums() {
    let n: u64 = 1_000_000_000_000_000;
    let t: u64 = 1_000_000_000_000;
    let mut ft = SparseFenwickTree::<u64, i64>::new(n).unwrap();
    ft.add(t - 1, 2).unwrap();
    ft.add(t, 3).unwrap();
    ft.add(n - 1, 1).unwrap();

    assert_eq!(ft.range_sum(0, t), Ok(5));
    assert_eq!(ft.range_sum(0, n - 1), Ok(6));
    assert_eq!(ft.range_sum(t + 1, n - 1), Ok(1));
}

#[test]
fn test_single_point_and_additivity() {
    let n = 37;
    for pos in 0..n {
        let mut ft = DenseFenwickTree::<i64>::new(n).unwrap();
        ft.add(pos, 9).unwrap();
        assert_eq!(ft.range_sum(pos, pos), Ok(9));
        ft.add(pos, -4).unwrap();
        assert_eq!(ft.range_sum(pos, pos), Ok(5));
        assert_eq!(ft.range_sum(0, n - 1), Ok(5));
    }
}

#[test]
fn test_seeded_total() {
    let values: Vec<i64> = (1..=100).map(|v| v * v - 50).collect();
    let expected: i64 = values.iter().sum();

    let dense = DenseFenwickTree::from_values(values.clone()).unwrap();
    assert_eq!(dense.range_sum(0, values.len() - 1), Ok(expected));

    let sparse = SparseFenwickTree::<u64, i64>::from_values(values.clone()).unwrap();
    assert_eq!(sparse.range_sum(0, values.len() as u64 - 1), Ok(expected));
}

#[test]
fn test_dense_capacity_error_and_sparse_fallback() {
    let err = DenseFenwickTree::<i64>::new(usize::MAX).unwrap_err();
    assert!(matches!(err, RangeError::CapacityExceeded { .. }));

    let mut ft = SparseFenwickTree::<u64, i64>::new(u64::MAX).unwrap();
    ft.add(u64::MAX / 2, 3).unwrap();
    assert_eq!(ft.prefix_sum(u64::MAX - 1), Ok(3));
    assert_eq!(ft.range_sum(0, u64::MAX / 2 - 1), Ok(0));
}

#[test]
fn test_invalid_range_is_reported() {
    let ft = DenseFenwickTree::<i32>::new(5).unwrap();
    let err = ft.range_sum(4, 2).unwrap_err();
    assert_eq!(err, RangeError::InvalidRange { from: 4, to: 2 });
    assert_eq!(
        err.to_string(),
        "invalid range: from (4) is greater than to (2)"
    );
}

#[test]
fn test_serde_snapshot() {
    let mut ft = DenseFenwickTree::<i64>::new(8).unwrap();
    ft.add(3, 7).unwrap();
    ft.add(6, -2).unwrap();

    let json = serde_json::to_string(&ft).unwrap();
    let restored: DenseFenwickTree<i64> = serde_json::from_str(&json).unwrap();
    for i in 0..8 {
        assert_eq!(restored.prefix_sum(i), ft.prefix_sum(i));
    }

    let mut sparse = SparseFenwickTree::<u64, i64>::new(1 << 50).unwrap();
    sparse.add(12345, 6).unwrap();
    let json = serde_json::to_string(&sparse).unwrap();
    let restored: SparseFenwickTree<u64, i64> = serde_json::from_str(&json).unwrap();
    assert_eq!(restored.len(), 1 << 50);
    assert_eq!(restored.get(12345), Ok(6));
}
