//! Modular arithmetic helpers.

use num_traits::PrimInt;

/// Computes `base^exp mod modulus` by square-and-multiply.
///
/// `0^0` is taken to be `1`. Intermediate products are `modulus^2`, so
/// `modulus` must fit in half the bits of `T`.
///
/// # Panics
/// Panics if `modulus` is zero or `exp` is negative.
pub fn mod_pow<T: PrimInt>(base: T, exp: T, modulus: T) -> T {
    assert!(!modulus.is_zero(), "modulus must be non-zero");
    assert!(exp >= T::zero(), "exponent must be non-negative");

    let mut result = T::one() % modulus;
    let mut base = base % modulus;
    let mut exp = exp;
    while !exp.is_zero() {
        if (exp & T::one()) == T::one() {
            result = (result * base) % modulus;
        }
        base = (base * base) % modulus;
        exp = exp >> 1;
    }
    result
}

/// Multiplicative inverse of `value` modulo a prime `modulus`, via Fermat's
/// little theorem: `value^(modulus - 2)`.
///
/// Returns `None` when `value` is a multiple of `modulus`.
///
/// # Panics
/// Panics if `modulus` is zero.
pub fn mod_inverse<T: PrimInt>(value: T, modulus: T) -> Option<T> {
    assert!(!modulus.is_zero(), "modulus must be non-zero");
    if (value % modulus).is_zero() {
        return None;
    }
    let two = T::one() + T::one();
    Some(mod_pow(value, modulus - two, modulus))
}
