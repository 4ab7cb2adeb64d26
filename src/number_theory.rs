//! Greatest common divisor and divisor enumeration.
//!
//! `gcd` works on [`Real`] values with the floating-point remainder, so
//! non-integer radii such as `40.5` still produce a finite closure count.
//! `fmod` is exact, which guarantees the Euclidean loop terminates for any
//! pair of finite inputs.

use crate::float_types::Real;

/// Euclidean greatest common divisor with real-valued `%` semantics.
///
/// - `gcd(a, 0) = a`
/// - `gcd(0, 0) = 0`, callers must guard any division by the result
/// - a non-finite argument yields `NaN` rather than an endless loop
///
/// # Example
/// ```
/// use spirors::number_theory::gcd;
/// assert_eq!(gcd(12.0, 18.0), 6.0);
/// assert_eq!(gcd(7.0, 0.0), 7.0);
/// ```
pub fn gcd(a: Real, b: Real) -> Real {
    if !a.is_finite() || !b.is_finite() {
        return Real::NAN;
    }
    let (mut a, mut b) = (a, b);
    while b != 0.0 {
        let remainder = a % b;
        a = b;
        b = remainder;
    }
    a
}

/// All positive divisors of `n` in ascending order.
///
/// Trial division runs up to ⌊√n⌋; each hit contributes itself and its
/// cofactor, and a perfect-square root is only reported once.
/// `factors(0)` is empty.
///
/// # Example
/// ```
/// use spirors::number_theory::factors;
/// assert_eq!(factors(12), vec![1, 2, 3, 4, 6, 12]);
/// assert_eq!(factors(36), vec![1, 2, 3, 4, 6, 9, 12, 18, 36]);
/// ```
pub fn factors(n: u64) -> Vec<u64> {
    let mut low = Vec::new();
    let mut high = Vec::new();

    let mut i = 1u64;
    while i <= n / i {
        if n % i == 0 {
            low.push(i);
            let cofactor = n / i;
            if cofactor != i {
                high.push(cofactor);
            }
        }
        i += 1;
    }

    low.extend(high.into_iter().rev());
    low
}

/// Divisors of `n` that fall inside `[min, max]` (both inclusive, real bounds).
pub(crate) fn factors_in_range(n: u64, min: Real, max: Real) -> Vec<u64> {
    factors(n)
        .into_iter()
        .filter(|&f| {
            let f = f as Real;
            f >= min && f <= max
        })
        .collect()
}

/// Truncate a radius to the non-negative integer used for factorization.
#[inline]
pub(crate) fn integral_part(value: Real) -> u64 {
    if value.is_finite() && value > 0.0 {
        value.trunc() as u64
    } else {
        0
    }
}
