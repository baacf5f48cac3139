//! Integer square root.

use primitive_types::U256;

/// Integer square root via Newton's method.
///
/// Returns the largest `r` such that `r * r <= n`.
#[must_use]
pub fn isqrt(n: U256) -> U256 {
    if n.is_zero() {
        return U256::zero();
    }
    let two = U256::from(2u64);
    let mut x = n;
    // Ceiling of n/2, computed without risking overflow on n + 1.
    let mut y = n / two + n % two;
    while y < x {
        x = y;
        y = (x + n / x) / two;
    }
    x
}
