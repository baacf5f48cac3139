//! Newton-Raphson solvers for the StableSwap invariant.
//!
//! Two solvers over integer balances in the internal 18-decimal scale:
//! [`compute_invariant`] derives the invariant `D` from a pair of
//! balances and an amplification coefficient, and [`solve_balance`]
//! inverts the curve, finding one balance given `D`, the other balance,
//! and the coefficient.
//!
//! # Invariant (n = 2 tokens)
//!
//! ```text
//! A·n·(x + y) + D = A·D·n + D³ / (4·x·y)
//! ```
//!
//! # Numeric contract
//!
//! Every intermediate division truncates, and divisions are applied in
//! the exact sequence used by the reference pair contract, not in any
//! algebraically equivalent order. Both loops cap at 256 iterations and
//! stop once consecutive iterates differ by at most one unit; if the cap
//! is reached, the last iterate is returned as-is rather than raising an
//! error, again matching the reference behaviour.

use primitive_types::U256;

use crate::error::{AmmError, Result};

/// Precision factor for amplification coefficients. Coefficients are
/// stored pre-multiplied by this value, so `A = 2000` is passed as
/// `200_000`.
pub const A_PRECISION: u64 = 100;

/// Iteration cap shared by both solvers.
const MAX_LOOP_LIMIT: u32 = 256;

/// Number of tokens in a pair.
const N_COINS: u64 = 2;

/// Convergence test: consecutive iterates within one unit of each other.
fn within_one(a: U256, b: U256) -> bool {
    let diff = if a > b { a - b } else { b - a };
    diff <= U256::one()
}

/// Computes the StableSwap invariant `D` for two balances.
///
/// `xp0` and `xp1` are balances in the internal 18-decimal scale;
/// `amplification_coefficient` is precise (pre-multiplied by
/// [`A_PRECISION`]). A zero balance sum yields `D = 0`.
///
/// Iteration formula, starting from `D = xp0 + xp1`:
///
/// ```text
/// d_p = D·D/xp0·D/xp1/4
/// D   = (2A·s/A_PRECISION + 2·d_p)·D / ((2A/A_PRECISION − 1)·D + 3·d_p)
/// ```
///
/// # Errors
///
/// - [`AmmError::Overflow`] if an intermediate product exceeds `U256`,
///   or if the coefficient is below [`A_PRECISION`] (`A < 1`).
/// - [`AmmError::DivisionByZero`] if exactly one balance is zero.
///
/// Non-convergence within 256 iterations is *not* an error.
pub fn compute_invariant(xp0: U256, xp1: U256, amplification_coefficient: U256) -> Result<U256> {
    let s = xp0
        .checked_add(xp1)
        .ok_or(AmmError::Overflow("invariant: balance sum overflow"))?;
    if s.is_zero() {
        return Ok(U256::zero());
    }

    let a_precision = U256::from(A_PRECISION);
    let n_a = amplification_coefficient
        .checked_mul(U256::from(N_COINS))
        .ok_or(AmmError::Overflow("invariant: 2A overflow"))?;
    let ann_reduced = (n_a / a_precision)
        .checked_sub(U256::one())
        .ok_or(AmmError::Overflow("invariant: coefficient below precision"))?;

    let mut d = s;
    for _ in 0..MAX_LOOP_LIMIT {
        // d_p = D³ / (4·xp0·xp1), as sequential truncating divisions.
        let mut d_p = d
            .checked_mul(d)
            .ok_or(AmmError::Overflow("invariant: D² overflow"))?
            .checked_div(xp0)
            .ok_or(AmmError::DivisionByZero)?;
        d_p = d_p
            .checked_mul(d)
            .ok_or(AmmError::Overflow("invariant: D³ overflow"))?
            .checked_div(xp1)
            .ok_or(AmmError::DivisionByZero)?
            / U256::from(4u64);

        let d_prev = d;

        let num_inner = n_a
            .checked_mul(s)
            .ok_or(AmmError::Overflow("invariant: 2A·s overflow"))?
            / a_precision;
        let numerator = num_inner
            .checked_add(
                d_p.checked_mul(U256::from(2u64))
                    .ok_or(AmmError::Overflow("invariant: 2·d_p overflow"))?,
            )
            .ok_or(AmmError::Overflow("invariant: numerator overflow"))?
            .checked_mul(d)
            .ok_or(AmmError::Overflow("invariant: numerator·D overflow"))?;

        let denominator = ann_reduced
            .checked_mul(d)
            .ok_or(AmmError::Overflow("invariant: denominator overflow"))?
            .checked_add(
                d_p.checked_mul(U256::from(3u64))
                    .ok_or(AmmError::Overflow("invariant: 3·d_p overflow"))?,
            )
            .ok_or(AmmError::Overflow("invariant: denominator sum overflow"))?;

        d = numerator
            .checked_div(denominator)
            .ok_or(AmmError::DivisionByZero)?;

        if within_one(d, d_prev) {
            break;
        }
    }

    Ok(d)
}

/// Solves for one balance given the invariant, the other balance, and
/// the amplification coefficient.
///
/// `new_balance` is the post-trade balance of the *known* side in the
/// internal 18-decimal scale. Derived from rearranging the invariant
/// polynomial for a single unknown `y`:
///
/// ```text
/// c = D²/(2·new_balance) · D·A_PRECISION/(2·2A)
/// b = new_balance + D·A_PRECISION/2A
/// y = (y² + c) / (2y + b − D)      starting from y = D
/// ```
///
/// # Errors
///
/// - [`AmmError::Overflow`] on intermediate overflow or if the iteration
///   denominator underflows.
/// - [`AmmError::DivisionByZero`] if `new_balance` or the coefficient is
///   zero.
///
/// Non-convergence within 256 iterations is *not* an error.
pub fn solve_balance(new_balance: U256, invariant: U256, amplification_coefficient: U256) -> Result<U256> {
    let a_precision = U256::from(A_PRECISION);
    let n_a = amplification_coefficient
        .checked_mul(U256::from(N_COINS))
        .ok_or(AmmError::Overflow("solve: 2A overflow"))?;

    let two_balance = new_balance
        .checked_mul(U256::from(2u64))
        .ok_or(AmmError::Overflow("solve: 2·balance overflow"))?;
    let mut c = invariant
        .checked_mul(invariant)
        .ok_or(AmmError::Overflow("solve: D² overflow"))?
        .checked_div(two_balance)
        .ok_or(AmmError::DivisionByZero)?;
    c = c
        .checked_mul(invariant)
        .ok_or(AmmError::Overflow("solve: c·D overflow"))?
        .checked_mul(a_precision)
        .ok_or(AmmError::Overflow("solve: c·A_PRECISION overflow"))?
        .checked_div(
            n_a.checked_mul(U256::from(2u64))
                .ok_or(AmmError::Overflow("solve: 4A overflow"))?,
        )
        .ok_or(AmmError::DivisionByZero)?;

    let b = new_balance
        .checked_add(
            invariant
                .checked_mul(a_precision)
                .ok_or(AmmError::Overflow("solve: D·A_PRECISION overflow"))?
                .checked_div(n_a)
                .ok_or(AmmError::DivisionByZero)?,
        )
        .ok_or(AmmError::Overflow("solve: b overflow"))?;

    let mut y = invariant;
    for _ in 0..MAX_LOOP_LIMIT {
        let y_prev = y;

        let numerator = y
            .checked_mul(y)
            .ok_or(AmmError::Overflow("solve: y² overflow"))?
            .checked_add(c)
            .ok_or(AmmError::Overflow("solve: numerator overflow"))?;
        let denominator = y
            .checked_mul(U256::from(2u64))
            .ok_or(AmmError::Overflow("solve: 2y overflow"))?
            .checked_add(b)
            .ok_or(AmmError::Overflow("solve: denominator overflow"))?
            .checked_sub(invariant)
            .ok_or(AmmError::Overflow("solve: denominator underflow"))?;

        y = numerator
            .checked_div(denominator)
            .ok_or(AmmError::DivisionByZero)?;

        if within_one(y, y_prev) {
            break;
        }
    }

    Ok(y)
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn units(n: u64) -> U256 {
        U256::from(n) * U256::exp10(18)
    }

    fn precise(a: u64) -> U256 {
        U256::from(a * A_PRECISION)
    }

    // -- compute_invariant --------------------------------------------------

    #[test]
    fn zero_balances_yield_zero() {
        assert_eq!(
            compute_invariant(U256::zero(), U256::zero(), precise(100)),
            Ok(U256::zero())
        );
    }

    #[test]
    fn balanced_pool_converges_to_sum() {
        // At perfect parity the invariant equals the balance sum exactly.
        let Ok(d) = compute_invariant(units(1_000), units(1_000), precise(2_000)) else {
            panic!("expected Ok");
        };
        let diff = if d > units(2_000) {
            d - units(2_000)
        } else {
            units(2_000) - d
        };
        assert!(diff <= U256::one());
    }

    #[test]
    fn unbalanced_pool_between_bounds() {
        // For x != y the invariant sits strictly between the
        // constant-product bound 2·√(x·y) and the constant-sum bound x + y.
        let Ok(d) = compute_invariant(units(1_000), units(500), precise(100)) else {
            panic!("expected Ok");
        };
        let geometric = crate::math::sqrt::isqrt(units(1_000) * units(500)) * U256::from(2u64);
        assert!(d > geometric);
        assert!(d < units(1_500));
    }

    #[test]
    fn higher_amplification_flattens_curve() {
        // Larger A pulls the invariant towards the constant-sum value.
        let (Ok(d_low), Ok(d_high)) = (
            compute_invariant(units(1_000), units(100), precise(10)),
            compute_invariant(units(1_000), units(100), precise(5_000)),
        ) else {
            panic!("expected Ok");
        };
        assert!(d_high > d_low);
        assert!(d_high < units(1_100));
    }

    #[test]
    fn one_sided_zero_balance_is_division_by_zero() {
        assert_eq!(
            compute_invariant(units(1_000), U256::zero(), precise(100)),
            Err(AmmError::DivisionByZero)
        );
    }

    #[test]
    fn coefficient_below_precision_rejected() {
        assert_eq!(
            compute_invariant(units(1_000), units(1_000), U256::from(40u64)),
            Err(AmmError::Overflow("invariant: coefficient below precision"))
        );
    }

    // -- solve_balance ------------------------------------------------------

    #[test]
    fn round_trip_recovers_balance() {
        // Solving with the untouched counter-balance must recover the
        // other original balance (up to the unit convergence tolerance).
        let (x, y) = (units(1_000), units(1_000));
        let Ok(d) = compute_invariant(x, y, precise(100)) else {
            panic!("expected Ok");
        };
        let Ok(solved) = solve_balance(x, d, precise(100)) else {
            panic!("expected Ok");
        };
        let diff = if solved > y { solved - y } else { y - solved };
        assert!(diff <= U256::from(2u64), "diff was {diff}");
    }

    #[test]
    fn larger_input_balance_lowers_output_balance() {
        let (x, y) = (units(1_000), units(1_000));
        let Ok(d) = compute_invariant(x, y, precise(100)) else {
            panic!("expected Ok");
        };
        let Ok(after_trade) = solve_balance(x + units(10), d, precise(100)) else {
            panic!("expected Ok");
        };
        assert!(after_trade < y);
        // Near parity the curve trades close to 1:1, so ~10 units in
        // means slightly less than 10 units out.
        assert!(y - after_trade < units(10));
        assert!(y - after_trade > units(9));
    }

    #[test]
    fn zero_balance_is_division_by_zero() {
        let Ok(d) = compute_invariant(units(1_000), units(1_000), precise(100)) else {
            panic!("expected Ok");
        };
        assert_eq!(
            solve_balance(U256::zero(), d, precise(100)),
            Err(AmmError::DivisionByZero)
        );
    }

    #[test]
    fn solution_satisfies_invariant() {
        // Recomputing D over (x_new, y_solved) must land within a few
        // units of the original D.
        let (x, y) = (units(5_000), units(3_000));
        let a = precise(250);
        let Ok(d) = compute_invariant(x, y, a) else {
            panic!("expected Ok");
        };
        let x_new = x + units(100);
        let Ok(y_new) = solve_balance(x_new, d, a) else {
            panic!("expected Ok");
        };
        let Ok(d_check) = compute_invariant(x_new, y_new, a) else {
            panic!("expected Ok");
        };
        let diff = if d_check > d { d_check - d } else { d - d_check };
        assert!(diff <= U256::from(4u64), "diff was {diff}");
    }
}
