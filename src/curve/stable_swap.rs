//! StableSwap curve (Curve-style invariant).
//!
//! Specialised for low-slippage swaps between similarly-priced (pegged)
//! assets. All balances cross the fixed-point boundary into the internal
//! 18-decimal scale before the invariant solvers run, and results are
//! floored back to native decimals on the way out.

use primitive_types::U256;

use super::Curve;
use crate::domain::{Amount, SwapFee, FEE_ACCURACY};
use crate::error::AmmError;
use crate::math::scale::{scale_down, scale_up};
use crate::math::stable::{compute_invariant, solve_balance};

/// The StableSwap curve, parameterised by its amplification coefficient.
///
/// The coefficient is *precise*: pre-multiplied by
/// [`A_PRECISION`](crate::math::stable::A_PRECISION), so `A = 2000` is
/// stored as `200_000`. Higher values flatten the curve towards
/// constant-sum pricing near parity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StableSwap {
    amplification_coefficient: U256,
}

impl StableSwap {
    /// Creates a stable curve with the given precise amplification
    /// coefficient.
    pub const fn new(amplification_coefficient: U256) -> Self {
        Self {
            amplification_coefficient,
        }
    }

    /// Returns the precise amplification coefficient.
    #[must_use]
    pub const fn amplification_coefficient(&self) -> U256 {
        self.amplification_coefficient
    }
}

impl Curve for StableSwap {
    /// Deducts the fee from the input, scales everything to 18 decimals,
    /// computes the invariant over the *original* balances, solves for
    /// the post-trade output balance, and floors the difference back to
    /// native decimals.
    fn quote_output_given_input(
        &self,
        reserve_in: &Amount,
        reserve_out: &Amount,
        amount_in: U256,
        fee: SwapFee,
    ) -> Result<U256, AmmError> {
        let net_in = amount_in
            .checked_mul(U256::from(fee.complement()))
            .ok_or(AmmError::Overflow("stable quote: fee deduction overflow"))?
            / U256::from(FEE_ACCURACY);

        let in_decimals = reserve_in.token().decimals();
        let out_decimals = reserve_out.token().decimals();
        let scaled_in = scale_up(reserve_in.raw(), in_decimals)?;
        let scaled_out = scale_up(reserve_out.raw(), out_decimals)?;
        let scaled_net_in = scale_up(net_in, in_decimals)?;

        let d = compute_invariant(scaled_in, scaled_out, self.amplification_coefficient)?;
        let new_in_balance = scaled_in
            .checked_add(scaled_net_in)
            .ok_or(AmmError::Overflow("stable quote: input balance overflow"))?;
        let new_out_balance = solve_balance(new_in_balance, d, self.amplification_coefficient)?;

        let out_scaled = scaled_out
            .checked_sub(new_out_balance)
            .ok_or(AmmError::Overflow("stable quote: output balance underflow"))?;
        Ok(scale_down(out_scaled, out_decimals))
    }

    /// Mirror of the exact-in case: removes the requested output from the
    /// output balance, solves for the required input balance, floors the
    /// difference to native decimals, and grosses it up by the fee.
    fn quote_input_given_output(
        &self,
        reserve_in: &Amount,
        reserve_out: &Amount,
        amount_out: U256,
        fee: SwapFee,
    ) -> Result<U256, AmmError> {
        let in_decimals = reserve_in.token().decimals();
        let out_decimals = reserve_out.token().decimals();
        let scaled_in = scale_up(reserve_in.raw(), in_decimals)?;
        let scaled_out = scale_up(reserve_out.raw(), out_decimals)?;
        let scaled_amount_out = scale_up(amount_out, out_decimals)?;

        let d = compute_invariant(scaled_in, scaled_out, self.amplification_coefficient)?;
        let reduced_out_balance =
            scaled_out
                .checked_sub(scaled_amount_out)
                .ok_or(AmmError::InsufficientReserves(
                    "requested output exceeds reserve",
                ))?;
        let new_in_balance = solve_balance(reduced_out_balance, d, self.amplification_coefficient)?;

        let net_scaled = new_in_balance
            .checked_sub(scaled_in)
            .ok_or(AmmError::Overflow("stable quote: input balance underflow"))?;
        let net_in = scale_down(net_scaled, in_decimals);

        net_in
            .checked_mul(U256::from(FEE_ACCURACY))
            .ok_or(AmmError::Overflow("stable quote: fee gross-up overflow"))
            .map(|grossed| grossed / U256::from(fee.complement()))
    }
}
