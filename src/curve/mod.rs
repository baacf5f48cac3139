//! Two-variant curve model: constant-product and StableSwap.
//!
//! [`Curve`] is the pricing abstraction every curve implements. It
//! exposes the two quote operations consumed by the pair engine:
//!
//! 1. **Exact-in** — [`Curve::quote_output_given_input`] prices a fixed
//!    input amount.
//! 2. **Exact-out** — [`Curve::quote_input_given_output`] prices a fixed
//!    output amount.
//!
//! # Fee Deduction Invariant
//!
//! Both curves deduct the fee from the *input* side:
//!
//! ```text
//! net_input  = amount_in × (FEE_ACCURACY − fee) / FEE_ACCURACY
//! amount_out = price_curve(net_input)
//! ```
//!
//! The constant-product formulas fold the division into the quote
//! fraction so no precision is lost; the stable curve deducts up front
//! in native decimals before crossing the fixed-point boundary.
//!
//! # Dispatch Model
//!
//! Curves are dispatched via the [`CurveVariant`] enum (not `dyn` trait
//! objects), so a pair's curve is a plain value with static dispatch and
//! the amplification coefficient cannot be absent for the stable variant.

mod constant_product;
mod stable_swap;
mod variant;

pub use constant_product::ConstantProduct;
pub use stable_swap::StableSwap;
pub use variant::CurveVariant;

use primitive_types::U256;

use crate::domain::{Amount, SwapFee};
use crate::error::AmmError;

/// Pricing abstraction implemented by both curve variants.
///
/// Reserves are passed as [`Amount`]s so the stable curve can read token
/// decimals at the fixed-point boundary; trade quantities and results
/// are raw magnitudes in the native decimals of the input (respectively
/// output) token.
///
/// # Errors
///
/// Methods return [`Result<U256, AmmError>`](crate::error::Result).
/// Common variants:
///
/// - [`AmmError::InsufficientReserves`] — requested output exceeds the
///   available reserve.
/// - [`AmmError::Overflow`] — checked 256-bit arithmetic overflowed.
/// - [`AmmError::DivisionByZero`] — degenerate balances reached a divisor.
pub trait Curve {
    /// Quotes the output amount bought with an exact input amount.
    ///
    /// Returns the raw output magnitude in the output token's native
    /// decimals, floored.
    fn quote_output_given_input(
        &self,
        reserve_in: &Amount,
        reserve_out: &Amount,
        amount_in: U256,
        fee: SwapFee,
    ) -> Result<U256, AmmError>;

    /// Quotes the input amount required to buy an exact output amount.
    ///
    /// Returns the raw input magnitude in the input token's native
    /// decimals, rounded so the trader never underpays.
    fn quote_input_given_output(
        &self,
        reserve_in: &Amount,
        reserve_out: &Amount,
        amount_out: U256,
        fee: SwapFee,
    ) -> Result<U256, AmmError>;
}
