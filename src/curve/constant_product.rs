//! Constant-product curve (`x · y = k`).
//!
//! Operates directly on native-decimal integers; this curve never
//! crosses the fixed-point scaling boundary.

use primitive_types::U256;

use super::Curve;
use crate::domain::{Amount, SwapFee, FEE_ACCURACY};
use crate::error::AmmError;

/// The constant-product curve. Stateless: the pair's reserves carry all
/// pricing information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ConstantProduct;

impl Curve for ConstantProduct {
    /// `out = ⌊in·(FEE_ACCURACY − fee)·r_out / (r_in·FEE_ACCURACY + in·(FEE_ACCURACY − fee))⌋`
    fn quote_output_given_input(
        &self,
        reserve_in: &Amount,
        reserve_out: &Amount,
        amount_in: U256,
        fee: SwapFee,
    ) -> Result<U256, AmmError> {
        let amount_in_with_fee = amount_in
            .checked_mul(U256::from(fee.complement()))
            .ok_or(AmmError::Overflow("cp quote: fee-adjusted input overflow"))?;
        let numerator = amount_in_with_fee
            .checked_mul(reserve_out.raw())
            .ok_or(AmmError::Overflow("cp quote: numerator overflow"))?;
        let denominator = reserve_in
            .raw()
            .checked_mul(U256::from(FEE_ACCURACY))
            .ok_or(AmmError::Overflow("cp quote: denominator overflow"))?
            .checked_add(amount_in_with_fee)
            .ok_or(AmmError::Overflow("cp quote: denominator sum overflow"))?;

        numerator
            .checked_div(denominator)
            .ok_or(AmmError::DivisionByZero)
    }

    /// `in = ⌊r_in·out·FEE_ACCURACY / ((r_out − out)·(FEE_ACCURACY − fee))⌋ + 1`
    ///
    /// The trailing `+1` guards against under-collection from the floor
    /// division.
    fn quote_input_given_output(
        &self,
        reserve_in: &Amount,
        reserve_out: &Amount,
        amount_out: U256,
        fee: SwapFee,
    ) -> Result<U256, AmmError> {
        let remaining_out = reserve_out
            .raw()
            .checked_sub(amount_out)
            .ok_or(AmmError::InsufficientReserves(
                "requested output exceeds reserve",
            ))?;

        let numerator = reserve_in
            .raw()
            .checked_mul(amount_out)
            .ok_or(AmmError::Overflow("cp quote: numerator overflow"))?
            .checked_mul(U256::from(FEE_ACCURACY))
            .ok_or(AmmError::Overflow("cp quote: numerator scale overflow"))?;
        let denominator = remaining_out
            .checked_mul(U256::from(fee.complement()))
            .ok_or(AmmError::Overflow("cp quote: denominator overflow"))?;

        numerator
            .checked_div(denominator)
            .ok_or(AmmError::DivisionByZero)?
            .checked_add(U256::one())
            .ok_or(AmmError::Overflow("cp quote: input rounding overflow"))
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::{Decimals, Token, TokenAddress};

    fn reserve(addr_byte: u8, raw: u64) -> Amount {
        let Ok(d) = Decimals::new(6) else {
            panic!("valid decimals");
        };
        let token = Token::new(1, TokenAddress::from_bytes([addr_byte; 20]), d);
        Amount::new(token, U256::from(raw))
    }

    fn fee_30bp() -> SwapFee {
        let Ok(fee) = SwapFee::new(3_000) else {
            panic!("valid fee");
        };
        fee
    }

    // -- quote_output_given_input -------------------------------------------

    #[test]
    fn exact_in_reference_quote() {
        // out = ⌊1000·997000·1000000 / (1000000·1000000 + 1000·997000)⌋ = 996
        let out = ConstantProduct.quote_output_given_input(
            &reserve(1, 1_000_000),
            &reserve(2, 1_000_000),
            U256::from(1_000u64),
            fee_30bp(),
        );
        assert_eq!(out, Ok(U256::from(996u64)));
    }

    #[test]
    fn exact_in_zero_fee() {
        // out = ⌊1000·1000000 / (1000000 + 1000)⌋ = ⌊999.000999…⌋ = 999
        let out = ConstantProduct.quote_output_given_input(
            &reserve(1, 1_000_000),
            &reserve(2, 1_000_000),
            U256::from(1_000u64),
            SwapFee::ZERO,
        );
        assert_eq!(out, Ok(U256::from(999u64)));
    }

    #[test]
    fn exact_in_dust_floors_to_zero() {
        let out = ConstantProduct.quote_output_given_input(
            &reserve(1, 1_000_000_000),
            &reserve(2, 1_000),
            U256::from(1u64),
            fee_30bp(),
        );
        assert_eq!(out, Ok(U256::zero()));
    }

    // -- quote_input_given_output -------------------------------------------

    #[test]
    fn exact_out_reference_quote() {
        // in = ⌊1000000·996·1000000 / ((1000000 − 996)·997000)⌋ + 1 = 1000
        let input = ConstantProduct.quote_input_given_output(
            &reserve(1, 1_000_000),
            &reserve(2, 1_000_000),
            U256::from(996u64),
            fee_30bp(),
        );
        assert_eq!(input, Ok(U256::from(1_000u64)));
    }

    #[test]
    fn exact_out_always_adds_one() {
        // Even an exactly-divisible quote carries the conservative +1.
        let input = ConstantProduct.quote_input_given_output(
            &reserve(1, 1_000_000),
            &reserve(2, 2_000_000),
            U256::from(1_000_000u64),
            SwapFee::ZERO,
        );
        // 1000000·1000000 / 1000000 = 1000000, plus one.
        assert_eq!(input, Ok(U256::from(1_000_001u64)));
    }

    #[test]
    fn exact_out_above_reserve_rejected() {
        let input = ConstantProduct.quote_input_given_output(
            &reserve(1, 1_000_000),
            &reserve(2, 1_000_000),
            U256::from(1_000_001u64),
            fee_30bp(),
        );
        assert_eq!(
            input,
            Err(AmmError::InsufficientReserves(
                "requested output exceeds reserve"
            ))
        );
    }

    #[test]
    fn exact_out_equal_to_reserve_is_division_by_zero() {
        // The engine rejects this earlier; at curve level the drained
        // reserve shows up as a zero denominator.
        let input = ConstantProduct.quote_input_given_output(
            &reserve(1, 1_000_000),
            &reserve(2, 1_000_000),
            U256::from(1_000_000u64),
            fee_30bp(),
        );
        assert_eq!(input, Err(AmmError::DivisionByZero));
    }

    // -- Round trip ---------------------------------------------------------

    #[test]
    fn round_trip_never_favours_trader() {
        let r_in = reserve(1, 1_000_000);
        let r_out = reserve(2, 1_000_000);
        let amount_in = U256::from(12_345u64);

        let Ok(out) = ConstantProduct.quote_output_given_input(&r_in, &r_out, amount_in, fee_30bp())
        else {
            panic!("expected Ok");
        };
        let Ok(back) = ConstantProduct.quote_input_given_output(&r_in, &r_out, out, fee_30bp())
        else {
            panic!("expected Ok");
        };
        assert!(back >= amount_in);
    }
}
