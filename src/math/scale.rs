//! Fixed-point scaling between native token decimals and the internal
//! 18-decimal representation.
//!
//! All stable-curve inputs and outputs pass through this boundary; the
//! constant-product curve never rescales and operates directly on
//! native-decimal integers. Down-scaling truncates (floors) on every
//! conversion.

use primitive_types::U256;

use crate::domain::Decimals;
use crate::error::{AmmError, Result};

/// Returns `10^(18 - decimals)`, the multiplier between a token's native
/// representation and the internal 18-decimal scale.
#[must_use]
pub fn scaling_factor(decimals: Decimals) -> U256 {
    U256::exp10(decimals.gap_to_internal() as usize)
}

/// Converts a native-decimal magnitude to the internal 18-decimal scale.
///
/// # Errors
///
/// Returns [`AmmError::Overflow`] if the scaled value does not fit in a
/// `U256`.
pub fn scale_up(raw: U256, decimals: Decimals) -> Result<U256> {
    raw.checked_mul(scaling_factor(decimals))
        .ok_or(AmmError::Overflow("fixed-point up-scale overflow"))
}

/// Converts an internal 18-decimal magnitude back to native decimals,
/// truncating any fractional part.
#[must_use]
pub fn scale_down(scaled: U256, decimals: Decimals) -> U256 {
    scaled / scaling_factor(decimals)
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn dec(value: u8) -> Decimals {
        let Ok(d) = Decimals::new(value) else {
            panic!("invalid decimals in test: {value}");
        };
        d
    }

    #[test]
    fn factor_for_six_decimals() {
        assert_eq!(scaling_factor(dec(6)), U256::exp10(12));
    }

    #[test]
    fn factor_for_eighteen_decimals_is_one() {
        assert_eq!(scaling_factor(dec(18)), U256::one());
    }

    #[test]
    fn scale_up_usdc() {
        // 1 USDC (6 decimals) becomes 10^18 internally.
        let scaled = scale_up(U256::from(1_000_000u64), dec(6));
        assert_eq!(scaled, Ok(U256::exp10(18)));
    }

    #[test]
    fn scale_up_native_eighteen_is_identity() {
        let raw = U256::from(123_456_789u64);
        assert_eq!(scale_up(raw, dec(18)), Ok(raw));
    }

    #[test]
    fn scale_up_overflow() {
        assert!(scale_up(U256::MAX, dec(0)).is_err());
    }

    #[test]
    fn scale_down_truncates() {
        // 1.5 units of a 6-decimal token in internal scale.
        let scaled = U256::from(1_500_000u64) * U256::exp10(12);
        assert_eq!(scale_down(scaled, dec(6)), U256::from(1_500_000u64));

        // A sub-unit remainder in internal scale is floored away.
        let scaled_plus_dust = scaled + U256::from(999u64);
        assert_eq!(scale_down(scaled_plus_dust, dec(6)), U256::from(1_500_000u64));
    }

    #[test]
    fn round_trip_is_identity_without_dust() {
        let raw = U256::from(42_000u64);
        let Ok(scaled) = scale_up(raw, dec(8)) else {
            panic!("expected Ok");
        };
        assert_eq!(scale_down(scaled, dec(8)), raw);
    }
}
