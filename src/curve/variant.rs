//! Enum dispatch over the two curve variants.

use primitive_types::U256;
use serde::{Deserialize, Serialize};

use super::{ConstantProduct, Curve, StableSwap};
use crate::domain::{Amount, SwapFee};
use crate::error::AmmError;

/// A pair's pricing curve: constant-product or StableSwap.
///
/// The stable variant carries its amplification coefficient in the
/// variant itself, so a stable pair can never exist without one. The
/// wire-level integer discriminant used by deployed factories is only
/// accepted at the [`from_id`](Self::from_id) boundary.
///
/// # Examples
///
/// ```
/// use amm_quoter::curve::CurveVariant;
/// use amm_quoter::U256;
///
/// let cp = CurveVariant::from_id(0, None).expect("valid");
/// assert_eq!(cp, CurveVariant::ConstantProduct);
///
/// let stable = CurveVariant::from_id(1, Some(U256::from(100_000u64))).expect("valid");
/// assert_eq!(stable.curve_id(), 1);
/// assert!(CurveVariant::from_id(2, None).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CurveVariant {
    /// Constant-product curve (`x · y = k`).
    ConstantProduct,
    /// StableSwap curve with a precise amplification coefficient
    /// (pre-multiplied by [`A_PRECISION`](crate::math::stable::A_PRECISION)).
    StableSwap {
        /// The precise amplification coefficient.
        amplification_coefficient: U256,
    },
}

impl CurveVariant {
    /// Constructs a variant from the wire-level curve discriminant.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidCurveId`] for discriminants other than 0 or 1.
    /// - [`AmmError::MissingAmplificationCoefficient`] for discriminant 1
    ///   without a coefficient.
    pub fn from_id(id: u8, amplification_coefficient: Option<U256>) -> Result<Self, AmmError> {
        match id {
            0 => Ok(Self::ConstantProduct),
            1 => amplification_coefficient
                .map(|amplification_coefficient| Self::StableSwap {
                    amplification_coefficient,
                })
                .ok_or(AmmError::MissingAmplificationCoefficient),
            other => Err(AmmError::InvalidCurveId(other)),
        }
    }

    /// Returns the wire-level curve discriminant (0 or 1).
    #[must_use]
    pub const fn curve_id(&self) -> u8 {
        match self {
            Self::ConstantProduct => 0,
            Self::StableSwap { .. } => 1,
        }
    }

    /// Returns the amplification coefficient, present iff this is the
    /// stable variant.
    #[must_use]
    pub const fn amplification_coefficient(&self) -> Option<U256> {
        match self {
            Self::ConstantProduct => None,
            Self::StableSwap {
                amplification_coefficient,
            } => Some(*amplification_coefficient),
        }
    }

    /// Returns `true` for the stable variant.
    #[must_use]
    pub const fn is_stable(&self) -> bool {
        matches!(self, Self::StableSwap { .. })
    }
}

impl Curve for CurveVariant {
    fn quote_output_given_input(
        &self,
        reserve_in: &Amount,
        reserve_out: &Amount,
        amount_in: U256,
        fee: SwapFee,
    ) -> Result<U256, AmmError> {
        match self {
            Self::ConstantProduct => {
                ConstantProduct.quote_output_given_input(reserve_in, reserve_out, amount_in, fee)
            }
            Self::StableSwap {
                amplification_coefficient,
            } => StableSwap::new(*amplification_coefficient).quote_output_given_input(
                reserve_in,
                reserve_out,
                amount_in,
                fee,
            ),
        }
    }

    fn quote_input_given_output(
        &self,
        reserve_in: &Amount,
        reserve_out: &Amount,
        amount_out: U256,
        fee: SwapFee,
    ) -> Result<U256, AmmError> {
        match self {
            Self::ConstantProduct => {
                ConstantProduct.quote_input_given_output(reserve_in, reserve_out, amount_out, fee)
            }
            Self::StableSwap {
                amplification_coefficient,
            } => StableSwap::new(*amplification_coefficient).quote_input_given_output(
                reserve_in,
                reserve_out,
                amount_out,
                fee,
            ),
        }
    }
}
