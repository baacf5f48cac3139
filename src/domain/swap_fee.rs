//! Swap fee rate in parts per million.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::error::AmmError;

/// Denominator defining fee-rate precision: fees are parts-per-million.
pub const FEE_ACCURACY: u32 = 1_000_000;

/// A swap fee expressed in parts per `FEE_ACCURACY` (1 ppm = 0.0001%).
///
/// Construction is validated: the fee must lie in `[0, FEE_ACCURACY)`,
/// i.e. a pair can be fee-free but can never confiscate the whole input.
///
/// # Examples
///
/// ```
/// use amm_quoter::domain::SwapFee;
///
/// let fee = SwapFee::new(3_000).expect("0.3% is valid");
/// assert_eq!(fee.get(), 3_000);
/// assert_eq!(fee.complement(), 997_000);
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct SwapFee(u32);

impl SwapFee {
    /// Zero fee.
    pub const ZERO: Self = Self(0);

    /// The default 0.3% fee applied when a pair does not specify one.
    pub const DEFAULT: Self = Self(3_000);

    /// Creates a new `SwapFee` after validating the range.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidFee`] if `ppm >= FEE_ACCURACY`.
    pub const fn new(ppm: u32) -> Result<Self, AmmError> {
        if ppm >= FEE_ACCURACY {
            return Err(AmmError::InvalidFee(
                "fee must be below FEE_ACCURACY (100%)",
            ));
        }
        Ok(Self(ppm))
    }

    /// Returns the raw fee in parts per million.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Returns `FEE_ACCURACY - fee`, the fraction of the input kept by
    /// the trade after the fee deduction. Never zero.
    #[must_use]
    pub const fn complement(&self) -> u32 {
        FEE_ACCURACY - self.0
    }

    /// Returns `true` if the fee is zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Converts to a floating-point percentage in the range `0.0..100.0`.
    ///
    /// For example, 3 000 ppm → 0.30%.
    #[must_use]
    pub fn as_percent(&self) -> f64 {
        f64::from(self.0) / 10_000.0
    }
}

impl fmt::Display for SwapFee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ppm", self.0)
    }
}
