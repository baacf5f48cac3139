//! Token-denominated amount with checked 256-bit arithmetic.

use core::fmt;

use primitive_types::U256;
use serde::{Deserialize, Serialize};

use super::{Rounding, Token};
use crate::error::AmmError;

/// An integer quantity of a specific token, in the token's native
/// decimals.
///
/// `Amount` pairs a [`Token`] with a raw `U256` magnitude. The magnitude
/// is never reinterpreted across tokens: additive arithmetic requires
/// both operands to be denominated in the same token and fails with
/// [`AmmError::TokenMismatch`] otherwise. Scalar multiplication and
/// division operate on the magnitude alone.
///
/// All arithmetic is checked; division truncates toward zero unless
/// [`Rounding::Up`] is requested explicitly.
///
/// # Examples
///
/// ```
/// use amm_quoter::domain::{Amount, Decimals, Token, TokenAddress};
/// use amm_quoter::U256;
///
/// let usdc = Token::new(1, TokenAddress::from_bytes([1u8; 20]), Decimals::new(6).expect("valid"));
/// let a = Amount::new(usdc, U256::from(100u64));
/// let b = Amount::new(usdc, U256::from(200u64));
/// assert_eq!(a.checked_add(&b), Ok(Amount::new(usdc, U256::from(300u64))));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[must_use]
pub struct Amount {
    token: Token,
    raw: U256,
}

impl Amount {
    /// Creates a new `Amount` of `token` from a raw magnitude in the
    /// token's native decimals.
    pub const fn new(token: Token, raw: U256) -> Self {
        Self { token, raw }
    }

    /// Creates a zero amount of `token`.
    pub fn zero(token: Token) -> Self {
        Self {
            token,
            raw: U256::zero(),
        }
    }

    /// Returns the token this amount is denominated in.
    #[must_use]
    pub const fn token(&self) -> Token {
        self.token
    }

    /// Returns the raw magnitude.
    #[must_use]
    pub const fn raw(&self) -> U256 {
        self.raw
    }

    /// Returns `true` if the magnitude is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.raw.is_zero()
    }

    /// Checked addition of two amounts of the same token.
    ///
    /// # Errors
    ///
    /// - [`AmmError::TokenMismatch`] if the tokens differ.
    /// - [`AmmError::Overflow`] on `U256` overflow.
    pub fn checked_add(&self, other: &Self) -> Result<Self, AmmError> {
        if self.token != other.token {
            return Err(AmmError::TokenMismatch(
                "cannot add amounts of different tokens",
            ));
        }
        let raw = self
            .raw
            .checked_add(other.raw)
            .ok_or(AmmError::Overflow("amount addition overflow"))?;
        Ok(Self::new(self.token, raw))
    }

    /// Checked subtraction of two amounts of the same token.
    ///
    /// # Errors
    ///
    /// - [`AmmError::TokenMismatch`] if the tokens differ.
    /// - [`AmmError::Overflow`] if `other` exceeds `self`.
    pub fn checked_sub(&self, other: &Self) -> Result<Self, AmmError> {
        if self.token != other.token {
            return Err(AmmError::TokenMismatch(
                "cannot subtract amounts of different tokens",
            ));
        }
        let raw = self
            .raw
            .checked_sub(other.raw)
            .ok_or(AmmError::Overflow("amount subtraction underflow"))?;
        Ok(Self::new(self.token, raw))
    }

    /// Checked multiplication of the magnitude by a scalar.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] on `U256` overflow.
    pub fn checked_mul(&self, scalar: U256) -> Result<Self, AmmError> {
        let raw = self
            .raw
            .checked_mul(scalar)
            .ok_or(AmmError::Overflow("amount multiplication overflow"))?;
        Ok(Self::new(self.token, raw))
    }

    /// Checked division of the magnitude by a scalar with explicit
    /// rounding direction.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::DivisionByZero`] if `divisor` is zero.
    pub fn checked_div(&self, divisor: U256, rounding: Rounding) -> Result<Self, AmmError> {
        if divisor.is_zero() {
            return Err(AmmError::DivisionByZero);
        }
        let quotient = self.raw / divisor;
        let raw = match rounding {
            Rounding::Down => quotient,
            Rounding::Up => {
                if (self.raw % divisor).is_zero() {
                    quotient
                } else {
                    // quotient + 1 cannot overflow: a nonzero remainder
                    // implies raw < U256::MAX or divisor > 1.
                    quotient + U256::one()
                }
            }
        };
        Ok(Self::new(self.token, raw))
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} @ {}", self.raw, self.token.address())
    }
}
