//! Token identity type.

use core::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use super::{Decimals, TokenAddress};
use crate::error::AmmError;

/// The canonical identity of a token on a given chain.
///
/// Combines a chain id, a [`TokenAddress`] and the token's [`Decimals`].
/// Two tokens compare equal when chain id and address match; decimals are
/// descriptive metadata, fixed per deployed contract, and do not
/// participate in identity.
///
/// # Examples
///
/// ```
/// use amm_quoter::domain::{Decimals, Token, TokenAddress};
///
/// let addr = TokenAddress::from_bytes([1u8; 20]);
/// let dec = Decimals::new(6).expect("valid");
/// let tok = Token::new(1, addr, dec);
///
/// assert_eq!(tok.chain_id(), 1);
/// assert_eq!(tok.address(), addr);
/// assert_eq!(tok.decimals(), dec);
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Token {
    chain_id: u64,
    address: TokenAddress,
    decimals: Decimals,
}

impl Token {
    /// Creates a new `Token`.
    ///
    /// Construction is infallible because both components are already
    /// validated at their own construction site.
    #[must_use]
    pub const fn new(chain_id: u64, address: TokenAddress, decimals: Decimals) -> Self {
        Self {
            chain_id,
            address,
            decimals,
        }
    }

    /// Returns the chain id this token is deployed on.
    #[must_use]
    pub const fn chain_id(&self) -> u64 {
        self.chain_id
    }

    /// Returns the token address.
    #[must_use]
    pub const fn address(&self) -> TokenAddress {
        self.address
    }

    /// Returns the token decimals.
    #[must_use]
    pub const fn decimals(&self) -> Decimals {
        self.decimals
    }

    /// Returns `true` if this token sorts before `other` in the canonical
    /// pair order (lexicographic over addresses).
    ///
    /// # Errors
    ///
    /// - [`AmmError::TokenMismatch`] if the tokens live on different chains.
    /// - [`AmmError::InvalidToken`] if both tokens share the same address.
    pub fn sorts_before(&self, other: &Self) -> Result<bool, AmmError> {
        if self.chain_id != other.chain_id {
            return Err(AmmError::TokenMismatch(
                "tokens on different chains cannot be ordered",
            ));
        }
        if self.address == other.address {
            return Err(AmmError::InvalidToken(
                "tokens with identical addresses cannot be ordered",
            ));
        }
        Ok(self.address < other.address)
    }
}

impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.chain_id == other.chain_id && self.address == other.address
    }
}

impl Eq for Token {}

impl Hash for Token {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.chain_id.hash(state);
        self.address.hash(state);
    }
}
