//! Ordered pair of distinct tokens.

use serde::{Deserialize, Serialize};

use super::Token;
use crate::error::AmmError;

/// An ordered pair of distinct tokens, canonically sorted by address.
///
/// The canonical ordering guarantees that
/// `token0.address() < token1.address()`, preventing duplicate pairs such
/// as `(A, B)` and `(B, A)`. Both tokens must live on the same chain.
///
/// # Examples
///
/// ```
/// use amm_quoter::domain::{Decimals, Token, TokenAddress, TokenPair};
///
/// let tok_a = Token::new(1, TokenAddress::from_bytes([1u8; 20]), Decimals::new(6).expect("valid"));
/// let tok_b = Token::new(1, TokenAddress::from_bytes([2u8; 20]), Decimals::new(18).expect("valid"));
///
/// // Order is enforced automatically:
/// let pair = TokenPair::new(tok_b, tok_a).expect("distinct tokens");
/// assert_eq!(pair.token0(), tok_a);
/// assert_eq!(pair.token1(), tok_b);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TokenPair {
    token0: Token,
    token1: Token,
}

impl TokenPair {
    /// Creates a new canonically-ordered `TokenPair`.
    ///
    /// The two tokens are automatically sorted so that
    /// `token0.address() < token1.address()`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidToken`] if both tokens have the same address.
    /// - [`AmmError::TokenMismatch`] if the tokens live on different chains.
    pub fn new(token_a: Token, token_b: Token) -> Result<Self, AmmError> {
        let (token0, token1) = if token_a.sorts_before(&token_b)? {
            (token_a, token_b)
        } else {
            (token_b, token_a)
        };
        Ok(Self { token0, token1 })
    }

    /// Returns the first token (lower address).
    #[must_use]
    pub const fn token0(&self) -> Token {
        self.token0
    }

    /// Returns the second token (higher address).
    #[must_use]
    pub const fn token1(&self) -> Token {
        self.token1
    }

    /// Returns the chain both tokens live on.
    #[must_use]
    pub const fn chain_id(&self) -> u64 {
        self.token0.chain_id()
    }

    /// Returns `true` if the given token is part of this pair.
    #[must_use]
    pub fn contains(&self, token: &Token) -> bool {
        self.token0 == *token || self.token1 == *token
    }

    /// Returns the counterpart of `token` in this pair.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::TokenMismatch`] if `token` is not in the pair.
    pub fn other(&self, token: &Token) -> Result<Token, AmmError> {
        if *token == self.token0 {
            Ok(self.token1)
        } else if *token == self.token1 {
            Ok(self.token0)
        } else {
            Err(AmmError::TokenMismatch("token is not part of this pair"))
        }
    }
}
