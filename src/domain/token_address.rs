//! EVM-style token address.

use core::fmt;

use serde::{Deserialize, Serialize};

/// A 20-byte contract address identifying a token on some chain.
///
/// All 20-byte sequences are considered valid addresses, so construction
/// is infallible. Ordering is lexicographic over the raw bytes, which is
/// the total order used to sort a pair's tokens canonically.
///
/// # Examples
///
/// ```
/// use amm_quoter::domain::TokenAddress;
///
/// let addr = TokenAddress::from_bytes([1u8; 20]);
/// assert_eq!(addr.as_bytes(), [1u8; 20]);
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct TokenAddress([u8; 20]);

impl TokenAddress {
    /// Creates a `TokenAddress` from raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Returns the underlying 20-byte representation.
    #[must_use]
    pub const fn as_bytes(&self) -> [u8; 20] {
        self.0
    }

    /// Returns the all-zero address.
    ///
    /// Useful as a sentinel or placeholder value; use sparingly.
    #[must_use]
    pub const fn zero() -> Self {
        Self([0u8; 20])
    }
}

impl fmt::Display for TokenAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x")?;
        for byte in self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}
