//! Convenience re-exports for common types and traits.
//!
//! The prelude provides a single import to bring all commonly used items
//! into scope:
//!
//! ```rust
//! use amm_quoter::prelude::*;
//! ```
//!
//! This re-exports the domain value types, the curve model, the pair
//! engine and the error types so that consumers don't need to import
//! from individual submodules.

// Re-export domain types
pub use crate::domain::{
    Amount, Decimals, Rounding, SwapFee, Token, TokenAddress, TokenPair, FEE_ACCURACY,
};

// Re-export the curve model
pub use crate::curve::{ConstantProduct, Curve, CurveVariant, StableSwap};

// Re-export the pair engine
pub use crate::pair::{MidPrice, Pair, MINIMUM_LIQUIDITY};

// Re-export numeric constants callers need to build coefficients
pub use crate::math::stable::A_PRECISION;

// Re-export error types
pub use crate::error::{AmmError, Result};
