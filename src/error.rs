//! Unified error types for the AMM quoting library.
//!
//! All fallible operations across the crate return [`AmmError`] as their
//! error type. Every variant is a synchronous precondition violation:
//! nothing is transient, nothing is retryable, and the caller must correct
//! the inputs before calling again.

/// Convenience alias used throughout the crate.
pub type Result<T> = core::result::Result<T, AmmError>;

/// Unified error enum for all quoting and liquidity operations.
///
/// Variants carry a `&'static str` payload describing the violated
/// precondition where a single message is not enough to locate the
/// failing call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AmmError {
    /// A pair was constructed from an unrecognized curve discriminant.
    #[error("invalid curve id: {0}")]
    InvalidCurveId(u8),

    /// A stable-curve discriminant was supplied without its amplification
    /// coefficient.
    #[error("stable curve requires an amplification coefficient")]
    MissingAmplificationCoefficient,

    /// An operation was invoked with a token that does not belong to the
    /// pair, or mixed amounts of two different tokens.
    #[error("token mismatch: {0}")]
    TokenMismatch(&'static str),

    /// A reserve is zero, or a requested output meets or exceeds the
    /// available reserve.
    #[error("insufficient reserves: {0}")]
    InsufficientReserves(&'static str),

    /// A swap or liquidity computation degenerated to a non-positive
    /// result.
    #[error("insufficient input amount: {0}")]
    InsufficientInputAmount(&'static str),

    /// A fee rate outside `[0, FEE_ACCURACY)`, or a protocol-fee query
    /// missing its recorded invariant.
    #[error("invalid fee: {0}")]
    InvalidFee(&'static str),

    /// Token decimals outside the supported `0..=18` range.
    #[error("invalid precision: {0}")]
    InvalidPrecision(&'static str),

    /// An invalid token or token combination (e.g. a pair of two
    /// identical addresses).
    #[error("invalid token: {0}")]
    InvalidToken(&'static str),

    /// Checked 256-bit arithmetic overflowed or underflowed.
    #[error("arithmetic overflow: {0}")]
    Overflow(&'static str),

    /// A divisor degenerated to zero.
    #[error("division by zero")]
    DivisionByZero,
}
