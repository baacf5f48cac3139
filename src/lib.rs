//! # AMM Quoter
//!
//! Off-chain pricing engine for a two-curve automated market maker:
//! constant-product and StableSwap pairs sharing one reserve/fee model.
//!
//! Given current pooled reserves, a fee rate and (for the stable
//! variant) an amplification coefficient, the engine computes exact swap
//! quotes and liquidity mint/burn amounts. Every produced integer is
//! required to equal what the deployed pair contracts compute for the
//! same inputs: identical floor/ceiling rounding, identical Newton-Raphson
//! iteration formulas, identical iteration caps. Do not "fix" the rounding.
//!
//! # Quick Start
//!
//! ```rust
//! use amm_quoter::curve::CurveVariant;
//! use amm_quoter::domain::{Amount, Decimals, SwapFee, Token, TokenAddress};
//! use amm_quoter::pair::Pair;
//! use amm_quoter::U256;
//!
//! // 1. Define two tokens
//! let usdc = Token::new(
//!     1,
//!     TokenAddress::from_bytes([1u8; 20]),
//!     Decimals::new(6).expect("valid decimals"),
//! );
//! let weth = Token::new(
//!     1,
//!     TokenAddress::from_bytes([2u8; 20]),
//!     Decimals::new(18).expect("valid decimals"),
//! );
//!
//! // 2. Build a constant-product pair (0.3% fee)
//! let pair = Pair::new(
//!     Amount::new(usdc, U256::from(1_000_000u64)),
//!     Amount::new(weth, U256::from(1_000_000u64)),
//!     SwapFee::DEFAULT,
//!     CurveVariant::ConstantProduct,
//! )
//! .expect("valid pair");
//!
//! // 3. Quote a swap: sell 1 000 raw units of USDC
//! let (amount_out, next_pair) = pair
//!     .get_output_amount(&Amount::new(usdc, U256::from(1_000u64)))
//!     .expect("quote succeeded");
//!
//! assert_eq!(amount_out.raw(), U256::from(996u64));
//! // The original pair is a value; the post-trade state is a new one.
//! assert_eq!(pair.reserve0().raw(), U256::from(1_000_000u64));
//! assert_eq!(next_pair.reserve0().raw(), U256::from(1_001_000u64));
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │   Consumer   │  holds a reserve snapshot, asks for quotes
//! └──────┬──────┘
//!        │ get_output_amount / get_input_amount / liquidity ops
//!        ▼
//! ┌─────────────┐
//! │     Pair     │  validates tokens + reserves, returns (quote, new Pair)
//! └──────┬──────┘
//!        │ CurveVariant (enum dispatch)
//!        ▼
//! ┌─────────────┐
//! │    Curves    │  ConstantProduct, StableSwap{A}
//! └──────┬──────┘
//!        │ fixed-point boundary + invariant solvers (stable only)
//!        ▼
//! ┌─────────────┐
//! │     Math     │  scale_up/scale_down, compute_invariant, solve_balance
//! └─────────────┘
//! ```
//!
//! # Module Guide
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`domain`] | Newtype value types: [`Amount`](domain::Amount), [`Token`](domain::Token), [`SwapFee`](domain::SwapFee), etc. |
//! | [`curve`] | The [`Curve`](curve::Curve) trait, both implementations and the [`CurveVariant`](curve::CurveVariant) dispatch enum |
//! | [`pair`] | The immutable [`Pair`](pair::Pair) state, quote engine and liquidity accounting |
//! | [`math`] | Fixed-point scaling, integer square root, StableSwap invariant solvers |
//! | [`error`] | [`AmmError`](error::AmmError) unified error enum |
//! | [`prelude`] | Convenience re-exports for common types and traits |

pub mod curve;
pub mod domain;
pub mod error;
pub mod math;
pub mod pair;
pub mod prelude;

/// The 256-bit integer type used for all reserve and quote arithmetic.
pub use primitive_types::U256;
