//! Numeric kernels: fixed-point scaling, integer square root, and the
//! StableSwap invariant solvers.
//!
//! Everything in this module is a pure function over `U256` values. The
//! rounding direction of every division and the iteration order of every
//! solver are part of the crate's compatibility contract with the
//! on-chain pair contracts and must not be "improved".

pub mod scale;
pub mod sqrt;
pub mod stable;

pub use scale::{scale_down, scale_up, scaling_factor};
pub use sqrt::isqrt;
pub use stable::{compute_invariant, solve_balance, A_PRECISION};
