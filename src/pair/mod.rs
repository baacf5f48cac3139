//! Pair state and the quote engine.
//!
//! A [`Pair`] owns the ordered token pair, its reserves, the swap fee and
//! the pricing curve. It is an immutable value: every quote operation
//! validates its inputs, dispatches to the curve model and returns the
//! quoted [`Amount`] together with a *new* `Pair` reflecting the
//! post-trade reserves. No operation mutates shared state, so concurrent
//! callers sharing a snapshot never race.
//!
//! # Quote Flow
//!
//! 1. Validate that the traded token belongs to the pair.
//! 2. Validate reserve preconditions (non-zero; exact-out additionally
//!    requires the requested output to be below the reserve).
//! 3. Dispatch to the curve variant.
//! 4. Rebuild the pair with `reserve_in + amount_in` and
//!    `reserve_out − amount_out`.
//!
//! # Liquidity Accounting
//!
//! [`Pair::get_liquidity_minted`] and [`Pair::get_liquidity_value`]
//! price deposits and redemptions of the pair's liquidity token,
//! including the protocol-fee dilution applied when an accrued-growth
//! checkpoint (`k_last`) is supplied.

#[cfg(test)]
mod proptest_properties;

use primitive_types::U256;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::curve::{Curve, CurveVariant};
use crate::domain::{Amount, Decimals, SwapFee, Token, TokenAddress, TokenPair};
use crate::error::{AmmError, Result};
use crate::math::scale::scale_up;
use crate::math::sqrt::isqrt;
use crate::math::stable::compute_invariant;

/// Liquidity permanently locked on the first deposit to deter trivial
/// pool draining.
pub const MINIMUM_LIQUIDITY: u64 = 1_000;

/// A mid price expressed as an exact ratio of raw reserves.
///
/// The ratio is deliberately left unreduced: consumers that need a
/// decimal representation divide at their chosen precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MidPrice {
    numerator: U256,
    denominator: U256,
}

impl MidPrice {
    /// Returns the numerator (the counter token's reserve).
    #[must_use]
    pub const fn numerator(&self) -> U256 {
        self.numerator
    }

    /// Returns the denominator (the priced token's reserve).
    #[must_use]
    pub const fn denominator(&self) -> U256 {
        self.denominator
    }
}

/// Derives a deterministic placeholder identity for the pair's liquidity
/// token.
///
/// The placeholder is unique per `(token0, token1, curve)` but is *not*
/// the deployed pool address; production deployments derive that
/// on-chain, and callers that know it should construct the pair via
/// [`Pair::with_liquidity_token`].
fn derive_liquidity_token(pair: &TokenPair, curve_id: u8) -> Token {
    let a = pair.token0().address().as_bytes();
    let b = pair.token1().address().as_bytes();
    let mut bytes = [0u8; 20];
    for (i, slot) in bytes.iter_mut().enumerate() {
        *slot = a[i] ^ b[i].rotate_left(1);
    }
    bytes[19] ^= 0x10 | curve_id;
    Token::new(
        pair.chain_id(),
        TokenAddress::from_bytes(bytes),
        Decimals::MAX,
    )
}

/// An immutable AMM pair: reserves over a canonically ordered token
/// pair, a swap fee, and a pricing curve.
///
/// `token0` always sorts before `token1`; constructors accept amounts in
/// either order and sort them. Every quote returns a fresh `Pair`; the
/// original is never modified.
///
/// # Examples
///
/// ```
/// use amm_quoter::curve::CurveVariant;
/// use amm_quoter::domain::{Amount, Decimals, SwapFee, Token, TokenAddress};
/// use amm_quoter::pair::Pair;
/// use amm_quoter::U256;
///
/// let usdc = Token::new(1, TokenAddress::from_bytes([1u8; 20]), Decimals::new(6).expect("valid"));
/// let weth = Token::new(1, TokenAddress::from_bytes([2u8; 20]), Decimals::new(18).expect("valid"));
///
/// let pair = Pair::new(
///     Amount::new(usdc, U256::from(1_000_000u64)),
///     Amount::new(weth, U256::from(1_000_000u64)),
///     SwapFee::DEFAULT,
///     CurveVariant::ConstantProduct,
/// )
/// .expect("valid pair");
///
/// let (out, next) = pair
///     .get_output_amount(&Amount::new(usdc, U256::from(1_000u64)))
///     .expect("quote succeeds");
/// assert_eq!(out.raw(), U256::from(996u64));
/// assert_eq!(next.reserve_of(&usdc).expect("in pair").raw(), U256::from(1_001_000u64));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pair {
    reserve0: Amount,
    reserve1: Amount,
    swap_fee: SwapFee,
    curve: CurveVariant,
    liquidity_token: Token,
}

impl Pair {
    /// Creates a new pair from two reserves, a fee and a curve.
    ///
    /// The liquidity token identity is derived as a deterministic
    /// placeholder; see [`Pair::with_liquidity_token`] to supply the
    /// deployed one.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidToken`] if both reserves share an address.
    /// - [`AmmError::TokenMismatch`] if the tokens live on different
    ///   chains.
    pub fn new(
        amount_a: Amount,
        amount_b: Amount,
        swap_fee: SwapFee,
        curve: CurveVariant,
    ) -> Result<Self> {
        let tokens = TokenPair::new(amount_a.token(), amount_b.token())?;
        let liquidity_token = derive_liquidity_token(&tokens, curve.curve_id());
        Self::with_liquidity_token(amount_a, amount_b, swap_fee, curve, liquidity_token)
    }

    /// Creates a new pair with an explicitly supplied liquidity token,
    /// for callers that already know the deployed pool identity.
    ///
    /// # Errors
    ///
    /// Same as [`Pair::new`].
    pub fn with_liquidity_token(
        amount_a: Amount,
        amount_b: Amount,
        swap_fee: SwapFee,
        curve: CurveVariant,
        liquidity_token: Token,
    ) -> Result<Self> {
        let tokens = TokenPair::new(amount_a.token(), amount_b.token())?;
        let (reserve0, reserve1) = if amount_a.token() == tokens.token0() {
            (amount_a, amount_b)
        } else {
            (amount_b, amount_a)
        };
        Ok(Self {
            reserve0,
            reserve1,
            swap_fee,
            curve,
            liquidity_token,
        })
    }

    /// Returns the lower-sorting token.
    #[must_use]
    pub const fn token0(&self) -> Token {
        self.reserve0.token()
    }

    /// Returns the higher-sorting token.
    #[must_use]
    pub const fn token1(&self) -> Token {
        self.reserve1.token()
    }

    /// Returns the reserve of `token0`.
    #[must_use]
    pub const fn reserve0(&self) -> Amount {
        self.reserve0
    }

    /// Returns the reserve of `token1`.
    #[must_use]
    pub const fn reserve1(&self) -> Amount {
        self.reserve1
    }

    /// Returns the swap fee.
    #[must_use]
    pub const fn swap_fee(&self) -> SwapFee {
        self.swap_fee
    }

    /// Returns the pricing curve.
    #[must_use]
    pub const fn curve(&self) -> CurveVariant {
        self.curve
    }

    /// Returns the pair's liquidity token.
    #[must_use]
    pub const fn liquidity_token(&self) -> Token {
        self.liquidity_token
    }

    /// Returns the chain both tokens live on.
    #[must_use]
    pub const fn chain_id(&self) -> u64 {
        self.reserve0.token().chain_id()
    }

    /// Returns `true` if `token` is either `token0` or `token1`.
    #[must_use]
    pub fn involves_token(&self, token: &Token) -> bool {
        self.token0() == *token || self.token1() == *token
    }

    /// Returns the reserve of the given token.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::TokenMismatch`] if `token` is not in the pair.
    pub fn reserve_of(&self, token: &Token) -> Result<Amount> {
        if *token == self.token0() {
            Ok(self.reserve0)
        } else if *token == self.token1() {
            Ok(self.reserve1)
        } else {
            Err(AmmError::TokenMismatch("token is not part of this pair"))
        }
    }

    /// Returns the mid price of `token` in units of the counter token,
    /// i.e. the ratio of the counter reserve to the token's own reserve.
    ///
    /// # Errors
    ///
    /// - [`AmmError::TokenMismatch`] if `token` is not in the pair.
    /// - [`AmmError::DivisionByZero`] if the token's reserve is zero.
    pub fn price_of(&self, token: &Token) -> Result<MidPrice> {
        let own = self.reserve_of(token)?;
        if own.is_zero() {
            return Err(AmmError::DivisionByZero);
        }
        let counter = if *token == self.token0() {
            self.reserve1
        } else {
            self.reserve0
        };
        Ok(MidPrice {
            numerator: counter.raw(),
            denominator: own.raw(),
        })
    }

    /// Mid price of `token0` expressed in `token1`.
    ///
    /// # Errors
    ///
    /// See [`Pair::price_of`].
    pub fn token0_price(&self) -> Result<MidPrice> {
        self.price_of(&self.token0())
    }

    /// Mid price of `token1` expressed in `token0`.
    ///
    /// # Errors
    ///
    /// See [`Pair::price_of`].
    pub fn token1_price(&self) -> Result<MidPrice> {
        self.price_of(&self.token1())
    }

    /// Rebuilds the pair with new reserves, keeping curve parameters and
    /// the liquidity token.
    fn with_reserves(&self, a: Amount, b: Amount) -> Self {
        let (reserve0, reserve1) = if a.token() == self.token0() {
            (a, b)
        } else {
            (b, a)
        };
        Self {
            reserve0,
            reserve1,
            swap_fee: self.swap_fee,
            curve: self.curve,
            liquidity_token: self.liquidity_token,
        }
    }

    /// Quotes the output bought with `input_amount` and returns it with
    /// the post-trade pair.
    ///
    /// # Errors
    ///
    /// - [`AmmError::TokenMismatch`] if the input token is not in the
    ///   pair.
    /// - [`AmmError::InsufficientReserves`] if either reserve is zero.
    /// - [`AmmError::InsufficientInputAmount`] if the constant-product
    ///   output rounds to zero.
    pub fn get_output_amount(&self, input_amount: &Amount) -> Result<(Amount, Pair)> {
        if !self.involves_token(&input_amount.token()) {
            return Err(AmmError::TokenMismatch("input token is not part of this pair"));
        }
        if self.reserve0.is_zero() || self.reserve1.is_zero() {
            return Err(AmmError::InsufficientReserves("pair has no reserves"));
        }

        let reserve_in = self.reserve_of(&input_amount.token())?;
        let output_token = if input_amount.token() == self.token0() {
            self.token1()
        } else {
            self.token0()
        };
        let reserve_out = self.reserve_of(&output_token)?;

        let raw_out = self.curve.quote_output_given_input(
            &reserve_in,
            &reserve_out,
            input_amount.raw(),
            self.swap_fee,
        )?;
        if matches!(self.curve, CurveVariant::ConstantProduct) && raw_out.is_zero() {
            return Err(AmmError::InsufficientInputAmount("swap output rounds to zero"));
        }
        let output_amount = Amount::new(output_token, raw_out);

        let new_reserve_in = reserve_in.checked_add(input_amount)?;
        let new_reserve_out = reserve_out.checked_sub(&output_amount)?;
        trace!(
            curve_id = self.curve.curve_id(),
            amount_in = %input_amount.raw(),
            amount_out = %raw_out,
            "quoted exact-in swap"
        );

        Ok((
            output_amount,
            self.with_reserves(new_reserve_in, new_reserve_out),
        ))
    }

    /// Quotes the input required to buy `output_amount` and returns it
    /// with the post-trade pair.
    ///
    /// # Errors
    ///
    /// - [`AmmError::TokenMismatch`] if the output token is not in the
    ///   pair.
    /// - [`AmmError::InsufficientReserves`] if either reserve is zero or
    ///   the requested output meets or exceeds its reserve.
    pub fn get_input_amount(&self, output_amount: &Amount) -> Result<(Amount, Pair)> {
        if !self.involves_token(&output_amount.token()) {
            return Err(AmmError::TokenMismatch("output token is not part of this pair"));
        }
        let reserve_out = self.reserve_of(&output_amount.token())?;
        if self.reserve0.is_zero()
            || self.reserve1.is_zero()
            || output_amount.raw() >= reserve_out.raw()
        {
            return Err(AmmError::InsufficientReserves(
                "requested output exceeds reserve",
            ));
        }

        let input_token = if output_amount.token() == self.token0() {
            self.token1()
        } else {
            self.token0()
        };
        let reserve_in = self.reserve_of(&input_token)?;

        let raw_in = self.curve.quote_input_given_output(
            &reserve_in,
            &reserve_out,
            output_amount.raw(),
            self.swap_fee,
        )?;
        let input_amount = Amount::new(input_token, raw_in);

        let new_reserve_in = reserve_in.checked_add(&input_amount)?;
        let new_reserve_out = reserve_out.checked_sub(output_amount)?;
        trace!(
            curve_id = self.curve.curve_id(),
            amount_out = %output_amount.raw(),
            amount_in = %raw_in,
            "quoted exact-out swap"
        );

        Ok((
            input_amount,
            self.with_reserves(new_reserve_in, new_reserve_out),
        ))
    }

    /// Orders a deposit pair to `(deposit0, deposit1)` matching
    /// `(token0, token1)`.
    fn order_deposits(&self, amount_a: &Amount, amount_b: &Amount) -> Result<(Amount, Amount)> {
        if amount_a.token() == self.token0() && amount_b.token() == self.token1() {
            Ok((*amount_a, *amount_b))
        } else if amount_b.token() == self.token0() && amount_a.token() == self.token1() {
            Ok((*amount_b, *amount_a))
        } else {
            Err(AmmError::TokenMismatch("deposits must match the pair's tokens"))
        }
    }

    /// Computes the liquidity minted for depositing `amount_a` and
    /// `amount_b` into a pool with `total_supply` liquidity outstanding.
    ///
    /// The first deposit into an empty pool forfeits
    /// [`MINIMUM_LIQUIDITY`] units, which remain locked forever.
    ///
    /// # Errors
    ///
    /// - [`AmmError::TokenMismatch`] if `total_supply` is not
    ///   denominated in the pair's liquidity token, or the deposits do
    ///   not match the pair's tokens.
    /// - [`AmmError::InsufficientReserves`] if the pool has outstanding
    ///   supply but an empty reserve.
    /// - [`AmmError::InsufficientInputAmount`] if the minted liquidity
    ///   is not strictly positive.
    pub fn get_liquidity_minted(
        &self,
        total_supply: &Amount,
        amount_a: &Amount,
        amount_b: &Amount,
    ) -> Result<Amount> {
        if total_supply.token() != self.liquidity_token {
            return Err(AmmError::TokenMismatch(
                "total supply must be denominated in the pair's liquidity token",
            ));
        }
        let (deposit0, deposit1) = self.order_deposits(amount_a, amount_b)?;
        let minimum_liquidity = U256::from(MINIMUM_LIQUIDITY);

        let liquidity = match self.curve {
            CurveVariant::ConstantProduct => {
                if total_supply.is_zero() {
                    let product = deposit0
                        .raw()
                        .checked_mul(deposit1.raw())
                        .ok_or(AmmError::Overflow("mint: deposit product overflow"))?;
                    isqrt(product)
                        .checked_sub(minimum_liquidity)
                        .ok_or(AmmError::InsufficientInputAmount(
                            "first deposit below minimum liquidity",
                        ))?
                } else {
                    if self.reserve0.is_zero() || self.reserve1.is_zero() {
                        return Err(AmmError::InsufficientReserves("pair has no reserves"));
                    }
                    let minted0 = deposit0
                        .raw()
                        .checked_mul(total_supply.raw())
                        .ok_or(AmmError::Overflow("mint: share overflow"))?
                        / self.reserve0.raw();
                    let minted1 = deposit1
                        .raw()
                        .checked_mul(total_supply.raw())
                        .ok_or(AmmError::Overflow("mint: share overflow"))?
                        / self.reserve1.raw();
                    minted0.min(minted1)
                }
            }
            CurveVariant::StableSwap {
                amplification_coefficient,
            } => {
                let scaled_deposit0 = scale_up(deposit0.raw(), deposit0.token().decimals())?;
                let scaled_deposit1 = scale_up(deposit1.raw(), deposit1.token().decimals())?;

                if total_supply.is_zero() {
                    let d = compute_invariant(
                        scaled_deposit0,
                        scaled_deposit1,
                        amplification_coefficient,
                    )?;
                    d.checked_sub(minimum_liquidity)
                        .ok_or(AmmError::InsufficientInputAmount(
                            "first deposit below minimum liquidity",
                        ))?
                } else {
                    if self.reserve0.is_zero() || self.reserve1.is_zero() {
                        return Err(AmmError::InsufficientReserves("pair has no reserves"));
                    }
                    let scaled_reserve0 =
                        scale_up(self.reserve0.raw(), self.token0().decimals())?;
                    let scaled_reserve1 =
                        scale_up(self.reserve1.raw(), self.token1().decimals())?;
                    let d_old = compute_invariant(
                        scaled_reserve0,
                        scaled_reserve1,
                        amplification_coefficient,
                    )?;
                    let d_new = compute_invariant(
                        scaled_reserve0
                            .checked_add(scaled_deposit0)
                            .ok_or(AmmError::Overflow("mint: reserve0 overflow"))?,
                        scaled_reserve1
                            .checked_add(scaled_deposit1)
                            .ok_or(AmmError::Overflow("mint: reserve1 overflow"))?,
                        amplification_coefficient,
                    )?;
                    let growth = d_new
                        .checked_sub(d_old)
                        .ok_or(AmmError::InsufficientInputAmount(
                            "deposit did not grow the invariant",
                        ))?;
                    growth
                        .checked_mul(total_supply.raw())
                        .ok_or(AmmError::Overflow("mint: growth share overflow"))?
                        .checked_div(d_old)
                        .ok_or(AmmError::DivisionByZero)?
                }
            }
        };

        if liquidity.is_zero() {
            return Err(AmmError::InsufficientInputAmount(
                "liquidity minted must be positive",
            ));
        }
        trace!(
            curve_id = self.curve.curve_id(),
            liquidity = %liquidity,
            "computed liquidity mint"
        );
        Ok(Amount::new(self.liquidity_token, liquidity))
    }

    /// Computes the pro-rata redemption value of `liquidity` units of
    /// the pair's liquidity token, in `token`.
    ///
    /// When `fee_on` is set and a non-zero `k_last` checkpoint is
    /// supplied, the total supply is first diluted by the phantom
    /// liquidity representing undistributed protocol-fee growth since
    /// the checkpoint (a fixed one-part-in-six protocol split).
    ///
    /// # Errors
    ///
    /// - [`AmmError::TokenMismatch`] if `token` is not in the pair, or
    ///   either liquidity argument is not denominated in the liquidity
    ///   token.
    /// - [`AmmError::InsufficientInputAmount`] if
    ///   `liquidity > total_supply`.
    /// - [`AmmError::InvalidFee`] if `fee_on` is set without a `k_last`
    ///   checkpoint.
    pub fn get_liquidity_value(
        &self,
        token: &Token,
        total_supply: &Amount,
        liquidity: &Amount,
        fee_on: bool,
        k_last: Option<U256>,
    ) -> Result<Amount> {
        if !self.involves_token(token) {
            return Err(AmmError::TokenMismatch("token is not part of this pair"));
        }
        if total_supply.token() != self.liquidity_token || liquidity.token() != self.liquidity_token
        {
            return Err(AmmError::TokenMismatch(
                "liquidity amounts must be denominated in the pair's liquidity token",
            ));
        }
        if liquidity.raw() > total_supply.raw() {
            return Err(AmmError::InsufficientInputAmount(
                "liquidity exceeds total supply",
            ));
        }

        let adjusted_supply = if fee_on {
            let k_last = k_last.ok_or(AmmError::InvalidFee(
                "protocol fee requires the last recorded k",
            ))?;
            if k_last.is_zero() {
                total_supply.raw()
            } else {
                let k = self
                    .reserve0
                    .raw()
                    .checked_mul(self.reserve1.raw())
                    .ok_or(AmmError::Overflow("value: reserve product overflow"))?;
                let root_k = isqrt(k);
                let root_k_last = isqrt(k_last);
                if root_k > root_k_last {
                    let numerator = total_supply
                        .raw()
                        .checked_mul(root_k - root_k_last)
                        .ok_or(AmmError::Overflow("value: fee numerator overflow"))?;
                    let denominator = root_k
                        .checked_mul(U256::from(5u64))
                        .ok_or(AmmError::Overflow("value: fee denominator overflow"))?
                        .checked_add(root_k_last)
                        .ok_or(AmmError::Overflow("value: fee denominator overflow"))?;
                    let fee_liquidity = numerator / denominator;
                    total_supply
                        .raw()
                        .checked_add(fee_liquidity)
                        .ok_or(AmmError::Overflow("value: diluted supply overflow"))?
                } else {
                    total_supply.raw()
                }
            }
        } else {
            total_supply.raw()
        };

        let value = liquidity
            .raw()
            .checked_mul(self.reserve_of(token)?.raw())
            .ok_or(AmmError::Overflow("value: redemption overflow"))?
            .checked_div(adjusted_supply)
            .ok_or(AmmError::DivisionByZero)?;
        Ok(Amount::new(*token, value))
    }
}
