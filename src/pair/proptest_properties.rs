//! Property-based tests for the quote engine.
//!
//! Covers the engine-level guarantees that must hold for *all* inputs:
//!
//! 1. **Reserve exactness** — post-quote reserves are exactly
//!    `reserve_in + amount_in` and `reserve_out − amount_out`.
//! 2. **No free lunch** — on the constant-product curve, buying back the
//!    output of an exact-in quote never costs less than the original
//!    input.
//! 3. **Purity** — quoting twice from the same snapshot yields identical
//!    results, and never mutates the snapshot.
//! 4. **Stable bounds** — stable quotes never exceed the output reserve.

use primitive_types::U256;
use proptest::prelude::*;

use crate::curve::CurveVariant;
use crate::domain::{Amount, Decimals, SwapFee, Token, TokenAddress};
use crate::math::stable::A_PRECISION;
use crate::pair::Pair;

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

fn tok_a() -> Token {
    let Ok(d) = Decimals::new(6) else {
        panic!("valid decimals");
    };
    Token::new(1, TokenAddress::from_bytes([1u8; 20]), d)
}

fn tok_b() -> Token {
    let Ok(d) = Decimals::new(6) else {
        panic!("valid decimals");
    };
    Token::new(1, TokenAddress::from_bytes([2u8; 20]), d)
}

fn make_cp(r0: u64, r1: u64, fee_ppm: u32) -> Pair {
    let Ok(fee) = SwapFee::new(fee_ppm) else {
        panic!("valid fee");
    };
    let Ok(pair) = Pair::new(
        Amount::new(tok_a(), U256::from(r0)),
        Amount::new(tok_b(), U256::from(r1)),
        fee,
        CurveVariant::ConstantProduct,
    ) else {
        panic!("valid pair");
    };
    pair
}

fn make_stable(r0: u64, r1: u64, amp: u64) -> Pair {
    let Ok(pair) = Pair::new(
        Amount::new(tok_a(), U256::from(r0)),
        Amount::new(tok_b(), U256::from(r1)),
        SwapFee::DEFAULT,
        CurveVariant::StableSwap {
            amplification_coefficient: U256::from(amp * A_PRECISION),
        },
    ) else {
        panic!("valid pair");
    };
    pair
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn cp_exact_in_updates_reserves_exactly(
        r0 in 1_000u64..1_000_000_000_000,
        r1 in 1_000u64..1_000_000_000_000,
        amount in 1u64..1_000_000_000,
        fee_ppm in 0u32..100_000,
    ) {
        let pair = make_cp(r0, r1, fee_ppm);
        let input = Amount::new(tok_a(), U256::from(amount));
        if let Ok((out, next)) = pair.get_output_amount(&input) {
            prop_assert_eq!(next.reserve0().raw(), U256::from(r0) + U256::from(amount));
            prop_assert_eq!(next.reserve1().raw(), U256::from(r1) - out.raw());
            prop_assert!(out.raw() < U256::from(r1));
        }
    }

    #[test]
    fn cp_exact_out_updates_reserves_exactly(
        r0 in 1_000u64..1_000_000_000_000,
        r1 in 1_000u64..1_000_000_000_000,
        amount in 1u64..1_000_000_000,
        fee_ppm in 0u32..100_000,
    ) {
        prop_assume!(amount < r1);
        let pair = make_cp(r0, r1, fee_ppm);
        let output = Amount::new(tok_b(), U256::from(amount));
        if let Ok((input, next)) = pair.get_input_amount(&output) {
            prop_assert!(!input.is_zero());
            prop_assert_eq!(next.reserve0().raw(), U256::from(r0) + input.raw());
            prop_assert_eq!(next.reserve1().raw(), U256::from(r1) - U256::from(amount));
        }
    }

    #[test]
    fn cp_round_trip_never_favours_trader(
        r0 in 1_000u64..1_000_000_000_000,
        r1 in 1_000u64..1_000_000_000_000,
        amount in 1u64..1_000_000_000,
        fee_ppm in 0u32..100_000,
    ) {
        let pair = make_cp(r0, r1, fee_ppm);
        let input = Amount::new(tok_a(), U256::from(amount));
        // Dust inputs quote to zero and have nothing to round-trip.
        if let Ok((out, _)) = pair.get_output_amount(&input) {
            if let Ok((back, _)) = pair.get_input_amount(&out) {
                prop_assert!(back.raw() >= U256::from(amount));
            }
        }
    }

    #[test]
    fn quotes_are_pure(
        r0 in 1_000u64..1_000_000_000,
        r1 in 1_000u64..1_000_000_000,
        amount in 1u64..1_000_000,
    ) {
        let pair = make_cp(r0, r1, 3_000);
        let input = Amount::new(tok_a(), U256::from(amount));
        let first = pair.get_output_amount(&input);
        let second = pair.get_output_amount(&input);
        prop_assert_eq!(first, second);
        prop_assert_eq!(pair.reserve0().raw(), U256::from(r0));
        prop_assert_eq!(pair.reserve1().raw(), U256::from(r1));
    }

    #[test]
    fn stable_exact_in_stays_within_reserves(
        reserve in 1_000_000u64..1_000_000_000_000,
        amount in 1u64..1_000_000_000,
        amp in 1u64..10_000,
    ) {
        let pair = make_stable(reserve, reserve, amp);
        let input = Amount::new(tok_a(), U256::from(amount));
        if let Ok((out, next)) = pair.get_output_amount(&input) {
            prop_assert!(out.raw() <= U256::from(reserve));
            prop_assert_eq!(
                next.reserve0().raw(),
                U256::from(reserve) + U256::from(amount)
            );
            prop_assert_eq!(next.reserve1().raw(), U256::from(reserve) - out.raw());
        }
    }

    #[test]
    fn stable_output_never_exceeds_input_at_parity(
        reserve in 10_000_000u64..1_000_000_000_000,
        amount in 1_000u64..1_000_000,
        amp in 1u64..10_000,
    ) {
        // With equal reserves, equal decimals and a fee, the quote can
        // never beat 1:1.
        let pair = make_stable(reserve, reserve, amp);
        let input = Amount::new(tok_a(), U256::from(amount));
        if let Ok((out, _)) = pair.get_output_amount(&input) {
            prop_assert!(out.raw() <= U256::from(amount));
        }
    }
}
