//! Property-based tests using `proptest` for pool invariants.
//!
//! 1. **Invariant preservation**: `k` never decreases across swaps.
//! 2. **Zero input**: quoting zero always yields zero.
//! 3. **Bounded output**: a quote never reaches the output reserve.
//! 4. **Liquidity conservation**: add then remove never returns more than deposited.
//! 5. **Swap reversibility**: a round trip never gains value.

use proptest::prelude::*;

use crate::adapters::InMemoryLedger;
use crate::domain::{Address, Amount, FeeTier, Shares, Timestamp};
use crate::pools::ConstantProductPool;
use crate::traits::AssetLedger;

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

const FUNDS: u128 = 1_000_000_000_000;

fn addr(b: u8) -> Address {
    Address::new([b; 20])
}

fn asset_x() -> Address {
    addr(1)
}

fn asset_y() -> Address {
    addr(2)
}

fn registry() -> Address {
    addr(10)
}

fn pool_address() -> Address {
    addr(11)
}

fn trader() -> Address {
    addr(20)
}

fn fee(bps: u32) -> FeeTier {
    let Ok(tier) = FeeTier::new(bps) else {
        panic!("valid fee");
    };
    tier
}

/// A funded ledger plus a pool seeded with `(r1, r2)`.
fn make_pool(r1: u128, r2: u128, fee_bps: u32) -> (InMemoryLedger, ConstantProductPool) {
    let ledger = InMemoryLedger::new();
    for asset in [asset_x(), asset_y()] {
        for (who, spender) in [(registry(), registry()), (trader(), pool_address())] {
            let Ok(()) = ledger.mint(asset, who, Amount::new(FUNDS)) else {
                panic!("mint");
            };
            ledger.approve(asset, who, spender, Amount::new(FUNDS));
        }
    }
    let Ok(mut pool) =
        ConstantProductPool::new(pool_address(), registry(), asset_x(), asset_y(), fee(fee_bps))
    else {
        panic!("valid pool");
    };
    let Ok(_) = pool.seed(
        &ledger,
        registry(),
        registry(),
        (Amount::new(r1), Amount::new(r2)),
        Timestamp::EPOCH,
    ) else {
        panic!("seed");
    };
    (ledger, pool)
}

fn k(pool: &ConstantProductPool) -> u128 {
    pool.reserve_one().get() * pool.reserve_two().get()
}

// ---------------------------------------------------------------------------
// Custom strategies
// ---------------------------------------------------------------------------

/// Reserve values in range [10_000, 10_000_000] to avoid extremes.
fn reserve_strategy() -> impl Strategy<Value = u128> {
    10_000u128..=10_000_000u128
}

/// Fees from zero up to 1%.
fn fee_strategy() -> impl Strategy<Value = u32> {
    0u32..=100u32
}

// ---------------------------------------------------------------------------
// Property 1: Invariant Preservation
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_k_never_decreases(
        r1 in reserve_strategy(),
        r2 in reserve_strategy(),
        fee_bps in fee_strategy(),
        sizes in proptest::collection::vec(1u128..=100_000u128, 1..8),
    ) {
        let (ledger, mut pool) = make_pool(r1, r2, fee_bps);
        let mut last = k(&pool);

        for (i, size) in sizes.into_iter().enumerate() {
            let asset = if i % 2 == 0 { asset_x() } else { asset_y() };
            if pool.swap(&ledger, trader(), asset, Amount::new(size), Amount::ZERO).is_err() {
                continue;
            }
            let now = k(&pool);
            prop_assert!(now >= last, "k decreased: {} < {}", now, last);
            last = now;
        }
    }
}

// ---------------------------------------------------------------------------
// Properties 2 and 3: Quote Bounds
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_zero_input_quotes_zero(
        r1 in reserve_strategy(),
        r2 in reserve_strategy(),
        fee_bps in fee_strategy(),
    ) {
        let (_, pool) = make_pool(r1, r2, fee_bps);
        prop_assert_eq!(pool.get_swap_quantity(asset_x(), Amount::ZERO), Ok(Amount::ZERO));
        prop_assert_eq!(pool.get_swap_quantity(asset_y(), Amount::ZERO), Ok(Amount::ZERO));
    }

    #[test]
    fn prop_quote_below_output_reserve(
        r1 in reserve_strategy(),
        r2 in reserve_strategy(),
        amount in 1u128..=1_000_000_000u128,
    ) {
        let (_, pool) = make_pool(r1, r2, 0);
        let Ok(out) = pool.get_swap_quantity(asset_x(), Amount::new(amount)) else {
            return Ok(());
        };
        prop_assert!(out < pool.reserve_two(), "quote {} drains reserve", out);
    }
}

// ---------------------------------------------------------------------------
// Property 4: Liquidity Conservation
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_add_then_remove_never_profits(
        r1 in reserve_strategy(),
        r2 in reserve_strategy(),
        d1 in 1u128..=1_000_000u128,
        d2 in 1u128..=1_000_000u128,
    ) {
        let (ledger, mut pool) = make_pool(r1, r2, 0);
        let Ok(minted) = pool.add_liquidity(
            &ledger,
            trader(),
            Amount::new(d1),
            Amount::new(d2),
            Timestamp::EPOCH,
        ) else {
            return Ok(());
        };
        let Ok((out1, out2)) = pool.remove_liquidity(&ledger, trader(), minted) else {
            return Err(TestCaseError::fail("remove of freshly minted shares failed"));
        };
        prop_assert!(out1.get() <= d1, "withdrew {} > deposited {}", out1, d1);
        prop_assert!(out2.get() <= d2, "withdrew {} > deposited {}", out2, d2);
        prop_assert_eq!(pool.shares_of(trader()), Shares::ZERO);
        prop_assert_eq!(ledger.balance_of(asset_x(), pool_address()), pool.reserve_one());
        prop_assert_eq!(ledger.balance_of(asset_y(), pool_address()), pool.reserve_two());
    }
}

// ---------------------------------------------------------------------------
// Property 5: Swap Reversibility
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_round_trip_loses_value(
        r1 in reserve_strategy(),
        r2 in reserve_strategy(),
        fee_bps in fee_strategy(),
    ) {
        let swap_in = (r1 / 1_000).max(1);
        let (ledger, mut pool) = make_pool(r1, r2, fee_bps);

        let Ok(there) = pool.swap(&ledger, trader(), asset_x(), Amount::new(swap_in), Amount::ZERO)
        else {
            return Ok(());
        };
        let Ok(back) = pool.swap(&ledger, trader(), asset_y(), there.amount_out(), Amount::ZERO)
        else {
            return Ok(());
        };

        prop_assert!(
            back.amount_out().get() <= swap_in,
            "round-trip should lose value: final={} > original={}",
            back.amount_out(), swap_in
        );
    }
}
