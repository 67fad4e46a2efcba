//! Constant product liquidity pool (`x × y = k`).
//!
//! Fees are deducted from the input amount **before** the pricing formula
//! is applied, and they never leave the pool.
//!
//! # Swap Algorithm (asset in → asset out)
//!
//! 1. `fee = ceil(amount_in × fee_bps / 10 000)`
//! 2. `net_input = amount_in − fee`
//! 3. `amount_out = reserve_out × net_input / (reserve_in + net_input)` (floor)
//! 4. `reserve_in += amount_in` (fee stays in the pool)
//! 5. `reserve_out −= amount_out`
//!
//! # Invariant
//!
//! After every swap `k_after ≥ k_before`: flooring the output and retaining
//! the fee both leave value in the pool. Only
//! [`remove_liquidity`](ConstantProductPool::remove_liquidity) lowers `k`.
//!
//! # Funds
//!
//! The pool never owns balances directly. Reserves mirror the pool
//! address's balances on the [`AssetLedger`], and every mutator moves funds
//! through that ledger before committing its own state. A mutator that fails
//! leaves both the pool and the ledger untouched.

use std::collections::HashMap;

use tracing::{debug, info, warn};

use crate::domain::{
    Address, Amount, AssetPair, FeeTier, Rounding, Shares, SwapOutcome, Timestamp,
};
use crate::error::TrackerError;
use crate::math::{isqrt, mul_div, CheckedArithmetic};
use crate::traits::AssetLedger;

/// Per-side running totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct SideTotals {
    fees: Amount,
    volume: Amount,
}

/// A two-asset constant product pool.
///
/// Created by the [`PoolRegistry`](crate::registry::PoolRegistry), which
/// owns it and seeds its first deposit. The asset order is the order the
/// creator passed; the registry indexes both orders.
///
/// # State
///
/// - `reserve_one` / `reserve_two`: raw balances held at the pool address, fees included
/// - `total_shares` / per-provider shares: liquidity-provider ownership
/// - `initial_liquidity_provided_time`: first deposit time per provider, written once
/// - per-side fee and volume counters, from which [`yield_amount`](Self::yield_amount) derives
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstantProductPool {
    address: Address,
    owner: Address,
    asset_one: Address,
    asset_two: Address,
    pair: AssetPair,
    fee_tier: FeeTier,
    reserve_one: Amount,
    reserve_two: Amount,
    total_shares: Shares,
    shares: HashMap<Address, Shares>,
    initial_liquidity_provided_time: HashMap<Address, Timestamp>,
    totals_one: SideTotals,
    totals_two: SideTotals,
    swap_count: u64,
}

impl ConstantProductPool {
    /// Creates an empty pool. It holds nothing until seeded.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::IdenticalAssets`] if both assets are equal.
    pub fn new(
        address: Address,
        owner: Address,
        asset_one: Address,
        asset_two: Address,
        fee_tier: FeeTier,
    ) -> Result<Self, TrackerError> {
        let pair = AssetPair::new(asset_one, asset_two)?;
        Ok(Self {
            address,
            owner,
            asset_one,
            asset_two,
            pair,
            fee_tier,
            reserve_one: Amount::ZERO,
            reserve_two: Amount::ZERO,
            total_shares: Shares::ZERO,
            shares: HashMap::new(),
            initial_liquidity_provided_time: HashMap::new(),
            totals_one: SideTotals::default(),
            totals_two: SideTotals::default(),
            swap_count: 0,
        })
    }

    // -- accessors ------------------------------------------------------------

    /// Returns the pool's own address, where its balances live.
    #[must_use]
    pub const fn address(&self) -> Address {
        self.address
    }

    /// Returns the pool owner (the registry that created it).
    #[must_use]
    pub const fn owner(&self) -> Address {
        self.owner
    }

    /// Returns the first asset, in creation order.
    #[must_use]
    pub const fn asset_one(&self) -> Address {
        self.asset_one
    }

    /// Returns the second asset, in creation order.
    #[must_use]
    pub const fn asset_two(&self) -> Address {
        self.asset_two
    }

    /// Returns the canonical pair key.
    #[must_use]
    pub const fn pair(&self) -> AssetPair {
        self.pair
    }

    /// Returns the swap fee.
    #[must_use]
    pub const fn fee_tier(&self) -> FeeTier {
        self.fee_tier
    }

    /// Returns the reserve of [`asset_one`](Self::asset_one).
    #[must_use]
    pub const fn reserve_one(&self) -> Amount {
        self.reserve_one
    }

    /// Returns the reserve of [`asset_two`](Self::asset_two).
    #[must_use]
    pub const fn reserve_two(&self) -> Amount {
        self.reserve_two
    }

    /// Returns the reserve of `asset`.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::UnknownAsset`] if `asset` is not in the pool.
    pub fn reserve_of(&self, asset: Address) -> Result<Amount, TrackerError> {
        self.orient(asset).map(|(reserve_in, _)| reserve_in)
    }

    /// Returns `true` once the pool holds both reserves.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        !self.reserve_one.is_zero() && !self.reserve_two.is_zero()
    }

    /// Returns the outstanding liquidity shares.
    #[must_use]
    pub const fn total_shares(&self) -> Shares {
        self.total_shares
    }

    /// Returns the shares held by `provider`.
    #[must_use]
    pub fn shares_of(&self, provider: Address) -> Shares {
        self.shares.get(&provider).copied().unwrap_or_default()
    }

    /// Returns when `provider` first deposited, if ever.
    #[must_use]
    pub fn initial_liquidity_provided_time(&self, provider: Address) -> Option<Timestamp> {
        self.initial_liquidity_provided_time.get(&provider).copied()
    }

    /// Returns the number of committed swaps.
    #[must_use]
    pub const fn swap_count(&self) -> u64 {
        self.swap_count
    }

    /// Returns the raw amount of `asset` sold into the pool by swaps.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::UnknownAsset`] if `asset` is not in the pool.
    pub fn cumulative_volume(&self, asset: Address) -> Result<Amount, TrackerError> {
        Ok(self.totals(asset)?.volume)
    }

    /// Returns the fees collected in `asset`.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::UnknownAsset`] if `asset` is not in the pool.
    pub fn fees_of(&self, asset: Address) -> Result<Amount, TrackerError> {
        Ok(self.totals(asset)?.fees)
    }

    /// Returns the pool's accumulated trading yield.
    ///
    /// The yield is the sum of every swap fee charged since creation, on
    /// both sides, in raw input units. Fees stay in the reserves, so the
    /// yield is part of what liquidity providers withdraw.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::Overflow`] if the two sides overflow `u128`.
    pub fn yield_amount(&self) -> Result<Amount, TrackerError> {
        self.totals_one.fees.safe_add(&self.totals_two.fees)
    }

    // -- quotes ---------------------------------------------------------------

    /// Quotes how much of the other asset `amount_in` of `asset_in` buys.
    ///
    /// Pure: nothing is mutated. A zero input, or an input wholly consumed
    /// by the fee, quotes zero.
    ///
    /// # Errors
    ///
    /// - [`TrackerError::UnknownAsset`] if `asset_in` is not in the pool.
    /// - [`TrackerError::Overflow`] if the intermediate product overflows.
    pub fn get_swap_quantity(
        &self,
        asset_in: Address,
        amount_in: Amount,
    ) -> Result<Amount, TrackerError> {
        let (reserve_in, reserve_out) = self.orient(asset_in)?;
        Ok(self.quote(amount_in, reserve_in, reserve_out)?.0)
    }

    /// Returns `(amount_out, fee)` for an exact input.
    fn quote(
        &self,
        amount_in: Amount,
        reserve_in: Amount,
        reserve_out: Amount,
    ) -> Result<(Amount, Amount), TrackerError> {
        if amount_in.is_zero() || reserve_in.is_zero() || reserve_out.is_zero() {
            return Ok((Amount::ZERO, Amount::ZERO));
        }
        let fee = self.fee_tier.apply(amount_in, Rounding::Up)?;
        let net_input = amount_in.safe_sub(&fee)?;
        if net_input.is_zero() {
            return Ok((Amount::ZERO, fee));
        }
        let denominator = reserve_in.safe_add(&net_input)?;
        let amount_out = mul_div(
            reserve_out,
            net_input,
            denominator,
            Rounding::Down,
            "swap denominator is zero",
        )?;
        Ok((amount_out, fee))
    }

    // -- mutators -------------------------------------------------------------

    /// Books the creator's seed deposit.
    ///
    /// `spender` is the account whose allowance pays for the deposit (the
    /// registry). The creator receives `isqrt(amount_one × amount_two)`
    /// shares, and the deposit time is recorded for both the creator and the
    /// pool owner.
    ///
    /// # Errors
    ///
    /// - [`TrackerError::ZeroAmount`] if either amount is zero.
    /// - [`TrackerError::InvalidQuantity`] if the pool is already seeded.
    /// - [`TrackerError::Overflow`] if `amount_one × amount_two` overflows.
    /// - Ledger errors from pulling either leg.
    pub(crate) fn seed(
        &mut self,
        ledger: &dyn AssetLedger,
        spender: Address,
        creator: Address,
        amounts: (Amount, Amount),
        now: Timestamp,
    ) -> Result<Shares, TrackerError> {
        let (amount_one, amount_two) = amounts;
        if amount_one.is_zero() || amount_two.is_zero() {
            return Err(TrackerError::ZeroAmount("seed deposit"));
        }
        if !self.total_shares.is_zero() {
            return Err(TrackerError::InvalidQuantity("pool is already seeded"));
        }
        let minted = Shares::new(isqrt(amount_one.safe_mul(&amount_two)?.get()));

        self.pull_pair(ledger, spender, creator, amount_one, amount_two)?;

        self.reserve_one = amount_one;
        self.reserve_two = amount_two;
        self.total_shares = minted;
        self.shares.insert(creator, minted);
        self.initial_liquidity_provided_time
            .entry(self.owner)
            .or_insert(now);
        self.initial_liquidity_provided_time
            .entry(creator)
            .or_insert(now);
        Ok(minted)
    }

    /// Sells `amount_in` of `asset_in` from `trader` for the other asset.
    ///
    /// The trader must have approved the pool address for `amount_in`.
    ///
    /// # Errors
    ///
    /// - [`TrackerError::ZeroAmount`] if `amount_in` is zero.
    /// - [`TrackerError::UnknownAsset`] if `asset_in` is not in the pool.
    /// - [`TrackerError::InsufficientLiquidity`] if the quote is zero.
    /// - [`TrackerError::SlippageExceeded`] if the quote is below `min_amount_out`.
    /// - Ledger errors from pulling the input or paying the output.
    pub fn swap(
        &mut self,
        ledger: &dyn AssetLedger,
        trader: Address,
        asset_in: Address,
        amount_in: Amount,
        min_amount_out: Amount,
    ) -> Result<SwapOutcome, TrackerError> {
        if amount_in.is_zero() {
            return Err(TrackerError::ZeroAmount("swap input"));
        }
        let (reserve_in, reserve_out) = self.orient(asset_in)?;
        let asset_out = self.pair.other(&asset_in)?;
        let (amount_out, fee) = self.quote(amount_in, reserve_in, reserve_out)?;
        if amount_out.is_zero() {
            return Err(TrackerError::InsufficientLiquidity);
        }
        if amount_out < min_amount_out {
            return Err(TrackerError::SlippageExceeded {
                min_out: min_amount_out,
                actual: amount_out,
            });
        }

        let new_reserve_in = reserve_in.safe_add(&amount_in)?;
        let new_reserve_out = reserve_out.safe_sub(&amount_out)?;
        let totals = self.totals(asset_in)?;
        let new_totals = SideTotals {
            fees: totals.fees.safe_add(&fee)?,
            volume: totals.volume.safe_add(&amount_in)?,
        };

        ledger.ensure_can_pull(asset_in, self.address, trader, amount_in)?;
        if ledger.balance_of(asset_out, self.address) < amount_out {
            return Err(TrackerError::TransferFailed("pool balance below swap output"));
        }
        ledger.transfer_from(asset_in, self.address, trader, self.address, amount_in)?;
        if let Err(err) = ledger.transfer(asset_out, self.address, trader, amount_out) {
            self.refund(ledger, asset_in, trader, amount_in);
            return Err(err);
        }

        if asset_in == self.asset_one {
            self.reserve_one = new_reserve_in;
            self.reserve_two = new_reserve_out;
            self.totals_one = new_totals;
        } else {
            self.reserve_two = new_reserve_in;
            self.reserve_one = new_reserve_out;
            self.totals_two = new_totals;
        }
        self.swap_count = self.swap_count.saturating_add(1);

        let outcome = SwapOutcome::new(asset_in, asset_out, amount_in, amount_out, fee);
        info!(pool = %self.address, %trader, %outcome, "swap executed");
        Ok(outcome)
    }

    /// Deposits both assets from `provider` in exchange for shares.
    ///
    /// Shares minted are `min(Δ1 × S / R1, Δ2 × S / R2)`, so an unbalanced
    /// deposit donates its excess to existing providers. On an emptied pool
    /// the deposit re-seeds it at `isqrt(Δ1 × Δ2)`. The provider must have
    /// approved the pool address for both amounts. The first deposit of a
    /// provider records its `initial_liquidity_provided_time`.
    ///
    /// # Errors
    ///
    /// - [`TrackerError::ZeroAmount`] if either amount is zero.
    /// - [`TrackerError::InvalidQuantity`] if the deposit mints no shares.
    /// - [`TrackerError::Overflow`] if arithmetic overflows.
    /// - Ledger errors from pulling either leg.
    pub fn add_liquidity(
        &mut self,
        ledger: &dyn AssetLedger,
        provider: Address,
        amount_one: Amount,
        amount_two: Amount,
        now: Timestamp,
    ) -> Result<Shares, TrackerError> {
        if amount_one.is_zero() || amount_two.is_zero() {
            return Err(TrackerError::ZeroAmount("liquidity deposit"));
        }

        let minted = if self.total_shares.is_zero() {
            Shares::new(isqrt(amount_one.safe_mul(&amount_two)?.get()))
        } else {
            let total = Amount::new(self.total_shares.get());
            let by_one = mul_div(
                amount_one,
                total,
                self.reserve_one,
                Rounding::Down,
                "reserve one is zero",
            )?;
            let by_two = mul_div(
                amount_two,
                total,
                self.reserve_two,
                Rounding::Down,
                "reserve two is zero",
            )?;
            Shares::new(by_one.min(by_two).get())
        };
        if minted.is_zero() {
            return Err(TrackerError::InvalidQuantity(
                "deposit too small to mint shares",
            ));
        }

        let new_reserve_one = self.reserve_one.safe_add(&amount_one)?;
        let new_reserve_two = self.reserve_two.safe_add(&amount_two)?;
        let new_total = self.total_shares.safe_add(&minted)?;
        let new_held = self.shares_of(provider).safe_add(&minted)?;

        self.pull_pair(ledger, self.address, provider, amount_one, amount_two)?;

        self.reserve_one = new_reserve_one;
        self.reserve_two = new_reserve_two;
        self.total_shares = new_total;
        self.shares.insert(provider, new_held);
        self.initial_liquidity_provided_time
            .entry(provider)
            .or_insert(now);
        info!(
            pool = %self.address,
            %provider,
            %amount_one,
            %amount_two,
            %minted,
            "liquidity added"
        );
        Ok(minted)
    }

    /// Burns `shares` of `provider` and pays out the pro-rata reserves.
    ///
    /// Each side pays `reserve × shares / total_shares`, rounded down.
    /// Returns the `(asset_one, asset_two)` amounts paid.
    ///
    /// # Errors
    ///
    /// - [`TrackerError::ZeroAmount`] if `shares` is zero.
    /// - [`TrackerError::InsufficientShares`] if `provider` holds fewer shares.
    /// - Ledger errors from paying either leg.
    pub fn remove_liquidity(
        &mut self,
        ledger: &dyn AssetLedger,
        provider: Address,
        shares: Shares,
    ) -> Result<(Amount, Amount), TrackerError> {
        if shares.is_zero() {
            return Err(TrackerError::ZeroAmount("share withdrawal"));
        }
        let held = self.shares_of(provider);
        if held < shares {
            return Err(TrackerError::InsufficientShares {
                held: held.get(),
                requested: shares.get(),
            });
        }

        let total = Amount::new(self.total_shares.get());
        let burned = Amount::new(shares.get());
        let out_one = mul_div(
            self.reserve_one,
            burned,
            total,
            Rounding::Down,
            "no shares outstanding",
        )?;
        let out_two = mul_div(
            self.reserve_two,
            burned,
            total,
            Rounding::Down,
            "no shares outstanding",
        )?;
        let new_reserve_one = self.reserve_one.safe_sub(&out_one)?;
        let new_reserve_two = self.reserve_two.safe_sub(&out_two)?;
        let new_total = self.total_shares.safe_sub(&shares)?;
        let new_held = held.safe_sub(&shares)?;

        if ledger.balance_of(self.asset_one, self.address) < out_one
            || ledger.balance_of(self.asset_two, self.address) < out_two
        {
            return Err(TrackerError::TransferFailed(
                "pool balance below withdrawal",
            ));
        }
        ledger.transfer(self.asset_one, self.address, provider, out_one)?;
        if let Err(err) = ledger.transfer(self.asset_two, self.address, provider, out_two) {
            if ledger
                .transfer(self.asset_one, provider, self.address, out_one)
                .is_err()
            {
                warn!(pool = %self.address, %provider, "withdrawal rollback failed");
            }
            return Err(err);
        }

        self.reserve_one = new_reserve_one;
        self.reserve_two = new_reserve_two;
        self.total_shares = new_total;
        if new_held.is_zero() {
            self.shares.remove(&provider);
        } else {
            self.shares.insert(provider, new_held);
        }
        info!(
            pool = %self.address,
            %provider,
            %shares,
            %out_one,
            %out_two,
            "liquidity removed"
        );
        Ok((out_one, out_two))
    }

    // -- helpers --------------------------------------------------------------

    /// Returns `(reserve_in, reserve_out)` for a sale of `asset_in`.
    fn orient(&self, asset_in: Address) -> Result<(Amount, Amount), TrackerError> {
        if !self.pair.contains(&asset_in) {
            return Err(TrackerError::UnknownAsset(asset_in));
        }
        if asset_in == self.asset_one {
            Ok((self.reserve_one, self.reserve_two))
        } else {
            Ok((self.reserve_two, self.reserve_one))
        }
    }

    fn totals(&self, asset: Address) -> Result<SideTotals, TrackerError> {
        if asset == self.asset_one {
            Ok(self.totals_one)
        } else if asset == self.asset_two {
            Ok(self.totals_two)
        } else {
            Err(TrackerError::UnknownAsset(asset))
        }
    }

    /// Pulls both legs of a deposit into the pool, checking both first.
    fn pull_pair(
        &self,
        ledger: &dyn AssetLedger,
        spender: Address,
        from: Address,
        amount_one: Amount,
        amount_two: Amount,
    ) -> Result<(), TrackerError> {
        ledger.ensure_can_pull(self.asset_one, spender, from, amount_one)?;
        ledger.ensure_can_pull(self.asset_two, spender, from, amount_two)?;
        ledger.transfer_from(self.asset_one, spender, from, self.address, amount_one)?;
        if let Err(err) =
            ledger.transfer_from(self.asset_two, spender, from, self.address, amount_two)
        {
            self.refund(ledger, self.asset_one, from, amount_one);
            return Err(err);
        }
        debug!(pool = %self.address, %from, %amount_one, %amount_two, "deposit pulled");
        Ok(())
    }

    fn refund(&self, ledger: &dyn AssetLedger, asset: Address, to: Address, amount: Amount) {
        if ledger.transfer(asset, self.address, to, amount).is_err() {
            warn!(pool = %self.address, %asset, %to, %amount, "refund failed");
        }
    }
}
