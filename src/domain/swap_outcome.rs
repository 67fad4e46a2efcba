//! Outcome of an executed swap.

use core::fmt;

use super::{Address, Amount};

/// What a committed swap exchanged.
///
/// `fee` is the part of `amount_in` withheld before the constant-product
/// formula; it stays in the pool's reserves and is added to the pool's
/// yield.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SwapOutcome {
    asset_in: Address,
    asset_out: Address,
    amount_in: Amount,
    amount_out: Amount,
    fee: Amount,
}

impl SwapOutcome {
    /// Creates a swap outcome.
    pub const fn new(
        asset_in: Address,
        asset_out: Address,
        amount_in: Amount,
        amount_out: Amount,
        fee: Amount,
    ) -> Self {
        Self {
            asset_in,
            asset_out,
            amount_in,
            amount_out,
            fee,
        }
    }

    /// Returns the asset sold to the pool.
    #[must_use]
    pub const fn asset_in(&self) -> Address {
        self.asset_in
    }

    /// Returns the asset bought from the pool.
    #[must_use]
    pub const fn asset_out(&self) -> Address {
        self.asset_out
    }

    /// Returns the gross input, fee included.
    pub const fn amount_in(&self) -> Amount {
        self.amount_in
    }

    /// Returns the output paid to the trader.
    pub const fn amount_out(&self) -> Amount {
        self.amount_out
    }

    /// Returns the fee withheld from the input.
    pub const fn fee(&self) -> Amount {
        self.fee
    }
}

impl fmt::Display for SwapOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} -> {} {} (fee {})",
            self.amount_in, self.asset_in, self.amount_out, self.asset_out, self.fee
        )
    }
}
