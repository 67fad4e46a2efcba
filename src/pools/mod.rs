//! The constant product liquidity pool.
//!
//! | Pool | Invariant | Fee |
//! |------|-----------|-----|
//! | [`ConstantProductPool`] | `x × y = k`, non-decreasing across swaps | configurable bp, default 0 |

pub mod constant_product;

#[cfg(test)]
mod proptest_properties;

pub use constant_product::ConstantProductPool;
