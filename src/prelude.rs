//! Convenience re-exports for common types and traits.
//!
//! The prelude provides a single import to bring all commonly used items
//! into scope:
//!
//! ```rust
//! use hydra_tracker::prelude::*;
//! ```

// Re-export domain types
pub use crate::domain::{
    Address, Amount, AssetPair, FeeTier, OraclePrice, Rounding, Shares, SwapOutcome, Timestamp,
};

// Re-export core traits
pub use crate::traits::{AssetLedger, Clock, FromConfig, PriceFeeds};

// Re-export math utilities
pub use crate::math::CheckedArithmetic;

// Re-export configuration
pub use crate::config::{MetricsConfig, RegistryConfig, TrackerConfig};

// Re-export error types
pub use crate::error::{Result, TrackerError};

// Re-export the engine
pub use crate::exchange::Exchange;
pub use crate::metrics::{MetricsEngine, PoolMetrics, Valuation};
pub use crate::pools::ConstantProductPool;
pub use crate::registry::{PoolHandle, PoolRegistry, RegistryEvent, RoutingEntry};
