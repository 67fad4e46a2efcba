//! The pool registry: pair uniqueness, enumeration and the routing table.
//!
//! The [`PoolRegistry`] is the process-wide context object that creates
//! every [`ConstantProductPool`](crate::pools::ConstantProductPool). It
//! keys pools by a canonical [`AssetPair`](crate::domain::AssetPair), so
//! `(A, B)` and `(B, A)` always resolve to the same pool and a second
//! creation in either order fails with
//! [`DuplicatePair`](crate::error::TrackerError::DuplicatePair).
//!
//! Every sequence it keeps is append-only:
//!
//! | Sequence | Accessor | Appended when |
//! |----------|----------|---------------|
//! | all pools | [`pools`](PoolRegistry::pools) | a pool is created |
//! | counter-assets per token | [`pool_pairs`](PoolRegistry::pool_pairs) | a pool is created |
//! | distinct tokens | [`tokens`](PoolRegistry::tokens) | an asset appears for the first time |
//! | pools per creator | [`pool_owner`](PoolRegistry::pool_owner) | the creator creates a pool |
//! | routing entries | [`routing_addresses`](PoolRegistry::routing_addresses) | the admin adds one |

mod events;
mod pool_registry;
mod routing;

pub use events::RegistryEvent;
pub use pool_registry::{PoolHandle, PoolRegistry};
pub use routing::RoutingEntry;
