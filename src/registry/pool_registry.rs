//! Pool creation, pair lookup and the routing table.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{info, warn};

use super::{RegistryEvent, RoutingEntry};
use crate::config::RegistryConfig;
use crate::domain::{Address, Amount, AssetPair, FeeTier, Timestamp};
use crate::error::TrackerError;
use crate::pools::ConstantProductPool;
use crate::traits::{AssetLedger, FromConfig};

/// Shared handle to a registered pool. Each pool has its own lock, so
/// swaps on different pools never contend.
pub type PoolHandle = Arc<RwLock<ConstantProductPool>>;

/// Registry of every pool, keyed by unordered asset pair.
///
/// The registry owns its pools. Creating one computes the pool's CREATE
/// address from the registry address and a nonce, pulls the seed deposit from the
/// creator through the registry's allowance, and only then records the
/// pool. A failed creation records nothing and consumes no nonce.
///
/// # Examples
///
/// ```
/// use hydra_tracker::adapters::InMemoryLedger;
/// use hydra_tracker::config::RegistryConfig;
/// use hydra_tracker::domain::{Address, Amount, FeeTier, Timestamp};
/// use hydra_tracker::registry::PoolRegistry;
/// use hydra_tracker::traits::FromConfig;
///
/// let registry_addr = Address::new([0xAA; 20]);
/// let admin = Address::new([0xBB; 20]);
/// let (x, y) = (Address::new([1; 20]), Address::new([2; 20]));
/// let creator = Address::new([3; 20]);
///
/// let ledger = InMemoryLedger::new();
/// for asset in [x, y] {
///     ledger.mint(asset, creator, Amount::new(1_000)).expect("mint");
///     ledger.approve(asset, creator, registry_addr, Amount::new(1_000));
/// }
///
/// let cfg = RegistryConfig::new(registry_addr, admin, FeeTier::ZERO).expect("valid");
/// let mut registry = PoolRegistry::from_config(&cfg).expect("valid");
/// let pool = registry
///     .create_pool(&ledger, creator, x, y, Amount::new(1_000), Amount::new(1_000), Timestamp::EPOCH)
///     .expect("created");
///
/// assert_eq!(registry.pair_to_pool(x, y), Some(pool));
/// assert_eq!(registry.pair_to_pool(y, x), Some(pool));
/// ```
#[derive(Debug)]
pub struct PoolRegistry {
    address: Address,
    admin: Address,
    fee_tier: FeeTier,
    nonce: u64,
    pair_to_pool: HashMap<AssetPair, Address>,
    pools_by_address: HashMap<Address, PoolHandle>,
    pools: Vec<Address>,
    pool_pairs: HashMap<Address, Vec<Address>>,
    tokens: Vec<Address>,
    known_tokens: HashSet<Address>,
    pool_owner: HashMap<Address, Vec<Address>>,
    routing_addresses: Vec<RoutingEntry>,
    events: Vec<RegistryEvent>,
}

impl FromConfig<RegistryConfig> for PoolRegistry {
    /// Creates an empty registry.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`RegistryConfig::validate`].
    fn from_config(config: &RegistryConfig) -> Result<Self, TrackerError> {
        config.validate()?;
        Ok(Self {
            address: config.address(),
            admin: config.admin(),
            fee_tier: config.fee_tier(),
            nonce: 0,
            pair_to_pool: HashMap::new(),
            pools_by_address: HashMap::new(),
            pools: Vec::new(),
            pool_pairs: HashMap::new(),
            tokens: Vec::new(),
            known_tokens: HashSet::new(),
            pool_owner: HashMap::new(),
            routing_addresses: Vec::new(),
            events: Vec::new(),
        })
    }
}

impl PoolRegistry {
    /// Returns the registry's own address, the owner of every pool.
    #[must_use]
    pub const fn address(&self) -> Address {
        self.address
    }

    /// Returns the administrative owner.
    #[must_use]
    pub const fn admin(&self) -> Address {
        self.admin
    }

    /// Returns the fee tier given to new pools.
    #[must_use]
    pub const fn fee_tier(&self) -> FeeTier {
        self.fee_tier
    }

    // -- mutators -------------------------------------------------------------

    /// Creates and seeds the pool for `{asset_a, asset_b}`.
    ///
    /// `creator` must have approved the registry address for `amount_a` of
    /// `asset_a` and `amount_b` of `asset_b`. On success the pool is indexed
    /// under both orders, new assets are appended to
    /// [`tokens`](Self::tokens), the pool is appended to the creator's
    /// [`pool_owner`](Self::pool_owner) list and a
    /// [`RegistryEvent::PoolCreated`] is recorded.
    ///
    /// # Errors
    ///
    /// - [`TrackerError::IdenticalAssets`] if `asset_a == asset_b`.
    /// - [`TrackerError::DuplicatePair`] if the pair already has a pool, in either order.
    /// - [`TrackerError::ZeroAmount`] if either amount is zero.
    /// - [`TrackerError::InsufficientAllowance`] or [`TrackerError::TransferFailed`]
    ///   if the seed deposit cannot be pulled.
    #[allow(clippy::too_many_arguments)]
    pub fn create_pool(
        &mut self,
        ledger: &dyn AssetLedger,
        creator: Address,
        asset_a: Address,
        asset_b: Address,
        amount_a: Amount,
        amount_b: Amount,
        now: Timestamp,
    ) -> Result<Address, TrackerError> {
        let pair = AssetPair::new(asset_a, asset_b)?;
        if self.pair_to_pool.contains_key(&pair) {
            return Err(TrackerError::DuplicatePair(asset_a, asset_b));
        }

        let nonce = self
            .nonce
            .checked_add(1)
            .ok_or(TrackerError::Overflow("pool nonce overflow"))?;
        let pool_address = self.address.create(nonce);
        let mut pool =
            ConstantProductPool::new(pool_address, self.address, asset_a, asset_b, self.fee_tier)?;
        let minted = pool.seed(
            ledger,
            self.address,
            creator,
            (amount_a, amount_b),
            now,
        )?;

        self.nonce = nonce;
        self.pair_to_pool.insert(pair, pool_address);
        self.pools_by_address
            .insert(pool_address, Arc::new(RwLock::new(pool)));
        self.pools.push(pool_address);
        self.pool_pairs.entry(asset_a).or_default().push(asset_b);
        self.pool_pairs.entry(asset_b).or_default().push(asset_a);
        for asset in [asset_a, asset_b] {
            if self.known_tokens.insert(asset) {
                self.tokens.push(asset);
            }
        }
        self.pool_owner
            .entry(creator)
            .or_default()
            .push(pool_address);
        self.events.push(RegistryEvent::PoolCreated {
            pool: pool_address,
            asset_one: asset_a,
            asset_two: asset_b,
            creator,
        });
        info!(
            pool = %pool_address,
            asset_one = %asset_a,
            asset_two = %asset_b,
            %creator,
            %minted,
            "pool created"
        );
        Ok(pool_address)
    }

    /// Appends `(token, price_feed)` to the routing table.
    ///
    /// No uniqueness check is made: a token may be routed more than once,
    /// and valuation uses the first matching entry.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::NotOwner`] unless `caller` is the admin.
    pub fn add_routing_address(
        &mut self,
        caller: Address,
        token: Address,
        price_feed: Address,
    ) -> Result<(), TrackerError> {
        if caller != self.admin {
            warn!(%caller, %token, "routing entry rejected: caller is not the admin");
            return Err(TrackerError::NotOwner(caller));
        }
        let entry = RoutingEntry::new(token, price_feed);
        self.routing_addresses.push(entry);
        self.events
            .push(RegistryEvent::RoutingAddressAdded { token, price_feed });
        info!(%entry, index = self.routing_addresses.len() - 1, "routing entry added");
        Ok(())
    }

    /// Returns and clears the recorded events, oldest first.
    pub fn drain_events(&mut self) -> Vec<RegistryEvent> {
        std::mem::take(&mut self.events)
    }

    /// Returns the events recorded since the last drain.
    #[must_use]
    pub fn events(&self) -> &[RegistryEvent] {
        &self.events
    }

    // -- pair lookups ---------------------------------------------------------

    /// Returns the pool of `{a, b}`, in either order, if one exists.
    #[must_use]
    pub fn pair_to_pool(&self, a: Address, b: Address) -> Option<Address> {
        let pair = AssetPair::new(a, b).ok()?;
        self.pair_to_pool.get(&pair).copied()
    }

    /// Returns the pool of `{a, b}`.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::PoolNotFound`] if the pair has no pool.
    pub fn pool(&self, a: Address, b: Address) -> Result<PoolHandle, TrackerError> {
        self.pair_to_pool(a, b)
            .and_then(|address| self.pool_by_address(address))
            .ok_or(TrackerError::PoolNotFound(a, b))
    }

    /// Returns the pool registered at `address`.
    #[must_use]
    pub fn pool_by_address(&self, address: Address) -> Option<PoolHandle> {
        self.pools_by_address.get(&address).cloned()
    }

    // -- sequences ------------------------------------------------------------

    /// Returns the `index`-th pool ever created.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::IndexOutOfRange`] past the end.
    pub fn pools(&self, index: usize) -> Result<Address, TrackerError> {
        nth(&self.pools, index)
    }

    /// Returns the number of pools.
    #[must_use]
    pub fn pools_len(&self) -> usize {
        self.pools.len()
    }

    /// Returns the `index`-th counter-asset `token` has a pool with.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::IndexOutOfRange`] past the end.
    pub fn pool_pairs(&self, token: Address, index: usize) -> Result<Address, TrackerError> {
        nth(self.pool_pairs_of(token), index)
    }

    /// Returns the number of pools containing `token`.
    #[must_use]
    pub fn pool_pairs_len(&self, token: Address) -> usize {
        self.pool_pairs_of(token).len()
    }

    /// Returns every counter-asset of `token`, in pool creation order.
    #[must_use]
    pub fn pool_pairs_of(&self, token: Address) -> &[Address] {
        self.pool_pairs
            .get(&token)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Returns the `index`-th distinct token, in first-seen order.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::IndexOutOfRange`] past the end.
    pub fn tokens(&self, index: usize) -> Result<Address, TrackerError> {
        nth(&self.tokens, index)
    }

    /// Returns the number of distinct tokens.
    #[must_use]
    pub fn tokens_len(&self) -> usize {
        self.tokens.len()
    }

    /// Returns the `index`-th pool created by `creator`.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::IndexOutOfRange`] past the end.
    pub fn pool_owner(&self, creator: Address, index: usize) -> Result<Address, TrackerError> {
        let created = self
            .pool_owner
            .get(&creator)
            .map(Vec::as_slice)
            .unwrap_or_default();
        nth(created, index)
    }

    /// Returns the number of pools created by `creator`.
    #[must_use]
    pub fn pool_owner_len(&self, creator: Address) -> usize {
        self.pool_owner.get(&creator).map_or(0, Vec::len)
    }

    /// Returns the `index`-th routing entry.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::IndexOutOfRange`] past the end.
    pub fn routing_addresses(&self, index: usize) -> Result<RoutingEntry, TrackerError> {
        nth(&self.routing_addresses, index)
    }

    /// Returns the number of routing entries.
    #[must_use]
    pub fn routing_addresses_len(&self) -> usize {
        self.routing_addresses.len()
    }

    /// Returns the routing table in insertion order.
    #[must_use]
    pub fn routing_entries(&self) -> &[RoutingEntry] {
        &self.routing_addresses
    }
}

fn nth<T: Copy>(items: &[T], index: usize) -> Result<T, TrackerError> {
    items
        .get(index)
        .copied()
        .ok_or(TrackerError::IndexOutOfRange {
            index,
            len: items.len(),
        })
}
