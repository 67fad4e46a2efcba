//! Pool metrics walkthrough.
//!
//! Creates two pools, routes WETH to a USD feed, trades for a few simulated
//! days and prints every metric the tracker computes.
//!
//! # Run
//!
//! ```bash
//! RUST_LOG=hydra_tracker=debug cargo run --example pool_metrics
//! ```

use std::sync::Arc;

use hydra_tracker::adapters::{InMemoryLedger, ManualClock, StaticPriceFeeds};
use hydra_tracker::config::TrackerConfig;
use hydra_tracker::domain::{Address, Amount, OraclePrice, Timestamp, SECONDS_PER_DAY};
use hydra_tracker::exchange::Exchange;
use tracing::Level;
use tracing_subscriber::EnvFilter;

const CONFIG: &str = r#"
[registry]
address = "0x00000000000000000000000000000000000000a0"
admin = "0x00000000000000000000000000000000000000ad"
fee_bps = 30

[metrics]
base_feed = "0x00000000000000000000000000000000000000fe"
roi_scale = 1000000
quote_unit = 1000
"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(Level::WARN.into()))
        .init();

    println!("=== Pool metrics ===\n");

    // ── 1. Load configuration and wire collaborators ────────────────────
    let config = TrackerConfig::from_toml_str(CONFIG)?;
    let registry = config.registry().address();
    let admin = config.registry().admin();
    let usd_feed = config.metrics().base_feed();

    let start = Timestamp::from_secs(1_700_000_000);
    let ledger = Arc::new(InMemoryLedger::new());
    let feeds = Arc::new(StaticPriceFeeds::new());
    let clock = Arc::new(ManualClock::new(start));
    feeds.set(usd_feed, OraclePrice::new(2_000, 0, start));

    let exchange = Exchange::new(&config, ledger.clone(), feeds.clone(), clock.clone())?;
    println!("Registry: {registry}");
    println!("Admin:    {admin}");

    // ── 2. Define tokens and fund accounts ──────────────────────────────
    let weth: Address = "0x0000000000000000000000000000000000000001".parse()?;
    let dai: Address = "0x0000000000000000000000000000000000000002".parse()?;
    let link: Address = "0x0000000000000000000000000000000000000003".parse()?;
    let lp: Address = "0x00000000000000000000000000000000000000c1".parse()?;
    let trader: Address = "0x00000000000000000000000000000000000000c2".parse()?;

    for token in [weth, dai, link] {
        ledger.mint(token, lp, Amount::new(10_000_000))?;
        ledger.mint(token, trader, Amount::new(1_000_000))?;
        ledger.approve(token, lp, registry, Amount::new(10_000_000));
    }

    // ── 3. Create pools ─────────────────────────────────────────────────
    let weth_dai = exchange.create_pool(
        lp,
        weth,
        dai,
        Amount::new(1_000_000),
        Amount::new(2_000_000),
    )?;
    let weth_link = exchange.create_pool(
        lp,
        weth,
        link,
        Amount::new(500_000),
        Amount::new(5_000_000),
    )?;
    println!("\nWETH/DAI pool:  {weth_dai}");
    println!("WETH/LINK pool: {weth_link}");

    exchange.add_routing_address(admin, weth, usd_feed)?;
    for event in exchange.drain_events() {
        println!("  event: {event:?}");
    }

    // ── 4. Trade over a few days ────────────────────────────────────────
    for token in [weth, dai] {
        ledger.approve(token, trader, weth_dai, Amount::new(1_000_000));
    }
    for day in 1..=3 {
        let sold = exchange.swap(trader, dai, weth, Amount::new(40_000), Amount::ZERO)?;
        let bought = exchange.swap(trader, weth, dai, Amount::new(20_000), Amount::ZERO)?;
        println!("\nDay {day}:");
        println!("  {sold}");
        println!("  {bought}");
        clock.advance(SECONDS_PER_DAY);
    }

    // ── 5. Report ───────────────────────────────────────────────────────
    let pool = exchange.pool_snapshot(weth, dai)?;
    println!("\n--- WETH/DAI after {} swaps ---", pool.swap_count());
    println!("  Reserves:        {} / {}", pool.reserve_one(), pool.reserve_two());
    println!("  Yield (fees):    {}", pool.yield_amount()?);
    println!("  DAI valuation:   {}", exchange.valuation(dai, Amount::new(1_000))?);

    for (name, token) in [("WETH", weth), ("DAI", dai), ("LINK", link)] {
        println!("\n{name}:");
        println!("  Market cap:      {}", exchange.market_cap(token)?);
        println!("  Value locked:    {}", exchange.tvl(token)?);
        match exchange.tvl_ratio(token) {
            Ok(ratio) => println!("  Locked ratio:    {ratio}%"),
            Err(e) => println!("  Locked ratio:    n/a ({e})"),
        }
    }

    println!("\nWETH/DAI returns:");
    println!("  Pair market cap: {}", exchange.pair_market_cap(weth, dai)?);
    println!("  Pair TVL:        {}", exchange.pair_tvl(weth, dai)?);
    println!("  Pair TVL ratio:  {}%", exchange.pair_tvl_ratio(weth, dai)?);
    println!("  Total ROI:       {}%", exchange.total_roi(weth, dai)?);
    println!("  Daily rate:      {}", exchange.daily_rate(weth, dai)?);
    println!("  Daily ROI:       {} (per 10^6)", exchange.daily_roi(weth, dai)?);

    println!("\nDone.");
    Ok(())
}
