//! Liquidity snapshot CLI
//!
//! Usage:
//!   dex_snapshot refresh
//!   dex_snapshot pools --asset-a lovelace --asset-b <unit>
//!   dex_snapshot tokens --verified
//!   dex_snapshot chart --asset-a lovelace --asset-b <unit> --days 7

use aggregator_config::{load_config, AggregatorConfig, LoggingConfig};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dex_adapters::{TokenRegistry, VenueAdapter, VyFinanceAdapter};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use types::Asset;

const DAY_MS: i64 = 24 * 60 * 60 * 1000;

#[derive(Parser, Debug)]
#[command(name = "dex_snapshot")]
#[command(about = "Query normalized Cardano DEX liquidity")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Configuration file (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Refresh the token registry and print what was loaded
    Refresh,
    /// List liquidity pools, optionally for one pair
    Pools {
        #[arg(long)]
        asset_a: Option<String>,
        #[arg(long)]
        asset_b: Option<String>,
    },
    /// List traded tokens
    Tokens {
        /// Only tokens whose policy is verified
        #[arg(long)]
        verified: bool,
    },
    /// Price history for a pair
    Chart {
        #[arg(long)]
        asset_a: String,
        #[arg(long)]
        asset_b: String,
        /// How many days back
        #[arg(long, default_value_t = 7)]
        days: i64,
    },
}

#[derive(Serialize)]
struct RefreshSummary {
    entries: usize,
    verified: usize,
    decimals_source: String,
    verified_source: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = load_config(args.config.as_deref()).context("Failed to load configuration")?;
    init_logging(&config.logging)?;

    let registry = TokenRegistry::init_shared(config.registry.clone())
        .context("Failed to create token registry")?;
    let report = registry.refresh().await;

    match args.command {
        Command::Refresh => print_json(&RefreshSummary {
            entries: registry.len(),
            verified: registry.verified_count(),
            decimals_source: format!("{:?}", report.decimals),
            verified_source: format!("{:?}", report.verified),
        }),
        Command::Pools { asset_a, asset_b } => {
            let adapter = venue(&config, registry)?;
            let asset_a = asset_a.map(|unit| parse_asset(&adapter, &unit)).transpose()?;
            let asset_b = asset_b.map(|unit| parse_asset(&adapter, &unit)).transpose()?;

            let outcome = adapter.liquidity_pools(asset_a.as_ref(), asset_b.as_ref()).await;
            if let Some(e) = outcome.error() {
                warn!("Pool listing unavailable: {}", e);
            }
            print_json(outcome.items())
        }
        Command::Tokens { verified } => {
            let adapter = venue(&config, registry)?;
            let outcome = adapter.tokens(verified).await;
            if let Some(e) = outcome.error() {
                warn!("Token listing unavailable: {}", e);
            }
            print_json(outcome.items())
        }
        Command::Chart {
            asset_a,
            asset_b,
            days,
        } => {
            let adapter = venue(&config, registry)?;
            let asset_a = parse_asset(&adapter, &asset_a)?;
            let asset_b = parse_asset(&adapter, &asset_b)?;
            let time_from = now_ms()?.saturating_sub(days.saturating_mul(DAY_MS));

            info!(pair = %format!("{}/{}", asset_a, asset_b), time_from, "Fetching price chart");
            let outcome = adapter.price_chart(&asset_a, &asset_b, time_from).await;
            if let Some(e) = outcome.error() {
                warn!("Price chart unavailable: {}", e);
            }
            print_json(outcome.items())
        }
    }
}

fn init_logging(logging: &LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&logging.level))
        .context("Invalid log level")?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
    Ok(())
}

fn venue(config: &AggregatorConfig, registry: Arc<TokenRegistry>) -> Result<VyFinanceAdapter> {
    VyFinanceAdapter::new(config.vyfinance.clone(), registry).context("Failed to create VyFinance adapter")
}

fn parse_asset(adapter: &VyFinanceAdapter, unit: &str) -> Result<Asset> {
    let registry = adapter.registry();
    let decimals = registry.decimals_or(unit, registry.default_decimals());
    Asset::from_unit(unit, decimals).with_context(|| format!("Invalid asset unit '{}'", unit))
}

fn now_ms() -> Result<i64> {
    let elapsed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .context("System clock before Unix epoch")?;
    Ok(elapsed.as_millis() as i64)
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", json);
    Ok(())
}
