//! VyFinance venue adapter
//!
//! Normalizes the VyFinance REST API into the shared domain model:
//! - `/lp` pool listing, with a single retry on 502 and a one-level re-query
//!   for records whose reserves are missing
//! - `/lp/ohlcv` candle history, rescaled to milliseconds
//! - token listing derived from the global pool listing

mod payload;

use aggregator_config::endpoints::vyfinance::{OHLCV_PATH, POOLS_PATH};
use aggregator_config::VenueConfig;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, error, info, warn};
use types::{chart_from, Asset, DexType, LiquidityPool, Ohlcv, LOVELACE};

use self::payload::{CandleRecord, PoolDetails, PoolRecord, Reserves};
use crate::error::{AdapterError, Result};
use crate::http::build_client;
use crate::outcome::FetchOutcome;
use crate::registry::TokenRegistry;
use crate::venue::VenueAdapter;

const LP_TOKEN_DELIMITER: char = '-';

/// A listing record after normalization
#[derive(Debug)]
enum Converted {
    Pool(LiquidityPool),
    /// Both reserves zero
    Empty,
    /// Reserves missing or one-sided; re-query this pair
    Incomplete(Asset, Asset),
}

/// Raw upstream answer
enum Reply {
    Body(String),
    Status { url: String, status: StatusCode },
}

impl Reply {
    fn into_body(self) -> Result<String> {
        match self {
            Reply::Body(body) => Ok(body),
            Reply::Status { url, status } => Err(AdapterError::UnexpectedStatus {
                url,
                status: status.as_u16(),
            }),
        }
    }
}

pub struct VyFinanceAdapter {
    config: VenueConfig,
    client: Client,
    registry: Arc<TokenRegistry>,
}

impl VyFinanceAdapter {
    pub fn new(config: VenueConfig, registry: Arc<TokenRegistry>) -> Result<Self> {
        let client = build_client(config.request_timeout())?;
        Ok(Self::with_client(config, registry, client))
    }

    pub fn with_client(config: VenueConfig, registry: Arc<TokenRegistry>, client: Client) -> Self {
        Self {
            config,
            client,
            registry,
        }
    }

    pub fn registry(&self) -> &Arc<TokenRegistry> {
        &self.registry
    }

    fn pools_request(&self, pair: Option<(&Asset, &Asset)>) -> RequestBuilder {
        let url = format!("{}{}", self.config.base_url, POOLS_PATH);
        let mut query = vec![
            ("networkId", self.config.network_id.to_string()),
            ("v2", "true".to_string()),
        ];
        if let Some((asset_a, asset_b)) = pair {
            query.push(("tokenAUnit", venue_unit(asset_a)));
            query.push(("tokenBUnit", venue_unit(asset_b)));
        }
        self.client.get(url).query(&query)
    }

    fn ohlcv_request(&self, asset_a: &Asset, asset_b: &Asset) -> RequestBuilder {
        let url = format!("{}{}", self.config.base_url, OHLCV_PATH);
        let units_pair = format!("{}/{}", venue_unit(asset_a), venue_unit(asset_b));
        self.client.get(url).query(&[
            ("unitsPair", units_pair.as_str()),
            ("interval", self.config.ohlcv_interval.as_str()),
        ])
    }

    async fn send(&self, request: RequestBuilder) -> Result<Reply> {
        let request = request.build()?;
        let url = request.url().to_string();
        debug!(%url, "GET");

        let response = self.client.execute(request).await?;
        let status = response.status();
        if !status.is_success() {
            return Ok(Reply::Status { url, status });
        }
        Ok(Reply::Body(response.text().await?))
    }

    /// Pool listing body, re-issuing the request once after a 502
    async fn pools_body(&self, pair: Option<(&Asset, &Asset)>) -> Result<String> {
        let reply = match self.send(self.pools_request(pair)).await? {
            Reply::Status { url, status } if status == StatusCode::BAD_GATEWAY => {
                warn!(%url, status = status.as_u16(), "Upstream gateway error, retrying once");
                tokio::time::sleep(self.config.retry_delay()).await;
                self.send(self.pools_request(pair)).await?
            }
            reply => reply,
        };
        reply.into_body()
    }

    /// Fetch and normalize one listing, without re-querying anything
    async fn fetch_records(&self, pair: Option<(&Asset, &Asset)>) -> Result<Vec<Converted>> {
        let body = self.pools_body(pair).await?;
        let records: Vec<Value> = serde_json::from_str(&body)?;

        let mut converted = Vec::with_capacity(records.len());
        for record in records {
            if record.is_null() {
                continue;
            }
            match self.convert_record(record) {
                Ok(record) => converted.push(record),
                Err(e) => warn!("Skipping pool record: {}", e),
            }
        }
        Ok(converted)
    }

    fn convert_record(&self, record: Value) -> Result<Converted> {
        let invalid = |reason: String| AdapterError::InvalidRecord {
            venue: DexType::VyFinance,
            reason,
        };

        let record: PoolRecord = serde_json::from_value(record).map_err(|e| invalid(e.to_string()))?;
        let details: PoolDetails =
            serde_json::from_str(&record.json).map_err(|e| invalid(format!("embedded json: {}", e)))?;

        let asset_a = self.to_asset(&details.a_asset);
        let asset_b = self.to_asset(&details.b_asset);

        let (reserve_a, reserve_b) = match Reserves::classify(
            record.token_a_quantity.as_ref(),
            record.token_b_quantity.as_ref(),
        ) {
            Reserves::Liquid(a, b) => (a, b),
            Reserves::Empty => return Ok(Converted::Empty),
            Reserves::Incomplete => return Ok(Converted::Incomplete(asset_a, asset_b)),
            Reserves::Malformed => {
                return Err(invalid(format!(
                    "unparseable reserves {:?}/{:?}",
                    record.token_a_quantity, record.token_b_quantity
                )))
            }
        };

        let (lp_policy, lp_name) = record
            .lp_policy_asset
            .split_once(LP_TOKEN_DELIMITER)
            .ok_or_else(|| invalid(format!("malformed LP token '{}'", record.lp_policy_asset)))?;
        let lp_token = Asset::new(lp_policy, lp_name, 0);

        Ok(Converted::Pool(LiquidityPool::new(
            DexType::VyFinance,
            asset_a,
            asset_b,
            reserve_a,
            reserve_b,
            record.pool_validator_utxo_address,
            record.order_validator_utxo_address.clone(),
            record.order_validator_utxo_address,
            lp_token,
            details.fees_settings.fee_percent(),
        )))
    }

    fn to_asset(&self, asset: &payload::AssetRef) -> Asset {
        if asset.is_native() {
            return Asset::lovelace();
        }
        let policy_id = asset.currency_symbol.trim();
        let asset_name = asset.asset_name();
        let unit = format!("{}{}", policy_id, asset_name);
        let decimals = self
            .registry
            .decimals_or(&unit, self.registry.default_decimals());
        Asset::new(policy_id, asset_name, decimals)
    }

    /// Listing with incomplete records replaced by a one-level re-query
    async fn collect_pools(&self, pair: Option<(&Asset, &Asset)>) -> Result<Vec<LiquidityPool>> {
        let records = self.fetch_records(pair).await?;
        let mut pools = Vec::with_capacity(records.len());

        for record in records {
            match record {
                Converted::Pool(pool) => pools.push(pool),
                Converted::Empty => {}
                Converted::Incomplete(asset_a, asset_b) => {
                    match self.requery(&asset_a, &asset_b).await {
                        Some(pool) => pools.push(pool),
                        None => warn!(
                            asset_a = %asset_a,
                            asset_b = %asset_b,
                            "Dropping pool with incomplete reserves"
                        ),
                    }
                }
            }
        }

        Ok(pools)
    }

    /// First liquid pool of the pair's own listing; never re-queries further
    async fn requery(&self, asset_a: &Asset, asset_b: &Asset) -> Option<LiquidityPool> {
        debug!(asset_a = %asset_a, asset_b = %asset_b, "Re-querying pool with incomplete reserves");

        match self.fetch_records(Some((asset_a, asset_b))).await {
            Ok(records) => records.into_iter().find_map(|record| match record {
                Converted::Pool(pool) if pool.has_liquidity() => Some(pool),
                _ => None,
            }),
            Err(e) => {
                warn!("Pool re-query failed: {}", e);
                None
            }
        }
    }

    async fn fetch_chart(&self, asset_a: &Asset, asset_b: &Asset, time_from_ms: i64) -> Result<Vec<Ohlcv>> {
        let body = self.send(self.ohlcv_request(asset_a, asset_b)).await?.into_body()?;
        let records: Vec<Value> = serde_json::from_str(&body)?;
        let candles = records
            .into_iter()
            .filter(|record| !record.is_null())
            .filter_map(|record| serde_json::from_value::<CandleRecord>(record).ok())
            .filter_map(to_candle)
            .collect();

        Ok(chart_from(candles, time_from_ms))
    }
}

/// Unit as the venue expects it; the native currency is always `lovelace`
fn venue_unit(asset: &Asset) -> String {
    if asset.is_lovelace() {
        LOVELACE.to_string()
    } else {
        asset.identifier()
    }
}

fn to_candle(record: CandleRecord) -> Option<Ohlcv> {
    let time = record.time.as_ref().and_then(payload::parse_seconds)?;
    let field = |value: &Option<Value>| value.as_ref().and_then(payload::parse_f64).unwrap_or(0.0);

    Some(Ohlcv::new(
        field(&record.open),
        field(&record.high),
        field(&record.low),
        field(&record.close),
        field(&record.volume),
        time.saturating_mul(1000),
    ))
}

#[async_trait]
impl VenueAdapter for VyFinanceAdapter {
    fn dex(&self) -> DexType {
        DexType::VyFinance
    }

    async fn liquidity_pools(
        &self,
        asset_a: Option<&Asset>,
        asset_b: Option<&Asset>,
    ) -> FetchOutcome<LiquidityPool> {
        let pair = asset_a.zip(asset_b);

        match self.collect_pools(pair).await {
            Ok(pools) => {
                let pools: Vec<_> = pools.into_iter().filter(LiquidityPool::has_liquidity).collect();
                info!(pools = pools.len(), "Fetched VyFinance pools");
                FetchOutcome::Fetched(pools)
            }
            Err(e) => {
                error!(status = ?e.status(), "VyFinance pool listing unavailable: {}", e);
                FetchOutcome::Unavailable(e)
            }
        }
    }

    async fn tokens(&self, verified_only: bool) -> FetchOutcome<Asset> {
        self.liquidity_pools(None, None).await.map_items(|pools| {
            let mut by_identifier = BTreeMap::new();
            for pool in pools {
                for asset in [pool.asset_a, pool.asset_b] {
                    if asset.is_lovelace() {
                        continue;
                    }
                    if verified_only && !self.registry.is_verified(asset.policy_id()) {
                        continue;
                    }
                    by_identifier.entry(asset.identifier()).or_insert(asset);
                }
            }
            by_identifier.into_values().collect()
        })
    }

    async fn price_chart(
        &self,
        asset_a: &Asset,
        asset_b: &Asset,
        time_from_ms: i64,
    ) -> FetchOutcome<Ohlcv> {
        match self.fetch_chart(asset_a, asset_b, time_from_ms).await {
            Ok(candles) => FetchOutcome::Fetched(candles),
            Err(e) => {
                error!(status = ?e.status(), "VyFinance price chart unavailable: {}", e);
                FetchOutcome::Unavailable(e)
            }
        }
    }
}
