use serde::{Deserialize, Serialize};
use serde_json::Value;

use std::collections::HashMap;

use crate::error::RouterError;

/*
{
    "name": "Aave V3",
    "category": "Lending",
    "chains": ["Ethereum", "Arbitrum", "Lisk"],
    "tvl": 28312345678.12,
    "tvlPrevDay": 28012345678.12,
    "tvlPrevWeek": 27512345678.12,
    "tvlPrevMonth": 25512345678.12,
    "logo": "https://icons.llamao.fi/icons/protocols/aave-v3.png",
    "chainTvls": {
        "Lisk": { "tvl": 1234567.0, "tvlPrevDay": 1200000.0, "tvlPrevWeek": 1100000.0, "tvlPrevMonth": 900000.0 }
    }
}
*/
/// One record of the upstream feed. Every field may be missing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawProtocolRecord {
    pub name: Option<String>,
    pub category: Option<String>,
    pub chains: Option<Vec<String>>,
    pub tvl: Option<f64>,
    pub tvl_prev_day: Option<f64>,
    pub tvl_prev_week: Option<f64>,
    pub tvl_prev_month: Option<f64>,
    pub logo: Option<String>,
    #[serde(default)]
    pub chain_tvls: HashMap<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainTvl {
    pub tvl: Option<f64>,
    pub tvl_prev_day: Option<f64>,
    pub tvl_prev_week: Option<f64>,
    pub tvl_prev_month: Option<f64>,
}

impl RawProtocolRecord {
    pub fn chains(&self) -> &[String] {
        self.chains.as_deref().unwrap_or_default()
    }

    /// Per-chain TVL breakdown under `chain` as spelled, or its lowercase form.
    pub fn chain_tvl(&self, chain: &str) -> Option<ChainTvl> {
        self.chain_tvls
            .get(chain)
            .or_else(|| self.chain_tvls.get(&chain.to_lowercase()))
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }
}

#[derive(Debug, Deserialize)]
struct FeedResponse {
    protocols: Vec<Value>,
}

/// Parse a feed body into records, dropping records that cannot be read.
pub fn parse_feed(body: &[u8]) -> Result<Vec<RawProtocolRecord>, RouterError> {
    let response: FeedResponse = serde_json::from_slice(body)?;

    let total = response.protocols.len();
    let records: Vec<RawProtocolRecord> = response
        .protocols
        .into_iter()
        .filter_map(|v| {
            serde_json::from_value(v)
                .inspect_err(|e| tracing::warn!("Dropping unreadable protocol record: {}", e))
                .ok()
        })
        .collect();

    tracing::info!("Received {} protocols ({} readable)", total, records.len());
    Ok(records)
}
