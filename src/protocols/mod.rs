pub mod category;
pub mod fallback;
pub mod format;

use serde::{Deserialize, Serialize};
use tracing::instrument;

use std::sync::Arc;

use crate::config::Config;
use crate::feed::{ProtocolFeed, RawProtocolRecord};

use category::{assets_for_category, risk_for_category, RiskTier};
use format::{estimate_apy, format_change, format_tvl, logo_slug, non_zero, num, TvlPolicy};

/// Placeholder APY shown in chain-scoped mode, where the feed carries no
/// usable yield signal.
pub const CHAIN_PLACEHOLDER_APY: &str = "8.5%";
const CHAIN_DEFAULT_CATEGORY: &str = "DeFi";
const CHAIN_DEFAULT_LOGO: &str = "/placeholder-logo.svg";
const UNKNOWN_NAME: &str = "Unknown";

/// UI-ready protocol row. Ids are positions within one fetch, starting at 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayProtocol {
    pub id: usize,
    pub name: String,
    pub category: String,
    pub apy: String,
    pub tvl: String,
    pub input: String,
    pub output: String,
    pub risk: RiskTier,
    pub status: String,
    pub change: String,
    pub logo: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum NormalizerMode {
    /// Protocols deployed on `chain`, valued by their TVL on that chain.
    ChainScoped { chain: String, asset: String },
    /// The first `limit` protocols with TVL above `min_tvl`.
    Top { min_tvl: f64, limit: usize },
}

impl NormalizerMode {
    pub fn chain_from_config(config: &Config) -> Self {
        NormalizerMode::ChainScoped {
            chain: config.target_chain.clone(),
            asset: config.chain_asset.clone(),
        }
    }

    pub fn top_from_config(config: &Config) -> Self {
        NormalizerMode::Top {
            min_tvl: config.top_min_tvl,
            limit: config.top_limit,
        }
    }

    pub fn fallback(&self) -> Vec<DisplayProtocol> {
        match self {
            NormalizerMode::ChainScoped { .. } => fallback::chain_fallback(),
            NormalizerMode::Top { .. } => fallback::top_fallback(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolList {
    pub protocols: Vec<DisplayProtocol>,
    /// Set when `protocols` is fallback data rather than live feed data.
    pub degraded: bool,
    pub error: Option<String>,
}

pub struct ProtocolNormalizer {
    feed: Arc<dyn ProtocolFeed>,
}

impl ProtocolNormalizer {
    pub fn new(feed: Arc<dyn ProtocolFeed>) -> Self {
        Self { feed }
    }

    /// Fetch the feed and derive display rows for `mode`. Never fails: an
    /// unusable feed yields the mode's fallback list, flagged as degraded.
    #[instrument(name = "Normalizer::list", skip(self))]
    pub async fn list(&self, mode: &NormalizerMode) -> ProtocolList {
        let records = match self.feed.fetch().await {
            Ok(records) => records,
            Err(e) => {
                tracing::error!("Error fetching protocols: {}", e);
                return ProtocolList {
                    protocols: mode.fallback(),
                    degraded: true,
                    error: Some("Using fallback data due to API error".to_string()),
                };
            }
        };

        let protocols = normalize(&records, mode);
        if protocols.is_empty() {
            tracing::warn!("No qualifying protocols in feed, using fallback data");
            return ProtocolList {
                protocols: mode.fallback(),
                degraded: true,
                error: Some("Using fallback data, no qualifying protocols found".to_string()),
            };
        }

        tracing::info!("Serving {} protocols", protocols.len());
        ProtocolList {
            protocols,
            degraded: false,
            error: None,
        }
    }
}

/// Filter `records` for `mode` and derive their display fields.
pub fn normalize(records: &[RawProtocolRecord], mode: &NormalizerMode) -> Vec<DisplayProtocol> {
    match mode {
        NormalizerMode::ChainScoped { chain, asset } => {
            let needle = chain.to_lowercase();
            records
                .iter()
                .filter(|r| r.chains().iter().any(|c| c.to_lowercase().contains(&needle)))
                .enumerate()
                .map(|(index, record)| chain_row(index + 1, record, chain, asset))
                .collect()
        }
        NormalizerMode::Top { min_tvl, limit } => records
            .iter()
            .filter(|r| num(r.tvl) > *min_tvl)
            .take(*limit)
            .enumerate()
            .map(|(index, record)| top_row(index + 1, record))
            .collect(),
    }
}

fn chain_row(id: usize, record: &RawProtocolRecord, chain: &str, asset: &str) -> DisplayProtocol {
    let chain_tvl = record.chain_tvl(chain).unwrap_or_default();
    let current_tvl = non_zero(chain_tvl.tvl)
        .or(non_zero(record.tvl))
        .unwrap_or(0.0);
    let prev_day_tvl = non_zero(chain_tvl.tvl_prev_day).or(record.tvl_prev_day);

    let category = record
        .category
        .clone()
        .unwrap_or_else(|| CHAIN_DEFAULT_CATEGORY.to_string());

    DisplayProtocol {
        id,
        name: record.name.clone().unwrap_or_else(|| UNKNOWN_NAME.to_string()),
        risk: risk_for_category(&category),
        category,
        apy: CHAIN_PLACEHOLDER_APY.to_string(),
        tvl: format_tvl(current_tvl, TvlPolicy::Precise),
        input: asset.to_string(),
        output: format!("a{}", asset),
        status: "Active".to_string(),
        change: format_change(current_tvl, prev_day_tvl, "0.0%"),
        logo: record
            .logo
            .clone()
            .filter(|l| !l.is_empty())
            .unwrap_or_else(|| CHAIN_DEFAULT_LOGO.to_string()),
    }
}

fn top_row(id: usize, record: &RawProtocolRecord) -> DisplayProtocol {
    let name = record.name.clone().unwrap_or_else(|| UNKNOWN_NAME.to_string());
    let category = record.category.clone().unwrap_or_default();
    let tvl = num(record.tvl);
    let (input, output) = assets_for_category(&category);

    let logo = record
        .logo
        .clone()
        .filter(|l| !l.is_empty())
        .unwrap_or_else(|| {
            format!(
                "https://icons.llamao.fi/icons/protocols/{}?w=48&h=48",
                logo_slug(&name)
            )
        });

    DisplayProtocol {
        id,
        apy: estimate_apy(tvl, num(record.tvl_prev_week)),
        tvl: format_tvl(tvl, TvlPolicy::Compact),
        input: input.to_string(),
        output: output.to_string(),
        risk: risk_for_category(&category),
        status: "Active".to_string(),
        change: format_change(tvl, Some(num(record.tvl_prev_day)), "+0.0%"),
        logo,
        name,
        category,
    }
}
