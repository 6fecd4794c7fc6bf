use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskTier {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for RiskTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            RiskTier::Low => "Low",
            RiskTier::Medium => "Medium",
            RiskTier::High => "High",
        };
        write!(f, "{}", s)
    }
}

/// Coarse risk by protocol category. Unknown categories are `Medium`.
pub fn risk_for_category(category: &str) -> RiskTier {
    match category {
        "Lending" | "Liquid Staking" | "RWA" | "Staking" => RiskTier::Low,
        "DEX" | "Restaking" | "Cross Chain" | "Bridge" => RiskTier::Medium,
        "Yield" | "Derivatives" | "Synthetics" | "Options" | "Leveraged Farming"
        | "Yield Farming" => RiskTier::High,
        _ => RiskTier::Medium,
    }
}

/// Suggested (input, output) asset labels by protocol category.
pub fn assets_for_category(category: &str) -> (&'static str, &'static str) {
    match category {
        "Lending" => ("USDC/ETH", "aTokens"),
        "DEX" => ("ETH/USDC", "LP Tokens"),
        "Liquid Staking" => ("ETH", "stETH"),
        "Restaking" => ("ETH", "Restaked ETH"),
        "Yield" => ("Various", "Yield Tokens"),
        "Derivatives" => ("Collateral", "Derivatives"),
        "Synthetics" => ("Collateral", "Synths"),
        "Options" => ("Premium", "Options"),
        "Cross Chain" => ("Assets", "Wrapped Assets"),
        "Bridge" => ("Assets", "Bridged Assets"),
        "RWA" => ("Fiat/Assets", "RWA Tokens"),
        "Staking" => ("Native Token", "Staked Token"),
        _ => ("Assets", "Tokens"),
    }
}
