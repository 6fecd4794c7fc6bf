use super::category::RiskTier;
use super::DisplayProtocol;

const CHAIN_PLACEHOLDER_LOGO: &str = "/placeholder-logo.svg";
const TOP_PLACEHOLDER_LOGO: &str = "/placeholder.svg";

#[allow(clippy::too_many_arguments)]
fn protocol(
    id: usize,
    name: &str,
    category: &str,
    apy: &str,
    tvl: &str,
    input: &str,
    output: &str,
    risk: RiskTier,
    change: &str,
    logo: &str,
) -> DisplayProtocol {
    DisplayProtocol {
        id,
        name: name.to_string(),
        category: category.to_string(),
        apy: apy.to_string(),
        tvl: tvl.to_string(),
        input: input.to_string(),
        output: output.to_string(),
        risk,
        status: "Active".to_string(),
        change: change.to_string(),
        logo: logo.to_string(),
    }
}

/// Served by the chain-scoped mode when the feed has nothing usable.
#[rustfmt::skip]
pub fn chain_fallback() -> Vec<DisplayProtocol> {
    vec![
        protocol(1, "Uniswap V3", "DEX", "12.3%", "$2.5M", "LSK", "LP", RiskTier::Medium, "+2.1%", CHAIN_PLACEHOLDER_LOGO),
        protocol(2, "Mellow LRT", "Liquid Staking", "8.7%", "$1.8M", "LSK", "stLSK", RiskTier::Low, "+1.5%", CHAIN_PLACEHOLDER_LOGO),
        protocol(3, "Beefy", "Yield Farming", "15.2%", "$950.0K", "LSK", "bLSK", RiskTier::Medium, "-0.8%", CHAIN_PLACEHOLDER_LOGO),
    ]
}

/// Served by the top-N mode when the feed has nothing usable.
#[rustfmt::skip]
pub fn top_fallback() -> Vec<DisplayProtocol> {
    vec![
        protocol(1, "Velodrome", "DEX", "12.5%", "$1.2B", "ETH", "VELO", RiskTier::Medium, "+2.3%", TOP_PLACEHOLDER_LOGO),
        protocol(2, "Beefy Finance", "Vault", "8.7%", "$800M", "USDC", "BIFI", RiskTier::Low, "+1.8%", TOP_PLACEHOLDER_LOGO),
        protocol(3, "Gearbox Protocol", "Lending", "15.2%", "$450M", "WETH", "GEAR", RiskTier::High, "+4.1%", TOP_PLACEHOLDER_LOGO),
    ]
}
