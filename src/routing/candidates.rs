use alloy_primitives::U256;
use serde::{Deserialize, Serialize};

use crate::token::amount::{pow10, to_display_exact};

/// Decimals of `CandidateProtocol::total_deposited`.
const DEPOSIT_DECIMALS: u8 = 18;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        };
        write!(f, "{}", s)
    }
}

/// A protocol the vault contract can route funds into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateProtocol {
    pub name: String,
    pub contract_address: String,
    pub total_deposited: U256, // base units, 18 decimals
    pub user_count: u64,
    pub apy_bps: u64, // 580 = 5.80%
    pub is_active: bool,
}

impl CandidateProtocol {
    fn new(name: &str, contract_address: &str, deposited_tokens: u64, user_count: u64, apy_bps: u64) -> Self {
        let unit = pow10(DEPOSIT_DECIMALS).unwrap_or(U256::ZERO);
        Self {
            name: name.to_string(),
            contract_address: contract_address.to_string(),
            total_deposited: U256::from(deposited_tokens) * unit,
            user_count,
            apy_bps,
            is_active: true,
        }
    }

    /// APY in percent.
    pub fn apy(&self) -> f64 {
        self.apy_bps as f64 / 100.0
    }

    /// Total deposited, in whole tokens.
    pub fn tvl(&self) -> f64 {
        to_display_exact(self.total_deposited, DEPOSIT_DECIMALS)
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(0.0)
    }

    pub fn risk_level(&self) -> RiskLevel {
        determine_risk_level(self.apy(), self.tvl(), self.user_count)
    }
}

/// Protocols registered with the vault contract.
pub fn default_candidates() -> Vec<CandidateProtocol> {
    vec![
        CandidateProtocol::new("Aave", "0x7Fc66500c84A76Ad7e9c93437bFc5Ac33E2DDaE9", 1000, 150, 580),
        CandidateProtocol::new("Compound", "0xc00e94Cb662C3520282E6f5717214004A7f26888", 800, 120, 420),
        CandidateProtocol::new("Yearn Finance", "0x0bc529c00C6401aEF6D220BE8C6Ea1667F6Ad93e", 600, 80, 750),
        CandidateProtocol::new("Curve Finance", "0xD533a949740bb3306d119CC777fa900bA034cd52", 1200, 200, 650),
    ]
}

/// Scores APY (higher is riskier), TVL and user count (higher is safer) from
/// 1 to 3 each and buckets their mean.
pub fn determine_risk_level(apy: f64, tvl: f64, users: u64) -> RiskLevel {
    let apy_score = if apy > 8.0 {
        3
    } else if apy > 5.0 {
        2
    } else {
        1
    };
    let tvl_score = if tvl > 1000.0 {
        1
    } else if tvl > 500.0 {
        2
    } else {
        3
    };
    let user_score = if users > 150 {
        1
    } else if users > 100 {
        2
    } else {
        3
    };

    let total_risk = (apy_score + tvl_score + user_score) as f64 / 3.0;
    if total_risk <= 1.5 {
        RiskLevel::Low
    } else if total_risk <= 2.5 {
        RiskLevel::Medium
    } else {
        RiskLevel::High
    }
}

/// Highest APY candidate; the first one wins a tie.
pub fn highest_apy(candidates: &[CandidateProtocol]) -> Option<&CandidateProtocol> {
    candidates.iter().fold(None, |best, current| match best {
        Some(best) if best.apy_bps >= current.apy_bps => Some(best),
        _ => Some(current),
    })
}

pub fn find_by_name<'a>(candidates: &'a [CandidateProtocol], name: &str) -> Option<&'a CandidateProtocol> {
    let name = name.trim();
    candidates.iter().find(|c| c.name.eq_ignore_ascii_case(name))
}
