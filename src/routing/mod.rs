pub mod candidates;
pub mod parse;
pub mod prompt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::instrument;

use std::sync::Arc;

use crate::constant::ROUTING_AMOUNT_DECIMALS;
use crate::error::RouterError;
use crate::llm::LanguageModel;
use crate::token::amount::{to_base_units, to_display_exact};

use candidates::{find_by_name, highest_apy, CandidateProtocol, RiskLevel};
use parse::parse_verdict;
use prompt::build_prompt;

/// Confidence reported when the model answer could not be used.
pub const PARSE_FALLBACK_CONFIDENCE: u8 = 60;
/// Confidence reported when the model could not be reached.
pub const UNAVAILABLE_FALLBACK_CONFIDENCE: u8 = 50;

const PARSE_FALLBACK_REASONING: &str =
    "AI analysis failed, selected protocol with highest APY as fallback";
const UNAVAILABLE_FALLBACK_REASONING: &str =
    "AI service temporarily unavailable, providing safe default recommendation";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPreferences {
    pub risk_tolerance: Option<String>,
    pub investment_duration: Option<String>,
    pub preferred_protocols: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationRequest {
    /// Amount in wei, as a decimal string or a JSON number.
    pub amount: Option<Value>,
    pub user_preferences: Option<UserPreferences>,
}

impl RecommendationRequest {
    /// The requested amount in whole tokens, as a decimal string.
    ///
    /// `amount` counts wei and may carry a fraction (`"1.5"`, `2e19`); it is
    /// kept to 18 fractional digits and divided by `10^18`. Zero, negative,
    /// non-numeric and missing amounts are rejected.
    pub fn amount_tokens(&self) -> Result<String, RouterError> {
        let raw = match &self.amount {
            Some(Value::String(s)) => s.trim().to_string(),
            Some(Value::Number(n)) => match (n.as_u64(), n.as_f64()) {
                (Some(int), _) => int.to_string(),
                (None, Some(float)) => format!("{}", float),
                _ => return Err(RouterError::invalid_amount("Invalid amount provided")),
            },
            _ => return Err(RouterError::invalid_amount("Invalid amount provided")),
        };

        // wei scaled by 10^18, so fractional wei survive the division
        let scaled = to_base_units(&raw, ROUTING_AMOUNT_DECIMALS)?;
        if scaled.is_zero() {
            return Err(RouterError::invalid_amount("Invalid amount provided"));
        }
        to_display_exact(scaled, 2 * ROUTING_AMOUNT_DECIMALS)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub protocol_name: String,
    pub contract_address: String,
    pub expected_yield: f64,
    pub risk_level: RiskLevel,
    pub reasoning: String,
    pub confidence: u8,
    /// Set when this is a fallback rather than the model's own pick.
    pub degraded: bool,
}

impl Recommendation {
    fn fallback(candidate: &CandidateProtocol, reasoning: String, confidence: u8) -> Self {
        Recommendation {
            protocol_name: candidate.name.clone(),
            contract_address: candidate.contract_address.clone(),
            expected_yield: candidate.apy(),
            risk_level: candidate.risk_level(),
            reasoning,
            confidence,
            degraded: true,
        }
    }
}

/// Row of `GET /api/ai-routing`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateSummary {
    pub name: String,
    pub contract_address: String,
    pub apy: f64,
    pub tvl: f64,
    pub users: u64,
    pub is_active: bool,
    pub risk_level: RiskLevel,
}

impl From<&CandidateProtocol> for CandidateSummary {
    fn from(c: &CandidateProtocol) -> Self {
        CandidateSummary {
            name: c.name.clone(),
            contract_address: c.contract_address.clone(),
            apy: c.apy(),
            tvl: c.tvl(),
            users: c.user_count,
            is_active: c.is_active,
            risk_level: c.risk_level(),
        }
    }
}

pub struct RecommendationGateway {
    model: Arc<dyn LanguageModel>,
    candidates: Vec<CandidateProtocol>,
}

impl RecommendationGateway {
    pub fn new(model: Arc<dyn LanguageModel>, candidates: Vec<CandidateProtocol>) -> Self {
        Self { model, candidates }
    }

    pub fn candidates(&self) -> Vec<CandidateSummary> {
        self.candidates.iter().map(CandidateSummary::from).collect()
    }

    /// Ask the model for a protocol to route `request.amount` into.
    ///
    /// Only an invalid amount is an error. A model that cannot be reached
    /// yields the first candidate; an unusable answer yields the highest-APY
    /// candidate. Both are marked degraded.
    #[instrument(name = "Gateway::recommend", skip(self, request))]
    pub async fn recommend(
        &self,
        request: &RecommendationRequest,
    ) -> Result<Recommendation, RouterError> {
        let amount_tokens = request.amount_tokens()?;
        let preferences = request.user_preferences.clone().unwrap_or_default();

        let prompt = build_prompt(&amount_tokens, &preferences, &self.candidates);
        let response = match self.model.run_prompt(&prompt).await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!("AI routing error: {}", e);
                let first = self
                    .candidates
                    .first()
                    .ok_or_else(|| RouterError::ProtocolNotFound("no candidates".to_string()))?;
                return Ok(Recommendation::fallback(
                    first,
                    UNAVAILABLE_FALLBACK_REASONING.to_string(),
                    UNAVAILABLE_FALLBACK_CONFIDENCE,
                ));
            }
        };

        match self.accept(&response) {
            Ok(recommendation) => {
                tracing::info!(
                    "AI recommends {} with expected yield of {}%",
                    recommendation.protocol_name,
                    recommendation.expected_yield
                );
                Ok(recommendation)
            }
            Err(e) => {
                tracing::warn!("Failed to use AI response ({}): {}", e, response);
                let best = highest_apy(&self.candidates)
                    .ok_or_else(|| RouterError::ProtocolNotFound("no candidates".to_string()))?;
                let reasoning = match &e {
                    RouterError::ProtocolNotFound(name) => format!(
                        "AI recommended unknown protocol {}, selected protocol with highest APY as fallback",
                        name
                    ),
                    _ => PARSE_FALLBACK_REASONING.to_string(),
                };
                Ok(Recommendation::fallback(
                    best,
                    reasoning,
                    PARSE_FALLBACK_CONFIDENCE,
                ))
            }
        }
    }

    fn accept(&self, response: &str) -> Result<Recommendation, RouterError> {
        let verdict = parse_verdict(response)?;
        let candidate = find_by_name(&self.candidates, &verdict.protocol_name)
            .ok_or_else(|| RouterError::ProtocolNotFound(verdict.protocol_name.clone()))?;

        Ok(Recommendation {
            protocol_name: candidate.name.clone(),
            contract_address: candidate.contract_address.clone(),
            expected_yield: verdict.expected_yield,
            risk_level: candidate.risk_level(),
            reasoning: verdict.reasoning,
            confidence: verdict.confidence.clamp(0.0, 100.0).round() as u8,
            degraded: false,
        })
    }
}
