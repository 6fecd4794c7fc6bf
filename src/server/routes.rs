use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use serde_json::json;

use std::sync::Arc;

use crate::constant::LISK_SEPOLIA_CHAIN_ID;
use crate::error::RouterError;
use crate::protocols::{DisplayProtocol, NormalizerMode, ProtocolList};
use crate::routing::{CandidateSummary, Recommendation, RecommendationRequest};
use crate::token::{TokenRegistry, TokenSpec};

use super::state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new().nest("/api", api_routes()).with_state(state)
}

fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/protocols", get(get_chain_protocols))
        .route("/protocols/top", get(get_top_protocols))
        .route("/ai-routing", get(get_routing_candidates).post(post_ai_routing))
        .route("/tokens", get(get_tokens))
}

/// `RouterError` as an HTTP response with an `{ "error": ... }` body.
pub struct ApiError(RouterError);

impl From<RouterError> for ApiError {
    fn from(e: RouterError) -> Self {
        ApiError(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            RouterError::InvalidAmount(_) => StatusCode::BAD_REQUEST,
            RouterError::WalletNotConnected => StatusCode::UNAUTHORIZED,
            RouterError::ProtocolNotFound(_) => StatusCode::NOT_FOUND,
            RouterError::ContractCall { .. } => StatusCode::BAD_GATEWAY,
            RouterError::FetchFailed(_) | RouterError::ParseFailed(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}

#[derive(Debug, Serialize)]
struct ProtocolsResponse {
    success: bool,
    protocols: Vec<DisplayProtocol>,
    count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl From<ProtocolList> for ProtocolsResponse {
    fn from(list: ProtocolList) -> Self {
        ProtocolsResponse {
            success: !list.degraded,
            count: list.protocols.len(),
            protocols: list.protocols,
            error: list.error,
        }
    }
}

async fn list_protocols(state: &AppState, mode: &NormalizerMode) -> Json<ProtocolsResponse> {
    Json(state.normalizer.list(mode).await.into())
}

async fn get_chain_protocols(State(state): State<Arc<AppState>>) -> Json<ProtocolsResponse> {
    list_protocols(&state, &state.chain_mode).await
}

async fn get_top_protocols(State(state): State<Arc<AppState>>) -> Json<ProtocolsResponse> {
    list_protocols(&state, &state.top_mode).await
}

#[derive(Debug, Serialize)]
struct CandidatesResponse {
    protocols: Vec<CandidateSummary>,
}

async fn get_routing_candidates(State(state): State<Arc<AppState>>) -> Json<CandidatesResponse> {
    Json(CandidatesResponse {
        protocols: state.gateway.candidates(),
    })
}

async fn post_ai_routing(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<RecommendationRequest>, JsonRejection>,
) -> Result<Json<Recommendation>, ApiError> {
    // A body that cannot be read carries no usable amount
    let Json(request) = payload.map_err(|e| {
        tracing::warn!("Rejected AI routing request: {}", e.body_text());
        RouterError::invalid_amount("Invalid amount provided")
    })?;

    Ok(Json(state.gateway.recommend(&request).await?))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TokensResponse {
    chain_id: u64,
    vault_contract_address: String,
    thirdweb_client_id: String,
    tokens: Vec<TokenSpec>,
}

async fn get_tokens(State(state): State<Arc<AppState>>) -> Json<TokensResponse> {
    Json(TokensResponse {
        chain_id: LISK_SEPOLIA_CHAIN_ID,
        vault_contract_address: state.config.vault_contract_address.clone(),
        thirdweb_client_id: state.config.thirdweb_client_id.clone(),
        tokens: TokenRegistry::get().tokens().to_vec(),
    })
}
