use anyhow::Result;

use std::sync::Arc;

use crate::config::Config;
use crate::feed::{LlamaFeed, ProtocolFeed};
use crate::llm::{AzureModel, LanguageModel, UnconfiguredModel};
use crate::protocols::{NormalizerMode, ProtocolNormalizer};
use crate::routing::candidates::default_candidates;
use crate::routing::RecommendationGateway;

/// Shared state passed to every route handler.
pub struct AppState {
    pub config: Config,
    pub normalizer: ProtocolNormalizer,
    pub gateway: RecommendationGateway,
    pub chain_mode: NormalizerMode,
    pub top_mode: NormalizerMode,
}

impl AppState {
    pub fn new(
        config: Config,
        feed: Arc<dyn ProtocolFeed>,
        model: Arc<dyn LanguageModel>,
    ) -> Arc<Self> {
        Arc::new(AppState {
            chain_mode: NormalizerMode::chain_from_config(&config),
            top_mode: NormalizerMode::top_from_config(&config),
            normalizer: ProtocolNormalizer::new(feed),
            gateway: RecommendationGateway::new(model, default_candidates()),
            config,
        })
    }

    /// Wire the live feed and, when configured, the Azure model.
    pub fn from_config(config: &Config) -> Result<Arc<Self>> {
        let feed: Arc<dyn ProtocolFeed> = Arc::new(LlamaFeed::from_config(config)?);
        let model: Arc<dyn LanguageModel> = match AzureModel::from_config(config) {
            Some(model) => Arc::new(model),
            None => Arc::new(UnconfiguredModel),
        };

        Ok(Self::new(config.clone(), feed, model))
    }
}
