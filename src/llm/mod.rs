pub mod azure;

use anyhow::Result;
use async_trait::async_trait;

pub use azure::AzureModel;

/// A generative model that answers a single text prompt.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    async fn run_prompt(&self, prompt: &str) -> Result<String>;
}

/// Stands in when no model is configured; every call fails, so callers take
/// their "service unavailable" path.
pub struct UnconfiguredModel;

#[async_trait]
impl LanguageModel for UnconfiguredModel {
    async fn run_prompt(&self, _prompt: &str) -> Result<String> {
        Err(anyhow::anyhow!("No language model configured"))
    }
}
