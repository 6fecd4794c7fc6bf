use anyhow::Result;
use async_openai::{
    config::AzureConfig,
    types::{ChatCompletionRequestMessageArgs, CreateChatCompletionRequestArgs},
    Client,
};
use async_trait::async_trait;

use crate::config::Config;

use super::LanguageModel;

/// Azure OpenAI chat completion model.
pub struct AzureModel {
    client: Client<AzureConfig>,
    model: String,
}

impl AzureModel {
    /// `None` unless every Azure OpenAI setting is present.
    pub fn from_config(config: &Config) -> Option<Self> {
        let azure = AzureConfig::new()
            .with_api_base(config.azure_openai_endpoint.clone()?)
            .with_api_key(config.azure_openai_api_key.clone()?)
            .with_api_version(config.azure_openai_api_version.clone()?)
            .with_deployment_id(config.azure_openai_chat_model.clone()?);

        Some(AzureModel {
            client: Client::with_config(azure),
            model: config.azure_openai_chat_model.clone()?,
        })
    }
}

#[async_trait]
impl LanguageModel for AzureModel {
    async fn run_prompt(&self, prompt: &str) -> Result<String> {
        let req = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages([ChatCompletionRequestMessageArgs::default()
                .content(prompt)
                .build()?
                .into()])
            .build()?;

        let resp = self.client.chat().create(req).await?;

        Ok(resp
            .choices
            .first()
            .ok_or(anyhow::anyhow!("No response from LLM"))?
            .message
            .content
            .clone()
            .ok_or(anyhow::anyhow!("No content in response from LLM"))?)
    }
}
