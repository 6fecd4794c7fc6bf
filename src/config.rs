use anyhow::Result;
use serde::{Deserialize, Serialize};

use std::net::SocketAddr;
use std::sync::OnceLock;
use std::time::Duration;

use crate::constant::*;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    // Server configuration
    pub server_host: String,
    pub server_port: u16,

    // Protocol feed configuration
    pub protocols_api_url: String,
    pub feed_timeout_secs: u64,
    pub feed_cache_secs: u64,

    // Normalizer configuration
    pub target_chain: String,
    pub chain_asset: String,
    pub top_min_tvl: f64, // in USD
    pub top_limit: usize,

    // Azure OpenAI configuration
    pub azure_openai_api_key: Option<String>,
    pub azure_openai_endpoint: Option<String>,
    pub azure_openai_api_version: Option<String>,
    pub azure_openai_chat_model: Option<String>,

    // Wallet configuration, handed to clients as-is
    pub vault_contract_address: String,
    pub thirdweb_client_id: String,
}

impl Config {
    pub fn get() -> &'static Config {
        static INSTANCE: OnceLock<Config> = OnceLock::new();
        INSTANCE.get_or_init(Self::from_env)
    }

    pub fn from_env() -> Self {
        let server_host = std::env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".into());
        let server_port = std::env::var("SERVER_PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("SERVER_PORT must be a valid u16");

        let protocols_api_url = std::env::var("PROTOCOLS_API_URL")
            .unwrap_or_else(|_| DEFAULT_PROTOCOLS_API_URL.into());
        let feed_timeout_secs = std::env::var("FEED_TIMEOUT_SECS")
            .map(|v| v.parse().expect("FEED_TIMEOUT_SECS must be a valid u64"))
            .unwrap_or(DEFAULT_FEED_TIMEOUT_SECS);
        let feed_cache_secs = std::env::var("FEED_CACHE_SECS")
            .map(|v| v.parse().expect("FEED_CACHE_SECS must be a valid u64"))
            .unwrap_or(DEFAULT_FEED_CACHE_SECS);

        let target_chain =
            std::env::var("TARGET_CHAIN").unwrap_or_else(|_| DEFAULT_TARGET_CHAIN.into());
        let chain_asset =
            std::env::var("CHAIN_ASSET").unwrap_or_else(|_| DEFAULT_CHAIN_ASSET.into());
        let top_min_tvl = std::env::var("TOP_MIN_TVL")
            .map(|v| v.parse().expect("TOP_MIN_TVL must be a valid f64"))
            .unwrap_or(DEFAULT_TOP_MIN_TVL);
        let top_limit = std::env::var("TOP_LIMIT")
            .map(|v| v.parse().expect("TOP_LIMIT must be a valid usize"))
            .unwrap_or(DEFAULT_TOP_LIMIT);

        let azure_openai_api_key = non_empty_var("AZURE_OPENAI_API_KEY");
        let azure_openai_endpoint = non_empty_var("AZURE_OPENAI_ENDPOINT");
        let azure_openai_api_version = non_empty_var("AZURE_OPENAI_API_VERSION");
        let azure_openai_chat_model = non_empty_var("AZURE_OPENAI_CHAT_MODEL");

        let vault_contract_address = std::env::var("VAULT_CONTRACT_ADDRESS").unwrap_or_default();
        let thirdweb_client_id = std::env::var("THIRDWEB_CLIENT_ID").unwrap_or_default();

        Config {
            server_host,
            server_port,
            protocols_api_url,
            feed_timeout_secs,
            feed_cache_secs,
            target_chain,
            chain_asset,
            top_min_tvl,
            top_limit,
            azure_openai_api_key,
            azure_openai_endpoint,
            azure_openai_api_version,
            azure_openai_chat_model,
            vault_contract_address,
            thirdweb_client_id,
        }
    }

    pub fn bind_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.server_host, self.server_port)
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid bind address: {}", e))
    }

    pub fn feed_timeout(&self) -> Duration {
        Duration::from_secs(self.feed_timeout_secs)
    }

    /// `None` when caching is disabled.
    pub fn feed_cache_ttl(&self) -> Option<Duration> {
        (self.feed_cache_secs > 0).then(|| Duration::from_secs(self.feed_cache_secs))
    }

    pub fn has_llm(&self) -> bool {
        self.azure_openai_api_key.is_some()
            && self.azure_openai_endpoint.is_some()
            && self.azure_openai_api_version.is_some()
            && self.azure_openai_chat_model.is_some()
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
impl Default for Config {
    fn default() -> Self {
        Config {
            server_host: "127.0.0.1".into(),
            server_port: 0,
            protocols_api_url: DEFAULT_PROTOCOLS_API_URL.into(),
            feed_timeout_secs: DEFAULT_FEED_TIMEOUT_SECS,
            feed_cache_secs: 0,
            target_chain: DEFAULT_TARGET_CHAIN.into(),
            chain_asset: DEFAULT_CHAIN_ASSET.into(),
            top_min_tvl: DEFAULT_TOP_MIN_TVL,
            top_limit: DEFAULT_TOP_LIMIT,
            azure_openai_api_key: None,
            azure_openai_endpoint: None,
            azure_openai_api_version: None,
            azure_openai_chat_model: None,
            vault_contract_address: String::new(),
            thirdweb_client_id: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feed_cache_ttl() {
        let mut config = Config::default();
        assert_eq!(config.feed_cache_ttl(), None);

        config.feed_cache_secs = 300;
        assert_eq!(config.feed_cache_ttl(), Some(Duration::from_secs(300)));
    }

    #[test]
    fn test_bind_addr() {
        let mut config = Config::default();
        config.server_port = 3000;
        assert_eq!(config.bind_addr().unwrap().port(), 3000);

        config.server_host = "not a host".into();
        assert!(config.bind_addr().is_err());
    }

    #[test]
    fn test_has_llm_requires_every_field() {
        let mut config = Config::default();
        assert!(!config.has_llm());

        config.azure_openai_api_key = Some("key".into());
        config.azure_openai_endpoint = Some("https://example.openai.azure.com".into());
        config.azure_openai_api_version = Some("2024-02-01".into());
        assert!(!config.has_llm());

        config.azure_openai_chat_model = Some("gpt-4o".into());
        assert!(config.has_llm());
    }
}
