use anyhow::Result;

use onionfi::config::Config;
use onionfi::server::{self, AppState};
use onionfi::setup_env_and_tracing;

#[tokio::main]
async fn main() -> Result<()> {
    setup_env_and_tracing();

    let config = Config::get();
    tracing::info!(
        "Starting OnionFi router (chain: {}, feed: {})",
        config.target_chain,
        config.protocols_api_url
    );
    if !config.has_llm() {
        tracing::warn!("Azure OpenAI is not configured, AI routing will serve fallback recommendations");
    }

    let state = AppState::from_config(config)?;
    server::serve(state, config.bind_addr()?).await?;

    Ok(())
}
