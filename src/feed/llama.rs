use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use tokio::sync::RwLock;
use tracing::instrument;

use std::time::{Duration, Instant};

use crate::client::build_http_client;
use crate::config::Config;
use crate::error::RouterError;

use super::structs::{parse_feed, RawProtocolRecord};
use super::ProtocolFeed;

/// DeFi Llama protocol feed. Successful responses are cached for `cache_ttl`.
pub struct LlamaFeed {
    client: Client,
    url: String,
    cache_ttl: Option<Duration>,
    cache: RwLock<Option<(Instant, Vec<RawProtocolRecord>)>>,
}

impl LlamaFeed {
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            config.protocols_api_url.clone(),
            config.feed_timeout(),
            config.feed_cache_ttl(),
        )
    }

    pub fn new(url: String, timeout: Duration, cache_ttl: Option<Duration>) -> Result<Self> {
        Ok(LlamaFeed {
            client: build_http_client(timeout)?,
            url,
            cache_ttl,
            cache: RwLock::new(None),
        })
    }

    async fn cached(&self) -> Option<Vec<RawProtocolRecord>> {
        let ttl = self.cache_ttl?;
        let cache = self.cache.read().await;
        match cache.as_ref() {
            Some((fetched_at, records)) if fetched_at.elapsed() < ttl => Some(records.clone()),
            _ => None,
        }
    }

    async fn fetch_remote(&self) -> Result<Vec<RawProtocolRecord>, RouterError> {
        tracing::debug!("Making fetch request to: {}", self.url);

        let response = self.client.get(&self.url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(RouterError::FetchFailed(format!(
                "HTTP error! status: {}",
                status
            )));
        }

        let body = response.bytes().await?;
        parse_feed(&body)
    }
}

#[async_trait]
impl ProtocolFeed for LlamaFeed {
    #[instrument(name = "LlamaFeed::fetch", skip(self))]
    async fn fetch(&self) -> Result<Vec<RawProtocolRecord>, RouterError> {
        if let Some(records) = self.cached().await {
            tracing::debug!("Serving {} protocols from cache", records.len());
            return Ok(records);
        }

        let records = self.fetch_remote().await?;
        if self.cache_ttl.is_some() {
            *self.cache.write().await = Some((Instant::now(), records.clone()));
        }

        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, routing::get, Json, Router};
    use serde_json::json;

    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    async fn spawn_upstream(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn sample_body() -> serde_json::Value {
        json!({
            "protocols": [
                { "name": "Aave V3", "category": "Lending", "tvl": 2.5e9, "chains": ["Ethereum"] },
                { "name": "Velodrome", "category": "DEX", "tvl": 9.5e5, "chains": ["Optimism", "Lisk"] }
            ]
        })
    }

    fn feed(url: String, timeout: Duration, cache_ttl: Option<Duration>) -> LlamaFeed {
        LlamaFeed::new(url, timeout, cache_ttl).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_ok() {
        crate::setup_env_and_tracing();

        let base = spawn_upstream(Router::new().route("/protocols", get(|| async { Json(sample_body()) }))).await;
        let records = feed(format!("{base}/protocols"), Duration::from_secs(5), None)
            .fetch()
            .await
            .unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name.as_deref(), Some("Aave V3"));
    }

    #[tokio::test]
    async fn test_fetch_server_error() {
        let base = spawn_upstream(
            Router::new().route("/protocols", get(|| async { StatusCode::INTERNAL_SERVER_ERROR })),
        )
        .await;

        let err = feed(format!("{base}/protocols"), Duration::from_secs(5), None)
            .fetch()
            .await
            .unwrap_err();
        assert!(matches!(err, RouterError::FetchFailed(_)), "{err:?}");
    }

    #[tokio::test]
    async fn test_fetch_timeout() {
        let base = spawn_upstream(Router::new().route(
            "/protocols",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Json(sample_body())
            }),
        ))
        .await;

        let started = Instant::now();
        let err = feed(format!("{base}/protocols"), Duration::from_millis(200), None)
            .fetch()
            .await
            .unwrap_err();
        assert!(matches!(err, RouterError::FetchFailed(_)), "{err:?}");
        assert!(started.elapsed() < Duration::from_secs(4));
    }

    #[tokio::test]
    async fn test_fetch_malformed_body() {
        let base =
            spawn_upstream(Router::new().route("/protocols", get(|| async { "not json" }))).await;

        let err = feed(format!("{base}/protocols"), Duration::from_secs(5), None)
            .fetch()
            .await
            .unwrap_err();
        assert!(err.is_recoverable(), "{err:?}");
    }

    #[tokio::test]
    async fn test_fetch_caches_successful_responses() {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();
        let base = spawn_upstream(Router::new().route(
            "/protocols",
            get(move || {
                let counter = counter.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Json(sample_body())
                }
            }),
        ))
        .await;

        let cached = feed(
            format!("{base}/protocols"),
            Duration::from_secs(5),
            Some(Duration::from_secs(300)),
        );
        cached.fetch().await.unwrap();
        cached.fetch().await.unwrap();
        assert_eq!(hits.load(Ordering::SeqCst), 1);

        let uncached = feed(format!("{base}/protocols"), Duration::from_secs(5), None);
        uncached.fetch().await.unwrap();
        uncached.fetch().await.unwrap();
        assert_eq!(hits.load(Ordering::SeqCst), 3);
    }
}
