pub mod llama;
pub mod structs;

use async_trait::async_trait;

use crate::error::RouterError;

pub use llama::LlamaFeed;
pub use structs::{ChainTvl, RawProtocolRecord};

/// Source of raw protocol records.
///
/// Network errors, timeouts, non-success statuses and unreadable bodies all
/// surface as `FetchFailed` or `ParseFailed`; callers fall back on either.
#[async_trait]
pub trait ProtocolFeed: Send + Sync {
    async fn fetch(&self) -> Result<Vec<RawProtocolRecord>, RouterError>;
}
