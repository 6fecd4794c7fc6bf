use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RouterError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Fetch failed: {0}")]
    FetchFailed(String),

    #[error("Parse failed: {0}")]
    ParseFailed(String),

    #[error("Protocol not found: {0}")]
    ProtocolNotFound(String),

    #[error("Please connect your wallet first")]
    WalletNotConnected,

    #[error("Contract call {call} failed: {reason}")]
    ContractCall { call: &'static str, reason: String },
}

impl RouterError {
    pub fn invalid_amount(reason: impl Into<String>) -> Self {
        RouterError::InvalidAmount(reason.into())
    }

    /// Whether the error is recovered locally with fallback data instead of
    /// being surfaced to the user.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            RouterError::FetchFailed(_) | RouterError::ParseFailed(_)
        )
    }
}

impl From<reqwest::Error> for RouterError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            RouterError::ParseFailed(e.to_string())
        } else {
            RouterError::FetchFailed(e.to_string())
        }
    }
}

impl From<serde_json::Error> for RouterError {
    fn from(e: serde_json::Error) -> Self {
        RouterError::ParseFailed(e.to_string())
    }
}
