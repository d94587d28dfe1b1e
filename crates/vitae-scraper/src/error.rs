//! Errors raised while fetching or extracting a profile.

use thiserror::Error;
use vitae_core::FailureKind;

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("rate limited by {url} (retry after {retry_after_secs}s)")]
    RateLimited { url: String, retry_after_secs: u64 },

    #[error("session rejected with HTTP {status} from {url}; refresh the session cookies")]
    Unauthorized { status: u16, url: String },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("could not resolve the internal profile id for '{username}'")]
    MissingProfileUrn { username: String },
}

impl ScraperError {
    /// `true` for network, status, and session failures; `false` when the
    /// payloads arrived but could not be interpreted.
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            ScraperError::Http(_)
                | ScraperError::RateLimited { .. }
                | ScraperError::Unauthorized { .. }
                | ScraperError::UnexpectedStatus { .. }
        )
    }

    #[must_use]
    pub fn failure_kind(&self) -> FailureKind {
        if self.is_transport() {
            FailureKind::Transport
        } else {
            FailureKind::Extraction
        }
    }
}
