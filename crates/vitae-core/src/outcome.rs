//! Per-target output record written by the batch runner.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::profile::ProfileRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrapeStatus {
    Success,
    Failed,
}

/// Separates "the site changed its markup" from "network or auth problem".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailureKind {
    Transport,
    Extraction,
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FailureKind::Transport => write!(f, "transport"),
            FailureKind::Extraction => write!(f, "extraction"),
        }
    }
}

/// Exactly one of these is emitted per input target.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeOutcome {
    pub username: String,
    #[serde(flatten)]
    pub profile: Option<ProfileRecord>,
    pub scrape_status: ScrapeStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<FailureKind>,
    pub scraped_at: DateTime<Utc>,
}

impl ScrapeOutcome {
    #[must_use]
    pub fn success(username: &str, profile: ProfileRecord, scraped_at: DateTime<Utc>) -> Self {
        Self {
            username: username.to_string(),
            profile: Some(profile),
            scrape_status: ScrapeStatus::Success,
            error: None,
            error_kind: None,
            scraped_at,
        }
    }

    #[must_use]
    pub fn failure(
        username: &str,
        kind: FailureKind,
        error: String,
        scraped_at: DateTime<Utc>,
    ) -> Self {
        Self {
            username: username.to_string(),
            profile: None,
            scrape_status: ScrapeStatus::Failed,
            error: Some(error),
            error_kind: Some(kind),
            scraped_at,
        }
    }
}
