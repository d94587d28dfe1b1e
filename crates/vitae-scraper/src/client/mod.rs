//! Authenticated HTTP client for the contact page and the two GraphQL
//! profile endpoints.

mod session;

use std::time::Duration;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, COOKIE, REFERER, RETRY_AFTER};
use reqwest::{Client, StatusCode};
use vitae_core::ProfileRecord;

use crate::assemble::{parse_cards_payload, ProfileContext};
use crate::error::ScraperError;
use crate::retry::retry_with_backoff;

pub use session::SessionCookies;

const PROFILES_QUERY_ID: &str = "voyagerIdentityDashProfiles.a1a483e719b20537a256b6853cdca711";
const CARDS_QUERY_ID: &str = "voyagerIdentityDashProfileCards.55af784c21dc8640b500ab5b45937064";
const PROFILE_URN_PREFIX: &str = "urn:li:fsd_profile:";

const PAGE_ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";
const API_ACCEPT: &str = "application/vnd.linkedin.normalized+json+2.1";
const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

/// Unreserved characters survive; everything else in a path segment or
/// GraphQL variable is escaped.
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RequestKind {
    Page,
    Api,
}

/// Fetches the three raw payloads a profile is extracted from.
///
/// 429 responses map to [`ScraperError::RateLimited`], 401/403 to
/// [`ScraperError::Unauthorized`], and any other non-2xx status to
/// [`ScraperError::UnexpectedStatus`]. Rate limits, network failures and
/// 5xx statuses are retried with exponential backoff up to `max_retries`
/// extra attempts.
pub struct ProfileClient {
    client: Client,
    base_url: String,
    cookies: SessionCookies,
    max_retries: u32,
    backoff_base_secs: u64,
}

impl ProfileClient {
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        base_url: &str,
        cookies: SessionCookies,
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        backoff_base_secs: u64,
    ) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            cookies,
            max_retries,
            backoff_base_secs,
        })
    }

    /// Raw HTML of the member's contact-info overlay.
    ///
    /// # Errors
    ///
    /// Returns a transport [`ScraperError`] when the request fails after
    /// retries.
    pub async fn fetch_contact_info(&self, username: &str) -> Result<String, ScraperError> {
        self.get_text(self.contact_info_url(username), RequestKind::Page)
            .await
    }

    /// Raw text of the profile GraphQL response.
    ///
    /// # Errors
    ///
    /// Returns a transport [`ScraperError`] when the request fails after
    /// retries.
    pub async fn fetch_profile_api(&self, username: &str) -> Result<String, ScraperError> {
        self.get_text(self.profile_api_url(username), RequestKind::Api)
            .await
    }

    /// Raw text of the profile cards GraphQL response for an internal id.
    ///
    /// # Errors
    ///
    /// Returns a transport [`ScraperError`] when the request fails after
    /// retries.
    pub async fn fetch_profile_cards(&self, profile_urn: &str) -> Result<String, ScraperError> {
        self.get_text(self.cards_api_url(profile_urn), RequestKind::Api)
            .await
    }

    /// Fetches every payload for `username` and assembles the record.
    ///
    /// The internal id is taken from the contact page when present there,
    /// otherwise from the profile API response.
    ///
    /// # Errors
    ///
    /// - Transport errors from any of the three requests.
    /// - [`ScraperError::MissingProfileUrn`] when neither payload carries
    ///   the internal id; the cards endpoint is never called in that case.
    /// - [`ScraperError::Deserialize`] when the cards payload is not JSON.
    pub async fn scrape_profile(&self, username: &str) -> Result<ProfileRecord, ScraperError> {
        let contact_html = self.fetch_contact_info(username).await?;
        let mut context = ProfileContext::new(username, &contact_html);
        let from_contact = context.resolve_urn(None).is_some();

        let profile_text = self.fetch_profile_api(username).await?;
        let urn = context.require_urn(&profile_text)?;
        tracing::debug!(
            username,
            urn = %urn,
            source = if from_contact { "contact page" } else { "profile api" },
            "resolved internal profile id"
        );

        let cards_text = self.fetch_profile_cards(&urn).await?;
        let cards = parse_cards_payload(&cards_text)?;
        context.assemble(&profile_text, &cards_text, &cards)
    }

    async fn get_text(&self, url: String, kind: RequestKind) -> Result<String, ScraperError> {
        retry_with_backoff(self.max_retries, self.backoff_base_secs, || {
            let url = url.clone();
            async move {
                let response = self.request(&url, kind).send().await?;
                let status = response.status();

                if status == StatusCode::TOO_MANY_REQUESTS {
                    let retry_after_secs = response
                        .headers()
                        .get(RETRY_AFTER)
                        .and_then(|v| v.to_str().ok())
                        .and_then(|s| s.trim().parse::<u64>().ok())
                        .unwrap_or(DEFAULT_RETRY_AFTER_SECS);
                    return Err(ScraperError::RateLimited {
                        url,
                        retry_after_secs,
                    });
                }

                if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
                    return Err(ScraperError::Unauthorized {
                        status: status.as_u16(),
                        url,
                    });
                }

                if !status.is_success() {
                    return Err(ScraperError::UnexpectedStatus {
                        status: status.as_u16(),
                        url,
                    });
                }

                Ok(response.text().await?)
            }
        })
        .await
    }

    fn request(&self, url: &str, kind: RequestKind) -> reqwest::RequestBuilder {
        let mut request = self.client.get(url);
        if !self.cookies.is_empty() {
            request = request.header(COOKIE, self.cookies.header_value());
        }

        match kind {
            RequestKind::Page => request
                .header(ACCEPT, PAGE_ACCEPT)
                .header(ACCEPT_LANGUAGE, "en-US,en;q=0.9")
                .header(REFERER, format!("{}/", self.base_url)),
            RequestKind::Api => request
                .header(ACCEPT, API_ACCEPT)
                .header("csrf-token", self.cookies.csrf_token())
                .header("x-li-lang", "en_US")
                .header("x-restli-protocol-version", "2.0.0"),
        }
    }

    fn contact_info_url(&self, username: &str) -> String {
        format!(
            "{}/in/{}/overlay/contact-info/",
            self.base_url,
            encode(username)
        )
    }

    fn profile_api_url(&self, username: &str) -> String {
        format!(
            "{}/voyager/api/graphql?includeWebMetadata=true&variables=(vanityName:{})&queryId={PROFILES_QUERY_ID}",
            self.base_url,
            encode(username)
        )
    }

    fn cards_api_url(&self, profile_urn: &str) -> String {
        format!(
            "{}/voyager/api/graphql?variables=(profileUrn:{})&queryId={CARDS_QUERY_ID}",
            self.base_url,
            encode(&format!("{PROFILE_URN_PREFIX}{profile_urn}"))
        )
    }
}

fn encode(value: &str) -> String {
    utf8_percent_encode(value, SEGMENT).to_string()
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
