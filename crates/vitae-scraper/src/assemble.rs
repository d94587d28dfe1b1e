//! Combines field extraction, location resolution and experience extraction
//! into one [`ProfileRecord`].

use serde_json::Value;
use vitae_core::{BasicInfo, ProfileRecord};

use crate::decode::decode_payload;
use crate::error::ScraperError;
use crate::experience::extract_experiences;
use crate::fields::{extract_about, extract_api_fields, extract_contact_fields, extract_profile_urn};
use crate::location::resolve_location;

const PROFILE_URL_PREFIX: &str = "https://linkedin.com/in/";

/// The three raw responses one profile is extracted from.
#[derive(Debug, Clone, PartialEq)]
pub struct RawPayloads {
    pub contact_html: String,
    pub profile_api_text: String,
    pub cards_api_text: String,
    pub cards_api_json: Value,
}

impl RawPayloads {
    /// Bundles the raw texts and parses the cards payload.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Deserialize`] if the cards text is non-empty
    /// and not valid JSON.
    pub fn new(
        contact_html: impl Into<String>,
        profile_api_text: impl Into<String>,
        cards_api_text: impl Into<String>,
    ) -> Result<Self, ScraperError> {
        let cards_api_text = cards_api_text.into();
        let cards_api_json = parse_cards_payload(&cards_api_text)?;
        Ok(Self {
            contact_html: contact_html.into(),
            profile_api_text: profile_api_text.into(),
            cards_api_text,
            cards_api_json,
        })
    }
}

/// Parses the cards response; an empty body is an empty object.
///
/// # Errors
///
/// Returns [`ScraperError::Deserialize`] for malformed JSON.
pub fn parse_cards_payload(text: &str) -> Result<Value, ScraperError> {
    if text.trim().is_empty() {
        return Ok(Value::Object(serde_json::Map::new()));
    }
    serde_json::from_str(text).map_err(|source| ScraperError::Deserialize {
        context: "profile cards payload".to_string(),
        source,
    })
}

/// Per-profile extraction state.
///
/// Holds the decoded contact page and memoizes the internal profile id the
/// first time it is found, so the transport layer and the assembler agree
/// on one value.
#[derive(Debug, Clone)]
pub struct ProfileContext {
    username: String,
    decoded_contact: String,
    urn: Option<String>,
}

impl ProfileContext {
    #[must_use]
    pub fn new(username: impl Into<String>, contact_html: &str) -> Self {
        Self {
            username: username.into(),
            decoded_contact: decode_payload(contact_html),
            urn: None,
        }
    }

    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Looks for the internal id on the contact page, then in
    /// `profile_api_text`. The first hit is cached and returned on every
    /// later call.
    pub fn resolve_urn(&mut self, profile_api_text: Option<&str>) -> Option<&str> {
        if self.urn.is_none() {
            self.urn = extract_profile_urn(&self.decoded_contact)
                .or_else(|| profile_api_text.and_then(extract_profile_urn))
                .map(str::to_string);
        }
        self.urn.as_deref()
    }

    /// Like [`Self::resolve_urn`], but a miss is a hard failure.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::MissingProfileUrn`] when neither payload
    /// carries the id.
    pub fn require_urn(&mut self, profile_api_text: &str) -> Result<String, ScraperError> {
        match self.resolve_urn(Some(profile_api_text)) {
            Some(urn) => Ok(urn.to_string()),
            None => Err(ScraperError::MissingProfileUrn {
                username: self.username.clone(),
            }),
        }
    }

    /// Builds the full record from the remaining payloads.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::MissingProfileUrn`] when the internal id
    /// cannot be resolved from either the contact page or the profile text.
    pub fn assemble(
        &mut self,
        profile_api_text: &str,
        cards_api_text: &str,
        cards: &Value,
    ) -> Result<ProfileRecord, ScraperError> {
        let urn = self.require_urn(profile_api_text)?;
        let contact = extract_contact_fields(&self.decoded_contact);
        let api = extract_api_fields(profile_api_text);

        let fullname = match (&api.first_name, &api.last_name) {
            (Some(first), Some(last)) => Some(format!("{first} {last}")),
            _ => contact.page_title.clone().or_else(|| contact.name.clone()),
        };

        let basic_info = BasicInfo {
            fullname,
            first_name: api.first_name,
            last_name: api.last_name,
            headline: api.headline,
            public_identifier: self.username.clone(),
            profile_url: format!("{PROFILE_URL_PREFIX}{}", self.username),
            about: extract_about(cards_api_text),
            location: resolve_location(contact.location.as_deref()),
            is_creator: api.is_creator,
            is_premium: contact.is_premium,
            open_to_work: contact.open_to_work,
            is_remembrance: api.memorialized || contact.in_remembrance,
            urn,
            follower_count: api.follower_count,
            connection_count: api.connection_count,
            email: contact.email,
            websites: contact.websites,
        };

        let experience = extract_experiences(cards, cards_api_text);
        tracing::debug!(
            username = %self.username,
            urn = %basic_info.urn,
            positions = experience.len(),
            "assembled profile record"
        );

        Ok(ProfileRecord {
            basic_info,
            experience,
        })
    }
}

/// Extracts a profile from already fetched payloads.
///
/// # Errors
///
/// Returns [`ScraperError::MissingProfileUrn`] when the internal id cannot
/// be resolved.
pub fn extract_profile(username: &str, payloads: &RawPayloads) -> Result<ProfileRecord, ScraperError> {
    ProfileContext::new(username, &payloads.contact_html).assemble(
        &payloads.profile_api_text,
        &payloads.cards_api_text,
        &payloads.cards_api_json,
    )
}
