//! Work-history extraction from the profile cards payload.
//!
//! The walker finds experience entities, the entity parser turns each into a
//! record, the merger expands grouped positions, and the deduplicator cleans
//! the final list.

mod dedup;
mod entity;
mod logos;
mod merge;
mod walker;

use serde_json::Value;
use vitae_core::ExperienceRecord;

pub use dedup::dedup_experiences;
pub use logos::CompanyLogoIndex;

/// Extracts the deduplicated experience list.
///
/// `cards` is the parsed cards payload; `cards_text` is its raw text, which
/// is scanned for company logo URLs.
#[must_use]
pub fn extract_experiences(cards: &Value, cards_text: &str) -> Vec<ExperienceRecord> {
    let logos = CompanyLogoIndex::from_payload_text(cards_text);
    let records = walker::experience_entities(cards)
        .into_iter()
        .flat_map(|entity| merge::merge_positions(entity, &logos))
        .collect();
    dedup_experiences(records)
}
