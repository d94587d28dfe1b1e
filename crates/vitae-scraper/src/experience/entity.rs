//! Mapping one position entity to an [`ExperienceRecord`].
//!
//! [`ExperienceRecord`]: vitae_core::ExperienceRecord

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use vitae_core::ExperienceRecord;

use super::logos::CompanyLogoIndex;
use crate::dates::parse_date_range;
use crate::json_nav::{object_at, text_at};

const COMPANY_PATH_MARKER: &str = "/company/";

static EMPLOYMENT_TYPE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)·\s*(Full-time|Part-time|Contract|Internship|Freelance|Self-employed)")
        .expect("valid employment type regex")
});
static EMPLOYMENT_SUFFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\s*·\s*(?:Full-time|Part-time|Contract|Internship|Freelance|Self-employed).*")
        .expect("valid employment suffix regex")
});
static WORK_TYPE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(Remote|On-site|Onsite|Hybrid)\b").expect("valid work type regex")
});
static WORK_TYPE_STRIP_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\s*\(?(?:Remote|On-site|Onsite|Hybrid)\)?\s*")
        .expect("valid work type strip regex")
});
static COMPANY_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/company/([0-9]+)").expect("valid company id regex"));

/// Builds one record from an entity subtree.
///
/// Returns `None` only when `entity` is not a non-empty object; an entity
/// with no title still yields a record so nested positions can inherit its
/// company link.
pub(crate) fn parse_entity(entity: &Value, logos: &CompanyLogoIndex) -> Option<ExperienceRecord> {
    let entity = object_at(entity, &[])?;
    let mut record = ExperienceRecord {
        title: text_at(entity, &["titleV2", "text", "text"]).map(str::to_string),
        ..ExperienceRecord::default()
    };

    if let Some(subtitle) = text_at(entity, &["subtitle", "text"]).filter(|s| !s.is_empty()) {
        apply_subtitle(&mut record, subtitle);
    }

    let caption = text_at(entity, &["caption", "text"]).unwrap_or_default();
    record.apply_date_range(parse_date_range(caption));

    if let Some(metadata) = text_at(entity, &["metadata", "text"]).filter(|s| !s.is_empty()) {
        apply_metadata(&mut record, metadata);
    }

    if let Some(target) = action_target(entity).filter(|t| t.contains(COMPANY_PATH_MARKER)) {
        record.company_url = Some(target.to_string());
        if let Some(id) = COMPANY_ID_RE.captures(target).and_then(|caps| caps.get(1)) {
            let id = id.as_str();
            record.company_logo_url = logos.get(id).map(str::to_string);
            record.company_id = Some(id.to_string());
        }
    }

    Some(record)
}

/// `"Acme · Full-time"` splits into company and employment type.
fn apply_subtitle(record: &mut ExperienceRecord, subtitle: &str) {
    record.employment_type = EMPLOYMENT_TYPE_RE
        .captures(subtitle)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string());
    record.company = non_empty(EMPLOYMENT_SUFFIX_RE.replace(subtitle, "").trim());
}

/// `"Berlin, Germany (Hybrid)"` splits into location and work type.
fn apply_metadata(record: &mut ExperienceRecord, metadata: &str) {
    let Some(marker) = WORK_TYPE_RE.captures(metadata).and_then(|caps| caps.get(1)) else {
        record.location = Some(metadata.to_string());
        return;
    };

    let marker = marker.as_str();
    record.work_type = Some(if marker.eq_ignore_ascii_case("onsite") {
        "On-site".to_string()
    } else {
        marker.to_string()
    });
    record.location = non_empty(WORK_TYPE_STRIP_RE.replace_all(metadata, "").trim());
}

/// Image link when present, else the text link.
fn action_target(entity: &Value) -> Option<&str> {
    text_at(entity, &["image", "actionTarget"])
        .filter(|t| !t.is_empty())
        .or_else(|| text_at(entity, &["textActionTarget"]))
}

fn non_empty(text: &str) -> Option<String> {
    (!text.is_empty()).then(|| text.to_string())
}
