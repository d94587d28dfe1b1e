//! Expanding an employer entity into its nested positions.

use serde_json::Value;
use vitae_core::ExperienceRecord;

use super::entity::parse_entity;
use super::logos::CompanyLogoIndex;
use super::walker::nested_entities;

/// Company strings that are really a tenure caption ("2 yrs 3 mos").
const TENURE_MARKERS: [&str; 2] = ["mos", "yrs"];

/// Link details a parent entity hands down to its nested positions.
struct ParentLink<'a> {
    title: Option<&'a str>,
    company_url: Option<&'a str>,
    company_id: Option<&'a str>,
}

fn has_title(record: &ExperienceRecord) -> bool {
    record.title.as_deref().is_some_and(|t| !t.is_empty())
}

fn needs_parent_company(company: Option<&str>) -> bool {
    match company {
        None | Some("") => true,
        Some(company) => TENURE_MARKERS.iter().any(|marker| company.contains(marker)),
    }
}

/// Expands one top-level entity into the records it contributes.
///
/// Nested positions under a shared employer are emitted in place of the
/// parent. A nested record without a usable company takes the parent's title
/// as its company, since grouped entries put the employer name in the title
/// slot. The parent itself is emitted only when no nested record survived.
pub(crate) fn merge_positions(entity: &Value, logos: &CompanyLogoIndex) -> Vec<ExperienceRecord> {
    let Some(parent) = parse_entity(entity, logos) else {
        return Vec::new();
    };

    let link = ParentLink {
        title: parent.title.as_deref(),
        company_url: parent.company_url.as_deref(),
        company_id: parent.company_id.as_deref(),
    };
    let parent_logo = link.company_id.and_then(|id| logos.get(id));

    let nested: Vec<ExperienceRecord> = nested_entities(entity)
        .into_iter()
        .filter_map(|child| parse_entity(child, logos))
        .map(|mut child| {
            if needs_parent_company(child.company.as_deref()) {
                child.company = link.title.map(str::to_string);
            }
            if child.company_url.is_none() {
                child.company_url = link.company_url.map(str::to_string);
            }
            if child.company_id.is_none() {
                child.company_id = link.company_id.map(str::to_string);
            }
            if let Some(logo) = parent_logo {
                child.company_logo_url = Some(logo.to_string());
            }
            child
        })
        .filter(has_title)
        .collect();

    if !nested.is_empty() {
        return nested;
    }
    if has_title(&parent) {
        vec![parent]
    } else {
        Vec::new()
    }
}
