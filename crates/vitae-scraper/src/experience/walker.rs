//! Locating position entities inside the profile cards graph.
//!
//! Only cards whose URN marks them as the experience section are visited.

use serde_json::Value;

use crate::json_nav::{list_at, object_at, text_at};

const EXPERIENCE_MARKER: &str = "EXPERIENCE";
const PROFILE_CARD_MARKER: &str = "fsd_profileCard";

/// Items of the cards payload, preferring `data.included` and falling back
/// to the top-level `included` list when that is absent or empty.
fn included_items(cards: &Value) -> &[Value] {
    let nested = list_at(cards, &["data", "included"]);
    if nested.is_empty() {
        list_at(cards, &["included"])
    } else {
        nested
    }
}

fn is_experience_card(item: &Value) -> bool {
    text_at(item, &["entityUrn"])
        .is_some_and(|urn| urn.contains(EXPERIENCE_MARKER) && urn.contains(PROFILE_CARD_MARKER))
}

/// Every top-level experience entity in document order.
pub(crate) fn experience_entities(cards: &Value) -> Vec<&Value> {
    included_items(cards)
        .iter()
        .filter(|item| is_experience_card(item))
        .flat_map(|card| list_at(card, &["topComponents"]))
        .filter_map(|top| object_at(top, &["components", "fixedListComponent"]))
        .flat_map(|fixed| list_at(fixed, &["components"]))
        .filter_map(|entry| object_at(entry, &["components", "entityComponent"]))
        .collect()
}

/// Nested position entities under a parent entity.
pub(crate) fn nested_entities(entity: &Value) -> Vec<&Value> {
    list_at(entity, &["subComponents", "components"])
        .iter()
        .filter_map(|entry| object_at(entry, &["components", "entityComponent"]))
        .collect()
}
