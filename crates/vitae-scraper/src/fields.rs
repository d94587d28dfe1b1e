//! Scalar identity fields pulled from the contact page and the profile API
//! text by ordered pattern rules.
//!
//! Each field has a fixed list of rules tried in order; the first rule that
//! matches wins. A field no rule matches is absent, never an error.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{Html, Selector};

use crate::country::country_code;
use crate::decode::unescape_backslashes;
use crate::location::trailing_segment;

const OPEN_TO_WORK_SUFFIX: &str = " is open to work";
const PAGE_TITLE_SUFFIX: &str = " | LinkedIn";

/// Hosts whose URLs belong to the site itself rather than to the member.
const BLOCKED_WEBSITE_HOSTS: [&str; 2] = ["linkedin.com", "media.licdn.com"];

static NAME_FRAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"displayImageWithFrameReference":null,"a11yText":"([^"]+)""#)
        .expect("valid name regex")
});
static NAME_IMAGE_URN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""originalImageUrn"\s*:\s*null\s*,\s*"a11yText"\s*:\s*"([^"]*)""#)
        .expect("valid name regex")
});
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""url":"mailto:([^"]+)""#).expect("valid email regex"));
static WEBSITE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"https?://[^\s"<]+"#).expect("valid website regex"));
static PROFILE_URN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"elements":\["urn:li:fsd_profile:([^"]+)""#).expect("valid urn regex")
});
static LOCATION_CHILDREN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""children":\["([^"]+)"\]"#).expect("valid location regex")
});
static LOCALIZED_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""defaultLocalizedName":"([^"]+)""#).expect("valid location regex")
});
static FIRST_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#":null,"firstName":"([^"]+)",""#).expect("valid first name regex")
});
static LAST_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""lastName":"([^"]+)","memorialized":([a-z]+),"profileTopCardCustomAction""#)
        .expect("valid last name regex")
});
static HEADLINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""companyNameOnProfileTopCardShown":true,"headline":"([^"]+)""#)
        .expect("valid headline regex")
});
static FOLLOWER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""followerCount":([0-9]+)"#).expect("valid follower regex"));
static CONNECTIONS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""connections":\{"paging":\{"count":[0-9]+,"start":[0-9]+,"total":([0-9]+),""#)
        .expect("valid connections regex")
});
static ABOUT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#""numInitialLinesToShow":4,"text":\{"textDirection":"USER_LOCALE","text":"((?:\\.|[^"\\])*)","attributesV2"#,
    )
    .expect("valid about regex")
});

static NAME_RULES: [&LazyLock<Regex>; 2] = [&NAME_FRAME_RE, &NAME_IMAGE_URN_RE];

static TITLE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("title").expect("valid title selector"));

/// Fields read from the decoded contact-info page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactFields {
    /// Display name with the open-to-work suffix removed.
    pub name: Option<String>,
    pub open_to_work: bool,
    pub email: Option<String>,
    pub websites: Vec<String>,
    /// Raw `"City, Country"` candidate for the location resolver.
    pub location: Option<String>,
    /// `<title>` text without the site suffix.
    pub page_title: Option<String>,
    pub is_premium: bool,
    pub in_remembrance: bool,
}

/// Fields read from the raw profile API response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiFields {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub headline: Option<String>,
    pub follower_count: Option<u64>,
    pub connection_count: Option<u64>,
    pub is_creator: bool,
    pub memorialized: bool,
}

/// Returns capture group 1 of the first rule in `rules` that matches `text`.
fn first_capture<'t>(text: &'t str, rules: &[&LazyLock<Regex>]) -> Option<&'t str> {
    rules.iter().find_map(|rule| {
        rule.captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    })
}

fn capture<'t>(text: &'t str, rule: &LazyLock<Regex>) -> Option<&'t str> {
    first_capture(text, &[rule])
}

fn all_captures<'t>(
    text: &'t str,
    rule: &'static LazyLock<Regex>,
) -> impl Iterator<Item = &'t str> {
    rule.captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// The internal `fsd_profile` identifier, if `text` carries one.
#[must_use]
pub fn extract_profile_urn(text: &str) -> Option<&str> {
    capture(text, &PROFILE_URN_RE)
}

/// Extracts every contact-page field from already decoded text.
#[must_use]
pub fn extract_contact_fields(decoded: &str) -> ContactFields {
    let document = Html::parse_document(decoded);
    let raw_name = first_capture(decoded, &NAME_RULES);

    ContactFields {
        name: raw_name.map(|n| n.replace(OPEN_TO_WORK_SUFFIX, "")),
        open_to_work: raw_name.is_some_and(|n| n.contains(OPEN_TO_WORK_SUFFIX.trim_start())),
        email: capture(decoded, &EMAIL_RE).map(str::to_string),
        websites: extract_websites(&visible_text(&document)),
        location: location_candidate(decoded).map(str::to_string),
        page_title: page_title(&document),
        is_premium: decoded.contains(r#""premium":true"#) || decoded.contains("is a Premium member"),
        in_remembrance: decoded.contains("In remembrance"),
    }
}

/// Extracts every profile-API field from the raw response text.
#[must_use]
pub fn extract_api_fields(profile_text: &str) -> ApiFields {
    ApiFields {
        first_name: capture(profile_text, &FIRST_NAME_RE).map(str::to_string),
        last_name: capture(profile_text, &LAST_NAME_RE).map(str::to_string),
        headline: capture(profile_text, &HEADLINE_RE).map(str::to_string),
        follower_count: capture(profile_text, &FOLLOWER_RE).and_then(|n| n.parse().ok()),
        connection_count: capture(profile_text, &CONNECTIONS_RE).and_then(|n| n.parse().ok()),
        is_creator: profile_text.contains(r#""creator":true,"verificationData"#),
        memorialized: profile_text.contains(r#""memorialized":true"#),
    }
}

/// The summary section text from the cards payload, with its JSON string
/// escapes resolved.
#[must_use]
pub fn extract_about(cards_text: &str) -> Option<String> {
    capture(cards_text, &ABOUT_RE).map(unescape_backslashes)
}

/// First bracketed name list whose last comma segment is a known country,
/// else the last localized geo name on the page.
fn location_candidate(decoded: &str) -> Option<&str> {
    all_captures(decoded, &LOCATION_CHILDREN_RE)
        .find(|loc| country_code(trailing_segment(loc)).is_some())
        .or_else(|| all_captures(decoded, &LOCALIZED_NAME_RE).last())
}

fn extract_websites(text: &str) -> Vec<String> {
    WEBSITE_RE
        .find_iter(text)
        .map(|m| m.as_str())
        .filter(|url| !BLOCKED_WEBSITE_HOSTS.iter().any(|host| url.contains(host)))
        .map(str::to_string)
        .collect()
}

/// Concatenated text nodes of the document, skipping script and style bodies.
fn visible_text(document: &Html) -> String {
    let mut text = String::new();
    for node in document.tree.root().descendants() {
        let Some(fragment) = node.value().as_text() else {
            continue;
        };
        let hidden = node
            .parent()
            .and_then(|parent| parent.value().as_element())
            .is_some_and(|el| matches!(el.name(), "script" | "style" | "template"));
        if !hidden {
            text.push_str(fragment);
        }
    }
    text
}

fn page_title(document: &Html) -> Option<String> {
    document
        .select(&TITLE_SELECTOR)
        .next()
        .map(|title| title.text().collect::<String>().replace(PAGE_TITLE_SUFFIX, ""))
        .filter(|title| !title.is_empty())
}

#[cfg(test)]
#[path = "fields_test.rs"]
mod tests;
