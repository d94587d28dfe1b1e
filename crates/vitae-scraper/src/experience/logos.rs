//! Company id to logo URL index, built once from the raw cards text.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use regex::Regex;

static LOGO_ID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"company-logo[^"]*?/([0-9]+)/[^"]*logo[^"]*"#).expect("valid logo id regex")
});

/// Company id to logo URL, scanned once from the raw cards text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompanyLogoIndex {
    logos: HashMap<String, String>,
}

impl CompanyLogoIndex {
    /// Collects every company id mentioned in a logo path, then resolves each
    /// id to the first media URL in the text that carries both `company-logo`
    /// and that id.
    #[must_use]
    pub fn from_payload_text(cards_text: &str) -> Self {
        let mut logos = HashMap::new();
        let mut tried = HashSet::new();

        for caps in LOGO_ID_RE.captures_iter(cards_text) {
            let Some(id) = caps.get(1).map(|m| m.as_str()) else {
                continue;
            };
            if !tried.insert(id) {
                continue;
            }
            if let Some(url) = find_logo_url(cards_text, id) {
                logos.insert(id.to_string(), url);
            }
        }

        Self { logos }
    }

    #[must_use]
    pub fn get(&self, company_id: &str) -> Option<&str> {
        self.logos.get(company_id).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.logos.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.logos.is_empty()
    }
}

fn find_logo_url(cards_text: &str, company_id: &str) -> Option<String> {
    let pattern = format!(
        r#"(https://media\.licdn\.com/dms/image/[^"]*company-logo[^"]*{}[^"]*)"#,
        regex::escape(company_id)
    );
    let rule = Regex::new(&pattern).ok()?;
    rule.captures(cards_text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}
