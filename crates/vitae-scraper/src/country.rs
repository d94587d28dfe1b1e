//! Country name to ISO 3166-1 alpha-2 code lookup.

const COUNTRY_CODES: &[(&str, &str)] = &[
    ("United States", "US"),
    ("United Kingdom", "GB"),
    ("Canada", "CA"),
    ("Australia", "AU"),
    ("India", "IN"),
    ("Bangladesh", "BD"),
    ("Germany", "DE"),
    ("France", "FR"),
    ("Spain", "ES"),
    ("Italy", "IT"),
    ("Netherlands", "NL"),
    ("Brazil", "BR"),
    ("Mexico", "MX"),
    ("Singapore", "SG"),
    ("Japan", "JP"),
    ("China", "CN"),
    ("South Korea", "KR"),
];

/// Exact, case-sensitive match on the display name used by the site.
#[must_use]
pub fn country_code(name: &str) -> Option<&'static str> {
    COUNTRY_CODES
        .iter()
        .find(|(country, _)| *country == name)
        .map(|(_, code)| *code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_country_resolves() {
        assert_eq!(country_code("United States"), Some("US"));
        assert_eq!(country_code("South Korea"), Some("KR"));
    }

    #[test]
    fn lookup_is_exact() {
        assert_eq!(country_code("united states"), None);
        assert_eq!(country_code(" Germany"), None);
        assert_eq!(country_code("Atlantis"), None);
    }
}
