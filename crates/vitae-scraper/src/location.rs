//! Splitting a free-text location into city, country and country code.

use vitae_core::LocationInfo;

use crate::country::country_code;

/// Splits a `"City, Region, Country"` candidate on its final comma.
///
/// `full` is always the candidate. `city` keeps everything before the final
/// comma as-is; `country` is the trimmed remainder. Without a comma only
/// `full` is set.
#[must_use]
pub fn resolve_location(candidate: Option<&str>) -> LocationInfo {
    let Some(full) = candidate else {
        return LocationInfo::default();
    };

    let mut info = LocationInfo {
        full: Some(full.to_string()),
        ..LocationInfo::default()
    };

    if let Some((city, country)) = full.rsplit_once(',') {
        let country = country.trim();
        info.country_code = country_code(country).map(str::to_string);
        info.country = Some(country.to_string());
        info.city = Some(city.to_string());
    }

    info
}

/// The trimmed text after the final comma, or the whole trimmed text.
pub(crate) fn trailing_segment(candidate: &str) -> &str {
    candidate
        .rsplit_once(',')
        .map_or(candidate, |(_, tail)| tail)
        .trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_city_and_country() {
        let info = resolve_location(Some("San Francisco, United States"));
        assert_eq!(info.city.as_deref(), Some("San Francisco"));
        assert_eq!(info.country.as_deref(), Some("United States"));
        assert_eq!(info.country_code.as_deref(), Some("US"));
        assert_eq!(info.full.as_deref(), Some("San Francisco, United States"));
    }

    #[test]
    fn keeps_multi_part_city_untrimmed() {
        let info = resolve_location(Some("Austin, Texas, United States"));
        assert_eq!(info.city.as_deref(), Some("Austin, Texas"));
        assert_eq!(info.country_code.as_deref(), Some("US"));
    }

    #[test]
    fn unknown_country_has_no_code() {
        let info = resolve_location(Some("Lagos, Nigeria"));
        assert_eq!(info.country.as_deref(), Some("Nigeria"));
        assert_eq!(info.city.as_deref(), Some("Lagos"));
        assert_eq!(info.country_code, None);
    }

    #[test]
    fn no_comma_sets_only_full() {
        let info = resolve_location(Some("Greater London"));
        assert_eq!(info.full.as_deref(), Some("Greater London"));
        assert_eq!(info.city, None);
        assert_eq!(info.country, None);
        assert_eq!(info.country_code, None);
    }

    #[test]
    fn missing_candidate_is_empty() {
        assert_eq!(resolve_location(None), LocationInfo::default());
    }

    #[test]
    fn trailing_segment_trims() {
        assert_eq!(trailing_segment("Berlin,  Germany "), "Germany");
        assert_eq!(trailing_segment(" Remote "), "Remote");
    }
}
