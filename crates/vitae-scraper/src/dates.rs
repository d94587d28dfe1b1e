//! Free-text duration parsing (`"Jan 2020 - Present · 4 yrs"`).

use std::sync::LazyLock;

use regex::Regex;
use vitae_core::{DateRange, PartialDate};

const PRESENT: &str = "Present";

const MONTHS: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

static DATE_RANGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([A-Za-z]+\s+[0-9]{4}|[0-9]{4})\s*[-–]\s*(Present|[A-Za-z]+\s+[0-9]{4}|[0-9]{4})?")
        .expect("valid date range regex")
});
static YEAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]{4}").expect("valid year regex"));
static MONTH_WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z]+").expect("valid month regex"));

/// Parses a duration caption into a [`DateRange`].
///
/// `is_current` is set whenever the text mentions "Present". Start and end
/// come from the first `start - end` range in the text; unparseable parts are
/// left empty. Never fails.
#[must_use]
pub fn parse_date_range(text: &str) -> DateRange {
    let mut range = DateRange {
        duration: text.to_string(),
        is_current: text.contains(PRESENT),
        ..DateRange::default()
    };

    let Some(caps) = DATE_RANGE_RE.captures(text) else {
        return range;
    };

    if let Some(start) = caps.get(1) {
        range.start_date = parse_partial_date(start.as_str());
    }

    if let Some(end) = caps.get(2).map(|m| m.as_str()).filter(|e| *e != PRESENT) {
        let end = parse_partial_date(end);
        if !end.is_empty() {
            range.end_date = Some(end);
        }
    }

    range
}

/// Year from the first four-digit run, month from the first alphabetic run.
fn parse_partial_date(token: &str) -> PartialDate {
    PartialDate {
        year: YEAR_RE
            .find(token)
            .and_then(|m| m.as_str().parse::<i32>().ok()),
        month: MONTH_WORD_RE
            .find(token)
            .and_then(|m| month_number(m.as_str())),
    }
}

/// Month number from the first three letters of a month name, any case.
fn month_number(word: &str) -> Option<u32> {
    let prefix = word.get(..3)?;
    MONTHS
        .iter()
        .position(|m| m.eq_ignore_ascii_case(prefix))
        .and_then(|idx| u32::try_from(idx + 1).ok())
}
