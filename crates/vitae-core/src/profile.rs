//! Output records produced by the profile extractor.
//!
//! Basic-info fields serialize absent values as explicit `null`. Experience
//! records skip every absent or empty field so each entry stays minimal.

use serde::{Deserialize, Serialize};

/// A year and/or month where either part may be unknown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PartialDate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    /// 1-12.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month: Option<u32>,
}

impl PartialDate {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.year.is_none() && self.month.is_none()
    }
}

/// Structured form of a free-text duration such as `"Jan 2020 - Present"`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateRange {
    pub duration: String,
    pub start_date: PartialDate,
    /// Set only when an explicit, non-"Present" end token was parsed.
    pub end_date: Option<PartialDate>,
    pub is_current: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationInfo {
    pub country: Option<String>,
    pub full: Option<String>,
    pub city: Option<String>,
    /// ISO code; only set when `country` is a known country name.
    pub country_code: Option<String>,
}

/// One position in the work-history timeline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employment_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default, skip_serializing_if = "PartialDate::is_empty")]
    pub start_date: PartialDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<PartialDate>,
    #[serde(default)]
    pub is_current: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_logo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_id: Option<String>,
}

impl ExperienceRecord {
    /// Copies the duration fields of a parsed [`DateRange`] into the record.
    pub fn apply_date_range(&mut self, range: DateRange) {
        self.duration = Some(range.duration);
        self.start_date = range.start_date;
        self.end_date = range.end_date;
        self.is_current = range.is_current;
    }

    /// Turns empty strings and empty dates into absent values.
    pub fn strip_empty(&mut self) {
        for field in [
            &mut self.title,
            &mut self.company,
            &mut self.employment_type,
            &mut self.location,
            &mut self.work_type,
            &mut self.duration,
            &mut self.company_url,
            &mut self.company_logo_url,
            &mut self.company_id,
        ] {
            if field.as_deref() == Some("") {
                *field = None;
            }
        }
        if self.end_date.is_some_and(|d| d.is_empty()) {
            self.end_date = None;
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasicInfo {
    pub fullname: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub headline: Option<String>,
    pub public_identifier: String,
    pub profile_url: String,
    pub about: Option<String>,
    pub location: LocationInfo,
    pub is_creator: bool,
    pub is_premium: bool,
    pub open_to_work: bool,
    pub is_remembrance: bool,
    /// Internal `fsd_profile` identifier.
    pub urn: String,
    pub follower_count: Option<u64>,
    pub connection_count: Option<u64>,
    pub email: Option<String>,
    pub websites: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileRecord {
    pub basic_info: BasicInfo,
    pub experience: Vec<ExperienceRecord>,
}
