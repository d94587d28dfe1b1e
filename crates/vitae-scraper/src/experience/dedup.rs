//! Duplicate collapsing and empty-field cleanup for experience records.

use std::collections::HashSet;

use vitae_core::ExperienceRecord;

/// Keeps the first record per `(title, company, start year)`, in order, and
/// strips empty fields from every survivor.
///
/// Empty strings are cleared before the key is computed, so running the
/// result through again changes nothing.
#[must_use]
pub fn dedup_experiences(records: Vec<ExperienceRecord>) -> Vec<ExperienceRecord> {
    let mut seen: HashSet<(Option<String>, Option<String>, Option<i32>)> = HashSet::new();
    let mut kept = Vec::with_capacity(records.len());

    for mut record in records {
        record.strip_empty();
        let key = (
            record.title.clone(),
            record.company.clone(),
            record.start_date.year,
        );
        if seen.insert(key) {
            kept.push(record);
        }
    }

    kept
}
