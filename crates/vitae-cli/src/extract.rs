//! The `extract` command: offline extraction over saved payload files.

use std::fs;
use std::path::Path;

use anyhow::Context;
use vitae_core::{normalize_username, ProfileRecord};
use vitae_scraper::{extract_profile, RawPayloads};

pub(crate) fn run(
    username: &str,
    contact: &Path,
    profile_api: &Path,
    cards: &Path,
) -> anyhow::Result<()> {
    let record = extract_from_files(username, contact, profile_api, cards)?;
    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}

pub(crate) fn extract_from_files(
    username: &str,
    contact: &Path,
    profile_api: &Path,
    cards: &Path,
) -> anyhow::Result<ProfileRecord> {
    let username = normalize_username(username);
    let payloads = RawPayloads::new(read(contact)?, read(profile_api)?, read(cards)?)
        .context("failed to parse the cards payload")?;
    let record = extract_profile(&username, &payloads)
        .with_context(|| format!("extraction failed for {username}"))?;

    tracing::info!(
        username = %username,
        positions = record.experience.len(),
        "profile extracted"
    );
    Ok(record)
}

fn read(path: &Path) -> anyhow::Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn fixture(name: &str) -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("../vitae-scraper/tests/fixtures")
            .join(name)
    }

    #[test]
    fn extracts_from_saved_payloads() {
        let record = extract_from_files(
            "https://www.linkedin.com/in/jane-doe/",
            &fixture("contact.html"),
            &fixture("profile.json"),
            &fixture("cards.json"),
        )
        .unwrap();
        assert_eq!(record.basic_info.public_identifier, "jane-doe");
        assert_eq!(record.basic_info.fullname.as_deref(), Some("Jane Doe"));
        assert_eq!(record.experience.len(), 3);
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = extract_from_files(
            "jane-doe",
            &fixture("missing.html"),
            &fixture("profile.json"),
            &fixture("cards.json"),
        )
        .unwrap_err();
        assert!(err.to_string().contains("missing.html"));
    }
}
