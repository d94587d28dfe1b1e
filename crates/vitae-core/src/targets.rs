//! Loading the list of profiles to scrape.
//!
//! Entries are kept in file order, repeats included. An entry that yields no
//! username still occupies its slot so the batch can report it.

use std::path::Path;

use serde::Deserialize;

use crate::ConfigError;

/// One entry of the targets file: a bare username or profile URL, or a
/// mapping carrying either.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ProfileTarget {
    Plain(String),
    Entry {
        #[serde(default)]
        username: Option<String>,
        #[serde(default)]
        url: Option<String>,
    },
}

impl ProfileTarget {
    /// The normalized public username for this target. Empty when the entry
    /// carries nothing usable.
    #[must_use]
    pub fn username(&self) -> String {
        match self {
            ProfileTarget::Plain(raw) => normalize_username(raw),
            ProfileTarget::Entry { username, url } => username
                .as_deref()
                .filter(|u| !u.trim().is_empty())
                .or(url.as_deref())
                .map(normalize_username)
                .unwrap_or_default(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct TargetsFile {
    pub profiles: Vec<ProfileTarget>,
}

impl TargetsFile {
    #[must_use]
    pub fn usernames(&self) -> Vec<String> {
        self.profiles.iter().map(ProfileTarget::username).collect()
    }

    /// Targets given directly as usernames or profile URLs.
    #[must_use]
    pub fn from_raw<I, S>(raw: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            profiles: raw
                .into_iter()
                .map(|s| ProfileTarget::Plain(s.into()))
                .collect(),
        }
    }

}

/// Reduce a username or profile URL to the bare public identifier.
///
/// `"https://www.linkedin.com/in/jane-doe/"` and `" jane-doe/ "` both give
/// `"jane-doe"`.
#[must_use]
pub fn normalize_username(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    let tail = trimmed.rsplit("/in/").next().unwrap_or(trimmed);
    tail.trim_matches('/').to_string()
}

/// Load and validate the targets file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_targets(path: &Path) -> Result<TargetsFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::TargetsFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let targets: TargetsFile = serde_yaml::from_str(&content)?;
    validate_targets(&targets)?;

    Ok(targets)
}

fn validate_targets(targets: &TargetsFile) -> Result<(), ConfigError> {
    if targets.profiles.is_empty() {
        return Err(ConfigError::Validation(
            "targets file lists no profiles".to_string(),
        ));
    }
    Ok(())
}
