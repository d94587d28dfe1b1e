//! The `scrape` command: fetch, extract and persist every target in turn.
//!
//! Per-profile failures become `failed` lines rather than aborting the run,
//! so every target yields exactly one output line.

use std::io::Write;
use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use chrono::Utc;
use vitae_core::{load_targets, AppConfig, FailureKind, ScrapeOutcome, TargetsFile};
use vitae_scraper::{ProfileClient, SessionCookies};

use crate::sink::JsonlSink;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct BatchSummary {
    pub succeeded: usize,
    pub failed: usize,
}

/// Runs the whole batch described by `config` and the command arguments.
///
/// # Errors
///
/// Fails before any request when cookies are missing, the target list is
/// empty, or the output file cannot be opened.
pub(crate) async fn run(
    config: &AppConfig,
    profiles: &[String],
    output: Option<&Path>,
) -> anyhow::Result<()> {
    let cookies = session_cookies(config)?;
    let usernames = resolve_targets(config, profiles)?;
    let client = build_profile_client(config, cookies)?;

    let output_path = output.unwrap_or(config.output_path.as_path());
    let mut sink = JsonlSink::open(output_path)?;

    tracing::info!(
        profiles = usernames.len(),
        output = %output_path.display(),
        "starting scrape"
    );
    let delay = Duration::from_millis(config.scraper_inter_request_delay_ms);
    let summary = run_batch(&client, &usernames, delay, &mut sink).await?;

    tracing::info!(
        succeeded = summary.succeeded,
        failed = summary.failed,
        written = sink.written(),
        "scrape completed"
    );
    Ok(())
}

fn session_cookies(config: &AppConfig) -> anyhow::Result<SessionCookies> {
    let cookies = config
        .session_cookies
        .as_deref()
        .map(SessionCookies::parse)
        .unwrap_or_default();
    if cookies.is_empty() {
        anyhow::bail!("LINKEDIN_COOKIES is required for scrape; set it in the environment or .env");
    }
    Ok(cookies)
}

/// Usernames from `--profile` arguments, or else from the targets file, in
/// order. Repeats are kept and a blank entry stays as an empty string.
pub(crate) fn resolve_targets(config: &AppConfig, profiles: &[String]) -> anyhow::Result<Vec<String>> {
    let targets = if profiles.is_empty() {
        load_targets(&config.targets_path).with_context(|| {
            format!(
                "failed to load targets from {}",
                config.targets_path.display()
            )
        })?
    } else {
        TargetsFile::from_raw(profiles.iter().cloned())
    };
    Ok(targets.usernames())
}

pub(crate) fn build_profile_client(
    config: &AppConfig,
    cookies: SessionCookies,
) -> anyhow::Result<ProfileClient> {
    ProfileClient::new(
        &config.base_url,
        cookies,
        config.scraper_request_timeout_secs,
        &config.scraper_user_agent,
        config.scraper_max_retries,
        config.scraper_retry_backoff_base_secs,
    )
    .map_err(|e| anyhow::anyhow!("failed to build profile client: {e}"))
}

/// Scrapes `usernames` strictly in order, pausing `delay` between profiles,
/// and writes one outcome per username.
///
/// # Errors
///
/// Only sink write failures abort the batch.
pub(crate) async fn run_batch<W: Write>(
    client: &ProfileClient,
    usernames: &[String],
    delay: Duration,
    sink: &mut JsonlSink<W>,
) -> anyhow::Result<BatchSummary> {
    let total = usernames.len();
    let mut summary = BatchSummary::default();

    for (idx, username) in usernames.iter().enumerate() {
        if username.is_empty() {
            let error = format!("profile entry {} has no usable username or url", idx + 1);
            tracing::error!(entry = idx + 1, error = %error, "profile skipped");
            summary.failed += 1;
            sink.write(&ScrapeOutcome::failure(
                username,
                FailureKind::Extraction,
                error,
                Utc::now(),
            ))?;
            continue;
        }
        if idx > 0 && !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        tracing::info!("[{}/{}] scraping {username}", idx + 1, total);

        let outcome = match client.scrape_profile(username).await {
            Ok(profile) => {
                tracing::info!(
                    username = %username,
                    positions = profile.experience.len(),
                    "profile scraped"
                );
                summary.succeeded += 1;
                ScrapeOutcome::success(username, profile, Utc::now())
            }
            Err(e) => {
                let kind = e.failure_kind();
                tracing::error!(username = %username, kind = %kind, error = %e, "profile failed");
                summary.failed += 1;
                ScrapeOutcome::failure(username, kind, format!("{username}: {e}"), Utc::now())
            }
        };
        sink.write(&outcome)?;
    }

    Ok(summary)
}

#[cfg(test)]
#[path = "scrape_test.rs"]
mod tests;
