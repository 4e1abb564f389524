//! Release freshness check with a time-bounded on-disk cache.
//!
//! The cache interval is the only throttle against the remote endpoint: a
//! cache file younger than the interval is returned as-is with no network
//! access, and every failure past that point degrades to `Current`. No
//! retries, no backoff.

use std::fs;
use std::path::Path;
use std::time::{Duration, SystemTime};

use anyhow::Result;
use serde::Deserialize;

use crate::config::{expand_tilde, Config};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionStatus {
    Current,
    Outdated,
}

impl VersionStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            VersionStatus::Current => "current",
            VersionStatus::Outdated => "outdated",
        }
    }

    /// Cache files hold a single bare token. Anything that is not exactly
    /// `outdated` reads as `Current`, so stray cache content cannot invent a
    /// third state.
    fn from_cache(text: &str) -> Self {
        if text.trim() == "outdated" {
            VersionStatus::Outdated
        } else {
            VersionStatus::Current
        }
    }
}

#[derive(Debug, Deserialize)]
struct ReleaseInfo {
    tag_name: String,
}

/// Freshness of the running version, consulting the cache first.
/// The computed status is written back to the cache before returning; a
/// failed write is logged and otherwise ignored.
pub fn version_status(config: &Config, running: &str) -> VersionStatus {
    let cache_file = expand_tilde(&config.cache_file);

    if let Some(cached) = read_fresh_cache(&cache_file, config.check_interval_secs) {
        return cached;
    }

    let status = check_latest_release(config, running).unwrap_or_else(|e| {
        tracing::debug!(error = %e, "release check failed, assuming current");
        VersionStatus::Current
    });

    if let Err(e) = write_cache(&cache_file, status) {
        tracing::debug!(error = %e, path = %cache_file.display(), "could not write version cache");
    }

    status
}

fn read_fresh_cache(path: &Path, interval_secs: u64) -> Option<VersionStatus> {
    let modified = fs::metadata(path).ok()?.modified().ok()?;
    let age = SystemTime::now().duration_since(modified).ok()?;
    if age >= Duration::from_secs(interval_secs) {
        return None;
    }
    let contents = fs::read_to_string(path).ok()?;
    Some(VersionStatus::from_cache(&contents))
}

fn write_cache(path: &Path, status: VersionStatus) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, status.as_str())
}

fn check_latest_release(config: &Config, running: &str) -> Result<VersionStatus> {
    let client = reqwest::blocking::Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .build()?;

    let release: ReleaseInfo = client
        .get(&config.release_endpoint)
        .send()?
        .error_for_status()?
        .json()?;

    let latest = release.tag_name.trim_start_matches('v');
    if latest.is_empty() {
        return Ok(VersionStatus::Current);
    }

    Ok(compare_versions(running, latest))
}

/// Numeric (major, minor, patch) comparison, truncated to at most three
/// dot-separated components. Only a strictly smaller running version is
/// `Outdated`; any non-numeric component makes the comparison undecidable and
/// degrades to `Current`.
fn compare_versions(running: &str, latest: &str) -> VersionStatus {
    match (version_key(running), version_key(latest)) {
        (Some(r), Some(l)) if r < l => VersionStatus::Outdated,
        _ => VersionStatus::Current,
    }
}

fn version_key(version: &str) -> Option<Vec<u64>> {
    version
        .trim_start_matches('v')
        .split('.')
        .take(3)
        .map(|part| part.parse().ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Config whose endpoint is unroutable, so any network attempt fails
    /// fast instead of leaving the tests at the mercy of the real endpoint.
    fn offline_config(cache_file: &Path, interval_secs: u64) -> Config {
        Config {
            cache_file: cache_file.to_string_lossy().into_owned(),
            check_interval_secs: interval_secs,
            release_endpoint: "http://127.0.0.1:1/latest".to_string(),
            request_timeout_secs: 1,
            ..Config::default()
        }
    }

    #[test]
    fn test_compare_versions() {
        assert_eq!(compare_versions("1.2.3", "1.2.4"), VersionStatus::Outdated);
        assert_eq!(compare_versions("1.3.0", "1.2.9"), VersionStatus::Current);
        assert_eq!(compare_versions("1.2.3", "1.2.3"), VersionStatus::Current);
        assert_eq!(compare_versions("0.9.9", "1.0.0"), VersionStatus::Outdated);
    }

    #[test]
    fn test_compare_versions_short_and_prefixed() {
        // A two-component version compares lexicographically, like a tuple.
        assert_eq!(compare_versions("1.2", "1.2.4"), VersionStatus::Outdated);
        assert_eq!(compare_versions("v1.2.3", "1.2.4"), VersionStatus::Outdated);
        // Only the first three components count.
        assert_eq!(
            compare_versions("1.2.3.99", "1.2.3.1"),
            VersionStatus::Current
        );
    }

    #[test]
    fn test_non_numeric_component_degrades_to_current() {
        assert_eq!(
            compare_versions("1.2.3-beta", "1.2.4"),
            VersionStatus::Current
        );
        assert_eq!(compare_versions("1.2.3", "next"), VersionStatus::Current);
    }

    #[test]
    fn test_fresh_cache_skips_network() {
        let dir = tempfile::TempDir::new().unwrap();
        let cache = dir.path().join("version_check_cache");
        fs::write(&cache, "outdated").unwrap();

        // The endpoint is unreachable; only the cache can say "outdated".
        let config = offline_config(&cache, 3600);
        assert_eq!(version_status(&config, "1.0.0"), VersionStatus::Outdated);
    }

    #[test]
    fn test_unknown_cache_content_reads_as_current() {
        let dir = tempfile::TempDir::new().unwrap();
        let cache = dir.path().join("version_check_cache");
        fs::write(&cache, "garbage\n").unwrap();

        let config = offline_config(&cache, 3600);
        assert_eq!(version_status(&config, "1.0.0"), VersionStatus::Current);
    }

    #[test]
    fn test_stale_cache_refetches_and_rewrites() {
        let dir = tempfile::TempDir::new().unwrap();
        let cache = dir.path().join("version_check_cache");
        fs::write(&cache, "outdated").unwrap();

        // Interval 0 makes the cache permanently stale; the unreachable
        // endpoint then degrades the check to "current".
        let config = offline_config(&cache, 0);
        assert_eq!(version_status(&config, "1.0.0"), VersionStatus::Current);
        assert_eq!(fs::read_to_string(&cache).unwrap(), "current");
    }

    #[test]
    fn test_cache_write_creates_parents() {
        let dir = tempfile::TempDir::new().unwrap();
        let cache = dir.path().join("nested").join("dirs").join("cache");

        let config = offline_config(&cache, 3600);
        assert_eq!(version_status(&config, "1.0.0"), VersionStatus::Current);
        assert_eq!(fs::read_to_string(&cache).unwrap(), "current");
    }
}
