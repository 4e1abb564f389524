//! User-configurable settings for the status line.
//!
//! Everything the renderer and the version checker touch on disk or over the
//! network is configurable here, so tests can redirect the cache file and the
//! release endpoint without patching globals.

use std::path::PathBuf;

use serde::Deserialize;

/// Statusline settings. Missing file is not an error -- all fields have
/// defaults.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Sound played when context usage lands exactly on 100%.
    pub sound_high: String,

    /// Sound played when context usage lands exactly on 95%.
    pub sound_warn: String,

    /// Audio player command invoked with the sound file as its only argument.
    pub player: String,

    /// Cache file for the release freshness check.
    pub cache_file: String,

    /// Seconds a cached freshness result stays valid.
    /// Default: 3600
    pub check_interval_secs: u64,

    /// Endpoint queried for the latest published release.
    pub release_endpoint: String,

    /// User-agent header sent with the release request.
    pub user_agent: String,

    /// Timeout for the release request, in seconds.
    /// Default: 10
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sound_high: "~/.claude/sound-effects/alert24.mp3".to_string(),
            sound_warn: "~/.claude/sound-effects/alert02.mp3".to_string(),
            player: "afplay".to_string(),
            cache_file: "~/.claude/version_check_cache".to_string(),
            check_interval_secs: 3600,
            release_endpoint:
                "https://api.github.com/repos/anthropics/claude-code/releases/latest".to_string(),
            user_agent: "ccline".to_string(),
            request_timeout_secs: 10,
        }
    }
}

impl Config {
    /// Load the TOML config.
    /// Checks `CCLINE_CONFIG` env var first (for testing), then falls back to
    /// `~/.config/ccline/config.toml` (platform-appropriate).
    /// Returns defaults if the file is missing or unparseable.
    pub fn load() -> Self {
        let config_path = std::env::var("CCLINE_CONFIG")
            .ok()
            .map(PathBuf::from)
            .or_else(|| dirs::config_dir().map(|d| d.join("ccline").join("config.toml")));

        match config_path {
            Some(path) if path.exists() => match std::fs::read_to_string(&path) {
                Ok(contents) => toml::from_str(&contents).unwrap_or_default(),
                Err(_) => Config::default(),
            },
            _ => Config::default(),
        }
    }
}

/// Expand a leading `~/` against the home directory.
/// Paths without the prefix (and paths when no home is known) pass through.
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}
