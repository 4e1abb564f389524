//! The session payload Claude Code pipes to the statusline command.
//!
//! Unlike every other input this binary touches, the stdin payload is a hard
//! contract: the host always supplies these fields, so absence or malformed
//! JSON is fatal and surfaces as a non-zero exit with the error on stderr.

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct SessionSnapshot {
    pub session_id: String,
    pub transcript_path: String,
    pub model: ModelInfo,
    pub workspace: WorkspaceInfo,
    pub version: String,
}

#[derive(Debug, Deserialize)]
pub struct ModelInfo {
    #[allow(dead_code)] // Part of the payload contract; not rendered.
    pub id: String,
    pub display_name: String,
}

#[derive(Debug, Deserialize)]
pub struct WorkspaceInfo {
    pub current_dir: String,
}

impl SessionSnapshot {
    /// Basename of the workspace directory, empty for a bare root path.
    pub fn dir_basename(&self) -> String {
        Path::new(&self.workspace.current_dir)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// First 8 characters of the session id.
    pub fn session_short(&self) -> String {
        self.session_id.chars().take(8).collect()
    }
}

/// Parse the session payload from a reader (stdin in production).
pub fn read_snapshot(reader: impl Read) -> Result<SessionSnapshot> {
    serde_json::from_reader(reader).context("malformed session payload on stdin")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_payload() {
        let json = r#"{
            "session_id": "abcdef1234567890",
            "transcript_path": "/tmp/t.jsonl",
            "model": {"id": "claude-opus-4-6", "display_name": "Opus"},
            "workspace": {"current_dir": "/x/proj"},
            "version": "1.0.0"
        }"#;
        let snap = read_snapshot(json.as_bytes()).unwrap();
        assert_eq!(snap.model.display_name, "Opus");
        assert_eq!(snap.dir_basename(), "proj");
        assert_eq!(snap.session_short(), "abcdef12");
    }

    #[test]
    fn test_missing_field_is_fatal() {
        // No "version" key -- the host contract is violated.
        let json = r#"{
            "session_id": "s",
            "transcript_path": "/tmp/t.jsonl",
            "model": {"id": "m", "display_name": "M"},
            "workspace": {"current_dir": "/x"}
        }"#;
        assert!(read_snapshot(json.as_bytes()).is_err());
    }

    #[test]
    fn test_malformed_json_is_fatal() {
        assert!(read_snapshot("not json".as_bytes()).is_err());
    }

    #[test]
    fn test_short_session_id() {
        let json = r#"{
            "session_id": "abc",
            "transcript_path": "/tmp/t.jsonl",
            "model": {"id": "m", "display_name": "M"},
            "workspace": {"current_dir": "/x/proj"},
            "version": "1.0.0"
        }"#;
        let snap = read_snapshot(json.as_bytes()).unwrap();
        assert_eq!(snap.session_short(), "abc");
    }

    #[test]
    fn test_root_dir_basename_is_empty() {
        let json = r#"{
            "session_id": "s",
            "transcript_path": "/tmp/t.jsonl",
            "model": {"id": "m", "display_name": "M"},
            "workspace": {"current_dir": "/"},
            "version": "1.0.0"
        }"#;
        let snap = read_snapshot(json.as_bytes()).unwrap();
        assert_eq!(snap.dir_basename(), "");
    }
}
