//! Context usage from the session transcript.
//!
//! The transcript is an append-only JSONL file; every assistant turn carries
//! a `message.usage` block with four token counters. Only the newest such
//! record matters, so the scan walks the lines back to front and stops at the
//! first hit instead of parsing the whole file forward.

use std::fs;
use std::path::Path;

use serde::Deserialize;

/// Token capacity the usage ratio is measured against. Claude Code compacts
/// the context at roughly 78% of the 200k window.
pub const CONTEXT_LIMIT: u64 = 200_000 * 78 / 100;

#[derive(Debug, Deserialize)]
struct TranscriptLine {
    #[serde(rename = "type")]
    kind: Option<String>,
    message: Option<Message>,
}

#[derive(Debug, Deserialize)]
struct Message {
    usage: Option<Usage>,
}

/// All four counters are required: a usage block missing any of them fails
/// deserialization and the scan moves on to an older line.
#[derive(Debug, Deserialize)]
struct Usage {
    input_tokens: u64,
    cache_creation_input_tokens: u64,
    cache_read_input_tokens: u64,
    output_tokens: u64,
}

impl Usage {
    fn total(&self) -> u64 {
        self.input_tokens
            + self.cache_creation_input_tokens
            + self.cache_read_input_tokens
            + self.output_tokens
    }
}

/// Token total of the newest assistant usage record in the transcript.
/// Missing file, unparseable lines, or no matching record all yield 0.
pub fn latest_usage_tokens(path: &Path) -> u64 {
    let contents = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(_) => return 0,
    };

    for line in contents.lines().rev() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let record: TranscriptLine = match serde_json::from_str(line) {
            Ok(r) => r,
            Err(_) => continue,
        };

        if record.kind.as_deref() != Some("assistant") {
            continue;
        }

        if let Some(usage) = record.message.and_then(|m| m.usage) {
            return usage.total();
        }
    }

    0
}

/// Usage as a percentage of the capacity constant. Not clamped: a session
/// past the nominal limit reads above 100.
pub fn usage_ratio(tokens: u64) -> f64 {
    (tokens as f64 / CONTEXT_LIMIT as f64) * 100.0
}
