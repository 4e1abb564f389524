//! Best-effort git branch detection.

use std::fs;
use std::path::Path;

/// Branch name from `.git/HEAD`, if the directory is a repository checkout
/// with a symbolic head. Detached heads, missing files, and unreadable files
/// all yield `None` -- this segment is cosmetic and never fails the render.
pub fn current_branch(dir: &Path) -> Option<String> {
    if !dir.join(".git").exists() {
        return None;
    }

    let head = fs::read_to_string(dir.join(".git").join("HEAD")).ok()?;
    head.trim()
        .strip_prefix("ref: refs/heads/")
        .map(str::to_string)
}
