//! Fire-and-forget sound alerts at the usage trigger points.

use std::path::Path;
use std::process::{Command, Stdio};

use crate::config::{expand_tilde, Config};

/// Play a sound when the usage ratio lands exactly on a trigger point.
/// The comparison is exact floating-point equality: the alert fires only
/// when the ratio hits the integer point dead on, not on crossing it.
#[allow(clippy::float_cmp)]
pub fn maybe_play(config: &Config, usage_ratio: f64) {
    if usage_ratio == 100.0 {
        play(&config.player, &expand_tilde(&config.sound_high));
    } else if usage_ratio == 95.0 {
        play(&config.player, &expand_tilde(&config.sound_warn));
    }
}

/// Spawn the player detached with both output streams discarded. The child
/// is never waited on, and launch failures are logged rather than surfaced --
/// an alert must never block or break the render.
fn play(player: &str, sound: &Path) {
    if !sound.exists() {
        return;
    }

    if let Err(e) = Command::new(player)
        .arg(sound)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
    {
        tracing::debug!(error = %e, player, "could not launch sound player");
    }
}
