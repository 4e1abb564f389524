//! Status line assembly.
//!
//! Pure formatting: every value arrives already computed, and the only
//! output is a single string of colored segments joined by dimmed pipes.

use std::fmt::Write as FmtWrite;

use colored::{ColoredString, Colorize};

use crate::transcript::{usage_ratio, CONTEXT_LIMIT};
use crate::update::VersionStatus;

const BAR_LENGTH: u64 = 20;

/// Everything the line displays.
pub struct Segments<'a> {
    pub dir: &'a str,
    pub branch: Option<&'a str>,
    pub model: &'a str,
    pub tokens: u64,
    pub session_short: &'a str,
    pub version: &'a str,
    pub freshness: VersionStatus,
}

/// ANSI-16 has no orange; this is the xterm-208 shade.
fn orange(text: &str) -> ColoredString {
    text.truecolor(255, 135, 0)
}

/// Usage bar color by ratio: <50 green, <80 yellow, <90 orange, else red.
fn usage_color(text: &str, ratio: f64) -> ColoredString {
    if ratio < 50.0 {
        text.green()
    } else if ratio < 80.0 {
        text.yellow()
    } else if ratio < 90.0 {
        orange(text)
    } else {
        text.red()
    }
}

/// Fixed-width block bar. The fill count uses integer division against the
/// capacity and is deliberately not clamped to the bar width, so a ratio past
/// 100% grows the bar; the empty remainder saturates at zero instead.
fn usage_bar(tokens: u64) -> String {
    let filled = (BAR_LENGTH * tokens / CONTEXT_LIMIT) as usize;
    let empty = (BAR_LENGTH as usize).saturating_sub(filled);
    format!("{}{}", "█".repeat(filled), "░".repeat(empty))
}

/// 1234567 -> "1,234,567".
fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Local wall-clock time, 24-hour.
fn clock() -> String {
    chrono::Local::now().format("%H:%M:%S").to_string()
}

/// Assemble the final single-line string.
pub fn render_line(seg: &Segments) -> String {
    let mut out = String::with_capacity(256);
    let sep = format!(" {} ", "|".dimmed());
    let ratio = usage_ratio(seg.tokens);

    let _ = write!(out, "📁 {}", seg.dir.white().bold());

    if let Some(branch) = seg.branch {
        let _ = write!(out, " {}", format!("|⚡️ {}", branch).green());
    }

    let _ = write!(
        out,
        "{}{}{}{}",
        sep,
        "[".bold(),
        seg.model.magenta(),
        "]".bold()
    );

    let _ = write!(
        out,
        "{}[{}] {} ({})",
        sep,
        usage_color(&usage_bar(seg.tokens), ratio),
        usage_color(&format!("{:.1}%", ratio), ratio),
        group_thousands(seg.tokens).cyan()
    );

    let _ = write!(out, "{}{}", sep, seg.session_short.white());

    let version_text = format!("{} ({})", seg.version, seg.freshness.as_str());
    let colored_version = match seg.freshness {
        VersionStatus::Outdated => orange(&version_text),
        VersionStatus::Current => version_text.green(),
    };
    let _ = write!(out, "{}{}", sep, colored_version);

    let _ = write!(out, "{}{}", sep, clock().white());

    out
}
