//! One-line status bar for Claude Code sessions.
//!
//! Claude Code pipes a JSON session payload to stdin on every statusline
//! tick; this binary derives context usage, git branch, release freshness,
//! and the wall clock from it, then prints exactly one colored line to
//! stdout. A bad payload is fatal; everything else degrades quietly.

mod alert;
mod config;
mod git;
mod render;
mod session;
mod transcript;
mod update;

use std::path::Path;

use anyhow::Result;
use clap::Parser;

use config::Config;
use render::Segments;

#[derive(Parser)]
#[command(name = "ccline", version, about = "Render a status line for Claude Code sessions")]
struct Cli {
    /// Disable colored output (also respects NO_COLOR env var)
    #[arg(long)]
    pub no_color: bool,
}

fn main() -> Result<()> {
    // Diagnostics go to stderr and stay silent unless RUST_LOG is set, so
    // the host's status bar only ever sees the rendered line.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();

    let cli = Cli::parse();

    // Claude Code pipes stdout (not a TTY), so colored would normally
    // disable colors. Force them on unless --no-color or NO_COLOR is set.
    if cli.no_color || std::env::var("NO_COLOR").is_ok() {
        colored::control::set_override(false);
    } else {
        colored::control::set_override(true);
    }

    let config = Config::load();

    let snapshot = session::read_snapshot(std::io::stdin().lock())?;

    let tokens = transcript::latest_usage_tokens(Path::new(&snapshot.transcript_path));
    let branch = git::current_branch(Path::new("."));
    let freshness = update::version_status(&config, &snapshot.version);

    alert::maybe_play(&config, transcript::usage_ratio(tokens));

    let line = render::render_line(&Segments {
        dir: &snapshot.dir_basename(),
        branch: branch.as_deref(),
        model: &snapshot.model.display_name,
        tokens,
        session_short: &snapshot.session_short(),
        version: &snapshot.version,
        freshness,
    });
    println!("{}", line);

    Ok(())
}
