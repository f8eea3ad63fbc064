//! A terminal-styled command shim with a resource monitor, a file tree and a
//! flashing on-screen keyboard.
//!
//! Commands typed at the prompt are handed to the platform shell; `cd`,
//! `clear` and `exit` are handled in-process.

mod app;
mod config;
mod core;
mod ui;

use std::io::{self, stdout};
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::time::MissedTickBehavior;

use crate::app::{
    event::{spawn_event_reader, AppEvent},
    handler,
    shell_runtime::{self, ShellUpdate},
    state::AppState,
};
use crate::core::{metrics::Monitor, shell::ShellConfig};

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), version, about = "Terminal shim with system monitor and file tree")]
struct Cli {
    /// Starting directory (defaults to `.`).
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Tree levels listed eagerly below the root.
    #[arg(long, default_value_t = 1)]
    depth: usize,

    /// Show hidden (dot) files in the tree.
    #[arg(long)]
    hidden: bool,

    /// Hide entries excluded by `.gitignore` in the tree.
    #[arg(long)]
    gitignore: bool,

    /// Shell used for commands, e.g. "bash -c".
    #[arg(long)]
    shell: Option<String>,

    /// Resource monitor refresh period in milliseconds.
    #[arg(long = "poll-ms")]
    poll_ms: Option<u64>,

    /// Write tracing output to this file (filter with RUST_LOG).
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,

    /// Write the effective configuration to the config file and exit.
    #[arg(long = "write-config")]
    write_config: bool,
}

fn init_tracing(path: Option<&PathBuf>) -> Result<()> {
    // The UI owns the terminal, so logs only go to a file.
    let Some(path) = path else {
        return Ok(());
    };
    let file = std::fs::File::create(path)
        .with_context(|| format!("cannot create log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

// ───────────────────────────────────────── main ─────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_file.as_ref())?;

    let mut user_config = config::AppConfig::load();
    if let Some(shell) = cli.shell.as_deref() {
        user_config.shell = ShellConfig::parse(shell).context("--shell must not be empty")?;
    }
    if let Some(ms) = cli.poll_ms {
        user_config.poll_ms = ms.clamp(250, 10_000);
    }

    if cli.write_config {
        let path = user_config.save()?;
        println!("wrote {}", path.display());
        return Ok(());
    }

    // ── initial state ─────────────────────────────────────────
    let cwd = cli
        .path
        .canonicalize()
        .with_context(|| format!("cannot open {}", cli.path.display()))?;
    let walk_config = core::fs::WalkConfig {
        max_depth: cli.depth,
        show_hidden: cli.hidden,
        respect_gitignore: cli.gitignore,
    };
    let tree = core::fs::build_tree(&cwd, &walk_config)?;
    let poll_period = Duration::from_millis(user_config.poll_ms);
    let mut state = AppState::new(cwd, tree, walk_config, user_config);
    tracing::info!(cwd = %state.cwd.display(), shell = %state.config.shell.display(), "starting");

    // ── terminal setup ────────────────────────────────────────
    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen, EnableMouseCapture, EnableBracketedPaste)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let result = run(&mut terminal, &mut state, poll_period).await;

    // ── teardown ──────────────────────────────────────────────
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;

    result
}

/// Metric poll timer.  The first tick lands one full period after the
/// monitor is primed, so the first CPU figure covers a real interval.
fn poll_interval(period: Duration) -> tokio::time::Interval {
    let mut poll = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
    poll.set_missed_tick_behavior(MissedTickBehavior::Skip);
    poll
}

async fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    state: &mut AppState,
    poll_period: Duration,
) -> Result<()> {
    let mut events = spawn_event_reader(Duration::from_millis(50));
    let (shell_tx, mut shell_rx) = tokio::sync::mpsc::unbounded_channel::<ShellUpdate>();
    let mut monitor = Monitor::new();
    let mut poll = poll_interval(poll_period);

    loop {
        terminal.draw(|frame| ui::draw(frame, state))?;

        for job in state.pending_jobs.drain(..) {
            shell_runtime::spawn_command(shell_tx.clone(), job);
        }

        tokio::select! {
            biased;

            Some(event) = events.recv() => {
                let now = Instant::now();
                match event {
                    AppEvent::Key(k) => {
                        state.status_message = None;
                        handler::handle_key(state, k, now);
                    }
                    AppEvent::Mouse(m) => handler::handle_mouse(state, m, now),
                    AppEvent::Paste(text) => handler::handle_paste(state, &text),
                    AppEvent::Resize(_, _) => {}
                    AppEvent::Tick => {
                        if state.keyboard.any_lit() {
                            state.keyboard.expire(now);
                        }
                    }
                }
            }

            Some(update) = shell_rx.recv() => {
                handler::apply_shell_update(state, update);
                while let Ok(update) = shell_rx.try_recv() {
                    handler::apply_shell_update(state, update);
                }
            }

            _ = poll.tick() => {
                state.metrics = Some(monitor.poll());
            }
        }

        if state.should_quit {
            break;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn first_poll_waits_a_full_period() {
        let mut poll = poll_interval(Duration::from_secs(5));
        let early = tokio::time::timeout(Duration::from_millis(50), poll.tick()).await;
        assert!(early.is_err());
    }
}
