/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Interactive TUI for the directory API.
//!
//! ```bash
//! # Point the console at a running directory server
//! DIRECTORY_TOKEN=eyJ... directory-console --base-url http://localhost:8080/api/skroflin
//! ```
//!
//! Logs go to `--log-file` (default `directory-console.log`); the
//! terminal belongs to the UI. Set `RUST_LOG=debug` for request-level
//! tracing.

use std::fs::File;
use std::io;
use std::io::IsTerminal;
use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use crossterm::ExecutableCommand;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
use directory_console::App;
use directory_console::Args;
use directory_console::ConsoleConfig;
use directory_console::build_client;
use directory_console::run_app;
use indicatif::ProgressBar;
use indicatif::ProgressStyle;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing_subscriber::EnvFilter;

/// Minimum time the connect spinner stays up, so it is readable.
const MIN_SPLASH: Duration = Duration::from_millis(600);

// Terminal setup / teardown

/// Put the terminal into "TUI mode".
///
/// Enables raw mode, switches to the alternate screen, and clears it,
/// returning a `ratatui::Terminal` backed by crossterm.
fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;
    Ok(terminal)
}

/// Restore the terminal back to normal "shell mode".
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> io::Result<()> {
    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Send `tracing` output to the log file, filtered by `RUST_LOG`
/// (default `info`).
fn init_logging(args: &Args) -> anyhow::Result<()> {
    let file = File::create(&args.log_file)
        .with_context(|| format!("cannot create log file {}", args.log_file.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("cannot install log subscriber: {}", e))?;
    Ok(())
}

fn connect_spinner(base_url: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    match ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
        Ok(style) => spinner.set_style(style),
        Err(e) => tracing::debug!(error = %e, "spinner template rejected"),
    }
    spinner.set_message(format!("directory: connecting to {} ...", base_url));
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if !io::stdout().is_terminal() {
        eprintln!("This TUI requires a real terminal.");
        return Ok(());
    }

    init_logging(&args)?;
    let config = ConsoleConfig::from_args(&args);
    let api = build_client(&config);
    tracing::info!(
        base_url = api.base_url(),
        page_size = config.page_size,
        authenticated = config.token.is_some(),
        "starting directory console"
    );

    // The spinner runs before the alternate screen so it shows as a
    // normal terminal line.
    let mut app = App::new(Arc::new(api), &config);
    let spinner = connect_spinner(app.base_url());
    let started = Instant::now();
    if !app.reload().await {
        tracing::warn!("initial load failed; press r to retry");
    }
    let elapsed = started.elapsed();
    if elapsed < MIN_SPLASH {
        tokio::time::sleep(MIN_SPLASH - elapsed).await;
    }
    spinner.finish_and_clear();

    let mut terminal = setup_terminal().context("cannot enter TUI mode")?;
    let result = run_app(&mut terminal, app).await;
    restore_terminal(&mut terminal).context("cannot restore terminal")?;
    result.context("event loop failed")
}
