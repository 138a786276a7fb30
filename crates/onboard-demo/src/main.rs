#![forbid(unsafe_code)]

//! Terminal onboarding form demo binary.
//!
//! Binds the form controller to a raw-mode terminal: fields edit in place,
//! the submit control follows the gate, errors render inline, and the raw
//! response body is dumped below the form. Diagnostics go to
//! `onboard-demo.log`, never to the screen.

mod app;
mod ui;

use std::io;
use std::time::Duration;

use crossterm::{cursor, event, execute, terminal};
use tracing_subscriber::EnvFilter;

use crate::app::App;

struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        execute!(io::stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), terminal::LeaveAlternateScreen, cursor::Show);
        let _ = terminal::disable_raw_mode();
    }
}

/// Route diagnostics to a log file so the raw-mode screen stays clean.
fn init_logging() -> io::Result<()> {
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open("onboard-demo.log")?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn run() -> io::Result<()> {
    init_logging()?;

    let endpoint = std::env::args()
        .nth(1)
        .unwrap_or_else(|| onboard::DEFAULT_ENDPOINT.to_string());
    tracing::info!(%endpoint, "starting onboarding demo");

    let _guard = TerminalGuard::enter()?;
    let mut out = io::stdout();
    let mut app = App::new(endpoint);

    while !app.should_quit() {
        ui::draw(&app, &mut out)?;
        if event::poll(Duration::from_millis(50))? {
            let event = event::read()?;
            app.handle_event(&event);
        }
        app.pump();
    }

    Ok(())
}

fn main() {
    if let Err(err) = run() {
        eprintln!("onboard-demo error: {err}");
        std::process::exit(1);
    }
}
