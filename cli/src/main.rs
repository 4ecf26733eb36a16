//! Stepwise CLI - binary entry point and terminal session management.
//!
//! The CLI wires [`stepwise_config`] (bounds policy, UI options) into a
//! [`stepwise_tui::WizardApp`] and drives it until the form is submitted or
//! the user quits:
//!
//! ```text
//! main() -> TerminalSession::new() -> run_app() -> WizardApp + TUI
//!                                         |
//!                                         v
//!                         Some(FormFields) -> JSON on stdout
//! ```

mod logging;

use anyhow::{Context, Result};
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;
use std::io::{Stdout, stdout};

use stepwise_config::StepwiseConfig;
use stepwise_tui::{WizardApp, draw, handle_events};
use stepwise_types::FormFields;

/// RAII wrapper for terminal state: raw mode plus the alternate screen,
/// restored on drop even after an early return or a panic unwinding
/// through `main`.
struct TerminalSession {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalSession {
    fn new() -> Result<Self> {
        enable_raw_mode()?;

        let mut out = stdout();
        if let Err(err) = execute!(out, EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(err.into());
        }

        let terminal = match Terminal::new(CrosstermBackend::new(out)) {
            Ok(t) => t,
            Err(err) => {
                let _ = disable_raw_mode();
                let _ = execute!(stdout(), LeaveAlternateScreen);
                return Err(err.into());
            }
        };

        Ok(Self { terminal })
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

fn main() -> Result<()> {
    logging::init();

    let config = StepwiseConfig::load().unwrap_or_default();
    let bounds = config.bounds_policy();
    tracing::info!(%bounds, "Starting account form");

    let mut app =
        WizardApp::new(bounds, config.ui_options()).context("account form has no steps")?;

    let run_result = {
        let mut session = TerminalSession::new()?;
        run_app(&mut session.terminal, &mut app)
    };

    match run_result {
        Ok(Some(fields)) => print_submission(&fields)?,
        Ok(None) => tracing::info!("Account form closed without submitting"),
        Err(err) => {
            eprintln!("Error: {err:?}");
        }
    }

    Ok(())
}

fn run_app<B>(terminal: &mut Terminal<B>, app: &mut WizardApp) -> Result<Option<FormFields>>
where
    B: Backend,
    B::Error: Send + Sync + 'static,
{
    loop {
        app.prepare_frame();
        terminal.draw(|frame| draw(frame, app))?;

        if handle_events(app)? {
            return Ok(app.take_submission());
        }
    }
}

fn print_submission(fields: &FormFields) -> Result<()> {
    let json = serde_json::to_string_pretty(fields).context("failed to encode submission")?;
    println!("{json}");
    Ok(())
}
