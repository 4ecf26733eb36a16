use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::WizardApp;
use crate::draft::FieldDraft;

/// Handle terminal events.
/// Returns true if the app should quit.
pub fn handle_events(app: &mut WizardApp) -> Result<bool> {
    if event::poll(Duration::from_millis(100))?
        && let Event::Key(key) = event::read()?
    {
        handle_key(app, key);
    }

    Ok(app.should_quit())
}

/// Apply one key event to the form.
pub fn handle_key(app: &mut WizardApp, key: KeyEvent) {
    // Only handle key press events (not release) - important for Windows
    if key.kind != KeyEventKind::Press {
        return;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.request_quit();
        return;
    }

    // Alt+digit jumps to that step, counting from 1
    if key.modifiers.contains(KeyModifiers::ALT)
        && let KeyCode::Char(ch) = key.code
        && let Some(digit) = ch.to_digit(10)
        && digit > 0
    {
        app.jump(digit as usize - 1);
        return;
    }

    match key.code {
        KeyCode::Enter => app.submit(),
        KeyCode::Esc => app.back(),
        KeyCode::Tab | KeyCode::Down => app.focus_next(),
        KeyCode::BackTab | KeyCode::Up => app.focus_prev(),
        KeyCode::Backspace => app.edit(FieldDraft::delete_char),
        KeyCode::Delete => app.edit(FieldDraft::delete_char_forward),
        KeyCode::Left => app.edit(FieldDraft::move_cursor_left),
        KeyCode::Right => app.edit(FieldDraft::move_cursor_right),
        KeyCode::Home => app.edit(FieldDraft::move_cursor_start),
        KeyCode::End => app.edit(FieldDraft::move_cursor_end),
        KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.edit(|draft| draft.enter_char(ch));
        }
        _ => {}
    }
}
