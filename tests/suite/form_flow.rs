//! The account form end to end: typing, page submits, guards and the final
//! submission.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{Terminal, backend::TestBackend};
use serde_json::json;

use stepwise_core::Position;
use stepwise_tui::{Status, WizardApp, draw, handle_key};

use crate::common::{fill_and_submit, type_text, wizard};

fn screen(app: &mut WizardApp) -> String {
    app.prepare_frame();
    let mut terminal = Terminal::new(TestBackend::new(80, 16)).unwrap();
    terminal.draw(|frame| draw(frame, app)).unwrap();
    let buffer = terminal.backend().buffer();
    let mut out = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            out.push_str(buffer[(x, y)].symbol());
        }
        out.push('\n');
    }
    out
}

#[test]
fn complete_run_collects_every_field() {
    let mut app = wizard();

    fill_and_submit(&mut app, &["Ada", "Lovelace", "36"]);
    assert_eq!(app.position(), Ok(Position::new(1, 0)));
    fill_and_submit(&mut app, &["12 St James's Square", "London"]);
    assert_eq!(app.position(), Ok(Position::new(1, 1)));
    fill_and_submit(&mut app, &["Greater London", "SW1Y 4JH"]);
    assert_eq!(app.position(), Ok(Position::new(2, 0)));
    fill_and_submit(&mut app, &["ada@example.com"]);
    assert_eq!(app.position(), Ok(Position::new(2, 1)));
    fill_and_submit(&mut app, &["analytical-engine"]);
    assert_eq!(app.position(), Ok(Position::new(3, 0)));
    assert!(!app.should_quit());
    fill_and_submit(&mut app, &["1843"]);

    assert!(app.should_quit());
    let submission = app.take_submission().unwrap();
    assert_eq!(
        serde_json::to_value(&submission).unwrap(),
        json!({
            "firstName": "Ada",
            "lastName": "Lovelace",
            "age": "36",
            "street": "12 St James's Square",
            "city": "London",
            "state": "Greater London",
            "zip": "SW1Y 4JH",
            "email": "ada@example.com",
            "password": "analytical-engine",
            "code": "1843"
        })
    );
    assert!(app.take_submission().is_none());
}

#[test]
fn incomplete_page_blocks_navigation() {
    let mut app = wizard();
    fill_and_submit(&mut app, &["Ada"]);

    assert_eq!(app.position(), Ok(Position::ORIGIN));
    assert_eq!(
        app.status(),
        Some(&Status::Error("Last name is required".into()))
    );
    let text = screen(&mut app);
    assert!(text.contains("Error: Last name is required"));
    assert!(text.contains("▸ Last name"));
}

#[test]
fn values_survive_going_back() {
    let mut app = wizard();
    fill_and_submit(&mut app, &["Ada", "Lovelace", "36"]);
    handle_key(&mut app, KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE));

    assert_eq!(app.position(), Ok(Position::ORIGIN));
    let text = screen(&mut app);
    assert!(text.contains("Lovelace"));
    assert!(text.contains("36"));
}

#[test]
fn jumping_ahead_skips_validation_of_earlier_steps() {
    let mut app = wizard();
    handle_key(&mut app, KeyEvent::new(KeyCode::Char('4'), KeyModifiers::ALT));
    assert_eq!(app.position(), Ok(Position::new(3, 0)));

    type_text(&mut app, "0000");
    app.submit();
    let submission = app.take_submission().unwrap();
    assert_eq!(submission.code, "0000");
    assert_eq!(submission.first_name, "");
}

#[test]
fn password_never_reaches_the_screen() {
    let mut app = wizard();
    handle_key(&mut app, KeyEvent::new(KeyCode::Char('3'), KeyModifiers::ALT));
    fill_and_submit(&mut app, &["ada@example.com"]);
    type_text(&mut app, "s3cret");

    let text = screen(&mut app);
    assert!(!text.contains("s3cret"));
    assert!(text.contains("••••••"));
    assert_eq!(app.form_data().unwrap().password, "s3cret");
}
