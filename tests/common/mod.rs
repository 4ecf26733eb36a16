//! Shared test utilities and fixtures

#![allow(dead_code)]

use std::fmt::Write as _;

use stepwise_core::{BoundsPolicy, FormAction, FormStore, StepTree};
use stepwise_tui::WizardApp;
use stepwise_types::UiOptions;

/// The `[[A], [B1, B2], [C]]` tree used throughout the suite.
pub fn abc_steps() -> StepTree<&'static str> {
    StepTree::new(vec![vec!["A"], vec!["B1", "B2"], vec!["C"]]).expect("fixture tree is valid")
}

pub fn abc_store(bounds: BoundsPolicy) -> FormStore<&'static str> {
    FormStore::with_bounds(abc_steps(), bounds)
}

/// Apply `actions` in order and render one line per step of the walk:
/// the action, the resulting position and the unit there (`-` when the
/// position is outside the tree). Rejected actions are shown with the error.
pub fn trace(store: &mut FormStore<&'static str>, actions: &[FormAction]) -> String {
    let mut out = String::new();
    let start = store.state();
    let _ = writeln!(
        out,
        "start  {} {}",
        start.position(),
        start.current_unit().copied().unwrap_or("-")
    );
    for action in actions {
        let label = match action {
            FormAction::GoTo(index) => format!("{}({index})", action.kind()),
            _ => action.kind().to_string(),
        };
        match store.dispatch(action.clone()) {
            Ok(position) => {
                let unit = store.state().current_unit().copied().unwrap_or("-");
                let _ = writeln!(out, "{label:<6} {position} {unit}");
            }
            Err(err) => {
                let _ = writeln!(out, "{label:<6} error: {err}");
            }
        }
    }
    out
}

pub fn wizard() -> WizardApp {
    WizardApp::new(BoundsPolicy::PassThrough, UiOptions::default()).expect("account steps are valid")
}

/// Type `text` into the focused field one character at a time.
pub fn type_text(app: &mut WizardApp, text: &str) {
    for ch in text.chars() {
        app.edit(|draft| draft.enter_char(ch));
    }
}

/// Fill the fields of the current page in order, then submit it.
pub fn fill_and_submit(app: &mut WizardApp, values: &[&str]) {
    for value in values {
        type_text(app, value);
        app.focus_next();
    }
    app.submit();
}
