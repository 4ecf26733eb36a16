//! Config files feeding the form's bounds policy and UI options.

use std::fs;

use stepwise_config::{ConfigError, StepwiseConfig, resolve_bounds};
use stepwise_core::{BoundsPolicy, Position};
use stepwise_tui::WizardApp;
use tempfile::tempdir;

#[test]
fn config_file_drives_the_form() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(
        &path,
        r#"
[navigation]
bounds = "reject"

[ui]
high_contrast = true
"#,
    )
    .unwrap();

    let config = StepwiseConfig::load_from(&path).unwrap().unwrap();
    let bounds = resolve_bounds(
        config.navigation.as_ref().and_then(|n| n.bounds.as_deref()),
        None,
    );
    assert_eq!(bounds, BoundsPolicy::Reject);

    let ui = config.ui_options();
    assert!(ui.high_contrast);
    assert!(!ui.ascii_only);

    let mut app = WizardApp::new(bounds, ui).unwrap();
    app.back();
    assert_eq!(app.position(), Ok(Position::ORIGIN));
    assert_eq!(app.ui_options(), ui);
}

#[test]
fn unknown_keys_are_tolerated() {
    let config = StepwiseConfig::parse(
        r#"
[navigation]
bounds = "clamp"
wrap = true

[telemetry]
enabled = false
"#,
    )
    .unwrap();
    assert_eq!(
        config.navigation.and_then(|n| n.bounds).as_deref(),
        Some("clamp")
    );
}

#[test]
fn unreadable_config_reports_its_path() {
    let dir = tempdir().unwrap();
    // A directory where a file is expected.
    let path = dir.path().join("config.toml");
    fs::create_dir(&path).unwrap();

    let err = StepwiseConfig::load_from(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Read { .. }));
    assert_eq!(err.path(), path.as_path());
}

#[test]
fn env_spelling_variants_are_accepted() {
    for raw in ["pass-through", "passthrough", "pass_through"] {
        assert_eq!(resolve_bounds(Some("reject"), Some(raw)), BoundsPolicy::PassThrough);
    }
}
