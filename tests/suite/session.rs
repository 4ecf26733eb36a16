//! Access layer: session scoping, shared stores and the submit-hook slot.

use std::cell::Cell;
use std::rc::Rc;

use stepwise_core::{
    BoundsPolicy, FieldName, FieldPatch, HandleError, Position, Scope, SessionError,
    SubmitOutcome,
};

use crate::common::abc_store;

#[test]
fn reading_outside_a_session_fails() {
    let root = Scope::<&str>::root();
    let widget = root.child();
    let err = widget.use_form().unwrap_err();
    assert_eq!(err, SessionError::OutsideSession);
    assert_eq!(err.to_string(), "not within a form session");
}

#[test]
fn consumers_at_any_depth_see_the_same_state() {
    let root = Scope::root();
    let session = root.provide(abc_store(BoundsPolicy::PassThrough));
    let page = session.child();
    let section = page.child();
    let field = section.child();

    field
        .use_form()
        .unwrap()
        .update_form_data(FieldPatch::one(FieldName::Email, "ada@example.com"))
        .unwrap();
    page.use_form().unwrap().next().unwrap();

    let snapshot = session.use_form().unwrap().snapshot().unwrap();
    assert_eq!(snapshot.position, Position::new(1, 0));
    assert_eq!(snapshot.fields.email, "ada@example.com");
    assert_eq!(
        field.use_form().unwrap().with_current_unit(|unit| unit.copied()),
        Ok(Some("B1"))
    );
}

#[test]
fn separate_sessions_do_not_share_state() {
    let root = Scope::root();
    let left = root.provide(abc_store(BoundsPolicy::PassThrough));
    let right = root.provide(abc_store(BoundsPolicy::PassThrough));

    left.child().use_form().unwrap().go_to(2).unwrap();
    assert_eq!(right.child().use_form().unwrap().position(), Ok(Position::ORIGIN));
}

#[test]
fn session_bounds_policy_applies_to_handles() {
    let session = Scope::session(abc_store(BoundsPolicy::Reject));
    let page = session.child();
    let form = page.use_form().unwrap();
    assert!(matches!(form.back(), Err(SessionError::Transition(_))));
    assert_eq!(form.position(), Ok(Position::ORIGIN));
}

#[test]
fn navigation_through_a_handle_releases_the_mounted_hook() {
    let session = Scope::session(abc_store(BoundsPolicy::PassThrough));
    let form = session.use_form().unwrap();
    let form_ref = form.form_ref().unwrap();

    let submits = Rc::new(Cell::new(0));
    let counter = Rc::clone(&submits);
    let guard = form_ref.attach(move || {
        counter.set(counter.get() + 1);
        SubmitOutcome::Accepted
    });
    assert_eq!(form_ref.request_submit(), Ok(SubmitOutcome::Accepted));

    form.next().unwrap();
    assert!(!guard.is_current());
    assert_eq!(form_ref.request_submit(), Err(HandleError::Detached));
    assert_eq!(submits.get(), 1);

    // The next page mounts its own hook; dropping the stale guard is harmless.
    let page_guard = form_ref.attach(|| SubmitOutcome::Rejected("City is required".into()));
    drop(guard);
    assert!(page_guard.is_current());
    assert_eq!(
        form.form_ref().unwrap().request_submit(),
        Ok(SubmitOutcome::Rejected("City is required".into()))
    );
}

#[test]
fn dispatch_inside_a_read_is_busy() {
    let session = Scope::session(abc_store(BoundsPolicy::PassThrough));
    let form = session.use_form().unwrap();
    let nested = form.with_state(|state| {
        assert_eq!(state.position(), Position::ORIGIN);
        form.go_to(2)
    });
    assert_eq!(nested, Ok(Err(SessionError::Busy)));
    assert_eq!(form.position(), Ok(Position::ORIGIN));
}

#[test]
fn submit_hook_that_advances_is_released_afterwards() {
    let session = Rc::new(Scope::session(abc_store(BoundsPolicy::PassThrough)));
    let form_ref = session.use_form().unwrap().form_ref().unwrap();

    let inner = Rc::clone(&session);
    let guard = form_ref.attach(move || {
        let form = inner.use_form().unwrap();
        assert!(form.form_ref().unwrap().is_attached());
        match form.next() {
            Ok(_) => SubmitOutcome::Accepted,
            Err(err) => SubmitOutcome::Rejected(err.to_string()),
        }
    });

    assert_eq!(form_ref.request_submit(), Ok(SubmitOutcome::Accepted));
    let form = session.use_form().unwrap();
    assert_eq!(form.position(), Ok(Position::new(1, 0)));
    assert!(!guard.is_current());
    assert!(!form_ref.is_attached());
    assert_eq!(form_ref.request_submit(), Err(HandleError::Detached));
}
