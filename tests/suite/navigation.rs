//! Store navigation: the canonical walk, the bounds policies and the
//! step/substep properties.

use insta::assert_snapshot;

use stepwise_core::{
    BoundsPolicy, FieldName, FieldPatch, FormAction, FormStore, Position, StepTree,
    TransitionError,
};

use crate::common::{abc_store, trace};

#[test]
fn walk_through_nested_step() {
    let mut store = abc_store(BoundsPolicy::PassThrough);
    let walk = trace(
        &mut store,
        &[
            FormAction::Next,
            FormAction::Next,
            FormAction::Next,
            FormAction::Back,
        ],
    );
    assert_snapshot!(walk, @r"
    start  (0, 0) A
    NEXT   (1, 0) B1
    NEXT   (1, 1) B2
    NEXT   (2, 0) C
    BACK   (1, 0) B1
    ");
}

#[test]
fn pass_through_leaves_the_tree_at_both_ends() {
    let mut store = abc_store(BoundsPolicy::PassThrough);
    let walk = trace(
        &mut store,
        &[
            FormAction::Back,
            FormAction::Next,
            FormAction::GoTo(2),
            FormAction::Next,
            FormAction::Next,
        ],
    );
    assert_snapshot!(walk, @r"
    start  (0, 0) A
    BACK   (-1, 0) -
    NEXT   (0, 0) A
    GO_TO(2) (2, 0) C
    NEXT   (3, 0) -
    NEXT   (4, 0) -
    ");
}

#[test]
fn clamp_pins_navigation_to_the_tree() {
    let mut store = abc_store(BoundsPolicy::Clamp);
    let walk = trace(
        &mut store,
        &[
            FormAction::Back,
            FormAction::GoTo(9),
            FormAction::Next,
            FormAction::GoTo(-3),
        ],
    );
    assert_snapshot!(walk, @r"
    start  (0, 0) A
    BACK   (0, 0) A
    GO_TO(9) (2, 0) C
    NEXT   (2, 0) C
    GO_TO(-3) (0, 0) A
    ");
}

#[test]
fn reject_refuses_and_keeps_state() {
    let mut store = abc_store(BoundsPolicy::Reject);
    let walk = trace(
        &mut store,
        &[
            FormAction::Back,
            FormAction::GoTo(2),
            FormAction::Next,
            FormAction::GoTo(1),
        ],
    );
    assert_snapshot!(walk, @r"
    start  (0, 0) A
    BACK   error: BACK from (0, 0) targets step -1, outside 0..=2
    GO_TO(2) (2, 0) C
    NEXT   error: NEXT from (2, 0) targets step 3, outside 0..=2
    GO_TO(1) (1, 0) B1
    ");
}

#[test]
fn reject_error_carries_the_target() {
    let mut store = abc_store(BoundsPolicy::Reject);
    store.go_to(2).unwrap();
    let err = store.next().unwrap_err();
    assert!(matches!(
        err,
        TransitionError::OutOfRange {
            target: 3,
            last: 2,
            ..
        }
    ));
    assert_eq!(store.state().position(), Position::new(2, 0));
}

#[test]
fn back_from_a_substep_returns_to_the_previous_step_start() {
    for bounds in [
        BoundsPolicy::PassThrough,
        BoundsPolicy::Clamp,
        BoundsPolicy::Reject,
    ] {
        let mut store = abc_store(bounds);
        store.next().unwrap();
        store.next().unwrap();
        assert_eq!(store.state().position(), Position::new(1, 1));

        // Never to (1, 0), the previous substep.
        assert_eq!(store.back(), Ok(Position::new(0, 0)), "{bounds}");
    }
}

#[test]
fn next_then_back_lands_on_step_start() {
    let mut store = abc_store(BoundsPolicy::PassThrough);
    store.go_to(1).unwrap();
    store.next().unwrap();
    store.next().unwrap();
    assert_eq!(store.state().position(), Position::new(2, 0));
    assert_eq!(store.back(), Ok(Position::new(1, 0)));
}

#[test]
fn step_with_n_substeps_takes_n_nexts_to_leave() {
    for n in 2..=5 {
        let units: Vec<usize> = (0..n).collect();
        let steps = StepTree::new(vec![vec![100], units, vec![200]]).unwrap();
        let mut store = FormStore::new(steps);
        store.go_to(1).unwrap();

        for expected in 1..n {
            assert_eq!(store.next(), Ok(Position::new(1, expected)));
            assert_eq!(store.state().current_unit(), Some(&expected));
        }
        assert_eq!(store.next(), Ok(Position::new(2, 0)), "n = {n}");
    }
}

#[test]
fn go_to_resets_sub_step_from_anywhere() {
    let mut store = abc_store(BoundsPolicy::PassThrough);
    let starts = [
        Position::new(0, 0),
        Position::new(1, 1),
        Position::new(2, 0),
        Position::new(-1, 0),
    ];
    for start in starts {
        for k in 0..3 {
            // Reach `start` first.
            store.go_to(start.step).unwrap();
            if start.sub_step == 1 {
                store.next().unwrap();
            }
            assert_eq!(store.state().position(), start);
            assert_eq!(store.go_to(k), Ok(Position::new(k, 0)));
        }
    }
}

#[test]
fn first_and_last_flags_follow_the_step_index() {
    let mut store = abc_store(BoundsPolicy::PassThrough);
    let expectations = [
        (0, true, false),
        (1, false, false),
        (2, false, true),
        (3, false, false),
        (-1, false, false),
    ];
    for (step, first, last) in expectations {
        store.go_to(step).unwrap();
        assert_eq!(store.state().is_first_step(), first, "step {step}");
        assert_eq!(store.state().is_last_step(), last, "step {step}");
    }

    let single = FormStore::new(StepTree::flat(["only"]).unwrap());
    assert!(single.state().is_first_step());
    assert!(single.state().is_last_step());
}

#[test]
fn successive_updates_accumulate() {
    let mut store = abc_store(BoundsPolicy::PassThrough);
    store
        .update_form_data(FieldPatch::one(FieldName::FirstName, "Ada"))
        .unwrap();
    store.next().unwrap();
    store
        .update_form_data(FieldPatch::one(FieldName::City, "London"))
        .unwrap();

    let fields = store.state().fields();
    assert_eq!(fields.first_name, "Ada");
    assert_eq!(fields.city, "London");
    for (name, value) in fields.iter() {
        if !matches!(name, FieldName::FirstName | FieldName::City) {
            assert_eq!(value, "", "{name}");
        }
    }
    assert_eq!(store.state().position(), Position::new(1, 0));
}

#[test]
fn updates_never_move_the_position() {
    let mut store = abc_store(BoundsPolicy::Reject);
    store.next().unwrap();
    store.next().unwrap();
    let before = store.state().position();
    assert_eq!(
        store.update_form_data(FieldPatch::one(FieldName::Zip, "90210")),
        Ok(before)
    );
}
