//! Pure transition function for form sessions.
//!
//! # Navigation rules
//!
//! - `Next` moves to the following substep while the current step has one,
//!   otherwise to the first substep of the following step.
//! - `Back` always lands on the first substep of the previous step. It does
//!   not descend into the previous step's last substep, so `Next` then `Back`
//!   out of a multi-substep step does not retrace the same path.
//! - `GoTo(k)` lands on `(k, 0)`.
//! - `UpdateFields` merges a patch and never moves.
//!
//! Targets outside the tree are handled by [`BoundsPolicy`].

use thiserror::Error;

use stepwise_types::{ActionKind, BoundsPolicy, FormAction, Position};

use crate::FormState;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("{kind} from {from} targets step {target}, outside 0..={last}")]
    OutOfRange {
        kind: ActionKind,
        from: Position,
        target: isize,
        last: isize,
    },
}

/// Apply `action` to `state`, producing the complete next state.
///
/// `state` is never modified. With [`BoundsPolicy::Reject`] an out-of-range
/// navigation returns an error and the caller keeps the old state.
pub fn reduce<U>(
    state: &FormState<U>,
    action: &FormAction,
    bounds: BoundsPolicy,
) -> Result<FormState<U>, TransitionError> {
    let target = match action {
        FormAction::Next => advance(state),
        FormAction::Back => Position::step_start(state.position().step.saturating_sub(1)),
        FormAction::GoTo(index) => Position::step_start(*index),
        FormAction::UpdateFields(patch) => {
            return Ok(state.with_fields(state.fields().merged(patch)));
        }
    };

    let position = bound(state, action.kind(), target, bounds)?;
    Ok(state.with_position(position))
}

fn advance<U>(state: &FormState<U>) -> Position {
    let Position { step, sub_step } = state.position();
    // A step outside the tree counts as exhausted.
    match state.steps().sub_step_count(step) {
        Some(count) if count > 1 && sub_step + 1 < count => Position::new(step, sub_step + 1),
        _ => Position::step_start(step.saturating_add(1)),
    }
}

fn bound<U>(
    state: &FormState<U>,
    kind: ActionKind,
    target: Position,
    bounds: BoundsPolicy,
) -> Result<Position, TransitionError> {
    let last = state.steps().last_step();
    if (0..=last).contains(&target.step) {
        return Ok(target);
    }

    match bounds {
        BoundsPolicy::PassThrough => Ok(target),
        // Next past the end stays put rather than rewinding the last step.
        BoundsPolicy::Clamp if kind == ActionKind::Next && state.in_bounds() => {
            Ok(state.position())
        }
        BoundsPolicy::Clamp => Ok(Position::step_start(target.step.clamp(0, last))),
        BoundsPolicy::Reject => Err(TransitionError::OutOfRange {
            kind,
            from: state.position(),
            target: target.step,
            last,
        }),
    }
}
