//! Owner of one form session's state.

use std::rc::Rc;

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use stepwise_types::{ActionError, BoundsPolicy, FieldPatch, FormAction, Position, StepTree};

use crate::{FormRef, FormState, TransitionError, reduce};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error(transparent)]
    Action(#[from] ActionError),
    #[error(transparent)]
    Transition(#[from] TransitionError),
}

/// Holds the [`FormState`] of one session and applies actions to it.
///
/// Actions are applied one at a time, each against the fully applied result
/// of the previous one. A failed action leaves the state untouched.
#[derive(Debug)]
pub struct FormStore<U> {
    state: FormState<U>,
    bounds: BoundsPolicy,
    form_ref: FormRef,
}

impl<U> FormStore<U> {
    #[must_use]
    pub fn new(steps: StepTree<U>) -> Self {
        Self::with_bounds(steps, BoundsPolicy::default())
    }

    #[must_use]
    pub fn with_bounds(steps: StepTree<U>, bounds: BoundsPolicy) -> Self {
        Self {
            state: FormState::initial(Rc::new(steps)),
            bounds,
            form_ref: FormRef::new(),
        }
    }

    #[must_use]
    pub fn state(&self) -> &FormState<U> {
        &self.state
    }

    #[must_use]
    pub fn bounds(&self) -> BoundsPolicy {
        self.bounds
    }

    /// Submit-hook slot of the active substep.
    #[must_use]
    pub fn form_ref(&self) -> &FormRef {
        &self.form_ref
    }

    /// Apply `action` and return the resulting position.
    ///
    /// Any change of position releases the mounted substep form. An action
    /// that leaves the position unchanged, such as a field update or a
    /// `go_to` of the current step while on its first substep, keeps it
    /// mounted.
    pub fn dispatch(&mut self, action: FormAction) -> Result<Position, TransitionError> {
        let from = self.state.position();
        let next = reduce(&self.state, &action, self.bounds).inspect_err(|err| {
            warn!(kind = %action.kind(), %from, "transition rejected: {err}");
        })?;
        let to = next.position();

        if !next.in_bounds() {
            warn!(kind = %action.kind(), %from, %to, "navigation left the step tree");
        }
        debug!(kind = %action.kind(), %from, %to, "form transition");

        self.state = next;
        if from != to {
            self.form_ref.release();
        }
        Ok(to)
    }

    /// Decode a tagged action descriptor and apply it.
    ///
    /// Unknown tags are refused before anything is applied.
    pub fn dispatch_descriptor(&mut self, descriptor: &Value) -> Result<Position, StoreError> {
        let action = FormAction::decode(descriptor).inspect_err(|err| {
            warn!(%descriptor, "refusing form action: {err}");
        })?;
        Ok(self.dispatch(action)?)
    }

    pub fn next(&mut self) -> Result<Position, TransitionError> {
        self.dispatch(FormAction::Next)
    }

    pub fn back(&mut self) -> Result<Position, TransitionError> {
        self.dispatch(FormAction::Back)
    }

    pub fn go_to(&mut self, step: isize) -> Result<Position, TransitionError> {
        self.dispatch(FormAction::GoTo(step))
    }

    pub fn update_form_data(&mut self, patch: FieldPatch) -> Result<Position, TransitionError> {
        self.dispatch(FormAction::UpdateFields(patch))
    }
}
