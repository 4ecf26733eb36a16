//! Immutable snapshot of one form session.

use std::fmt;
use std::rc::Rc;

use stepwise_types::{FormFields, Position, StepTree};

/// Position + field values + the shared step tree.
///
/// Every transition produces a new `FormState`; nothing outside this crate
/// can modify one in place.
pub struct FormState<U> {
    position: Position,
    fields: FormFields,
    steps: Rc<StepTree<U>>,
}

impl<U> FormState<U> {
    /// Session start: first substep of the first step, all fields empty.
    #[must_use]
    pub fn initial(steps: Rc<StepTree<U>>) -> Self {
        Self {
            position: Position::ORIGIN,
            fields: FormFields::default(),
            steps,
        }
    }

    #[must_use]
    pub fn position(&self) -> Position {
        self.position
    }

    #[must_use]
    pub fn fields(&self) -> &FormFields {
        &self.fields
    }

    #[must_use]
    pub fn steps(&self) -> &StepTree<U> {
        &self.steps
    }

    #[must_use]
    pub fn is_first_step(&self) -> bool {
        self.position.step == 0
    }

    #[must_use]
    pub fn is_last_step(&self) -> bool {
        self.position.step == self.steps.last_step()
    }

    /// The unit at the current position, `None` when navigation left the tree.
    #[must_use]
    pub fn current_unit(&self) -> Option<&U> {
        self.steps.unit(self.position)
    }

    #[must_use]
    pub fn in_bounds(&self) -> bool {
        self.steps.contains(self.position)
    }

    pub(crate) fn with_position(&self, position: Position) -> Self {
        Self {
            position,
            fields: self.fields.clone(),
            steps: Rc::clone(&self.steps),
        }
    }

    pub(crate) fn with_fields(&self, fields: FormFields) -> Self {
        Self {
            position: self.position,
            fields,
            steps: Rc::clone(&self.steps),
        }
    }
}

impl<U> Clone for FormState<U> {
    fn clone(&self) -> Self {
        self.with_fields(self.fields.clone())
    }
}

impl<U> fmt::Debug for FormState<U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormState")
            .field("position", &self.position)
            .field("fields", &self.fields)
            .field("step_count", &self.steps.step_count())
            .finish()
    }
}
