//! The immutable two-level step hierarchy of a form session.

use thiserror::Error;

use crate::Position;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StepTreeError {
    #[error("a form needs at least one step")]
    Empty,
    #[error("step {index} has no substeps")]
    EmptyStep { index: usize },
}

/// Ordered steps, each an ordered, non-empty sequence of substep units.
///
/// Units are opaque to the tree and to the store: they are whatever the
/// rendering layer needs to draw a substep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepTree<U> {
    steps: Vec<Vec<U>>,
}

impl<U> StepTree<U> {
    pub fn new(steps: Vec<Vec<U>>) -> Result<Self, StepTreeError> {
        if steps.is_empty() {
            return Err(StepTreeError::Empty);
        }
        if let Some(index) = steps.iter().position(Vec::is_empty) {
            return Err(StepTreeError::EmptyStep { index });
        }
        Ok(Self { steps })
    }

    /// Build a tree where every step is a single substep.
    pub fn flat(units: impl IntoIterator<Item = U>) -> Result<Self, StepTreeError> {
        Self::new(units.into_iter().map(|unit| vec![unit]).collect())
    }

    #[must_use]
    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    /// Index of the last step. Never negative since the tree is non-empty.
    #[must_use]
    pub fn last_step(&self) -> isize {
        self.steps.len() as isize - 1
    }

    #[must_use]
    pub fn step(&self, step: isize) -> Option<&[U]> {
        let index = usize::try_from(step).ok()?;
        self.steps.get(index).map(Vec::as_slice)
    }

    /// Number of substeps in `step`, `None` when the step is out of range.
    #[must_use]
    pub fn sub_step_count(&self, step: isize) -> Option<usize> {
        self.step(step).map(<[U]>::len)
    }

    #[must_use]
    pub fn unit(&self, position: Position) -> Option<&U> {
        self.step(position.step)?.get(position.sub_step)
    }

    #[must_use]
    pub fn contains(&self, position: Position) -> bool {
        self.unit(position).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &[U]> {
        self.steps.iter().map(Vec::as_slice)
    }
}
