//! Position of the active substep inside the step tree.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The `(step, sub_step)` pair identifying the active substep.
///
/// `step` is signed: under the pass-through bounds policy retreating from the
/// first step produces `-1`, and callers are expected to guard with
/// `is_first_step` / `is_last_step` rather than rely on the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub step: isize,
    pub sub_step: usize,
}

impl Position {
    /// Initial position of every session.
    pub const ORIGIN: Self = Self {
        step: 0,
        sub_step: 0,
    };

    #[must_use]
    pub const fn new(step: isize, sub_step: usize) -> Self {
        Self { step, sub_step }
    }

    /// First substep of `step`.
    #[must_use]
    pub const fn step_start(step: isize) -> Self {
        Self { step, sub_step: 0 }
    }

    /// Step index as a `usize`, or `None` when it is negative.
    #[must_use]
    pub fn step_index(self) -> Option<usize> {
        usize::try_from(self.step).ok()
    }
}

impl From<(isize, usize)> for Position {
    fn from((step, sub_step): (isize, usize)) -> Self {
        Self { step, sub_step }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.step, self.sub_step)
    }
}
