//! Slot for the active substep's submit hook.
//!
//! The rendering layer mounts a hook for the substep it is drawing and keeps
//! the returned [`MountGuard`] for as long as that substep is on screen. The
//! binding is cleared when the guard drops or when the store moves to another
//! position, whichever happens first. Each mount gets a new generation, so a
//! guard left over from an earlier mount never clears a newer binding.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use thiserror::Error;
use tracing::trace;

/// Result of asking a mounted substep to validate and submit itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Accepted,
    Rejected(String),
}

impl SubmitOutcome {
    #[must_use]
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }
}

/// The native validation/submission entry point of a rendered substep.
pub trait SubmitHook {
    fn request_submit(&mut self) -> SubmitOutcome;
}

impl<F> SubmitHook for F
where
    F: FnMut() -> SubmitOutcome,
{
    fn request_submit(&mut self) -> SubmitOutcome {
        self()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HandleError {
    #[error("no substep form is mounted")]
    Detached,
    #[error("the substep form is already handling a submit")]
    Busy,
}

#[derive(Default)]
struct Slot {
    generation: u64,
    hook: Option<Box<dyn SubmitHook>>,
    /// Generation of the hook currently running a submit. The hook itself is
    /// out of the slot for the duration of the call.
    running: Option<u64>,
}

impl Slot {
    fn is_bound(&self) -> bool {
        self.hook.is_some() || self.running == Some(self.generation)
    }

    /// Drop the current binding and return its hook, if it is in the slot.
    fn unbind(&mut self) -> Option<Box<dyn SubmitHook>> {
        self.generation += 1;
        self.hook.take()
    }
}

/// Shared handle to the submit-hook slot of one form session.
///
/// The slot is only borrowed while its fields are read or swapped, never
/// while a hook runs, so hooks may navigate, remount or release freely.
#[derive(Clone, Default)]
pub struct FormRef {
    slot: Rc<RefCell<Slot>>,
}

impl FormRef {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `hook` as the active substep's form, replacing any previous one.
    pub fn attach(&self, hook: impl SubmitHook + 'static) -> MountGuard {
        let (generation, previous) = {
            let mut slot = self.slot.borrow_mut();
            let previous = slot.unbind();
            slot.hook = Some(Box::new(hook));
            (slot.generation, previous)
        };
        drop(previous);
        trace!(generation, "substep form mounted");
        MountGuard {
            slot: Rc::downgrade(&self.slot),
            generation,
        }
    }

    /// Clear the binding. Outstanding guards become inert, and a hook that is
    /// mid-submit is dropped once it returns.
    pub fn release(&self) {
        let (released, was_bound) = {
            let mut slot = self.slot.borrow_mut();
            let was_bound = slot.is_bound();
            (slot.unbind(), was_bound)
        };
        drop(released);
        if was_bound {
            trace!("substep form released");
        }
    }

    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.slot.borrow().is_bound()
    }

    /// Ask the mounted substep to run its validation/submission.
    ///
    /// The hook goes back into the slot afterwards only if nothing replaced
    /// or released it during the call.
    pub fn request_submit(&self) -> Result<SubmitOutcome, HandleError> {
        let (generation, mut hook) = {
            let mut slot = self.slot.borrow_mut();
            if slot.running.is_some() {
                return Err(HandleError::Busy);
            }
            let hook = slot.hook.take().ok_or(HandleError::Detached)?;
            slot.running = Some(slot.generation);
            (slot.generation, hook)
        };

        let outcome = hook.request_submit();

        let stale = {
            let mut slot = self.slot.borrow_mut();
            slot.running = None;
            if slot.generation == generation {
                slot.hook = Some(hook);
                None
            } else {
                Some(hook)
            }
        };
        if stale.is_some() {
            trace!(generation, "submitted form was unbound during its submit");
        }
        Ok(outcome)
    }
}

impl fmt::Debug for FormRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormRef")
            .field("attached", &self.is_attached())
            .finish()
    }
}

/// Keeps a substep's hook bound; dropping it unbinds the hook unless a newer
/// mount or a navigation already replaced it.
#[must_use = "dropping the guard unmounts the substep form"]
#[derive(Debug)]
pub struct MountGuard {
    slot: Weak<RefCell<Slot>>,
    generation: u64,
}

impl MountGuard {
    /// Whether this guard's hook is still the bound one.
    #[must_use]
    pub fn is_current(&self) -> bool {
        self.slot.upgrade().is_some_and(|slot| {
            let slot = slot.borrow();
            slot.generation == self.generation && slot.is_bound()
        })
    }
}

impl Drop for MountGuard {
    fn drop(&mut self) {
        let Some(slot) = self.slot.upgrade() else {
            return;
        };
        let (released, was_bound) = {
            let mut slot = slot.borrow_mut();
            if slot.generation == self.generation {
                let was_bound = slot.is_bound();
                (slot.unbind(), was_bound)
            } else {
                (None, false)
            }
        };
        drop(released);
        if was_bound {
            trace!(generation = self.generation, "substep form unmounted");
        }
    }
}
