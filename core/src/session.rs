//! Access layer: hands one form store to every consumer below the scope that
//! provides it.
//!
//! A [`Scope`] mirrors a node of the UI tree. The scope that starts a session
//! owns the store; descendants created with [`Scope::child`] borrow their
//! parent and resolve the store with [`Scope::use_form`]. A scope borrows its
//! parent, so neither a scope nor a [`FormHandle`] can outlive the session
//! that created it.
//!
//! ```
//! use stepwise_core::{FormStore, Scope, SessionError, StepTree};
//!
//! let root = Scope::root();
//! assert!(matches!(root.use_form(), Err(SessionError::OutsideSession)));
//!
//! let steps = StepTree::flat(["name", "email"]).unwrap();
//! let session = root.provide(FormStore::new(steps));
//! let header = session.child();
//! let form = header.use_form().unwrap();
//! form.next().unwrap();
//! assert!(form.is_last_step().unwrap());
//! ```

use std::cell::RefCell;
use std::fmt;

use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use stepwise_types::{ActionError, FieldPatch, FormAction, FormFields, Position};

use crate::{FormRef, FormState, FormStore, StoreError, TransitionError};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("not within a form session")]
    OutsideSession,
    #[error("form session is busy applying another action")]
    Busy,
    #[error(transparent)]
    Action(#[from] ActionError),
    #[error(transparent)]
    Transition(#[from] TransitionError),
}

impl From<StoreError> for SessionError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Action(err) => Self::Action(err),
            StoreError::Transition(err) => Self::Transition(err),
        }
    }
}

/// A node of the consumer tree, optionally providing a form session.
pub struct Scope<'p, U> {
    parent: Option<&'p Scope<'p, U>>,
    store: Option<RefCell<FormStore<U>>>,
}

impl<U> Scope<'static, U> {
    /// Top of a tree, outside any session.
    #[must_use]
    pub fn root() -> Self {
        Self {
            parent: None,
            store: None,
        }
    }

    /// Top of a tree that is itself a session. Used by hosts that keep the
    /// session alive across frames and rebuild child scopes on every draw.
    #[must_use]
    pub fn session(store: FormStore<U>) -> Self {
        debug!(
            steps = store.state().steps().step_count(),
            bounds = %store.bounds(),
            "form session started"
        );
        Self {
            parent: None,
            store: Some(RefCell::new(store)),
        }
    }
}

impl<'p, U> Scope<'p, U> {
    /// A plain descendant that inherits whatever session is in scope.
    #[must_use]
    pub fn child(&self) -> Scope<'_, U> {
        Scope {
            parent: Some(self),
            store: None,
        }
    }

    /// A descendant that starts a new session owned by the returned scope.
    #[must_use]
    pub fn provide(&self, store: FormStore<U>) -> Scope<'_, U> {
        debug!(
            steps = store.state().steps().step_count(),
            bounds = %store.bounds(),
            "form session started"
        );
        Scope {
            parent: Some(self),
            store: Some(RefCell::new(store)),
        }
    }

    /// Resolve the nearest session at or above this scope.
    pub fn use_form(&self) -> Result<FormHandle<'_, U>, SessionError> {
        match (&self.store, self.parent) {
            (Some(cell), _) => Ok(FormHandle { cell }),
            (None, Some(parent)) => parent.use_form(),
            (None, None) => Err(SessionError::OutsideSession),
        }
    }

    #[must_use]
    pub fn in_session(&self) -> bool {
        self.use_form().is_ok()
    }

    /// Give the store back, ending the session. `None` if this scope did not
    /// provide one.
    pub fn into_store(self) -> Option<FormStore<U>> {
        self.store.map(RefCell::into_inner)
    }
}

impl<U> fmt::Debug for Scope<'_, U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scope")
            .field("provides_session", &self.store.is_some())
            .field("has_parent", &self.parent.is_some())
            .finish()
    }
}

/// Read-only view of a session, detached from the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSnapshot {
    pub position: Position,
    pub fields: FormFields,
    pub step_count: usize,
    pub is_first_step: bool,
    pub is_last_step: bool,
}

/// What consumers get from [`Scope::use_form`]: read access plus the four
/// actions. There is no way to obtain a mutable reference to the state.
pub struct FormHandle<'s, U> {
    cell: &'s RefCell<FormStore<U>>,
}

impl<U> Clone for FormHandle<'_, U> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<U> Copy for FormHandle<'_, U> {}

impl<U> fmt::Debug for FormHandle<'_, U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.cell.try_borrow() {
            Ok(store) => f
                .debug_struct("FormHandle")
                .field("position", &store.state().position())
                .finish(),
            Err(_) => f.write_str("FormHandle { <busy> }"),
        }
    }
}

impl<U> FormHandle<'_, U> {
    /// Run `f` against the current state.
    ///
    /// Actions dispatched from inside `f` fail with [`SessionError::Busy`].
    pub fn with_state<R>(&self, f: impl FnOnce(&FormState<U>) -> R) -> Result<R, SessionError> {
        let store = self.cell.try_borrow().map_err(|_| SessionError::Busy)?;
        Ok(f(store.state()))
    }

    pub fn with_current_unit<R>(&self, f: impl FnOnce(Option<&U>) -> R) -> Result<R, SessionError> {
        self.with_state(|state| f(state.current_unit()))
    }

    pub fn snapshot(&self) -> Result<FormSnapshot, SessionError> {
        self.with_state(|state| FormSnapshot {
            position: state.position(),
            fields: state.fields().clone(),
            step_count: state.steps().step_count(),
            is_first_step: state.is_first_step(),
            is_last_step: state.is_last_step(),
        })
    }

    pub fn position(&self) -> Result<Position, SessionError> {
        self.with_state(FormState::position)
    }

    pub fn form_data(&self) -> Result<FormFields, SessionError> {
        self.with_state(|state| state.fields().clone())
    }

    pub fn is_first_step(&self) -> Result<bool, SessionError> {
        self.with_state(FormState::is_first_step)
    }

    pub fn is_last_step(&self) -> Result<bool, SessionError> {
        self.with_state(FormState::is_last_step)
    }

    /// Submit-hook slot of the active substep.
    pub fn form_ref(&self) -> Result<FormRef, SessionError> {
        let store = self.cell.try_borrow().map_err(|_| SessionError::Busy)?;
        Ok(store.form_ref().clone())
    }

    pub fn dispatch(&self, action: FormAction) -> Result<Position, SessionError> {
        let mut store = self.cell.try_borrow_mut().map_err(|_| SessionError::Busy)?;
        Ok(store.dispatch(action)?)
    }

    /// Decode and apply a tagged descriptor; unknown tags are refused.
    pub fn dispatch_descriptor(&self, descriptor: &Value) -> Result<Position, SessionError> {
        let mut store = self.cell.try_borrow_mut().map_err(|_| SessionError::Busy)?;
        Ok(store.dispatch_descriptor(descriptor)?)
    }

    pub fn next(&self) -> Result<Position, SessionError> {
        self.dispatch(FormAction::Next)
    }

    pub fn back(&self) -> Result<Position, SessionError> {
        self.dispatch(FormAction::Back)
    }

    pub fn go_to(&self, step: isize) -> Result<Position, SessionError> {
        self.dispatch(FormAction::GoTo(step))
    }

    pub fn update_form_data(&self, patch: FieldPatch) -> Result<Position, SessionError> {
        self.dispatch(FormAction::UpdateFields(patch))
    }
}
