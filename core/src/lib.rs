//! Core state machine for Stepwise.
//!
//! - [`reduce`] is the pure transition function over [`FormState`].
//! - [`FormStore`] owns the state of one form session and applies actions in
//!   dispatch order.
//! - [`Scope`] distributes a store to nested consumers; lookups outside a
//!   session fail with [`SessionError::OutsideSession`].
//! - [`FormRef`] is the slot for the active substep's submit hook, released
//!   whenever the position changes.

mod form_ref;
mod reducer;
mod session;
mod state;
mod store;

pub use form_ref::{FormRef, HandleError, MountGuard, SubmitHook, SubmitOutcome};
pub use reducer::{TransitionError, reduce};
pub use session::{FormHandle, FormSnapshot, Scope, SessionError};
pub use state::FormState;
pub use store::{FormStore, StoreError};

pub use stepwise_types::{
    ActionError, ActionKind, BoundsPolicy, FieldName, FieldPatch, FormAction, FormFields,
    Position, StepTree, StepTreeError,
};
