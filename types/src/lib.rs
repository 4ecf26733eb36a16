//! Core domain types for Stepwise.
//!
//! This crate contains pure domain types with no IO and minimal dependencies:
//! the navigation position, the step tree, the account form fields and the
//! closed set of form actions. Everything here can be used from any layer of
//! the application.

// Pedantic lint configuration - these are intentional design choices
#![allow(clippy::missing_errors_doc)] // Result-returning functions are self-explanatory

mod action;
mod bounds;
mod fields;
mod position;
mod steps;
mod ui;

pub use action::{ActionError, ActionKind, FormAction};
pub use bounds::{BoundsPolicy, UnknownBoundsPolicy};
pub use fields::{FieldName, FieldPatch, FormFields, UnknownField};
pub use position::Position;
pub use steps::{StepTree, StepTreeError};
pub use ui::UiOptions;
