//! The closed set of form transitions.
//!
//! Inside the process actions are a plain enum and every match over them is
//! exhaustive. Actions that arrive as tagged descriptors (from a script, a
//! test fixture or another front end) go through [`FormAction::decode`], which
//! refuses any tag outside the closed set instead of guessing.

use std::fmt;
use std::str::FromStr;

use serde_json::{Value, json};
use thiserror::Error;

use crate::FieldPatch;

/// A transition request for the form store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormAction {
    /// Advance one substep, or to the next step when the current one is exhausted.
    Next,
    /// Go to the first substep of the previous step.
    Back,
    /// Jump to the first substep of the given step.
    GoTo(isize),
    /// Merge a partial field update.
    UpdateFields(FieldPatch),
}

/// Payload-free discriminant of [`FormAction`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    Next,
    Back,
    GoTo,
    UpdateFields,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error("unknown form action {0:?}")]
    UnknownKind(String),
    #[error("form action descriptor has no \"type\" tag")]
    MissingKind,
    #[error("form action {kind} requires a payload")]
    MissingPayload { kind: ActionKind },
    #[error("invalid payload for form action {kind}: {reason}")]
    InvalidPayload { kind: ActionKind, reason: String },
}

impl ActionKind {
    pub const ALL: [Self; 4] = [Self::Next, Self::Back, Self::GoTo, Self::UpdateFields];

    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Next => "NEXT",
            Self::Back => "BACK",
            Self::GoTo => "GO_TO",
            Self::UpdateFields => "UPDATE_FIELDS",
        }
    }

    /// Whether this kind can move the position.
    #[must_use]
    pub const fn navigates(self) -> bool {
        !matches!(self, Self::UpdateFields)
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for ActionKind {
    type Err = ActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.tag() == s)
            .ok_or_else(|| ActionError::UnknownKind(s.to_string()))
    }
}

impl FormAction {
    #[must_use]
    pub fn kind(&self) -> ActionKind {
        match self {
            Self::Next => ActionKind::Next,
            Self::Back => ActionKind::Back,
            Self::GoTo(_) => ActionKind::GoTo,
            Self::UpdateFields(_) => ActionKind::UpdateFields,
        }
    }

    /// Decode a tagged descriptor.
    ///
    /// Accepts either a bare tag string (`"NEXT"`, `"BACK"`) or an object of
    /// the form `{"type": "GO_TO", "payload": 2}`.
    pub fn decode(descriptor: &Value) -> Result<Self, ActionError> {
        let (tag, payload) = match descriptor {
            Value::String(tag) => (tag.as_str(), None),
            Value::Object(map) => {
                let tag = map
                    .get("type")
                    .and_then(Value::as_str)
                    .ok_or(ActionError::MissingKind)?;
                (tag, map.get("payload"))
            }
            _ => return Err(ActionError::MissingKind),
        };

        let kind: ActionKind = tag.parse()?;
        match kind {
            ActionKind::Next => Ok(Self::Next),
            ActionKind::Back => Ok(Self::Back),
            ActionKind::GoTo => {
                let payload = payload.ok_or(ActionError::MissingPayload { kind })?;
                let index = payload
                    .as_i64()
                    .and_then(|index| isize::try_from(index).ok())
                    .ok_or_else(|| ActionError::InvalidPayload {
                        kind,
                        reason: format!("expected a step index, got {payload}"),
                    })?;
                Ok(Self::GoTo(index))
            }
            ActionKind::UpdateFields => {
                let payload = payload.ok_or(ActionError::MissingPayload { kind })?;
                let patch = serde_json::from_value::<FieldPatch>(payload.clone()).map_err(|e| {
                    ActionError::InvalidPayload {
                        kind,
                        reason: e.to_string(),
                    }
                })?;
                Ok(Self::UpdateFields(patch))
            }
        }
    }

    /// Encode as a tagged descriptor accepted by [`FormAction::decode`].
    #[must_use]
    pub fn encode(&self) -> Value {
        match self {
            Self::Next | Self::Back => json!({ "type": self.kind().tag() }),
            Self::GoTo(index) => json!({ "type": self.kind().tag(), "payload": index }),
            Self::UpdateFields(patch) => json!({ "type": self.kind().tag(), "payload": patch }),
        }
    }
}
