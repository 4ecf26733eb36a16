//! Account form fields and partial updates.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Names of the fields collected by the account form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldName {
    FirstName,
    LastName,
    Age,
    Street,
    City,
    State,
    Zip,
    Email,
    Password,
    Code,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown form field: {0:?}")]
pub struct UnknownField(pub String);

impl FieldName {
    pub const ALL: [Self; 10] = [
        Self::FirstName,
        Self::LastName,
        Self::Age,
        Self::Street,
        Self::City,
        Self::State,
        Self::Zip,
        Self::Email,
        Self::Password,
        Self::Code,
    ];

    /// Wire name, matching the serialized form.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::FirstName => "firstName",
            Self::LastName => "lastName",
            Self::Age => "age",
            Self::Street => "street",
            Self::City => "city",
            Self::State => "state",
            Self::Zip => "zip",
            Self::Email => "email",
            Self::Password => "password",
            Self::Code => "code",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::FirstName => "First name",
            Self::LastName => "Last name",
            Self::Age => "Age",
            Self::Street => "Street",
            Self::City => "City",
            Self::State => "State",
            Self::Zip => "ZIP",
            Self::Email => "Email",
            Self::Password => "Password",
            Self::Code => "Verification code",
        }
    }

    /// Whether the value should be masked when displayed.
    #[must_use]
    pub const fn is_secret(self) -> bool {
        matches!(self, Self::Password)
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for FieldName {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|name| name.key() == s)
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}

/// Values of every account form field. All fields start out empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormFields {
    pub first_name: String,
    pub last_name: String,
    pub age: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub email: String,
    pub password: String,
    pub code: String,
}

impl FormFields {
    #[must_use]
    pub fn get(&self, name: FieldName) -> &str {
        match name {
            FieldName::FirstName => &self.first_name,
            FieldName::LastName => &self.last_name,
            FieldName::Age => &self.age,
            FieldName::Street => &self.street,
            FieldName::City => &self.city,
            FieldName::State => &self.state,
            FieldName::Zip => &self.zip,
            FieldName::Email => &self.email,
            FieldName::Password => &self.password,
            FieldName::Code => &self.code,
        }
    }

    fn slot_mut(&mut self, name: FieldName) -> &mut String {
        match name {
            FieldName::FirstName => &mut self.first_name,
            FieldName::LastName => &mut self.last_name,
            FieldName::Age => &mut self.age,
            FieldName::Street => &mut self.street,
            FieldName::City => &mut self.city,
            FieldName::State => &mut self.state,
            FieldName::Zip => &mut self.zip,
            FieldName::Email => &mut self.email,
            FieldName::Password => &mut self.password,
            FieldName::Code => &mut self.code,
        }
    }

    /// Shallow merge: fields named by `patch` are replaced, the rest are kept.
    #[must_use]
    pub fn merged(&self, patch: &FieldPatch) -> Self {
        let mut next = self.clone();
        for (name, value) in patch.iter() {
            value.clone_into(next.slot_mut(name));
        }
        next
    }

    pub fn iter(&self) -> impl Iterator<Item = (FieldName, &str)> {
        FieldName::ALL.into_iter().map(|name| (name, self.get(name)))
    }
}

/// A partial set of field values to merge into [`FormFields`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct FieldPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    age: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    street: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    zip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<String>,
}

impl FieldPatch {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A patch touching a single field.
    #[must_use]
    pub fn one(name: FieldName, value: impl Into<String>) -> Self {
        Self::new().set(name, value)
    }

    pub fn set(mut self, name: FieldName, value: impl Into<String>) -> Self {
        *self.slot_mut(name) = Some(value.into());
        self
    }

    #[must_use]
    pub fn get(&self, name: FieldName) -> Option<&str> {
        self.slot(name).as_deref()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        FieldName::ALL.iter().all(|name| self.slot(*name).is_none())
    }

    /// Fields named by this patch, in form order.
    pub fn iter(&self) -> impl Iterator<Item = (FieldName, &str)> {
        FieldName::ALL
            .into_iter()
            .filter_map(|name| self.get(name).map(|value| (name, value)))
    }

    fn slot(&self, name: FieldName) -> &Option<String> {
        match name {
            FieldName::FirstName => &self.first_name,
            FieldName::LastName => &self.last_name,
            FieldName::Age => &self.age,
            FieldName::Street => &self.street,
            FieldName::City => &self.city,
            FieldName::State => &self.state,
            FieldName::Zip => &self.zip,
            FieldName::Email => &self.email,
            FieldName::Password => &self.password,
            FieldName::Code => &self.code,
        }
    }

    fn slot_mut(&mut self, name: FieldName) -> &mut Option<String> {
        match name {
            FieldName::FirstName => &mut self.first_name,
            FieldName::LastName => &mut self.last_name,
            FieldName::Age => &mut self.age,
            FieldName::Street => &mut self.street,
            FieldName::City => &mut self.city,
            FieldName::State => &mut self.state,
            FieldName::Zip => &mut self.zip,
            FieldName::Email => &mut self.email,
            FieldName::Password => &mut self.password,
            FieldName::Code => &mut self.code,
        }
    }
}

impl FromIterator<(FieldName, String)> for FieldPatch {
    fn from_iter<I: IntoIterator<Item = (FieldName, String)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::new(), |patch, (name, value)| patch.set(name, value))
    }
}
