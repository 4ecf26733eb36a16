//! The account-creation form as a step tree of pages.

use stepwise_types::{FieldName, StepTree, StepTreeError};

/// One substep of the account form: a titled group of fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormPage {
    /// Name of the step this page belongs to, shown in the step indicator.
    pub step: &'static str,
    pub title: &'static str,
    pub fields: &'static [FieldName],
}

impl FormPage {
    #[must_use]
    pub const fn new(step: &'static str, title: &'static str, fields: &'static [FieldName]) -> Self {
        Self {
            step,
            title,
            fields,
        }
    }

    /// First field of this page that is still blank.
    #[must_use]
    pub fn first_missing(&self, value: impl Fn(FieldName) -> bool) -> Option<FieldName> {
        self.fields.iter().copied().find(|field| !value(*field))
    }
}

const NAME: FormPage = FormPage::new(
    "Name",
    "Who are you?",
    &[FieldName::FirstName, FieldName::LastName, FieldName::Age],
);

const ADDRESS: FormPage = FormPage::new(
    "Address",
    "Where do you live?",
    &[FieldName::Street, FieldName::City],
);

const REGION: FormPage = FormPage::new("Address", "Region", &[FieldName::State, FieldName::Zip]);

const ACCOUNT: FormPage = FormPage::new("Account", "Sign-in email", &[FieldName::Email]);

const SECURITY: FormPage = FormPage::new("Account", "Choose a password", &[FieldName::Password]);

const VERIFY: FormPage = FormPage::new(
    "Verify",
    "Enter the code we sent you",
    &[FieldName::Code],
);

/// Steps of the account form: Name, Address (two pages), Account (two
/// pages), Verify.
pub fn account_steps() -> Result<StepTree<FormPage>, StepTreeError> {
    StepTree::new(vec![
        vec![NAME],
        vec![ADDRESS, REGION],
        vec![ACCOUNT, SECURITY],
        vec![VERIFY],
    ])
}
