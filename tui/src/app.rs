//! The account form application: one form session plus editor state.

use tracing::{debug, info, warn};

use stepwise_core::{FormHandle, FormStore, MountGuard, Scope, SessionError, SubmitOutcome};
use stepwise_types::{
    BoundsPolicy, FieldName, FieldPatch, FormFields, Position, StepTree, StepTreeError, UiOptions,
};

use crate::draft::FieldDraft;
use crate::editor::FieldEditor;
use crate::pages::{FormPage, account_steps};

/// One-line message shown in the footer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Info(String),
    Error(String),
}

/// State of the running form. The session scope owns the store; everything
/// else here is presentation state.
pub struct WizardApp {
    session: Scope<'static, FormPage>,
    editor: FieldEditor,
    mount: Option<MountGuard>,
    status: Option<Status>,
    ui: UiOptions,
    quit: bool,
    submitted: Option<FormFields>,
}

impl WizardApp {
    pub fn new(bounds: BoundsPolicy, ui: UiOptions) -> Result<Self, StepTreeError> {
        Ok(Self::with_steps(account_steps()?, bounds, ui))
    }

    #[must_use]
    pub fn with_steps(steps: StepTree<FormPage>, bounds: BoundsPolicy, ui: UiOptions) -> Self {
        let mut app = Self {
            session: Scope::session(FormStore::with_bounds(steps, bounds)),
            editor: FieldEditor::default(),
            mount: None,
            status: None,
            ui,
            quit: false,
            submitted: None,
        };
        app.prepare_frame();
        app
    }

    /// Root of the consumer tree. Renderers hang their own child scopes off it.
    #[must_use]
    pub fn scope(&self) -> &Scope<'static, FormPage> {
        &self.session
    }

    fn form(&self) -> Result<FormHandle<'_, FormPage>, SessionError> {
        self.session.use_form()
    }

    #[must_use]
    pub fn ui_options(&self) -> UiOptions {
        self.ui
    }

    #[must_use]
    pub fn status(&self) -> Option<&Status> {
        self.status.as_ref()
    }

    pub fn clear_status(&mut self) {
        self.status = None;
    }

    #[must_use]
    pub fn focused_field(&self) -> Option<FieldName> {
        self.editor.focused()
    }

    #[must_use]
    pub fn draft(&self) -> &FieldDraft {
        self.editor.draft()
    }

    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn request_quit(&mut self) {
        self.quit = true;
    }

    /// The collected fields, once the last page was submitted.
    pub fn take_submission(&mut self) -> Option<FormFields> {
        self.submitted.take()
    }

    /// Bring the editor and the mounted submit hook in line with the current
    /// position. Called before every draw and after every navigation.
    pub fn prepare_frame(&mut self) {
        let synced = self.form().and_then(|form| {
            let values = form.form_data()?;
            form.with_state(|state| {
                state
                    .current_unit()
                    .map(|page| (state.position(), *page, values))
            })
        });
        match synced {
            Ok(Some((position, page, values))) => {
                self.editor.sync(position, &page, &values);
                self.mount_hook(page, values);
            }
            Ok(None) => {
                self.editor.invalidate();
                self.mount = None;
            }
            Err(err) => self.report(&err),
        }
    }

    /// Mount the required-fields check of `page` against `values`.
    fn mount_hook(&mut self, page: FormPage, values: FormFields) {
        let form_ref = match self.form().and_then(|form| form.form_ref()) {
            Ok(form_ref) => form_ref,
            Err(err) => {
                self.report(&err);
                return;
            }
        };
        self.mount = Some(form_ref.attach(move || {
            match page.first_missing(|field| !values.get(field).trim().is_empty()) {
                Some(field) => SubmitOutcome::Rejected(format!("{} is required", field.label())),
                None => SubmitOutcome::Accepted,
            }
        }));
    }

    /// Run the page's submit hook; on success advance, or finish on the last
    /// step.
    pub fn submit(&mut self) {
        // Remount so the hook sees the latest values.
        self.prepare_frame();

        let outcome = self
            .form()
            .and_then(|form| form.form_ref())
            .map(|form_ref| form_ref.request_submit());
        let outcome = match outcome {
            Ok(Ok(outcome)) => outcome,
            Ok(Err(err)) => {
                warn!("submit without a mounted page: {err}");
                self.status = Some(Status::Error(err.to_string()));
                return;
            }
            Err(err) => {
                self.report(&err);
                return;
            }
        };

        match outcome {
            SubmitOutcome::Accepted => self.advance(),
            SubmitOutcome::Rejected(reason) => {
                debug!(%reason, "page submit rejected");
                self.focus_first_missing();
                self.status = Some(Status::Error(reason));
            }
        }
    }

    fn advance(&mut self) {
        let result = self.form().and_then(|form| {
            if form.is_last_step()? {
                return form.form_data().map(Some);
            }
            form.next()?;
            Ok(None)
        });
        match result {
            Ok(Some(fields)) => {
                info!("account form submitted");
                self.submitted = Some(fields);
                self.quit = true;
            }
            Ok(None) => {
                self.status = None;
                self.prepare_frame();
            }
            Err(err) => self.report(&err),
        }
    }

    fn focus_first_missing(&mut self) {
        let missing = self.form().and_then(|form| {
            let values = form.form_data()?;
            let field = form.with_current_unit(|page| {
                page.and_then(|page| page.first_missing(|f| !values.get(f).trim().is_empty()))
            })?;
            Ok(field.map(|field| (field, values)))
        });
        match missing {
            Ok(Some((field, values))) => {
                self.editor.focus_field(field, &values);
            }
            Ok(None) => {}
            Err(err) => self.report(&err),
        }
    }

    /// Go back one step. Does nothing on the first step.
    pub fn back(&mut self) {
        let result = self.form().and_then(|form| {
            if form.is_first_step()? {
                return Ok(false);
            }
            form.back()?;
            Ok(true)
        });
        match result {
            Ok(true) => {
                self.status = None;
                self.prepare_frame();
            }
            Ok(false) => {
                self.status = Some(Status::Info("Already on the first step".into()));
            }
            Err(err) => self.report(&err),
        }
    }

    /// Jump to the start of `step`. Steps outside the form are ignored.
    pub fn jump(&mut self, step: usize) {
        let result = self.form().and_then(|form| {
            if step >= form.snapshot()?.step_count {
                return Ok(None);
            }
            let Ok(target) = isize::try_from(step) else {
                return Ok(None);
            };
            form.go_to(target).map(Some)
        });
        match result {
            Ok(Some(position)) => {
                debug!(%position, "jumped to step");
                self.status = None;
                self.prepare_frame();
            }
            Ok(None) => {}
            Err(err) => self.report(&err),
        }
    }

    pub fn focus_next(&mut self) {
        if let Ok(values) = self.form().and_then(|form| form.form_data()) {
            self.editor.focus_next(&values);
        }
    }

    pub fn focus_prev(&mut self) {
        if let Ok(values) = self.form().and_then(|form| form.form_data()) {
            self.editor.focus_prev(&values);
        }
    }

    /// Apply `edit` to the focused field's draft and store the result.
    pub fn edit(&mut self, edit: impl FnOnce(&mut FieldDraft)) {
        let Some(field) = self.editor.focused() else {
            return;
        };
        let before = self.editor.draft().text().to_owned();
        edit(self.editor.draft_mut());
        let text = self.editor.draft().text();
        if text == before {
            return;
        }
        let patch = FieldPatch::one(field, text);
        if let Err(err) = self.form().and_then(|form| form.update_form_data(patch)) {
            self.report(&err);
            return;
        }
        if matches!(self.status, Some(Status::Error(_))) {
            self.status = None;
        }
    }

    /// Current position, for callers outside the render path.
    pub fn position(&self) -> Result<Position, SessionError> {
        self.form()?.position()
    }

    pub fn form_data(&self) -> Result<FormFields, SessionError> {
        self.form()?.form_data()
    }

    fn report(&mut self, err: &SessionError) {
        warn!("form session error: {err}");
        self.status = Some(Status::Error(err.to_string()));
    }
}
