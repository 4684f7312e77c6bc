//! Form and delete-confirmation modal state.

use client_core::Operation;
use shared::{
    domain::{Employee, EmployeeDraft, EmployeeId, EmployeePatch},
    validation::{validate_draft, Field, ValidationErrors},
};

use crate::backend_bridge::commands::BackendCommand;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(EmployeeId),
    View,
}

impl FormMode {
    pub fn title(&self) -> &'static str {
        match self {
            FormMode::Create => "Add Employee",
            FormMode::Edit(_) => "Edit Employee",
            FormMode::View => "Employee Details",
        }
    }

    pub fn read_only(&self) -> bool {
        matches!(self, FormMode::View)
    }
}

#[derive(Debug, Clone)]
pub struct FormState {
    pub mode: FormMode,
    pub draft: EmployeeDraft,
    pub errors: ValidationErrors,
    /// Set while the submitted create/update is in flight.
    pub submitting: bool,
}

impl FormState {
    pub fn create() -> Self {
        Self::with(FormMode::Create, EmployeeDraft::default())
    }

    pub fn edit(employee: &Employee) -> Self {
        Self::with(FormMode::Edit(employee.id.clone()), employee.to_draft())
    }

    pub fn view(employee: &Employee) -> Self {
        Self::with(FormMode::View, employee.to_draft())
    }

    fn with(mode: FormMode, draft: EmployeeDraft) -> Self {
        Self {
            mode,
            draft,
            errors: ValidationErrors::default(),
            submitting: false,
        }
    }

    pub fn error_for(&self, field: Field) -> Option<&'static str> {
        self.errors.for_field(field)
    }

    /// Whether a settled `operation` is the one this form is waiting on.
    /// Updates must also name this form's record when `record` is known.
    pub fn awaits(&self, operation: Operation, record: Option<&EmployeeId>) -> bool {
        if !self.submitting {
            return false;
        }
        match (&self.mode, operation) {
            (FormMode::Create, Operation::Add) => true,
            (FormMode::Edit(id), Operation::Update) => record.map_or(true, |record| record == id),
            _ => false,
        }
    }

    /// Validates the fields and builds the command to send. Returns `None`
    /// for view-only forms, forms already in flight, or invalid input (the
    /// errors are kept on the form).
    pub fn submit(&mut self) -> Option<BackendCommand> {
        if self.mode.read_only() || self.submitting {
            return None;
        }
        if let Err(errors) = validate_draft(&self.draft) {
            self.errors = errors;
            return None;
        }
        self.errors = ValidationErrors::default();
        self.submitting = true;

        let draft = EmployeeDraft::new(
            self.draft.name.trim(),
            self.draft.email.trim(),
            self.draft.role.trim(),
        );
        Some(match &self.mode {
            FormMode::Edit(id) => BackendCommand::Update {
                id: id.clone(),
                patch: EmployeePatch::from(draft),
            },
            _ => BackendCommand::Create { draft },
        })
    }
}

#[derive(Debug, Clone, Default)]
pub enum Modal {
    #[default]
    None,
    Form(FormState),
    ConfirmDelete { id: EmployeeId, name: String },
}

impl Modal {
    pub fn is_open(&self) -> bool {
        !matches!(self, Modal::None)
    }

    pub fn form_mut(&mut self) -> Option<&mut FormState> {
        match self {
            Modal::Form(form) => Some(form),
            _ => None,
        }
    }

    pub fn close(&mut self) {
        *self = Modal::None;
    }
}
