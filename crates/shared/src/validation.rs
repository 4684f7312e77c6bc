//! Client-side field checks run before a create or update is submitted.
//! The record store itself accepts whatever it is given.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::domain::EmployeeDraft;

static EMAIL_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Name,
    Email,
    Role,
}

impl Field {
    pub fn label(self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::Email => "Email",
            Field::Role => "Role",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: Field,
    pub message: &'static str,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationErrors {
    pub errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn for_field(&self, field: Field) -> Option<&'static str> {
        self.errors
            .iter()
            .find(|error| error.field == field)
            .map(|error| error.message)
    }

    fn push(&mut self, field: Field, message: &'static str) {
        self.errors.push(FieldError { field, message });
    }
}

pub fn is_email_shaped(value: &str) -> bool {
    EMAIL_SHAPE.is_match(value.trim())
}

pub fn validate_draft(draft: &EmployeeDraft) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();

    if draft.name.trim().is_empty() {
        errors.push(Field::Name, "Name is required");
    }
    if draft.email.trim().is_empty() {
        errors.push(Field::Email, "Email is required");
    } else if !is_email_shaped(&draft.email) {
        errors.push(Field::Email, "Invalid email");
    }
    if draft.role.trim().is_empty() {
        errors.push(Field::Role, "Role is required");
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
