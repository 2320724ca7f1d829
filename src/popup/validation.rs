//! Validation rules for the popup form.
//!
//! Name, mobile number and address are required; email is optional but must
//! look like an address when given. Values are checked trimmed, so a field
//! holding only spaces counts as empty.

use std::sync::LazyLock;

use regex::Regex;

use super::form::{Field, FormState};

/// WHATWG `input[type=email]` pattern.
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
    )
    .expect("email pattern compiles")
});

/// Popup values that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopupFormData {
    pub name: String,
    pub mobile_no: String,
    pub address: String,
    pub email: Option<String>,
}

/// A rule violation on one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: Field,
    pub message: &'static str,
}

/// Violations found in one validation pass, at most one per field, in
/// field display order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Message for `field`, if it failed.
    #[must_use]
    pub fn for_field(&self, field: Field) -> Option<&'static str> {
        self.0.iter().find(|e| e.field == field).map(|e| e.message)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }
}

/// Whether `email` is syntactically an email address.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

fn required(state: &FormState, field: Field, message: &'static str) -> Result<String, FieldError> {
    let value = state.value(field).trim();
    if value.is_empty() {
        Err(FieldError { field, message })
    } else {
        Ok(value.to_string())
    }
}

fn optional_email(state: &FormState) -> Result<Option<String>, FieldError> {
    let value = state.value(Field::Email).trim();
    if value.is_empty() {
        Ok(None)
    } else if is_valid_email(value) {
        Ok(Some(value.to_string()))
    } else {
        Err(FieldError {
            field: Field::Email,
            message: "Invalid email format",
        })
    }
}

/// Check every rule against `state`.
///
/// # Errors
///
/// Returns all violations at once when any rule fails.
pub fn validate(state: &FormState) -> Result<PopupFormData, FieldErrors> {
    let name = required(state, Field::Name, "Name is required");
    let mobile_no = required(state, Field::MobileNo, "Mobile number is required");
    let email = optional_email(state);
    let address = required(state, Field::Address, "Address is required");

    match (name, mobile_no, email, address) {
        (Ok(name), Ok(mobile_no), Ok(email), Ok(address)) => Ok(PopupFormData {
            name,
            mobile_no,
            address,
            email,
        }),
        (name, mobile_no, email, address) => Err(FieldErrors(
            [name.err(), mobile_no.err(), email.err(), address.err()]
                .into_iter()
                .flatten()
                .collect(),
        )),
    }
}
