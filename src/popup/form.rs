//! Raw popup field values and the events that change them.

use std::fmt;
use std::str::FromStr;

/// The four fields of the lead-capture popup, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    MobileNo,
    Email,
    Address,
}

impl Field {
    pub const ALL: [Field; 4] = [Field::Name, Field::MobileNo, Field::Email, Field::Address];

    /// Form control name used in HTML and request bodies.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::MobileNo => "mobile_no",
            Field::Email => "email",
            Field::Address => "address",
        }
    }

    /// Label shown next to the control.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Field::Name => "Name:",
            Field::MobileNo => "Mobile No:",
            Field::Email => "Email (optional):",
            Field::Address => "Address:",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Error for a control name that is not one of the popup fields.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown popup field: {0}")]
pub struct UnknownField(pub String);

impl FromStr for Field {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .into_iter()
            .find(|field| field.key() == s)
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}

/// A single edit made by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldChange {
    pub field: Field,
    pub value: String,
}

impl FieldChange {
    pub fn new(field: Field, value: impl Into<String>) -> Self {
        Self {
            field,
            value: value.into(),
        }
    }
}

/// Snapshot of the popup's raw inputs.
///
/// Never mutated in place: every [`FieldChange`] yields a new record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    name: String,
    mobile_no: String,
    email: String,
    address: String,
}

impl FormState {
    /// All fields blank.
    #[must_use]
    pub fn blank() -> Self {
        Self::default()
    }

    /// A new record with `change` applied.
    #[must_use]
    pub fn with_change(&self, change: FieldChange) -> Self {
        let mut next = self.clone();
        *next.slot(change.field) = change.value;
        next
    }

    /// Current value of `field`.
    #[must_use]
    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::MobileNo => &self.mobile_no,
            Field::Email => &self.email,
            Field::Address => &self.address,
        }
    }

    fn slot(&mut self, field: Field) -> &mut String {
        match field {
            Field::Name => &mut self.name,
            Field::MobileNo => &mut self.mobile_no,
            Field::Email => &mut self.email,
            Field::Address => &mut self.address,
        }
    }
}
