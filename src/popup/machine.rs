//! Lifecycle of one popup instance.
//!
//! ```text
//! closed --open--> open --submit (invalid)--> open + field errors
//!                   |
//!                   +--submit (valid)--> submitted --close--> closed
//! any state --close--> closed
//! ```

use thiserror::Error;

use super::form::{FieldChange, FormState};
use super::message::compose_popup_message;
use super::validation::{FieldErrors, validate};
use crate::deeplink::DeepLinkTarget;
use crate::navigation::Navigator;

/// Where the popup is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Closed,
    Open,
    Submitted,
}

/// Operations attempted in a phase that does not allow them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PopupError {
    #[error("Popup is not open (currently {0:?})")]
    NotOpen(Phase),
}

/// Result of a submit attempt on an open popup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation failed; the popup stays open showing these errors.
    Rejected(FieldErrors),
    /// The deep link was handed to the navigator.
    Sent { url: String },
}

/// One mounted lead-capture popup.
#[derive(Debug, Clone)]
pub struct PopupForm {
    phase: Phase,
    values: FormState,
    errors: FieldErrors,
}

impl Default for PopupForm {
    fn default() -> Self {
        Self::closed()
    }
}

impl PopupForm {
    #[must_use]
    pub fn closed() -> Self {
        Self {
            phase: Phase::Closed,
            values: FormState::blank(),
            errors: FieldErrors::default(),
        }
    }

    /// A popup already showing, all fields blank.
    #[must_use]
    pub fn opened() -> Self {
        let mut form = Self::closed();
        form.open();
        form
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn values(&self) -> &FormState {
        &self.values
    }

    /// Errors from the last rejected submit.
    #[must_use]
    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Show the modal with blank fields.
    pub fn open(&mut self) {
        self.phase = Phase::Open;
        self.values = FormState::blank();
        self.errors = FieldErrors::default();
    }

    /// Record an edit.
    ///
    /// # Errors
    ///
    /// Returns [`PopupError::NotOpen`] unless the popup is open.
    pub fn apply(&mut self, change: FieldChange) -> Result<(), PopupError> {
        self.ensure_open()?;
        self.values = self.values.with_change(change);
        Ok(())
    }

    /// Validate and, if valid, open the deep link and call `on_close`.
    ///
    /// A rejected submit neither navigates nor calls `on_close`.
    ///
    /// # Errors
    ///
    /// Returns [`PopupError::NotOpen`] unless the popup is open.
    pub fn submit<N, F>(
        &mut self,
        target: &DeepLinkTarget,
        navigator: &N,
        on_close: F,
    ) -> Result<SubmitOutcome, PopupError>
    where
        N: Navigator + ?Sized,
        F: FnOnce(),
    {
        self.ensure_open()?;

        match validate(&self.values) {
            Err(errors) => {
                self.errors = errors.clone();
                Ok(SubmitOutcome::Rejected(errors))
            }
            Ok(data) => {
                let url = target.link(&compose_popup_message(&data));
                navigator.open_in_new_context(&url);
                self.errors = FieldErrors::default();
                self.phase = Phase::Submitted;
                on_close();
                Ok(SubmitOutcome::Sent { url })
            }
        }
    }

    /// Dismiss the popup from any phase, discarding its values.
    pub fn close(&mut self) {
        *self = Self::closed();
    }

    fn ensure_open(&self) -> Result<(), PopupError> {
        if self.phase == Phase::Open {
            Ok(())
        } else {
            Err(PopupError::NotOpen(self.phase))
        }
    }
}
