//! Lead-capture popup form.
//!
//! The popup collects a visitor's name, mobile number, address and an
//! optional email, and on a valid submit opens a messaging deep link
//! addressed to the shop.
//!
//! - [`form`]: raw field values and discrete change events
//! - [`validation`]: the field rules
//! - [`message`]: the text sent on submit
//! - [`machine`]: open/submit/close lifecycle of one instance
//! - [`store`]: instances mounted by the web server

pub mod form;
pub mod machine;
pub mod message;
pub mod store;
pub mod validation;

pub use form::{Field, FieldChange, FormState, UnknownField};
pub use machine::{Phase, PopupError, PopupForm, SubmitOutcome};
pub use message::compose_popup_message;
pub use store::PopupStore;
pub use validation::{FieldError, FieldErrors, PopupFormData, validate};
