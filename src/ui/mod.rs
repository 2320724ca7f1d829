//! Server-rendered widgets.
//!
//! Markup is produced with plain `format!` templates and swapped into the
//! page by HTMX.
//!
//! - [`card`]: product card tiles
//! - [`popup`]: the lead-capture modal
//! - [`shell`]: page shell and landing page

pub mod card;
pub mod escape;
pub mod popup;
pub mod shell;

pub use card::{Card, render_card, render_card_grid};
pub use escape::html_escape;
pub use popup::{POPUP_ROOT_ID, PopupView, render_popup};
pub use shell::{html_shell, landing_content};
