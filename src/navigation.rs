//! Opening URLs in a new browsing context.
//!
//! Widgets never touch the browser directly; they ask a [`Navigator`] to open
//! a link and move on. Nothing reports whether the link actually opened.

use std::sync::{Mutex, PoisonError};

use axum::http::HeaderValue;
use serde_json::json;

/// HTMX event the page shell listens for to call `window.open`.
pub const OPEN_DEEP_LINK_EVENT: &str = "open-deep-link";

/// Capability to open a URL in a new browsing context (fire-and-forget).
pub trait Navigator {
    fn open_in_new_context(&self, url: &str);
}

/// Navigator used by HTTP handlers: remembers the requested URL so the
/// response can carry it to the browser as an `HX-Trigger` event.
#[derive(Debug, Default)]
pub struct PendingNavigation {
    url: Mutex<Option<String>>,
}

impl PendingNavigation {
    /// The URL requested so far, if any.
    #[must_use]
    pub fn requested(&self) -> Option<String> {
        self.url
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// `HX-Trigger` header value asking the shell to open the requested URL.
    ///
    /// Returns `None` when nothing was requested.
    #[must_use]
    pub fn hx_trigger(&self) -> Option<HeaderValue> {
        let url = self.requested()?;
        let payload = json!({ OPEN_DEEP_LINK_EVENT: { "url": url } });
        match HeaderValue::from_str(&payload.to_string()) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(error = %e, "Deep link is not a valid header value");
                None
            }
        }
    }
}

impl Navigator for PendingNavigation {
    fn open_in_new_context(&self, url: &str) {
        *self.url.lock().unwrap_or_else(PoisonError::into_inner) = Some(url.to_string());
    }
}
