//! Bedwood storefront widgets
//!
//! Server-rendered widgets for a furniture shop's marketing site: product
//! cards, a lead-capture popup and a cart summary that opens the shop's
//! messaging app pre-filled with the order.
//!
//! # Architecture
//!
//! - **Server**: Axum serving HTML pages and HTMX fragments
//! - **Widgets**: pure rendering and message-building functions
//! - **Navigation**: deep links are handed to an injected [`navigation::Navigator`]
//!
//! # Modules
//!
//! - [`cart`]: cart summary and its deep link
//! - [`config`]: layered configuration (defaults, file, env, CLI)
//! - [`deeplink`]: messaging deep link encoding
//! - [`money`]: catalog prices
//! - [`navigation`]: opening links in a new browsing context
//! - [`popup`]: the lead-capture popup form
//! - [`server`]: routes and handlers
//! - [`ui`]: HTML rendering

// Allow pedantic clippy warnings that don't add value for this codebase
#![allow(clippy::missing_fields_in_debug)]
#![allow(clippy::cargo_common_metadata)]
#![allow(clippy::multiple_crate_versions)]
#![allow(clippy::unused_async)]

pub mod cart;
pub mod config;
pub mod deeplink;
pub mod money;
pub mod navigation;
pub mod popup;
pub mod server;
pub mod ui;

use crate::config::AppConfig;
use crate::deeplink::DeepLinkTarget;
use crate::popup::PopupStore;
use crate::ui::PopupView;

use std::sync::Arc;

/// Application state shared across all handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Loaded configuration.
    pub config: Arc<AppConfig>,
    /// Mounted popup instances.
    pub popups: PopupStore,
    /// Where popup leads are sent.
    pub popup_target: Arc<DeepLinkTarget>,
    /// Where cart summaries are sent.
    pub cart_target: Arc<DeepLinkTarget>,
}

impl AppState {
    /// Build state from configuration, resolving both deep link targets.
    pub fn new(config: Arc<AppConfig>) -> Result<Self, ::config::ConfigError> {
        let popup_target = Arc::new(config.popup_target()?);
        let cart_target = Arc::new(config.cart_target()?);

        Ok(Self {
            config,
            popups: PopupStore::new(),
            popup_target,
            cart_target,
        })
    }

    /// Static popup content from configuration.
    #[must_use]
    pub fn popup_view(&self) -> PopupView<'_> {
        PopupView {
            heading: &self.config.popup.heading,
            image_path: &self.config.popup.image_path,
        }
    }
}
