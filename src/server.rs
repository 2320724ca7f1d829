use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, Form, Path, Request, State},
    http::{HeaderName, StatusCode},
    middleware::Next,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use tracing::info;

use crate::AppState;
use crate::cart::{CartItem, ContactInfo, build_message};
use crate::config::AppConfig;
use crate::navigation::PendingNavigation;
use crate::popup::{Field, FieldChange, PopupError, PopupStore, SubmitOutcome};
use crate::ui::{html_shell, landing_content, render_popup};

/// Header HTMX reads client-side events from.
const HX_TRIGGER: HeaderName = HeaderName::from_static("hx-trigger");

type ApiError = (StatusCode, String);

/// Start the Axum server with the provided configuration.
pub async fn start_server(config: Arc<AppConfig>) -> anyhow::Result<()> {
    let state = AppState::new(Arc::clone(&config))?;

    spawn_popup_pruner(
        state.popups.clone(),
        Duration::from_secs(config.popup.prune_interval_secs.max(1)),
        Duration::from_secs(config.popup.idle_timeout_secs),
    );

    let app = build_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!(
        name: "server.started",
        address = %addr,
        "Server started"
    );

    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}

/// Build the application router.
pub fn build_router(state: AppState) -> Router {
    let resilience = &state.config.resilience;

    // A disabled timeout is a very long one, so the layer stack keeps one type.
    let timeout_duration = if resilience.timeout_disabled {
        Duration::from_secs(365 * 24 * 60 * 60) // 1 year
    } else {
        Duration::from_secs(resilience.timeout_secs)
    };

    Router::new()
        // HTML pages and fragments
        .route("/", get(index_handler))
        .route("/popup", post(open_popup))
        .route("/popup/{id}/field", post(popup_field))
        .route("/popup/{id}/submit", post(submit_popup))
        .route("/popup/{id}/close", post(close_popup))
        // Checkout integration
        .route("/api/cart/whatsapp", post(api_cart_link))
        // Static assets
        .nest_service("/static", ServeDir::new(&state.config.server.static_dir))
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(resilience.body_limit_bytes))
        .layer(axum::middleware::from_fn(
            move |req: Request, next: Next| async move {
                match tokio::time::timeout(timeout_duration, next.run(req)).await {
                    Ok(res) => res,
                    Err(_) => (StatusCode::REQUEST_TIMEOUT, "Request timed out").into_response(),
                }
            },
        ))
        .with_state(state)
}

/// Periodically drop popups nobody has touched for `max_idle`.
pub fn spawn_popup_pruner(popups: PopupStore, every: Duration, max_idle: Duration) {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        loop {
            ticker.tick().await;
            let pruned = popups.prune_idle(chrono::Utc::now(), max_idle);
            if pruned > 0 {
                info!(name: "popup.pruned", count = pruned, remaining = popups.len(), "Idle popups dropped");
            }
        }
    });
}

// ─────────────────────────────────────────────────────────────────────────────
// HTML Page Handlers
// ─────────────────────────────────────────────────────────────────────────────

/// GET / - Landing page with product cards.
async fn index_handler(State(state): State<AppState>) -> impl IntoResponse {
    let content = landing_content(&state.config.cards);
    Html(html_shell(&state.config.server.site_name, "Home", &content))
}

// ─────────────────────────────────────────────────────────────────────────────
// Popup Handlers
// ─────────────────────────────────────────────────────────────────────────────

/// Turn posted `field=value` pairs into change events.
fn parse_changes(fields: HashMap<String, String>) -> Result<Vec<FieldChange>, ApiError> {
    fields
        .into_iter()
        .map(|(key, value)| {
            key.parse::<Field>()
                .map(|field| FieldChange::new(field, value))
                .map_err(|e| (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()))
        })
        .collect()
}

fn popup_not_found(id: &str) -> ApiError {
    tracing::debug!(popup_id = %id, "Popup not found");
    (StatusCode::NOT_FOUND, format!("Popup {id} not found"))
}

fn popup_conflict(e: &PopupError) -> ApiError {
    (StatusCode::CONFLICT, e.to_string())
}

/// POST /popup - Mount a blank popup and return its modal.
async fn open_popup(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    let id = state.popups.open();
    let view = state.popup_view();

    info!(name: "popup.opened", popup_id = %id, open = state.popups.len(), "Popup opened");

    state
        .popups
        .update(&id, |form| Html(render_popup(&id, form, &view)))
        .ok_or_else(|| popup_not_found(&id))
}

/// POST /popup/{id}/field - Apply edits posted by a control.
async fn popup_field(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(fields): Form<HashMap<String, String>>,
) -> Result<StatusCode, ApiError> {
    let changes = parse_changes(fields)?;
    let count = changes.len();

    state
        .popups
        .update(&id, |form| {
            changes
                .into_iter()
                .try_for_each(|change| form.apply(change))
        })
        .ok_or_else(|| popup_not_found(&id))?
        .map_err(|e| popup_conflict(&e))?;

    tracing::debug!(popup_id = %id, changes = count, "Popup fields updated");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /popup/{id}/submit - Validate and hand the deep link to the browser.
///
/// Values posted with the submit are applied first, so a field still focused
/// when the visitor clicks Submit is not lost.
async fn submit_popup(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(fields): Form<HashMap<String, String>>,
) -> Result<Response, ApiError> {
    let changes = parse_changes(fields)?;
    let navigation = PendingNavigation::default();
    let view = state.popup_view();
    let target = Arc::clone(&state.popup_target);

    let (outcome, close_requested, html) = state
        .popups
        .update(&id, |form| {
            for change in changes {
                form.apply(change)?;
            }
            let mut close_requested = false;
            let outcome = form.submit(&target, &navigation, || close_requested = true)?;
            let html = match outcome {
                SubmitOutcome::Rejected(_) => render_popup(&id, form, &view),
                SubmitOutcome::Sent { .. } => String::new(),
            };
            Ok::<_, PopupError>((outcome, close_requested, html))
        })
        .ok_or_else(|| popup_not_found(&id))?
        .map_err(|e| popup_conflict(&e))?;

    match outcome {
        SubmitOutcome::Rejected(errors) => {
            info!(
                name: "popup.rejected",
                popup_id = %id,
                errors = errors.len(),
                "Popup submission rejected"
            );
            Ok(Html(html).into_response())
        }
        SubmitOutcome::Sent { url } => {
            if close_requested {
                state.popups.remove(&id);
            }
            info!(
                name: "popup.submitted",
                popup_id = %id,
                recipient = %target.recipient(),
                url_length = url.len(),
                "Popup submitted"
            );

            let mut response = Html(html).into_response();
            if let Some(trigger) = navigation.hx_trigger() {
                response.headers_mut().insert(HX_TRIGGER, trigger);
            }
            Ok(response)
        }
    }
}

/// POST /popup/{id}/close - Discard the popup. Closing twice is harmless.
async fn close_popup(State(state): State<AppState>, Path(id): Path<String>) -> Html<String> {
    let existed = state.popups.remove(&id);
    info!(name: "popup.closed", popup_id = %id, existed, "Popup closed");
    Html(String::new())
}

// ─────────────────────────────────────────────────────────────────────────────
// API Handlers
// ─────────────────────────────────────────────────────────────────────────────

/// Request body for the cart link API.
#[derive(Debug, Deserialize)]
struct CartLinkRequest {
    /// Items in the cart, in display order.
    #[serde(default)]
    items: Vec<CartItem>,
    /// Customer details collected at checkout.
    contact: ContactInfo,
}

/// Response from the cart link API.
#[derive(Debug, Serialize)]
struct CartLinkResponse {
    /// Deep link opening a chat pre-filled with the cart summary.
    url: String,
}

/// POST /api/cart/whatsapp - Build the cart summary deep link.
async fn api_cart_link(
    State(state): State<AppState>,
    Json(req): Json<CartLinkRequest>,
) -> Result<Json<CartLinkResponse>, ApiError> {
    let url = build_message(&req.items, &req.contact, &state.cart_target).map_err(|e| {
        tracing::warn!(error = %e, "Cart link rejected");
        (StatusCode::UNPROCESSABLE_ENTITY, e.to_string())
    })?;

    Ok(Json(CartLinkResponse { url }))
}
