//! Route definitions for inbound provider webhooks.

use axum::routing::post;
use axum::Router;

use crate::handlers::webhooks;
use crate::state::AppState;

/// Webhook routes mounted at `/webhooks`.
///
/// ```text
/// POST   /monday            -> monday_webhook
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/monday", post(webhooks::monday_webhook))
}
