//! Handler for monday.com change webhooks.
//!
//! Flow for one delivery, stopping at the first branch that applies:
//!
//! 1. registration handshake (`challenge`) is echoed before anything else
//! 2. signature check (401 on mismatch)
//! 3. board / trigger column / item id screening (200 with a `skipped` reason)
//! 4. fetch the item from monday.com (200 `item_not_found` if it is gone)
//! 5. map and insert one row
//!
//! Skips are successes so monday.com never retries an expected no-op.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use mondaysync_core::error::CoreError;
use mondaysync_core::{build_row, verify_signature_or_skip, FlexibleId, WebhookEvent, WebhookPayload};
use mondaysync_db::repositories::LoggedRowRepo;
use serde::Serialize;

use crate::config::SyncConfig;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Header carrying the hex HMAC-SHA256 of the raw body.
pub const SIGNATURE_HEADER: &str = "x-monday-signature";

/// Why a delivery was acknowledged without inserting anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    WrongBoard,
    NotTracked,
    NoItemId,
    ItemNotFound,
}

/// Body returned to monday.com.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum WebhookResponse {
    Challenge {
        challenge: String,
    },
    Skipped {
        ok: bool,
        skipped: SkipReason,
    },
    Inserted {
        ok: bool,
        inserted: bool,
        item_id: FlexibleId,
    },
}

impl WebhookResponse {
    pub fn skipped(reason: SkipReason) -> Self {
        Self::Skipped {
            ok: true,
            skipped: reason,
        }
    }

    pub fn inserted(item_id: FlexibleId) -> Self {
        Self::Inserted {
            ok: true,
            inserted: true,
            item_id,
        }
    }
}

/// Decide whether an event should be synced, returning the item id to fetch.
pub fn screen_event(config: &SyncConfig, event: &WebhookEvent) -> Result<i64, SkipReason> {
    if !event.is_for_board(config.board_id) {
        return Err(SkipReason::WrongBoard);
    }
    if !config.tracks_column(event.column().as_deref()) {
        return Err(SkipReason::NotTracked);
    }
    event.target_item_id().ok_or(SkipReason::NoItemId)
}

/// POST /webhooks/monday
pub async fn monday_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> AppResult<Json<WebhookResponse>> {
    let payload = WebhookPayload::from_slice(&body);

    if let Some(challenge) = payload.challenge {
        tracing::info!("Answering webhook registration challenge");
        return Ok(Json(WebhookResponse::Challenge { challenge }));
    }

    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok());
    if !verify_signature_or_skip(&body, signature, state.config.signing_secret.as_deref()) {
        tracing::warn!("Rejected webhook with invalid signature");
        return Err(AppError::Core(CoreError::Unauthorized(
            "Invalid signature".into(),
        )));
    }

    let event = payload.event;
    let item_id = match screen_event(&state.config, &event) {
        Ok(item_id) => item_id,
        Err(reason) => {
            tracing::debug!(
                ?reason,
                board_id = ?event.board_id,
                column_id = ?event.column_id,
                "Webhook skipped",
            );
            return Ok(Json(WebhookResponse::skipped(reason)));
        }
    };

    let Some(item) = state.monday.fetch_item(item_id).await? else {
        tracing::debug!(item_id, reason = ?SkipReason::ItemNotFound, "Webhook skipped");
        return Ok(Json(WebhookResponse::skipped(SkipReason::ItemNotFound)));
    };

    let row = build_row(&item, &state.config.column_mapping);
    LoggedRowRepo::insert(&state.pool, &state.config.target_table, &row).await?;

    tracing::info!(
        item_id = %item.id,
        table = %state.config.target_table,
        columns = row.len(),
        "Item snapshot inserted",
    );

    Ok(Json(WebhookResponse::inserted(item.id)))
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use serde_json::json;

    use super::*;

    fn config(board_id: i64, triggers: &[&str]) -> SyncConfig {
        let mut config = SyncConfig::from_lookup(|key| match key {
            "MONDAY_API_TOKEN" => Some("tok".into()),
            "BOARD_ID" => Some(board_id.to_string()),
            "DATABASE_URL" => Some("postgres://localhost/test".into()),
            _ => None,
        })
        .unwrap();
        config.trigger_column_ids = triggers.iter().map(|t| (*t).to_string()).collect();
        config
    }

    fn event(value: serde_json::Value) -> WebhookEvent {
        WebhookPayload::from_value(&json!({ "event": value })).event
    }

    #[test]
    fn matching_event_yields_item_id() {
        let ev = event(json!({"boardId": "123", "columnId": "X", "itemId": 55}));
        assert_eq!(screen_event(&config(123, &["X"]), &ev), Ok(55));
    }

    #[test]
    fn wrong_board_is_skipped_first() {
        let ev = event(json!({"boardId": "123", "columnId": "nope"}));
        assert_eq!(screen_event(&config(999, &["X"]), &ev), Err(SkipReason::WrongBoard));
    }

    #[test]
    fn missing_board_is_wrong_board() {
        let ev = event(json!({"columnId": "X", "itemId": 1}));
        assert_eq!(screen_event(&config(123, &["X"]), &ev), Err(SkipReason::WrongBoard));
    }

    #[test]
    fn untracked_column_is_skipped() {
        let ev = event(json!({"boardId": 123, "columnId": "X", "itemId": 55}));
        assert_eq!(screen_event(&config(123, &["Y"]), &ev), Err(SkipReason::NotTracked));
    }

    #[test]
    fn empty_trigger_set_tracks_all_columns() {
        let ev = event(json!({"boardId": 123, "columnId": "anything", "pulseId": 9}));
        let mut cfg = config(123, &[]);
        cfg.trigger_column_ids = BTreeSet::new();
        assert_eq!(screen_event(&cfg, &ev), Ok(9));
    }

    #[test]
    fn missing_item_id_is_skipped() {
        let ev = event(json!({"boardId": 123, "columnId": "X", "itemId": 0}));
        assert_eq!(screen_event(&config(123, &["X"]), &ev), Err(SkipReason::NoItemId));
    }

    #[test]
    fn response_bodies_serialize_as_expected() {
        assert_eq!(
            serde_json::to_value(WebhookResponse::skipped(SkipReason::ItemNotFound)).unwrap(),
            json!({"ok": true, "skipped": "item_not_found"})
        );
        assert_eq!(
            serde_json::to_value(WebhookResponse::inserted(FlexibleId::Int(55))).unwrap(),
            json!({"ok": true, "inserted": true, "item_id": 55})
        );
        assert_eq!(
            serde_json::to_value(WebhookResponse::Challenge {
                challenge: "abc".into()
            })
            .unwrap(),
            json!({"challenge": "abc"})
        );
    }
}
