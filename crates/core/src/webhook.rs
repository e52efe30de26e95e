//! Inbound webhook payloads sent by monday.com.
//!
//! Parsing never fails: a body that is not JSON, or not a JSON object, is
//! treated as an empty payload so the handler can answer with a skip reason
//! instead of an error.

use serde::Deserialize;

use crate::types::{lenient_id, FlexibleId};

/// Top-level webhook body.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WebhookPayload {
    /// Registration handshake token. Only non-empty strings are kept.
    pub challenge: Option<String>,
    /// The change notification. Missing or malformed events become the default.
    pub event: WebhookEvent,
}

/// The `event` object of a change notification.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookEvent {
    #[serde(default, deserialize_with = "lenient_id")]
    pub board_id: Option<FlexibleId>,
    #[serde(default, deserialize_with = "lenient_id")]
    pub column_id: Option<FlexibleId>,
    #[serde(default, deserialize_with = "lenient_id")]
    pub item_id: Option<FlexibleId>,
    #[serde(default, deserialize_with = "lenient_id")]
    pub pulse_id: Option<FlexibleId>,
}

impl WebhookPayload {
    /// Parse a raw request body.
    pub fn from_slice(raw: &[u8]) -> Self {
        match serde_json::from_slice::<serde_json::Value>(raw) {
            Ok(value) => Self::from_value(&value),
            Err(_) => Self::default(),
        }
    }

    /// Build from an already-parsed JSON value.
    pub fn from_value(value: &serde_json::Value) -> Self {
        let Some(object) = value.as_object() else {
            return Self::default();
        };

        let challenge = object
            .get("challenge")
            .and_then(serde_json::Value::as_str)
            .filter(|c| !c.is_empty())
            .map(str::to_owned);

        let event = object
            .get("event")
            .filter(|e| e.is_object())
            .and_then(|e| WebhookEvent::deserialize(e).ok())
            .unwrap_or_default();

        Self { challenge, event }
    }
}

impl WebhookEvent {
    /// True when the event's board id, rendered as a string, equals `board_id`.
    pub fn is_for_board(&self, board_id: i64) -> bool {
        self.board_id
            .as_ref()
            .is_some_and(|id| id.to_string() == board_id.to_string())
    }

    /// The changed column id as a string, if any.
    pub fn column(&self) -> Option<String> {
        self.column_id.as_ref().map(ToString::to_string)
    }

    /// The item to fetch: `itemId`, falling back to `pulseId`.
    ///
    /// Zero, empty and non-integer ids are all treated as missing.
    pub fn target_item_id(&self) -> Option<i64> {
        [&self.item_id, &self.pulse_id]
            .into_iter()
            .flatten()
            .find(|id| id.is_present())
            .and_then(FlexibleId::as_i64)
    }
}
