//! Domain types and pure logic for the monday.com to PostgreSQL sync bridge.
//!
//! Nothing in this crate performs I/O: webhook payload parsing, signature
//! verification and the item-to-row mapping all live here so they can be
//! tested without a server, a database or the monday.com API.

pub mod error;
pub mod item;
pub mod mapping;
pub mod signature;
pub mod types;
pub mod webhook;

pub use item::{BoardItem, ColumnValue, ItemsData};
pub use mapping::{build_row, ColumnMapping, Row};
pub use signature::verify_signature_or_skip;
pub use types::FlexibleId;
pub use webhook::{WebhookEvent, WebhookPayload};
