//! monday.com GraphQL API client.
//!
//! Wraps the single `POST /v2` endpoint with typed errors and exposes the
//! item lookup used by the webhook handler.

pub mod api;
pub mod query;

pub use api::{MondayApi, MondayApiError, DEFAULT_API_URL, REQUEST_TIMEOUT};
