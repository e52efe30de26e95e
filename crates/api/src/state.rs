use std::sync::Arc;

use mondaysync_monday::MondayApi;

use crate::config::SyncConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
/// Nothing in it is mutated after startup.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: mondaysync_db::DbPool,
    /// Configuration snapshot loaded at startup.
    pub config: Arc<SyncConfig>,
    /// monday.com GraphQL client (shares one connection pool across requests).
    pub monday: MondayApi,
}
