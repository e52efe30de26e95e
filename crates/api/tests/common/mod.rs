#![allow(dead_code)]

use std::collections::BTreeSet;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use mondaysync_api::config::SyncConfig;
use mondaysync_api::router::build_app_router;
use mondaysync_api::state::AppState;
use mondaysync_monday::MondayApi;
use sqlx::PgPool;
use tower::ServiceExt;

pub const BOARD_ID: i64 = 123;
pub const TRIGGER_COLUMN: &str = "X";

/// Build a test `SyncConfig`: board 123, trigger column `X`, no signing
/// secret, default column mapping and table, GraphQL calls sent to `monday_url`.
pub fn test_config(monday_url: &str) -> SyncConfig {
    let mut config = SyncConfig::from_lookup(|key| match key {
        "MONDAY_API_TOKEN" => Some("test-token".into()),
        "BOARD_ID" => Some(BOARD_ID.to_string()),
        "DATABASE_URL" => Some("postgres://unused".into()),
        "HOST" => Some("127.0.0.1".into()),
        "PORT" => Some("0".into()),
        _ => None,
    })
    .expect("test config must be valid");
    config.monday_api_url = monday_url.to_string();
    config.trigger_column_ids = BTreeSet::from([TRIGGER_COLUMN.to_string()]);
    config
}

/// Build the full application router around `pool` and `config`.
pub fn build_test_app_with(pool: PgPool, config: SyncConfig) -> Router {
    let monday = MondayApi::new(&config.monday_api_token, config.monday_api_url.clone())
        .expect("test client must build");
    let state = AppState {
        pool,
        config: Arc::new(config),
        monday,
    };
    build_app_router(state)
}

/// Build the full application router with [`test_config`].
pub fn build_test_app(pool: PgPool, monday_url: &str) -> Router {
    build_test_app_with(pool, test_config(monday_url))
}

/// Issue a GET request.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// POST a raw body to the monday.com webhook endpoint, optionally signed.
pub async fn post_webhook(app: Router, body: &str, signature: Option<&str>) -> Response<Body> {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri("/webhooks/monday")
        .header("content-type", "application/json");
    if let Some(signature) = signature {
        builder = builder.header("x-monday-signature", signature);
    }
    let request = builder.body(Body::from(body.to_string())).unwrap();
    app.oneshot(request).await.unwrap()
}

/// Read a response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Number of rows in the default target table.
pub async fn logged_row_count(pool: &PgPool) -> i64 {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM public.monday_logger")
        .fetch_one(pool)
        .await
        .unwrap();
    count
}
