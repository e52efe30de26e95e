//! HTTP client for the monday.com GraphQL endpoint.

use std::time::Duration;

use mondaysync_core::{BoardItem, ItemsData};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};

use crate::query::{item_variables, ITEM_QUERY};

/// Public GraphQL endpoint.
pub const DEFAULT_API_URL: &str = "https://api.monday.com/v2";

/// Ceiling for a single GraphQL round-trip.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors from the monday.com API layer.
#[derive(Debug, thiserror::Error)]
pub enum MondayApiError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// monday.com returned a non-2xx status code.
    #[error("monday.com API error ({status}): {body}")]
    HttpStatus {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The response carried a GraphQL `errors` member.
    #[error("GraphQL error: {0}")]
    GraphQl(serde_json::Value),

    /// `data` did not have the expected shape.
    #[error("Unexpected response shape: {0}")]
    Decode(#[from] serde_json::Error),

    /// The response body had no `data` member (or it was `null`).
    #[error("Response has no data member")]
    MissingData,

    /// The API token cannot be used as a header value.
    #[error("Invalid API token header value")]
    InvalidToken,
}

/// GraphQL client bound to one API token.
///
/// Cheap to clone; the inner [`reqwest::Client`] pools connections.
#[derive(Debug, Clone)]
pub struct MondayApi {
    client: reqwest::Client,
    api_url: String,
}

impl MondayApi {
    /// Build a client with the token installed as the `Authorization` header.
    pub fn new(api_token: &str, api_url: impl Into<String>) -> Result<Self, MondayApiError> {
        let mut auth = HeaderValue::from_str(api_token).map_err(|_| MondayApiError::InvalidToken)?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self::with_client(client, api_url))
    }

    /// Create an API client reusing an existing [`reqwest::Client`].
    ///
    /// The caller is responsible for the auth header and timeout.
    pub fn with_client(client: reqwest::Client, api_url: impl Into<String>) -> Self {
        Self {
            client,
            api_url: api_url.into(),
        }
    }

    /// Run a GraphQL query and return its `data` member.
    ///
    /// Any `errors` key fails the call, even when its value is `null`. A body
    /// without a non-null `data` member fails with [`MondayApiError::MissingData`].
    pub async fn graphql(
        &self,
        query: &str,
        variables: serde_json::Value,
    ) -> Result<serde_json::Value, MondayApiError> {
        let body = serde_json::json!({
            "query": query,
            "variables": variables,
        });

        let response = self.client.post(&self.api_url).json(&body).send().await?;
        let response = Self::ensure_success(response).await?;
        let mut parsed: serde_json::Map<String, serde_json::Value> = response.json().await?;

        if let Some(errors) = parsed.remove("errors") {
            return Err(MondayApiError::GraphQl(errors));
        }
        match parsed.remove("data") {
            Some(data) if !data.is_null() => Ok(data),
            _ => Err(MondayApiError::MissingData),
        }
    }

    /// Fetch one item by id. `Ok(None)` when monday.com returns no items.
    pub async fn fetch_item(&self, item_id: i64) -> Result<Option<BoardItem>, MondayApiError> {
        tracing::debug!(item_id, "Fetching item from monday.com");
        let data = self.graphql(ITEM_QUERY, item_variables(item_id)).await?;
        let items: ItemsData = serde_json::from_value(data)?;
        Ok(items.into_first())
    }

    /// Turn a non-2xx response into [`MondayApiError::HttpStatus`].
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, MondayApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(MondayApiError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}
