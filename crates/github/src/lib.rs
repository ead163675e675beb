//! GitHub infrastructure adapter.
//!
//! Implements the [`changelog::GraphQlClient`] port over the GitHub GraphQL API
//! (`POST /graphql` with a JSON `{"query": ...}` body).
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** This crate must not contain domain rules.
//! Transport, authentication headers and response envelope handling live here;
//! plugins only ever see [`changelog::GraphQlClient`] and
//! [`changelog::LookupError`].
//!
//! ## Error mapping
//!
//! | Condition | [`LookupError`] |
//! |-----------|-----------------|
//! | connect / TLS / timeout failure | `Transport` |
//! | non-2xx status | `HttpStatus` |
//! | non-empty `errors` array | `Rejected` |
//! | missing or `null` `data` | `EmptyResponse` |
//! | body is not a GraphQL envelope | `MalformedResponse` |

use std::time::Duration;

use async_trait::async_trait;
use changelog::{GraphQlClient, LookupError};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::Instrument;

/// Public GitHub GraphQL endpoint.
pub const DEFAULT_GRAPHQL_ENDPOINT: &str = "https://api.github.com/graphql";

const USER_AGENT: &str = concat!("first-time-contributor/", env!("CARGO_PKG_VERSION"));

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Connection settings for [`GithubGraphQlClient`].
#[derive(Clone)]
pub struct GithubClientConfig {
    /// GraphQL endpoint URL (GitHub Enterprise: `https://<host>/api/graphql`).
    pub endpoint: String,
    /// Token sent as `Authorization: Bearer`. GitHub rejects anonymous
    /// GraphQL requests, so this is only optional for tests and proxies.
    pub token: Option<String>,
    /// Per-request timeout. `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl Default for GithubClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_GRAPHQL_ENDPOINT.to_string(),
            token: None,
            timeout: Some(Duration::from_secs(30)),
        }
    }
}

impl std::fmt::Debug for GithubClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GithubClientConfig")
            .field("endpoint", &self.endpoint)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Errors constructing a [`GithubGraphQlClient`].
#[derive(Debug, Error)]
pub enum GithubClientError {
    /// The underlying HTTP client could not be built (e.g. TLS backend failure).
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[from] reqwest::Error),
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct GraphQlRequest<'a> {
    query: &'a str,
}

#[derive(Deserialize)]
struct GraphQlResponse {
    #[serde(default)]
    data: Option<serde_json::Value>,
    #[serde(default)]
    errors: Vec<GraphQlErrorMessage>,
}

#[derive(Deserialize)]
struct GraphQlErrorMessage {
    message: String,
}

/// [`GraphQlClient`] backed by the GitHub GraphQL API.
#[derive(Debug, Clone)]
pub struct GithubGraphQlClient {
    http: reqwest::Client,
    endpoint: String,
    token: Option<String>,
}

impl GithubGraphQlClient {
    /// Builds a client from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`GithubClientError::ClientBuild`] if the HTTP client cannot be
    /// constructed.
    pub fn new(config: GithubClientConfig) -> Result<Self, GithubClientError> {
        let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            endpoint: config.endpoint,
            token: config.token.filter(|t| !t.is_empty()),
        })
    }

    /// Endpoint this client posts to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn send(&self, query: &str) -> Result<serde_json::Value, LookupError> {
        let mut request = self.http.post(&self.endpoint).json(&GraphQlRequest { query });
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|err| LookupError::Transport {
            message: err.to_string(),
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::HttpStatus {
                status: status.as_u16(),
            });
        }

        let body: GraphQlResponse =
            response
                .json()
                .await
                .map_err(|err| LookupError::MalformedResponse {
                    message: err.to_string(),
                })?;

        if !body.errors.is_empty() {
            return Err(LookupError::Rejected {
                messages: body.errors.into_iter().map(|e| e.message).collect(),
            });
        }

        match body.data {
            Some(data) if !data.is_null() => Ok(data),
            _ => Err(LookupError::EmptyResponse),
        }
    }
}

#[async_trait]
impl GraphQlClient for GithubGraphQlClient {
    async fn graphql(&self, query: &str) -> Result<serde_json::Value, LookupError> {
        let span = tracing::debug_span!("github_graphql", endpoint = %self.endpoint);
        let result = self.send(query).instrument(span).await;
        if let Err(err) = &result {
            tracing::debug!(error = %err, "GitHub GraphQL request failed");
        }
        result
    }
}
