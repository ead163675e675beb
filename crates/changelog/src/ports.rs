//! Port traits implemented by infrastructure crates.
//!
//! The host hands plugins an `Arc<dyn GraphQlClient>`; how the query reaches
//! the code host (HTTP transport, authentication, endpoint) is the adapter's
//! business.

use async_trait::async_trait;

use crate::LookupError;

/// A client able to run GraphQL queries against the code host.
///
/// Implementations are configured with credentials and an endpoint up front;
/// callers only supply the query document.
#[async_trait]
pub trait GraphQlClient: Send + Sync {
    /// Runs `query` and returns the response's `data` object.
    ///
    /// # Errors
    ///
    /// Returns a [`LookupError`] when the request fails in transport, is
    /// rejected by the endpoint, or yields no data.
    async fn graphql(&self, query: &str) -> Result<serde_json::Value, LookupError>;
}
