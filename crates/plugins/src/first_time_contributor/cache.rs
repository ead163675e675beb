//! Per-run contribution lookups with request coalescing.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use changelog::{ContributionCount, GraphQlClient, LookupError, RepositoryCoordinates, Username};
use serde::Deserialize;
use tokio::sync::OnceCell;

/// Memoised merged-PR counts for one changelog run.
///
/// Every username gets one slot. Concurrent lookups for the same username wait
/// on the slot and share the in-flight request. A failed lookup leaves the slot
/// empty, so the next lookup for that username issues a fresh request.
/// Entries are never evicted; the key space is one release's authors.
pub struct ContributionCache {
    client: Arc<dyn GraphQlClient>,
    repository: RepositoryCoordinates,
    slots: Mutex<HashMap<Username, Arc<OnceCell<ContributionCount>>>>,
}

impl ContributionCache {
    /// Creates an empty cache counting pull requests in `repository`.
    pub fn new(client: Arc<dyn GraphQlClient>, repository: RepositoryCoordinates) -> Self {
        Self {
            client,
            repository,
            slots: Mutex::new(HashMap::new()),
        }
    }

    /// Number of merged pull requests `username` authored in the repository.
    ///
    /// Returns `None` when the lookup fails; the failure is logged and not cached.
    pub async fn get_contributions(&self, username: &Username) -> Option<ContributionCount> {
        let slot = self.slot(username);
        if let Some(count) = slot.get() {
            tracing::trace!(%username, "contribution cache hit");
            return Some(*count);
        }

        match slot.get_or_try_init(|| self.fetch(username)).await {
            Ok(count) => Some(*count),
            Err(err) => {
                tracing::warn!(%username, error = %err, "contribution lookup failed");
                None
            }
        }
    }

    fn slot(&self, username: &Username) -> Arc<OnceCell<ContributionCount>> {
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(slots.entry(username.clone()).or_default())
    }

    async fn fetch(&self, username: &Username) -> Result<ContributionCount, LookupError> {
        tracing::debug!(%username, repository = %self.repository, "querying merged pull requests");
        let query = contributions_query(&self.repository, username);
        let data = self.client.graphql(&query).await?;
        parse_issue_count(data)
    }
}

impl std::fmt::Debug for ContributionCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let cached = self
            .slots
            .lock()
            .map(|slots| slots.len())
            .unwrap_or_default();
        f.debug_struct("ContributionCache")
            .field("repository", &self.repository)
            .field("slots", &cached)
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Query
// ---------------------------------------------------------------------------

/// GraphQL document counting merged pull requests by `username` in `repository`.
///
/// Only `issueCount` is read, so the search asks for as few nodes as possible.
pub(crate) fn contributions_query(repository: &RepositoryCoordinates, username: &Username) -> String {
    let search = format!(
        "repo:{repository} is:pr is:merged author:{}",
        username.as_str()
    );
    format!(
        "{{\n  search(first: 2, type: ISSUE, query: \"{}\") {{\n    issueCount\n  }}\n}}\n",
        escape_graphql_string(&search)
    )
}

fn escape_graphql_string(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

#[derive(Deserialize)]
struct SearchData {
    search: SearchResult,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchResult {
    issue_count: u64,
}

fn parse_issue_count(data: serde_json::Value) -> Result<ContributionCount, LookupError> {
    if data.is_null() {
        return Err(LookupError::EmptyResponse);
    }
    let parsed: SearchData =
        serde_json::from_value(data).map_err(|err| LookupError::MalformedResponse {
            message: err.to_string(),
        })?;
    Ok(ContributionCount::new(parsed.search.issue_count))
}
