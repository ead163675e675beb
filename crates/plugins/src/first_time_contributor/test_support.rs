//! In-memory GraphQL fake shared by this module's tests.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use changelog::{
    GraphQlClient, LookupError, RepositoryCoordinates, RepositoryName, RepositoryOwner,
};
use serde_json::json;

pub(crate) fn repository() -> RepositoryCoordinates {
    RepositoryCoordinates::new(
        RepositoryOwner::new("intuit").unwrap(),
        RepositoryName::new("auto").unwrap(),
    )
}

/// Answers contribution searches from a per-username script.
///
/// Scripted responses are consumed in order; the last one repeats. Usernames
/// without a script get [`LookupError::EmptyResponse`]. The highest number of
/// requests in flight at once is recorded for concurrency assertions.
#[derive(Default)]
pub(crate) struct FakeGraphQl {
    scripts: Mutex<HashMap<String, VecDeque<Result<u64, LookupError>>>>,
    calls: Mutex<HashMap<String, usize>>,
    delay: Option<Duration>,
    in_flight: AtomicUsize,
    peak: AtomicUsize,
}

impl FakeGraphQl {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_count(self, username: &str, count: u64) -> Self {
        self.push(username, Ok(count))
    }

    pub(crate) fn with_error(self, username: &str, error: LookupError) -> Self {
        self.push(username, Err(error))
    }

    pub(crate) fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub(crate) fn calls_for(&self, username: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .get(username)
            .copied()
            .unwrap_or_default()
    }

    pub(crate) fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().values().sum()
    }

    pub(crate) fn peak_in_flight(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    fn push(self, username: &str, response: Result<u64, LookupError>) -> Self {
        self.scripts
            .lock()
            .unwrap()
            .entry(username.to_string())
            .or_default()
            .push_back(response);
        self
    }

    fn next_response(&self, username: &str) -> Result<u64, LookupError> {
        let mut scripts = self.scripts.lock().unwrap();
        match scripts.get_mut(username) {
            Some(script) if script.len() > 1 => script.pop_front().unwrap(),
            Some(script) => script.front().cloned().unwrap(),
            None => Err(LookupError::EmptyResponse),
        }
    }
}

fn author_in(query: &str) -> String {
    query
        .split("author:")
        .nth(1)
        .and_then(|rest| rest.split('"').next())
        .unwrap_or_default()
        .to_string()
}

#[async_trait]
impl GraphQlClient for FakeGraphQl {
    async fn graphql(&self, query: &str) -> Result<serde_json::Value, LookupError> {
        let username = author_in(query);
        *self.calls.lock().unwrap().entry(username.clone()).or_default() += 1;

        let running = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(running, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        let count = self.next_response(&username)?;
        Ok(json!({ "search": { "issueCount": count } }))
    }
}
