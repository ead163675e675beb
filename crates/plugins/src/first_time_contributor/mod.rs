//! Thanks first-time contributors right in the release notes.
//!
//! On every new changelog the plugin derives the profile-link origin from the
//! changelog base URL and taps `add_to_body` with a [`ContributionCache`]
//! scoped to that changelog. When the body is composed, every non-bot commit
//! author with a login is checked against the code host; authors with at most
//! one merged pull request in the repository get a line in a thank-you block
//! appended to the notes.
//!
//! Lookups are best-effort: a failed lookup only means that author is not
//! thanked. Changelog generation never fails because of this plugin, except
//! for a base URL that does not parse at setup. A base URL without a network
//! origin (`data:`, `file:`) only disables the plugin for that changelog.

mod cache;
mod config;
mod render;

#[cfg(test)]
mod test_support;

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use changelog::{AddToBody, ChangelogPlugin, Commit, CommitAuthor, Host, RunId};
use futures::stream::{self, StreamExt};
use tracing::Instrument;

pub use cache::ContributionCache;
pub use config::FirstTimeContributorConfig;
pub use render::{render_contributor, thank_you_block, ProfileOrigin};

/// Plugin appending a thank-you block for first-time contributors.
#[derive(Debug, Clone, Default)]
pub struct FirstTimeContributorPlugin {
    config: FirstTimeContributorConfig,
}

impl FirstTimeContributorPlugin {
    /// Name the plugin registers its taps under.
    pub const NAME: &'static str = "first-time-contributor";

    /// Creates the plugin with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the plugin with explicit settings.
    pub fn with_config(config: FirstTimeContributorConfig) -> Self {
        Self { config }
    }
}

impl ChangelogPlugin for FirstTimeContributorPlugin {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn apply(&self, host: &mut Host) {
        let client = host.git();
        let repository = host.repository().clone();
        let config = self.config;

        host.hooks.on_create_changelog.tap(Self::NAME, move |changelog| {
            let Some(origin) = ProfileOrigin::from_base_url(&changelog.options.base_url)? else {
                tracing::warn!(
                    run_id = %changelog.run_id(),
                    base_url = %changelog.options.base_url,
                    "changelog base URL has no origin to link profiles to; first-time contributors will not be thanked"
                );
                return Ok(());
            };

            let Some(client) = client.as_ref() else {
                tracing::warn!(
                    run_id = %changelog.run_id(),
                    "no GraphQL client configured; first-time contributors will not be thanked"
                );
                return Ok(());
            };

            tracing::debug!(
                run_id = %changelog.run_id(),
                %origin,
                "registering first-time contributor tap"
            );
            let annotator = ContributionAnnotator {
                origin,
                cache: ContributionCache::new(Arc::clone(client), repository.clone()),
                config,
                run_id: changelog.run_id(),
            };
            changelog
                .hooks
                .add_to_body
                .tap_promise(Self::NAME, Arc::new(annotator));
            Ok(())
        });
    }
}

// ---------------------------------------------------------------------------
// add_to_body tap
// ---------------------------------------------------------------------------

/// State captured for one changelog: link origin plus that run's cache.
#[derive(Debug)]
struct ContributionAnnotator {
    origin: ProfileOrigin,
    cache: ContributionCache,
    config: FirstTimeContributorConfig,
    run_id: RunId,
}

impl ContributionAnnotator {
    /// Returns `author` if they are a first-time contributor.
    async fn classify<'a>(&self, author: &'a CommitAuthor) -> Option<&'a CommitAuthor> {
        let Some(username) = author.username.as_ref() else {
            tracing::debug!(name = ?author.name, "skipping author without a username");
            return None;
        };
        if author.kind.is_bot() {
            tracing::debug!(%username, "skipping bot author");
            return None;
        }

        let count = self.cache.get_contributions(username).await?;
        tracing::debug!(%username, merged_pull_requests = %count, "classified author");
        count.is_first_time().then_some(author)
    }

    async fn compose(&self, mut notes: Vec<String>, commits: &[Commit]) -> Vec<String> {
        let authors: Vec<&CommitAuthor> = commits
            .iter()
            .flat_map(|commit| commit.authors.iter())
            .collect();

        let lookups: Vec<_> = authors
            .into_iter()
            .map(|author| self.classify(author))
            .collect();

        let first_timers: Vec<&CommitAuthor> = stream::iter(lookups)
            .buffered(self.config.max_concurrent_lookups.get())
            .collect::<Vec<_>>()
            .await
            .into_iter()
            .flatten()
            .collect();

        if first_timers.is_empty() {
            tracing::debug!("no first-time contributors in this release");
            return notes;
        }

        let mut seen = HashSet::new();
        let lines: Vec<String> = first_timers
            .into_iter()
            .map(|author| render_contributor(&self.origin, author))
            .filter(|line| seen.insert(line.clone()))
            .collect();

        if let Some(block) = thank_you_block(&lines) {
            tracing::info!(contributors = lines.len(), "thanking first-time contributors");
            notes.push(block);
        }
        notes
    }
}

#[async_trait]
impl AddToBody for ContributionAnnotator {
    async fn add_to_body(&self, notes: Vec<String>, commits: &[Commit]) -> Vec<String> {
        let span = tracing::info_span!("first_time_contributor", run_id = %self.run_id);
        self.compose(notes, commits).instrument(span).await
    }
}
