//! The release-notes host: changelog context, hook registries, and plugins.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::hooks::{AddToBodyHook, CreateChangelogHook};
use crate::{ChangelogError, Commit, GraphQlClient, RepositoryCoordinates, RunId};

// ---------------------------------------------------------------------------
// Changelog
// ---------------------------------------------------------------------------

/// Options describing the changelog being generated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangelogOptions {
    /// Base URL used to build links (e.g. `https://github.com/owner/repo`).
    pub base_url: String,
}

impl ChangelogOptions {
    /// Creates options for the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

/// Hooks scoped to one [`Changelog`].
#[derive(Debug, Default)]
pub struct ChangelogHooks {
    /// Extends the rendered body with extra sections.
    pub add_to_body: AddToBodyHook,
}

/// One changelog-generation run.
///
/// Plugins tap [`ChangelogHooks`] from `on_create_changelog`; anything they
/// capture in those taps lives exactly as long as this value.
#[derive(Debug)]
pub struct Changelog {
    /// Options the changelog was created with.
    pub options: ChangelogOptions,
    /// Hooks plugins may tap.
    pub hooks: ChangelogHooks,
    run_id: RunId,
}

impl Changelog {
    /// Creates a changelog with empty hooks and a fresh [`RunId`].
    pub fn new(options: ChangelogOptions) -> Self {
        Self {
            options,
            hooks: ChangelogHooks::default(),
            run_id: RunId::new_random(),
        }
    }

    /// Identifier of this run.
    pub fn run_id(&self) -> RunId {
        self.run_id
    }

    /// Runs `add_to_body` over `notes` for the release containing `commits`.
    #[tracing::instrument(skip_all, fields(run_id = %self.run_id, commits = commits.len()))]
    pub async fn add_to_body(&self, notes: Vec<String>, commits: &[Commit]) -> Vec<String> {
        self.hooks.add_to_body.call(notes, commits).await
    }
}

// ---------------------------------------------------------------------------
// Host
// ---------------------------------------------------------------------------

/// Hooks scoped to the host process.
#[derive(Debug, Default)]
pub struct HostHooks {
    /// Called once for every changelog the host creates.
    pub on_create_changelog: CreateChangelogHook,
}

/// A plugin that extends the host through its hooks.
pub trait ChangelogPlugin: Send + Sync {
    /// Name the plugin's taps are registered under.
    fn name(&self) -> &str;

    /// Registers the plugin's taps on `host`.
    fn apply(&self, host: &mut Host);
}

/// The host: owns the hook registries and the services offered to plugins.
pub struct Host {
    /// Host-level hooks.
    pub hooks: HostHooks,
    git: Option<Arc<dyn GraphQlClient>>,
    repository: RepositoryCoordinates,
}

impl Host {
    /// Creates a host for `repository` without a GraphQL client.
    pub fn new(repository: RepositoryCoordinates) -> Self {
        Self {
            hooks: HostHooks::default(),
            git: None,
            repository,
        }
    }

    /// Attaches the GraphQL client offered to plugins.
    #[must_use]
    pub fn with_git(mut self, client: Arc<dyn GraphQlClient>) -> Self {
        self.git = Some(client);
        self
    }

    /// GraphQL client, if one is configured.
    pub fn git(&self) -> Option<Arc<dyn GraphQlClient>> {
        self.git.clone()
    }

    /// Repository the release belongs to.
    pub fn repository(&self) -> &RepositoryCoordinates {
        &self.repository
    }

    /// Applies `plugin` to this host.
    pub fn register(&mut self, plugin: &dyn ChangelogPlugin) {
        tracing::debug!(plugin = plugin.name(), "applying plugin");
        plugin.apply(self);
    }

    /// Creates a changelog and runs `on_create_changelog` for it.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by an `on_create_changelog` tap.
    pub fn create_changelog(&self, options: ChangelogOptions) -> Result<Changelog, ChangelogError> {
        let mut changelog = Changelog::new(options);
        self.hooks.on_create_changelog.call(&mut changelog)?;
        Ok(changelog)
    }
}

impl std::fmt::Debug for Host {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Host")
            .field("hooks", &self.hooks)
            .field("git", &self.git.is_some())
            .field("repository", &self.repository)
            .finish()
    }
}
