//! Extension points exposed to plugins.
//!
//! Two hook shapes are needed:
//!
//! - [`CreateChangelogHook`] — synchronous; every tap sees the freshly created
//!   [`Changelog`] and may register further taps on its nested hooks.
//! - [`AddToBodyHook`] — asynchronous waterfall; each tap receives the notes
//!   produced by the previous one and returns the (possibly extended) list.
//!
//! Taps run in registration order.

use std::sync::Arc;

use async_trait::async_trait;

use crate::{Changelog, ChangelogError, Commit};

// ---------------------------------------------------------------------------
// on_create_changelog
// ---------------------------------------------------------------------------

type CreateChangelogTap = Box<dyn Fn(&mut Changelog) -> Result<(), ChangelogError> + Send + Sync>;

/// Synchronous hook called once per [`Changelog`] right after creation.
#[derive(Default)]
pub struct CreateChangelogHook {
    taps: Vec<(String, CreateChangelogTap)>,
}

impl CreateChangelogHook {
    /// Registers `tap` under the plugin name `name`.
    pub fn tap<F>(&mut self, name: impl Into<String>, tap: F)
    where
        F: Fn(&mut Changelog) -> Result<(), ChangelogError> + Send + Sync + 'static,
    {
        self.taps.push((name.into(), Box::new(tap)));
    }

    /// Runs every tap against `changelog`, stopping at the first error.
    ///
    /// # Errors
    ///
    /// Returns the first [`ChangelogError`] produced by a tap.
    pub fn call(&self, changelog: &mut Changelog) -> Result<(), ChangelogError> {
        for (name, tap) in &self.taps {
            tracing::debug!(plugin = %name, run_id = %changelog.run_id(), "on_create_changelog");
            tap(changelog)?;
        }
        Ok(())
    }

    /// Names of the registered taps, in call order.
    pub fn tap_names(&self) -> impl Iterator<Item = &str> {
        self.taps.iter().map(|(name, _)| name.as_str())
    }
}

impl std::fmt::Debug for CreateChangelogHook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.tap_names()).finish()
    }
}

// ---------------------------------------------------------------------------
// add_to_body
// ---------------------------------------------------------------------------

/// A tap on [`AddToBodyHook`].
#[async_trait]
pub trait AddToBody: Send + Sync {
    /// Returns `notes`, optionally extended, for the release containing `commits`.
    ///
    /// Taps cannot fail: anything that goes wrong should leave `notes` as it was.
    async fn add_to_body(&self, notes: Vec<String>, commits: &[Commit]) -> Vec<String>;
}

/// Asynchronous waterfall hook composing extra sections of the changelog body.
#[derive(Default)]
pub struct AddToBodyHook {
    taps: Vec<(String, Arc<dyn AddToBody>)>,
}

impl AddToBodyHook {
    /// Registers `tap` under the plugin name `name`.
    pub fn tap_promise(&mut self, name: impl Into<String>, tap: Arc<dyn AddToBody>) {
        self.taps.push((name.into(), tap));
    }

    /// Threads `notes` through every tap in order and returns the final list.
    pub async fn call(&self, notes: Vec<String>, commits: &[Commit]) -> Vec<String> {
        let mut notes = notes;
        for (name, tap) in &self.taps {
            tracing::debug!(plugin = %name, notes = notes.len(), "add_to_body");
            notes = tap.add_to_body(notes, commits).await;
        }
        notes
    }

    /// Names of the registered taps, in call order.
    pub fn tap_names(&self) -> impl Iterator<Item = &str> {
        self.taps.iter().map(|(name, _)| name.as_str())
    }

    /// Returns `true` if nothing has tapped this hook.
    pub fn is_empty(&self) -> bool {
        self.taps.is_empty()
    }
}

impl std::fmt::Debug for AddToBodyHook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.tap_names()).finish()
    }
}
