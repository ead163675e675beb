//! Release-notes host domain.
//!
//! This crate contains the commit and author types a release-notes generator
//! hands to its plugins, the hook registries plugins tap, and the port traits
//! infrastructure crates implement. Plugins depend on this crate only.
//!
//! ## Architectural Layer
//!
//! **Domain + port definitions.** This crate has no I/O dependencies.
//! It defines *what* plugins can rely on; infrastructure crates define *how*
//! requests reach the code host.
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`identifiers`] | Newtype identifiers (`Username`, `RunId`, etc.) |
//! | [`types`] | Commit, author and contribution value types |
//! | [`errors`] | `ChangelogError` and `LookupError` |
//! | [`hooks`] | `on_create_changelog` and `add_to_body` hook registries |
//! | [`host`] | `Host`, `Changelog` and the `ChangelogPlugin` trait |
//! | [`ports`] | `GraphQlClient` port |

pub mod errors;
pub mod hooks;
pub mod host;
pub mod identifiers;
pub mod ports;
pub mod types;

// Re-export everything at the crate root for ergonomic usage by downstream crates.
pub use errors::{ChangelogError, LookupError};
pub use hooks::{AddToBody, AddToBodyHook, CreateChangelogHook};
pub use host::{Changelog, ChangelogHooks, ChangelogOptions, ChangelogPlugin, Host, HostHooks};
pub use identifiers::{
    CommitSha, RepositoryCoordinates, RepositoryName, RepositoryOwner, RunId, Username,
};
pub use ports::GraphQlClient;
pub use types::{AuthorKind, Commit, CommitAuthor, ContributionCount};
