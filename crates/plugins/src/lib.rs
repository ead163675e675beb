//! Release-notes plugins.
//!
//! Each plugin implements [`changelog::ChangelogPlugin`] and is applied to a
//! [`changelog::Host`] by the composition root.
//!
//! ## Architectural Layer
//!
//! **Plugin layer.** Plugins sequence calls between the host's hooks and the
//! port traits it offers ([`changelog::GraphQlClient`]). They never talk to
//! the network directly.
//!
//! | Plugin | Effect |
//! |--------|--------|
//! | [`FirstTimeContributorPlugin`] | Thanks first-time contributors at the end of the release notes |

pub mod first_time_contributor;

pub use first_time_contributor::{
    render_contributor, thank_you_block, ContributionCache, FirstTimeContributorConfig,
    FirstTimeContributorPlugin, ProfileOrigin,
};
