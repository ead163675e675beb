//! Plugin configuration.

use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};

const DEFAULT_MAX_CONCURRENT_LOOKUPS: NonZeroUsize = match NonZeroUsize::new(8) {
    Some(n) => n,
    None => NonZeroUsize::MIN,
};

/// Settings for [`super::FirstTimeContributorPlugin`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FirstTimeContributorConfig {
    /// Upper bound on contribution lookups in flight at once.
    pub max_concurrent_lookups: NonZeroUsize,
}

impl Default for FirstTimeContributorConfig {
    fn default() -> Self {
        Self {
            max_concurrent_lookups: DEFAULT_MAX_CONCURRENT_LOOKUPS,
        }
    }
}
