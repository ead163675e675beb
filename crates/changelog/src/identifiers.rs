//! Newtype identifiers for the release-notes domain.
//!
//! Anything with an identity is a distinct newtype wrapping a primitive, so a
//! [`Username`] cannot be passed where a [`RepositoryOwner`] is expected even
//! though both are strings under the hood.

use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Macro for String-wrapped newtypes.
// Generates: struct, new() returning Option<Self>, as_str(), Display.
// ---------------------------------------------------------------------------
macro_rules! string_id {
    (
        $(#[$attr:meta])*
        $name:ident
    ) => {
        $(#[$attr])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(String);

        impl $name {
            /// Creates a new identifier, returning `None` if the value is empty.
            pub fn new(value: impl Into<String>) -> Option<Self> {
                let v = value.into();
                if v.is_empty() { None } else { Some(Self(v)) }
            }

            /// Returns the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Identifiers — UUID-backed (internally generated)
// ---------------------------------------------------------------------------

/// Identifies one changelog-generation run.
///
/// Generated fresh for every [`crate::Changelog`]; recorded on tracing spans so
/// all lookups made while composing one release body can be correlated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunId(Uuid);

impl RunId {
    /// Generates a new random run identifier.
    pub fn new_random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for RunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Identifiers — String-backed (GitHub / Git names)
// ---------------------------------------------------------------------------

string_id! {
    /// A code-hosting login (e.g. `"octocat"`).
    ///
    /// Author identity is compared by this string, never by object identity.
    Username
}

string_id! {
    /// A Git commit SHA.
    CommitSha
}

string_id! {
    /// The owner (user or organisation) of the repository being released.
    RepositoryOwner
}

string_id! {
    /// The name of the repository being released, without the owner prefix.
    RepositoryName
}

/// Owner and name of the repository whose pull requests are counted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepositoryCoordinates {
    /// Repository owner.
    pub owner: RepositoryOwner,
    /// Repository name.
    pub repo: RepositoryName,
}

impl RepositoryCoordinates {
    /// Creates coordinates from an owner and repository name.
    pub fn new(owner: RepositoryOwner, repo: RepositoryName) -> Self {
        Self { owner, repo }
    }
}

impl std::fmt::Display for RepositoryCoordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

// ---------------------------------------------------------------------------
// Serde helpers
// ---------------------------------------------------------------------------

/// Deserialises an optional username, treating `""` the same as a missing field.
pub(crate) fn optional_username<'de, D>(deserializer: D) -> Result<Option<Username>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(Username::new))
}

/// Deserialises an optional commit SHA, treating `""` the same as a missing field.
pub(crate) fn optional_commit_sha<'de, D>(deserializer: D) -> Result<Option<CommitSha>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(CommitSha::new))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_username_is_rejected() {
        assert!(Username::new("").is_none());
        assert_eq!(Username::new("ana").map(|u| u.to_string()), Some("ana".into()));
    }

    #[test]
    fn coordinates_display_as_owner_slash_repo() {
        let coords = RepositoryCoordinates::new(
            RepositoryOwner::new("intuit").unwrap(),
            RepositoryName::new("auto").unwrap(),
        );
        assert_eq!(coords.to_string(), "intuit/auto");
    }

    #[test]
    fn run_ids_are_unique() {
        assert_ne!(RunId::new_random(), RunId::new_random());
    }
}
