//! Value types handed to plugins while a changelog is generated.
//!
//! Commits and their authors are supplied by the host per release; plugins read
//! them but never own them.

use serde::{Deserialize, Deserializer, Serialize};

use crate::identifiers::{optional_commit_sha, optional_username};
use crate::{CommitSha, Username};

// ---------------------------------------------------------------------------
// Authors
// ---------------------------------------------------------------------------

/// The account type reported by the code host for a commit author.
///
/// Decoded from the host's `type` tag. Anything other than `"User"` or `"Bot"`
/// (including a missing or `null` tag) becomes [`AuthorKind::Unknown`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AuthorKind {
    /// A human account.
    User,
    /// An automation account (e.g. `dependabot[bot]`).
    Bot,
    /// No tag, or a tag this crate does not recognise.
    #[default]
    #[serde(other)]
    Unknown,
}

impl AuthorKind {
    /// Returns `true` for automation accounts.
    pub fn is_bot(self) -> bool {
        matches!(self, Self::Bot)
    }
}

fn author_kind<'de, D>(deserializer: D) -> Result<AuthorKind, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<AuthorKind>::deserialize(deserializer)?.unwrap_or_default())
}

fn non_empty_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.filter(|s| !s.is_empty()))
}

// ---------------------------------------------------------------------------

/// One author of a commit, as resolved by the host.
///
/// Either identity field may be missing: a commit made with an unlinked e-mail
/// has a `name` but no `username`, and some bot commits carry only a login.
/// Empty strings are normalised to `None` on deserialisation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CommitAuthor {
    /// Display name from the commit or the host profile.
    #[serde(default, deserialize_with = "non_empty_string")]
    pub name: Option<String>,

    /// Code-host login.
    #[serde(default, deserialize_with = "optional_username")]
    pub username: Option<Username>,

    /// Account type.
    #[serde(default, rename = "type", deserialize_with = "author_kind")]
    pub kind: AuthorKind,
}

impl CommitAuthor {
    /// Creates a human author with both a display name and a login.
    pub fn user(name: impl Into<String>, username: Username) -> Self {
        Self {
            name: Some(name.into()).filter(|n: &String| !n.is_empty()),
            username: Some(username),
            kind: AuthorKind::User,
        }
    }

    /// Sets the account type.
    #[must_use]
    pub fn with_kind(mut self, kind: AuthorKind) -> Self {
        self.kind = kind;
        self
    }
}

// ---------------------------------------------------------------------------
// Commits
// ---------------------------------------------------------------------------

/// A commit included in the release being documented.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    /// Commit SHA, when the host provides it.
    #[serde(default, deserialize_with = "optional_commit_sha")]
    pub hash: Option<CommitSha>,

    /// First line of the commit message.
    #[serde(default)]
    pub subject: Option<String>,

    /// Every author credited on the commit (co-authors included).
    #[serde(default)]
    pub authors: Vec<CommitAuthor>,
}

impl Commit {
    /// Creates a commit with the given authors and no hash or subject.
    pub fn with_authors(authors: Vec<CommitAuthor>) -> Self {
        Self {
            authors,
            ..Self::default()
        }
    }
}

// ---------------------------------------------------------------------------
// Contributions
// ---------------------------------------------------------------------------

/// Number of merged pull requests a user has authored in the repository.
///
/// Taken from the `issueCount` field of a code-search result; the search is
/// capped at a couple of hits because only the total is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ContributionCount(u64);

impl ContributionCount {
    /// Highest count that still marks an author as a first-time contributor.
    ///
    /// The release being documented usually contains the contributor's only
    /// merged pull request, so `1` rather than `0`.
    pub const FIRST_TIME_LIMIT: u64 = 1;

    /// Creates a [`ContributionCount`] from a raw integer.
    pub fn new(count: u64) -> Self {
        Self(count)
    }

    /// Returns `true` when the count marks a first-time contributor.
    pub fn is_first_time(self) -> bool {
        self.0 <= Self::FIRST_TIME_LIMIT
    }
}

impl std::fmt::Display for ContributionCount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
