//! Markdown rendering for contributor lines and the thank-you block.

use changelog::{ChangelogError, CommitAuthor, Username};
use url::Url;

/// Scheme and host of the changelog base URL, e.g. `https://github.com`.
///
/// Profile links are built by appending a login to this origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileOrigin(String);

impl ProfileOrigin {
    /// Derives the origin of `base_url`.
    ///
    /// Returns `Ok(None)` for URLs that parse but have no network origin
    /// (`data:`, `file:`), since no profile link can be built from them.
    ///
    /// # Errors
    ///
    /// Returns [`ChangelogError::InvalidBaseUrl`] when `base_url` does not parse.
    pub fn from_base_url(base_url: &str) -> Result<Option<Self>, ChangelogError> {
        let url = Url::parse(base_url).map_err(|err| ChangelogError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: err.to_string(),
        })?;

        let origin = url.origin();
        Ok(origin
            .is_tuple()
            .then(|| Self(origin.ascii_serialization())))
    }

    /// Profile page URL for `username`.
    pub fn profile_url(&self, username: &Username) -> String {
        format!("{}/{}", self.0, username)
    }
}

impl std::fmt::Display for ProfileOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Renders `author` as one contributor line.
///
/// | name | username | output |
/// |------|----------|--------|
/// | yes | yes | `Ana ([@ana](https://github.com/ana))` |
/// | no | yes | `[@ana](https://github.com/ana)` |
/// | yes | no | `Ana` |
/// | no | no | empty |
pub fn render_contributor(origin: &ProfileOrigin, author: &CommitAuthor) -> String {
    let link = author
        .username
        .as_ref()
        .map(|username| format!("[@{username}]({})", origin.profile_url(username)));

    match (author.name.as_deref(), link) {
        (Some(name), Some(link)) => format!("{name} ({link})"),
        (None, Some(link)) => link,
        (Some(name), None) => name.to_string(),
        (None, None) => String::new(),
    }
}

/// Builds the thank-you block for already de-duplicated contributor `lines`.
///
/// Returns `None` when `lines` is empty.
pub fn thank_you_block(lines: &[String]) -> Option<String> {
    match lines {
        [] => None,
        [only] => Some(format!(
            ":tada: This release contains work from a new contributor! :tada:\n\n\
             Thank you, {only}, for all your work!"
        )),
        many => {
            let hearts = many
                .iter()
                .map(|line| format!(":heart: {line}"))
                .collect::<Vec<_>>()
                .join("\n\n");
            Some(format!(
                ":tada: This release contains work from new contributors! :tada:\n\n\
                 Thanks for all your work!\n\n{hearts}"
            ))
        }
    }
}
