//! Release payload loading and the host run over it.

use std::path::Path;

use anyhow::{Context, Result};
use changelog::{ChangelogError, ChangelogOptions, Commit, Host};
use serde::Deserialize;
use tokio::io::AsyncReadExt;

/// Notes and commits of the release being documented.
#[derive(Debug, Default, Deserialize)]
pub struct ReleaseInput {
    /// Notes composed so far, in order.
    #[serde(default)]
    pub notes: Vec<String>,
    /// Commits in the release.
    #[serde(default)]
    pub commits: Vec<Commit>,
}

impl ReleaseInput {
    /// Reads the payload from `path`, or from stdin when `path` is `-`.
    pub async fn load(path: &Path) -> Result<Self> {
        let raw = if path == Path::new("-") {
            let mut buf = String::new();
            tokio::io::stdin()
                .read_to_string(&mut buf)
                .await
                .context("failed to read release payload from stdin")?;
            buf
        } else {
            tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("failed to read release payload {}", path.display()))?
        };
        Self::parse(&raw)
    }

    /// Parses a JSON payload.
    pub fn parse(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).context("release payload is not valid JSON")
    }
}

/// Creates a changelog on `host` and composes its body from `input`.
///
/// Returns the final notes joined by blank lines.
pub async fn compose_notes(
    host: &Host,
    options: ChangelogOptions,
    input: ReleaseInput,
) -> Result<String, ChangelogError> {
    let changelog = host.create_changelog(options)?;
    tracing::info!(
        run_id = %changelog.run_id(),
        commits = input.commits.len(),
        notes = input.notes.len(),
        "composing release notes"
    );
    let notes = changelog.add_to_body(input.notes, &input.commits).await;
    Ok(notes.join("\n\n"))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use changelog::{
        GraphQlClient, LookupError, RepositoryCoordinates, RepositoryName, RepositoryOwner,
    };
    use plugins::FirstTimeContributorPlugin;
    use serde_json::json;

    use super::*;

    /// Reports one merged pull request for everybody.
    struct EveryoneIsNew;

    #[async_trait::async_trait]
    impl GraphQlClient for EveryoneIsNew {
        async fn graphql(&self, _query: &str) -> Result<serde_json::Value, LookupError> {
            Ok(json!({ "search": { "issueCount": 1 } }))
        }
    }

    fn host() -> Host {
        let repository = RepositoryCoordinates::new(
            RepositoryOwner::new("intuit").unwrap(),
            RepositoryName::new("auto").unwrap(),
        );
        let mut host = Host::new(repository).with_git(Arc::new(EveryoneIsNew));
        host.register(&FirstTimeContributorPlugin::new());
        host
    }

    #[test]
    fn payload_fields_are_optional() {
        let input = ReleaseInput::parse("{}").unwrap();
        assert!(input.notes.is_empty());
        assert!(input.commits.is_empty());
        assert!(ReleaseInput::parse("[").is_err());
    }

    #[tokio::test]
    async fn composes_notes_with_thank_you_block() {
        let input = ReleaseInput::parse(
            r#####"{
                "notes": ["#### 🐛 Bug Fix"],
                "commits": [
                    {"hash": "abc123", "authors": [{"name": "Ana", "username": "ana", "type": "User"}]},
                    {"authors": [{"username": "dependabot[bot]", "type": "Bot"}]}
                ]
            }"#####,
        )
        .unwrap();

        let body = compose_notes(
            &host(),
            ChangelogOptions::new("https://github.com/intuit/auto"),
            input,
        )
        .await
        .unwrap();

        assert_eq!(
            body,
            "#### 🐛 Bug Fix\n\n\
             :tada: This release contains work from a new contributor! :tada:\n\n\
             Thank you, Ana ([@ana](https://github.com/ana)), for all your work!"
        );
    }

    #[tokio::test]
    async fn bad_base_url_is_reported() {
        let result = compose_notes(
            &host(),
            ChangelogOptions::new("github.com/intuit/auto"),
            ReleaseInput::default(),
        )
        .await;
        assert!(matches!(result, Err(ChangelogError::InvalidBaseUrl { .. })));
    }
}
