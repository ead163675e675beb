//! Command-line and environment configuration.

use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use changelog::{RepositoryCoordinates, RepositoryName, RepositoryOwner};
use clap::{Parser, ValueEnum};
use github::{GithubClientConfig, DEFAULT_GRAPHQL_ENDPOINT};
use plugins::FirstTimeContributorConfig;

/// Output format of the log layer written to stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable lines.
    Pretty,
    /// One JSON object per event.
    Json,
}

/// Append a thank-you block for first-time contributors to release notes.
///
/// Reads `{"notes": [...], "commits": [...]}` from `--input`, runs the
/// first-time-contributor plugin over it, and prints the resulting notes.
#[derive(Debug, Parser)]
#[command(name = "first-time-contributor", version, about)]
pub struct CliConfig {
    /// Release payload as JSON; `-` reads stdin.
    #[arg(long, short, default_value = "-")]
    pub input: PathBuf,

    /// Changelog base URL; its origin is used for profile links.
    #[arg(long, env = "FTC_BASE_URL")]
    pub base_url: String,

    /// Owner of the repository whose merged pull requests are counted.
    #[arg(long, env = "FTC_OWNER")]
    pub owner: String,

    /// Name of the repository whose merged pull requests are counted.
    #[arg(long, env = "FTC_REPO")]
    pub repo: String,

    /// Token for the GitHub GraphQL API.
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// GraphQL endpoint (override for GitHub Enterprise).
    #[arg(long, env = "FTC_API_URL", default_value = DEFAULT_GRAPHQL_ENDPOINT)]
    pub api_url: String,

    /// Per-request timeout in seconds; 0 disables it.
    #[arg(long, env = "FTC_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,

    /// Maximum contribution lookups in flight at once.
    #[arg(long, env = "FTC_MAX_CONCURRENT_LOOKUPS", default_value = "8")]
    pub max_concurrent_lookups: NonZeroUsize,

    /// Log output format.
    #[arg(long, env = "FTC_LOG_FORMAT", value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,
}

impl CliConfig {
    /// Repository coordinates from `--owner` / `--repo`.
    pub fn repository(&self) -> Result<RepositoryCoordinates> {
        let owner = RepositoryOwner::new(self.owner.trim()).context("--owner must not be empty")?;
        let repo = RepositoryName::new(self.repo.trim()).context("--repo must not be empty")?;
        Ok(RepositoryCoordinates::new(owner, repo))
    }

    /// Settings for the GitHub GraphQL adapter.
    pub fn github(&self) -> GithubClientConfig {
        GithubClientConfig {
            endpoint: self.api_url.clone(),
            token: self.token.clone(),
            timeout: (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs)),
        }
    }

    /// Settings for the plugin.
    pub fn plugin(&self) -> FirstTimeContributorConfig {
        FirstTimeContributorConfig {
            max_concurrent_lookups: self.max_concurrent_lookups,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliConfig {
        let mut argv = vec![
            "first-time-contributor",
            "--base-url",
            "https://github.com/intuit/auto",
            "--owner",
            "intuit",
            "--repo",
            "auto",
        ];
        argv.extend_from_slice(args);
        CliConfig::try_parse_from(argv).unwrap()
    }

    #[test]
    fn defaults_apply() {
        let config = parse(&[]);
        assert_eq!(config.input, PathBuf::from("-"));
        assert_eq!(config.api_url, DEFAULT_GRAPHQL_ENDPOINT);
        assert_eq!(config.plugin(), FirstTimeContributorConfig::default());
        assert_eq!(config.github().timeout, Some(Duration::from_secs(30)));
        assert_eq!(config.repository().unwrap().to_string(), "intuit/auto");
    }

    #[test]
    fn zero_timeout_disables_it() {
        let config = parse(&["--timeout-secs", "0"]);
        assert_eq!(config.github().timeout, None);
    }

    #[test]
    fn blank_owner_is_rejected() {
        let config = CliConfig::try_parse_from([
            "first-time-contributor",
            "--base-url",
            "https://github.com/o/r",
            "--owner",
            "  ",
            "--repo",
            "r",
        ])
        .unwrap();
        assert!(config.repository().is_err());
    }

    #[test]
    fn zero_concurrency_is_rejected() {
        let parsed = CliConfig::try_parse_from([
            "first-time-contributor",
            "--base-url",
            "https://github.com/o/r",
            "--owner",
            "o",
            "--repo",
            "r",
            "--max-concurrent-lookups",
            "0",
        ]);
        assert!(parsed.is_err());
    }
}
