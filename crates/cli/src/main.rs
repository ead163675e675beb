//! first-time-contributor CLI entry point.
//!
//! This binary is the composition root for the workspace. Responsibilities:
//!
//! 1. **Parse configuration** — flags and environment variables via [`clap`].
//! 2. **Wire observability** — configure `tracing-subscriber` with a pretty or
//!    JSON layer on stderr and, when `OTEL_EXPORTER_OTLP_ENDPOINT` is set, an
//!    OpenTelemetry OTLP exporter.
//! 3. **Construct infrastructure** — build the [`github::GithubGraphQlClient`]
//!    and hand it to the [`changelog::Host`].
//! 4. **Drive the host** — apply [`plugins::FirstTimeContributorPlugin`],
//!    create one changelog, run `add_to_body` over the release payload, and
//!    print the resulting notes to stdout.

mod config;
mod observability;
mod release;

use std::sync::Arc;

use anyhow::{Context, Result};
use changelog::{ChangelogOptions, Host};
use clap::Parser;
use github::GithubGraphQlClient;
use plugins::FirstTimeContributorPlugin;

use crate::config::CliConfig;
use crate::release::{compose_notes, ReleaseInput};

#[tokio::main]
async fn main() -> Result<()> {
    let config = CliConfig::parse();
    let telemetry = observability::init(config.log_format)?;

    let result = run(&config).await;
    if let Err(err) = &result {
        tracing::error!(error = %format!("{err:#}"), "release notes were not generated");
    }
    telemetry.shutdown();

    println!("{}", result?);
    Ok(())
}

async fn run(config: &CliConfig) -> Result<String> {
    let repository = config.repository()?;
    if config.token.is_none() {
        tracing::warn!("no GITHUB_TOKEN set; GitHub rejects anonymous GraphQL requests");
    }

    let client = GithubGraphQlClient::new(config.github())
        .context("failed to construct GitHub GraphQL client")?;
    let mut host = Host::new(repository).with_git(Arc::new(client));
    host.register(&FirstTimeContributorPlugin::with_config(config.plugin()));

    let input = ReleaseInput::load(&config.input).await?;
    let body = compose_notes(&host, ChangelogOptions::new(&config.base_url), input)
        .await
        .context("failed to create changelog")?;
    Ok(body)
}
