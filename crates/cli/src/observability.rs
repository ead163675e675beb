//! Tracing subscriber wiring.
//!
//! Every crate in the workspace emits `tracing` spans and events; this module
//! is the only place a subscriber is installed. Logs go to stderr so stdout
//! carries nothing but the rendered notes.

use anyhow::{Context, Result};
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::trace::TracerProvider;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::LogFormat;

const OTLP_ENDPOINT_VAR: &str = "OTEL_EXPORTER_OTLP_ENDPOINT";
const TRACER_NAME: &str = "first-time-contributor";

/// Handle flushing exported spans on shutdown.
pub struct Telemetry {
    provider: Option<TracerProvider>,
}

impl Telemetry {
    /// Flushes and stops the OTLP exporter, if one was started.
    pub fn shutdown(self) {
        if let Some(provider) = self.provider {
            if let Err(err) = provider.shutdown() {
                tracing::warn!(error = %err, "failed to flush OTLP spans");
            }
        }
    }
}

/// Installs the global subscriber.
///
/// The filter comes from `RUST_LOG` (default `info`). Spans are additionally
/// exported over OTLP/gRPC when `OTEL_EXPORTER_OTLP_ENDPOINT` is set.
pub fn init(format: LogFormat) -> Result<Telemetry> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let provider = if std::env::var_os(OTLP_ENDPOINT_VAR).is_some() {
        let exporter = opentelemetry_otlp::SpanExporter::builder()
            .with_tonic()
            .build()
            .context("failed to build OTLP span exporter")?;
        Some(
            TracerProvider::builder()
                .with_batch_exporter(exporter, opentelemetry_sdk::runtime::Tokio)
                .build(),
        )
    } else {
        None
    };

    let otel = provider
        .as_ref()
        .map(|provider| tracing_opentelemetry::layer().with_tracer(provider.tracer(TRACER_NAME)));

    let (json, pretty) = match format {
        LogFormat::Json => (Some(fmt::layer().json().with_writer(std::io::stderr)), None),
        LogFormat::Pretty => (None, Some(fmt::layer().with_writer(std::io::stderr))),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(otel)
        .with(json)
        .with(pretty)
        .try_init()
        .context("failed to install tracing subscriber")?;

    Ok(Telemetry { provider })
}
