//! Tracing subscriber setup: fmt layer, env filter and OTLP export.

use anyhow::Result;
use opentelemetry::{trace::TracerProvider as _, KeyValue};
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::{runtime::Tokio, trace, Resource};
use std::time::Duration;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter, Registry};

/// Install the global tracing subscriber.
///
/// Spans are exported over OTLP/gRPC (endpoint via the standard
/// `OTEL_EXPORTER_OTLP_ENDPOINT` variable) and logged locally through the
/// fmt layer. `RUST_LOG` still wins over the verbosity flag.
///
/// # Errors
///
/// Returns an error if the exporter cannot be built or a global
/// subscriber is already set.
pub fn init(verbosity_level: Option<tracing::Level>) -> Result<()> {
    let otlp_exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_timeout(Duration::from_secs(3))
        .build()?;

    let provider = trace::TracerProvider::builder()
        .with_batch_exporter(otlp_exporter, Tokio)
        .with_config(trace::Config::default().with_resource(Resource::new(vec![
            KeyValue::new("service.name", env!("CARGO_PKG_NAME")),
            KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
        ])))
        .build();

    let tracer = provider.tracer(env!("CARGO_PKG_NAME"));
    opentelemetry::global::set_tracer_provider(provider);
    let telemetry = OpenTelemetryLayer::new(tracer);

    let fmt_layer = fmt::layer()
        .with_file(true)
        .with_line_number(true)
        .with_thread_ids(true)
        .with_target(false);

    // RUST_LOG=
    let env_filter = EnvFilter::builder()
        .with_default_directive(
            verbosity_level
                .unwrap_or(tracing::Level::ERROR)
                .into(),
        )
        .from_env_lossy();

    let subscriber = Registry::default()
        .with(fmt_layer)
        .with(telemetry)
        .with(env_filter);

    tracing::subscriber::set_global_default(subscriber)?;

    Ok(())
}
