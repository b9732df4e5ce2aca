//! Logging setup for the pulseboard binary
//!
//! Every dashboard request opens its own connection and runs seven queries, so
//! the default filter keeps tower-http request spans but holds sqlx at `warn`.
//! `RUST_LOG` replaces the defaults entirely.
//!
//! With the `telemetry` feature, `--otel` also exports spans over OTLP:
//!   OTEL_EXPORTER_OTLP_ENDPOINT   # default: http://localhost:4317
//!   OTEL_SERVICE_NAME             # default: pulseboard

use anyhow::{anyhow, Result};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset
pub const DEFAULT_DIRECTIVES: &str = "info,tower_http=info,sqlx=warn";

/// Filter used with `--debug` when `RUST_LOG` is unset
pub const DEBUG_DIRECTIVES: &str = "debug,tower_http=debug,sqlx=info,hyper=info,h2=info";

/// Tracing configuration options
#[derive(Debug, Clone, Default)]
pub struct TracingConfig {
    /// Verbose logging and targets in output
    pub debug: bool,
    /// Export spans via OTLP (telemetry builds only)
    pub otel: bool,
}

pub fn default_directives(debug: bool) -> &'static str {
    if debug {
        DEBUG_DIRECTIVES
    } else {
        DEFAULT_DIRECTIVES
    }
}

/// Build the filter from an optional `RUST_LOG` value.
///
/// A blank or unparsable value falls back to the defaults.
pub fn build_filter(rust_log: Option<&str>, debug: bool) -> EnvFilter {
    rust_log
        .filter(|s| !s.trim().is_empty())
        .and_then(|s| EnvFilter::try_new(s).ok())
        .unwrap_or_else(|| EnvFilter::new(default_directives(debug)))
}

/// Install the global subscriber.
pub fn init(config: &TracingConfig) -> Result<()> {
    let rust_log = std::env::var("RUST_LOG").ok();
    let filter = build_filter(rust_log.as_deref(), config.debug);
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(config.debug)
        .compact();

    let registry = tracing_subscriber::registry().with(filter).with(fmt_layer);

    #[cfg(feature = "telemetry")]
    if config.otel {
        let (layer, endpoint) = otel::layer()?;
        registry.with(layer).try_init().map_err(|err| anyhow!(err))?;
        tracing::info!(endpoint = %endpoint, "OTLP span export enabled");
        return Ok(());
    }

    registry.try_init().map_err(|err| anyhow!(err))?;

    #[cfg(not(feature = "telemetry"))]
    if config.otel {
        tracing::warn!("--otel ignored: built without the `telemetry` feature");
    }

    Ok(())
}

#[cfg(feature = "telemetry")]
mod otel {
    use anyhow::{anyhow, Result};
    use opentelemetry::trace::TracerProvider as _;
    use opentelemetry::KeyValue;
    use opentelemetry_otlp::WithExportConfig;
    use opentelemetry_sdk::trace::{Tracer, TracerProvider};
    use tracing::Subscriber;
    use tracing_opentelemetry::OpenTelemetryLayer;
    use tracing_subscriber::registry::LookupSpan;

    /// OTLP layer plus the endpoint it exports to.
    pub fn layer<S>() -> Result<(OpenTelemetryLayer<S, Tracer>, String)>
    where
        S: Subscriber + for<'span> LookupSpan<'span>,
    {
        let endpoint = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
            .unwrap_or_else(|_| "http://localhost:4317".to_string());
        let service_name =
            std::env::var("OTEL_SERVICE_NAME").unwrap_or_else(|_| "pulseboard".to_string());

        let exporter = opentelemetry_otlp::SpanExporter::builder()
            .with_tonic()
            .with_endpoint(&endpoint)
            .build()
            .map_err(|e| anyhow!("Failed to create OTLP exporter: {}", e))?;

        let provider = TracerProvider::builder()
            .with_batch_exporter(exporter, opentelemetry_sdk::runtime::Tokio)
            .with_resource(opentelemetry_sdk::Resource::new(vec![KeyValue::new(
                "service.name",
                service_name,
            )]))
            .build();

        let tracer = provider.tracer("pulseboard");
        // Provider must outlive the process or export stops
        let _ = opentelemetry::global::set_tracer_provider(provider);

        Ok((tracing_opentelemetry::layer().with_tracer(tracer), endpoint))
    }
}

/// Flush pending spans
#[cfg(feature = "telemetry")]
pub fn shutdown_otel() {
    opentelemetry::global::shutdown_tracer_provider();
}

#[cfg(not(feature = "telemetry"))]
pub fn shutdown_otel() {}
