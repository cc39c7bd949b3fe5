use crate::config::Config;
use opentelemetry::{global, trace::TraceError, KeyValue};
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::{runtime, trace as sdktrace, Resource};
use tracing::Subscriber;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{
    layer::SubscriberExt, registry::LookupSpan, util::SubscriberInitExt, EnvFilter, Registry,
};

const DEFAULT_FILTER: &str = "hr_calendar=debug,sqlx=warn";

/// Returned by [`init`]. Dropping it flushes pending spans when OTLP export is on.
pub struct ObservabilityGuard {
    otlp_enabled: bool,
}

impl ObservabilityGuard {
    pub fn otlp_enabled(&self) -> bool {
        self.otlp_enabled
    }
}

impl Drop for ObservabilityGuard {
    fn drop(&mut self) {
        if self.otlp_enabled {
            global::shutdown_tracer_provider();
        }
    }
}

/// Logging for the calendar crate, plus OTLP spans and a Prometheus endpoint when
/// `Config` asks for them.
///
/// Embedding applications often install their own subscriber first; that one wins.
pub fn init(config: &Config) -> Result<ObservabilityGuard, Box<dyn std::error::Error>> {
    let otlp = match config.otel_exporter_endpoint.as_deref() {
        Some(endpoint) => Some(build_otlp_layer(endpoint, &config.service_name)?),
        None => None,
    };
    let otlp_enabled = otlp.is_some();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let installed = Registry::default()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_thread_ids(true),
        )
        .with(otlp)
        .try_init();
    if installed.is_err() {
        tracing::debug!("Keeping the tracing subscriber installed by the host");
    }

    if let Some(port) = config.metrics_port {
        metrics_exporter_prometheus::PrometheusBuilder::new()
            .with_http_listener(([0, 0, 0, 0], port))
            .install()?;
        tracing::info!(port, "Calendar metrics exposed for Prometheus");
    }

    Ok(ObservabilityGuard { otlp_enabled })
}

fn build_otlp_layer<S>(
    endpoint: &str,
    service_name: &str,
) -> Result<OpenTelemetryLayer<S, sdktrace::Tracer>, TraceError>
where
    S: Subscriber + for<'span> LookupSpan<'span>,
{
    let tracer = opentelemetry_otlp::new_pipeline()
        .tracing()
        .with_exporter(
            opentelemetry_otlp::new_exporter()
                .tonic()
                .with_endpoint(endpoint),
        )
        .with_trace_config(sdktrace::config().with_resource(Resource::new(vec![
            KeyValue::new("service.name", service_name.to_string()),
        ])))
        .install_batch(runtime::Tokio)?;

    Ok(tracing_opentelemetry::layer().with_tracer(tracer))
}
