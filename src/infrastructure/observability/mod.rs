use crate::config::Config;
use opentelemetry::{global, KeyValue};
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::{runtime, trace as sdktrace, Resource};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

const DEFAULT_FILTER: &str = "lucky=debug,tower_http=debug,sqlx=warn";

/// Flushes pending spans when dropped
pub struct ObservabilityGuard {
    otlp: bool,
}

impl Drop for ObservabilityGuard {
    fn drop(&mut self) {
        if self.otlp {
            global::shutdown_tracer_provider();
        }
    }
}

pub fn init(config: &Config) -> anyhow::Result<ObservabilityGuard> {
    let otlp = init_tracing(config)?;
    if config.metrics_enabled {
        init_metrics(config)?;
    }
    Ok(ObservabilityGuard { otlp })
}

/// Tracing for command-line tools: stderr output only
pub fn init_cli_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "lucky=info".into());
    Registry::default()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn init_tracing(config: &Config) -> anyhow::Result<bool> {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_thread_ids(true)
        .with_target(true);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into());

    // Optional OTLP layer for distributed tracing
    if let Some(endpoint) = &config.otel_exporter_endpoint {
        let exporter = opentelemetry_otlp::new_exporter()
            .tonic()
            .with_endpoint(endpoint);

        let tracer = opentelemetry_otlp::new_pipeline()
            .tracing()
            .with_exporter(exporter)
            .with_trace_config(sdktrace::config().with_resource(Resource::new(vec![
                KeyValue::new("service.name", config.service_name.clone()),
            ])))
            .install_batch(runtime::Tokio)?;

        Registry::default()
            .with(env_filter)
            .with(fmt_layer)
            .with(tracing_opentelemetry::layer().with_tracer(tracer))
            .init();

        tracing::info!("Exporting traces to {}", endpoint);
        Ok(true)
    } else {
        Registry::default().with(env_filter).with(fmt_layer).init();
        Ok(false)
    }
}

fn init_metrics(config: &Config) -> anyhow::Result<()> {
    metrics_exporter_prometheus::PrometheusBuilder::new()
        .with_http_listener(([0, 0, 0, 0], config.metrics_port))
        .install()?;

    metrics::describe_counter!("lucky_fortunes_created_total", "Fortunes created");
    metrics::describe_counter!("lucky_fortunes_patched_total", "Fortunes patched");
    metrics::describe_counter!("lucky_authors_patched_total", "Authors renamed");
    metrics::describe_counter!("lucky_tags_patched_total", "Tags renamed");
    metrics::describe_counter!("lucky_retries_total", "Retried write attempts");

    tracing::info!(
        "Metrics exporter (Prometheus) started on port {}",
        config.metrics_port
    );
    Ok(())
}
