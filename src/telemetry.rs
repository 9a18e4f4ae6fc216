use opentelemetry::KeyValue;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::{trace as sdktrace, Resource};
use opentelemetry_semantic_conventions::resource;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Wires up tracing: env-filtered fmt output (text by default, JSON when
/// RUST_LOG_FORMAT=json) and an optional OTLP span exporter when
/// OTEL_EXPORTER_OTLP_ENDPOINT is set.
pub fn init_telemetry(service_name: &str) {
    let log_format = std::env::var("RUST_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let otlp_endpoint = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT").ok();

    // sqlx and sea_orm are chatty at debug; keep them at warn unless asked.
    let env_filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG")
            .unwrap_or_else(|_| "info,zooportal_server=info,sqlx=warn,sea_orm=warn".into()),
    );

    let registry = tracing_subscriber::registry().with(env_filter);

    let otel_layer = otlp_endpoint.map(|endpoint| {
        let tracer = opentelemetry_otlp::new_pipeline()
            .tracing()
            .with_exporter(
                opentelemetry_otlp::new_exporter()
                    .tonic()
                    .with_endpoint(endpoint),
            )
            .with_trace_config(
                sdktrace::config()
                    .with_resource(Resource::new(vec![KeyValue::new(
                        resource::SERVICE_NAME,
                        service_name.to_string(),
                    )]))
                    .with_sampler(sdktrace::Sampler::AlwaysOn),
            )
            .install_batch(opentelemetry_sdk::runtime::Tokio)
            .expect("failed to install OpenTelemetry tracer");

        tracing_opentelemetry::layer().with_tracer(tracer)
    });

    if log_format == "json" {
        let fmt_layer = tracing_subscriber::fmt::layer().json().flatten_event(true);
        registry.with(otel_layer).with(fmt_layer).init();
    } else {
        let fmt_layer = tracing_subscriber::fmt::layer();
        registry.with(otel_layer).with(fmt_layer).init();
    }
}
