// 2022-2025 (c) Copyright Contributors to the GOSH DAO. All rights reserved.
//

use std::str::FromStr;

use http_server::Metrics;
use opentelemetry::metrics::MeterProvider;
use opentelemetry::trace::TracerProvider;
use opentelemetry_sdk::metrics::SdkMeterProvider;
use telemetry_utils::get_metrics_endpoint;
use telemetry_utils::init_meter_provider;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

pub const SERVICE_NAME: &str = "log-service";

fn default_verbose_filter() -> tracing_subscriber::EnvFilter {
    tracing_subscriber::EnvFilter::new(
        "http_server=trace,\
            log_service=trace,\
            log_core=trace,\
            database=trace,\
            sqlite=trace,\
            salvo_extra=info",
    )
}

fn default_non_verbose_filter() -> tracing_subscriber::EnvFilter {
    tracing_subscriber::EnvFilter::new(
        "http_server=info,\
            log_service=info,\
            log_core=info,\
            database=info,\
            sqlite=warn,\
            salvo_extra=info",
    )
}

fn default_filter() -> tracing_subscriber::EnvFilter {
    if std::env::var("LOG_SERVICE_VERBOSE").is_ok() {
        default_verbose_filter()
    } else {
        default_non_verbose_filter()
    }
}

/// Logs go to stderr. Spans are also exported over OTLP for the targets
/// listed in `TELEMETRY_LOG`.
pub fn init_tracing() -> anyhow::Result<()> {
    let filter = if std::env::var(tracing_subscriber::EnvFilter::DEFAULT_ENV).is_ok() {
        tracing_subscriber::EnvFilter::from_default_env()
    } else {
        default_filter()
    };

    let telemetry_layer = match std::env::var("TELEMETRY_LOG")
        .map(|x| tracing_subscriber::filter::Targets::from_str(&x))
    {
        Ok(Ok(targets)) => Some(
            tracing_opentelemetry::layer()
                .with_tracer(init_tracer()?)
                .with_filter(tracing_subscriber::filter::filter_fn(|x| x.is_span()))
                .with_filter(targets),
        ),
        _ => None,
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_thread_ids(true)
                .with_ansi(false)
                .with_writer(std::io::stderr)
                .with_filter(filter),
        )
        .with(telemetry_layer)
        .try_init()
        .map_err(|e| anyhow::format_err!("Failed to init tracing: {e}"))
}

pub fn shutdown_tracing() {
    opentelemetry::global::shutdown_tracer_provider();
}

pub fn init_tracer() -> anyhow::Result<opentelemetry_sdk::trace::Tracer> {
    let default_service_name = opentelemetry::KeyValue::new("service.name", SERVICE_NAME);

    let resource = opentelemetry_sdk::Resource::new(vec![default_service_name.clone()])
        .merge(&opentelemetry_sdk::Resource::default());

    let service_name = resource
        .get(default_service_name.key.clone())
        .unwrap_or_else(|| default_service_name.value.clone())
        .to_string();

    let otlp_exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .build()
        .map_err(|e| anyhow::format_err!("Failed to build OTLP exporter: {e}"))?;

    let tracer_provider = opentelemetry_sdk::trace::TracerProvider::builder()
        .with_batch_exporter(otlp_exporter, opentelemetry_sdk::runtime::Tokio)
        .with_resource(resource)
        .build();

    let tracer = tracer_provider.tracer(service_name);
    opentelemetry::global::set_tracer_provider(tracer_provider);
    Ok(tracer)
}

/// Metrics are only collected when an OTLP endpoint is configured.
pub fn init_metrics() -> anyhow::Result<Option<(SdkMeterProvider, Metrics)>> {
    let Some(endpoint) = get_metrics_endpoint() else {
        tracing::info!("OTLP endpoint is not set, metrics are disabled");
        return Ok(None);
    };
    tracing::info!("Metrics endpoint: {endpoint}");
    let provider = init_meter_provider(SERVICE_NAME)?;
    opentelemetry::global::set_meter_provider(provider.clone());
    let meter = provider.meter(SERVICE_NAME);
    Ok(Some((provider, Metrics::new(&meter))))
}

pub fn shutdown_metrics(provider: Option<SdkMeterProvider>) {
    if let Some(provider) = provider {
        if let Err(err) = provider.shutdown() {
            tracing::warn!("Failed to shutdown meter provider: {err}");
        }
    }
}
