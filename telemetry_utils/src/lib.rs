// 2022-2025 (c) Copyright Contributors to the GOSH DAO. All rights reserved.
//

use std::time::Duration;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use opentelemetry::KeyValue;
use opentelemetry_sdk::metrics::PeriodicReader;
use opentelemetry_sdk::metrics::SdkMeterProvider;
use opentelemetry_sdk::runtime::Tokio;

const EXPORT_INTERVAL: Duration = Duration::from_secs(30);
const EXPORT_TIMEOUT: Duration = Duration::from_secs(5);

pub fn now_ms() -> u64 {
    SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis() as u64
}

pub fn get_metrics_endpoint() -> Option<String> {
    std::env::var("OTEL_EXPORTER_OTLP_METRICS_ENDPOINT")
        .or_else(|_| std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT"))
        .ok()
        .filter(|endpoint| !endpoint.trim().is_empty())
}

/// Meter provider that pushes to the OTLP collector from the environment.
/// Must be called inside a tokio runtime.
pub fn init_meter_provider(service_name: &str) -> anyhow::Result<SdkMeterProvider> {
    let default_service_name = KeyValue::new("service.name", service_name.to_string());

    let resource = opentelemetry_sdk::Resource::new(vec![default_service_name])
        .merge(&opentelemetry_sdk::Resource::default());

    let metric_exporter = opentelemetry_otlp::MetricExporter::builder()
        .with_tonic()
        .build()
        .map_err(|e| anyhow::format_err!("Failed to build OTLP metrics exporter: {e}"))?;

    tracing::info!("Exporting metrics for {service_name} every {EXPORT_INTERVAL:?}");
    Ok(SdkMeterProvider::builder()
        .with_reader(
            PeriodicReader::builder(metric_exporter, Tokio)
                .with_interval(EXPORT_INTERVAL)
                .with_timeout(EXPORT_TIMEOUT)
                .build(),
        )
        .with_resource(resource)
        .build())
}
