// 2022-2025 (c) Copyright Contributors to the GOSH DAO. All rights reserved.
//

use log_core::LogStatus;
use opentelemetry::metrics::Counter;
use opentelemetry::metrics::Histogram;
use opentelemetry::metrics::Meter;
use opentelemetry::KeyValue;
use salvo::prelude::*;
use telemetry_utils::now_ms;

use crate::WebServer;

#[derive(Clone)]
pub struct Metrics {
    pub http: HttpMetrics,
    pub logs: LogMetrics,
}

impl Metrics {
    pub fn new(meter: &Meter) -> Self {
        Self { http: HttpMetrics::new(meter), logs: LogMetrics::new(meter) }
    }
}

#[derive(Clone)]
pub struct HttpMetrics {
    requests: Counter<u64>,
    request_duration: Histogram<u64>,
}

impl HttpMetrics {
    pub fn new(meter: &Meter) -> Self {
        HttpMetrics {
            requests: meter.u64_counter("log_service_http_requests").build(),
            request_duration: meter
                .u64_histogram("log_service_http_request_duration")
                .with_unit("ms")
                .with_boundaries(vec![
                    1.0, 5.0, 10.0, 25.0, 50.0, 100.0, 250.0, 500.0, 1000.0, 5000.0, 30000.0,
                ])
                .build(),
        }
    }

    pub fn report_request(&self, method: &str, status: u16, duration_ms: u64) {
        let attributes = [
            KeyValue::new("method", method.to_string()),
            KeyValue::new("status", status as i64),
        ];
        self.requests.add(1, &attributes);
        self.request_duration.record(duration_ms, &attributes);
    }
}

#[derive(Clone)]
pub struct LogMetrics {
    created: Counter<u64>,
    deleted: Counter<u64>,
    verified: Counter<u64>,
    messages_added: Counter<u64>,
}

impl LogMetrics {
    pub fn new(meter: &Meter) -> Self {
        LogMetrics {
            created: meter.u64_counter("log_service_logs_created").build(),
            deleted: meter.u64_counter("log_service_logs_deleted").build(),
            verified: meter.u64_counter("log_service_logs_verified").build(),
            messages_added: meter.u64_counter("log_service_log_messages_added").build(),
        }
    }

    pub fn report_created(&self) {
        self.created.add(1, &[]);
    }

    pub fn report_deleted(&self) {
        self.deleted.add(1, &[]);
    }

    pub fn report_verified(&self, status: LogStatus) {
        self.verified.add(1, &[KeyValue::new("status", status.as_str())]);
    }

    pub fn report_message_added(&self) {
        self.messages_added.add(1, &[]);
    }
}

/// Counts requests and their duration by method and final status code.
#[handler]
pub async fn record_http_metrics(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let started_ms = now_ms();
    let method = req.method().to_string();
    ctrl.call_next(req, depot, res).await;

    let Ok(server) = depot.obtain::<WebServer>() else {
        return;
    };
    let status = res.status_code.unwrap_or(StatusCode::OK).as_u16();
    server.metrics.as_ref().inspect(|m| {
        m.http.report_request(&method, status, now_ms().saturating_sub(started_ms))
    });
}
