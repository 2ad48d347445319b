// 2022-2025 (c) Copyright Contributors to the GOSH DAO. All rights reserved.
//

use salvo::prelude::*;
use serde::Serialize;

use crate::api::render_error_response;
use crate::api::run_blocking;
use crate::WebServer;

#[derive(Serialize, Clone, Debug)]
pub struct HealthResponse {
    status: &'static str,
    total_logs: u64,
}

/// Liveness plus a storage round trip.
#[handler]
pub async fn health(depot: &mut Depot, res: &mut Response) {
    let Ok(server) = depot.obtain::<WebServer>() else {
        render_error_response(res, StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_SERVER_ERROR", None);
        return;
    };
    let service = server.log_service.clone();
    match run_blocking(move || service.count_logs()).await {
        Ok(total_logs) => res.render(Json(HealthResponse { status: "UP", total_logs })),
        Err(e) => {
            tracing::error!(target: "http_server", "Health check failed: {e}");
            res.status_code(StatusCode::SERVICE_UNAVAILABLE);
            res.render(Json(HealthResponse { status: "DOWN", total_logs: 0 }));
        }
    }
}
