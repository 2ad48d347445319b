// 2022-2025 (c) Copyright Contributors to the GOSH DAO. All rights reserved.
//

pub(crate) mod dashboard;
pub(crate) mod health;
pub(crate) mod home;
pub(crate) mod logs;
pub(crate) mod messages;

use log_core::LogError;
use log_core::Principal;
use salvo::http::StatusCode;
use salvo::prelude::Json;
use salvo::Depot;
use salvo::Response;
use serde::Deserialize;
use serde::Serialize;

use crate::WebServer;

/// Error envelope returned by every endpoint.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ApiError {
    pub error: ApiErrorData,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ApiErrorData {
    pub code: String,
    pub message: String,
}

pub(crate) fn render_error_response(
    res: &mut Response,
    status_code: StatusCode,
    code: &str,
    message: Option<&str>,
) {
    res.status_code(status_code);
    res.render(Json(ApiError {
        error: ApiErrorData {
            code: code.to_string(),
            message: message.unwrap_or(code).to_string(),
        },
    }));
}

pub(crate) fn render_log_error(res: &mut Response, error: &LogError) {
    let message = error.to_string();
    match error {
        LogError::Validation(_) => {
            render_error_response(res, StatusCode::BAD_REQUEST, "VALIDATION_ERROR", Some(&message))
        }
        LogError::InvalidState(_) => {
            render_error_response(res, StatusCode::BAD_REQUEST, "INVALID_STATE", Some(&message))
        }
        LogError::InvalidPeriod(_) => {
            render_error_response(res, StatusCode::BAD_REQUEST, "BAD_REQUEST", Some(&message))
        }
        LogError::NotFound(_) => {
            render_error_response(res, StatusCode::NOT_FOUND, "NOT_FOUND", Some(&message))
        }
        LogError::Forbidden(_) => {
            render_error_response(res, StatusCode::FORBIDDEN, "FORBIDDEN", Some(&message))
        }
        LogError::Storage(e) => {
            tracing::error!(target: "http_server", "Storage failure: {e:#}");
            render_error_response(
                res,
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_SERVER_ERROR",
                Some("Internal server error"),
            )
        }
    }
}

/// Runs a storage-bound service call on the blocking pool, so the request
/// timeout can fire while it is still running.
pub(crate) async fn run_blocking<T, F>(call: F) -> Result<T, LogError>
where
    F: FnOnce() -> Result<T, LogError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(call)
        .await
        .unwrap_or_else(|e| Err(LogError::Storage(anyhow::format_err!("Service task failed: {e}"))))
}

pub(crate) fn render_bad_request(res: &mut Response, message: &str) {
    render_error_response(res, StatusCode::BAD_REQUEST, "BAD_REQUEST", Some(message));
}

/// Server state and the authenticated caller. Renders an error and returns
/// `None` when either is missing.
pub(crate) fn obtain_context(
    depot: &Depot,
    res: &mut Response,
) -> Option<(WebServer, Principal)> {
    let Ok(server) = depot.obtain::<WebServer>() else {
        tracing::error!(target: "http_server", "Can't obtain internal state");
        render_error_response(
            res,
            StatusCode::INTERNAL_SERVER_ERROR,
            "INTERNAL_SERVER_ERROR",
            Some("Web Server state is not found"),
        );
        return None;
    };
    let Ok(principal) = depot.obtain::<Principal>() else {
        render_error_response(res, StatusCode::UNAUTHORIZED, "UNAUTHORIZED", None);
        return None;
    };
    Some((server.clone(), principal.clone()))
}
