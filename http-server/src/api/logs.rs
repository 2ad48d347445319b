// 2022-2025 (c) Copyright Contributors to the GOSH DAO. All rights reserved.
//

use log_core::LogId;
use log_core::LogRequest;
use log_core::VerificationAction;
use salvo::http::header::LOCATION;
use salvo::prelude::*;
use serde::Serialize;

use super::obtain_context;
use super::render_bad_request;
use super::render_log_error;
use super::run_blocking;

#[derive(Serialize, Clone, Debug)]
pub struct DeleteLogResponse {
    message: String,
    log_id: String,
}

pub(crate) fn path_id(req: &mut Request, res: &mut Response) -> Option<LogId> {
    let id = req.param::<LogId>("id");
    if id.is_none() {
        render_bad_request(res, "Path parameter must be a numeric id");
    }
    id
}

pub(crate) async fn parse_body<T>(req: &mut Request, res: &mut Response) -> Option<T>
where
    T: for<'de> serde::Deserialize<'de>,
{
    match req.parse_json::<T>().await {
        Ok(body) => Some(body),
        Err(e) => {
            tracing::warn!(target: "http_server", "Failed to parse request body: {e}");
            render_bad_request(res, "Invalid JSON body");
            None
        }
    }
}

#[handler]
pub async fn get_log(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let Some((server, principal)) = obtain_context(depot, res) else {
        return;
    };
    let Some(id) = path_id(req, res) else {
        return;
    };
    tracing::info!(target: "http_server", "Received request to get log with ID: {id}");
    let service = server.log_service.clone();
    match run_blocking(move || service.get_log(&principal, id)).await {
        Ok(log) => res.render(Json(log)),
        Err(e) => render_log_error(res, &e),
    }
}

#[handler]
pub async fn create_log(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let Some((server, principal)) = obtain_context(depot, res) else {
        return;
    };
    let Some(vacancy_id) = path_id(req, res) else {
        return;
    };
    let Some(request) = parse_body::<LogRequest>(req, res).await else {
        return;
    };
    tracing::info!(
        target: "http_server",
        "Received request to create log for vacancyId {vacancy_id}: {:?}",
        request.title
    );
    let service = server.log_service.clone();
    match run_blocking(move || service.create_log(&principal, vacancy_id, &request)).await {
        Ok(log) => {
            server.metrics.as_ref().inspect(|m| m.logs.report_created());
            res.status_code(StatusCode::CREATED);
            let _ = res.add_header(LOCATION, format!("/logs/{}", log.id), true);
            res.render(Json(log));
        }
        Err(e) => render_log_error(res, &e),
    }
}

#[handler]
pub async fn update_log(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let Some((server, principal)) = obtain_context(depot, res) else {
        return;
    };
    let Some(id) = path_id(req, res) else {
        return;
    };
    let Some(request) = parse_body::<LogRequest>(req, res).await else {
        return;
    };
    let service = server.log_service.clone();
    match run_blocking(move || service.update_log(&principal, id, &request)).await {
        Ok(log) => res.render(Json(log)),
        Err(e) => render_log_error(res, &e),
    }
}

#[handler]
pub async fn delete_log(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let Some((server, principal)) = obtain_context(depot, res) else {
        return;
    };
    let Some(id) = path_id(req, res) else {
        return;
    };
    let service = server.log_service.clone();
    match run_blocking(move || service.delete_log(&principal, id)).await {
        Ok(()) => {
            server.metrics.as_ref().inspect(|m| m.logs.report_deleted());
            res.render(Json(DeleteLogResponse {
                message: "Log berhasil dihapus".to_string(),
                log_id: id.to_string(),
            }));
        }
        Err(e) => render_log_error(res, &e),
    }
}

#[handler]
pub async fn verify_log(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let Some((server, _principal)) = obtain_context(depot, res) else {
        return;
    };
    let Some(id) = path_id(req, res) else {
        return;
    };
    let action: String = req.query("action").unwrap_or_default();
    let action = match action.parse::<VerificationAction>() {
        Ok(action) => action,
        Err(e) => {
            tracing::warn!(target: "http_server", "Invalid action parameter for verification: {action}");
            return render_bad_request(res, &e.to_string());
        }
    };
    let service = server.log_service.clone();
    match run_blocking(move || service.verify_log(id, action)).await {
        Ok(log) => {
            server.metrics.as_ref().inspect(|m| m.logs.report_verified(log.status));
            res.render(Json(log));
        }
        Err(e) => render_log_error(res, &e),
    }
}

#[handler]
pub async fn list_student_logs(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let Some((server, principal)) = obtain_context(depot, res) else {
        return;
    };
    let Some(vacancy_id) = req.query::<i64>("vacancyId") else {
        return render_bad_request(res, "Query parameter vacancyId is required");
    };
    let service = server.log_service.clone();
    match run_blocking(move || service.list_student_logs(principal.user_id, vacancy_id)).await {
        Ok(logs) => res.render(Json(logs)),
        Err(e) => render_log_error(res, &e),
    }
}

#[handler]
pub async fn list_lecturer_logs(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let Some((server, _principal)) = obtain_context(depot, res) else {
        return;
    };
    let Some(vacancy_id) = req.query::<i64>("vacancyId") else {
        return render_bad_request(res, "Query parameter vacancyId is required");
    };
    let service = server.log_service.clone();
    match run_blocking(move || service.list_lecturer_logs(vacancy_id)).await {
        Ok(logs) => res.render(Json(logs)),
        Err(e) => render_log_error(res, &e),
    }
}
