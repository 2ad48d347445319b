// 2022-2025 (c) Copyright Contributors to the GOSH DAO. All rights reserved.
//

use log_core::MessageRequest;
use salvo::prelude::*;

use super::logs::parse_body;
use super::logs::path_id;
use super::obtain_context;
use super::render_log_error;
use super::run_blocking;

#[handler]
pub async fn add_message(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let Some((server, principal)) = obtain_context(depot, res) else {
        return;
    };
    let Some(id) = path_id(req, res) else {
        return;
    };
    let Some(request) = parse_body::<MessageRequest>(req, res).await else {
        return;
    };
    tracing::info!(target: "http_server", "Received request to add message to log with ID: {id}");
    let service = server.log_service.clone();
    match run_blocking(move || service.add_message(&principal, id, request)).await {
        Ok(log) => {
            server.metrics.as_ref().inspect(|m| m.logs.report_message_added());
            res.render(Json(log));
        }
        Err(e) => render_log_error(res, &e),
    }
}

#[handler]
pub async fn get_messages(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let Some((server, principal)) = obtain_context(depot, res) else {
        return;
    };
    let Some(id) = path_id(req, res) else {
        return;
    };
    let service = server.log_service.clone();
    match run_blocking(move || service.get_messages(&principal, id)).await {
        Ok(messages) => res.render(Json(messages)),
        Err(e) => render_log_error(res, &e),
    }
}
