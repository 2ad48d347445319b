// 2022-2025 (c) Copyright Contributors to the GOSH DAO. All rights reserved.
//

use chrono::Datelike;
use salvo::prelude::*;

use super::obtain_context;
use super::render_bad_request;
use super::render_log_error;
use super::run_blocking;
use crate::WebServer;

/// `year` and `month` query values, defaulting to the current period.
fn requested_period(req: &Request, server: &WebServer) -> Result<(i32, u32), String> {
    let today = (server.clock)();
    let year = match req.queries().get("year") {
        Some(raw) => raw.parse::<i32>().map_err(|_| format!("Invalid year: {raw}"))?,
        None => today.year(),
    };
    let month = match req.queries().get("month") {
        Some(raw) => raw.parse::<u32>().map_err(|_| format!("Invalid month: {raw}"))?,
        None => today.month(),
    };
    Ok((year, month))
}

#[handler]
pub async fn honor_summary(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let Some((server, principal)) = obtain_context(depot, res) else {
        return;
    };
    let (year, month) = match requested_period(req, &server) {
        Ok(period) => period,
        Err(message) => return render_bad_request(res, &message),
    };
    let service = server.honor_service.clone();
    match run_blocking(move || service.dashboard_honor_summary(principal.user_id, year, month))
        .await
    {
        Ok(summary) => res.render(Json(summary)),
        Err(e) => render_log_error(res, &e),
    }
}

#[handler]
pub async fn honor_details(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let Some((server, principal)) = obtain_context(depot, res) else {
        return;
    };
    let (year, month) = match requested_period(req, &server) {
        Ok(period) => period,
        Err(message) => return render_bad_request(res, &message),
    };
    let service = server.honor_service.clone();
    match run_blocking(move || service.dashboard_honor(principal.user_id, year, month)).await {
        Ok(details) => res.render(Json(details)),
        Err(e) => render_log_error(res, &e),
    }
}
