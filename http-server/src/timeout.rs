// 2022-2025 (c) Copyright Contributors to the GOSH DAO. All rights reserved.
//

use std::time::Duration;

use salvo::prelude::*;

use crate::api::render_error_response;

/// Answers 503 when the rest of the chain does not finish in time.
pub struct RequestTimeout {
    timeout: Duration,
}

impl RequestTimeout {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

#[async_trait]
impl Handler for RequestTimeout {
    async fn handle(
        &self,
        req: &mut Request,
        depot: &mut Depot,
        res: &mut Response,
        ctrl: &mut FlowCtrl,
    ) {
        let path = req.uri().path().to_string();
        if tokio::time::timeout(self.timeout, ctrl.call_next(req, depot, res)).await.is_err() {
            tracing::warn!(target: "http_server", "Request {path} timed out after {:?}", self.timeout);
            ctrl.skip_rest();
            render_error_response(
                res,
                StatusCode::SERVICE_UNAVAILABLE,
                "SERVICE_UNAVAILABLE",
                Some("Request timed out"),
            );
        }
    }
}
