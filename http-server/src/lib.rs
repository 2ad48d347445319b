// 2022-2025 (c) Copyright Contributors to the GOSH DAO. All rights reserved.
//

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use log_core::principal::Role;
use log_core::service::local_today;
use log_core::service::Clock;
use log_core::DashboardHonorService;
use log_core::LogService;
use salvo::catch_panic::CatchPanic;
use salvo::conn::TcpListener;
use salvo::prelude::*;
use typed_builder::TypedBuilder;

pub use crate::api::ApiError;
pub use crate::auth::Claims;
pub use crate::auth::JwtAuth;
pub use crate::auth::RequireRole;
use crate::metrics::record_http_metrics;
pub use crate::metrics::Metrics;
use crate::timeout::RequestTimeout;

mod api;
pub mod auth;
pub mod metrics;
mod timeout;

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Clone, TypedBuilder)]
pub struct WebServer {
    #[builder(setter(into))]
    pub addr: String,
    pub log_service: Arc<LogService>,
    pub honor_service: Arc<DashboardHonorService>,
    #[builder(setter(into))]
    pub jwt_secret: String,
    #[builder(default = DEFAULT_REQUEST_TIMEOUT)]
    pub request_timeout: Duration,
    #[builder(default)]
    pub metrics: Option<Metrics>,
    /// Source of the default dashboard period.
    #[builder(default = local_today as Clock)]
    pub clock: Clock,
}

impl WebServer {
    pub fn route(self) -> Router {
        let student = || RequireRole::new([Role::Mahasiswa]);
        let lecturer = || RequireRole::new([Role::Dosen]);

        // GET    /logs/{id}            own log
        // POST   /logs/{vacancyId}     create log for a vacancy
        // PATCH  /logs/{id}            edit a reported log
        // DELETE /logs/{id}            remove a reported log
        let log_router = Router::with_path("{id}")
            .push(Router::with_path("verify").hoop(lecturer()).post(api::logs::verify_log))
            .push(
                Router::with_path("messages")
                    .push(Router::new().hoop(student()).post(api::messages::add_message))
                    .push(
                        Router::new()
                            .hoop(RequireRole::new([Role::Mahasiswa, Role::Dosen]))
                            .get(api::messages::get_messages),
                    ),
            )
            .push(
                Router::new()
                    .hoop(student())
                    .get(api::logs::get_log)
                    .post(api::logs::create_log)
                    .patch(api::logs::update_log)
                    .delete(api::logs::delete_log),
            );

        // static segments go first so they are not taken for ids
        let logs_router = Router::with_path("logs")
            .push(
                Router::with_path("student").hoop(student()).get(api::logs::list_student_logs),
            )
            .push(
                Router::with_path("lecturer").hoop(lecturer()).get(api::logs::list_lecturer_logs),
            )
            .push(log_router);

        let dashboard_router = Router::with_path("dashboard/honor")
            .hoop(student())
            .get(api::dashboard::honor_summary)
            .push(Router::with_path("details").get(api::dashboard::honor_details));

        let health_router = Router::with_path("actuator/health").get(api::health::health);

        Router::new() //
            .hoop(CatchPanic::new())
            .hoop(Logger::new())
            .hoop(affix_state::inject(self.clone()))
            .hoop(record_http_metrics)
            .hoop(RequestTimeout::new(self.request_timeout))
            .hoop(JwtAuth::new(self.jwt_secret.as_bytes()))
            .get(api::home::home)
            .push(health_router)
            .push(logs_router)
            .push(dashboard_router)
    }

    /// Serves until `shutdown` resolves, then stops gracefully.
    pub async fn run(
        self,
        shutdown: impl Future<Output = ()> + Send + 'static,
    ) -> anyhow::Result<()> {
        let acceptor = TcpListener::new(self.addr.clone()).try_bind().await?;
        let server = Server::new(acceptor);
        let handle = server.handle();
        tokio::spawn(async move {
            shutdown.await;
            tracing::info!(target: "http_server", "Shutting down HTTP server");
            handle.stop_graceful(None);
        });

        tracing::info!(target: "http_server", "Start HTTP server on {}", &self.addr);
        server.serve(self.route()).await;
        tracing::info!(target: "http_server", "HTTP server stopped");
        Ok(())
    }
}
