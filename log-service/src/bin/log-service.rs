// 2022-2025 (c) Copyright Contributors to the GOSH DAO. All rights reserved.
//

use std::path::PathBuf;
use std::process::exit;
use std::sync::Arc;

use clap::Parser;
use http_server::WebServer;
use log_core::DashboardHonorService;
use log_core::LogService;
use log_service::config::load_config_from_file;
use log_service::config::Config;
use log_service::config::ConfigOverrides;
use log_service::helper::init_metrics;
use log_service::helper::init_tracing;
use log_service::helper::shutdown_metrics;
use log_service::helper::shutdown_tracing;
use log_service::open_repository;
use log_service::wait_for_shutdown;

/// Student work-log service
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// YAML config file. Built-in defaults are used when omitted
    #[arg(short, long, env = "LOG_SERVICE_CONFIG")]
    config: Option<PathBuf>,

    /// HTTP listen address
    #[arg(short, long, env = "LOG_SERVICE_LISTEN")]
    listen: Option<String>,

    /// SQLite database file, or `:memory:` for in-memory storage
    #[arg(long, env = "LOG_SERVICE_DB")]
    db: Option<PathBuf>,

    /// HS256 secret for bearer tokens
    #[arg(long, env = "JWT_SECRET", hide_env_values = true)]
    jwt_secret: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long)]
    request_timeout_secs: Option<u64>,
}

fn main() -> Result<(), std::io::Error> {
    eprintln!("Starting log-service version: {}", env!("CARGO_PKG_VERSION"));

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(async { tokio_main().await });

    exit(0);
}

async fn tokio_main() {
    let args = Args::parse();
    if let Err(err) = init_tracing() {
        eprintln!("{err}");
        exit(1);
    }
    tracing::info!("Tracing initialized");

    let exit_code = match execute(args).await {
        Ok(_) => 0,
        Err(err) => {
            tracing::error!("{err}");
            1
        }
    };
    shutdown_tracing();
    exit(exit_code);
}

async fn execute(args: Args) -> anyhow::Result<()> {
    let config = match &args.config {
        Some(path) => load_config_from_file(path)?,
        None => Config::default(),
    }
    .with_overrides(ConfigOverrides {
        listen: args.listen,
        db: args.db,
        jwt_secret: args.jwt_secret,
        request_timeout_secs: args.request_timeout_secs,
    });
    config.validate()?;
    tracing::info!(
        "Service config: listen={} storage={:?} path={:?} timeout={:?}",
        config.server.listen,
        config.storage.kind,
        config.storage.path,
        config.request_timeout(),
    );

    let repository = open_repository(&config.storage)?;
    let log_service = Arc::new(LogService::new(repository.clone()));
    let honor_service = Arc::new(DashboardHonorService::new(repository));

    let (meter_provider, metrics) = match init_metrics()? {
        Some((provider, metrics)) => (Some(provider), Some(metrics)),
        None => (None, None),
    };

    let server = WebServer::builder()
        .addr(config.server.listen.clone())
        .log_service(log_service)
        .honor_service(honor_service)
        .jwt_secret(config.jwt_secret()?)
        .request_timeout(config.request_timeout())
        .metrics(metrics)
        .build();

    let result = server.run(wait_for_shutdown(tokio::signal::ctrl_c())).await;

    shutdown_metrics(meter_provider);
    result
}
