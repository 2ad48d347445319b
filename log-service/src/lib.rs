// 2022-2025 (c) Copyright Contributors to the GOSH DAO. All rights reserved.
//

pub mod config;
pub mod helper;

use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;

use database::InMemoryLogRepository;
use database::SqliteLogRepository;
use log_core::LogRepository;

use crate::config::StorageConfig;
use crate::config::StorageKind;

pub fn open_repository(storage: &StorageConfig) -> anyhow::Result<Arc<dyn LogRepository>> {
    Ok(match storage.kind {
        StorageKind::Memory => {
            tracing::info!("Using in-memory log storage");
            Arc::new(InMemoryLogRepository::new())
        }
        StorageKind::Sqlite => {
            tracing::info!("Using SQLite log storage at {:?}", storage.path);
            Arc::new(SqliteLogRepository::open(&storage.path)?)
        }
    })
}

/// Resolves when `signal` fires. A signal that cannot be listened for never
/// resolves, so the server keeps running.
pub async fn wait_for_shutdown<E: Display>(signal: impl Future<Output = Result<(), E>>) {
    if let Err(err) = signal.await {
        tracing::error!("Failed to listen for shutdown signal: {err}");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
