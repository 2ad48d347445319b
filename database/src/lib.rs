// 2022-2025 (c) Copyright Contributors to the GOSH DAO. All rights reserved.
//

pub mod sqlite;

pub use log_core::repository::InMemoryLogRepository;
pub use sqlite::SqliteLogRepository;
pub use sqlite::MEMORY_DB;
