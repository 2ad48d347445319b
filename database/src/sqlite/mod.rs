// 2022-2025 (c) Copyright Contributors to the GOSH DAO. All rights reserved.
//

mod log_repository;
mod schema;
pub mod sqlite_helper;

pub use log_repository::SqliteLogRepository;
pub use sqlite_helper::MEMORY_DB;
