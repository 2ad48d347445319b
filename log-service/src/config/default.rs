// 2022-2025 (c) Copyright Contributors to the GOSH DAO. All rights reserved.
//

use std::path::PathBuf;

use crate::config::ServerConfig;
use crate::config::StorageConfig;

impl Default for ServerConfig {
    fn default() -> Self {
        Self { listen: default_listen(), request_timeout_secs: default_request_timeout_secs() }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self { kind: Default::default(), path: default_db_path() }
    }
}

pub fn default_listen() -> String {
    "127.0.0.1:8080".to_string()
}

pub fn default_request_timeout_secs() -> u64 {
    30
}

pub fn default_db_path() -> PathBuf {
    PathBuf::from("./data/logs.db")
}
