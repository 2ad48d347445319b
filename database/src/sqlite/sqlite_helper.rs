// 2022-2025 (c) Copyright Contributors to the GOSH DAO. All rights reserved.
//

use std::path::Path;

use anyhow::Context;
use rusqlite::OpenFlags;

use super::schema::SCHEMA;
use super::schema::SCHEMA_VERSION;

/// Path value that selects a private in-memory database.
pub const MEMORY_DB: &str = ":memory:";

pub fn create_connection(db_path: &Path) -> anyhow::Result<rusqlite::Connection> {
    tracing::trace!(target: "sqlite", "create_connection: {db_path:?}");
    if let Some(parent) = db_path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create data dir {parent:?}"))?;
    }
    let conn = rusqlite::Connection::open_with_flags(
        db_path,
        OpenFlags::SQLITE_OPEN_READ_WRITE
            | OpenFlags::SQLITE_OPEN_CREATE
            | OpenFlags::SQLITE_OPEN_URI
            | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )
    .map_err(|e| {
        tracing::debug!(target: "sqlite", "Failed to open db file: {e}");
        anyhow::format_err!("{e}")
    })?;

    conn.execute_batch(
        "
        PRAGMA journal_mode = WAL;
        PRAGMA synchronous = NORMAL;
        PRAGMA wal_autocheckpoint = 1000;
        PRAGMA temp_store = MEMORY;
        PRAGMA foreign_keys = ON;
    ",
    )?;
    prepare(conn)
}

pub fn create_connection_in_memory() -> anyhow::Result<rusqlite::Connection> {
    let conn = rusqlite::Connection::open_in_memory()?;
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    prepare(conn)
}

fn prepare(conn: rusqlite::Connection) -> anyhow::Result<rusqlite::Connection> {
    apply_schema(&conn)?;
    print_sqlite_info(&conn)?;
    Ok(conn)
}

fn apply_schema(conn: &rusqlite::Connection) -> anyhow::Result<()> {
    let user_version: i32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if user_version > SCHEMA_VERSION {
        anyhow::bail!(
            "Database schema version {user_version} is newer than supported {SCHEMA_VERSION}"
        );
    }
    conn.execute_batch(SCHEMA).context("Failed to apply schema")?;
    conn.pragma_update(None, "user_version", SCHEMA_VERSION)?;
    Ok(())
}

pub fn print_sqlite_info(conn: &rusqlite::Connection) -> anyhow::Result<()> {
    let journal_mode: String = conn.query_row("PRAGMA journal_mode;", [], |row| row.get(0))?;
    let synchronous: i32 = conn.query_row("PRAGMA synchronous;", [], |row| row.get(0))?;
    let foreign_keys: i32 = conn.query_row("PRAGMA foreign_keys;", [], |row| row.get(0))?;
    let user_version: i32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    tracing::debug!(
        target: "sqlite",
        "journal_mode = {journal_mode}, synchronous = {synchronous}, foreign_keys = {}, user_version = {user_version}",
        if foreign_keys == 1 { "ON" } else { "OFF" }
    );
    Ok(())
}
