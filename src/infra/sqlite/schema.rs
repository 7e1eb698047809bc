use std::path::Path;

use anyhow::{Context, Result};
use rusqlite::Connection;

pub fn open_connection(db_path: &Path) -> Result<Connection> {
    let conn = Connection::open(db_path)
        .with_context(|| format!("failed to open db: {}", db_path.display()))?;
    conn.execute("PRAGMA foreign_keys = ON", [])
        .context("failed to enable foreign key enforcement")?;
    Ok(conn)
}

pub fn init_db(db_path: &Path) -> Result<()> {
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create parent dir: {}", parent.display()))?;
    }

    let conn = open_connection(db_path)?;

    // `seq` keeps insertion order; listings read newest first.
    // `record_version` counts committed writes per table.
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS user_entry (
            seq         INTEGER PRIMARY KEY AUTOINCREMENT,
            id          TEXT NOT NULL UNIQUE,
            name        TEXT NOT NULL,
            email       TEXT NOT NULL,
            role        TEXT NOT NULL,
            enabled     INTEGER NOT NULL DEFAULT 1
        );

        CREATE TABLE IF NOT EXISTS audit_entry (
            seq          INTEGER PRIMARY KEY AUTOINCREMENT,
            id           TEXT NOT NULL UNIQUE,
            timestamp_ms INTEGER NOT NULL,
            actor        TEXT NOT NULL,
            action       TEXT NOT NULL,
            target       TEXT NOT NULL,
            result       TEXT NOT NULL,
            ip           TEXT NOT NULL,
            device       TEXT NOT NULL,
            session      TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS contact (
            seq          INTEGER PRIMARY KEY AUTOINCREMENT,
            id           TEXT NOT NULL UNIQUE,
            name         TEXT NOT NULL,
            kind         TEXT NOT NULL,
            status       TEXT NOT NULL,
            note         TEXT NOT NULL,
            last_contact TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS record_version (
            table_name TEXT PRIMARY KEY,
            version    INTEGER NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_audit_entry_time
            ON audit_entry(timestamp_ms);
        ",
    )
    .context("failed to initialize schema")?;

    Ok(())
}
