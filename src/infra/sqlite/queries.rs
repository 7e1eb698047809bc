use std::path::Path;

use anyhow::{Context, Result};
use rusqlite::types::{Type, Value};
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::domain::entities::record::Record;
use crate::infra::sqlite::schema::open_connection;

/// Records stored one per row in their own table.
pub trait SqlRecord: Record {
    const TABLE: &'static str;
    /// Column names in `to_values` order, `id` first.
    const COLUMNS: &'static [&'static str];

    fn to_values(&self) -> Vec<Value>;
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self>;
}

/// Reads a text column through a parser, reporting unparseable values as
/// conversion failures.
pub fn parse_column<T>(
    row: &Row<'_>,
    idx: usize,
    parse: impl FnOnce(&str) -> Option<T>,
) -> rusqlite::Result<T> {
    let text: String = row.get(idx)?;
    parse(&text).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            idx,
            Type::Text,
            format!("unrecognized value `{text}`").into(),
        )
    })
}

/// Rows newest first, together with the table version they were read at.
pub fn list_records<R: SqlRecord>(db_path: &Path) -> Result<(u64, Vec<R>)> {
    let mut conn = open_connection(db_path)?;
    let tx = conn
        .transaction()
        .with_context(|| format!("failed to start {} read", R::TABLE))?;
    let version = read_version(&tx, R::TABLE)?;

    let records = {
        let mut stmt = tx
            .prepare(&format!(
                "SELECT {}
                 FROM {}
                 ORDER BY seq DESC",
                R::COLUMNS.join(", "),
                R::TABLE
            ))
            .with_context(|| format!("failed to prepare {} query", R::TABLE))?;

        let records = stmt
            .query_map([], |row| R::from_row(row))
            .with_context(|| format!("failed to query {}", R::TABLE))?
            .collect::<rusqlite::Result<Vec<_>>>()
            .with_context(|| format!("failed to collect {}", R::TABLE))?;
        records
    };

    tx.commit()
        .with_context(|| format!("failed to finish {} read", R::TABLE))?;
    Ok((version, records))
}

pub fn table_version<R: SqlRecord>(db_path: &Path) -> Result<u64> {
    let conn = open_connection(db_path)?;
    read_version(&conn, R::TABLE)
}

fn read_version(conn: &Connection, table: &str) -> Result<u64> {
    let version: Option<i64> = conn
        .query_row(
            "SELECT version FROM record_version WHERE table_name = ?1",
            params![table],
            |row| row.get(0),
        )
        .optional()
        .with_context(|| format!("failed to read {table} version"))?;
    Ok(version.map_or(0, |version| version.max(0) as u64))
}

fn bump_version(conn: &Connection, table: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO record_version(table_name, version) VALUES (?1, 1)
         ON CONFLICT(table_name) DO UPDATE SET version = version + 1",
        params![table],
    )
    .with_context(|| format!("failed to bump {table} version"))?;
    Ok(())
}

pub fn count_records<R: SqlRecord>(db_path: &Path) -> Result<i64> {
    let conn = open_connection(db_path)?;
    conn.query_row(&format!("SELECT COUNT(*) FROM {}", R::TABLE), [], |row| {
        row.get(0)
    })
    .with_context(|| format!("failed to count {}", R::TABLE))
}

/// Returns `false` without writing when the id is already taken.
pub fn insert_record<R: SqlRecord>(db_path: &Path, record: &R) -> Result<bool> {
    let mut conn = open_connection(db_path)?;
    let tx = conn
        .transaction()
        .context("failed to start insert transaction")?;

    let exists: i64 = tx
        .query_row(
            &format!("SELECT COUNT(*) FROM {} WHERE id = ?1", R::TABLE),
            params![record.id()],
            |row| row.get(0),
        )
        .with_context(|| format!("failed to look up {} #{}", R::TABLE, record.id()))?;
    if exists > 0 {
        return Ok(false);
    }

    let placeholders = (1..=R::COLUMNS.len())
        .map(|idx| format!("?{idx}"))
        .collect::<Vec<_>>()
        .join(", ");
    tx.execute(
        &format!(
            "INSERT INTO {}({}) VALUES ({placeholders})",
            R::TABLE,
            R::COLUMNS.join(", ")
        ),
        rusqlite::params_from_iter(record.to_values()),
    )
    .with_context(|| format!("failed to insert {} #{}", R::TABLE, record.id()))?;
    bump_version(&tx, R::TABLE)?;

    tx.commit().context("failed to commit insert")?;
    Ok(true)
}

/// Returns `false` when no row has the record's id.
pub fn update_record<R: SqlRecord>(db_path: &Path, record: &R) -> Result<bool> {
    let mut conn = open_connection(db_path)?;
    let tx = conn
        .transaction()
        .context("failed to start update transaction")?;
    let assignments = R::COLUMNS
        .iter()
        .enumerate()
        .skip(1)
        .map(|(idx, column)| format!("{column} = ?{}", idx + 1))
        .collect::<Vec<_>>()
        .join(", ");

    let changed = tx
        .execute(
            &format!("UPDATE {} SET {assignments} WHERE id = ?1", R::TABLE),
            rusqlite::params_from_iter(record.to_values()),
        )
        .with_context(|| format!("failed to update {} #{}", R::TABLE, record.id()))?;
    if changed == 0 {
        return Ok(false);
    }
    bump_version(&tx, R::TABLE)?;

    tx.commit().context("failed to commit update")?;
    Ok(true)
}
