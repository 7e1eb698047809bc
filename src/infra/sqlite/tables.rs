use chrono::{DateTime, Utc};
use rusqlite::types::{Type, Value};
use rusqlite::Row;

use crate::domain::entities::audit::{AuditEntry, AuditResult};
use crate::domain::entities::contact::{Contact, ContactKind, ContactStatus};
use crate::domain::entities::user::{UserEntry, UserRole};
use crate::infra::sqlite::queries::{parse_column, SqlRecord};

impl SqlRecord for UserEntry {
    const TABLE: &'static str = "user_entry";
    const COLUMNS: &'static [&'static str] = &["id", "name", "email", "role", "enabled"];

    fn to_values(&self) -> Vec<Value> {
        vec![
            Value::Text(self.id.clone()),
            Value::Text(self.name.clone()),
            Value::Text(self.email.clone()),
            Value::Text(self.role.name().to_string()),
            Value::Integer(if self.enabled { 1 } else { 0 }),
        ]
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        let role: String = row.get(3)?;
        let enabled: i64 = row.get(4)?;
        Ok(UserEntry {
            id: row.get(0)?,
            name: row.get(1)?,
            email: row.get(2)?,
            role: UserRole::parse(&role),
            enabled: enabled != 0,
        })
    }
}

impl SqlRecord for AuditEntry {
    const TABLE: &'static str = "audit_entry";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "timestamp_ms",
        "actor",
        "action",
        "target",
        "result",
        "ip",
        "device",
        "session",
    ];

    fn to_values(&self) -> Vec<Value> {
        vec![
            Value::Text(self.id.clone()),
            Value::Integer(self.timestamp.timestamp_millis()),
            Value::Text(self.actor.clone()),
            Value::Text(self.action.clone()),
            Value::Text(self.target.clone()),
            Value::Text(self.result.name().to_string()),
            Value::Text(self.ip.clone()),
            Value::Text(self.device.clone()),
            Value::Text(self.session.clone()),
        ]
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        let millis: i64 = row.get(1)?;
        let timestamp = DateTime::<Utc>::from_timestamp_millis(millis).ok_or_else(|| {
            rusqlite::Error::FromSqlConversionFailure(
                1,
                Type::Integer,
                format!("timestamp out of range: {millis}").into(),
            )
        })?;
        Ok(AuditEntry {
            id: row.get(0)?,
            timestamp,
            actor: row.get(2)?,
            action: row.get(3)?,
            target: row.get(4)?,
            result: parse_column(row, 5, AuditResult::parse)?,
            ip: row.get(6)?,
            device: row.get(7)?,
            session: row.get(8)?,
        })
    }
}

impl SqlRecord for Contact {
    const TABLE: &'static str = "contact";
    const COLUMNS: &'static [&'static str] =
        &["id", "name", "kind", "status", "note", "last_contact"];

    fn to_values(&self) -> Vec<Value> {
        vec![
            Value::Text(self.id.clone()),
            Value::Text(self.name.clone()),
            Value::Text(self.kind.name().to_string()),
            Value::Text(self.status.name().to_string()),
            Value::Text(self.note.clone()),
            Value::Text(self.last_contact.clone()),
        ]
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Contact {
            id: row.get(0)?,
            name: row.get(1)?,
            kind: parse_column(row, 2, ContactKind::parse)?,
            status: parse_column(row, 3, ContactStatus::parse)?,
            note: row.get(4)?,
            last_contact: row.get(5)?,
        })
    }
}
