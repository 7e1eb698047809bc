use std::path::Path;

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc};
use csv::StringRecord;

use crate::domain::entities::audit::{AuditEntry, AuditResult};
use crate::domain::entities::contact::{Contact, ContactKind, ContactStatus};
use crate::domain::entities::record::Record;
use crate::domain::entities::user::{UserEntry, UserRole};

/// Records that can be read from and written to CSV.
///
/// Columns are located by header name, so files may order them freely.
pub trait CsvRecord: Record {
    /// `id` first.
    const HEADERS: &'static [&'static str];

    fn to_fields(&self) -> Vec<String>;

    /// `fields` holds the values in `HEADERS` order.
    fn from_fields(fields: &[&str]) -> Result<Self>;
}

pub fn read_csv<R: CsvRecord>(csv_path: &Path) -> Result<Vec<R>> {
    let mut reader = csv::Reader::from_path(csv_path)
        .with_context(|| format!("failed to open csv: {}", csv_path.display()))?;
    let headers = reader
        .headers()
        .with_context(|| format!("failed to read headers from csv: {}", csv_path.display()))?
        .clone();

    if headers.is_empty() {
        anyhow::bail!("csv header is required")
    }
    let positions = header_positions::<R>(&headers)?;

    let mut records = Vec::new();
    for (row_idx, row) in reader.records().enumerate() {
        let row = row.context("failed to parse csv record")?;
        let fields: Vec<&str> = positions
            .iter()
            .map(|&col_idx| row.get(col_idx).unwrap_or("").trim())
            .collect();
        let record = R::from_fields(&fields)
            .with_context(|| format!("invalid record on line {}", row_idx + 2))?;
        records.push(record);
    }

    Ok(records)
}

pub fn write_csv<R: CsvRecord>(csv_path: &Path, records: &[R]) -> Result<()> {
    let mut writer = csv::Writer::from_path(csv_path)
        .with_context(|| format!("failed to create csv: {}", csv_path.display()))?;
    writer
        .write_record(R::HEADERS)
        .context("failed to write csv header")?;
    for record in records {
        writer
            .write_record(record.to_fields())
            .with_context(|| format!("failed to write record {}", record.id()))?;
    }
    writer.flush().context("failed to flush csv")?;
    Ok(())
}

fn header_positions<R: CsvRecord>(headers: &StringRecord) -> Result<Vec<usize>> {
    R::HEADERS
        .iter()
        .map(|wanted| {
            headers
                .iter()
                .position(|header| header.trim().eq_ignore_ascii_case(wanted))
                .ok_or_else(|| anyhow!("csv is missing column `{wanted}`"))
        })
        .collect()
}

fn parse_bool(text: &str) -> Result<bool> {
    match text.to_lowercase().as_str() {
        "true" | "1" | "yes" | "active" | "enabled" => Ok(true),
        "false" | "0" | "no" | "disabled" => Ok(false),
        other => Err(anyhow!("`{other}` is not a boolean")),
    }
}

impl CsvRecord for UserEntry {
    const HEADERS: &'static [&'static str] = &["id", "name", "email", "role", "enabled"];

    fn to_fields(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            self.email.clone(),
            self.role.name().to_string(),
            self.enabled.to_string(),
        ]
    }

    fn from_fields(fields: &[&str]) -> Result<Self> {
        let [id, name, email, role, enabled] = fields else {
            anyhow::bail!("expected {} fields", Self::HEADERS.len())
        };
        Ok(UserEntry::new(
            *id,
            *name,
            *email,
            UserRole::parse(role),
            parse_bool(enabled)?,
        ))
    }
}

impl CsvRecord for AuditEntry {
    const HEADERS: &'static [&'static str] = &[
        "id",
        "timestamp",
        "actor",
        "action",
        "target",
        "result",
        "ip",
        "device",
        "session",
    ];

    fn to_fields(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.timestamp.to_rfc3339(),
            self.actor.clone(),
            self.action.clone(),
            self.target.clone(),
            self.result.name().to_string(),
            self.ip.clone(),
            self.device.clone(),
            self.session.clone(),
        ]
    }

    fn from_fields(fields: &[&str]) -> Result<Self> {
        let [id, timestamp, actor, action, target, result, ip, device, session] = fields else {
            anyhow::bail!("expected {} fields", Self::HEADERS.len())
        };
        let timestamp = DateTime::parse_from_rfc3339(timestamp)
            .with_context(|| format!("invalid timestamp `{timestamp}`"))?
            .with_timezone(&Utc);
        let result =
            AuditResult::parse(result).ok_or_else(|| anyhow!("unknown result `{result}`"))?;

        Ok(AuditEntry {
            id: id.to_string(),
            timestamp,
            actor: actor.to_string(),
            action: action.to_string(),
            target: target.to_string(),
            result,
            ip: ip.to_string(),
            device: device.to_string(),
            session: session.to_string(),
        })
    }
}

impl CsvRecord for Contact {
    const HEADERS: &'static [&'static str] =
        &["id", "name", "kind", "status", "note", "last_contact"];

    fn to_fields(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            self.kind.name().to_string(),
            self.status.name().to_string(),
            self.note.clone(),
            self.last_contact.clone(),
        ]
    }

    fn from_fields(fields: &[&str]) -> Result<Self> {
        let [id, name, kind, status, note, last_contact] = fields else {
            anyhow::bail!("expected {} fields", Self::HEADERS.len())
        };
        Ok(Contact {
            id: id.to_string(),
            name: name.to_string(),
            kind: ContactKind::parse(kind)
                .ok_or_else(|| anyhow!("unknown contact kind `{kind}`"))?,
            status: ContactStatus::parse(status)
                .ok_or_else(|| anyhow!("unknown contact status `{status}`"))?,
            note: note.to_string(),
            last_contact: last_contact.to_string(),
        })
    }
}
