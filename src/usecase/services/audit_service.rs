use std::sync::Arc;

use chrono::{DateTime, Utc};
use log::info;
use uuid::Uuid;

use crate::domain::entities::audit::{AuditEntry, AuditResult};
use crate::usecase::ports::source::{RecordSource, SourceError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AuditStats {
    pub total: usize,
    pub today: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAuditEntry {
    pub actor: String,
    pub action: String,
    pub target: String,
    pub result: AuditResult,
    pub ip: String,
    pub device: String,
}

pub struct AuditService {
    source: Arc<dyn RecordSource<AuditEntry>>,
}

impl AuditService {
    pub fn new(source: Arc<dyn RecordSource<AuditEntry>>) -> Self {
        Self { source }
    }

    pub fn record(
        &self,
        entry: NewAuditEntry,
        now: DateTime<Utc>,
    ) -> Result<AuditEntry, SourceError> {
        if entry.action.trim().is_empty() {
            return Err(SourceError::Invalid("audit action is required".to_string()));
        }

        let entry = AuditEntry {
            id: Uuid::new_v4().to_string(),
            timestamp: now,
            actor: entry.actor,
            action: entry.action,
            target: entry.target,
            result: entry.result,
            ip: entry.ip,
            device: entry.device,
            session: new_session_id(),
        };
        self.source.add(entry.clone())?;
        info!(
            "audit {} by {} on {}: {}",
            entry.action, entry.actor, entry.target, entry.result
        );
        Ok(entry)
    }

    pub fn stats(&self, now: DateTime<Utc>) -> Result<AuditStats, SourceError> {
        let snapshot = self.source.list()?;
        Ok(AuditStats {
            total: snapshot.len(),
            today: snapshot
                .records
                .iter()
                .filter(|entry| entry.is_today(now))
                .count(),
        })
    }
}

/// Short session tag shown in the audit details.
pub fn new_session_id() -> String {
    let mut id = Uuid::new_v4().simple().to_string();
    id.truncate(8);
    id
}
