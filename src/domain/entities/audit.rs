use std::fmt;

use chrono::{DateTime, Duration, Utc};

use crate::domain::entities::query::{QueryParams, SortDirection};
use crate::domain::entities::record::{Record, SortColumn, SortKey};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuditResult {
    Success,
    Fail,
}

impl AuditResult {
    pub fn name(self) -> &'static str {
        match self {
            AuditResult::Success => "SUCCESS",
            AuditResult::Fail => "FAIL",
        }
    }

    pub fn parse(text: &str) -> Option<Self> {
        match text.trim().to_uppercase().as_str() {
            "SUCCESS" | "OK" => Some(AuditResult::Success),
            "FAIL" | "FAILED" => Some(AuditResult::Fail),
            _ => None,
        }
    }
}

impl fmt::Display for AuditResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEntry {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub actor: String,
    pub action: String,
    pub target: String,
    pub result: AuditResult,
    pub ip: String,
    pub device: String,
    pub session: String,
}

impl AuditEntry {
    pub fn time_text(&self) -> String {
        self.timestamp.format("%b %-d, %H:%M").to_string()
    }

    /// Within the 24 hours before `now`. Entries stamped after `now` don't count.
    pub fn is_today(&self, now: DateTime<Utc>) -> bool {
        let age = now.signed_duration_since(self.timestamp);
        age >= Duration::zero() && age < Duration::hours(24)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuditColumn {
    Time,
    Actor,
    Action,
    Target,
    Result,
}

impl SortColumn for AuditColumn {
    const ALL: &'static [Self] = &[
        AuditColumn::Time,
        AuditColumn::Actor,
        AuditColumn::Action,
        AuditColumn::Target,
        AuditColumn::Result,
    ];

    fn name(self) -> &'static str {
        match self {
            AuditColumn::Time => "time",
            AuditColumn::Actor => "actor",
            AuditColumn::Action => "action",
            AuditColumn::Target => "target",
            AuditColumn::Result => "result",
        }
    }
}

impl Record for AuditEntry {
    type Column = AuditColumn;
    type Category = AuditResult;

    fn id(&self) -> &str {
        &self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.actor.as_str(),
            self.action.as_str(),
            self.target.as_str(),
            self.result.name(),
        ]
    }

    fn category(&self) -> AuditResult {
        self.result
    }

    fn sort_key(&self, column: AuditColumn) -> SortKey {
        match column {
            AuditColumn::Time => SortKey::Number(self.timestamp.timestamp_millis()),
            AuditColumn::Actor => SortKey::folded(&self.actor),
            AuditColumn::Action => SortKey::folded(&self.action),
            AuditColumn::Target => SortKey::folded(&self.target),
            AuditColumn::Result => SortKey::Text(self.result.name().to_string()),
        }
    }

    // newest first
    fn default_query() -> QueryParams<AuditColumn, AuditResult> {
        QueryParams::new(AuditColumn::Time, SortDirection::Desc)
    }
}
