use std::sync::Arc;

use crate::domain::entities::record::Record;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SourceError {
    #[error("record `{0}` already exists")]
    DuplicateId(String),
    #[error("record `{0}` not found")]
    NotFound(String),
    #[error("invalid record: {0}")]
    Invalid(String),
    #[error("{0}")]
    Backend(String),
}

impl From<anyhow::Error> for SourceError {
    fn from(err: anyhow::Error) -> Self {
        SourceError::Backend(format!("{err:#}"))
    }
}

/// Consistent view of a source at one version.
#[derive(Debug, Clone)]
pub struct Snapshot<R> {
    pub version: u64,
    pub records: Arc<Vec<R>>,
}

impl<R> Snapshot<R> {
    pub fn new(version: u64, records: Vec<R>) -> Self {
        Self {
            version,
            records: Arc::new(records),
        }
    }

    pub fn empty() -> Self {
        Self::new(0, Vec::new())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<R: Record> Snapshot<R> {
    pub fn find(&self, id: &str) -> Option<&R> {
        self.records.iter().find(|record| record.id() == id)
    }
}

/// Owner of a record collection. List views only ever call `list` and
/// `version`; writes come from services.
pub trait RecordSource<R: Record>: Send + Sync {
    fn list(&self) -> Result<Snapshot<R>, SourceError>;

    /// Bumped on every successful write.
    fn version(&self) -> u64;

    fn add(&self, record: R) -> Result<(), SourceError>;
    fn update(&self, record: R) -> Result<(), SourceError>;
}
