use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use log::{info, warn};
use uuid::Uuid;

use crate::infra::import::csv::{read_csv, write_csv, CsvRecord};
use crate::usecase::ports::source::{RecordSource, SourceError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ImportResult {
    pub imported: usize,
    pub skipped: usize,
}

/// Moves records between CSV files and a record source.
pub struct ImportService<R: CsvRecord> {
    source: Arc<dyn RecordSource<R>>,
}

impl<R: CsvRecord> ImportService<R> {
    pub fn new(source: Arc<dyn RecordSource<R>>) -> Self {
        Self { source }
    }

    /// Adds every row of the file. Rows without an id get a fresh one;
    /// rows whose id already exists are skipped.
    pub fn import_csv(&self, path: &Path) -> Result<ImportResult> {
        let records = read_csv::<R>(path)?;
        let mut result = ImportResult::default();

        for record in records {
            let record = if record.id().is_empty() {
                with_fresh_id(record)?
            } else {
                record
            };
            match self.source.add(record) {
                Ok(()) => result.imported += 1,
                Err(SourceError::DuplicateId(id)) => {
                    warn!("skipping duplicate record {id} from {}", path.display());
                    result.skipped += 1;
                }
                Err(err) => return Err(err.into()),
            }
        }

        info!(
            "imported {} records from {} ({} skipped)",
            result.imported,
            path.display(),
            result.skipped
        );
        Ok(result)
    }

    /// Writes `records` with a header row, e.g. the page a user is looking at.
    pub fn export_csv(&self, path: &Path, records: &[R]) -> Result<usize> {
        write_csv(path, records)?;
        info!("exported {} records to {}", records.len(), path.display());
        Ok(records.len())
    }

    /// Writes the whole source, newest first.
    pub fn export_all(&self, path: &Path) -> Result<usize> {
        let snapshot = self.source.list()?;
        self.export_csv(path, &snapshot.records)
    }
}

fn with_fresh_id<R: CsvRecord>(record: R) -> Result<R> {
    let mut fields = record.to_fields();
    if let Some(id) = fields.first_mut() {
        *id = Uuid::new_v4().to_string();
    }
    let fields: Vec<&str> = fields.iter().map(String::as_str).collect();
    R::from_fields(&fields)
}
