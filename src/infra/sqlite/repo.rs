use std::marker::PhantomData;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};

use anyhow::Result;
use log::{debug, info, warn};

use crate::infra::sqlite::queries::{
    count_records, insert_record, list_records, table_version, update_record, SqlRecord,
};
use crate::infra::sqlite::schema::init_db;
use crate::usecase::ports::source::{RecordSource, Snapshot, SourceError};

/// Record source backed by one SQLite table.
///
/// The version lives in the database and is bumped in the same transaction
/// as every write, so writes from other repos or processes on the same file
/// are seen too.
pub struct SqliteRepo<R> {
    db_path: PathBuf,
    // last version read, served when the database can't be reached
    last_version: AtomicU64,
    _record: PhantomData<fn() -> R>,
}

impl<R: SqlRecord> SqliteRepo<R> {
    pub fn open(db_path: impl Into<PathBuf>) -> Result<Self> {
        let db_path = db_path.into();
        init_db(&db_path)?;
        info!("opened {} at {}", R::TABLE, db_path.display());
        Ok(Self {
            db_path,
            last_version: AtomicU64::new(0),
            _record: PhantomData,
        })
    }

    pub fn count(&self) -> Result<i64, SourceError> {
        Ok(count_records::<R>(&self.db_path)?)
    }
}

impl<R: SqlRecord> RecordSource<R> for SqliteRepo<R> {
    fn list(&self) -> Result<Snapshot<R>, SourceError> {
        let (version, records) = list_records::<R>(&self.db_path)?;
        self.last_version.store(version, Ordering::SeqCst);
        debug!("read {} {} rows at version {version}", records.len(), R::TABLE);
        Ok(Snapshot::new(version, records))
    }

    fn version(&self) -> u64 {
        match table_version::<R>(&self.db_path) {
            Ok(version) => {
                self.last_version.store(version, Ordering::SeqCst);
                version
            }
            Err(err) => {
                warn!("failed to read {} version: {err:#}", R::TABLE);
                self.last_version.load(Ordering::SeqCst)
            }
        }
    }

    fn add(&self, record: R) -> Result<(), SourceError> {
        if !insert_record(&self.db_path, &record)? {
            return Err(SourceError::DuplicateId(record.id().to_string()));
        }
        Ok(())
    }

    fn update(&self, record: R) -> Result<(), SourceError> {
        if !update_record(&self.db_path, &record)? {
            return Err(SourceError::NotFound(record.id().to_string()));
        }
        Ok(())
    }
}
