use std::sync::Arc;

use log::{debug, warn};

use crate::domain::entities::query::{normalize_page, normalize_page_size, QueryParams, ResultPage};
use crate::domain::entities::record::{Record, SortColumn};
use crate::usecase::pipeline;
use crate::usecase::ports::source::{RecordSource, Snapshot};

pub type Params<R> = QueryParams<<R as Record>::Column, <R as Record>::Category>;

struct Memo<R: Record> {
    version: Option<u64>,
    params: Params<R>,
    page: ResultPage<R>,
}

/// Query state of one open list view.
///
/// The result page is derived lazily: `result` re-runs the pipeline only
/// when the source version or the parameters changed since the last call.
/// Every derivation writes the clamped page back into the parameters.
pub struct ViewController<R: Record> {
    source: Arc<dyn RecordSource<R>>,
    params: Params<R>,
    snapshot: Option<Snapshot<R>>,
    memo: Option<Memo<R>>,
    derivations: u64,
    on_select: Option<Box<dyn FnMut(&str)>>,
}

impl<R: Record> ViewController<R> {
    pub fn new(source: Arc<dyn RecordSource<R>>, params: Params<R>) -> Self {
        Self {
            source,
            params,
            snapshot: None,
            memo: None,
            derivations: 0,
            on_select: None,
        }
    }

    /// Opens a view with the record type's default parameters.
    pub fn with_defaults(source: Arc<dyn RecordSource<R>>) -> Self {
        Self::new(source, R::default_query())
    }

    pub fn params(&self) -> &Params<R> {
        &self.params
    }

    /// Number of times the pipeline actually ran.
    pub fn derivations(&self) -> u64 {
        self.derivations
    }

    pub fn result(&mut self) -> &ResultPage<R> {
        self.sync_snapshot();
        let version = self.snapshot.as_ref().map(|snapshot| snapshot.version);

        let memo = match self.memo.take() {
            Some(memo) if memo.version == version && memo.params == self.params => memo,
            _ => {
                let records = self
                    .snapshot
                    .as_ref()
                    .map(|snapshot| snapshot.records.as_slice())
                    .unwrap_or(&[]);
                let page = pipeline::run(records, &self.params);
                self.params.page = page.page;
                self.derivations += 1;
                debug!(
                    "derived {} ({} matching, {} per page)",
                    page.label(),
                    page.total_items,
                    self.params.page_size
                );
                Memo {
                    version,
                    params: self.params.clone(),
                    page,
                }
            }
        };

        &self.memo.insert(memo).page
    }

    fn sync_snapshot(&mut self) {
        let current = self.source.version();
        if matches!(&self.snapshot, Some(snapshot) if snapshot.version == current) {
            return;
        }
        match self.source.list() {
            Ok(snapshot) => self.snapshot = Some(snapshot),
            Err(err) => warn!("record source read failed, keeping last snapshot: {err}"),
        }
    }

    pub fn set_search(&mut self, text: impl Into<String>) {
        self.params.search = text.into();
        self.params.page = 1;
    }

    pub fn set_category(&mut self, category: Option<R::Category>) {
        self.params.category = category;
        self.params.page = 1;
    }

    /// Same column flips the direction and keeps the page; a new column
    /// sorts ascending from page 1.
    pub fn set_sort_column(&mut self, column: R::Column) {
        if column == self.params.sort_column {
            self.params.direction = self.params.direction.flipped();
        } else {
            self.params.sort_column = column;
            self.params.direction = Default::default();
            self.params.page = 1;
        }
    }

    pub fn set_sort_column_by_name(&mut self, name: &str) {
        self.set_sort_column(R::Column::parse(name));
    }

    pub fn set_page_size(&mut self, page_size: i64) {
        self.params.page_size = normalize_page_size(page_size);
        self.params.page = 1;
    }

    pub fn set_page(&mut self, page: i64) {
        self.params.page = normalize_page(page);
        self.result();
    }

    pub fn next_page(&mut self) {
        let total_pages = self.result().total_pages;
        self.params.page = (self.params.page + 1).min(total_pages);
    }

    pub fn prev_page(&mut self) {
        self.result();
        self.params.page = self.params.page.saturating_sub(1).max(1);
    }

    pub fn set_on_select<F>(&mut self, callback: F)
    where
        F: FnMut(&str) + 'static,
    {
        self.on_select = Some(Box::new(callback));
    }

    /// Fires the selection callback when `id` is in the current snapshot.
    pub fn select(&mut self, id: &str) -> bool {
        self.sync_snapshot();
        let known = self
            .snapshot
            .as_ref()
            .is_some_and(|snapshot| snapshot.find(id).is_some());
        match (&mut self.on_select, known) {
            (Some(callback), true) => {
                callback(id);
                true
            }
            _ => false,
        }
    }
}
