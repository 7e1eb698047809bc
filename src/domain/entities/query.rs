use crate::domain::entities::record::SortColumn;

pub const DEFAULT_PAGE_SIZE: usize = 10;
/// Sizes offered by the page-size selector.
pub const PAGE_SIZE_OPTIONS: [usize; 4] = [5, 10, 20, 50];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

/// Search, filter, sort and page state driving one list view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryParams<C, K> {
    pub search: String,
    pub category: Option<K>,
    pub sort_column: C,
    pub direction: SortDirection,
    /// 1-based.
    pub page: usize,
    pub page_size: usize,
}

impl<C, K> QueryParams<C, K> {
    pub fn new(sort_column: C, direction: SortDirection) -> Self {
        Self {
            search: String::new(),
            category: None,
            sort_column,
            direction,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }
}

impl<C: SortColumn, K> Default for QueryParams<C, K> {
    fn default() -> Self {
        Self::new(C::default_column(), SortDirection::Asc)
    }
}

/// Non-positive sizes become 1.
pub fn normalize_page_size(page_size: i64) -> usize {
    usize::try_from(page_size).unwrap_or(1).max(1)
}

/// Pages below 1 become 1. The upper bound is applied by pagination.
pub fn normalize_page(page: i64) -> usize {
    usize::try_from(page).unwrap_or(1).max(1)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultPage<R> {
    pub records: Vec<R>,
    pub total_items: usize,
    pub total_pages: usize,
    pub page: usize,
}

impl<R> ResultPage<R> {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn label(&self) -> String {
        format!("Page {} / {}", self.page, self.total_pages)
    }
}
