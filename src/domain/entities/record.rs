use std::fmt::Debug;

use crate::domain::entities::query::{QueryParams, SortDirection};

/// Value a record yields for one sortable column.
///
/// A column always produces the same variant, so mixed comparisons never
/// happen in practice.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum SortKey {
    Text(String),
    Number(i64),
}

impl SortKey {
    pub fn folded(text: &str) -> Self {
        SortKey::Text(text.to_lowercase())
    }
}

/// Sortable columns of a listing. The first entry of `ALL` is the default.
pub trait SortColumn: Copy + Eq + Debug + Send + Sync + 'static {
    const ALL: &'static [Self];

    fn name(self) -> &'static str;

    fn default_column() -> Self {
        Self::ALL[0]
    }

    /// Unknown names resolve to the default column.
    fn parse(name: &str) -> Self {
        let name = name.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|column| column.name().eq_ignore_ascii_case(name))
            .unwrap_or_else(Self::default_column)
    }
}

/// A row shown by a list view.
pub trait Record: Clone + Debug + Send + Sync + 'static {
    type Column: SortColumn;
    type Category: Copy + Eq + Debug + Send + Sync + 'static;

    fn id(&self) -> &str;

    /// Text fields matched by the free-text search.
    fn search_fields(&self) -> Vec<&str>;

    /// Field the categorical filter matches on.
    fn category(&self) -> Self::Category;

    fn sort_key(&self, column: Self::Column) -> SortKey;

    /// Query parameters a freshly opened view starts with.
    fn default_query() -> QueryParams<Self::Column, Self::Category> {
        QueryParams::new(Self::Column::default_column(), SortDirection::Asc)
    }
}
