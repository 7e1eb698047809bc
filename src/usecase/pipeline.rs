//! Filter, sort and paginate stages shared by every list view.
//!
//! All three stages are pure: they read the records they are given and
//! return new vectors, so a caller holding a snapshot never observes a
//! partially transformed collection.

use crate::domain::entities::query::{QueryParams, ResultPage, SortDirection};
use crate::domain::entities::record::Record;

/// Keeps records matching the free-text `search` (trimmed, case-insensitive
/// substring over the searchable fields) and the optional category. Input
/// order is preserved.
pub fn filter<R: Record>(records: &[R], search: &str, category: Option<R::Category>) -> Vec<R> {
    let needle = search.trim().to_lowercase();
    records
        .iter()
        .filter(|record| matches_search(*record, &needle))
        .filter(|record| category.map_or(true, |wanted| record.category() == wanted))
        .cloned()
        .collect()
}

fn matches_search<R: Record>(record: &R, needle: &str) -> bool {
    needle.is_empty()
        || record
            .search_fields()
            .iter()
            .any(|field| field.to_lowercase().contains(needle))
}

/// Stable ascending sort on the column key. Descending reverses the
/// ascending result instead of flipping the comparator.
pub fn sort<R: Record>(mut records: Vec<R>, column: R::Column, direction: SortDirection) -> Vec<R> {
    records.sort_by_cached_key(|record| record.sort_key(column));
    if direction == SortDirection::Desc {
        records.reverse();
    }
    records
}

pub fn paginate<R: Clone>(records: &[R], page: usize, page_size: usize) -> ResultPage<R> {
    let page_size = page_size.max(1);
    let total_items = records.len();
    let total_pages = total_items.div_ceil(page_size).max(1);
    let page = page.clamp(1, total_pages);

    let start = (page - 1).saturating_mul(page_size);
    let end = start.saturating_add(page_size).min(total_items);
    let records = if start >= end {
        Vec::new()
    } else {
        records[start..end].to_vec()
    };

    ResultPage {
        records,
        total_items,
        total_pages,
        page,
    }
}

pub fn run<R: Record>(
    records: &[R],
    params: &QueryParams<R::Column, R::Category>,
) -> ResultPage<R> {
    let filtered = filter(records, &params.search, params.category);
    let sorted = sort(filtered, params.sort_column, params.direction);
    paginate(&sorted, params.page, params.page_size)
}
