use serde::{Deserialize, Serialize};

/// Paginated wire envelope: one page of items plus total-page metadata.
///
/// `total_pages` is always derived from `total_count`, even when the
/// requested page lies past the end, so callers can redirect to the last
/// valid page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paged<T> {
    pub items: Vec<T>,
    pub page_number: i32,
    pub page_size: i32,
    pub total_count: u64,
    pub total_pages: i32,
}

impl<T> Paged<T> {
    /// Assemble a page. `page_size` must be positive (validated upstream).
    pub fn new(items: Vec<T>, page_number: i32, page_size: i32, total_count: u64) -> Self {
        let total_pages = total_count.div_ceil(page_size as u64) as i32;
        Self { items, page_number, page_size, total_count, total_pages }
    }
}
