//! Pagination parameters for the list operations.

use crate::errors::ServiceError;

/// 1-based page request as it arrives from the API.
#[derive(Clone, Copy, Debug)]
pub struct PageQuery {
    pub page_number: i32,
    pub page_size: i32,
}

impl PageQuery {
    /// Reject non-positive parameters, return `(zero_based_page, per_page)`
    /// for the store. Out-of-range pages are not an error; they yield an
    /// empty page with real totals so the caller can redirect.
    pub fn validate(self) -> Result<(u64, u64), ServiceError> {
        if self.page_number <= 0 || self.page_size <= 0 {
            return Err(ServiceError::validation("Invalid parameters for paging"));
        }
        Ok(((self.page_number - 1) as u64, self.page_size as u64))
    }
}

impl Default for PageQuery {
    fn default() -> Self {
        Self { page_number: 1, page_size: 10 }
    }
}
