//! Page-number pagination for the list endpoints.
//!
//! Pages are 1-indexed. A missing, non-numeric or non-positive page number
//! falls back to page 1, and a page past the end is clamped to the last page.

use serde::Serialize;

/// A page number resolved against a page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub per_page: i64,
}

impl PageRequest {
    pub fn parse(raw: Option<&str>, per_page: i64) -> Self {
        let page = raw
            .and_then(|value| value.trim().parse::<i64>().ok())
            .filter(|page| *page >= 1)
            .unwrap_or(1);

        Self { page, per_page }
    }

    /// Clamps the page into `[1, total_pages]` once the row count is known.
    pub fn clamp(self, total: i64) -> Self {
        let last = total_pages(total, self.per_page).max(1);
        Self {
            page: self.page.clamp(1, last),
            per_page: self.per_page,
        }
    }

    pub fn limit(&self) -> i64 {
        self.per_page
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.per_page
    }
}

pub fn total_pages(total: i64, per_page: i64) -> i64 {
    if per_page <= 0 {
        return 0;
    }
    (total + per_page - 1) / per_page
}

#[derive(Debug, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: i64,
    pub per_page: i64,
    pub total: i64,
    pub total_pages: i64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, request: PageRequest, total: i64) -> Self {
        Self {
            items,
            page: request.page,
            per_page: request.per_page,
            total,
            total_pages: total_pages(total, request.per_page),
        }
    }
}
