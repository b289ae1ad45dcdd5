//! Paginated, searchable listings
//!
//! Every public listing is a filter plus a newest-first sort, cut into pages
//! of [`PAGE_SIZE`]. Page numbers are forgiving: anything unparsable means
//! the first page and anything past the end means the last page.

use serde::Serialize;

/// Rows per listing page
pub const PAGE_SIZE: i64 = 12;

/// One page of results
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    /// Rows on this page
    pub items: Vec<T>,

    /// 1-based page number actually served
    pub number: i64,

    /// Total number of pages (at least 1)
    pub num_pages: i64,

    /// Total matching rows across all pages
    pub total: i64,
}

impl<T> Page<T> {
    pub fn has_previous(&self) -> bool {
        self.number > 1
    }

    pub fn has_next(&self) -> bool {
        self.number < self.num_pages
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Page window resolved against a row count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub number: i64,
    pub num_pages: i64,
    pub limit: i64,
    pub offset: i64,
}

impl PageWindow {
    /// Clamps the requested page into `1..=num_pages` for `total` rows.
    pub fn resolve(requested: Option<&str>, total: i64, per_page: i64) -> Self {
        let per_page = per_page.max(1);
        let num_pages = if total <= 0 {
            1
        } else {
            (total + per_page - 1) / per_page
        };

        let number = requested
            .and_then(|raw| raw.trim().parse::<i64>().ok())
            .map(|n| n.clamp(1, num_pages))
            .unwrap_or(1);

        Self {
            number,
            num_pages,
            limit: per_page,
            offset: (number - 1) * per_page,
        }
    }

    pub fn into_page<T>(self, items: Vec<T>, total: i64) -> Page<T> {
        Page {
            items,
            number: self.number,
            num_pages: self.num_pages,
            total,
        }
    }
}

/// Normalised free-text search: trimmed, `None` when blank
pub fn search_term(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|s| !s.is_empty())
}

/// Builds a case-insensitive substring pattern for `ILIKE`, escaping the
/// LIKE metacharacters so user input only ever matches literally.
pub fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for ch in term.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}
