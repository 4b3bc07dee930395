use serde::Serialize;

/// Number of audits on one dashboard page.
pub const DASHBOARD_PAGE_SIZE: u64 = 10;

/// Resolved page of a paginated listing.
///
/// Page numbers are 1-based. Any requested page is clamped into
/// `1..=num_pages`, and an empty listing still has one (empty) page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageWindow {
    /// Current page number.
    pub number: u64,
    /// Number of pages.
    pub num_pages: u64,
    /// Total number of rows.
    pub count: u64,
    /// Rows per page.
    pub page_size: u64,
}

impl PageWindow {
    /// Resolves a raw `page` query value against the row count.
    ///
    /// Missing or non-numeric values select the first page, numbers below 1
    /// the first page, numbers past the end the last page.
    #[must_use]
    pub fn resolve(requested: Option<&str>, count: u64, page_size: u64) -> Self {
        let page_size = page_size.max(1);
        let num_pages = count.div_ceil(page_size).max(1);
        let number = requested.map_or(1, |raw| requested_number(raw.trim(), num_pages));

        Self {
            number,
            num_pages,
            count,
            page_size,
        }
    }

    /// Rows to skip before this page.
    #[must_use]
    pub fn offset(&self) -> u64 {
        (self.number - 1) * self.page_size
    }

    /// Maximum rows on this page.
    #[must_use]
    pub fn limit(&self) -> u64 {
        self.page_size
    }

    /// Whether a page precedes this one.
    #[must_use]
    pub fn has_previous(&self) -> bool {
        self.number > 1
    }

    /// Whether a page follows this one.
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.number < self.num_pages
    }
}

fn requested_number(raw: &str, num_pages: u64) -> u64 {
    match raw.parse::<i64>() {
        Ok(page) => u64::try_from(page).unwrap_or(0).clamp(1, num_pages),
        // Digits too large for an integer are still past the last page.
        Err(_) if is_unsigned_integer(raw) => num_pages,
        Err(_) => 1,
    }
}

fn is_unsigned_integer(raw: &str) -> bool {
    let digits = raw.strip_prefix('+').unwrap_or(raw);
    !digits.is_empty() && digits.bytes().all(|byte| byte.is_ascii_digit())
}

/// Rows of one page with its window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    /// Rows on this page.
    pub items: Vec<T>,
    /// Position of the page in the listing.
    pub window: PageWindow,
}

#[cfg(test)]
mod tests {
    use super::{DASHBOARD_PAGE_SIZE, PageWindow};

    #[test]
    fn third_page_of_twenty_five_starts_at_twenty() {
        let window = PageWindow::resolve(Some("3"), 25, DASHBOARD_PAGE_SIZE);
        assert_eq!(window.number, 3);
        assert_eq!(window.num_pages, 3);
        assert_eq!(window.offset(), 20);
        assert!(!window.has_next());
        assert!(window.has_previous());
    }

    #[test]
    fn invalid_pages_clamp() {
        for (requested, expected) in [
            (None, 1),
            (Some("abc"), 1),
            (Some(""), 1),
            (Some("0"), 1),
            (Some("-4"), 1),
            (Some("99"), 3),
            (Some("99999999999999999999"), 3),
            (Some("-99999999999999999999"), 1),
        ] {
            let window = PageWindow::resolve(requested, 25, DASHBOARD_PAGE_SIZE);
            assert_eq!(window.number, expected, "{requested:?}");
        }
    }

    #[test]
    fn empty_listing_has_one_page() {
        let window = PageWindow::resolve(Some("5"), 0, DASHBOARD_PAGE_SIZE);
        assert_eq!(window.number, 1);
        assert_eq!(window.num_pages, 1);
        assert_eq!(window.offset(), 0);
        assert!(!window.has_next());
    }
}
