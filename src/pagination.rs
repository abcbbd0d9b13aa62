//! Pagination helper for post listings.
//!
//! Every listing endpoint slices its ordered result set into fixed-size
//! pages. The requested page number arrives as a raw, untrusted query
//! parameter: anything absent or unparsable means page 1, and out-of-range
//! numbers clamp to the nearest valid page instead of failing.

/// A bounded view over an ordered collection plus pagination metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    /// Items on this page, in display order.
    pub items: Vec<T>,
    /// Current page number (1-based, always within range).
    pub number: u32,
    /// Configured page size.
    pub per_page: u32,
    /// Total number of items across all pages.
    pub total_items: u64,
    /// Total number of pages (at least 1, even when empty).
    pub total_pages: u32,
}

impl<T> Page<T> {
    /// Whether a previous page exists.
    pub fn has_previous(&self) -> bool {
        self.number > 1
    }

    /// Whether a next page exists.
    pub fn has_next(&self) -> bool {
        self.number < self.total_pages
    }

    /// Map the items of this page, keeping the metadata.
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            number: self.number,
            per_page: self.per_page,
            total_items: self.total_items,
            total_pages: self.total_pages,
        }
    }
}

/// Computes page bounds for a fixed page size.
#[derive(Debug, Clone, Copy)]
pub struct Paginator {
    per_page: u32,
}

impl Paginator {
    /// Create a paginator with the given page size (minimum 1).
    pub fn new(per_page: u32) -> Self {
        Self {
            per_page: per_page.max(1),
        }
    }

    /// Configured page size.
    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    /// Total page count for a collection of `total_items` items.
    ///
    /// An empty collection still has one (empty) page.
    pub fn total_pages(&self, total_items: u64) -> u32 {
        let pages = total_items.div_ceil(self.per_page as u64).max(1);
        u32::try_from(pages).unwrap_or(u32::MAX)
    }

    /// Parse a raw `page` query parameter.
    ///
    /// Absent, empty, or unparsable values all mean page 1.
    pub fn parse_page_param(raw: Option<&str>) -> u32 {
        raw.and_then(|s| s.trim().parse::<u32>().ok())
            .filter(|&p| p >= 1)
            .unwrap_or(1)
    }

    /// Clamp a requested page number into the valid range for the collection.
    pub fn clamp(&self, requested: u32, total_items: u64) -> u32 {
        requested.clamp(1, self.total_pages(total_items))
    }

    /// Row offset for a (already clamped) page number.
    pub fn offset(&self, page: u32) -> u64 {
        (page.max(1) as u64 - 1) * self.per_page as u64
    }

    /// Build a page from items fetched for the clamped page number.
    ///
    /// `items` must be the slice the caller fetched with [`Paginator::offset`]
    /// and the configured limit; this only attaches the metadata.
    pub fn page<T>(&self, items: Vec<T>, number: u32, total_items: u64) -> Page<T> {
        Page {
            items,
            number: self.clamp(number, total_items),
            per_page: self.per_page,
            total_items,
            total_pages: self.total_pages(total_items),
        }
    }

    /// Paginate an in-memory collection.
    ///
    /// Convenience used by tests and small listings; repository-backed
    /// listings push the offset/limit into SQL instead.
    pub fn paginate<T>(&self, items: Vec<T>, requested: u32) -> Page<T> {
        let total_items = items.len() as u64;
        let number = self.clamp(requested, total_items);
        let start = self.offset(number) as usize;
        let end = (start + self.per_page as usize).min(items.len());
        let slice = if start < items.len() {
            items.into_iter().skip(start).take(end - start).collect()
        } else {
            Vec::new()
        };
        self.page(slice, number, total_items)
    }
}
