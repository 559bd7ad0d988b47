//! Fixed-size page arithmetic shared by list views

/// Rows per page in every paginated view
pub const PAGE_SIZE: usize = 10;

/// Page window over a filtered item count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageInfo {
    pub offset_page: usize,
    pub pages: usize,
    pub total: usize,
}

impl PageInfo {
    pub fn new(offset_page: usize, total: usize) -> Self {
        Self {
            offset_page,
            pages: page_count(total),
            total,
        }
    }

    /// Index of the first row on the page
    pub fn lower_bound(&self) -> usize {
        self.offset_page * PAGE_SIZE
    }

    /// One past the last row on the page, clamped to the item count
    pub fn upper_bound(&self) -> usize {
        (self.lower_bound() + PAGE_SIZE).min(self.total)
    }

    pub fn has_previous(&self) -> bool {
        self.offset_page > 0
    }

    pub fn has_next(&self) -> bool {
        self.offset_page + 1 < self.pages
    }
}

/// Number of pages for `total` rows, never zero
pub fn page_count(total: usize) -> usize {
    total.div_ceil(PAGE_SIZE).max(1)
}

/// Whether `page` is a valid offset for `total` rows
pub fn is_valid_page(page: usize, total: usize) -> bool {
    page < page_count(total)
}

/// Rows of `items` visible on `offset_page`
pub fn page_slice<T>(items: &[T], offset_page: usize) -> &[T] {
    let info = PageInfo::new(offset_page, items.len());
    let lower = info.lower_bound().min(items.len());
    &items[lower..info.upper_bound().max(lower)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_count_is_at_least_one() {
        assert_eq!(page_count(0), 1);
        assert_eq!(page_count(1), 1);
        assert_eq!(page_count(10), 1);
        assert_eq!(page_count(11), 2);
        assert_eq!(page_count(95), 10);
    }

    #[test]
    fn bounds_follow_offset_page() {
        let info = PageInfo::new(2, 25);
        assert_eq!(info.pages, 3);
        assert_eq!(info.lower_bound(), 20);
        assert_eq!(info.upper_bound(), 25);
        assert!(info.has_previous());
        assert!(!info.has_next());
    }

    #[test]
    fn valid_pages_are_below_page_count() {
        assert!(is_valid_page(0, 0));
        assert!(!is_valid_page(1, 0));
        assert!(is_valid_page(1, 11));
        assert!(!is_valid_page(2, 20));
    }

    #[test]
    fn slices_the_requested_page() {
        let items: Vec<u32> = (0..23).collect();
        assert_eq!(page_slice(&items, 0).len(), 10);
        assert_eq!(page_slice(&items, 2), &[20, 21, 22]);
        assert!(page_slice(&items, 7).is_empty());
    }
}
