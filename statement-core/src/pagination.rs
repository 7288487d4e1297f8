//! Fixed-size page window over the in-memory transaction list

/// Rows per page
pub const PAGE_SIZE: usize = 50;

/// Number of pages needed to show `len` rows.
pub fn total_pages(len: usize) -> usize {
    len.div_ceil(PAGE_SIZE)
}

/// Current page position (1-based).
///
/// The pager does not own the rows; every operation takes the current row
/// count so that a replaced list never leaves it pointing past the end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    current: usize,
}

impl Default for Pager {
    fn default() -> Self {
        Self { current: 1 }
    }
}

impl Pager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> usize {
        self.current
    }

    /// Back to the first page
    pub fn reset(&mut self) {
        self.current = 1;
    }

    /// Move to the next page; returns false when already on the last one.
    pub fn next(&mut self, len: usize) -> bool {
        let last = total_pages(len).max(1);
        if self.current < last {
            self.current += 1;
            true
        } else {
            false
        }
    }

    /// Move to the previous page; returns false when already on the first one.
    pub fn previous(&mut self) -> bool {
        if self.current > 1 {
            self.current -= 1;
            true
        } else {
            false
        }
    }

    pub fn is_first(&self) -> bool {
        self.current == 1
    }

    pub fn is_last(&self, len: usize) -> bool {
        self.current >= total_pages(len)
    }

    /// Index of the first row on the current page.
    pub fn offset(&self) -> usize {
        (self.current - 1) * PAGE_SIZE
    }

    /// Rows visible on the current page.
    pub fn slice<'a, T>(&self, rows: &'a [T]) -> &'a [T] {
        let start = self.offset().min(rows.len());
        let end = (start + PAGE_SIZE).min(rows.len());
        &rows[start..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(0), 0);
        assert_eq!(total_pages(1), 1);
        assert_eq!(total_pages(50), 1);
        assert_eq!(total_pages(51), 2);
        assert_eq!(total_pages(120), 3);
    }

    #[test]
    fn test_navigation_is_clamped() {
        let mut p = Pager::new();
        assert!(!p.previous());
        assert_eq!(p.current(), 1);

        assert!(p.next(120));
        assert!(p.next(120));
        assert!(!p.next(120));
        assert_eq!(p.current(), 3);
        assert!(p.is_last(120));

        assert!(p.previous());
        assert_eq!(p.current(), 2);
    }

    #[test]
    fn test_empty_list_stays_on_first_page() {
        let mut p = Pager::new();
        assert!(!p.next(0));
        assert_eq!(p.current(), 1);
    }

    #[test]
    fn test_slice_windows() {
        let rows: Vec<usize> = (0..120).collect();
        let mut p = Pager::new();
        assert_eq!(p.slice(&rows).len(), 50);
        assert_eq!(p.slice(&rows)[0], 0);

        p.next(rows.len());
        p.next(rows.len());
        let last = p.slice(&rows);
        assert_eq!(last.len(), 20);
        assert_eq!(last[0], 100);
        assert_eq!(last[19], 119);
    }

    #[test]
    fn test_slice_past_end_is_empty() {
        let rows: Vec<usize> = (0..120).collect();
        let mut p = Pager::new();
        p.next(rows.len());
        p.next(rows.len());
        assert!(p.slice(&rows[..10]).is_empty());
    }
}
