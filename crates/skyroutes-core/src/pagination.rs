//! Pagination windows for the two query disciplines.
//!
//! Direct queries delegate paging to the listing API (`ServerPage`);
//! aggregate and fetch-all queries hold the full eligible set in memory
//! and slice it locally (`MaterializedPage`). They are distinct types so
//! a mode switch has to rebuild the window from scratch instead of
//! carrying a stale offset across disciplines.

/// Default page length for both disciplines.
pub const DEFAULT_PAGE_LIMIT: usize = 20;

/// Server-delegated window: `offset`/`limit` are forwarded verbatim and
/// `total` is whatever the collaborator reported for the current call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerPage {
    pub offset: usize,
    pub limit: usize,
    pub total: usize,
}

impl ServerPage {
    pub fn new(limit: usize) -> Self {
        Self {
            offset: 0,
            limit: limit.max(1),
            total: 0,
        }
    }

    pub fn has_next(&self) -> bool {
        self.offset + self.limit < self.total
    }

    pub fn has_prev(&self) -> bool {
        self.offset > 0
    }

    /// Offset of the next page, `None` when already on the last one.
    pub fn next_offset(&self) -> Option<usize> {
        self.has_next().then(|| self.offset + self.limit)
    }

    pub fn prev_offset(&self) -> Option<usize> {
        self.has_prev()
            .then(|| self.offset.saturating_sub(self.limit))
    }

    /// Clamp a requested offset to the start of the last non-empty page,
    /// so navigating past the end never yields a silently empty slice.
    pub fn clamp_offset(&self, offset: usize) -> usize {
        if self.total == 0 {
            return 0;
        }
        let last = ((self.total - 1) / self.limit) * self.limit;
        offset.min(last)
    }
}

/// Client-materialized window over a fully fetched result set. Page
/// numbers are 1-based; every page move is a pure re-slice.
#[derive(Debug, Clone, PartialEq)]
pub struct MaterializedPage<T> {
    items: Vec<T>,
    page: usize,
    page_size: usize,
}

impl<T> MaterializedPage<T> {
    pub fn new(items: Vec<T>, page_size: usize) -> Self {
        Self {
            items,
            page: 1,
            page_size: page_size.max(1),
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total_items(&self) -> usize {
        self.items.len()
    }

    /// Always at least 1, so an empty set still has a valid current page.
    pub fn total_pages(&self) -> usize {
        self.items.len().div_ceil(self.page_size).max(1)
    }

    /// The slice for the current page:
    /// `items[(page-1)*size .. min(page*size, len)]`.
    pub fn slice(&self) -> &[T] {
        let start = (self.page - 1) * self.page_size;
        let end = (start + self.page_size).min(self.items.len());
        &self.items[start.min(self.items.len())..end]
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Jump to a page, clamped to `[1, total_pages]`. Returns the page
    /// actually landed on.
    pub fn go_to(&mut self, page: usize) -> usize {
        self.page = page.clamp(1, self.total_pages());
        self.page
    }

    pub fn next(&mut self) -> bool {
        if self.page < self.total_pages() {
            self.page += 1;
            true
        } else {
            false
        }
    }

    pub fn prev(&mut self) -> bool {
        if self.page > 1 {
            self.page -= 1;
            true
        } else {
            false
        }
    }

    pub fn first(&mut self) {
        self.page = 1;
    }

    pub fn last(&mut self) {
        self.page = self.total_pages();
    }

    /// Changing the page length resets to the first page so the current
    /// page index cannot point past the new end.
    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
        self.page = 1;
    }
}

/// The active pagination discipline for one query lifecycle. Switching
/// modes means constructing the other variant, which starts at its first
/// page by construction.
#[derive(Debug, Clone, PartialEq)]
pub enum PageWindow<T> {
    Server(ServerPage),
    Materialized(MaterializedPage<T>),
}

impl<T> PageWindow<T> {
    /// Total count to display: the server-reported figure or the
    /// materialized length.
    pub fn total(&self) -> usize {
        match self {
            Self::Server(page) => page.total,
            Self::Materialized(page) => page.total_items(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_page_navigation_clamps() {
        let mut page = ServerPage::new(20);
        page.total = 47;
        assert!(page.has_next());
        assert_eq!(page.next_offset(), Some(20));
        page.offset = 40;
        assert!(!page.has_next());
        assert_eq!(page.next_offset(), None);
        assert_eq!(page.prev_offset(), Some(20));
        assert_eq!(page.clamp_offset(1000), 40);
        assert_eq!(page.clamp_offset(0), 0);
    }

    #[test]
    fn server_page_empty_total_clamps_to_zero() {
        let page = ServerPage::new(20);
        assert_eq!(page.clamp_offset(60), 0);
        assert!(!page.has_next());
    }

    #[test]
    fn one_page_when_size_exceeds_items() {
        let page = MaterializedPage::new((0..47).collect::<Vec<_>>(), 50);
        assert_eq!(page.total_pages(), 1);
        assert_eq!(page.slice().len(), 47);
    }

    #[test]
    fn last_page_holds_the_remainder() {
        let mut page = MaterializedPage::new((0..47).collect::<Vec<_>>(), 20);
        assert_eq!(page.total_pages(), 3);
        assert_eq!(page.slice().len(), 20);
        page.go_to(2);
        assert_eq!(page.slice(), (20..40).collect::<Vec<_>>());
        page.go_to(3);
        assert_eq!(page.slice().len(), 7);
        assert_eq!(page.slice()[0], 40);
    }

    #[test]
    fn out_of_range_page_clamps_to_last() {
        let mut page = MaterializedPage::new((0..47).collect::<Vec<_>>(), 20);
        assert_eq!(page.go_to(10), 3);
        assert_eq!(page.slice().len(), 7);
        assert_eq!(page.go_to(0), 1);
    }

    #[test]
    fn next_and_prev_stop_at_the_edges() {
        let mut page = MaterializedPage::new(vec![1, 2, 3], 2);
        assert!(!page.prev());
        assert!(page.next());
        assert_eq!(page.page(), 2);
        assert!(!page.next());
        assert!(page.prev());
        assert_eq!(page.page(), 1);
    }

    #[test]
    fn page_size_change_resets_to_first_page() {
        let mut page = MaterializedPage::new((0..47).collect::<Vec<_>>(), 20);
        page.go_to(3);
        page.set_page_size(50);
        assert_eq!(page.page(), 1);
        assert_eq!(page.total_pages(), 1);
    }

    #[test]
    fn empty_set_still_has_one_valid_page() {
        let mut page: MaterializedPage<i32> = MaterializedPage::new(Vec::new(), 20);
        assert_eq!(page.total_pages(), 1);
        assert!(page.slice().is_empty());
        assert_eq!(page.go_to(5), 1);
    }

    #[test]
    fn first_and_last_jump_to_the_edges() {
        let mut page = MaterializedPage::new((0..47).collect::<Vec<_>>(), 20);
        page.last();
        assert_eq!(page.page(), 3);
        page.first();
        assert_eq!(page.page(), 1);
    }

    #[test]
    fn window_total_matches_discipline() {
        let mut server = ServerPage::new(20);
        server.total = 123;
        let window: PageWindow<i32> = PageWindow::Server(server);
        assert_eq!(window.total(), 123);

        let window = PageWindow::Materialized(MaterializedPage::new(vec![1, 2, 3], 20));
        assert_eq!(window.total(), 3);
    }
}
