//! List query state and its transition rules

use std::collections::HashMap;

/// Sentinel filter value meaning "no constraint for this column".
///
/// Select filters submit it as their neutral option.
pub const FILTER_ALL: &str = "all";

/// Default page size for list views.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// Ascending order (A-Z, 0-9).
    #[default]
    Asc,
    /// Descending order (Z-A, 9-0).
    Desc,
}

impl Direction {
    /// Returns the opposite direction.
    pub fn flip(self) -> Self {
        match self {
            Direction::Asc => Direction::Desc,
            Direction::Desc => Direction::Asc,
        }
    }
}

/// Current sort state: which column, which direction.
///
/// A `None` key preserves input order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Sort {
    key: Option<String>,
    direction: Direction,
}

impl Sort {
    /// Creates an unsorted state, preserving input order.
    pub fn none() -> Self {
        Self::default()
    }

    /// Creates an ascending sort on the given column key.
    pub fn asc(key: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
            direction: Direction::Asc,
        }
    }

    /// Creates a descending sort on the given column key.
    pub fn desc(key: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
            direction: Direction::Desc,
        }
    }

    /// Returns the sorted column key, if any.
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// Returns the sort direction.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Applies a header click: the same key flips direction, a different
    /// key starts ascending.
    pub fn toggle(&mut self, key: impl Into<String>) {
        let key = key.into();
        if self.key.as_deref() == Some(key.as_str()) {
            self.direction = self.direction.flip();
        } else {
            self.key = Some(key);
            self.direction = Direction::Asc;
        }
    }
}

/// Requested page of the processed collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    number: usize,
    size: usize,
}

impl PageRequest {
    /// Creates a page request. Number is clamped to 1 minimum, size to 1.
    pub fn new(number: usize, size: usize) -> Self {
        Self {
            number: number.max(1),
            size: size.max(1),
        }
    }

    /// Returns the 1-based page number.
    pub fn number(&self) -> usize {
        self.number
    }

    /// Returns the page size.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns the offset of the first row on this page.
    pub fn offset(&self) -> usize {
        (self.number - 1) * self.size
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(1, DEFAULT_PAGE_SIZE)
    }
}

/// The full query state of one list view: search term, per-column filters,
/// sort, and page.
///
/// Transition methods encode the view's reset policy: narrowing inputs
/// (search, filters, page size) send the user back to page 1 so the page
/// never silently lands beyond the shrunken result, while sorting keeps the
/// current page.
///
/// # Example
///
/// ```
/// use storefront_lib::grid::GridQuery;
///
/// let mut query = GridQuery::new();
/// query.set_page(3);
/// query.toggle_sort("name"); // page stays 3
/// query.set_search("mouse"); // page resets to 1
/// assert_eq!(query.page().number(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GridQuery {
    search: String,
    filters: HashMap<String, String>,
    sort: Sort,
    page: PageRequest,
}

impl GridQuery {
    /// Creates an empty query: no search, no filters, input order, page 1.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current search term.
    pub fn search(&self) -> &str {
        &self.search
    }

    /// Returns the stored filter value for a column, if any.
    ///
    /// The stored value may be the [`FILTER_ALL`] sentinel; see
    /// [`active_filters`](Self::active_filters) for the constraints that
    /// actually apply.
    pub fn filter(&self, key: &str) -> Option<&str> {
        self.filters.get(key).map(String::as_str)
    }

    /// Returns the current sort state.
    pub fn sort(&self) -> &Sort {
        &self.sort
    }

    /// Returns the current page request.
    pub fn page(&self) -> PageRequest {
        self.page
    }

    /// Iterates the filters that actually constrain the view (value present,
    /// non-empty, and not the `"all"` sentinel).
    pub fn active_filters(&self) -> impl Iterator<Item = (&str, &str)> {
        self.filters
            .iter()
            .filter(|(_, value)| !value.is_empty() && *value != FILTER_ALL)
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    /// Sets the search term. Resets to page 1.
    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
        self.reset_page();
    }

    /// Sets a filter value for a column. Resets to page 1.
    ///
    /// The value is stored verbatim (including `"all"`), mirroring what a
    /// filter input holds; inactive values are skipped at query time.
    pub fn set_filter(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.filters.insert(key.into(), value.into());
        self.reset_page();
    }

    /// Removes every filter. Resets to page 1.
    pub fn clear_filters(&mut self) {
        self.filters.clear();
        self.reset_page();
    }

    /// Applies a sort-header click. Does NOT reset the page.
    pub fn toggle_sort(&mut self, key: impl Into<String>) {
        self.sort.toggle(key);
    }

    /// Replaces the sort state outright. Does NOT reset the page.
    pub fn set_sort(&mut self, sort: Sort) {
        self.sort = sort;
    }

    /// Moves to the given page (clamped to 1 minimum).
    pub fn set_page(&mut self, number: usize) {
        self.page = PageRequest::new(number, self.page.size());
    }

    /// Changes the page size. Resets to page 1.
    pub fn set_page_size(&mut self, size: usize) {
        self.page = PageRequest::new(1, size);
    }

    fn reset_page(&mut self) {
        self.page = PageRequest::new(1, self.page.size());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_resets_page() {
        let mut query = GridQuery::new();
        query.set_page(4);
        query.set_search("mouse");
        assert_eq!(query.page().number(), 1);
    }

    #[test]
    fn test_filter_resets_page() {
        let mut query = GridQuery::new();
        query.set_page(4);
        query.set_filter("status", "Active");
        assert_eq!(query.page().number(), 1);
    }

    #[test]
    fn test_page_size_resets_page() {
        let mut query = GridQuery::new();
        query.set_page(4);
        query.set_page_size(25);
        assert_eq!(query.page().number(), 1);
        assert_eq!(query.page().size(), 25);
    }

    #[test]
    fn test_sort_keeps_page() {
        let mut query = GridQuery::new();
        query.set_page(4);
        query.toggle_sort("name");
        assert_eq!(query.page().number(), 4);
    }

    #[test]
    fn test_sort_toggle_cycle() {
        let mut sort = Sort::none();
        sort.toggle("name");
        assert_eq!(sort.key(), Some("name"));
        assert_eq!(sort.direction(), Direction::Asc);

        sort.toggle("name");
        assert_eq!(sort.direction(), Direction::Desc);

        sort.toggle("name");
        assert_eq!(sort.direction(), Direction::Asc);
    }

    #[test]
    fn test_sort_toggle_new_key_starts_asc() {
        let mut sort = Sort::desc("price");
        sort.toggle("name");
        assert_eq!(sort.key(), Some("name"));
        assert_eq!(sort.direction(), Direction::Asc);
    }

    #[test]
    fn test_all_sentinel_is_inactive() {
        let mut query = GridQuery::new();
        query.set_filter("status", FILTER_ALL);
        query.set_filter("role", "admin");
        query.set_filter("category", "");

        let active: Vec<_> = query.active_filters().collect();
        assert_eq!(active, vec![("role", "admin")]);
        // The sentinel is still stored for UI round-tripping
        assert_eq!(query.filter("status"), Some(FILTER_ALL));
    }

    #[test]
    fn test_page_clamps_to_one() {
        let mut query = GridQuery::new();
        query.set_page(0);
        assert_eq!(query.page().number(), 1);
    }
}
