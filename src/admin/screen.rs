//! Stateful controller for a single admin list screen

use crate::grid::Column;
use crate::grid::GridQuery;
use crate::grid::GridView;
use crate::grid::RowKey;
use crate::grid::Selection;
use crate::grid::compute_view;
use crate::grid::export;
use crate::model::Record;

/// Controller for one admin list screen.
///
/// Owns everything a screen persists between renders: the column layout,
/// the current query (search, filters, sort, page), the row selection, and
/// the last fetched record collection. Rendering is a pure function of that
/// state: [`view`](ListScreen::view) re-runs the full pipeline on every call.
///
/// Fetching happens outside the controller. The token returned by
/// [`begin_refresh`](ListScreen::begin_refresh) identifies one in-flight
/// fetch; a response whose token has been superseded by a newer
/// `begin_refresh` is silently discarded, so only the latest fetch ever
/// lands.
///
/// # Example
///
/// ```
/// use storefront_lib::admin::ListScreen;
/// use storefront_lib::grid::Column;
/// use storefront_lib::model::Record;
///
/// let mut screen = ListScreen::new(vec![
///     Column::new("name", "Name"),
///     Column::new("status", "Status"),
/// ]);
///
/// let token = screen.begin_refresh();
/// screen.complete_refresh(token, vec![
///     Record::new().set("id", 1).set("name", "Widget").set("status", "Active"),
///     Record::new().set("id", 2).set("name", "Gadget").set("status", "Inactive"),
/// ]);
///
/// screen.set_search("wid");
/// let view = screen.view();
/// assert_eq!(view.len(), 1);
/// ```
pub struct ListScreen {
    columns: Vec<Column>,
    query: GridQuery,
    selection: Selection,
    records: Vec<Record>,
    generation: u64,
    loading: bool,
}

impl ListScreen {
    /// Creates an empty screen with the given column layout.
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            query: GridQuery::new(),
            selection: Selection::new(),
            records: Vec::new(),
            generation: 0,
            loading: false,
        }
    }

    // =========================================================================
    // State access
    // =========================================================================

    /// Returns the column layout.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Returns the current query state.
    pub fn query(&self) -> &GridQuery {
        &self.query
    }

    /// Returns the full fetched collection, unfiltered.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Returns how many records the last completed fetch delivered.
    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    /// Returns the current selection.
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Returns how many rows are selected.
    pub fn selected_count(&self) -> usize {
        self.selection.len()
    }

    /// Returns `true` while a fetch is in flight.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Runs the query pipeline over the current collection.
    pub fn view(&self) -> GridView<'_> {
        compute_view(&self.records, &self.columns, &self.query)
    }

    // =========================================================================
    // Query state
    // =========================================================================

    /// Sets the free-text search term and returns to page 1.
    pub fn set_search(&mut self, term: impl Into<String>) {
        self.query.set_search(term);
    }

    /// Sets a per-column filter value and returns to page 1.
    pub fn set_filter(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.query.set_filter(key, value);
    }

    /// Clears the search term and all filters, returning to page 1.
    pub fn clear_filters(&mut self) {
        self.query.clear_filters();
    }

    /// Cycles the sort on a column header click.
    ///
    /// Ignored for unknown keys and for columns marked unsortable, matching
    /// a header that simply isn't clickable. The page is left alone.
    pub fn toggle_sort(&mut self, key: &str) {
        let sortable = self
            .columns
            .iter()
            .any(|column| column.key() == key && column.is_sortable());
        if sortable {
            self.query.toggle_sort(key);
        }
    }

    /// Moves to the given 1-based page.
    pub fn set_page(&mut self, number: usize) {
        self.query.set_page(number);
    }

    /// Changes the page size and returns to page 1.
    pub fn set_page_size(&mut self, size: usize) {
        self.query.set_page_size(size);
    }

    // =========================================================================
    // Refresh lifecycle
    // =========================================================================

    /// Marks the start of a fetch and returns its token.
    ///
    /// Starting a new fetch supersedes any still in flight: their tokens go
    /// stale and their eventual results are dropped.
    pub fn begin_refresh(&mut self) -> u64 {
        self.generation = self.generation.wrapping_add(1);
        self.loading = true;
        self.generation
    }

    /// Installs a fetch result, returning `false` if the token is stale.
    ///
    /// The page is intentionally not clamped when the new collection is
    /// shorter: an out-of-range page renders as empty rows, never an error.
    /// The selection is also kept, so a selected row that survives the
    /// refresh stays selected.
    pub fn complete_refresh(&mut self, token: u64, records: Vec<Record>) -> bool {
        if token != self.generation {
            return false;
        }
        self.records = records;
        self.loading = false;
        true
    }

    /// Clears the loading flag after a failed fetch, keeping the old rows.
    ///
    /// Stale tokens are ignored here too, so a failure from a superseded
    /// fetch cannot clear the flag set by a newer one.
    pub fn fail_refresh(&mut self, token: u64) {
        if token == self.generation {
            self.loading = false;
        }
    }

    // =========================================================================
    // Selection
    // =========================================================================

    /// Toggles a single row in or out of the selection.
    pub fn toggle_row(&mut self, key: impl Into<RowKey>) {
        self.selection.toggle(key);
    }

    /// Applies the select-all checkbox to the current page.
    ///
    /// If every visible row is already selected the whole selection is
    /// cleared, including rows selected on other pages; otherwise the
    /// visible rows are added to it.
    pub fn toggle_page_selection(&mut self) {
        let visible = self.view().visible_keys();
        self.selection.toggle_all(&visible);
    }

    /// Returns `true` if the row is selected.
    pub fn is_selected(&self, key: &RowKey) -> bool {
        self.selection.contains(key)
    }

    /// Clears the selection.
    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Returns the selected records in collection order.
    ///
    /// Rows whose records disappeared in a refresh simply don't show up;
    /// their keys stay in the selection until cleared.
    pub fn selected_records(&self) -> Vec<&Record> {
        self.records
            .iter()
            .enumerate()
            .filter(|(index, record)| {
                self.selection.contains(&RowKey::for_record(record, *index))
            })
            .map(|(_, record)| record)
            .collect()
    }

    // =========================================================================
    // Local mutations
    // =========================================================================

    /// Splices one record out of the working set after a server-side
    /// mutation, returning it.
    ///
    /// Also drops the row from the selection. Returns `None` when no record
    /// matches the key. Rows keyed by position shift down after a removal,
    /// so positional keys are only stable for records that carry an `id`.
    pub fn remove_row(&mut self, key: &RowKey) -> Option<Record> {
        let position = self
            .records
            .iter()
            .enumerate()
            .find_map(|(index, record)| {
                (RowKey::for_record(record, index) == *key).then_some(index)
            })?;
        self.selection.remove(key);
        Some(self.records.remove(position))
    }

    /// Replaces a record in place after a server-side update.
    ///
    /// Returns `false` when no record matches the key.
    pub fn replace_row(&mut self, key: &RowKey, record: Record) -> bool {
        let position = self.records.iter().enumerate().find_map(|(index, row)| {
            (RowKey::for_record(row, index) == *key).then_some(index)
        });
        match position {
            Some(position) => {
                self.records[position] = record;
                true
            }
            None => false,
        }
    }

    // =========================================================================
    // Export
    // =========================================================================

    /// Serializes the filtered, sorted collection to CSV.
    ///
    /// Covers every row that survives search and filtering, not just the
    /// current page, in the current sort order. The output carries no
    /// timestamp, so identical state exports identical bytes; date-stamping
    /// belongs in the filename (see
    /// [`export_filename`](crate::grid::export::export_filename)).
    pub fn export_csv(&self) -> String {
        let mut unpaged = self.query.clone();
        unpaged.set_page_size(self.records.len().max(1));
        let view = compute_view(&self.records, &self.columns, &unpaged);
        export::to_csv(view.records(), &self.columns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Direction;

    fn inventory_screen() -> ListScreen {
        ListScreen::new(vec![
            Column::new("name", "Name"),
            Column::new("status", "Status")
                .with_select_filter([("true", "Active"), ("false", "Inactive")]),
            Column::new("notes", "Notes").sortable(false),
        ])
    }

    fn inventory_records(count: usize) -> Vec<Record> {
        (1..=count as i64)
            .map(|id| {
                Record::new()
                    .set("id", id)
                    .set("name", format!("Item {id}"))
                    .set("status", id % 2 == 1)
            })
            .collect()
    }

    #[test]
    fn test_search_resets_page() {
        let mut screen = inventory_screen();
        let token = screen.begin_refresh();
        screen.complete_refresh(token, inventory_records(25));

        screen.set_page(3);
        assert_eq!(screen.query().page().number(), 3);

        screen.set_search("item");
        assert_eq!(screen.query().page().number(), 1);
    }

    #[test]
    fn test_toggle_sort_respects_sortable_flag() {
        let mut screen = inventory_screen();

        screen.toggle_sort("notes");
        assert_eq!(screen.query().sort().key(), None);

        screen.toggle_sort("missing");
        assert_eq!(screen.query().sort().key(), None);

        screen.toggle_sort("name");
        assert_eq!(screen.query().sort().key(), Some("name"));
        assert_eq!(screen.query().sort().direction(), Direction::Asc);

        screen.toggle_sort("name");
        assert_eq!(screen.query().sort().direction(), Direction::Desc);
    }

    #[test]
    fn test_stale_refresh_is_dropped() {
        let mut screen = inventory_screen();

        let first = screen.begin_refresh();
        let second = screen.begin_refresh();

        assert!(!screen.complete_refresh(first, inventory_records(3)));
        assert_eq!(screen.record_count(), 0);
        assert!(screen.is_loading());

        assert!(screen.complete_refresh(second, inventory_records(5)));
        assert_eq!(screen.record_count(), 5);
        assert!(!screen.is_loading());
    }

    #[test]
    fn test_failed_refresh_keeps_rows() {
        let mut screen = inventory_screen();
        let token = screen.begin_refresh();
        screen.complete_refresh(token, inventory_records(4));

        let token = screen.begin_refresh();
        assert!(screen.is_loading());
        screen.fail_refresh(token);

        assert!(!screen.is_loading());
        assert_eq!(screen.record_count(), 4);
    }

    #[test]
    fn test_stale_failure_cannot_clear_loading() {
        let mut screen = inventory_screen();
        let stale = screen.begin_refresh();
        let _current = screen.begin_refresh();

        screen.fail_refresh(stale);
        assert!(screen.is_loading());
    }

    #[test]
    fn test_page_survives_refresh_without_clamping() {
        let mut screen = inventory_screen();
        let token = screen.begin_refresh();
        screen.complete_refresh(token, inventory_records(30));
        screen.set_page(3);

        let token = screen.begin_refresh();
        screen.complete_refresh(token, inventory_records(5));

        assert_eq!(screen.query().page().number(), 3);
        assert!(screen.view().is_empty());
        assert_eq!(screen.view().total_filtered(), 5);
    }

    #[test]
    fn test_toggle_page_selection_subset_clears() {
        let mut screen = inventory_screen();
        let token = screen.begin_refresh();
        screen.complete_refresh(token, inventory_records(25));

        screen.toggle_page_selection();
        assert_eq!(screen.selected_count(), 10);

        // An extra row from another page keeps the visible set a subset,
        // so the next toggle clears everything
        screen.set_page(2);
        screen.toggle_row(11i64);
        assert_eq!(screen.selected_count(), 11);

        screen.set_page(1);
        screen.toggle_page_selection();
        assert_eq!(screen.selected_count(), 0);
    }

    #[test]
    fn test_toggle_page_selection_tops_up_partial() {
        let mut screen = inventory_screen();
        let token = screen.begin_refresh();
        screen.complete_refresh(token, inventory_records(25));

        screen.toggle_row(1i64);
        screen.toggle_page_selection();
        assert_eq!(screen.selected_count(), 10);
    }

    #[test]
    fn test_selected_records_follow_collection_order() {
        let mut screen = inventory_screen();
        let token = screen.begin_refresh();
        screen.complete_refresh(token, inventory_records(5));

        screen.toggle_row(4i64);
        screen.toggle_row(2i64);

        let names: Vec<String> = screen
            .selected_records()
            .iter()
            .map(|record| record.text("name"))
            .collect();
        assert_eq!(names, vec!["Item 2", "Item 4"]);
    }

    #[test]
    fn test_remove_row_drops_selection_entry() {
        let mut screen = inventory_screen();
        let token = screen.begin_refresh();
        screen.complete_refresh(token, inventory_records(3));

        let key = RowKey::Id(2);
        screen.toggle_row(2i64);
        assert!(screen.is_selected(&key));

        let removed = screen.remove_row(&key);
        assert_eq!(removed.and_then(|record| record.id()), Some(2));
        assert!(!screen.is_selected(&key));
        assert_eq!(screen.record_count(), 2);

        assert!(screen.remove_row(&key).is_none());
    }

    #[test]
    fn test_replace_row_swaps_in_place() {
        let mut screen = inventory_screen();
        let token = screen.begin_refresh();
        screen.complete_refresh(token, inventory_records(3));

        let updated = Record::new().set("id", 2).set("name", "Renamed").set("status", false);
        assert!(screen.replace_row(&RowKey::Id(2), updated));
        assert_eq!(screen.records()[1].text("name"), "Renamed");

        let ghost = Record::new().set("id", 99);
        assert!(!screen.replace_row(&RowKey::Id(99), ghost));
    }

    #[test]
    fn test_export_covers_all_filtered_rows() {
        let mut screen = inventory_screen();
        let token = screen.begin_refresh();
        screen.complete_refresh(token, inventory_records(25));
        screen.set_page_size(5);

        let csv = screen.export_csv();
        // Header plus every one of the 25 rows, not just the visible 5
        assert_eq!(csv.lines().count(), 26);

        screen.set_filter("status", "true");
        let csv = screen.export_csv();
        assert_eq!(csv.lines().count(), 14);
    }

    #[test]
    fn test_export_is_deterministic() {
        let mut screen = inventory_screen();
        let token = screen.begin_refresh();
        screen.complete_refresh(token, inventory_records(8));
        screen.set_search("item");
        screen.toggle_sort("name");

        assert_eq!(screen.export_csv(), screen.export_csv());
    }
}
