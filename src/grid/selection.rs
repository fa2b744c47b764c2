//! Row identity and bulk selection

use std::collections::HashSet;
use std::fmt;

use crate::model::Record;
use crate::model::Value;

/// Stable identity of one row for selection purposes.
///
/// Records identify by their `id` field; records without one fall back to
/// their position in the source collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RowKey {
    /// Numeric `id` field.
    Id(i64),
    /// String `id` field.
    Text(String),
    /// Positional fallback for records with no usable `id`.
    Index(usize),
}

impl RowKey {
    /// Derives the key for a record at the given source position.
    pub fn for_record(record: &Record, index: usize) -> Self {
        match record.get("id") {
            Some(Value::Int(n)) => RowKey::Id(i64::from(*n)),
            Some(Value::Long(n)) => RowKey::Id(*n),
            Some(Value::String(s)) => RowKey::Text(s.clone()),
            _ => RowKey::Index(index),
        }
    }
}

impl From<i64> for RowKey {
    fn from(id: i64) -> Self {
        RowKey::Id(id)
    }
}

impl From<i32> for RowKey {
    fn from(id: i32) -> Self {
        RowKey::Id(i64::from(id))
    }
}

impl From<&str> for RowKey {
    fn from(id: &str) -> Self {
        RowKey::Text(id.to_string())
    }
}

impl fmt::Display for RowKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowKey::Id(n) => write!(f, "{n}"),
            RowKey::Text(s) => write!(f, "{s}"),
            RowKey::Index(i) => write!(f, "#{i}"),
        }
    }
}

/// Set of selected rows for bulk actions.
///
/// Selection lives outside the query pipeline: it persists across search,
/// filter, sort, and page changes, and keys that no longer appear in the
/// working set are simply inert until cleared.
///
/// # Example
///
/// ```
/// use storefront_lib::grid::{RowKey, Selection};
///
/// let mut selection = Selection::new();
/// selection.toggle(RowKey::Id(1));
/// selection.toggle(RowKey::Id(2));
/// assert_eq!(selection.len(), 2);
///
/// // Toggling again removes
/// selection.toggle(RowKey::Id(1));
/// assert!(!selection.contains(&RowKey::Id(1)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Selection {
    keys: HashSet<RowKey>,
}

impl Selection {
    /// Creates an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of selected rows.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns `true` if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Returns `true` if the given key is selected.
    pub fn contains(&self, key: &RowKey) -> bool {
        self.keys.contains(key)
    }

    /// Iterates the selected keys (no particular order).
    pub fn keys(&self) -> impl Iterator<Item = &RowKey> {
        self.keys.iter()
    }

    /// Toggles a single row: adds it if absent, removes it if present.
    pub fn toggle(&mut self, key: impl Into<RowKey>) {
        let key = key.into();
        if !self.keys.remove(&key) {
            self.keys.insert(key);
        }
    }

    /// Applies the select-all checkbox to the given visible rows.
    ///
    /// When every visible key is already selected the whole selection is
    /// cleared, including keys not currently visible. Otherwise the visible
    /// keys are added to the selection. An empty visible set is trivially
    /// all-selected and therefore clears.
    pub fn toggle_all(&mut self, visible: &[RowKey]) {
        if visible.iter().all(|key| self.keys.contains(key)) {
            self.keys.clear();
        } else {
            self.keys.extend(visible.iter().cloned());
        }
    }

    /// Deselects everything.
    pub fn clear(&mut self) {
        self.keys.clear();
    }

    /// Removes a single key (no-op if absent).
    pub fn remove(&mut self, key: &RowKey) {
        self.keys.remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(ids: &[i64]) -> Vec<RowKey> {
        ids.iter().map(|id| RowKey::Id(*id)).collect()
    }

    #[test]
    fn test_toggle_adds_and_removes() {
        let mut selection = Selection::new();
        selection.toggle(1i64);
        assert!(selection.contains(&RowKey::Id(1)));
        selection.toggle(1i64);
        assert!(selection.is_empty());
    }

    #[test]
    fn test_toggle_all_unions_when_not_covered() {
        let mut selection = Selection::new();
        selection.toggle(5i64);
        selection.toggle_all(&keys(&[1, 2]));
        assert_eq!(selection.len(), 3);
        assert!(selection.contains(&RowKey::Id(5)));
    }

    #[test]
    fn test_toggle_all_clears_when_visible_subset_selected() {
        // Visible rows {1,2} are all selected while 3 is selected but
        // off-page: the deselect-all branch clears the whole set.
        let mut selection = Selection::new();
        selection.toggle(1i64);
        selection.toggle(2i64);
        selection.toggle(3i64);

        selection.toggle_all(&keys(&[1, 2]));
        assert!(selection.is_empty());
    }

    #[test]
    fn test_toggle_all_empty_visible_clears() {
        let mut selection = Selection::new();
        selection.toggle(9i64);
        selection.toggle_all(&[]);
        assert!(selection.is_empty());
    }

    #[test]
    fn test_stale_keys_are_inert() {
        let mut selection = Selection::new();
        selection.toggle(404i64);
        // Selecting the visible page alongside a stale key keeps both
        selection.toggle_all(&keys(&[1]));
        assert_eq!(selection.len(), 2);
        assert!(selection.contains(&RowKey::Id(404)));
    }

    #[test]
    fn test_row_key_fallback_to_index() {
        let with_id = Record::new().set("id", 7);
        let without_id = Record::new().set("name", "anonymous");

        assert_eq!(RowKey::for_record(&with_id, 0), RowKey::Id(7));
        assert_eq!(RowKey::for_record(&without_id, 3), RowKey::Index(3));
    }

    #[test]
    fn test_row_key_string_id() {
        let record = Record::new().set("id", "ORD-20250826-0001");
        assert_eq!(
            RowKey::for_record(&record, 0),
            RowKey::Text("ORD-20250826-0001".to_string())
        );
    }
}
