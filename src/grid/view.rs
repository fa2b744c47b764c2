//! The list-query pipeline

use std::cmp::Ordering;

use super::Column;
use super::Direction;
use super::GridQuery;
use super::RowKey;
use crate::model::Record;
use crate::model::Value;

/// One visible row: a record reference plus its position in the source
/// collection (the position backs [`RowKey`] fallback identity).
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    /// Position of the record in the source collection.
    pub index: usize,
    /// The record itself.
    pub record: &'a Record,
}

impl<'a> Row<'a> {
    /// Returns this row's selection key.
    pub fn key(&self) -> RowKey {
        RowKey::for_record(self.record, self.index)
    }
}

/// Result of one pipeline run: the requested page of rows plus the totals
/// the pager needs.
#[derive(Debug)]
pub struct GridView<'a> {
    rows: Vec<Row<'a>>,
    total_filtered: usize,
    page_size: usize,
}

impl<'a> GridView<'a> {
    /// Returns the rows on the requested page.
    pub fn rows(&self) -> &[Row<'a>] {
        &self.rows
    }

    /// Iterates the page's records.
    pub fn records(&self) -> impl Iterator<Item = &'a Record> + '_ {
        self.rows.iter().map(|row| row.record)
    }

    /// Returns the number of rows on this page.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if the page has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns how many records survived search and filtering.
    pub fn total_filtered(&self) -> usize {
        self.total_filtered
    }

    /// Returns the total page count, never less than 1.
    pub fn total_pages(&self) -> usize {
        self.total_filtered.div_ceil(self.page_size).max(1)
    }

    /// Returns the selection keys of the visible rows, in page order.
    pub fn visible_keys(&self) -> Vec<RowKey> {
        self.rows.iter().map(Row::key).collect()
    }
}

/// Runs the four query stages over a record collection.
///
/// Pure function of its inputs: records are never mutated, only borrowed
/// into the output view, and identical inputs produce identical views.
///
/// 1. **Search**: keep records where any column's resolved text contains
///    the case-folded term.
/// 2. **Filter**: per active filter, keep records whose resolved text for
///    that column contains the case-folded filter value (substring, same as
///    search, for select filters too).
/// 3. **Sort**: stable sort by the sort column's resolved value; numeric
///    when both sides are numeric, case-sensitive lexicographic otherwise.
/// 4. **Paginate**: slice the requested page; past-the-end pages are
///    empty, never an error.
pub fn compute_view<'a>(
    records: &'a [Record],
    columns: &[Column],
    query: &GridQuery,
) -> GridView<'a> {
    let mut working: Vec<Row<'a>> = records
        .iter()
        .enumerate()
        .map(|(index, record)| Row { index, record })
        .collect();

    // Search stage
    if !query.search().is_empty() {
        let term = query.search().to_lowercase();
        working.retain(|row| {
            columns.iter().any(|column| {
                column
                    .resolve_text(row.record)
                    .to_lowercase()
                    .contains(&term)
            })
        });
    }

    // Filter stage
    for (key, value) in query.active_filters() {
        let needle = value.to_lowercase();
        let column = columns.iter().find(|c| c.key() == key);
        working.retain(|row| {
            let text = match column {
                Some(column) => column.resolve_text(row.record),
                // Filters on keys without a column fall back to a direct
                // field lookup so the pipeline stays total
                None => row.record.text(key),
            };
            text.to_lowercase().contains(&needle)
        });
    }

    // Sort stage
    if let Some(key) = query.sort().key() {
        let column = columns.iter().find(|c| c.key() == key);
        let mut keyed: Vec<(Value, Row<'a>)> = working
            .into_iter()
            .map(|row| {
                let value = match column {
                    Some(column) => column.resolve(row.record),
                    None => row.record.get(key).cloned().unwrap_or(Value::Null),
                };
                (value, row)
            })
            .collect();

        let direction = query.sort().direction();
        keyed.sort_by(|(a, _), (b, _)| match direction {
            Direction::Asc => compare_values(a, b),
            Direction::Desc => compare_values(a, b).reverse(),
        });

        working = keyed.into_iter().map(|(_, row)| row).collect();
    }

    // Pagination stage
    let total_filtered = working.len();
    let page = query.page();
    let rows: Vec<Row<'a>> = working
        .into_iter()
        .skip(page.offset())
        .take(page.size())
        .collect();

    GridView {
        rows,
        total_filtered,
        page_size: page.size(),
    }
}

/// Total ordering over resolved values: numeric when both sides are
/// numeric, case-sensitive lexicographic on the stringified values
/// otherwise. Incomparable floats (NaN) tie, preserving input order.
fn compare_values(a: &Value, b: &Value) -> Ordering {
    if let (Some(x), Some(y)) = (a.as_f64(), b.as_f64()) {
        x.partial_cmp(&y).unwrap_or(Ordering::Equal)
    } else {
        a.as_text().cmp(&b.as_text())
    }
}
