//! CSV export of list rows

use chrono::DateTime;
use chrono::SecondsFormat;
use chrono::Utc;

use super::Column;
use crate::model::Record;

/// Content type of the produced export.
pub const CSV_CONTENT_TYPE: &str = "text/csv";

/// Serializes rows to CSV using the columns' headers and resolved values.
///
/// The header line carries the raw header labels; every data value is
/// double-quoted with embedded quotes doubled. Lines join with `\n` and the
/// output carries no trailing newline. Byte-reproducible for identical
/// inputs; timestamps belong in the filename, never the body.
///
/// # Example
///
/// ```
/// use storefront_lib::grid::{export, Column};
/// use storefront_lib::model::Record;
///
/// let rows = vec![Record::new().set("name", "Wireless Mouse").set("price", 24.99)];
/// let columns = vec![Column::new("name", "Name"), Column::new("price", "Price")];
///
/// let csv = export::to_csv(rows.iter(), &columns);
/// assert_eq!(csv, "Name,Price\n\"Wireless Mouse\",\"24.99\"");
/// ```
pub fn to_csv<'a>(rows: impl IntoIterator<Item = &'a Record>, columns: &[Column]) -> String {
    let mut lines = Vec::new();

    let header = columns
        .iter()
        .map(Column::header)
        .collect::<Vec<_>>()
        .join(",");
    lines.push(header);

    for record in rows {
        let line = columns
            .iter()
            .map(|column| quote_field(&column.resolve_text(record)))
            .collect::<Vec<_>>()
            .join(",");
        lines.push(line);
    }

    lines.join("\n")
}

/// Builds the date-stamped download filename for an export.
///
/// Takes the timestamp as a parameter so the export pipeline stays pure.
pub fn export_filename(timestamp: DateTime<Utc>) -> String {
    format!(
        "export-{}.csv",
        timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
    )
}

/// Quotes one CSV field, doubling embedded quote characters.
fn quote_field(text: &str) -> String {
    format!("\"{}\"", text.replace('"', "\"\""))
}
