//! Column descriptors for list views

use std::fmt;

use crate::model::Record;
use crate::model::Value;

/// Resolves a column's value from a record.
pub type Accessor = Box<dyn Fn(&Record) -> Value + Send + Sync>;

/// Formats a column's cell for display.
pub type Renderer = Box<dyn Fn(&Record) -> String + Send + Sync>;

/// How a filterable column collects its filter value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterKind {
    /// Free-text input.
    #[default]
    Text,
    /// Closed set of options (a dropdown). Matching still uses substring
    /// semantics, identical to text filters.
    Select,
}

/// One option of a select filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOption {
    /// The value submitted as the filter constraint.
    pub value: String,
    /// The label shown to the user.
    pub label: String,
}

impl FilterOption {
    /// Creates a new filter option.
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

impl<V: Into<String>, L: Into<String>> From<(V, L)> for FilterOption {
    fn from((value, label): (V, L)) -> Self {
        Self::new(value, label)
    }
}

/// Describes how one field is displayed, sorted, and filtered.
///
/// A column resolves its value per record either through a direct field
/// lookup on the key (the default) or through a custom accessor closure.
/// The resolved value feeds every query stage (search, filter, sort) and
/// the CSV export; the optional render closure only affects display text.
///
/// # Example
///
/// ```
/// use storefront_lib::grid::Column;
/// use storefront_lib::model::Value;
///
/// let name = Column::new("name", "Product")
///     .with_accessor(|r| Value::from(format!("{} ({})", r.text("name"), r.text("sku"))));
///
/// let status = Column::new("is_active", "Status")
///     .with_select_filter([("true", "Active"), ("false", "Inactive")]);
/// ```
pub struct Column {
    key: String,
    header: String,
    accessor: Option<Accessor>,
    render: Option<Renderer>,
    sortable: bool,
    filterable: bool,
    filter_kind: FilterKind,
    filter_options: Vec<FilterOption>,
}

impl Column {
    /// Creates a new column. Sortable by default, not filterable.
    pub fn new(key: impl Into<String>, header: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            header: header.into(),
            accessor: None,
            render: None,
            sortable: true,
            filterable: false,
            filter_kind: FilterKind::Text,
            filter_options: Vec::new(),
        }
    }

    /// Sets a custom value accessor replacing the direct field lookup.
    pub fn with_accessor(mut self, f: impl Fn(&Record) -> Value + Send + Sync + 'static) -> Self {
        self.accessor = Some(Box::new(f));
        self
    }

    /// Sets a custom display renderer. Does not affect search/filter/sort
    /// or export, which always use the resolved value.
    pub fn with_render(mut self, f: impl Fn(&Record) -> String + Send + Sync + 'static) -> Self {
        self.render = Some(Box::new(f));
        self
    }

    /// Sets whether the column participates in sorting.
    pub fn sortable(mut self, sortable: bool) -> Self {
        self.sortable = sortable;
        self
    }

    /// Enables a free-text filter on this column.
    pub fn filterable(mut self) -> Self {
        self.filterable = true;
        self.filter_kind = FilterKind::Text;
        self
    }

    /// Enables a select filter on this column with the given options.
    pub fn with_select_filter<O>(mut self, options: impl IntoIterator<Item = O>) -> Self
    where
        O: Into<FilterOption>,
    {
        self.filterable = true;
        self.filter_kind = FilterKind::Select;
        self.filter_options = options.into_iter().map(Into::into).collect();
        self
    }

    /// Returns the column key (field name).
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the header label.
    pub fn header(&self) -> &str {
        &self.header
    }

    /// Returns `true` if the column participates in sorting.
    pub fn is_sortable(&self) -> bool {
        self.sortable
    }

    /// Returns `true` if the column offers a filter.
    pub fn is_filterable(&self) -> bool {
        self.filterable
    }

    /// Returns the filter input kind.
    pub fn filter_kind(&self) -> FilterKind {
        self.filter_kind
    }

    /// Returns the select filter options.
    pub fn filter_options(&self) -> &[FilterOption] {
        &self.filter_options
    }

    /// Resolves this column's value for a record.
    ///
    /// Uses the accessor when set, otherwise looks the key up directly.
    /// A missing field resolves to [`Value::Null`].
    pub fn resolve(&self, record: &Record) -> Value {
        match &self.accessor {
            Some(accessor) => accessor(record),
            None => record.get(&self.key).cloned().unwrap_or(Value::Null),
        }
    }

    /// Resolves this column's value as query text (nulls become empty).
    pub fn resolve_text(&self, record: &Record) -> String {
        self.resolve(record).as_text()
    }

    /// Returns the display text for a cell: the render closure when set,
    /// otherwise the resolved value's text.
    pub fn cell_text(&self, record: &Record) -> String {
        match &self.render {
            Some(render) => render(record),
            None => self.resolve_text(record),
        }
    }
}

impl fmt::Debug for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("key", &self.key)
            .field("header", &self.header)
            .field("sortable", &self.sortable)
            .field("filterable", &self.filterable)
            .field("filter_kind", &self.filter_kind)
            .finish_non_exhaustive()
    }
}
