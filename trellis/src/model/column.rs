//! Column descriptors.

use serde::Deserialize;
use serde::Serialize;

use crate::filters::FilterFn;

/// Id of the synthetic selection column prepended when multi-select is
/// enabled.
pub const SELECT_COLUMN_ID: &str = "select_";

/// Default column width.
pub const DEFAULT_COLUMN_WIDTH: u16 = 150;

/// How a column's cells are rendered by the host.
///
/// `Hidden` columns are structurally invisible: they never appear in
/// the visible column set regardless of the hidden-columns state (used
/// for id-carrying columns the host needs but never shows).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CellType {
    /// Plain text cell.
    #[default]
    Text,
    /// Boolean cell.
    Boolean,
    /// Structurally hidden column.
    Hidden,
}

/// Column configuration.
///
/// Identity is `id`, which defaults to the accessor. Visibility, order
/// and width overrides are state, not structural properties of the
/// column.
///
/// # Examples
///
/// ```
/// use trellis::model::Column;
///
/// let columns = vec![
///     Column::new("name").label("Name"),
///     Column::new("age").filter_type("greater_than").width(80),
/// ];
/// ```
#[derive(Clone)]
pub struct Column {
    /// Column identity.
    pub id: String,
    /// Field name to read from the source record.
    pub accessor: String,
    /// Header text.
    pub label: String,
    /// Cell rendering kind.
    pub cell_type: CellType,
    /// Key into the filter-type registry. `None` uses the default text
    /// matcher.
    pub filter_type: Option<String>,
    /// Explicit filter function, overriding `filter_type`.
    pub filter_fn: Option<FilterFn>,
    /// Whether the expand/indent control may be drawn in this column.
    /// Recomputed every cycle on the visible column set.
    pub disable_expand: bool,
    /// Whether the column may be drag-reordered.
    pub disable_dragging: bool,
    /// Whether the column may be resized.
    pub disable_resizing: bool,
    /// Column width. Overridden per-column by the width state.
    pub width: u16,
}

impl Column {
    /// Create a column reading `accessor`, with `id` defaulting to the
    /// accessor.
    pub fn new(accessor: impl Into<String>) -> Self {
        let accessor = accessor.into();
        Self {
            id: accessor.clone(),
            accessor: accessor.clone(),
            label: accessor,
            cell_type: CellType::default(),
            filter_type: None,
            filter_fn: None,
            disable_expand: false,
            disable_dragging: false,
            disable_resizing: false,
            width: DEFAULT_COLUMN_WIDTH,
        }
    }

    /// Set an explicit id distinct from the accessor.
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Set the header text.
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Set the cell kind.
    pub fn cell_type(mut self, cell_type: CellType) -> Self {
        self.cell_type = cell_type;
        self
    }

    /// Mark the column structurally hidden.
    pub fn hidden(mut self) -> Self {
        self.cell_type = CellType::Hidden;
        self
    }

    /// Set the filter-type registry key used when filtering this column.
    pub fn filter_type(mut self, key: impl Into<String>) -> Self {
        self.filter_type = Some(key.into());
        self
    }

    /// Set an explicit filter function, overriding the registry.
    pub fn filter_fn(mut self, f: FilterFn) -> Self {
        self.filter_fn = Some(f);
        self
    }

    /// Disallow drag-reordering of this column.
    pub fn disable_dragging(mut self) -> Self {
        self.disable_dragging = true;
        self
    }

    /// Disallow resizing of this column.
    pub fn disable_resizing(mut self) -> Self {
        self.disable_resizing = true;
        self
    }

    /// Set the column width.
    pub fn width(mut self, width: u16) -> Self {
        self.width = width;
        self
    }

    /// The synthetic selection column.
    pub(crate) fn select_column() -> Self {
        Self {
            id: SELECT_COLUMN_ID.to_string(),
            accessor: String::new(),
            label: String::new(),
            cell_type: CellType::Text,
            filter_type: None,
            filter_fn: None,
            disable_expand: true,
            disable_dragging: true,
            disable_resizing: true,
            width: 50,
        }
    }

    /// Check if this is the synthetic selection column.
    pub fn is_select_column(&self) -> bool {
        self.id == SELECT_COLUMN_ID
    }
}

impl std::fmt::Debug for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Column")
            .field("id", &self.id)
            .field("accessor", &self.accessor)
            .field("label", &self.label)
            .field("cell_type", &self.cell_type)
            .field("filter_type", &self.filter_type)
            .field("has_filter_fn", &self.filter_fn.is_some())
            .field("disable_expand", &self.disable_expand)
            .field("disable_dragging", &self.disable_dragging)
            .field("disable_resizing", &self.disable_resizing)
            .field("width", &self.width)
            .finish()
    }
}
