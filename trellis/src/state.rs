//! Top-level table state.

use std::collections::HashMap;
use std::collections::HashSet;

use serde::Deserialize;
use serde::Serialize;

use crate::model::RowId;

/// An active filter for one column.
///
/// Filters form a set keyed by column id with last-write-wins
/// semantics; insertion order is preserved but only affects evaluation
/// short-circuiting, never the result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filter {
    /// Target column id.
    pub id: String,
    /// Filter value. The built-in matchers read the first element.
    pub value: Vec<String>,
}

impl Filter {
    /// Create a filter for a column.
    pub fn new(id: impl Into<String>, value: Vec<String>) -> Self {
        Self {
            id: id.into(),
            value,
        }
    }
}

/// One sort rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortRule {
    /// Column id to sort by.
    pub id: String,
    /// Sort descending instead of ascending.
    pub descending: bool,
}

impl SortRule {
    /// Ascending rule for a column.
    pub fn asc(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            descending: false,
        }
    }

    /// Descending rule for a column.
    pub fn desc(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            descending: true,
        }
    }
}

/// The active row, in whichever keying the configuration selected.
///
/// At most one row is active at a time. `Index` indexes into the
/// current page of display rows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActiveRow {
    /// No row is active.
    #[default]
    None,
    /// Active row by stable id.
    Id(RowId),
    /// Active row by position within the current page.
    Index(usize),
}

impl ActiveRow {
    /// Check if no row is active.
    pub fn is_none(&self) -> bool {
        matches!(self, ActiveRow::None)
    }
}

/// The single composed state object.
///
/// Created by the `Init` action, mutated only through dispatched
/// actions, and discarded when the table is dropped. Every field is a
/// plugin-owned slice; the struct is serde-serializable so hosts can
/// persist user layout (column order, widths, hidden columns) between
/// sessions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableState {
    /// Active filters, one per targeted column.
    pub filters: Vec<Filter>,
    /// Selected row ids. Stale ids are tolerated and ignored by
    /// aggregate computations.
    pub selected_row_ids: HashSet<RowId>,
    /// The active row.
    pub active_row: ActiveRow,
    /// Expanded row ids.
    pub expanded_row_ids: HashSet<RowId>,
    /// Hidden column ids.
    pub hidden_columns: Vec<String>,
    /// Column display order.
    pub column_order: Vec<String>,
    /// Per-column width overrides from resize gestures.
    pub column_widths: HashMap<String, u16>,
    /// Sort rules, applied in order.
    pub sort_by: Vec<SortRule>,
    /// Current page index.
    pub page_index: usize,
    /// Rows per page. `None` disables pagination (one page).
    pub page_size: Option<usize>,
    /// A column resize gesture is in flight.
    pub is_resizing: bool,
    /// A column drag gesture is in flight.
    pub is_dragging: bool,
}

impl TableState {
    /// Get the active filter for a column, if any.
    pub fn filter_for(&self, column_id: &str) -> Option<&Filter> {
        self.filters.iter().find(|f| f.id == column_id)
    }

    /// Check if a row id is in the selection set.
    pub fn is_selected(&self, id: &str) -> bool {
        self.selected_row_ids.contains(id)
    }
}
