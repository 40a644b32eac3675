//! The closed action union.

use serde::Deserialize;
use serde::Serialize;

use crate::model::RowId;
use crate::state::SortRule;

/// Target of a `SetActiveRow` action, matching the configured keying.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActiveRowTarget {
    /// Activate by stable row id.
    Id(RowId),
    /// Activate by position within the current page.
    Index(usize),
}

/// Every state transition the engine knows about.
///
/// The union is closed: plugins match on the variants they own and pass
/// everything else through unchanged, so dispatching any action is a
/// total function over the composed state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Action {
    /// Seed every plugin's state slice from the configured initial
    /// state. Dispatched once at construction.
    Init,

    // -- selection ----------------------------------------------------------
    /// Restore the configured initial selection.
    ResetSelectedRows,
    /// Select or deselect every visible row. `None` toggles based on
    /// the all-selected aggregate.
    ToggleAllRowsSelected { value: Option<bool> },
    /// Select or deselect one row. `None` toggles.
    ToggleRowSelected { id: RowId, value: Option<bool> },

    // -- active row ---------------------------------------------------------
    /// Restore the configured initial active row.
    ResetActiveRow,
    /// Propose a new active row. Committed only if the host's change
    /// callback agrees.
    SetActiveRow { target: ActiveRowTarget },

    // -- column interaction -------------------------------------------------
    /// A resize gesture started on a column.
    ColumnStartResizing { column_id: String },
    /// The resize gesture completed.
    ColumnDoneResizing,
    /// A drag gesture started on a column.
    ColumnStartDragging { column_id: String },
    /// The drag gesture completed.
    ColumnDoneDragging,
    /// Apply a new column order.
    SetColumnOrder { order: Vec<String> },
    /// Apply a new hidden-column set.
    SetHiddenColumns { hidden: Vec<String> },
    /// Restore the configured column order.
    ResetColumnOrder,
    /// Restore the configured hidden-column set.
    ResetHiddenColumns,
    /// Record a column width from a resize gesture.
    SetColumnWidth { column_id: String, width: u16 },

    // -- filtering ----------------------------------------------------------
    /// Set or replace the filter for a column. An empty value removes
    /// the filter.
    SetFilter { column_id: String, value: Vec<String> },
    /// Remove all filters and restore the configured initial set.
    ResetFilters,

    // -- sorting ------------------------------------------------------------
    /// Replace the sort rules.
    SetSortBy { rules: Vec<SortRule> },
    /// Cycle one column through ascending, descending, off.
    ToggleSortBy { column_id: String },

    // -- paging -------------------------------------------------------------
    /// Navigate to a page.
    GotoPage { page_index: usize },
    /// Change the page size. `None` disables pagination.
    SetPageSize { page_size: Option<usize> },

    // -- expansion ----------------------------------------------------------
    /// Expand or collapse one row. `None` toggles.
    ToggleRowExpanded { id: RowId, value: Option<bool> },
    /// Restore the configured expanded set.
    ResetExpanded,
}
