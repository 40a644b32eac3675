//! The table façade: owns state, dispatches actions, recomputes the
//! instance.

use crate::action::{Action, ActiveRowTarget};
use crate::config::TableConfig;
use crate::error::TableError;
use crate::filters::FilterTypes;
use crate::instance::Instance;
use crate::model::{Column, Row, RowData, RowId, SELECT_COLUMN_ID};
use crate::plugins::{DecorateContext, Pipeline, ReduceContext};
use crate::state::{SortRule, TableState};

/// A column reorder request from the host's gesture layer.
///
/// Indices refer to the visible column sequence, excluding the
/// synthetic selection column; the engine does not itself listen to
/// pointer events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReorderRequest {
    /// Id of the dragged column.
    pub dragged_column_id: String,
    /// Index the drag started from.
    pub source_index: usize,
    /// Index the column was dropped at.
    pub destination_index: usize,
}

/// A column resize request from the host's gesture layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResizeRequest {
    /// Id of the resized column.
    pub column_id: String,
    /// New width.
    pub new_width: u16,
}

/// A hierarchical table: configuration, data, composed state and the
/// per-cycle instance.
///
/// Every state transition is synchronous: dispatching an action runs
/// each plugin's reducer fragment in registration order, then rebuilds
/// the instance through the decoration pipeline before control
/// returns. The rendering layer reads only [`Table::instance`].
///
/// # Example
///
/// ```
/// use trellis::prelude::*;
///
/// let columns = vec![Column::new("name"), Column::new("age")];
/// let data = vec![
///     RowData::new("r1").field("name", "Ada").field("age", 36),
///     RowData::new("r2").field("name", "Grace").field("age", 45),
/// ];
/// let mut table = Table::new(TableConfig::new("people"), columns, data).unwrap();
///
/// table.set_filter("age", vec!["36".to_string()]);
/// assert_eq!(table.instance().flat_rows.len(), 1);
/// ```
pub struct Table {
    config: TableConfig,
    columns: Vec<Column>,
    filter_types: FilterTypes,
    pipeline: Pipeline,
    data: Vec<RowData>,
    state: TableState,
    instance: Instance,
}

impl std::fmt::Debug for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Table")
            .field("data", &self.data)
            .field("state", &self.state)
            .field("instance", &self.instance)
            .finish_non_exhaustive()
    }
}

impl Table {
    /// Create a table with the standard plugin pipeline.
    pub fn new(
        config: TableConfig,
        columns: Vec<Column>,
        data: Vec<RowData>,
    ) -> Result<Self, TableError> {
        Self::with_pipeline(config, columns, data, Pipeline::standard())
    }

    /// Create a table with an explicit plugin pipeline.
    pub fn with_pipeline(
        config: TableConfig,
        columns: Vec<Column>,
        data: Vec<RowData>,
        pipeline: Pipeline,
    ) -> Result<Self, TableError> {
        for (i, column) in columns.iter().enumerate() {
            if column.id.is_empty() {
                return Err(TableError::EmptyColumnId);
            }
            if column.id == SELECT_COLUMN_ID {
                return Err(TableError::ReservedColumnId(column.id.clone()));
            }
            if columns[..i].iter().any(|c| c.id == column.id) {
                return Err(TableError::DuplicateColumn(column.id.clone()));
            }
        }

        let filter_types = FilterTypes::with_text_match(config.text_match);
        let mut table = Self {
            config,
            columns,
            filter_types,
            pipeline,
            data,
            state: TableState::default(),
            instance: Instance::default(),
        };
        table.dispatch(Action::Init);
        Ok(table)
    }

    /// The composed state.
    pub fn state(&self) -> &TableState {
        &self.state
    }

    /// The current derived instance.
    pub fn instance(&self) -> &Instance {
        &self.instance
    }

    /// The configuration.
    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    /// The configured columns, in configuration order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Register or replace a filter type and recompute.
    pub fn register_filter_type(
        &mut self,
        key: impl Into<String>,
        f: impl Fn(&[&Row], &str, &[String]) -> Vec<usize> + Send + Sync + 'static,
    ) {
        self.filter_types.register(key, f);
        self.recompute();
    }

    /// Replace the data wholesale, firing the configured auto-resets.
    pub fn set_data(&mut self, data: Vec<RowData>) {
        self.data = data;
        let reset_selection = self.config.auto_reset_selected_rows;
        let reset_active = self.config.auto_reset_active_row;
        if reset_selection {
            self.dispatch(Action::ResetSelectedRows);
        }
        if reset_active {
            self.dispatch(Action::ResetActiveRow);
        }
        if !reset_selection && !reset_active {
            self.recompute();
        }
    }

    /// Dispatch an action: reduce, then recompute the instance.
    pub fn dispatch(&mut self, action: Action) {
        log::debug!("{}: dispatch {:?}", self.config.table_name, action);
        let previous = self.state.clone();
        let next = {
            let cx = ReduceContext {
                config: &self.config,
                columns: &self.columns,
                instance: &self.instance,
            };
            self.pipeline.reduce(self.state.clone(), &action, &previous, &cx)
        };
        self.state = next;
        self.recompute();
    }

    fn recompute(&mut self) {
        let mut instance = Instance::build(&self.config, &self.columns, &self.data, &self.state);
        let cx = DecorateContext {
            config: &self.config,
            filter_types: &self.filter_types,
        };
        self.pipeline.decorate(&mut instance, &mut self.state, &cx);
        self.instance = instance;
    }

    // -------------------------------------------------------------------------
    // Selection
    // -------------------------------------------------------------------------

    /// Select or deselect one row. `None` toggles.
    pub fn toggle_row_selected(&mut self, id: impl Into<RowId>, value: Option<bool>) {
        self.dispatch(Action::ToggleRowSelected {
            id: id.into(),
            value,
        });
    }

    /// Select or deselect every visible row. `None` toggles.
    pub fn toggle_all_rows_selected(&mut self, value: Option<bool>) {
        self.dispatch(Action::ToggleAllRowsSelected { value });
    }

    /// Restore the configured initial selection.
    pub fn reset_selected_rows(&mut self) {
        self.dispatch(Action::ResetSelectedRows);
    }

    // -------------------------------------------------------------------------
    // Active row
    // -------------------------------------------------------------------------

    /// Propose a new active row.
    pub fn activate_row(&mut self, target: ActiveRowTarget) {
        self.dispatch(Action::SetActiveRow { target });
    }

    /// Restore the configured initial active row.
    pub fn reset_active_row(&mut self) {
        self.dispatch(Action::ResetActiveRow);
    }

    // -------------------------------------------------------------------------
    // Filtering and sorting
    // -------------------------------------------------------------------------

    /// Set or replace the filter for a column. An empty value removes
    /// it.
    pub fn set_filter(&mut self, column_id: impl Into<String>, value: Vec<String>) {
        self.dispatch(Action::SetFilter {
            column_id: column_id.into(),
            value,
        });
    }

    /// Restore the configured initial filters.
    pub fn reset_filters(&mut self) {
        self.dispatch(Action::ResetFilters);
    }

    /// Replace the sort rules.
    pub fn set_sort_by(&mut self, rules: Vec<SortRule>) {
        self.dispatch(Action::SetSortBy { rules });
    }

    /// Cycle one column through ascending, descending, off.
    pub fn toggle_sort_by(&mut self, column_id: impl Into<String>) {
        self.dispatch(Action::ToggleSortBy {
            column_id: column_id.into(),
        });
    }

    // -------------------------------------------------------------------------
    // Paging and expansion
    // -------------------------------------------------------------------------

    /// Navigate to a page.
    pub fn goto_page(&mut self, page_index: usize) {
        self.dispatch(Action::GotoPage { page_index });
    }

    /// Navigate to the next page, if any.
    pub fn next_page(&mut self) {
        if self.instance.can_next_page {
            self.goto_page(self.state.page_index + 1);
        }
    }

    /// Navigate to the previous page, if any.
    pub fn previous_page(&mut self) {
        if self.instance.can_previous_page {
            self.goto_page(self.state.page_index - 1);
        }
    }

    /// Change the page size. `None` disables pagination.
    pub fn set_page_size(&mut self, page_size: Option<usize>) {
        self.dispatch(Action::SetPageSize { page_size });
    }

    /// Expand or collapse one row. `None` toggles.
    pub fn toggle_row_expanded(&mut self, id: impl Into<RowId>, value: Option<bool>) {
        self.dispatch(Action::ToggleRowExpanded {
            id: id.into(),
            value,
        });
    }

    /// Restore the configured expanded set.
    pub fn reset_expanded(&mut self) {
        self.dispatch(Action::ResetExpanded);
    }

    // -------------------------------------------------------------------------
    // Column layout
    // -------------------------------------------------------------------------

    /// Apply a new column order.
    pub fn set_column_order(&mut self, order: Vec<String>) {
        self.dispatch(Action::SetColumnOrder { order });
    }

    /// Apply a new hidden-column set.
    pub fn set_hidden_columns(&mut self, hidden: Vec<String>) {
        self.dispatch(Action::SetHiddenColumns { hidden });
    }

    /// Restore the configured column order.
    pub fn reset_column_order(&mut self) {
        self.dispatch(Action::ResetColumnOrder);
    }

    /// Restore the configured hidden-column set.
    pub fn reset_hidden_columns(&mut self) {
        self.dispatch(Action::ResetHiddenColumns);
    }

    /// A resize gesture started.
    pub fn start_resizing(&mut self, column_id: impl Into<String>) {
        self.dispatch(Action::ColumnStartResizing {
            column_id: column_id.into(),
        });
    }

    /// The resize gesture completed.
    pub fn done_resizing(&mut self) {
        self.dispatch(Action::ColumnDoneResizing);
    }

    /// A drag gesture started.
    pub fn start_dragging(&mut self, column_id: impl Into<String>) {
        self.dispatch(Action::ColumnStartDragging {
            column_id: column_id.into(),
        });
    }

    /// The drag gesture completed.
    pub fn end_dragging(&mut self) {
        self.dispatch(Action::ColumnDoneDragging);
    }

    /// Apply a reorder request from the gesture layer.
    ///
    /// The request is validated against the current visible columns; a
    /// mismatched source is a stale gesture and is dropped with a
    /// diagnostic.
    pub fn reorder_column(&mut self, request: ReorderRequest) {
        let visible: Vec<String> = self
            .instance
            .visible_columns
            .iter()
            .filter(|c| !c.is_select_column())
            .map(|c| c.id.clone())
            .collect();
        let source_matches = visible
            .get(request.source_index)
            .is_some_and(|id| *id == request.dragged_column_id);
        if !source_matches {
            log::warn!(
                "reorder request for '{}' does not match the column at index {}",
                request.dragged_column_id,
                request.source_index
            );
            return;
        }
        let mut order = visible;
        let column = order.remove(request.source_index);
        let destination = request.destination_index.min(order.len());
        order.insert(destination, column);
        for column in &self.instance.all_columns {
            if !order.contains(&column.id) {
                order.push(column.id.clone());
            }
        }
        self.dispatch(Action::SetColumnOrder { order });
    }

    /// Apply a resize request from the gesture layer.
    pub fn resize_column(&mut self, request: ResizeRequest) {
        self.dispatch(Action::SetColumnWidth {
            column_id: request.column_id,
            width: request.new_width,
        });
    }
}
