//! Column utilities stage: gesture flags, order, visibility, widths.

use crate::action::Action;
use crate::config::TableConfig;
use crate::instance::Instance;
use crate::model::Column;
use crate::state::TableState;

use super::{DecorateContext, ReduceContext, TablePlugin};

/// Owns column order, visibility, width overrides and the transient
/// drag/resize flags. The host's `on_change_column` callback fires
/// exactly once per completed gesture, never on intermediate updates.
pub struct ColumnUtilitiesPlugin;

fn default_column_order(config: &TableConfig, columns: &[Column]) -> Vec<String> {
    if config.initial_state.column_order.is_empty() {
        columns.iter().map(|c| c.id.clone()).collect()
    } else {
        config.initial_state.column_order.clone()
    }
}

impl TablePlugin for ColumnUtilitiesPlugin {
    fn name(&self) -> &'static str {
        "column_utilities"
    }

    fn reduce(
        &self,
        mut state: TableState,
        action: &Action,
        _previous: &TableState,
        cx: &ReduceContext<'_>,
    ) -> TableState {
        let config = cx.config;
        match action {
            Action::Init => {
                state.is_resizing = false;
                state.is_dragging = false;
                state.column_order = default_column_order(config, cx.columns);
                state.hidden_columns = config.initial_state.hidden_columns.clone();
                state.column_widths = config.initial_state.column_widths.clone();
            }
            Action::ColumnStartResizing { column_id } => {
                log::debug!("column '{}' started resizing", column_id);
                state.is_resizing = true;
            }
            Action::ColumnDoneResizing => {
                (config.on_change_column)(&state, action);
                state.is_resizing = false;
            }
            Action::ColumnStartDragging { column_id } => {
                log::debug!("column '{}' started dragging", column_id);
                state.is_dragging = true;
            }
            Action::ColumnDoneDragging => {
                (config.on_change_column)(&state, action);
                state.is_dragging = false;
            }
            Action::SetColumnOrder { order } => {
                for id in order {
                    if !cx.columns.iter().any(|c| &c.id == id) {
                        log::warn!("column order references unknown column '{}'", id);
                    }
                }
                state.column_order = order.clone();
                if !state.is_dragging {
                    (config.on_change_column)(&state, action);
                }
            }
            Action::SetHiddenColumns { hidden } => {
                state.hidden_columns = hidden.clone();
                (config.on_change_column)(&state, action);
            }
            Action::ResetColumnOrder => {
                state.column_order = default_column_order(config, cx.columns);
                (config.on_change_column)(&state, action);
            }
            Action::ResetHiddenColumns => {
                state.hidden_columns = config.initial_state.hidden_columns.clone();
                (config.on_change_column)(&state, action);
            }
            Action::SetColumnWidth { column_id, width } => {
                if cx.columns.iter().any(|c| &c.id == column_id) {
                    state.column_widths.insert(column_id.clone(), *width);
                } else {
                    log::warn!("width set for unknown column '{}'", column_id);
                }
            }
            _ => {}
        }
        state
    }

    fn decorate(
        &self,
        instance: &mut Instance,
        state: &mut TableState,
        _cx: &DecorateContext<'_>,
    ) {
        // Width overrides and the designated expand column: the first
        // visible column that is not the selection column draws the
        // expand/indent controls, every other one opts out.
        let mut expand_column_id = None;
        for column in instance.visible_columns.iter_mut() {
            if let Some(width) = state.column_widths.get(&column.id) {
                column.width = *width;
            }
            if column.is_select_column() {
                column.disable_expand = true;
            } else if expand_column_id.is_none() {
                expand_column_id = Some(column.id.clone());
                column.disable_expand = false;
            } else {
                column.disable_expand = true;
            }
        }
        instance.expand_column_id = expand_column_id;
    }
}
