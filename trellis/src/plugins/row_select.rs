//! Selection stage: the selected-id set and its aggregates.

use std::collections::HashSet;

use crate::action::Action;
use crate::config::CanSelectRow;
use crate::instance::Instance;
use crate::model::{Row, RowId};
use crate::state::TableState;

use super::{DecorateContext, ReduceContext, TablePlugin};

/// Owns the selection set. Every mutation runs the veto-then-mutate
/// protocol: the host's `on_select_row` gate first, then the
/// `can_select_row` predicate per affected row.
pub struct RowSelectPlugin;

impl TablePlugin for RowSelectPlugin {
    fn name(&self) -> &'static str {
        "row_select"
    }

    fn reduce(
        &self,
        mut state: TableState,
        action: &Action,
        _previous: &TableState,
        cx: &ReduceContext<'_>,
    ) -> TableState {
        match action {
            Action::Init | Action::ResetSelectedRows => {
                state.selected_row_ids = cx.config.initial_state.selected_row_ids.clone();
            }
            Action::ToggleAllRowsSelected { value } => {
                let select_all = value.unwrap_or(!cx.instance.is_all_rows_selected);
                for row in &cx.instance.flat_rows {
                    if !(cx.config.can_select_row)(row) {
                        continue;
                    }
                    if !(cx.config.on_select_row)(row, select_all) {
                        continue;
                    }
                    if select_all {
                        state.selected_row_ids.insert(row.id.clone());
                    } else {
                        state.selected_row_ids.remove(&row.id);
                    }
                }
            }
            Action::ToggleRowSelected { id, value } => {
                let is_selected = state.selected_row_ids.contains(id);
                let should_select = value.unwrap_or(!is_selected);
                if is_selected == should_select {
                    return state;
                }
                let Some(row) = cx.instance.rows_by_id.get(id) else {
                    log::warn!("toggle selected: unknown row id '{}'", id);
                    return state;
                };
                if (cx.config.on_select_row)(row, should_select) {
                    apply_selection(
                        row,
                        should_select,
                        cx.config.select_sub_rows,
                        &cx.config.can_select_row,
                        &mut state.selected_row_ids,
                    );
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
        cx: &DecorateContext<'_>,
    ) {
        let selected = state.selected_row_ids.clone();
        instance.decorate_rows(|row| row.is_selected = selected.contains(&row.id));

        instance.selected_flat_rows = instance
            .flat_rows
            .iter()
            .filter(|row| row.is_selected)
            .map(|row| row.id.clone())
            .collect();

        let can_select = &cx.config.can_select_row;
        instance.is_all_rows_selected = !instance.flat_rows.is_empty()
            && instance
                .flat_rows
                .iter()
                .filter(|row| can_select(row))
                .all(|row| selected.contains(&row.id));
        instance.is_some_rows_selected =
            !instance.is_all_rows_selected && !state.selected_row_ids.is_empty();
    }
}

/// Apply one selection value to a row and, when propagation is on, to
/// every descendant depth-first, each re-checked against the
/// can-select predicate.
fn apply_selection(
    row: &Row,
    should_select: bool,
    recurse: bool,
    can_select: &CanSelectRow,
    selected: &mut HashSet<RowId>,
) {
    if can_select(row) {
        if should_select {
            selected.insert(row.id.clone());
        } else {
            selected.remove(&row.id);
        }
    }
    if recurse {
        for sub in &row.sub_rows {
            apply_selection(sub, should_select, recurse, can_select, selected);
        }
    }
}
