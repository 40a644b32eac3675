//! Active-row stage: a single focused row, id- or index-keyed.

use crate::action::{Action, ActiveRowTarget};
use crate::config::ActiveRowMode;
use crate::instance::Instance;
use crate::model::Row;
use crate::state::{ActiveRow, TableState};

use super::{DecorateContext, ReduceContext, TablePlugin};

/// Owns the active row. In id keying the row survives filter, sort and
/// paging changes while its id exists. In index keying the row is a
/// position on the current page, and the host's `can_change_row`
/// predicate may veto navigational actions that would move it.
pub struct ActiveRowPlugin;

impl TablePlugin for ActiveRowPlugin {
    fn name(&self) -> &'static str {
        "active_row"
    }

    fn reduce(
        &self,
        mut state: TableState,
        action: &Action,
        previous: &TableState,
        cx: &ReduceContext<'_>,
    ) -> TableState {
        let config = cx.config;
        match action {
            Action::Init | Action::ResetActiveRow => {
                state.active_row = config.initial_state.active_row.clone();
            }
            Action::SetActiveRow { target } => match (config.active_row_mode, target) {
                (ActiveRowMode::Id, ActiveRowTarget::Id(new_id)) => {
                    let old = previous.active_row.clone();
                    let old_id = match &old {
                        ActiveRow::Id(id) => Some(id.clone()),
                        _ => None,
                    };
                    if old_id.as_ref() != Some(new_id) {
                        let new_row = cx.instance.rows_by_id.get(new_id);
                        let old_row = old_id.as_ref().and_then(|id| cx.instance.rows_by_id.get(id));
                        state.active_row = if (config.on_change_row)(new_row, old_row) {
                            ActiveRow::Id(new_id.clone())
                        } else {
                            old
                        };
                    }
                }
                (ActiveRowMode::Index, ActiveRowTarget::Index(new_index)) => {
                    let old = previous.active_row.clone();
                    let old_index = match old {
                        ActiveRow::Index(i) => Some(i),
                        _ => None,
                    };
                    if old_index != Some(*new_index) {
                        let new_row = cx.instance.page_rows.get(*new_index);
                        let old_row = old_index.and_then(|i| cx.instance.page_rows.get(i));
                        state.active_row = if (config.on_change_row)(new_row, old_row) {
                            ActiveRow::Index(*new_index)
                        } else {
                            old
                        };
                    }
                }
                (mode, target) => {
                    log::warn!(
                        "active row target {:?} does not match keying {:?}; ignored",
                        target,
                        mode
                    );
                }
            },
            Action::GotoPage { .. }
            | Action::SetPageSize { .. }
            | Action::SetSortBy { .. }
            | Action::ToggleSortBy { .. }
            | Action::SetFilter { .. }
            | Action::ResetFilters
                if config.active_row_mode == ActiveRowMode::Index =>
            {
                let current: Option<&Row> = match previous.active_row {
                    ActiveRow::Index(i) => cx.instance.page_rows.get(i),
                    _ => None,
                };
                if !(config.can_change_row)(current) {
                    // Veto: restore the triggering action's target field.
                    match action {
                        Action::GotoPage { .. } => {
                            state.page_index = previous.page_index;
                        }
                        Action::SetPageSize { .. } => {
                            state.page_size = previous.page_size;
                            state.page_index = previous.page_index;
                        }
                        Action::SetSortBy { .. } | Action::ToggleSortBy { .. } => {
                            state.sort_by = previous.sort_by.clone();
                        }
                        Action::SetFilter { .. } | Action::ResetFilters => {
                            state.filters = previous.filters.clone();
                        }
                        _ => {}
                    }
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
        match cx.config.active_row_mode {
            ActiveRowMode::Id => {
                if let ActiveRow::Id(id) = &state.active_row {
                    let id = id.clone();
                    instance.decorate_rows(|row| row.is_active = row.id == id);
                }
            }
            ActiveRowMode::Index => {
                if instance.page_rows.is_empty() {
                    state.active_row = ActiveRow::None;
                } else {
                    let last = instance.page_rows.len() - 1;
                    let index = match state.active_row {
                        ActiveRow::Index(i) => i.min(last),
                        _ => 0,
                    };
                    state.active_row = ActiveRow::Index(index);
                    let id = instance.page_rows[index].id.clone();
                    instance.decorate_rows(|row| row.is_active = row.id == id);
                }
            }
        }
        instance.active_row = state.active_row.clone();
    }
}
