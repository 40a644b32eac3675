//! Expansion and paging stage: the display sequence and its pages.

use std::collections::HashSet;

use crate::action::Action;
use crate::instance::Instance;
use crate::model::{Row, RowId};
use crate::state::TableState;

use super::{DecorateContext, ReduceContext, TablePlugin};

/// Owns the expanded-row set and the page slice. Filtering and
/// selection see every surviving row; expansion only shapes what is
/// displayed and paged.
pub struct ExpansionPlugin;

impl TablePlugin for ExpansionPlugin {
    fn name(&self) -> &'static str {
        "expansion"
    }

    fn reduce(
        &self,
        mut state: TableState,
        action: &Action,
        _previous: &TableState,
        cx: &ReduceContext<'_>,
    ) -> TableState {
        match action {
            Action::Init => {
                state.expanded_row_ids = cx.config.initial_state.expanded_row_ids.clone();
                state.page_index = cx.config.initial_state.page_index;
                state.page_size = cx.config.initial_state.page_size;
            }
            Action::ResetExpanded => {
                state.expanded_row_ids = cx.config.initial_state.expanded_row_ids.clone();
            }
            Action::ToggleRowExpanded { id, value } => {
                let expand = value.unwrap_or(!state.expanded_row_ids.contains(id));
                if expand {
                    state.expanded_row_ids.insert(id.clone());
                } else {
                    state.expanded_row_ids.remove(id);
                }
            }
            Action::GotoPage { page_index } => {
                state.page_index = *page_index;
            }
            Action::SetPageSize { page_size } => {
                state.page_size = *page_size;
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
        let expanded = state.expanded_row_ids.clone();
        instance.decorate_rows(|row| row.is_expanded = expanded.contains(&row.id));

        let mut display = Vec::new();
        collect_display(&instance.rows, &expanded, &mut display);
        instance.display_rows = display;

        let total = instance.display_rows.len();
        let (page_count, start, end) = match state.page_size {
            None => {
                state.page_index = 0;
                (usize::from(total != 0), 0, total)
            }
            Some(size) => {
                let size = size.max(1);
                let page_count = total.div_ceil(size);
                if page_count == 0 {
                    state.page_index = 0;
                } else if state.page_index >= page_count {
                    state.page_index = page_count - 1;
                }
                let start = (state.page_index * size).min(total);
                let end = (start + size).min(total);
                (page_count, start, end)
            }
        };
        instance.page_count = page_count;
        instance.page_rows = instance.display_rows[start..end]
            .iter()
            .filter_map(|id| instance.rows_by_id.get(id).cloned())
            .collect();
        instance.can_previous_page = state.page_index > 0;
        instance.can_next_page = page_count > 0 && state.page_index + 1 < page_count;
    }
}

/// Pre-order walk descending only into expanded rows.
fn collect_display(rows: &[Row], expanded: &HashSet<RowId>, out: &mut Vec<RowId>) {
    for row in rows {
        out.push(row.id.clone());
        if row.has_children() && expanded.contains(&row.id) {
            collect_display(&row.sub_rows, expanded, out);
        }
    }
}
