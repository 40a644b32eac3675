//! Filtering stage: substitutes the row set with the filtered forest.

use crate::action::Action;
use crate::filters::{filter_forest, FilterContext};
use crate::instance::Instance;
use crate::model::RowId;
use crate::state::{Filter, TableState};

use super::{DecorateContext, ReduceContext, TablePlugin};

/// Owns the filter set and replaces `rows`, `flat_rows` and
/// `rows_by_id` with the filtered view, keeping the pre-filtered
/// forest around for faceting.
pub struct HierarchyFiltersPlugin;

impl TablePlugin for HierarchyFiltersPlugin {
    fn name(&self) -> &'static str {
        "hierarchy_filters"
    }

    fn reduce(
        &self,
        mut state: TableState,
        action: &Action,
        _previous: &TableState,
        cx: &ReduceContext<'_>,
    ) -> TableState {
        match action {
            Action::Init | Action::ResetFilters => {
                state.filters = cx.config.initial_state.filters.clone();
            }
            Action::SetFilter { column_id, value } => {
                if value.is_empty() {
                    state.filters.retain(|f| f.id != *column_id);
                } else if let Some(existing) =
                    state.filters.iter_mut().find(|f| f.id == *column_id)
                {
                    existing.value = value.clone();
                } else {
                    state.filters.push(Filter::new(column_id.clone(), value.clone()));
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
        instance.pre_filtered_rows = instance.rows.clone();

        let rows = std::mem::take(&mut instance.rows);
        let filtered = {
            let filter_cx = FilterContext {
                filters: &state.filters,
                columns: &instance.all_columns,
                types: cx.filter_types,
                can_filter_row: &cx.config.can_filter_row,
            };
            filter_forest(rows, &filter_cx)
        };
        instance.rows = filtered;
        instance.rebuild_row_stores();

        // Columns without an active filter get the final filtered rows
        // as their candidate-options source.
        let flat_ids: Vec<RowId> = instance.flat_rows.iter().map(|r| r.id.clone()).collect();
        instance.candidate_rows = instance
            .all_columns
            .iter()
            .filter(|column| state.filter_for(&column.id).is_none())
            .map(|column| (column.id.clone(), flat_ids.clone()))
            .collect();
    }
}
