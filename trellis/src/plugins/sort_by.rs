//! Sorting stage: orders every level of the filtered forest.

use std::cmp::Ordering;

use crate::action::Action;
use crate::instance::Instance;
use crate::model::{compare, Row, Value};
use crate::state::{SortRule, TableState};

use super::{DecorateContext, ReduceContext, TablePlugin};

/// Owns the sort rules and reorders the surviving forest, every level
/// independently, rebuilding the flat sequence afterwards.
pub struct SortByPlugin;

impl TablePlugin for SortByPlugin {
    fn name(&self) -> &'static str {
        "sort_by"
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
                state.sort_by = cx.config.initial_state.sort_by.clone();
            }
            Action::SetSortBy { rules } => {
                state.sort_by = rules.clone();
            }
            Action::ToggleSortBy { column_id } => {
                // asc -> desc -> off, single-column sort
                state.sort_by = match state.sort_by.as_slice() {
                    [rule] if rule.id == *column_id && !rule.descending => {
                        vec![SortRule::desc(column_id.clone())]
                    }
                    [rule] if rule.id == *column_id => Vec::new(),
                    _ => vec![SortRule::asc(column_id.clone())],
                };
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
        if state.sort_by.is_empty() {
            return;
        }
        let rules: Vec<SortRule> = state
            .sort_by
            .iter()
            .filter(|rule| {
                let known = instance.all_columns.iter().any(|c| c.id == rule.id);
                if !known {
                    log::warn!("sort rule targets unknown column '{}'", rule.id);
                }
                known
            })
            .cloned()
            .collect();
        if rules.is_empty() {
            return;
        }
        sort_forest(&mut instance.rows, &rules);
        instance.rebuild_row_stores();
    }
}

fn sort_forest(rows: &mut [Row], rules: &[SortRule]) {
    rows.sort_by(|a, b| compare_rows(a, b, rules));
    for row in rows.iter_mut() {
        sort_forest(&mut row.sub_rows, rules);
    }
}

fn compare_rows(a: &Row, b: &Row, rules: &[SortRule]) -> Ordering {
    for rule in rules {
        let va = a.values.get(&rule.id).unwrap_or(&Value::Null);
        let vb = b.values.get(&rule.id).unwrap_or(&Value::Null);
        let ord = compare(va, vb);
        let ord = if rule.descending { ord.reverse() } else { ord };
        if ord != Ordering::Equal {
            return ord;
        }
    }
    Ordering::Equal
}
