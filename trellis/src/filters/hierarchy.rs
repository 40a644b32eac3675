//! Hierarchical filtering with child promotion.

use crate::config::CanFilterRow;
use crate::model::{Column, Row};
use crate::state::Filter;

use super::types::{self, FilterTypes};

/// Everything the filter walk needs, borrowed from the current cycle.
pub struct FilterContext<'a> {
    /// Active filters, ANDed together.
    pub filters: &'a [Filter],
    /// Column registry for resolving filter methods.
    pub columns: &'a [Column],
    /// Filter-type registry.
    pub types: &'a FilterTypes,
    /// Rows for which this returns false are never hidden.
    pub can_filter_row: &'a CanFilterRow,
}

/// Filter a forest, promoting children of hidden parents into their
/// place.
///
/// A row is hidden when it is filterable and any active filter rejects
/// it. A hidden row with children is replaced by those children at the
/// same position, and the cursor stays put so the promoted rows are
/// re-evaluated against the same filter set at that level; recursion
/// handles deeper promotions layer by layer. A hidden leaf is removed
/// outright. Kept rows have their depth rewritten to the level where
/// they survived.
///
/// Total over malformed configuration: a filter targeting an unknown
/// column or an unknown filter-type key never hides anything and logs
/// a diagnostic.
pub fn filter_forest(rows: Vec<Row>, cx: &FilterContext<'_>) -> Vec<Row> {
    if cx.filters.is_empty() {
        return rows;
    }
    filter_level(rows, 0, cx)
}

fn filter_level(mut rows: Vec<Row>, depth: u16, cx: &FilterContext<'_>) -> Vec<Row> {
    let mut idx = 0;
    while idx != rows.len() {
        let hide = (cx.can_filter_row)(&rows[idx])
            && cx.filters.iter().any(|filter| rejects(filter, &rows[idx], cx));
        if hide {
            let row = rows.remove(idx);
            if !row.sub_rows.is_empty() {
                rows.splice(idx..idx, row.sub_rows);
            }
        } else {
            rows[idx].depth = depth;
            let sub_rows = std::mem::take(&mut rows[idx].sub_rows);
            rows[idx].sub_rows = filter_level(sub_rows, depth + 1, cx);
            idx += 1;
        }
    }
    rows
}

/// Check whether one filter rejects a row.
fn rejects(filter: &Filter, row: &Row, cx: &FilterContext<'_>) -> bool {
    let Some(column) = cx.columns.iter().find(|c| c.id == filter.id) else {
        log::warn!("filter targets unknown column '{}'", filter.id);
        return false;
    };
    let Some(method) = types::resolve(column, cx.types) else {
        log::warn!(
            "no filter method for column '{}' (filter type {:?})",
            column.id,
            column.filter_type
        );
        return false;
    };
    let candidates = [row];
    method(&candidates, &column.id, &filter.value).is_empty()
}
