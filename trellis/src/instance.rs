//! The per-cycle derived instance consumed by the rendering layer.

use std::collections::HashMap;

use crate::config::TableConfig;
use crate::model::{materialize, CellType, Column, Row, RowData, RowId};
use crate::state::{ActiveRow, TableState};

/// Read-only snapshot of everything the rendering layer needs, rebuilt
/// from configuration, data and state on every dispatch.
///
/// The base build derives the column sets and materializes the source
/// rows; the plugin pipeline then decorates it in a fixed order, each
/// stage only adding or overwriting fields. Rows appear in several
/// stores (forest, flat sequence, id map, page); decoration applies to
/// every copy so their per-cycle flags agree.
#[derive(Debug, Default)]
pub struct Instance {
    /// All configured columns, ordered per the column-order state.
    pub all_columns: Vec<Column>,
    /// Visible columns: ordered, minus hidden and structurally hidden
    /// ones, with the synthetic selection column prepended when
    /// multi-select is enabled. Widths reflect resize overrides.
    pub visible_columns: Vec<Column>,
    /// The one visible column that draws expand/indent controls.
    pub expand_column_id: Option<String>,
    /// The materialized forest before filtering.
    pub pre_filtered_rows: Vec<Row>,
    /// The filtered forest.
    pub rows: Vec<Row>,
    /// Pre-order sequence of surviving rows.
    pub flat_rows: Vec<Row>,
    /// Surviving rows by id.
    pub rows_by_id: HashMap<RowId, Row>,
    /// For every column without an active filter: the fully-filtered
    /// flat row ids, as a source for building select-type filter
    /// options.
    pub candidate_rows: HashMap<String, Vec<RowId>>,
    /// Ids of selected surviving rows, in flat order.
    pub selected_flat_rows: Vec<RowId>,
    /// Every selectable surviving row is selected (and there is at
    /// least one row).
    pub is_all_rows_selected: bool,
    /// Not all selected, but the selection set is non-empty.
    pub is_some_rows_selected: bool,
    /// The active row as resolved this cycle.
    pub active_row: ActiveRow,
    /// Display sequence: pre-order ids descending only into expanded
    /// rows.
    pub display_rows: Vec<RowId>,
    /// The current page of display rows.
    pub page_rows: Vec<Row>,
    /// Total number of pages.
    pub page_count: usize,
    /// A next page exists.
    pub can_next_page: bool,
    /// A previous page exists.
    pub can_previous_page: bool,
}

impl Instance {
    /// Base build: column derivation and row materialization. The
    /// plugin pipeline does the rest.
    pub(crate) fn build(
        config: &TableConfig,
        columns: &[Column],
        data: &[RowData],
        state: &TableState,
    ) -> Self {
        let mut all_columns: Vec<Column> = Vec::with_capacity(columns.len());
        for id in &state.column_order {
            if all_columns.iter().any(|c| &c.id == id) {
                continue;
            }
            if let Some(column) = columns.iter().find(|c| &c.id == id) {
                all_columns.push(column.clone());
            }
        }
        for column in columns {
            if !all_columns.iter().any(|c| c.id == column.id) {
                all_columns.push(column.clone());
            }
        }

        let mut visible_columns: Vec<Column> = all_columns
            .iter()
            .filter(|c| c.cell_type != CellType::Hidden && !state.hidden_columns.contains(&c.id))
            .cloned()
            .collect();
        if config.multiselect {
            visible_columns.insert(0, Column::select_column());
        }

        let mut instance = Self {
            all_columns,
            visible_columns,
            rows: materialize(data, columns, 0),
            ..Default::default()
        };
        instance.rebuild_row_stores();
        instance
    }

    /// Look up a surviving row by id.
    pub fn row_by_id(&self, id: &str) -> Option<&Row> {
        self.rows_by_id.get(id)
    }

    /// Look up a row on the current page.
    pub fn page_row(&self, index: usize) -> Option<&Row> {
        self.page_rows.get(index)
    }

    /// Candidate row ids for building filter options for a column.
    /// Empty for columns that currently carry a filter.
    pub fn filter_candidates(&self, column_id: &str) -> &[RowId] {
        self.candidate_rows
            .get(column_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Rebuild `row_index`, `flat_rows` and `rows_by_id` from the
    /// current forest. Called after a stage reorders or replaces it.
    pub(crate) fn rebuild_row_stores(&mut self) {
        fn index_walk(rows: &mut [Row], next: &mut usize) {
            for row in rows {
                row.row_index = *next;
                *next += 1;
                index_walk(&mut row.sub_rows, next);
            }
        }
        fn flat_walk(rows: &[Row], flat: &mut Vec<Row>, by_id: &mut HashMap<RowId, Row>) {
            for row in rows {
                flat.push(row.clone());
                by_id.insert(row.id.clone(), row.clone());
                flat_walk(&row.sub_rows, flat, by_id);
            }
        }

        let mut next = 0;
        index_walk(&mut self.rows, &mut next);
        self.flat_rows.clear();
        self.rows_by_id.clear();
        let mut flat = std::mem::take(&mut self.flat_rows);
        let mut by_id = std::mem::take(&mut self.rows_by_id);
        flat_walk(&self.rows, &mut flat, &mut by_id);
        self.flat_rows = flat;
        self.rows_by_id = by_id;
    }

    /// Apply a decoration to every row copy this instance holds.
    pub(crate) fn decorate_rows<F: Fn(&mut Row)>(&mut self, f: F) {
        fn walk<F: Fn(&mut Row)>(rows: &mut [Row], f: &F) {
            for row in rows {
                f(row);
                walk(&mut row.sub_rows, f);
            }
        }
        walk(&mut self.rows, &f);
        walk(&mut self.flat_rows, &f);
        walk(&mut self.page_rows, &f);
        for row in self.rows_by_id.values_mut() {
            f(row);
            walk(&mut row.sub_rows, &f);
        }
    }
}
