use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use trellis::prelude::*;

fn rows(ids: &[&str]) -> Vec<RowData> {
    ids.iter()
        .map(|id| RowData::new(*id).field("name", *id))
        .collect()
}

fn columns() -> Vec<Column> {
    vec![Column::new("name")]
}

// -----------------------------------------------------------------------------
// Id keying
// -----------------------------------------------------------------------------

#[test]
fn test_activate_row_by_id() {
    let mut table =
        Table::new(TableConfig::new("test"), columns(), rows(&["r1", "r2"])).unwrap();

    table.activate_row(ActiveRowTarget::Id("r2".to_string()));

    assert_eq!(table.state().active_row, ActiveRow::Id("r2".to_string()));
    assert!(table.instance().rows_by_id["r2"].is_active);
    assert!(!table.instance().rows_by_id["r1"].is_active);
}

#[test]
fn test_activation_veto_keeps_previous_row() {
    let config = TableConfig::new("test").on_change_row(|_new, _old| false);
    let mut table = Table::new(config, columns(), rows(&["r1", "r2"])).unwrap();

    table.activate_row(ActiveRowTarget::Id("r2".to_string()));

    assert_eq!(table.state().active_row, ActiveRow::None);
    assert!(!table.instance().rows_by_id["r2"].is_active);
}

#[test]
fn test_activating_the_same_row_skips_the_callback() {
    let calls = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&calls);
    let config = TableConfig::new("test").on_change_row(move |_new, _old| {
        seen.fetch_add(1, Ordering::SeqCst);
        true
    });
    let mut table = Table::new(config, columns(), rows(&["r1"])).unwrap();

    table.activate_row(ActiveRowTarget::Id("r1".to_string()));
    table.activate_row(ActiveRowTarget::Id("r1".to_string()));

    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_active_id_survives_filtering() {
    let mut table =
        Table::new(TableConfig::new("test"), columns(), rows(&["r1", "r2"])).unwrap();

    table.activate_row(ActiveRowTarget::Id("r2".to_string()));
    table.set_filter("name", vec!["r2".to_string()]);

    assert_eq!(table.state().active_row, ActiveRow::Id("r2".to_string()));
    assert!(table.instance().rows_by_id["r2"].is_active);
}

#[test]
fn test_reset_restores_initial_active_row() {
    let mut table =
        Table::new(TableConfig::new("test"), columns(), rows(&["r1", "r2"])).unwrap();

    table.activate_row(ActiveRowTarget::Id("r1".to_string()));
    table.reset_active_row();

    assert_eq!(table.state().active_row, ActiveRow::None);
}

#[test]
fn test_active_row_resets_when_data_changes() {
    let mut table =
        Table::new(TableConfig::new("test"), columns(), rows(&["r1", "r2"])).unwrap();

    table.activate_row(ActiveRowTarget::Id("r1".to_string()));
    table.set_data(rows(&["r1", "r2", "r3"]));

    assert_eq!(table.state().active_row, ActiveRow::None);
}

#[test]
fn test_mismatched_target_is_ignored() {
    let mut table =
        Table::new(TableConfig::new("test"), columns(), rows(&["r1", "r2"])).unwrap();

    table.activate_row(ActiveRowTarget::Index(1));

    assert_eq!(table.state().active_row, ActiveRow::None);
}

// -----------------------------------------------------------------------------
// Index keying
// -----------------------------------------------------------------------------

fn index_config() -> TableConfig {
    TableConfig::new("test").active_row_mode(ActiveRowMode::Index)
}

#[test]
fn test_non_empty_page_defaults_to_first_row() {
    let table = Table::new(index_config(), columns(), rows(&["r1", "r2"])).unwrap();

    assert_eq!(table.instance().active_row, ActiveRow::Index(0));
    assert!(table.instance().page_rows[0].is_active);
}

#[test]
fn test_empty_page_has_no_active_row() {
    let table = Table::new(index_config(), columns(), Vec::new()).unwrap();
    assert_eq!(table.instance().active_row, ActiveRow::None);
}

#[test]
fn test_activate_row_by_index() {
    let mut table = Table::new(index_config(), columns(), rows(&["r1", "r2", "r3"])).unwrap();

    table.activate_row(ActiveRowTarget::Index(2));

    assert_eq!(table.state().active_row, ActiveRow::Index(2));
    assert!(table.instance().page_rows[2].is_active);
}

#[test]
fn test_index_clamps_when_the_page_shrinks() {
    let mut table = Table::new(index_config(), columns(), rows(&["r1", "r2", "r3"])).unwrap();

    table.activate_row(ActiveRowTarget::Index(2));
    table.set_filter("name", vec!["r1".to_string()]);

    assert_eq!(table.state().active_row, ActiveRow::Index(0));
}

#[test]
fn test_navigation_veto_restores_page_index() {
    let initial = TableState {
        page_size: Some(2),
        ..TableState::default()
    };
    let config = index_config()
        .initial_state(initial)
        .can_change_row(|_row| false);
    let mut table = Table::new(config, columns(), rows(&["r1", "r2", "r3", "r4"])).unwrap();

    table.goto_page(1);

    assert_eq!(table.state().page_index, 0);
    assert_eq!(table.instance().page_rows[0].id, "r1");
}

#[test]
fn test_navigation_veto_restores_filters() {
    let config = index_config().can_change_row(|_row| false);
    let mut table = Table::new(config, columns(), rows(&["r1", "r2"])).unwrap();

    table.set_filter("name", vec!["r1".to_string()]);

    assert!(table.state().filters.is_empty());
    assert_eq!(table.instance().flat_rows.len(), 2);
}

#[test]
fn test_navigation_veto_restores_sort_rules() {
    let config = index_config().can_change_row(|_row| false);
    let mut table = Table::new(config, columns(), rows(&["r2", "r1"])).unwrap();

    table.set_sort_by(vec![SortRule::asc("name")]);

    assert!(table.state().sort_by.is_empty());
    assert_eq!(table.instance().flat_rows[0].id, "r2");
}

#[test]
fn test_navigation_allowed_when_host_agrees() {
    let initial = TableState {
        page_size: Some(2),
        ..TableState::default()
    };
    let config = index_config().initial_state(initial);
    let mut table = Table::new(config, columns(), rows(&["r1", "r2", "r3"])).unwrap();

    table.goto_page(1);

    assert_eq!(table.state().page_index, 1);
    assert_eq!(table.instance().page_rows[0].id, "r3");
}
