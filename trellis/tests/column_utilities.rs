use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use trellis::prelude::*;

fn columns() -> Vec<Column> {
    vec![Column::new("a"), Column::new("b"), Column::new("c")]
}

fn data() -> Vec<RowData> {
    vec![RowData::new("r1").field("a", 1).field("b", 2).field("c", 3)]
}

fn visible_ids(table: &Table) -> Vec<String> {
    table
        .instance()
        .visible_columns
        .iter()
        .map(|c| c.id.clone())
        .collect()
}

fn counting_config() -> (TableConfig, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&calls);
    let config = TableConfig::new("test").on_change_column(move |_state, _action| {
        seen.fetch_add(1, Ordering::SeqCst);
    });
    (config, calls)
}

#[test]
fn test_column_order_round_trip() {
    let mut table = Table::new(TableConfig::new("test"), columns(), data()).unwrap();

    table.set_column_order(vec!["c".to_string(), "a".to_string(), "b".to_string()]);
    assert_eq!(visible_ids(&table), vec!["c", "a", "b"]);

    table.reset_column_order();
    assert_eq!(visible_ids(&table), vec!["a", "b", "c"]);
}

#[test]
fn test_partial_order_appends_the_rest() {
    let mut table = Table::new(TableConfig::new("test"), columns(), data()).unwrap();

    table.set_column_order(vec!["b".to_string()]);

    assert_eq!(visible_ids(&table), vec!["b", "a", "c"]);
}

#[test]
fn test_hidden_columns_round_trip() {
    let mut table = Table::new(TableConfig::new("test"), columns(), data()).unwrap();

    table.set_hidden_columns(vec!["b".to_string()]);
    assert_eq!(visible_ids(&table), vec!["a", "c"]);
    // Hiding is a view concern; the column itself stays configured.
    assert_eq!(table.instance().all_columns.len(), 3);

    table.reset_hidden_columns();
    assert_eq!(visible_ids(&table), vec!["a", "b", "c"]);
}

#[test]
fn test_structurally_hidden_column_never_shows() {
    let columns = vec![Column::new("id_").hidden(), Column::new("a")];
    let table = Table::new(TableConfig::new("test"), columns, data()).unwrap();

    assert_eq!(visible_ids(&table), vec!["a"]);
    assert_eq!(table.instance().all_columns.len(), 2);
}

#[test]
fn test_selection_column_and_expand_designation() {
    let config = TableConfig::new("test").multiselect(true);
    let table = Table::new(config, columns(), data()).unwrap();

    let instance = table.instance();
    assert_eq!(visible_ids(&table), vec!["select_", "a", "b", "c"]);
    assert_eq!(instance.expand_column_id.as_deref(), Some("a"));

    let flags: Vec<bool> = instance
        .visible_columns
        .iter()
        .map(|c| c.disable_expand)
        .collect();
    assert_eq!(flags, vec![true, false, true, true]);
}

#[test]
fn test_expand_column_follows_visibility() {
    let mut table = Table::new(TableConfig::new("test"), columns(), data()).unwrap();

    assert_eq!(table.instance().expand_column_id.as_deref(), Some("a"));

    table.set_hidden_columns(vec!["a".to_string()]);
    assert_eq!(table.instance().expand_column_id.as_deref(), Some("b"));
}

#[test]
fn test_resize_gesture_notifies_once() {
    let (config, calls) = counting_config();
    let mut table = Table::new(config, columns(), data()).unwrap();

    table.start_resizing("a");
    assert!(table.state().is_resizing);
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    table.resize_column(ResizeRequest {
        column_id: "a".to_string(),
        new_width: 90,
    });
    table.resize_column(ResizeRequest {
        column_id: "a".to_string(),
        new_width: 80,
    });
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    table.done_resizing();
    assert!(!table.state().is_resizing);
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    let width = table
        .instance()
        .visible_columns
        .iter()
        .find(|c| c.id == "a")
        .map(|c| c.width);
    assert_eq!(width, Some(80));
}

#[test]
fn test_drag_gesture_suppresses_order_notifications() {
    let (config, calls) = counting_config();
    let mut table = Table::new(config, columns(), data()).unwrap();

    table.start_dragging("a");
    assert!(table.state().is_dragging);

    table.set_column_order(vec!["b".to_string(), "a".to_string(), "c".to_string()]);
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    table.end_dragging();
    assert!(!table.state().is_dragging);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(visible_ids(&table), vec!["b", "a", "c"]);
}

#[test]
fn test_order_change_outside_a_drag_notifies() {
    let (config, calls) = counting_config();
    let mut table = Table::new(config, columns(), data()).unwrap();

    table.set_column_order(vec!["c".to_string(), "b".to_string(), "a".to_string()]);
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    table.set_hidden_columns(vec!["a".to_string()]);
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn test_reorder_request_moves_the_column() {
    let mut table = Table::new(TableConfig::new("test"), columns(), data()).unwrap();

    table.reorder_column(ReorderRequest {
        dragged_column_id: "a".to_string(),
        source_index: 0,
        destination_index: 2,
    });

    assert_eq!(visible_ids(&table), vec!["b", "c", "a"]);
}

#[test]
fn test_stale_reorder_request_is_dropped() {
    let mut table = Table::new(TableConfig::new("test"), columns(), data()).unwrap();

    table.reorder_column(ReorderRequest {
        dragged_column_id: "b".to_string(),
        source_index: 0,
        destination_index: 2,
    });

    assert_eq!(visible_ids(&table), vec!["a", "b", "c"]);
}

#[test]
fn test_resize_of_unknown_column_is_dropped() {
    let mut table = Table::new(TableConfig::new("test"), columns(), data()).unwrap();

    table.resize_column(ResizeRequest {
        column_id: "ghost".to_string(),
        new_width: 10,
    });

    assert!(table.state().column_widths.is_empty());
}

#[test]
fn test_initial_column_order_from_state() {
    let initial = TableState {
        column_order: vec!["c".to_string(), "b".to_string(), "a".to_string()],
        ..TableState::default()
    };
    let config = TableConfig::new("test").initial_state(initial);
    let mut table = Table::new(config, columns(), data()).unwrap();

    assert_eq!(visible_ids(&table), vec!["c", "b", "a"]);

    table.set_column_order(vec!["a".to_string(), "b".to_string(), "c".to_string()]);
    table.reset_column_order();
    assert_eq!(visible_ids(&table), vec!["c", "b", "a"]);
}
