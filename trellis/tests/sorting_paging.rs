use trellis::prelude::*;

fn columns() -> Vec<Column> {
    vec![Column::new("name"), Column::new("age")]
}

fn flat_ids(table: &Table) -> Vec<String> {
    table
        .instance()
        .flat_rows
        .iter()
        .map(|r| r.id.clone())
        .collect()
}

fn page_ids(table: &Table) -> Vec<String> {
    table
        .instance()
        .page_rows
        .iter()
        .map(|r| r.id.clone())
        .collect()
}

#[test]
fn test_sort_orders_every_level() {
    let data = vec![
        RowData::new("r2")
            .field("name", "beta")
            .child(RowData::new("c2").field("name", "delta"))
            .child(RowData::new("c1").field("name", "charlie")),
        RowData::new("r1").field("name", "alpha"),
    ];
    let mut table = Table::new(TableConfig::new("test"), columns(), data).unwrap();

    table.set_sort_by(vec![SortRule::asc("name")]);

    assert_eq!(flat_ids(&table), vec!["r1", "r2", "c1", "c2"]);
    assert_eq!(table.instance().rows[1].sub_rows[0].id, "c1");
}

#[test]
fn test_sort_is_numeric_when_values_are_numbers() {
    let data = vec![
        RowData::new("r1").field("age", 5),
        RowData::new("r2").field("age", 40),
        RowData::new("r3").field("age", 9),
    ];
    let mut table = Table::new(TableConfig::new("test"), columns(), data).unwrap();

    table.set_sort_by(vec![SortRule::asc("age")]);
    assert_eq!(flat_ids(&table), vec!["r1", "r3", "r2"]);

    table.set_sort_by(vec![SortRule::desc("age")]);
    assert_eq!(flat_ids(&table), vec!["r2", "r3", "r1"]);
}

#[test]
fn test_toggle_sort_cycles_asc_desc_off() {
    let data = vec![RowData::new("r1").field("name", "a")];
    let mut table = Table::new(TableConfig::new("test"), columns(), data).unwrap();

    table.toggle_sort_by("name");
    assert_eq!(table.state().sort_by, vec![SortRule::asc("name")]);

    table.toggle_sort_by("name");
    assert_eq!(table.state().sort_by, vec![SortRule::desc("name")]);

    table.toggle_sort_by("name");
    assert!(table.state().sort_by.is_empty());
}

#[test]
fn test_toggle_sort_switches_columns() {
    let data = vec![RowData::new("r1").field("name", "a").field("age", 1)];
    let mut table = Table::new(TableConfig::new("test"), columns(), data).unwrap();

    table.toggle_sort_by("name");
    table.toggle_sort_by("age");

    assert_eq!(table.state().sort_by, vec![SortRule::asc("age")]);
}

#[test]
fn test_unknown_sort_column_is_ignored() {
    let data = vec![
        RowData::new("r2").field("name", "b"),
        RowData::new("r1").field("name", "a"),
    ];
    let mut table = Table::new(TableConfig::new("test"), columns(), data).unwrap();

    table.set_sort_by(vec![SortRule::asc("ghost")]);

    assert_eq!(flat_ids(&table), vec!["r2", "r1"]);
}

#[test]
fn test_sort_applies_to_the_filtered_forest() {
    let data = vec![
        RowData::new("drop").field("name", "zzz"),
        RowData::new("r2").field("name", "keep-b"),
        RowData::new("r1").field("name", "keep-a"),
    ];
    let mut table = Table::new(TableConfig::new("test"), columns(), data).unwrap();

    table.set_filter("name", vec!["keep".to_string()]);
    table.set_sort_by(vec![SortRule::asc("name")]);

    assert_eq!(flat_ids(&table), vec!["r1", "r2"]);
}

#[test]
fn test_pagination_slices_and_clamps() {
    let data = vec![
        RowData::new("r1").field("name", "keep"),
        RowData::new("r2").field("name", "keep"),
        RowData::new("r3").field("name", "keep"),
        RowData::new("r4").field("name", "drop"),
        RowData::new("r5").field("name", "drop"),
    ];
    let mut table = Table::new(TableConfig::new("test"), columns(), data).unwrap();

    table.set_page_size(Some(2));
    assert_eq!(table.instance().page_count, 3);
    assert_eq!(page_ids(&table), vec!["r1", "r2"]);
    assert!(table.instance().can_next_page);
    assert!(!table.instance().can_previous_page);

    table.goto_page(2);
    assert_eq!(page_ids(&table), vec!["r5"]);
    assert!(!table.instance().can_next_page);

    // Shrinking the row set clamps the page index.
    table.set_filter("name", vec!["keep".to_string()]);
    assert_eq!(table.instance().page_count, 2);
    assert_eq!(table.state().page_index, 1);
    assert_eq!(page_ids(&table), vec!["r3"]);
}

#[test]
fn test_next_and_previous_page() {
    let data = vec![
        RowData::new("r1").field("name", "a"),
        RowData::new("r2").field("name", "b"),
        RowData::new("r3").field("name", "c"),
    ];
    let initial = TableState {
        page_size: Some(2),
        ..TableState::default()
    };
    let config = TableConfig::new("test").initial_state(initial);
    let mut table = Table::new(config, columns(), data).unwrap();

    table.next_page();
    assert_eq!(table.state().page_index, 1);

    // Already on the last page.
    table.next_page();
    assert_eq!(table.state().page_index, 1);

    table.previous_page();
    assert_eq!(table.state().page_index, 0);

    table.previous_page();
    assert_eq!(table.state().page_index, 0);
}

#[test]
fn test_display_sequence_follows_expansion() {
    let data = vec![
        RowData::new("root")
            .field("name", "root")
            .child(RowData::new("a").field("name", "a"))
            .child(RowData::new("b").field("name", "b")),
    ];
    let mut table = Table::new(TableConfig::new("test"), columns(), data).unwrap();

    assert_eq!(page_ids(&table), vec!["root"]);

    table.toggle_row_expanded("root", None);
    assert_eq!(page_ids(&table), vec!["root", "a", "b"]);
    assert!(table.instance().rows_by_id["root"].is_expanded);

    table.toggle_row_expanded("root", None);
    assert_eq!(page_ids(&table), vec!["root"]);
}

#[test]
fn test_collapsed_rows_stay_in_the_selection_domain() {
    let data = vec![
        RowData::new("root")
            .field("name", "root")
            .child(RowData::new("a").field("name", "a"))
            .child(RowData::new("b").field("name", "b")),
    ];
    let mut table = Table::new(TableConfig::new("test"), columns(), data).unwrap();

    // Collapsed: only the root is displayed, but every surviving row
    // is selectable.
    assert_eq!(page_ids(&table), vec!["root"]);
    table.toggle_all_rows_selected(Some(true));

    assert_eq!(table.state().selected_row_ids.len(), 3);
    assert!(table.instance().is_all_rows_selected);
}

#[test]
fn test_filtered_out_rows_leave_the_display() {
    let data = vec![
        RowData::new("root")
            .field("name", "nope")
            .child(RowData::new("a").field("name", "match")),
        RowData::new("b").field("name", "match"),
    ];
    let mut table = Table::new(TableConfig::new("test"), columns(), data).unwrap();

    table.set_filter("name", vec!["match".to_string()]);

    // "a" was promoted to the root level and displays without needing
    // its former parent expanded.
    assert_eq!(page_ids(&table), vec!["a", "b"]);
}
