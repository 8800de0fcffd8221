//! Tests for filtered and sorted table views

use rowset::rowset::error::TableError;
use rowset::rowset::table::{Column, Row, Schema, SortOrder, Table, TableView};
use rowset::rowset::types::{CellType, CellValue};

fn scores_table() -> Table {
    let schema = Schema::new(vec![
        Column::new("player", CellType::String),
        Column::nullable("score", CellType::Integer),
    ]);
    let mut table = Table::new("scores", schema);
    for (player, score) in [
        ("ada", Some(3)),
        ("ben", None),
        ("cho", Some(1)),
        ("dee", Some(2)),
    ] {
        let mut row = Row::new().with("player", CellValue::String(player.to_string()));
        if let Some(score) = score {
            row.set("score", CellValue::Integer(score));
        }
        table.insert(row).unwrap();
    }
    table
}

fn scores(view: &TableView<'_>) -> Vec<CellValue> {
    view.column_values("score").unwrap()
}

#[test]
fn test_unfiltered_view_exposes_all_rows() {
    let table = scores_table();
    let view = TableView::of(&table);
    assert_eq!(view.len(), 4);
    assert_eq!(view.indices(), &[0, 1, 2, 3]);
}

#[test]
fn test_filtered_view() {
    let table = scores_table();
    let view = TableView::of(&table).filtered(|row| !row.is_null("score"));
    assert_eq!(view.len(), 3);
    assert_eq!(
        scores(&view),
        vec![
            CellValue::Integer(3),
            CellValue::Integer(1),
            CellValue::Integer(2),
        ]
    );
}

#[test]
fn test_sort_ascending_puts_nulls_first() {
    let table = scores_table();
    let view = TableView::of(&table)
        .sorted_by("score", SortOrder::Ascending)
        .unwrap();
    assert_eq!(
        scores(&view),
        vec![
            CellValue::Null,
            CellValue::Integer(1),
            CellValue::Integer(2),
            CellValue::Integer(3),
        ]
    );
}

#[test]
fn test_sort_descending_puts_nulls_last() {
    let table = scores_table();
    let view = TableView::of(&table)
        .sorted_by("score", SortOrder::Descending)
        .unwrap();
    assert_eq!(
        scores(&view),
        vec![
            CellValue::Integer(3),
            CellValue::Integer(2),
            CellValue::Integer(1),
            CellValue::Null,
        ]
    );
}

#[test]
fn test_filter_then_sort_composes() {
    let table = scores_table();
    let view = TableView::of(&table)
        .filtered(|row| !row.is_null("score"))
        .sorted_by("score", SortOrder::Ascending)
        .unwrap();
    assert_eq!(
        scores(&view),
        vec![
            CellValue::Integer(1),
            CellValue::Integer(2),
            CellValue::Integer(3),
        ]
    );
}

#[test]
fn test_sort_by_string_column() {
    let table = scores_table();
    let view = TableView::of(&table)
        .sorted_by("player", SortOrder::Descending)
        .unwrap();
    let players: Vec<CellValue> = view.column_values("player").unwrap();
    assert_eq!(
        players,
        vec![
            CellValue::String("dee".to_string()),
            CellValue::String("cho".to_string()),
            CellValue::String("ben".to_string()),
            CellValue::String("ada".to_string()),
        ]
    );
}

#[test]
fn test_sort_on_unknown_column_is_schema_error() {
    let table = scores_table();
    let err = TableView::of(&table)
        .sorted_by("nope", SortOrder::Ascending)
        .unwrap_err();
    assert!(matches!(err, TableError::SchemaError { .. }));
}

#[test]
fn test_to_table_materializes_view_order() {
    let table = scores_table();
    let sorted = TableView::of(&table)
        .filtered(|row| !row.is_null("score"))
        .sorted_by("score", SortOrder::Descending)
        .unwrap()
        .to_table("ranked");

    assert_eq!(sorted.name(), "ranked");
    assert_eq!(sorted.len(), 3);
    assert_eq!(
        sorted.column_values("score").unwrap(),
        vec![
            CellValue::Integer(3),
            CellValue::Integer(2),
            CellValue::Integer(1),
        ]
    );
}
