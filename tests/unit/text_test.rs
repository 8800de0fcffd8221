//! Tests for delimited-text parsing and typed table ingestion

use chrono::NaiveDate;
use rowset::rowset::error::TableError;
use rowset::rowset::text::{
    join_delimited, parse_cell, parse_i64_list, parse_table, split_delimited, DelimitedOptions,
};
use rowset::rowset::types::{CellType, CellValue};

#[test]
fn test_split_plain_fields() {
    assert_eq!(
        split_delimited("a,b,,d", ',').unwrap(),
        vec!["a", "b", "", "d"]
    );
    assert_eq!(split_delimited("", ',').unwrap(), vec![""]);
    assert_eq!(split_delimited("a;b", ';').unwrap(), vec!["a", "b"]);
}

#[test]
fn test_split_quoted_fields() {
    assert_eq!(
        split_delimited("\"a,b\",c", ',').unwrap(),
        vec!["a,b", "c"]
    );
    assert_eq!(
        split_delimited("\"say \"\"hi\"\"\"", ',').unwrap(),
        vec!["say \"hi\""]
    );
    // A quoted empty field is distinct from a missing one
    assert_eq!(split_delimited("\"\",x", ',').unwrap(), vec!["", "x"]);
}

#[test]
fn test_split_unterminated_quote_reports_position() {
    let err = split_delimited("ab,\"cd", ',').unwrap_err();
    match err {
        TableError::ParseError { position, .. } => assert_eq!(position, Some(3)),
        other => panic!("expected ParseError, got {:?}", other),
    }
}

#[test]
fn test_join_quotes_only_when_needed() {
    let fields = vec![
        "plain".to_string(),
        "with,comma".to_string(),
        "with\"quote".to_string(),
    ];
    assert_eq!(
        join_delimited(&fields, ','),
        "plain,\"with,comma\",\"with\"\"quote\""
    );
}

#[test]
fn test_join_split_round_trip() {
    let fields = vec![
        "a".to_string(),
        "b,c".to_string(),
        "d\"e".to_string(),
        "".to_string(),
        "line\nbreak".to_string(),
    ];
    let line = join_delimited(&fields, ',');
    assert_eq!(split_delimited(&line, ',').unwrap(), fields);
}

#[test]
fn test_parse_cell_typed_literals() {
    assert_eq!(parse_cell(""), CellValue::Null);
    assert_eq!(parse_cell("  "), CellValue::Null);
    assert_eq!(parse_cell("42"), CellValue::Integer(42));
    assert_eq!(parse_cell("1,234"), CellValue::Integer(1234));
    assert_eq!(parse_cell("3.5"), CellValue::Float(3.5));
    assert_eq!(parse_cell("($45.10)"), CellValue::Float(-45.10));
    assert_eq!(parse_cell("TRUE"), CellValue::Boolean(true));
    assert_eq!(
        parse_cell("2024-03-15"),
        CellValue::Date(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap())
    );
    assert_eq!(
        parse_cell("2024-03-15 10:30:00"),
        CellValue::Timestamp(
            NaiveDate::from_ymd_opt(2024, 3, 15)
                .unwrap()
                .and_hms_opt(10, 30, 0)
                .unwrap()
        )
    );
    assert_eq!(
        parse_cell("widget"),
        CellValue::String("widget".to_string())
    );
}

#[test]
fn test_parse_i64_list() {
    assert_eq!(parse_i64_list("1, 2, 3", ',').unwrap(), vec![1, 2, 3]);
    assert_eq!(parse_i64_list("7", ',').unwrap(), vec![7]);

    let err = parse_i64_list("1,x", ',').unwrap_err();
    match err {
        TableError::ParseError { position, .. } => assert_eq!(position, Some(2)),
        other => panic!("expected ParseError, got {:?}", other),
    }
    assert!(parse_i64_list("1,,3", ',').is_err());
}

#[test]
fn test_parse_table_infers_column_types() {
    let input = "\
id,price,day,name
1,3.50,2024-01-02,widget
2,4,2024-01-03,gadget
";
    let table = parse_table("imports", input, &DelimitedOptions::default()).unwrap();

    assert_eq!(table.len(), 2);
    let schema = table.schema();
    assert_eq!(schema.column("id").unwrap().column_type, CellType::Integer);
    // Mixed 3.50 and 4 widens to Float
    assert_eq!(schema.column("price").unwrap().column_type, CellType::Float);
    assert_eq!(schema.column("day").unwrap().column_type, CellType::Date);
    assert_eq!(schema.column("name").unwrap().column_type, CellType::String);

    assert_eq!(
        table.row(1).unwrap().get("price"),
        Some(&CellValue::Float(4.0))
    );
    assert_eq!(
        table.row(0).unwrap().get("name"),
        Some(&CellValue::String("widget".to_string()))
    );
}

#[test]
fn test_parse_table_null_token_and_empty_fields() {
    let options = DelimitedOptions {
        null_token: Some("NULL".to_string()),
        ..Default::default()
    };
    let input = "\
id,qty
1,5
2,NULL
3,
";
    let table = parse_table("stock", input, &options).unwrap();
    assert_eq!(
        table.column_values("qty").unwrap(),
        vec![CellValue::Integer(5), CellValue::Null, CellValue::Null]
    );
}

#[test]
fn test_parse_table_rejects_short_rows() {
    let input = "\
a,b,c
1,2,3
4,5
";
    let err = parse_table("bad", input, &DelimitedOptions::default()).unwrap_err();
    match err {
        TableError::ParseError { message, .. } => {
            assert!(message.contains("line 3"), "message was: {}", message)
        }
        other => panic!("expected ParseError, got {:?}", other),
    }
}

#[test]
fn test_parse_table_drops_extra_fields_on_long_rows() {
    let input = "\
a,b
1,2,3
";
    let table = parse_table("wide", input, &DelimitedOptions::default()).unwrap();
    assert_eq!(table.len(), 1);
    assert_eq!(table.schema().len(), 2);
}

#[test]
fn test_parse_table_without_header_synthesizes_names() {
    let options = DelimitedOptions {
        has_header: false,
        ..Default::default()
    };
    let table = parse_table("raw", "1,x\n2,y\n", &options).unwrap();
    assert_eq!(table.schema().column_names(), vec!["column_1", "column_2"]);
    assert_eq!(
        table.column_values("column_1").unwrap(),
        vec![CellValue::Integer(1), CellValue::Integer(2)]
    );
}

#[test]
fn test_parse_table_quoted_fields_keep_delimiters() {
    let input = "name,note\nbolt,\"m3, steel\"\n";
    let table = parse_table("parts", input, &DelimitedOptions::default()).unwrap();
    assert_eq!(
        table.row(0).unwrap().get("note"),
        Some(&CellValue::String("m3, steel".to_string()))
    );
}
