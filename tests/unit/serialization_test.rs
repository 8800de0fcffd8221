//! Tests for cell value JSON serialization

use rowset::rowset::types::CellValue;
use rust_decimal::Decimal;
use std::str::FromStr;

#[test]
fn test_scalar_serialization() {
    assert_eq!(serde_json::to_string(&CellValue::Integer(42)).unwrap(), "42");
    assert_eq!(serde_json::to_string(&CellValue::Float(3.5)).unwrap(), "3.5");
    assert_eq!(serde_json::to_string(&CellValue::Null).unwrap(), "null");
    assert_eq!(
        serde_json::to_string(&CellValue::Boolean(true)).unwrap(),
        "true"
    );
    assert_eq!(
        serde_json::to_string(&CellValue::String("hi".to_string())).unwrap(),
        "\"hi\""
    );
}

#[test]
fn test_temporal_serialization_formats() {
    let date = CellValue::String("2024-03-15".to_string())
        .cast_to(rowset::rowset::types::CellType::Date)
        .unwrap();
    assert_eq!(serde_json::to_string(&date).unwrap(), "\"2024-03-15\"");

    let ts = CellValue::String("2024-03-15 10:30:00".to_string())
        .cast_to(rowset::rowset::types::CellType::Timestamp)
        .unwrap();
    assert_eq!(
        serde_json::to_string(&ts).unwrap(),
        "\"2024-03-15 10:30:00.000\""
    );
}

#[test]
fn test_scaled_integer_serializes_with_trailing_zeros() {
    // Trailing zeros are preserved so precision survives
    assert_eq!(
        serde_json::to_string(&CellValue::ScaledInteger(12340, 2)).unwrap(),
        "\"123.40\""
    );
    assert_eq!(
        serde_json::to_string(&CellValue::ScaledInteger(7, 0)).unwrap(),
        "\"7\""
    );
}

#[test]
fn test_decimal_serializes_as_string() {
    let dec = CellValue::Decimal(Decimal::from_str("19.99").unwrap());
    assert_eq!(serde_json::to_string(&dec).unwrap(), "\"19.99\"");
}

#[test]
fn test_array_serialization() {
    let arr = CellValue::Array(vec![
        CellValue::Integer(1),
        CellValue::Null,
        CellValue::String("x".to_string()),
    ]);
    assert_eq!(serde_json::to_string(&arr).unwrap(), "[1,null,\"x\"]");
}

#[test]
fn test_deserialization_of_scalars() {
    assert_eq!(
        serde_json::from_str::<CellValue>("42").unwrap(),
        CellValue::Integer(42)
    );
    assert_eq!(
        serde_json::from_str::<CellValue>("3.5").unwrap(),
        CellValue::Float(3.5)
    );
    assert_eq!(
        serde_json::from_str::<CellValue>("null").unwrap(),
        CellValue::Null
    );
    assert_eq!(
        serde_json::from_str::<CellValue>("false").unwrap(),
        CellValue::Boolean(false)
    );
}

#[test]
fn test_decimal_strings_deserialize_as_scaled_integer() {
    // Decimal-shaped strings come back as ScaledInteger, not String,
    // so "123.45" round-trips without losing precision
    assert_eq!(
        serde_json::from_str::<CellValue>("\"123.45\"").unwrap(),
        CellValue::ScaledInteger(12345, 2)
    );
    let round_trip: CellValue =
        serde_json::from_str(&serde_json::to_string(&CellValue::ScaledInteger(12345, 2)).unwrap())
            .unwrap();
    assert_eq!(round_trip, CellValue::ScaledInteger(12345, 2));
}

#[test]
fn test_plain_strings_stay_strings() {
    assert_eq!(
        serde_json::from_str::<CellValue>("\"widget\"").unwrap(),
        CellValue::String("widget".to_string())
    );
    // Integer-shaped strings have no decimal point, so they stay strings
    assert_eq!(
        serde_json::from_str::<CellValue>("\"123\"").unwrap(),
        CellValue::String("123".to_string())
    );
}

#[test]
fn test_array_deserialization() {
    assert_eq!(
        serde_json::from_str::<CellValue>("[1,null,2.5]").unwrap(),
        CellValue::Array(vec![
            CellValue::Integer(1),
            CellValue::Null,
            CellValue::Float(2.5),
        ])
    );
}
