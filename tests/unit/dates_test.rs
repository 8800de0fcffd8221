//! Tests for date-range helpers and calendar bounds arithmetic

use chrono::NaiveDate;
use rowset::rowset::dates::{
    add_months, days_in_month, end_of_day, month_bounds, quarter_bounds, start_of_day,
    year_bounds, DateRange,
};
use rowset::rowset::error::TableError;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn range(start: (i32, u32, u32), end: (i32, u32, u32)) -> DateRange {
    DateRange::new(date(start.0, start.1, start.2), date(end.0, end.1, end.2)).unwrap()
}

#[test]
fn test_new_rejects_inverted_range() {
    let err = DateRange::new(date(2024, 2, 1), date(2024, 1, 1)).unwrap_err();
    assert!(matches!(err, TableError::OperationError { .. }));
}

#[test]
fn test_contains_is_inclusive() {
    let r = range((2024, 1, 10), (2024, 1, 20));
    assert!(r.contains(date(2024, 1, 10)));
    assert!(r.contains(date(2024, 1, 20)));
    assert!(!r.contains(date(2024, 1, 9)));
    assert!(!r.contains(date(2024, 1, 21)));
}

#[test]
fn test_overlaps_and_intersect() {
    let jan = range((2024, 1, 1), (2024, 1, 31));
    let mid = range((2024, 1, 20), (2024, 2, 10));
    let mar = range((2024, 3, 1), (2024, 3, 31));

    assert!(jan.overlaps(&mid));
    assert!(!jan.overlaps(&mar));

    let shared = jan.intersect(&mid).unwrap();
    assert_eq!(shared.start(), date(2024, 1, 20));
    assert_eq!(shared.end(), date(2024, 1, 31));
    assert!(jan.intersect(&mar).is_none());

    // Touching at a single day still overlaps
    let touch = range((2024, 1, 31), (2024, 2, 5));
    assert_eq!(jan.intersect(&touch).unwrap().days(), 1);
}

#[test]
fn test_union_span_covers_gaps() {
    let jan = range((2024, 1, 1), (2024, 1, 31));
    let mar = range((2024, 3, 1), (2024, 3, 31));
    let span = jan.union_span(&mar);
    assert_eq!(span.start(), date(2024, 1, 1));
    assert_eq!(span.end(), date(2024, 3, 31));
}

#[test]
fn test_days_and_months_counts() {
    let q1 = range((2024, 1, 1), (2024, 3, 31));
    assert_eq!(q1.days(), 91); // leap year
    assert_eq!(q1.months(), 3);

    assert_eq!(DateRange::single(date(2024, 5, 5)).days(), 1);
    // A range crossing a year boundary counts months across the gap
    let winter = range((2023, 12, 15), (2024, 1, 15));
    assert_eq!(winter.months(), 2);
}

#[test]
fn test_split_by_month_partitions_exactly() {
    let r = range((2024, 1, 15), (2024, 3, 10));
    let pieces = r.split_by_month();
    assert_eq!(pieces.len(), 3);
    assert_eq!(pieces[0].start(), date(2024, 1, 15));
    assert_eq!(pieces[0].end(), date(2024, 1, 31));
    assert_eq!(pieces[1].start(), date(2024, 2, 1));
    assert_eq!(pieces[1].end(), date(2024, 2, 29));
    assert_eq!(pieces[2].start(), date(2024, 3, 1));
    assert_eq!(pieces[2].end(), date(2024, 3, 10));

    let total: i64 = pieces.iter().map(|p| p.days()).sum();
    assert_eq!(total, r.days());
}

#[test]
fn test_iter_days() {
    let r = range((2024, 2, 27), (2024, 3, 1));
    let days: Vec<NaiveDate> = r.iter_days().collect();
    assert_eq!(
        days,
        vec![
            date(2024, 2, 27),
            date(2024, 2, 28),
            date(2024, 2, 29),
            date(2024, 3, 1),
        ]
    );
}

#[test]
fn test_month_bounds() {
    let feb = month_bounds(2024, 2).unwrap();
    assert_eq!(feb.start(), date(2024, 2, 1));
    assert_eq!(feb.end(), date(2024, 2, 29));

    let feb = month_bounds(2023, 2).unwrap();
    assert_eq!(feb.end(), date(2023, 2, 28));

    let dec = month_bounds(2024, 12).unwrap();
    assert_eq!(dec.end(), date(2024, 12, 31));

    assert!(month_bounds(2024, 13).is_err());
}

#[test]
fn test_quarter_and_year_bounds() {
    let q4 = quarter_bounds(2024, 4).unwrap();
    assert_eq!(q4.start(), date(2024, 10, 1));
    assert_eq!(q4.end(), date(2024, 12, 31));
    assert!(quarter_bounds(2024, 5).is_err());

    let year = year_bounds(2024).unwrap();
    assert_eq!(year.start(), date(2024, 1, 1));
    assert_eq!(year.end(), date(2024, 12, 31));
    assert_eq!(year.days(), 366);
}

#[test]
fn test_days_in_month() {
    assert_eq!(days_in_month(2024, 2).unwrap(), 29);
    assert_eq!(days_in_month(2023, 2).unwrap(), 28);
    assert_eq!(days_in_month(2024, 4).unwrap(), 30);
}

#[test]
fn test_add_months_clamps_to_month_end() {
    assert_eq!(add_months(date(2024, 1, 31), 1), date(2024, 2, 29));
    assert_eq!(add_months(date(2023, 1, 31), 1), date(2023, 2, 28));
    assert_eq!(add_months(date(2024, 3, 31), -1), date(2024, 2, 29));
    assert_eq!(add_months(date(2024, 5, 15), 12), date(2025, 5, 15));
    assert_eq!(add_months(date(2024, 1, 15), -13), date(2022, 12, 15));
}

#[test]
fn test_day_bounds_as_timestamps() {
    let d = date(2024, 3, 15);
    assert_eq!(start_of_day(d), d.and_hms_opt(0, 0, 0).unwrap());
    assert_eq!(end_of_day(d), d.and_hms_milli_opt(23, 59, 59, 999).unwrap());
}

#[test]
fn test_contains_timestamp_uses_day_bounds() {
    let r = range((2024, 1, 10), (2024, 1, 11));
    assert!(r.contains_timestamp(date(2024, 1, 10).and_hms_opt(0, 0, 0).unwrap()));
    assert!(r.contains_timestamp(date(2024, 1, 11).and_hms_milli_opt(23, 59, 59, 999).unwrap()));
    assert!(!r.contains_timestamp(date(2024, 1, 12).and_hms_opt(0, 0, 0).unwrap()));
}
