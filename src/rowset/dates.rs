//! Date-range helpers.
//!
//! [`DateRange`] is an inclusive calendar range used to bucket and match
//! date/timestamp cells; the free functions cover the calendar bounds
//! arithmetic (month/quarter/year bounds, clamped month offsets, day
//! bounds as timestamps) that range construction leans on.

use crate::rowset::error::{TableError, TableResult};
use chrono::{Datelike, Days, NaiveDate, NaiveDateTime};

/// An inclusive range of calendar dates
///
/// The range is always ordered: construction rejects `start > end`.
///
/// # Examples
///
/// ```rust
/// use chrono::NaiveDate;
/// use rowset::rowset::dates::DateRange;
///
/// let q1 = DateRange::new(
///     NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
/// ).unwrap();
/// assert_eq!(q1.days(), 91);
/// assert_eq!(q1.months(), 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Create a range; `start` must not be after `end`
    pub fn new(start: NaiveDate, end: NaiveDate) -> TableResult<Self> {
        if start > end {
            return Err(TableError::operation_error(
                format!("range start {} is after end {}", start, end),
                Some("DateRange::new".to_string()),
            ));
        }
        Ok(DateRange { start, end })
    }

    /// Single-day range
    pub fn single(date: NaiveDate) -> Self {
        DateRange {
            start: date,
            end: date,
        }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Whether the date falls inside the range (inclusive on both ends)
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Whether a timestamp falls inside the range's day bounds
    pub fn contains_timestamp(&self, ts: NaiveDateTime) -> bool {
        self.start_timestamp() <= ts && ts <= self.end_timestamp()
    }

    /// Whether the two ranges share at least one day
    pub fn overlaps(&self, other: &DateRange) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// The shared days of two ranges, if any
    pub fn intersect(&self, other: &DateRange) -> Option<DateRange> {
        if !self.overlaps(other) {
            return None;
        }
        Some(DateRange {
            start: self.start.max(other.start),
            end: self.end.min(other.end),
        })
    }

    /// The smallest range covering both inputs (gaps included)
    pub fn union_span(&self, other: &DateRange) -> DateRange {
        DateRange {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// Number of days in the range, inclusive
    pub fn days(&self) -> i64 {
        self.end.signed_duration_since(self.start).num_days() + 1
    }

    /// Number of calendar months the range touches
    pub fn months(&self) -> i32 {
        let start = self.start.year() * 12 + self.start.month() as i32;
        let end = self.end.year() * 12 + self.end.month() as i32;
        end - start + 1
    }

    /// Split the range at month boundaries
    ///
    /// The first and last pieces are clamped to the range ends, so the
    /// pieces partition the range exactly.
    pub fn split_by_month(&self) -> Vec<DateRange> {
        let mut pieces = Vec::with_capacity(self.months() as usize);
        let mut cursor = self.start;
        while cursor <= self.end {
            // Unwrap is safe: cursor carries a valid year/month
            let month = month_bounds(cursor.year(), cursor.month()).unwrap();
            pieces.push(DateRange {
                start: cursor,
                end: month.end.min(self.end),
            });
            cursor = month.end + Days::new(1);
        }
        pieces
    }

    /// Iterate every date in the range
    pub fn iter_days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        std::iter::successors(Some(self.start), move |d| {
            let next = *d + Days::new(1);
            (next <= end).then_some(next)
        })
    }

    /// Midnight at the start of the first day
    pub fn start_timestamp(&self) -> NaiveDateTime {
        start_of_day(self.start)
    }

    /// Last representable millisecond of the final day
    pub fn end_timestamp(&self) -> NaiveDateTime {
        end_of_day(self.end)
    }
}

/// First and last day of a calendar month
pub fn month_bounds(year: i32, month: u32) -> TableResult<DateRange> {
    let start = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| {
        TableError::operation_error(
            format!("invalid month {}-{}", year, month),
            Some("month_bounds".to_string()),
        )
    })?;
    let end = add_months(start, 1) - Days::new(1);
    Ok(DateRange { start, end })
}

/// First and last day of a calendar quarter (1-4)
pub fn quarter_bounds(year: i32, quarter: u32) -> TableResult<DateRange> {
    if !(1..=4).contains(&quarter) {
        return Err(TableError::operation_error(
            format!("invalid quarter {}", quarter),
            Some("quarter_bounds".to_string()),
        ));
    }
    let start_month = (quarter - 1) * 3 + 1;
    let start = month_bounds(year, start_month)?;
    let end = month_bounds(year, start_month + 2)?;
    Ok(start.union_span(&end))
}

/// First and last day of a calendar year
pub fn year_bounds(year: i32) -> TableResult<DateRange> {
    let start = month_bounds(year, 1)?;
    let end = month_bounds(year, 12)?;
    Ok(start.union_span(&end))
}

/// Number of days in a calendar month
pub fn days_in_month(year: i32, month: u32) -> TableResult<u32> {
    Ok(month_bounds(year, month)?.days() as u32)
}

/// Shift a date by whole months, clamping to the last day of short months
///
/// `2024-01-31` plus one month is `2024-02-29`.
pub fn add_months(date: NaiveDate, months: i32) -> NaiveDate {
    let total = date.year() * 12 + date.month() as i32 - 1 + months;
    let year = total.div_euclid(12);
    let month = total.rem_euclid(12) as u32 + 1;
    let day = date.day();
    // Walk back from the requested day until the date is valid
    (0..4)
        .filter_map(|back| NaiveDate::from_ymd_opt(year, month, day.saturating_sub(back)))
        .next()
        .unwrap_or_else(|| NaiveDate::from_ymd_opt(year, month, 1).unwrap())
}

/// Midnight at the start of a day
pub fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_hms_opt(0, 0, 0).unwrap()
}

/// Last representable millisecond of a day
pub fn end_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_hms_milli_opt(23, 59, 59, 999).unwrap()
}
