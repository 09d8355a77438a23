//! # Store Calendar
//!
//! Decides which business date an order belongs to.
//!
//! Orders are timestamped in UTC, but the daily reports group by the store's
//! local calendar day. The date is computed once, when the order is placed,
//! and stored next to the timestamp so reports never re-derive it.
//!
//! ```text
//! placed_at (UTC)          offset     business_date
//! 2024-01-01T23:30:00Z     +00:00     2024-01-01
//! 2024-01-01T23:30:00Z     +02:00     2024-01-02
//! 2024-01-02T03:00:00Z     -05:00     2024-01-01
//! ```

use chrono::{DateTime, FixedOffset, Local, NaiveDate, Offset, Utc};

/// Timestamp and business date assigned to an order at placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderStamp {
    pub placed_at: DateTime<Utc>,
    pub business_date: NaiveDate,
}

/// The store's notion of "today".
///
/// `None` follows the host's local timezone (DST included); a fixed offset
/// pins the store to that offset regardless of the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StoreCalendar {
    offset: Option<FixedOffset>,
}

impl StoreCalendar {
    /// Uses the server's local timezone.
    pub fn local() -> Self {
        StoreCalendar { offset: None }
    }

    /// Pins the calendar to a fixed UTC offset.
    pub fn fixed(offset: FixedOffset) -> Self {
        StoreCalendar {
            offset: Some(offset),
        }
    }

    /// Convenience for tests and UTC-run stores.
    pub fn utc() -> Self {
        Self::fixed(Utc.fix())
    }

    /// Builds a calendar from an offset in minutes east of UTC.
    ///
    /// Returns `None` if the offset is outside ±24h.
    pub fn from_offset_minutes(minutes: i32) -> Option<Self> {
        minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .map(Self::fixed)
    }

    /// The configured fixed offset, if any.
    pub fn offset(&self) -> Option<FixedOffset> {
        self.offset
    }

    /// Business date of a UTC instant.
    pub fn date_of(&self, instant: DateTime<Utc>) -> NaiveDate {
        match self.offset {
            Some(offset) => instant.with_timezone(&offset).date_naive(),
            None => instant.with_timezone(&Local).date_naive(),
        }
    }

    /// Today's business date.
    pub fn today(&self) -> NaiveDate {
        self.date_of(Utc::now())
    }

    /// Stamps an order placed at `now`.
    pub fn stamp(&self, now: DateTime<Utc>) -> OrderStamp {
        OrderStamp {
            placed_at: now,
            business_date: self.date_of(now),
        }
    }

    /// Stamps an order placed right now.
    pub fn stamp_now(&self) -> OrderStamp {
        self.stamp(Utc::now())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn instant(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    #[test]
    fn test_utc_calendar() {
        let cal = StoreCalendar::utc();
        let date = cal.date_of(instant(2024, 1, 1, 23, 30));
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
    }

    #[test]
    fn test_east_offset_rolls_forward() {
        let cal = StoreCalendar::from_offset_minutes(120).unwrap();
        let date = cal.date_of(instant(2024, 1, 1, 23, 30));
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
    }

    #[test]
    fn test_west_offset_rolls_back() {
        let cal = StoreCalendar::from_offset_minutes(-300).unwrap();
        let date = cal.date_of(instant(2024, 1, 2, 3, 0));
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
    }

    #[test]
    fn test_invalid_offset() {
        assert!(StoreCalendar::from_offset_minutes(24 * 60).is_none());
        assert!(StoreCalendar::from_offset_minutes(i32::MAX).is_none());
    }

    #[test]
    fn test_stamp_keeps_instant() {
        let cal = StoreCalendar::utc();
        let now = instant(2024, 3, 9, 12, 0);
        let stamp = cal.stamp(now);
        assert_eq!(stamp.placed_at, now);
        assert_eq!(stamp.business_date, NaiveDate::from_ymd_opt(2024, 3, 9).unwrap());
    }

    #[test]
    fn test_local_calendar_matches_host() {
        let cal = StoreCalendar::local();
        let now = Utc::now();
        assert_eq!(cal.date_of(now), now.with_timezone(&Local).date_naive());
    }
}
