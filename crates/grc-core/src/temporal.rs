//! # Policy Dates
//!
//! A generated policy carries two dates: the effective date (the day it was
//! generated) and the review date (exactly one calendar year later). Both
//! render in long form, `October 15, 2026`, independent of the host locale.
//!
//! ## Leap Days
//!
//! Calendar-year arithmetic uses `chrono::Months`, which clamps to the last
//! day of the target month: an effective date of February 29 reviews on
//! February 28 of the following year. The distance is therefore always 365
//! or 366 days.

use chrono::{Months, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Long-form date pattern: full month name, day without padding, four-digit year.
const LONG_DATE_FORMAT: &str = "%B %-d, %Y";

/// Effective and review dates for one generation call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyDates {
    effective: NaiveDate,
    review: NaiveDate,
}

impl PolicyDates {
    /// Dates anchored on today's UTC calendar date.
    pub fn today() -> Result<Self, ValidationError> {
        Self::from_effective(Utc::now().date_naive())
    }

    /// Dates anchored on an explicit effective date.
    pub fn from_effective(effective: NaiveDate) -> Result<Self, ValidationError> {
        let review = effective.checked_add_months(Months::new(12)).ok_or_else(|| {
            ValidationError::ReviewDateOutOfRange {
                effective: effective.to_string(),
            }
        })?;
        Ok(Self { effective, review })
    }

    /// Parse an effective date in `YYYY-MM-DD` form.
    pub fn parse_effective(s: &str) -> Result<Self, ValidationError> {
        let effective = NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| {
            ValidationError::InvalidDate {
                input: s.to_string(),
            }
        })?;
        Self::from_effective(effective)
    }

    /// The effective date.
    pub fn effective(&self) -> NaiveDate {
        self.effective
    }

    /// The review date, one calendar year after the effective date.
    pub fn review(&self) -> NaiveDate {
        self.review
    }

    /// Effective date in long form.
    pub fn effective_long(&self) -> String {
        format_long_date(self.effective)
    }

    /// Review date in long form.
    pub fn review_long(&self) -> String {
        format_long_date(self.review)
    }
}

/// Render a date as `Month D, YYYY`.
pub fn format_long_date(date: NaiveDate) -> String {
    date.format(LONG_DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn long_format_has_no_day_padding() {
        assert_eq!(format_long_date(date(2026, 1, 5)), "January 5, 2026");
        assert_eq!(format_long_date(date(2026, 10, 15)), "October 15, 2026");
    }

    #[test]
    fn review_is_one_calendar_year_later() {
        let dates = PolicyDates::from_effective(date(2026, 10, 15)).unwrap();
        assert_eq!(dates.review(), date(2027, 10, 15));
        assert_eq!(dates.effective_long(), "October 15, 2026");
        assert_eq!(dates.review_long(), "October 15, 2027");
    }

    #[test]
    fn leap_day_reviews_on_last_day_of_february() {
        let dates = PolicyDates::from_effective(date(2028, 2, 29)).unwrap();
        assert_eq!(dates.review(), date(2029, 2, 28));
    }

    #[test]
    fn parse_effective_accepts_iso_dates() {
        let dates = PolicyDates::parse_effective("2026-03-01").unwrap();
        assert_eq!(dates.effective(), date(2026, 3, 1));
        assert_eq!(dates.review(), date(2027, 3, 1));
    }

    #[test]
    fn parse_effective_rejects_other_formats() {
        assert!(PolicyDates::parse_effective("03/01/2026").is_err());
        assert!(PolicyDates::parse_effective("2026-02-30").is_err());
        assert!(PolicyDates::parse_effective("").is_err());
    }

    #[test]
    fn today_is_anchored_on_utc_date() {
        let dates = PolicyDates::today().unwrap();
        let now = Utc::now().date_naive();
        // A midnight rollover between the two calls moves the date by one day.
        assert!((now - dates.effective()).num_days().abs() <= 1);
    }

    #[test]
    fn out_of_range_effective_date_is_rejected() {
        let err = PolicyDates::from_effective(NaiveDate::MAX).unwrap_err();
        assert!(matches!(err, ValidationError::ReviewDateOutOfRange { .. }));
    }

    proptest! {
        /// The review date is always 365 or 366 days after the effective date.
        #[test]
        fn review_distance_is_one_year(days in 0i64..80_000) {
            let effective = date(1970, 1, 1) + chrono::Duration::days(days);
            let dates = PolicyDates::from_effective(effective).unwrap();
            let distance = (dates.review() - dates.effective()).num_days();
            prop_assert!(distance == 365 || distance == 366, "distance was {}", distance);
        }
    }
}
