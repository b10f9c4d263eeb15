//! Whole-day and whole-month calendar arithmetic used by billing.
//!
//! Month and year shifts clamp the day to the end of the target month, so
//! `2024-01-31 + 1 month` is `2024-02-29` and a February 29th birthday falls
//! on February 28th in non-leap years.

use chrono::{Datelike, Duration, NaiveDate};

pub const AGE_OF_MAJORITY: u32 = 18;

/// Shifts `date` by a signed number of calendar months.
pub fn shift_month(date: NaiveDate, months: i32) -> NaiveDate {
    let index = date.year() * 12 + date.month0() as i32 + months;
    let year = index.div_euclid(12);
    let month = index.rem_euclid(12) as u32 + 1;
    let day = date.day().min(days_in_month(year, month));
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(date)
}

/// Shifts `date` by a signed number of calendar years.
pub fn shift_year(date: NaiveDate, years: i32) -> NaiveDate {
    shift_month(date, years * 12)
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .map(|first_next| (first_next - Duration::days(1)).day())
        .unwrap_or(28)
}

/// Counts complete calendar months from `start` up to `end`.
///
/// Each month boundary is the anniversary of `start`'s day (clamped), measured
/// from `start` itself so short months never accumulate drift. Any partial
/// month is dropped.
pub fn whole_months_between(start: NaiveDate, end: NaiveDate) -> u32 {
    if end <= start {
        return 0;
    }
    let mut months =
        (end.year() - start.year()) * 12 + end.month() as i32 - start.month() as i32;
    if shift_month(start, months) > end {
        months -= 1;
    }
    months.max(0) as u32
}

/// Age in completed years on `on`. Negative when `on` precedes `birthdate`.
pub fn age_on(birthdate: NaiveDate, on: NaiveDate) -> i32 {
    let mut years = on.year() - birthdate.year();
    if shift_year(birthdate, years) > on {
        years -= 1;
    }
    years
}

/// The date a person born on `birthdate` reaches the age of majority.
pub fn majority_date(birthdate: NaiveDate) -> NaiveDate {
    shift_year(birthdate, AGE_OF_MAJORITY as i32)
}

pub fn is_minor_on(birthdate: NaiveDate, on: NaiveDate) -> bool {
    age_on(birthdate, on) < AGE_OF_MAJORITY as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn shift_month_clamps_to_month_end() {
        assert_eq!(shift_month(date(2024, 1, 31), 1), date(2024, 2, 29));
        assert_eq!(shift_month(date(2025, 1, 31), 1), date(2025, 2, 28));
        assert_eq!(shift_month(date(2025, 11, 15), 3), date(2026, 2, 15));
        assert_eq!(shift_month(date(2025, 2, 15), -3), date(2024, 11, 15));
    }

    #[test]
    fn whole_months_floor_partial_months() {
        let start = date(2025, 1, 15);
        assert_eq!(whole_months_between(start, date(2025, 3, 15)), 2);
        assert_eq!(whole_months_between(start, date(2025, 3, 14)), 1);
        assert_eq!(whole_months_between(start, date(2025, 4, 20)), 3);
        assert_eq!(whole_months_between(start, start), 0);
        assert_eq!(whole_months_between(start, date(2024, 12, 1)), 0);
    }

    #[test]
    fn whole_months_from_month_end_do_not_drift() {
        let start = date(2025, 1, 31);
        assert_eq!(whole_months_between(start, date(2025, 2, 28)), 1);
        assert_eq!(whole_months_between(start, date(2025, 3, 30)), 1);
        assert_eq!(whole_months_between(start, date(2025, 3, 31)), 2);
    }

    #[test]
    fn age_counts_completed_years() {
        let birth = date(2007, 6, 10);
        assert_eq!(age_on(birth, date(2025, 6, 9)), 17);
        assert_eq!(age_on(birth, date(2025, 6, 10)), 18);
        assert_eq!(age_on(birth, date(2006, 1, 1)), -2);
    }

    #[test]
    fn leap_day_birthdays_come_of_age_on_february_28th() {
        let birth = date(2008, 2, 29);
        assert_eq!(majority_date(birth), date(2026, 2, 28));
        assert!(is_minor_on(birth, date(2026, 2, 27)));
        assert!(!is_minor_on(birth, date(2026, 2, 28)));
        assert_eq!(age_on(birth, date(2026, 2, 28)), 18);
    }

    #[test]
    fn minor_status_ends_on_majority_date() {
        for birth in [date(2007, 6, 10), date(2008, 2, 29), date(2006, 12, 31)] {
            let majority = majority_date(birth);
            assert!(is_minor_on(birth, majority - Duration::days(1)));
            assert!(!is_minor_on(birth, majority));
            assert!(is_minor_on(birth, birth));
        }
    }
}
