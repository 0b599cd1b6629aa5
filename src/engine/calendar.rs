// Calendar arithmetic: leap years, month lengths, ISO weekdays and
// elapsed-time-within-unit decomposition of a zoned instant

use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Timelike};

use crate::core::models::ProgressionValues;

pub const SECONDS_IN_MINUTE: u32 = 60;
pub const SECONDS_IN_HOUR: u32 = 3600;
pub const SECONDS_IN_DAY: u32 = 86_400;
pub const DAYS_IN_WEEK: u32 = 7;

/// Gregorian leap year rule
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

pub fn days_in_year(year: i32) -> u32 {
    if is_leap_year(year) {
        366
    } else {
        365
    }
}

/// Number of days in `month` (1..=12) of `year`
///
/// Found by stepping back one day from the first of the following month, so
/// February in leap years needs no special case. Returns `None` for a month
/// outside 1..=12 or a year chrono cannot represent.
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    if !(1..=12).contains(&month) {
        return None;
    }
    let (next_year, next_month) = if month == 12 {
        (year.checked_add(1)?, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)?
        .pred_opt()
        .map(|last| last.day())
}

/// Monday=1 through Sunday=7
pub fn iso_weekday_ordinal<Tz: TimeZone>(instant: &DateTime<Tz>) -> u32 {
    match instant.weekday().num_days_from_sunday() {
        0 => 7,
        n => n,
    }
}

/// Seconds elapsed since the start of each unit containing `instant`
///
/// Day offsets are 0-based: the first day of a week, month or year
/// contributes no whole-day seconds.
pub fn elapsed_seconds<Tz: TimeZone>(instant: &DateTime<Tz>) -> ProgressionValues {
    // chrono reports a leap second as second 59 with extra nanoseconds
    let minute = instant.second();
    let hour = instant.minute() * SECONDS_IN_MINUTE + minute;
    let day = instant.hour() * SECONDS_IN_HOUR + hour;

    let week = (iso_weekday_ordinal(instant) - 1) * SECONDS_IN_DAY + day;
    let month = (instant.day() - 1) * SECONDS_IN_DAY + day;
    let year = (instant.ordinal() - 1) * SECONDS_IN_DAY + day;

    ProgressionValues {
        year: f64::from(year),
        month: f64::from(month),
        week: f64::from(week),
        day: f64::from(day),
        hour: f64::from(hour),
        minute: f64::from(minute),
    }
}

/// Elapsed share of each unit containing `instant`, in percent
pub fn percentages<Tz: TimeZone>(instant: &DateTime<Tz>) -> ProgressionValues {
    let elapsed = elapsed_seconds(instant);
    let day_secs = f64::from(SECONDS_IN_DAY);

    let year_len = f64::from(days_in_year(instant.year())) * day_secs;
    // The instant's own month is always valid
    let month_days = days_in_month(instant.year(), instant.month()).unwrap_or(31);
    let month_len = f64::from(month_days) * day_secs;
    let week_len = f64::from(DAYS_IN_WEEK) * day_secs;

    ProgressionValues {
        year: elapsed.year / year_len * 100.0,
        month: elapsed.month / month_len * 100.0,
        week: elapsed.week / week_len * 100.0,
        day: elapsed.day / day_secs * 100.0,
        hour: elapsed.hour / f64::from(SECONDS_IN_HOUR) * 100.0,
        minute: elapsed.minute / f64::from(SECONDS_IN_MINUTE) * 100.0,
    }
}
