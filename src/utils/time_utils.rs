use chrono::{DateTime, Duration, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};

use crate::domain::Resolution;

pub struct TimeUtils;

impl TimeUtils {
    pub const MS_IN_S: i64 = 1000;
    pub const STANDARD_DATE_FORMAT: &str = "%Y-%m-%d";
    pub const INTRADAY_LABEL_FORMAT: &str = "%m-%d %H:%M";
    pub const TOOLTIP_FORMAT: &str = "%Y-%m-%d %H:%M";
}

/// Whole seconds since the epoch, rounding towards negative infinity.
pub fn date_to_unix_timestamp<Tz: TimeZone>(date: &DateTime<Tz>) -> i64 {
    date.timestamp_millis().div_euclid(TimeUtils::MS_IN_S)
}

/// Midnight at the start of `date` in `tz`.
/// A DST-ambiguous midnight resolves to the earlier instant; a midnight that
/// falls inside a DST gap resolves to the first valid quarter hour after it.
pub fn start_of_day<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> DateTime<Tz> {
    let midnight = date.and_time(NaiveTime::MIN);
    (0..=16)
        .map(|quarter| midnight + Duration::minutes(15 * quarter))
        .find_map(|candidate: NaiveDateTime| tz.from_local_datetime(&candidate).earliest())
        .unwrap_or_else(|| tz.from_utc_datetime(&midnight))
}

pub fn start_of_day_timestamp<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> i64 {
    date_to_unix_timestamp(&start_of_day(date, tz))
}

/// Midnight at the start of the day after `date`. Calendar arithmetic handles
/// month and year rollover (Jan 31 -> Feb 1, Dec 31 -> Jan 1).
pub fn next_day_start<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> DateTime<Tz> {
    let next = date.succ_opt().unwrap_or(date);
    start_of_day(next, tz)
}

/// End bound of a range so that the whole of `date` is included.
pub fn next_day_timestamp<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> i64 {
    date_to_unix_timestamp(&next_day_start(date, tz))
}

pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn parse_iso_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), TimeUtils::STANDARD_DATE_FORMAT).ok()
}

pub fn format_iso_date(date: NaiveDate) -> String {
    date.format(TimeUtils::STANDARD_DATE_FORMAT).to_string()
}

/// Time-axis label for a candle start. Daily candles show the date only,
/// intraday candles show date and time. Seconds are never shown.
pub fn epoch_sec_to_label_in<Tz: TimeZone>(epoch_sec: i64, resolution: Resolution, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    // Utc.timestamp_opt() safely handles out-of-range values.
    let Some(utc) = Utc.timestamp_opt(epoch_sec, 0).single() else {
        return String::new();
    };
    let local = utc.with_timezone(tz);
    if resolution.is_intraday() {
        local.format(TimeUtils::INTRADAY_LABEL_FORMAT).to_string()
    } else {
        local.format(TimeUtils::STANDARD_DATE_FORMAT).to_string()
    }
}

pub fn epoch_sec_to_label(epoch_sec: i64, resolution: Resolution) -> String {
    epoch_sec_to_label_in(epoch_sec, resolution, &Local)
}

/// Used by the candle tooltip
pub fn epoch_sec_to_local(epoch_sec: i64) -> String {
    match Local.timestamp_opt(epoch_sec, 0).single() {
        Some(datetime) => datetime.format(TimeUtils::TOOLTIP_FORMAT).to_string(),
        None => String::new(),
    }
}
