use aceday::recommend::schedule::{
    DATE_FORMATS, PLACEHOLDER_YEAR, ScheduleResolver, TIME_FORMATS_12H, TIME_FORMATS_24H,
    resolve_time,
};
use aceday::recommend::{ScheduleError, Zone};
use chrono::{Datelike, Local, NaiveDate, NaiveTime, Timelike, Utc};

fn utc_resolver() -> ScheduleResolver {
    // UTC keeps assertions independent of the machine running the tests.
    ScheduleResolver::new(Zone::Utc)
}

#[test]
fn test_explicit_date_and_12h_time() {
    let dt = utc_resolver().resolve("Mar 12, 2025", "2:30 PM").unwrap();
    assert_eq!(
        dt,
        NaiveDate::from_ymd_opt(2025, 3, 12)
            .unwrap()
            .and_hms_opt(14, 30, 0)
            .unwrap()
            .and_utc()
    );
}

#[test]
fn test_local_zone_preserves_wall_clock() {
    let resolver = ScheduleResolver::new(Zone::Local);
    let dt = resolver.resolve("Mar 12, 2025", "2:30 PM").unwrap();
    let local = dt.with_timezone(&Local);
    assert_eq!(local.date_naive(), NaiveDate::from_ymd_opt(2025, 3, 12).unwrap());
    assert_eq!((local.hour(), local.minute()), (14, 30));
}

#[test]
fn test_placeholder_year_moves_to_current_year() {
    let date = utc_resolver().resolve_date("Jan 5, 2024").unwrap();
    assert_eq!(date.year(), Utc::now().year());
    assert_eq!((date.month(), date.day()), (1, 5));
}

#[test]
fn test_other_years_are_kept() {
    let date = utc_resolver().resolve_date("Jan 5, 2023").unwrap();
    assert_eq!(date, NaiveDate::from_ymd_opt(2023, 1, 5).unwrap());
    let future = utc_resolver().resolve_date("Jan 5, 2027").unwrap();
    assert_eq!(future.year(), 2027);
}

#[test]
fn test_yearless_date_lands_in_current_year() {
    let date = utc_resolver().resolve_date("Jul 4").unwrap();
    assert_eq!(date.year(), Utc::now().year());
    assert_eq!((date.month(), date.day()), (7, 4));
}

#[test]
fn test_date_without_comma() {
    let date = utc_resolver().resolve_date("Sep 3 2025").unwrap();
    assert_eq!(date, NaiveDate::from_ymd_opt(2025, 9, 3).unwrap());
}

#[test]
fn test_unparseable_date_carries_input() {
    let err = utc_resolver().resolve_date("someday soon").unwrap_err();
    assert_eq!(err, ScheduleError::DateParse("someday soon".to_string()));
}

#[test]
fn test_24h_time() {
    assert_eq!(
        resolve_time("09:15").unwrap(),
        NaiveTime::from_hms_opt(9, 15, 0).unwrap()
    );
    assert_eq!(
        resolve_time("9:15").unwrap(),
        NaiveTime::from_hms_opt(9, 15, 0).unwrap()
    );
}

#[test]
fn test_seconds_are_discarded() {
    assert_eq!(
        resolve_time("14:05:33").unwrap(),
        NaiveTime::from_hms_opt(14, 5, 0).unwrap()
    );
}

#[test]
fn test_12h_variants() {
    assert_eq!(
        resolve_time("2:30 PM").unwrap(),
        NaiveTime::from_hms_opt(14, 30, 0).unwrap()
    );
    assert_eq!(
        resolve_time("2:30PM").unwrap(),
        NaiveTime::from_hms_opt(14, 30, 0).unwrap()
    );
    assert_eq!(
        resolve_time("7PM").unwrap(),
        NaiveTime::from_hms_opt(19, 0, 0).unwrap()
    );
    assert_eq!(
        resolve_time("12:00 AM").unwrap(),
        NaiveTime::from_hms_opt(0, 0, 0).unwrap()
    );
}

#[test]
fn test_whitespace_runs_collapse() {
    assert_eq!(
        resolve_time("  2:30   PM ").unwrap(),
        NaiveTime::from_hms_opt(14, 30, 0).unwrap()
    );
}

#[test]
fn test_unparseable_time_carries_input() {
    let err = resolve_time("half past two").unwrap_err();
    assert_eq!(err, ScheduleError::TimeParse("half past two".to_string()));
}

#[test]
fn test_meridiem_detection_is_case_sensitive() {
    // Lowercase markers select the 24-hour grammar, which cannot read them.
    assert!(resolve_time("2:30 pm").is_err());
}

#[test]
fn test_format_lists_are_the_documented_config() {
    assert_eq!(DATE_FORMATS.len(), 6);
    assert!(DATE_FORMATS[..4].iter().all(|f| f.has_year));
    assert!(DATE_FORMATS[4..].iter().all(|f| !f.has_year));
    assert_eq!(TIME_FORMATS_12H.len(), 3);
    assert_eq!(TIME_FORMATS_24H.len(), 3);
    assert_eq!(PLACEHOLDER_YEAR, 2024);
}
