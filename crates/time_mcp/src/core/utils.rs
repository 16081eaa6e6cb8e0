use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use chrono_tz::{OffsetComponents, Tz};
use regex::Regex;

use crate::core::error::{TimeServerError, TimeServerResult};

// Constants for format strings
pub const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f%:z";
pub const UTC_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";
pub const LOCAL_TIME_FORMAT: &str = "%H:%M:%S";
pub const LOCAL_DATE_FORMAT: &str = "%Y-%m-%d";
pub const OFFSET_FORMAT: &str = "%:z";
pub const ABBREVIATION_FORMAT: &str = "%Z";
pub const DAY_FORMAT: &str = "%A";

/// Local datetime layouts accepted for `add_time` base times, tried in order
const LOCAL_DATETIME_INPUT_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];
const DATE_INPUT_FORMAT: &str = "%Y-%m-%d";

/// Available resource URIs for the Time MCP Server
pub const AVAILABLE_RESOURCES: &[&str] = &["time://current", "time://zones", "time://help"];

pub const VALID_UNITS: &[&str] = &[
    "years", "months", "weeks", "days", "hours", "minutes", "seconds",
];

/// Curated zones returned by `list_common_timezones`, in display order
pub const COMMON_TIMEZONES: &[&str] = &[
    "America/New_York",
    "America/Los_Angeles",
    "America/Chicago",
    "America/Denver",
    "America/Toronto",
    "America/Sao_Paulo",
    "Europe/London",
    "Europe/Paris",
    "Europe/Berlin",
    "Europe/Rome",
    "Europe/Madrid",
    "Europe/Moscow",
    "Asia/Tokyo",
    "Asia/Shanghai",
    "Asia/Seoul",
    "Asia/Kolkata",
    "Asia/Dubai",
    "Asia/Singapore",
    "Africa/Cairo",
    "Africa/Johannesburg",
    "Australia/Sydney",
    "Australia/Melbourne",
    "Pacific/Auckland",
    "Pacific/Honolulu",
];

static CLOCK_TIME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{1,2}):(\d{2})(?::(\d{2}))?$").expect("clock time pattern is valid")
});

/// Format a time difference in hours
///
/// # Arguments
///
/// * `hours_difference` - The time difference in hours
///
/// # Returns
///
/// A formatted string representing the time difference
pub fn format_time_difference(hours_difference: f64) -> String {
    match hours_difference.fract() {
        0.0 => format!("{:+.0}h", hours_difference),
        _ => {
            let formatted = format!("{:+}", hours_difference);
            let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
            format!("{}h", trimmed)
        }
    }
}

/// Hours the target zone is ahead of the source zone at the given instants
///
/// Positive when the target's UTC offset is larger than the source's.
pub fn hours_between_offsets(source_time: &DateTime<Tz>, target_time: &DateTime<Tz>) -> f64 {
    let source_offset = source_time.offset().base_utc_offset() + source_time.offset().dst_offset();
    let target_offset = target_time.offset().base_utc_offset() + target_time.offset().dst_offset();
    (target_offset - source_offset).num_seconds() as f64 / 3600.0
}

/// Parse `HH:mm` or `HH:mm:ss` into a clock time
pub fn parse_clock_time(time_str: &str) -> TimeServerResult<NaiveTime> {
    let invalid = || TimeServerError::InvalidTimeFormat {
        time: time_str.to_string(),
    };

    let captures = CLOCK_TIME_PATTERN.captures(time_str).ok_or_else(invalid)?;
    let component = |index: usize| -> TimeServerResult<u32> {
        captures
            .get(index)
            .map_or(Ok(0), |m| m.as_str().parse::<u32>().map_err(|_| invalid()))
    };

    NaiveTime::from_hms_opt(component(1)?, component(2)?, component(3)?).ok_or_else(invalid)
}

/// Parse an ISO-8601 base time for date arithmetic in `timezone`
///
/// Inputs carrying an offset are converted into the zone; bare local
/// datetimes and dates are interpreted as wall-clock time in the zone.
pub fn parse_base_time(input: &str, timezone: &Tz) -> TimeServerResult<DateTime<Tz>> {
    let invalid = || TimeServerError::InvalidDatetime {
        datetime: input.to_string(),
    };

    if let Ok(with_offset) = DateTime::parse_from_rfc3339(input) {
        return Ok(with_offset.with_timezone(timezone));
    }

    let naive = LOCAL_DATETIME_INPUT_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(input, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(input, DATE_INPUT_FORMAT)
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .ok_or_else(invalid)?;

    timezone
        .from_local_datetime(&naive)
        .earliest()
        .ok_or_else(invalid)
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Timelike};

    use super::*;

    #[test]
    fn test_format_time_difference() {
        // Test whole hours (now formatted without decimal)
        assert_eq!(format_time_difference(5.0), "+5h");
        assert_eq!(format_time_difference(-3.0), "-3h");

        // Test fractional hours
        assert_eq!(format_time_difference(5.5), "+5.5h");
        assert_eq!(format_time_difference(-2.75), "-2.75h");

        // Test Nepal timezone (UTC+5:45)
        assert_eq!(format_time_difference(5.75), "+5.75h");
    }

    #[test]
    fn test_hours_between_offsets_sign() {
        let instant = chrono::Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap();
        let utc = instant.with_timezone(&chrono_tz::UTC);
        let tokyo = instant.with_timezone(&chrono_tz::Asia::Tokyo);
        let new_york = instant.with_timezone(&chrono_tz::America::New_York);

        assert_eq!(hours_between_offsets(&utc, &tokyo), 9.0);
        assert_eq!(hours_between_offsets(&tokyo, &utc), -9.0);
        assert_eq!(hours_between_offsets(&utc, &new_york), -5.0);
        assert_eq!(hours_between_offsets(&utc, &utc), 0.0);
    }

    #[test]
    fn test_parse_clock_time() {
        let time = parse_clock_time("9:05").unwrap();
        assert_eq!((time.hour(), time.minute(), time.second()), (9, 5, 0));

        let time = parse_clock_time("23:59:58").unwrap();
        assert_eq!((time.hour(), time.minute(), time.second()), (23, 59, 58));

        assert!(parse_clock_time("25:00").is_err());
        assert!(parse_clock_time("12:60").is_err());
        assert!(parse_clock_time("12:3").is_err());
        assert!(parse_clock_time("12:30pm").is_err());
        assert!(parse_clock_time(" 12:30").is_err());
    }

    #[test]
    fn test_parse_base_time_variants() {
        let tz = chrono_tz::Europe::Berlin;

        let local = parse_base_time("2024-03-10T08:15:00", &tz).unwrap();
        assert_eq!(local.format("%Y-%m-%d %H:%M:%S").to_string(), "2024-03-10 08:15:00");

        let minutes_only = parse_base_time("2024-03-10T08:15", &tz).unwrap();
        assert_eq!(minutes_only, local);

        let date_only = parse_base_time("2024-03-10", &tz).unwrap();
        assert_eq!(date_only.format("%H:%M").to_string(), "00:00");

        // 07:15 UTC is 08:15 in Berlin during winter time
        let with_offset = parse_base_time("2024-03-10T07:15:00Z", &tz).unwrap();
        assert_eq!(with_offset, local);

        assert!(parse_base_time("tomorrow-ish", &tz).is_err());
        assert!(parse_base_time("2024-13-01", &tz).is_err());
    }
}
