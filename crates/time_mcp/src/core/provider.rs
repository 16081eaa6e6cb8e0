use std::str::FromStr;
use std::sync::Arc;

use chrono::{DateTime, Days, Months, TimeDelta, TimeZone};
use chrono_tz::Tz;
use mockable::{Clock, DefaultClock};
use serde_json::json;

use crate::core::{
    error::{TimeServerError, TimeServerResult},
    logger::{Logger, TracingLogger},
    models::{
        ConvertedTime, DateTimeSnapshot, Region, TimeArithmeticResult, TimeConversionResult,
        TimeDifference, TimeResult, TimeUnit, TimezoneInfoResult,
    },
    utils::{self, COMMON_TIMEZONES},
};

/// Time server implementation
#[derive(Clone)]
pub struct TimeServer {
    pub(crate) local_timezone: Tz,
    clock: Arc<dyn Clock + Send + Sync>,
    logger: Arc<dyn Logger>,
}

impl TimeServer {
    pub fn new() -> Self {
        Self::with_capabilities(Arc::new(DefaultClock), Arc::new(TracingLogger))
    }

    /// Build a server reading "now" from `clock` and reporting through `logger`
    pub fn with_capabilities(
        clock: Arc<dyn Clock + Send + Sync>,
        logger: Arc<dyn Logger>,
    ) -> Self {
        // Try to detect the system's local timezone
        let local_tz = match iana_time_zone::get_timezone() {
            Ok(tz_name) => match tz_name.parse::<Tz>() {
                Ok(tz) => tz,
                Err(_) => {
                    tracing::warn!("Could not parse timezone '{}', defaulting to UTC", tz_name);
                    chrono_tz::UTC
                }
            },
            Err(_) => {
                tracing::warn!("Could not detect system timezone, defaulting to UTC");
                chrono_tz::UTC
            }
        };

        Self {
            local_timezone: local_tz,
            clock,
            logger,
        }
    }

    pub(crate) fn logger(&self) -> &dyn Logger {
        self.logger.as_ref()
    }

    pub(crate) fn parse_timezone(&self, timezone_name: &str) -> TimeServerResult<Tz> {
        let parsed = Tz::from_str(timezone_name);
        self.logger.debug(
            "Timezone validation result",
            Some(&json!({"timezone": timezone_name, "is_valid": parsed.is_ok()})),
        );
        parsed.map_err(|_| TimeServerError::InvalidTimezone {
            timezone: timezone_name.to_string(),
        })
    }

    fn now_in(&self, timezone: &Tz) -> DateTime<Tz> {
        self.clock.utc().with_timezone(timezone)
    }

    pub fn get_current_time(&self, timezone_name: &str) -> TimeServerResult<TimeResult> {
        self.logger
            .info("Getting current time", Some(&json!({"timezone": timezone_name})));

        let timezone = self.parse_timezone(timezone_name).inspect_err(|_| {
            self.logger.error(
                "Invalid timezone provided",
                Some(&json!({"timezone": timezone_name})),
            );
        })?;
        let current_time = self.now_in(&timezone);

        Ok(TimeResult::from_datetime(&current_time, timezone_name))
    }

    pub fn convert_time(
        &self,
        time_str: &str,
        source_tz: &str,
        target_tz: &str,
    ) -> TimeServerResult<TimeConversionResult> {
        let source_timezone = self.parse_timezone(source_tz)?;
        let target_timezone = self.parse_timezone(target_tz)?;

        let (source_time, target_time) =
            self.perform_time_conversion(&source_timezone, time_str, &target_timezone)?;

        let hours_difference = utils::hours_between_offsets(&source_time, &target_time);

        Ok(TimeConversionResult {
            source: ConvertedTime::from_datetime(&source_time, source_tz),
            target: ConvertedTime::from_datetime(&target_time, target_tz),
            time_difference: utils::format_time_difference(hours_difference),
            hours_difference,
        })
    }

    fn perform_time_conversion(
        &self,
        source_tz: &Tz,
        time_str: &str,
        target_tz: &Tz,
    ) -> TimeServerResult<(DateTime<Tz>, DateTime<Tz>)> {
        let parsed_time = utils::parse_clock_time(time_str)?;

        let now = self.now_in(source_tz);
        let source_time = source_tz
            .from_local_datetime(&now.date_naive().and_time(parsed_time))
            .earliest()
            .ok_or_else(|| TimeServerError::NonexistentLocalTime {
                time: time_str.to_string(),
                timezone: source_tz.name().to_string(),
            })?;

        let target_time = source_time.with_timezone(target_tz);
        Ok((source_time, target_time))
    }

    pub fn get_timezone_info(&self, timezone_name: &str) -> TimeServerResult<TimezoneInfoResult> {
        self.logger.info(
            "Getting timezone information",
            Some(&json!({"timezone": timezone_name})),
        );

        let timezone = self.parse_timezone(timezone_name)?;
        let result = TimezoneInfoResult::from_datetime(&self.now_in(&timezone), timezone_name);

        self.logger.info(
            "Successfully got timezone information",
            Some(&json!({"timezone": timezone_name, "abbreviation": result.abbreviation})),
        );
        Ok(result)
    }

    pub fn add_time(
        &self,
        base_time: &str,
        timezone_name: &str,
        amount: i64,
        unit: &str,
    ) -> TimeServerResult<TimeArithmeticResult> {
        let timezone = self.parse_timezone(timezone_name)?;

        let original = if base_time.eq_ignore_ascii_case("now") {
            self.now_in(&timezone)
        } else {
            utils::parse_base_time(base_time, &timezone)?
        };

        let unit = TimeUnit::from_str(unit)?;
        let result = shift(&original, amount, unit).ok_or_else(|| {
            TimeServerError::DateOutOfRange {
                datetime: original.to_rfc3339(),
                amount,
                unit: unit.to_string(),
            }
        })?;

        let verb = if amount >= 0 { "Added" } else { "Subtracted" };

        Ok(TimeArithmeticResult {
            original: DateTimeSnapshot::from_datetime(&original),
            result: DateTimeSnapshot::from_datetime(&result),
            operation: format!("{} {} {}", verb, amount.unsigned_abs(), unit),
            difference: TimeDifference {
                unit,
                amount,
                elapsed_seconds: (result - original).num_seconds(),
            },
        })
    }

    /// Current time for each curated zone belonging to `regions`
    ///
    /// An empty region list selects every region.
    pub fn list_common_timezones(&self, regions: &[Region]) -> TimeServerResult<Vec<TimeResult>> {
        let active: &[Region] = if regions.is_empty() {
            &Region::ALL
        } else {
            regions
        };

        let filtered: Vec<&str> = COMMON_TIMEZONES
            .iter()
            .copied()
            .filter(|tz| active.iter().any(|region| tz.starts_with(region.prefix())))
            .collect();

        self.logger.info(
            "Filtered timezones",
            Some(&json!({"filtered_count": filtered.len(), "timezones": filtered})),
        );

        filtered
            .into_iter()
            .map(|tz| self.get_current_time(tz))
            .collect()
    }

    /// Every zone known to the timezone database, sorted by name
    pub fn all_timezones(&self) -> Vec<&'static str> {
        let mut zones: Vec<&'static str> = chrono_tz::TZ_VARIANTS.iter().map(|tz| tz.name()).collect();
        zones.sort_unstable();
        zones
    }
}

impl Default for TimeServer {
    fn default() -> Self {
        Self::new()
    }
}

/// Apply `amount` of `unit` to `dt`
///
/// Calendar units keep the local wall-clock time; clock units add an exact
/// duration. Returns `None` when the result is out of range.
fn shift(dt: &DateTime<Tz>, amount: i64, unit: TimeUnit) -> Option<DateTime<Tz>> {
    let magnitude = amount.unsigned_abs();
    let forward = amount >= 0;

    match unit {
        TimeUnit::Years => {
            let months = u32::try_from(magnitude.checked_mul(12)?).ok()?;
            shift_months(dt, months, forward)
        }
        TimeUnit::Months => shift_months(dt, u32::try_from(magnitude).ok()?, forward),
        TimeUnit::Weeks => shift_days(dt, magnitude.checked_mul(7)?, forward),
        TimeUnit::Days => shift_days(dt, magnitude, forward),
        TimeUnit::Hours => dt.checked_add_signed(TimeDelta::try_hours(amount)?),
        TimeUnit::Minutes => dt.checked_add_signed(TimeDelta::try_minutes(amount)?),
        TimeUnit::Seconds => dt.checked_add_signed(TimeDelta::try_seconds(amount)?),
    }
}

fn shift_months(dt: &DateTime<Tz>, months: u32, forward: bool) -> Option<DateTime<Tz>> {
    let months = Months::new(months);
    if forward {
        dt.checked_add_months(months)
    } else {
        dt.checked_sub_months(months)
    }
}

fn shift_days(dt: &DateTime<Tz>, days: u64, forward: bool) -> Option<DateTime<Tz>> {
    let days = Days::new(days);
    if forward {
        dt.checked_add_days(days)
    } else {
        dt.checked_sub_days(days)
    }
}


#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{TimeZone, Utc};

    use super::testing::FixedClock;
    use super::*;
    use crate::core::error::ErrorKind;
    use crate::core::logger::LogLevel;
    use crate::core::logger::testing::RecordingLogger;

    fn server_at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> TimeServer {
        let instant = Utc
            .with_ymd_and_hms(year, month, day, hour, minute, 0)
            .unwrap();
        TimeServer::with_capabilities(Arc::new(FixedClock(instant)), Arc::new(TracingLogger))
    }

    #[test]
    fn test_current_time_utc() {
        let server = server_at(2024, 6, 1, 8, 0);
        let result = server.get_current_time("UTC").unwrap();

        assert_eq!(result.offset, "+00:00");
        assert!(!result.is_dst);
        assert_eq!(result.local_time, "08:00:00");
        assert_eq!(result.local_date, "2024-06-01");
        assert_eq!(result.day_of_week, "Saturday");
        assert_eq!(result.unix_timestamp, 1_717_228_800);
    }

    #[test]
    fn test_current_time_invalid_zone() {
        let server = TimeServer::new();
        let err = server.get_current_time("Not/AZone").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidParameter);
    }

    #[test]
    fn test_current_time_is_logged() {
        let logger = Arc::new(RecordingLogger::default());
        let server = TimeServer::with_capabilities(Arc::new(DefaultClock), logger.clone());

        server.get_current_time("Europe/Paris").unwrap();
        assert!(server.get_current_time("Mars/Olympus").is_err());

        let messages = logger.messages();
        assert!(messages.contains(&(LogLevel::Info, "Getting current time".to_string())));
        assert!(messages.contains(&(LogLevel::Error, "Invalid timezone provided".to_string())));
    }

    #[test]
    fn test_convert_same_zone() {
        let server = TimeServer::new();
        let result = server.convert_time("14:30", "UTC", "UTC").unwrap();

        assert_eq!(result.source.local_time, "14:30:00");
        assert_eq!(result.source.local_time, result.target.local_time);
        assert_eq!(result.hours_difference, 0.0);
    }

    #[test]
    fn test_convert_positive_and_negative_offsets() {
        // Winter in the northern hemisphere: no DST in any zone used here
        let server = server_at(2024, 1, 15, 9, 0);

        let tokyo = server.convert_time("12:00", "UTC", "Asia/Tokyo").unwrap();
        assert_eq!(tokyo.target.local_time, "21:00:00");
        assert_eq!(tokyo.time_difference, "+9h");

        let sao_paulo = server
            .convert_time("12:00", "UTC", "America/Sao_Paulo")
            .unwrap();
        assert_eq!(sao_paulo.target.local_time, "09:00:00");
        assert_eq!(sao_paulo.time_difference, "-3h");
        assert_eq!(sao_paulo.hours_difference, -3.0);

        let back = server
            .convert_time("21:00", "Asia/Tokyo", "UTC")
            .unwrap();
        assert_eq!(back.time_difference, "-9h");

        let kolkata = server.convert_time("00:00", "UTC", "Asia/Kolkata").unwrap();
        assert_eq!(kolkata.time_difference, "+5.5h");
        assert_eq!(kolkata.target.local_time, "05:30:00");
    }

    #[test]
    fn test_convert_with_seconds_crossing_date() {
        let server = server_at(2024, 1, 15, 9, 0);
        let result = server
            .convert_time("23:15:45", "UTC", "Asia/Tokyo")
            .unwrap();

        assert_eq!(result.source.local_date, "2024-01-15");
        assert_eq!(result.target.local_date, "2024-01-16");
        assert_eq!(result.target.local_time, "08:15:45");
    }

    #[test]
    fn test_convert_validation() {
        let server = TimeServer::new();

        let err = server.convert_time("12:00", "Invalid/Zone", "UTC").unwrap_err();
        assert!(matches!(err, TimeServerError::InvalidTimezone { ref timezone } if timezone == "Invalid/Zone"));

        let err = server.convert_time("12:00", "UTC", "Invalid/Zone").unwrap_err();
        assert!(matches!(err, TimeServerError::InvalidTimezone { .. }));

        let err = server.convert_time("noon", "UTC", "UTC").unwrap_err();
        assert!(matches!(err, TimeServerError::InvalidTimeFormat { .. }));
    }

    #[test]
    fn test_convert_into_dst_gap() {
        // 2024-03-10 02:30 does not exist in New York
        let server = server_at(2024, 3, 10, 12, 0);
        let err = server
            .convert_time("02:30", "America/New_York", "UTC")
            .unwrap_err();
        assert!(matches!(err, TimeServerError::NonexistentLocalTime { .. }));
    }

    #[test]
    fn test_timezone_info() {
        let server = server_at(2024, 7, 1, 12, 0);

        let info = server.get_timezone_info("America/New_York").unwrap();
        assert_eq!(info.name, "America/New_York");
        assert_eq!(info.abbreviation, "EDT");
        assert_eq!(info.offset, "-04:00");
        assert_eq!(info.offset_seconds, -4 * 3600);
        assert!(info.is_dst);
        assert_eq!(info.dst_offset, 3600);

        let info = server.get_timezone_info("UTC").unwrap();
        assert_eq!(info.offset_seconds, 0);
        assert!(!info.is_dst);
        assert_eq!(info.dst_offset, 0);

        assert!(server.get_timezone_info("Nowhere/Land").is_err());
    }

    #[test]
    fn test_add_one_day_from_now() {
        let server = server_at(2024, 2, 28, 22, 0);
        let result = server.add_time("now", "UTC", 1, "days").unwrap();

        assert_eq!(result.original.local_date, "2024-02-28");
        assert_eq!(result.result.local_date, "2024-02-29");
        assert_eq!(result.result.local_time, result.original.local_time);
        assert_eq!(result.operation, "Added 1 days");
        assert_eq!(result.difference.elapsed_seconds, 86_400);
    }

    #[test]
    fn test_add_months_clamps_to_month_end() {
        let server = TimeServer::new();
        let result = server
            .add_time("2024-01-31T10:00:00", "UTC", 1, "months")
            .unwrap();
        assert_eq!(result.result.local_date, "2024-02-29");
        assert_eq!(result.result.local_time, "10:00:00");
    }

    #[test]
    fn test_subtract_hours_and_years() {
        let server = TimeServer::new();

        let result = server
            .add_time("2024-05-01T01:30:00", "Europe/London", -3, "hours")
            .unwrap();
        assert_eq!(result.result.local_date, "2024-04-30");
        assert_eq!(result.result.local_time, "22:30:00");
        assert_eq!(result.operation, "Subtracted 3 hours");
        assert_eq!(result.difference.elapsed_seconds, -3 * 3600);

        let result = server
            .add_time("2024-02-29", "UTC", -1, "years")
            .unwrap();
        assert_eq!(result.result.local_date, "2023-02-28");
    }

    #[test]
    fn test_add_days_across_dst_keeps_wall_clock() {
        let server = TimeServer::new();
        let result = server
            .add_time("2024-03-09T12:00:00", "America/New_York", 1, "days")
            .unwrap();

        assert_eq!(result.result.local_time, "12:00:00");
        assert_eq!(result.difference.elapsed_seconds, 23 * 3600);
    }

    #[test]
    fn test_add_time_validation_order() {
        let server = TimeServer::new();

        let err = server.add_time("garbage", "Bad/Zone", 1, "eons").unwrap_err();
        assert!(matches!(err, TimeServerError::InvalidTimezone { .. }));

        let err = server.add_time("garbage", "UTC", 1, "eons").unwrap_err();
        assert!(matches!(err, TimeServerError::InvalidDatetime { .. }));

        let err = server.add_time("NOW", "UTC", 1, "eons").unwrap_err();
        assert!(matches!(err, TimeServerError::InvalidUnit { ref unit } if unit == "eons"));
    }

    #[test]
    fn test_add_time_out_of_range() {
        let server = TimeServer::new();
        let err = server
            .add_time("now", "UTC", i64::MAX, "years")
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InternalError);
    }

    #[test]
    fn test_list_common_timezones_filters_by_region() {
        let server = TimeServer::new();

        let europe = server.list_common_timezones(&[Region::Europe]).unwrap();
        assert_eq!(europe.len(), 6);
        assert!(europe.iter().all(|t| t.timezone.starts_with("Europe")));

        let pacific_and_africa = server
            .list_common_timezones(&[Region::Pacific, Region::Africa])
            .unwrap();
        let names: Vec<&str> = pacific_and_africa.iter().map(|t| t.timezone.as_str()).collect();
        assert_eq!(
            names,
            vec!["Africa/Cairo", "Africa/Johannesburg", "Pacific/Auckland", "Pacific/Honolulu"]
        );

        let all = server.list_common_timezones(&[]).unwrap();
        assert_eq!(all.len(), COMMON_TIMEZONES.len());
    }

    #[test]
    fn test_all_timezones_sorted() {
        let server = TimeServer::new();
        let zones = server.all_timezones();

        assert!(zones.len() > 400);
        assert!(zones.windows(2).all(|pair| pair[0] <= pair[1]));
        assert!(zones.contains(&"Europe/London"));
    }
}
