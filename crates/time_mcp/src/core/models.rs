use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Offset, TimeZone};
use chrono_tz::{OffsetComponents, Tz};
use rmcp::schemars;
use serde::{Deserialize, Deserializer, Serialize};

use crate::core::error::TimeServerError;
use crate::core::utils::{
    ABBREVIATION_FORMAT, DATETIME_FORMAT, DAY_FORMAT, LOCAL_DATE_FORMAT, LOCAL_TIME_FORMAT,
    OFFSET_FORMAT, UTC_DATETIME_FORMAT,
};

/// Helper function to deserialize and trim strings
fn deserialize_trimmed_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    Ok(s.trim().to_string())
}

fn default_timezone() -> String {
    "UTC".to_string()
}

fn default_base_time() -> String {
    "now".to_string()
}

fn is_dst<Z>(dt: &DateTime<Z>) -> bool
where
    Z: TimeZone,
    Z::Offset: OffsetComponents,
{
    dt.offset().dst_offset().num_seconds() != 0
}

/// Current time in a timezone
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct TimeResult {
    /// IANA timezone name
    pub timezone: String,
    /// ISO 8601 local datetime with offset
    pub datetime: String,
    /// ISO 8601 datetime in UTC
    pub utc_datetime: String,
    /// Local wall-clock time (HH:mm:ss)
    pub local_time: String,
    /// Local calendar date (yyyy-MM-dd)
    pub local_date: String,
    /// Day of the week
    pub day_of_week: String,
    /// Whether daylight saving time is active
    pub is_dst: bool,
    /// UTC offset (+HH:MM)
    pub offset: String,
    /// Seconds since the Unix epoch
    pub unix_timestamp: i64,
}

impl TimeResult {
    /// Create a TimeResult from a timezone-aware datetime
    pub fn from_datetime<Z>(dt: &DateTime<Z>, timezone_name: &str) -> TimeResult
    where
        Z: TimeZone,
        Z::Offset: OffsetComponents + fmt::Display,
    {
        TimeResult {
            timezone: timezone_name.to_string(),
            datetime: dt.format(DATETIME_FORMAT).to_string(),
            utc_datetime: dt.to_utc().format(UTC_DATETIME_FORMAT).to_string(),
            local_time: dt.format(LOCAL_TIME_FORMAT).to_string(),
            local_date: dt.format(LOCAL_DATE_FORMAT).to_string(),
            day_of_week: dt.format(DAY_FORMAT).to_string(),
            is_dst: is_dst(dt),
            offset: dt.format(OFFSET_FORMAT).to_string(),
            unix_timestamp: dt.timestamp(),
        }
    }
}

/// One side of a time conversion
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct ConvertedTime {
    pub timezone: String,
    pub datetime: String,
    pub local_time: String,
    pub local_date: String,
    pub offset: String,
    pub is_dst: bool,
}

impl ConvertedTime {
    pub fn from_datetime(dt: &DateTime<Tz>, timezone_name: &str) -> Self {
        Self {
            timezone: timezone_name.to_string(),
            datetime: dt.format(DATETIME_FORMAT).to_string(),
            local_time: dt.format(LOCAL_TIME_FORMAT).to_string(),
            local_date: dt.format(LOCAL_DATE_FORMAT).to_string(),
            offset: dt.format(OFFSET_FORMAT).to_string(),
            is_dst: is_dst(dt),
        }
    }
}

/// Time conversion result with source and target information
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct TimeConversionResult {
    /// Source time information
    pub source: ConvertedTime,
    /// Target time information
    pub target: ConvertedTime,
    /// Target offset minus source offset, formatted (e.g. "+5.5h")
    pub time_difference: String,
    /// Target offset minus source offset in hours
    pub hours_difference: f64,
}

/// Static and current offset information for a timezone
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct TimezoneInfoResult {
    /// Timezone name as requested
    pub timezone: String,
    /// Canonical database name
    pub name: String,
    /// Current abbreviation (e.g. "CET", "EDT")
    pub abbreviation: String,
    /// Current UTC offset (+HH:MM)
    pub offset: String,
    /// Current UTC offset in seconds
    pub offset_seconds: i32,
    /// Whether daylight saving time is active
    pub is_dst: bool,
    /// Daylight saving adjustment currently applied, in seconds
    pub dst_offset: i64,
}

impl TimezoneInfoResult {
    pub fn from_datetime(dt: &DateTime<Tz>, timezone_name: &str) -> Self {
        Self {
            timezone: timezone_name.to_string(),
            name: dt.timezone().name().to_string(),
            abbreviation: dt.format(ABBREVIATION_FORMAT).to_string(),
            offset: dt.format(OFFSET_FORMAT).to_string(),
            offset_seconds: dt.offset().fix().local_minus_utc(),
            is_dst: is_dst(dt),
            dst_offset: dt.offset().dst_offset().num_seconds(),
        }
    }
}

/// Date and time snapshot used by `add_time`
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct DateTimeSnapshot {
    pub datetime: String,
    pub local_time: String,
    pub local_date: String,
}

impl DateTimeSnapshot {
    pub fn from_datetime(dt: &DateTime<Tz>) -> Self {
        Self {
            datetime: dt.format(DATETIME_FORMAT).to_string(),
            local_time: dt.format(LOCAL_TIME_FORMAT).to_string(),
            local_date: dt.format(LOCAL_DATE_FORMAT).to_string(),
        }
    }
}

/// Difference between the original and the resulting instant
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct TimeDifference {
    pub unit: TimeUnit,
    pub amount: i64,
    /// Actual elapsed seconds, which differ from the nominal amount across DST changes
    pub elapsed_seconds: i64,
}

/// Result of adding or subtracting time
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct TimeArithmeticResult {
    pub original: DateTimeSnapshot,
    pub result: DateTimeSnapshot,
    /// Human readable description, e.g. "Added 3 days"
    pub operation: String,
    pub difference: TimeDifference,
}

/// Unit accepted by `add_time`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    Years,
    Months,
    Weeks,
    Days,
    Hours,
    Minutes,
    Seconds,
}

impl TimeUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeUnit::Years => "years",
            TimeUnit::Months => "months",
            TimeUnit::Weeks => "weeks",
            TimeUnit::Days => "days",
            TimeUnit::Hours => "hours",
            TimeUnit::Minutes => "minutes",
            TimeUnit::Seconds => "seconds",
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeUnit {
    type Err = TimeServerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "years" => Ok(TimeUnit::Years),
            "months" => Ok(TimeUnit::Months),
            "weeks" => Ok(TimeUnit::Weeks),
            "days" => Ok(TimeUnit::Days),
            "hours" => Ok(TimeUnit::Hours),
            "minutes" => Ok(TimeUnit::Minutes),
            "seconds" => Ok(TimeUnit::Seconds),
            other => Err(TimeServerError::InvalidUnit {
                unit: other.to_string(),
            }),
        }
    }
}

/// Region filter for `list_common_timezones`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
pub enum Region {
    America,
    Europe,
    Asia,
    Africa,
    Australia,
    Pacific,
}

impl Region {
    pub const ALL: [Region; 6] = [
        Region::America,
        Region::Europe,
        Region::Asia,
        Region::Africa,
        Region::Australia,
        Region::Pacific,
    ];

    /// Zone name prefix for this region
    pub fn prefix(&self) -> &'static str {
        match self {
            Region::America => "America",
            Region::Europe => "Europe",
            Region::Asia => "Asia",
            Region::Africa => "Africa",
            Region::Australia => "Australia",
            Region::Pacific => "Pacific",
        }
    }
}

/// Request to get current time in a timezone
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetCurrentTimeRequest {
    /// IANA timezone name (e.g., 'America/New_York', 'Europe/London', 'UTC')
    #[serde(
        default = "default_timezone",
        deserialize_with = "deserialize_trimmed_string"
    )]
    pub timezone: String,
}

/// Request to convert time between timezones
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ConvertTimeRequest {
    /// Time in HH:mm or HH:mm:ss format
    #[serde(deserialize_with = "deserialize_trimmed_string")]
    pub time: String,
    /// Source IANA timezone name
    #[serde(deserialize_with = "deserialize_trimmed_string")]
    pub from_timezone: String,
    /// Target IANA timezone name
    #[serde(deserialize_with = "deserialize_trimmed_string")]
    pub to_timezone: String,
}

/// Request for detailed timezone information
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetTimezoneInfoRequest {
    /// IANA timezone name
    #[serde(deserialize_with = "deserialize_trimmed_string")]
    pub timezone: String,
}

/// Request to add or subtract time from a datetime
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct AddTimeRequest {
    /// Base time in ISO format or "now" for current time
    #[serde(
        default = "default_base_time",
        deserialize_with = "deserialize_trimmed_string"
    )]
    pub base_time: String,
    /// IANA timezone name
    #[serde(
        default = "default_timezone",
        deserialize_with = "deserialize_trimmed_string"
    )]
    pub timezone: String,
    /// Amount to add (positive) or subtract (negative)
    pub amount: i64,
    /// Time unit: years, months, weeks, days, hours, minutes, seconds
    #[serde(deserialize_with = "deserialize_trimmed_string")]
    pub unit: String,
}

/// Request to list common timezones with their current times
#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct ListCommonTimezonesRequest {
    /// Regions to include (default: all)
    #[serde(default)]
    pub regions: Option<Vec<Region>>,
}

/// Arguments for the time zone comparison prompt
#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct TimeZoneComparisonArgs {
    /// Comma-separated list of IANA timezone names
    pub timezones: String,
    /// Reference time in HH:mm format, interpreted in the first timezone
    #[serde(default)]
    pub reference_time: Option<String>,
}

/// Arguments for the meeting scheduler prompt
#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct MeetingSchedulerArgs {
    /// JSON object with participant names as keys and their timezones as values
    pub participants: String,
    /// Preferred time range in format "HH:mm-HH:mm"
    #[serde(default)]
    pub preferred_time_range: Option<String>,
}
