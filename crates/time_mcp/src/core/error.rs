use rmcp::ErrorData as McpError;
use rmcp::model::ErrorCode;
use rmcp::serde_json::json;

use crate::core::utils::{AVAILABLE_RESOURCES, VALID_UNITS};

// Error codes
const ERROR_INVALID_TIMEZONE: &str = "invalid_timezone";
const ERROR_INVALID_TIME_FORMAT: &str = "invalid_time_format";
const ERROR_NONEXISTENT_LOCAL_TIME: &str = "nonexistent_local_time";
const ERROR_INVALID_DATETIME: &str = "invalid_datetime";
const ERROR_INVALID_UNIT: &str = "invalid_unit";
const ERROR_INVALID_ARGUMENTS: &str = "invalid_arguments";
const ERROR_RESOURCE_NOT_FOUND: &str = "resource_not_found";

/// Coarse classification used by the transport layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidParameter,
    MethodNotFound,
    NotFound,
    InternalError,
}

/// Custom error types for better error handling
#[derive(Debug, thiserror::Error)]
pub enum TimeServerError {
    #[error("Invalid timezone: {timezone}")]
    InvalidTimezone { timezone: String },
    #[error("Invalid time format: {time}. Use HH:mm or HH:mm:ss")]
    InvalidTimeFormat { time: String },
    #[error("Local time {time} does not exist in {timezone} today (DST transition)")]
    NonexistentLocalTime { time: String, timezone: String },
    #[error("Invalid datetime: {datetime}")]
    InvalidDatetime { datetime: String },
    #[error("Invalid unit: {unit}. Valid units: years, months, weeks, days, hours, minutes, seconds")]
    InvalidUnit { unit: String },
    #[error("Invalid arguments for {operation}: {message}")]
    InvalidArguments { operation: String, message: String },
    #[error("Unknown tool: {name}")]
    MethodNotFound { name: String },
    #[error("Resource not found: {uri}")]
    ResourceNotFound { uri: String },
    #[error("Date out of range: {amount} {unit} from {datetime}")]
    DateOutOfRange {
        datetime: String,
        amount: i64,
        unit: String,
    },
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl TimeServerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidTimezone { .. }
            | Self::InvalidTimeFormat { .. }
            | Self::NonexistentLocalTime { .. }
            | Self::InvalidDatetime { .. }
            | Self::InvalidUnit { .. }
            | Self::InvalidArguments { .. } => ErrorKind::InvalidParameter,
            Self::MethodNotFound { .. } => ErrorKind::MethodNotFound,
            Self::ResourceNotFound { .. } => ErrorKind::NotFound,
            Self::DateOutOfRange { .. } | Self::Internal { .. } => ErrorKind::InternalError,
        }
    }
}

impl From<serde_json::Error> for TimeServerError {
    fn from(err: serde_json::Error) -> Self {
        TimeServerError::Internal {
            message: err.to_string(),
        }
    }
}

impl From<TimeServerError> for McpError {
    fn from(err: TimeServerError) -> Self {
        let message = err.to_string();
        match err {
            TimeServerError::InvalidTimezone { timezone } => McpError::invalid_params(
                ERROR_INVALID_TIMEZONE,
                Some(json!({"timezone": timezone, "message": message})),
            ),
            TimeServerError::InvalidTimeFormat { time } => McpError::invalid_params(
                ERROR_INVALID_TIME_FORMAT,
                Some(json!({"time": time, "expected": ["HH:mm", "HH:mm:ss"]})),
            ),
            TimeServerError::NonexistentLocalTime { time, timezone } => McpError::invalid_params(
                ERROR_NONEXISTENT_LOCAL_TIME,
                Some(json!({"time": time, "timezone": timezone})),
            ),
            TimeServerError::InvalidDatetime { datetime } => McpError::invalid_params(
                ERROR_INVALID_DATETIME,
                Some(json!({"datetime": datetime})),
            ),
            TimeServerError::InvalidUnit { unit } => McpError::invalid_params(
                ERROR_INVALID_UNIT,
                Some(json!({"unit": unit, "valid_units": VALID_UNITS})),
            ),
            TimeServerError::InvalidArguments {
                operation,
                message: detail,
            } => McpError::invalid_params(
                ERROR_INVALID_ARGUMENTS,
                Some(json!({"operation": operation, "message": detail})),
            ),
            TimeServerError::MethodNotFound { name } => McpError::new(
                ErrorCode::METHOD_NOT_FOUND,
                message,
                Some(json!({"name": name})),
            ),
            TimeServerError::ResourceNotFound { uri } => McpError::resource_not_found(
                ERROR_RESOURCE_NOT_FOUND,
                Some(json!({
                    "uri": uri,
                    "available_resources": AVAILABLE_RESOURCES
                })),
            ),
            TimeServerError::DateOutOfRange { .. } | TimeServerError::Internal { .. } => {
                McpError::internal_error(message, None)
            }
        }
    }
}

pub type TimeServerResult<T> = Result<T, TimeServerError>;
pub type McpResult<T> = Result<T, McpError>;
