//! Typed dispatch over the fixed tool catalog.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value, json};

use crate::core::{
    error::{TimeServerError, TimeServerResult},
    models::{
        AddTimeRequest, ConvertTimeRequest, GetCurrentTimeRequest, GetTimezoneInfoRequest,
        ListCommonTimezonesRequest, TimeArithmeticResult, TimeConversionResult, TimeResult,
        TimezoneInfoResult,
    },
    provider::TimeServer,
};

pub const GET_CURRENT_TIME: &str = "get_current_time";
pub const CONVERT_TIME: &str = "convert_time";
pub const GET_TIMEZONE_INFO: &str = "get_timezone_info";
pub const ADD_TIME: &str = "add_time";
pub const LIST_COMMON_TIMEZONES: &str = "list_common_timezones";

/// One variant per tool, carrying its parsed arguments
#[derive(Debug)]
pub enum TimeOperation {
    GetCurrentTime(GetCurrentTimeRequest),
    ConvertTime(ConvertTimeRequest),
    GetTimezoneInfo(GetTimezoneInfoRequest),
    AddTime(AddTimeRequest),
    ListCommonTimezones(ListCommonTimezonesRequest),
}

/// Result of a [`TimeOperation`], serialized as the tool's JSON payload
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum TimeResponse {
    CurrentTime(TimeResult),
    Conversion(TimeConversionResult),
    TimezoneInfo(TimezoneInfoResult),
    Arithmetic(TimeArithmeticResult),
    Timezones(Vec<TimeResult>),
}

impl TimeResponse {
    pub fn to_pretty_json(&self) -> TimeServerResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn parse_arguments<T: DeserializeOwned>(
    operation: &str,
    arguments: Option<Map<String, Value>>,
) -> TimeServerResult<T> {
    let arguments = Value::Object(arguments.unwrap_or_default());
    serde_json::from_value(arguments).map_err(|e| TimeServerError::InvalidArguments {
        operation: operation.to_string(),
        message: e.to_string(),
    })
}

impl TimeOperation {
    /// Resolve a tool call by name and argument bag
    pub fn from_call(name: &str, arguments: Option<Map<String, Value>>) -> TimeServerResult<Self> {
        match name {
            GET_CURRENT_TIME => parse_arguments(name, arguments).map(Self::GetCurrentTime),
            CONVERT_TIME => parse_arguments(name, arguments).map(Self::ConvertTime),
            GET_TIMEZONE_INFO => parse_arguments(name, arguments).map(Self::GetTimezoneInfo),
            ADD_TIME => parse_arguments(name, arguments).map(Self::AddTime),
            LIST_COMMON_TIMEZONES => {
                parse_arguments(name, arguments).map(Self::ListCommonTimezones)
            }
            _ => Err(TimeServerError::MethodNotFound {
                name: name.to_string(),
            }),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::GetCurrentTime(_) => GET_CURRENT_TIME,
            Self::ConvertTime(_) => CONVERT_TIME,
            Self::GetTimezoneInfo(_) => GET_TIMEZONE_INFO,
            Self::AddTime(_) => ADD_TIME,
            Self::ListCommonTimezones(_) => LIST_COMMON_TIMEZONES,
        }
    }
}

impl TimeServer {
    pub fn execute(&self, operation: TimeOperation) -> TimeServerResult<TimeResponse> {
        let name = operation.name();
        self.logger()
            .info("Received tool call", Some(&json!({"name": name})));

        let result = match operation {
            TimeOperation::GetCurrentTime(req) => {
                self.get_current_time(&req.timezone).map(TimeResponse::CurrentTime)
            }
            TimeOperation::ConvertTime(req) => self
                .convert_time(&req.time, &req.from_timezone, &req.to_timezone)
                .map(TimeResponse::Conversion),
            TimeOperation::GetTimezoneInfo(req) => self
                .get_timezone_info(&req.timezone)
                .map(TimeResponse::TimezoneInfo),
            TimeOperation::AddTime(req) => self
                .add_time(&req.base_time, &req.timezone, req.amount, &req.unit)
                .map(TimeResponse::Arithmetic),
            TimeOperation::ListCommonTimezones(req) => self
                .list_common_timezones(req.regions.as_deref().unwrap_or_default())
                .map(TimeResponse::Timezones),
        };

        result.inspect_err(|e| {
            self.logger().error(
                "Error in tool execution",
                Some(&json!({"name": name, "error": e.to_string()})),
            );
        })
    }

    /// Single entry point: resolve `name`, run it, render the JSON payload
    pub fn dispatch(
        &self,
        name: &str,
        arguments: Option<Map<String, Value>>,
    ) -> TimeServerResult<String> {
        let operation = TimeOperation::from_call(name, arguments).inspect_err(|e| {
            self.logger().error(
                "Rejected tool call",
                Some(&json!({"name": name, "error": e.to_string()})),
            );
        })?;
        self.execute(operation)?.to_pretty_json()
    }
}
