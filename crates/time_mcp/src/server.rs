use rmcp::{
    RoleServer, ServerHandler,
    handler::server::{
        router::{prompt::PromptRouter, tool::ToolRouter},
        wrapper::Parameters,
    },
    model::*,
    prompt, prompt_handler, prompt_router,
    service::RequestContext,
    tool, tool_router,
};
use serde_json::json;

use crate::core::provider::TimeServer;
use crate::core::{
    error::{McpResult, TimeServerError},
    models::{
        AddTimeRequest, ConvertTimeRequest, GetCurrentTimeRequest, GetTimezoneInfoRequest,
        ListCommonTimezonesRequest, MeetingSchedulerArgs, TimeZoneComparisonArgs,
    },
    operation::TimeOperation,
    prompts::PromptText,
};

const MIME_JSON: &str = "application/json";
const MIME_TEXT: &str = "text/plain";

/// Time MCP Server with timezone operations
#[derive(Clone)]
pub struct TimeService {
    time_server: TimeServer,
    local_timezone_name: String, // Cache this
    tool_router: ToolRouter<TimeService>,
    prompt_router: PromptRouter<TimeService>,
}

impl TimeService {
    pub fn new(time_server: TimeServer) -> Self {
        let local_timezone_name = time_server.local_timezone.to_string();

        Self {
            time_server,
            local_timezone_name,
            tool_router: Self::tool_router(),
            prompt_router: Self::prompt_router(),
        }
    }

    fn create_resource(&self, uri: &str, name: &str, description: &str, mime_type: &str) -> Resource {
        let mut raw = RawResource::new(uri, name.to_string());
        raw.description = Some(description.to_string());
        raw.mime_type = Some(mime_type.to_string());
        raw.no_annotation()
    }

    pub(crate) fn get_local_timezone_name(&self) -> &str {
        &self.local_timezone_name
    }

    fn run_operation(&self, operation: TimeOperation) -> McpResult<CallToolResult> {
        let payload = self.time_server.execute(operation)?.to_pretty_json()?;
        Ok(CallToolResult::success(vec![Content::text(payload)]))
    }

    /// Resolve and run a tool call by its wire name
    pub(crate) fn call_by_name(
        &self,
        name: &str,
        arguments: Option<JsonObject>,
    ) -> McpResult<CallToolResult> {
        let payload = self.time_server.dispatch(name, arguments)?;
        Ok(CallToolResult::success(vec![Content::text(payload)]))
    }

    fn prompt_result(prompt: PromptText) -> GetPromptResult {
        GetPromptResult {
            description: Some(prompt.description),
            messages: vec![PromptMessage {
                role: PromptMessageRole::User,
                content: PromptMessageContent::text(prompt.text),
            }],
        }
    }

    fn generate_current_content(&self) -> McpResult<String> {
        let current_time = self.time_server.get_current_time("UTC")?;
        Ok(serde_json::to_string_pretty(&current_time).map_err(TimeServerError::from)?)
    }

    fn generate_zones_content(&self) -> McpResult<String> {
        let zones = self.time_server.all_timezones();
        let body = json!({
            "count": zones.len(),
            "timezones": zones,
        });
        Ok(serde_json::to_string_pretty(&body).map_err(TimeServerError::from)?)
    }

    fn generate_help_content(&self) -> String {
        format!(
            r#"Time MCP Server Help

TOOLS:
- get_current_time: Get the current time in a specific timezone
  - timezone: IANA timezone name (default: UTC)
  - Example: {{"timezone": "America/New_York"}}

- convert_time: Convert time from one timezone to another
  - time: Time in HH:mm or HH:mm:ss format (required)
  - from_timezone: Source IANA timezone name (required)
  - to_timezone: Target IANA timezone name (required)
  - time_difference is the target offset minus the source offset
  - Example: {{"time": "14:30", "from_timezone": "America/New_York", "to_timezone": "Europe/London"}}

- get_timezone_info: Get detailed information about a timezone
  - timezone: IANA timezone name (required)

- add_time: Add or subtract time from a given datetime
  - base_time: ISO datetime or "now" (default: now)
  - timezone: IANA timezone name (default: UTC)
  - amount: Positive to add, negative to subtract (required)
  - unit: years, months, weeks, days, hours, minutes, seconds (required)

- list_common_timezones: List common timezones with their current times
  - regions: Any of America, Europe, Asia, Africa, Australia, Pacific (default: all)

PROMPTS:
- time_zone_comparison: Compare current times across a comma-separated zone list
- meeting_scheduler: Current times for participants given as a JSON object name -> timezone

RESOURCES:
- time://current: Current time in UTC (JSON)
- time://zones: Every IANA timezone, sorted (JSON)
- time://help: This help documentation

LOCAL TIMEZONE: {}

TIMEZONE FORMAT:
- Use full IANA names: 'America/New_York', 'Europe/London'
- Avoid abbreviations: 'EST', 'PST' (ambiguous)

DST HANDLING:
- 'is_dst' reports whether daylight saving time is active
- Calendar units in add_time keep the local wall-clock time across DST changes"#,
            self.local_timezone_name
        )
    }
}

impl Default for TimeService {
    fn default() -> Self {
        Self::new(TimeServer::new())
    }
}

#[tool_router]
impl TimeService {
    #[tool(description = "Get the current time in a specific timezone")]
    pub(crate) async fn get_current_time(
        &self,
        Parameters(req): Parameters<GetCurrentTimeRequest>,
    ) -> McpResult<CallToolResult> {
        self.run_operation(TimeOperation::GetCurrentTime(req))
    }

    #[tool(description = "Convert time from one timezone to another")]
    pub(crate) async fn convert_time(
        &self,
        Parameters(req): Parameters<ConvertTimeRequest>,
    ) -> McpResult<CallToolResult> {
        self.run_operation(TimeOperation::ConvertTime(req))
    }

    #[tool(description = "Get detailed information about a timezone")]
    pub(crate) async fn get_timezone_info(
        &self,
        Parameters(req): Parameters<GetTimezoneInfoRequest>,
    ) -> McpResult<CallToolResult> {
        self.run_operation(TimeOperation::GetTimezoneInfo(req))
    }

    #[tool(description = "Add or subtract time from a given datetime")]
    pub(crate) async fn add_time(
        &self,
        Parameters(req): Parameters<AddTimeRequest>,
    ) -> McpResult<CallToolResult> {
        self.run_operation(TimeOperation::AddTime(req))
    }

    #[tool(description = "List common timezones with their current times")]
    pub(crate) async fn list_common_timezones(
        &self,
        Parameters(req): Parameters<ListCommonTimezonesRequest>,
    ) -> McpResult<CallToolResult> {
        self.run_operation(TimeOperation::ListCommonTimezones(req))
    }
}

#[prompt_router]
impl TimeService {
    /// Generate a comparison of times across multiple timezones
    #[prompt(name = "time_zone_comparison")]
    async fn time_zone_comparison(
        &self,
        Parameters(args): Parameters<TimeZoneComparisonArgs>,
        _ctx: RequestContext<RoleServer>,
    ) -> McpResult<GetPromptResult> {
        let prompt = self.time_server.time_zone_comparison(&args)?;
        Ok(Self::prompt_result(prompt))
    }

    /// Help schedule a meeting across multiple timezones
    #[prompt(name = "meeting_scheduler")]
    async fn meeting_scheduler(
        &self,
        Parameters(args): Parameters<MeetingSchedulerArgs>,
        _ctx: RequestContext<RoleServer>,
    ) -> McpResult<GetPromptResult> {
        let prompt = self.time_server.meeting_scheduler(&args)?;
        Ok(Self::prompt_result(prompt))
    }
}

#[prompt_handler]
impl ServerHandler for TimeService {
    fn get_info(&self) -> ServerInfo {
        let local_tz = self.get_local_timezone_name();
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder()
                .enable_prompts()
                .enable_resources()
                .enable_tools()
                .build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(format!(
                "Time MCP Server for timezone operations. Tools: get_current_time, convert_time, get_timezone_info, add_time, list_common_timezones. Local timezone: {}. Use IANA timezone names.",
                local_tz
            )),
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> McpResult<ListToolsResult> {
        Ok(ListToolsResult {
            tools: self.tool_router.list_all(),
            next_cursor: None,
        })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> McpResult<CallToolResult> {
        self.call_by_name(&request.name, request.arguments)
    }

    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _: RequestContext<RoleServer>,
    ) -> McpResult<ListResourcesResult> {
        Ok(ListResourcesResult {
            resources: vec![
                self.create_resource("time://current", "Current Time", "Current time in UTC", MIME_JSON),
                self.create_resource(
                    "time://zones",
                    "Available Timezones",
                    "List of available IANA timezones",
                    MIME_JSON,
                ),
                self.create_resource("time://help", "Help", "Help documentation", MIME_TEXT),
            ],
            next_cursor: None,
        })
    }

    async fn read_resource(
        &self,
        ReadResourceRequestParam { uri }: ReadResourceRequestParam,
        _: RequestContext<RoleServer>,
    ) -> McpResult<ReadResourceResult> {
        let text = match uri.as_str() {
            "time://current" => self.generate_current_content()?,
            "time://zones" => self.generate_zones_content()?,
            "time://help" => self.generate_help_content(),
            _ => {
                return Err(TimeServerError::ResourceNotFound {
                    uri: uri.to_string(),
                }
                .into());
            }
        };

        Ok(ReadResourceResult {
            contents: vec![ResourceContents::text(text, uri)],
        })
    }

    async fn list_resource_templates(
        &self,
        _request: Option<PaginatedRequestParam>,
        _: RequestContext<RoleServer>,
    ) -> McpResult<ListResourceTemplatesResult> {
        Ok(ListResourceTemplatesResult {
            next_cursor: None,
            resource_templates: Vec::new(),
        })
    }

    async fn initialize(
        &self,
        _request: InitializeRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> McpResult<InitializeResult> {
        tracing::info!("Time MCP Server initialized successfully");
        Ok(self.get_info())
    }
}

pub async fn run(time_server: TimeServer) -> Result<(), Box<dyn std::error::Error>> {
    use rmcp::{ServiceExt, transport::stdio};

    let service = TimeService::new(time_server)
        .serve(stdio())
        .await
        .inspect_err(|e| {
            tracing::error!("serving error: {:?}", e);
        })?;

    service.waiting().await?;
    Ok(())
}
