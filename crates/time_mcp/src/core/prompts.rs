//! Text composition for the comparison and scheduling prompts.

use serde_json::{Map, Value, json};

use crate::core::{
    error::{TimeServerError, TimeServerResult},
    models::{MeetingSchedulerArgs, TimeZoneComparisonArgs},
    provider::TimeServer,
};

pub const TIME_ZONE_COMPARISON: &str = "time_zone_comparison";
pub const MEETING_SCHEDULER: &str = "meeting_scheduler";

/// Rendered prompt: a description plus the user message text
#[derive(Debug, Clone)]
pub struct PromptText {
    pub description: String,
    pub text: String,
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "Yes" } else { "No" }
}

impl TimeServer {
    pub fn time_zone_comparison(&self, args: &TimeZoneComparisonArgs) -> TimeServerResult<PromptText> {
        let zones: Vec<&str> = args
            .timezones
            .split(',')
            .map(str::trim)
            .filter(|tz| !tz.is_empty())
            .collect();

        let reference = match (args.reference_time.as_deref(), zones.first()) {
            (Some(time), Some(first)) => Some((time, *first)),
            _ => None,
        };

        let mut sections = Vec::with_capacity(zones.len());
        for zone in &zones {
            let data = self.get_current_time(zone)?;
            let mut section = format!(
                "**{}**\n- Current time: {}\n- Date: {}\n- Day: {}\n- UTC offset: {}\n- DST: {}\n",
                data.timezone,
                data.local_time,
                data.local_date,
                data.day_of_week,
                data.offset,
                yes_no(data.is_dst)
            );
            if let Some((time, first)) = reference {
                let converted = self.convert_time(time, first, zone)?;
                section.push_str(&format!(
                    "- {} in {}: {} ({})\n",
                    time, first, converted.target.local_time, converted.target.local_date
                ));
            }
            sections.push(section);
        }

        let text = format!(
            "Here's a comparison of times across the specified timezones:\n\n{}\nThis information can help you coordinate activities across different time zones.",
            sections.join("\n")
        );

        Ok(PromptText {
            description: format!("Time zone comparison for: {}", args.timezones),
            text,
        })
    }

    pub fn meeting_scheduler(&self, args: &MeetingSchedulerArgs) -> TimeServerResult<PromptText> {
        let participants: Map<String, Value> =
            serde_json::from_str(&args.participants).map_err(|_| {
                TimeServerError::InvalidArguments {
                    operation: MEETING_SCHEDULER.to_string(),
                    message: "Invalid JSON format for participants".to_string(),
                }
            })?;

        let mut sections = Vec::with_capacity(participants.len());
        for (name, zone) in &participants {
            let zone = zone.as_str().ok_or_else(|| TimeServerError::InvalidArguments {
                operation: MEETING_SCHEDULER.to_string(),
                message: format!("Timezone for participant '{}' must be a string", name),
            })?;
            let data = self.get_current_time(zone)?;
            sections.push(format!(
                "**{}** ({})\n- Current time: {}\n- Date: {}\n- UTC offset: {}\n",
                name, zone, data.local_time, data.local_date, data.offset
            ));
        }

        self.logger().info(
            "Prepared meeting scheduler prompt",
            Some(&json!({"participants": participants.len()})),
        );

        let preference = args
            .preferred_time_range
            .as_deref()
            .map(|range| format!("Preferred time range: {}\n\n", range))
            .unwrap_or_default();

        let text = format!(
            "Meeting scheduling information for participants:\n\n{}\n{}Please suggest optimal meeting times that work for all participants, considering their time zones and any specified preferences.",
            sections.join("\n"),
            preference
        );

        Ok(PromptText {
            description: format!("Meeting scheduler for {} participants", participants.len()),
            text,
        })
    }
}
