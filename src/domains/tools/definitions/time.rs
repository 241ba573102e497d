//! Current time tool definition.

use chrono::{DateTime, Local};
use tracing::instrument;

use crate::domains::tools::handlers::{Arguments, ToolHandler, ToolResult, text_arg};
use crate::domains::tools::schema::{InputSchema, ParamSchema, ParamType, ToolDefinition};
use crate::domains::tools::ToolError;

/// Label used when the caller does not name a timezone.
pub const DEFAULT_TIMEZONE: &str = "UTC";

/// Current time tool - reports the server's local wall-clock time.
///
/// The `timezone` argument is echoed back as a label only; no conversion is
/// performed.
pub struct CurrentTimeTool;

impl CurrentTimeTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "get_current_time";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Get the current date and time";

    pub fn definition() -> ToolDefinition {
        ToolDefinition::new(
            Self::NAME,
            Self::DESCRIPTION,
            InputSchema::new().param(
                ParamSchema::optional("timezone", ParamType::String)
                    .describe("Timezone (optional, defaults to UTC)"),
            ),
        )
    }

    /// Render the time line for a given instant.
    pub fn render(now: DateTime<Local>, timezone: &str) -> String {
        format!(
            "Current time ({timezone}): {}",
            now.format("%Y-%m-%d %H:%M:%S")
        )
    }
}

impl ToolHandler for CurrentTimeTool {
    #[instrument(name = "get_current_time", skip_all)]
    fn call(&self, arguments: &Arguments) -> Result<ToolResult, ToolError> {
        let timezone =
            text_arg(arguments, "timezone").unwrap_or_else(|| DEFAULT_TIMEZONE.to_string());
        Ok(ToolResult::text(Self::render(Local::now(), &timezone)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_render_format() {
        let at = Local.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).unwrap();
        assert_eq!(
            CurrentTimeTool::render(at, "Europe/Paris"),
            "Current time (Europe/Paris): 2024-03-09 07:05:01"
        );
    }

    #[test]
    fn test_default_label_is_utc() {
        let result = CurrentTimeTool.call(&Arguments::new()).unwrap();
        let text = result.first_text().unwrap();
        assert!(text.starts_with("Current time (UTC): "));
        // "YYYY-MM-DD HH:MM:SS"
        assert_eq!(text.len(), "Current time (UTC): ".len() + 19);
    }

    #[test]
    fn test_label_is_echoed_verbatim() {
        let args = json!({ "timezone": "Asia/Tokyo" });
        let result = CurrentTimeTool.call(args.as_object().unwrap()).unwrap();
        assert!(result.first_text().unwrap().starts_with("Current time (Asia/Tokyo): "));
    }
}
