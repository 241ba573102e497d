//! Weather tool definition (mock data, no network access).

use tracing::instrument;

use crate::domains::tools::handlers::{Arguments, ToolHandler, ToolResult, text_arg};
use crate::domains::tools::schema::{InputSchema, ParamSchema, ParamType, ToolDefinition};
use crate::domains::tools::ToolError;

/// Canned observation returned for every location.
#[derive(Debug, Clone, Copy)]
pub struct MockWeather {
    pub temperature: &'static str,
    pub condition: &'static str,
    pub humidity: &'static str,
    pub wind: &'static str,
}

pub const MOCK_WEATHER: MockWeather = MockWeather {
    temperature: "22°C",
    condition: "Partly cloudy",
    humidity: "65%",
    wind: "10 km/h",
};

/// Weather tool - returns constant mock weather for a city.
pub struct WeatherTool;

impl WeatherTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "weather_info";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Get weather information for a city";

    pub fn definition() -> ToolDefinition {
        ToolDefinition::new(
            Self::NAME,
            Self::DESCRIPTION,
            InputSchema::new()
                .param(
                    ParamSchema::required("city", ParamType::String)
                        .describe("City name to get weather for"),
                )
                .param(
                    ParamSchema::optional("country", ParamType::String)
                        .describe("Country code (optional)"),
                ),
        )
    }

    /// Location line label: `City, Country` or just `City`.
    pub fn location(city: &str, country: Option<&str>) -> String {
        match country {
            Some(country) if !country.is_empty() => format!("{city}, {country}"),
            _ => city.to_string(),
        }
    }

    pub fn report(location: &str, weather: &MockWeather) -> String {
        format!(
            "Weather in {location}:\n\
             Temperature: {}\n\
             Condition: {}\n\
             Humidity: {}\n\
             Wind: {}",
            weather.temperature, weather.condition, weather.humidity, weather.wind
        )
    }
}

impl ToolHandler for WeatherTool {
    #[instrument(name = "weather_info", skip_all)]
    fn call(&self, arguments: &Arguments) -> Result<ToolResult, ToolError> {
        // Lenient like the numeric tools: a missing city is reported as "Unknown".
        let city = text_arg(arguments, "city").unwrap_or_else(|| "Unknown".to_string());
        let country = text_arg(arguments, "country");
        let location = Self::location(&city, country.as_deref());
        Ok(ToolResult::text(Self::report(&location, &MOCK_WEATHER)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn run(args: serde_json::Value) -> String {
        WeatherTool
            .call(args.as_object().unwrap())
            .unwrap()
            .first_text()
            .unwrap()
            .to_string()
    }

    #[test]
    fn test_report_layout() {
        assert_eq!(
            run(json!({ "city": "Paris", "country": "FR" })),
            "Weather in Paris, FR:\nTemperature: 22°C\nCondition: Partly cloudy\nHumidity: 65%\nWind: 10 km/h"
        );
    }

    #[test]
    fn test_only_location_line_differs() {
        let paris = run(json!({ "city": "Paris" }));
        let tokyo = run(json!({ "city": "Tokyo" }));

        let (paris_head, paris_rest) = paris.split_once('\n').unwrap();
        let (tokyo_head, tokyo_rest) = tokyo.split_once('\n').unwrap();
        assert_eq!(paris_head, "Weather in Paris:");
        assert_eq!(tokyo_head, "Weather in Tokyo:");
        assert_eq!(paris_rest, tokyo_rest);
    }

    #[test]
    fn test_empty_country_is_ignored() {
        assert!(run(json!({ "city": "Oslo", "country": "" })).starts_with("Weather in Oslo:\n"));
    }

    #[test]
    fn test_missing_city() {
        assert!(run(json!({})).starts_with("Weather in Unknown:\n"));
    }
}
