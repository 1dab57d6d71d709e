//! Weather Tool
//!
//! Reports the weather for a location. The backing service is flaky:
//! roughly three calls in ten fail.

use async_trait::async_trait;
use rand::Rng;

use agent_core::{
    Result as CoreResult, Tool, ToolCall, ToolResult, ToolSchema, tool::ParameterSchema,
};

use crate::error::{Result, TravelError};
use crate::simulation::{Simulation, WEATHER_LATENCY, wait};

/// Draw in [1, 10]; anything above 7 is an outage
pub fn service_is_down<R: Rng + ?Sized>(rng: &mut R) -> bool {
    rng.gen_range(1..=10) > 7
}

/// Fixed-format report; the location is echoed verbatim
pub fn weather_report(location: &str) -> String {
    format!("The weather in {location} is cloudy with a high of 15°C.")
}

/// Weather lookup for a location
pub fn lookup_weather<R: Rng + ?Sized>(rng: &mut R, location: &str) -> Result<String> {
    if service_is_down(rng) {
        return Err(TravelError::WeatherServiceUnavailable);
    }
    Ok(weather_report(location))
}

/// Tool for looking up the weather at a destination
#[derive(Default)]
pub struct WeatherTool {
    simulation: Simulation,
}

impl WeatherTool {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn with_simulation(simulation: Simulation) -> Self {
        Self { simulation }
    }
}

#[async_trait]
impl Tool for WeatherTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "get_weather".into(),
            description: "Get the weather for a given location.".into(),
            parameters: vec![ParameterSchema::required_string(
                "location",
                "The location to get the weather for.",
            )],
        }
    }

    async fn execute(&self, call: &ToolCall) -> CoreResult<ToolResult> {
        // presence is checked by the registry; non-string values are echoed as JSON
        let location = call
            .arguments
            .get("location")
            .map(|v| v.as_str().map_or_else(|| v.to_string(), str::to_string))
            .unwrap_or_default();

        let (latency, report) = self
            .simulation
            .draw(|rng| (WEATHER_LATENCY.sample(rng), lookup_weather(rng, &location)))
            .await;

        wait(latency).await;

        Ok(ToolResult::success("get_weather", report?))
    }
}
