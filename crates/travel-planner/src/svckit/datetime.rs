//! DateTime Tool
//!
//! Returns the current local date and time.

use async_trait::async_trait;
use chrono::Local;

use agent_core::{Result as CoreResult, Tool, ToolCall, ToolResult, ToolSchema};

use crate::simulation::{DATETIME_LATENCY, Simulation, wait};

/// `YYYY-MM-DD HH:MM:SS`, local time, no offset
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Tool that reports the current date and time
#[derive(Default)]
pub struct DateTimeTool {
    simulation: Simulation,
}

impl DateTimeTool {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn with_simulation(simulation: Simulation) -> Self {
        Self { simulation }
    }
}

#[async_trait]
impl Tool for DateTimeTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "get_datetime".into(),
            description: "Return the current date and time as an ISO-like string.".into(),
            parameters: Vec::new(),
        }
    }

    async fn execute(&self, _call: &ToolCall) -> CoreResult<ToolResult> {
        let latency = self.simulation.draw(|rng| DATETIME_LATENCY.sample(rng)).await;
        wait(latency).await;

        let now = Local::now().format(DATETIME_FORMAT).to_string();
        Ok(ToolResult::success("get_datetime", now))
    }
}
