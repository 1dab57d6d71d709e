//! Trip Planning Driver
//!
//! Composes the travel tools, the chat client and the agent, then asks for
//! one travel plan and prints it.

use std::io::Write;
use std::sync::Arc;

use agent_core::{Agent, AgentBuilder, AgentError, LlmProvider, ToolRegistry};
use travel_planner::TRAVEL_AGENT_INSTRUCTIONS;
use travel_planner::tools::{DateTimeTool, RandomDestinationTool, WeatherTool};

use crate::config::AppConfig;

/// The one request this driver issues
pub const TRIP_PROMPT: &str = "Plan me a day trip with activities and calculate the current \
weather at the destination. Mention the current date and time of the plan.";

/// Registry with the three travel tools
pub fn travel_tools() -> agent_core::Result<ToolRegistry> {
    let mut tools = ToolRegistry::new();
    tools.register(RandomDestinationTool::new())?;
    tools.register(WeatherTool::new())?;
    tools.register(DateTimeTool::new())?;
    Ok(tools)
}

/// Travel planning agent over the given provider
pub fn build_agent(
    provider: Arc<dyn LlmProvider>,
    config: &AppConfig,
) -> agent_core::Result<Agent> {
    AgentBuilder::new()
        .provider(provider)
        .instructions(TRAVEL_AGENT_INSTRUCTIONS)
        .model(&config.model_id)
        .tools(travel_tools()?)
        .build()
}

/// Run the trip prompt and write the plan to `out`
pub async fn plan_trip<W: Write>(agent: &Agent, out: &mut W) -> anyhow::Result<()> {
    let response = agent.run(TRIP_PROMPT).await?;

    if let Some(usage) = response.usage {
        tracing::info!(
            messages = response.messages.len(),
            total_tokens = usage.total_tokens,
            "Agent finished"
        );
    }

    let text = response.final_text().ok_or(AgentError::EmptyResponse)?;

    writeln!(out, "🏖️ Travel plan:")?;
    writeln!(out, "{text}")?;
    Ok(())
}
