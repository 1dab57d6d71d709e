//! Random Destination Tool
//!
//! Picks a vacation destination from a fixed list.

use async_trait::async_trait;
use rand::Rng;
use rand::seq::SliceRandom;

use agent_core::{Result as CoreResult, Tool, ToolCall, ToolResult, ToolSchema};

use crate::simulation::{DESTINATION_LATENCY, Simulation, wait};

/// Popular vacation destinations around the world
pub const DESTINATIONS: [&str; 12] = [
    "Garmisch-Partenkirchen, Germany",
    "Munich, Germany",
    "Barcelona, Spain",
    "Paris, France",
    "Berlin, Germany",
    "Tokyo, Japan",
    "Sydney, Australia",
    "New York, USA",
    "Cairo, Egypt",
    "Cape Town, South Africa",
    "Rio de Janeiro, Brazil",
    "Bali, Indonesia",
];

/// Uniform pick from [`DESTINATIONS`]
pub fn pick_destination<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    DESTINATIONS.choose(rng).copied().unwrap_or(DESTINATIONS[0])
}

/// Tool that suggests a random vacation destination
#[derive(Default)]
pub struct RandomDestinationTool {
    simulation: Simulation,
}

impl RandomDestinationTool {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn with_simulation(simulation: Simulation) -> Self {
        Self { simulation }
    }
}

#[async_trait]
impl Tool for RandomDestinationTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "get_random_destination".into(),
            description: "Get a random vacation destination.".into(),
            parameters: Vec::new(),
        }
    }

    async fn execute(&self, _call: &ToolCall) -> CoreResult<ToolResult> {
        let (latency, destination) = self
            .simulation
            .draw(|rng| (DESTINATION_LATENCY.sample(rng), pick_destination(rng)))
            .await;

        wait(latency).await;

        tracing::debug!(destination, "Picked destination");
        Ok(ToolResult::success("get_random_destination", destination))
    }
}
