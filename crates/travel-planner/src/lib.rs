//! # travel-planner
//!
//! Simulated travel services for a vacation planning agent.
//!
//! The tools behave like unreliable remote calls so the agent's tool
//! selection and multi-tool rounds can be exercised end to end:
//!
//! ```text
//! ┌──────────────────────────┬──────────────────┬───────────────────┐
//! │ tool                     │ latency          │ failure           │
//! ├──────────────────────────┼──────────────────┼───────────────────┤
//! │ get_random_destination   │ U[0.00, 0.99) s  │ never             │
//! │ get_weather(location)    │ U[0.30, 3.70) s  │ 30% (draw > 7/10) │
//! │ get_datetime             │ U[0.10, 5.00) s  │ never             │
//! └──────────────────────────┴──────────────────┴───────────────────┘
//! ```

pub mod error;
pub mod simulation;
pub mod svckit;

pub use error::{Result, TravelError};
pub use simulation::Simulation;

/// Re-export tools for easy registration
pub mod tools {
    pub use crate::svckit::{DateTimeTool, RandomDestinationTool, WeatherTool};
}

/// Instructions for the vacation planning agent
pub const TRAVEL_AGENT_INSTRUCTIONS: &str =
    "You are a helpful AI Agent that can help plan vacations for customers at random destinations.";
