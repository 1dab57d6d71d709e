//! Service Kit - Agent Tools
//!
//! Simulated travel services that implement `agent_core::Tool` for the
//! vacation planner.

pub mod datetime;
pub mod random_destination;
pub mod weather;

pub use datetime::{DATETIME_FORMAT, DateTimeTool};
pub use random_destination::{DESTINATIONS, RandomDestinationTool};
pub use weather::WeatherTool;
