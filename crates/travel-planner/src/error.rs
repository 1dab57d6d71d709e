//! Error Types for Travel Planner

use agent_core::AgentError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, TravelError>;

#[derive(Error, Debug)]
pub enum TravelError {
    #[error("Weather service is currently unavailable. Please try again later.")]
    WeatherServiceUnavailable,
}

impl From<TravelError> for AgentError {
    fn from(err: TravelError) -> Self {
        AgentError::ToolExecution(err.to_string())
    }
}
