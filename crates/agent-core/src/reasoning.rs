//! Reasoning Loop
//!
//! Implements the tool-calling loop for agent behavior. The agent sends the
//! conversation and the tool schemas to the provider, runs whatever tools the
//! model asks for, feeds the results back and repeats until the model answers
//! without requesting tools.

use std::sync::Arc;

use futures::future::join_all;

use crate::error::{AgentError, Result};
use crate::message::{Conversation, Message};
use crate::provider::{GenerationOptions, LlmProvider, TokenUsage};
use crate::tool::{Tool, ToolCall, ToolRegistry, ToolResult};

/// Agent configuration
#[derive(Clone, Debug)]
pub struct AgentConfig {
    /// Instructions sent as the system message
    pub instructions: String,

    /// Maximum provider round-trips before giving up
    pub max_iterations: usize,

    /// Generation options
    pub generation: GenerationOptions,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            instructions: DEFAULT_INSTRUCTIONS.into(),
            max_iterations: 10,
            generation: GenerationOptions::default(),
        }
    }
}

const DEFAULT_INSTRUCTIONS: &str = "You are a helpful AI assistant. \
Use the available tools when they help answer the request, \
then synthesize their results into a concise answer.";

/// Outcome of a single [`Agent::run`]
#[derive(Clone, Debug, Default)]
pub struct AgentResponse {
    /// Messages produced during the run, in order (assistant and tool turns)
    pub messages: Vec<Message>,

    /// Token usage summed over all provider round-trips
    pub usage: Option<TokenUsage>,
}

impl AgentResponse {
    /// Text of the first content block of the last message
    pub fn final_text(&self) -> Option<&str> {
        self.messages.last().and_then(Message::text)
    }
}

/// The main Agent struct
pub struct Agent {
    provider: Arc<dyn LlmProvider>,
    tools: Arc<ToolRegistry>,
    config: AgentConfig,
}

impl Agent {
    /// Create a new agent
    pub fn new(
        provider: Arc<dyn LlmProvider>,
        tools: Arc<ToolRegistry>,
        config: AgentConfig,
    ) -> Self {
        Self {
            provider,
            tools,
            config,
        }
    }

    /// Run the agent on a single user prompt
    pub async fn run(&self, prompt: &str) -> Result<AgentResponse> {
        let mut conversation = Conversation::with_system_prompt(&self.config.instructions);
        conversation.push(Message::user(prompt));
        let first_new = conversation.len();

        let schemas = self.tools.schemas();
        tracing::debug!(
            model = %self.config.generation.model,
            prompt_tokens = self.provider.estimate_tokens(prompt),
            tools = schemas.len(),
            "Starting agent run"
        );
        let mut usage: Option<TokenUsage> = None;

        for iteration in 1..=self.config.max_iterations {
            tracing::debug!(
                provider = self.provider.name(),
                iteration,
                messages = conversation.len(),
                "Requesting completion"
            );

            let completion = self
                .provider
                .complete(conversation.messages(), &schemas, &self.config.generation)
                .await?;

            if let Some(round) = completion.usage {
                *usage.get_or_insert_with(TokenUsage::default) += round;
            }

            if completion.tool_calls.is_empty() {
                conversation.push(Message::assistant(completion.content));
                return Ok(AgentResponse {
                    messages: conversation.since(first_new).to_vec(),
                    usage,
                });
            }

            let calls: Vec<ToolCall> = completion
                .tool_calls
                .into_iter()
                .map(|mut call| {
                    if call.id.is_none() {
                        call.id = Some(uuid::Uuid::new_v4().to_string());
                    }
                    call
                })
                .collect();

            conversation.push(Message::assistant_with_tool_calls(
                completion.content,
                calls.clone(),
            ));

            let results = join_all(calls.iter().map(|call| self.execute_tool(call))).await;
            for result in results {
                conversation.push(Message::tool_result(result));
            }
        }

        Err(AgentError::MaxIterations(self.config.max_iterations))
    }

    /// Execute a tool call, folding any error into a failed result
    async fn execute_tool(&self, call: &ToolCall) -> ToolResult {
        tracing::debug!(tool = %call.name, "Executing tool");

        let result = match self.tools.execute(call).await {
            Ok(result) => result,
            Err(e) => {
                tracing::warn!(tool = %call.name, error = %e, "Tool failed");
                ToolResult::failure(call.name.clone(), format!("Error: {e}"))
            }
        };

        ToolResult {
            id: call.id.clone(),
            ..result
        }
    }

    /// Get the tool registry
    pub fn tools(&self) -> &ToolRegistry {
        &self.tools
    }

    /// Get configuration
    pub fn config(&self) -> &AgentConfig {
        &self.config
    }
}

/// Builder for Agent configuration
#[derive(Default)]
pub struct AgentBuilder {
    provider: Option<Arc<dyn LlmProvider>>,
    tools: ToolRegistry,
    config: AgentConfig,
}

impl AgentBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn provider(mut self, provider: Arc<dyn LlmProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    pub fn tool<T: Tool + 'static>(mut self, tool: T) -> Result<Self> {
        self.tools.register(tool)?;
        Ok(self)
    }

    #[must_use]
    pub fn tools(mut self, tools: ToolRegistry) -> Self {
        self.tools = tools;
        self
    }

    #[must_use]
    pub fn instructions(mut self, instructions: impl Into<String>) -> Self {
        self.config.instructions = instructions.into();
        self
    }

    #[must_use]
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.generation.model = model.into();
        self
    }

    #[must_use]
    pub fn max_iterations(mut self, max: usize) -> Self {
        self.config.max_iterations = max;
        self
    }

    pub fn build(self) -> Result<Agent> {
        let provider = self
            .provider
            .ok_or_else(|| AgentError::Config("Provider is required".into()))?;

        Ok(Agent::new(provider, Arc::new(self.tools), self.config))
    }
}
