//! OpenAI-compatible LLM Provider
//!
//! Implementation of `LlmProvider` for the Chat Completions API with native
//! function calling.

use std::collections::HashMap;
use std::time::Duration;

use agent_core::{
    error::{AgentError, Result},
    message::{Content, Message, Role},
    provider::{Completion, FinishReason, GenerationOptions, LlmProvider, TokenUsage},
    tool::{ToolCall, ToolSchema},
};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

/// OpenAI-compatible provider configuration
#[derive(Clone, Debug)]
pub struct OpenAiConfig {
    /// API base URL, e.g. `https://models.inference.ai.azure.com`
    pub base_url: String,

    /// Bearer token
    pub api_key: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl OpenAiConfig {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            timeout_secs: 120,
        }
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}

/// OpenAI-compatible LLM provider
pub struct OpenAiProvider {
    client: reqwest::Client,
    config: OpenAiConfig,
}

impl OpenAiProvider {
    /// Create from configuration
    pub fn from_config(mut config: OpenAiConfig) -> Result<Self> {
        config.base_url = config.base_url.trim_end_matches('/').to_string();

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AgentError::Config(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url, path)
    }

    /// Convert agent messages to wire format. A tool message expands to one
    /// wire message per carried result.
    fn convert_messages(messages: &[Message]) -> Vec<WireMessage> {
        let mut wire = Vec::with_capacity(messages.len());

        for message in messages {
            match message.role {
                Role::Tool => {
                    for result in message.tool_results() {
                        wire.push(WireMessage {
                            role: "tool",
                            content: Some(result.output.clone()),
                            tool_calls: None,
                            tool_call_id: result.id.clone(),
                        });
                    }
                }
                Role::Assistant => {
                    let calls: Vec<WireToolCall> =
                        message.tool_calls().map(WireToolCall::from_call).collect();
                    wire.push(WireMessage {
                        role: "assistant",
                        content: joined_text(message),
                        tool_calls: (!calls.is_empty()).then_some(calls),
                        tool_call_id: None,
                    });
                }
                Role::System | Role::User => {
                    wire.push(WireMessage {
                        role: if message.role == Role::System { "system" } else { "user" },
                        content: Some(joined_text(message).unwrap_or_default()),
                        tool_calls: None,
                        tool_call_id: None,
                    });
                }
            }
        }

        wire
    }

    fn convert_tools(tools: &[ToolSchema]) -> Vec<WireTool<'_>> {
        tools
            .iter()
            .map(|schema| WireTool {
                kind: "function",
                function: WireFunctionDef {
                    name: &schema.name,
                    description: &schema.description,
                    parameters: schema.parameters_json_schema(),
                },
            })
            .collect()
    }

    /// Convert the first choice into an agent completion
    fn convert_completion(response: ChatResponse, model: &str) -> Result<Completion> {
        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| AgentError::Provider("No choices in response".into()))?;

        let tool_calls = choice
            .message
            .tool_calls
            .unwrap_or_default()
            .into_iter()
            .map(|tc| ToolCall {
                arguments: parse_arguments(&tc.function.name, &tc.function.arguments),
                name: tc.function.name,
                id: Some(tc.id),
            })
            .collect();

        Ok(Completion {
            content: choice.message.content.unwrap_or_default(),
            tool_calls,
            model: response.model.unwrap_or_else(|| model.to_string()),
            usage: response.usage.map(|u| TokenUsage {
                prompt_tokens: u.prompt_tokens,
                completion_tokens: u.completion_tokens,
                total_tokens: u.total_tokens,
            }),
            finish_reason: choice.finish_reason.as_deref().and_then(FinishReason::parse),
        })
    }
}

fn joined_text(message: &Message) -> Option<String> {
    let parts: Vec<&str> = message.contents.iter().filter_map(Content::as_text).collect();
    (!parts.is_empty()).then(|| parts.join("\n"))
}

fn parse_arguments(tool: &str, raw: &str) -> HashMap<String, serde_json::Value> {
    if raw.trim().is_empty() {
        return HashMap::new();
    }
    serde_json::from_str(raw).unwrap_or_else(|e| {
        tracing::warn!(tool, error = %e, "Tool arguments are not a JSON object");
        HashMap::new()
    })
}

fn status_to_error(status: StatusCode, body: &str) -> AgentError {
    let detail = format!("{status}: {body}");
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => AgentError::Auth(detail),
        StatusCode::TOO_MANY_REQUESTS => AgentError::RateLimited(detail),
        s if s.is_server_error() => AgentError::ProviderUnavailable(detail),
        _ => AgentError::Provider(detail),
    }
}

#[async_trait]
impl LlmProvider for OpenAiProvider {
    fn name(&self) -> &str {
        "OpenAI-compatible"
    }

    async fn health_check(&self) -> Result<bool> {
        let response = self
            .client
            .get(self.endpoint("models"))
            .bearer_auth(&self.config.api_key)
            .send()
            .await;

        match response {
            Ok(resp) if resp.status().is_success() => Ok(true),
            Ok(resp) => {
                tracing::warn!(status = %resp.status(), "Health check failed");
                Ok(false)
            }
            Err(e) => {
                tracing::warn!("Health check failed: {}", e);
                Ok(false)
            }
        }
    }

    async fn complete(
        &self,
        messages: &[Message],
        tools: &[ToolSchema],
        options: &GenerationOptions,
    ) -> Result<Completion> {
        let wire_tools = Self::convert_tools(tools);
        let request = ChatRequest {
            model: &options.model,
            messages: Self::convert_messages(messages),
            temperature: options.temperature,
            top_p: options.top_p,
            max_tokens: options.max_tokens,
            stop: (!options.stop_sequences.is_empty()).then_some(&options.stop_sequences),
            tools: (!wire_tools.is_empty()).then_some(wire_tools),
        };

        tracing::debug!(model = %options.model, tools = tools.len(), "Sending chat completion");

        let response = self
            .client
            .post(self.endpoint("chat/completions"))
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| AgentError::ProviderUnavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(status_to_error(status, &body));
        }

        let body = response
            .text()
            .await
            .map_err(|e| AgentError::ProviderUnavailable(e.to_string()))?;
        let parsed: ChatResponse = serde_json::from_str(&body)?;

        Self::convert_completion(parsed, &options.model)
    }
}

// ============================================================================
// Wire types
// ============================================================================

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage>,
    temperature: f32,
    top_p: f32,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    stop: Option<&'a Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<WireTool<'a>>>,
}

#[derive(Debug, Serialize)]
struct WireMessage {
    role: &'static str,
    // `null` content is valid for assistant turns that only call tools
    content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_calls: Option<Vec<WireToolCall>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_call_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct WireToolCall {
    id: String,
    #[serde(rename = "type", default = "function_kind")]
    kind: String,
    function: WireFunctionCall,
}

fn function_kind() -> String {
    "function".into()
}

impl WireToolCall {
    fn from_call(call: &ToolCall) -> Self {
        Self {
            id: call.id.clone().unwrap_or_default(),
            kind: function_kind(),
            function: WireFunctionCall {
                name: call.name.clone(),
                arguments: serde_json::to_string(&call.arguments)
                    .unwrap_or_else(|_| "{}".into()),
            },
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct WireFunctionCall {
    name: String,
    /// JSON-encoded argument object
    #[serde(default)]
    arguments: String,
}

#[derive(Serialize)]
struct WireTool<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    function: WireFunctionDef<'a>,
}

#[derive(Serialize)]
struct WireFunctionDef<'a> {
    name: &'a str,
    description: &'a str,
    parameters: serde_json::Value,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    choices: Vec<ChatChoice>,
    #[serde(default)]
    usage: Option<WireUsage>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    tool_calls: Option<Vec<WireToolCall>>,
}

#[derive(Deserialize)]
struct WireUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}

#[cfg(test)]
mod tests {
    use agent_core::tool::{ParameterSchema, ToolResult};
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn provider(server: &MockServer) -> OpenAiProvider {
        OpenAiProvider::from_config(OpenAiConfig::new(format!("{}/", server.uri()), "test-key"))
            .unwrap()
    }

    fn weather_schema() -> ToolSchema {
        ToolSchema {
            name: "get_weather".into(),
            description: "Get the weather for a given location.".into(),
            parameters: vec![ParameterSchema::required_string("location", "The location")],
        }
    }

    fn options() -> GenerationOptions {
        GenerationOptions {
            model: "gpt-4o-mini".into(),
            ..GenerationOptions::default()
        }
    }

    #[test]
    fn test_config_defaults() {
        let config = OpenAiConfig::new("https://example.test", "key");
        assert_eq!(config.timeout_secs, 120);
        assert_eq!(config.with_timeout(5).timeout_secs, 5);
    }

    #[test]
    fn test_message_conversion() {
        let call = ToolCall::new("get_weather")
            .with_id("call_1")
            .with_argument("location", json!("Paris, France"));
        let messages = vec![
            Message::system("You are helpful."),
            Message::user("Hello"),
            Message::assistant_with_tool_calls("", vec![call]),
            Message::tool_result(ToolResult::success("get_weather", "cloudy").with_id("call_1")),
        ];

        let converted = OpenAiProvider::convert_messages(&messages);
        let json = serde_json::to_value(&converted).unwrap();

        assert_eq!(json[0], json!({"role": "system", "content": "You are helpful."}));
        assert_eq!(json[2]["role"], "assistant");
        assert_eq!(json[2]["content"], serde_json::Value::Null);
        assert_eq!(json[2]["tool_calls"][0]["id"], "call_1");
        assert_eq!(json[2]["tool_calls"][0]["type"], "function");
        assert_eq!(
            json[2]["tool_calls"][0]["function"]["arguments"],
            r#"{"location":"Paris, France"}"#
        );
        assert_eq!(
            json[3],
            json!({"role": "tool", "content": "cloudy", "tool_call_id": "call_1"})
        );
    }

    #[test]
    fn test_bad_arguments_become_empty() {
        assert!(parse_arguments("t", "not json").is_empty());
        assert!(parse_arguments("t", "").is_empty());
        assert_eq!(parse_arguments("t", r#"{"a":1}"#)["a"], json!(1));
    }

    #[tokio::test]
    async fn test_complete_parses_tool_calls() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("authorization", "Bearer test-key"))
            .and(body_partial_json(json!({
                "model": "gpt-4o-mini",
                "tools": [{"type": "function", "function": {"name": "get_weather"}}]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "model": "gpt-4o-mini-2024",
                "choices": [{
                    "message": {
                        "role": "assistant",
                        "content": null,
                        "tool_calls": [{
                            "id": "call_abc",
                            "type": "function",
                            "function": {
                                "name": "get_weather",
                                "arguments": "{\"location\":\"Tokyo, Japan\"}"
                            }
                        }]
                    },
                    "finish_reason": "tool_calls"
                }],
                "usage": {"prompt_tokens": 20, "completion_tokens": 7, "total_tokens": 27}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let completion = provider(&server)
            .complete(&[Message::user("Weather?")], &[weather_schema()], &options())
            .await
            .unwrap();

        assert_eq!(completion.content, "");
        assert_eq!(completion.model, "gpt-4o-mini-2024");
        assert_eq!(completion.finish_reason, Some(FinishReason::ToolUse));
        assert_eq!(completion.usage.unwrap().total_tokens, 27);
        assert_eq!(completion.tool_calls.len(), 1);
        let call = &completion.tool_calls[0];
        assert_eq!(call.id.as_deref(), Some("call_abc"));
        assert_eq!(call.str_arg("location"), Some("Tokyo, Japan"));
    }

    #[tokio::test]
    async fn test_complete_text_answer() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{
                    "message": {"role": "assistant", "content": "Enjoy Bali!"},
                    "finish_reason": "stop"
                }]
            })))
            .mount(&server)
            .await;

        let completion = provider(&server)
            .complete(&[Message::user("Plan")], &[], &options())
            .await
            .unwrap();

        assert_eq!(completion.content, "Enjoy Bali!");
        assert!(completion.tool_calls.is_empty());
        assert_eq!(completion.model, "gpt-4o-mini");
    }

    #[tokio::test]
    async fn test_status_mapping() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(401).set_body_string("bad token"))
            .mount(&server)
            .await;

        let err = provider(&server)
            .complete(&[Message::user("Hi")], &[], &options())
            .await
            .unwrap_err();

        assert!(matches!(err, AgentError::Auth(msg) if msg.contains("bad token")));
        assert!(matches!(
            status_to_error(StatusCode::TOO_MANY_REQUESTS, ""),
            AgentError::RateLimited(_)
        ));
        assert!(matches!(
            status_to_error(StatusCode::BAD_GATEWAY, ""),
            AgentError::ProviderUnavailable(_)
        ));
        assert!(matches!(
            status_to_error(StatusCode::BAD_REQUEST, ""),
            AgentError::Provider(_)
        ));
    }

    #[tokio::test]
    async fn test_empty_choices_is_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
            .mount(&server)
            .await;

        let err = provider(&server)
            .complete(&[Message::user("Hi")], &[], &options())
            .await
            .unwrap_err();
        assert!(matches!(err, AgentError::Provider(_)));
    }

    #[tokio::test]
    async fn test_health_check() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/models"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
            .mount(&server)
            .await;

        assert!(provider(&server).health_check().await.unwrap());

        let down = OpenAiProvider::from_config(OpenAiConfig::new("http://127.0.0.1:9", "k"))
            .unwrap();
        assert!(!down.health_check().await.unwrap());
    }
}
