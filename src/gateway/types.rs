//! Wire shapes of the upstream chat-completions API.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::ChatMessage;

// ── Outbound ─────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct CompletionRequest<'a> {
    pub model: &'a str,
    pub messages: &'a [ChatMessage],
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<ToolDefinition>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_choice: Option<ToolChoice>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ToolDefinition {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub function: FunctionDefinition,
}

#[derive(Debug, Clone, Serialize)]
pub struct FunctionDefinition {
    pub name: String,
    pub description: String,
    /// JSON Schema of the arguments object.
    pub parameters: Value,
}

impl ToolDefinition {
    pub fn function(
        name: impl Into<String>,
        description: impl Into<String>,
        parameters: Value,
    ) -> Self {
        Self {
            kind: "function",
            function: FunctionDefinition {
                name: name.into(),
                description: description.into(),
                parameters,
            },
        }
    }

    /// A `tool_choice` that forces the model to call this tool.
    pub fn forced_choice(&self) -> ToolChoice {
        ToolChoice {
            kind: "function",
            function: ToolChoiceFunction { name: self.function.name.clone() },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ToolChoice {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub function: ToolChoiceFunction,
}

#[derive(Debug, Clone, Serialize)]
pub struct ToolChoiceFunction {
    pub name: String,
}

// ── Inbound (non-streaming) ──────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct CompletionResponse {
    pub choices: Option<Vec<Choice>>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: Option<AssistantMessage>,
}

#[derive(Debug, Deserialize)]
pub struct AssistantMessage {
    pub tool_calls: Option<Vec<ToolCall>>,
}

#[derive(Debug, Deserialize)]
pub struct ToolCall {
    pub function: FunctionCall,
}

#[derive(Debug, Deserialize)]
pub struct FunctionCall {
    pub arguments: String,
}

impl CompletionResponse {
    /// `choices[0].message.tool_calls[0]`, if present.
    pub fn first_tool_call(&self) -> Option<&ToolCall> {
        self.choices
            .as_deref()?
            .first()?
            .message
            .as_ref()?
            .tool_calls
            .as_deref()?
            .first()
    }
}

// ── Inbound (streaming) ──────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ChatChunk {
    pub choices: Option<Vec<ChunkChoice>>,
}

#[derive(Debug, Deserialize)]
pub struct ChunkChoice {
    pub delta: Option<Delta>,
}

#[derive(Debug, Deserialize)]
pub struct Delta {
    pub content: Option<String>,
}

impl ChatChunk {
    /// `choices[0].delta.content`, if present.
    pub fn into_content(self) -> Option<String> {
        self.choices?.into_iter().next()?.delta?.content
    }
}
