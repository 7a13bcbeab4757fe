use serde_json::{json, Value};
use tracing::{info, warn};

use crate::errors::AppError;
use crate::gateway::types::{CompletionResponse, ToolDefinition};
use crate::gateway::GatewayClient;
use crate::models::{ChatMessage, QuizRequest};
use crate::prompts;

pub const QUIZ_TOOL_NAME: &str = "generate_quiz";

/// The structured function the model is forced to call.
pub fn quiz_tool() -> ToolDefinition {
    ToolDefinition::function(
        QUIZ_TOOL_NAME,
        "Generate quiz questions",
        json!({
            "type": "object",
            "properties": {
                "questions": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "question": { "type": "string" },
                            "options": { "type": "array", "items": { "type": "string" } },
                            "correct": {
                                "type": "number",
                                "description": "Index of correct answer (0-3)"
                            },
                            "explanation": { "type": "string" }
                        },
                        "required": ["question", "options", "correct", "explanation"]
                    }
                }
            },
            "required": ["questions"]
        }),
    )
}

#[derive(Clone)]
pub struct QuizService {
    gateway: GatewayClient,
}

impl QuizService {
    pub fn new(gateway: GatewayClient) -> Self {
        Self { gateway }
    }

    /// Returns the model's tool arguments exactly as parsed.
    pub async fn generate(&self, request: QuizRequest) -> Result<Value, AppError> {
        let (topic, grade, count) = (&request.topic_name, request.grade, request.question_count);
        let messages = [
            ChatMessage::system(prompts::quiz_instruction(topic, grade, count)),
            ChatMessage::user(prompts::quiz_request(topic, grade, count)),
        ];

        // The quiz endpoint has no 429/402 contract; quota signals become generic failures.
        let response = self
            .gateway
            .call_tool(&messages, quiz_tool())
            .await
            .map_err(|e| match e {
                e if e.is_quota() => AppError::GatewayStatus { status: e.status().as_u16() },
                e => e,
            })?;

        let quiz = extract_quiz(&response)?;
        let returned = audit(&quiz, count);

        info!(topic = %topic, grade, questions = returned, "quiz generated");
        Ok(quiz)
    }
}

/// Parses the arguments of the first tool call. Anything but a JSON object is fatal.
pub fn extract_quiz(response: &CompletionResponse) -> Result<Value, AppError> {
    let call = response.first_tool_call().ok_or(AppError::MissingToolCall)?;
    let arguments: Value =
        serde_json::from_str(&call.function.arguments).map_err(AppError::InvalidToolArguments)?;
    if !arguments.is_object() {
        return Err(AppError::ToolArgumentsNotObject);
    }
    Ok(arguments)
}

/// Upstream output is trusted; suspicious shapes are only logged.
/// Returns the number of questions found.
fn audit(quiz: &Value, requested: u32) -> usize {
    let Some(questions) = quiz.get("questions").and_then(Value::as_array) else {
        warn!("quiz arguments carry no questions array");
        return 0;
    };

    if questions.len() != requested as usize {
        warn!(requested, returned = questions.len(), "quiz question count differs from request");
    }
    for (idx, q) in questions.iter().enumerate() {
        let options = q.get("options").and_then(Value::as_array).map_or(0, Vec::len);
        let correct = q.get("correct").and_then(Value::as_f64);
        let in_range = correct
            .is_some_and(|c| c >= 0.0 && c.fract() == 0.0 && c < options as f64);
        if !in_range {
            warn!(question = idx, ?correct, options, "correct index out of range");
        }
    }
    questions.len()
}
