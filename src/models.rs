use serde::{Deserialize, Serialize};

// ── Chat ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: MessageRole::System, content: content.into() }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self { role: MessageRole::User, content: content.into() }
    }
}

/// Tutor stance. Anything other than these two values is rejected at the extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatMode {
    /// The assistant explains the topic.
    Teacher,
    /// Teach-back: the student explains and the assistant evaluates.
    Student,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonContext {
    pub topic_name: String,
    pub chapter_name: String,
    pub subject_name: String,
    pub grade: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Oldest first; the caller appends the newest user turn before sending.
    pub messages: Vec<ChatMessage>,
    pub mode: ChatMode,
    pub context: LessonContext,
}

// ── Quiz ─────────────────────────────────────────────────────────────────────

pub const DEFAULT_QUESTION_COUNT: u32 = 5;

fn default_question_count() -> u32 {
    DEFAULT_QUESTION_COUNT
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizRequest {
    pub topic_name: String,
    pub grade: u32,
    #[serde(default = "default_question_count")]
    pub question_count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    /// Zero-based index into `options`. Models sometimes emit `1.0` for `1`.
    #[serde(deserialize_with = "option_index")]
    pub correct: usize,
    pub explanation: String,
}

fn option_index<'de, D>(deserializer: D) -> Result<usize, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = f64::deserialize(deserializer)?;
    if raw < 0.0 || raw.fract() != 0.0 || raw > u32::MAX as f64 {
        return Err(serde::de::Error::custom(format!("`correct` is not an option index: {raw}")));
    }
    Ok(raw as usize)
}

// ── Errors ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
