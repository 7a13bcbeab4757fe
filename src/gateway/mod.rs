pub mod types;

use reqwest::header;
use tracing::{debug, error};

use crate::config::Config;
use crate::errors::AppError;
use crate::models::ChatMessage;

use self::types::{CompletionRequest, CompletionResponse, ToolDefinition};

/// Maps an upstream status to the relay's error taxonomy.
/// Only 429 and 402 keep their meaning; every other failure is generic.
pub fn check_status(status: u16) -> Result<(), AppError> {
    match status {
        200..=299 => Ok(()),
        429 => Err(AppError::RateLimited),
        402 => Err(AppError::PaymentRequired),
        status => Err(AppError::GatewayStatus { status }),
    }
}

/// Client for the upstream chat-completions gateway.
/// One pooled [`reqwest::Client`] is shared by every request; no timeout or retry is applied.
#[derive(Clone)]
pub struct GatewayClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
    model: String,
}

impl GatewayClient {
    pub fn new(config: &Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: config.gateway_url.clone(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        }
    }

    /// Starts a streaming completion and returns the live response once its
    /// status has been confirmed successful. The body is left unread.
    pub async fn stream_chat(
        &self,
        messages: &[ChatMessage],
    ) -> Result<reqwest::Response, AppError> {
        let body = CompletionRequest {
            model: &self.model,
            messages,
            stream: true,
            tools: None,
            tool_choice: None,
        };
        self.send(&body).await
    }

    /// Runs a non-streaming completion that forces the model to call `tool`.
    pub async fn call_tool(
        &self,
        messages: &[ChatMessage],
        tool: ToolDefinition,
    ) -> Result<CompletionResponse, AppError> {
        let tool_choice = tool.forced_choice();
        let body = CompletionRequest {
            model: &self.model,
            messages,
            stream: false,
            tools: Some(vec![tool]),
            tool_choice: Some(tool_choice),
        };
        let response = self.send(&body).await?;
        response.json::<CompletionResponse>().await.map_err(|e| {
            error!("Gateway returned an unreadable completion: {e}");
            AppError::GatewayTransport(e)
        })
    }

    async fn send(&self, body: &CompletionRequest<'_>) -> Result<reqwest::Response, AppError> {
        let api_key = self.api_key.as_deref().ok_or(AppError::MissingApiKey)?;

        debug!(
            model = %self.model,
            messages = body.messages.len(),
            stream = body.stream,
            "calling AI gateway"
        );

        let response = self
            .http
            .post(&self.endpoint)
            .header(header::AUTHORIZATION, format!("Bearer {api_key}"))
            .json(body)
            .send()
            .await
            .map_err(|e| {
                error!("AI gateway request to {} failed: {e}", self.endpoint);
                AppError::GatewayTransport(e)
            })?;

        let status = response.status();
        if let Err(e) = check_status(status.as_u16()) {
            error!("AI gateway responded with {status}");
            return Err(e);
        }
        Ok(response)
    }
}
