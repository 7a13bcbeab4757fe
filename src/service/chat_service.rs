use std::io;

use axum::body::Bytes;
use futures_util::StreamExt;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tracing::{error, info, warn};

use crate::errors::AppError;
use crate::gateway::GatewayClient;
use crate::models::{ChatMessage, ChatRequest, MessageRole};
use crate::prompts;
use crate::sse::{SseDecoder, SseEvent};

/// Chunks buffered between the upstream reader and the downstream writer.
const RELAY_BUFFER: usize = 64;

pub type RelayStream = ReceiverStream<Result<Bytes, io::Error>>;

#[derive(Clone)]
pub struct ChatService {
    gateway: GatewayClient,
}

impl ChatService {
    pub fn new(gateway: GatewayClient) -> Self {
        Self { gateway }
    }

    /// Opens an upstream completion stream for `request` and returns the
    /// downstream half of the relay. The upstream status has already been
    /// checked when this returns `Ok`.
    pub async fn relay(&self, request: ChatRequest) -> Result<RelayStream, AppError> {
        let messages = upstream_messages(&request)?;
        let upstream = self.gateway.stream_chat(&messages).await?;

        info!(
            mode = ?request.mode,
            topic = %request.context.topic_name,
            turns = request.messages.len(),
            "relaying chat stream"
        );

        let (tx, rx) = mpsc::channel(RELAY_BUFFER);
        tokio::spawn(forward(upstream, tx));
        Ok(ReceiverStream::new(rx))
    }
}

/// System instruction first, then the caller's turns unchanged.
pub fn upstream_messages(request: &ChatRequest) -> Result<Vec<ChatMessage>, AppError> {
    let last = request
        .messages
        .last()
        .ok_or_else(|| AppError::EmptyField { field_name: "messages".to_string() })?;
    if last.role != MessageRole::User {
        return Err(AppError::LastMessageNotFromUser);
    }
    if request.messages.iter().any(|m| m.role == MessageRole::System) {
        return Err(AppError::invalid_request("system messages are not accepted from callers"));
    }

    let mut messages = Vec::with_capacity(request.messages.len() + 1);
    messages.push(ChatMessage::system(prompts::tutor_instruction(request.mode, &request.context)));
    messages.extend(request.messages.iter().cloned());
    Ok(messages)
}

/// Copies upstream bytes into `tx` untouched until either side ends.
///
/// Dropping `upstream` closes the upstream connection, so returning early
/// when the receiver is gone is what releases it.
async fn forward(upstream: reqwest::Response, tx: mpsc::Sender<Result<Bytes, io::Error>>) {
    let mut body = upstream.bytes_stream();
    let mut monitor = SseDecoder::new();
    let mut forwarded = 0usize;
    let mut content_chars = 0usize;

    loop {
        let next = tokio::select! {
            _ = tx.closed() => {
                warn!(forwarded, "client disconnected mid-stream, closing upstream");
                return;
            }
            next = body.next() => next,
        };

        match next {
            Some(Ok(bytes)) => {
                for event in monitor.push(&bytes) {
                    if let SseEvent::Delta(text) = event {
                        content_chars += text.chars().count();
                    }
                }
                forwarded += bytes.len();
                if tx.send(Ok(bytes)).await.is_err() {
                    warn!(forwarded, "client disconnected mid-stream, closing upstream");
                    return;
                }
            }
            Some(Err(e)) => {
                error!(forwarded, "upstream stream failed: {e}");
                let _ = tx.send(Err(io::Error::other(e))).await;
                return;
            }
            None => break,
        }
    }

    monitor.finish();
    if monitor.is_done() {
        info!(forwarded, content_chars, "chat stream complete");
    } else {
        warn!(forwarded, content_chars, "upstream stream ended without a [DONE] marker");
    }
}
