use axum::body::Body;
use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use tracing::warn;

use super::{ApiJson, AppState};
use crate::errors::AppError;
use crate::models::ChatRequest;

/// POST `/chat` — relays the upstream completion as `text/event-stream`.
///
/// Exactly one upstream call is made. A 429 or 402 from upstream is returned
/// with the same status; anything else that fails before streaming is a 500.
pub async fn chat_handler(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<ChatRequest>,
) -> Result<Response, AppError> {
    let stream = state.chat.relay(request).await.inspect_err(|e| {
        if e.is_validation() {
            warn!("Rejected chat request: {e}");
        }
    })?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/event-stream"),
            (header::CACHE_CONTROL, "no-cache"),
        ],
        Body::from_stream(stream),
    )
        .into_response())
}
