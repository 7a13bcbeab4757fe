pub mod chat_routes;
pub mod insight_routes;
pub mod quiz_routes;

use axum::extract::{FromRequest, Request};
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, Method};
use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::errors::AppError;
use crate::gateway::GatewayClient;
use crate::service::chat_service::ChatService;
use crate::service::quiz_service::QuizService;

use self::chat_routes::chat_handler;
use self::insight_routes::{insights_handler, streak_handler};
use self::quiz_routes::{generate_quiz_handler, grade_quiz_handler};

#[derive(Clone)]
pub struct AppState {
    pub chat: ChatService,
    pub quiz: QuizService,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        let gateway = GatewayClient::new(config);
        Self {
            chat: ChatService::new(gateway.clone()),
            quiz: QuizService::new(gateway),
        }
    }
}

/// `Json` whose rejection renders as an [`AppError`] (400 `{ "error": ... }`).
pub struct ApiJson<T>(pub T);

impl<T, S> FromRequest<S> for ApiJson<T>
where
    Json<T>: FromRequest<S, Rejection = axum::extract::rejection::JsonRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::invalid_request(rejection.body_text()))?;
        Ok(Self(value))
    }
}

/// Any origin, and the headers browser clients send to these functions.
/// `CorsLayer` answers every OPTIONS request itself, so no handler sees one.
fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            AUTHORIZATION,
            CONTENT_TYPE,
            HeaderName::from_static("x-client-info"),
            HeaderName::from_static("apikey"),
        ])
}

async fn health() -> &'static str {
    "OK"
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/chat", post(chat_handler))
        .route("/generate-quiz", post(generate_quiz_handler))
        .route("/grade-quiz", post(grade_quiz_handler))
        .route("/streak", post(streak_handler))
        .route("/insights", post(insights_handler))
        .layer(cors())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
