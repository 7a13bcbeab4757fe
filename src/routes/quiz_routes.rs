use axum::extract::State;
use axum::Json;
use serde_json::Value;

use super::{ApiJson, AppState};
use crate::errors::AppError;
use crate::insights::grading::{self, GradeRequest, GradedQuiz};
use crate::models::QuizRequest;

/// POST `/generate-quiz`
///
/// Every failure here, an unreadable body included, is a 500.
pub async fn generate_quiz_handler(
    State(state): State<AppState>,
    request: Result<ApiJson<QuizRequest>, AppError>,
) -> Result<Json<Value>, AppError> {
    let ApiJson(request) = request.map_err(|e| match e {
        AppError::InvalidRequest { message } => AppError::InvalidQuizRequest { message },
        other => AppError::InvalidQuizRequest { message: other.to_string() },
    })?;
    state.quiz.generate(request).await.map(Json)
}

/// POST `/grade-quiz`
pub async fn grade_quiz_handler(
    ApiJson(request): ApiJson<GradeRequest>,
) -> Result<Json<GradedQuiz>, AppError> {
    grading::grade(&request).map(Json)
}
