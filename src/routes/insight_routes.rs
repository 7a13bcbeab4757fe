use axum::Json;
use tracing::debug;

use super::ApiJson;
use crate::insights::streak::{self, StreakRequest, StreakState};
use crate::insights::{self, InsightsReport, InsightsRequest};

/// POST `/streak` — the streak state after one more completed activity.
pub async fn streak_handler(ApiJson(request): ApiJson<StreakRequest>) -> Json<StreakState> {
    let today = request.today();
    Json(streak::record_activity(&request.state, today))
}

/// POST `/insights` — mastery map, mistake patterns, risk warnings and snapshot.
pub async fn insights_handler(ApiJson(request): ApiJson<InsightsRequest>) -> Json<InsightsReport> {
    debug!(
        subjects = request.subjects.len(),
        progress = request.progress.len(),
        results = request.test_results.len(),
        "building insights report"
    );
    Json(insights::build_report(&request))
}
