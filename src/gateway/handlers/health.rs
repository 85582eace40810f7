//! 诊断探针处理器

use axum::{extract::State, Json};
use serde::Serialize;
use serde_json::json;

use crate::gateway::state::AppState;

/// 探针响应
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    #[serde(rename = "hasApiKey")]
    has_api_key: bool,
}

/// GET /health
///
/// 上报上游凭证是否就位；凭证本身绝不出现在响应里。
pub async fn handle_health(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!(HealthResponse {
        status: "ok",
        has_api_key: state.has_api_key(),
    }))
}
