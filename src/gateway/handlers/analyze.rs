//! 图片分析处理器

use axum::{extract::State, http::StatusCode, Json};
use serde_json::Value;

use crate::artwork::ArtworkRecord;
use crate::gateway::{error::ApiError, state::AppState};
use crate::providers::ProviderError;

/// POST /analyze 处理器
///
/// 入站校验 → 调用上游 → 归一化 → 返回完整记录。
/// 成功响应永远是结构完整的 [`ArtworkRecord`]，上游内容畸形时
/// 由归一化流程兜底。
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<ArtworkRecord>, ApiError> {
    let image = body
        .get("image")
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty());
    let mime_type = body
        .get("mimeType")
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty());

    let (Some(image), Some(mime_type)) = (image, mime_type) else {
        return Err(ApiError::BadRequest);
    };

    let provider = state.provider().ok_or(ApiError::Misconfigured)?;

    tracing::info!(
        provider = provider.name(),
        mime_type,
        image_b64_len = image.len(),
        "analyze request"
    );

    let raw_text = provider
        .analyze_image(image, mime_type)
        .await
        .map_err(map_provider_error)?;

    // 空回复快速失败；内容畸形在归一化内部兜底
    let record = state.normalizer().normalize(&raw_text).map_err(|err| {
        tracing::error!("upstream reply unusable: {err}");
        ApiError::UpstreamFailure {
            status: StatusCode::BAD_GATEWAY,
        }
    })?;

    tracing::info!(title = %record.title, emotion = %record.emotion, "analyze response");

    Ok(Json(record))
}

/// 任何非 POST 方法都拒绝
pub async fn handle_method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

fn map_provider_error(err: ProviderError) -> ApiError {
    match err {
        ProviderError::Upstream { status, body } => {
            // 上游错误详情只进日志，不回给调用方
            tracing::error!(%status, %body, "upstream API error");
            ApiError::UpstreamFailure { status }
        }
        ProviderError::EmptyReply => {
            tracing::error!("upstream reply contained no text");
            ApiError::UpstreamFailure {
                status: StatusCode::BAD_GATEWAY,
            }
        }
        ProviderError::Request(err) => ApiError::Internal(err.into()),
    }
}
