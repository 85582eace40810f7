//! API 错误类型与响应映射
//!
//! 对外契约：输入与传输层错误按状态码如实上报，内容层错误在
//! 归一化流程里兜底吸收，不会出现在这里。内部细节只进日志，
//! 响应体固定为 `{"error": "..."}`。

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

/// API 层错误分类
#[derive(Debug, Error)]
pub enum ApiError {
    /// 非 POST 方法访问分析接口
    #[error("Method Not Allowed")]
    MethodNotAllowed,
    /// 请求体缺少 image 或 mimeType
    #[error("Missing image data")]
    BadRequest,
    /// 上游凭证未配置，需要运维处理
    #[error("GOOGLE_API_KEY is not configured")]
    Misconfigured,
    /// 上游传输失败，状态码原样透传；空回复映射为 502
    #[error("Failed to get analysis from AI.")]
    UpstreamFailure { status: StatusCode },
    /// 其他未预期的内部错误
    #[error("An internal error occurred.")]
    Internal(anyhow::Error),
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::Internal(err)
    }
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::BadRequest => StatusCode::BAD_REQUEST,
            ApiError::Misconfigured => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::UpstreamFailure { status } => *status,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// 错误响应体
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // 内部错误细节只进日志，不泄露给调用方
        if let ApiError::Internal(err) = &self {
            tracing::error!("internal error: {err:#}");
        }

        let body = ErrorBody {
            error: self.to_string(),
        };

        (self.status_code(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_failure_passes_status_through() {
        let err = ApiError::UpstreamFailure {
            status: StatusCode::TOO_MANY_REQUESTS,
        };

        assert_eq!(err.status_code(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(err.to_string(), "Failed to get analysis from AI.");
    }

    #[test]
    fn internal_error_masks_detail() {
        let err = ApiError::Internal(anyhow::anyhow!("connection pool exhausted"));

        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "An internal error occurred.");
    }
}
