//! 上游模型抽象层
//!
//! 定义多模态模型 Provider 的统一接口和传输层错误类型

pub mod gemini;

use std::sync::Arc;

use async_trait::async_trait;
use http::StatusCode;
use thiserror::Error;

use crate::config::Config;
use gemini::GeminiProvider;

/// 调用上游模型失败
///
/// 传输层错误不做本地恢复，由调用方映射为对应的错误响应；
/// 回复内容层面的问题不在这里处理，归一化流程负责。
#[derive(Debug, Error)]
pub enum ProviderError {
    /// 上游返回非 2xx 状态码
    #[error("upstream API returned HTTP {status}")]
    Upstream { status: StatusCode, body: String },
    /// 上游返回 2xx 但回复里没有文本内容
    #[error("upstream reply contained no text")]
    EmptyReply,
    /// 请求未能完成（网络错误、超时等）
    #[error("failed to reach upstream API: {0}")]
    Request(#[from] reqwest::Error),
}

/// Provider Trait - 多模态模型服务的统一接口
#[async_trait]
pub trait Provider: Send + Sync {
    /// Provider 名称（用于日志和标识）
    fn name(&self) -> &str;

    /// 分析一张 base64 编码的图片，返回上游的原始回复文本
    ///
    /// 不做重试，超时由共享客户端统一控制。
    async fn analyze_image(
        &self,
        image_b64: &str,
        mime_type: &str,
    ) -> Result<String, ProviderError>;
}

/// 根据配置创建 Provider
///
/// 凭证缺失时返回 None，由 HTTP 层按次上报配置错误。
pub fn from_config(config: &Config) -> Option<Arc<dyn Provider>> {
    let api_key = config.api_key.clone()?;

    Some(Arc::new(GeminiProvider::new(
        api_key,
        config.model.clone(),
        config.api_base.clone(),
    )))
}
