//! Gateway 应用状态

use std::sync::Arc;

use crate::normalize::Normalizer;
use crate::providers::Provider;

/// Gateway 应用状态
///
/// 全部成员不可变，跨请求共享。凭证缺失时 provider 为 None：
/// 分析接口按次上报配置错误，探针如实上报凭证状态。
#[derive(Clone)]
pub struct AppState {
    provider: Option<Arc<dyn Provider>>,
    normalizer: Arc<dyn Normalizer>,
}

impl AppState {
    pub fn new(provider: Option<Arc<dyn Provider>>, normalizer: Arc<dyn Normalizer>) -> Self {
        Self {
            provider,
            normalizer,
        }
    }

    pub fn provider(&self) -> Option<Arc<dyn Provider>> {
        self.provider.clone()
    }

    pub fn normalizer(&self) -> &dyn Normalizer {
        self.normalizer.as_ref()
    }

    /// 上游凭证是否就位（等价于 provider 是否可用）
    pub fn has_api_key(&self) -> bool {
        self.provider.is_some()
    }
}
