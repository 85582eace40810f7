//! Gemini Provider
//!
//! 调用 Google Gemini generateContent 接口分析图片。请求是单轮
//! 用户消息：提示词文本 + base64 内联图片；通过 generationConfig
//! 的 responseMimeType 要求上游输出纯 JSON。

pub mod constants;

use std::sync::OnceLock;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;

use crate::providers::{Provider, ProviderError};
use constants::RESPONSE_MIME_TYPE;

/// API 请求超时（秒）
const API_TIMEOUT_SECS: u64 = 60;

/// 共享的 API 客户端
static API_CLIENT: OnceLock<Client> = OnceLock::new();

fn get_api_client() -> &'static Client {
    API_CLIENT.get_or_init(|| {
        Client::builder()
            .timeout(Duration::from_secs(API_TIMEOUT_SECS))
            .build()
            .expect("Failed to create Gemini API client")
    })
}

/// generateContent 请求体
#[derive(Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

/// 单轮消息内容
#[derive(Serialize)]
struct Content {
    parts: Vec<Part>,
}

/// 消息分段：文本或内联图片
#[derive(Serialize)]
enum Part {
    #[serde(rename = "text")]
    Text(String),
    #[serde(rename = "inlineData")]
    InlineData(InlineData),
}

#[derive(Serialize)]
struct InlineData {
    #[serde(rename = "mimeType")]
    mime_type: String,
    data: String,
}

#[derive(Serialize)]
struct GenerationConfig {
    #[serde(rename = "responseMimeType")]
    response_mime_type: &'static str,
}

pub struct GeminiProvider {
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiProvider {
    pub fn new(api_key: String, model: String, base_url: String) -> Self {
        Self {
            api_key,
            model,
            base_url,
        }
    }

    /// 凭证按上游约定放在查询参数里，完整 URL 不得写进日志
    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        )
    }
}

/// 从响应中取出回复文本：candidates[0].content.parts[0].text
fn extract_reply_text(body: &Value) -> Option<String> {
    body.get("candidates")?
        .get(0)?
        .get("content")?
        .get("parts")?
        .get(0)?
        .get("text")?
        .as_str()
        .map(str::to_string)
}

#[async_trait]
impl Provider for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn analyze_image(
        &self,
        image_b64: &str,
        mime_type: &str,
    ) -> Result<String, ProviderError> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![
                    Part::Text(constants::docent_prompt().to_string()),
                    Part::InlineData(InlineData {
                        mime_type: mime_type.to_string(),
                        data: image_b64.to_string(),
                    }),
                ],
            }],
            generation_config: GenerationConfig {
                response_mime_type: RESPONSE_MIME_TYPE,
            },
        };

        let response = get_api_client()
            .post(self.endpoint())
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Upstream { status, body });
        }

        let body: Value = response.json().await?;
        extract_reply_text(&body).ok_or(ProviderError::EmptyReply)
    }
}
