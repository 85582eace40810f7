//! Gemini 配置常量与提示词

use std::sync::OnceLock;

use crate::artwork::EMOTIONS;

pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash-preview-05-20";

/// 要求上游直接输出 JSON
pub const RESPONSE_MIME_TYPE: &str = "application/json";

/// 艺术讲解提示词
///
/// 要求上游扮演艺术讲解员，按固定 schema 输出 JSON 对象；
/// emotion 必须从 [`EMOTIONS`] 列表中选取。
pub fn docent_prompt() -> &'static str {
    static PROMPT: OnceLock<String> = OnceLock::new();
    PROMPT.get_or_init(|| {
        format!(
            r#"You are an expert art docent. Analyze the provided image and return a JSON object with the following structure:
{{
  "title": "Identify the title of this artwork. If it's not a famous piece, respond with 'Unknown'.",
  "artist": "Identify the artist of this artwork. If unknown, respond with 'Unknown'.",
  "analysis": "Based on the artwork's identity, artist, and historical context, provide a short, insightful analysis (2-3 sentences). If the artwork is unknown, provide an analysis based on its visual style and composition.",
  "emotion": "From the list [{}], choose the single most dominant emotion conveyed by the artwork.",
  "question": "Based on your analysis, formulate one short, thought-provoking question to encourage the viewer to look closer and think deeper."
}}"#,
            EMOTIONS.join(", ")
        )
    })
}
