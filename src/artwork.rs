//! 艺术品分析结果的领域模型

use serde::{Deserialize, Serialize};

/// 固定的情绪集合，提示词要求上游从中选取一个
pub const EMOTIONS: &[&str] = &[
    "Joy",
    "Trust",
    "Fear",
    "Surprise",
    "Sadness",
    "Disgust",
    "Anger",
    "Anticipation",
];

/// 一次分析的完整结果
///
/// 每次请求构造一份，构造后不再修改，直接序列化为响应体。
/// `title`/`artist`/`question` 按上游约定缺省时补默认值；
/// `emotion` 和 `analysis` 由归一化流程保证存在且非空。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtworkRecord {
    /// 作品标题，未知时为 "Unknown"
    #[serde(default = "unknown")]
    pub title: String,
    /// 作者，未知时为 "Unknown"
    #[serde(default = "unknown")]
    pub artist: String,
    /// 两三句赏析文字
    pub analysis: String,
    /// 作品传达的主导情绪，取自 [`EMOTIONS`]；超出集合的值原样放行
    pub emotion: String,
    /// 一句引导观众细看作品的问题
    #[serde(default = "default_question")]
    pub question: String,
}

fn unknown() -> String {
    "Unknown".to_string()
}

fn default_question() -> String {
    "What do you notice first when you look at this artwork?".to_string()
}

impl ArtworkRecord {
    /// 上游内容无法恢复时的兜底结果
    ///
    /// 必须始终是完整合法的记录；emotion 固定取 "Joy"。
    pub fn fallback() -> Self {
        Self {
            title: unknown(),
            artist: unknown(),
            analysis: "Sorry, I couldn't make out enough detail to analyze this artwork properly."
                .to_string(),
            emotion: "Joy".to_string(),
            question: "What catches your eye first in this piece?".to_string(),
        }
    }
}
