//! 上游回复的容错归一化
//!
//! 上游模型被提示词要求输出纯 JSON，但并不可靠：它可能在 JSON 外
//! 包裹说明文字或 markdown 代码块、键不带引号、末尾夹带多余内容。
//! 本模块把这种不可信的自由文本恢复成合法的 [`ArtworkRecord`]，
//! 恢复失败时退回固定的兜底结果，保证 200 响应的结构始终完整。
//!
//! 恢复流程（逐级升级）：
//!
//! 1. 空回复检查：空文本是上游故障，直接报错，不伪造结果
//! 2. 边界提取：取第一个 `{` 到最后一个 `}` 之间的子串
//! 3. 结构化解析
//! 4. 键引号修复：仅在解析失败后尝试，保证合法输入原样通过
//! 5. 必填字段校验：emotion 和 analysis 必须为非空字符串
//! 6. 兜底替换：2-5 的任何失败都返回固定兜底结果

use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;
use thiserror::Error;

use crate::artwork::ArtworkRecord;

/// 归一化失败
///
/// 只有空回复会作为错误向上传播；内容畸形一律在内部兜底吸收。
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NormalizeError {
    /// 上游回复为空或只含空白
    #[error("upstream reply was empty")]
    EmptyReply,
}

/// 归一化策略接口
///
/// 单一能力：把上游原始回复文本转成合法记录。更换上游或恢复策略
/// 时只需替换实现，不影响入站校验和 HTTP 边界。
pub trait Normalizer: Send + Sync {
    fn normalize(&self, raw_text: &str) -> Result<ArtworkRecord, NormalizeError>;
}

/// 默认的宽容策略
///
/// 尽力恢复内容畸形的回复；空回复快速失败，由调用方映射为上游
/// 错误响应；超出固定集合的 emotion 原样放行。
pub struct LenientNormalizer;

impl Normalizer for LenientNormalizer {
    fn normalize(&self, raw_text: &str) -> Result<ArtworkRecord, NormalizeError> {
        if raw_text.trim().is_empty() {
            return Err(NormalizeError::EmptyReply);
        }

        Ok(recover_record(raw_text).unwrap_or_else(|| {
            tracing::warn!("upstream reply unusable, substituting fallback record");
            ArtworkRecord::fallback()
        }))
    }
}

/// 从原始文本恢复记录，任何一步失败都返回 None
fn recover_record(raw_text: &str) -> Option<ArtworkRecord> {
    let slice = extract_json_object(raw_text)?;

    // 先按原样解析，失败后才做键引号修复，避免改写合法输入
    let value: Value = serde_json::from_str(slice)
        .ok()
        .or_else(|| serde_json::from_str(&quote_bare_keys(slice)).ok())?;

    if !has_required_fields(&value) {
        return None;
    }

    serde_json::from_value(value).ok()
}

/// 边界提取：取第一个 `{` 到最后一个 `}` 之间的子串（含边界）
///
/// 顺带剥掉 markdown 代码块标记和上游附加的说明文字。
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (start <= end).then(|| &text[start..=end])
}

/// 键引号修复：把 `{` 或 `,` 后的裸标识符键改写成带引号的键
///
/// 纯文本改写，不是完整的分词器；字符串值里恰好形如 `, word:` 的
/// 内容会被误改，所以只在解析失败后作为补救手段调用。
pub fn quote_bare_keys(text: &str) -> String {
    static BARE_KEY: OnceLock<Regex> = OnceLock::new();
    let re = BARE_KEY.get_or_init(|| {
        Regex::new(r"([{,]\s*)([A-Za-z_][A-Za-z0-9_]*)\s*:").expect("invalid bare key pattern")
    });

    re.replace_all(text, "${1}\"${2}\":").to_string()
}

/// emotion 和 analysis 必须存在且为非空字符串
fn has_required_fields(value: &Value) -> bool {
    ["emotion", "analysis"].into_iter().all(|field| {
        value
            .get(field)
            .and_then(|v| v.as_str())
            .is_some_and(|s| !s.trim().is_empty())
    })
}
