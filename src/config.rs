//! 应用配置模块
//!
//! 负责从环境变量加载应用配置，包括：
//! - 服务器监听地址和端口
//! - 上游模型凭证、模型名和 API 地址
//!
//! 配置在启动时加载一次，之后以显式参数传入各组件，
//! 请求处理过程中不再读取环境变量。

use anyhow::{Context, Result};

use crate::providers::gemini::constants::{DEFAULT_GEMINI_MODEL, GEMINI_API_BASE};

/// 应用配置
///
/// 包含服务器运行所需的所有配置项
#[derive(Debug, Clone)]
pub struct Config {
    /// 服务器监听地址（如 "0.0.0.0" 或 "127.0.0.1"）
    pub host: String,
    /// 服务器监听端口
    pub port: u16,
    /// 上游模型 API 凭证；缺失时 `/analyze` 按次返回 500，`/health` 如实上报
    pub api_key: Option<String>,
    /// 上游模型名
    pub model: String,
    /// 上游 API 基础地址
    pub api_base: String,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// # 环境变量
    ///
    /// - `DOCENT_HOST`: 服务器监听地址（默认: "0.0.0.0"）
    /// - `DOCENT_PORT`: 服务器监听端口（默认: 8080）
    /// - `GOOGLE_API_KEY`: 上游模型 API 凭证（允许缺失，只影响分析接口）
    /// - `DOCENT_MODEL`: 上游模型名（默认: [`DEFAULT_GEMINI_MODEL`]）
    /// - `DOCENT_API_BASE`: 上游 API 基础地址（默认: [`GEMINI_API_BASE`]）
    ///
    /// # 错误
    ///
    /// - 如果 `DOCENT_PORT` 不是有效的端口号
    pub fn from_env() -> Result<Self> {
        let host = std::env::var("DOCENT_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());

        let port = std::env::var("DOCENT_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .context("DOCENT_PORT must be a valid port number")?;

        // 空字符串视同未配置
        let api_key = std::env::var("GOOGLE_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty());

        let model =
            std::env::var("DOCENT_MODEL").unwrap_or_else(|_| DEFAULT_GEMINI_MODEL.to_string());

        let api_base =
            std::env::var("DOCENT_API_BASE").unwrap_or_else(|_| GEMINI_API_BASE.to_string());

        Ok(Self {
            host,
            port,
            api_key,
            model,
            api_base,
        })
    }
}
