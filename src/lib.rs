//! Docent 核心库
//!
//! 模块划分：
//!
//! - `config`: 环境变量配置，启动时加载一次后显式传递
//! - `gateway`: HTTP 服务器、路由、中间件和请求处理
//! - `providers`: 上游多模态模型的统一接口与 Gemini 实现
//! - `normalize`: 上游自由文本回复的容错归一化（核心逻辑）
//! - `artwork`: 艺术品分析结果的领域模型

pub mod artwork;
pub mod commands;
pub mod config;
pub mod gateway;
pub mod normalize;
pub mod providers;
