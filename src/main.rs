//! Docent - 艺术品分析 API 服务
//!
//! 一个轻量级的 HTTP 服务，接收 base64 编码的艺术品图片，
//! 转发给多模态大模型分析，并把自由文本回复整理成固定结构的
//! JSON 结果（标题、作者、赏析、情绪、引导问题）。
//!
//! # 功能特性
//!
//! - 单接口图片分析，输出结构稳定
//! - 对上游回复的容错归一化（边界提取、键引号修复、兜底替换）
//! - 上游传输错误状态码原样透传，内容错误本地吸收
//!
//! # 命令行接口
//!
//! - `serve`: 启动 API 服务器
//! - `test`: 向本地服务器发送测试请求

use anyhow::Result;
use clap::{Parser, Subcommand};
use docent::commands;
use docent::config::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Docent CLI
#[derive(Parser)]
#[command(name = "docent")]
#[command(about = "Artwork Analysis API Service", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// 可用的命令
#[derive(Subcommand)]
enum Commands {
    /// 启动 API 服务器
    Serve,
    /// 向本地服务器发送测试请求
    Test,
}

#[tokio::main]
async fn main() -> Result<()> {
    // 加载 .env 文件（如果存在）
    if let Ok(dotenv_path) = std::env::var("DOCENT_ENV_FILE") {
        dotenvy::from_path(&dotenv_path).ok();
    } else {
        dotenvy::dotenv().ok();
    }

    // 初始化日志系统
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "docent=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_thread_names(false),
        )
        .init();

    // 解析命令行参数和配置
    let cli = Cli::parse();
    let config = Config::from_env()?;

    // 执行相应的命令
    match cli.command {
        Commands::Serve => commands::serve_command(config).await,
        Commands::Test => commands::test_command(config).await,
    }
}
