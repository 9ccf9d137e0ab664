/// 日志工具模块
///
/// 提供日志初始化和输出的辅助函数
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::models::{Document, ExtractionMap};

/// 初始化日志
///
/// 优先使用 `RUST_LOG`，否则按 `verbose` 选择 debug / info 级别。
/// 重复调用是安全的（测试中常见）
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!(
        "🚀 程序启动 - {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("🌐 API 地址: {}", config.api_base_url);
    info!("⏱️ 轮询间隔: {} 秒", config.polling_interval_secs);
    info!("{}", "=".repeat(60));
}

/// 打印文档的 extractions
pub fn print_extractions(document: &Document, extractions: &ExtractionMap) {
    info!("\n{}", "─".repeat(60));
    info!("📊 {} 共 {} 个 extractions", document, extractions.len());
    info!("{}", "─".repeat(60));
    for (name, extraction) in extractions {
        info!(
            "  {:<24} {:<12} {}",
            name,
            extraction.entity,
            truncate_text(&extraction.value, 60)
        );
    }
}

/// 截断长文本用于日志显示
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
