use anyhow::{bail, Context, Result};
use document_task_manager::utils::logging;
use document_task_manager::{Config, DocumentTaskManager, GiniApiClient};
use std::path::Path;
use std::sync::Arc;
use tracing::warn;

#[tokio::main]
async fn main() -> Result<()> {
    // 加载配置
    let config = Config::from_env().context("加载配置失败")?;

    // 初始化日志
    logging::init(config.verbose_logging);
    logging::log_startup(&config);

    let mut args = std::env::args().skip(1);
    let Some(image_path) = args.next() else {
        bail!("用法: document_task_manager <图片路径> [doctype]");
    };
    let doc_type = args.next();

    let image = tokio::fs::read(&image_path)
        .await
        .with_context(|| format!("无法读取图片: {}", image_path))?;
    let filename = Path::new(&image_path)
        .file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string();

    let client = Arc::new(GiniApiClient::new(&config)?);
    let manager = DocumentTaskManager::with_config(client, &config);

    // 上传并等待处理完成
    let document = manager
        .create_document_and_wait(&filename, image, doc_type.as_deref())
        .await?;

    if !document.is_complete() {
        warn!("⚠️ 文档处理失败，没有可用的 extractions: {}", document);
        return Ok(());
    }

    let extractions = manager.get_extractions_for_document(&document).await?;
    logging::print_extractions(&document, &extractions);

    Ok(())
}
