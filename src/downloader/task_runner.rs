// src/downloader/task_runner.rs

use super::{DownloadManager, task_processor::TaskProcessor};
use crate::{DownloadJobContext, models::*, ui};

/// 按计划顺序逐个下载，单个条目失败不影响后续条目。
pub async fn execute_plan(context: &DownloadJobContext, plan: &DownloadPlan) -> DownloadManager {
    let mut manager = DownloadManager::new(plan.len());
    if plan.is_empty() {
        return manager;
    }
    ui::info(&format!("开始处理 {} 个下载条目...", plan.len()));

    let processor = TaskProcessor::new(context.clone());
    for entry in plan.entries() {
        let result = processor.process(entry).await;
        match result.status {
            DownloadStatus::Success => manager.record_success(),
            DownloadStatus::Skipped => manager.record_skip(&result.filename),
            status => manager.record_failure(&result.filename, status, result.message.as_deref()),
        }
        print_result(&result);
    }
    manager
}

// 已存在的文件静默跳过
fn print_result(result: &DownloadResult) {
    if result.status == DownloadStatus::Skipped {
        return;
    }
    let (symbol, color_fn, default_msg) = result.status.get_display_info();
    match &result.message {
        Some(err_msg) if result.status.is_failure() => println!(
            "{} {} {}",
            symbol,
            result.filename,
            color_fn(format!("失败: {} (详情: {})", default_msg, err_msg).into())
        ),
        _ => println!("{} {}", symbol, result.filename),
    }
}
