// src/downloader/mod.rs

mod job;
mod task_processor;
mod task_runner;

pub use job::CourseDownloader;

use crate::{models::DownloadStatus, symbols, ui};
use colored::*;
use log::info;
use std::collections::HashMap;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DownloadStats {
    pub total: usize,
    pub success: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// 记录一次运行中每个计划条目的结果，计划执行完毕后输出报告
#[derive(Debug, Default)]
pub struct DownloadManager {
    stats: DownloadStats,
    failed_downloads: Vec<(String, String)>,
}

impl DownloadManager {
    pub fn new(total_tasks: usize) -> Self {
        info!("开始新一批下载任务，总数: {}", total_tasks);
        Self {
            stats: DownloadStats {
                total: total_tasks,
                ..Default::default()
            },
            failed_downloads: Vec::new(),
        }
    }

    pub fn record_success(&mut self) {
        self.stats.success += 1;
    }

    pub fn record_skip(&mut self, filename: &str) {
        info!("跳过已存在的文件 '{}'", filename);
        self.stats.skipped += 1;
    }

    pub fn record_failure(&mut self, filename: &str, status: DownloadStatus, detail: Option<&str>) {
        log::error!("文件 '{}' 下载失败，状态: {:?}, 详情: {:?}", filename, status, detail);
        self.stats.failed += 1;
        let (_, _, msg) = status.get_display_info();
        self.failed_downloads
            .push((filename.to_string(), msg.to_string()));
    }

    pub fn stats(&self) -> &DownloadStats {
        &self.stats
    }

    pub fn did_all_succeed(&self) -> bool {
        self.stats.failed == 0
    }

    pub fn print_report(&self) {
        let stats = &self.stats;
        info!(
            "下载报告: Total={}, Success={}, Skipped={}, Failed={}",
            stats.total, stats.success, stats.skipped, stats.failed
        );

        if !self.failed_downloads.is_empty() {
            ui::print_sub_header("下载详情报告");
            println!("\n{} 失败的文件 ({}个):", *symbols::ERROR, stats.failed);
            print_grouped_report(&self.failed_downloads, |s| s.red());
        }
        ui::print_sub_header("任务总结");
        if stats.failed == 0 {
            println!(
                "{} 所有 {} 个任务均已成功 ({} 个已存在并跳过)。",
                *symbols::OK,
                stats.total,
                stats.skipped
            );
        } else {
            let summary = format!(
                "{} | {} | {}",
                format!("成功: {}", stats.success).green(),
                format!("失败: {}", stats.failed).red(),
                format!("跳过: {}", stats.skipped).yellow()
            );
            println!("{}", summary);
        }
    }
}

fn print_grouped_report(
    items: &[(String, String)],
    color_fn: fn(ColoredString) -> ColoredString,
) {
    let mut grouped: HashMap<&str, Vec<&str>> = HashMap::new();
    for (filename, reason) in items {
        grouped.entry(reason).or_default().push(filename);
    }
    let mut sorted_reasons: Vec<_> = grouped.into_iter().collect();
    sorted_reasons.sort();
    for (reason, mut filenames) in sorted_reasons {
        println!("  - {}", color_fn(format!("原因: {}", reason).into()));
        filenames.sort();
        for filename in filenames {
            println!("    - {}", filename);
        }
    }
}
