// src/downloader/job.rs

use super::{DownloadStats, task_runner};
use crate::{
    DownloadJobContext, error::*, extractor::CourseIndexExtractor, plan, symbols, ui,
};
use log::{info, warn};
use std::fs;

/// 一次完整的运行：抓取索引页 -> 生成下载计划 -> 按顺序下载
pub struct CourseDownloader {
    context: DownloadJobContext,
}

impl CourseDownloader {
    pub fn new(context: DownloadJobContext) -> Self {
        Self { context }
    }

    pub async fn run(&self) -> AppResult<DownloadStats> {
        let args = &self.context.args;
        info!("开始处理课程: {}", args.course_id);

        let course = CourseIndexExtractor::new(self.context.http_client.clone())
            .extract_course(&args.course_id)
            .await?;
        ui::print_header(&format!("课程: {}", course.title));

        let base_output_dir = &args.output;
        fs::create_dir_all(base_output_dir)?;
        let absolute_path = dunce::canonicalize(base_output_dir)?;
        info!("文件将保存到目录: \"{}\"", absolute_path.display());
        println!(
            "{} 文件将保存到目录: \"{}\"",
            *symbols::INFO,
            absolute_path
                .join(plan::course_dir(&course, self.context.config.name_style))
                .display()
        );

        let selection = args.kind_selection();
        let download_plan = plan::build_plan(
            &course,
            &selection,
            &absolute_path,
            self.context.config.name_style,
        )?;

        if download_plan.is_empty() {
            warn!("课程 '{}' 中没有符合条件的资源", course.id);
            ui::warn("索引页中没有找到所选类型的资源。");
            return Ok(DownloadStats::default());
        }

        let manager = task_runner::execute_plan(&self.context, &download_plan).await;
        manager.print_report();

        if manager.did_all_succeed() {
            println!("\n{} 所有请求的资源均已下载完成。", *symbols::OK);
            Ok(manager.stats().clone())
        } else {
            Err(AppError::DownloadsFailed(manager.stats().failed))
        }
    }
}
