// src/lib.rs

pub mod cli;
pub mod client;
pub mod config;
pub mod constants;
pub mod downloader;
pub mod error;
pub mod extractor;
pub mod logging;
pub mod models;
pub mod plan;
pub mod symbols;
pub mod ui;
pub mod utils;

use crate::{
    cli::Cli,
    client::SessionClient,
    config::AppConfig,
    downloader::{CourseDownloader, DownloadStats},
    error::{AppError, AppResult},
};
use log::{debug, info};
use std::sync::Arc;

/// 核心的执行上下文，包含所有任务所需的状态和工具
#[derive(Clone)]
pub struct DownloadJobContext {
    pub config: Arc<AppConfig>,
    pub http_client: Arc<SessionClient>,
    pub args: Arc<Cli>,
}

impl DownloadJobContext {
    pub fn new(args: Arc<Cli>, config: Arc<AppConfig>) -> AppResult<Self> {
        let http_client = Arc::new(SessionClient::new(config.clone(), &args.session_cookie)?);
        Ok(Self {
            config,
            http_client,
            args,
        })
    }
}

/// 库的公共入口点，由 `main.rs` 调用
pub async fn run_from_cli(args: Arc<Cli>) -> AppResult<DownloadStats> {
    // 会话 Cookie 属于敏感信息，不写入日志
    debug!(
        "CLI 参数: course_id={}, selection={:?}, output={:?}, force={}",
        args.course_id,
        args.kind_selection(),
        args.output,
        args.force_redownload
    );

    // 在读取配置或访问网络之前完成校验
    if args.kind_selection().is_empty() {
        info!("未选择任何资源类型，直接退出");
        return Err(AppError::NoResourceSelected);
    }

    let config = Arc::new(AppConfig::new(&args)?);
    debug!("加载的应用配置: {:?}", config);

    let context = DownloadJobContext::new(args, config)?;
    CourseDownloader::new(context).run().await
}
