// src/downloader/task_processor.rs

use crate::{
    DownloadJobContext, constants, error::*, models::*, symbols, ui, utils,
};
use futures::TryStreamExt;
use log::{debug, error, info};
use std::{fs, io::Write as IoWrite};
use tempfile::NamedTempFile;
use tokio::io::AsyncReadExt;
use tokio_util::io::StreamReader;

/// `TaskProcessor` 封装了处理单个下载条目的所有逻辑。
pub struct TaskProcessor {
    context: DownloadJobContext,
}

impl TaskProcessor {
    pub fn new(context: DownloadJobContext) -> Self {
        Self { context }
    }

    /// 处理单个条目。失败会被转换为 `DownloadResult`，不会中断整个计划。
    pub async fn process(&self, entry: &PlanEntry) -> DownloadResult {
        let filename = entry.file_name();
        let attempt_result: AppResult<DownloadStatus> = async {
            if Self::prepare_download_action(entry, self.context.args.force_redownload)
                == DownloadAction::Skip
            {
                return Ok(DownloadStatus::Skipped);
            }
            if let Some(parent) = entry.destination.parent() {
                fs::create_dir_all(parent)?;
            }
            self.download_to_file(entry).await?;
            Ok(DownloadStatus::Success)
        }
        .await;

        match attempt_result {
            Ok(status) => DownloadResult {
                filename,
                status,
                message: None,
            },
            Err(e) => {
                error!("处理条目 '{}' 时发生错误: {}", entry.destination.display(), e);
                DownloadResult {
                    filename,
                    status: DownloadStatus::from(&e),
                    message: Some(e.to_string()),
                }
            }
        }
    }

    /// 目标文件已存在时跳过，不发出任何网络请求
    pub(super) fn prepare_download_action(entry: &PlanEntry, force_redownload: bool) -> DownloadAction {
        if !entry.destination.exists() {
            return DownloadAction::DownloadNew;
        }
        if force_redownload {
            info!("用户强制重新下载文件: {:?}", entry.destination);
            return DownloadAction::DownloadNew;
        }
        DownloadAction::Skip
    }

    /// 以固定大小的块流式写入临时文件，全部读完后再移动到目标路径。
    async fn download_to_file(&self, entry: &PlanEntry) -> AppResult<u64> {
        let display_name = utils::truncate_text(&entry.file_name(), constants::FILENAME_TRUNCATE_LENGTH);
        println!("{} 正在下载 [{}]: {}", *symbols::FETCH, entry.kind, display_name);

        let res = self.context.http_client.get(&entry.url).await?;
        let total = res.content_length();
        debug!("'{}' 声明的大小: {:?}", entry.url, total);

        let parent = entry
            .destination
            .parent()
            .ok_or_else(|| AppError::Security(format!("无效的目标路径: {:?}", entry.destination)))?;
        let mut temp_file = NamedTempFile::new_in(parent)?;

        let stream = res.bytes_stream().map_err(std::io::Error::other);
        let mut reader = StreamReader::new(Box::pin(stream));
        let mut buffer = vec![0u8; constants::DOWNLOAD_CHUNK_SIZE];
        let mut downloaded: u64 = 0;

        let pbar = ui::new_transfer_progress_bar();
        pbar.set_message(ui::format_transfer_status(0, total));
        loop {
            let bytes_read = reader.read(&mut buffer).await?;
            if bytes_read == 0 {
                break;
            }
            temp_file.write_all(&buffer[..bytes_read])?;
            downloaded += bytes_read as u64;
            pbar.set_message(ui::format_transfer_status(downloaded, total));
        }
        pbar.finish_and_clear();

        temp_file.flush()?;
        temp_file.persist(&entry.destination)?;
        info!("文件 '{}' 下载完成 ({} 字节)", entry.destination.display(), downloaded);
        Ok(downloaded)
    }
}
