// src/models/mod.rs

use crate::error::AppError;
use crate::symbols;
use colored::{ColoredString, Colorize};
use std::{fmt, path::PathBuf};
use url::Url;

// 1. 资源类型：索引页中每个讲座的资源链接总是按 pdf, pptx, srt, mp4 的顺序循环出现
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Pdf,
    Pptx,
    Subtitles,
    Video,
}

impl ResourceKind {
    /// 按页面上的循环顺序排列
    pub const ALL: [ResourceKind; 4] = [
        ResourceKind::Pdf,
        ResourceKind::Pptx,
        ResourceKind::Subtitles,
        ResourceKind::Video,
    ];

    /// 第 k 个资源链接的类型为 `k mod 4`
    pub fn from_link_index(index: usize) -> Self {
        Self::ALL[index % Self::ALL.len()]
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ResourceKind::Pdf => "pdf",
            ResourceKind::Pptx => "pptx",
            ResourceKind::Subtitles => "srt",
            ResourceKind::Video => "mp4",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ResourceKind::Pdf => "PDF",
            ResourceKind::Pptx => "幻灯片",
            ResourceKind::Subtitles => "字幕",
            ResourceKind::Video => "视频",
        };
        f.write_str(name)
    }
}

// 2. 用户选择下载的资源类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KindSelection {
    pub pdf: bool,
    pub pptx: bool,
    pub subtitles: bool,
    pub video: bool,
}

impl KindSelection {
    pub fn all() -> Self {
        Self {
            pdf: true,
            pptx: true,
            subtitles: true,
            video: true,
        }
    }

    pub fn is_enabled(&self, kind: ResourceKind) -> bool {
        match kind {
            ResourceKind::Pdf => self.pdf,
            ResourceKind::Pptx => self.pptx,
            ResourceKind::Subtitles => self.subtitles,
            ResourceKind::Video => self.video,
        }
    }

    pub fn is_empty(&self) -> bool {
        !ResourceKind::ALL.iter().any(|k| self.is_enabled(*k))
    }

    pub fn enabled_kinds(&self) -> Vec<ResourceKind> {
        ResourceKind::ALL
            .into_iter()
            .filter(|k| self.is_enabled(*k))
            .collect()
    }
}

// 3. 从索引页解析出的课程结构
#[derive(Debug, Clone)]
pub struct Course {
    pub id: String,
    pub title: String,
    /// 已按 (周次, 页面顺序) 排好序
    pub sections: Vec<Section>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub name: String,
    /// 0 表示标题中没有 "(week N)" 后缀
    pub week: u32,
    /// 在页面上出现的位置 (从 0 开始)，作为排序的次要键
    pub page_index: usize,
    pub lectures: Vec<Lecture>,
}

impl Section {
    /// 目录名中使用的显示名，周次会重新附加在末尾
    pub fn display_name(&self) -> String {
        if self.week > 0 {
            format!("{} (week {})", self.name, self.week)
        } else {
            self.name.clone()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lecture {
    pub title: String,
    /// 在小节内的序号，从 1 开始
    pub ordinal: usize,
    pub resources: Vec<Resource>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    pub kind: ResourceKind,
    pub url: Url,
}

// 4. 下载计划
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanEntry {
    pub section_ordinal: usize,
    pub lecture_ordinal: usize,
    pub kind: ResourceKind,
    pub url: Url,
    pub destination: PathBuf,
}

impl PlanEntry {
    pub fn file_name(&self) -> String {
        self.destination
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| self.destination.display().to_string())
    }
}

/// 构建完成后只读
#[derive(Debug, Clone, Default)]
pub struct DownloadPlan {
    entries: Vec<PlanEntry>,
}

impl DownloadPlan {
    pub(crate) fn new(entries: Vec<PlanEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[PlanEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// 5. 单个下载任务的结果
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum DownloadStatus {
    Success,
    Skipped,
    HttpError,
    NetworkError,
    ConnectionError,
    TimeoutError,
    IoError,
    UnexpectedError,
}

impl DownloadStatus {
    pub fn get_display_info(
        &self,
    ) -> (
        &'static ColoredString,
        fn(ColoredString) -> ColoredString,
        &'static str,
    ) {
        match self {
            DownloadStatus::Success => (&symbols::OK, |s| s.green(), "下载成功"),
            DownloadStatus::Skipped => (&symbols::INFO, |s| s.cyan(), "文件已存在，跳过"),
            DownloadStatus::HttpError => (&symbols::ERROR, |s| s.red(), "服务器返回错误"),
            DownloadStatus::NetworkError => (&symbols::ERROR, |s| s.red(), "网络请求失败"),
            DownloadStatus::ConnectionError => (&symbols::ERROR, |s| s.red(), "无法建立连接"),
            DownloadStatus::TimeoutError => (&symbols::WARN, |s| s.yellow(), "网络连接超时"),
            DownloadStatus::IoError => (&symbols::ERROR, |s| s.red(), "本地文件读写错误"),
            DownloadStatus::UnexpectedError => {
                (&symbols::ERROR, |s| s.red(), "发生未预期的程序错误")
            }
        }
    }

    pub fn is_failure(&self) -> bool {
        !matches!(self, DownloadStatus::Success | DownloadStatus::Skipped)
    }
}

impl From<&AppError> for DownloadStatus {
    fn from(error: &AppError) -> Self {
        match error {
            AppError::Network(err)
            | AppError::NetworkMiddleware(reqwest_middleware::Error::Reqwest(err)) => {
                if err.is_timeout() {
                    DownloadStatus::TimeoutError
                } else if err.is_connect() {
                    DownloadStatus::ConnectionError
                } else if err.is_status() {
                    DownloadStatus::HttpError
                } else {
                    DownloadStatus::NetworkError
                }
            }
            AppError::NetworkMiddleware(_) => DownloadStatus::NetworkError,
            AppError::SessionRejected { .. } => DownloadStatus::HttpError,
            AppError::Io(_) | AppError::TempFilePersist(_) | AppError::Security(_) => {
                DownloadStatus::IoError
            }
            _ => DownloadStatus::UnexpectedError,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DownloadResult {
    pub filename: String,
    pub status: DownloadStatus,
    pub message: Option<String>,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum DownloadAction {
    Skip,
    DownloadNew,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_follows_link_index_modulo_four() {
        let kinds: Vec<_> = (0..5).map(ResourceKind::from_link_index).collect();
        assert_eq!(
            kinds,
            vec![
                ResourceKind::Pdf,
                ResourceKind::Pptx,
                ResourceKind::Subtitles,
                ResourceKind::Video,
                ResourceKind::Pdf,
            ]
        );
        let extensions: Vec<_> = ResourceKind::ALL.iter().map(|k| k.extension()).collect();
        assert_eq!(extensions, vec!["pdf", "pptx", "srt", "mp4"]);
    }

    #[test]
    fn test_section_display_name_keeps_week() {
        let mut section = Section {
            name: "Intro".into(),
            week: 1,
            page_index: 0,
            lectures: vec![],
        };
        assert_eq!(section.display_name(), "Intro (week 1)");
        section.week = 0;
        assert_eq!(section.display_name(), "Intro");
    }

    #[test]
    fn test_kind_selection() {
        assert!(KindSelection::default().is_empty());
        let selection = KindSelection {
            pdf: true,
            video: true,
            ..Default::default()
        };
        assert_eq!(
            selection.enabled_kinds(),
            vec![ResourceKind::Pdf, ResourceKind::Video]
        );
        assert_eq!(KindSelection::all().enabled_kinds().len(), 4);
    }
}
