// src/cli.rs

use crate::{constants, models::KindSelection};
use clap::{Parser, ValueEnum, crate_version};
use std::path::PathBuf;

/// 定义日志输出级别
#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => log::LevelFilter::Off,
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// 下载在线课程的讲座资源 (默认只下载视频)
#[derive(Parser, Debug, Clone)]
#[command(
    version = crate_version!(),
    about,
    long_about = None,
    disable_help_flag = true,
    disable_version_flag = true,
)]
pub struct Cli {
    // --- 必填参数 (Arguments) ---
    /// 课程标识 (课程网址中站点域名后面的那一段)
    pub course_id: String,
    /// 有效的会话 Cookie 值，将以名为 "session" 的 Cookie 发送
    pub session_cookie: String,

    // --- 资源类型 (Resources) ---
    /// 下载每个讲座的 PDF
    #[arg(long, action = clap::ArgAction::SetTrue, help_heading = "Resources")]
    pub pdfs: bool,
    /// 下载每个讲座的 PPTX 幻灯片
    #[arg(long, action = clap::ArgAction::SetTrue, help_heading = "Resources")]
    pub pptx: bool,
    /// 下载每个讲座的字幕 (srt)
    #[arg(long, action = clap::ArgAction::SetTrue, help_heading = "Resources")]
    pub subs: bool,
    /// 不下载视频，适用于只需要 PDF 等其他资源的情况
    #[arg(long = "no_video", visible_alias = "no-video", action = clap::ArgAction::SetTrue, help_heading = "Resources")]
    pub no_video: bool,

    // --- 下载选项 (Options) ---
    /// 设置文件保存目录
    #[arg(short, long, value_name = "DIR", default_value_os_t = PathBuf::from(constants::DEFAULT_SAVE_DIR), help_heading = "Options")]
    pub output: PathBuf,
    /// 强制重新下载已存在的文件
    #[arg(short, long, action = clap::ArgAction::SetTrue, help_heading = "Options")]
    pub force_redownload: bool,
    /// 课程站点根地址，覆盖配置文件中的设置
    #[arg(long, value_name = "URL", help_heading = "Options")]
    pub site_root: Option<String>,

    // --- 通用选项 (General) ---
    /// 显示此帮助信息并退出
    #[arg(short = 'h', long, action = clap::ArgAction::Help, global = true, help_heading = "General")]
    _help: Option<bool>,
    /// 显示版本信息并退出
    #[arg(short = 'V', long, action = clap::ArgAction::Version, global = true, help_heading = "General")]
    _version: Option<bool>,
    /// (隐藏参数) 设置日志文件的输出级别，用于调试
    #[arg(long, value_enum, default_value_t = LogLevel::Off, global = true, hide = true)]
    pub log_level: LogLevel,
}

impl Cli {
    /// 根据开关计算本次需要下载的资源类型
    pub fn kind_selection(&self) -> KindSelection {
        KindSelection {
            pdf: self.pdfs,
            pptx: self.pptx,
            subtitles: self.subs,
            video: !self.no_video,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ResourceKind;

    #[test]
    fn test_video_is_selected_by_default() {
        let cli = Cli::parse_from(["coursera-dl", "ml-001", "cookie"]);
        let selection = cli.kind_selection();
        assert!(selection.is_enabled(ResourceKind::Video));
        assert!(!selection.is_enabled(ResourceKind::Pdf));
        assert!(!selection.is_empty());
        assert_eq!(cli.output, PathBuf::from("."));
    }

    #[test]
    fn test_no_video_without_other_flags_selects_nothing() {
        let cli = Cli::parse_from(["coursera-dl", "ml-001", "cookie", "--no_video"]);
        assert!(cli.kind_selection().is_empty());

        let cli = Cli::parse_from(["coursera-dl", "ml-001", "cookie", "--no-video", "--subs"]);
        let selection = cli.kind_selection();
        assert!(!selection.is_empty());
        assert!(selection.is_enabled(ResourceKind::Subtitles));
    }
}
