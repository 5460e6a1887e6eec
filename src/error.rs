// src/error.rs

use crate::constants::exit_codes;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("无法打开讲座索引页 {url}: {source}\n    请确认提供的课程标识 ({course_id}) 是否正确。")]
    IndexFetch {
        url: String,
        course_id: String,
        #[source]
        source: Box<AppError>,
    },
    #[error("站点拒绝了会话 Cookie ({url})，请重新获取 session 值")]
    SessionRejected { url: String },
    #[error("未找到课程标题。这通常意味着会话 Cookie 不正确，未能进入讲座索引页。")]
    TitleNotFound,
    #[error("讲座索引页结构无法识别: {0}")]
    PageStructure(String),
    #[error("已禁用视频下载，但没有启用任何其他资源类型。")]
    NoResourceSelected,
    #[error("{0} 个资源下载失败")]
    DownloadsFailed(usize),
    #[error("网络请求失败: {0}")]
    Network(#[from] reqwest::Error),
    #[error("网络中间件错误: {0}")]
    NetworkMiddleware(#[from] reqwest_middleware::Error),
    #[error("I/O 错误: {0}")]
    Io(#[from] std::io::Error),
    #[error("临时文件持久化失败: {0}")]
    TempFilePersist(#[from] tempfile::PersistError),
    #[error("JSON 解析错误: {0}")]
    Json(#[from] serde_json::Error),
    #[error("URL 解析错误: {0}")]
    Url(#[from] url::ParseError),
    #[error("安全错误: {0}")]
    Security(String),
    #[error("未知错误: {0}")]
    Other(#[from] anyhow::Error),
}

impl AppError {
    /// 进程退出码，每类失败对应一个独立的值
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::IndexFetch { source, .. } => {
                if source.is_http_status() {
                    exit_codes::INVALID_COURSE_ID
                } else {
                    exit_codes::NETWORK
                }
            }
            AppError::SessionRejected { .. }
            | AppError::TitleNotFound
            | AppError::PageStructure(_) => exit_codes::BAD_AUTH,
            AppError::NoResourceSelected => exit_codes::SUCCESS,
            AppError::DownloadsFailed(_) => exit_codes::DOWNLOADS_FAILED,
            AppError::Network(_) | AppError::NetworkMiddleware(_) => exit_codes::NETWORK,
            _ => exit_codes::UNEXPECTED,
        }
    }

    /// 服务器已应答但返回了错误状态码
    pub fn is_http_status(&self) -> bool {
        match self {
            AppError::Network(err)
            | AppError::NetworkMiddleware(reqwest_middleware::Error::Reqwest(err)) => {
                err.is_status()
            }
            _ => false,
        }
    }

    /// 该错误只是提示信息，不应以错误形式展示给用户
    pub fn is_informational(&self) -> bool {
        matches!(self, AppError::NoResourceSelected)
    }
}

pub type AppResult<T> = Result<T, AppError>;
