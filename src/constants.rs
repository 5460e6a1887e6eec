// src/constants.rs

pub const UI_WIDTH: usize = 88;
pub const FILENAME_TRUNCATE_LENGTH: usize = 65;
pub const CONFIG_DIR_NAME: &str = concat!(".", clap::crate_name!());
pub const CONFIG_FILE_NAME: &str = "config.json";
pub const LOG_FILE_NAME: &str = concat!(clap::crate_name!(), ".log");
pub const LOG_FALLBACK_FILE_NAME: &str = "fallback.log";
pub const DEFAULT_SAVE_DIR: &str = ".";
pub const DEFAULT_SITE_ROOT: &str = "https://www.coursera.org";
pub const SESSION_COOKIE_NAME: &str = "session";
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// 每次从响应体读取的块大小
pub const DOWNLOAD_CHUNK_SIZE: usize = 8 * 1024;

pub mod naming {
    /// 受限模式 (Windows) 下允许保留的非字母数字字符
    pub const RESTRICTIVE_EXTRA_CHARS: &str = "-_.() ";
    pub const RESTRICTIVE_MAX_CHARS: usize = 50;
    pub const PERMISSIVE_MAX_CHARS: usize = 140;
    pub const REPLACEMENT_CHAR: char = '_';
}

pub mod index_page {
    pub const PATH_TEMPLATE: &str = "{site_root}/{course_id}/lecture/index";
    pub const COURSE_TITLE_SELECTOR: &str = "div#course-logo-text > a > img";
    pub const ITEM_LIST_SELECTOR: &str = "div.item_list";
    pub const RESOURCE_CONTAINER_CLASS: &str = "item_resource";
}

pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const UNEXPECTED: i32 = 1;
    /// 2 留给 clap 的参数错误
    pub const INVALID_COURSE_ID: i32 = 3;
    pub const BAD_AUTH: i32 = 4;
    pub const NETWORK: i32 = 5;
    pub const DOWNLOADS_FAILED: i32 = 6;
    pub const INTERRUPTED: i32 = 130;
}
