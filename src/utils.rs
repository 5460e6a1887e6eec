// src/utils.rs

use crate::{constants::naming, error::*};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Component, MAIN_SEPARATOR, Path, PathBuf};

/// 文件名清理策略，启动时根据宿主系统选定一次
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NameStyle {
    /// 只保留 ASCII 字母、数字、空格和 `-_.()`，最多 50 个字符
    Restrictive,
    /// 只替换路径分隔符，最多 140 个字符
    Permissive,
}

impl NameStyle {
    pub fn for_host() -> Self {
        if cfg!(windows) {
            NameStyle::Restrictive
        } else {
            NameStyle::Permissive
        }
    }

    pub fn max_chars(&self) -> usize {
        match self {
            NameStyle::Restrictive => naming::RESTRICTIVE_MAX_CHARS,
            NameStyle::Permissive => naming::PERMISSIVE_MAX_CHARS,
        }
    }
}

/// 将课程标题、小节名、讲座标题等转换为可用作单个路径段的字符串。
///
/// 截断按字符计数，不会切断多字节字符。
pub fn sanitize_filename(name: &str, style: NameStyle) -> String {
    let replaced: String = match style {
        NameStyle::Restrictive => name
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || naming::RESTRICTIVE_EXTRA_CHARS.contains(c) {
                    c
                } else {
                    naming::REPLACEMENT_CHAR
                }
            })
            .collect(),
        NameStyle::Permissive => name.replace(MAIN_SEPARATOR, &naming::REPLACEMENT_CHAR.to_string()),
    };
    truncate_chars(&replaced, style.max_chars()).to_string()
}

fn truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &s[..byte_idx],
        None => s,
    }
}

pub fn truncate_text(text: &str, max_width: usize) -> String {
    let mut width = 0;
    let mut end_pos = 0;
    for (i, c) in text.char_indices() {
        width += if c.is_ascii() { 1 } else { 2 };
        if width > max_width.saturating_sub(3) {
            end_pos = i;
            break;
        }
    }
    if end_pos == 0 { text.to_string() } else { format!("{}...", &text[..end_pos]) }
}

/// 将相对路径拼接到输出目录下，拒绝任何 `..` 路径段
pub fn secure_join_path(base_dir: &Path, relative_path: &Path) -> AppResult<PathBuf> {
    let resolved_base = dunce::canonicalize(base_dir)
        .with_context(|| format!("输出目录 '{}' 不存在或无法访问", base_dir.display()))?;
    let mut final_path = resolved_base.clone();
    for component in relative_path.components() {
        match component {
            Component::Normal(part) => final_path.push(part),
            Component::ParentDir => {
                return Err(AppError::Security(format!(
                    "检测到路径遍历 '..': '{}'",
                    relative_path.display()
                )));
            }
            _ => continue,
        }
    }
    if !final_path.starts_with(&resolved_base) {
        return Err(AppError::Security(format!(
            "路径遍历攻击检测: '{}'",
            relative_path.display()
        )));
    }
    Ok(final_path)
}
