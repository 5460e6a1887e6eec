// src/extractor/naming.rs

use crate::models::Section;
use regex::Regex;
use std::sync::LazyLock;

static WEEK_SUFFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.*)\(week (\d+)\)$").unwrap());

/// 拆出小节标题末尾的 "(week N)"，没有后缀时周次为 0
pub fn take_week_from_section(header: &str) -> (String, u32) {
    let header = header.trim();
    WEEK_SUFFIX_RE
        .captures(header)
        .and_then(|caps| {
            let week = caps.get(2)?.as_str().parse::<u32>().ok()?;
            Some((caps.get(1)?.as_str().trim().to_string(), week))
        })
        .unwrap_or_else(|| (header.to_string(), 0))
}

/// 去掉讲座标题中从第一个 `(` 开始的注释部分
pub fn clean_lecture_title(raw: &str) -> String {
    let title = match raw.split_once('(') {
        Some((head, _)) => head,
        None => raw,
    };
    title.trim().to_string()
}

/// 按 (周次, 页面顺序) 升序排列
pub fn sort_sections(sections: &mut [Section]) {
    sections.sort_by_key(|s| (s.week, s.page_index));
}
