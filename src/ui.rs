// src/ui.rs

use crate::{constants, symbols};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};

const BYTES_PER_MB: u64 = 1_000_000;
const BYTES_PER_KB: u64 = 1_000;

pub fn print_header(title: &str) {
    println!("\n{}", "═".repeat(constants::UI_WIDTH));
    println!(" {}", title.cyan().bold());
    println!("{}", "═".repeat(constants::UI_WIDTH));
}

pub fn print_sub_header(title: &str) {
    println!("\n--- {} ---", title.bold());
}

pub fn info(message: &str) {
    println!("{} {}", *symbols::INFO, message);
}

pub fn warn(message: &str) {
    println!("{} {}", *symbols::WARN, message.yellow());
}

/// 单个文件的传输进度，每次更新都在同一行重绘
pub fn new_transfer_progress_bar() -> ProgressBar {
    let pbar = ProgressBar::new_spinner();
    let style = ProgressStyle::with_template("  {msg}").unwrap_or_else(|_| ProgressStyle::default_spinner());
    pbar.set_style(style);
    pbar
}

/// `1234567` -> `1.234` (十进制 MB，保留三位小数)
fn format_mb(bytes: u64) -> String {
    format!("{}.{:03}", bytes / BYTES_PER_MB, bytes / BYTES_PER_KB % 1000)
}

/// 已知总大小时显示 `已下载/总计 MB [百分比%]`，否则只显示已下载量
pub fn format_transfer_status(downloaded: u64, total: Option<u64>) -> String {
    match total.filter(|t| *t > 0) {
        Some(total) => format!(
            "{:>8}/{} MB [{:.2}%]",
            format_mb(downloaded),
            format_mb(total),
            downloaded as f64 * 100.0 / total as f64
        ),
        None => format!("{:>8} MB", format_mb(downloaded)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_transfer_status_with_total() {
        assert_eq!(
            format_transfer_status(1_234_567, Some(10_000_000)),
            "   1.234/10.000 MB [12.35%]"
        );
        assert_eq!(
            format_transfer_status(2_000_000, Some(2_000_000)),
            "   2.000/2.000 MB [100.00%]"
        );
    }

    #[test]
    fn test_format_transfer_status_without_total() {
        assert_eq!(format_transfer_status(8_192, None), "   0.008 MB");
        assert_eq!(format_transfer_status(8_192, Some(0)), "   0.008 MB");
    }
}
