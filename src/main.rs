// src/main.rs

use clap::{CommandFactory, FromArgMatches};
use colored::*;
use coursera_dl::{cli::Cli, constants::exit_codes, logging, run_from_cli, symbols};
use std::{env, sync::Arc, time::Duration};

#[tokio::main]
async fn main() {
    // 为 Windows 终端启用 ANSI 颜色支持。
    #[cfg(windows)]
    {
        colored::control::set_virtual_terminal(true).ok();
    }
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            println!("\n{} 用户强制中断程序。", *symbols::WARN);
            tokio::time::sleep(Duration::from_millis(100)).await;
            std::process::exit(exit_codes::INTERRUPTED);
        }
    });

    let bin_name = env::var("CARGO_BIN_NAME").unwrap_or_else(|_| clap::crate_name!().to_string());

    let after_help = format!(
        "示例:\n  # 只下载视频 (默认)\n  {bin} ml-005 <SESSION>\n\n  # 下载 PDF 和字幕，不下载视频\n  {bin} ml-005 <SESSION> --pdfs --subs --no_video\n\n  # 指定保存目录\n  {bin} ml-005 <SESSION> --pptx -o ~/courses",
        bin = bin_name
    );

    let cmd = Cli::command().after_help(after_help);
    let args = match Cli::from_arg_matches(&cmd.get_matches()) {
        Ok(args) => Arc::new(args),
        Err(e) => e.exit(),
    };
    logging::init_logger(args.log_level);

    if let Err(e) = run_from_cli(args).await {
        if e.is_informational() {
            println!("\n{} {}", *symbols::INFO, e);
            std::process::exit(e.exit_code());
        }
        log::error!("程序执行出错: {}", e);
        eprintln!("\n{} {}", *symbols::ERROR, format!("程序执行出错: {}", e).red());
        std::process::exit(e.exit_code());
    }
}
