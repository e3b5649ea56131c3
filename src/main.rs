// src/main.rs

use clap::{CommandFactory, FromArgMatches};
use colored::*;
use eduflex_cli::{cli::Cli, error::AppError, logging, run_from_cli};
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
            println!("\n{} 用户强制中断程序。", "[!]".yellow());
            tokio::time::sleep(Duration::from_millis(100)).await;
            std::process::exit(130);
        }
    });

    let bin_name = env::var("CARGO_BIN_NAME").unwrap_or_else(|_| "eduflex-cli".to_string());

    let after_help = format!(
        "示例:\n  # 交互式查看课程 42 的内容\n  {bin} -i -c 42 -u 7\n\n  # 列出个人内容库\n  {bin} -l -g -u 7\n\n  # 打开页面链接中的某个材料\n  {bin} --open \"https://eduflex.example/courses/42?itemId=5\"\n\n  # 以教师身份创建材料\n  {bin} --create-material \"Lektion 1\" -c 42 -r teacher --content \"Hej\"\n\n  # 获取 Token 帮助\n  {bin} --token-help",
        bin = bin_name
    );

    let cmd = Cli::command().after_help(after_help);
    let args = match Cli::from_arg_matches(&cmd.get_matches()) {
        Ok(args) => Arc::new(args),
        Err(e) => e.exit(),
    };

    logging::setup_logging(args.log_level);

    if let Err(e) = run_from_cli(args).await {
        log::error!("程序执行出错: {}", e);
        if matches!(e, AppError::UserInterrupt) {
            std::process::exit(130);
        }
        eprintln!("\n{} {}", "[X]".red(), format!("程序执行出错: {}", e).red());
        if matches!(e, AppError::TokenInvalid | AppError::TokenMissing) {
            eprintln!("{} 运行 --token-help 查看如何获取 Access Token。", "[i]".cyan());
        }
        std::process::exit(1);
    }
}
