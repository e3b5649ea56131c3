// src/lib.rs

pub mod cli;
pub mod client;
pub mod config;
pub mod constants;
pub mod content;
pub mod error;
pub mod logging;
pub mod models;
pub mod quiz;
pub mod symbols;
pub mod ui;
pub mod utils;
pub mod view;
mod workflows;

use crate::{
    cli::Cli,
    client::RobustClient,
    config::AppConfig,
    content::{ApiContentSource, ContentLoader, LoadScope},
    error::{AppError, AppResult},
};
use chrono::NaiveDateTime;
use colored::*;
use log::{debug, info};
use std::sync::Arc;

/// 一次命令执行所需的全部状态
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<AppConfig>,
    pub http_client: Arc<RobustClient>,
    pub args: Arc<Cli>,
}

impl AppContext {
    /// 加载范围：--global 优先，其次 --course
    pub fn scope(&self) -> AppResult<LoadScope> {
        if self.args.global {
            let user_id = self
                .args
                .user_id
                .ok_or_else(|| AppError::UserInputError("--global 需要同时提供 --user-id。".to_string()))?;
            return Ok(LoadScope::Global { user_id });
        }
        self.args
            .course
            .map(LoadScope::Course)
            .ok_or_else(|| AppError::UserInputError("请使用 --course 指定课程，或使用 --global 查看个人内容库。".to_string()))
    }

    pub fn loader(&self) -> ContentLoader {
        ContentLoader::new(Arc::new(ApiContentSource::new(self.http_client.clone())))
    }

    /// 可见性判断使用的当前时间，每次展示时重新读取
    pub fn now(&self) -> NaiveDateTime {
        chrono::Local::now().naive_local()
    }
}

/// 库的公共入口点，由 `main.rs` 调用
pub async fn run_from_cli(args: Arc<Cli>) -> AppResult<()> {
    debug!("CLI 参数: {:?}", args.redacted());
    if args.token_help {
        ui::box_message(
            "获取 Access Token 指南",
            constants::HELP_TOKEN_GUIDE
                .lines()
                .collect::<Vec<_>>()
                .as_slice(),
            |s| s.cyan(),
        );
        println!(
            "\n{} 安全提醒: 请妥善保管你的 Token，不要分享给他人。",
            *symbols::INFO
        );
        return Ok(());
    }

    if let Some(token) = &args.save_token {
        let path = config::token::save_token(token)?;
        println!("\n{} Token 已保存至 {}", *symbols::OK, path.display());
        return Ok(());
    }

    let config = Arc::new(AppConfig::new(&args)?);
    debug!("加载的应用配置: {:?}", config);

    let token = obtain_token(&args)?;
    let http_client = Arc::new(RobustClient::new(config.clone())?.with_token(Some(token)));

    let context = AppContext {
        config,
        http_client,
        args: args.clone(),
    };

    if args.interactive {
        workflows::run_interactive(&context).await
    } else if args.list {
        workflows::run_list(&context).await
    } else if let Some(url) = &args.open {
        workflows::run_open(&context, url).await
    } else if let Some(title) = &args.create_material {
        workflows::run_create_material(&context, title).await
    } else if let Some(id) = args.update_material {
        workflows::run_update_material(&context, id).await
    } else if let Some(ids) = &args.delete_material {
        workflows::run_delete_materials(&context, ids).await
    } else if let Some(title) = &args.create_quiz {
        workflows::run_create_quiz(&context, title).await
    } else if let Some(id) = args.delete_quiz {
        workflows::run_delete_quiz(&context, id).await
    } else if let Some(id) = args.my_submission {
        workflows::run_my_submission(&context, id).await
    } else {
        Ok(())
    }
}

/// 所有网络模式都需要 Token。交互模式下找不到时提示用户输入。
fn obtain_token(args: &Cli) -> AppResult<String> {
    let (token_opt, source) = config::token::resolve_token(args.token.as_deref());
    if let Some(token) = token_opt {
        info!("从 {} 加载 Access Token", source);
        println!("\n{} 已从 {} 加载 Access Token。", *symbols::INFO, source);
        return Ok(token);
    }

    info!("未找到本地 Access Token");
    if !args.interactive {
        return Err(AppError::TokenMissing);
    }
    println!(
        "\n{}",
        format!(
            "{} 未找到本地 Access Token，请输入你的 Token (输入内容不可见)。运行 --token-help 查看获取方法。",
            *symbols::WARN
        )
        .yellow()
    );
    let token = ui::prompt_hidden("Access Token").map_err(|_| AppError::UserInterrupt)?;
    let token = token.trim().to_string();
    if token.is_empty() {
        return Err(AppError::TokenMissing);
    }
    if ui::confirm("是否将此 Token 保存到本地配置文件?", false) {
        let path = config::token::save_token(&token)?;
        println!("{} Token 已保存至 {}", *symbols::OK, path.display());
    }
    Ok(token)
}
