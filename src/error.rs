// src/error.rs

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("认证失败 (Token 无效或已过期)")]
    TokenInvalid,
    #[error("未提供 Access Token，无法访问课程内容")]
    TokenMissing,
    #[error("当前租户没有有效许可证")]
    LicenseRequired,
    #[error("服务器返回错误 {status}: {message}")]
    Http { status: StatusCode, message: String },
    #[error("网络请求失败: {0}")]
    Network(#[from] reqwest::Error),
    #[error("网络中间件错误: {0}")]
    NetworkMiddleware(#[from] reqwest_middleware::Error),
    #[error("I/O 错误: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON 解析错误: {0}")]
    Json(#[from] serde_json::Error),
    #[error("无法解析来自 '{url}' 的API响应: {source}")]
    ApiParseFailed {
        url: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("URL 解析错误: {0}")]
    Url(#[from] url::ParseError),
    #[error("输入校验失败: {0}")]
    Validation(String),
    #[error("内容 '{title}' 尚未开放 (开放时间: {available_from})")]
    ContentLocked {
        title: String,
        available_from: String,
    },
    #[error("测验已提交，无法再修改答案")]
    QuizAlreadySubmitted,
    #[error("用户中断")]
    UserInterrupt,
    #[error("{0}")] // 只打印内部信息，不加任何前缀
    UserInputError(String),
    #[error("未知错误: {0}")]
    Other(#[from] anyhow::Error),
}

impl AppError {
    /// 校验类错误在发送请求前产生，其余均视为网络/解析错误。
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            AppError::Validation(_) | AppError::UserInputError(_) | AppError::QuizAlreadySubmitted
        )
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            AppError::Http { status, .. } => Some(*status),
            AppError::TokenInvalid => Some(StatusCode::UNAUTHORIZED),
            AppError::LicenseRequired => Some(StatusCode::PAYMENT_REQUIRED),
            AppError::Network(e) => e.status(),
            AppError::NetworkMiddleware(reqwest_middleware::Error::Reqwest(e)) => e.status(),
            _ => None,
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
