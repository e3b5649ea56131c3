// src/client.rs

use crate::{config::AppConfig, constants, error::*};
use log::{debug, error, warn};
use reqwest::{
    Method, Response, StatusCode,
    header::{AUTHORIZATION, HeaderMap, HeaderValue},
    multipart::Form,
};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use std::{sync::Arc, time::Duration};

const ERROR_BODY_PREVIEW: usize = 200;

/// 带 Bearer 认证、租户头和可选重试的 HTTP 客户端
#[derive(Clone)]
pub struct RobustClient {
    pub client: ClientWithMiddleware,
    /// 不经过重试中间件的底层客户端，用于 multipart 和非幂等请求
    raw: reqwest::Client,
    config: Arc<AppConfig>,
    token: Option<String>,
}

impl RobustClient {
    pub fn new(config: Arc<AppConfig>) -> AppResult<Self> {
        let raw = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .connect_timeout(config.connect_timeout)
            .timeout(config.timeout)
            .build()?;

        let retry_policy = ExponentialBackoff::builder()
            .retry_bounds(Duration::from_millis(200), Duration::from_secs(10))
            .build_with_max_retries(config.max_retries);
        let client = ClientBuilder::new(raw.clone())
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build();

        Ok(Self {
            client,
            raw,
            config,
            token: None,
        })
    }

    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|t| !t.is_empty());
        self
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// 每个请求都携带的认证头和租户头
    fn auth_headers(&self) -> AppResult<HeaderMap> {
        let mut headers = HeaderMap::new();
        if let Some(token) = &self.token {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|_| AppError::Validation("Token 含有非法字符".to_string()))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }
        if let Some(tenant) = &self.config.tenant {
            let value = HeaderValue::from_str(tenant)
                .map_err(|_| AppError::Validation(format!("租户标识 '{}' 含有非法字符", tenant)))?;
            headers.insert(constants::api::TENANT_HEADER, value);
        }
        Ok(headers)
    }

    pub async fn get(&self, url: &str) -> AppResult<Response> {
        debug!("GET {}", url);
        let res = self.client.get(url).headers(self.auth_headers()?).send().await?;
        check_status(res).await
    }

    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> AppResult<T> {
        let res = self.get(url).await?;
        parse_body(url, res)
            .await?
            .ok_or_else(|| AppError::Http {
                status: StatusCode::NO_CONTENT,
                message: format!("'{}' 未返回任何内容", url),
            })
    }

    /// GET 请求，204 或空响应返回 `None`
    pub async fn get_optional_json<T: DeserializeOwned>(&self, url: &str) -> AppResult<Option<T>> {
        let res = self.get(url).await?;
        parse_body(url, res).await
    }

    /// 发送 JSON 请求体；204 或空响应返回 `None`。
    /// 只有幂等方法经过重试中间件，POST 等请求最多发送一次。
    pub async fn send_json<B, T>(&self, method: Method, url: &str, body: &B) -> AppResult<Option<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        debug!("{} {}", method, url);
        let headers = self.auth_headers()?;
        let res = if method.is_idempotent() {
            self.client
                .request(method, url)
                .headers(headers)
                .json(body)
                .send()
                .await?
        } else {
            self.raw
                .request(method, url)
                .headers(headers)
                .json(body)
                .send()
                .await?
        };
        let res = check_status(res).await?;
        parse_body(url, res).await
    }

    pub async fn send_multipart<T: DeserializeOwned>(
        &self,
        method: Method,
        url: &str,
        form: Form,
    ) -> AppResult<Option<T>> {
        debug!("{} {} (multipart)", method, url);
        let res = self
            .raw
            .request(method, url)
            .headers(self.auth_headers()?)
            .multipart(form)
            .send()
            .await?;
        let res = check_status(res).await?;
        parse_body(url, res).await
    }

    pub async fn delete(&self, url: &str) -> AppResult<()> {
        debug!("DELETE {}", url);
        let res = self.client.delete(url).headers(self.auth_headers()?).send().await?;
        check_status(res).await.map(drop)
    }
}

/// 将非 2xx 响应转换为对应的错误，与前端的 handleResponse 保持一致
async fn check_status(res: Response) -> AppResult<Response> {
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }
    match status {
        StatusCode::UNAUTHORIZED => {
            warn!("请求 '{}' 未授权 (401)", res.url());
            Err(AppError::TokenInvalid)
        }
        StatusCode::PAYMENT_REQUIRED => Err(AppError::LicenseRequired),
        _ => {
            let url = res.url().to_string();
            let text = res.text().await.unwrap_or_default();
            let message = extract_error_message(&text)
                .unwrap_or_else(|| format!("HTTP Error: {}", status.as_u16()));
            error!("[API ERROR] {} {} {}", status, url, message);
            Err(AppError::Http { status, message })
        }
    }
}

fn extract_error_message(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }
    let message = match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(map)) => match map.get("message") {
            Some(Value::String(m)) => m.clone(),
            _ => Value::Object(map).to_string(),
        },
        Ok(other) => other.to_string(),
        Err(_) => body.to_string(),
    };
    Some(message.chars().take(ERROR_BODY_PREVIEW).collect())
}

async fn parse_body<T: DeserializeOwned>(url: &str, res: Response) -> AppResult<Option<T>> {
    if res.status() == StatusCode::NO_CONTENT {
        return Ok(None);
    }
    let text = res.text().await?;
    if text.trim().is_empty() {
        return Ok(None);
    }
    serde_json::from_str(&text)
        .map(Some)
        .map_err(|source| AppError::ApiParseFailed {
            url: url.to_string(),
            source,
        })
}
