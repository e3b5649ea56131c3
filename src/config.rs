// src/config.rs

pub mod token;

use self::token::load_or_create_external_config;
use crate::{
    cli::Cli,
    constants::{self, api::templates},
    error::{AppError, AppResult},
};
use anyhow::anyhow;
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, time::Duration};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct NetworkConfig {
    pub base_url: Option<String>,
    pub connect_timeout_secs: Option<u64>,
    pub timeout_secs: Option<u64>,
    pub max_retries: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExternalConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accesstoken: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant: Option<String>,
    #[serde(default)]
    pub network: NetworkConfig,
    #[serde(default = "default_url_templates")]
    pub url_templates: HashMap<String, String>,
}

/// 所有模板均以 `{base}` 开头，其余占位符在请求时替换
pub(crate) fn default_url_templates() -> HashMap<String, String> {
    HashMap::from([
        (templates::COURSE_MATERIALS.into(), "{base}/api/courses/{courseId}/materials".into()),
        (templates::MY_LESSONS.into(), "{base}/api/lessons/my?userId={userId}".into()),
        (templates::CREATE_GLOBAL_LESSON.into(), "{base}/api/lessons/create?userId={userId}".into()),
        (templates::MATERIAL.into(), "{base}/api/courses/materials/{id}".into()),
        (templates::COURSE_QUIZZES.into(), "{base}/api/quizzes/course/{courseId}".into()),
        (templates::MY_QUIZZES.into(), "{base}/api/quizzes/my?userId={userId}".into()),
        (templates::QUIZ.into(), "{base}/api/quizzes/{id}".into()),
        (templates::QUIZ_SUBMIT.into(), "{base}/api/quizzes/{id}/submit".into()),
        (templates::ACTIVITY_LOG.into(), "{base}/api/activity/log".into()),
        (
            templates::MY_SUBMISSION.into(),
            "{base}/api/assignments/{assignmentId}/my-submission/{userId}".into(),
        ),
    ])
}

impl ExternalConfig {
    pub(crate) fn default_app_config() -> Self {
        // 网页端不做任何重试，默认 0 次
        let network_config = NetworkConfig {
            base_url: Some(constants::DEFAULT_BASE_URL.into()),
            connect_timeout_secs: Some(10),
            timeout_secs: Some(60),
            max_retries: Some(0),
        };

        Self {
            accesstoken: None,
            tenant: None,
            network: network_config,
            url_templates: default_url_templates(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub base_url: String,
    pub tenant: Option<String>,
    pub user_agent: String,
    pub connect_timeout: Duration,
    pub timeout: Duration,
    pub max_retries: u32,
    pub url_templates: HashMap<String, String>,
}

impl AppConfig {
    pub fn new(args: &Cli) -> AppResult<Self> {
        let external_config = load_or_create_external_config()?;

        // 配置文件里缺失的模板用默认值补齐，方便旧配置升级
        let mut url_templates = default_url_templates();
        url_templates.extend(external_config.url_templates);

        let base_url = args
            .server
            .clone()
            .or(external_config.network.base_url)
            .unwrap_or_else(|| constants::DEFAULT_BASE_URL.to_string());

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            tenant: args.tenant.clone().or(external_config.tenant),
            user_agent: constants::USER_AGENT.into(),
            connect_timeout: Duration::from_secs(
                external_config.network.connect_timeout_secs.unwrap_or(10),
            ),
            timeout: Duration::from_secs(external_config.network.timeout_secs.unwrap_or(60)),
            max_retries: external_config.network.max_retries.unwrap_or(0),
            url_templates,
        })
    }

    /// 根据模板键名和参数生成完整的请求地址
    pub fn endpoint(&self, template_key: &str, params: &[(&str, String)]) -> AppResult<String> {
        let template = self.url_templates.get(template_key).ok_or_else(|| {
            AppError::Other(anyhow!("配置中缺少 URL 模板 '{}'", template_key))
        })?;
        let mut url = template.replace("{base}", &self.base_url);
        for (key, val) in params {
            url = url.replace(&format!("{{{}}}", key), val);
        }
        Ok(url)
    }
}

#[cfg(feature = "testing")]
impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: constants::DEFAULT_BASE_URL.to_string(),
            tenant: None,
            user_agent: "test-agent/1.0".to_string(),
            connect_timeout: Duration::from_secs(5),
            timeout: Duration::from_secs(15),
            max_retries: 0,
            url_templates: default_url_templates(),
        }
    }
}
