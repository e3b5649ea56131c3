// src/content/source.rs

use crate::{
    client::RobustClient,
    constants::api::templates,
    error::*,
    models::{Quiz, api::MaterialRecord},
};
use async_trait::async_trait;
use log::debug;
use std::{fmt, sync::Arc};

/// 加载范围：单个课程，或某个用户的个人内容库
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadScope {
    Course(i64),
    Global { user_id: i64 },
}

impl LoadScope {
    pub fn course_id(&self) -> Option<i64> {
        match self {
            LoadScope::Course(id) => Some(*id),
            LoadScope::Global { .. } => None,
        }
    }
}

impl fmt::Display for LoadScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadScope::Course(id) => write!(f, "课程 {}", id),
            LoadScope::Global { user_id } => write!(f, "用户 {} 的个人内容库", user_id),
        }
    }
}

/// 课程内容的数据来源。加载器只依赖这个接口，便于替换实现。
#[async_trait]
pub trait ContentSource: Send + Sync {
    async fn fetch_materials(&self, scope: LoadScope) -> AppResult<Vec<MaterialRecord>>;
    async fn fetch_quizzes(&self, scope: LoadScope) -> AppResult<Vec<Quiz>>;
}

/// 基于 REST API 的实现
pub struct ApiContentSource {
    http_client: Arc<RobustClient>,
}

impl ApiContentSource {
    pub fn new(http_client: Arc<RobustClient>) -> Self {
        Self { http_client }
    }

    fn scoped_url(&self, scope: LoadScope, course_key: &str, global_key: &str) -> AppResult<String> {
        let config = self.http_client.config();
        match scope {
            LoadScope::Course(id) => config.endpoint(course_key, &[("courseId", id.to_string())]),
            LoadScope::Global { user_id } => {
                config.endpoint(global_key, &[("userId", user_id.to_string())])
            }
        }
    }
}

#[async_trait]
impl ContentSource for ApiContentSource {
    async fn fetch_materials(&self, scope: LoadScope) -> AppResult<Vec<MaterialRecord>> {
        let url = self.scoped_url(scope, templates::COURSE_MATERIALS, templates::MY_LESSONS)?;
        debug!("加载{}的材料: {}", scope, url);
        self.http_client.get_json(&url).await
    }

    async fn fetch_quizzes(&self, scope: LoadScope) -> AppResult<Vec<Quiz>> {
        let url = self.scoped_url(scope, templates::COURSE_QUIZZES, templates::MY_QUIZZES)?;
        debug!("加载{}的测验: {}", scope, url);
        self.http_client.get_json(&url).await
    }
}
