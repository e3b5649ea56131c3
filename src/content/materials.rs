// src/content/materials.rs

use super::{draft::MaterialDraft, normalize::normalize};
use crate::{
    client::RobustClient,
    constants::{self, api::templates},
    error::*,
    models::{ContentItem, api::{ActivityLogEntry, MaterialRecord}},
};
use anyhow::anyhow;
use log::{info, warn};
use reqwest::Method;
use serde_json::Value;
use std::sync::Arc;

/// 课程材料的增删改，以及查看材料时的活动记录
pub struct MaterialService {
    http_client: Arc<RobustClient>,
}

impl MaterialService {
    pub fn new(http_client: Arc<RobustClient>) -> Self {
        Self { http_client }
    }

    pub async fn create(&self, course_id: i64, user_id: Option<i64>, draft: MaterialDraft) -> AppResult<ContentItem> {
        let mut url = self
            .http_client
            .config()
            .endpoint(templates::COURSE_MATERIALS, &[("courseId", course_id.to_string())])?;
        if let Some(user_id) = user_id {
            url = format!("{}?userId={}", url, user_id);
        }
        info!("在课程 {} 中创建材料 '{}'", course_id, draft.title);
        self.send(Method::POST, &url, draft).await
    }

    pub async fn create_global(&self, user_id: i64, draft: MaterialDraft) -> AppResult<ContentItem> {
        let url = self
            .http_client
            .config()
            .endpoint(templates::CREATE_GLOBAL_LESSON, &[("userId", user_id.to_string())])?;
        info!("为用户 {} 创建个人材料 '{}'", user_id, draft.title);
        self.send(Method::POST, &url, draft).await
    }

    pub async fn update(&self, id: i64, draft: MaterialDraft) -> AppResult<ContentItem> {
        let url = self.material_url(id)?;
        info!("更新材料 {}", id);
        self.send(Method::PUT, &url, draft).await
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let url = self.material_url(id)?;
        info!("删除材料 {}", id);
        self.http_client.delete(&url).await
    }

    /// 记录一次查看。失败只写日志，不影响展示。
    pub async fn log_view(&self, user_id: i64, course_id: Option<i64>, material_id: i64) {
        let entry = ActivityLogEntry {
            user_id,
            course_id,
            material_id,
            activity_type: constants::VIEW_LESSON_ACTIVITY.to_string(),
        };
        let result = async {
            let url = self.http_client.config().endpoint(templates::ACTIVITY_LOG, &[])?;
            self.http_client
                .send_json::<_, Value>(Method::POST, &url, &entry)
                .await
        }
        .await;
        if let Err(e) = result {
            warn!("记录材料 {} 的查看活动失败: {}", material_id, e);
        }
    }

    fn material_url(&self, id: i64) -> AppResult<String> {
        self.http_client
            .config()
            .endpoint(templates::MATERIAL, &[("id", id.to_string())])
    }

    async fn send(&self, method: Method, url: &str, draft: MaterialDraft) -> AppResult<ContentItem> {
        let form = draft.into_form().await?;
        let saved: Option<MaterialRecord> = self.http_client.send_multipart(method, url, form).await?;
        saved
            .map(normalize)
            .ok_or_else(|| AppError::Other(anyhow!("服务器未返回保存后的材料")))
    }
}
