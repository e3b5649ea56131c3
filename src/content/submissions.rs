// src/content/submissions.rs

use crate::{client::RobustClient, constants::api::templates, error::*, models::Submission};
use log::{debug, info};
use reqwest::StatusCode;
use std::sync::Arc;

/// 查询学生自己的作业提交
pub struct SubmissionService {
    http_client: Arc<RobustClient>,
}

impl SubmissionService {
    pub fn new(http_client: Arc<RobustClient>) -> Self {
        Self { http_client }
    }

    /// 尚未提交时返回 `None`。后端对此可能返回 204、空响应或 404。
    pub async fn my_submission(&self, assignment_id: i64, user_id: i64) -> AppResult<Option<Submission>> {
        let url = self.http_client.config().endpoint(
            templates::MY_SUBMISSION,
            &[
                ("assignmentId", assignment_id.to_string()),
                ("userId", user_id.to_string()),
            ],
        )?;
        info!("查询用户 {} 在作业 {} 中的提交", user_id, assignment_id);
        match self.http_client.get_optional_json::<Submission>(&url).await {
            Err(e) if e.status() == Some(StatusCode::NOT_FOUND) => {
                debug!("作业 {} 没有找到提交: {}", assignment_id, e);
                Ok(None)
            }
            other => other,
        }
    }
}
