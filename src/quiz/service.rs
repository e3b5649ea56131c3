// src/quiz/service.rs

use super::{editor::QuizDraft, runner::QuizScore};
use crate::{
    client::RobustClient,
    constants::api::templates,
    error::*,
    models::api::{QuizResult, QuizSubmission},
};
use log::info;
use reqwest::Method;
use serde_json::Value;
use std::sync::Arc;

pub struct QuizService {
    http_client: Arc<RobustClient>,
}

impl QuizService {
    pub fn new(http_client: Arc<RobustClient>) -> Self {
        Self { http_client }
    }

    pub async fn create(&self, course_id: i64, user_id: Option<i64>, draft: &QuizDraft) -> AppResult<()> {
        let payload = draft.to_payload()?;
        let mut url = self
            .http_client
            .config()
            .endpoint(templates::COURSE_QUIZZES, &[("courseId", course_id.to_string())])?;
        if let Some(user_id) = user_id {
            url = format!("{}?userId={}", url, user_id);
        }
        info!("在课程 {} 中创建测验 '{}'", course_id, payload.title);
        self.http_client
            .send_json::<_, Value>(Method::POST, &url, &payload)
            .await
            .map(drop)
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let url = self
            .http_client
            .config()
            .endpoint(templates::QUIZ, &[("id", id.to_string())])?;
        info!("删除测验 {}", id);
        self.http_client.delete(&url).await
    }

    /// 提交本地评分结果。后端可能不返回内容，此时返回 `None`。
    pub async fn submit(&self, quiz_id: i64, student_id: i64, score: QuizScore) -> AppResult<Option<QuizResult>> {
        let url = self
            .http_client
            .config()
            .endpoint(templates::QUIZ_SUBMIT, &[("id", quiz_id.to_string())])?;
        let payload = QuizSubmission {
            student_id,
            score: score.score,
            max_score: score.max_score,
        };
        info!(
            "提交测验 {} 的结果: {}/{}",
            quiz_id, score.score, score.max_score
        );
        let body: Option<Value> = self.http_client.send_json(Method::POST, &url, &payload).await?;
        // 后端返回的结构不稳定，解析不了时只保留本地结果
        Ok(body.and_then(|v| serde_json::from_value(v).ok()))
    }
}
