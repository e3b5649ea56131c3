// src/models/api.rs

use serde::{Deserialize, Serialize};
use serde_json::Value;

// --- 课程材料 (Material / Lesson / Resource) API 响应结构体 ---

/// 后端返回的材料记录。旧版 "lesson" 与通用 "resource" 两种形状都落到这个结构上，
/// 字段差异通过 alias 吸收。
#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct MaterialRecord {
    pub id: i64,
    #[serde(default, alias = "name")]
    pub title: String,
    #[serde(default, rename = "type", alias = "resourceType")]
    pub material_type: Option<String>,
    /// 可能是纯文本、HTML，也可能是 JSON 编码的结构化正文 (字符串或对象)
    #[serde(default, alias = "data")]
    pub content: Option<Value>,
    #[serde(default, alias = "videoUrl")]
    pub link: Option<String>,
    #[serde(default, alias = "attachmentUrl")]
    pub file_url: Option<String>,
    #[serde(default)]
    pub available_from: Option<String>,
    #[serde(default)]
    pub difficulty_level: Option<u8>,
    #[serde(default)]
    pub estimated_time_minutes: Option<u32>,
    #[serde(default)]
    pub prerequisite_material_id: Option<i64>,
    #[serde(default)]
    pub prerequisite_material: Option<MaterialRef>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct MaterialRef {
    pub id: i64,
}

// --- 结构化正文 ---

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct OutlineSection {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
}

// --- 测验 (Quiz) 请求/响应结构体 ---

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct QuizSubmission {
    pub student_id: i64,
    pub score: u32,
    pub max_score: u32,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct QuizResult {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub quiz_id: Option<i64>,
    pub score: u32,
    pub max_score: u32,
    #[serde(default)]
    pub date: Option<String>,
}

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct QuizPayload {
    pub title: String,
    pub description: String,
    pub questions: Vec<QuestionPayload>,
}

#[derive(Serialize, Debug, Clone)]
pub struct QuestionPayload {
    pub text: String,
    pub options: Vec<OptionPayload>,
}

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct OptionPayload {
    pub text: String,
    pub is_correct: bool,
}

// --- 活动日志 ---

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ActivityLogEntry {
    pub user_id: i64,
    pub course_id: Option<i64>,
    pub material_id: i64,
    pub activity_type: String,
}
