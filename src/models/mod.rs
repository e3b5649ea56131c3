// src/models/mod.rs

pub mod api;

use chrono::NaiveDateTime;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 材料的内容类型，对应后端的 `type` 字段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ContentType {
    #[default]
    Lesson,
    Video,
    StudyMaterial,
    Questions,
    Link,
    Epub,
}

impl ContentType {
    /// 未知或缺失的类型一律按 LESSON 处理
    pub fn from_wire(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_ascii_uppercase()).as_deref() {
            Some("VIDEO") => ContentType::Video,
            Some("STUDY_MATERIAL") | Some("DOCUMENT") | Some("FILE") => ContentType::StudyMaterial,
            Some("QUESTIONS") => ContentType::Questions,
            Some("LINK") => ContentType::Link,
            Some("EPUB") => ContentType::Epub,
            _ => ContentType::Lesson,
        }
    }

    pub fn as_wire(&self) -> &'static str {
        match self {
            ContentType::Lesson => "LESSON",
            ContentType::Video => "VIDEO",
            ContentType::StudyMaterial => "STUDY_MATERIAL",
            ContentType::Questions => "QUESTIONS",
            ContentType::Link => "LINK",
            ContentType::Epub => "EPUB",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_wire())
    }
}

/// 查看者角色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Student,
    Teacher,
    Admin,
}

impl Role {
    /// 教师与管理员可以看到尚未开放的内容
    pub fn is_teacher_like(&self) -> bool {
        matches!(self, Role::Teacher | Role::Admin)
    }
}

/// 归一化后的课程内容，供展示层使用
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ContentItem {
    pub id: i64,
    pub title: String,
    pub content_type: ContentType,
    pub content: String,
    pub link: Option<String>,
    pub file_url: Option<String>,
    pub available_from: Option<NaiveDateTime>,
    pub difficulty_level: Option<u8>,
    pub estimated_time_minutes: Option<u32>,
    pub prerequisite_material_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizOption {
    pub id: i64,
    #[serde(default)]
    pub text: String,
    #[serde(default, alias = "correct")]
    pub is_correct: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Question {
    pub id: i64,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub options: Vec<QuizOption>,
}

impl Question {
    pub fn correct_option(&self) -> Option<&QuizOption> {
        self.options.iter().find(|o| o.is_correct)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quiz {
    pub id: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub questions: Vec<Question>,
    #[serde(default, deserialize_with = "crate::utils::lenient_timestamp")]
    pub available_from: Option<NaiveDateTime>,
    #[serde(default, deserialize_with = "crate::utils::lenient_timestamp")]
    pub available_to: Option<NaiveDateTime>,
}

/// 学生自己的作业提交。只读，用于查看成绩与评语。
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub assignment_id: Option<i64>,
    #[serde(default, deserialize_with = "crate::utils::lenient_timestamp")]
    pub submitted_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub file_url: Option<String>,
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub grade: Option<String>,
    #[serde(default)]
    pub feedback: Option<String>,
    #[serde(default, deserialize_with = "crate::utils::lenient_timestamp")]
    pub graded_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub status: Option<String>,
}

impl Submission {
    pub fn is_graded(&self) -> bool {
        self.grade.as_deref().is_some_and(|g| !g.trim().is_empty())
    }
}
