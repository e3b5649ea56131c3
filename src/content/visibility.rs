// src/content/visibility.rs

use crate::{
    constants,
    models::{ContentItem, Quiz, Role},
};
use chrono::NaiveDateTime;

/// 内容对当前查看者的可见状态，每次展示时重新计算
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// 学生视角下尚未开放
    Locked,
    /// 教师视角下尚未开放，仅显示“Kommande”标记
    Scheduled,
    Visible,
}

impl Visibility {
    pub fn badge(&self) -> Option<&'static str> {
        match self {
            Visibility::Locked => Some(constants::LOCKED_BADGE),
            Visibility::Scheduled => Some(constants::UPCOMING_BADGE),
            Visibility::Visible => None,
        }
    }
}

pub fn visibility_at(available_from: Option<NaiveDateTime>, role: Role, now: NaiveDateTime) -> Visibility {
    match available_from {
        Some(from) if from > now => {
            if role.is_teacher_like() {
                Visibility::Scheduled
            } else {
                Visibility::Locked
            }
        }
        _ => Visibility::Visible,
    }
}

pub fn visibility(item: &ContentItem, role: Role, now: NaiveDateTime) -> Visibility {
    visibility_at(item.available_from, role, now)
}

pub fn quiz_visibility(quiz: &Quiz, role: Role, now: NaiveDateTime) -> Visibility {
    visibility_at(quiz.available_from, role, now)
}

pub fn is_locked(item: &ContentItem, role: Role, now: NaiveDateTime) -> bool {
    visibility(item, role, now) == Visibility::Locked
}
