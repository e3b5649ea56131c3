// src/view.rs

use crate::{
    constants,
    content::{
        LoadedContent,
        dispatch::{Renderer, select_renderer},
        visibility::{Visibility, quiz_visibility, visibility},
    },
    error::*,
    models::{ContentItem, Quiz, Role, Submission},
    quiz::{AnswerOutcome, QuizRunner, QuizScore},
    symbols, ui, utils,
};
use chrono::NaiveDateTime;
use colored::*;

/// 列表中的一个可选条目
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entry {
    Material(i64),
    Quiz(i64),
}

fn badge_suffix(vis: Visibility) -> String {
    match (vis, vis.badge()) {
        (Visibility::Locked, Some(badge)) => format!(" {} {}", *symbols::LOCK, badge.red()),
        (_, Some(badge)) => format!(" [{}]", badge.yellow()),
        (_, None) => String::new(),
    }
}

pub fn material_line(item: &ContentItem, role: Role, now: NaiveDateTime) -> String {
    let renderer = select_renderer(item);
    format!(
        "#{:<5} {} ({}){}",
        item.id,
        utils::truncate_text(&item.title, constants::TITLE_TRUNCATE_LENGTH),
        renderer.label(),
        badge_suffix(visibility(item, role, now))
    )
}

pub fn quiz_line(quiz: &Quiz, role: Role, now: NaiveDateTime) -> String {
    format!(
        "#{:<5} {} (Quiz, {} frågor){}{}",
        quiz.id,
        utils::truncate_text(&quiz.title, constants::TITLE_TRUNCATE_LENGTH),
        quiz.questions.len(),
        badge_suffix(quiz_visibility(quiz, role, now)),
        quiz_deadline(quiz)
            .map(|d| format!(" [{}]", d))
            .unwrap_or_default()
    )
}

/// 截止时间仅作展示，不影响是否可作答
pub fn quiz_deadline(quiz: &Quiz) -> Option<String> {
    quiz.available_to
        .as_ref()
        .map(|to| format!("Tillgänglig till {}", utils::format_timestamp(to)))
}

/// 材料在前、测验在后，返回菜单文本及其对应的条目
pub fn menu_entries(loaded: &LoadedContent, role: Role, now: NaiveDateTime) -> Vec<(String, Entry)> {
    let materials = loaded
        .materials
        .iter()
        .map(|m| (material_line(m, role, now), Entry::Material(m.id)));
    let quizzes = loaded
        .quizzes
        .iter()
        .map(|q| (quiz_line(q, role, now), Entry::Quiz(q.id)));
    materials.chain(quizzes).collect()
}

pub fn print_listing(loaded: &LoadedContent, role: Role, now: NaiveDateTime) {
    if loaded.is_empty() {
        println!("\n{} 没有可显示的内容。", *symbols::INFO);
        return;
    }
    if !loaded.materials.is_empty() {
        ui::print_sub_header(&format!("材料 ({})", loaded.materials.len()));
        for item in &loaded.materials {
            println!("  {}", material_line(item, role, now));
        }
    }
    if !loaded.quizzes.is_empty() {
        ui::print_sub_header(&format!("测验 ({})", loaded.quizzes.len()));
        for quiz in &loaded.quizzes {
            println!("  {}", quiz_line(quiz, role, now));
        }
    }
}

/// 材料详情。学生视角下未开放的内容不输出正文，直接返回 `ContentLocked`。
pub fn material_lines(item: &ContentItem, role: Role, now: NaiveDateTime) -> AppResult<Vec<String>> {
    let vis = visibility(item, role, now);
    if vis == Visibility::Locked {
        return Err(AppError::ContentLocked {
            title: item.title.clone(),
            available_from: item
                .available_from
                .as_ref()
                .map(utils::format_timestamp)
                .unwrap_or_default(),
        });
    }

    let mut lines = vec![format!("Typ: {}", item.content_type)];
    if vis == Visibility::Scheduled
        && let Some(from) = &item.available_from
    {
        lines.push(format!("{}: {}", constants::UPCOMING_BADGE, utils::format_timestamp(from)));
    }
    if let Some(level) = item.difficulty_level {
        lines.push(format!("Svårighetsgrad: {}/5", level));
    }
    if let Some(minutes) = item.estimated_time_minutes {
        lines.push(format!("Beräknad tid: {} min", minutes));
    }
    if let Some(id) = item.prerequisite_material_id {
        lines.push(format!("Förkunskapskrav: #{}", id));
    }
    lines.push(String::new());

    let renderer = select_renderer(item);
    match &renderer {
        Renderer::EmbeddedVideo { embed_url } => lines.push(format!("YouTube: {}", embed_url)),
        Renderer::VideoFile { url } => lines.push(format!("Video: {}", url)),
        Renderer::Image { url } => lines.push(format!("Bild: {}", url)),
        Renderer::Ebook { url } => lines.push(format!("E-bok: {}", url)),
        Renderer::Download { url, editable } => {
            lines.push(format!("Ladda ner: {}", url));
            if *editable {
                lines.push("(Kan öppnas i dokumentredigeraren)".to_string());
            }
        }
        Renderer::RichText => {}
    }
    // 非 YouTube 的链接（Vimeo、普通网页等）原样给出
    if let Some(link) = item.link.as_deref().filter(|l| !l.trim().is_empty())
        && !matches!(renderer, Renderer::EmbeddedVideo { .. })
    {
        lines.push(format!("Länk: {}", link));
    }

    if item.content.trim().is_empty() {
        if item.link.is_none() && item.file_url.is_none() {
            lines.push(constants::CONTENT_PLACEHOLDER.to_string());
        }
    } else {
        lines.extend(item.content.lines().map(String::from));
    }
    Ok(lines)
}

pub fn print_material(item: &ContentItem, role: Role, now: NaiveDateTime) -> AppResult<()> {
    let lines = material_lines(item, role, now)?;
    let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
    ui::box_message(&format!("#{} {}", item.id, item.title), &refs, |s| s.cyan());
    Ok(())
}

/// 作业提交概要：提交时间、附件、成绩与评语
pub fn submission_lines(submission: &Submission) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(at) = &submission.submitted_at {
        lines.push(format!("Inlämnad: {}", utils::format_timestamp(at)));
    }
    if let Some(file) = submission.file_name.as_deref().or(submission.file_url.as_deref()) {
        lines.push(format!("Fil: {}", file));
    }
    if submission.is_graded() {
        lines.push(format!("Betyg: {}", submission.grade.as_deref().unwrap_or_default().trim()));
        if let Some(feedback) = submission.feedback.as_deref().filter(|f| !f.trim().is_empty()) {
            lines.push(format!("Feedback: \"{}\"", feedback.trim()));
        }
    } else {
        lines.push("Väntar på bedömning".to_string());
    }
    lines
}

pub fn score_line(score: QuizScore) -> String {
    format!("Resultat: {} / {}", score.score, score.max_score)
}

/// 提交后的逐题回顾
pub fn review_lines(runner: &QuizRunner<'_>) -> Vec<String> {
    runner
        .review()
        .into_iter()
        .enumerate()
        .map(|(i, (question, outcome))| {
            let mark = match outcome {
                AnswerOutcome::Correct => symbols::OK.to_string(),
                AnswerOutcome::Wrong => symbols::ERROR.to_string(),
                AnswerOutcome::Unanswered => symbols::WARN.to_string(),
            };
            let correct = question
                .correct_option()
                .map(|o| o.text.as_str())
                .unwrap_or("-");
            format!("{} {}. {} (Rätt svar: {})", mark, i + 1, question.text, correct)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, TimeDelta};

    fn now() -> NaiveDateTime {
        Local::now().naive_local()
    }

    fn future_item() -> ContentItem {
        ContentItem {
            id: 3,
            title: "Prov imorgon".into(),
            content: "Hemligt".into(),
            available_from: Some(now() + TimeDelta::days(1)),
            ..Default::default()
        }
    }

    #[test]
    fn test_locked_material_withholds_body() {
        let err = material_lines(&future_item(), Role::Student, now()).unwrap_err();
        assert!(matches!(err, AppError::ContentLocked { .. }));
    }

    #[test]
    fn test_teacher_sees_scheduled_material() {
        let lines = material_lines(&future_item(), Role::Teacher, now()).unwrap();
        assert!(lines.iter().any(|l| l.starts_with(constants::UPCOMING_BADGE)));
        assert!(lines.iter().any(|l| l == "Hemligt"));
    }

    #[test]
    fn test_empty_body_uses_placeholder() {
        let item = ContentItem {
            id: 1,
            title: "Tom".into(),
            ..Default::default()
        };
        let lines = material_lines(&item, Role::Student, now()).unwrap();
        assert_eq!(lines.last().unwrap(), constants::CONTENT_PLACEHOLDER);
    }

    #[test]
    fn test_plain_link_is_shown() {
        let item = ContentItem {
            id: 2,
            title: "Vimeo".into(),
            content_type: crate::models::ContentType::Link,
            link: Some("https://vimeo.com/123".into()),
            ..Default::default()
        };
        let lines = material_lines(&item, Role::Student, now()).unwrap();
        assert!(lines.iter().any(|l| l == "Länk: https://vimeo.com/123"));
        assert!(!lines.iter().any(|l| l == constants::CONTENT_PLACEHOLDER));
    }

    #[test]
    fn test_youtube_link_is_not_repeated() {
        let item = ContentItem {
            id: 2,
            title: "Film".into(),
            content_type: crate::models::ContentType::Video,
            link: Some("https://www.youtube.com/watch?v=dQw4w9WgXcQ".into()),
            ..Default::default()
        };
        let lines = material_lines(&item, Role::Student, now()).unwrap();
        assert!(lines.iter().any(|l| l.starts_with("YouTube:")));
        assert!(!lines.iter().any(|l| l.starts_with("Länk:")));
    }

    #[test]
    fn test_quiz_line_shows_deadline() {
        let deadline = NaiveDateTime::parse_from_str("2026-12-24 18:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
        let quiz = Quiz {
            id: 9,
            title: "Jul".into(),
            description: None,
            questions: vec![],
            available_from: None,
            available_to: Some(deadline),
        };
        let line = quiz_line(&quiz, Role::Student, now());
        assert!(line.contains(&format!("Tillgänglig till {}", utils::format_timestamp(&deadline))));

        let open = Quiz { available_to: None, ..quiz };
        assert!(quiz_deadline(&open).is_none());
    }

    #[test]
    fn test_submission_lines() {
        let graded: Submission = serde_json::from_value(serde_json::json!({
            "id": 5,
            "submittedAt": "2026-03-01",
            "fileName": "uppsats.pdf",
            "fileUrl": "/uploads/uppsats.pdf",
            "grade": "VG",
            "feedback": "Bra jobbat"
        }))
        .unwrap();
        assert_eq!(
            submission_lines(&graded),
            vec![
                "Inlämnad: 2026-03-01 00:00".to_string(),
                "Fil: uppsats.pdf".to_string(),
                "Betyg: VG".to_string(),
                "Feedback: \"Bra jobbat\"".to_string(),
            ]
        );

        let pending = Submission {
            grade: Some("  ".into()),
            ..Default::default()
        };
        assert_eq!(submission_lines(&pending), vec!["Väntar på bedömning".to_string()]);
    }

    #[test]
    fn test_menu_lists_materials_before_quizzes() {
        let loaded = LoadedContent {
            materials: vec![future_item()],
            quizzes: vec![Quiz {
                id: 9,
                title: "Quiz".into(),
                description: None,
                questions: vec![],
                available_from: None,
                available_to: None,
            }],
            failures: vec![],
        };
        let entries = menu_entries(&loaded, Role::Student, now());
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].1, Entry::Material(3));
        assert_eq!(entries[1].1, Entry::Quiz(9));
        assert!(entries[0].0.contains(constants::LOCKED_BADGE));
    }
}
