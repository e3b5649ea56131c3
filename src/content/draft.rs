// src/content/draft.rs

use crate::{
    constants::api::form_fields,
    error::*,
    models::{ContentItem, ContentType},
};
use anyhow::Context;
use chrono::NaiveDateTime;
use log::debug;
use reqwest::multipart::{Form, Part};
use std::path::PathBuf;
use url::Url;

/// 课程材料编辑器中的草稿，保存时转换为 multipart 表单
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MaterialDraft {
    pub title: String,
    pub content: String,
    pub link: Option<String>,
    pub content_type: ContentType,
    pub available_from: Option<NaiveDateTime>,
    pub difficulty: Option<u8>,
    pub estimated_time: Option<u32>,
    pub prerequisite_id: Option<i64>,
    pub file: Option<PathBuf>,
}

impl MaterialDraft {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    /// 以已有材料为基础开始编辑，附件需要重新选择
    pub fn from_item(item: &ContentItem) -> Self {
        Self {
            title: item.title.clone(),
            content: item.content.clone(),
            link: item.link.clone(),
            content_type: item.content_type,
            available_from: item.available_from,
            difficulty: item.difficulty_level,
            estimated_time: item.estimated_time_minutes,
            prerequisite_id: item.prerequisite_material_id,
            file: None,
        }
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.title.trim().is_empty() {
            return Err(AppError::Validation("标题不能为空".to_string()));
        }
        if let Some(link) = self.link.as_deref().filter(|l| !l.trim().is_empty()) {
            Url::parse(link.trim())
                .map_err(|e| AppError::Validation(format!("链接 '{}' 无效: {}", link, e)))?;
        }
        if let Some(level) = self.difficulty
            && !(1..=5).contains(&level)
        {
            return Err(AppError::Validation(format!("难度等级 {} 超出范围 1-5", level)));
        }
        if let Some(path) = &self.file
            && !path.is_file()
        {
            return Err(AppError::Validation(format!(
                "附件 '{}' 不存在或不是文件",
                path.display()
            )));
        }
        Ok(())
    }

    /// 表单中的文本字段。标题、正文、链接和类型总是发送，其余字段仅在设置时发送。
    pub fn text_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            (form_fields::TITLE, self.title.trim().to_string()),
            (form_fields::CONTENT, self.content.clone()),
            (form_fields::LINK, self.link.clone().unwrap_or_default()),
            (form_fields::TYPE, self.content_type.as_wire().to_string()),
        ];
        if let Some(from) = self.available_from {
            fields.push((
                form_fields::AVAILABLE_FROM,
                from.format("%Y-%m-%dT%H:%M:%S").to_string(),
            ));
        }
        if let Some(level) = self.difficulty {
            fields.push((form_fields::DIFFICULTY, level.to_string()));
        }
        if let Some(minutes) = self.estimated_time {
            fields.push((form_fields::ESTIMATED_TIME, minutes.to_string()));
        }
        if let Some(id) = self.prerequisite_id {
            fields.push((form_fields::PREREQUISITE_ID, id.to_string()));
        }
        fields
    }

    /// 校验并生成 multipart 表单，附件在此时读入内存
    pub async fn into_form(self) -> AppResult<Form> {
        self.validate()?;
        let mut form = Form::new();
        for (name, value) in self.text_fields() {
            form = form.text(name, value);
        }
        if let Some(path) = &self.file {
            let bytes = tokio::fs::read(path)
                .await
                .with_context(|| format!("读取附件 '{}' 失败", path.display()))?;
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "attachment".to_string());
            debug!("附加文件 '{}' ({} 字节)", file_name, bytes.len());
            form = form.part(form_fields::FILE, Part::bytes(bytes).file_name(file_name));
        }
        Ok(form)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_blank_title_rejected() {
        let draft = MaterialDraft::new("   ");
        let err = draft.validate().unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_invalid_link_rejected() {
        let mut draft = MaterialDraft::new("Lektion 1");
        draft.link = Some("inte en länk".into());
        assert!(matches!(draft.validate(), Err(AppError::Validation(_))));

        draft.link = Some("".into());
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn test_missing_attachment_rejected() {
        let mut draft = MaterialDraft::new("Lektion 1");
        draft.file = Some(PathBuf::from("/definitely/not/here.pdf"));
        assert!(matches!(draft.validate(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_text_fields_use_backend_names() {
        let mut draft = MaterialDraft::new(" Lektion 1 ");
        draft.content = "Text".into();
        draft.content_type = ContentType::Video;
        draft.available_from = NaiveDate::from_ymd_opt(2026, 9, 1)
            .unwrap()
            .and_hms_opt(8, 0, 0);
        draft.difficulty = Some(2);
        draft.estimated_time = Some(30);
        draft.prerequisite_id = Some(11);

        let fields = draft.text_fields();
        let get = |name: &str| {
            fields
                .iter()
                .find(|(k, _)| *k == name)
                .map(|(_, v)| v.as_str())
        };
        assert_eq!(get("title"), Some("Lektion 1"));
        assert_eq!(get("content"), Some("Text"));
        assert_eq!(get("link"), Some(""));
        assert_eq!(get("type"), Some("VIDEO"));
        assert_eq!(get("availableFrom"), Some("2026-09-01T08:00:00"));
        assert_eq!(get("difficulty"), Some("2"));
        assert_eq!(get("estimatedTime"), Some("30"));
        assert_eq!(get("prerequisiteId"), Some("11"));
    }

    #[test]
    fn test_optional_fields_omitted() {
        let fields = MaterialDraft::new("Lektion").text_fields();
        let names: Vec<_> = fields.iter().map(|(k, _)| *k).collect();
        assert_eq!(names, vec!["title", "content", "link", "type"]);
    }

    #[test]
    fn test_from_item_keeps_metadata() {
        let item = ContentItem {
            id: 4,
            title: "Gammal".into(),
            content: "Text".into(),
            difficulty_level: Some(4),
            prerequisite_material_id: Some(2),
            ..Default::default()
        };
        let draft = MaterialDraft::from_item(&item);
        assert_eq!(draft.title, "Gammal");
        assert_eq!(draft.difficulty, Some(4));
        assert_eq!(draft.prerequisite_id, Some(2));
        assert!(draft.file.is_none());
    }
}
