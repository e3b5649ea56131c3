// src/content/normalize.rs

use crate::{
    constants,
    models::{
        ContentItem, ContentType,
        api::{MaterialRecord, OutlineSection},
    },
    utils,
};
use itertools::Itertools;
use log::{trace, warn};
use serde_json::{Map, Value};

/// 材料正文在 API 边界上的类型化表示。
///
/// 后端把结构化课程大纲以 JSON 字符串的形式塞在纯文本字段里，
/// 这里在入口处一次性解析成带标签的枚举，后续代码不再接触原始 JSON。
#[derive(Debug, Clone, PartialEq)]
pub enum ContentBody {
    /// 按顺序排列的大纲章节
    Outline(Vec<OutlineSection>),
    /// 作业类资源的说明文字
    Instructions(String),
    /// 合法的 JSON 对象，但没有可展示的已知字段
    Unrecognized,
    /// 普通文本或 HTML，原样保留
    Plain(String),
}

impl ContentBody {
    pub fn from_value(value: Option<&Value>) -> Self {
        match value {
            None | Some(Value::Null) => ContentBody::Plain(String::new()),
            Some(Value::String(raw)) => Self::parse(raw),
            Some(Value::Object(map)) => Self::from_object(map).unwrap_or_else(|| {
                ContentBody::Plain(Value::Object(map.clone()).to_string())
            }),
            Some(other) => ContentBody::Plain(other.to_string()),
        }
    }

    /// 解析失败或不是 JSON 对象时保留原文
    pub fn parse(raw: &str) -> Self {
        match serde_json::from_str::<Value>(raw) {
            Ok(Value::Object(map)) => Self::from_object(&map).unwrap_or_else(|| {
                warn!("结构化正文格式异常，保留原文");
                ContentBody::Plain(raw.to_string())
            }),
            _ => ContentBody::Plain(raw.to_string()),
        }
    }

    /// 大纲字段存在但形状不对时返回 `None`，由调用方回退到原文
    fn from_object(map: &Map<String, Value>) -> Option<Self> {
        if let Some(outline) = map.get("outline") {
            let sections: Vec<OutlineSection> = serde_json::from_value(outline.clone()).ok()?;
            return Some(ContentBody::Outline(sections));
        }
        if let Some(instructions) = map.get("instructions") {
            let text = match instructions {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            return Some(ContentBody::Instructions(text));
        }
        Some(ContentBody::Unrecognized)
    }

    pub fn render(&self) -> String {
        match self {
            ContentBody::Outline(sections) => sections
                .iter()
                .map(|s| format!("## {}\n{}", s.title, s.content))
                .join("\n\n"),
            ContentBody::Instructions(text) => {
                format!("{}\n{}", constants::INSTRUCTIONS_HEADING, text)
            }
            ContentBody::Unrecognized => constants::CONTENT_PLACEHOLDER.to_string(),
            ContentBody::Plain(text) => text.clone(),
        }
    }
}

/// 将一条后端材料记录归一化为展示模型
pub fn normalize(record: MaterialRecord) -> ContentItem {
    let body = ContentBody::from_value(record.content.as_ref());
    trace!("材料 {} 的正文类型: {:?}", record.id, body);

    let available_from = record.available_from.as_deref().and_then(|raw| {
        let parsed = utils::parse_timestamp(raw);
        if parsed.is_none() && !raw.trim().is_empty() {
            warn!("材料 {} 的开放时间 '{}' 无法解析，按未设置处理", record.id, raw);
        }
        parsed
    });

    ContentItem {
        id: record.id,
        title: record.title,
        content_type: ContentType::from_wire(record.material_type.as_deref()),
        content: body.render(),
        link: record.link.filter(|l| !l.trim().is_empty()),
        file_url: record.file_url.filter(|f| !f.trim().is_empty()),
        available_from,
        difficulty_level: record.difficulty_level,
        estimated_time_minutes: record.estimated_time_minutes,
        prerequisite_material_id: record
            .prerequisite_material_id
            .or(record.prerequisite_material.map(|m| m.id)),
    }
}
