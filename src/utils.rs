// src/utils.rs

use crate::{constants, error::*};
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use log::warn;
use serde::{Deserialize, Deserializer};
use url::Url;

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// 解析后端的时间戳。后端使用不带时区的本地时间，带时区的值会被换算为本地时间。
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Some(parsed) = NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
    {
        return Some(parsed);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Local).naive_local());
    }
    // 只有日期时按当天零点处理，例如作业的提交日期
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// 用于 serde 的宽松时间戳解析：无法识别的值记录警告并视为空。
pub fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(|s| {
        let parsed = parse_timestamp(s);
        if parsed.is_none() && !s.trim().is_empty() {
            warn!("无法解析时间戳 '{}'，按未设置处理", s);
        }
        parsed
    }))
}

/// 解析命令行传入的时间，格式错误时返回校验错误
pub fn parse_datetime_arg(raw: &str) -> AppResult<NaiveDateTime> {
    parse_timestamp(raw).ok_or_else(|| {
        AppError::Validation(format!(
            "无法识别的时间 '{}'，请使用 YYYY-MM-DDTHH:MM[:SS] 格式",
            raw
        ))
    })
}

pub fn format_timestamp(ts: &NaiveDateTime) -> String {
    ts.format("%Y-%m-%d %H:%M").to_string()
}

pub fn truncate_text(text: &str, max_width: usize) -> String {
    let mut width = 0;
    let mut end_pos = 0;
    for (i, c) in text.char_indices() {
        width += if c.is_ascii() { 1 } else { 2 };
        if width > max_width.saturating_sub(3) {
            end_pos = i;
            break;
        }
    }
    if end_pos == 0 { text.to_string() } else { format!("{}...", &text[..end_pos]) }
}

/// 返回 URL 或路径最后一段的小写扩展名，忽略查询参数和锚点
pub fn url_extension(raw: &str) -> Option<String> {
    let path = raw.split(['?', '#']).next().unwrap_or(raw);
    let last_segment = path.rsplit('/').next().unwrap_or(path);
    let (stem, ext) = last_segment.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

/// 从页面链接中读取深度链接参数 `itemId`
pub fn item_id_from_url(raw: &str) -> AppResult<Option<i64>> {
    let url = Url::parse(raw)?;
    let Some((_, value)) = url
        .query_pairs()
        .find(|(k, _)| k == constants::DEEP_LINK_PARAM)
    else {
        return Ok(None);
    };
    value.parse::<i64>().map(Some).map_err(|_| {
        AppError::UserInputError(format!(
            "链接中的 {} 参数 '{}' 不是有效的ID",
            constants::DEEP_LINK_PARAM,
            value
        ))
    })
}

/// 从形如 `/courses/42?...` 的页面链接中取出课程ID
pub fn course_id_from_url(raw: &str) -> AppResult<Option<i64>> {
    let url = Url::parse(raw)?;
    let Some(segments) = url.path_segments() else {
        return Ok(None);
    };
    let segments: Vec<_> = segments.collect();
    Ok(segments
        .windows(2)
        .find(|w| w[0] == "courses" || w[0] == "course")
        .and_then(|w| w[1].parse::<i64>().ok()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_parse_timestamp() {
        let expected = NaiveDate::from_ymd_opt(2026, 3, 1)
            .unwrap()
            .and_hms_opt(8, 30, 0)
            .unwrap();
        // 后端 LocalDateTime 的几种序列化形式
        assert_eq!(parse_timestamp("2026-03-01T08:30:00"), Some(expected));
        assert_eq!(parse_timestamp("2026-03-01T08:30"), Some(expected));
        assert_eq!(parse_timestamp("2026-03-01T08:30:00.000"), Some(expected));
        assert_eq!(parse_timestamp(" 2026-03-01 08:30 "), Some(expected));

        // 带时区的值可以解析
        assert!(parse_timestamp("2026-03-01T08:30:00Z").is_some());

        // 只有日期
        assert_eq!(
            parse_timestamp("2026-03-01"),
            NaiveDate::from_ymd_opt(2026, 3, 1).unwrap().and_hms_opt(0, 0, 0)
        );

        // 无效输入
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("next monday"), None);
    }

    #[test]
    fn test_parse_datetime_arg_rejects_garbage() {
        let err = parse_datetime_arg("tomorrow").unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_url_extension() {
        assert_eq!(url_extension("video.mp4"), Some("mp4".into()));
        assert_eq!(url_extension("/uploads/Bild.PNG"), Some("png".into()));
        assert_eq!(url_extension("https://cdn.example.com/a/book.epub?sig=abc#p3"), Some("epub".into()));
        assert_eq!(url_extension("https://cdn.example.com/v1.2/file"), None);
        assert_eq!(url_extension(".hidden"), None);
        assert_eq!(url_extension("noext"), None);
    }

    #[test]
    fn test_item_id_from_url() {
        assert_eq!(item_id_from_url("https://lms.example.com/courses/7?itemId=42").unwrap(), Some(42));
        assert_eq!(item_id_from_url("https://lms.example.com/courses/7").unwrap(), None);
        assert!(item_id_from_url("https://lms.example.com/courses/7?itemId=abc").is_err());
        assert!(item_id_from_url("not a url").is_err());
    }

    #[test]
    fn test_course_id_from_url() {
        assert_eq!(course_id_from_url("https://lms.example.com/courses/7?itemId=42").unwrap(), Some(7));
        assert_eq!(course_id_from_url("https://lms.example.com/course/9/content").unwrap(), Some(9));
        assert_eq!(course_id_from_url("https://lms.example.com/dashboard").unwrap(), None);
    }

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("short", 60), "short");
        let long = "a".repeat(100);
        let truncated = truncate_text(&long, 20);
        assert!(truncated.ends_with("..."));
        assert_eq!(truncated.len(), 20);
    }
}
