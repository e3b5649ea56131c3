// src/content/dispatch.rs

use crate::{constants::extensions, models::ContentItem, utils};
use regex::Regex;
use std::sync::LazyLock;

static YOUTUBE_ID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^.*(youtu\.be/|v/|u/\w/|embed/|watch\?v=|&v=)([^#&?]*).*").unwrap()
});
static YOUTUBE_HOST_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(https?://)?([\w-]+\.)*(youtube\.com|youtube-nocookie\.com|youtu\.be)(/|$)").unwrap()
});

/// 选中内容后使用的展示方式
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Renderer {
    EmbeddedVideo { embed_url: String },
    VideoFile { url: String },
    Image { url: String },
    Ebook { url: String },
    /// 可下载附件；`editable` 表示可以用在线文档编辑器打开
    Download { url: String, editable: bool },
    RichText,
}

impl Renderer {
    pub fn label(&self) -> &'static str {
        match self {
            Renderer::EmbeddedVideo { .. } => "YouTube",
            Renderer::VideoFile { .. } => "Video",
            Renderer::Image { .. } => "Bild",
            Renderer::Ebook { .. } => "E-bok",
            Renderer::Download { .. } => "Bilaga",
            Renderer::RichText => "Text",
        }
    }
}

/// 提取 YouTube 视频 ID 并返回嵌入地址，ID 必须正好 11 位
pub fn youtube_embed_url(link: &str) -> Option<String> {
    let link = link.trim();
    if !YOUTUBE_HOST_RE.is_match(link) {
        return None;
    }
    let caps = YOUTUBE_ID_RE.captures(link)?;
    let id = caps.get(2)?.as_str();
    (id.chars().count() == 11).then(|| format!("https://www.youtube.com/embed/{}", id))
}

fn has_extension(url: &str, allowed: &[&str]) -> bool {
    utils::url_extension(url).is_some_and(|ext| allowed.contains(&ext.as_str()))
}

pub fn is_video_file(url: &str) -> bool {
    has_extension(url, extensions::VIDEO)
}

pub fn is_image_file(url: &str) -> bool {
    has_extension(url, extensions::IMAGE)
}

pub fn is_ebook_file(url: &str) -> bool {
    has_extension(url, extensions::EBOOK)
}

pub fn is_editable_document(url: &str) -> bool {
    has_extension(url, extensions::EDITABLE_DOCUMENT)
}

/// 按固定优先级选择展示方式，第一个命中的规则生效
pub fn select_renderer(item: &ContentItem) -> Renderer {
    if let Some(embed_url) = item.link.as_deref().and_then(youtube_embed_url) {
        return Renderer::EmbeddedVideo { embed_url };
    }
    let Some(file_url) = item.file_url.as_deref() else {
        return Renderer::RichText;
    };
    let url = file_url.to_string();
    if is_video_file(file_url) {
        Renderer::VideoFile { url }
    } else if is_image_file(file_url) {
        Renderer::Image { url }
    } else if is_ebook_file(file_url) {
        Renderer::Ebook { url }
    } else {
        Renderer::Download {
            editable: is_editable_document(file_url),
            url,
        }
    }
}
