// src/content/loader.rs

use super::{
    normalize::normalize,
    source::{ContentSource, LoadScope},
};
use crate::{
    error::AppError,
    models::{ContentItem, Quiz},
};
use itertools::Itertools;
use log::{debug, error, info};
use std::{fmt, sync::Arc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Materials,
    Quizzes,
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Collection::Materials => f.write_str("材料"),
            Collection::Quizzes => f.write_str("测验"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoadFailure {
    pub collection: Collection,
    pub message: String,
}

/// 一次加载的结果。两个集合互不影响，失败的集合为空并记录在 `failures` 中。
#[derive(Debug, Clone, Default)]
pub struct LoadedContent {
    pub materials: Vec<ContentItem>,
    pub quizzes: Vec<Quiz>,
    pub failures: Vec<LoadFailure>,
}

impl LoadedContent {
    pub fn find_material(&self, id: i64) -> Option<&ContentItem> {
        self.materials.iter().find(|m| m.id == id)
    }

    pub fn find_quiz(&self, id: i64) -> Option<&Quiz> {
        self.quizzes.iter().find(|q| q.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty() && self.quizzes.is_empty()
    }

    /// 无论失败几个集合，只产生一条错误提示
    pub fn toast_message(&self) -> Option<String> {
        if self.failures.is_empty() {
            return None;
        }
        let which = self.failures.iter().map(|f| f.collection.to_string()).join("、");
        Some(format!("部分内容加载失败 ({})，请稍后重试。", which))
    }
}

pub struct ContentLoader {
    source: Arc<dyn ContentSource>,
}

impl ContentLoader {
    pub fn new(source: Arc<dyn ContentSource>) -> Self {
        Self { source }
    }

    /// 并行请求材料与测验，各自归一化。请求不会被取消，也不会重试。
    pub async fn load(&self, scope: LoadScope) -> LoadedContent {
        info!("开始加载{}的内容", scope);
        let (materials_res, quizzes_res) = futures::join!(
            self.source.fetch_materials(scope),
            self.source.fetch_quizzes(scope)
        );

        let mut loaded = LoadedContent::default();

        match materials_res {
            Ok(records) => {
                loaded.materials = records
                    .into_iter()
                    .map(normalize)
                    .unique_by(|item| item.id)
                    .collect();
            }
            Err(e) => loaded.failures.push(record_failure(Collection::Materials, &scope, e)),
        }

        match quizzes_res {
            Ok(quizzes) => {
                loaded.quizzes = quizzes.into_iter().unique_by(|q| q.id).collect();
            }
            Err(e) => loaded.failures.push(record_failure(Collection::Quizzes, &scope, e)),
        }

        debug!(
            "{}: {} 个材料, {} 个测验, {} 个失败",
            scope,
            loaded.materials.len(),
            loaded.quizzes.len(),
            loaded.failures.len()
        );
        loaded
    }
}

fn record_failure(collection: Collection, scope: &LoadScope, e: AppError) -> LoadFailure {
    error!("加载{}的{}失败: {}", scope, collection, e);
    LoadFailure {
        collection,
        message: e.to_string(),
    }
}
