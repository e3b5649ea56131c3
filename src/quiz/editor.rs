// src/quiz/editor.rs

use crate::{
    error::*,
    models::api::{OptionPayload, QuestionPayload, QuizPayload},
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionDraft {
    pub text: String,
    pub is_correct: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionDraft {
    pub text: String,
    pub options: Vec<OptionDraft>,
}

/// 测验编辑器的草稿。正确答案按单选按钮的方式互斥。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuizDraft {
    pub title: String,
    pub description: String,
    pub questions: Vec<QuestionDraft>,
}

impl QuizDraft {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    /// 返回新题目的下标
    pub fn add_question(&mut self, text: impl Into<String>) -> usize {
        self.questions.push(QuestionDraft {
            text: text.into(),
            options: Vec::new(),
        });
        self.questions.len() - 1
    }

    pub fn remove_question(&mut self, index: usize) -> AppResult<QuestionDraft> {
        if index >= self.questions.len() {
            return Err(out_of_range("题目", index));
        }
        Ok(self.questions.remove(index))
    }

    /// 返回新选项的下标。第一个选项默认标记为正确。
    pub fn add_option(&mut self, question: usize, text: impl Into<String>) -> AppResult<usize> {
        let q = self
            .questions
            .get_mut(question)
            .ok_or_else(|| out_of_range("题目", question))?;
        let is_first = q.options.is_empty();
        q.options.push(OptionDraft {
            text: text.into(),
            is_correct: is_first,
        });
        Ok(q.options.len() - 1)
    }

    /// 标记正确答案，同一题的其他选项被取消
    pub fn mark_correct(&mut self, question: usize, option: usize) -> AppResult<()> {
        let q = self
            .questions
            .get_mut(question)
            .ok_or_else(|| out_of_range("题目", question))?;
        if option >= q.options.len() {
            return Err(out_of_range("选项", option));
        }
        for (i, o) in q.options.iter_mut().enumerate() {
            o.is_correct = i == option;
        }
        Ok(())
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.title.trim().is_empty() {
            return Err(AppError::Validation("测验标题不能为空".to_string()));
        }
        if self.questions.is_empty() {
            return Err(AppError::Validation("测验至少需要一道题目".to_string()));
        }
        for (i, q) in self.questions.iter().enumerate() {
            let n = i + 1;
            if q.text.trim().is_empty() {
                return Err(AppError::Validation(format!("第 {} 题没有题干", n)));
            }
            if q.options.len() < 2 {
                return Err(AppError::Validation(format!("第 {} 题至少需要两个选项", n)));
            }
            if q.options.iter().any(|o| o.text.trim().is_empty()) {
                return Err(AppError::Validation(format!("第 {} 题有空白选项", n)));
            }
            let correct = q.options.iter().filter(|o| o.is_correct).count();
            if correct != 1 {
                return Err(AppError::Validation(format!(
                    "第 {} 题必须恰好有一个正确答案 (当前 {} 个)",
                    n, correct
                )));
            }
        }
        Ok(())
    }

    pub fn to_payload(&self) -> AppResult<QuizPayload> {
        self.validate()?;
        Ok(QuizPayload {
            title: self.title.trim().to_string(),
            description: self.description.clone(),
            questions: self
                .questions
                .iter()
                .map(|q| QuestionPayload {
                    text: q.text.trim().to_string(),
                    options: q
                        .options
                        .iter()
                        .map(|o| OptionPayload {
                            text: o.text.trim().to_string(),
                            is_correct: o.is_correct,
                        })
                        .collect(),
                })
                .collect(),
        })
    }
}

fn out_of_range(what: &str, index: usize) -> AppError {
    AppError::UserInputError(format!("{}下标 {} 超出范围", what, index + 1))
}
