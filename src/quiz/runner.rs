// src/quiz/runner.rs

use crate::{
    error::*,
    models::{Question, Quiz},
};
use log::{debug, info};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizScore {
    pub score: u32,
    pub max_score: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunnerState {
    Answering,
    /// 终态，只能查看结果
    Submitted(QuizScore),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerOutcome {
    Correct,
    Wrong,
    Unanswered,
}

/// 在本地重放测验并按后端返回的 `is_correct` 评分
pub struct QuizRunner<'a> {
    quiz: &'a Quiz,
    answers: HashMap<i64, i64>,
    state: RunnerState,
}

impl<'a> QuizRunner<'a> {
    pub fn new(quiz: &'a Quiz) -> Self {
        Self {
            quiz,
            answers: HashMap::new(),
            state: RunnerState::Answering,
        }
    }

    pub fn quiz(&self) -> &Quiz {
        self.quiz
    }

    pub fn state(&self) -> RunnerState {
        self.state
    }

    /// 记录答案，重复选择同一题会覆盖之前的答案
    pub fn select(&mut self, question_id: i64, option_id: i64) -> AppResult<()> {
        if matches!(self.state, RunnerState::Submitted(_)) {
            return Err(AppError::QuizAlreadySubmitted);
        }
        let question = self
            .quiz
            .questions
            .iter()
            .find(|q| q.id == question_id)
            .ok_or_else(|| AppError::UserInputError(format!("测验中没有ID为 {} 的题目", question_id)))?;
        if !question.options.iter().any(|o| o.id == option_id) {
            return Err(AppError::UserInputError(format!(
                "题目 {} 没有ID为 {} 的选项",
                question_id, option_id
            )));
        }
        debug!("题目 {} 选择了选项 {}", question_id, option_id);
        self.answers.insert(question_id, option_id);
        Ok(())
    }

    pub fn answer(&self, question_id: i64) -> Option<i64> {
        self.answers.get(&question_id).copied()
    }

    pub fn answered_count(&self) -> usize {
        self.quiz
            .questions
            .iter()
            .filter(|q| self.answers.contains_key(&q.id))
            .count()
    }

    pub fn is_complete(&self) -> bool {
        self.answered_count() == self.quiz.questions.len()
    }

    fn outcome(&self, question: &Question) -> AnswerOutcome {
        match (self.answer(question.id), question.correct_option()) {
            (None, _) => AnswerOutcome::Unanswered,
            (Some(selected), Some(correct)) if selected == correct.id => AnswerOutcome::Correct,
            (Some(_), _) => AnswerOutcome::Wrong,
        }
    }

    fn compute_score(&self) -> QuizScore {
        let score = self
            .quiz
            .questions
            .iter()
            .filter(|q| self.outcome(q) == AnswerOutcome::Correct)
            .count();
        QuizScore {
            score: score as u32,
            max_score: self.quiz.questions.len() as u32,
        }
    }

    /// 评分并进入提交状态，结果同时交给回调。只能调用一次。
    pub fn finish<F>(&mut self, on_finish: F) -> AppResult<QuizScore>
    where
        F: FnOnce(QuizScore),
    {
        if matches!(self.state, RunnerState::Submitted(_)) {
            return Err(AppError::QuizAlreadySubmitted);
        }
        let result = self.compute_score();
        info!(
            "测验 {} 完成: {}/{}",
            self.quiz.id, result.score, result.max_score
        );
        self.state = RunnerState::Submitted(result);
        on_finish(result);
        Ok(result)
    }

    /// 提交后的逐题结果，按题目顺序
    pub fn review(&self) -> Vec<(&'a Question, AnswerOutcome)> {
        self.quiz
            .questions
            .iter()
            .map(|q| (q, self.outcome(q)))
            .collect()
    }
}
