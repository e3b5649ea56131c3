// src/quiz/mod.rs

pub mod editor;
pub mod runner;
pub mod service;

pub use editor::QuizDraft;
pub use runner::{AnswerOutcome, QuizRunner, QuizScore, RunnerState};
pub use service::QuizService;
