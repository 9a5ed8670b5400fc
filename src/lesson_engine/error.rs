//! Error types for lesson generation and session play.

use thiserror::Error;

use crate::lesson_engine::session::SessionPhase;

#[derive(Error, Debug)]
pub enum LessonError {
    /// No level registered under this id.
    #[error("no such level: {0}")]
    UnknownLevel(u32),

    #[error("invalid configuration for level {level_id}: {reason}")]
    InvalidLevel { level_id: u32, reason: String },

    /// The level's ranges cannot produce an answer inside its answer range.
    #[error("level {level_id} produced answer {answer} outside its answer range")]
    AnswerOutOfRange { level_id: u32, answer: i64 },

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("session is not accepting input (phase: {0:?})")]
    SessionNotActive(SessionPhase),

    /// Distractor search gave up; only reachable with degenerate ranges.
    #[error("gave up after {attempts} attempts to find distinct distractors")]
    ExhaustedRetries { attempts: u32 },

    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, LessonError>;
