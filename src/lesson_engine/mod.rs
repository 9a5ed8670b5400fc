//! Core lesson engine: exercise generation and session scoring.
//!
//! ## Module overview
//!
//! | Module          | Purpose |
//! |-----------------|---------|
//! | `models`        | Shared types: level configs, exercises, shape payloads, game modes |
//! | `rng`           | Seeded random stream with draws, integer ranges and Fisher-Yates shuffle |
//! | `levels`        | Level registry: built-in table, TOML loading, validation |
//! | `arithmetic`    | Numeric-triple synthesis per operation kind |
//! | `helpers`       | Shared builders: question text, hints, explanations, rewards |
//! | `shapes`        | Per-shape formatters (choice, typed, matching, visual) |
//! | `generator`     | Entry points `generate()` / `generate_from()` and the variety pass |
//! | `reward`        | Combo multiplier, mode bonus and the single reward formula |
//! | `session`       | Lesson session state machine |
//! | `collaborators` | Inventory trait and progress record |
//! | `error`         | `LessonError` |

pub mod arithmetic;
pub mod collaborators;
pub mod error;
pub mod generator;
pub mod helpers;
pub mod levels;
pub mod models;
pub mod reward;
pub mod rng;
pub mod session;
pub mod shapes;

// Re-export the public API surface so callers can use
// `lesson_engine::generate` without reaching into sub-modules.
pub use collaborators::{EmptyInventory, Inventory, ProgressRecord, XP_BOOST_ITEM};
pub use error::{LessonError, Result};
pub use generator::{
    apply_variety, builtin_registry, generate, generate_from, generate_lesson, seed_for_user,
    LessonRequest,
};
pub use levels::LevelRegistry;
pub use models::{
    Difficulty, Exercise, ExercisePayload, ExerciseShape, GameMode, LevelConfig, MatchPair,
    NumberRange, Operands, Operation,
};
pub use reward::compute_reward;
pub use rng::SeededRandom;
pub use session::{
    AnswerOutcome, AnswerSubmission, LessonSession, SessionConfig, SessionEvent, SessionPhase,
    SessionState, TerminalReason,
};
