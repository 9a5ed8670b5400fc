//! # arith_drill_gen
//!
//! A fully offline, deterministic arithmetic lesson engine.
//!
//! The crate turns a small per-level configuration into a reproducible stream
//! of arithmetic exercises, then scores a player's run through them: streaks,
//! combo multipliers, hearts, timers and rewards under five game modes.
//!
//! ## How it works
//!
//! 1. Pick a level id and a seed (for example [`seed_for_user`]).
//! 2. Call [`generate`]. The engine draws a shape per exercise, synthesizes
//!    operands that satisfy the level's constraints (no negative differences,
//!    no remainders unless allowed, bounded answers), and formats them into
//!    multiple-choice, type-answer, number-line and other shapes.
//! 3. Hand the list to a [`LessonSession`] and feed it one outcome at a time.
//!    When it finishes, [`LessonSession::progress_record`] yields the summary
//!    for the progress store.
//!
//! ## Key features
//!
//! - **Deterministic**: the same `(level_id, seed)` always yields the same
//!   exercises, down to multiple-choice option order.
//! - **Constraint-safe**: answers always honour the level's answer range.
//! - **One reward formula**: [`compute_reward`] is shared by every shape and
//!   mode.
//! - **No ambient state**: inventory access goes through the [`Inventory`]
//!   trait passed in by the caller.
//!
//! ## Quick start
//!
//! ```rust
//! use arith_drill_gen::{generate, seed_for_user, EmptyInventory, GameMode, LessonSession};
//!
//! let seed = seed_for_user("player-17", 3);
//! let exercises = generate(3, seed).expect("level 3 is built in");
//! println!("Q: {}", exercises[0].prompt);
//!
//! let mut session = LessonSession::new(3, exercises, GameMode::Normal, &EmptyInventory).unwrap();
//! let outcome = session.submit_answer(0, true, 0).unwrap();
//! println!("+{} XP, streak {}", outcome.reward, outcome.streak);
//! ```

pub mod lesson_engine;
pub mod client_adapter;

// Convenience re-exports so callers can use `arith_drill_gen::generate`
// directly without reaching into `lesson_engine::`.
pub use lesson_engine::{
    apply_variety, compute_reward, generate, generate_from, generate_lesson, seed_for_user,
    AnswerOutcome, AnswerSubmission, Difficulty, EmptyInventory, Exercise, ExercisePayload,
    ExerciseShape, GameMode, Inventory, LessonError, LessonRequest, LessonSession, LevelConfig,
    LevelRegistry, NumberRange, Operands, Operation, ProgressRecord, SeededRandom, SessionConfig,
    SessionEvent, SessionPhase, TerminalReason,
};
pub use client_adapter::{to_client_exercise, to_client_lesson, to_client_progress};
