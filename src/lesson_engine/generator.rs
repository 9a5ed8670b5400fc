use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::lesson_engine::{
    arithmetic::synthesize,
    error::{LessonError, Result},
    helpers::{exercise, shape_reward},
    levels::LevelRegistry,
    models::{Exercise, ExerciseShape, LevelConfig, Operation},
    rng::SeededRandom,
    shapes,
};

/// Share of exercises the variety pass relabels.
pub const VARIETY_RATE: f64 = 0.10;
/// Mixed into the lesson seed so the variety stream is independent of it.
const VARIETY_SALT: u64 = 0x9E37_79B9_7F4A_7C15;

/// Everything needed to build one lesson's exercise list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LessonRequest {
    pub level_id: u32,
    /// `None` draws a fresh seed from the thread RNG.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Relabel ~10% of exercises into type-answer / match-equation.
    #[serde(default)]
    pub variety: bool,
}

impl LessonRequest {
    /// Minimal request: random seed, no variety pass.
    pub fn new(level_id: u32) -> Self {
        LessonRequest { level_id, seed: None, variety: false }
    }

    pub fn seeded(level_id: u32, seed: u64) -> Self {
        LessonRequest { level_id, seed: Some(seed), variety: false }
    }
}

/// The shipped level table, built once.
pub fn builtin_registry() -> &'static LevelRegistry {
    static BUILTIN: OnceLock<LevelRegistry> = OnceLock::new();
    BUILTIN.get_or_init(LevelRegistry::builtin)
}

/// Generate the exercise list for a built-in level.
pub fn generate(level_id: u32, seed: u64) -> Result<Vec<Exercise>> {
    generate_from(builtin_registry(), level_id, seed)
}

/// Generate the exercise list for `level_id` from `registry`.
///
/// Per exercise the stream is consumed in a fixed order: shape pick, operand
/// synthesis, shape formatting. Same `(level_id, seed)` means same output.
pub fn generate_from(registry: &LevelRegistry, level_id: u32, seed: u64) -> Result<Vec<Exercise>> {
    let cfg = registry.get(level_id)?;
    let mut rng = SeededRandom::new(seed);
    let mut exercises = Vec::with_capacity(cfg.total_questions);

    for index in 0..cfg.total_questions {
        let shape = cfg.shapes[rng.pick_index(cfg.shapes.len())];
        let ops = synthesize(cfg, &mut rng);
        if !cfg.accepts_answer(ops.answer) {
            return Err(LessonError::AnswerOutOfRange { level_id, answer: ops.answer });
        }
        let f = shapes::format(shape, cfg, &ops, &mut rng);
        exercises.push(exercise(cfg, index, ops, f.prompt, f.answer, f.payload));
    }

    debug!(level_id, seed, count = exercises.len(), draws = rng.draws(), "generated lesson");
    Ok(exercises)
}

/// Build a lesson from a [`LessonRequest`] against the built-in levels.
pub fn generate_lesson(request: &LessonRequest) -> Result<Vec<Exercise>> {
    let registry = builtin_registry();
    let seed = request.seed.unwrap_or_else(rand::random);
    let mut exercises = generate_from(registry, request.level_id, seed)?;
    if request.variety {
        apply_variety(registry.get(request.level_id)?, &mut exercises, seed);
    }
    Ok(exercises)
}

/// Relabel roughly [`VARIETY_RATE`] of `exercises` into type-answer or
/// match-equation. Returns how many were relabelled.
///
/// Draws from its own stream derived from `seed`, so the base list stays
/// identical and the relabelled list is just as reproducible.
pub fn apply_variety(cfg: &LevelConfig, exercises: &mut [Exercise], seed: u64) -> usize {
    let mut rng = SeededRandom::new(seed ^ VARIETY_SALT);
    let mut relabelled = 0;

    for ex in exercises.iter_mut() {
        if rng.next() >= VARIETY_RATE {
            continue;
        }
        let wants_match = rng.next() < 0.5;
        let shape = if wants_match && ex.operands.operation != Operation::Counting {
            ExerciseShape::MatchEquation
        } else {
            ExerciseShape::TypeAnswer
        };
        if ex.shape() == shape {
            continue;
        }
        let f = shapes::format(shape, cfg, &ex.operands, &mut rng);
        ex.prompt = f.prompt;
        ex.answer = f.answer;
        ex.payload = f.payload;
        ex.reward = shape_reward(shape, cfg.difficulty);
        relabelled += 1;
    }

    debug!(level_id = cfg.id, relabelled, "variety pass");
    relabelled
}

/// Stable per-user seed for a level (FNV-1a over user id and level id).
pub fn seed_for_user(user_id: &str, level_id: u32) -> u64 {
    const OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;

    user_id
        .as_bytes()
        .iter()
        .chain(level_id.to_le_bytes().iter())
        .fold(OFFSET, |hash, byte| (hash ^ u64::from(*byte)).wrapping_mul(PRIME))
}
