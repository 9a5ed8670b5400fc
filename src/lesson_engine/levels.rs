//! Level registry: the built-in level table plus TOML-loaded overrides.
//!
//! Every config entering a registry is validated once, so the generator can
//! rely on well-formed ranges and shape lists.
//!
//! ## TOML format
//!
//! ```toml
//! [[levels]]
//! id = 1
//! name = "Count to ten"
//! operation = "counting"
//! number_range = { min = 1, max = 10 }
//! shapes = ["count-objects", "multiple-choice"]
//! total_questions = 10
//! difficulty = "easy"
//! ```

use std::collections::BTreeMap;

use serde::Deserialize;
use tracing::warn;

use crate::lesson_engine::{
    error::{LessonError, Result},
    models::{Difficulty, ExerciseShape, LevelConfig, NumberRange, Operation},
};

use ExerciseShape::*;

#[derive(Debug, Clone, Default)]
pub struct LevelRegistry {
    levels: BTreeMap<u32, LevelConfig>,
}

#[derive(Deserialize)]
struct LevelFile {
    #[serde(default)]
    levels: Vec<LevelConfig>,
}

impl LevelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The level table shipped with the app.
    pub fn builtin() -> Self {
        let mut registry = LevelRegistry::new();
        for cfg in builtin_levels() {
            // Built-in table is covered by tests; a bad entry is a programming error.
            if let Err(err) = registry.insert(cfg) {
                warn!(%err, "skipping built-in level");
            }
        }
        registry
    }

    /// Parse a `[[levels]]` TOML document into a fresh registry.
    pub fn from_toml_str(src: &str) -> Result<Self> {
        let file: LevelFile = toml::from_str(src)?;
        let mut registry = LevelRegistry::new();
        for cfg in file.levels {
            if registry.levels.contains_key(&cfg.id) {
                return Err(LessonError::InvalidLevel {
                    level_id: cfg.id,
                    reason: "duplicate level id".into(),
                });
            }
            registry.insert(cfg)?;
        }
        Ok(registry)
    }

    /// Validate and register `cfg`, replacing any level with the same id.
    pub fn insert(&mut self, cfg: LevelConfig) -> Result<()> {
        validate(&cfg)?;
        self.levels.insert(cfg.id, cfg);
        Ok(())
    }

    pub fn get(&self, level_id: u32) -> Result<&LevelConfig> {
        self.levels.get(&level_id).ok_or(LessonError::UnknownLevel(level_id))
    }

    pub fn ids(&self) -> impl Iterator<Item = u32> + '_ {
        self.levels.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LevelConfig> {
        self.levels.values()
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

/// Largest operand or answer magnitude a level may ask for. Keeps every sum,
/// difference and capped product well inside `i64`.
pub const MAX_MAGNITUDE: i64 = 1_000_000;

fn within_bounds(range: NumberRange) -> bool {
    range.min >= -MAX_MAGNITUDE && range.max <= MAX_MAGNITUDE
}

/// Reject configs the generator cannot honour.
pub fn validate(cfg: &LevelConfig) -> Result<()> {
    let invalid = |reason: &str| LessonError::InvalidLevel {
        level_id: cfg.id,
        reason: reason.to_string(),
    };

    if cfg.id == 0 {
        return Err(invalid("level id must be positive"));
    }
    if !cfg.number_range.is_valid() {
        return Err(invalid("number_range.min exceeds number_range.max"));
    }
    if !within_bounds(cfg.number_range) {
        return Err(invalid("number_range exceeds ±1000000"));
    }
    if let Some(range) = cfg.answer_range {
        if !range.is_valid() {
            return Err(invalid("answer_range.min exceeds answer_range.max"));
        }
        if !within_bounds(range) {
            return Err(invalid("answer_range exceeds ±1000000"));
        }
    }
    if cfg.shapes.is_empty() {
        return Err(invalid("no exercise shapes allowed"));
    }
    if cfg.total_questions == 0 {
        return Err(invalid("total_questions must be positive"));
    }
    if cfg.operation != Operation::Division && cfg.shapes.iter().any(|s| s.is_division_only()) {
        return Err(invalid("division-machine and fair-share need a division level"));
    }
    if cfg.operation == Operation::Counting
        && cfg.shapes.iter().any(|s| matches!(s, FillBlank | TrueFalse | MatchEquation))
    {
        return Err(invalid("counting levels have no equation to blank or match"));
    }
    if cfg.operation != Operation::Counting && cfg.shapes.contains(&CountObjects) {
        return Err(invalid("count-objects needs a counting level"));
    }
    if cfg.operation == Operation::Division && cfg.number_range.max < 1 {
        return Err(invalid("division needs a positive divisor in number_range"));
    }
    if !cfg.allow_negatives && cfg.number_range.min < 0 {
        return Err(invalid("negative operands need allow_negatives"));
    }
    if cfg.allow_decimals {
        warn!(level_id = cfg.id, "allow_decimals is set but answers are always whole numbers");
    }
    Ok(())
}

fn level(
    id: u32, name: &str, operation: Operation, number_range: NumberRange,
    answer_range: Option<NumberRange>, shapes: &[ExerciseShape], difficulty: Difficulty,
) -> LevelConfig {
    LevelConfig {
        id,
        name: name.to_string(),
        operation,
        number_range,
        answer_range,
        shapes: shapes.to_vec(),
        total_questions: 10,
        difficulty,
        allow_negatives: false,
        allow_remainders: false,
        allow_decimals: false,
    }
}

fn builtin_levels() -> Vec<LevelConfig> {
    use Difficulty::*;
    use Operation::*;

    let r = NumberRange::new;
    let mut levels = vec![
        level(1, "Count to Ten", Counting, r(1, 10), None,
            &[CountObjects, MultipleChoice, NumberLine], Easy),
        level(2, "Tiny Sums", Addition, r(0, 5), Some(r(0, 10)),
            &[MultipleChoice, TypeAnswer, FillBlank, TrueFalse], Easy),
        level(3, "Sums to Twenty", Addition, r(1, 10), Some(r(2, 20)),
            &[MultipleChoice, TypeAnswer, FillBlank, NumberLine, MatchEquation], Easy),
        level(4, "Take Away", Subtraction, r(0, 10), Some(r(0, 10)),
            &[MultipleChoice, TypeAnswer, FillBlank, TrueFalse], Easy),
        level(5, "Bigger Differences", Subtraction, r(5, 20), None,
            &[MultipleChoice, TypeAnswer, NumberLine, MatchEquation], Medium),
        level(6, "Tens and Ones", PlaceValue, r(10, 99), None,
            &[MultipleChoice, TypeAnswer, FillBlank], Medium),
        level(7, "Times Tables to Five", Multiplication, r(1, 5), None,
            &[MultipleChoice, TypeAnswer, FillBlank, TrueFalse], Easy),
        level(8, "Times Tables", Multiplication, r(2, 12), Some(r(4, 144)),
            &[MultipleChoice, TypeAnswer, MatchEquation, FillBlank], Medium),
        level(9, "Sharing Equally", Division, r(1, 10), Some(r(1, 10)),
            &[DivisionMachine, FairShare, MultipleChoice, TypeAnswer], Medium),
        level(10, "Leftovers", Division, r(2, 50), None,
            &[DivisionMachine, FairShare, TypeAnswer], Hard),
        level(11, "Fraction Warm-up", Fractions, r(1, 10), Some(r(0, 20)),
            &[MultipleChoice, TypeAnswer], Medium),
        level(12, "Mixed Bag", Mixed, r(1, 20), Some(r(0, 40)),
            &[MultipleChoice, TypeAnswer, FillBlank, TrueFalse, MatchEquation, NumberLine], Hard),
        level(13, "Below Zero", Subtraction, r(0, 15), None,
            &[TypeAnswer, NumberLine, FillBlank], Hard),
    ];

    levels[9].allow_remainders = true;
    levels[11].total_questions = 15;
    levels[12].allow_negatives = true;
    levels
}
