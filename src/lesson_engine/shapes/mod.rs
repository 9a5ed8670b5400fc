//! Shape formatters grouped by interaction style.
//!
//! Every formatter turns one [`Operands`] triple into a prompt, a canonical
//! answer string and a shape payload:
//!
//! ```ignore
//! pub fn <shape>(ops: &Operands, ..., rng: &mut SeededRandom) -> Formatted
//! ```
//!
//! The generator dispatches to these via [`format`].

/// multiple-choice, true-false
pub mod choice;
/// type-answer, fill-blank
pub mod typed;
/// match-equation
pub mod matching;
/// number-line, count-objects, division-machine, fair-share
pub mod visual;

use crate::lesson_engine::{
    models::{ExercisePayload, ExerciseShape, LevelConfig, Operands},
    rng::SeededRandom,
};

/// Prompt, canonical answer and payload for one exercise.
#[derive(Debug, Clone)]
pub struct Formatted {
    pub prompt: String,
    pub answer: String,
    pub payload: ExercisePayload,
}

/// Dispatch to the formatter for `shape`.
pub fn format(
    shape: ExerciseShape, cfg: &LevelConfig, ops: &Operands, rng: &mut SeededRandom,
) -> Formatted {
    match shape {
        ExerciseShape::MultipleChoice  => choice::multiple_choice(ops, rng),
        ExerciseShape::TrueFalse       => choice::true_false(ops, rng),
        ExerciseShape::TypeAnswer      => typed::type_answer(ops),
        ExerciseShape::FillBlank       => typed::fill_blank(ops),
        ExerciseShape::MatchEquation   => matching::match_equation(cfg, ops, rng),
        ExerciseShape::NumberLine      => visual::number_line(ops),
        ExerciseShape::CountObjects    => visual::count_objects(ops),
        ExerciseShape::DivisionMachine => visual::division_machine(ops),
        ExerciseShape::FairShare       => visual::fair_share(ops),
    }
}
