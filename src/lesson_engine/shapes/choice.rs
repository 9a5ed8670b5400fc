use tracing::warn;

use crate::lesson_engine::{
    error::{LessonError, Result},
    helpers::{answer_text, question_text},
    models::{ExercisePayload, Operands},
    rng::SeededRandom,
    shapes::Formatted,
};

/// Wrong answers shown next to the correct one.
pub const DISTRACTOR_COUNT: usize = 3;
/// Distractors are drawn within ±this of the correct answer.
pub const DISTRACTOR_SPREAD: i64 = 5;
/// Bound on the distractor retry loop.
pub const MAX_DISTRACTOR_ATTEMPTS: u32 = 64;

/// Draw [`DISTRACTOR_COUNT`] distinct, non-negative wrong answers near `correct`.
///
/// Each attempt consumes exactly one draw. Fails only when too few candidates
/// exist in the window, e.g. a correct answer far below zero.
pub fn distractors(correct: i64, rng: &mut SeededRandom) -> Result<Vec<i64>> {
    let mut picked = Vec::with_capacity(DISTRACTOR_COUNT);
    for _ in 0..MAX_DISTRACTOR_ATTEMPTS {
        let candidate = correct + rng.next_int(-DISTRACTOR_SPREAD, DISTRACTOR_SPREAD);
        if candidate != correct && candidate >= 0 && !picked.contains(&candidate) {
            picked.push(candidate);
            if picked.len() == DISTRACTOR_COUNT {
                return Ok(picked);
            }
        }
    }
    Err(LessonError::ExhaustedRetries { attempts: MAX_DISTRACTOR_ATTEMPTS })
}

/// Smallest non-negative values other than `correct`; no draws.
fn fallback_distractors(correct: i64) -> Vec<i64> {
    let start = (correct - DISTRACTOR_SPREAD).max(0);
    (start..)
        .filter(|v| *v != correct)
        .take(DISTRACTOR_COUNT)
        .collect()
}

pub fn multiple_choice(ops: &Operands, rng: &mut SeededRandom) -> Formatted {
    let wrong = distractors(ops.answer, rng).unwrap_or_else(|err| {
        warn!(%err, answer = ops.answer, "distractor search exhausted; using fallback set");
        fallback_distractors(ops.answer)
    });

    let mut values = Vec::with_capacity(DISTRACTOR_COUNT + 1);
    values.push(ops.answer);
    values.extend(wrong);
    let options = rng
        .shuffle(&values)
        .into_iter()
        .map(|v| v.to_string())
        .collect();

    Formatted {
        prompt: question_text(ops),
        answer: answer_text(ops),
        payload: ExercisePayload::MultipleChoice { options },
    }
}

pub fn true_false(ops: &Operands, rng: &mut SeededRandom) -> Formatted {
    let show_correct = rng.next() < 0.5;
    let shown = if show_correct {
        ops.answer
    } else {
        let off = rng.next_int(1, 3);
        if ops.answer - off >= 0 && rng.next() < 0.5 {
            ops.answer - off
        } else {
            ops.answer + off
        }
    };

    let statement = format!("{} = {}", ops.equation(), shown);
    Formatted {
        prompt: format!("True or false: {statement}"),
        answer: show_correct.to_string(),
        payload: ExercisePayload::TrueFalse { statement, shown_answer: shown },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lesson_engine::models::Operation;

    fn ops(answer: i64) -> Operands {
        Operands { operation: Operation::Subtraction, num1: answer + 2, num2: 2, answer, remainder: 0 }
    }

    #[test]
    fn distractors_are_distinct_non_negative_and_wrong() {
        for seed in 0..300u64 {
            let mut rng = SeededRandom::new(seed);
            for correct in [0, 1, 2, 7, 50] {
                let d = distractors(correct, &mut rng).unwrap();
                assert_eq!(d.len(), 3);
                assert!(d.iter().all(|v| *v >= 0 && *v != correct), "{d:?} for {correct}");
                assert!(d.iter().all(|v| (v - correct).abs() <= DISTRACTOR_SPREAD));
                let mut uniq = d.clone();
                uniq.sort_unstable();
                uniq.dedup();
                assert_eq!(uniq.len(), 3, "duplicate distractor in {d:?}");
            }
        }
    }

    #[test]
    fn distractors_exhaust_far_below_zero() {
        let mut rng = SeededRandom::new(1);
        let err = distractors(-20, &mut rng).unwrap_err();
        assert!(matches!(err, LessonError::ExhaustedRetries { attempts: MAX_DISTRACTOR_ATTEMPTS }));
    }

    #[test]
    fn multiple_choice_falls_back_on_negative_answers() {
        let mut rng = SeededRandom::new(5);
        let f = multiple_choice(&ops(-20), &mut rng);
        let ExercisePayload::MultipleChoice { options } = f.payload else {
            panic!("wrong payload");
        };
        assert_eq!(options.len(), 4);
        assert_eq!(options.iter().filter(|o| *o == "-20").count(), 1);
        for o in options.iter().filter(|o| *o != "-20") {
            assert!(o.parse::<i64>().unwrap() >= 0);
        }
    }

    #[test]
    fn true_false_answer_matches_statement() {
        for seed in 0..100u64 {
            let mut rng = SeededRandom::new(seed);
            let o = ops(4);
            let f = true_false(&o, &mut rng);
            let ExercisePayload::TrueFalse { shown_answer, .. } = f.payload else {
                panic!("wrong payload");
            };
            assert_eq!(f.answer == "true", shown_answer == o.answer);
            assert!(shown_answer >= 0);
        }
    }
}
