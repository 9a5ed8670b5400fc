//! Numeric-triple synthesis per operation kind.
//!
//! Constraints are met by construction rather than rejection sampling:
//! non-negative subtraction draws the answer first and builds the minuend
//! from it, exact division builds the dividend from quotient × divisor.
//! Every helper draws a fixed number of values from the stream regardless of
//! the config, so the draw count per exercise only depends on the branch.

use crate::lesson_engine::{
    models::{LevelConfig, NumberRange, Operands, Operation},
    rng::SeededRandom,
};

/// Largest second factor / divisor drawn, whatever `number_range.max` says.
pub const FACTOR_CAP: i64 = 12;

/// Draw in `[lo, hi]`; an empty interval collapses to `lo`.
fn draw(rng: &mut SeededRandom, lo: i64, hi: i64) -> i64 {
    rng.next_int(lo, hi.max(lo))
}

/// Range the answer is drawn from when the answer comes first.
fn answer_source(cfg: &LevelConfig, non_negative: bool) -> NumberRange {
    let base = cfg.answer_range.unwrap_or(cfg.number_range);
    if non_negative {
        NumberRange::new(base.min.max(0), base.max.max(0))
    } else {
        base
    }
}

/// Second-factor / divisor bounds: at least `floor`, never above [`FACTOR_CAP`].
///
/// A range that starts past the cap falls back to `max(floor, 1)..=FACTOR_CAP`.
fn capped_factor_range(range: NumberRange, floor: i64) -> NumberRange {
    let mut lo = range.min.max(floor);
    if lo > FACTOR_CAP {
        lo = floor.max(1);
    }
    let hi = range.max.min(FACTOR_CAP).max(lo);
    NumberRange::new(lo, hi)
}

fn ceil_div(a: i64, b: i64) -> i64 {
    if a <= 0 { a / b } else { (a + b - 1) / b }
}

/// Build the `(num1, num2, answer)` triple for one exercise.
pub fn synthesize(cfg: &LevelConfig, rng: &mut SeededRandom) -> Operands {
    match cfg.operation {
        Operation::Addition => addition(cfg, rng),
        Operation::Subtraction if cfg.allow_negatives => signed_subtraction(cfg, rng),
        Operation::Subtraction => subtraction(cfg, rng),
        Operation::Multiplication => multiplication(cfg, rng),
        Operation::Division if cfg.allow_remainders => division_with_remainder(cfg, rng),
        Operation::Division => exact_division(cfg, rng),
        Operation::Counting => counting(cfg, rng),
        // No dedicated content yet: fall back to plain sums and differences.
        Operation::PlaceValue | Operation::Fractions | Operation::Mixed => {
            if rng.next() < 0.5 {
                addition(cfg, rng)
            } else {
                subtraction(cfg, rng)
            }
        }
    }
}

fn addition(cfg: &LevelConfig, rng: &mut SeededRandom) -> Operands {
    let nr = cfg.number_range;
    let num1_hi = match cfg.answer_range {
        Some(ar) => nr.max.min(ar.max - nr.min),
        None => nr.max,
    };
    let num1 = draw(rng, nr.min, num1_hi);

    let (lo, hi) = match cfg.answer_range {
        Some(ar) => (nr.min.max(ar.min - num1), nr.max.min(ar.max - num1)),
        None => (nr.min, nr.max),
    };
    let num2 = draw(rng, lo, hi);

    Operands { operation: Operation::Addition, num1, num2, answer: num1 + num2, remainder: 0 }
}

fn subtraction(cfg: &LevelConfig, rng: &mut SeededRandom) -> Operands {
    let source = answer_source(cfg, true);
    let answer = draw(rng, source.min, source.max);
    let num2 = draw(rng, cfg.number_range.min.max(0), cfg.number_range.max);
    Operands {
        operation: Operation::Subtraction,
        num1: answer + num2,
        num2,
        answer,
        remainder: 0,
    }
}

fn signed_subtraction(cfg: &LevelConfig, rng: &mut SeededRandom) -> Operands {
    let nr = cfg.number_range;
    let num1 = draw(rng, nr.min, nr.max);
    let (lo, hi) = match cfg.answer_range {
        Some(ar) => (nr.min.max(num1 - ar.max), nr.max.min(num1 - ar.min)),
        None => (nr.min, nr.max),
    };
    let num2 = draw(rng, lo, hi);
    Operands { operation: Operation::Subtraction, num1, num2, answer: num1 - num2, remainder: 0 }
}

fn multiplication(cfg: &LevelConfig, rng: &mut SeededRandom) -> Operands {
    let nr = cfg.number_range;
    let factor = capped_factor_range(nr, 0);

    // Bound the first factor so some second factor lands in the answer range.
    let (num1_lo, num1_hi) = match cfg.answer_range {
        Some(ar) => {
            let lo = if ar.min > 0 {
                nr.min.max(1).max(ceil_div(ar.min, factor.max.max(1)))
            } else {
                nr.min
            };
            let hi = if factor.min > 0 { nr.max.min(ar.max.div_euclid(factor.min)) } else { nr.max };
            (lo, hi)
        }
        None => (nr.min, nr.max),
    };
    let num1 = draw(rng, num1_lo, num1_hi);

    let (lo, hi) = match cfg.answer_range {
        Some(ar) if num1 > 0 => (
            factor.min.max(ceil_div(ar.min, num1)),
            factor.max.min(ar.max.div_euclid(num1)),
        ),
        _ => (factor.min, factor.max),
    };
    let num2 = draw(rng, lo, hi);
    Operands { operation: Operation::Multiplication, num1, num2, answer: num1 * num2, remainder: 0 }
}

fn exact_division(cfg: &LevelConfig, rng: &mut SeededRandom) -> Operands {
    let source = answer_source(cfg, true);
    let answer = draw(rng, source.min, source.max);
    let divisor = capped_factor_range(cfg.number_range, 1);
    let divisor = draw(rng, divisor.min, divisor.max);
    Operands {
        operation: Operation::Division,
        num1: answer * divisor,
        num2: divisor,
        answer,
        remainder: 0,
    }
}

fn division_with_remainder(cfg: &LevelConfig, rng: &mut SeededRandom) -> Operands {
    let nr = cfg.number_range;
    let dividend = draw(rng, nr.min.max(0), nr.max);
    let divisor = capped_factor_range(nr, 1);
    let divisor = draw(rng, divisor.min, divisor.max);
    Operands {
        operation: Operation::Division,
        num1: dividend,
        num2: divisor,
        answer: dividend / divisor,
        remainder: dividend % divisor,
    }
}

fn counting(cfg: &LevelConfig, rng: &mut SeededRandom) -> Operands {
    let source = match cfg.answer_range {
        Some(ar) => NumberRange::new(cfg.number_range.min.max(ar.min), cfg.number_range.max.min(ar.max)),
        None => cfg.number_range,
    };
    let num1 = draw(rng, source.min.max(0), source.max);
    Operands { operation: Operation::Counting, num1, num2: 0, answer: num1, remainder: 0 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lesson_engine::models::{Difficulty, ExerciseShape};

    fn cfg(operation: Operation, min: i64, max: i64, answer: Option<(i64, i64)>) -> LevelConfig {
        LevelConfig {
            id: 1,
            name: "test".into(),
            operation,
            number_range: NumberRange::new(min, max),
            answer_range: answer.map(|(a, b)| NumberRange::new(a, b)),
            shapes: vec![ExerciseShape::TypeAnswer],
            total_questions: 1,
            difficulty: Difficulty::Easy,
            allow_negatives: false,
            allow_remainders: false,
            allow_decimals: false,
        }
    }

    fn sweep(cfg: &LevelConfig, mut check: impl FnMut(&Operands)) {
        for seed in 0..200u64 {
            let mut rng = SeededRandom::new(seed);
            for _ in 0..5 {
                check(&synthesize(cfg, &mut rng));
            }
        }
    }

    #[test]
    fn addition_respects_answer_ceiling() {
        let c = cfg(Operation::Addition, 1, 10, Some((2, 12)));
        sweep(&c, |o| {
            assert_eq!(o.num1 + o.num2, o.answer);
            assert!((2..=12).contains(&o.answer), "{o:?}");
            assert!((1..=10).contains(&o.num1) && (1..=10).contains(&o.num2), "{o:?}");
        });
    }

    #[test]
    fn subtraction_never_goes_negative() {
        let c = cfg(Operation::Subtraction, 0, 20, None);
        sweep(&c, |o| {
            assert!(o.answer >= 0, "{o:?}");
            assert_eq!(o.num1 - o.num2, o.answer);
        });
    }

    #[test]
    fn subtraction_answer_comes_from_answer_range() {
        let c = cfg(Operation::Subtraction, 0, 10, Some((3, 6)));
        sweep(&c, |o| assert!((3..=6).contains(&o.answer), "{o:?}"));
    }

    #[test]
    fn signed_subtraction_can_go_negative() {
        let mut c = cfg(Operation::Subtraction, 0, 10, None);
        c.allow_negatives = true;
        let mut saw_negative = false;
        sweep(&c, |o| {
            assert_eq!(o.num1 - o.num2, o.answer);
            saw_negative |= o.answer < 0;
        });
        assert!(saw_negative);
    }

    #[test]
    fn multiplication_caps_second_factor() {
        let c = cfg(Operation::Multiplication, 2, 50, None);
        sweep(&c, |o| {
            assert!(o.num2 <= FACTOR_CAP, "{o:?}");
            assert_eq!(o.num1 * o.num2, o.answer);
        });
    }

    #[test]
    fn multiplication_respects_answer_ceiling() {
        let c = cfg(Operation::Multiplication, 1, 10, Some((1, 30)));
        sweep(&c, |o| assert!((1..=30).contains(&o.answer), "{o:?}"));
    }

    #[test]
    fn multiplication_bounds_first_factor_by_answer_range() {
        let c = cfg(Operation::Multiplication, 1, 20, Some((1, 10)));
        sweep(&c, |o| {
            assert!((1..=10).contains(&o.answer), "{o:?}");
            assert_eq!(o.num1 * o.num2, o.answer);
        });
    }

    #[test]
    fn multiplication_skips_zero_when_answers_start_above_it() {
        let c = cfg(Operation::Multiplication, 0, 6, Some((2, 30)));
        sweep(&c, |o| assert!((2..=30).contains(&o.answer), "{o:?}"));
    }

    #[test]
    fn second_factor_stays_capped_for_large_ranges() {
        let c = cfg(Operation::Multiplication, 15, 30, None);
        sweep(&c, |o| {
            assert!((1..=FACTOR_CAP).contains(&o.num2), "{o:?}");
            assert!((15..=30).contains(&o.num1), "{o:?}");
        });
        let mut d = cfg(Operation::Division, 20, 60, None);
        d.allow_remainders = true;
        sweep(&d, |o| assert!((1..=FACTOR_CAP).contains(&o.num2), "{o:?}"));
    }

    #[test]
    fn exact_division_has_no_remainder() {
        let c = cfg(Operation::Division, 1, 10, Some((1, 10)));
        sweep(&c, |o| {
            assert!(o.num2 >= 1);
            assert_eq!(o.num1 % o.num2, 0, "{o:?}");
            assert_eq!(o.num1 / o.num2, o.answer);
            assert_eq!(o.remainder, 0);
        });
    }

    #[test]
    fn remainder_division_floors() {
        let mut c = cfg(Operation::Division, 2, 50, None);
        c.allow_remainders = true;
        let mut saw_remainder = false;
        sweep(&c, |o| {
            assert_eq!(o.answer * o.num2 + o.remainder, o.num1, "{o:?}");
            assert!(o.remainder < o.num2);
            saw_remainder |= o.remainder > 0;
        });
        assert!(saw_remainder);
    }

    #[test]
    fn counting_answer_is_the_drawn_value() {
        let c = cfg(Operation::Counting, 1, 10, None);
        sweep(&c, |o| {
            assert_eq!(o.answer, o.num1);
            assert!((1..=10).contains(&o.answer));
        });
    }

    #[test]
    fn degraded_kinds_resolve_to_add_or_subtract() {
        for op in [Operation::PlaceValue, Operation::Fractions, Operation::Mixed] {
            let c = cfg(op, 1, 20, Some((0, 40)));
            let mut seen = std::collections::HashSet::new();
            sweep(&c, |o| {
                assert!(matches!(o.operation, Operation::Addition | Operation::Subtraction));
                assert!((0..=40).contains(&o.answer), "{o:?}");
                seen.insert(o.operation);
            });
            assert_eq!(seen.len(), 2, "{op} never produced both sub-cases");
        }
    }
}
