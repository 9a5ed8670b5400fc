//! Shared builder functions used by every shape formatter.
//!
//! Every exercise is assembled from the same pieces: the question text for
//! its operands, an explanation, one or two hints, a per-shape reward and the
//! final [`Exercise`] struct. Shape modules only decide prompt and payload.

use crate::lesson_engine::models::*;

/// Emoji pool for counting and sharing exercises.
pub const OBJECTS: &[&str] = &["🍎", "⭐", "🐟", "🌸", "🍪", "🎈", "🐞", "⚽"];

/// Pick an object emoji from the operand itself, without touching the stream.
pub fn object_for(ops: &Operands) -> &'static str {
    OBJECTS[(ops.num1.unsigned_abs() as usize + ops.num2.unsigned_abs() as usize) % OBJECTS.len()]
}

/// Most emoji drawn out one by one in a prompt.
pub const MAX_RENDERED_OBJECTS: i64 = 30;

/// The emoji repeated `n` times (clamped to 0), or "n × emoji" past
/// [`MAX_RENDERED_OBJECTS`].
pub fn objects(emoji: &str, n: i64) -> String {
    if n > MAX_RENDERED_OBJECTS {
        return format!("{n} × {emoji}");
    }
    emoji.repeat(n.max(0) as usize)
}

/// Canonical answer text ("7", or "7" for 37 ÷ 5 which leaves a remainder).
pub fn answer_text(ops: &Operands) -> String {
    ops.answer.to_string()
}

/// Plain question for the operands, e.g. "What is 7 + 5?".
pub fn question_text(ops: &Operands) -> String {
    match ops.operation {
        Operation::Counting => {
            format!("How many are there? {}", objects(object_for(ops), ops.num1))
        }
        Operation::Division if ops.remainder != 0 => {
            format!("What is {}? Count whole groups only.", ops.equation())
        }
        _ => format!("What is {}?", ops.equation()),
    }
}

/// "7 + 5 = 12", or "37 ÷ 5 = 7 r 2".
pub fn full_equation(ops: &Operands) -> String {
    if ops.remainder != 0 {
        format!("{} = {} r {}", ops.equation(), ops.answer, ops.remainder)
    } else {
        format!("{} = {}", ops.equation(), ops.answer)
    }
}

pub fn explanation(ops: &Operands) -> String {
    let (a, b, c) = (ops.num1, ops.num2, ops.answer);
    let eq = full_equation(ops);
    match ops.operation {
        Operation::Addition => format!("{eq}. Start at {a} and count on {b} more."),
        Operation::Subtraction if c < 0 => format!(
            "{eq}. Counting back {b} from {a} goes past zero by {}.", -c
        ),
        Operation::Subtraction => format!("{eq}. Start at {a} and count back {b}."),
        Operation::Multiplication => format!("{eq}. That is {b} groups of {a}."),
        Operation::Division if ops.remainder != 0 => format!(
            "{eq}: {c} remainder {}. {c} groups of {b} make {}, and {} is left over.",
            ops.remainder, c * b, ops.remainder
        ),
        Operation::Division => format!("{eq} because {c} × {b} = {a}."),
        _ => format!("There are {c} in total. Touch each one as you count."),
    }
}

/// One or two hints, never giving the answer away.
pub fn hints(ops: &Operands) -> Vec<String> {
    let (a, b) = (ops.num1, ops.num2);
    match ops.operation {
        Operation::Addition => {
            let mut h = vec!["Start with the bigger number and count up.".to_string()];
            if ops.answer > 10 {
                h.push("Try making a ten first, then add what is left.".to_string());
            }
            h
        }
        Operation::Subtraction => vec![
            format!("Count back {b} from {a}."),
            format!("Think: what number plus {b} makes {a}?"),
        ],
        Operation::Multiplication => vec![
            format!("Think of {b} groups of {a}."),
            format!("Skip-count by {a}, {b} times."),
        ],
        Operation::Division => vec![
            format!("How many groups of {b} fit into {a}?"),
            format!("Use your times tables: what times {b} is close to {a}?"),
        ],
        _ => vec!["Touch each object as you count it.".to_string()],
    }
}

/// Base XP for a correct answer, by shape and difficulty.
pub fn shape_reward(shape: ExerciseShape, difficulty: Difficulty) -> u32 {
    let base = match shape {
        ExerciseShape::TrueFalse       => 8,
        ExerciseShape::MultipleChoice  => 10,
        ExerciseShape::CountObjects    => 10,
        ExerciseShape::FillBlank       => 12,
        ExerciseShape::TypeAnswer      => 15,
        ExerciseShape::NumberLine      => 15,
        ExerciseShape::DivisionMachine => 15,
        ExerciseShape::FairShare       => 15,
        ExerciseShape::MatchEquation   => 20,
    };
    match difficulty {
        Difficulty::Easy   => base,
        Difficulty::Medium => base * 3 / 2,
        Difficulty::Hard   => base * 2,
    }
}

/// English words for small integers ("twelve", "minus three").
///
/// Returns `None` outside ±999, where nobody types words anyway.
pub fn number_words(n: i64) -> Option<String> {
    const ONES: [&str; 20] = [
        "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine",
        "ten", "eleven", "twelve", "thirteen", "fourteen", "fifteen", "sixteen",
        "seventeen", "eighteen", "nineteen",
    ];
    const TENS: [&str; 10] = [
        "", "", "twenty", "thirty", "forty", "fifty", "sixty", "seventy", "eighty", "ninety",
    ];

    if n < 0 {
        return number_words(-n).map(|w| format!("minus {w}"));
    }
    if n > 999 {
        return None;
    }
    let n = n as usize;
    let below_hundred = |m: usize| -> String {
        match m {
            0..=19 => ONES[m].to_string(),
            _ if m % 10 == 0 => TENS[m / 10].to_string(),
            _ => format!("{}-{}", TENS[m / 10], ONES[m % 10]),
        }
    };
    Some(match n {
        0..=99 => below_hundred(n),
        _ if n % 100 == 0 => format!("{} hundred", ONES[n / 100]),
        _ => format!("{} hundred and {}", ONES[n / 100], below_hundred(n % 100)),
    })
}

/// Assemble the final [`Exercise`] from its parts.
pub fn exercise(
    cfg: &LevelConfig, index: usize, ops: Operands,
    prompt: String, answer: String, payload: ExercisePayload,
) -> Exercise {
    let reward = shape_reward(payload.shape(), cfg.difficulty);
    Exercise {
        id: format!("{}-{}-{:03}", cfg.operation.id_prefix(), cfg.id, index),
        level_id: cfg.id,
        prompt,
        answer,
        explanation: explanation(&ops),
        reward,
        hints: hints(&ops),
        operands: ops,
        payload,
    }
}
