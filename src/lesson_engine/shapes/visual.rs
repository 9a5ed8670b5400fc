use crate::lesson_engine::{
    helpers::{answer_text, object_for, objects},
    models::{ExercisePayload, Operands, Operation},
    shapes::Formatted,
};

/// Width of the number-line window around the target.
pub const NUMBER_LINE_SPAN: i64 = 10;

pub fn number_line(ops: &Operands) -> Formatted {
    let min = ops.answer.div_euclid(NUMBER_LINE_SPAN) * NUMBER_LINE_SPAN;
    let max = min + NUMBER_LINE_SPAN;
    let what = match ops.operation {
        Operation::Counting => ops.answer.to_string(),
        _ => format!("the answer to {}", ops.equation()),
    };
    Formatted {
        prompt: format!("Place {what} on the number line from {min} to {max}."),
        answer: answer_text(ops),
        payload: ExercisePayload::NumberLine { min, max, target: ops.answer },
    }
}

pub fn count_objects(ops: &Operands) -> Formatted {
    let emoji = object_for(ops);
    Formatted {
        prompt: format!("How many {emoji} are there? {}", objects(emoji, ops.answer)),
        answer: answer_text(ops),
        payload: ExercisePayload::CountObjects { emoji: emoji.to_string(), count: ops.answer },
    }
}

/// Quotient shown by the division shapes.
///
/// Floored even for exact-division levels, where it equals the synthesized
/// answer; a divisor of zero never leaves the generator.
fn floored_quotient(ops: &Operands) -> i64 {
    if ops.num2 == 0 {
        return 0;
    }
    ops.num1.div_euclid(ops.num2)
}

pub fn division_machine(ops: &Operands) -> Formatted {
    Formatted {
        prompt: format!(
            "The machine divides by {}. Feed it {}. What number comes out?",
            ops.num2, ops.num1
        ),
        answer: floored_quotient(ops).to_string(),
        payload: ExercisePayload::DivisionMachine { dividend: ops.num1, divisor: ops.num2 },
    }
}

pub fn fair_share(ops: &Operands) -> Formatted {
    let emoji = object_for(ops);
    Formatted {
        prompt: format!(
            "Share {} {emoji} equally between {} friends. How many does each friend get?",
            ops.num1, ops.num2
        ),
        answer: floored_quotient(ops).to_string(),
        payload: ExercisePayload::FairShare {
            items: ops.num1,
            groups: ops.num2,
            emoji: emoji.to_string(),
        },
    }
}
