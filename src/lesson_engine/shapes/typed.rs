use crate::lesson_engine::{
    helpers::{answer_text, number_words, question_text},
    models::{ExercisePayload, Operands},
    shapes::Formatted,
};

/// Marker standing in for the missing value in fill-blank templates.
pub const BLANK: &str = "__";

pub fn type_answer(ops: &Operands) -> Formatted {
    let answer = answer_text(ops);
    let mut accepted = vec![answer.clone()];
    if let Some(words) = number_words(ops.answer) {
        accepted.push(words);
    }
    if ops.remainder != 0 {
        accepted.push(format!("{} r {}", ops.answer, ops.remainder));
        accepted.push(format!("{} remainder {}", ops.answer, ops.remainder));
    }

    Formatted {
        prompt: question_text(ops),
        answer,
        payload: ExercisePayload::TypeAnswer { accepted },
    }
}

pub fn fill_blank(ops: &Operands) -> Formatted {
    let template = if ops.remainder != 0 {
        format!("{} = {BLANK} r {}", ops.equation(), ops.remainder)
    } else {
        format!("{} = {BLANK}", ops.equation())
    };
    Formatted {
        prompt: format!("Fill in the blank: {template}"),
        answer: answer_text(ops),
        payload: ExercisePayload::FillBlank { template },
    }
}
