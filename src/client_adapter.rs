use serde_json::{json, Map, Value};
use crate::lesson_engine::{
    collaborators::ProgressRecord,
    models::{Exercise, ExercisePayload},
};

/// Shape-specific fields, flattened into the client's exercise object.
fn payload_fields(payload: &ExercisePayload) -> Value {
    match payload {
        ExercisePayload::MultipleChoice { options } => json!({ "options": options }),
        ExercisePayload::TypeAnswer { accepted } => json!({ "acceptedAnswers": accepted }),
        ExercisePayload::FillBlank { template } => json!({ "equation": template }),
        ExercisePayload::TrueFalse { statement, shown_answer } => json!({
            "statement": statement,
            "shownAnswer": shown_answer
        }),
        ExercisePayload::MatchEquation { pairs, shuffled_answers } => json!({
            "equations": pairs.iter().map(|p| p.equation.as_str()).collect::<Vec<_>>(),
            "answers": shuffled_answers,
            "pairs": pairs.iter()
                .map(|p| json!({ "equation": p.equation, "answer": p.answer }))
                .collect::<Vec<_>>()
        }),
        ExercisePayload::NumberLine { min, max, target } => json!({
            "min": min,
            "max": max,
            "target": target
        }),
        ExercisePayload::CountObjects { emoji, count } => json!({
            "emoji": emoji,
            "count": count
        }),
        ExercisePayload::DivisionMachine { dividend, divisor } => json!({
            "dividend": dividend,
            "divisor": divisor
        }),
        ExercisePayload::FairShare { items, groups, emoji } => json!({
            "items": items,
            "groups": groups,
            "emoji": emoji
        }),
    }
}

/// Convert an [`Exercise`] into the flat camelCase object the web client
/// renders. The `type` field carries the shape tag.
pub fn to_client_exercise(ex: &Exercise) -> Value {
    let mut obj = Map::new();
    obj.insert("id".into(), json!(ex.id));
    obj.insert("levelId".into(), json!(ex.level_id));
    obj.insert("type".into(), json!(ex.shape().to_string()));
    obj.insert("question".into(), json!(ex.prompt));
    obj.insert("correctAnswer".into(), json!(ex.answer));
    obj.insert("explanation".into(), json!(ex.explanation));
    obj.insert("xpReward".into(), json!(ex.reward));
    obj.insert("hints".into(), json!(ex.hints));
    obj.insert("num1".into(), json!(ex.operands.num1));
    obj.insert("num2".into(), json!(ex.operands.num2));
    obj.insert("operation".into(), json!(ex.operands.operation));
    if let Value::Object(fields) = payload_fields(&ex.payload) {
        obj.extend(fields);
    }
    Value::Object(obj)
}

/// Convert a whole lesson into a JSON array.
pub fn to_client_lesson(exercises: &[Exercise]) -> Value {
    Value::Array(exercises.iter().map(to_client_exercise).collect())
}

/// Progress summary in the shape the progress API expects.
pub fn to_client_progress(record: &ProgressRecord) -> Value {
    json!({
        "levelId": record.level_id,
        "totalReward": record.total_reward,
        "correctCount": record.correct_count,
        "totalExercises": record.total_exercises,
        "perfect": record.perfect,
        "failed": record.failed
    })
}
