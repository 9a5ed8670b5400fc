use std::fmt;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Level configuration primitives
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Operation {
    Addition,
    Subtraction,
    Multiplication,
    Division,
    Counting,
    PlaceValue,
    Fractions,
    Mixed,
}

impl Operation {
    /// Infix symbol used in prompts ("7 + 5").
    pub fn symbol(self) -> &'static str {
        match self {
            Operation::Addition       => "+",
            Operation::Subtraction    => "-",
            Operation::Multiplication => "×",
            Operation::Division       => "÷",
            // Degraded kinds never reach an equation unresolved.
            Operation::Counting
            | Operation::PlaceValue
            | Operation::Fractions
            | Operation::Mixed        => "?",
        }
    }

    /// Short prefix used in exercise ids ("ADD-3-007").
    pub fn id_prefix(self) -> &'static str {
        match self {
            Operation::Addition       => "ADD",
            Operation::Subtraction    => "SUB",
            Operation::Multiplication => "MUL",
            Operation::Division       => "DIV",
            Operation::Counting       => "CNT",
            Operation::PlaceValue     => "PV",
            Operation::Fractions      => "FR",
            Operation::Mixed          => "MIX",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Operation::Addition       => "Addition",
            Operation::Subtraction    => "Subtraction",
            Operation::Multiplication => "Multiplication",
            Operation::Division       => "Division",
            Operation::Counting       => "Counting",
            Operation::PlaceValue     => "Place Value",
            Operation::Fractions      => "Fractions",
            Operation::Mixed          => "Mixed",
        };
        write!(f, "{}", s)
    }
}

/// Inclusive integer range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberRange {
    pub min: i64,
    pub max: i64,
}

impl NumberRange {
    pub const fn new(min: i64, max: i64) -> Self {
        NumberRange { min, max }
    }

    pub fn contains(self, value: i64) -> bool {
        self.min <= value && value <= self.max
    }

    pub fn is_valid(self) -> bool {
        self.min <= self.max
    }
}

impl fmt::Display for NumberRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.min, self.max)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy   => write!(f, "Easy"),
            Difficulty::Medium => write!(f, "Medium"),
            Difficulty::Hard   => write!(f, "Hard"),
        }
    }
}

/// Interaction type of an exercise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExerciseShape {
    MultipleChoice,
    TypeAnswer,
    FillBlank,
    TrueFalse,
    MatchEquation,
    NumberLine,
    CountObjects,
    DivisionMachine,
    FairShare,
}

impl ExerciseShape {
    /// Shapes whose payload only makes sense for a dividend/divisor pair.
    pub fn is_division_only(self) -> bool {
        matches!(self, ExerciseShape::DivisionMachine | ExerciseShape::FairShare)
    }
}

impl fmt::Display for ExerciseShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ExerciseShape::MultipleChoice  => "multiple-choice",
            ExerciseShape::TypeAnswer      => "type-answer",
            ExerciseShape::FillBlank       => "fill-blank",
            ExerciseShape::TrueFalse       => "true-false",
            ExerciseShape::MatchEquation   => "match-equation",
            ExerciseShape::NumberLine      => "number-line",
            ExerciseShape::CountObjects    => "count-objects",
            ExerciseShape::DivisionMachine => "division-machine",
            ExerciseShape::FairShare       => "fair-share",
        };
        write!(f, "{}", s)
    }
}

/// Declarative content specification for one level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelConfig {
    pub id: u32,
    pub name: String,
    pub operation: Operation,
    pub number_range: NumberRange,
    /// When present, every generated answer must fall inside it.
    #[serde(default)]
    pub answer_range: Option<NumberRange>,
    pub shapes: Vec<ExerciseShape>,
    pub total_questions: usize,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub allow_negatives: bool,
    #[serde(default)]
    pub allow_remainders: bool,
    #[serde(default)]
    pub allow_decimals: bool,
}

impl LevelConfig {
    /// Does `answer` honour this level's answer constraints?
    pub fn accepts_answer(&self, answer: i64) -> bool {
        match self.answer_range {
            Some(range) => range.contains(answer),
            None => self.allow_negatives || answer >= 0,
        }
    }
}

// ---------------------------------------------------------------------------
// Exercise types
// ---------------------------------------------------------------------------

/// The numeric triple behind an exercise, after degraded kinds are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operands {
    pub operation: Operation,
    pub num1: i64,
    pub num2: i64,
    pub answer: i64,
    /// Non-zero only for division levels that allow remainders.
    pub remainder: i64,
}

impl Operands {
    /// Left-hand side of the equation, e.g. "12 ÷ 4".
    pub fn equation(&self) -> String {
        match self.operation {
            Operation::Counting => format!("{}", self.num1),
            op => format!("{} {} {}", self.num1, op.symbol(), self.num2),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchPair {
    pub equation: String,
    pub answer: String,
}

/// Shape-specific payload. Exactly one is carried by every exercise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "kebab-case")]
pub enum ExercisePayload {
    MultipleChoice { options: Vec<String> },
    TypeAnswer { accepted: Vec<String> },
    FillBlank { template: String },
    TrueFalse { statement: String, shown_answer: i64 },
    MatchEquation { pairs: Vec<MatchPair>, shuffled_answers: Vec<String> },
    NumberLine { min: i64, max: i64, target: i64 },
    CountObjects { emoji: String, count: i64 },
    DivisionMachine { dividend: i64, divisor: i64 },
    FairShare { items: i64, groups: i64, emoji: String },
}

impl ExercisePayload {
    pub fn shape(&self) -> ExerciseShape {
        match self {
            ExercisePayload::MultipleChoice { .. }  => ExerciseShape::MultipleChoice,
            ExercisePayload::TypeAnswer { .. }      => ExerciseShape::TypeAnswer,
            ExercisePayload::FillBlank { .. }       => ExerciseShape::FillBlank,
            ExercisePayload::TrueFalse { .. }       => ExerciseShape::TrueFalse,
            ExercisePayload::MatchEquation { .. }   => ExerciseShape::MatchEquation,
            ExercisePayload::NumberLine { .. }      => ExerciseShape::NumberLine,
            ExercisePayload::CountObjects { .. }    => ExerciseShape::CountObjects,
            ExercisePayload::DivisionMachine { .. } => ExerciseShape::DivisionMachine,
            ExercisePayload::FairShare { .. }       => ExerciseShape::FairShare,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exercise {
    pub id: String,
    pub level_id: u32,
    pub prompt: String,
    /// Canonical answer string the player's response is compared against.
    pub answer: String,
    pub explanation: String,
    /// Base XP granted for a correct answer before session multipliers.
    pub reward: u32,
    pub hints: Vec<String>,
    pub operands: Operands,
    pub payload: ExercisePayload,
}

impl Exercise {
    pub fn shape(&self) -> ExerciseShape {
        self.payload.shape()
    }

    /// Compare a raw player response against the canonical answer.
    ///
    /// Whitespace and case are ignored; numeric responses are compared by
    /// value so "07" matches "7". Type-answer exercises also accept their
    /// listed textual variants ("seven").
    pub fn check(&self, response: &str) -> bool {
        let given = normalize(response);
        if given.is_empty() {
            return false;
        }
        if given == normalize(&self.answer) {
            return true;
        }
        if let (Ok(a), Ok(b)) = (given.parse::<i64>(), self.answer.trim().parse::<i64>()) {
            if a == b {
                return true;
            }
        }
        match &self.payload {
            ExercisePayload::TypeAnswer { accepted } => {
                accepted.iter().any(|v| normalize(v) == given)
            }
            _ => false,
        }
    }
}

fn normalize(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase()
}

// ---------------------------------------------------------------------------
// Session-facing types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GameMode {
    Normal,
    SpeedRound,
    Lightning,
    PerfectStreak,
    BossBattle,
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            GameMode::Normal        => "Normal",
            GameMode::SpeedRound    => "Speed Round",
            GameMode::Lightning     => "Lightning",
            GameMode::PerfectStreak => "Perfect Streak",
            GameMode::BossBattle    => "Boss Battle",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exercise(answer: &str, payload: ExercisePayload) -> Exercise {
        Exercise {
            id: "ADD-1-000".into(),
            level_id: 1,
            prompt: "What is 3 + 4?".into(),
            answer: answer.into(),
            explanation: String::new(),
            reward: 10,
            hints: vec![],
            operands: Operands {
                operation: Operation::Addition, num1: 3, num2: 4, answer: 7, remainder: 0,
            },
            payload,
        }
    }

    #[test]
    fn check_accepts_padded_numbers_and_variants() {
        let ex = exercise("7", ExercisePayload::TypeAnswer {
            accepted: vec!["7".into(), "seven".into()],
        });
        assert!(ex.check(" 7 "));
        assert!(ex.check("07"));
        assert!(ex.check("Seven"));
        assert!(!ex.check("8"));
        assert!(!ex.check(""));
    }

    #[test]
    fn check_ignores_variants_for_other_shapes() {
        let ex = exercise("7", ExercisePayload::FillBlank { template: "3 + 4 = __".into() });
        assert!(ex.check("7"));
        assert!(!ex.check("seven"));
    }

    #[test]
    fn payload_serializes_with_shape_tag() {
        let payload = ExercisePayload::NumberLine { min: 0, max: 10, target: 7 };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["shape"], "number-line");
        assert_eq!(json["target"], 7);
    }

    #[test]
    fn accepts_answer_defaults_to_non_negative() {
        let mut cfg = LevelConfig {
            id: 1,
            name: "t".into(),
            operation: Operation::Subtraction,
            number_range: NumberRange::new(0, 10),
            answer_range: None,
            shapes: vec![ExerciseShape::TypeAnswer],
            total_questions: 1,
            difficulty: Difficulty::Easy,
            allow_negatives: false,
            allow_remainders: false,
            allow_decimals: false,
        };
        assert!(!cfg.accepts_answer(-1));
        cfg.allow_negatives = true;
        assert!(cfg.accepts_answer(-1));
        cfg.answer_range = Some(NumberRange::new(0, 5));
        assert!(!cfg.accepts_answer(6));
    }
}
