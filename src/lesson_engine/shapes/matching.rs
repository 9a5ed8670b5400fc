use crate::lesson_engine::{
    arithmetic::synthesize,
    helpers::answer_text,
    models::{ExercisePayload, LevelConfig, MatchPair, Operands},
    rng::SeededRandom,
    shapes::Formatted,
};

/// Equations on the board, the exercise's own included.
pub const MATCH_PAIRS: usize = 4;
/// Re-draws allowed per extra pair to avoid a repeated answer.
const MAX_PAIR_ATTEMPTS: u32 = 8;

/// Four equations to connect to their shuffled answers.
///
/// Extra pairs come from the same level config, so they obey the same
/// constraints as the exercise's own triple. Repeated answers are re-drawn a
/// bounded number of times; a repeat that survives is harmless, since either
/// equation matches it.
pub fn match_equation(cfg: &LevelConfig, ops: &Operands, rng: &mut SeededRandom) -> Formatted {
    let mut triples = vec![*ops];
    while triples.len() < MATCH_PAIRS {
        let mut extra = synthesize(cfg, rng);
        for _ in 1..MAX_PAIR_ATTEMPTS {
            if !triples.iter().any(|t| t.answer == extra.answer) {
                break;
            }
            extra = synthesize(cfg, rng);
        }
        triples.push(extra);
    }

    let pairs: Vec<MatchPair> = triples
        .iter()
        .map(|t| MatchPair { equation: t.equation(), answer: answer_text(t) })
        .collect();
    let answers: Vec<String> = pairs.iter().map(|p| p.answer.clone()).collect();
    let shuffled_answers = rng.shuffle(&answers);

    Formatted {
        prompt: "Match each equation to its answer.".to_string(),
        answer: answer_text(ops),
        payload: ExercisePayload::MatchEquation { pairs, shuffled_answers },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lesson_engine::models::{Difficulty, ExerciseShape, NumberRange, Operation};

    #[test]
    fn pairs_start_with_own_equation_and_answers_are_a_permutation() {
        let cfg = LevelConfig {
            id: 3,
            name: "t".into(),
            operation: Operation::Addition,
            number_range: NumberRange::new(1, 10),
            answer_range: None,
            shapes: vec![ExerciseShape::MatchEquation],
            total_questions: 1,
            difficulty: Difficulty::Easy,
            allow_negatives: false,
            allow_remainders: false,
            allow_decimals: false,
        };
        let mut rng = SeededRandom::new(11);
        let ops = synthesize(&cfg, &mut rng);
        let f = match_equation(&cfg, &ops, &mut rng);
        let ExercisePayload::MatchEquation { pairs, shuffled_answers } = f.payload else {
            panic!("wrong payload");
        };
        assert_eq!(pairs.len(), MATCH_PAIRS);
        assert_eq!(pairs[0].equation, ops.equation());
        let mut a: Vec<_> = pairs.iter().map(|p| p.answer.clone()).collect();
        let mut b = shuffled_answers.clone();
        a.sort();
        b.sort();
        assert_eq!(a, b);
    }
}
