//! Reward arithmetic shared by every exercise shape and game mode.

use crate::lesson_engine::models::GameMode;

/// Streak lengths that trigger a celebration.
pub const STREAK_MILESTONES: [u32; 6] = [5, 10, 15, 20, 25, 30];
/// Multiplier applied when any hint was used on the exercise.
pub const HINT_PENALTY: f64 = 0.8;

/// Combo multiplier for a streak length.
pub fn combo_multiplier(streak: u32) -> u32 {
    match streak {
        10.. => 5,
        7..=9 => 3,
        5..=6 => 2,
        _ => 1,
    }
}

/// Fixed reward bonus per game mode.
pub fn mode_bonus(mode: GameMode) -> f64 {
    match mode {
        GameMode::Normal        => 1.0,
        GameMode::SpeedRound    => 1.5,
        GameMode::Lightning     => 1.75,
        GameMode::PerfectStreak => 2.0,
        GameMode::BossBattle    => 3.0,
    }
}

/// XP for one correct answer.
///
/// `streak` is the streak *including* this answer. `xp_boost` is 2 while the
/// player has an active XP boost, else 1.
pub fn compute_reward(streak: u32, mode: GameMode, hint_used: bool, xp_boost: u32, base_xp: u32) -> u32 {
    let hint = if hint_used { HINT_PENALTY } else { 1.0 };
    let raw = f64::from(base_xp)
        * f64::from(xp_boost)
        * f64::from(combo_multiplier(streak))
        * mode_bonus(mode)
        * hint;
    // Products with 0.8 or 1.75 can land just under a whole number.
    (raw + 1e-9).floor() as u32
}

/// Milestone reached exactly at this streak length, if any.
pub fn milestone_at(streak: u32) -> Option<u32> {
    STREAK_MILESTONES.contains(&streak).then_some(streak)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn combo_thresholds() {
        let expected = [1, 1, 1, 1, 2, 2, 3, 3, 3, 5, 5, 5];
        for (i, want) in expected.iter().enumerate() {
            let streak = i as u32 + 1;
            assert_eq!(combo_multiplier(streak), *want, "streak {streak}");
        }
        assert_eq!(combo_multiplier(0), 1);
        assert_eq!(combo_multiplier(99), 5);
    }

    #[test]
    fn boss_battle_boosted_full_combo() {
        assert_eq!(compute_reward(10, GameMode::BossBattle, false, 2, 10), 300);
    }

    #[test]
    fn hint_penalty_floors() {
        assert_eq!(compute_reward(1, GameMode::Normal, true, 1, 10), 8);
        assert_eq!(compute_reward(1, GameMode::Normal, true, 1, 15), 12);
        assert_eq!(compute_reward(1, GameMode::SpeedRound, false, 1, 15), 22);
        assert_eq!(compute_reward(5, GameMode::Lightning, true, 1, 12), 33);
    }

    #[test]
    fn milestones_only_on_exact_values() {
        assert_eq!(milestone_at(5), Some(5));
        assert_eq!(milestone_at(30), Some(30));
        assert_eq!(milestone_at(6), None);
        assert_eq!(milestone_at(35), None);
    }
}
