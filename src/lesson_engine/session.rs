//! Lesson session state machine.
//!
//! A [`LessonSession`] owns one attempt at a lesson. It is fed one outcome at
//! a time through [`LessonSession::submit_answer`] and, for timed modes,
//! clock ticks through [`LessonSession::advance_clock`]. Timers only move on
//! ticks; nothing runs in the background.
//!
//! ```text
//! Practice ──(lives hit 0)──▶ OutOfLives ──(refill)──▶ Practice
//!    │                            └──(no refill)──▶ Finished(Failed)
//!    └──▶ Finished(Completed | Failed | TimedOut)
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::lesson_engine::{
    collaborators::{xp_boost_multiplier, Inventory, ProgressRecord},
    error::{LessonError, Result},
    models::{Exercise, GameMode},
    reward::{combo_multiplier, compute_reward, milestone_at},
};

/// Tunables for a session. Every field has a default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub starting_lives: u32,
    /// Refills never push lives above this.
    pub max_lives: u32,
    /// Whole-session countdown in speed-round mode.
    pub speed_round_secs: f64,
    /// Per-exercise countdown in lightning mode.
    pub lightning_secs: f64,
    /// Streak that wins a perfect-streak session.
    pub perfect_streak_target: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            starting_lives: 5,
            max_lives: 10,
            speed_round_secs: 60.0,
            lightning_secs: 10.0,
            perfect_streak_target: 10,
        }
    }
}

impl SessionConfig {
    pub fn from_toml_str(src: &str) -> Result<Self> {
        let cfg: SessionConfig = toml::from_str(src)?;
        if cfg.starting_lives == 0 || cfg.starting_lives > cfg.max_lives {
            return Err(LessonError::InvalidInput(format!(
                "starting_lives must be in 1..={} (got {})",
                cfg.max_lives, cfg.starting_lives
            )));
        }
        if !(cfg.speed_round_secs > 0.0 && cfg.lightning_secs > 0.0) {
            return Err(LessonError::InvalidInput("timers must be positive".into()));
        }
        Ok(cfg)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TerminalReason {
    Completed,
    Failed,
    TimedOut,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SessionPhase {
    Practice,
    /// Paused at zero lives until a refill arrives or the player gives up.
    OutOfLives,
    Finished(TerminalReason),
}

/// Side effects for the presentation layer. None of them affect scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SessionEvent {
    StreakMilestone(u32),
    LifeLost { remaining: u32 },
    /// Lightning countdown ran out on this exercise.
    TimeExpired { exercise_index: usize },
    OutOfLives,
    Finished(TerminalReason),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionState {
    pub exercise_index: usize,
    pub lives: u32,
    pub streak: u32,
    pub best_streak: u32,
    pub combo_multiplier: u32,
    pub total_reward: u32,
    pub correct_count: u32,
    pub hints_used: u32,
    pub mode: GameMode,
    pub perfect: bool,
    /// Speed-round countdown, seconds.
    pub time_left: Option<f64>,
    /// Lightning per-exercise countdown, seconds.
    pub question_time_left: Option<f64>,
}

/// Result of one submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnswerOutcome {
    pub correct: bool,
    pub reward: u32,
    pub streak: u32,
    pub combo_multiplier: u32,
    pub events: Vec<SessionEvent>,
}

/// Wire form of a submission, as sent by the presentation layer.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerSubmission {
    pub exercise_index: usize,
    pub is_correct: bool,
    #[serde(default)]
    pub hints_used: i32,
}

#[derive(Debug, Clone)]
pub struct LessonSession {
    level_id: u32,
    exercises: Vec<Exercise>,
    config: SessionConfig,
    xp_boost: u32,
    state: SessionState,
    phase: SessionPhase,
}

impl LessonSession {
    /// Start a session with default tunables. The XP boost is read once here.
    pub fn new(
        level_id: u32, exercises: Vec<Exercise>, mode: GameMode, inventory: &impl Inventory,
    ) -> Result<Self> {
        Self::with_config(level_id, exercises, mode, SessionConfig::default(), inventory)
    }

    pub fn with_config(
        level_id: u32, exercises: Vec<Exercise>, mode: GameMode,
        config: SessionConfig, inventory: &impl Inventory,
    ) -> Result<Self> {
        if exercises.is_empty() {
            return Err(LessonError::InvalidInput("a session needs at least one exercise".into()));
        }
        let state = SessionState {
            exercise_index: 0,
            lives: config.starting_lives.min(config.max_lives),
            streak: 0,
            best_streak: 0,
            combo_multiplier: 1,
            total_reward: 0,
            correct_count: 0,
            hints_used: 0,
            mode,
            perfect: false,
            time_left: (mode == GameMode::SpeedRound).then_some(config.speed_round_secs),
            question_time_left: (mode == GameMode::Lightning).then_some(config.lightning_secs),
        };
        let xp_boost = xp_boost_multiplier(inventory);
        debug!(level_id, ?mode, xp_boost, count = exercises.len(), "session started");
        Ok(LessonSession { level_id, exercises, config, xp_boost, state, phase: SessionPhase::Practice })
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.phase, SessionPhase::Finished(_))
    }

    pub fn exercises(&self) -> &[Exercise] {
        &self.exercises
    }

    /// The exercise awaiting an answer, if the session is still in practice.
    pub fn current_exercise(&self) -> Option<&Exercise> {
        match self.phase {
            SessionPhase::Practice => self.exercises.get(self.state.exercise_index),
            _ => None,
        }
    }

    /// Record the outcome for exercise `exercise_index`.
    ///
    /// Answers must arrive in order; anything else is rejected without
    /// touching the state.
    pub fn submit_answer(
        &mut self, exercise_index: usize, is_correct: bool, hints_used: i32,
    ) -> Result<AnswerOutcome> {
        if self.phase != SessionPhase::Practice {
            return Err(LessonError::SessionNotActive(self.phase));
        }
        if hints_used < 0 {
            return Err(LessonError::InvalidInput(format!("negative hint count {hints_used}")));
        }
        if exercise_index >= self.exercises.len() {
            return Err(LessonError::InvalidInput(format!(
                "exercise index {exercise_index} out of range (lesson has {})",
                self.exercises.len()
            )));
        }
        if exercise_index != self.state.exercise_index {
            return Err(LessonError::InvalidInput(format!(
                "expected an answer for exercise {}, got {exercise_index}",
                self.state.exercise_index
            )));
        }

        let hints = hints_used as u32;
        self.state.hints_used = self.state.hints_used.saturating_add(hints);
        let mut events = Vec::new();
        let reward = if is_correct {
            self.apply_correct(hints > 0, &mut events)
        } else {
            self.apply_incorrect(&mut events);
            0
        };

        debug!(
            level_id = self.level_id, exercise_index, is_correct, reward,
            streak = self.state.streak, lives = self.state.lives, phase = ?self.phase,
            "answer recorded"
        );
        Ok(AnswerOutcome {
            correct: is_correct,
            reward,
            streak: self.state.streak,
            combo_multiplier: self.state.combo_multiplier,
            events,
        })
    }

    pub fn submit(&mut self, submission: &AnswerSubmission) -> Result<AnswerOutcome> {
        self.submit_answer(submission.exercise_index, submission.is_correct, submission.hints_used)
    }

    /// Advance the mode timers by `seconds`.
    ///
    /// Speed-round ends the session when its countdown hits zero. In
    /// lightning mode an expired per-exercise countdown scores the current
    /// exercise as wrong and restarts the countdown; overshoot is not carried
    /// into the next exercise. Other modes, and paused or finished sessions,
    /// ignore ticks.
    pub fn advance_clock(&mut self, seconds: f64) -> Result<Vec<SessionEvent>> {
        if !seconds.is_finite() || seconds < 0.0 {
            return Err(LessonError::InvalidInput(format!("invalid elapsed time {seconds}")));
        }
        let mut events = Vec::new();
        if self.phase != SessionPhase::Practice {
            return Ok(events);
        }

        match self.state.mode {
            GameMode::SpeedRound => {
                let left = self.state.time_left.unwrap_or(0.0) - seconds;
                self.state.time_left = Some(left.max(0.0));
                if left <= 0.0 {
                    self.finish(TerminalReason::TimedOut, &mut events);
                }
            }
            GameMode::Lightning => {
                let left = self.state.question_time_left.unwrap_or(0.0) - seconds;
                if left <= 0.0 {
                    events.push(SessionEvent::TimeExpired { exercise_index: self.state.exercise_index });
                    self.apply_incorrect(&mut events);
                } else {
                    self.state.question_time_left = Some(left);
                }
            }
            GameMode::Normal | GameMode::PerfectStreak | GameMode::BossBattle => {}
        }
        Ok(events)
    }

    /// Ask the inventory for a lives refill while paused at zero lives.
    ///
    /// Returns the hearts granted. A refill of zero ends the session as
    /// failed. Only valid in [`SessionPhase::OutOfLives`], so a second call
    /// never grants twice.
    pub fn refill_lives(&mut self, inventory: &mut impl Inventory) -> Result<u32> {
        if self.phase != SessionPhase::OutOfLives {
            return Err(LessonError::InvalidInput("lives refill is only possible at zero lives".into()));
        }

        let added = inventory.grant_lives_refill();
        let mut events = Vec::new();
        if added == 0 {
            warn!(level_id = self.level_id, "refill granted no hearts");
            self.finish(TerminalReason::Failed, &mut events);
            return Ok(0);
        }

        self.state.lives = (self.state.lives + added).min(self.config.max_lives);
        self.phase = SessionPhase::Practice;
        if self.state.question_time_left.is_some() {
            self.state.question_time_left = Some(self.config.lightning_secs);
        }
        debug!(level_id = self.level_id, added, lives = self.state.lives, "lives refilled");
        if self.state.exercise_index >= self.exercises.len() {
            self.finish(TerminalReason::Completed, &mut events);
        }
        Ok(added)
    }

    /// Give up at zero lives instead of refilling.
    pub fn decline_refill(&mut self) -> Result<()> {
        if self.phase != SessionPhase::OutOfLives {
            return Err(LessonError::SessionNotActive(self.phase));
        }
        self.finish(TerminalReason::Failed, &mut Vec::new());
        Ok(())
    }

    /// Summary for the progress store, once the session has finished.
    pub fn progress_record(&self) -> Option<ProgressRecord> {
        let SessionPhase::Finished(reason) = self.phase else {
            return None;
        };
        Some(ProgressRecord {
            level_id: self.level_id,
            total_reward: self.state.total_reward,
            correct_count: self.state.correct_count,
            total_exercises: self.exercises.len() as u32,
            perfect: self.state.perfect,
            failed: reason == TerminalReason::Failed,
        })
    }

    // -- transitions --------------------------------------------------------

    fn apply_correct(&mut self, hint_used: bool, events: &mut Vec<SessionEvent>) -> u32 {
        let base_xp = self.exercises[self.state.exercise_index].reward;
        let s = &mut self.state;
        s.streak += 1;
        s.best_streak = s.best_streak.max(s.streak);
        s.combo_multiplier = combo_multiplier(s.streak);
        let reward = compute_reward(s.streak, s.mode, hint_used, self.xp_boost, base_xp);
        s.total_reward = s.total_reward.saturating_add(reward);
        s.correct_count += 1;
        if let Some(m) = milestone_at(s.streak) {
            events.push(SessionEvent::StreakMilestone(m));
        }

        self.next_exercise();
        if self.state.mode == GameMode::PerfectStreak
            && self.state.streak >= self.config.perfect_streak_target
        {
            self.state.perfect = true;
            self.finish(TerminalReason::Completed, events);
        } else if self.state.exercise_index >= self.exercises.len() {
            self.state.perfect = self.state.correct_count as usize == self.exercises.len();
            self.finish(TerminalReason::Completed, events);
        }
        reward
    }

    fn apply_incorrect(&mut self, events: &mut Vec<SessionEvent>) {
        let s = &mut self.state;
        s.streak = 0;
        s.combo_multiplier = 1;
        s.lives = s.lives.saturating_sub(1);
        events.push(SessionEvent::LifeLost { remaining: s.lives });

        self.next_exercise();
        if self.state.mode == GameMode::PerfectStreak {
            self.finish(TerminalReason::Failed, events);
        } else if self.state.lives == 0 {
            self.phase = SessionPhase::OutOfLives;
            events.push(SessionEvent::OutOfLives);
            debug!(level_id = self.level_id, "out of lives");
        } else if self.state.exercise_index >= self.exercises.len() {
            self.finish(TerminalReason::Completed, events);
        }
    }

    fn next_exercise(&mut self) {
        self.state.exercise_index += 1;
        if self.state.question_time_left.is_some() {
            self.state.question_time_left = Some(self.config.lightning_secs);
        }
    }

    fn finish(&mut self, reason: TerminalReason, events: &mut Vec<SessionEvent>) {
        self.phase = SessionPhase::Finished(reason);
        events.push(SessionEvent::Finished(reason));
        info!(
            level_id = self.level_id, ?reason,
            total_reward = self.state.total_reward,
            correct = self.state.correct_count,
            best_streak = self.state.best_streak,
            perfect = self.state.perfect,
            "session finished"
        );
    }
}
