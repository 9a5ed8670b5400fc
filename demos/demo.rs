//! End-to-end demo: generate a lesson and play it in every game mode.
//!
//! Run with: `cargo run --example demo`
//!
//! Set `LOG_LEVEL=debug` to watch the engine's transitions, and
//! `LOG_FORMAT=json` for structured output.
//!
//! ## Key concepts demonstrated
//!
//! - `seed_for_user(user, level)` gives every player a stable, personal lesson.
//! - `generate(level, seed)` is fully deterministic.
//! - `LessonSession` is fed one outcome at a time; timed modes also get ticks.
//! - A zero-lives pause is repaired through the `Inventory` trait.

use arith_drill_gen::{
    generate, seed_for_user, to_client_progress, Exercise, GameMode, Inventory, LessonSession,
    SessionEvent, SessionPhase,
};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter = EnvFilter::try_from_env("LOG_LEVEL").unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(true);
    match std::env::var("LOG_FORMAT").as_deref() {
        Ok("json") => builder.json().init(),
        _ => builder.init(),
    }
}

/// Demo inventory: XP boost active, one three-heart refill in the bag.
struct Backpack {
    refills: u32,
}

impl Inventory for Backpack {
    fn has_active_boost(&self, name: &str) -> bool {
        name == arith_drill_gen::lesson_engine::XP_BOOST_ITEM
    }

    fn grant_lives_refill(&mut self) -> u32 {
        if self.refills == 0 {
            return 0;
        }
        self.refills -= 1;
        3
    }
}

fn print_exercise(i: usize, ex: &Exercise) {
    println!("  {:>2}. [{}] {}", i + 1, ex.shape(), ex.prompt);
    println!("      answer: {}   +{} XP   hint: {}", ex.answer, ex.reward, ex.hints[0]);
}

/// Play a lesson: every `miss_every`-th answer is wrong.
fn play(level: u32, seed: u64, mode: GameMode, miss_every: usize) {
    let exercises = generate(level, seed).expect("built-in level");
    let total = exercises.len();
    let mut bag = Backpack { refills: 1 };
    let mut session = LessonSession::new(level, exercises, mode, &bag).expect("non-empty lesson");

    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("  Level {level}  Mode: {mode}  Seed: {seed}");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let mut index = 0;
    while !session.is_finished() && index < total {
        if session.phase() == SessionPhase::OutOfLives {
            let added = session.refill_lives(&mut bag).expect("paused at zero lives");
            println!("  ♥ refill: +{added}");
            continue;
        }
        let correct = miss_every == 0 || (index + 1) % miss_every != 0;
        let outcome = session.submit_answer(index, correct, 0).expect("in-order answer");
        let mark = if outcome.correct { "✓" } else { "✗" };
        println!(
            "  {mark} #{:<2} +{:<4} streak {:<2} combo ×{}  lives {}",
            index + 1, outcome.reward, outcome.streak, outcome.combo_multiplier, session.state().lives
        );
        for event in outcome.events {
            if let SessionEvent::StreakMilestone(m) = event {
                println!("    🎉 {m} in a row!");
            }
        }
        session.advance_clock(4.0).expect("valid tick");
        index += 1;
    }

    match session.progress_record() {
        Some(record) => println!("  Result: {}", to_client_progress(&record)),
        None => println!("  Session still paused: {:?}", session.phase()),
    }
    println!();
}

fn main() {
    init_tracing();

    // ── One lesson, shown in full ───────────────────────────────────────────
    let seed = seed_for_user("demo-player", 3);
    println!();
    println!("══ Level 3 for demo-player (seed {seed}) ══");
    println!();
    for (i, ex) in generate(3, seed).expect("built-in level").iter().enumerate() {
        print_exercise(i, ex);
    }
    println!();

    // ── Every game mode ─────────────────────────────────────────────────────
    println!("══ Game modes ══");
    println!();
    play(12, seed, GameMode::Normal, 4);
    play(12, seed, GameMode::SpeedRound, 0);
    play(12, seed, GameMode::Lightning, 5);
    play(12, seed, GameMode::PerfectStreak, 0);
    play(12, seed, GameMode::BossBattle, 2);
}
