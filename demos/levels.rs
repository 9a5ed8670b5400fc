//! Print every built-in level with one sample exercise per level.
//!
//! Run with: `cargo run --example levels`

use arith_drill_gen::{generate, lesson_engine::builtin_registry, to_client_exercise};

fn main() {
    let registry = builtin_registry();
    println!();
    println!("══ {} built-in levels ══", registry.len());
    println!();

    for cfg in registry.iter() {
        let shapes: Vec<String> = cfg.shapes.iter().map(|s| s.to_string()).collect();
        println!(
            "  {:>2}. {:<22} {:<15} {:<6} numbers {:<8} answers {:<10} {} questions",
            cfg.id,
            cfg.name,
            cfg.operation.to_string(),
            cfg.difficulty.to_string(),
            cfg.number_range.to_string(),
            cfg.answer_range.map(|r| r.to_string()).unwrap_or_else(|| "-".into()),
            cfg.total_questions,
        );
        println!("      shapes: {}", shapes.join(", "));

        let sample = generate(cfg.id, 1000 + u64::from(cfg.id)).expect("registered level");
        println!("      sample: {}", to_client_exercise(&sample[0]));
        println!();
    }
}
