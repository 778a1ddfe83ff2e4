use std::time::Instant;

use rayon::prelude::*;
use sparrow_core::game_loop::{RandomDiscardSelector, RoundOutcome, RoundRunner};

/// Plays one round with random discards. Returns (turns, won).
fn simulate_round_random(seed: u64) -> (u32, bool) {
    let Ok(mut runner) = RoundRunner::new(Some(seed)) else {
        return (0, false);
    };
    let mut selector = RandomDiscardSelector::new(seed);
    match runner.run_to_completion(&mut selector) {
        Ok(RoundOutcome::Win { .. }) => (runner.turns(), true),
        _ => (runner.turns(), false),
    }
}

fn main() {
    let num_cpus = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(4);

    // --- Single-core warmup + benchmark ---
    let _ = simulate_round_random(0);

    let start = Instant::now();
    let n_single = 1000u64;
    let mut total_turns = 0u64;
    let mut wins = 0u64;
    for i in 0..n_single {
        let (turns, won) = simulate_round_random(i);
        total_turns += turns as u64;
        wins += won as u64;
    }
    let elapsed = start.elapsed();
    let rps = n_single as f64 / elapsed.as_secs_f64();

    println!("=== SINGLE CORE ({} rounds) ===", n_single);
    println!("Time:             {:.2?}", elapsed);
    println!("Avg turns/round:  {:.1}", total_turns as f64 / n_single as f64);
    println!("Win rate:         {:.3}", wins as f64 / n_single as f64);
    println!("Rounds/sec:       {:.1}", rps);
    println!();

    // --- Multi-core benchmark ---
    let n_multi: u64 = 20_000;

    let start = Instant::now();
    let results: Vec<(u32, bool)> = (0..n_multi)
        .into_par_iter()
        .map(simulate_round_random)
        .collect();
    let elapsed = start.elapsed();

    let total_turns: u64 = results.iter().map(|(t, _)| *t as u64).sum();
    let rps = results.len() as f64 / elapsed.as_secs_f64();

    println!("=== ALL CORES ({} threads, {} rounds) ===", num_cpus, n_multi);
    println!("Time:             {:.2?}", elapsed);
    println!("Avg turns/round:  {:.1}", total_turns as f64 / results.len() as f64);
    println!("Rounds/sec:       {:.1}", rps);
    println!("Per-core/sec:     {:.1}", rps / num_cpus as f64);
}
