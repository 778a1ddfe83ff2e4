//! Batch round simulation with rayon parallelism.
//!
//! Every round owns its `GameState`; nothing is shared between workers, so
//! results for a seeded batch are identical for any thread count.

use rayon::prelude::*;
use sparrow_engine::rule::ScoringRule;
use sparrow_engine::{GameState, Seat};

use crate::game_loop::{
    DiscardSelector, FirstTileSelector, RandomDiscardSelector, RoundOutcome, RoundRunner,
};

/// Keeps discard RNG streams apart from the table RNG of the same seed.
const DISCARD_SEED_SALT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Configuration for a batch simulation run.
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Number of rounds to simulate.
    pub num_rounds: usize,
    /// Base seed. Round `i` gets `base_seed + i`.
    pub base_seed: Option<u64>,
    /// Rayon pool size. None = rayon default (num CPUs).
    pub num_threads: Option<usize>,
    /// Random discards instead of always discarding the first tile.
    pub random_discards: bool,
    pub rule: ScoringRule,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            num_rounds: 100,
            base_seed: None,
            num_threads: None,
            random_discards: false,
            rule: ScoringRule::standard(),
        }
    }
}

/// Result of a single completed round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundResult {
    pub outcome: RoundOutcome,
    pub turns: u32,
    /// Digest of the opening draw pool.
    pub draw_pool_digest: String,
    pub seed: Option<u64>,
}

/// Aggregate counts over a batch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchSummary {
    pub rounds: usize,
    pub wins_by_seat: [usize; 4],
    pub exhausted: usize,
    pub turn_limits: usize,
    pub total_points: u64,
    pub total_turns: u64,
}

impl BatchSummary {
    pub fn from_results(results: &[RoundResult]) -> Self {
        let mut s = BatchSummary {
            rounds: results.len(),
            ..Default::default()
        };
        for r in results {
            match &r.outcome {
                RoundOutcome::Win { seat, score } => {
                    s.wins_by_seat[seat.index()] += 1;
                    s.total_points += u64::from(score.total);
                }
                RoundOutcome::Exhausted => s.exhausted += 1,
                RoundOutcome::TurnLimit => s.turn_limits += 1,
            }
            s.total_turns += u64::from(r.turns);
        }
        s
    }

    pub fn wins(&self) -> usize {
        self.wins_by_seat.iter().sum()
    }

    /// Mean points per winning round.
    pub fn mean_win_points(&self) -> f64 {
        match self.wins() {
            0 => 0.0,
            n => self.total_points as f64 / n as f64,
        }
    }
}

/// Plays one round to its end.
pub fn simulate_single_round(
    seed: Option<u64>,
    config: &BatchConfig,
) -> anyhow::Result<RoundResult> {
    let mut runner = RoundRunner::with_state(GameState::new(seed), config.rule)?;
    let draw_pool_digest = runner.state().draw_pool_digest().to_string();

    let mut selector: Box<dyn DiscardSelector> = if config.random_discards {
        let discard_seed = seed.map_or_else(|| rand::random::<u64>(), |s| s ^ DISCARD_SEED_SALT);
        Box::new(RandomDiscardSelector::new(discard_seed))
    } else {
        Box::new(FirstTileSelector)
    };
    let outcome = runner.run_to_completion(selector.as_mut())?;

    Ok(RoundResult {
        outcome,
        turns: runner.turns(),
        draw_pool_digest,
        seed,
    })
}

/// Parallel batch simulator using a dedicated rayon ThreadPool.
pub struct BatchSimulator {
    pool: rayon::ThreadPool,
}

impl BatchSimulator {
    pub fn new(num_threads: Option<usize>) -> anyhow::Result<Self> {
        let mut builder = rayon::ThreadPoolBuilder::new();
        if let Some(n) = num_threads {
            builder = builder.num_threads(n);
        }
        let pool = builder
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to build thread pool: {}", e))?;
        Ok(Self { pool })
    }

    pub fn from_config(config: &BatchConfig) -> anyhow::Result<Self> {
        Self::new(config.num_threads)
    }

    pub fn num_threads(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Runs the batch in parallel; results are in round order.
    pub fn run_batch(&self, config: &BatchConfig) -> anyhow::Result<Vec<RoundResult>> {
        log::info!(
            "simulating {} rounds on {} threads",
            config.num_rounds,
            self.num_threads()
        );
        self.pool.install(|| run_rounds(config))
    }
}

/// Convenience: run a batch on rayon's global thread pool.
pub fn run_batch_simple(config: &BatchConfig) -> anyhow::Result<Vec<RoundResult>> {
    run_rounds(config)
}

fn run_rounds(config: &BatchConfig) -> anyhow::Result<Vec<RoundResult>> {
    let base_seed = config.base_seed;
    (0..config.num_rounds)
        .into_par_iter()
        .map(|i| {
            let seed = base_seed.map(|s| s.wrapping_add(i as u64));
            simulate_single_round(seed, config)
        })
        .collect()
}

/// Win share per seat over a batch, for quick balance checks.
pub fn win_rates(summary: &BatchSummary) -> [(Seat, f64); 4] {
    let rounds = summary.rounds.max(1) as f64;
    Seat::ALL.map(|seat| (seat, summary.wins_by_seat[seat.index()] as f64 / rounds))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_round_completes() {
        let result = simulate_single_round(Some(42), &BatchConfig::default()).unwrap();
        assert!(result.turns <= crate::game_loop::MAX_TURNS);
        assert_eq!(result.seed, Some(42));
        assert_eq!(result.draw_pool_digest.len(), 64);
    }

    #[test]
    fn seeded_rounds_are_deterministic() {
        let config = BatchConfig {
            random_discards: true,
            ..Default::default()
        };
        let a = simulate_single_round(Some(999), &config).unwrap();
        let b = simulate_single_round(Some(999), &config).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn batch_returns_correct_count() {
        let config = BatchConfig {
            num_rounds: 4,
            base_seed: Some(100),
            ..Default::default()
        };
        let results = run_batch_simple(&config).unwrap();
        assert_eq!(results.len(), 4);
        let seeds: Vec<_> = results.iter().map(|r| r.seed).collect();
        assert_eq!(seeds, vec![Some(100), Some(101), Some(102), Some(103)]);
    }

    #[test]
    fn batch_simulator_with_threads() {
        let sim = BatchSimulator::new(Some(2)).unwrap();
        assert_eq!(sim.num_threads(), 2);
        let config = BatchConfig {
            num_rounds: 6,
            base_seed: Some(500),
            random_discards: true,
            ..Default::default()
        };
        let pooled = sim.run_batch(&config).unwrap();
        let global = run_batch_simple(&config).unwrap();
        assert_eq!(pooled, global, "thread count must not change results");
    }

    #[test]
    fn summary_counts_every_round() {
        let config = BatchConfig {
            num_rounds: 8,
            base_seed: Some(1),
            ..Default::default()
        };
        let results = run_batch_simple(&config).unwrap();
        let summary = BatchSummary::from_results(&results);
        assert_eq!(summary.rounds, 8);
        assert_eq!(summary.wins() + summary.exhausted + summary.turn_limits, 8);
        let rates = win_rates(&summary);
        let total: f64 = rates.iter().map(|&(_, r)| r).sum();
        assert!((total - summary.wins() as f64 / 8.0).abs() < 1e-9);
    }

    #[test]
    fn summary_of_empty_batch() {
        let summary = BatchSummary::from_results(&[]);
        assert_eq!(summary.wins(), 0);
        assert_eq!(summary.mean_win_points(), 0.0);
    }
}
