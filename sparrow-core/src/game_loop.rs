//! Round runner: draw, evaluate, discard around the table until a seat
//! wins, the draw pool runs dry or the turn limit is hit.
//!
//! Seat One is dealt 14 tiles, so it is evaluated and discards before any
//! draw. Every later turn belongs to the next seat in order, which draws
//! one tile, is scored, and discards the tile its selector picks.

use anyhow::Context;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use sparrow_engine::rule::ScoringRule;
use sparrow_engine::score::{score_hand, ScoreBreakdown};
use sparrow_engine::{GameState, Seat, Tile};

use crate::seeding::SessionRng;

/// Turn cap for a single round.
pub const MAX_TURNS: u32 = 200;

/// Picks which tile a seat throws away.
/// Implemented by fixed baselines, random agents, learned policies, etc.
pub trait DiscardSelector {
    /// Index into `hand` of the tile to discard. `hand` is never empty.
    fn select_discard(&mut self, seat: Seat, hand: &[Tile]) -> usize;
}

/// Always discards the first tile in hand.
pub struct FirstTileSelector;

impl DiscardSelector for FirstTileSelector {
    fn select_discard(&mut self, _seat: Seat, _hand: &[Tile]) -> usize {
        0
    }
}

/// Uniformly random discards from its own seeded RNG.
pub struct RandomDiscardSelector {
    rng: ChaCha8Rng,
}

impl RandomDiscardSelector {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl DiscardSelector for RandomDiscardSelector {
    fn select_discard(&mut self, _seat: Seat, hand: &[Tile]) -> usize {
        self.rng.random_range(0..hand.len())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoundOutcome {
    Win { seat: Seat, score: ScoreBreakdown },
    Exhausted,
    TurnLimit,
}

impl RoundOutcome {
    pub fn winner(&self) -> Option<Seat> {
        match self {
            RoundOutcome::Win { seat, .. } => Some(*seat),
            _ => None,
        }
    }

    /// Winning total, or 0 for a round without a winner.
    pub fn points(&self) -> u32 {
        match self {
            RoundOutcome::Win { score, .. } => score.total,
            _ => 0,
        }
    }
}

/// Runs one round on its own `GameState`.
pub struct RoundRunner {
    state: GameState,
    rule: ScoringRule,
    current: Seat,
    turns: u32,
    outcome: Option<RoundOutcome>,
}

impl RoundRunner {
    /// Initializes and deals a fresh table.
    pub fn new(seed: Option<u64>) -> anyhow::Result<Self> {
        Self::with_state(GameState::new(seed), ScoringRule::standard())
    }

    /// Seeds the table from the next round seed of `session`.
    pub fn new_with_session(session: &mut SessionRng, rule: ScoringRule) -> anyhow::Result<Self> {
        let seed = session.next_round_seed();
        Self::with_state(GameState::from_seed_bytes(seed), rule)
    }

    /// Initializes and deals `state` under `rule`.
    pub fn with_state(mut state: GameState, rule: ScoringRule) -> anyhow::Result<Self> {
        state.initialize_draw_pool();
        state.deal_tiles().context("dealing opening hands")?;
        Ok(Self {
            state,
            rule,
            current: Seat::One,
            turns: 0,
            outcome: None,
        })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn rule(&self) -> &ScoringRule {
        &self.rule
    }

    /// Seat whose turn comes next.
    pub fn current_seat(&self) -> Seat {
        self.current
    }

    pub fn turns(&self) -> u32 {
        self.turns
    }

    pub fn is_done(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn outcome(&self) -> Option<&RoundOutcome> {
        self.outcome.as_ref()
    }

    /// Plays one turn. Returns false once the round is over.
    pub fn step_once(&mut self, selector: &mut dyn DiscardSelector) -> anyhow::Result<bool> {
        if self.outcome.is_some() {
            return Ok(false);
        }
        if self.turns >= MAX_TURNS {
            log::info!("round stopped at turn limit {MAX_TURNS}");
            self.outcome = Some(RoundOutcome::TurnLimit);
            return Ok(false);
        }

        let seat = self.current;
        // Seat One opens with its dealt 14 tiles.
        if self.turns > 0 && self.state.draw_tile(seat).is_none() {
            log::info!("draw pool exhausted after {} turns", self.turns);
            self.outcome = Some(RoundOutcome::Exhausted);
            return Ok(false);
        }

        if let Some(score) = score_hand(&self.state, seat, &self.rule)? {
            log::info!("{seat} wins on turn {} for {}", self.turns, score.total);
            self.outcome = Some(RoundOutcome::Win { seat, score });
            return Ok(false);
        }

        let hand = self.state.hand(seat);
        let idx = selector.select_discard(seat, hand);
        let Some(&tile) = hand.get(idx) else {
            anyhow::bail!("{seat} selected discard index {idx} from a hand of {}", hand.len());
        };
        self.state.discard_tile(seat, tile)?;
        log::debug!("turn {}: {seat} discards {tile}", self.turns);

        self.current = seat.next();
        self.turns += 1;
        Ok(true)
    }

    /// Plays turns until the round ends.
    pub fn run_to_completion(
        &mut self,
        selector: &mut dyn DiscardSelector,
    ) -> anyhow::Result<RoundOutcome> {
        while self.step_once(selector)? {}
        self.outcome
            .clone()
            .context("round stopped without an outcome")
    }
}
