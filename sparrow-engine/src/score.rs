//! Rule-based scoring of a winning decomposition.

use serde::{Deserialize, Serialize};

use crate::errors::EngineResult;
use crate::hand_evaluator::HandEvaluator;
use crate::meld::{Decomposition, Meld};
use crate::rule::ScoringRule;
use crate::state::GameState;
use crate::types::{Direction, Seat};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Bonus {
    Flush,
    AllSets,
    AllRuns,
    ColorGroup,
    MacroDirectionGroup,
    MicroDirectionGroup,
}

/// How a winning hand reached its total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub total: u32,
    /// Bonuses that count toward `total`, in evaluation order. Empty when
    /// the honor-pair override fired.
    pub bonuses: Vec<(Bonus, u32)>,
    pub pair_override: bool,
    pub decomposition: Decomposition,
}

/// Scores a decomposition for a seat holding `micro` while the table
/// direction is `macro_dir`.
pub fn score_decomposition(
    decomposition: &Decomposition,
    macro_dir: Direction,
    micro: Direction,
    rule: &ScoringRule,
) -> ScoreBreakdown {
    let mut bonuses = Vec::new();

    // Flush looks at the four melds only; the pair's suit does not matter.
    let mut ranked_suits = decomposition
        .melds
        .iter()
        .map(Meld::suit)
        .filter(|s| s.is_ranked());
    if let Some(first) = ranked_suits.next() {
        if ranked_suits.all(|s| s == first) {
            bonuses.push((Bonus::Flush, rule.flush));
        }
    }

    // Likewise only the four melds; the pair is neither a set nor a run.
    let ranked_melds: Vec<&Meld> = decomposition
        .melds
        .iter()
        .filter(|m| m.suit().is_ranked())
        .collect();
    if !ranked_melds.is_empty() {
        if ranked_melds.iter().all(|m| m.is_set()) {
            bonuses.push((Bonus::AllSets, rule.all_sets));
        } else if ranked_melds.iter().all(|m| m.is_run()) {
            bonuses.push((Bonus::AllRuns, rule.all_runs));
        }
    }

    for group in decomposition.groups() {
        if group[0].suit().is_color() {
            bonuses.push((Bonus::ColorGroup, rule.color_group));
        }
    }

    for meld in &decomposition.melds {
        if meld.suit() == macro_dir.suit() {
            bonuses.push((Bonus::MacroDirectionGroup, rule.macro_direction_group));
        }
        if meld.suit() == micro.suit() {
            bonuses.push((Bonus::MicroDirectionGroup, rule.micro_direction_group));
        }
    }

    let pair_suit = decomposition.pair_suit();
    let pair_override = rule.honor_pair_resets && (pair_suit.is_color() || pair_suit.is_direction());
    if pair_override {
        log::debug!("{pair_suit} pair resets score to base");
        bonuses.clear();
    }

    let total = rule.base + bonuses.iter().map(|&(_, v)| v).sum::<u32>();
    ScoreBreakdown {
        total,
        bonuses,
        pair_override,
        decomposition: decomposition.clone(),
    }
}

/// Full breakdown for the seat's hand, or `None` if it does not win.
pub fn score_hand(
    state: &GameState,
    seat: Seat,
    rule: &ScoringRule,
) -> EngineResult<Option<ScoreBreakdown>> {
    let evaluator = HandEvaluator::from_state(state, seat)?;
    Ok(evaluator.evaluate().map(|d| {
        score_decomposition(
            &d,
            state.macro_direction(),
            state.micro_direction(seat),
            rule,
        )
    }))
}

/// Score of the seat's hand; 0 when it does not win.
pub fn compute_score(state: &GameState, seat: Seat, rule: &ScoringRule) -> EngineResult<u32> {
    Ok(score_hand(state, seat, rule)?.map_or(0, |b| b.total))
}

/// `compute_score` for a textual player id such as `"player2"`.
pub fn compute_score_for_player(
    state: &GameState,
    player: &str,
    rule: &ScoringRule,
) -> EngineResult<u32> {
    compute_score(state, player.parse()?, rule)
}
