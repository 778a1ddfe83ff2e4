use serde::{Deserialize, Serialize};

use crate::errors::EngineResult;

/// Point values used by the scorer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringRule {
    /// Score of any winning hand before bonuses, and the value the
    /// valueless-pair override resets to.
    pub base: u32,
    pub flush: u32,
    pub all_sets: u32,
    pub all_runs: u32,
    /// Awarded once per color-suit group.
    pub color_group: u32,
    pub macro_direction_group: u32,
    pub micro_direction_group: u32,

    /// Whether a color or direction pair discards every bonus.
    ///
    /// The standard table always applies it; turning it off gives the
    /// plain additive total.
    pub honor_pair_resets: bool,
}

impl Default for ScoringRule {
    fn default() -> Self {
        Self::standard()
    }
}

impl ScoringRule {
    pub fn standard() -> Self {
        Self {
            base: 2,
            flush: 3,
            all_sets: 3,
            all_runs: 1,
            color_group: 1,
            macro_direction_group: 1,
            micro_direction_group: 1,
            honor_pair_resets: true,
        }
    }

    pub fn additive() -> Self {
        Self {
            honor_pair_resets: false,
            ..Self::standard()
        }
    }

    /// Loads a rule from JSON. Missing fields fall back to `standard()`.
    pub fn from_json(text: &str) -> EngineResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn to_json(&self) -> EngineResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}
