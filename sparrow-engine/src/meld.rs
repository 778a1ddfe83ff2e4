//! Meld predicates and the decomposition of a winning hand.

use serde::{Deserialize, Serialize};

use crate::tile::{Suit, Tile};

/// True if 2, 3 or 4 tiles share suit and rank state.
///
/// Any other length is reported as `false` rather than an error.
pub fn is_set(tiles: &[Tile]) -> bool {
    if !(2..=4).contains(&tiles.len()) {
        log::debug!("is_set called with {} tiles", tiles.len());
        return false;
    }
    let first = tiles[0];
    tiles
        .iter()
        .all(|t| t.suit() == first.suit() && t.rank() == first.rank())
}

/// True if three tiles of one ranked suit hold consecutive ranks.
pub fn is_run(a: Tile, b: Tile, c: Tile) -> bool {
    if a.suit() != b.suit() || b.suit() != c.suit() || !a.suit().is_ranked() {
        return false;
    }
    let (Some(ra), Some(rb), Some(rc)) = (a.rank(), b.rank(), c.rank()) else {
        return false;
    };
    let mut ranks = [ra, rb, rc];
    ranks.sort_unstable();
    ranks[1] == ranks[0] + 1 && ranks[2] == ranks[0] + 2
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MeldKind {
    Set,
    Run,
}

/// Classifies a triple, preferring `Set` (a triple cannot be both).
pub fn classify(tiles: &[Tile; 3]) -> Option<MeldKind> {
    if is_set(tiles) {
        Some(MeldKind::Set)
    } else if is_run(tiles[0], tiles[1], tiles[2]) {
        Some(MeldKind::Run)
    } else {
        None
    }
}

/// A validated three-tile group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meld {
    pub kind: MeldKind,
    pub tiles: [Tile; 3],
}

impl Meld {
    pub fn new(tiles: [Tile; 3]) -> Option<Self> {
        classify(&tiles).map(|kind| Meld { kind, tiles })
    }

    /// All three tiles share a suit, so the first one speaks for the group.
    #[inline]
    pub fn suit(&self) -> Suit {
        self.tiles[0].suit()
    }

    #[inline]
    pub fn is_set(&self) -> bool {
        self.kind == MeldKind::Set
    }

    #[inline]
    pub fn is_run(&self) -> bool {
        self.kind == MeldKind::Run
    }
}

/// Four melds followed by the closing pair, in discovery order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decomposition {
    pub melds: [Meld; 4],
    pub pair: [Tile; 2],
}

impl Decomposition {
    #[inline]
    pub fn pair_suit(&self) -> Suit {
        self.pair[0].suit()
    }

    /// The five groups as slices: melds first, pair last.
    pub fn groups(&self) -> impl Iterator<Item = &[Tile]> {
        self.melds
            .iter()
            .map(|m| m.tiles.as_slice())
            .chain(std::iter::once(self.pair.as_slice()))
    }

    /// Every tile of the decomposition in group order.
    pub fn tiles(&self) -> Vec<Tile> {
        self.groups().flatten().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(s: &str) -> Tile {
        s.parse().unwrap()
    }

    #[test]
    fn set_accepts_two_to_four() {
        let x = t("4 stick");
        assert!(is_set(&[x, x]));
        assert!(is_set(&[x, x, x]));
        assert!(is_set(&[x, x, x, x]));
        assert!(!is_set(&[x]));
        assert!(!is_set(&[]));
        assert!(!is_set(&[x, x, x, x, x]));
    }

    #[test]
    fn set_rejects_mismatches() {
        assert!(!is_set(&[t("1 stick"), t("2 circle"), t("3 10k")]));
        assert!(!is_set(&[t("1 stick"), t("1 circle")]));
        assert!(!is_set(&[t("1 stick"), t("1 stick"), t("2 stick")]));
        assert!(!is_set(&[t("east"), t("west")]));
        assert!(is_set(&[t("red"), t("red"), t("red")]));
    }

    #[test]
    fn run_in_any_order() {
        assert!(is_run(t("3 circle"), t("1 circle"), t("2 circle")));
        assert!(is_run(t("7 10k"), t("8 10k"), t("9 10k")));
        assert!(!is_run(t("1 circle"), t("2 circle"), t("4 circle")));
        assert!(!is_run(t("1 circle"), t("2 stick"), t("3 circle")));
        assert!(!is_run(t("2 circle"), t("2 circle"), t("2 circle")));
    }

    #[test]
    fn run_never_includes_rankless() {
        assert!(!is_run(t("east"), t("south"), t("west")));
        assert!(!is_run(t("red"), t("red"), t("red")));
        assert!(!is_run(t("1 stick"), t("2 stick"), t("green")));
    }

    #[test]
    fn classify_triples() {
        assert_eq!(
            classify(&[t("5 stick"), t("5 stick"), t("5 stick")]),
            Some(MeldKind::Set)
        );
        assert_eq!(
            classify(&[t("5 stick"), t("6 stick"), t("4 stick")]),
            Some(MeldKind::Run)
        );
        assert_eq!(classify(&[t("5 stick"), t("6 stick"), t("white")]), None);
        assert!(Meld::new([t("north"), t("north"), t("north")]).is_some());
    }
}
