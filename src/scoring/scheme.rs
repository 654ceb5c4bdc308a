use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::model::Score;

// Every category a meld or a whole hand can score under. Closed set: the
// group scorer maps every reachable (group type, tile kind) combination onto
// exactly one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ScoreElement {
    // pairs
    PairSuit,
    PairWind,
    PairOwnWind,
    PairPrevailingWind,
    PairDragon,
    // chows
    ChowSuit,
    // pungs
    PungExposedMinorSuit,
    PungConcealedMinorSuit,
    PungExposedMajorSuit,
    PungConcealedMajorSuit,
    PungExposedWind,
    PungConcealedWind,
    PungExposedOwnWind,
    PungConcealedOwnWind,
    PungExposedPrevailingWind,
    PungConcealedPrevailingWind,
    PungExposedPrevailingOwnWind,
    PungConcealedPrevailingOwnWind,
    PungExposedDragon,
    PungConcealedDragon,
    // kongs
    KongExposedMinorSuit,
    KongConcealedMinorSuit,
    KongExposedMajorSuit,
    KongConcealedMajorSuit,
    KongExposedWind,
    KongConcealedWind,
    KongExposedOwnWind,
    KongConcealedOwnWind,
    KongExposedPrevailingWind,
    KongConcealedPrevailingWind,
    KongExposedPrevailingOwnWind,
    KongConcealedPrevailingOwnWind,
    KongExposedDragon,
    KongConcealedDragon,
    // whole hand
    OriginalCallHand,
    MahjongHand,
    AllMajorHand,
    NoChowsHand,
    SingleSuitHand,
    AllConcealedHand,
    MahjongByWallTile,
    MahjongByLastWallTile,
    MahjongByOnlyPossibleTile,
    MahjongByLooseTile,
    MahjongByLastDiscard,
    MahjongByRobbingKong,
    MahjongByOriginalCall,
}

// Immutable scoring configuration: the category value table plus the scalar
// constants of the rule set. One instance is shared across a whole game.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringScheme {
    pub mahjong_hand_size: usize, // tiles required for a complete hand
    pub limit_score: Score,       // cap applied to a single hand
    pub initial_score: Score,     // starting balance per player
    values: HashMap<ScoreElement, Score>,
}

impl ScoringScheme {
    pub fn score_of(&self, element: ScoreElement) -> Score {
        self.values.get(&element).copied().unwrap_or(0)
    }

    pub fn set_score(&mut self, element: ScoreElement, score: Score) {
        self.values.insert(element, score);
    }
}

// The standard western-classical table: concealed doubles exposed, a kong
// doubles the matching pung.
impl Default for ScoringScheme {
    fn default() -> Self {
        use ScoreElement::*;
        let values = [
            (PairSuit, 0),
            (PairWind, 0),
            (PairOwnWind, 2),
            (PairPrevailingWind, 2),
            (PairDragon, 2),
            (ChowSuit, 0),
            (PungExposedMinorSuit, 2),
            (PungConcealedMinorSuit, 4),
            (PungExposedMajorSuit, 4),
            (PungConcealedMajorSuit, 8),
            (PungExposedWind, 4),
            (PungConcealedWind, 8),
            (PungExposedOwnWind, 4),
            (PungConcealedOwnWind, 8),
            (PungExposedPrevailingWind, 4),
            (PungConcealedPrevailingWind, 8),
            (PungExposedPrevailingOwnWind, 8),
            (PungConcealedPrevailingOwnWind, 16),
            (PungExposedDragon, 4),
            (PungConcealedDragon, 8),
            (KongExposedMinorSuit, 8),
            (KongConcealedMinorSuit, 16),
            (KongExposedMajorSuit, 16),
            (KongConcealedMajorSuit, 32),
            (KongExposedWind, 16),
            (KongConcealedWind, 32),
            (KongExposedOwnWind, 16),
            (KongConcealedOwnWind, 32),
            (KongExposedPrevailingWind, 16),
            (KongConcealedPrevailingWind, 32),
            (KongExposedPrevailingOwnWind, 32),
            (KongConcealedPrevailingOwnWind, 64),
            (KongExposedDragon, 16),
            (KongConcealedDragon, 32),
            (OriginalCallHand, 10),
            (MahjongHand, 20),
            (AllMajorHand, 20),
            (NoChowsHand, 10),
            (SingleSuitHand, 40),
            (AllConcealedHand, 30),
            (MahjongByWallTile, 2),
            (MahjongByLastWallTile, 10),
            (MahjongByOnlyPossibleTile, 2),
            (MahjongByLooseTile, 10),
            (MahjongByLastDiscard, 10),
            (MahjongByRobbingKong, 10),
            (MahjongByOriginalCall, 10),
        ]
        .into_iter()
        .collect();

        Self {
            mahjong_hand_size: 14,
            limit_score: 1000,
            initial_score: 2000,
            values,
        }
    }
}

#[test]
fn test_default_scheme() {
    let scheme = ScoringScheme::default();
    assert_eq!(14, scheme.mahjong_hand_size);
    assert_eq!(4, scheme.score_of(ScoreElement::PungExposedDragon));
    assert_eq!(0, scheme.score_of(ScoreElement::ChowSuit));
}

#[test]
fn test_set_score() {
    let mut scheme = ScoringScheme::default();
    scheme.set_score(ScoreElement::ChowSuit, 1);
    assert_eq!(1, scheme.score_of(ScoreElement::ChowSuit));
}

#[test]
fn test_scheme_json_roundtrip() {
    let scheme = ScoringScheme::default();
    let json = serde_json::to_string(&scheme).unwrap();
    let back: ScoringScheme = serde_json::from_str(&json).unwrap();
    assert_eq!(scheme.limit_score, back.limit_score);
    assert_eq!(
        scheme.score_of(ScoreElement::KongConcealedDragon),
        back.score_of(ScoreElement::KongConcealedDragon)
    );
}
