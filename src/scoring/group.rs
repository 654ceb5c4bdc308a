use std::fmt;

use super::{ScoreElement, ScoringScheme};
use crate::model::*;

// A group that has been scored. Immutable: the score is fixed at
// construction from the group, the scheme and the wind context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoredGroup {
    group: Group,
    element: ScoreElement,
    score: Score,
}

impl ScoredGroup {
    pub fn new(group: Group, scheme: &ScoringScheme, own_wind: Wind, prevailing_wind: Wind) -> Self {
        let element = score_element(&group, own_wind, prevailing_wind);
        Self {
            group,
            element,
            score: scheme.score_of(element),
        }
    }

    #[inline]
    pub fn group(&self) -> &Group {
        &self.group
    }

    #[inline]
    pub fn element(&self) -> ScoreElement {
        self.element
    }

    #[inline]
    pub fn score(&self) -> Score {
        self.score
    }
}

impl fmt::Display for ScoredGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.group)
    }
}

// Select the one category a group scores under. Total function: every
// combination reachable through Group construction has a category.
fn score_element(group: &Group, own_wind: Wind, prevailing_wind: Wind) -> ScoreElement {
    use ScoreElement::*;

    match group.group_type() {
        GroupType::Pair => match group.tile() {
            Tile::Suit(..) => PairSuit,
            // Own wind wins when seat and prevailing coincide.
            Tile::Wind(w) if w == own_wind => PairOwnWind,
            Tile::Wind(w) if w == prevailing_wind => PairPrevailingWind,
            Tile::Wind(_) => PairWind,
            Tile::Dragon(_) => PairDragon,
        },
        // Chows are suited by construction.
        GroupType::Chow => ChowSuit,
        GroupType::Pung => pung_element(group, own_wind, prevailing_wind),
        GroupType::Kong => kong_element(group, own_wind, prevailing_wind),
    }
}

fn pung_element(group: &Group, own_wind: Wind, prevailing_wind: Wind) -> ScoreElement {
    use ScoreElement::*;

    let concealed = group.is_concealed();
    match group.tile() {
        t @ Tile::Suit(..) => {
            if t.is_major() {
                if concealed { PungConcealedMajorSuit } else { PungExposedMajorSuit }
            } else {
                if concealed { PungConcealedMinorSuit } else { PungExposedMinorSuit }
            }
        }
        Tile::Wind(w) => {
            if w == own_wind && w == prevailing_wind {
                if concealed { PungConcealedPrevailingOwnWind } else { PungExposedPrevailingOwnWind }
            } else if w == own_wind {
                if concealed { PungConcealedOwnWind } else { PungExposedOwnWind }
            } else if w == prevailing_wind {
                if concealed { PungConcealedPrevailingWind } else { PungExposedPrevailingWind }
            } else {
                if concealed { PungConcealedWind } else { PungExposedWind }
            }
        }
        Tile::Dragon(_) => {
            if concealed { PungConcealedDragon } else { PungExposedDragon }
        }
    }
}

fn kong_element(group: &Group, own_wind: Wind, prevailing_wind: Wind) -> ScoreElement {
    use ScoreElement::*;

    let concealed = group.is_concealed();
    match group.tile() {
        t @ Tile::Suit(..) => {
            if t.is_major() {
                if concealed { KongConcealedMajorSuit } else { KongExposedMajorSuit }
            } else {
                if concealed { KongConcealedMinorSuit } else { KongExposedMinorSuit }
            }
        }
        Tile::Wind(w) => {
            if w == own_wind && w == prevailing_wind {
                if concealed { KongConcealedPrevailingOwnWind } else { KongExposedPrevailingOwnWind }
            } else if w == own_wind {
                if concealed { KongConcealedOwnWind } else { KongExposedOwnWind }
            } else if w == prevailing_wind {
                if concealed { KongConcealedPrevailingWind } else { KongExposedPrevailingWind }
            } else {
                if concealed { KongConcealedWind } else { KongExposedWind }
            }
        }
        Tile::Dragon(_) => {
            if concealed { KongConcealedDragon } else { KongExposedDragon }
        }
    }
}
