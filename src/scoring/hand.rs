use std::collections::HashSet;
use std::fmt;
use std::rc::Rc;

use super::{ScoreElement, ScoredGroup, ScoringScheme};
use crate::model::*;

// A hand that is being scored. The hand changes: as groups are added and
// circumstance flags are set, the totals and the mahjong status are
// recomputed from scratch. Hands are at most five groups, so the O(groups)
// recompute is the simple and correct choice.
#[derive(Debug)]
pub struct ScoredHand {
    scheme: Rc<ScoringScheme>,
    groups: Vec<ScoredGroup>,

    require_pair_concealed_info: bool,
    mahjong_pair_concealed: bool,
    mahjong_by_wall_tile: bool,
    mahjong_by_last_wall_tile: bool,
    mahjong_by_only_possible_tile: bool,
    mahjong_by_loose_tile: bool,
    mahjong_by_last_discard: bool,
    mahjong_by_robbing_kong: bool,
    mahjong_by_original_call: bool,
    non_mahjong_by_original_call: bool,

    is_mahjong: bool,
    total_unlimited: Score,
    total_limited: Score,
}

impl ScoredHand {
    pub fn new(scheme: Rc<ScoringScheme>) -> Self {
        Self {
            scheme,
            groups: vec![],
            require_pair_concealed_info: false,
            mahjong_pair_concealed: false,
            mahjong_by_wall_tile: false,
            mahjong_by_last_wall_tile: false,
            mahjong_by_only_possible_tile: false,
            mahjong_by_loose_tile: false,
            mahjong_by_last_discard: false,
            mahjong_by_robbing_kong: false,
            mahjong_by_original_call: false,
            non_mahjong_by_original_call: false,
            is_mahjong: false,
            total_unlimited: 0,
            total_limited: 0,
        }
    }

    // Groups cannot be removed once added.
    pub fn add(&mut self, group: ScoredGroup) -> Result<(), Error> {
        self.groups.push(group);
        self.update_score()
    }

    #[inline]
    pub fn groups(&self) -> &[ScoredGroup] {
        &self.groups
    }

    // Display order, materialized on demand.
    pub fn sorted_groups(&self) -> Vec<&ScoredGroup> {
        let mut groups: Vec<&ScoredGroup> = self.groups.iter().collect();
        groups.sort_by(|a, b| a.group().cmp(b.group()));
        groups
    }

    #[inline]
    pub fn total_score(&self) -> Score {
        self.total_limited
    }

    #[inline]
    pub fn total_score_unlimited(&self) -> Score {
        self.total_unlimited
    }

    #[inline]
    pub fn is_mahjong(&self) -> bool {
        self.is_mahjong
    }

    // Whether the evaluation needs to be told about the concealment of the
    // pair: its concealment cannot be inferred from group visibility when
    // every other group is concealed. set_mahjong_pair_concealed supplies it.
    pub fn requires_pair_concealed_info(&self) -> bool {
        self.require_pair_concealed_info
    }

    pub fn set_mahjong_pair_concealed(&mut self, concealed: bool) -> Result<(), Error> {
        self.mahjong_pair_concealed = concealed;
        self.update_score()
    }

    pub fn is_mahjong_by_wall_tile(&self) -> bool {
        self.mahjong_by_wall_tile
    }

    pub fn set_mahjong_by_wall_tile(&mut self, from_wall: bool) -> Result<(), Error> {
        self.mahjong_by_wall_tile = from_wall;
        self.update_score()
    }

    pub fn is_mahjong_by_last_wall_tile(&self) -> bool {
        self.mahjong_by_last_wall_tile
    }

    pub fn set_mahjong_by_last_wall_tile(&mut self, is_last: bool) -> Result<(), Error> {
        self.mahjong_by_last_wall_tile = is_last;
        self.update_score()
    }

    pub fn is_mahjong_by_only_possible_tile(&self) -> bool {
        self.mahjong_by_only_possible_tile
    }

    pub fn set_mahjong_by_only_possible_tile(&mut self, only: bool) -> Result<(), Error> {
        self.mahjong_by_only_possible_tile = only;
        self.update_score()
    }

    pub fn is_mahjong_by_loose_tile(&self) -> bool {
        self.mahjong_by_loose_tile
    }

    pub fn set_mahjong_by_loose_tile(&mut self, loose: bool) -> Result<(), Error> {
        self.mahjong_by_loose_tile = loose;
        self.update_score()
    }

    pub fn is_mahjong_by_last_discard(&self) -> bool {
        self.mahjong_by_last_discard
    }

    pub fn set_mahjong_by_last_discard(&mut self, last_discard: bool) -> Result<(), Error> {
        self.mahjong_by_last_discard = last_discard;
        self.update_score()
    }

    pub fn is_mahjong_by_robbing_kong(&self) -> bool {
        self.mahjong_by_robbing_kong
    }

    pub fn set_mahjong_by_robbing_kong(&mut self, robbing: bool) -> Result<(), Error> {
        self.mahjong_by_robbing_kong = robbing;
        self.update_score()
    }

    pub fn is_mahjong_by_original_call(&self) -> bool {
        self.mahjong_by_original_call
    }

    pub fn set_mahjong_by_original_call(&mut self, original_call: bool) -> Result<(), Error> {
        self.mahjong_by_original_call = original_call;
        self.update_score()
    }

    pub fn is_non_mahjong_by_original_call(&self) -> bool {
        self.non_mahjong_by_original_call
    }

    pub fn set_non_mahjong_by_original_call(&mut self, original_call: bool) -> Result<(), Error> {
        self.non_mahjong_by_original_call = original_call;
        self.update_score()
    }

    // Recalculate the totals from the current groups and flags. Also checks
    // the hand shape and derives the mahjong status.
    fn update_score(&mut self) -> Result<(), Error> {
        // Zero the totals in case we exit early.
        self.total_unlimited = 0;
        self.total_limited = 0;

        let mut total: Score = 0;
        let mut effective_hand_tiles = 0;
        let mut pair_count = 0;

        for group in &self.groups {
            total += group.score();
            effective_hand_tiles += group.group().group_type().hand_size();
            if group.group().group_type() == GroupType::Pair {
                pair_count += 1;
            }
        }

        // Applies even to an incomplete hand.
        if self.non_mahjong_by_original_call {
            total += self.scheme.score_of(ScoreElement::OriginalCallHand);
        }

        if effective_hand_tiles == self.scheme.mahjong_hand_size && pair_count == 1 {
            self.is_mahjong = true;
        } else if effective_hand_tiles >= self.scheme.mahjong_hand_size {
            self.is_mahjong = false;
            return Err(Error::InvalidHand(
                "too many tiles for non-mahjong hand".to_string(),
            ));
        } else {
            self.is_mahjong = false;
        }

        self.require_pair_concealed_info = false;

        if self.is_mahjong {
            // Additional scoring that applies to a mahjong hand only.
            total += self.scheme.score_of(ScoreElement::MahjongHand);

            let mut all_major = true;
            let mut no_chow = true;
            let mut suits: HashSet<Suit> = HashSet::new();
            let mut all_non_pairs_concealed = true;

            for group in &self.groups {
                let tile = group.group().tile();

                if group.group().group_type() == GroupType::Chow {
                    no_chow = false;
                    all_major = false;
                }

                if !tile.is_major() {
                    all_major = false;
                }

                if let Some(suit) = tile.suit() {
                    suits.insert(suit);
                }

                if group.group().group_type() != GroupType::Pair && !group.group().is_concealed() {
                    all_non_pairs_concealed = false;
                }
            }

            if all_major {
                total += self.scheme.score_of(ScoreElement::AllMajorHand);
            }

            if no_chow {
                total += self.scheme.score_of(ScoreElement::NoChowsHand);
            }

            if suits.len() == 1 {
                total += self.scheme.score_of(ScoreElement::SingleSuitHand);
            }

            if all_non_pairs_concealed {
                self.require_pair_concealed_info = true;

                if self.mahjong_pair_concealed {
                    total += self.scheme.score_of(ScoreElement::AllConcealedHand);
                }
            }

            if self.mahjong_by_wall_tile {
                total += self.scheme.score_of(ScoreElement::MahjongByWallTile);
            }

            if self.mahjong_by_last_wall_tile {
                total += self.scheme.score_of(ScoreElement::MahjongByLastWallTile);
            }

            if self.mahjong_by_only_possible_tile {
                total += self.scheme.score_of(ScoreElement::MahjongByOnlyPossibleTile);
            }

            if self.mahjong_by_loose_tile {
                total += self.scheme.score_of(ScoreElement::MahjongByLooseTile);
            }

            if self.mahjong_by_last_discard {
                total += self.scheme.score_of(ScoreElement::MahjongByLastDiscard);
            }

            if self.mahjong_by_robbing_kong {
                total += self.scheme.score_of(ScoreElement::MahjongByRobbingKong);
            }

            if self.mahjong_by_original_call {
                total += self.scheme.score_of(ScoreElement::MahjongByOriginalCall);
            }
        }

        self.total_unlimited = total;
        self.total_limited = total.min(self.scheme.limit_score);
        Ok(())
    }
}

impl fmt::Display for ScoredHand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[")?;
        for group in self.sorted_groups() {
            writeln!(f, "  {}", group)?;
        }
        write!(f, "]")
    }
}
