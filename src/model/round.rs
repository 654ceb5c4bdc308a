use std::collections::HashMap;

use super::*;
use crate::scoring::ScoredHand;

// One full deal: a scored hand per seated player, each tagged with that
// player's seat wind for the round, and at most one mahjong winner.
#[derive(Debug)]
pub struct Round {
    prevailing_wind: Wind,
    entries: HashMap<Player, Entry>,
    mahjong_player: Option<Player>,
}

#[derive(Debug)]
struct Entry {
    hand: ScoredHand,
    seat_wind: Wind,
}

impl Round {
    pub fn new(prevailing_wind: Wind) -> Self {
        Self {
            prevailing_wind,
            entries: HashMap::new(),
            mahjong_player: None,
        }
    }

    pub fn add_hand(
        &mut self,
        player: Player,
        hand: ScoredHand,
        seat_wind: Wind,
    ) -> Result<(), Error> {
        if self.entries.contains_key(&player) {
            return Err(Error::InvalidModel(format!("duplicate player: {}", player)));
        }

        if hand.is_mahjong() {
            if self.mahjong_player.is_some() {
                return Err(Error::InvalidModel(
                    "already got mahjong hand in round".to_string(),
                ));
            }
            self.mahjong_player = Some(player.clone());
        }

        self.entries.insert(player, Entry { hand, seat_wind });
        Ok(())
    }

    #[inline]
    pub fn prevailing_wind(&self) -> Wind {
        self.prevailing_wind
    }

    pub fn mahjong_player(&self) -> Option<&Player> {
        self.mahjong_player.as_ref()
    }

    pub fn player_wind(&self, player: &Player) -> Option<Wind> {
        self.entries.get(player).map(|e| e.seat_wind)
    }

    pub fn hand(&self, player: &Player) -> Option<&ScoredHand> {
        self.entries.get(player).map(|e| &e.hand)
    }

    // The point transfer for one player. Payments to or from a hand seated
    // East are doubled; losers settle the difference of their own hand
    // scores pairwise, which makes the round sum to zero overall.
    pub fn player_score(&self, player: &Player) -> Result<Score, Error> {
        let mahjong_player = self
            .mahjong_player
            .as_ref()
            .ok_or_else(|| Error::InvalidModel("round has no mahjong hand".to_string()))?;

        let this_entry = self
            .entries
            .get(player)
            .ok_or_else(|| Error::InvalidModel(format!("player has no hand in round: {}", player)))?;

        let mut score = 0;

        if player == mahjong_player {
            for (other, giving_entry) in &self.entries {
                if other == player {
                    continue;
                }

                let east_multiplier =
                    if this_entry.seat_wind == Wind::East || giving_entry.seat_wind == Wind::East {
                        2
                    } else {
                        1
                    };

                score += this_entry.hand.total_score() * east_multiplier;
            }
        } else {
            for (other, that_entry) in &self.entries {
                if other == player {
                    continue;
                }

                let east_multiplier =
                    if this_entry.seat_wind == Wind::East || that_entry.seat_wind == Wind::East {
                        2
                    } else {
                        1
                    };

                if that_entry.hand.is_mahjong() {
                    score -= that_entry.hand.total_score() * east_multiplier;
                } else {
                    score += (this_entry.hand.total_score() - that_entry.hand.total_score())
                        * east_multiplier;
                }
            }
        }

        Ok(score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::round_util::*;

    #[test]
    fn round_with_east_winner() {
        let prevailing = Wind::East;
        let mut registry = PlayerRegistry::new();
        let east = registry.get("East Player");
        let south = registry.get("South Player");
        let west = registry.get("West Player");
        let north = registry.get("North Player");

        let mut round = Round::new(prevailing);
        round
            .add_hand(east.clone(), mahjong_hand_36(Wind::East, prevailing), Wind::East)
            .unwrap();
        round
            .add_hand(south.clone(), hand_2(Wind::South, prevailing), Wind::South)
            .unwrap();
        round
            .add_hand(west.clone(), hand_4(Wind::West, prevailing), Wind::West)
            .unwrap();
        round
            .add_hand(north.clone(), hand_16(Wind::North, prevailing), Wind::North)
            .unwrap();

        assert_eq!(prevailing, round.prevailing_wind());
        assert_eq!(Some(&east), round.mahjong_player());
        assert_eq!(Some(Wind::South), round.player_wind(&south));
        assert!(round.hand(&west).is_some());

        let east_score = round.player_score(&east).unwrap();
        let south_score = round.player_score(&south).unwrap();
        let west_score = round.player_score(&west).unwrap();
        let north_score = round.player_score(&north).unwrap();

        assert_eq!(36 * 2 * 3, east_score);
        assert_eq!(-36 * 2 + (2 - 4) + (2 - 16), south_score);
        assert_eq!(-36 * 2 + (4 - 2) + (4 - 16), west_score);
        assert_eq!(-36 * 2 + (16 - 2) + (16 - 4), north_score);
        assert_eq!(0, east_score + south_score + west_score + north_score);
    }

    #[test]
    fn round_with_south_winner() {
        let prevailing = Wind::North;
        let mut registry = PlayerRegistry::new();
        let east = registry.get("East Player");
        let south = registry.get("South Player");
        let west = registry.get("West Player");
        let north = registry.get("North Player");

        let mut round = Round::new(prevailing);
        round
            .add_hand(east.clone(), hand_2(Wind::East, prevailing), Wind::East)
            .unwrap();
        round
            .add_hand(south.clone(), mahjong_hand_36(Wind::South, prevailing), Wind::South)
            .unwrap();
        round
            .add_hand(west.clone(), hand_4(Wind::West, prevailing), Wind::West)
            .unwrap();
        round
            .add_hand(north.clone(), hand_16(Wind::North, prevailing), Wind::North)
            .unwrap();

        let east_score = round.player_score(&east).unwrap();
        let south_score = round.player_score(&south).unwrap();
        let west_score = round.player_score(&west).unwrap();
        let north_score = round.player_score(&north).unwrap();

        assert_eq!(-36 * 2 + (2 - 4) * 2 + (2 - 16) * 2, east_score);
        assert_eq!(36 * 2 + 36 + 36, south_score);
        assert_eq!(-36 + (4 - 2) * 2 + (4 - 16), west_score);
        assert_eq!(-36 + (16 - 2) * 2 + (16 - 4), north_score);
        assert_eq!(0, east_score + south_score + west_score + north_score);
    }

    #[test]
    fn round_rejects_duplicate_player() {
        let mut registry = PlayerRegistry::new();
        let player = registry.get("East Player");

        let mut round = Round::new(Wind::East);
        round
            .add_hand(player.clone(), hand_2(Wind::East, Wind::East), Wind::East)
            .unwrap();
        let err = round
            .add_hand(player, hand_4(Wind::East, Wind::East), Wind::East)
            .unwrap_err();
        assert!(matches!(err, Error::InvalidModel(_)));
    }

    #[test]
    fn round_rejects_second_mahjong_hand() {
        let mut registry = PlayerRegistry::new();
        let first = registry.get("First");
        let second = registry.get("Second");

        let mut round = Round::new(Wind::East);
        round
            .add_hand(first, mahjong_hand_36(Wind::East, Wind::East), Wind::East)
            .unwrap();
        let err = round
            .add_hand(second, mahjong_hand_36(Wind::South, Wind::East), Wind::South)
            .unwrap_err();
        assert!(matches!(err, Error::InvalidModel(_)));
    }

    #[test]
    fn round_without_mahjong_has_no_result() {
        let mut registry = PlayerRegistry::new();
        let player = registry.get("East Player");

        let mut round = Round::new(Wind::East);
        round
            .add_hand(player.clone(), hand_2(Wind::East, Wind::East), Wind::East)
            .unwrap();
        let err = round.player_score(&player).unwrap_err();
        assert!(matches!(err, Error::InvalidModel(_)));
    }
}
