// Fixture hands and rounds shared by the round and game tests. All fixtures
// score independently of the wind context so they can sit at any seat.

use std::rc::Rc;

use super::*;
use crate::scoring::{ScoredGroup, ScoredHand, ScoringScheme};

pub fn scheme() -> Rc<ScoringScheme> {
    Rc::new(ScoringScheme::default())
}

fn add(hand: &mut ScoredHand, sc: &Rc<ScoringScheme>, group: Group, own: Wind, prevailing: Wind) {
    hand.add(ScoredGroup::new(group, sc, own, prevailing)).unwrap();
}

// Mahjong hand worth 36: exposed red dragon pung 4, concealed c1 pung 8,
// concealed chow 0, exposed o5 pung 2, green dragon pair 2, mahjong 20.
pub fn mahjong_hand_36(own: Wind, prevailing: Wind) -> ScoredHand {
    let sc = scheme();
    let mut hand = ScoredHand::new(sc.clone());
    add(
        &mut hand,
        &sc,
        Group::pung(Tile::Dragon(Dragon::Red), Visibility::Exposed),
        own,
        prevailing,
    );
    add(
        &mut hand,
        &sc,
        Group::pung(Tile::Suit(Suit::Characters, 1), Visibility::Concealed),
        own,
        prevailing,
    );
    add(
        &mut hand,
        &sc,
        Group::chow(Tile::Suit(Suit::Bamboo, 2), Visibility::Concealed).unwrap(),
        own,
        prevailing,
    );
    add(
        &mut hand,
        &sc,
        Group::pung(Tile::Suit(Suit::Circles, 5), Visibility::Exposed),
        own,
        prevailing,
    );
    add(
        &mut hand,
        &sc,
        Group::pair(Tile::Dragon(Dragon::Green)),
        own,
        prevailing,
    );
    assert!(hand.is_mahjong());
    assert_eq!(36, hand.total_score());
    hand
}

// Exposed minor pung, worth 2.
pub fn hand_2(own: Wind, prevailing: Wind) -> ScoredHand {
    let sc = scheme();
    let mut hand = ScoredHand::new(sc.clone());
    add(
        &mut hand,
        &sc,
        Group::pung(Tile::Suit(Suit::Circles, 5), Visibility::Exposed),
        own,
        prevailing,
    );
    hand
}

// Exposed white dragon pung, worth 4.
pub fn hand_4(own: Wind, prevailing: Wind) -> ScoredHand {
    let sc = scheme();
    let mut hand = ScoredHand::new(sc.clone());
    add(
        &mut hand,
        &sc,
        Group::pung(Tile::Dragon(Dragon::White), Visibility::Exposed),
        own,
        prevailing,
    );
    hand
}

// Exposed major kong, worth 16.
pub fn hand_16(own: Wind, prevailing: Wind) -> ScoredHand {
    let sc = scheme();
    let mut hand = ScoredHand::new(sc.clone());
    add(
        &mut hand,
        &sc,
        Group::kong(Tile::Suit(Suit::Characters, 9), Visibility::Exposed),
        own,
        prevailing,
    );
    hand
}

// Build a round for four seated players: the winner gets the mahjong hand,
// the others get the 2/4/16 fixtures in seat order starting from east.
pub fn create_round(
    players: &[Player; SEAT],
    prevailing: Wind,
    east: &Player,
    winner: &Player,
) -> Round {
    let east_index = players.iter().position(|p| p == east).unwrap();
    let mut round = Round::new(prevailing);
    let mut wind = Wind::East;
    let mut loser = 0;

    for i in 0..SEAT {
        let player = &players[(east_index + i) % SEAT];
        let hand = if player == winner {
            mahjong_hand_36(wind, prevailing)
        } else {
            let hand = match loser {
                0 => hand_2(wind, prevailing),
                1 => hand_4(wind, prevailing),
                _ => hand_16(wind, prevailing),
            };
            loser += 1;
            hand
        };
        round.add_hand(player.clone(), hand, wind).unwrap();
        wind = wind.next();
    }

    round
}
