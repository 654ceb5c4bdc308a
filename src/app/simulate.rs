use std::rc::Rc;

use rand::prelude::*;

use crate::model::*;
use crate::scoring::{ScoredGroup, ScoredHand, ScoringScheme};
use crate::util::misc::*;

use crate::{error, warn};

// Upper bound on rounds, in case the dealer keeps winning.
const MAX_ROUNDS: usize = 1000;

// Plays a full game with randomly generated hands and prints the scores.
#[derive(Debug)]
pub struct SimulateApp {
    seed: u64,
    names: Vec<String>,
}

impl SimulateApp {
    pub fn new(args: Vec<String>) -> Self {
        use std::process::exit;

        let mut app = Self {
            seed: 0,
            names: vec![],
        };

        let mut it = args.iter();
        while let Some(s) = it.next() {
            match s.as_str() {
                "-s" => app.seed = next_value(&mut it, s),
                opt => {
                    error!("unknown option: {}", opt);
                    exit(0);
                }
            }
        }

        if app.seed == 0 {
            app.seed = unixtime_now() as u64;
            println!(
                "Random seed is not specified. Unix timestamp '{}' is used as seed.",
                app.seed
            );
        }

        app.names = ["Mickey", "Donald", "Pluto", "Goofy"]
            .iter()
            .map(|n| n.to_string())
            .collect();

        app
    }

    pub fn run(&mut self) {
        println!("seed: {}", self.seed);
        let mut rng: rand::rngs::StdRng = rand::SeedableRng::seed_from_u64(self.seed);

        let scheme = Rc::new(ScoringScheme::default());
        let mut registry = PlayerRegistry::new();
        let mut game = Game::new(scheme.clone());

        let players: Vec<Player> = self.names.iter().map(|n| registry.get(n)).collect();
        println!("players: {}", vec_to_string(&players));
        for (seat, player) in players.iter().enumerate() {
            game.set_player(player.clone(), seat).unwrap_or_else(error_exit);
        }
        game.start_game(&players[0]).unwrap_or_else(error_exit);

        let mut n_round = 0;
        while !game.is_finished() {
            n_round += 1;
            if n_round > MAX_ROUNDS {
                warn!("game did not finish within {} rounds", MAX_ROUNDS);
                break;
            }

            let prevailing = game.prevailing_wind();
            let east = game.east_player().unwrap_or_else(|| error_exit("no east player"));
            let winner = players.choose(&mut rng).unwrap_or_else(|| error_exit("no players"));
            println!(
                "round {:3}: prevailing: {}, east: {}, mahjong: {}",
                n_round, prevailing, east, winner
            );

            let mut round = Round::new(prevailing);
            for player in &players {
                let seat_wind = game.player_wind(player).unwrap_or_else(error_exit);
                let hand = if player == winner {
                    random_mahjong_hand(&mut rng, &scheme, seat_wind, prevailing)
                } else {
                    random_partial_hand(&mut rng, &scheme, seat_wind, prevailing)
                };
                round
                    .add_hand(player.clone(), hand, seat_wind)
                    .unwrap_or_else(error_exit);
            }
            game.add_round(round).unwrap_or_else(error_exit);
        }

        println!();
        for player in &players {
            let score = game.player_score(player).unwrap_or_else(error_exit);
            println!("{}: {}", player, score);
        }
    }
}

fn random_tile(rng: &mut impl Rng) -> Tile {
    match rng.gen_range(0..3) {
        0 => Tile::Suit(random_suit(rng), rng.gen_range(1..=9)),
        1 => Tile::Wind(random_wind(rng)),
        _ => random_dragon(rng),
    }
}

fn random_suit(rng: &mut impl Rng) -> Suit {
    match rng.gen_range(0..3) {
        0 => Suit::Characters,
        1 => Suit::Bamboo,
        _ => Suit::Circles,
    }
}

fn random_wind(rng: &mut impl Rng) -> Wind {
    match rng.gen_range(0..4) {
        0 => Wind::East,
        1 => Wind::South,
        2 => Wind::West,
        _ => Wind::North,
    }
}

fn random_dragon(rng: &mut impl Rng) -> Tile {
    match rng.gen_range(0..3) {
        0 => Tile::Dragon(Dragon::Red),
        1 => Tile::Dragon(Dragon::Green),
        _ => Tile::Dragon(Dragon::White),
    }
}

fn random_visibility(rng: &mut impl Rng) -> Visibility {
    if rng.gen_bool(0.5) {
        Visibility::Concealed
    } else {
        Visibility::Exposed
    }
}

// A pung, kong or chow. Never a pair.
fn random_meld(rng: &mut impl Rng) -> Group {
    match rng.gen_range(0..3) {
        0 => Group::chow(
            Tile::Suit(random_suit(rng), rng.gen_range(1..=7)),
            random_visibility(rng),
        )
        .unwrap_or_else(error_exit),
        1 => Group::pung(random_tile(rng), random_visibility(rng)),
        _ => Group::kong(random_tile(rng), random_visibility(rng)),
    }
}

// Four melds and a pair: always a mahjong hand.
fn random_mahjong_hand(
    rng: &mut impl Rng,
    scheme: &Rc<ScoringScheme>,
    seat_wind: Wind,
    prevailing: Wind,
) -> ScoredHand {
    let mut hand = ScoredHand::new(scheme.clone());
    for _ in 0..4 {
        let group = ScoredGroup::new(random_meld(rng), scheme, seat_wind, prevailing);
        hand.add(group).unwrap_or_else(error_exit);
    }
    let pair = ScoredGroup::new(Group::pair(random_tile(rng)), scheme, seat_wind, prevailing);
    hand.add(pair).unwrap_or_else(error_exit);
    hand
}

// One to three melds, short of the mahjong hand size.
fn random_partial_hand(
    rng: &mut impl Rng,
    scheme: &Rc<ScoringScheme>,
    seat_wind: Wind,
    prevailing: Wind,
) -> ScoredHand {
    let mut hand = ScoredHand::new(scheme.clone());
    for _ in 0..rng.gen_range(1..=3) {
        let group = ScoredGroup::new(random_meld(rng), scheme, seat_wind, prevailing);
        hand.add(group).unwrap_or_else(error_exit);
    }
    hand
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_melds_are_valid() {
        let mut rng: rand::rngs::StdRng = rand::SeedableRng::seed_from_u64(7);
        for _ in 0..100 {
            let group = random_meld(&mut rng);
            assert_ne!(GroupType::Pair, group.group_type());
        }
    }

    #[test]
    fn random_mahjong_hand_is_mahjong() {
        let mut rng: rand::rngs::StdRng = rand::SeedableRng::seed_from_u64(7);
        let scheme = Rc::new(ScoringScheme::default());
        for _ in 0..50 {
            let hand = random_mahjong_hand(&mut rng, &scheme, Wind::East, Wind::East);
            assert!(hand.is_mahjong());
            assert!(hand.total_score() >= 20);
        }
    }

    #[test]
    fn random_partial_hand_is_not_mahjong() {
        let mut rng: rand::rngs::StdRng = rand::SeedableRng::seed_from_u64(7);
        let scheme = Rc::new(ScoringScheme::default());
        for _ in 0..50 {
            let hand = random_partial_hand(&mut rng, &scheme, Wind::South, Wind::East);
            assert!(!hand.is_mahjong());
        }
    }
}
