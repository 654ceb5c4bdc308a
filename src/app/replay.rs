use std::collections::HashMap;
use std::rc::Rc;

use serde::Deserialize;

use crate::model::*;
use crate::scoring::{ScoreElement, ScoredGroup, ScoredHand, ScoringScheme};
use crate::util::common::*;
use crate::util::misc::*;

use crate::{error, warn};

// Replays a recorded game from a json file and prints the running scores.
#[derive(Debug)]
pub struct ReplayApp {
    file_path: String,
    detail: bool,
}

impl ReplayApp {
    pub fn new(args: Vec<String>) -> Self {
        use std::process::exit;

        let mut app = Self {
            file_path: String::new(),
            detail: false,
        };

        let mut it = args.iter();
        while let Some(s) = it.next() {
            match s.as_str() {
                "-f" => app.file_path = next_value(&mut it, s),
                "-d" => app.detail = true,
                opt => {
                    error!("unknown option: {}", opt);
                    exit(0);
                }
            }
        }

        if app.file_path.is_empty() {
            error!("file(-f) not specified");
            exit(0);
        }

        app
    }

    pub fn run(&mut self) {
        let contents = std::fs::read_to_string(&self.file_path).unwrap_or_else(error_exit);
        let record: GameRecord = serde_json::from_str(&contents).unwrap_or_else(error_exit);
        if self.detail {
            println!("{:?}", record);
        }

        let game = replay(&record).unwrap_or_else(error_exit);

        println!("rounds: {}, finished: {}", game.rounds().len(), game.is_finished());
        for player in game.seated_players() {
            let score = game.player_score(player).unwrap_or_else(error_exit);
            println!("{}: {}", player, score);
        }
    }
}

#[derive(Debug, Deserialize)]
struct GameRecord {
    players: Vec<PlayerRecord>,
    east: String,
    #[serde(default)]
    scheme: SchemeRecord,
    rounds: Vec<RoundRecord>,
}

#[derive(Debug, Deserialize)]
struct PlayerRecord {
    name: String,
    seat: Seat,
}

// Overrides for the default scheme: the scalar constants and any subset of
// the category values.
#[derive(Debug, Default, Deserialize)]
struct SchemeRecord {
    mahjong_hand_size: Option<usize>,
    limit_score: Option<Score>,
    initial_score: Option<Score>,
    #[serde(default)]
    values: HashMap<ScoreElement, Score>,
}

#[derive(Debug, Deserialize)]
struct RoundRecord {
    hands: Vec<HandRecord>,
}

#[derive(Debug, Deserialize)]
struct HandRecord {
    player: String,
    seat_wind: String,
    groups: String,
    #[serde(default)]
    flags: Vec<String>,
}

fn replay(record: &GameRecord) -> Res<Game> {
    let mut scheme = ScoringScheme::default();
    if let Some(n) = record.scheme.mahjong_hand_size {
        scheme.mahjong_hand_size = n;
    }
    if let Some(s) = record.scheme.limit_score {
        scheme.limit_score = s;
    }
    if let Some(s) = record.scheme.initial_score {
        scheme.initial_score = s;
    }
    for (element, score) in &record.scheme.values {
        scheme.set_score(*element, *score);
    }
    let scheme = Rc::new(scheme);

    let mut registry = PlayerRegistry::new();
    let mut game = Game::new(scheme.clone());
    for p in &record.players {
        game.set_player(registry.get(&p.name), p.seat)?;
    }
    game.start_game(&registry.get(&record.east))?;

    for (index, round_record) in record.rounds.iter().enumerate() {
        let prevailing = game.prevailing_wind();
        let mut round = Round::new(prevailing);

        for hand_record in &round_record.hands {
            let player = registry.get(&hand_record.player);
            let chars: Vec<char> = hand_record.seat_wind.chars().collect();
            if chars.len() != 1 {
                Err(format!("invalid seat wind: {}", hand_record.seat_wind))?;
            }
            let seat_wind = wind_from_char(chars[0])?;

            // The recorded wind should agree with the game's own rotation.
            let expected = game.player_wind(&player)?;
            if seat_wind != expected {
                warn!(
                    "round {}: recorded wind {} for {} but game says {}",
                    index, seat_wind, player, expected
                );
            }

            let mut hand = ScoredHand::new(scheme.clone());
            for group in groups_from_string(&hand_record.groups)? {
                hand.add(ScoredGroup::new(group, &scheme, seat_wind, prevailing))?;
            }
            for flag in &hand_record.flags {
                apply_flag(&mut hand, flag)?;
            }

            round.add_hand(player, hand, seat_wind)?;
        }

        game.add_round(round)?;
    }

    Ok(game)
}

#[test]
fn test_replay_scheme_overrides() {
    let record: GameRecord = serde_json::from_str(
        r#"{
            "players": [
                { "name": "a", "seat": 0 },
                { "name": "b", "seat": 2 }
            ],
            "east": "a",
            "scheme": {
                "initial_score": 100,
                "values": { "MahjongHand": 50 }
            },
            "rounds": [
                {
                    "hands": [
                        { "player": "a", "seat_wind": "E", "groups": "o555+" },
                        { "player": "b", "seat_wind": "W", "groups": "dRRR+,c111,b234,o555+,dGG" }
                    ]
                }
            ]
        }"#,
    )
    .unwrap();
    let game = replay(&record).unwrap();

    // The mahjong bonus is 50 instead of 20, so the winning hand is worth 66.
    let mut registry = PlayerRegistry::new();
    assert_eq!(100 - 66 * 2, game.player_score(&registry.get("a")).unwrap());
    assert_eq!(100 + 66 * 2, game.player_score(&registry.get("b")).unwrap());
}

#[test]
fn test_replay() {
    let contents = std::fs::read_to_string("tests/game_record.json").unwrap();
    let record: GameRecord = serde_json::from_str(&contents).unwrap();
    let game = replay(&record).unwrap();

    let mut registry = PlayerRegistry::new();
    assert_eq!(2, game.rounds().len());
    assert!(!game.is_finished());
    assert_eq!(Wind::East, game.prevailing_wind());
    assert_eq!(Some(&registry.get("pluto")), game.east_player());

    for (name, score) in [
        ("mickey", 2040),
        ("donald", 1852),
        ("pluto", 2100),
        ("goofy", 2008),
    ] {
        assert_eq!(score, game.player_score(&registry.get(name)).unwrap());
    }
}
