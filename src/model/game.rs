use std::collections::HashMap;
use std::rc::Rc;

use super::*;
use crate::scoring::ScoringScheme;

// A multi-round session. Seats are fixed before the game starts; rounds
// drive the east player and the prevailing wind forward until the ending
// player's turn as East comes around again under a NORTH prevailing wind.
#[derive(Debug)]
pub struct Game {
    scheme: Rc<ScoringScheme>,
    seats: [Option<Player>; SEAT],
    seats_occupied: usize,
    rounds: Vec<Round>,
    scores: HashMap<Player, Score>,
    started: bool,
    finished: bool,

    starting_player: Option<Player>,
    ending_player: Option<Player>,
    east_player: Option<Player>,
    prevailing_wind: Wind,
}

impl Game {
    pub fn new(scheme: Rc<ScoringScheme>) -> Self {
        Self {
            scheme,
            seats: Default::default(),
            seats_occupied: 0,
            rounds: vec![],
            scores: HashMap::new(),
            started: false,
            finished: false,
            starting_player: None,
            ending_player: None,
            east_player: None,
            prevailing_wind: Wind::East,
        }
    }

    #[inline]
    pub fn scheme(&self) -> &Rc<ScoringScheme> {
        &self.scheme
    }

    pub fn set_player(&mut self, player: Player, seat: Seat) -> Result<(), Error> {
        if self.started {
            return Err(Error::InvalidGameState(
                "cannot add players after game has started".to_string(),
            ));
        }

        if seat >= SEAT {
            return Err(Error::InvalidModel(format!(
                "invalid seat index for player: {}",
                seat
            )));
        }

        if self.seats[seat].is_some() {
            return Err(Error::InvalidModel("seat already occupied".to_string()));
        }

        if self.seats.iter().flatten().any(|p| *p == player) {
            return Err(Error::InvalidModel(format!(
                "player already seated: {}",
                player
            )));
        }

        self.scores.insert(player.clone(), self.scheme.initial_score);
        self.seats[seat] = Some(player);
        self.seats_occupied += 1;
        Ok(())
    }

    pub fn start_game(&mut self, east_player: &Player) -> Result<(), Error> {
        if self.started {
            return Err(Error::InvalidGameState("game is already started".to_string()));
        }

        if self.finished {
            return Err(Error::InvalidGameState("game is finished".to_string()));
        }

        if self.seats_occupied < 2 {
            return Err(Error::InvalidGameState(
                "must have at least two players".to_string(),
            ));
        }

        self.find_player_seat(east_player)?;
        self.starting_player = Some(east_player.clone());
        self.ending_player = Some(self.ending_player_from(east_player)?);
        self.east_player = Some(east_player.clone());
        self.prevailing_wind = Wind::East;
        self.started = true;
        Ok(())
    }

    // Record a completed round: apply every seated player's transfer, then
    // advance the east player and the prevailing wind. A failed validation
    // leaves the running scores untouched.
    pub fn add_round(&mut self, round: Round) -> Result<(), Error> {
        if !self.started {
            return Err(Error::InvalidGameState("game is not started".to_string()));
        }

        if self.finished {
            return Err(Error::InvalidGameState("game is finished".to_string()));
        }

        let east = self
            .east_player
            .clone()
            .ok_or_else(|| Error::InvalidGameState("game has no east player".to_string()))?;

        let east_hand = round
            .hand(&east)
            .ok_or_else(|| Error::InvalidModel("east player has no hand in round".to_string()))?;
        let east_is_mahjong = east_hand.is_mahjong();

        // Validate every transfer before mutating anything.
        let mut deltas = vec![];
        for player in self.seats.iter().flatten() {
            deltas.push((player.clone(), round.player_score(player)?));
        }

        for (player, delta) in deltas {
            if let Some(score) = self.scores.get_mut(&player) {
                *score += delta;
            }
        }

        self.rounds.push(round);

        // The winning dealer keeps the deal.
        if east_is_mahjong {
            return Ok(());
        }

        // End of the game: the ending player's deal under NORTH is the last.
        if Some(&east) == self.ending_player.as_ref() && self.prevailing_wind == Wind::North {
            self.finished = true;
            return Ok(());
        }

        // Step east forward to the next occupied seat.
        let mut seat = self.find_player_seat(&east)?;
        loop {
            seat = (seat + 1) % SEAT;
            if self.seats[seat].is_some() {
                break;
            }
        }
        self.east_player = self.seats[seat].clone();

        if self.east_player == self.starting_player {
            self.prevailing_wind = self.prevailing_wind.next();
        }

        Ok(())
    }

    #[inline]
    pub fn prevailing_wind(&self) -> Wind {
        self.prevailing_wind
    }

    pub fn east_player(&self) -> Option<&Player> {
        self.east_player.as_ref()
    }

    // Walk the seats from the current east player, assigning winds in order.
    pub fn player_wind(&self, player: &Player) -> Result<Wind, Error> {
        let east = self
            .east_player
            .as_ref()
            .ok_or_else(|| Error::InvalidGameState("game is not started".to_string()))?;

        let mut seat = self.find_player_seat(east)?;
        let mut wind = Wind::East;

        for _ in 0..SEAT {
            if self.seats[seat].as_ref() == Some(player) {
                return Ok(wind);
            }
            seat = (seat + 1) % SEAT;
            wind = wind.next();
        }

        Err(Error::InvalidModel(format!("player not found: {}", player)))
    }

    pub fn player_score(&self, player: &Player) -> Result<Score, Error> {
        self.scores
            .get(player)
            .copied()
            .ok_or_else(|| Error::InvalidModel(format!("player not found: {}", player)))
    }

    #[inline]
    pub fn is_started(&self) -> bool {
        self.started
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn rounds(&self) -> &[Round] {
        &self.rounds
    }

    pub fn seated_players(&self) -> impl Iterator<Item = &Player> {
        self.seats.iter().flatten()
    }

    // The last player in the sequence around the table: the occupied seat
    // immediately before the starting player.
    fn ending_player_from(&self, starting_player: &Player) -> Result<Player, Error> {
        let mut seat = self.find_player_seat(starting_player)?;

        loop {
            seat = if seat == 0 { SEAT - 1 } else { seat - 1 };
            if let Some(player) = &self.seats[seat] {
                return Ok(player.clone());
            }
        }
    }

    fn find_player_seat(&self, player: &Player) -> Result<Seat, Error> {
        for (seat, occupant) in self.seats.iter().enumerate() {
            if occupant.as_ref() == Some(player) {
                return Ok(seat);
            }
        }

        Err(Error::InvalidModel(format!("player not found: {}", player)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::round_util::*;

    fn seated_game() -> (Game, [Player; SEAT]) {
        let mut registry = PlayerRegistry::new();
        let players = [
            registry.get("Mickey"),
            registry.get("Donald"),
            registry.get("Pluto"),
            registry.get("Goofy"),
        ];

        let mut game = Game::new(scheme());
        for (seat, player) in players.iter().enumerate() {
            game.set_player(player.clone(), seat).unwrap();
        }
        (game, players)
    }

    fn total(game: &Game, players: &[Player; SEAT]) -> Score {
        players.iter().map(|p| game.player_score(p).unwrap()).sum()
    }

    #[test]
    fn game_run() {
        let (mut game, players) = seated_game();
        let [mickey, donald, pluto, goofy] = players.clone();

        game.start_game(&mickey).unwrap();
        assert!(game.is_started());
        assert_eq!(2000, game.scheme().initial_score);
        assert_eq!(Wind::East, game.player_wind(&mickey).unwrap());
        assert_eq!(Wind::South, game.player_wind(&donald).unwrap());
        assert_eq!(Wind::North, game.player_wind(&goofy).unwrap());

        // First prevailing wind: east moves on every round.
        game.add_round(create_round(&players, Wind::East, &mickey, &pluto))
            .unwrap();
        assert_eq!(Wind::East, game.prevailing_wind());
        assert_eq!(Some(&donald), game.east_player());

        assert_eq!(2000 - 104, game.player_score(&mickey).unwrap());
        assert_eq!(2000 - 44, game.player_score(&donald).unwrap());
        assert_eq!(2000 + 144, game.player_score(&pluto).unwrap());
        assert_eq!(2000 + 4, game.player_score(&goofy).unwrap());
        assert_eq!(4 * 2000, total(&game, &players));

        for winner in [&mickey, &mickey, &mickey] {
            let east = game.east_player().unwrap().clone();
            game.add_round(create_round(&players, game.prevailing_wind(), &east, winner))
                .unwrap();
        }
        assert_eq!(Wind::South, game.prevailing_wind());
        assert_eq!(Some(&mickey), game.east_player());

        // Second prevailing wind: east wins sometimes, so no moving on.
        let second_wind_winners = [
            (&mickey, &mickey, Wind::South), // east wins, stays
            (&pluto, &donald, Wind::South),
            (&goofy, &pluto, Wind::South),
            (&pluto, &pluto, Wind::South), // east wins, stays
            (&mickey, &goofy, Wind::South),
            (&mickey, &mickey, Wind::West),
        ];
        for (winner, expected_east, expected_wind) in second_wind_winners {
            let east = game.east_player().unwrap().clone();
            game.add_round(create_round(&players, game.prevailing_wind(), &east, winner))
                .unwrap();
            assert_eq!(expected_wind, game.prevailing_wind());
            assert_eq!(Some(expected_east), game.east_player());
        }

        // Third prevailing wind.
        for winner in [&goofy, &pluto, &donald, &mickey] {
            let east = game.east_player().unwrap().clone();
            game.add_round(create_round(&players, game.prevailing_wind(), &east, winner))
                .unwrap();
        }
        assert_eq!(Wind::North, game.prevailing_wind());
        assert_eq!(Some(&mickey), game.east_player());

        // Fourth prevailing wind.
        for winner in [&goofy, &donald, &pluto, &donald] {
            let east = game.east_player().unwrap().clone();
            game.add_round(create_round(&players, game.prevailing_wind(), &east, winner))
                .unwrap();
        }
        assert!(!game.is_finished());

        let east = game.east_player().unwrap().clone();
        game.add_round(create_round(&players, game.prevailing_wind(), &east, &goofy))
            .unwrap();
        assert!(!game.is_finished());

        let east = game.east_player().unwrap().clone();
        game.add_round(create_round(&players, game.prevailing_wind(), &east, &mickey))
            .unwrap();

        // When the game is finished, play sticks at the last position.
        assert!(game.is_finished());
        assert_eq!(Wind::North, game.prevailing_wind());
        assert_eq!(Some(&goofy), game.east_player());
        assert_eq!(4 * 2000, total(&game, &players));

        // Adding another round to the finished game fails.
        let east = game.east_player().unwrap().clone();
        let err = game
            .add_round(create_round(&players, game.prevailing_wind(), &east, &goofy))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidGameState(_)));
        assert_eq!(Wind::North, game.prevailing_wind());
        assert_eq!(Some(&goofy), game.east_player());
    }

    #[test]
    fn seating_errors() {
        let (mut game, players) = seated_game();
        let [mickey, donald, ..] = players.clone();

        let mut registry = PlayerRegistry::new();
        let extra = registry.get("Daisy");
        let err = game.set_player(extra.clone(), 4).unwrap_err();
        assert!(matches!(err, Error::InvalidModel(_)));
        let err = game.set_player(extra.clone(), 0).unwrap_err();
        assert!(matches!(err, Error::InvalidModel(_)));
        let err = game.set_player(mickey.clone(), 1).unwrap_err();
        assert!(matches!(err, Error::InvalidGameState(_) | Error::InvalidModel(_)));

        // Lookups on a player who never got a seat fail instead of looping.
        let err = game.start_game(&extra).unwrap_err();
        assert!(matches!(err, Error::InvalidModel(_)));
        let err = game.player_score(&extra).unwrap_err();
        assert!(matches!(err, Error::InvalidModel(_)));

        game.start_game(&mickey).unwrap();
        let err = game.player_wind(&extra).unwrap_err();
        assert!(matches!(err, Error::InvalidModel(_)));
        let err = game.set_player(extra, 0).unwrap_err();
        assert!(matches!(err, Error::InvalidGameState(_)));
        let err = game.start_game(&donald).unwrap_err();
        assert!(matches!(err, Error::InvalidGameState(_)));
    }

    #[test]
    fn start_requires_two_players() {
        let mut registry = PlayerRegistry::new();
        let solo = registry.get("Mickey");

        let mut game = Game::new(scheme());
        game.set_player(solo.clone(), 0).unwrap();
        let err = game.start_game(&solo).unwrap_err();
        assert!(matches!(err, Error::InvalidGameState(_)));
    }

    #[test]
    fn round_before_start_fails() {
        let (mut game, players) = seated_game();
        let round = create_round(&players, Wind::East, &players[0], &players[1]);
        let err = game.add_round(round).unwrap_err();
        assert!(matches!(err, Error::InvalidGameState(_)));
    }

    #[test]
    fn failed_round_leaves_scores_untouched() {
        let (mut game, players) = seated_game();
        game.start_game(&players[0]).unwrap();

        // Round missing the other players' hands cannot be settled.
        let mut round = Round::new(Wind::East);
        round
            .add_hand(
                players[0].clone(),
                mahjong_hand_36(Wind::East, Wind::East),
                Wind::East,
            )
            .unwrap();
        let err = game.add_round(round).unwrap_err();
        assert!(matches!(err, Error::InvalidModel(_)));
        for p in &players {
            assert_eq!(2000, game.player_score(p).unwrap());
        }
        assert_eq!(Some(&players[0]), game.east_player());
    }

    #[test]
    fn two_player_rotation() {
        let mut registry = PlayerRegistry::new();
        let a = registry.get("A");
        let b = registry.get("B");

        let mut game = Game::new(scheme());
        game.set_player(a.clone(), 0).unwrap();
        game.set_player(b.clone(), 2).unwrap();
        game.start_game(&a).unwrap();

        // The ending player is the previous occupied seat, skipping gaps.
        assert_eq!(Wind::East, game.player_wind(&a).unwrap());
        assert_eq!(Wind::West, game.player_wind(&b).unwrap());

        let mut round = Round::new(Wind::East);
        round
            .add_hand(b.clone(), mahjong_hand_36(Wind::West, Wind::East), Wind::West)
            .unwrap();
        round
            .add_hand(a.clone(), hand_2(Wind::East, Wind::East), Wind::East)
            .unwrap();
        game.add_round(round).unwrap();

        assert_eq!(Some(&b), game.east_player());
        assert_eq!(Wind::East, game.prevailing_wind());
        assert_eq!(Wind::East, game.player_wind(&b).unwrap());
        assert_eq!(Wind::West, game.player_wind(&a).unwrap());
    }
}
