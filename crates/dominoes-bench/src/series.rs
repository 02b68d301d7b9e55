use dominoes_core::game::state::Game;
use dominoes_core::model::domino::Domino;
use dominoes_core::model::player::Team;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SeriesError {
    #[error("cannot start a new game - the series ended {north_south} to {east_west}")]
    SeriesOver { north_south: u32, east_west: u32 },
    #[error("cannot start a new game - the latest one has not finished")]
    GameInProgress,
}

/// A sequence of games to a cumulative target score.
///
/// The first game is pinned to the `[6|6]` opening; afterwards the
/// winner of a game starts the next one, a scoring stuck seat starts
/// when the sign favors its partnership, a tied stuck game keeps the
/// previous starter, and any other stuck game passes the start to the
/// following seat.
#[derive(Debug)]
pub struct Series {
    games: Vec<Game>,
    scores: [u32; 2],
    target_score: u32,
}

impl Series {
    pub fn new<R: rand::Rng + ?Sized>(rng: &mut R, target_score: u32) -> Self {
        Self::with_opening(rng, target_score, Domino::new(6, 6))
    }

    pub fn with_opening<R: rand::Rng + ?Sized>(
        rng: &mut R,
        target_score: u32,
        opening: Domino,
    ) -> Self {
        Self {
            games: vec![Game::with_opening(rng, opening)],
            scores: [0, 0],
            target_score,
        }
    }

    pub fn is_over(&self) -> bool {
        self.scores.iter().any(|&score| score >= self.target_score)
    }

    pub fn target_score(&self) -> u32 {
        self.target_score
    }

    pub fn score(&self, team: Team) -> u32 {
        self.scores[team.index()]
    }

    pub fn scores(&self) -> [u32; 2] {
        self.scores
    }

    pub fn games(&self) -> &[Game] {
        &self.games
    }

    pub fn current_game(&self) -> &Game {
        self.games.last().expect("a series always holds a game")
    }

    pub fn current_game_mut(&mut self) -> &mut Game {
        self.games.last_mut().expect("a series always holds a game")
    }

    /// Credits the finished game's points to the favored partnership
    /// and deals the next game, unless the series just ended
    /// (`Ok(None)`).
    pub fn next_game<R: rand::Rng + ?Sized>(
        &mut self,
        rng: &mut R,
    ) -> Result<Option<&Game>, SeriesError> {
        if self.is_over() {
            return Err(SeriesError::SeriesOver {
                north_south: self.scores[0],
                east_west: self.scores[1],
            });
        }

        let latest = self.current_game();
        let result = latest.result().ok_or(SeriesError::GameInProgress)?;
        let previous_starter = latest.starting_seat();

        let points = result.points();
        if points >= 0 {
            self.scores[Team::NorthSouth.index()] += points as u32;
        } else {
            self.scores[Team::EastWest.index()] += points.unsigned_abs();
        }

        if self.is_over() {
            return Ok(None);
        }

        let starting_seat = if result.won() || result.player().team().sign() * points > 0 {
            result.player()
        } else if points == 0 {
            previous_starter
        } else {
            result.player().next()
        };

        self.games.push(Game::new(rng, starting_seat));
        Ok(Some(self.current_game()))
    }
}
