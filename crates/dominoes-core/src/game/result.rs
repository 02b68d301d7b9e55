use crate::model::player::{Seat, Team};
use core::fmt;
use serde::{Deserialize, Serialize};

/// Outcome of a finished game.
///
/// `won` distinguishes an emptied hand from a stuck game. `points`
/// carries the fixed partnership sign convention: positive credits
/// North/South, negative credits East/West, zero is a tie. The series
/// scoreboard depends on that convention exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResult {
    player: Seat,
    won: bool,
    points: i32,
}

impl GameResult {
    pub const fn new(player: Seat, won: bool, points: i32) -> Self {
        Self {
            player,
            won,
            points,
        }
    }

    pub const fn player(self) -> Seat {
        self.player
    }

    pub const fn won(self) -> bool {
        self.won
    }

    pub const fn points(self) -> i32 {
        self.points
    }

    /// Partnership the points credit, if any.
    pub const fn scoring_team(self) -> Option<Team> {
        if self.points > 0 {
            Some(Team::NorthSouth)
        } else if self.points < 0 {
            Some(Team::EastWest)
        } else {
            None
        }
    }
}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let player = self.player;
        let points = self.points.unsigned_abs();
        if self.won {
            write!(f, "{player} won and scored {points} points!")
        } else if self.points == 0 {
            write!(f, "{player} stuck the game and tied (0 points)!")
        } else if self.player.team().sign() * self.points > 0 {
            write!(f, "{player} stuck the game and scored {points} points!")
        } else {
            write!(
                f,
                "{player} stuck the game and scored {points} points for the opposing team!"
            )
        }
    }
}
