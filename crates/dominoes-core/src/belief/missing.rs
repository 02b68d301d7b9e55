//! Exact inference from the move log: which pip values each seat is
//! provably without.

use crate::game::state::{Game, MoveRecord};
use crate::model::domino::MAX_PIP;
use crate::model::hand::Hand;
use crate::model::player::Seat;
use crate::model::skinny::SkinnyBoard;

/// Bitmask over the pip values 0..=6.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct PipMask(u8);

impl PipMask {
    pub const EMPTY: PipMask = PipMask(0);

    pub fn insert(&mut self, value: u8) {
        self.0 |= 1 << value;
    }

    pub const fn contains(self, value: u8) -> bool {
        self.0 & (1 << value) != 0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn len(self) -> u32 {
        self.0.count_ones()
    }

    pub const fn contains_all(self, other: PipMask) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn values(self) -> impl Iterator<Item = u8> {
        (0..=MAX_PIP).filter(move |&v| self.contains(v))
    }
}

/// Per-seat sets of pip values that seat has proven not to hold.
///
/// A pass is hard evidence: the passing seat holds no domino touching
/// either board end at the moment of the pass. Replaying the log from
/// the starting seat therefore yields exact, monotonically growing
/// missing-value sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MissingValues {
    masks: [PipMask; 4],
}

impl MissingValues {
    pub fn from_game(game: &Game) -> Self {
        Self::from_moves(game.moves(), game.starting_seat())
    }

    pub fn from_moves(moves: &[MoveRecord], starting_seat: Seat) -> Self {
        let mut masks = [PipMask::EMPTY; 4];
        let mut board = SkinnyBoard::new();
        let mut seat = starting_seat;

        for record in moves {
            match record {
                MoveRecord::Play(mv) => {
                    board
                        .add(mv.domino, mv.end)
                        .expect("a recorded move log replays cleanly");
                }
                MoveRecord::Pass => {
                    let left = board
                        .left_end()
                        .expect("a pass cannot precede the opening move");
                    let right = board
                        .right_end()
                        .expect("a pass cannot precede the opening move");
                    masks[seat.index()].insert(left);
                    masks[seat.index()].insert(right);
                }
            }
            seat = seat.next();
        }

        Self { masks }
    }

    pub fn seat(&self, seat: Seat) -> PipMask {
        self.masks[seat.index()]
    }

    /// Whether `hand` could belong to `seat`: none of its dominoes may
    /// touch a value the seat is known to be missing.
    pub fn permits(&self, seat: Seat, hand: &Hand) -> bool {
        let mask = self.masks[seat.index()];
        if mask.is_empty() {
            return true;
        }
        !hand
            .iter()
            .any(|d| mask.contains(d.first) || mask.contains(d.second))
    }

    pub fn permits_deal(&self, hands: &[Hand; 4]) -> bool {
        Seat::LOOP
            .into_iter()
            .all(|seat| self.permits(seat, &hands[seat.index()]))
    }
}
