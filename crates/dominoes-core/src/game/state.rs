use crate::game::result::GameResult;
use crate::model::board::{Board, BoardError, End};
use crate::model::domino::Domino;
use crate::model::hand::Hand;
use crate::model::player::Seat;
use crate::model::set::DominoSet;
use crate::model::skinny::SkinnyBoard;
use core::fmt;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::vec::Vec;

/// A domino placed against one end of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub domino: Domino,
    pub end: End,
}

impl Move {
    pub const fn new(domino: Domino, end: End) -> Self {
        Self { domino, end }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to the {} end", self.domino, self.end)
    }
}

/// One entry of the game's move log, in strict turn order from the
/// starting seat. The log is the only input to hidden-hand inference
/// and replays deterministically.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveRecord {
    Play(Move),
    Pass,
}

/// The board as the game sees it: the full oriented chain, or the
/// skinny end summary once search takes over and clone cost matters.
/// The switch happens exactly once, via [`Game::to_skinny`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameBoard {
    Full(Board),
    Skinny(SkinnyBoard),
}

impl GameBoard {
    pub fn left_end(&self) -> Result<u8, BoardError> {
        match self {
            GameBoard::Full(board) => board.left_end(),
            GameBoard::Skinny(board) => board.left_end(),
        }
    }

    pub fn right_end(&self) -> Result<u8, BoardError> {
        match self {
            GameBoard::Full(board) => board.right_end(),
            GameBoard::Skinny(board) => board.right_end(),
        }
    }

    pub fn add(&mut self, d: Domino, end: End) -> Result<(), BoardError> {
        match self {
            GameBoard::Full(board) => board.add(d, end),
            GameBoard::Skinny(board) => board.add(d, end),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            GameBoard::Full(board) => board.len(),
            GameBoard::Skinny(board) => board.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Display for GameBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameBoard::Full(board) => board.fmt(f),
            GameBoard::Skinny(board) => board.fmt(f),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    /// The game already has a result; no further mutation is allowed.
    GameOver,
    /// The acting hand does not hold the requested domino.
    NotInHand(Domino),
    /// The board rejected the placement; the move was fully rolled
    /// back and hand and board are exactly as before the call.
    Board(BoardError),
}

impl fmt::Display for MoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveError::GameOver => write!(f, "cannot make a move - the game is over"),
            MoveError::NotInHand(d) => write!(f, "cannot make a move - {d} is not in hand"),
            MoveError::Board(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for MoveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MoveError::Board(err) => Some(err),
            _ => None,
        }
    }
}

/// The turn-taking state machine for one game of partnership
/// dominoes. Created per round, mutated move-by-move until `result`
/// is set, then read-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    board: GameBoard,
    hands: [Hand; 4],
    moves: Vec<MoveRecord>,
    turn: Seat,
    legal_moves: Vec<Move>,
    starting_seat: Seat,
    result: Option<GameResult>,
}

impl Game {
    /// Deals a fresh randomized game with `starting_seat` to move.
    /// The opening legal moves are every held domino to the left.
    pub fn new<R: rand::Rng + ?Sized>(rng: &mut R, starting_seat: Seat) -> Self {
        let hands = DominoSet::shuffled(rng).deal();
        let mut game = Self {
            board: GameBoard::Full(Board::new()),
            hands,
            moves: Vec::new(),
            turn: starting_seat,
            legal_moves: Vec::new(),
            starting_seat,
            result: None,
        };
        game.update_legal_moves();
        game
    }

    pub fn with_seed(starting_seat: Seat, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::new(&mut rng, starting_seat)
    }

    /// Deals a fresh game and immediately plays `opening` to the left
    /// from whichever seat was dealt it; that seat is recorded as the
    /// starting seat.
    pub fn with_opening<R: rand::Rng + ?Sized>(rng: &mut R, opening: Domino) -> Self {
        let hands = DominoSet::shuffled(rng).deal();
        let holder = Seat::LOOP
            .into_iter()
            .find(|seat| hands[seat.index()].contains(opening))
            .expect("a full deal contains every domino");
        let first = Move::new(opening, End::Left);
        let mut game = Self {
            board: GameBoard::Full(Board::new()),
            hands,
            moves: Vec::new(),
            turn: holder,
            legal_moves: vec![first],
            starting_seat: holder,
            result: None,
        };
        game.make_move(first)
            .expect("the opening domino always fits an empty board");
        game
    }

    pub fn with_opening_seed(opening: Domino, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::with_opening(&mut rng, opening)
    }

    #[cfg(test)]
    pub(crate) fn from_parts(
        board: GameBoard,
        hands: [Hand; 4],
        moves: Vec<MoveRecord>,
        turn: Seat,
        starting_seat: Seat,
    ) -> Self {
        let mut game = Self {
            board,
            hands,
            moves,
            turn,
            legal_moves: Vec::new(),
            starting_seat,
            result: None,
        };
        game.update_legal_moves();
        game
    }

    pub fn board(&self) -> &GameBoard {
        &self.board
    }

    pub fn hands(&self) -> &[Hand; 4] {
        &self.hands
    }

    pub fn hand(&self, seat: Seat) -> &Hand {
        &self.hands[seat.index()]
    }

    pub fn moves(&self) -> &[MoveRecord] {
        &self.moves
    }

    pub fn turn(&self) -> Seat {
        self.turn
    }

    pub fn starting_seat(&self) -> Seat {
        self.starting_seat
    }

    pub fn legal_moves(&self) -> &[Move] {
        &self.legal_moves
    }

    /// Mutable view for move-ordering strategies. Reordering is the
    /// only supported mutation; the slice shape keeps the cached set
    /// itself intact.
    pub fn legal_moves_mut(&mut self) -> &mut [Move] {
        &mut self.legal_moves
    }

    pub fn result(&self) -> Option<GameResult> {
        self.result
    }

    /// Swaps the full chain for its skinny summary. Call once when
    /// handing the game to search; a no-op if already skinny.
    pub fn to_skinny(&mut self) {
        if let GameBoard::Full(board) = &self.board {
            self.board = GameBoard::Skinny(SkinnyBoard::from_board(board));
        }
    }

    /// Replaces all four hands. Used by imperfect-information search
    /// to substitute a reconstructed deal on a clone; the current
    /// seat's hand must be passed through unchanged so the legal-move
    /// cache stays valid.
    pub fn set_hands(&mut self, hands: [Hand; 4]) {
        self.hands = hands;
    }

    /// Applies one move for the seat whose turn it is.
    ///
    /// On success the turn rotates forward past any seats without a
    /// legal move (recording a pass for each), and the result is
    /// returned once the game ends: a win when the mover's hand is
    /// empty, a stuck game when all four seats pass in a row.
    /// Failures leave the game untouched.
    pub fn make_move(&mut self, mv: Move) -> Result<Option<GameResult>, MoveError> {
        if self.result.is_some() {
            return Err(MoveError::GameOver);
        }

        let index = self.hands[self.turn.index()]
            .play(mv.domino)
            .ok_or(MoveError::NotInHand(mv.domino))?;

        if let Err(err) = self.board.add(mv.domino, mv.end) {
            self.hands[self.turn.index()].draw(mv.domino, Some(index));
            return Err(MoveError::Board(err));
        }

        self.moves.push(MoveRecord::Play(mv));

        if self.hands[self.turn.index()].is_empty() {
            self.legal_moves.clear();
            let remaining: u32 = self.hands.iter().map(Hand::pip_total).sum();
            let points = self.turn.team().sign() * remaining as i32;
            let result = GameResult::new(self.turn, true, points);
            self.result = Some(result);
            return Ok(Some(result));
        }

        let mut passes = 0;
        let mut stuck = true;
        for _ in 0..self.hands.len() {
            self.turn = self.turn.next();
            self.update_legal_moves();
            if self.legal_moves.is_empty() {
                passes += 1;
            } else {
                self.moves
                    .extend(std::iter::repeat(MoveRecord::Pass).take(passes));
                stuck = false;
                break;
            }
        }

        if stuck {
            let mut team_pips = [0u32; 2];
            for seat in Seat::LOOP {
                team_pips[seat.team().index()] += self.hands[seat.index()].pip_total();
            }
            let total = (team_pips[0] + team_pips[1]) as i32;
            let points = match team_pips[0].cmp(&team_pips[1]) {
                std::cmp::Ordering::Less => total,
                std::cmp::Ordering::Equal => 0,
                std::cmp::Ordering::Greater => -total,
            };
            let result = GameResult::new(self.turn, false, points);
            self.result = Some(result);
            return Ok(Some(result));
        }

        Ok(None)
    }

    /// Recomputes the legal-move cache for the seat on turn. A domino
    /// is playable left if it contains the left end and playable
    /// right if it contains the right end, counted once when both
    /// ends show the same value. On an empty board every held domino
    /// plays to the left.
    fn update_legal_moves(&mut self) {
        self.legal_moves.clear();
        let hand = &self.hands[self.turn.index()];

        if self.board.is_empty() {
            self.legal_moves
                .extend(hand.iter().map(|&d| Move::new(d, End::Left)));
            return;
        }

        let left = self
            .board
            .left_end()
            .expect("a non-empty board has a left end");
        let right = self
            .board
            .right_end()
            .expect("a non-empty board has a right end");

        for &d in hand.iter() {
            if d.contains(left) {
                self.legal_moves.push(Move::new(d, End::Left));
            }
            if d.contains(right) && left != right {
                self.legal_moves.push(Move::new(d, End::Right));
            }
        }
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Board: {}", self.board)?;
        for seat in Seat::LOOP {
            writeln!(f, "{seat}'s hand: {}", self.hands[seat.index()])?;
        }
        match self.result {
            None => write!(f, "{}'s turn", self.turn),
            Some(result) => write!(f, "{result}"),
        }
    }
}
