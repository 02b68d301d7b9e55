//! Move-ordering strategies.
//!
//! A strategy rewrites the order of a game's cached legal moves and
//! nothing else; the caller always plays (or searches) the front move
//! first. Trivial orderings live here, the search-backed ones in
//! their own modules.

mod omniscient;
mod sampled;

pub use omniscient::Omniscient;
pub use sampled::SampledLookahead;

use dominoes_core::game::state::Game;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

pub trait Strategy {
    /// Reorders `game.legal_moves`; must not mutate any other state.
    fn apply(&mut self, game: &mut Game);
}

/// Leaves the legal moves untouched.
#[derive(Debug, Default)]
pub struct Identity;

impl Strategy for Identity {
    fn apply(&mut self, _game: &mut Game) {}
}

/// Random ordering from an owned, seedable source.
#[derive(Debug)]
pub struct Shuffle {
    rng: StdRng,
}

impl Shuffle {
    pub fn new() -> Self {
        Self::seeded(rand::random())
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for Shuffle {
    fn default() -> Self {
        Self::new()
    }
}

impl Strategy for Shuffle {
    fn apply(&mut self, game: &mut Game) {
        game.legal_moves_mut().shuffle(&mut self.rng);
    }
}

/// Reverses the current order.
#[derive(Debug, Default)]
pub struct Reverse;

impl Strategy for Reverse {
    fn apply(&mut self, game: &mut Game) {
        game.legal_moves_mut().reverse();
    }
}

/// Heaviest domino first, by descending pip weight.
#[derive(Debug, Default)]
pub struct HeaviestFirst;

impl Strategy for HeaviestFirst {
    fn apply(&mut self, game: &mut Game) {
        game.legal_moves_mut()
            .sort_by(|a, b| b.domino.weight().cmp(&a.domino.weight()));
    }
}

/// Doubles sorted ahead of non-doubles, otherwise stable.
#[derive(Debug, Default)]
pub struct DoublesFirst;

impl Strategy for DoublesFirst {
    fn apply(&mut self, game: &mut Game) {
        game.legal_moves_mut().sort_by_key(|mv| !mv.domino.is_double());
    }
}
