//! Rejection sampling of a single hidden-hand reconstruction.

use super::missing::MissingValues;
use crate::game::state::Game;
use crate::model::domino::Domino;
use crate::model::hand::Hand;
use crate::model::player::Seat;
use core::fmt;
use rand::seq::SliceRandom;
use std::array;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SamplingError {
    /// No draw satisfied the pass evidence within the attempt budget.
    AttemptsExhausted { attempts: usize },
}

impl fmt::Display for SamplingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SamplingError::AttemptsExhausted { attempts } => write!(
                f,
                "no consistent deal found after {attempts} sampling attempts"
            ),
        }
    }
}

impl std::error::Error for SamplingError {}

/// Draws one uniformly random deal of the unseen dominoes that is
/// consistent with the pass evidence: shuffle the pool held by the
/// other three seats, slice it back at their exact hand sizes, and
/// retry until [`MissingValues`] accepts the result or the attempt
/// budget runs out. The seat on turn keeps its true hand.
///
/// Every game state reached through play admits at least one
/// consistent deal (the true one), so the budget only trips on
/// pathological constraint sets; callers pick it to bound worst-case
/// latency.
pub fn sample_deal<R: rand::Rng + ?Sized>(
    game: &Game,
    rng: &mut R,
    max_attempts: usize,
) -> Result<[Hand; 4], SamplingError> {
    let turn = game.turn();
    let missing = MissingValues::from_game(game);

    let pool: Vec<Domino> = Seat::LOOP
        .into_iter()
        .filter(|&seat| seat != turn)
        .flat_map(|seat| game.hand(seat).iter().copied())
        .collect();

    let attempts = max_attempts.max(1);
    let mut shuffled = pool;

    for _ in 0..attempts {
        shuffled.shuffle(rng);
        let mut cursor = 0;
        let hands: [Hand; 4] = array::from_fn(|index| {
            let seat = Seat::from_index(index).expect("index in seat range");
            if seat == turn {
                game.hand(seat).clone()
            } else {
                let len = game.hand(seat).len();
                let slice = shuffled[cursor..cursor + len].to_vec();
                cursor += len;
                Hand::with_dominoes(slice)
            }
        });

        if missing.permits_deal(&hands) {
            return Ok(hands);
        }
    }

    Err(SamplingError::AttemptsExhausted { attempts })
}
