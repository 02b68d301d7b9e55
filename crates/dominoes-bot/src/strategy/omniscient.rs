use super::{Identity, Strategy};
use crate::search::{FULL_WINDOW, alphabeta};
use dominoes_core::game::state::Game;
use tracing::{Level, event};

/// Perfect-information lookahead: searches the real position (all four
/// hands visible) and promotes the best move to the front of the legal
/// list, leaving the rest in place.
///
/// Inactive until the move history reaches `start_move`, or while only
/// one legal move exists. The search runs on a skinny clone so deep
/// recursion never copies the full chain.
pub struct Omniscient {
    start_move: usize,
    inner: Box<dyn Strategy>,
}

impl Omniscient {
    pub fn new(start_move: usize) -> Self {
        Self::with_inner(start_move, Box::new(Identity))
    }

    /// Uses `inner` to order moves inside the lookahead search.
    pub fn with_inner(start_move: usize, inner: Box<dyn Strategy>) -> Self {
        Self { start_move, inner }
    }
}

impl Strategy for Omniscient {
    fn apply(&mut self, game: &mut Game) {
        if game.moves().len() < self.start_move || game.legal_moves().len() < 2 {
            return;
        }

        let mut lookahead = game.clone();
        lookahead.to_skinny();
        let (line, value) = alphabeta(lookahead, FULL_WINDOW, self.inner.as_mut());
        let best = *line
            .first()
            .expect("search on an in-progress game returns a non-empty line");

        let moves = game.legal_moves_mut();
        if let Some(position) = moves.iter().position(|&mv| mv == best) {
            moves[..=position].rotate_right(1);
        }

        if tracing::enabled!(Level::DEBUG) {
            event!(
                target: "dominoes_bot::strategy",
                Level::DEBUG,
                strategy = "omniscient",
                turn = %game.turn(),
                best = %best,
                value,
                "promoted searched best move"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Omniscient;
    use crate::search::{FULL_WINDOW, alphabeta};
    use crate::strategy::{Identity, Strategy};
    use dominoes_core::game::state::Game;
    use dominoes_core::model::domino::Domino;

    fn endgame(max_remaining: usize) -> Game {
        for seed in 0..32 {
            let mut game = Game::with_opening_seed(Domino::new(6, 6), seed);
            while game.result().is_none() {
                let held: usize = game.hands().iter().map(|hand| hand.len()).sum();
                if held <= max_remaining && game.legal_moves().len() >= 2 {
                    return game;
                }
                let mv = game.legal_moves()[0];
                game.make_move(mv).unwrap();
            }
        }
        panic!("no seed produced an in-progress endgame with a choice");
    }

    #[test]
    fn promotes_the_searched_best_move() {
        let game = endgame(10);

        let mut lookahead = game.clone();
        lookahead.to_skinny();
        let (line, _) = alphabeta(lookahead, FULL_WINDOW, &mut Identity);
        let expected = line[0];

        let mut ordered = game.clone();
        Omniscient::new(0).apply(&mut ordered);
        assert_eq!(ordered.legal_moves()[0], expected);

        // Everything else keeps its relative order.
        let rest: Vec<_> = game
            .legal_moves()
            .iter()
            .copied()
            .filter(|&mv| mv != expected)
            .collect();
        assert_eq!(&ordered.legal_moves()[1..], rest.as_slice());
    }

    #[test]
    fn inactive_before_start_move() {
        let mut game = endgame(10);
        let before = game.legal_moves().to_vec();
        Omniscient::new(usize::MAX).apply(&mut game);
        assert_eq!(game.legal_moves(), before.as_slice());
    }
}
