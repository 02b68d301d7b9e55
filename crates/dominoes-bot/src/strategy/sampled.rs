use super::{Identity, Strategy};
use crate::search::{FULL_WINDOW, alphabeta};
use dominoes_core::belief::{possible_deals, sample_deal};
use dominoes_core::game::state::{Game, Move};
use dominoes_core::model::hand::Hand;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::collections::HashMap;
use tracing::{Level, event};

/// Default bound on rejection-sampling retries per candidate deal.
const DEFAULT_MAX_ATTEMPTS: usize = 10_000;

/// Imperfect-information lookahead: searches every candidate
/// reconstruction of the hidden hands and reorders the legal moves by
/// how often each came out as the best first move.
///
/// `samples: Some(n)` draws `n` deals by rejection sampling; `None`
/// enumerates every deal consistent with the pass evidence. Inactive
/// until the move history reaches `start_move`, or while only one
/// legal move exists.
pub struct SampledLookahead {
    start_move: usize,
    samples: Option<usize>,
    max_attempts: usize,
    rng: StdRng,
    inner: Box<dyn Strategy>,
}

impl SampledLookahead {
    pub fn sampling(start_move: usize, samples: usize) -> Self {
        Self {
            start_move,
            samples: Some(samples),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            rng: StdRng::seed_from_u64(rand::random()),
            inner: Box::new(Identity),
        }
    }

    pub fn exhaustive(start_move: usize) -> Self {
        Self {
            start_move,
            samples: None,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            rng: StdRng::seed_from_u64(rand::random()),
            inner: Box::new(Identity),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn with_inner(mut self, inner: Box<dyn Strategy>) -> Self {
        self.inner = inner;
        self
    }

    fn vote(game: &Game, hands: [Hand; 4], inner: &mut dyn Strategy, tally: &mut HashMap<Move, usize>) {
        let mut lookahead = game.clone();
        lookahead.set_hands(hands);
        lookahead.to_skinny();
        let (line, _) = alphabeta(lookahead, FULL_WINDOW, inner);
        if let Some(&first) = line.first() {
            *tally.entry(first).or_insert(0) += 1;
        }
    }
}

impl Strategy for SampledLookahead {
    fn apply(&mut self, game: &mut Game) {
        if game.moves().len() < self.start_move || game.legal_moves().len() < 2 {
            return;
        }

        let mut tally: HashMap<Move, usize> = HashMap::new();

        match self.samples {
            None => {
                for hands in possible_deals(game) {
                    Self::vote(game, hands, self.inner.as_mut(), &mut tally);
                }
            }
            Some(samples) => {
                for _ in 0..samples {
                    match sample_deal(game, &mut self.rng, self.max_attempts) {
                        Ok(hands) => Self::vote(game, hands, self.inner.as_mut(), &mut tally),
                        Err(err) => {
                            event!(
                                target: "dominoes_bot::strategy",
                                Level::WARN,
                                strategy = "sampled_lookahead",
                                turn = %game.turn(),
                                %err,
                                "deal sampling gave up"
                            );
                            break;
                        }
                    }
                }
            }
        }

        game.legal_moves_mut()
            .sort_by_key(|mv| std::cmp::Reverse(tally.get(mv).copied().unwrap_or(0)));

        if tracing::enabled!(Level::DEBUG) {
            event!(
                target: "dominoes_bot::strategy",
                Level::DEBUG,
                strategy = "sampled_lookahead",
                turn = %game.turn(),
                candidates = tally.len(),
                votes = tally.values().sum::<usize>(),
                "reordered legal moves by vote"
            );
        }
    }
}
