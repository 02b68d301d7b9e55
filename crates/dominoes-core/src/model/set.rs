use crate::model::domino::{Domino, MAX_PIP};
use crate::model::hand::Hand;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::array;

/// Dominoes dealt to each seat at the start of a game.
pub const HAND_SIZE: usize = 7;

/// The full double-six set of 28 dominoes, ready to shuffle and deal.
#[derive(Debug, Clone)]
pub struct DominoSet {
    dominoes: Vec<Domino>,
}

impl DominoSet {
    pub fn double_six() -> Self {
        let mut dominoes = Vec::with_capacity(28);
        for first in 0..=MAX_PIP {
            for second in first..=MAX_PIP {
                dominoes.push(Domino::new(first, second));
            }
        }
        Self { dominoes }
    }

    pub fn shuffled<R: rand::Rng + ?Sized>(rng: &mut R) -> Self {
        let mut set = Self::double_six();
        set.dominoes.shuffle(rng);
        set
    }

    pub fn shuffled_with_seed(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::shuffled(&mut rng)
    }

    /// Splits the set into four hands of [`HAND_SIZE`] dominoes each.
    pub fn deal(self) -> [Hand; 4] {
        let mut chunks = self.dominoes.chunks_exact(HAND_SIZE);
        array::from_fn(|_| {
            Hand::with_dominoes(chunks.next().expect("28 dominoes deal into 4 hands").to_vec())
        })
    }

    pub fn dominoes(&self) -> &[Domino] {
        &self.dominoes
    }
}

#[cfg(test)]
mod tests {
    use super::DominoSet;
    use std::collections::HashSet;

    #[test]
    fn double_six_has_28_unique_dominoes() {
        let set = DominoSet::double_six();
        assert_eq!(set.dominoes().len(), 28);
        let unique: HashSet<_> = set.dominoes().iter().copied().collect();
        assert_eq!(unique.len(), 28);
    }

    #[test]
    fn pip_sum_of_full_set_is_168() {
        let total: u32 = DominoSet::double_six()
            .dominoes()
            .iter()
            .map(|d| d.weight() as u32)
            .sum();
        assert_eq!(total, 168);
    }

    #[test]
    fn deal_partitions_the_set() {
        let hands = DominoSet::shuffled_with_seed(11).deal();
        let mut seen = HashSet::new();
        for hand in &hands {
            assert_eq!(hand.len(), 7);
            for d in hand.iter() {
                assert!(seen.insert(*d), "{d} dealt twice");
            }
        }
        assert_eq!(seen.len(), 28);
    }

    #[test]
    fn shuffle_with_seed_is_deterministic() {
        let a = DominoSet::shuffled_with_seed(42);
        let b = DominoSet::shuffled_with_seed(42);
        assert_eq!(a.dominoes(), b.dominoes());
    }

    #[test]
    fn shuffle_with_different_seeds_differs() {
        let a = DominoSet::shuffled_with_seed(1);
        let b = DominoSet::shuffled_with_seed(2);
        assert_ne!(a.dominoes(), b.dominoes());
    }
}
