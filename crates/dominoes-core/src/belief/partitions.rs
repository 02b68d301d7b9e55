//! Lazy exhaustive enumeration of hidden-hand reconstructions.

use super::missing::MissingValues;
use crate::game::state::Game;
use crate::model::domino::Domino;
use crate::model::hand::Hand;
use crate::model::player::Seat;
use std::array;

/// Lexicographic k-combinations of `0..n`, advanced in place.
#[derive(Debug)]
struct Combinations {
    n: usize,
    k: usize,
    indices: Vec<usize>,
    started: bool,
    exhausted: bool,
}

impl Combinations {
    fn new(n: usize, k: usize) -> Self {
        Self {
            n,
            k,
            indices: (0..k).collect(),
            started: false,
            exhausted: k > n,
        }
    }

    fn next(&mut self) -> Option<&[usize]> {
        if self.exhausted {
            return None;
        }
        if !self.started {
            self.started = true;
            return Some(&self.indices);
        }

        let mut i = self.k;
        loop {
            if i == 0 {
                self.exhausted = true;
                return None;
            }
            i -= 1;
            if self.indices[i] != i + self.n - self.k {
                break;
            }
        }
        self.indices[i] += 1;
        for j in i + 1..self.k {
            self.indices[j] = self.indices[j - 1] + 1;
        }
        Some(&self.indices)
    }
}

#[derive(Debug)]
struct Frame {
    pool: Vec<Domino>,
    combos: Combinations,
    indices: Vec<usize>,
    chosen: Vec<Domino>,
}

impl Frame {
    fn new(pool: Vec<Domino>, size: usize) -> Self {
        let combos = Combinations::new(pool.len(), size);
        Self {
            pool,
            combos,
            indices: Vec::new(),
            chosen: Vec::new(),
        }
    }

    fn advance(&mut self) -> bool {
        match self.combos.next() {
            Some(indices) => {
                self.indices = indices.to_vec();
                self.chosen = self.indices.iter().map(|&i| self.pool[i]).collect();
                true
            }
            None => false,
        }
    }

    fn remainder(&self) -> Vec<Domino> {
        let mut remainder = Vec::with_capacity(self.pool.len() - self.indices.len());
        let mut next_chosen = 0;
        for (i, &d) in self.pool.iter().enumerate() {
            if next_chosen < self.indices.len() && self.indices[next_chosen] == i {
                next_chosen += 1;
            } else {
                remainder.push(d);
            }
        }
        remainder
    }
}

/// All ways of splitting `pool` into ordered groups of the given
/// sizes, produced on demand. Each level picks a combination for its
/// group and recurses into the remainder, so the total count over a
/// full run is the multinomial coefficient `|pool|! / (s1! .. sk!)`
/// when the sizes sum to the pool size.
#[derive(Debug)]
pub struct Partitionings {
    pool: Vec<Domino>,
    sizes: Vec<usize>,
    stack: Vec<Frame>,
    started: bool,
    done: bool,
}

impl Partitionings {
    pub fn new(pool: Vec<Domino>, sizes: Vec<usize>) -> Self {
        Self {
            pool,
            sizes,
            stack: Vec::new(),
            started: false,
            done: false,
        }
    }
}

impl Iterator for Partitionings {
    type Item = Vec<Vec<Domino>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        if self.sizes.is_empty() {
            self.done = true;
            return Some(Vec::new());
        }
        if !self.started {
            self.started = true;
            let pool = std::mem::take(&mut self.pool);
            self.stack.push(Frame::new(pool, self.sizes[0]));
        }

        loop {
            let depth = self.stack.len();
            let advanced = match self.stack.last_mut() {
                Some(frame) => frame.advance(),
                None => {
                    self.done = true;
                    return None;
                }
            };

            if advanced {
                if depth == self.sizes.len() {
                    return Some(self.stack.iter().map(|frame| frame.chosen.clone()).collect());
                }
                let child_pool = self
                    .stack
                    .last()
                    .expect("an advanced frame is on the stack")
                    .remainder();
                self.stack.push(Frame::new(child_pool, self.sizes[depth]));
            } else {
                self.stack.pop();
                if self.stack.is_empty() {
                    self.done = true;
                    return None;
                }
            }
        }
    }
}

/// Every deal of the unseen dominoes consistent with the pass
/// evidence, lazily. The seat on turn keeps its true hand; the pool of
/// dominoes held by the other three seats is repartitioned at their
/// exact hand sizes and filtered through [`MissingValues`].
#[derive(Debug)]
pub struct PossibleDeals {
    turn: Seat,
    own_hand: Hand,
    others: Vec<Seat>,
    missing: MissingValues,
    partitions: Partitionings,
}

pub fn possible_deals(game: &Game) -> PossibleDeals {
    let turn = game.turn();
    let missing = MissingValues::from_game(game);
    let mut pool = Vec::new();
    let mut sizes = Vec::new();
    let mut others = Vec::new();

    for seat in Seat::LOOP {
        if seat == turn {
            continue;
        }
        let hand = game.hand(seat);
        pool.extend(hand.iter().copied());
        sizes.push(hand.len());
        others.push(seat);
    }

    PossibleDeals {
        turn,
        own_hand: game.hand(turn).clone(),
        others,
        missing,
        partitions: Partitionings::new(pool, sizes),
    }
}

impl Iterator for PossibleDeals {
    type Item = [Hand; 4];

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let groups = self.partitions.next()?;
            let mut hands: [Hand; 4] = array::from_fn(|_| Hand::new());
            hands[self.turn.index()] = self.own_hand.clone();
            for (seat, group) in self.others.iter().zip(groups) {
                hands[seat.index()] = Hand::with_dominoes(group);
            }
            if self.missing.permits_deal(&hands) {
                return Some(hands);
            }
        }
    }
}
