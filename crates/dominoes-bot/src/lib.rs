#![deny(warnings)]
pub mod search;
pub mod strategy;

pub use search::{FULL_WINDOW, alphabeta};
pub use strategy::{
    DoublesFirst, HeaviestFirst, Identity, Omniscient, Reverse, SampledLookahead, Shuffle,
    Strategy,
};
