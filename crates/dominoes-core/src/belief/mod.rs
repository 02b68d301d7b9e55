//! Hidden-hand inference and reconstruction.
//!
//! This module is composed of:
//! - `missing`: exact per-seat evidence derived from the move log
//!   (`MissingValues`, `PipMask`).
//! - `partitions`: lazy exhaustive enumeration of the deals consistent
//!   with that evidence.
//! - `sampler`: bounded rejection sampling of a single consistent deal.

mod missing;
mod partitions;
mod sampler;

pub use missing::{MissingValues, PipMask};
pub use partitions::{Partitionings, PossibleDeals, possible_deals};
pub use sampler::{SamplingError, sample_deal};
