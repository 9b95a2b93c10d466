//! Capability traits at the seams of the system: the pluggable classifier
//! and the opaque pairwise re-ranking stage.

mod classifier;
mod pairwise;

pub use classifier::Classifier;
pub use pairwise::PairwiseReranker;
