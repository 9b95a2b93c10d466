//! # ranklab-search
//!
//! The two search procedures built on the evaluation harness: greedy forward
//! feature selection maximizing mean nDCG, and Gaussian-process black-box
//! hyperparameter optimization minimizing negative validation MRR. Both run
//! strictly sequentially — every trial re-fits the classifier.

pub mod optimizer;
pub mod selection;
pub mod space;
mod surrogate;

pub use optimizer::optimize;
pub use selection::{forward_select, FeatureSelection};
pub use space::{Dimension, Domain, SearchSpace};
