// Topic classification: taxonomy, IDF weights, scoring and pruning.

pub mod classifier;
pub mod id;
pub mod idf;
pub mod ranking;
pub mod taxonomy;
pub mod traits;
