// Topic classifier trait: the seam between the engine and the batch driver.
//
// The pipeline only needs "text in, ranking out", so it takes a trait
// object. The keyword classifier is the one real implementation; tests
// substitute fixed rankings.

use super::ranking::Ranking;
use crate::error::TopicError;

/// Trait for assigning ranked topic candidates to one document.
pub trait TopicClassifier {
    /// Classify a single text. An empty ranking means no topic had enough
    /// evidence; that is not an error.
    fn classify(&self, text: &str) -> Result<Ranking, TopicError>;
}
