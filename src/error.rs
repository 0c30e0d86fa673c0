// Engine errors: the failure modes of taxonomy loading, IDF computation
// and classification.
//
// Application code (config, corpus loading, the CLI) uses anyhow; these
// typed errors convert into it with `?`.

use thiserror::Error;

use crate::topics::id::TopicId;

#[derive(Debug, Error, PartialEq)]
pub enum TopicError {
    #[error("invalid topic path {path:?}: {reason}")]
    InvalidTopicId { path: String, reason: &'static str },

    /// A taxonomy keyword occurs in none of the reference documents, so its
    /// weight would be 1/0.
    #[error("term not found in any reference document: {0:?}")]
    TermNotFound(String),

    /// The IDF table was built from a different keyword universe than the
    /// taxonomy being classified against.
    #[error("no IDF weight for keyword {0:?}")]
    MissingWeight(String),

    #[error("topic {child} redistributes into {parent}, which has no recorded children")]
    OrphanedTopic { child: TopicId, parent: TopicId },
}
