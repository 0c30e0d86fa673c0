// Hierarchical keyword classification.
//
// Each topic is scored independently against the document (TF x IDF per
// keyword, log-dampened). The score map is then pruned from the deepest
// level upwards: a topic below MIN_SCORE is removed and, unless it is a
// root, hands score / child_count(parent) to its parent. What survives is
// the most specific set of topics the evidence supports.

use std::collections::BTreeMap;

use tracing::trace;

use super::id::TopicId;
use super::idf::IdfTable;
use super::ranking::{Candidate, Ranking};
use super::taxonomy::{normalize, Taxonomy};
use super::traits::TopicClassifier;
use crate::error::TopicError;

/// A topic must reach this score at its own depth to survive pruning.
pub const MIN_SCORE: f64 = 1.0;

/// Per-document topic scores. Ordered so pruning and tie-breaking are
/// deterministic.
pub type ScoreMap = BTreeMap<TopicId, f64>;

/// Split on whitespace and lowercase. No stemming, no punctuation stripping.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace().map(normalize).collect()
}

/// `1 + ln(1 + raw)`, applied once to each positive raw score.
pub fn dampen(raw: f64) -> f64 {
    1.0 + raw.ln_1p()
}

/// Score every topic against the tokens. Topics with no matching keyword
/// are left out of the map.
pub fn raw_scores(
    tokens: &[String],
    taxonomy: &Taxonomy,
    idf: &IdfTable,
) -> Result<ScoreMap, TopicError> {
    let mut scores = ScoreMap::new();

    for (id, keywords) in taxonomy.entries() {
        let mut raw = 0.0;
        for keyword in keywords {
            let term_frequency = tokens
                .iter()
                .filter(|token| token.contains(keyword.as_str()))
                .count();
            if term_frequency > 0 {
                let weight = idf
                    .weight(keyword)
                    .ok_or_else(|| TopicError::MissingWeight(keyword.clone()))?;
                raw += term_frequency as f64 * weight;
            }
        }
        if raw > 0.0 {
            scores.insert(id.clone(), dampen(raw));
        }
    }

    Ok(scores)
}

/// Prune the score map level by level, deepest first.
///
/// A sub-threshold topic is always removed. If it had a positive score and
/// a parent, `score / child_count(parent)` is added to the parent, which is
/// created at zero if it had no score of its own. Sub-threshold roots are
/// dropped outright. Topics at or above `min_score` are never revisited.
pub fn prune(mut scores: ScoreMap, taxonomy: &Taxonomy, min_score: f64) -> Result<ScoreMap, TopicError> {
    let Some(max_depth) = scores.keys().map(TopicId::depth).max() else {
        return Ok(scores);
    };

    for depth in (1..=max_depth).rev() {
        let level: Vec<(TopicId, f64)> = scores
            .iter()
            .filter(|(id, _)| id.depth() == depth)
            .map(|(id, score)| (id.clone(), *score))
            .collect();

        for (id, score) in level {
            if score >= min_score {
                continue;
            }
            scores.remove(&id);

            if score <= 0.0 {
                continue;
            }
            let Some(parent) = id.parent() else {
                trace!(topic = %id, score, "Dropping sub-threshold root topic");
                continue;
            };

            let siblings = taxonomy.child_count(&parent);
            if siblings == 0 {
                return Err(TopicError::OrphanedTopic { child: id, parent });
            }
            trace!(topic = %id, parent = %parent, score, "Redistributing to parent");
            *scores.entry(parent).or_insert(0.0) += score / siblings as f64;
        }
    }

    Ok(scores)
}

/// Classifier bound to one taxonomy and one IDF table. Cheap to create;
/// holds only references, so one IDF table can back many classifiers.
pub struct Classifier<'a> {
    taxonomy: &'a Taxonomy,
    idf: &'a IdfTable,
}

impl<'a> Classifier<'a> {
    pub fn new(taxonomy: &'a Taxonomy, idf: &'a IdfTable) -> Self {
        Self { taxonomy, idf }
    }
}

impl TopicClassifier for Classifier<'_> {
    fn classify(&self, text: &str) -> Result<Ranking, TopicError> {
        let tokens = tokenize(text);
        let scores = raw_scores(&tokens, self.taxonomy, self.idf)?;
        if scores.is_empty() {
            return Ok(Ranking::default());
        }

        let pruned = prune(scores, self.taxonomy, MIN_SCORE)?;
        let candidates = pruned
            .into_iter()
            .map(|(topic, score)| Candidate { topic, score })
            .collect();
        Ok(Ranking::from_candidates(candidates))
    }
}
