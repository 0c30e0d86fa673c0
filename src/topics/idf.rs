// Inverse document frequencies for taxonomy keywords.
//
// The reference corpus is the set of documents being classified. A keyword's
// weight is 1 / (documents whose lowercased text contains it anywhere), so
// keywords that appear in many entries count for less. Containment is a
// plain substring test on the whole text, not a token match.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use tracing::debug;

use super::taxonomy::normalize;
use crate::error::TopicError;

/// Keyword -> weight in (0, 1].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IdfTable {
    weights: BTreeMap<String, f64>,
}

impl IdfTable {
    /// Compute one weight per keyword over the reference documents.
    ///
    /// Fails with `TermNotFound` if any keyword occurs in no document; no
    /// partial table is returned in that case.
    pub fn compute<'k, K, D, T>(keywords: K, documents: D) -> Result<Self, TopicError>
    where
        K: IntoIterator<Item = &'k str>,
        D: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let docs: Vec<String> = documents
            .into_iter()
            .map(|doc| normalize(doc.as_ref()))
            .collect();

        // Sorted so the first missing term reported is stable across runs
        let terms: BTreeSet<String> = keywords.into_iter().map(normalize).collect();

        let mut weights = BTreeMap::new();
        for term in terms {
            let n = docs.iter().filter(|doc| doc.contains(term.as_str())).count();
            if n == 0 {
                return Err(TopicError::TermNotFound(term));
            }
            weights.insert(term, 1.0 / n as f64);
        }

        debug!(
            keywords = weights.len(),
            documents = docs.len(),
            "Computed inverse document frequencies"
        );

        Ok(Self { weights })
    }

    pub fn weight(&self, keyword: &str) -> Option<f64> {
        self.weights.get(keyword).copied()
    }

    /// `(keyword, weight)` pairs sorted by keyword.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.weights.iter().map(|(k, w)| (k.as_str(), *w))
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}
