// Classification results and the choice of which candidate to report.
//
// A ranking holds the candidates that survived pruning in ascending score
// order. The batch output has always taken the first element of that list,
// which is the weakest candidate whenever more than one survives. That
// behaviour stays the default; `Selection::Strongest` picks the other end.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::id::TopicId;

/// One surviving topic and its final score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub topic: TopicId,
    pub score: f64,
}

/// Which end of the ascending ranking counts as "the" classification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Selection {
    /// First element of the ascending list (the lowest score). This is
    /// what existing classification files were produced with.
    #[default]
    First,
    /// Last element of the ascending list (the highest score).
    Strongest,
}

impl Selection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Selection::First => "first",
            Selection::Strongest => "strongest",
        }
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Selection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "first" => Ok(Selection::First),
            "strongest" | "best" | "last" => Ok(Selection::Strongest),
            other => Err(format!(
                "unknown selection {other:?} (expected \"first\" or \"strongest\")"
            )),
        }
    }
}

/// Candidates in ascending score order. Ties keep topic path order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Ranking {
    candidates: Vec<Candidate>,
}

impl Ranking {
    /// Sort candidates ascending by score. The sort is stable, so callers
    /// that pass candidates in path order get a deterministic tie order.
    pub fn from_candidates(mut candidates: Vec<Candidate>) -> Self {
        candidates.sort_by(|a, b| a.score.total_cmp(&b.score));
        Self { candidates }
    }

    pub fn ascending(&self) -> &[Candidate] {
        &self.candidates
    }

    /// The historical pick: lowest-scoring survivor.
    pub fn first(&self) -> Option<&Candidate> {
        self.candidates.first()
    }

    /// Highest-scoring survivor.
    pub fn strongest(&self) -> Option<&Candidate> {
        self.candidates.last()
    }

    pub fn select(&self, selection: Selection) -> Option<&Candidate> {
        match selection {
            Selection::First => self.first(),
            Selection::Strongest => self.strongest(),
        }
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}
