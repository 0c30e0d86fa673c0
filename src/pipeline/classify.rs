// Batch classification: every entity in the corpus gets at most one topic.
//
// The IDF table is computed once over all descriptions before any entity is
// classified. Entities without a surviving candidate are kept in the output
// as unclassified and logged for manual review; an engine error (missing
// weight, broken taxonomy) aborts the whole batch.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tracing::{info, warn};

use crate::corpus::Corpus;
use crate::topics::id::TopicId;
use crate::topics::idf::IdfTable;
use crate::topics::ranking::Selection;
use crate::topics::taxonomy::Taxonomy;
use crate::topics::traits::TopicClassifier;

/// Outcome of a batch run.
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    /// Entity name -> chosen topic, `None` when nothing survived pruning.
    pub assignments: BTreeMap<String, Option<TopicId>>,
    /// Names with no classification, sorted.
    pub unclassified: Vec<String>,
}

impl BatchReport {
    pub fn classified_count(&self) -> usize {
        self.assignments.len() - self.unclassified.len()
    }

    /// Number of entities assigned to each topic.
    pub fn topic_histogram(&self) -> BTreeMap<&TopicId, usize> {
        let mut histogram = BTreeMap::new();
        for topic in self.assignments.values().flatten() {
            *histogram.entry(topic).or_insert(0) += 1;
        }
        histogram
    }
}

/// Compute keyword weights for `taxonomy` over every description in `corpus`.
pub fn compute_idf(taxonomy: &Taxonomy, corpus: &Corpus) -> Result<IdfTable> {
    let idf = IdfTable::compute(taxonomy.all_keywords(), corpus.infos()).with_context(|| {
        format!(
            "IDF computation over {} descriptions failed; every taxonomy keyword must occur \
             in at least one description",
            corpus.len()
        )
    })?;
    info!(keywords = idf.len(), entities = corpus.len(), "IDF table ready");
    Ok(idf)
}

/// Classify every entity and pick one candidate per entity.
pub fn run(
    corpus: &Corpus,
    classifier: &dyn TopicClassifier,
    selection: Selection,
    show_progress: bool,
) -> Result<BatchReport> {
    let pb = if show_progress {
        let pb = ProgressBar::new(corpus.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar().template("  Classifying [{bar:30}] {pos}/{len} ({eta})")?,
        );
        pb
    } else {
        ProgressBar::hidden()
    };

    let mut report = BatchReport::default();
    for (name, record) in corpus.iter() {
        let ranking = classifier
            .classify(&record.info)
            .with_context(|| format!("Failed to classify {name:?}"))?;
        let chosen = ranking.select(selection).map(|c| c.topic.clone());
        if chosen.is_none() {
            report.unclassified.push(name.to_string());
        }
        report.assignments.insert(name.to_string(), chosen);
        pb.inc(1);
    }
    pb.finish_and_clear();

    // Corpus iteration is name-ordered, so this list already is too
    for name in &report.unclassified {
        warn!(entity = name.as_str(), "No classification");
    }
    info!(
        classified = report.classified_count(),
        unclassified = report.unclassified.len(),
        selection = %selection,
        "Batch classification complete"
    );

    Ok(report)
}

/// Write `name -> "G/S" | null` as JSON with sorted keys and 4-space indent.
pub fn write_assignments(path: &Path, report: &BatchReport) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory {}", parent.display()))?;
    }

    let file = File::create(path)
        .with_context(|| format!("Failed to create output file {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut writer, formatter);
    report.assignments.serialize(&mut serializer)?;
    writeln!(writer)?;
    writer.flush()?;

    info!(path = %path.display(), entities = report.assignments.len(), "Wrote classification");
    Ok(())
}

/// Read back a classification file written by `write_assignments`.
pub fn read_assignments(path: &Path) -> Result<BTreeMap<String, Option<TopicId>>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open classification file {}", path.display()))?;
    let assignments = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse classification file {}", path.display()))?;
    Ok(assignments)
}
