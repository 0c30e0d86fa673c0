// Colored terminal output for rankings, the taxonomy tree and batch runs.
//
// main.rs delegates all display formatting here.

use colored::Colorize;

use crate::pipeline::classify::BatchReport;
use crate::topics::classifier::MIN_SCORE;
use crate::topics::idf::IdfTable;
use crate::topics::ranking::{Ranking, Selection};
use crate::topics::taxonomy::Taxonomy;

/// Display the full candidate list for one entity.
pub fn display_ranking(name: &str, info: &str, taxonomy: &Taxonomy, ranking: &Ranking, selection: Selection) {
    println!("\n{}", format!("=== Classification for {name} ===").bold());
    println!("  {}", super::truncate_chars(info, 160).dimmed());
    println!();

    if ranking.is_empty() {
        println!("  {}", "No topic reached the minimum score, unclassified.".yellow());
        return;
    }

    let chosen = ranking.select(selection).map(|c| &c.topic);

    println!(
        "  {:>4}  {:<6} {:<34} {:>7}",
        "#".dimmed(),
        "Topic".dimmed(),
        "Label".dimmed(),
        "Score".dimmed(),
    );
    println!("  {}", "-".repeat(56).dimmed());

    // Ascending, as returned by the classifier
    for (i, candidate) in ranking.ascending().iter().enumerate() {
        let marker = if Some(&candidate.topic) == chosen {
            "<-".green().bold().to_string()
        } else {
            String::new()
        };
        println!(
            "  {:>4}. {:<6} {:<34} {:>7.3} {}",
            i + 1,
            candidate.topic.to_string(),
            taxonomy.label(&candidate.topic),
            candidate.score,
            marker,
        );
    }

    println!();
    println!(
        "  Selection: {} (list is in ascending score order)",
        selection.as_str().bold()
    );
}

/// Display the taxonomy as an indented tree with keyword and child counts.
pub fn display_taxonomy(taxonomy: &Taxonomy) {
    println!(
        "\n{}",
        format!("=== Taxonomy ({} topics) ===", taxonomy.len()).bold()
    );
    println!();

    let mut last_root = None;
    for (id, keywords) in taxonomy.entries() {
        // Grouping-only roots (no keywords of their own) still get a header
        let root = id.codes()[0];
        if id.depth() > 1 && last_root != Some(root) {
            if let Some(parent) = id.parent().filter(|p| p.depth() == 1) {
                println!(
                    "  {:<8} {}  {}",
                    parent.to_string().bold(),
                    taxonomy.label(&parent),
                    "(grouping)".dimmed()
                );
            }
        }
        last_root = Some(root);

        let indent = "  ".repeat(id.depth());
        let children = taxonomy.child_count(id);
        let children_str = if children > 0 {
            format!(", {children} children")
        } else {
            String::new()
        };
        println!(
            "{indent}{:<8} {}  {}",
            id.to_string().bold(),
            taxonomy.label(id),
            format!("({} keywords{children_str})", keywords.len()).dimmed()
        );
        println!("{indent}         {}", keywords.join(" ").dimmed());
    }
}

/// Display the rarest and most common keywords by IDF weight.
pub fn display_idf(idf: &IdfTable, top: usize) {
    println!(
        "\n{}",
        format!("=== Keyword weights ({} keywords) ===", idf.len()).bold()
    );

    let mut weights: Vec<(&str, f64)> = idf.iter().collect();
    // Highest weight first; keyword order breaks ties
    weights.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    println!("\n  {}", "Rarest (highest weight):".bold());
    for (keyword, weight) in weights.iter().take(top) {
        println!("    {:<24} {:.4}  (in {} docs)", keyword, weight, doc_count(*weight));
    }

    println!("\n  {}", "Most common (lowest weight):".bold());
    for (keyword, weight) in weights.iter().rev().take(top) {
        println!("    {:<24} {:.4}  (in {} docs)", keyword, weight, doc_count(*weight));
    }
}

/// Display the result of a batch run.
pub fn display_batch_summary(taxonomy: &Taxonomy, report: &BatchReport, selection: Selection) {
    println!(
        "\n{}",
        format!(
            "=== Classified {} of {} entities (selection: {}) ===",
            report.classified_count(),
            report.assignments.len(),
            selection
        )
        .bold()
    );
    println!();

    let histogram = report.topic_histogram();
    let max = histogram.values().copied().max().unwrap_or(0);
    let bar_width: usize = 30;

    for (topic, count) in &histogram {
        let filled = if max > 0 { count * bar_width / max } else { 0 };
        let bar = format!("[{}{}]", "=".repeat(filled), " ".repeat(bar_width - filled));
        println!(
            "  {:<6} {:<34} {} {}",
            topic.to_string(),
            taxonomy.label(topic),
            bar.bright_blue(),
            count
        );
    }

    if !report.unclassified.is_empty() {
        println!(
            "\n  {} {} entities without classification (score < {MIN_SCORE} everywhere):",
            "~".yellow(),
            report.unclassified.len()
        );
        for name in &report.unclassified {
            println!("    {}", name.dimmed());
        }
    }
}

/// Recover the document count from a 1/n weight.
fn doc_count(weight: f64) -> u64 {
    (1.0 / weight).round() as u64
}
