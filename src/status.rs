// System status display: corpus file, taxonomy, last classification output.

use anyhow::Result;
use std::path::Path;

use crate::config::Config;
use crate::pipeline::classify::read_assignments;

/// Display system status to the terminal.
pub fn show(config: &Config) -> Result<()> {
    match file_size(&config.input_path) {
        Some(size) => println!("Corpus: {} ({})", config.input_path.display(), size),
        None => {
            println!("Corpus: {} (not found)", config.input_path.display());
            println!("  Set STREETNAMES_INPUT or pass --input to point at the raw data");
        }
    }

    let taxonomy = config.load_taxonomy()?;
    println!(
        "Taxonomy: {} ({} topics, {} distinct keywords)",
        config.taxonomy_source(),
        taxonomy.len(),
        taxonomy.all_keywords().len()
    );
    println!("Selection: {}", config.selection);

    if !config.output_path.exists() {
        println!("Classification: not yet written");
        println!("  Run `streetnames classify` to produce it");
        return Ok(());
    }

    let assignments = read_assignments(&config.output_path)?;
    let unclassified = assignments.values().filter(|t| t.is_none()).count();
    println!(
        "Classification: {} ({} entities, {} unclassified)",
        config.output_path.display(),
        assignments.len(),
        unclassified
    );

    Ok(())
}

fn file_size(path: &Path) -> Option<String> {
    std::fs::metadata(path).ok().map(|m| format_bytes(m.len()))
}

fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}
