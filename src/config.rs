use std::env;
use std::path::PathBuf;

use anyhow::Result;

use crate::topics::ranking::Selection;
use crate::topics::taxonomy::Taxonomy;

pub const DEFAULT_INPUT: &str = "./raw_data.json";
pub const DEFAULT_OUTPUT: &str = "./classification.json";

/// Central configuration loaded from environment variables.
///
/// The .env file is loaded automatically at startup via dotenvy. Command
/// line flags override these values.
#[derive(Debug, Clone)]
pub struct Config {
    /// Raw entity data: JSON object of name -> {"info": ...}
    pub input_path: PathBuf,
    /// Where the name -> topic mapping is written
    pub output_path: PathBuf,
    /// Optional taxonomy override; the built-in taxonomy is used when unset
    pub taxonomy_path: Option<PathBuf>,
    /// Which end of the ascending ranking becomes the classification
    pub selection: Selection,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        let selection = match env::var("STREETNAMES_SELECT") {
            Ok(value) => value.parse().map_err(anyhow::Error::msg)?,
            Err(_) => Selection::default(),
        };

        Ok(Self {
            input_path: env::var("STREETNAMES_INPUT")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_INPUT)),
            output_path: env::var("STREETNAMES_OUTPUT")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_OUTPUT)),
            taxonomy_path: env::var("STREETNAMES_TAXONOMY")
                .ok()
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
            selection,
        })
    }

    /// Check that the corpus file exists.
    /// Call this before any operation that needs entity descriptions.
    pub fn require_input(&self) -> Result<()> {
        if !self.input_path.exists() {
            anyhow::bail!(
                "Corpus file not found: {}\n\
                 Set STREETNAMES_INPUT in your .env file or pass --input.",
                self.input_path.display()
            );
        }
        Ok(())
    }

    /// The taxonomy to classify against: the override file if configured,
    /// otherwise the built-in one.
    pub fn load_taxonomy(&self) -> Result<Taxonomy> {
        match &self.taxonomy_path {
            Some(path) => Taxonomy::from_json_file(path),
            None => Ok(Taxonomy::builtin()?),
        }
    }

    /// Short description of where the taxonomy comes from, for display.
    pub fn taxonomy_source(&self) -> String {
        match &self.taxonomy_path {
            Some(path) => path.display().to_string(),
            None => "built-in".to_string(),
        }
    }
}
