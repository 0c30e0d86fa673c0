// Entity corpus: the named entities and the description text to classify.
//
// The raw data file is a JSON object keyed by entity name. Each record has
// an "info" blob with the free-text description; anything else in the
// record (previous names, years, ...) belongs to other stages and is
// ignored here.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

/// One entity's record as stored in the raw data file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntityRecord {
    /// Free-text description. Missing or null in the file reads as empty.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub info: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// All entities, keyed and iterated by name.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    records: BTreeMap<String, EntityRecord>,
}

impl Corpus {
    /// Load the raw data file (`{"<name>": {"info": "..."}, ...}`).
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read corpus file {}", path.display()))?;
        let records: BTreeMap<String, EntityRecord> = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse corpus file {}", path.display()))?;

        info!(path = %path.display(), entities = records.len(), "Loaded corpus");
        Ok(Self { records })
    }

    pub fn from_records<I, N>(records: I) -> Self
    where
        I: IntoIterator<Item = (N, EntityRecord)>,
        N: Into<String>,
    {
        Self {
            records: records
                .into_iter()
                .map(|(name, record)| (name.into(), record))
                .collect(),
        }
    }

    /// Every entity's description, in name order. This is the reference
    /// corpus for IDF computation.
    pub fn infos(&self) -> impl Iterator<Item = &str> {
        self.records.values().map(|r| r.info.as_str())
    }

    pub fn get(&self, name: &str) -> Option<&EntityRecord> {
        self.records.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &EntityRecord)> {
        self.records.iter().map(|(name, r)| (name.as_str(), r))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ignores_extra_fields() {
        let json = r#"{
            "Albring": {"info": "Benannt nach der Alb", "previous": [[null, "Albtalstraße"]]},
            "Zirkel": {"previous": []},
            "Am Illwig": {"info": null}
        }"#;
        let records: BTreeMap<String, EntityRecord> = serde_json::from_str(json).unwrap();
        let corpus = Corpus::from_records(records);

        assert_eq!(corpus.len(), 3);
        assert_eq!(corpus.get("Albring").unwrap().info, "Benannt nach der Alb");
        assert_eq!(corpus.get("Zirkel").unwrap().info, "");
        assert_eq!(corpus.get("Am Illwig").unwrap().info, "");
    }

    #[test]
    fn test_iteration_is_sorted_by_name() {
        let corpus = Corpus::from_records([
            ("Zunftstraße", EntityRecord { info: "z".into() }),
            ("Albring", EntityRecord { info: "a".into() }),
        ]);
        let names: Vec<&str> = corpus.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["Albring", "Zunftstraße"]);
        let infos: Vec<&str> = corpus.infos().collect();
        assert_eq!(infos, vec!["a", "z"]);
    }
}
