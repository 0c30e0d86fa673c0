// The topic taxonomy: a fixed, hand-curated keyword list per topic.
//
// Stored as a flat map keyed by topic path rather than a node tree. The
// only tree structure the classifier needs is "how many children does this
// parent have", which is derived once at construction.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use super::id::TopicId;
use crate::error::TopicError;

/// Keywords of the built-in street-name taxonomy. Keywords match as
/// substrings, so stems like "histori" or "unternehm" are intentional.
const BUILTIN_TOPICS: &[(&str, &str)] = &[
    ("A", "kunst keramik"),
    ("A/L", "dicht schriftsteller zwerg märchen sage epos mytho"),
    ("A/M", "musik komponist lyrik lied"),
    ("A/P", "maler zeichner"),
    ("E", "volkswirt hansa hanse schiffer krämer industrie zoll"),
    (
        "E/C",
        "firma brauerei unternehm gmbh co kg ag raffinerie druckerei verlag",
    ),
    ("G", "lage hafen friedhof flur park gewann fels insel äcker"),
    (
        "G/B",
        "haus gaststätte gastwirtschaft bahnhof bad garten gärten erbaut schloss \
         schule burg baut wiese weide kirche kloster postamt mühle ziegelei",
    ),
    ("G/F", "wald wäldle"),
    ("G/L", "straße verbindung weg strecke pfad"),
    ("G/M", "berg gebirg erhebung"),
    ("G/R", "heimat landschaft bundesstaat bundesland provinz"),
    ("G/S", "stadt siedlung dorf ort gemeinde"),
    (
        "G/W",
        "fluss fluß bach see entspringt mündet kanal graben quell brunnen",
    ),
    ("H/H", "histori"),
    ("H/L", "jurist gericht anwalt kanzlei"),
    ("H/P", "philosoph"),
    (
        "M",
        "feldzug militär soldat krieg kämpfer kampf regiment bataillon schlacht general",
    ),
    (
        "N/P",
        "gehölz blume pflanze strauch kraut getreide frucht staude obst baum bäume",
    ),
    ("N/A", "insekt vogel falter schmetterling marder fisch"),
    ("O", "geschlecht"),
    (
        "P",
        "politi präsident bundeskanzler abgeordneter stadtrat minister reichstag \
         bürgermeister bundestag sozialis schultheiß",
    ),
    (
        "R",
        "pater theolog bischof priester heilig religi apostel gott",
    ),
    (
        "S",
        "mathematik physik maschinenbau geograph forsch konstru ingenieur erfind",
    ),
    ("S/M", "medizin arzt pflege krank psychia pharma"),
    ("T", "stamm"),
];

/// Display names for each path segment of the built-in taxonomy.
const BUILTIN_LABELS: &[(&str, &str)] = &[
    ("A", "Art"),
    ("A/L", "Literature"),
    ("A/M", "Music"),
    ("A/P", "Painting"),
    ("E", "Economy"),
    ("E/C", "Company"),
    ("G", "Geography"),
    ("G/B", "Building"),
    ("G/F", "Forest"),
    ("G/L", "Link"),
    ("G/M", "Mountain"),
    ("G/R", "Region"),
    ("G/S", "Settlement"),
    ("G/W", "Water"),
    ("H", "Humanities"),
    ("H/H", "History"),
    ("H/L", "Law"),
    ("H/P", "Philosophy"),
    ("M", "Military"),
    ("N", "Nature"),
    ("N/A", "Animal"),
    ("N/P", "Plant"),
    ("O", "Nobility"),
    ("P", "Politics"),
    ("R", "Religion"),
    ("S", "Science & Technology"),
    ("S/M", "Medicine"),
    ("T", "Tribe"),
];

/// Lowercase a keyword or document. The only normalization the engine does.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
}

/// Immutable topic table plus its derived child counts.
///
/// Safe to share across threads; nothing mutates it after construction.
#[derive(Debug, Clone)]
pub struct Taxonomy {
    keywords: BTreeMap<TopicId, Vec<String>>,
    child_counts: HashMap<TopicId, usize>,
    labels: HashMap<TopicId, String>,
}

impl Taxonomy {
    /// Build a taxonomy from `(path, keywords)` pairs, where `keywords` is a
    /// whitespace-separated list. Repeating a path appends to its list.
    pub fn from_entries<I, P, K>(entries: I) -> Result<Self, TopicError>
    where
        I: IntoIterator<Item = (P, K)>,
        P: AsRef<str>,
        K: AsRef<str>,
    {
        let mut keywords: BTreeMap<TopicId, Vec<String>> = BTreeMap::new();
        for (path, words) in entries {
            let id = TopicId::parse(path.as_ref())?;
            keywords
                .entry(id)
                .or_default()
                .extend(words.as_ref().split_whitespace().map(normalize));
        }

        let mut child_counts: HashMap<TopicId, usize> = HashMap::new();
        for id in keywords.keys() {
            if let Some(parent) = id.parent() {
                *child_counts.entry(parent).or_insert(0) += 1;
            }
        }

        Ok(Self {
            keywords,
            child_counts,
            labels: HashMap::new(),
        })
    }

    /// Attach display labels, one per path (e.g. `("A/M", "Music")`).
    pub fn with_labels<I, P, L>(mut self, labels: I) -> Result<Self, TopicError>
    where
        I: IntoIterator<Item = (P, L)>,
        P: AsRef<str>,
        L: Into<String>,
    {
        for (path, label) in labels {
            self.labels.insert(TopicId::parse(path.as_ref())?, label.into());
        }
        Ok(self)
    }

    /// The hand-curated street-name taxonomy.
    pub fn builtin() -> Result<Self, TopicError> {
        Self::from_entries(BUILTIN_TOPICS.iter().copied())?
            .with_labels(BUILTIN_LABELS.iter().copied())
    }

    /// Load a taxonomy from a JSON object mapping topic path to a
    /// whitespace-separated keyword string, e.g. `{"G/W": "fluss bach"}`.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read taxonomy file {}", path.display()))?;
        let entries: BTreeMap<String, String> = serde_json::from_str(&raw)
            .with_context(|| format!("Taxonomy file {} is not a path -> keywords object", path.display()))?;
        let taxonomy = Self::from_entries(entries)?;
        info!(
            path = %path.display(),
            topics = taxonomy.len(),
            "Loaded taxonomy override"
        );
        Ok(taxonomy)
    }

    /// The topic's configured keywords; empty for pure grouping nodes.
    pub fn keywords_for(&self, id: &TopicId) -> &[String] {
        self.keywords.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every topic with a configured keyword list, in path order.
    pub fn all_topic_ids(&self) -> impl Iterator<Item = &TopicId> {
        self.keywords.keys()
    }

    /// Number of configured topics whose parent is `id`.
    pub fn child_count(&self, id: &TopicId) -> usize {
        self.child_counts.get(id).copied().unwrap_or(0)
    }

    /// The deduplicated keyword universe, sorted.
    pub fn all_keywords(&self) -> BTreeSet<&str> {
        self.keywords
            .values()
            .flat_map(|words| words.iter().map(String::as_str))
            .collect()
    }

    /// `(topic, keywords)` pairs in path order.
    pub fn entries(&self) -> impl Iterator<Item = (&TopicId, &[String])> {
        self.keywords.iter().map(|(id, words)| (id, words.as_slice()))
    }

    /// Human-readable path such as "Geography/Settlement". Segments without
    /// a label fall back to their code.
    pub fn label(&self, id: &TopicId) -> String {
        let codes = id.codes();
        (1..=codes.len())
            .map(|end| {
                TopicId::from_codes(&codes[..end])
                    .and_then(|prefix| self.labels.get(&prefix).cloned())
                    .unwrap_or_else(|| codes[end - 1].to_string())
            })
            .collect::<Vec<_>>()
            .join("/")
    }

    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }
}
