// Unit tests for scoring and hierarchical pruning.
//
// Covers the classification properties: empty evidence, the MIN_SCORE floor
// on survivors, exact score redistribution to parents, root-level discard,
// and determinism of the ranked output.

use streetnames::error::TopicError;
use streetnames::topics::classifier::{dampen, prune, Classifier, ScoreMap, MIN_SCORE};
use streetnames::topics::id::TopicId;
use streetnames::topics::idf::IdfTable;
use streetnames::topics::ranking::Selection;
use streetnames::topics::taxonomy::Taxonomy;
use streetnames::topics::traits::TopicClassifier;

fn id(path: &str) -> TopicId {
    TopicId::parse(path).unwrap()
}

/// IDF over the built-in taxonomy, with one reference document that
/// contains every keyword plus the given extra documents.
fn builtin_idf(taxonomy: &Taxonomy, extra: &[&str]) -> IdfTable {
    let universe = taxonomy.all_keywords().into_iter().collect::<Vec<_>>().join(" ");
    let mut docs = vec![universe];
    docs.extend(extra.iter().map(|d| d.to_string()));
    IdfTable::compute(taxonomy.all_keywords(), &docs).unwrap()
}

// ============================================================
// Empty evidence
// ============================================================

#[test]
fn no_keyword_matches_yields_empty_ranking() {
    let taxonomy = Taxonomy::builtin().unwrap();
    let idf = builtin_idf(&taxonomy, &[]);
    let classifier = Classifier::new(&taxonomy, &idf);

    let ranking = classifier.classify("Xyz 1905 unbekannt").unwrap();
    assert!(ranking.is_empty());
    assert!(ranking.select(Selection::First).is_none());
}

#[test]
fn empty_document_yields_empty_ranking() {
    let taxonomy = Taxonomy::builtin().unwrap();
    let idf = builtin_idf(&taxonomy, &[]);
    let classifier = Classifier::new(&taxonomy, &idf);

    assert!(classifier.classify("").unwrap().is_empty());
    assert!(classifier.classify("   \n\t").unwrap().is_empty());
}

// ============================================================
// Scenarios
// ============================================================

#[test]
fn single_fluss_token_selects_water() {
    let taxonomy = Taxonomy::builtin().unwrap();
    let idf = builtin_idf(&taxonomy, &["fluss"]);
    let w = idf.weight("fluss").unwrap();
    assert_eq!(w, 0.5);

    let classifier = Classifier::new(&taxonomy, &idf);
    let ranking = classifier.classify("Fluss").unwrap();

    assert_eq!(ranking.len(), 1);
    let only = ranking.first().unwrap();
    assert_eq!(only.topic, id("G/W"));
    assert!((only.score - (1.0 + (1.0 + w).ln())).abs() < 1e-12);
}

#[test]
fn weak_literature_match_survives_alone() {
    let taxonomy = Taxonomy::from_entries([("A/L", "sage"), ("A/M", "musik")]).unwrap();
    // "sage" in three documents -> weight 1/3
    let docs = ["eine sage", "die sage", "sagenhaft", "musik"];
    let idf = IdfTable::compute(taxonomy.all_keywords(), docs).unwrap();
    let classifier = Classifier::new(&taxonomy, &idf);

    let ranking = classifier.classify("Nach einer alten Sage benannt").unwrap();
    assert_eq!(ranking.len(), 1);
    let candidate = ranking.first().unwrap();
    assert_eq!(candidate.topic, id("A/L"));
    assert!((candidate.score - dampen(1.0 / 3.0)).abs() < 1e-12);
}

#[test]
fn dampened_raw_score_of_point_three_clears_threshold() {
    let taxonomy = Taxonomy::from_entries([("A/L", "sage"), ("A/M", "musik")]).unwrap();
    let scores = ScoreMap::from([(id("A/L"), dampen(0.3))]);

    let pruned = prune(scores, &taxonomy, MIN_SCORE).unwrap();
    assert_eq!(pruned.len(), 1);
    assert!((pruned[&id("A/L")] - 1.262364264467491).abs() < 1e-9);
}

#[test]
fn sub_threshold_siblings_redistribute_to_parent() {
    let taxonomy = Taxonomy::from_entries([
        ("N", "natur"),
        ("N/P", "pflanze"),
        ("N/A", "vogel"),
    ])
    .unwrap();
    assert_eq!(taxonomy.child_count(&id("N")), 2);

    // Parent has 0.6 of its own; children add 0.2 and 0.3
    let scores = ScoreMap::from([(id("N"), 0.6), (id("N/P"), 0.4), (id("N/A"), 0.6)]);
    let pruned = prune(scores, &taxonomy, MIN_SCORE).unwrap();

    assert_eq!(pruned.len(), 1);
    assert!((pruned[&id("N")] - 1.1).abs() < 1e-12);
}

#[test]
fn sub_threshold_siblings_without_parent_score_are_lost() {
    let taxonomy = Taxonomy::builtin().unwrap();
    let scores = ScoreMap::from([(id("N/P"), 0.4), (id("N/A"), 0.6)]);
    // Parent reaches 0.5, below MIN_SCORE, and roots have nowhere to go
    let pruned = prune(scores, &taxonomy, MIN_SCORE).unwrap();
    assert!(pruned.is_empty());
}

#[test]
fn sub_threshold_root_is_discarded() {
    let taxonomy = Taxonomy::builtin().unwrap();
    let scores = ScoreMap::from([(id("M"), 0.5), (id("P"), 1.3)]);
    let pruned = prune(scores, &taxonomy, MIN_SCORE).unwrap();

    assert!(!pruned.contains_key(&id("M")));
    assert_eq!(pruned.get(&id("P")), Some(&1.3));
}

// ============================================================
// Redistribution arithmetic
// ============================================================

#[test]
fn redistribution_divides_by_parent_child_count() {
    let taxonomy = Taxonomy::builtin().unwrap();
    assert_eq!(taxonomy.child_count(&id("G")), 7);

    // 0.7 / 7 = 0.1 moves to Geography, lifting it over the threshold
    let scores = ScoreMap::from([(id("G"), 0.95), (id("G/W"), 0.7)]);
    let pruned = prune(scores, &taxonomy, MIN_SCORE).unwrap();

    assert!(!pruned.contains_key(&id("G/W")));
    assert!((pruned[&id("G")] - 1.05).abs() < 1e-12);
}

#[test]
fn redistribution_cascades_through_levels() {
    let taxonomy = Taxonomy::from_entries([("X", "x"), ("X/Y", "y"), ("X/Y/Z", "z")]).unwrap();

    // Z (0.8) -> Y gets 0.8, Y (0.8) -> X gets 0.8; X had 0.5 -> 1.3
    let scores = ScoreMap::from([(id("X"), 0.5), (id("X/Y/Z"), 0.8)]);
    let pruned = prune(scores, &taxonomy, MIN_SCORE).unwrap();

    assert_eq!(pruned.len(), 1);
    assert!((pruned[&id("X")] - 1.3).abs() < 1e-12);
}

#[test]
fn surviving_child_is_not_absorbed_by_parent() {
    let taxonomy = Taxonomy::builtin().unwrap();
    let scores = ScoreMap::from([(id("G"), 1.2), (id("G/S"), 1.5), (id("G/F"), 0.7)]);
    let pruned = prune(scores, &taxonomy, MIN_SCORE).unwrap();

    assert_eq!(pruned.get(&id("G/S")), Some(&1.5));
    assert!((pruned[&id("G")] - (1.2 + 0.1)).abs() < 1e-12);
    assert!(!pruned.contains_key(&id("G/F")));
}

#[test]
fn zero_scores_are_removed_without_redistribution() {
    let taxonomy = Taxonomy::builtin().unwrap();
    let scores = ScoreMap::from([(id("G"), 1.0), (id("G/W"), 0.0)]);
    let pruned = prune(scores, &taxonomy, MIN_SCORE).unwrap();
    assert_eq!(pruned, ScoreMap::from([(id("G"), 1.0)]));
}

#[test]
fn redistribution_into_uncounted_parent_is_an_error() {
    let taxonomy = Taxonomy::from_entries([("X/Y/Z", "z")]).unwrap();
    let scores = ScoreMap::from([(id("X/Y/Z"), 0.4)]);
    let err = prune(scores, &taxonomy, MIN_SCORE).unwrap_err();
    assert!(matches!(err, TopicError::OrphanedTopic { .. }));
}

// ============================================================
// Properties over realistic descriptions
// ============================================================

const DESCRIPTIONS: &[&str] = &[
    "Ludwig van Beethoven (1770-1827), Komponist. Seine Musik und Lieder prägten die Klassik.",
    "Benannt nach dem Bach, der hier entspringt und in den Fluss mündet.",
    "Karl Friedrich Drais, Erfinder des Laufrads, Forstmeister und Ingenieur.",
    "Nach der ehemaligen Mühle und dem Schloss am Rand der Stadt.",
    "Gewann-Name. Flur im Süden des Dorfes.",
    "Reinhold Frank, Rechtsanwalt und Widerstandskämpfer, 1945 hingerichtet.",
];

#[test]
fn every_survivor_reaches_min_score() {
    let taxonomy = Taxonomy::builtin().unwrap();
    let idf = builtin_idf(&taxonomy, DESCRIPTIONS);
    let classifier = Classifier::new(&taxonomy, &idf);

    for text in DESCRIPTIONS {
        let ranking = classifier.classify(text).unwrap();
        assert!(!ranking.is_empty(), "expected a topic for {text:?}");
        for candidate in ranking.ascending() {
            assert!(
                candidate.score >= MIN_SCORE,
                "{} scored {} for {text:?}",
                candidate.topic,
                candidate.score
            );
        }
    }
}

#[test]
fn rankings_are_ascending_and_deterministic() {
    let taxonomy = Taxonomy::builtin().unwrap();
    let idf = builtin_idf(&taxonomy, DESCRIPTIONS);
    let classifier = Classifier::new(&taxonomy, &idf);

    for text in DESCRIPTIONS {
        let first = classifier.classify(text).unwrap();
        let second = classifier.classify(text).unwrap();
        assert_eq!(first, second);

        let scores: Vec<f64> = first.ascending().iter().map(|c| c.score).collect();
        assert!(scores.windows(2).all(|w| w[0] <= w[1]), "not ascending: {scores:?}");
    }
}

#[test]
fn first_and_strongest_pick_opposite_ends() {
    let taxonomy = Taxonomy::from_entries([("A/M", "komponist"), ("G/W", "fluss bach")]).unwrap();
    let docs = ["komponist", "fluss bach"];
    let idf = IdfTable::compute(taxonomy.all_keywords(), docs).unwrap();
    let classifier = Classifier::new(&taxonomy, &idf);

    let ranking = classifier.classify("Der Komponist wohnte am Bach und am Fluss").unwrap();
    assert_eq!(ranking.len(), 2);
    assert_eq!(ranking.select(Selection::First).unwrap().topic, id("A/M"));
    assert_eq!(ranking.select(Selection::Strongest).unwrap().topic, id("G/W"));
}

#[test]
fn missing_idf_weight_is_fatal() {
    let taxonomy = Taxonomy::from_entries([("G/W", "fluss bach")]).unwrap();
    let idf = IdfTable::compute(["fluss"], ["fluss"]).unwrap();
    let classifier = Classifier::new(&taxonomy, &idf);

    let err = classifier.classify("Bach").unwrap_err();
    assert_eq!(err, TopicError::MissingWeight("bach".to_string()));
}
