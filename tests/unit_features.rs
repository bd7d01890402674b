// Unit tests for the pure feature-engineering functions.
//
// Tests isolated behavior: category/class mapping tables, text
// canonicalization, containment bounds and its asymmetric denominator,
// and the normalized LCS known values.

use cribcheck::corpus::normalize::normalize;
use cribcheck::corpus::record::{Category, Partition};
use cribcheck::error::PipelineError;
use cribcheck::features::containment::containment;
use cribcheck::features::lcs::lcs_norm;

// ============================================================
// Category / class mapping — fixed tables
// ============================================================

#[test]
fn category_mapping_table() {
    assert_eq!(Category::parse("non").unwrap().code(), 0);
    assert_eq!(Category::parse("heavy").unwrap().code(), 1);
    assert_eq!(Category::parse("light").unwrap().code(), 2);
    assert_eq!(Category::parse("cut").unwrap().code(), 3);
    assert_eq!(Category::parse("orig").unwrap().code(), -1);
}

#[test]
fn class_mapping_table() {
    assert_eq!(Category::parse("non").unwrap().class(), 0);
    assert_eq!(Category::parse("heavy").unwrap().class(), 1);
    assert_eq!(Category::parse("light").unwrap().class(), 1);
    assert_eq!(Category::parse("cut").unwrap().class(), 1);
    assert_eq!(Category::parse("orig").unwrap().class(), -1);
}

#[test]
fn category_labels_round_trip() {
    for label in ["non", "heavy", "light", "cut", "orig"] {
        assert_eq!(Category::parse(label).unwrap().as_str(), label);
    }
}

#[test]
fn unknown_label_is_rejected() {
    assert!(matches!(
        Category::parse("moderate").unwrap_err(),
        PipelineError::UnknownCategory(_)
    ));
    assert!(matches!(
        Category::parse("").unwrap_err(),
        PipelineError::UnknownCategory(_)
    ));
    // Labels are case-sensitive, the catalog writes them lowercase.
    assert!(Category::parse("Orig").is_err());
}

#[test]
fn partition_display_matches_as_str() {
    for partition in [Partition::Train, Partition::Test, Partition::Orig] {
        assert_eq!(partition.to_string(), partition.as_str());
    }
}

// ============================================================
// Normalizer — canonical token streams
// ============================================================

#[test]
fn normalize_is_idempotent() {
    let once = normalize("Mixed CASE, with 42 numbers & symbols!");
    assert_eq!(normalize(&once), once);
}

#[test]
fn normalize_folds_case_and_punctuation() {
    assert_eq!(
        normalize("PageRank is a Link-Analysis algorithm."),
        "pagerank is a link analysis algorithm"
    );
}

#[test]
fn normalize_matches_across_formatting_variants() {
    // Two renderings of the same sentence canonicalize identically.
    let a = normalize("The cat\tsat on\nthe mat.");
    let b = normalize("the CAT sat on the mat");
    assert_eq!(a, b);
}

// ============================================================
// Containment — bounds and denominator
// ============================================================

#[test]
fn containment_against_self_is_one() {
    let text = "a system of weights attached to each element";
    for n in 1..=4 {
        assert!((containment(text, text, n).unwrap() - 1.0).abs() < 1e-12);
    }
}

#[test]
fn containment_stays_in_unit_interval() {
    let source = "pagerank is a link analysis algorithm used by the google internet \
                  search engine that assigns a numerical weighting to each element";
    let answers = [
        "i think pagerank is a link analysis algorithm",
        "an unrelated answer about gardening and soil quality",
        "pagerank pagerank pagerank",
    ];
    for answer in answers {
        for n in 1..=2 {
            let score = containment(answer, source, n).unwrap();
            assert!(
                (0.0..=1.0).contains(&score),
                "answer {answer:?} n={n} scored {score}"
            );
        }
    }
}

#[test]
fn containment_normalizes_by_answer_not_source() {
    // Short answer fully inside a long source scores 1.0; the reverse
    // direction would not.
    let short = "link analysis algorithm";
    let long = "pagerank is a link analysis algorithm used by a search engine";
    assert!((containment(short, long, 1).unwrap() - 1.0).abs() < 1e-12);
    assert!(containment(long, short, 1).unwrap() < 1.0);
}

#[test]
fn containment_rejects_answers_shorter_than_n() {
    assert!(matches!(
        containment("just two", "a much longer source text here", 3).unwrap_err(),
        PipelineError::DegenerateText { .. }
    ));
}

// ============================================================
// LCS — known values
// ============================================================

#[test]
fn lcs_known_value_from_the_corpus() {
    let answer = "i think pagerank is a link analysis algorithm used by google that \
                  uses a system of weights attached to each element of a hyperlinked \
                  set of documents";
    let source = "pagerank is a link analysis algorithm used by the google internet \
                  search engine that assigns a numerical weighting to each element \
                  of a hyperlinked set of documents";
    let score = lcs_norm(answer, source).unwrap();
    assert!((score - 0.7407407407).abs() < 1e-6, "got {score}");
}

#[test]
fn lcs_of_identical_texts_is_one() {
    let text = "word for word the same";
    assert_eq!(lcs_norm(text, text).unwrap(), 1.0);
}

#[test]
fn lcs_rejects_empty_answers() {
    assert!(matches!(
        lcs_norm("", "source words").unwrap_err(),
        PipelineError::DegenerateText { .. }
    ));
    // Whitespace-only answers have no tokens either.
    assert!(lcs_norm("   \t\n", "source words").is_err());
}

#[test]
fn lcs_order_matters() {
    // Same bag of words, reversed order: only one token can survive as a
    // common subsequence.
    let score = lcs_norm("a b c d", "d c b a").unwrap();
    assert!((score - 0.25).abs() < 1e-12, "got {score}");
}
