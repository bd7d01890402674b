// Word n-gram containment scoring.
//
// Containment is the fraction of the answer's n-grams that also occur in
// the source, counted with multiplicity:
//
//   sum(min(count_answer[g], count_source[g])) / sum(count_answer[g])
//
// The denominator is the answer's n-gram total, not a symmetric union.
// The classifier's feature semantics depend on this exact asymmetry, so
// it must not be "corrected" to a Jaccard-style denominator.

use std::collections::HashMap;

use crate::corpus::Corpus;
use crate::error::PipelineError;

/// Count the word n-grams of a token sequence.
fn ngram_counts<'a>(tokens: &'a [&'a str], n: usize) -> HashMap<&'a [&'a str], u32> {
    let mut counts = HashMap::new();
    for gram in tokens.windows(n) {
        *counts.entry(gram).or_insert(0) += 1;
    }
    counts
}

/// Containment of `answer` within `source` for n-grams of size `n`.
///
/// Always in [0, 1] for scoreable inputs; an answer scored against itself
/// is exactly 1.0. An answer with fewer than `n` tokens has no n-grams
/// and is rejected rather than silently dividing by zero.
pub fn containment(answer: &str, source: &str, n: usize) -> Result<f64, PipelineError> {
    if n == 0 {
        return Err(PipelineError::DegenerateText {
            detail: "n-gram size must be at least 1".to_string(),
        });
    }

    let answer_tokens: Vec<&str> = answer.split_whitespace().collect();
    let source_tokens: Vec<&str> = source.split_whitespace().collect();

    if answer_tokens.len() < n {
        return Err(PipelineError::DegenerateText {
            detail: format!(
                "answer has {} tokens, need at least {n} for {n}-gram containment",
                answer_tokens.len()
            ),
        });
    }

    let answer_counts = ngram_counts(&answer_tokens, n);
    let source_counts = ngram_counts(&source_tokens, n);

    let total: u32 = answer_counts.values().sum();
    let shared: u32 = answer_counts
        .iter()
        .map(|(gram, count)| (*count).min(source_counts.get(gram).copied().unwrap_or(0)))
        .sum();

    Ok(f64::from(shared) / f64::from(total))
}

/// Containment for a catalog answer file against its task's source text.
pub fn containment_for(corpus: &Corpus, n: usize, file: &str) -> Result<f64, PipelineError> {
    let record = corpus.get(file)?;
    let source = corpus.source_for(&record.task)?;
    containment(&record.text, &source.text, n).map_err(|e| e.for_file(file))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn self_containment_is_one() {
        let text = "the quick brown fox jumps over the lazy dog";
        for n in 1..=3 {
            let score = containment(text, text, n).unwrap();
            assert!((score - 1.0).abs() < 1e-12, "n={n} got {score}");
        }
    }

    #[test]
    fn disjoint_texts_score_zero() {
        let score = containment("alpha beta gamma", "delta epsilon zeta", 1).unwrap();
        assert_eq!(score, 0.0);
    }

    #[test]
    fn partial_overlap_unigrams() {
        // Answer grams: {this, is, an, answer}; only "is" occurs in the source.
        let score = containment("this is an answer", "that is something else", 1).unwrap();
        assert!((score - 0.25).abs() < 1e-12, "got {score}");
    }

    #[test]
    fn counts_respect_multiplicity() {
        // "a a a" has two bigrams "a a"; the source has only one, so the
        // min-count intersection is 1 of 2.
        let score = containment("a a a", "a a b", 2).unwrap();
        assert!((score - 0.5).abs() < 1e-12, "got {score}");
    }

    #[test]
    fn denominator_is_the_answer_side() {
        // Everything in the answer appears in the much longer source, so
        // containment is 1.0 regardless of what else the source holds.
        let score = containment(
            "link analysis algorithm",
            "pagerank is a link analysis algorithm used by a search engine",
            2,
        )
        .unwrap();
        assert!((score - 1.0).abs() < 1e-12, "got {score}");
    }

    #[test]
    fn score_stays_in_unit_interval() {
        let answers = [
            "one two three four",
            "two two two two",
            "completely different words here",
        ];
        let source = "one two three four five six";
        for answer in answers {
            for n in 1..=3 {
                let score = containment(answer, source, n).unwrap();
                assert!((0.0..=1.0).contains(&score), "answer {answer:?} n={n}");
            }
        }
    }

    #[test]
    fn short_answer_is_rejected() {
        let err = containment("two tokens", "a longer source text", 3).unwrap_err();
        assert!(matches!(err, PipelineError::DegenerateText { .. }));
    }

    #[test]
    fn zero_n_is_rejected() {
        let err = containment("some words", "more words", 0).unwrap_err();
        assert!(matches!(err, PipelineError::DegenerateText { .. }));
    }
}
