// Text canonicalization: raw document contents to a space-separated
// token stream.
//
// Downstream scoring matches exact word sequences (n-gram containment,
// word-level LCS), so case and punctuation must not distinguish texts.
// Everything that is not a lowercase letter or digit collapses to a
// single space, which also folds tabs and newlines.

use std::sync::LazyLock;

use regex_lite::Regex;

static NOISE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("[^a-z0-9]+").expect("static pattern compiles"));

/// Canonicalize raw text. Pure; identical input always yields identical
/// output.
pub fn normalize(raw: &str) -> String {
    let lowered = raw.to_lowercase();
    NOISE.replace_all(&lowered, " ").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_strips_punctuation() {
        assert_eq!(
            normalize("This is a TEST!\n\tWith, punctuation."),
            "this is a test with punctuation"
        );
    }

    #[test]
    fn collapses_whitespace_runs() {
        assert_eq!(normalize("a   b\t\t\nc"), "a b c");
    }

    #[test]
    fn keeps_digits() {
        assert_eq!(normalize("PageRank-2 (beta)"), "pagerank 2 beta");
    }

    #[test]
    fn trims_edges() {
        assert_eq!(normalize("  hello world  "), "hello world");
    }

    #[test]
    fn empty_and_all_noise_become_empty() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("!!! ??? ..."), "");
    }

    #[test]
    fn non_ascii_collapses_to_space() {
        assert_eq!(normalize("naïve café"), "na ve caf");
    }
}
