// Normalized longest-common-subsequence word overlap.
//
// Classic dynamic program over the two token sequences. The table is
// (source+1) x (answer+1) conceptually; only two rows are live at a time,
// so memory stays O(answer). Time is O(source * answer) per pair, which
// is the pipeline's asymptotic hot path if documents ever grow beyond
// short answers.

use crate::corpus::Corpus;
use crate::error::PipelineError;

/// Normalized LCS of words between an answer and its source, in [0, 1]:
/// LCS length divided by the answer's token count.
///
/// An empty answer has no defined score and is rejected rather than
/// silently returning NaN.
pub fn lcs_norm(answer: &str, source: &str) -> Result<f64, PipelineError> {
    let answer_tokens: Vec<&str> = answer.split_whitespace().collect();
    let source_tokens: Vec<&str> = source.split_whitespace().collect();

    if answer_tokens.is_empty() {
        return Err(PipelineError::DegenerateText {
            detail: "answer text has no tokens".to_string(),
        });
    }

    let width = answer_tokens.len() + 1;
    let mut prev = vec![0usize; width];
    let mut curr = vec![0usize; width];

    for src_token in &source_tokens {
        for (j, ans_token) in answer_tokens.iter().enumerate() {
            curr[j + 1] = if src_token == ans_token {
                prev[j] + 1
            } else {
                prev[j + 1].max(curr[j])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    let lcs_len = prev[answer_tokens.len()];
    Ok(lcs_len as f64 / answer_tokens.len() as f64)
}

/// Normalized LCS for a catalog answer file against its task's source.
pub fn lcs_for(corpus: &Corpus, file: &str) -> Result<f64, PipelineError> {
    let record = corpus.get(file)?;
    let source = corpus.source_for(&record.task)?;
    lcs_norm(&record.text, &source.text).map_err(|e| e.for_file(file))
}
