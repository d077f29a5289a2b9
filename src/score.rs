use std::fmt;

use crate::ngram::MAX_NGRAM;

/// Final corpus-level BLEU result.
///
/// `score` lies in `[0, 1]`; `precisions` are percentages.
#[derive(Debug, Clone, PartialEq)]
pub struct BleuScore {
    pub score: f64,
    pub precisions: [f64; MAX_NGRAM],
    pub correct: [usize; MAX_NGRAM],
    pub total: [usize; MAX_NGRAM],
    pub bp: f64,
    pub hyp_len: usize,
    pub ref_len: usize,
}

impl BleuScore {
    /// Hypothesis to reference length ratio.
    pub fn ratio(&self) -> f64 {
        self.hyp_len as f64 / self.ref_len as f64
    }

    /// Renders `BLEU = xx.xx` with `width` decimals, followed by the per-order
    /// precisions and length breakdown when `verbose` is set.
    pub fn format(&self, width: usize, verbose: bool) -> String {
        let text = format!("BLEU = {:.*}", width, 100.0 * self.score);
        if !verbose {
            return text;
        }

        let precisions = self
            .precisions
            .iter()
            .map(|p| format!("{p:.1}"))
            .collect::<Vec<_>>()
            .join("/");

        format!(
            "{} {} (BP = {:.3}, ratio = {:.3}, hyp_len = {}, ref_len = {})",
            text,
            precisions,
            self.bp,
            self.ratio(),
            self.hyp_len,
            self.ref_len
        )
    }
}

impl fmt::Display for BleuScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format(2, false))
    }
}
