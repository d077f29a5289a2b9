//! Sufficient statistics for BLEU: reference ceilings and clipped hypothesis
//! counts.

use crate::error::{BleuError, Result};
use crate::ngram::{count_ngrams, NgramCounts, MAX_NGRAM};
use crate::tokenize::Tokenizer;

/// Returns the entry of `lens` numerically closest to `len`.
///
/// Ties resolve to the earliest entry, so the result only depends on the
/// order of `lens`. `None` when `lens` is empty.
pub fn closest_len(len: usize, lens: &[usize]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for &candidate in lens {
        match best {
            Some(b) if b.abs_diff(len) <= candidate.abs_diff(len) => {}
            _ => best = Some(candidate),
        }
    }
    best
}

/// Statistics of the parallel references at one document position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceStats {
    lens: Vec<usize>,
    ngram_counts: NgramCounts,
}

impl ReferenceStats {
    /// Tokenizes every parallel reference, records its length and keeps, for
    /// each n-gram, the highest count seen in any single reference.
    pub fn compute<S, T>(refs: &[S], tokenizer: &T) -> Result<Self>
    where
        S: AsRef<str>,
        T: Tokenizer + ?Sized,
    {
        if refs.is_empty() {
            return Err(BleuError::EmptyCorpus);
        }

        let mut stats = Self::default();
        for reference in refs {
            let tokens = tokenizer.word_tokenize(reference.as_ref());
            stats.lens.push(tokens.len());

            let counts = count_ngrams(&tokens, 1, MAX_NGRAM)?;
            if stats.ngram_counts.is_empty() {
                stats.ngram_counts = counts;
                continue;
            }
            for (ngram, count) in counts {
                let ceiling = stats.ngram_counts.entry(ngram).or_insert(0);
                *ceiling = (*ceiling).max(count);
            }
        }

        Ok(stats)
    }

    /// Token count of each parallel reference, in input order.
    pub fn lens(&self) -> &[usize] {
        &self.lens
    }

    pub fn ngram_counts(&self) -> &NgramCounts {
        &self.ngram_counts
    }
}

/// Clipped n-gram matches of a hypothesis, for one sentence or a whole
/// document once merged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HypothesisStats {
    pub hyp_len: usize,
    pub ref_len: usize,
    pub correct: [usize; MAX_NGRAM],
    pub total: [usize; MAX_NGRAM],
}

impl HypothesisStats {
    /// Scores one hypothesis sentence against the references at its position.
    ///
    /// Each hypothesis n-gram is credited at most as often as it appears in
    /// the best-matching reference.
    pub fn compute<T>(sentence: &str, ref_stats: &ReferenceStats, tokenizer: &T) -> Result<Self>
    where
        T: Tokenizer + ?Sized,
    {
        let tokens = tokenizer.word_tokenize(sentence);
        let counts = count_ngrams(&tokens, 1, MAX_NGRAM)?;
        let ref_len = closest_len(tokens.len(), ref_stats.lens()).ok_or(BleuError::EmptyCorpus)?;

        let mut correct = [0; MAX_NGRAM];
        let mut total = [0; MAX_NGRAM];
        for (ngram, count) in &counts {
            let i = ngram.len() - 1;
            total[i] += count;
            if let Some(ceiling) = ref_stats.ngram_counts().get(ngram) {
                correct[i] += (*count).min(*ceiling);
            }
        }

        Ok(Self {
            hyp_len: tokens.len(),
            ref_len,
            correct,
            total,
        })
    }

    /// Component-wise sum. Associative and commutative, with
    /// `HypothesisStats::default()` as identity.
    pub fn merge(self, other: Self) -> Self {
        let mut correct = self.correct;
        let mut total = self.total;
        for i in 0..MAX_NGRAM {
            correct[i] += other.correct[i];
            total[i] += other.total[i];
        }

        Self {
            hyp_len: self.hyp_len + other.hyp_len,
            ref_len: self.ref_len + other.ref_len,
            correct,
            total,
        }
    }
}
