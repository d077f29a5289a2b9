//! Corpus-level BLEU engine.

use log::{debug, trace};
use rayon::prelude::*;

use crate::error::{BleuError, Result};
use crate::ngram::MAX_NGRAM;
use crate::score::BleuScore;
use crate::stats::{HypothesisStats, ReferenceStats};
use crate::tokenize::{Tokenizer, UnicodeTokenizer};

/// Stand-in for `ln(0)`. Keeps the geometric mean finite, so a zero precision
/// drives the score to zero instead of NaN.
pub const LOG_ZERO: f64 = -1_000_000_000.0;

/// Natural logarithm with `floor_log(0) == LOG_ZERO`.
pub fn floor_log(x: f64) -> f64 {
    if x == 0.0 {
        LOG_ZERO
    } else {
        x.ln()
    }
}

/// Brevity penalty for a corpus of `hyp_len` tokens against `ref_len`
/// reference tokens.
///
/// # Errors
///
/// [`BleuError::EmptyHypothesis`] when `hyp_len` is zero and therefore not
/// longer than the reference.
pub fn brevity_penalty(hyp_len: usize, ref_len: usize) -> Result<f64> {
    if hyp_len > ref_len {
        return Ok(1.0);
    }
    if hyp_len == 0 {
        return Err(BleuError::EmptyHypothesis);
    }
    Ok((1.0 - ref_len as f64 / hyp_len as f64).exp())
}

/// Turns aggregated clipped counts into the final score: uniform 1/4 weights
/// over the log precisions of orders 1 to 4, scaled by the brevity penalty.
pub fn compute_bleu(stats: &HypothesisStats) -> Result<BleuScore> {
    let mut precisions = [0.0; MAX_NGRAM];
    for n in 0..MAX_NGRAM {
        if stats.total[n] == 0 {
            continue;
        }
        precisions[n] = 100.0 * stats.correct[n] as f64 / stats.total[n] as f64;
    }

    let bp = brevity_penalty(stats.hyp_len, stats.ref_len)?;

    let log_sum: f64 = precisions.iter().map(|p| floor_log(p / 100.0)).sum();
    let score = bp * (log_sum / MAX_NGRAM as f64).exp();

    Ok(BleuScore {
        score,
        precisions,
        correct: stats.correct,
        total: stats.total,
        bp,
        hyp_len: stats.hyp_len,
        ref_len: stats.ref_len,
    })
}

/// BLEU scorer bound to a fixed reference corpus.
///
/// Reference statistics are computed once, per sentence position, and shared
/// read-only by every [`Bleu::score`] call.
#[derive(Debug, Clone)]
pub struct Bleu<T: Tokenizer = UnicodeTokenizer> {
    tokenizer: T,
    ref_cache: Vec<ReferenceStats>,
}

impl Bleu<UnicodeTokenizer> {
    /// Builds an engine from parallel reference documents using
    /// [`UnicodeTokenizer`].
    pub fn new<S: AsRef<str> + Sync>(references: &[S]) -> Result<Self> {
        Self::with_tokenizer(references, UnicodeTokenizer)
    }
}

impl<T: Tokenizer> Bleu<T> {
    /// Builds an engine from parallel reference documents.
    ///
    /// Every document must split into the same number of sentences; sentence
    /// `i` of each document is a translation of the same source sentence.
    pub fn with_tokenizer<S: AsRef<str> + Sync>(references: &[S], tokenizer: T) -> Result<Self> {
        let documents: Vec<Vec<String>> = references
            .iter()
            .map(|r| tokenizer.sentence_split(r.as_ref()))
            .collect();

        let expected = documents.first().ok_or(BleuError::EmptyCorpus)?.len();
        for (index, doc) in documents.iter().enumerate() {
            if doc.len() != expected {
                return Err(BleuError::ReferenceShapeMismatch {
                    index,
                    expected,
                    actual: doc.len(),
                });
            }
        }
        if expected == 0 {
            return Err(BleuError::EmptyCorpus);
        }

        let ref_cache = (0..expected)
            .into_par_iter()
            .map(|i| {
                let parallel: Vec<&str> = documents.iter().map(|d| d[i].as_str()).collect();
                ReferenceStats::compute(&parallel, &tokenizer)
            })
            .collect::<Result<Vec<_>>>()?;

        debug!(
            "built reference cache: {} documents, {} sentences",
            documents.len(),
            ref_cache.len()
        );

        Ok(Self {
            tokenizer,
            ref_cache,
        })
    }

    /// Number of sentence positions in the reference corpus.
    pub fn len(&self) -> usize {
        self.ref_cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ref_cache.is_empty()
    }

    pub fn reference_stats(&self) -> &[ReferenceStats] {
        &self.ref_cache
    }

    /// Scores a hypothesis document against the reference corpus.
    ///
    /// # Errors
    ///
    /// [`BleuError::SentenceCountMismatch`] when the hypothesis does not split
    /// into as many sentences as the references, and
    /// [`BleuError::EmptyHypothesis`] when it has no tokens at all.
    pub fn score(&self, hypothesis: &str) -> Result<BleuScore> {
        let sentences = self.tokenizer.sentence_split(hypothesis);
        if sentences.len() != self.ref_cache.len() {
            return Err(BleuError::SentenceCountMismatch {
                expected: self.ref_cache.len(),
                actual: sentences.len(),
            });
        }

        let stats = sentences
            .par_iter()
            .zip(self.ref_cache.par_iter())
            .map(|(sentence, refs)| -> Result<HypothesisStats> {
                let stats = HypothesisStats::compute(sentence, refs, &self.tokenizer)?;
                trace!("{sentence:?}: {stats:?}");
                Ok(stats)
            })
            .try_reduce(HypothesisStats::default, |a, b| Ok(a.merge(b)))?;

        debug!(
            "scored {} sentences: hyp_len={}, ref_len={}, correct={:?}, total={:?}",
            sentences.len(),
            stats.hyp_len,
            stats.ref_len,
            stats.correct,
            stats.total
        );

        compute_bleu(&stats)
    }

    /// Alias of [`Bleu::score`].
    pub fn corpus_score(&self, hypothesis: &str) -> Result<BleuScore> {
        self.score(hypothesis)
    }
}
