//! Error type shared by every scoring operation.

use thiserror::Error;

/// Failures surfaced by the BLEU engine. All of them are caused by malformed
/// input and are reported before any partial result is produced.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BleuError {
    /// Parallel reference documents split into different numbers of sentences.
    #[error("reference {index} has {actual} sentences, expected {expected}")]
    ReferenceShapeMismatch {
        index: usize,
        expected: usize,
        actual: usize,
    },

    /// The hypothesis does not line up with the reference positions.
    #[error("hypothesis has {actual} sentences, references have {expected}")]
    SentenceCountMismatch { expected: usize, actual: usize },

    /// Nothing to score against.
    #[error("reference corpus is empty")]
    EmptyCorpus,

    /// A hypothesis without tokens has no brevity penalty.
    #[error("hypothesis has no tokens")]
    EmptyHypothesis,

    #[error("invalid n-gram order range [{min}; {max}], orders must lie in [1; 4]")]
    InvalidOrder { min: usize, max: usize },
}

pub type Result<T> = std::result::Result<T, BleuError>;
