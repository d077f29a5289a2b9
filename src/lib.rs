//! Corpus-level BLEU scoring against one or more parallel reference
//! translations.
//!
//! ```
//! use bleu_evaluator::Bleu;
//!
//! let bleu = Bleu::new(&["The cat sat on the mat."]).unwrap();
//! let score = bleu.score("the cat sat on the mat").unwrap();
//! assert_eq!(score.to_string(), "BLEU = 100.00");
//! ```

pub mod bleu;
pub mod error;
pub mod ngram;
pub mod read;
pub mod score;
pub mod stats;
pub mod tokenize;

//re-exports
pub use bleu::{brevity_penalty, compute_bleu, floor_log, Bleu};
pub use error::{BleuError, Result};
pub use ngram::{count_ngrams, Ngram, NgramCounts, MAX_NGRAM};
pub use score::BleuScore;
pub use stats::{closest_len, HypothesisStats, ReferenceStats};
pub use tokenize::{Tokenizer, UnicodeTokenizer};
