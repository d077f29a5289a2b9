//! N-gram extraction over token sequences.

use std::collections::HashMap;

use crate::error::{BleuError, Result};

/// Highest n-gram order BLEU looks at.
pub const MAX_NGRAM: usize = 4;

/// An ordered run of tokens. N-grams of different orders never compare equal,
/// so all orders can share one table.
pub type Ngram = Vec<String>;

pub type NgramCounts = HashMap<Ngram, usize>;

/// Counts every contiguous n-gram of `tokens` for each order in
/// `min_order..=max_order`.
///
/// A sequence shorter than `n` contributes nothing for that order, so an
/// empty sequence yields an empty table.
///
/// # Errors
///
/// [`BleuError::InvalidOrder`] unless `1 <= min_order <= max_order <= 4`.
pub fn count_ngrams<S: AsRef<str>>(
    tokens: &[S],
    min_order: usize,
    max_order: usize,
) -> Result<NgramCounts> {
    if min_order < 1 || min_order > max_order || max_order > MAX_NGRAM {
        return Err(BleuError::InvalidOrder {
            min: min_order,
            max: max_order,
        });
    }

    let mut counts = NgramCounts::new();
    for n in min_order..=max_order {
        for window in tokens.windows(n) {
            let ngram: Ngram = window.iter().map(|t| t.as_ref().to_string()).collect();
            *counts.entry(ngram).or_insert(0) += 1;
        }
    }

    Ok(counts)
}
