//! Sentence and word segmentation consumed by the scorer.

use unicode_segmentation::UnicodeSegmentation;

/// Turns raw text into sentences and sentences into normalized tokens.
///
/// The scorer performs no normalization of its own: whatever `word_tokenize`
/// returns is compared verbatim.
pub trait Tokenizer: Send + Sync {
    fn sentence_split(&self, text: &str) -> Vec<String>;

    fn word_tokenize(&self, sentence: &str) -> Vec<String>;
}

/// UAX #29 segmentation with lowercased words and punctuation dropped.
///
/// Hard line breaks always end a sentence, so line-aligned corpora keep their
/// alignment even when a line lacks terminal punctuation.
///
/// A period followed by a lowercase word is not a boundary under UAX #29:
/// `"The cat sat. the dog ran."` stays one sentence. Put one sentence per line
/// when references and hypotheses are not consistently capitalized.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnicodeTokenizer;

impl Tokenizer for UnicodeTokenizer {
    fn sentence_split(&self, text: &str) -> Vec<String> {
        text.unicode_sentences()
            .map(str::trim)
            .filter(|s| s.unicode_words().next().is_some())
            .map(str::to_string)
            .collect()
    }

    fn word_tokenize(&self, sentence: &str) -> Vec<String> {
        sentence.unicode_words().map(str::to_lowercase).collect()
    }
}
