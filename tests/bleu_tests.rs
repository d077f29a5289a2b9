use bleu_evaluator::{count_ngrams, Bleu, BleuError, ReferenceStats, Tokenizer, UnicodeTokenizer};
use rand::seq::SliceRandom;
use rand::SeedableRng;

const EPS: f64 = 1e-9;

const REFERENCES: [&str; 3] = [
    "It is a guide to action that ensures that the military will forever heed Party commands.",
    "It is the guiding principle which guarantees the military forces always being under the command of the Party.",
    "It is the practical guide for the army always to heed the directions of the party.",
];

const GOOD: &str =
    "It is a guide to action which ensures that the military always obeys the commands of the party.";
const BAD: &str =
    "It is to insure the troops forever hearing the activity guidebook that party direct.";

#[test]
fn test_better_candidate_scores_higher() {
    let bleu = Bleu::new(&REFERENCES).unwrap();
    let good = bleu.score(GOOD).unwrap();
    let bad = bleu.score(BAD).unwrap();

    assert!(good.score > bad.score);
    assert!(good.score > 0.0 && good.score < 1.0);
    assert_eq!(good.hyp_len, 18);
    assert_eq!(good.ref_len, 18);
    assert_eq!(good.bp, 1.0);
}

#[test]
fn test_reference_order_invariance() {
    let baseline = Bleu::new(&REFERENCES).unwrap();
    let expected = baseline.score(GOOD).unwrap();

    let mut rng = rand::rngs::StdRng::seed_from_u64(7);
    for _ in 0..10 {
        let mut shuffled = REFERENCES.to_vec();
        shuffled.shuffle(&mut rng);

        let bleu = Bleu::new(&shuffled).unwrap();
        let score = bleu.score(GOOD).unwrap();
        assert_eq!(score.precisions, expected.precisions);
        assert_eq!(score.correct, expected.correct);
        assert_eq!(score.total, expected.total);
        assert_eq!(score.score, expected.score);

        let ceilings = ReferenceStats::compute(&shuffled, &UnicodeTokenizer).unwrap();
        assert_eq!(
            ceilings.ngram_counts(),
            baseline.reference_stats()[0].ngram_counts()
        );
    }
}

#[test]
fn test_scoring_is_idempotent() {
    let bleu = Bleu::new(&REFERENCES).unwrap();
    let first = bleu.score(BAD).unwrap();
    let second = bleu.score(BAD).unwrap();

    assert_eq!(first, second);
    assert_eq!(first.score.to_bits(), second.score.to_bits());
}

#[test]
fn test_concurrent_scoring_on_shared_engine() {
    let bleu = Bleu::new(&REFERENCES).unwrap();
    let hypotheses = [GOOD, BAD, REFERENCES[0], REFERENCES[1]];
    let expected: Vec<_> = hypotheses.iter().map(|h| bleu.score(h).unwrap()).collect();

    std::thread::scope(|s| {
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let bleu = &bleu;
                let hypothesis = hypotheses[i % hypotheses.len()];
                s.spawn(move || (i, bleu.score(hypothesis).unwrap()))
            })
            .collect();

        for handle in handles {
            let (i, score) = handle.join().unwrap();
            let want = &expected[i % hypotheses.len()];
            assert_eq!(&score, want);
            assert_eq!(score.score.to_bits(), want.score.to_bits());
        }
    });
}

#[test]
fn test_perfect_match_against_one_of_many_references() {
    let bleu = Bleu::new(&REFERENCES).unwrap();
    let score = bleu.score(REFERENCES[2]).unwrap();

    assert_eq!(score.precisions, [100.0; 4]);
    assert_eq!(score.bp, 1.0);
    assert!((score.score - 1.0).abs() < EPS);
}

#[test]
fn test_multi_sentence_documents() {
    let references = [
        "The cat is on the mat.\nThe dog sleeps in the sun.",
        "There is a cat on the mat.\nA dog is sleeping in the sun.",
    ];
    let bleu = Bleu::new(&references).unwrap();
    assert_eq!(bleu.len(), 2);

    let score = bleu
        .score("The cat is on the mat.\nThe dog sleeps in the sun.")
        .unwrap();
    assert!((score.score - 1.0).abs() < EPS);

    let err = bleu.score("The cat is on the mat.").unwrap_err();
    assert_eq!(
        err,
        BleuError::SentenceCountMismatch {
            expected: 2,
            actual: 1,
        }
    );
}

#[test]
fn test_shorter_hypothesis_is_penalized() {
    let bleu = Bleu::new(&["the quick brown fox jumps over the lazy dog"]).unwrap();
    let full = bleu.score("the quick brown fox jumps over the lazy dog").unwrap();
    let short = bleu.score("the quick brown fox jumps").unwrap();

    assert_eq!(short.precisions, [100.0; 4]);
    assert!(short.bp < 1.0);
    assert!(short.score < full.score);
    assert!((short.score - short.bp).abs() < EPS);
}

#[test]
fn test_line_aligned_documents() {
    let bleu = Bleu::new(&["one two three\nfour five six"]).unwrap();
    let score = bleu.score("one two three\nfour five six").unwrap();
    assert_eq!(score.hyp_len, 6);
}

#[test]
fn test_custom_tokenizer() {
    struct Whitespace;

    impl Tokenizer for Whitespace {
        fn sentence_split(&self, text: &str) -> Vec<String> {
            text.lines()
                .filter(|l| !l.trim().is_empty())
                .map(str::to_string)
                .collect()
        }

        fn word_tokenize(&self, sentence: &str) -> Vec<String> {
            sentence.split_whitespace().map(str::to_string).collect()
        }
    }

    let bleu = Bleu::with_tokenizer(&["The Cat sat on the mat ."], Whitespace).unwrap();
    let score = bleu.score("the cat sat on the mat .").unwrap();

    assert_eq!(score.hyp_len, 7);
    assert_eq!(score.correct[0], 5);
    assert!(score.score < 1.0);
}

#[test]
fn test_invalid_order_rejected_before_counting() {
    let tokens = ["a", "b", "c", "d", "e"];
    assert_eq!(
        count_ngrams(&tokens, 1, 5),
        Err(BleuError::InvalidOrder { min: 1, max: 5 })
    );
}
