use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::HashSet;
use std::hash::Hash;
use thiserror::Error;

/// Options offered per question: one correct answer plus three distractors.
pub const OPTIONS_PER_QUESTION: usize = 4;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizError {
    #[error("need {needed} distinct items for a question, got {available}")]
    InsufficientData { needed: usize, available: usize },
}

//
// ─── ITEM IDENTITY ─────────────────────────────────────────────────────────────
//

/// Identity contract the sampler needs from its items.
///
/// The sampler never looks at an item beyond its key; two items with equal
/// keys are the same item for distinctness purposes.
pub trait Keyed {
    type Key: Eq + Hash + Clone;

    fn key(&self) -> Self::Key;
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// One quiz round: the correct item plus shuffled answer options.
///
/// Construction guarantees the invariants: exactly
/// [`OPTIONS_PER_QUESTION`] options, no duplicate keys among them, and the
/// correct item appears exactly once.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizQuestion<T> {
    correct: T,
    options: Vec<T>,
}

impl<T: Keyed> QuizQuestion<T> {
    #[must_use]
    pub fn correct(&self) -> &T {
        &self.correct
    }

    #[must_use]
    pub fn options(&self) -> &[T] {
        &self.options
    }

    /// Whether the given answer key names the correct item.
    #[must_use]
    pub fn is_correct(&self, answer: &T::Key) -> bool {
        self.correct.key() == *answer
    }

    /// Index of the correct item within the shuffled options.
    ///
    /// # Panics
    ///
    /// Never panics: construction puts the correct item among the options.
    #[must_use]
    pub fn correct_position(&self) -> usize {
        let key = self.correct.key();
        self.options
            .iter()
            .position(|option| option.key() == key)
            .expect("correct item is always among the options")
    }
}

//
// ─── SAMPLING ──────────────────────────────────────────────────────────────────
//

/// Draw a question from the full item collection using the thread RNG.
///
/// # Errors
///
/// Returns [`QuizError::InsufficientData`] when the collection holds fewer
/// than [`OPTIONS_PER_QUESTION`] distinct keys; no partial question is
/// produced and the arity is never silently reduced.
pub fn draw_question<T>(items: &[T]) -> Result<QuizQuestion<T>, QuizError>
where
    T: Keyed + Clone,
{
    draw_question_with(items, &mut rand::rng())
}

/// Draw a question with a caller-supplied RNG, for deterministic tests.
///
/// The correct item is drawn uniformly by index. Distractors are collected
/// by rejection sampling: uniform index draws, accepted only when the key
/// has not been used yet (the correct key counts as used). Expected draws
/// stay near the arity for large collections and degrade toward O(n) as the
/// collection shrinks to the arity, which is fine for a small fixed arity.
///
/// The options are shuffled with a Fisher–Yates pass, so each of the `n!`
/// orderings is equally likely. Comparator-based "random sort" shuffles do
/// not satisfy that contract and are not acceptable here.
///
/// The input slice is never mutated; chosen items are cloned out.
///
/// # Errors
///
/// Returns [`QuizError::InsufficientData`] when fewer than
/// [`OPTIONS_PER_QUESTION`] distinct keys exist. Counting distinct keys
/// (rather than slice length) is also what keeps the rejection loop finite.
pub fn draw_question_with<T, R>(items: &[T], rng: &mut R) -> Result<QuizQuestion<T>, QuizError>
where
    T: Keyed + Clone,
    R: Rng + ?Sized,
{
    let available = distinct_keys(items);
    if available < OPTIONS_PER_QUESTION {
        return Err(QuizError::InsufficientData {
            needed: OPTIONS_PER_QUESTION,
            available,
        });
    }

    let correct = items[rng.random_range(0..items.len())].clone();

    let mut used: HashSet<T::Key> = HashSet::with_capacity(OPTIONS_PER_QUESTION);
    used.insert(correct.key());

    let mut options: Vec<T> = Vec::with_capacity(OPTIONS_PER_QUESTION);
    options.push(correct.clone());
    while options.len() < OPTIONS_PER_QUESTION {
        let candidate = &items[rng.random_range(0..items.len())];
        if used.insert(candidate.key()) {
            options.push(candidate.clone());
        }
    }

    options.shuffle(rng);

    Ok(QuizQuestion { correct, options })
}

fn distinct_keys<T: Keyed>(items: &[T]) -> usize {
    items.iter().map(Keyed::key).collect::<HashSet<_>>().len()
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashMap;

    #[derive(Debug, Clone, PartialEq)]
    struct Flag {
        code: &'static str,
    }

    impl Keyed for Flag {
        type Key = &'static str;

        fn key(&self) -> Self::Key {
            self.code
        }
    }

    fn flags(codes: &[&'static str]) -> Vec<Flag> {
        codes.iter().map(|code| Flag { code }).collect()
    }

    #[test]
    fn question_has_fixed_arity_and_distinct_keys() {
        let items = flags(&["DE", "FR", "JP", "BR", "NO", "KE"]);
        let mut rng = StdRng::seed_from_u64(1);

        for _ in 0..200 {
            let question = draw_question_with(&items, &mut rng).unwrap();
            assert_eq!(question.options().len(), OPTIONS_PER_QUESTION);

            let keys: HashSet<_> = question.options().iter().map(Keyed::key).collect();
            assert_eq!(keys.len(), OPTIONS_PER_QUESTION, "duplicate option keys");
            assert!(keys.contains(question.correct().key()));
        }
    }

    #[test]
    fn correct_item_comes_from_the_collection() {
        let items = flags(&["DE", "FR", "JP", "BR"]);
        let mut rng = StdRng::seed_from_u64(2);

        let question = draw_question_with(&items, &mut rng).unwrap();
        assert!(items.contains(question.correct()));
        assert_eq!(
            question.options()[question.correct_position()].key(),
            question.correct().key()
        );
    }

    #[test]
    fn too_few_items_fail_without_partial_result() {
        let items = flags(&["DE", "FR", "JP"]);
        let err = draw_question_with(&items, &mut StdRng::seed_from_u64(3)).unwrap_err();
        assert_eq!(
            err,
            QuizError::InsufficientData {
                needed: 4,
                available: 3
            }
        );

        let err = draw_question_with(&flags(&[]), &mut StdRng::seed_from_u64(3)).unwrap_err();
        assert!(matches!(err, QuizError::InsufficientData { available: 0, .. }));
    }

    #[test]
    fn duplicate_keys_count_as_one_item() {
        // Six entries but only three identities; sampling four distinct
        // distractor keys would never terminate, so this must fail fast.
        let items = flags(&["DE", "DE", "FR", "FR", "JP", "JP"]);
        let err = draw_question_with(&items, &mut StdRng::seed_from_u64(4)).unwrap_err();
        assert_eq!(
            err,
            QuizError::InsufficientData {
                needed: 4,
                available: 3
            }
        );
    }

    #[test]
    fn exactly_four_distinct_items_use_all_of_them() {
        let items = flags(&["DE", "FR", "JP", "BR"]);
        let mut rng = StdRng::seed_from_u64(5);

        let question = draw_question_with(&items, &mut rng).unwrap();
        let keys: HashSet<_> = question.options().iter().map(Keyed::key).collect();
        assert_eq!(keys, ["DE", "FR", "JP", "BR"].into_iter().collect());
    }

    #[test]
    fn is_correct_matches_only_the_answer_key() {
        let items = flags(&["DE", "FR", "JP", "BR"]);
        let question = draw_question_with(&items, &mut StdRng::seed_from_u64(6)).unwrap();

        let correct_key = question.correct().key();
        assert!(question.is_correct(&correct_key));
        for option in question.options() {
            if option.key() != correct_key {
                assert!(!question.is_correct(&option.key()));
            }
        }
    }

    #[test]
    fn input_slice_is_left_untouched() {
        let items = flags(&["DE", "FR", "JP", "BR", "NO"]);
        let before = items.clone();
        let _ = draw_question_with(&items, &mut StdRng::seed_from_u64(7)).unwrap();
        assert_eq!(items, before);
    }

    // Statistical regression guards. Loose bounds: expected count is 1000
    // per bucket, standard deviation is under 30, so 850..1150 will not
    // flake for a fixed seed.

    #[test]
    fn correct_item_is_roughly_uniform() {
        let items = flags(&["DE", "FR", "JP", "BR", "NO", "KE"]);
        let mut rng = StdRng::seed_from_u64(42);

        let mut counts: HashMap<&str, usize> = HashMap::new();
        for _ in 0..6_000 {
            let question = draw_question_with(&items, &mut rng).unwrap();
            *counts.entry(question.correct().key()).or_default() += 1;
        }

        assert_eq!(counts.len(), items.len());
        for (code, count) in counts {
            assert!(
                (850..=1150).contains(&count),
                "correct frequency for {code} out of range: {count}"
            );
        }
    }

    #[test]
    fn correct_position_is_roughly_uniform() {
        let items = flags(&["DE", "FR", "JP", "BR", "NO", "KE"]);
        let mut rng = StdRng::seed_from_u64(43);

        let mut counts = [0usize; OPTIONS_PER_QUESTION];
        for _ in 0..4_000 {
            let question = draw_question_with(&items, &mut rng).unwrap();
            counts[question.correct_position()] += 1;
        }

        for (position, count) in counts.iter().enumerate() {
            assert!(
                (850..=1150).contains(count),
                "position {position} frequency out of range: {count}"
            );
        }
    }
}
