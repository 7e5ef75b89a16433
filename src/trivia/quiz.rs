use std::collections::HashSet;
use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::db::Question;

/// Source of the index used to pick the next quiz question.
pub trait RandomSource: Send + Sync {
    /// Index in `0..len`; `len` is never zero.
    fn index(&self, len: usize) -> usize;
}

/// Uniform choice backed by the thread-local generator.
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn index(&self, len: usize) -> usize {
        rand::thread_rng().gen_range(0..len)
    }
}

/// Uniform choice from a seeded generator, for reproducible sessions.
pub struct SeededRandom(Mutex<StdRng>);

impl SeededRandom {
    pub fn new(seed: u64) -> SeededRandom {
        SeededRandom(Mutex::new(StdRng::seed_from_u64(seed)))
    }
}

impl RandomSource for SeededRandom {
    fn index(&self, len: usize) -> usize {
        let mut rng = self.0.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        rng.gen_range(0..len)
    }
}

/// Questions of the category the player has not seen yet, in their stored order.
pub fn unseen<'a>(questions: &'a [Question], previous: &[i64]) -> Vec<&'a Question> {
    let previous: HashSet<i64> = previous.iter().copied().collect();
    questions
        .iter()
        .filter(|question| !previous.contains(&question.id))
        .collect()
}

/// Picks the next question of a quiz session, or `None` once every question of
/// the category has been asked.
pub fn select_question<'a>(
    questions: &'a [Question],
    previous: &[i64],
    random: &dyn RandomSource,
) -> Option<&'a Question> {
    let candidates = unseen(questions, previous);
    if candidates.is_empty() {
        return None;
    }
    let index = random.index(candidates.len()) % candidates.len();
    Some(candidates[index])
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Last;

    impl RandomSource for Last {
        fn index(&self, len: usize) -> usize {
            len - 1
        }
    }

    fn question(id: i64) -> Question {
        Question {
            id,
            question: format!("Question {id}"),
            answer: "answer".to_owned(),
            category: 1,
            difficulty: 1,
        }
    }

    fn bank() -> Vec<Question> {
        (1..=5).map(question).collect()
    }

    #[test]
    fn never_repeats_previous_questions() {
        let bank = bank();
        let previous = [1, 3, 5];
        for _ in 0..100 {
            let picked = select_question(&bank, &previous, &ThreadRandom).unwrap();
            assert!([2, 4].contains(&picked.id));
        }
    }

    #[test]
    fn exhausted_category_yields_nothing() {
        let bank = bank();
        assert!(select_question(&bank, &[1, 2, 3, 4, 5], &ThreadRandom).is_none());
        assert!(select_question(&[], &[], &ThreadRandom).is_none());
    }

    #[test]
    fn unknown_previous_ids_are_ignored() {
        let bank = vec![question(1)];
        let picked = select_question(&bank, &[42, 43], &ThreadRandom).unwrap();
        assert_eq!(picked.id, 1);
    }

    #[test]
    fn deterministic_source_picks_exactly() {
        let bank = bank();
        let picked = select_question(&bank, &[5], &Last).unwrap();
        assert_eq!(picked.id, 4);
    }

    #[test]
    fn a_session_walks_through_every_question_once() {
        let bank = bank();
        let random = SeededRandom::new(7);
        let mut previous = Vec::new();
        while let Some(picked) = select_question(&bank, &previous, &random) {
            assert!(!previous.contains(&picked.id));
            previous.push(picked.id);
        }
        previous.sort();
        assert_eq!(previous, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn same_seed_same_sequence() {
        let bank = bank();
        let first = SeededRandom::new(11);
        let second = SeededRandom::new(11);
        for _ in 0..10 {
            assert_eq!(
                select_question(&bank, &[], &first).map(|q| q.id),
                select_question(&bank, &[], &second).map(|q| q.id)
            );
        }
    }
}
