// src/selector.rs

//! Quiz question selection.
//!
//! A quiz session is held entirely by the client: each request carries the ids
//! already served and an optional category. Selection draws one unseen
//! question uniformly at random and signals the end of the session once the
//! candidate set is exhausted.

use std::collections::HashSet;

use crate::{models::question::Question, utils::random::Chooser};

/// Outcome of one quiz turn.
#[derive(Debug, Clone)]
pub struct QuizTurn {
    /// The history including the question just served.
    pub previous_questions: Vec<i64>,
    pub question: Option<Question>,
    pub force_end: bool,
}

/// Picks the next question for a session.
///
/// `pool` may contain questions outside the category or already seen; both
/// are filtered out here before choosing.
pub fn next_question(
    pool: Vec<Question>,
    mut previous_questions: Vec<i64>,
    category: Option<i64>,
    chooser: &dyn Chooser,
) -> QuizTurn {
    let seen: HashSet<i64> = previous_questions.iter().copied().collect();

    let mut candidates: Vec<Question> = pool
        .into_iter()
        .filter(|q| !seen.contains(&q.id))
        .filter(|q| category.is_none_or(|c| q.category == c))
        .collect();

    if candidates.is_empty() {
        return QuizTurn {
            previous_questions,
            question: None,
            force_end: true,
        };
    }

    let index = chooser.pick(candidates.len()).min(candidates.len() - 1);
    let question = candidates.swap_remove(index);
    previous_questions.push(question.id);

    QuizTurn {
        previous_questions,
        question: Some(question),
        force_end: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::random::ThreadRngChooser;

    struct First;

    impl Chooser for First {
        fn pick(&self, _len: usize) -> usize {
            0
        }
    }

    struct Last;

    impl Chooser for Last {
        fn pick(&self, len: usize) -> usize {
            len - 1
        }
    }

    fn question(id: i64, category: i64) -> Question {
        Question {
            id,
            question: format!("test question {}", id),
            answer: format!("test answer {}", id),
            category,
            difficulty: 1,
        }
    }

    fn pool() -> Vec<Question> {
        vec![
            question(1, 1),
            question(2, 2),
            question(3, 3),
            question(4, 3),
            question(5, 1),
        ]
    }

    #[test]
    fn test_skips_previous_questions() {
        let turn = next_question(
            vec![question(1, 1), question(2, 2)],
            vec![1],
            None,
            &First,
        );

        assert!(!turn.force_end);
        assert_eq!(turn.question.map(|q| q.id), Some(2));
        assert_eq!(turn.previous_questions, vec![1, 2]);
    }

    #[test]
    fn test_exhausted_pool_forces_end() {
        let turn = next_question(
            vec![question(1, 1), question(2, 2)],
            vec![1, 2],
            None,
            &First,
        );

        assert!(turn.force_end);
        assert!(turn.question.is_none());
        assert_eq!(turn.previous_questions, vec![1, 2]);
    }

    #[test]
    fn test_empty_pool_forces_end() {
        let turn = next_question(Vec::new(), Vec::new(), None, &ThreadRngChooser);
        assert!(turn.force_end);
        assert!(turn.previous_questions.is_empty());
    }

    #[test]
    fn test_never_repeats_until_exhausted() {
        let mut previous = Vec::new();
        for _ in 0..5 {
            let turn = next_question(pool(), previous.clone(), None, &ThreadRngChooser);
            assert!(!turn.force_end);
            let id = turn.question.expect("question").id;
            assert!(!previous.contains(&id));
            previous = turn.previous_questions;
        }

        let mut sorted = previous.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, vec![1, 2, 3, 4, 5]);

        let last = next_question(pool(), previous, None, &ThreadRngChooser);
        assert!(last.force_end);
    }

    #[test]
    fn test_category_filter() {
        let mut previous = Vec::new();
        for _ in 0..2 {
            let turn = next_question(pool(), previous, Some(3), &Last);
            let chosen = turn.question.expect("question");
            assert_eq!(chosen.category, 3);
            previous = turn.previous_questions;
        }
        let mut sorted = previous.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, vec![3, 4]);

        let done = next_question(pool(), previous, Some(3), &Last);
        assert!(done.force_end);
    }

    #[test]
    fn test_unknown_category_forces_end() {
        let turn = next_question(pool(), Vec::new(), Some(42), &First);
        assert!(turn.force_end);
    }

    #[test]
    fn test_chooser_decides_among_candidates() {
        let first = next_question(pool(), vec![1], None, &First);
        let last = next_question(pool(), vec![1], None, &Last);
        assert_ne!(first.question.as_ref().map(|q| q.id), Some(1));
        assert_ne!(last.question.as_ref().map(|q| q.id), Some(1));
        assert_eq!(last.question.as_ref().map(|q| q.id), Some(5));
    }

    #[test]
    fn test_out_of_range_choice_is_clamped() {
        struct Wild;
        impl Chooser for Wild {
            fn pick(&self, _len: usize) -> usize {
                usize::MAX
            }
        }

        let turn = next_question(vec![question(7, 1)], Vec::new(), None, &Wild);
        assert_eq!(turn.question.map(|q| q.id), Some(7));
    }
}
