//! Picks the next quiz question a player has not seen yet.

use std::collections::HashSet;

use rand::seq::IteratorRandom;
use rand::Rng;

use crate::db::Question;

/// Category id that stands for "every category".
pub const ALL_CATEGORIES: i64 = 0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Next(Question),
    /// Every question in the pool has already been served.
    Exhausted,
}

/// Chooses uniformly among the questions in `pool` whose id is not in
/// `previous`. Runs in a single pass over the pool.
pub fn select_next<R>(pool: Vec<Question>, previous: &HashSet<i64>, rng: &mut R) -> Selection
where
    R: Rng + ?Sized,
{
    pool.into_iter()
        .filter(|question| !previous.contains(&question.id))
        .choose(rng)
        .map_or(Selection::Exhausted, Selection::Next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn question(id: i64) -> Question {
        Question {
            id,
            question: format!("Question {id}?"),
            answer: format!("Answer {id}"),
            category: 1,
            difficulty: 1,
        }
    }

    fn pool(ids: impl IntoIterator<Item = i64>) -> Vec<Question> {
        ids.into_iter().map(question).collect()
    }

    #[test]
    fn empty_pool_is_exhausted() {
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(
            select_next(Vec::new(), &HashSet::new(), &mut rng),
            Selection::Exhausted
        );
    }

    #[test]
    fn no_history_picks_from_whole_pool() {
        let mut rng = StdRng::seed_from_u64(7);
        let ids: HashSet<i64> = (1..=5).collect();
        for _ in 0..50 {
            match select_next(pool(1..=5), &HashSet::new(), &mut rng) {
                Selection::Next(q) => assert!(ids.contains(&q.id)),
                Selection::Exhausted => panic!("pool is not empty"),
            }
        }
    }

    #[test]
    fn never_repeats_previous_questions() {
        let mut rng = StdRng::seed_from_u64(11);
        let previous: HashSet<i64> = [1, 2, 3, 5, 8].into_iter().collect();
        for _ in 0..200 {
            match select_next(pool(1..=10), &previous, &mut rng) {
                Selection::Next(q) => assert!(!previous.contains(&q.id)),
                Selection::Exhausted => panic!("unseen questions remain"),
            }
        }
    }

    #[test]
    fn last_unseen_question_is_always_chosen() {
        let mut rng = StdRng::seed_from_u64(3);
        let previous: HashSet<i64> = (1..100).collect();
        assert_eq!(
            select_next(pool(1..=100), &previous, &mut rng),
            Selection::Next(question(100))
        );
    }

    #[test]
    fn fully_seen_pool_is_exhausted() {
        let mut rng = StdRng::seed_from_u64(3);
        let previous: HashSet<i64> = (1..=4).chain([42]).collect();
        assert_eq!(
            select_next(pool(1..=4), &previous, &mut rng),
            Selection::Exhausted
        );
    }

    #[test]
    fn ids_outside_the_pool_are_ignored() {
        let mut rng = StdRng::seed_from_u64(5);
        let previous: HashSet<i64> = [100, 200].into_iter().collect();
        assert!(matches!(
            select_next(pool([1]), &previous, &mut rng),
            Selection::Next(q) if q.id == 1
        ));
    }

    #[test]
    fn every_unseen_question_is_reachable() {
        let mut rng = StdRng::seed_from_u64(99);
        let previous: HashSet<i64> = [2, 4].into_iter().collect();
        let mut seen = HashSet::new();
        for _ in 0..500 {
            if let Selection::Next(q) = select_next(pool(1..=6), &previous, &mut rng) {
                seen.insert(q.id);
            }
        }
        assert_eq!(seen, [1, 3, 5, 6].into_iter().collect());
    }
}
