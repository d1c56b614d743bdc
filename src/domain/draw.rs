//! Draw engine: unbiased selection without replacement.
//!
//! A draw shuffles the remaining pool with a Fisher–Yates shuffle and takes the
//! first `pick_count` ids of the permutation. Every remaining entrant is equally
//! likely to be picked, independent of earlier draws in the session.
//!
//! The random source is a parameter so callers can seed it in tests.

use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;

/// Result of a single draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draw {
    /// Ids picked by this draw, in shuffle order.
    pub picked: Vec<String>,
    /// The pool with every picked id removed.
    pub remaining: Vec<String>,
}

/// Clamps a requested pick count to `[1, max(1, remaining)]`.
///
/// Accepts any signed value so raw user input can be passed straight through.
///
/// ```
/// use whosnext::domain::clamp_pick_count;
///
/// assert_eq!(clamp_pick_count(5, 3), 3);
/// assert_eq!(clamp_pick_count(0, 3), 1);
/// assert_eq!(clamp_pick_count(-4, 3), 1);
/// assert_eq!(clamp_pick_count(2, 0), 1);
/// ```
#[must_use]
pub fn clamp_pick_count(requested: i64, remaining: usize) -> usize {
    let max = remaining.max(1);
    usize::try_from(requested.max(1)).map_or(max, |n| n.min(max))
}

/// Normalizes free-form pick count input against the current pool size.
///
/// The text is read as a number; anything non-numeric (including the empty
/// string) becomes 1, fractions are floored, and the result is clamped.
///
/// ```
/// use whosnext::domain::normalize_pick_input;
///
/// assert_eq!(normalize_pick_input("2", 10), 2);
/// assert_eq!(normalize_pick_input(" 2.9 ", 10), 2);
/// assert_eq!(normalize_pick_input("lots", 10), 1);
/// assert_eq!(normalize_pick_input("40", 10), 10);
/// ```
#[must_use]
pub fn normalize_pick_input(raw: &str, remaining: usize) -> usize {
    let value = raw.trim().parse::<f64>().ok().filter(|v| v.is_finite());
    let Some(value) = value else {
        return 1;
    };

    // `as` saturates at the i64 bounds, which the clamp below absorbs.
    #[allow(clippy::cast_possible_truncation)]
    let floored = value.floor() as i64;
    clamp_pick_count(floored, remaining)
}

/// Draws up to `pick_count` ids from `remaining` uniformly at random.
///
/// Returns `None` when the pool is empty (the exhausted condition). The pick
/// count is clamped to `[1, remaining.len()]` regardless of what the caller
/// passes.
///
/// # Examples
///
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
/// use whosnext::domain::draw;
///
/// let pool = vec!["01".to_string(), "02".to_string(), "03".to_string()];
/// let mut rng = StdRng::seed_from_u64(7);
///
/// let result = draw(&pool, 2, &mut rng).unwrap();
/// assert_eq!(result.picked.len(), 2);
/// assert_eq!(result.remaining.len(), 1);
///
/// assert!(draw(&[], 1, &mut rng).is_none());
/// ```
pub fn draw<R: Rng + ?Sized>(remaining: &[String], pick_count: usize, rng: &mut R) -> Option<Draw> {
    if remaining.is_empty() {
        tracing::debug!("draw requested on an exhausted pool");
        return None;
    }

    let count = pick_count.clamp(1, remaining.len());

    let mut permutation = remaining.to_vec();
    permutation.shuffle(rng);
    permutation.truncate(count);

    let picked_set: HashSet<&str> = permutation.iter().map(String::as_str).collect();
    let left: Vec<String> = remaining
        .iter()
        .filter(|id| !picked_set.contains(id.as_str()))
        .cloned()
        .collect();

    tracing::debug!(
        requested = pick_count,
        picked = count,
        remaining = left.len(),
        "draw complete"
    );

    Some(Draw {
        picked: permutation,
        remaining: left,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn pool(n: usize) -> Vec<String> {
        (1..=n).map(crate::domain::format_number).collect()
    }

    #[test]
    fn clamp_law_holds_across_ranges() {
        for remaining in 1..=12usize {
            for requested in -3i64..=20 {
                let expected = requested.clamp(1, remaining as i64) as usize;
                assert_eq!(clamp_pick_count(requested, remaining), expected);
            }
        }
        assert_eq!(clamp_pick_count(i64::MAX, 4), 4);
        assert_eq!(clamp_pick_count(i64::MIN, 4), 1);
    }

    #[test]
    fn engine_clamps_pick_count_defensively() {
        let mut rng = StdRng::seed_from_u64(1);
        let ids = pool(4);

        let zero = draw(&ids, 0, &mut rng).unwrap();
        assert_eq!(zero.picked.len(), 1);

        let huge = draw(&ids, 99, &mut rng).unwrap();
        assert_eq!(huge.picked.len(), 4);
        assert!(huge.remaining.is_empty());
    }

    #[test]
    fn picked_and_remaining_partition_the_pool() {
        let mut rng = StdRng::seed_from_u64(42);
        let ids = pool(10);
        let result = draw(&ids, 4, &mut rng).unwrap();

        let mut all: Vec<String> = result.picked.iter().chain(&result.remaining).cloned().collect();
        all.sort();
        assert_eq!(all, ids);

        let unique: HashSet<&String> = result.picked.iter().collect();
        assert_eq!(unique.len(), 4);
    }

    #[test]
    fn remaining_keeps_original_relative_order() {
        let mut rng = StdRng::seed_from_u64(9);
        let ids = pool(8);
        let result = draw(&ids, 3, &mut rng).unwrap();

        let positions: Vec<usize> = result
            .remaining
            .iter()
            .map(|id| ids.iter().position(|x| x == id).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn empty_pool_reports_exhausted() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(draw(&[], 3, &mut rng).is_none());
    }

    #[test]
    fn single_picks_are_roughly_uniform() {
        let mut rng = StdRng::seed_from_u64(2024);
        let ids = pool(4);
        let mut counts = [0usize; 4];

        for _ in 0..8000 {
            let result = draw(&ids, 1, &mut rng).unwrap();
            let index = ids.iter().position(|id| *id == result.picked[0]).unwrap();
            counts[index] += 1;
        }

        // Expected 2000 each; a fair shuffle stays well inside this band.
        for count in counts {
            assert!((1700..=2300).contains(&count), "skewed counts: {counts:?}");
        }
    }

    #[test]
    fn pick_input_normalization() {
        assert_eq!(normalize_pick_input("", 5), 1);
        assert_eq!(normalize_pick_input("NaN", 5), 1);
        assert_eq!(normalize_pick_input("inf", 5), 1);
        assert_eq!(normalize_pick_input("-2", 5), 1);
        assert_eq!(normalize_pick_input("0.5", 5), 1);
        assert_eq!(normalize_pick_input("3", 5), 3);
        assert_eq!(normalize_pick_input("1e9", 5), 5);
        assert_eq!(normalize_pick_input("4", 0), 1);
    }
}
