//! Semifinal elimination: random cuts from the top pool.

use runway_env::{draw_index, Competitor, RandomSource};
use serde::Serialize;

/// Who was cut and who remains.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SemifinalOutcome {
    /// Eliminated competitors, in the order they were cut
    pub eliminated: Vec<Competitor>,

    /// Everyone left, in residual pool order (not a ranking)
    pub finalists: Vec<Competitor>,
}

/// Cuts `cuts` competitors from `pool`, one uniform draw per cut.
///
/// The pool itself is never modified; removals happen on a working list of
/// slot indices and the finalists are materialized at the end.
///
/// # Panics
/// Panics if `cuts >= pool.len()`.
pub fn eliminate_semifinalists<R: RandomSource + ?Sized>(
    pool: &[Competitor],
    cuts: usize,
    rng: &mut R,
) -> SemifinalOutcome {
    assert!(
        cuts < pool.len(),
        "cannot cut {} from a pool of {}",
        cuts,
        pool.len()
    );

    let mut remaining: Vec<usize> = (0..pool.len()).collect();
    let mut eliminated = Vec::with_capacity(cuts);

    for _ in 0..cuts {
        let pick = draw_index(rng, remaining.len());
        let slot = remaining.remove(pick);
        eliminated.push(pool[slot].clone());
    }

    SemifinalOutcome {
        eliminated,
        finalists: remaining.into_iter().map(|slot| pool[slot].clone()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use runway_env::ReplayRng;

    fn pool() -> Vec<Competitor> {
        (1..=9).map(|i| Competitor::new(format!("P{}", i))).collect()
    }

    #[test]
    fn test_cuts_in_draw_order() {
        // 0.5 of 9 -> slot 4 (P5); 0.0 of 8 -> slot 0 (P1)
        let mut rng = ReplayRng::new(vec![0.5, 0.0]).unwrap();
        let outcome = eliminate_semifinalists(&pool(), 2, &mut rng);

        assert_eq!(
            outcome.eliminated,
            vec![Competitor::from("P5"), Competitor::from("P1")]
        );
        let finalists: Vec<&str> = outcome.finalists.iter().map(|c| c.name()).collect();
        assert_eq!(finalists, vec!["P2", "P3", "P4", "P6", "P7", "P8", "P9"]);
    }

    #[test]
    fn test_second_draw_uses_shrunken_pool() {
        // 0.99 of 9 -> P9; 0.99 of 8 -> slot 7 which is now P8
        let mut rng = ReplayRng::new(vec![0.99]).unwrap();
        let outcome = eliminate_semifinalists(&pool(), 2, &mut rng);
        assert_eq!(
            outcome.eliminated,
            vec![Competitor::from("P9"), Competitor::from("P8")]
        );
    }

    #[test]
    fn test_pool_untouched() {
        let pool = pool();
        let snapshot = pool.clone();
        let mut rng = || 0.3;
        let outcome = eliminate_semifinalists(&pool, 2, &mut rng);

        assert_eq!(pool, snapshot);
        assert_eq!(outcome.finalists.len(), 7);
        assert!(outcome.eliminated.iter().all(|c| !outcome.finalists.contains(c)));
    }

    #[test]
    #[should_panic]
    fn test_cutting_everyone_panics() {
        let mut rng = || 0.3;
        eliminate_semifinalists(&pool()[..2], 2, &mut rng);
    }
}
