//! Finale: shuffled single-elimination bracket with byes.

use runway_env::{draw_index, Competitor, RandomSource};
use serde::Serialize;

/// Probability threshold below which the first paired competitor wins.
const FIRST_SLOT_WINS_BELOW: f64 = 0.5;

/// One pairing in a finale round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FinalePairing {
    pub first: Competitor,

    /// `None` for a bye
    pub second: Option<Competitor>,

    pub winner: Competitor,

    pub bye: bool,
}

/// All pairings of one finale round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FinaleRound {
    /// 1-based round number
    pub round: u32,

    /// Competitors entering the round, in pairing order
    pub entrants: Vec<Competitor>,

    pub pairings: Vec<FinalePairing>,
}

impl FinaleRound {
    /// Winners of this round, in pairing order.
    pub fn survivors(&self) -> Vec<Competitor> {
        self.pairings.iter().map(|p| p.winner.clone()).collect()
    }
}

/// The finale's rounds and its champion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FinaleResult {
    pub rounds: Vec<FinaleRound>,
    pub champion: Competitor,
}

/// Fisher-Yates over slot indices: from the last slot down to 1, swap with a
/// uniformly drawn slot at or below it.
fn shuffled_slots<R: RandomSource + ?Sized>(len: usize, rng: &mut R) -> Vec<usize> {
    let mut slots: Vec<usize> = (0..len).collect();
    for i in (1..len).rev() {
        let j = draw_index(rng, i + 1);
        slots.swap(i, j);
    }
    slots
}

/// Runs the finale over `finalists`.
///
/// Pairs are consecutive entries; an odd last entry advances on a bye. Each
/// real pairing costs one draw. Survivors keep pairing order into the next
/// round, with no reshuffle.
///
/// # Panics
/// Panics if `finalists` is empty.
pub fn run_finale<R: RandomSource + ?Sized>(finalists: &[Competitor], rng: &mut R) -> FinaleResult {
    assert!(!finalists.is_empty(), "finale needs at least one finalist");

    let mut alive = shuffled_slots(finalists.len(), rng);
    let mut rounds = Vec::new();

    while alive.len() > 1 {
        let mut pairings = Vec::with_capacity(alive.len().div_ceil(2));
        let mut next = Vec::with_capacity(pairings.capacity());

        for pair in alive.chunks(2) {
            match *pair {
                [a, b] => {
                    let winner = if rng.next_f64() < FIRST_SLOT_WINS_BELOW { a } else { b };
                    pairings.push(FinalePairing {
                        first: finalists[a].clone(),
                        second: Some(finalists[b].clone()),
                        winner: finalists[winner].clone(),
                        bye: false,
                    });
                    next.push(winner);
                }
                [a] => {
                    pairings.push(FinalePairing {
                        first: finalists[a].clone(),
                        second: None,
                        winner: finalists[a].clone(),
                        bye: true,
                    });
                    next.push(a);
                }
                _ => unreachable!("chunks(2) yields one or two slots"),
            }
        }

        rounds.push(FinaleRound {
            round: rounds.len() as u32 + 1,
            entrants: alive.iter().map(|&slot| finalists[slot].clone()).collect(),
            pairings,
        });
        alive = next;
    }

    FinaleResult {
        rounds,
        champion: finalists[alive[0]].clone(),
    }
}

/// Rounds a finale of `finalists` entrants takes: `ceil(log2(finalists))`.
pub fn expected_rounds(finalists: usize) -> usize {
    if finalists <= 1 {
        0
    } else {
        (usize::BITS - (finalists - 1).leading_zeros()) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;
    use runway_env::ReplayRng;

    fn finalists(n: usize) -> Vec<Competitor> {
        (0..n).map(|i| Competitor::new(format!("F{}", i))).collect()
    }

    #[test]
    fn test_expected_rounds() {
        assert_eq!(expected_rounds(1), 0);
        assert_eq!(expected_rounds(2), 1);
        assert_eq!(expected_rounds(3), 2);
        assert_eq!(expected_rounds(4), 2);
        assert_eq!(expected_rounds(7), 3);
        assert_eq!(expected_rounds(8), 3);
        assert_eq!(expected_rounds(9), 4);
    }

    #[test]
    fn test_seven_finalists_shape() {
        let mut chacha = ChaCha8Rng::seed_from_u64(3);
        let mut rng = move || chacha.gen::<f64>();
        let result = run_finale(&finalists(7), &mut rng);

        let sizes: Vec<usize> = result.rounds.iter().map(|r| r.entrants.len()).collect();
        assert_eq!(sizes, vec![7, 4, 2]);

        let first = &result.rounds[0];
        assert_eq!(first.pairings.len(), 4);
        let byes: Vec<&FinalePairing> = first.pairings.iter().filter(|p| p.bye).collect();
        assert_eq!(byes.len(), 1);
        assert!(first.pairings[3].bye);
        assert_eq!(first.pairings[3].second, None);
        assert_eq!(first.pairings[3].first, first.entrants[6]);

        assert_eq!(result.rounds[2].pairings.len(), 1);
        assert_eq!(result.champion, result.rounds[2].pairings[0].winner);
    }

    #[test]
    fn test_scripted_finale() {
        // Shuffle of 3 with draws 0.0 (i=2 -> j=0) and 0.9 (i=1 -> j=1):
        // [0,1,2] -> [2,1,0] -> [2,1,0]
        // Round 1: F2 vs F1 (0.7 -> F1), F0 bye
        // Round 2: F1 vs F0 (0.2 -> F1)
        let mut rng = ReplayRng::new(vec![0.0, 0.9, 0.7, 0.2]).unwrap();
        let result = run_finale(&finalists(3), &mut rng);

        assert_eq!(result.rounds.len(), 2);
        let r1 = &result.rounds[0];
        let entrants: Vec<&str> = r1.entrants.iter().map(|c| c.name()).collect();
        assert_eq!(entrants, vec!["F2", "F1", "F0"]);
        assert_eq!(r1.pairings[0].winner.name(), "F1");
        assert!(r1.pairings[1].bye);
        assert_eq!(
            r1.survivors(),
            vec![Competitor::from("F1"), Competitor::from("F0")]
        );

        assert_eq!(result.rounds[1].pairings[0].winner.name(), "F1");
        assert_eq!(result.champion.name(), "F1");
        assert_eq!(rng.consumed(), 4);
    }

    #[test]
    fn test_single_finalist_is_champion() {
        let mut rng = || -> f64 { panic!("no draws expected") };
        let result = run_finale(&finalists(1), &mut rng);
        assert!(result.rounds.is_empty());
        assert_eq!(result.champion.name(), "F0");
    }

    proptest! {
        #[test]
        fn prop_finale_terminates_with_one_champion(seed in any::<u64>(), n in 1usize..40) {
            let mut chacha = ChaCha8Rng::seed_from_u64(seed);
            let mut rng = move || chacha.gen::<f64>();
            let field = finalists(n);
            let result = run_finale(&field, &mut rng);

            prop_assert_eq!(result.rounds.len(), expected_rounds(n));
            prop_assert!(field.contains(&result.champion));

            for (i, round) in result.rounds.iter().enumerate() {
                let byes = round.pairings.iter().filter(|p| p.bye).count();
                prop_assert_eq!(byes, round.entrants.len() % 2);
                if let Some(next) = result.rounds.get(i + 1) {
                    prop_assert_eq!(&next.entrants, &round.survivors());
                }
            }
        }
    }
}
