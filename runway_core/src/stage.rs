//! Bracket stage: three episodes, running totals, standings.

use crate::bracket::Bracket;
use crate::config::EPISODES_PER_BRACKET;
use crate::episode::{simulate_episode, EpisodeRecord};
use crate::ledger::PointLedger;
use runway_env::{Competitor, RandomSource};
use serde::Serialize;
use std::cmp::Ordering;
use tracing::debug;

/// A competitor's place in a bracket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Standing {
    pub competitor: Competitor,
    pub points: u32,
}

impl Standing {
    /// Standings order: points descending, then name ascending.
    ///
    /// Total over distinct names, so the top-3 cutoff is never ambiguous.
    pub fn rank_order(a: &Standing, b: &Standing) -> Ordering {
        b.points
            .cmp(&a.points)
            .then_with(|| a.competitor.cmp(&b.competitor))
    }
}

/// Immutable record of a finished bracket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BracketResult {
    /// 1-based bracket index
    pub bracket: usize,

    pub competitors: Vec<Competitor>,

    /// Cumulative points after the last episode
    pub points: PointLedger,

    /// Ranked standings
    pub standings: Vec<Standing>,

    /// Episodes in play order
    pub episodes: Vec<EpisodeRecord>,
}

impl BracketResult {
    /// Names of the first `n` places.
    pub fn top(&self, n: usize) -> Vec<Competitor> {
        self.standings
            .iter()
            .take(n)
            .map(|s| s.competitor.clone())
            .collect()
    }
}

/// Ranks a ledger into standings.
pub fn compute_standings(points: &PointLedger) -> Vec<Standing> {
    let mut standings: Vec<Standing> = points
        .iter()
        .map(|(competitor, points)| Standing {
            competitor: competitor.clone(),
            points,
        })
        .collect();
    standings.sort_by(Standing::rank_order);
    standings
}

/// Global sequence number of `episode` (1-based) in bracket `index` (1-based).
pub fn episode_sequence(bracket_index: usize, episode: u32) -> u32 {
    (bracket_index as u32 - 1) * EPISODES_PER_BRACKET + episode
}

/// Plays every episode of a bracket on `rng` and ranks the result.
pub fn run_bracket<R: RandomSource + ?Sized>(bracket: &Bracket, rng: &mut R) -> BracketResult {
    let mut points = PointLedger::seeded(&bracket.competitors);
    let mut episodes = Vec::with_capacity(EPISODES_PER_BRACKET as usize);

    for episode in 1..=EPISODES_PER_BRACKET {
        let outcome = simulate_episode(&bracket.competitors, rng);
        points.absorb(&outcome.deltas);

        debug!(
            "bracket {} episode {}: winners {} & {}, lip sync {}",
            bracket.index,
            episode,
            outcome.detail.challenge_winners[0],
            outcome.detail.challenge_winners[1],
            outcome.detail.lip_sync_winner
        );

        episodes.push(EpisodeRecord {
            bracket: bracket.index,
            episode,
            sequence: episode_sequence(bracket.index, episode),
            competitors: bracket.competitors.clone(),
            deltas: outcome.deltas,
            detail: outcome.detail,
        });
    }

    let standings = compute_standings(&points);

    BracketResult {
        bracket: bracket.index,
        competitors: bracket.competitors.clone(),
        points,
        standings,
        episodes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::points_per_episode;
    use proptest::prelude::*;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    fn bracket(index: usize) -> Bracket {
        Bracket {
            index,
            competitors: ["Tyra", "Raven", "Jujubee", "Tatianna", "Manila", "Delta"]
                .into_iter()
                .map(Competitor::from)
                .collect(),
        }
    }

    #[test]
    fn test_standings_tie_break_by_name() {
        let roster: Vec<Competitor> = ["Yara", "Alexis", "Mimi", "Bebe"]
            .into_iter()
            .map(Competitor::from)
            .collect();
        let mut points = PointLedger::seeded(&roster);
        points.award(0, 5); // Yara
        points.award(1, 5); // Alexis
        points.award(3, 7); // Bebe

        let standings = compute_standings(&points);
        let order: Vec<(&str, u32)> = standings
            .iter()
            .map(|s| (s.competitor.name(), s.points))
            .collect();

        assert_eq!(
            order,
            vec![("Bebe", 7), ("Alexis", 5), ("Yara", 5), ("Mimi", 0)]
        );
    }

    #[test]
    fn test_episode_sequence() {
        assert_eq!(episode_sequence(1, 1), 1);
        assert_eq!(episode_sequence(1, 3), 3);
        assert_eq!(episode_sequence(2, 1), 4);
        assert_eq!(episode_sequence(3, 3), 9);
    }

    #[test]
    fn test_run_bracket_shape() {
        let mut chacha = ChaCha8Rng::seed_from_u64(42);
        let mut rng = move || chacha.gen::<f64>();
        let result = run_bracket(&bracket(2), &mut rng);

        assert_eq!(result.bracket, 2);
        assert_eq!(result.episodes.len(), 3);
        let sequences: Vec<u32> = result.episodes.iter().map(|e| e.sequence).collect();
        assert_eq!(sequences, vec![4, 5, 6]);
        assert_eq!(result.standings.len(), 6);
        assert_eq!(result.top(3).len(), 3);
    }

    proptest! {
        #[test]
        fn prop_bracket_conserves_points(seed in any::<u64>()) {
            let mut chacha = ChaCha8Rng::seed_from_u64(seed);
            let mut rng = move || chacha.gen::<f64>();
            let result = run_bracket(&bracket(1), &mut rng);

            prop_assert_eq!(result.points.total(), 27);
            prop_assert_eq!(
                result.points.total(),
                EPISODES_PER_BRACKET * points_per_episode(6)
            );

            // running totals equal the sum of episode deltas
            for (slot, competitor) in result.competitors.iter().enumerate() {
                let summed: u32 = result.episodes.iter().map(|e| e.deltas.points(slot)).sum();
                prop_assert_eq!(result.points.get(competitor.name()), Some(summed));
            }

            for pair in result.standings.windows(2) {
                prop_assert_eq!(Standing::rank_order(&pair[0], &pair[1]), Ordering::Less);
            }
        }
    }
}
