//! Audit Module - Invariant Checks for Finished Seasons
//! =====================================================
//!
//! Re-derives every structural guarantee of the pipeline from a finished
//! `SeasonResult` and reports what does not hold. A result produced by
//! `simulate_season` always passes; the audit exists to check exported or
//! hand-assembled results and to act as the batch runner's oracle.
//!
//! Usage:
//! ```ignore
//! use runway_core::audit::audit_season;
//!
//! let report = audit_season(&result, &config);
//! assert!(report.passed(), "{:?}", report.violations);
//! ```

use crate::config::{
    points_per_episode, SeasonConfig, ADVANCERS_PER_BRACKET, CHALLENGE_WIN_POINTS,
    EPISODES_PER_BRACKET, LIP_SYNC_BONUS, PEER_AWARD_POINTS, SEMIFINAL_CUTS,
};
use crate::episode::EpisodeRecord;
use crate::finale::expected_rounds;
use crate::ledger::PointLedger;
use crate::season::{select_top_pool, SeasonResult};
use crate::stage::{compute_standings, BracketResult};
use runway_env::Competitor;
use serde::Serialize;
use thiserror::Error;

// =============================================================================
// VIOLATIONS
// =============================================================================

/// A broken invariant found by the audit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
pub enum Violation {
    #[error("episode {sequence}: awarded {actual} points, expected {expected}")]
    EpisodePoints {
        sequence: u32,
        expected: u32,
        actual: u32,
    },

    #[error("episode {sequence}: challenge winners are not two distinct members")]
    ChallengeWinners { sequence: u32 },

    #[error("episode {sequence}: lip-sync winner {winner} did not win the challenge")]
    LipSyncWinner { sequence: u32, winner: Competitor },

    #[error("episode {sequence}: {giver} awarded a point to {recipient}")]
    PeerAward {
        sequence: u32,
        giver: Competitor,
        recipient: Competitor,
    },

    #[error("episode {sequence}: deltas do not match the episode trace")]
    EpisodeTrace { sequence: u32 },

    #[error("layout: {0}")]
    Layout(String),

    #[error("bracket {bracket}: {detail}")]
    Bracket { bracket: usize, detail: String },

    #[error("episode list is not the chronological concatenation of bracket episodes")]
    EpisodeOrder,

    #[error("top pool: {0}")]
    TopPool(String),

    #[error("semifinal: {0}")]
    Semifinal(String),

    #[error("finale: {0}")]
    Finale(String),
}

/// Outcome of auditing one season.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AuditReport {
    /// Episodes inspected
    pub episodes_checked: usize,
    /// Brackets inspected
    pub brackets_checked: usize,
    /// Everything that failed
    pub violations: Vec<Violation>,
}

impl AuditReport {
    /// True when no invariant was broken.
    pub fn passed(&self) -> bool {
        self.violations.is_empty()
    }
}

// =============================================================================
// EPISODE CHECKS
// =============================================================================

fn audit_episode(episode: &EpisodeRecord, report: &mut AuditReport) {
    let seq = episode.sequence;
    let detail = &episode.detail;
    let members = &episode.competitors;

    let expected = points_per_episode(members.len());
    let actual = episode.deltas.total();
    if actual != expected {
        report.violations.push(Violation::EpisodePoints {
            sequence: seq,
            expected,
            actual,
        });
    }

    let [first, second] = &detail.challenge_winners;
    if first == second || !members.contains(first) || !members.contains(second) {
        report
            .violations
            .push(Violation::ChallengeWinners { sequence: seq });
    }

    if !detail.challenge_winners.contains(&detail.lip_sync_winner) {
        report.violations.push(Violation::LipSyncWinner {
            sequence: seq,
            winner: detail.lip_sync_winner.clone(),
        });
    }

    for award in &detail.peer_awards {
        let giver_is_winner = detail.challenge_winners.contains(&award.giver);
        let stray = !members.contains(&award.recipient);
        if award.giver == award.recipient || giver_is_winner || stray {
            report.violations.push(Violation::PeerAward {
                sequence: seq,
                giver: award.giver.clone(),
                recipient: award.recipient.clone(),
            });
        }
    }

    // Rebuild the deltas from the trace and compare
    let mut rebuilt = PointLedger::seeded(members);
    let mut credit = |who: &Competitor, points: u32| {
        if let Some(slot) = members.iter().position(|m| m == who) {
            rebuilt.award(slot, points);
        }
    };
    credit(first, CHALLENGE_WIN_POINTS);
    credit(second, CHALLENGE_WIN_POINTS);
    credit(&detail.lip_sync_winner, LIP_SYNC_BONUS);
    for award in &detail.peer_awards {
        credit(&award.recipient, PEER_AWARD_POINTS);
    }

    let givers_expected = members.len().saturating_sub(2);
    if rebuilt != episode.deltas || detail.peer_awards.len() != givers_expected {
        report
            .violations
            .push(Violation::EpisodeTrace { sequence: seq });
    }

    report.episodes_checked += 1;
}

// =============================================================================
// BRACKET CHECKS
// =============================================================================

fn audit_bracket(bracket: &BracketResult, config: &SeasonConfig, report: &mut AuditReport) {
    let mut fail = |detail: String| {
        report.violations.push(Violation::Bracket {
            bracket: bracket.bracket,
            detail,
        });
    };

    if bracket.competitors.len() != config.bracket_size {
        fail(format!(
            "{} competitors, expected {}",
            bracket.competitors.len(),
            config.bracket_size
        ));
    }
    if bracket.episodes.len() != EPISODES_PER_BRACKET as usize {
        fail(format!("{} episodes played", bracket.episodes.len()));
    }

    let mut summed = PointLedger::seeded(&bracket.competitors);
    for episode in &bracket.episodes {
        let misplaced = episode.bracket != bracket.bracket
            || episode.competitors != bracket.competitors
            || episode.deltas.roster() != bracket.competitors.as_slice();
        if misplaced {
            fail(format!("episode {} belongs elsewhere", episode.sequence));
            continue;
        }
        summed.absorb(&episode.deltas);
    }
    if summed != bracket.points {
        fail("points are not the sum of episode deltas".to_string());
    }

    let expected_total = EPISODES_PER_BRACKET * points_per_episode(config.bracket_size);
    if bracket.points.total() != expected_total {
        fail(format!(
            "awarded {} points, expected {}",
            bracket.points.total(),
            expected_total
        ));
    }

    if bracket.standings != compute_standings(&bracket.points) {
        fail("standings are not in points-desc, name-asc order".to_string());
    }

    report.brackets_checked += 1;
}

// =============================================================================
// SEASON CHECKS
// =============================================================================

fn audit_advancement(result: &SeasonResult, config: &SeasonConfig, report: &mut AuditReport) {
    let pool = &result.top_pool;

    if pool.len() != config.bracket_count * ADVANCERS_PER_BRACKET {
        report.violations.push(Violation::TopPool(format!(
            "{} entries, expected {}",
            pool.len(),
            config.pool_size()
        )));
    }
    if *pool != select_top_pool(&result.brackets) {
        report.violations.push(Violation::TopPool(
            "does not match bracket standings".to_string(),
        ));
    }

    if result.eliminated.len() != SEMIFINAL_CUTS {
        report.violations.push(Violation::Semifinal(format!(
            "{} eliminated, expected {}",
            result.eliminated.len(),
            SEMIFINAL_CUTS
        )));
    }

    // Finalists must be the pool minus the cuts, in residual order
    let mut residual = pool.clone();
    for cut in &result.eliminated {
        match residual.iter().position(|c| c == cut) {
            Some(slot) => {
                residual.remove(slot);
            }
            None => report
                .violations
                .push(Violation::Semifinal(format!("{} was not in the pool", cut))),
        }
    }
    if residual != result.finalists {
        report.violations.push(Violation::Semifinal(
            "finalists are not the pool minus the eliminated".to_string(),
        ));
    }
}

fn audit_finale(result: &SeasonResult, report: &mut AuditReport) {
    let rounds = &result.finale;
    let finalists = &result.finalists;

    if rounds.len() != expected_rounds(finalists.len()) {
        report.violations.push(Violation::Finale(format!(
            "{} rounds for {} finalists",
            rounds.len(),
            finalists.len()
        )));
    }

    if let Some(first) = rounds.first() {
        let mut entered = first.entrants.clone();
        let mut expected = finalists.clone();
        entered.sort();
        expected.sort();
        if entered != expected {
            report.violations.push(Violation::Finale(
                "first round is not a permutation of the finalists".to_string(),
            ));
        }
    }

    for (i, round) in rounds.iter().enumerate() {
        let flattened: Vec<Competitor> = round
            .pairings
            .iter()
            .flat_map(|p| std::iter::once(p.first.clone()).chain(p.second.clone()))
            .collect();
        if flattened != round.entrants {
            report.violations.push(Violation::Finale(format!(
                "round {} pairings do not follow entrant order",
                round.round
            )));
        }

        for (j, pairing) in round.pairings.iter().enumerate() {
            let last = j + 1 == round.pairings.len();
            let bye_ok = pairing.bye == pairing.second.is_none() && (!pairing.bye || last);
            let winner_ok = pairing.winner == pairing.first
                || pairing.second.as_ref() == Some(&pairing.winner);
            if !bye_ok || !winner_ok {
                report.violations.push(Violation::Finale(format!(
                    "round {} pairing {} is malformed",
                    round.round,
                    j + 1
                )));
            }
        }

        if let Some(next) = rounds.get(i + 1) {
            if next.entrants != round.survivors() {
                report.violations.push(Violation::Finale(format!(
                    "round {} entrants are not round {} survivors",
                    next.round, round.round
                )));
            }
        }
    }

    let decided = match rounds.last() {
        Some(last) => last.survivors().first().cloned(),
        None => finalists.first().cloned(),
    };
    if decided.as_ref() != Some(&result.champion) {
        report.violations.push(Violation::Finale(format!(
            "champion {} did not win the last round",
            result.champion
        )));
    }
}

/// Checks every pipeline invariant on a finished season.
pub fn audit_season(result: &SeasonResult, config: &SeasonConfig) -> AuditReport {
    let mut report = AuditReport::default();

    if result.brackets.len() != config.bracket_count {
        report.violations.push(Violation::Layout(format!(
            "{} brackets, expected {}",
            result.brackets.len(),
            config.bracket_count
        )));
    }

    for bracket in &result.brackets {
        for episode in &bracket.episodes {
            audit_episode(episode, &mut report);
        }
        audit_bracket(bracket, config, &mut report);
    }

    let chronological = result.brackets.iter().flat_map(|b| b.episodes.iter());
    let in_order = chronological.clone().count() == result.episodes.len()
        && chronological.zip(&result.episodes).all(|(a, b)| a == b)
        && result
            .episodes
            .iter()
            .enumerate()
            .all(|(i, e)| e.sequence as usize == i + 1);
    if !in_order {
        report.violations.push(Violation::EpisodeOrder);
    }

    audit_advancement(result, config, &mut report);
    audit_finale(result, &mut report);

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::season::simulate_season;
    use proptest::prelude::*;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;
    use runway_env::FixedClock;

    fn queens() -> Vec<String> {
        (1..=18).map(|i| format!("Queen {:02}", i)).collect()
    }

    fn season(seed: u64) -> SeasonResult {
        let mut chacha = ChaCha8Rng::seed_from_u64(seed);
        let mut rng = move || chacha.gen::<f64>();
        simulate_season(
            &queens(),
            &SeasonConfig::default(),
            &mut rng,
            &FixedClock::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_clean_season_passes() {
        let report = audit_season(&season(1), &SeasonConfig::default());
        assert!(report.passed(), "{:?}", report.violations);
        assert_eq!(report.episodes_checked, 9);
        assert_eq!(report.brackets_checked, 3);
    }

    #[test]
    fn test_detects_self_award() {
        let mut result = season(2);
        let award = &mut result.brackets[0].episodes[0].detail.peer_awards[0];
        award.recipient = award.giver.clone();

        let report = audit_season(&result, &SeasonConfig::default());
        assert!(report
            .violations
            .iter()
            .any(|v| matches!(v, Violation::PeerAward { sequence: 1, .. })));
    }

    #[test]
    fn test_detects_swapped_champion() {
        let mut result = season(3);
        let loser = result
            .finalists
            .iter()
            .find(|c| **c != result.champion)
            .cloned()
            .unwrap();
        result.champion = loser;

        let report = audit_season(&result, &SeasonConfig::default());
        assert!(!report.passed());
        assert!(report
            .violations
            .iter()
            .any(|v| matches!(v, Violation::Finale(_))));
    }

    #[test]
    fn test_detects_tampered_standings() {
        let mut result = season(4);
        result.brackets[1].standings.swap(0, 5);

        let report = audit_season(&result, &SeasonConfig::default());
        assert!(report
            .violations
            .iter()
            .any(|v| matches!(v, Violation::Bracket { bracket: 2, .. })));
    }

    #[test]
    fn test_detects_wrong_layout() {
        let config = SeasonConfig::default().with_bracket_count(4);
        let report = audit_season(&season(5), &config);
        assert!(!report.passed());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_every_season_passes_audit(seed in any::<u64>()) {
            let report = audit_season(&season(seed), &SeasonConfig::default());
            prop_assert!(report.passed(), "{:?}", report.violations);
        }
    }
}
