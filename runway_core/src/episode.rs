//! Episode simulation: maxi challenge, lip sync and peer awards.
//!
//! Draw order within an episode is fixed, which is what makes a season
//! replayable from its draw sequence:
//! 1. first challenge winner
//! 2. second challenge winner (redrawn until distinct)
//! 3. lip-sync winner among the two
//! 4. one recipient draw per remaining competitor, in group order

use crate::config::{
    CHALLENGE_WINNERS, CHALLENGE_WIN_POINTS, LIP_SYNC_BONUS, PEER_AWARD_POINTS,
};
use crate::ledger::PointLedger;
use runway_env::{draw_index, Competitor, RandomSource};
use serde::Serialize;

/// A peer ("most valuable queen") point from one competitor to another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PeerAward {
    pub giver: Competitor,
    pub recipient: Competitor,
}

/// Trace of what happened in one episode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EpisodeDetail {
    /// The two maxi-challenge winners, in draw order
    pub challenge_winners: [Competitor; 2],

    /// Which of the two won the lip sync
    pub lip_sync_winner: Competitor,

    /// Peer awards in the order they were drawn
    pub peer_awards: Vec<PeerAward>,
}

/// Points and trace produced by one episode, before it is placed in a bracket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpisodeOutcome {
    pub deltas: PointLedger,
    pub detail: EpisodeDetail,
}

/// Immutable record of a played episode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EpisodeRecord {
    /// 1-based bracket index
    pub bracket: usize,

    /// Episode number within the bracket (1-based)
    pub episode: u32,

    /// Global, chronological episode number across the season (1-based)
    pub sequence: u32,

    /// Competitors present, in bracket order
    pub competitors: Vec<Competitor>,

    /// Points each competitor earned this episode
    pub deltas: PointLedger,

    pub detail: EpisodeDetail,
}

impl EpisodeRecord {
    /// Sum of all deltas in this episode.
    pub fn points_awarded(&self) -> u32 {
        self.deltas.total()
    }
}

/// Runs one episode for `group`.
///
/// Peer-award recipients are drawn from everyone except the giver, winners
/// included.
///
/// # Panics
/// Panics if `group` has fewer than two competitors.
pub fn simulate_episode<R: RandomSource + ?Sized>(
    group: &[Competitor],
    rng: &mut R,
) -> EpisodeOutcome {
    let n = group.len();
    assert!(
        n >= CHALLENGE_WINNERS,
        "an episode needs at least {} competitors, got {}",
        CHALLENGE_WINNERS,
        n
    );

    let first = draw_index(rng, n);
    let mut second = draw_index(rng, n);
    while second == first {
        second = draw_index(rng, n);
    }
    let winners = [first, second];

    let mut deltas = PointLedger::seeded(group);
    deltas.award(first, CHALLENGE_WIN_POINTS);
    deltas.award(second, CHALLENGE_WIN_POINTS);

    let lip_sync = winners[draw_index(rng, CHALLENGE_WINNERS)];
    deltas.award(lip_sync, LIP_SYNC_BONUS);

    let mut peer_awards = Vec::with_capacity(n - CHALLENGE_WINNERS);
    for giver in (0..n).filter(|slot| !winners.contains(slot)) {
        // Index into "everyone but the giver" without building the list
        let pick = draw_index(rng, n - 1);
        let recipient = if pick >= giver { pick + 1 } else { pick };

        deltas.award(recipient, PEER_AWARD_POINTS);
        peer_awards.push(PeerAward {
            giver: group[giver].clone(),
            recipient: group[recipient].clone(),
        });
    }

    EpisodeOutcome {
        deltas,
        detail: EpisodeDetail {
            challenge_winners: [group[first].clone(), group[second].clone()],
            lip_sync_winner: group[lip_sync].clone(),
            peer_awards,
        },
    }
}
