//! Season layout and fixed scoring rules.

use runway_env::SeasonError;
use serde::{Deserialize, Serialize};

/// Points for each maxi-challenge winner.
pub const CHALLENGE_WIN_POINTS: u32 = 2;

/// Extra point for the lip-sync winner.
pub const LIP_SYNC_BONUS: u32 = 1;

/// Point a remaining competitor grants to a peer.
pub const PEER_AWARD_POINTS: u32 = 1;

/// Maxi-challenge winners per episode.
pub const CHALLENGE_WINNERS: usize = 2;

/// Episodes each bracket plays.
pub const EPISODES_PER_BRACKET: u32 = 3;

/// Standings places per bracket that advance to the pool.
pub const ADVANCERS_PER_BRACKET: usize = 3;

/// Competitors cut from the pool before the finale.
pub const SEMIFINAL_CUTS: usize = 2;

pub const DEFAULT_BRACKET_COUNT: usize = 3;
pub const DEFAULT_BRACKET_SIZE: usize = 6;

/// Total points handed out in one episode for a group of `group_size`.
///
/// Constant regardless of draws: two wins, one lip-sync bonus, and one peer
/// award per non-winner. For six competitors this is 9.
pub const fn points_per_episode(group_size: usize) -> u32 {
    let peers = group_size.saturating_sub(CHALLENGE_WINNERS) as u32;
    CHALLENGE_WINNERS as u32 * CHALLENGE_WIN_POINTS + LIP_SYNC_BONUS + peers * PEER_AWARD_POINTS
}

/// Configuration for a season.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonConfig {
    /// Number of brackets
    pub bracket_count: usize,

    /// Competitors per bracket
    pub bracket_size: usize,
}

impl Default for SeasonConfig {
    fn default() -> Self {
        Self {
            bracket_count: DEFAULT_BRACKET_COUNT,
            bracket_size: DEFAULT_BRACKET_SIZE,
        }
    }
}

impl SeasonConfig {
    /// Sets the bracket count.
    pub fn with_bracket_count(mut self, count: usize) -> Self {
        self.bracket_count = count;
        self
    }

    /// Sets the bracket size.
    pub fn with_bracket_size(mut self, size: usize) -> Self {
        self.bracket_size = size;
        self
    }

    /// Number of competitors a season with this layout needs.
    pub fn expected_competitors(&self) -> usize {
        self.bracket_count * self.bracket_size
    }

    /// Size of the combined top pool.
    pub fn pool_size(&self) -> usize {
        self.bracket_count * ADVANCERS_PER_BRACKET
    }

    /// Finalists left after the semifinal cut.
    pub fn finalist_count(&self) -> usize {
        self.pool_size() - SEMIFINAL_CUTS
    }

    /// Checks that the layout itself can run a season.
    pub fn validate_layout(&self) -> Result<(), SeasonError> {
        if self.bracket_count == 0 {
            return Err(SeasonError::layout("bracket_count must be at least 1"));
        }
        if self.bracket_size < ADVANCERS_PER_BRACKET {
            return Err(SeasonError::layout(format!(
                "bracket_size {} is smaller than the {} advancers per bracket",
                self.bracket_size, ADVANCERS_PER_BRACKET
            )));
        }
        Ok(())
    }

    /// Checks the layout and the competitor count against it.
    pub fn validate(&self, competitor_count: usize) -> Result<(), SeasonError> {
        self.validate_layout()?;

        let expected = self.expected_competitors();
        if competitor_count != expected {
            return Err(SeasonError::mismatch(expected, competitor_count));
        }
        Ok(())
    }
}
