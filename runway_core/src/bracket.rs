//! Bracket formation.

use crate::config::SeasonConfig;
use runway_env::{Competitor, Entrant, SeasonError};
use serde::Serialize;

/// A fixed group of competitors who play their episodes together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Bracket {
    /// 1-based bracket index
    pub index: usize,

    /// Members in seeding order
    pub competitors: Vec<Competitor>,
}

/// Partitions entrants into `config.bracket_count` brackets.
///
/// Seeding is round-robin: the entrant at input index `i` joins bracket
/// `i mod bracket_count`. A pre-ranked list is therefore spread across all
/// brackets instead of stacking its head into bracket 1.
///
/// Fails before touching any entrant if the count does not match the layout.
pub fn form_brackets<E: Entrant>(
    entrants: &[E],
    config: &SeasonConfig,
) -> Result<Vec<Bracket>, SeasonError> {
    config.validate(entrants.len())?;

    let mut brackets: Vec<Bracket> = (1..=config.bracket_count)
        .map(|index| Bracket {
            index,
            competitors: Vec::with_capacity(config.bracket_size),
        })
        .collect();

    for (i, entrant) in entrants.iter().enumerate() {
        brackets[i % config.bracket_count]
            .competitors
            .push(entrant.to_competitor());
    }

    Ok(brackets)
}
