//! Per-competitor point accumulation.
//!
//! The ledger is an arena: the roster is fixed at construction and every slot
//! starts at zero, so there is no "missing key" case when awarding points.

use runway_env::Competitor;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Points keyed by competitor, in roster order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointLedger {
    roster: Vec<Competitor>,
    totals: Vec<u32>,
}

impl PointLedger {
    /// Creates a ledger with every competitor at zero.
    pub fn seeded(roster: &[Competitor]) -> Self {
        Self {
            roster: roster.to_vec(),
            totals: vec![0; roster.len()],
        }
    }

    /// Adds points to the competitor in `slot`.
    pub fn award(&mut self, slot: usize, points: u32) {
        self.totals[slot] += points;
    }

    /// Adds another ledger over the same roster, slot by slot.
    ///
    /// # Panics
    /// Panics if the rosters differ.
    pub fn absorb(&mut self, other: &PointLedger) {
        assert_eq!(self.roster, other.roster, "ledger rosters differ");
        for (total, delta) in self.totals.iter_mut().zip(&other.totals) {
            *total += delta;
        }
    }

    /// Points held by the competitor in `slot`.
    pub fn points(&self, slot: usize) -> u32 {
        self.totals[slot]
    }

    /// Points held by `name`, if it is on the roster.
    pub fn get(&self, name: &str) -> Option<u32> {
        self.roster
            .iter()
            .position(|c| c.name() == name)
            .map(|slot| self.totals[slot])
    }

    /// Sum over all competitors.
    pub fn total(&self) -> u32 {
        self.totals.iter().sum()
    }

    /// The roster, in slot order.
    pub fn roster(&self) -> &[Competitor] {
        &self.roster
    }

    /// Iterates `(competitor, points)` in roster order.
    pub fn iter(&self) -> impl Iterator<Item = (&Competitor, u32)> + '_ {
        self.roster.iter().zip(self.totals.iter().copied())
    }

    pub fn len(&self) -> usize {
        self.roster.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roster.is_empty()
    }
}

// Serialized as a name -> points map, keeping roster order.
impl Serialize for PointLedger {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.roster.len()))?;
        for (competitor, points) in self.iter() {
            map.serialize_entry(competitor.name(), &points)?;
        }
        map.end()
    }
}
