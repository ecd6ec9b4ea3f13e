//! Entrant identity types.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;

/// A competitor ("queen"), identified by a unique name.
///
/// Uniqueness within a season is assumed, not enforced. Ordering is plain
/// lexicographic order on the name, which is the standings tie-break.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Competitor(String);

impl Competitor {
    /// Creates a competitor from a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the name.
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Competitor {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Competitor {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl Borrow<str> for Competitor {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Competitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Anything that can enter a season: plain strings or records exposing a name.
pub trait Entrant {
    /// The entrant's unique name.
    fn entrant_name(&self) -> &str;

    /// Converts to the pipeline's identity type.
    fn to_competitor(&self) -> Competitor {
        Competitor::new(self.entrant_name())
    }
}

impl Entrant for Competitor {
    fn entrant_name(&self) -> &str {
        self.name()
    }

    fn to_competitor(&self) -> Competitor {
        self.clone()
    }
}

impl Entrant for str {
    fn entrant_name(&self) -> &str {
        self
    }
}

impl Entrant for String {
    fn entrant_name(&self) -> &str {
        self
    }
}

impl<T: Entrant + ?Sized> Entrant for &T {
    fn entrant_name(&self) -> &str {
        (**self).entrant_name()
    }
}
