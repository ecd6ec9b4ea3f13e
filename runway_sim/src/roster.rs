//! Competitor rosters: the built-in cast and roster files.

use crate::error::SimError;
use runway_env::Competitor;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// The built-in 18-queen cast used when no roster file is given.
pub const DEFAULT_ROSTER: [&str; 18] = [
    "Alaska",
    "Bianca Del Rio",
    "Bob the Drag Queen",
    "Jinkx Monsoon",
    "Katya",
    "Latrice Royale",
    "Manila Luzon",
    "Monét X Change",
    "Raja",
    "Sasha Velour",
    "Shea Couleé",
    "Trixie Mattel",
    "Violet Chachki",
    "Yvie Oddly",
    "Jaida Essence Hall",
    "Symone",
    "Willow Pill",
    "Sasha Colby",
];

/// The built-in cast as competitors.
pub fn default_roster() -> Vec<Competitor> {
    DEFAULT_ROSTER.iter().map(|name| Competitor::from(*name)).collect()
}

/// Parses roster text.
///
/// Accepts either a JSON array of names, or plain text with one name per
/// line (blank lines and `#` comments are skipped). Names are trimmed and
/// must be unique.
pub fn parse_roster(text: &str) -> Result<Vec<Competitor>, SimError> {
    let names: Vec<String> = if text.trim_start().starts_with('[') {
        serde_json::from_str::<Vec<String>>(text)?
            .into_iter()
            .map(|n| n.trim().to_string())
            .collect()
    } else {
        text.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(str::to_string)
            .collect()
    };

    if names.is_empty() {
        return Err(SimError::roster("roster is empty"));
    }

    let mut seen = HashSet::new();
    for name in &names {
        if name.is_empty() {
            return Err(SimError::roster("roster contains a blank name"));
        }
        if !seen.insert(name.as_str()) {
            return Err(SimError::roster(format!("duplicate competitor: {}", name)));
        }
    }

    Ok(names.into_iter().map(Competitor::from).collect())
}

/// Loads a roster file (see `parse_roster` for the formats).
pub fn load_roster(path: impl AsRef<Path>) -> Result<Vec<Competitor>, SimError> {
    let text = fs::read_to_string(path)?;
    parse_roster(&text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_roster_fills_default_layout() {
        let roster = default_roster();
        assert_eq!(roster.len(), 18);
        let unique: HashSet<_> = roster.iter().collect();
        assert_eq!(unique.len(), 18);
    }

    #[test]
    fn test_parse_text_roster() {
        let text = "# season 1\nBebe\n\n  Nina  \nOngina\n";
        let roster = parse_roster(text).unwrap();
        let names: Vec<&str> = roster.iter().map(|c| c.name()).collect();
        assert_eq!(names, vec!["Bebe", "Nina", "Ongina"]);
    }

    #[test]
    fn test_parse_json_roster() {
        let roster = parse_roster(r#"["Tyra", " Raven ", "Jujubee"]"#).unwrap();
        assert_eq!(roster[1].name(), "Raven");
    }

    #[test]
    fn test_rejects_duplicates_and_empty() {
        assert!(matches!(
            parse_roster("Tammie\nTammie\n"),
            Err(SimError::Roster(_))
        ));
        assert!(matches!(parse_roster("# nobody\n"), Err(SimError::Roster(_))));
        assert!(matches!(parse_roster(r#"["ok", ""]"#), Err(SimError::Roster(_))));
    }

    #[test]
    fn test_rejects_bad_json() {
        assert!(matches!(parse_roster("[\"unterminated"), Err(SimError::Json(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_roster("/definitely/not/here.txt").unwrap_err();
        assert!(matches!(err, SimError::Io(_)));
    }
}
