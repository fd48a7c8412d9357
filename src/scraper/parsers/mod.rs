//! HTML parsers for netkeiba.com pages.
//!
//! Each parser is a pure function of one document: it walks the DOM,
//! pulls typed fields out of fixed positions, and assembles one record.
//! A missing node or a cell that fails to parse degrades that one field
//! to an empty string or sentinel value; it never aborts the row or the
//! document.

pub mod extract;
pub mod header;
pub mod horse;
pub mod ids;
pub mod jockey;
pub mod race_result;
pub mod shutuba;

pub use horse::{HorseParser, HorsePed, HorseProfile, HorseRaceResultItem};
pub use jockey::{JockeyInfo, JockeyParser};
pub use race_result::{RaceResult, RaceResultItem, RaceResultParser};
pub use shutuba::{RaceShutuba, RaceShutubaItem, ShutubaParser};

use scraper::ElementRef;
use serde::{Deserialize, Serialize};

/// Horse name + ID copied out of an anchor at parse time. Denormalized:
/// not a pointer into any other record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HorseRef {
    pub horse_name: String,
    pub horse_id: String,
}

impl HorseRef {
    /// Build from an anchor element, extracting the ID with `pattern`.
    pub(crate) fn from_anchor(link: ElementRef, pattern: &str) -> Self {
        Self {
            horse_name: link.text().collect::<String>().trim().to_string(),
            horse_id: ids::extract_id(link.value().attr("href").unwrap_or(""), pattern),
        }
    }
}

/// Jockey name + ID copied out of an anchor at parse time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JockeyRef {
    pub jockey_name: String,
    pub jockey_id: String,
}

impl JockeyRef {
    pub(crate) fn from_anchor(link: ElementRef, pattern: &str) -> Self {
        Self {
            jockey_name: link.text().collect::<String>().trim().to_string(),
            jockey_id: ids::extract_id(link.value().attr("href").unwrap_or(""), pattern),
        }
    }
}

/// Race name + ID copied out of an anchor at parse time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RaceRef {
    pub race_name: String,
    pub race_id: String,
}

impl RaceRef {
    pub(crate) fn from_anchor(link: ElementRef, pattern: &str) -> Self {
        Self {
            race_name: link.text().collect::<String>().trim().to_string(),
            race_id: ids::extract_id(link.value().attr("href").unwrap_or(""), pattern),
        }
    }
}

/// Finish position. The source site writes 中止 (pulled up), 除外
/// (excluded), or 取消 (scratched) in place of a number; those cells keep
/// their raw text instead of collapsing into a numeric sentinel.
///
/// Serialized untagged, so JSON carries either a number or a string,
/// matching what the site itself displays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Rank {
    Finished(u32),
    DidNotFinish(String),
}

impl Rank {
    /// Parse a rank cell: numeric text is a finish position, anything
    /// else is carried through as-is.
    pub fn from_cell(text: &str) -> Self {
        let trimmed = text.trim();
        match trimmed.parse::<u32>() {
            Ok(n) => Rank::Finished(n),
            Err(_) => Rank::DidNotFinish(trimmed.to_string()),
        }
    }
}

impl Default for Rank {
    fn default() -> Self {
        Rank::DidNotFinish(String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_from_cell() {
        assert_eq!(Rank::from_cell("3"), Rank::Finished(3));
        assert_eq!(Rank::from_cell(" 12 "), Rank::Finished(12));
        assert_eq!(Rank::from_cell("中止"), Rank::DidNotFinish("中止".to_string()));
        assert_eq!(Rank::from_cell("除外"), Rank::DidNotFinish("除外".to_string()));
        assert_eq!(Rank::from_cell(""), Rank::DidNotFinish(String::new()));
    }

    #[test]
    fn test_rank_serializes_untagged() {
        assert_eq!(serde_json::to_string(&Rank::Finished(1)).unwrap(), "1");
        assert_eq!(
            serde_json::to_string(&Rank::DidNotFinish("中止".to_string())).unwrap(),
            "\"中止\""
        );
    }
}
