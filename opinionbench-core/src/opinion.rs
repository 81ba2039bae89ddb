// Copyright 2025 Opinionbench (https://github.com/opinionbench)
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Opinion labels and their normalization.
//!
//! `Opinion::normalize` is the single normalization point in the system:
//! every value entering a record, whether decoded from a model reply or
//! read from a ground-truth file, passes through it. Values that match
//! no known label are retained verbatim as [`Opinion::Other`]; the scorer
//! treats them as plain misses, not as parse errors.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Case-insensitive marker denoting an absent opinion.
///
/// Covers "Not expressed", "not expressed in the review", "NOT EXPRESSED", …
const NOT_EXPRESSED_MARKER: &str = "not express";

/// Opinion expressed toward one aspect of a review.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Opinion {
    Positive,
    Negative,
    Neutral,
    /// No opinion expressed toward the aspect.
    NotExpressed,
    /// A value that matched no known label, kept verbatim.
    ///
    /// Never equal to a canonical label, so it scores as a miss.
    Other(String),
}

impl Opinion {
    /// Normalize a raw string value into an opinion label.
    ///
    /// A value whose lowercase form contains the "not expressed" marker
    /// always coerces to [`Opinion::NotExpressed`], regardless of
    /// surrounding case or whitespace. Exact canonical names pass through;
    /// anything else survives as [`Opinion::Other`].
    pub fn normalize(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.to_lowercase().contains(NOT_EXPRESSED_MARKER) {
            return Opinion::NotExpressed;
        }
        match trimmed {
            "Positive" => Opinion::Positive,
            "Negative" => Opinion::Negative,
            "Neutral" => Opinion::Neutral,
            other => Opinion::Other(other.to_string()),
        }
    }

    /// Canonical wire string for this label.
    pub fn as_str(&self) -> &str {
        match self {
            Opinion::Positive => "Positive",
            Opinion::Negative => "Negative",
            Opinion::Neutral => "Neutral",
            Opinion::NotExpressed => "Not expressed",
            Opinion::Other(raw) => raw,
        }
    }

    /// The closed label set, in prompt order.
    pub fn canonical_names() -> [&'static str; 4] {
        ["Positive", "Negative", "Neutral", "Not expressed"]
    }
}

impl fmt::Display for Opinion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Opinion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Opinion {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Opinion::normalize(&raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_canonical_labels() {
        assert_eq!(Opinion::normalize("Positive"), Opinion::Positive);
        assert_eq!(Opinion::normalize("Negative"), Opinion::Negative);
        assert_eq!(Opinion::normalize("Neutral"), Opinion::Neutral);
        assert_eq!(Opinion::normalize("Not expressed"), Opinion::NotExpressed);
    }

    #[test]
    fn test_normalize_marker_is_case_insensitive() {
        assert_eq!(Opinion::normalize("NOT EXPRESSED"), Opinion::NotExpressed);
        assert_eq!(Opinion::normalize("not expressed"), Opinion::NotExpressed);
        assert_eq!(
            Opinion::normalize("  No opinion is not expressed here  "),
            Opinion::NotExpressed
        );
        assert_eq!(
            Opinion::normalize("the sentiment was Not Expressed in the text"),
            Opinion::NotExpressed
        );
    }

    #[test]
    fn test_normalize_trims_whitespace() {
        assert_eq!(Opinion::normalize("  Positive  "), Opinion::Positive);
    }

    #[test]
    fn test_unknown_values_pass_through() {
        let opinion = Opinion::normalize("Mixed");
        assert_eq!(opinion, Opinion::Other("Mixed".to_string()));
        assert_ne!(opinion, Opinion::Positive);
        assert_ne!(opinion, Opinion::NotExpressed);
    }

    #[test]
    fn test_case_variants_of_polar_labels_are_not_coerced() {
        // Only the not-expressed marker is matched case-insensitively.
        assert_eq!(
            Opinion::normalize("positive"),
            Opinion::Other("positive".to_string())
        );
    }

    #[test]
    fn test_serde_round_trip() {
        let json = serde_json::to_string(&Opinion::NotExpressed).unwrap();
        assert_eq!(json, "\"Not expressed\"");

        let back: Opinion = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Opinion::NotExpressed);
    }
}
