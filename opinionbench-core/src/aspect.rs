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

//! The fixed, closed set of aspects opinions are extracted for.

use serde::{Deserialize, Serialize};

/// Ordered, immutable set of aspect names.
///
/// Defined once at configuration time and shared read-only by the prompt
/// builder, the dataset loader and the scorer. Order is preserved so prompts
/// and reports stay stable across runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AspectSet(Vec<String>);

impl AspectSet {
    /// Build an aspect set from a list of names.
    ///
    /// An empty list is a configuration error; the harness has nothing to
    /// classify without aspects.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        assert!(!names.is_empty(), "aspect set must not be empty");
        AspectSet(names)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|a| a == name)
    }
}

impl Default for AspectSet {
    /// The restaurant-review aspect set.
    fn default() -> Self {
        AspectSet::new(["Price", "Food", "Service"])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_aspects() {
        let aspects = AspectSet::default();
        assert_eq!(aspects.len(), 3);
        assert!(aspects.contains("Price"));
        assert!(aspects.contains("Food"));
        assert!(aspects.contains("Service"));
    }

    #[test]
    fn test_order_is_preserved() {
        let aspects = AspectSet::new(["B", "A", "C"]);
        let collected: Vec<&str> = aspects.iter().collect();
        assert_eq!(collected, vec!["B", "A", "C"]);
    }

    #[test]
    #[should_panic(expected = "aspect set must not be empty")]
    fn test_empty_set_is_rejected() {
        let _ = AspectSet::new(Vec::<String>::new());
    }
}
