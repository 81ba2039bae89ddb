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

//! Per-text opinion records.

use crate::opinion::Opinion;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Mapping from aspect name to opinion for one review text.
///
/// Used for both ground-truth annotations and model predictions. The shape
/// is deliberately permissive: unrecognized keys coming from a model reply
/// are retained but never consulted by the scorer, and missing keys stay
/// absent rather than being defaulted. A prediction that failed extraction
/// entirely is represented as `None` at the call site, not as an empty
/// record.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OpinionRecord(BTreeMap<String, Opinion>);

impl OpinionRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, aspect: impl Into<String>, opinion: Opinion) {
        self.0.insert(aspect.into(), opinion);
    }

    /// Opinion recorded for an aspect, if present.
    pub fn get(&self, aspect: &str) -> Option<&Opinion> {
        self.0.get(aspect)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Opinion)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Whether this record agrees with `other` on the given aspect.
    ///
    /// A key missing on either side is a disagreement.
    pub fn agrees_on(&self, other: &OpinionRecord, aspect: &str) -> bool {
        match (self.get(aspect), other.get(aspect)) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }
}

impl<K: Into<String>> FromIterator<(K, Opinion)> for OpinionRecord {
    fn from_iter<I: IntoIterator<Item = (K, Opinion)>>(iter: I) -> Self {
        OpinionRecord(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v))
                .collect(),
        )
    }
}
