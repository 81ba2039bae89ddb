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

//! Structured-data extraction from raw model output.

use opinionbench_core::{Opinion, OpinionRecord};
use regex::Regex;
use std::collections::BTreeMap;
use tracing::debug;

/// Recovers an opinion record from arbitrary, possibly malformed model
/// output, or declares failure.
///
/// The model is instructed to emit exactly one flat JSON object, so the
/// scan looks for the first `{...}` span containing no nested braces and
/// makes no attempt at recursive brace matching. Every gate downgrades to
/// `None`; nothing raises past this boundary, and a single malformed reply
/// never aborts a batch.
#[derive(Debug, Clone)]
pub struct ResponseExtractor {
    flat_object: Regex,
}

impl Default for ResponseExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl ResponseExtractor {
    pub fn new() -> Self {
        Self {
            flat_object: Regex::new(r"\{[^{}]+\}").expect("invalid flat-object pattern"),
        }
    }

    /// Extract and normalize the first flat JSON object in `raw`.
    ///
    /// Hard gates, in order: no flat span → `None`; span fails to decode as
    /// a string-to-string map → `None`; otherwise every value is normalized
    /// through [`Opinion::normalize`] and the record is returned. Keys are
    /// taken as-is: unrecognized keys are retained and missing keys stay
    /// absent.
    pub fn extract(&self, raw: &str) -> Option<OpinionRecord> {
        let span = match self.flat_object.find(raw) {
            Some(m) => m.as_str(),
            None => {
                debug!("no flat object span in model reply");
                return None;
            }
        };

        let decoded: BTreeMap<String, String> = match serde_json::from_str(span) {
            Ok(map) => map,
            Err(err) => {
                debug!(error = %err, "model reply span failed to decode");
                return None;
            }
        };

        Some(
            decoded
                .into_iter()
                .map(|(aspect, value)| (aspect, Opinion::normalize(&value)))
                .collect(),
        )
    }
}
