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

//! Classification prompt construction.

use opinionbench_core::{AspectSet, Opinion};

/// Renders the fixed-aspect classification instruction for one review.
///
/// Pure string construction: identical text yields an identical prompt, so
/// runs are reproducible and prompts can be golden-tested.
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    aspects: AspectSet,
}

impl PromptBuilder {
    pub fn new(aspects: AspectSet) -> Self {
        Self { aspects }
    }

    /// Build the instruction for one review text.
    ///
    /// Embeds the text verbatim, enumerates the closed aspect and label
    /// sets, and mandates a reply limited to a single flat JSON object with
    /// exactly one key per aspect.
    pub fn render(&self, text: &str) -> String {
        let aspect_list = self.aspects.iter().collect::<Vec<_>>().join(", ");

        let label_list = Opinion::canonical_names()
            .iter()
            .map(|name| format!("\"{name}\""))
            .collect::<Vec<_>>()
            .join(", ");

        let shape = self
            .aspects
            .iter()
            .map(|aspect| format!("\"{aspect}\": opinion"))
            .collect::<Vec<_>>()
            .join(", ");

        format!(
            r#"Consider the following review:

"{text}"

What is the opinion expressed toward each of the following aspects: {aspect_list}?

The opinion must be one of the following values: {label_list}.

The reply must be limited to a single JSON object of the form:
{{ {shape} }}."#
        )
    }
}
