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

//! # Opinionbench Core
//!
//! Shared data model for aspect-based opinion evaluation:
//!
//! - **Aspects**: the fixed, closed set of review categories (Price, Food,
//!   Service by default)
//! - **Opinions**: the closed label set every prediction and ground-truth
//!   value normalizes into
//! - **Records**: one aspect→opinion mapping per review text
//! - **Datasets**: labeled review splits loaded from TSV files
//! - **Settings**: the evaluation configuration surface
//!
//! The evaluation pipeline itself lives in `opinionbench-evals`; this crate
//! only defines the vocabulary both sides agree on.

pub mod aspect;
pub mod config;
pub mod dataset;
pub mod opinion;
pub mod record;

pub use aspect::AspectSet;
pub use config::{ClassifierMethod, EvalSettings};
pub use dataset::{DatasetError, DatasetSplits, LabeledReview};
pub use opinion::Opinion;
pub use record::OpinionRecord;
