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

//! # Opinionbench Evaluation Pipeline
//!
//! The LLM-backed classification pipeline and its evaluation harness:
//!
//! - **Prompt builder**: renders the fixed-aspect classification
//!   instruction for one review text
//! - **Response extractor**: recovers a validated opinion record from raw,
//!   possibly malformed model output
//! - **Classifier**: per-text prompt → inference → extraction, with a batch
//!   interface over many texts
//! - **Scoring**: per-aspect and macro accuracy per run, aggregated across
//!   repeated runs
//!
//! ## Example
//!
//! ```rust,ignore
//! use opinionbench_core::{AspectSet, DatasetSplits, EvalSettings};
//! use opinionbench_evals::{EvalHarness, OllamaClient, ZeroShotLlmClassifier};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() {
//!     let settings = EvalSettings::default();
//!     let aspects = AspectSet::default();
//!     let splits = DatasetSplits::load("data".as_ref(), "reviews", &aspects).unwrap();
//!
//!     let harness = EvalHarness::new(settings.clone(), aspects.clone());
//!     let report = harness
//!         .evaluate(&splits, || {
//!             let client = Arc::new(OllamaClient::new(
//!                 settings.ollama_url.clone(),
//!                 settings.model.clone(),
//!             ));
//!             Box::new(ZeroShotLlmClassifier::new(client, aspects.clone()))
//!         })
//!         .await
//!         .unwrap();
//!
//!     println!("average macro accuracy: {}", report.aggregate.mean);
//! }
//! ```

use async_trait::async_trait;
use opinionbench_core::{ClassifierMethod, LabeledReview, OpinionRecord};
use thiserror::Error;

pub mod classifier;
pub mod extractor;
pub mod llm_client;
pub mod prompt;
pub mod runner;
pub mod scoring;

pub use classifier::{FineTunedPlmClassifier, ZeroShotLlmClassifier};
pub use extractor::ResponseExtractor;
pub use llm_client::{GenerateClient, GenerateOptions, LLMError, OllamaClient};
pub use prompt::PromptBuilder;
pub use runner::{EvalHarness, EvalReport};
pub use scoring::{aggregate, score, AggregateAccuracy, RunAccuracy};

/// A classifier backend: one trainable hook plus per-text prediction.
///
/// Implementations never raise out of `classify`: an irrecoverable failure
/// for one text yields `None` and processing continues with the next text.
#[async_trait]
pub trait Classifier: Send + Sync {
    /// Which backend this is; drives the effective run count.
    fn method(&self) -> ClassifierMethod;

    /// Fit the backend on the train/validation splits.
    ///
    /// The zero-shot variant's implementation is a guaranteed no-op by
    /// contract, not an oversight.
    async fn train(
        &mut self,
        train_data: &[LabeledReview],
        val_data: &[LabeledReview],
        device: i32,
    ) -> Result<(), EvalError>;

    /// Classify one text, or `None` when no usable prediction was produced.
    async fn classify(&self, text: &str) -> Option<OpinionRecord>;

    /// Classify many texts, one blocking inference at a time.
    ///
    /// Returns a same-length, order-aligned sequence with one entry per
    /// input, including the `None`s.
    async fn classify_batch(&self, texts: &[String]) -> Vec<Option<OpinionRecord>> {
        let mut predictions = Vec::with_capacity(texts.len());
        for text in texts {
            predictions.push(self.classify(text).await);
        }
        predictions
    }
}

/// Errors that can occur during evaluation.
#[derive(Debug, Error)]
pub enum EvalError {
    #[error("predictions and ground truth are misaligned: {predictions} predictions for {ground_truth} references")]
    LengthMismatch {
        predictions: usize,
        ground_truth: usize,
    },

    #[error("LLM client error: {0}")]
    LLMClientError(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
