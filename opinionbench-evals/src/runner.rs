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

//! Multi-run evaluation harness.

use crate::scoring::{aggregate, score, AggregateAccuracy, RunAccuracy};
use crate::{Classifier, EvalError};
use opinionbench_core::{AspectSet, ClassifierMethod, DatasetSplits, EvalSettings};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Outcome of one full evaluation invocation. Created fresh per invocation,
/// never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvalReport {
    pub runs: Vec<RunAccuracy>,
    pub aggregate: AggregateAccuracy,
}

/// Drives N independent runs of classify-then-score over the test split.
///
/// Ground truth and accumulators are owned here for the duration of one
/// invocation; runs execute strictly sequentially.
pub struct EvalHarness {
    settings: EvalSettings,
    aspects: AspectSet,
}

impl EvalHarness {
    pub fn new(settings: EvalSettings, aspects: AspectSet) -> Self {
        Self { settings, aspects }
    }

    /// Run the full evaluation: `settings.effective_runs()` runs, each with
    /// a fresh classifier from `make_classifier`, trained first when the
    /// backend is trainable.
    pub async fn evaluate<F>(
        &self,
        splits: &DatasetSplits,
        make_classifier: F,
    ) -> Result<EvalReport, EvalError>
    where
        F: Fn() -> Box<dyn Classifier>,
    {
        let total_runs = self.settings.effective_runs();
        let texts = splits.test_texts();

        let mut runs: Vec<RunAccuracy> = Vec::with_capacity(total_runs);
        for run_id in 1..=total_runs {
            info!(run = run_id, total = total_runs, "starting evaluation run");

            let mut classifier = make_classifier();
            if classifier.method() == ClassifierMethod::FineTunedPlm {
                info!(run = run_id, "training classifier");
                classifier
                    .train(&splits.train, &splits.val, self.settings.device)
                    .await?;
            }

            info!(run = run_id, samples = texts.len(), "classifying test split");
            let predictions = classifier.classify_batch(&texts).await;
            let accuracy = score(&predictions, &splits.test, &self.aspects)?;

            info!(
                run = run_id,
                macro_accuracy = accuracy.macro_accuracy,
                "run finished"
            );
            runs.push(accuracy);
        }

        let macro_accuracies: Vec<f64> = runs.iter().map(|r| r.macro_accuracy).collect();
        Ok(EvalReport {
            runs,
            aggregate: aggregate(&macro_accuracies),
        })
    }
}
