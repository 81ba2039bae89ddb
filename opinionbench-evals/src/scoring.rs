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

//! Accuracy scoring and multi-run aggregation.

use crate::EvalError;
use opinionbench_core::{AspectSet, LabeledReview, OpinionRecord};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-aspect accuracy for one evaluation run, in percent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunAccuracy {
    pub per_aspect: BTreeMap<String, f64>,
    /// Unweighted mean of the per-aspect accuracies.
    pub macro_accuracy: f64,
}

/// Macro accuracies across repeated runs and their arithmetic mean.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateAccuracy {
    pub macro_accuracies: Vec<f64>,
    pub mean: f64,
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Score one run's predictions against ground truth.
///
/// Both sequences must be equal length and order-aligned; a mismatch is a
/// precondition violation, not a recoverable state. Null predictions count
/// as misses for every aspect but stay in the denominator, so a run with
/// many extraction failures simply reports lower accuracy.
pub fn score(
    predictions: &[Option<OpinionRecord>],
    ground_truth: &[LabeledReview],
    aspects: &AspectSet,
) -> Result<RunAccuracy, EvalError> {
    if predictions.len() != ground_truth.len() {
        return Err(EvalError::LengthMismatch {
            predictions: predictions.len(),
            ground_truth: ground_truth.len(),
        });
    }

    let total = ground_truth.len();
    let mut per_aspect = BTreeMap::new();

    for aspect in aspects.iter() {
        let correct = predictions
            .iter()
            .zip(ground_truth)
            .filter(|(prediction, reference)| {
                prediction
                    .as_ref()
                    .is_some_and(|record| record.agrees_on(&reference.labels, aspect))
            })
            .count();

        let accuracy = if total == 0 {
            0.0
        } else {
            round2(100.0 * correct as f64 / total as f64)
        };
        per_aspect.insert(aspect.to_string(), accuracy);
    }

    let macro_accuracy = round2(per_aspect.values().sum::<f64>() / aspects.len() as f64);

    Ok(RunAccuracy {
        per_aspect,
        macro_accuracy,
    })
}

/// Collect macro accuracies across repeated runs.
pub fn aggregate(macro_accuracies: &[f64]) -> AggregateAccuracy {
    let mean = if macro_accuracies.is_empty() {
        0.0
    } else {
        round2(macro_accuracies.iter().sum::<f64>() / macro_accuracies.len() as f64)
    };

    AggregateAccuracy {
        macro_accuracies: macro_accuracies.to_vec(),
        mean,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use opinionbench_core::Opinion;

    fn record(pairs: &[(&str, Opinion)]) -> OpinionRecord {
        pairs.iter().cloned().collect()
    }

    fn review(pairs: &[(&str, Opinion)]) -> LabeledReview {
        LabeledReview {
            text: String::new(),
            labels: record(pairs),
        }
    }

    fn aspects() -> AspectSet {
        AspectSet::default()
    }

    #[test]
    fn test_identical_predictions_score_one_hundred() {
        let truth = vec![
            review(&[
                ("Price", Opinion::Positive),
                ("Food", Opinion::Negative),
                ("Service", Opinion::NotExpressed),
            ]),
            review(&[
                ("Price", Opinion::Neutral),
                ("Food", Opinion::Neutral),
                ("Service", Opinion::Positive),
            ]),
        ];
        let predictions: Vec<_> = truth.iter().map(|r| Some(r.labels.clone())).collect();

        let run = score(&predictions, &truth, &aspects()).unwrap();

        for (_, accuracy) in &run.per_aspect {
            assert_eq!(*accuracy, 100.00);
        }
        assert_eq!(run.macro_accuracy, 100.00);
    }

    #[test]
    fn test_all_null_predictions_score_zero() {
        let truth = vec![
            review(&[
                ("Price", Opinion::Positive),
                ("Food", Opinion::Negative),
                ("Service", Opinion::Neutral),
            ]);
            3
        ];
        let predictions = vec![None; 3];

        let run = score(&predictions, &truth, &aspects()).unwrap();

        for (_, accuracy) in &run.per_aspect {
            assert_eq!(*accuracy, 0.00);
        }
        assert_eq!(run.macro_accuracy, 0.00);
    }

    #[test]
    fn test_worked_example() {
        let truth = vec![review(&[
            ("Price", Opinion::Positive),
            ("Food", Opinion::Negative),
            ("Service", Opinion::Neutral),
        ])];
        let predictions = vec![Some(record(&[
            ("Price", Opinion::Positive),
            ("Food", Opinion::Positive),
            ("Service", Opinion::Neutral),
        ]))];

        let run = score(&predictions, &truth, &aspects()).unwrap();

        assert_eq!(run.per_aspect["Price"], 100.0);
        assert_eq!(run.per_aspect["Food"], 0.0);
        assert_eq!(run.per_aspect["Service"], 100.0);
        assert_eq!(run.macro_accuracy, 66.67);
    }

    #[test]
    fn test_null_predictions_stay_in_the_denominator() {
        let truth = vec![
            review(&[
                ("Price", Opinion::Positive),
                ("Food", Opinion::Positive),
                ("Service", Opinion::Positive),
            ]);
            2
        ];
        let predictions = vec![Some(truth[0].labels.clone()), None];

        let run = score(&predictions, &truth, &aspects()).unwrap();
        assert_eq!(run.per_aspect["Price"], 50.00);
    }

    #[test]
    fn test_missing_aspect_key_is_a_miss() {
        let truth = vec![review(&[
            ("Price", Opinion::Positive),
            ("Food", Opinion::Positive),
            ("Service", Opinion::Positive),
        ])];
        let predictions = vec![Some(record(&[("Price", Opinion::Positive)]))];

        let run = score(&predictions, &truth, &aspects()).unwrap();
        assert_eq!(run.per_aspect["Price"], 100.0);
        assert_eq!(run.per_aspect["Food"], 0.0);
        assert_eq!(run.per_aspect["Service"], 0.0);
    }

    #[test]
    fn test_length_mismatch_is_fatal() {
        let truth = vec![review(&[("Price", Opinion::Positive)])];
        let err = score(&[], &truth, &aspects()).unwrap_err();
        assert!(matches!(
            err,
            EvalError::LengthMismatch {
                predictions: 0,
                ground_truth: 1
            }
        ));
    }

    #[test]
    fn test_empty_test_set_scores_zero() {
        let run = score(&[], &[], &aspects()).unwrap();
        assert_eq!(run.macro_accuracy, 0.00);
    }

    #[test]
    fn test_aggregate_mean() {
        let agg = aggregate(&[80.0, 90.0, 100.0]);
        assert_eq!(agg.mean, 90.0);
        assert_eq!(agg.macro_accuracies, vec![80.0, 90.0, 100.0]);
    }

    #[test]
    fn test_aggregate_rounds_to_two_decimals() {
        let agg = aggregate(&[100.0, 0.0, 0.0]);
        assert_eq!(agg.mean, 33.33);
    }
}
