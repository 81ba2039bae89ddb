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

//! Labeled review datasets and TSV ingestion.
//!
//! Splits are tab-separated files with a header row: a `review` text column
//! plus one column per aspect. Ground truth is immutable once loaded.

use crate::aspect::AspectSet;
use crate::opinion::Opinion;
use crate::record::OpinionRecord;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

/// Column holding the review text.
const REVIEW_COLUMN: &str = "review";

/// One review text with its ground-truth annotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledReview {
    pub text: String,
    pub labels: OpinionRecord,
}

/// Errors raised while loading a dataset. Fatal at startup.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to open dataset file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed dataset file {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("dataset file {path} is missing required column '{column}'")]
    MissingColumn { path: PathBuf, column: String },
}

/// Train/validation/test splits of one dataset.
#[derive(Debug, Clone)]
pub struct DatasetSplits {
    pub train: Vec<LabeledReview>,
    pub val: Vec<LabeledReview>,
    pub test: Vec<LabeledReview>,
}

impl DatasetSplits {
    /// Load `<stem>_train.tsv`, `<stem>_val.tsv` and `<stem>_test.tsv` from
    /// `dir`. A missing test file falls back to the validation split.
    pub fn load(dir: &Path, stem: &str, aspects: &AspectSet) -> Result<Self, DatasetError> {
        let train = load_split(&dir.join(format!("{stem}_train.tsv")), aspects)?;
        let val = load_split(&dir.join(format!("{stem}_val.tsv")), aspects)?;

        let test_path = dir.join(format!("{stem}_test.tsv"));
        let test = if test_path.exists() {
            load_split(&test_path, aspects)?
        } else {
            warn!(path = %test_path.display(), "test split not found, evaluating on the validation split");
            val.clone()
        };

        Ok(DatasetSplits { train, val, test })
    }

    /// Truncate splits to the configured sample counts. A negative count
    /// keeps the whole split.
    pub fn subsample(&mut self, n_train: i64, n_test: i64) {
        if n_train > 0 {
            self.train.truncate(n_train as usize);
        }
        if n_test > 0 {
            self.test.truncate(n_test as usize);
        }
    }

    /// The test-set texts, order-aligned with the test-set labels.
    pub fn test_texts(&self) -> Vec<String> {
        self.test.iter().map(|r| r.text.clone()).collect()
    }
}

/// Load one TSV split.
pub fn load_split(path: &Path, aspects: &AspectSet) -> Result<Vec<LabeledReview>, DatasetError> {
    let file = File::open(path).map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(file);

    let headers = reader
        .headers()
        .map_err(|source| DatasetError::Csv {
            path: path.to_path_buf(),
            source,
        })?
        .clone();

    let column_index = |name: &str| -> Result<usize, DatasetError> {
        headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case(name))
            .ok_or_else(|| DatasetError::MissingColumn {
                path: path.to_path_buf(),
                column: name.to_string(),
            })
    };

    let review_idx = column_index(REVIEW_COLUMN)?;
    let aspect_indices: Vec<(String, usize)> = aspects
        .iter()
        .map(|a| Ok((a.to_string(), column_index(a)?)))
        .collect::<Result<_, DatasetError>>()?;

    let mut reviews = Vec::new();
    for row in reader.records() {
        let row = row.map_err(|source| DatasetError::Csv {
            path: path.to_path_buf(),
            source,
        })?;

        let text = row.get(review_idx).unwrap_or_default().to_string();
        let labels = aspect_indices
            .iter()
            .map(|(aspect, idx)| {
                let raw = row.get(*idx).unwrap_or_default();
                (aspect.clone(), Opinion::normalize(raw))
            })
            .collect();

        reviews.push(LabeledReview { text, labels });
    }

    Ok(reviews)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const HEADER: &str = "review\tPrice\tFood\tService\n";

    fn write_tsv(dir: &Path, name: &str, body: &str) {
        let mut file = File::create(dir.join(name)).unwrap();
        write!(file, "{HEADER}{body}").unwrap();
    }

    #[test]
    fn test_load_split_parses_rows() {
        let dir = tempfile::tempdir().unwrap();
        write_tsv(
            dir.path(),
            "reviews_val.tsv",
            "Great food, awful prices.\tNegative\tPositive\tNot expressed\n",
        );

        let aspects = AspectSet::default();
        let reviews = load_split(&dir.path().join("reviews_val.tsv"), &aspects).unwrap();

        assert_eq!(reviews.len(), 1);
        assert_eq!(reviews[0].text, "Great food, awful prices.");
        assert_eq!(reviews[0].labels.get("Price"), Some(&Opinion::Negative));
        assert_eq!(reviews[0].labels.get("Food"), Some(&Opinion::Positive));
        assert_eq!(
            reviews[0].labels.get("Service"),
            Some(&Opinion::NotExpressed)
        );
    }

    #[test]
    fn test_missing_aspect_column_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let mut file = File::create(dir.path().join("bad.tsv")).unwrap();
        write!(file, "review\tPrice\nok\tPositive\n").unwrap();

        let err = load_split(&dir.path().join("bad.tsv"), &AspectSet::default()).unwrap_err();
        assert!(matches!(err, DatasetError::MissingColumn { column, .. } if column == "Food"));
    }

    #[test]
    fn test_missing_test_split_falls_back_to_val() {
        let dir = tempfile::tempdir().unwrap();
        write_tsv(dir.path(), "reviews_train.tsv", "cheap\tPositive\tNeutral\tNeutral\n");
        write_tsv(dir.path(), "reviews_val.tsv", "pricey\tNegative\tNeutral\tNeutral\n");

        let splits = DatasetSplits::load(dir.path(), "reviews", &AspectSet::default()).unwrap();
        assert_eq!(splits.test, splits.val);
    }

    #[test]
    fn test_subsample_truncates_only_positive_counts() {
        let dir = tempfile::tempdir().unwrap();
        let body = "a\tPositive\tNeutral\tNeutral\nb\tNegative\tNeutral\tNeutral\n";
        write_tsv(dir.path(), "r_train.tsv", body);
        write_tsv(dir.path(), "r_val.tsv", body);
        write_tsv(dir.path(), "r_test.tsv", body);

        let mut splits = DatasetSplits::load(dir.path(), "r", &AspectSet::default()).unwrap();
        splits.subsample(1, -1);

        assert_eq!(splits.train.len(), 1);
        assert_eq!(splits.test.len(), 2);
    }
}
