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

//! Evaluation settings.

use serde::{Deserialize, Serialize};

/// Which classifier backend drives a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClassifierMethod {
    /// Zero-shot classification through a hosted LLM. No training phase.
    ZeroShotLlm,
    /// Fine-tuned pretrained language model running locally.
    FineTunedPlm,
}

impl ClassifierMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClassifierMethod::ZeroShotLlm => "zero-shot-llm",
            ClassifierMethod::FineTunedPlm => "fine-tuned-plm",
        }
    }
}

/// Configuration surface for one evaluation invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvalSettings {
    /// Base URL of the model-serving endpoint.
    pub ollama_url: String,

    /// Model identifier passed on each generate request.
    pub model: String,

    /// Classifier backend.
    pub method: ClassifierMethod,

    /// Configured number of evaluation runs.
    pub n_runs: usize,

    /// Training samples to keep; -1 uses the whole split.
    pub n_train: i64,

    /// Test samples to keep; -1 uses the whole split.
    pub n_test: i64,

    /// Compute device for trainable backends: -1 = CPU, >= 0 = accelerator
    /// index. The zero-shot path ignores it.
    pub device: i32,
}

impl Default for EvalSettings {
    fn default() -> Self {
        Self {
            ollama_url: "http://localhost:11434".to_string(),
            model: "gemma3:1b".to_string(),
            method: ClassifierMethod::ZeroShotLlm,
            n_runs: 5,
            n_train: -1,
            n_test: -1,
            device: -1,
        }
    }
}

impl EvalSettings {
    /// Number of runs this invocation will actually execute.
    ///
    /// Zero-shot classification is deterministic modulo sampling noise, so
    /// it always executes exactly one run regardless of the configured
    /// count. Derived here instead of mutating the settings so callers keep
    /// what they configured.
    pub fn effective_runs(&self) -> usize {
        match self.method {
            ClassifierMethod::ZeroShotLlm => 1,
            ClassifierMethod::FineTunedPlm => self.n_runs.max(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = EvalSettings::default();
        assert_eq!(settings.ollama_url, "http://localhost:11434");
        assert_eq!(settings.n_runs, 5);
        assert_eq!(settings.n_train, -1);
        assert_eq!(settings.n_test, -1);
        assert_eq!(settings.device, -1);
    }

    #[test]
    fn test_zero_shot_forces_single_run_without_mutation() {
        let settings = EvalSettings {
            n_runs: 5,
            method: ClassifierMethod::ZeroShotLlm,
            ..EvalSettings::default()
        };

        assert_eq!(settings.effective_runs(), 1);
        // The configured value is untouched.
        assert_eq!(settings.n_runs, 5);
    }

    #[test]
    fn test_trainable_method_honors_configured_runs() {
        let settings = EvalSettings {
            n_runs: 3,
            method: ClassifierMethod::FineTunedPlm,
            ..EvalSettings::default()
        };
        assert_eq!(settings.effective_runs(), 3);
    }

    #[test]
    fn test_run_count_is_at_least_one() {
        let settings = EvalSettings {
            n_runs: 0,
            method: ClassifierMethod::FineTunedPlm,
            ..EvalSettings::default()
        };
        assert_eq!(settings.effective_runs(), 1);
    }
}
