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

//! Classifier backends.

use crate::extractor::ResponseExtractor;
use crate::llm_client::GenerateClient;
use crate::prompt::PromptBuilder;
use crate::{Classifier, EvalError};
use async_trait::async_trait;
use opinionbench_core::{AspectSet, ClassifierMethod, LabeledReview, OpinionRecord};
use std::sync::Arc;
use tracing::{debug, warn};

/// Zero-shot classification through a hosted LLM.
///
/// Per text: prompt construction → one synchronous inference call →
/// extraction. A failed call or unparseable reply yields `None` for that
/// text and processing continues.
pub struct ZeroShotLlmClassifier {
    client: Arc<dyn GenerateClient>,
    prompt: PromptBuilder,
    extractor: ResponseExtractor,
}

impl ZeroShotLlmClassifier {
    pub fn new(client: Arc<dyn GenerateClient>, aspects: AspectSet) -> Self {
        Self {
            client,
            prompt: PromptBuilder::new(aspects),
            extractor: ResponseExtractor::new(),
        }
    }
}

#[async_trait]
impl Classifier for ZeroShotLlmClassifier {
    fn method(&self) -> ClassifierMethod {
        ClassifierMethod::ZeroShotLlm
    }

    /// Guaranteed no-op by contract: zero-shot classification has no
    /// training phase.
    async fn train(
        &mut self,
        _train_data: &[LabeledReview],
        _val_data: &[LabeledReview],
        _device: i32,
    ) -> Result<(), EvalError> {
        debug!(model = self.client.model_name(), "zero-shot method, skipping training");
        Ok(())
    }

    async fn classify(&self, text: &str) -> Option<OpinionRecord> {
        let prompt = self.prompt.render(text);

        let reply = match self.client.generate(&prompt).await {
            Ok(reply) => reply,
            Err(err) => {
                warn!(error = %err, "inference call failed, recording null prediction");
                return None;
            }
        };

        self.extractor.extract(&reply)
    }
}

/// Fine-tuned local-model backend.
///
/// Extension point only: `train` accepts the splits and device but holds no
/// logic yet, and `classify` yields no predictions until a real model is
/// wired in.
#[derive(Debug, Default)]
pub struct FineTunedPlmClassifier;

impl FineTunedPlmClassifier {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Classifier for FineTunedPlmClassifier {
    fn method(&self) -> ClassifierMethod {
        ClassifierMethod::FineTunedPlm
    }

    async fn train(
        &mut self,
        train_data: &[LabeledReview],
        _val_data: &[LabeledReview],
        device: i32,
    ) -> Result<(), EvalError> {
        warn!(
            samples = train_data.len(),
            device, "fine-tuned backend has no training implementation yet"
        );
        Ok(())
    }

    async fn classify(&self, _text: &str) -> Option<OpinionRecord> {
        None
    }
}
