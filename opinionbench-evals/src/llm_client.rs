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

//! Model-generation client abstraction.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

/// Trait for clients issuing one generation request per review text.
#[async_trait]
pub trait GenerateClient: Send + Sync {
    /// Send a prompt and return the raw generated text.
    ///
    /// One blocking call, no retry, no caching; any timeout is a property
    /// of the underlying transport and surfaces as an error here.
    async fn generate(&self, prompt: &str) -> Result<String, LLMError>;

    /// Model identifier carried on each request.
    fn model_name(&self) -> &str;
}

/// Errors from generation clients.
#[derive(Debug, Error)]
pub enum LLMError {
    #[error("API error: {0}")]
    ApiError(String),

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Fixed decoding parameters favoring deterministic structured replies.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateOptions {
    /// Maximum number of tokens to predict.
    pub num_predict: u32,
    pub temperature: f64,
    pub top_p: f64,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            num_predict: 500,
            temperature: 0.1,
            top_p: 0.9,
        }
    }
}

/// Client for an Ollama-compatible `/api/generate` endpoint.
pub struct OllamaClient {
    base_url: String,
    model: String,
    options: GenerateOptions,
    client: reqwest::Client,
}

impl OllamaClient {
    pub fn new(base_url: String, model: String) -> Self {
        Self {
            base_url,
            model,
            options: GenerateOptions::default(),
            client: reqwest::Client::new(),
        }
    }

    pub fn with_options(mut self, options: GenerateOptions) -> Self {
        self.options = options;
        self
    }
}

#[async_trait]
impl GenerateClient for OllamaClient {
    async fn generate(&self, prompt: &str) -> Result<String, LLMError> {
        let request = json!({
            "model": self.model,
            "prompt": prompt,
            "stream": false,
            "options": self.options,
        });

        let response = self
            .client
            .post(format!("{}/api/generate", self.base_url))
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let error_text = response.text().await?;
            return Err(LLMError::ApiError(error_text));
        }

        let response_data: serde_json::Value = response.json().await?;

        let content = response_data["response"]
            .as_str()
            .ok_or(LLMError::InvalidResponse(
                "missing response payload".to_string(),
            ))?
            .to_string();

        Ok(content)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
