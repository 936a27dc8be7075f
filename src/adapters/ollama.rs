use crate::config::Settings;
use crate::core::prompt::build_prompt;
use crate::domain::model::TransactionRow;
use crate::domain::ports::Classifier;
use crate::domain::rules::RuleBook;
use crate::utils::error::{InferenceError, Result};
use reqwest::{Client, StatusCode};
use serde::Serialize;
use std::sync::Arc;

/// Low sampling temperature keeps answers repeatable across runs.
pub const DEFAULT_TEMPERATURE: f64 = 0.1;

/// Body of a non-streaming `/api/generate` call.
#[derive(Debug, Serialize)]
pub struct GenerateRequest<'a> {
    pub model: &'a str,
    pub prompt: &'a str,
    pub stream: bool,
    pub temperature: f64,
}

/// Classifier backed by a local Ollama server.
pub struct OllamaClassifier {
    client: Client,
    endpoint: String,
    model: String,
    rules: Arc<RuleBook>,
}

impl OllamaClassifier {
    pub fn new(settings: &Settings, rules: Arc<RuleBook>) -> Result<Self> {
        let mut builder = Client::builder();
        // 未設定 timeout 時沿用 reqwest 預設（不逾時）
        if let Some(timeout) = settings.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            endpoint: settings.endpoint.clone(),
            model: settings.model.clone(),
            rules,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn prompt_for(&self, row: &TransactionRow) -> String {
        build_prompt(&self.rules, row)
    }
}

#[async_trait::async_trait]
impl Classifier for OllamaClassifier {
    async fn classify(&self, row: &TransactionRow) -> std::result::Result<String, InferenceError> {
        let prompt = self.prompt_for(row);
        let payload = GenerateRequest {
            model: &self.model,
            prompt: &prompt,
            stream: false,
            temperature: DEFAULT_TEMPERATURE,
        };

        tracing::debug!(
            "POST {} (model: {}, prompt: {} chars)",
            self.endpoint,
            self.model,
            prompt.len()
        );

        let response = self.client.post(&self.endpoint).json(&payload).send().await?;
        let status = response.status();
        tracing::debug!("Inference response status: {}", status);

        if status != StatusCode::OK {
            return Err(InferenceError::Status(status.as_u16()));
        }

        let body: serde_json::Value = response.json().await?;
        let answer = body
            .get("response")
            .and_then(|v| v.as_str())
            .unwrap_or("")
            .trim()
            .to_string();

        Ok(answer)
    }

    fn permits(&self, label: &str) -> bool {
        self.rules.permits(label)
    }
}
