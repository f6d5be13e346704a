use async_trait::async_trait;
use reqwest::Client as HttpClient;
use rig::completion::Chat;
use rig::prelude::*;
use serde_json::{json, Value};
use tracing::debug;

use crate::config::Config;
use crate::error::{FlowError, Result};

const COMPLETION_MODEL: &str = "openai/gpt-4.1-mini";
const MAX_TOKENS: u32 = 1000;

/// External inference capability behind both flows. Implementations live
/// at the network edge; tests substitute stubs.
#[async_trait]
pub trait Inference: Send + Sync {
    /// Single-turn text completion under a fixed instruction.
    async fn complete(&self, prompt: &str) -> Result<String>;

    /// Multimodal completion over one image payload embedded as a data URI.
    async fn analyze_image(&self, data_uri: &str, prompt: &str) -> Result<String>;
}

/// OpenRouter-backed inference. Text completion goes through a rig agent;
/// the vision call posts a chat-completions payload directly, since that
/// is where the image content parts live.
#[derive(Clone)]
pub struct OpenRouterInference {
    api_key: String,
    base_url: String,
    http_client: HttpClient,
}

impl OpenRouterInference {
    pub fn new(api_key: String, base_url: String) -> Self {
        Self {
            api_key,
            base_url,
            http_client: HttpClient::new(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.openrouter_api_key.clone(),
            config.openrouter_base_url.clone(),
        )
    }

    fn agent(&self) -> rig::agent::Agent<rig::providers::openrouter::CompletionModel> {
        let client = rig::providers::openrouter::Client::new(&self.api_key);
        client.agent(COMPLETION_MODEL).build()
    }
}

#[async_trait]
impl Inference for OpenRouterInference {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let response = self
            .agent()
            .chat(prompt, vec![])
            .await
            .map_err(|e| FlowError::Inference(format!("LLM chat failed: {}", e)))?;

        debug!("Completion response: {} characters", response.len());
        Ok(response.trim().to_string())
    }

    async fn analyze_image(&self, data_uri: &str, prompt: &str) -> Result<String> {
        let content = vec![
            json!({
                "type": "text",
                "text": prompt
            }),
            json!({
                "type": "image_url",
                "image_url": {
                    "url": data_uri
                }
            }),
        ];

        let payload = json!({
            "model": COMPLETION_MODEL,
            "messages": [
                {
                    "role": "user",
                    "content": content
                }
            ],
            "max_tokens": MAX_TOKENS
        });

        let response = self
            .http_client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(FlowError::Inference(format!(
                "LLM API request failed: {}",
                response.status()
            )));
        }

        let response_json: Value = response.json().await?;

        let content = response_json["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| FlowError::Inference("invalid response format from LLM".to_string()))?;

        Ok(content.trim().to_string())
    }
}
