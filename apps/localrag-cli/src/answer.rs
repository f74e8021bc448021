//! Answer generation over retrieved context.
//!
//! Talks to any OpenAI-compatible `/chat/completions` endpoint. Only plain
//! strings cross this boundary: the query and the retrieved chunk contents in,
//! the answer text out.

use anyhow::{anyhow, Context, Result};
use localrag_core::config::AnswerSettings;
use serde_json::{json, Value};

pub trait AnswerGenerator {
    fn generate(&self, query: &str, context: &[&str]) -> Result<String>;
}

pub fn build_prompt(query: &str, context: &[&str]) -> String {
    format!(
        "You are a concise assistant. Answer the user's question strictly using the context.\n\
         If the answer is not in the context, say you don't know.\n\n\
         Context:\n{}\n\nQuestion: {}\nAnswer:",
        context.join("\n\n"),
        query
    )
}

pub struct OpenAiAnswerGenerator {
    api_key: String,
    base_url: String,
    model: String,
    temperature: f32,
    client: reqwest::Client,
    runtime: tokio::runtime::Runtime,
}

impl OpenAiAnswerGenerator {
    pub fn new(api_key: String, settings: &AnswerSettings) -> Result<Self> {
        Ok(Self {
            api_key,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            model: settings.model.clone(),
            temperature: settings.temperature,
            client: reqwest::Client::new(),
            runtime: tokio::runtime::Runtime::new()?,
        })
    }

    /// Reads the key from `OPENAI_API_KEY`.
    pub fn from_env(settings: &AnswerSettings) -> Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .ok()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| anyhow!("OPENAI_API_KEY not set"))?;
        Self::new(api_key, settings)
    }

    fn request_body(&self, prompt: &str) -> Value {
        json!({
            "model": self.model,
            "messages": [{ "role": "user", "content": prompt }],
            "temperature": self.temperature,
        })
    }

    async fn complete(&self, body: &Value) -> Result<String> {
        let url = format!("{}/chat/completions", self.base_url);
        let resp = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(body)
            .send()
            .await
            .with_context(|| format!("request to {} failed", url))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            return Err(anyhow!("API error {}: {}", status, text));
        }

        let json: Value = resp.json().await?;
        extract_content(&json)
    }
}

fn extract_content(json: &Value) -> Result<String> {
    json["choices"]
        .get(0)
        .and_then(|choice| choice["message"]["content"].as_str())
        .map(|content| content.trim().to_string())
        .ok_or_else(|| anyhow!("No choices in response"))
}

impl AnswerGenerator for OpenAiAnswerGenerator {
    fn generate(&self, query: &str, context: &[&str]) -> Result<String> {
        let body = self.request_body(&build_prompt(query, context));
        tracing::debug!(model = %self.model, chunks = context.len(), "requesting answer");
        self.runtime.block_on(self.complete(&body))
    }
}
