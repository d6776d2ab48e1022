//! Text generation through the Gemini `generateContent` API.

use std::time::Duration;

use adbflow::{TextGenerator, render_prompt};
use adbflow_runtime::AuditLog;
use anyhow::{Context, bail};
use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::{debug, warn};

use crate::config::GeneratorConfig;

/// Asks Gemini for a short opener in the session's language and topic.
///
/// Every failure (no API key, network error, non-success status, unexpected
/// body) is logged, audited and turned into an empty string.
pub struct GeminiGenerator {
	client: reqwest::Client,
	endpoint: String,
	model: String,
	api_key: Option<String>,
	template: String,
	max_chars: usize,
	audit: AuditLog,
}

impl GeminiGenerator {
	pub fn new(config: &GeneratorConfig, audit: AuditLog) -> anyhow::Result<Self> {
		let client = reqwest::Client::builder()
			.timeout(Duration::from_secs(config.timeout_secs.max(1)))
			.build()
			.context("failed to build HTTP client")?;
		Ok(Self {
			client,
			endpoint: config.endpoint.trim_end_matches('/').to_string(),
			model: config.model.clone(),
			api_key: config.api_key.clone(),
			template: config.prompt_template.clone(),
			max_chars: config.max_chars,
			audit,
		})
	}

	async fn request(&self, language: &str, topic: &str) -> anyhow::Result<String> {
		let key = self.api_key.as_deref().context("GEMINI_API_KEY is not set")?;
		let url = format!("{}/models/{}:generateContent", self.endpoint, self.model);
		let prompt = render_prompt(&self.template, language, topic);
		let body = json!({ "contents": [{ "parts": [{ "text": prompt }] }] });

		debug!(target = "adbflow.gemini", model = %self.model, "requesting text");
		let response = self
			.client
			.post(&url)
			.query(&[("key", key)])
			.json(&body)
			.send()
			.await
			.map_err(reqwest::Error::without_url)
			.context("request failed")?;

		let status = response.status();
		self.audit.record(format!("Gemini API status: {}", status.as_u16()));
		if !status.is_success() {
			bail!("Gemini API returned {status}");
		}

		let value: Value = response
			.json()
			.await
			.map_err(reqwest::Error::without_url)
			.context("response body is not JSON")?;
		extract_text(&value, self.max_chars).context("response has no candidate text")
	}
}

#[async_trait]
impl TextGenerator for GeminiGenerator {
	async fn generate(&self, language: &str, topic: &str) -> String {
		match self.request(language, topic).await {
			Ok(text) => text,
			Err(err) => {
				warn!(target = "adbflow.gemini", error = %format!("{err:#}"), "text generation failed");
				self.audit.record(format!("Gemini API error: {err:#}"));
				String::new()
			}
		}
	}
}

/// Takes the first candidate's first text part, flattened to one line and cut
/// to `max_chars` characters.
pub fn extract_text(response: &Value, max_chars: usize) -> Option<String> {
	let text = response.pointer("/candidates/0/content/parts/0/text")?.as_str()?;
	Some(text.replace('\n', " ").chars().take(max_chars).collect())
}
