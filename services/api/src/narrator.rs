//! OpenAI-compatible chat-completions client used for advisor narratives.

use coverage_gap::analysis::{NarrativeError, NarrativeRequest, Narrator};
use coverage_gap::config::NarrativeConfig;
use serde::{Deserialize, Serialize};
use tracing::debug;

const SYSTEM_PROMPT: &str = "You are an insurance advisor who explains coverage gaps to \
customers. Turn the underwriting recommendations you are given into clear, business-friendly \
explanations. For each gap, say why it matters in plain English, what coverage is recommended, \
and how it protects the customer. Be empathetic and professional, avoid insurance jargon, and \
focus on the customer's financial wellbeing.";

#[derive(Clone)]
pub(crate) struct ChatCompletionNarrator {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    model: String,
    temperature: f32,
}

impl ChatCompletionNarrator {
    /// Build a client from explicit settings. A missing API key means narration is disabled.
    pub(crate) fn from_config(config: &NarrativeConfig) -> Result<Self, NarrativeError> {
        let api_key = config.api_key.clone().ok_or(NarrativeError::Disabled)?;

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|err| {
                NarrativeError::Transport(format!("failed to build HTTP client: {err}"))
            })?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            api_key,
            model: config.model.clone(),
            temperature: config.temperature,
        })
    }

    pub(crate) fn model(&self) -> &str {
        &self.model
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    temperature: f32,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    #[serde(default)]
    content: Option<String>,
}

fn user_prompt(request: &NarrativeRequest) -> Result<String, NarrativeError> {
    let recommendations = serde_json::to_string_pretty(&request.recommendations)
        .map_err(|err| NarrativeError::Malformed(err.to_string()))?;
    let customer = &request.customer;

    Ok(format!(
        "Customer Profile:\n\
         - Name: {}\n\
         - ZIP code: {}\n\
         - Net worth: {}\n\
         - Home value: {}\n\n\
         Risk Factors Identified:\n{}\n\n\
         Underwriting Recommendations:\n{}\n\n\
         For each recommendation, explain why the coverage gap matters, what coverage is \
         recommended, and how it protects the customer. Format each gap clearly and separately.",
        customer.name,
        customer.zip_code,
        customer.net_worth,
        customer.home_value,
        request.risk_factor_lines(),
        recommendations
    ))
}

impl Narrator for ChatCompletionNarrator {
    async fn narrate(&self, request: NarrativeRequest) -> Result<String, NarrativeError> {
        let payload = ChatCompletionRequest {
            model: &self.model,
            temperature: self.temperature,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: user_prompt(&request)?,
                },
            ],
        };

        debug!(
            model = %self.model,
            recommendations = request.recommendations.len(),
            "requesting advisor narrative"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|err| NarrativeError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(NarrativeError::Provider {
                status: status.as_u16(),
                body,
            });
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|err| NarrativeError::Malformed(err.to_string()))?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .filter(|content| !content.is_empty())
            .ok_or_else(|| NarrativeError::Malformed("completion has no message content".to_string()))
    }
}
