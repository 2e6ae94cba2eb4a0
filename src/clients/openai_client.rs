use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::error::AppError;

#[derive(Debug, Serialize, Deserialize)]
struct OpenAIMessage {
    role: String,
    content: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct OpenAIRequest {
    model: String,
    messages: Vec<OpenAIMessage>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct OpenAIResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Message,
}

#[derive(Debug, Deserialize)]
struct Message {
    content: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ChatSettings {
    pub api_key: String,
    pub endpoint: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

/// Sends one system + user message pair and returns the first choice's text.
pub async fn query_openai(
    client: &reqwest::Client,
    settings: &ChatSettings,
    system_message: &str,
    user_message: &str,
) -> Result<String, AppError> {
    let request = OpenAIRequest {
        model: settings.model.clone(),
        messages: vec![
            OpenAIMessage {
                role: "system".to_string(),
                content: system_message.to_string(),
            },
            OpenAIMessage {
                role: "user".to_string(),
                content: user_message.to_string(),
            },
        ],
        max_tokens: settings.max_tokens,
        temperature: settings.temperature,
    };

    debug!(model = %settings.model, endpoint = %settings.endpoint, "sending completion request");
    let response = client
        .post(&settings.endpoint)
        .bearer_auth(&settings.api_key)
        .json(&request)
        .send()
        .await?;

    let status = response.status();
    let text = response.text().await?;

    if !status.is_success() {
        error!(%status, body = %text, "completion request failed");
        return Err(AppError::Completion(format!("request failed with status {status}")));
    }

    extract_reply(&text)
}

fn extract_reply(body: &str) -> Result<String, AppError> {
    let parsed: OpenAIResponse = serde_json::from_str(body).map_err(|e| {
        error!(raw = %body, "unparsable completion body");
        AppError::Completion(format!("failed to parse response: {e}"))
    })?;

    parsed
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| AppError::Completion("no choices in response".to_string()))
}
