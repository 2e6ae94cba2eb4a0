use async_trait::async_trait;
use chrono::Utc;

use crate::clients::openai_client::{self, ChatSettings};
use crate::config::Settings;
use crate::error::AppError;
use crate::parser::Dialect;
use crate::service::prompts::{self, PromptOptions};

/// Anything that can turn calendar text into a completion reply in a given dialect.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn generate_events_reply(&self, text: &str, dialect: Dialect) -> Result<String, AppError>;
}

pub struct OpenAIService {
    http: reqwest::Client,
    chat: ChatSettings,
    prompt_options: PromptOptions,
}

impl OpenAIService {
    pub fn new(http: reqwest::Client, chat: ChatSettings, prompt_options: PromptOptions) -> Self {
        Self {
            http,
            chat,
            prompt_options,
        }
    }

    /// Returns `Ok(None)` when no API key is configured.
    pub fn from_settings(settings: &Settings) -> Result<Option<Self>, AppError> {
        let Some(api_key) = settings.openai_api_key.clone() else {
            return Ok(None);
        };
        let http = reqwest::Client::builder().build()?;
        let chat = ChatSettings {
            api_key,
            endpoint: settings.endpoint.clone(),
            model: settings.model.clone(),
            temperature: settings.temperature,
            max_tokens: settings.max_tokens,
        };
        let prompt_options = PromptOptions {
            location_hints: settings.location_hints,
            timezone: settings.timezone,
        };
        Ok(Some(Self::new(http, chat, prompt_options)))
    }
}

#[async_trait]
impl CompletionClient for OpenAIService {
    async fn generate_events_reply(&self, text: &str, dialect: Dialect) -> Result<String, AppError> {
        let system = prompts::system_prompt(dialect, &self.prompt_options, Utc::now());
        openai_client::query_openai(&self.http, &self.chat, &system, text).await
    }
}
