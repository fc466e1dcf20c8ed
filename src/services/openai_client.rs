use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;

use crate::domain::UserLocation;

use super::{GenerationError, GenerationProvider};

pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const OPENAI_MODEL: &str = "gpt-4o-mini";

pub struct OpenaiClient {
    client: Client<OpenAIConfig>,
    model: String,
    has_key: bool,
}

impl OpenaiClient {
    pub fn new(api_key: String, base_url: String, model: String) -> Self {
        let has_key = !api_key.trim().is_empty();
        let config = OpenAIConfig::new()
            .with_api_key(api_key)
            .with_api_base(base_url);
        OpenaiClient {
            client: Client::with_config(config),
            model,
            has_key,
        }
    }
}

fn location_hint(location: UserLocation) -> String {
    format!(
        "The user is located at latitude {}, longitude {}. Prefer businesses near this point.",
        location.latitude, location.longitude
    )
}

impl From<OpenAIError> for GenerationError {
    fn from(e: OpenAIError) -> Self {
        match e {
            OpenAIError::Reqwest(e) => GenerationError::Transport(e),
            other => GenerationError::Api(other.to_string()),
        }
    }
}

#[async_trait]
impl GenerationProvider for OpenaiClient {
    fn name(&self) -> &'static str {
        "openai"
    }

    async fn complete(
        &self,
        prompt: &str,
        location: Option<UserLocation>,
    ) -> Result<String, GenerationError> {
        if !self.has_key {
            return Err(GenerationError::MissingCredentials);
        }

        let mut messages: Vec<ChatCompletionRequestMessage> = vec![];
        if let Some(location) = location {
            messages.push(
                ChatCompletionRequestSystemMessageArgs::default()
                    .content(location_hint(location))
                    .build()?
                    .into(),
            );
        }
        messages.push(
            ChatCompletionRequestUserMessageArgs::default()
                .content(prompt)
                .build()?
                .into(),
        );

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .build()?;

        let response = self.client.chat().create(request).await?;
        log::debug!("Response: {:?}", response);

        let content = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default();

        Ok(content)
    }
}
