use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use crate::domain::UserLocation;

use super::{GenerationError, GenerationProvider};

pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const GEMINI_MODEL: &str = "gemini-2.5-flash";

pub struct GeminiClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    tools: Vec<Tool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_config: Option<ToolConfig>,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
enum Tool {
    GoogleMaps {},
    GoogleSearch {},
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ToolConfig {
    retrieval_config: RetrievalConfig,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RetrievalConfig {
    lat_lng: UserLocation,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

/// Error envelope Google APIs return with non-2xx statuses.
#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorStatus,
}

#[derive(Deserialize)]
struct ErrorStatus {
    #[serde(default)]
    details: Vec<ErrorDetail>,
}

#[derive(Deserialize)]
struct ErrorDetail {
    reason: Option<String>,
}

/// A bad key comes back as 400 INVALID_ARGUMENT, told apart only by the detail reason.
fn is_invalid_api_key(body: &str) -> bool {
    serde_json::from_str::<ErrorResponse>(body)
        .map(|res| {
            res.error
                .details
                .iter()
                .any(|d| d.reason.as_deref() == Some("API_KEY_INVALID"))
        })
        .unwrap_or(false)
}

impl GenerateContentResponse {
    fn text(self) -> String {
        self.candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default()
    }
}

impl GeminiClient {
    pub fn new(api_key: String, base_url: String, model: String) -> Self {
        GeminiClient {
            client: Client::new(),
            api_key,
            base_url,
            model,
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }
}

#[async_trait]
impl GenerationProvider for GeminiClient {
    fn name(&self) -> &'static str {
        "gemini"
    }

    async fn complete(
        &self,
        prompt: &str,
        location: Option<UserLocation>,
    ) -> Result<String, GenerationError> {
        if self.api_key.trim().is_empty() {
            return Err(GenerationError::MissingCredentials);
        }

        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
            tools: vec![Tool::GoogleMaps {}, Tool::GoogleSearch {}],
            tool_config: location.map(|lat_lng| ToolConfig {
                retrieval_config: RetrievalConfig { lat_lng },
            }),
        };

        let res = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(GenerationError::Transport)?;

        let status = res.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(GenerationError::InvalidCredentials);
        }
        let text = res.text().await.map_err(GenerationError::Transport)?;
        if !status.is_success() {
            log::error!("Gemini returned {}: {}", status, text);
            if status == StatusCode::BAD_REQUEST && is_invalid_api_key(&text) {
                return Err(GenerationError::InvalidCredentials);
            }
            return Err(GenerationError::Api(format!("{} {}", status, text)));
        }

        let response = serde_json::from_str::<GenerateContentResponse>(&text).map_err(|e| {
            log::error!("Unreadable Gemini reply: {:?}", e);
            GenerationError::Api(format!("unexpected reply from Gemini: {}", e))
        })?;

        Ok(response.text())
    }
}
