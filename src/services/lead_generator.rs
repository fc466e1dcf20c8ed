use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::{Lead, SearchRequest, UserLocation};

// Greedy on purpose: first '[' through the last ']' in the reply.
static JSON_ARRAY: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)\[.*\]").unwrap());

#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("API key for the generation provider is not set")]
    MissingCredentials,
    #[error("The generation provider rejected the API key")]
    InvalidCredentials,
    #[error("The AI model returned an invalid format. Please try refining your search.")]
    InvalidFormat,
    #[error("Failed to parse the model's response. The data format was incorrect.")]
    Parse(#[source] serde_json::Error),
    #[error("Failed to generate leads due to an API error: {0}")]
    Api(String),
    #[error("Failed to reach the generation provider")]
    Transport(#[source] reqwest::Error),
}

/// A hosted model that turns a prompt into raw text.
#[async_trait]
pub trait GenerationProvider: Send + Sync {
    fn name(&self) -> &'static str;

    /// One call, no retry, no streaming.
    async fn complete(
        &self,
        prompt: &str,
        location: Option<UserLocation>,
    ) -> Result<String, GenerationError>;

    async fn generate(&self, request: &SearchRequest) -> Result<Vec<Lead>, GenerationError> {
        let prompt = build_prompt(request);
        let raw = self.complete(&prompt, request.user_location).await?;
        log::info!(
            "{} replied with {} bytes for {:?} in {:?}",
            self.name(),
            raw.len(),
            request.search_query,
            request.location
        );
        extract_leads(&raw)
    }
}

pub fn build_prompt(request: &SearchRequest) -> String {
    let category_text = request
        .category()
        .map(|c| format!(r#" in the category of "{}""#, c))
        .unwrap_or_default();

    format!(
        r#"
Act as an expert market researcher. Your task is to find the top {count} best leads for "{query}"{category_text} in or very close to "{location}".

For each business, you MUST provide the following information in a strict JSON format.
Your entire response must be ONLY a single JSON array of objects, with no other text, explanations, or markdown formatting.

Each object in the array represents a single lead and must have these exact keys:
- "name": The full business name.
- "place": The complete street address.
- "no": A unique identifier like a business registration number or a simple sequential number (e.g., "1", "2") if no official number is found.
- "contact": The primary phone number. Use "N/A" if not available.
- "website_link": The full website URL, including 'https://'. Use "N/A" if not available.
- "opening_time": The general opening hours (e.g., "Mon-Fri 9am-5pm"). Use "N/A" if not available.
- "rating": The average star rating as a number. Use 0 if not available.
- "best_thing": A short, compelling, one-sentence summary highlighting the single best feature or reason why a customer should choose this business.

Example of a single lead object:
{{
  "name": "The Green Leaf Cafe",
  "place": "123 Main St, Anytown, USA 12345",
  "no": "3",
  "contact": "(555) 123-4567",
  "website_link": "https://www.greenleafcafe.com",
  "opening_time": "Mon-Sat 8am-8pm",
  "rating": 4.7,
  "best_thing": "They are renowned for their farm-to-table organic salads and vibrant atmosphere."
}}
"#,
        count = request.lead_count.get(),
        query = request.search_query,
        location = request.location,
    )
}

pub fn extract_leads(raw: &str) -> Result<Vec<Lead>, GenerationError> {
    let raw = raw.trim();
    let Some(array) = JSON_ARRAY.find(raw) else {
        log::error!("No JSON array found in response: {}", raw);
        return Err(GenerationError::InvalidFormat);
    };

    serde_json::from_str::<Vec<Lead>>(array.as_str()).map_err(|e| {
        log::error!("Failed to parse leads from {:?}: {:?}", array.as_str(), e);
        GenerationError::Parse(e)
    })
}
