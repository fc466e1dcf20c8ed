use url::Url;

use super::ValidationError;

/// Key the webhook URL is persisted under.
pub const WEBHOOK_URL_KEY: &str = "leadmind_webhookUrl";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookTarget(String);

impl WebhookTarget {
    /// Accepts only well-formed absolute URLs.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let raw = raw.trim();
        match Url::parse(raw) {
            Ok(_) => Ok(WebhookTarget(raw.to_string())),
            Err(e) => {
                log::warn!("Rejected webhook url {:?}: {}", raw, e);
                Err(ValidationError::InvalidWebhookUrl(raw.to_string()))
            }
        }
    }
}

impl AsRef<str> for WebhookTarget {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
