use reqwest::Client;

use crate::domain::{DeliveryResult, SearchRequest};

pub const NETWORK_ERROR_MESSAGE: &str =
    "A network error occurred. This could be a CORS issue or an invalid URL.";
pub const UNKNOWN_ERROR_MESSAGE: &str = "An unknown error occurred while sending data.";

#[derive(Debug, thiserror::Error)]
enum DeliveryError {
    #[error("Webhook failed: {status} {reason}. {body}")]
    Rejected {
        status: u16,
        reason: String,
        body: String,
    },
    #[error("A network error occurred. This could be a CORS issue or an invalid URL.")]
    Network(#[source] reqwest::Error),
    #[error("An unknown error occurred while sending data.")]
    Unknown(#[source] reqwest::Error),
    #[error("An unknown error occurred while sending data.")]
    Serialize(#[from] serde_json::Error),
}

impl From<reqwest::Error> for DeliveryError {
    fn from(e: reqwest::Error) -> Self {
        let incomplete_request = e.is_builder()
            || e.is_connect()
            || e.is_timeout()
            || e.is_request()
            || e.is_redirect();
        if incomplete_request {
            DeliveryError::Network(e)
        } else {
            DeliveryError::Unknown(e)
        }
    }
}

pub struct WebhookClient {
    client: Client,
}

impl Default for WebhookClient {
    fn default() -> Self {
        WebhookClient {
            client: Client::new(),
        }
    }
}

impl WebhookClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// One POST, no retry. Every failure comes back as an unsuccessful result.
    pub async fn deliver(&self, payload: &SearchRequest, target_url: &str) -> DeliveryResult {
        match self.try_deliver(payload, target_url).await {
            Ok(()) => {
                log::info!("Delivered search {:?} to {}", payload.search_query, target_url);
                DeliveryResult::delivered()
            }
            Err(e) => {
                log::error!("Webhook error for {}: {:?}", target_url, e);
                DeliveryResult::failed(e.to_string())
            }
        }
    }

    async fn try_deliver(
        &self,
        payload: &SearchRequest,
        target_url: &str,
    ) -> Result<(), DeliveryError> {
        let body = serde_json::to_vec(payload)?;
        let res = self
            .client
            .post(target_url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.map_err(DeliveryError::Unknown)?;
            return Err(DeliveryError::Rejected {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or_default().to_string(),
                body,
            });
        }

        Ok(())
    }
}
