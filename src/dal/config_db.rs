use crate::domain::{WebhookTarget, WEBHOOK_URL_KEY};

use super::KvStore;

/// A stored value that no longer parses is ignored rather than trusted.
pub async fn get_webhook_url(store: &KvStore) -> anyhow::Result<Option<WebhookTarget>> {
    let stored = store.get(WEBHOOK_URL_KEY).await?;
    Ok(stored.and_then(|url| WebhookTarget::parse(&url).ok()))
}

pub async fn set_webhook_url(target: &WebhookTarget, store: &KvStore) -> anyhow::Result<()> {
    store.set(WEBHOOK_URL_KEY, target.as_ref()).await
}
