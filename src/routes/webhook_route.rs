use actix_web::{post, web, HttpResponse};
use serde::Deserialize;

use crate::{
    dal::{config_db, KvStore},
    domain::{NotificationKind, SessionEvent, WebhookTarget},
    services::{SessionStore, WebhookClient},
};

use super::see_home;

#[derive(Deserialize)]
struct WebhookForm {
    #[serde(default)]
    url: String,
}

#[post("")]
async fn set_webhook(
    form: web::Form<WebhookForm>,
    sessions: web::Data<SessionStore>,
    store: web::Data<KvStore>,
) -> HttpResponse {
    let target = match WebhookTarget::parse(&form.url) {
        Ok(target) => target,
        Err(e) => {
            sessions.apply(SessionEvent::warning(&e));
            return see_home();
        }
    };

    if let Err(e) = config_db::set_webhook_url(&target, &store).await {
        log::error!("Failed to persist webhook url: {:?}", e);
        sessions.apply(SessionEvent::Notified {
            message: "Could not save the webhook URL.".to_string(),
            kind: NotificationKind::Error,
        });
        return see_home();
    }

    log::info!("Webhook url set to {}", target.as_ref());
    sessions.apply(SessionEvent::WebhookSaved(target));
    see_home()
}

#[post("/send")]
async fn send_to_webhook(
    sessions: web::Data<SessionStore>,
    webhook_client: web::Data<WebhookClient>,
) -> HttpResponse {
    let Some(job) = sessions.begin_delivery() else {
        return see_home();
    };

    let result = webhook_client
        .deliver(&job.payload, job.target.as_ref())
        .await;
    sessions.apply(SessionEvent::DeliveryFinished(result));

    see_home()
}
