use std::{net::TcpListener, sync::Arc};

use actix_files::Files;
use actix_web::{dev::Server, middleware::Logger, web, App, HttpServer};

use crate::{
    configuration::{ProviderKind, Settings},
    dal::{config_db, KvStore},
    domain::{Session, SessionEvent},
    routes::{default_route, lead_route, notification_route, webhook_route},
    services::{GeminiClient, GenerationProvider, OpenaiClient, SessionStore, WebhookClient},
};

pub fn build_provider(configuration: &Settings) -> Arc<dyn GenerationProvider> {
    let generation = &configuration.generation;
    match generation.provider {
        ProviderKind::Gemini => Arc::new(GeminiClient::new(
            configuration.api_keys.gemini.clone(),
            generation.base_url(),
            generation.model.clone(),
        )),
        ProviderKind::Openai => Arc::new(OpenaiClient::new(
            configuration.api_keys.openai.clone(),
            generation.base_url(),
            generation.model.clone(),
        )),
    }
}

/// Seeds the page session with whatever webhook url was saved last time.
pub async fn load_session(store: &KvStore) -> Session {
    let session = Session::default();
    match config_db::get_webhook_url(store).await {
        Ok(Some(target)) => {
            log::info!("Loaded saved webhook url {}", target.as_ref());
            session.apply(SessionEvent::WebhookLoaded(target), chrono::Utc::now())
        }
        Ok(None) => session,
        Err(e) => {
            log::error!("Could not read saved webhook url: {:?}", e);
            session
        }
    }
}

pub fn run(
    listener: TcpListener,
    provider: Arc<dyn GenerationProvider>,
    webhook_client: WebhookClient,
    store: KvStore,
    session: Session,
) -> Result<Server, std::io::Error> {
    let provider: web::Data<dyn GenerationProvider> = web::Data::from(provider);
    let webhook_client = web::Data::new(webhook_client);
    let store = web::Data::new(store);
    let sessions = web::Data::new(SessionStore::new(session));

    let server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .service(Files::new("/static", "./templates/static").prefer_utf8(true))
            .service(default_route::index)
            .service(default_route::health_check)
            .service(lead_route::generate_leads)
            .service(lead_route::export_leads)
            .service(web::scope("/api").service(lead_route::create_leads))
            .service(
                web::scope("/webhook")
                    .service(webhook_route::set_webhook)
                    .service(webhook_route::send_to_webhook),
            )
            .service(
                web::scope("/notifications").service(notification_route::dismiss_notification),
            )
            .app_data(provider.clone())
            .app_data(webhook_client.clone())
            .app_data(store.clone())
            .app_data(sessions.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
