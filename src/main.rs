use std::net::TcpListener;

use env_logger::Env;
use leadmind::{
    configuration::get_configuration,
    dal::KvStore,
    services::WebhookClient,
    startup::{build_provider, load_session, run},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let configuration = get_configuration()?;

    let address = format!(
        "{}:{}",
        configuration.application.host, configuration.application.port
    );
    let listener = TcpListener::bind(&address)?;
    log::info!("Listening on {}", address);

    let provider = build_provider(&configuration);
    log::info!("Generating leads with {}", provider.name());

    let store = KvStore::new(&configuration.storage.path);
    let session = load_session(&store).await;

    run(listener, provider, WebhookClient::new(), store, session)?.await?;
    Ok(())
}
