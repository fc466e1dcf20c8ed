use std::{
    net::TcpListener,
    path::PathBuf,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
};

use actix_web::{http::StatusCode, web, App, HttpRequest, HttpResponse, HttpServer};
use async_trait::async_trait;
use leadmind::{
    dal::KvStore,
    domain::UserLocation,
    services::{GenerationError, GenerationProvider, WebhookClient},
    startup::{load_session, run},
};
use tempfile::TempDir;

pub struct TestApp {
    pub address: String,
    pub client: reqwest::Client,
    pub store_path: PathBuf,
    // Keeps the store directory alive for the app's lifetime
    _store_dir: Option<TempDir>,
}

impl TestApp {
    pub async fn page(&self) -> String {
        self.client
            .get(&self.address)
            .send()
            .await
            .expect("Failed to load page")
            .text()
            .await
            .unwrap()
    }

    pub async fn post_form(&self, path: &str, form: &[(&str, &str)]) -> reqwest::Response {
        self.client
            .post(format!("{}{}", self.address, path))
            .form(form)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn generate(&self, form: &[(&str, &str)]) -> String {
        self.post_form("/generate", form).await.text().await.unwrap()
    }

    pub async fn set_webhook(&self, url: &str) -> String {
        self.post_form("/webhook", &[("url", url)])
            .await
            .text()
            .await
            .unwrap()
    }

    pub async fn send_to_webhook(&self) -> String {
        self.post_form("/webhook/send", &[]).await.text().await.unwrap()
    }
}

pub async fn spawn_app(provider: Arc<dyn GenerationProvider>) -> TestApp {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");
    let mut app = spawn_app_with_store(provider, path).await;
    app._store_dir = Some(dir);
    app
}

/// Starts an app over an existing store file, as a restart would.
pub async fn spawn_app_with_store(
    provider: Arc<dyn GenerationProvider>,
    store_path: PathBuf,
) -> TestApp {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();

    let store = KvStore::new(&store_path);
    let session = load_session(&store).await;
    let server = run(listener, provider, WebhookClient::new(), store, session)
        .expect("Failed to bind address");
    let _ = tokio::spawn(server);

    TestApp {
        address: format!("http://127.0.0.1:{}", port),
        client: reqwest::Client::new(),
        store_path,
        _store_dir: None,
    }
}

/// Provider that answers every prompt with the same text and counts calls.
pub struct CannedProvider {
    reply: String,
    pub calls: AtomicUsize,
}

impl CannedProvider {
    pub fn new(reply: &str) -> Arc<Self> {
        Arc::new(CannedProvider {
            reply: reply.to_string(),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GenerationProvider for CannedProvider {
    fn name(&self) -> &'static str {
        "canned"
    }

    async fn complete(
        &self,
        _prompt: &str,
        _location: Option<UserLocation>,
    ) -> Result<String, GenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.reply.clone())
    }
}

pub const ONE_LEAD_REPLY: &str = r#"Here you go: [{"name":"Alpha Bakery","place":"1 St","no":"1","contact":"N/A","website_link":"https://alpha.example","opening_time":"N/A","rating":4.5,"best_thing":"Fresh bread"}] thanks"#;

pub struct RecordedRequest {
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: serde_json::Value,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// A throwaway HTTP peer that records every request and answers with a fixed
/// status and body.
pub struct MockServer {
    pub url: String,
    pub received: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockServer {
    pub fn requests(&self) -> std::sync::MutexGuard<'_, Vec<RecordedRequest>> {
        self.received.lock().unwrap()
    }
}

pub fn spawn_mock_server(status: StatusCode, body: String) -> MockServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    let received = Arc::new(Mutex::new(Vec::new()));

    let recorded = received.clone();
    let server = HttpServer::new(move || {
        let recorded = recorded.clone();
        let body = body.clone();
        App::new().default_service(web::to(move |req: HttpRequest, bytes: web::Bytes| {
            let recorded = recorded.clone();
            let body = body.clone();
            async move {
                let headers = req
                    .headers()
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or_default().to_string()))
                    .collect();
                recorded.lock().unwrap().push(RecordedRequest {
                    path: req.path().to_string(),
                    headers,
                    body: serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null),
                });
                HttpResponse::build(status).body(body)
            }
        }))
    })
    .workers(1)
    .listen(listener)
    .expect("Failed to listen")
    .run();
    let _ = tokio::spawn(server);

    MockServer {
        url: format!("http://127.0.0.1:{}", port),
        received,
    }
}
