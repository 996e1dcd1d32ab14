use coliving_backend::configuration::{ApplicationSettings, Settings};
use coliving_backend::routes::app;
use reqwest::Client;
use secrecy::Secret;
use serde_json::{json, Value};
use std::net::{SocketAddr, TcpListener};

pub const TEST_API_KEY: &str = "test-api-key";
pub const API_KEY_HEADER: &str = "X-API-KEY";

pub fn test_settings(api_key: &str) -> Settings {
    Settings {
        app: ApplicationSettings {
            host: "127.0.0.1".into(),
            port: 0,
            api_key: Secret::from(api_key.to_string()),
            api_key_header: API_KEY_HEADER.into(),
        },
    }
}

pub async fn spawn_app(settings: Settings) -> SocketAddr {
    let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::Server::from_tcp(listener)
            .unwrap()
            .serve(app(settings).into_make_service())
            .await
            .unwrap()
    });

    addr
}

pub struct AppData {
    pub addr: SocketAddr,
}

impl AppData {
    pub async fn new() -> Self {
        Self::with_api_key(TEST_API_KEY).await
    }

    pub async fn with_api_key(api_key: &str) -> Self {
        Self {
            addr: spawn_app(test_settings(api_key)).await,
        }
    }

    pub fn client(&self) -> Client {
        Client::new()
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }
}

pub fn sample_message(id: i64, send_at: i64, text: &str) -> Value {
    json!({
        "mid": format!("mid-{id}"),
        "type": "message",
        "msg_type": "text",
        "sender_id": "user-7",
        "agent_id": 3,
        "payload": {"text": text},
        "content": text,
        "username": "chad",
        "ts": send_at,
        "paused_diff_seconds": 0,
        "id": id,
        "send_At": send_at,
    })
}

pub fn epoch_ms() -> i64 {
    coliving_backend::store::epoch_ms()
}
