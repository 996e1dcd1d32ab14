use crate::configuration::Settings;
use crate::modules::extractors::api_key::ApiKeySettings;
use crate::modules::latency::LatencyStats;
use crate::store::MessageStore;
use axum::extract::FromRef;
use std::sync::Arc;

#[derive(FromRef, Clone)]
pub struct AppState {
    pub store: Arc<MessageStore>,
    pub latency: Arc<LatencyStats>,
    pub api_key: ApiKeySettings,
}

impl AppState {
    pub fn new(config: Settings) -> Self {
        AppState {
            store: Arc::new(MessageStore::new()),
            latency: Arc::new(LatencyStats::default()),
            api_key: ApiKeySettings {
                header: config.app.api_key_header,
                secret: config.app.api_key,
            },
        }
    }
}
