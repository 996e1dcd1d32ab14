//! Replays a recorded chat log against the ingestion endpoint, one message
//! at a time, logging client round-trip time next to the server's own
//! processing time.

use anyhow::{Context, Result};
use coliving_backend::configuration::{get_config, Settings};
use coliving_backend::modules::latency::PROCESS_TIME_HEADER;
use coliving_backend::store::epoch_ms;
use dotenv::dotenv;
use reqwest::Client;
use secrecy::ExposeSecret;
use serde::Deserialize;
use serde_json::Value;
use std::time::{Duration, Instant};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use tracing_subscriber::{EnvFilter, Layer};

#[macro_use]
extern crate tracing;

const USER_PAUSE: Duration = Duration::from_secs(2);
const DEFAULT_USER_LIMIT: usize = 5;
const DEFAULT_MSG_LIMIT: usize = 10;

#[derive(Deserialize)]
struct UserEntry {
    #[serde(default = "unknown_ns")]
    user_ns: String,
    #[serde(default)]
    chat_history: Vec<Value>,
}

fn unknown_ns() -> String {
    "unknown".into()
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer().with_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("replay=info")),
            ),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let file = args
        .next()
        .context("Usage: replay <chat-log.json> [user-limit] [msg-limit]")?;
    let user_limit = parse_limit(args.next(), DEFAULT_USER_LIMIT)?;
    let msg_limit = parse_limit(args.next(), DEFAULT_MSG_LIMIT)?;

    let config = get_config().context("Failed to read configuration")?;
    let endpoint = format!("http://{}/raw-user-message", config.app.get_addr());

    let raw = std::fs::read_to_string(&file).with_context(|| format!("JSON file not found: {file}"))?;
    let entries: Vec<UserEntry> = serde_json::from_str(&raw).context("Failed to parse JSON")?;

    let client = Client::new();
    for entry in entries.iter().take(user_limit) {
        info!(
            "Processing user_ns={}, total_messages={}",
            entry.user_ns,
            entry.chat_history.len()
        );

        for msg in entry.chat_history.iter().take(msg_limit) {
            if let Err(e) = send_message(&client, &config, &endpoint, &entry.user_ns, msg).await {
                error!("Error sending message id={}: {e:?}", msg["id"]);
            }
        }

        tokio::time::sleep(USER_PAUSE).await;
    }

    Ok(())
}

fn parse_limit(arg: Option<String>, default: usize) -> Result<usize> {
    match arg {
        Some(value) => value
            .parse::<usize>()
            .with_context(|| format!("Limit must be a number, got `{value}`")),
        None => Ok(default),
    }
}

async fn send_message(
    client: &Client,
    config: &Settings,
    endpoint: &str,
    user_ns: &str,
    msg: &Value,
) -> Result<()> {
    let mut payload = msg.clone();
    if let Some(fields) = payload.as_object_mut() {
        fields.insert("send_At".into(), Value::from(epoch_ms()));
    }
    let id = payload.get("id").cloned().unwrap_or(Value::Null);

    let start = Instant::now();
    let response = client
        .post(endpoint)
        .header(
            config.app.api_key_header.as_str(),
            config.app.api_key.expose_secret(),
        )
        .json(&payload)
        .send()
        .await?;
    let round_trip_ms = start.elapsed().as_secs_f64() * 1000.0;

    let server_latency = response
        .headers()
        .get(PROCESS_TIME_HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse::<f64>().ok())
        .map(|value| format!("{value:.2} ms"))
        .unwrap_or_else(|| "N/A".into());

    if response.status().is_success() {
        info!(
            "Sent message id={id} for user {user_ns} \
             | Client RTT={round_trip_ms:.2} ms | Server latency={server_latency}"
        );
    } else {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        error!(
            "Failed to send message id={id} for user {user_ns} \
             | Status={status}, Response={body} \
             | Client RTT={round_trip_ms:.2} ms | Server latency={server_latency}"
        );
    }

    Ok(())
}
