use config::{Config, ConfigError};
use secrecy::Secret;
use serde::Deserialize;
use std::net::SocketAddr;

#[derive(Deserialize, Clone)]
pub struct Settings {
    pub app: ApplicationSettings,
}

#[derive(Deserialize, Clone)]
pub struct ApplicationSettings {
    pub host: String,
    pub port: u16,
    /// Shared secret compared against the configured header. An empty value
    /// fails closed: every protected route rejects.
    pub api_key: Secret<String>,
    pub api_key_header: String,
}

impl ApplicationSettings {
    pub fn get_addr(&self) -> SocketAddr {
        let addr = format!("{}:{}", self.host, self.port);
        addr.parse::<SocketAddr>()
            .unwrap_or_else(|_| panic!("Failed to parse address: {addr}"))
    }

    pub fn from_env() -> Self {
        Self {
            host: try_get_env("HOST").unwrap_or_else(|| "127.0.0.1".into()),
            port: try_get_env("PORT")
                .map(|port| port.parse::<u16>().expect("Invalid port number"))
                .unwrap_or(4001),
            api_key: Secret::from(try_get_env("API_KEY").unwrap_or_default()),
            api_key_header: try_get_env("API_KEY_NAME").unwrap_or_else(|| "X-API-KEY".into()),
        }
    }
}

enum Environment {
    Local,
    Production,
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            other => Err(format!(
                "{other} is not supported environment. Use either `local` or `production`"
            )),
        }
    }
}

pub fn get_config() -> Result<Settings, ConfigError> {
    let base_path = std::env::current_dir().expect("Failed to determine the current directory");
    let config_dir = base_path.join("configuration");

    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .map_or(Environment::Local, |env| {
            env.try_into().expect("Failed to parse APP_ENVIRONMENT.")
        });

    match environment {
        Environment::Local => {
            let settings = Config::builder()
                .set_default("app.host", "127.0.0.1")?
                .set_default("app.port", 4001)?
                .set_default("app.api_key", "")?
                .set_default("app.api_key_header", "X-API-KEY")?
                .add_source(config::File::from(config_dir.join("settings.toml")).required(false))
                .add_source(
                    config::Environment::with_prefix("APP")
                        .prefix_separator("_")
                        .separator("__"),
                );
            settings.build()?.try_deserialize()
        }

        Environment::Production => Ok(Settings {
            app: ApplicationSettings::from_env(),
        }),
    }
}

fn try_get_env(name: &str) -> Option<String> {
    std::env::var(name).ok()
}
