use crate::errors::ApiError;
use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use secrecy::{ExposeSecret, Secret};

#[derive(Clone)]
pub struct ApiKeySettings {
    pub header: String,
    pub secret: Secret<String>,
}

/// Caller credential accepted on a protected route.
///
/// Extraction fails with `Unauthorized` when the header is absent or does not
/// exactly match the configured secret. An empty configured secret fails
/// closed: no header value is ever accepted.
pub struct ApiKey(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for ApiKey
where
    ApiKeySettings: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let settings = ApiKeySettings::from_ref(state);
        let secret = settings.secret.expose_secret();
        if secret.is_empty() {
            return Err(ApiError::Unauthorized);
        }

        let provided = parts
            .headers
            .get(settings.header.as_str())
            .and_then(|value| value.to_str().ok())
            .ok_or(ApiError::Unauthorized)?;

        if provided != secret {
            return Err(ApiError::Unauthorized);
        }

        Ok(ApiKey(provided.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn settings(secret: &str) -> ApiKeySettings {
        ApiKeySettings {
            header: "X-API-KEY".into(),
            secret: Secret::from(secret.to_string()),
        }
    }

    async fn extract(state: ApiKeySettings, header: Option<&str>) -> Result<ApiKey, ApiError> {
        let mut builder = Request::builder().uri("/raw-user-message");
        if let Some(value) = header {
            builder = builder.header("X-API-KEY", value);
        }
        let (mut parts, _) = builder.body(()).unwrap().into_parts();
        ApiKey::from_request_parts(&mut parts, &state).await
    }

    #[tokio::test]
    async fn accepts_exact_match() {
        let key = extract(settings("hunter2"), Some("hunter2")).await.unwrap();
        assert_eq!(key.0, "hunter2");
    }

    #[tokio::test]
    async fn rejects_wrong_value() {
        assert!(extract(settings("hunter2"), Some("hunter3")).await.is_err());
    }

    #[tokio::test]
    async fn rejects_missing_header() {
        assert!(extract(settings("hunter2"), None).await.is_err());
    }

    #[tokio::test]
    async fn empty_secret_fails_closed() {
        assert!(extract(settings(""), Some("")).await.is_err());
        assert!(extract(settings(""), None).await.is_err());
    }
}
