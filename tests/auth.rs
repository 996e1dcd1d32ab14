mod tools;

use reqwest::StatusCode;
use serde_json::Value;
use tools::{epoch_ms, sample_message, AppData, API_KEY_HEADER, TEST_API_KEY};

async fn message_count(app: &AppData) -> i64 {
    let health: Value = app
        .client()
        .get(app.url("/health"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    health["message_count"].as_i64().unwrap()
}

#[tokio::test]
async fn wrong_key_is_rejected_and_store_untouched() {
    let app = AppData::new().await;

    let res = app
        .client()
        .post(app.url("/raw-user-message"))
        .header(API_KEY_HEADER, "not-the-key")
        .json(&sample_message(1, epoch_ms(), "x"))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["detail"], "Invalid or missing API Key");
    assert_eq!(message_count(&app).await, 0);
}

#[tokio::test]
async fn missing_header_is_rejected() {
    let app = AppData::new().await;

    let res = app
        .client()
        .post(app.url("/raw-user-message"))
        .json(&sample_message(1, epoch_ms(), "x"))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(message_count(&app).await, 0);
}

#[tokio::test]
async fn retrieval_routes_are_protected() {
    let app = AppData::new().await;
    let client = app.client();

    let by_id = client
        .get(app.url("/raw-user-message/1"))
        .send()
        .await
        .unwrap();
    assert_eq!(by_id.status(), StatusCode::UNAUTHORIZED);

    let listing = client
        .get(app.url("/raw-user-message/"))
        .header(API_KEY_HEADER, "wrong")
        .send()
        .await
        .unwrap();
    assert_eq!(listing.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn empty_configured_secret_fails_closed() {
    let app = AppData::with_api_key("").await;
    let client = app.client();

    // even a coincidentally empty header value is rejected
    let res = client
        .post(app.url("/raw-user-message"))
        .header(API_KEY_HEADER, "")
        .json(&sample_message(1, epoch_ms(), "x"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = client
        .get(app.url("/raw-user-message/"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn correct_key_is_accepted() {
    let app = AppData::new().await;

    let res = app
        .client()
        .post(app.url("/raw-user-message"))
        .header(API_KEY_HEADER, TEST_API_KEY)
        .json(&sample_message(1, epoch_ms(), "x"))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(message_count(&app).await, 1);
}
