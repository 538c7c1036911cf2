//! GeminiClient against a local stand-in for the `generateContent` endpoint.

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use thumbforge::backend::{GenerateContentRequest, GenerativeBackend, Part};
use thumbforge::clients::gemini::GeminiClient;
use thumbforge::{
    AiGateway, AspectRatio, EncodedImage, StyleTag, ThumbForgeConfig, ThumbnailGenerator,
    ThumbnailRequest, TitleGenerator,
};

#[derive(Clone, Debug)]
struct Recorded {
    call: String,
    api_key: String,
    body: Value,
}

#[derive(Clone, Default)]
struct FakeGemini {
    calls: Arc<Mutex<Vec<Recorded>>>,
}

async fn generate_content(
    State(state): State<FakeGemini>,
    Path(call): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let api_key = headers
        .get("x-goog-api-key")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    state.calls.lock().unwrap().push(Recorded {
        call: call.clone(),
        api_key: api_key.clone(),
        body,
    });

    if api_key == "bad-key" {
        return (
            StatusCode::FORBIDDEN,
            Json(json!({"error": {"code": 403, "message": "API key not valid"}})),
        );
    }

    if call.starts_with("gemini-2.5-flash-image:") {
        (
            StatusCode::OK,
            Json(json!({
                "candidates": [{
                    "content": {"role": "model", "parts": [
                        {"text": "Here is your thumbnail"},
                        {"inlineData": {"mimeType": "image/png", "data": "iVBORw0KGgo="}}
                    ]},
                    "finishReason": "STOP"
                }]
            })),
        )
    } else {
        (
            StatusCode::OK,
            Json(json!({
                "candidates": [{
                    "content": {"role": "model", "parts": [{"text": "[\"Judul A\",\"Judul B\"]"}]}
                }]
            })),
        )
    }
}

async fn spawn_fake() -> (String, FakeGemini) {
    let state = FakeGemini::default();
    let app = Router::new()
        .route("/v1beta/models/{call}", post(generate_content))
        .with_state(state.clone());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{}/v1beta", addr), state)
}

fn config(base_url: &str, api_key: &str) -> ThumbForgeConfig {
    ThumbForgeConfig {
        api_key: api_key.to_string(),
        base_url: base_url.to_string(),
        request_timeout: Duration::from_secs(10),
        ..ThumbForgeConfig::default()
    }
}

#[tokio::test]
async fn titles_round_trip_through_http() {
    let (base_url, fake) = spawn_fake().await;
    let gateway = AiGateway::from_config(&config(&base_url, "test-key")).unwrap();

    let titles = gateway.generate_titles("nasi goreng").await.unwrap();
    assert_eq!(titles, vec!["Judul A".to_string(), "Judul B".to_string()]);

    let calls = fake.calls.lock().unwrap().clone();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].call, "gemini-2.5-flash:generateContent");
    assert_eq!(calls[0].api_key, "test-key");
    assert_eq!(
        calls[0].body["generationConfig"]["responseMimeType"],
        "application/json"
    );
    assert_eq!(calls[0].body["contents"][0]["role"], "user");
}

#[tokio::test]
async fn thumbnail_round_trip_through_http() {
    let (base_url, fake) = spawn_fake().await;
    let gateway = AiGateway::from_config(&config(&base_url, "test-key")).unwrap();

    let request = ThumbnailRequest {
        title: "Judul A".to_string(),
        source_image: EncodedImage::from_bytes("image/jpeg", &[0xFF, 0xD8, 0xFF]),
        aspect_ratio: AspectRatio::Portrait,
        style: StyleTag::Anime,
    };
    let thumbnail = gateway.generate_thumbnail(&request).await.unwrap().unwrap();
    assert_eq!(thumbnail.to_data_uri(), "data:image/png;base64,iVBORw0KGgo=");

    let calls = fake.calls.lock().unwrap().clone();
    let body = &calls[0].body;
    assert_eq!(calls[0].call, "gemini-2.5-flash-image:generateContent");
    assert_eq!(body["generationConfig"]["imageConfig"]["aspectRatio"], "9:16");
    assert_eq!(
        body["generationConfig"].as_object().unwrap().keys().collect::<Vec<_>>(),
        vec!["imageConfig"]
    );
    assert_eq!(
        body["contents"][0]["parts"][1]["inlineData"]["mimeType"],
        "image/jpeg"
    );
    assert_eq!(body["contents"][0]["parts"][1]["inlineData"]["data"], "/9j/");
}

#[tokio::test]
async fn non_success_status_becomes_an_error() {
    let (base_url, _fake) = spawn_fake().await;
    let client =
        GeminiClient::new_with_base_url("bad-key", &base_url, Duration::from_secs(10)).unwrap();

    let err = client
        .generate_content(
            "gemini-2.5-flash",
            GenerateContentRequest::user(vec![Part::text("hi")]),
        )
        .await
        .unwrap_err();
    let message = err.to_string();
    assert!(message.contains("403"), "unexpected error: {}", message);
    assert!(message.contains("API key not valid"));
}

#[tokio::test]
async fn missing_key_never_reaches_the_server() {
    let (base_url, fake) = spawn_fake().await;
    let client = GeminiClient::new_with_base_url("  ", &base_url, Duration::from_secs(10)).unwrap();

    let err = client
        .generate_content(
            "gemini-2.5-flash",
            GenerateContentRequest::user(vec![Part::text("hi")]),
        )
        .await
        .unwrap_err();
    assert!(err.to_string().contains("no API key"));
    assert!(fake.calls.lock().unwrap().is_empty());
}
