//! /analyze 和 /health 的端到端测试
//!
//! 用 wiremock 模拟 Gemini 上游，应用绑定到随机端口真实收发 HTTP。

use std::sync::Arc;

use docent::artwork::ArtworkRecord;
use docent::gateway::{build_router, AppState};
use docent::normalize::LenientNormalizer;
use docent::providers::gemini::GeminiProvider;
use docent::providers::Provider;
use serde_json::{json, Value};
use wiremock::matchers::{method, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// 启动绑定随机端口的应用，返回基础地址
async fn spawn_app(provider: Option<Arc<dyn Provider>>) -> String {
    let state = AppState::new(provider, Arc::new(LenientNormalizer));
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind test listener");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

/// 指向 mock 上游的 Provider
fn gemini_provider(upstream: &MockServer) -> Option<Arc<dyn Provider>> {
    Some(Arc::new(GeminiProvider::new(
        "test-key".to_string(),
        "gemini-test".to_string(),
        upstream.uri(),
    )))
}

/// 把回复文本包进 Gemini 的响应结构
fn gemini_reply(text: &str) -> Value {
    json!({
        "candidates": [
            { "content": { "parts": [ { "text": text } ] } }
        ]
    })
}

async fn mount_upstream(server: &MockServer, template: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path_regex(r"^/models/.+:generateContent$"))
        .respond_with(template)
        .mount(server)
        .await;
}

fn analyze_body() -> Value {
    json!({ "image": "aGVsbG8=", "mimeType": "image/png" })
}

async fn post_analyze(base: &str, body: &Value) -> reqwest::Response {
    reqwest::Client::new()
        .post(format!("{base}/analyze"))
        .json(body)
        .send()
        .await
        .unwrap()
}

#[tokio::test]
async fn get_on_analyze_returns_405() {
    let base = spawn_app(None).await;

    let response = reqwest::get(format!("{base}/analyze")).await.unwrap();
    assert_eq!(response.status(), 405);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Method Not Allowed");
}

#[tokio::test]
async fn missing_fields_return_400() {
    let base = spawn_app(None).await;

    for body in [json!({}), json!({"image": "aGVsbG8="}), json!({"mimeType": "image/png"})] {
        let response = post_analyze(&base, &body).await;
        assert_eq!(response.status(), 400);

        let body: Value = response.json().await.unwrap();
        assert_eq!(body["error"], "Missing image data");
    }
}

#[tokio::test]
async fn missing_credential_returns_500() {
    let base = spawn_app(None).await;

    let response = post_analyze(&base, &analyze_body()).await;
    assert_eq!(response.status(), 500);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "GOOGLE_API_KEY is not configured");
}

#[tokio::test]
async fn upstream_status_is_passed_through() {
    let upstream = MockServer::start().await;
    mount_upstream(
        &upstream,
        ResponseTemplate::new(429).set_body_json(json!({"error": {"message": "quota exceeded"}})),
    )
    .await;
    let base = spawn_app(gemini_provider(&upstream)).await;

    let response = post_analyze(&base, &analyze_body()).await;
    assert_eq!(response.status(), 429);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Failed to get analysis from AI.");
}

#[tokio::test]
async fn fenced_reply_is_returned_as_clean_json() {
    let upstream = MockServer::start().await;
    let text = "```json\n{\"title\":\"The Starry Night\",\"artist\":\"Vincent van Gogh\",\"analysis\":\"A turbulent night sky swirls over a sleeping village.\",\"emotion\":\"Anticipation\",\"question\":\"Where does the wind begin?\"}\n```";
    mount_upstream(
        &upstream,
        ResponseTemplate::new(200).set_body_json(gemini_reply(text)),
    )
    .await;
    let base = spawn_app(gemini_provider(&upstream)).await;

    let response = post_analyze(&base, &analyze_body()).await;
    assert_eq!(response.status(), 200);

    let record: ArtworkRecord = response.json().await.unwrap();
    assert_eq!(record.title, "The Starry Night");
    assert_eq!(record.artist, "Vincent van Gogh");
    assert_eq!(record.emotion, "Anticipation");
}

#[tokio::test]
async fn garbage_reply_returns_the_fallback_record() {
    let upstream = MockServer::start().await;
    mount_upstream(
        &upstream,
        ResponseTemplate::new(200).set_body_json(gemini_reply("not json at all")),
    )
    .await;
    let base = spawn_app(gemini_provider(&upstream)).await;

    let response = post_analyze(&base, &analyze_body()).await;
    assert_eq!(response.status(), 200);

    let record: ArtworkRecord = response.json().await.unwrap();
    assert_eq!(record, ArtworkRecord::fallback());
}

#[tokio::test]
async fn empty_upstream_reply_maps_to_502() {
    let upstream = MockServer::start().await;
    mount_upstream(
        &upstream,
        ResponseTemplate::new(200).set_body_json(json!({"candidates": []})),
    )
    .await;
    let base = spawn_app(gemini_provider(&upstream)).await;

    let response = post_analyze(&base, &analyze_body()).await;
    assert_eq!(response.status(), 502);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Failed to get analysis from AI.");
}

#[tokio::test]
async fn health_reports_credential_presence() {
    let upstream = MockServer::start().await;
    let base = spawn_app(gemini_provider(&upstream)).await;

    let body: Value = reqwest::get(format!("{base}/health"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["hasApiKey"], true);

    let base = spawn_app(None).await;
    let body: Value = reqwest::get(format!("{base}/health"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["hasApiKey"], false);
}
