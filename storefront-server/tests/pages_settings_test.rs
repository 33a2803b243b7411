// storefront-server/tests/pages_settings_test.rs
// HTML 页面、用户设置与对话补全代理

mod common;

use axum::{Json, Router, routing::post};
use common::TestApp;
use http::{HeaderMap, StatusCode};
use serde_json::{Value, json};

#[tokio::test]
async fn test_page_lifecycle_and_public_render() {
    let app = TestApp::new().await;
    let mut alice = app.logged_in("alice", "pw").await;

    let res = alice
        .put_text("/api/html/save/alice/home", "<h1>Hello</h1>")
        .await;
    assert_eq!(res.status, StatusCode::OK);
    let id = res.json()["id"].as_i64().unwrap();

    // saving again overwrites the same page
    let res = alice
        .put_text("/api/html/save/alice/home", "<h1>Welcome</h1>")
        .await;
    assert_eq!(res.json()["id"].as_i64(), Some(id));

    let res = alice.get("/api/html/get/alice/home").await;
    assert_eq!(res.json()["content"], "<h1>Welcome</h1>");

    let list = alice.get("/api/html/list").await.json();
    assert_eq!(list["pages"].as_array().unwrap().len(), 1);
    assert!(list["pages"][0].get("content").is_none());

    let res = app.client().get("/api/html/render/alice/home").await;
    assert_eq!(res.status, StatusCode::OK);
    assert!(res.headers["content-type"].to_str().unwrap().starts_with("text/html"));
    assert_eq!(res.text(), "<h1>Welcome</h1>");

    let res = alice.delete("/api/html/delete/alice/home").await;
    assert_eq!(res.status, StatusCode::OK);
    let res = app.client().get("/api/html/render/alice/home").await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.code(), 8001);
}

#[tokio::test]
async fn test_other_users_cannot_touch_pages() {
    let app = TestApp::new().await;
    let mut alice = app.logged_in("alice", "pw").await;
    let mut bob = app.logged_in("bob", "pw").await;
    alice.put_text("/api/html/save/alice/home", "mine").await;

    let res = bob.put_text("/api/html/save/alice/home", "defaced").await;
    assert_eq!(res.status, StatusCode::FORBIDDEN);

    let res = bob.delete("/api/html/delete/alice/home").await;
    assert_eq!(res.status, StatusCode::FORBIDDEN);

    let res = bob.get("/api/html/get/alice/home").await;
    assert_eq!(res.status, StatusCode::FORBIDDEN);

    assert_eq!(alice.get("/api/html/get/alice/home").await.json()["content"], "mine");

    let res = app.client().put_text("/api/html/save/alice/home", "x").await;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_main_menu_page_setting() {
    let app = TestApp::new().await;
    let mut alice = app.logged_in("alice", "pw").await;

    let res = alice.get("/api/user/main-menu").await;
    assert!(res.json()["main_menu_page"].is_null());

    let res = alice
        .put_json("/api/user/main-menu", json!({"page_name": "menu"}))
        .await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);

    alice.put_text("/api/html/save/alice/menu", "<ul></ul>").await;
    let res = alice
        .put_json("/api/user/main-menu", json!({"page_name": "menu"}))
        .await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(alice.get("/api/user/main-menu").await.json()["main_menu_page"], "menu");

    alice
        .put_json("/api/user/main-menu", json!({"page_name": ""}))
        .await;
    assert!(alice.get("/api/user/main-menu").await.json()["main_menu_page"].is_null());
}

#[tokio::test]
async fn test_api_key_is_masked() {
    let app = TestApp::new().await;
    let mut alice = app.logged_in("alice", "pw").await;

    let res = alice.get("/api/openai/get-key").await.json();
    assert_eq!(res["has_key"], false);

    let res = alice
        .post_json("/api/openai/set-key", json!({"api_key": "sk-test-1234567890abcd"}))
        .await;
    assert_eq!(res.status, StatusCode::OK);

    let res = alice.get("/api/openai/get-key").await.json();
    assert_eq!(res["has_key"], true);
    assert_eq!(res["masked_key"], "sk-...abcd");

    let res = alice
        .post_json("/api/openai/set-key", json!({"api_key": "  "}))
        .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
}

/// Local stand-in for the chat-completion provider
async fn spawn_provider() -> String {
    async fn complete(headers: HeaderMap, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
        let auth = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        match auth.as_str() {
            "Bearer good-key" => {
                let echoed = body["messages"][0]["content"].clone();
                (
                    StatusCode::OK,
                    Json(json!({
                        "choices": [{"message": {
                            "role": "assistant",
                            "content": format!("{}|{}|{}", body["model"], body["max_tokens"], echoed)
                        }}]
                    })),
                )
            }
            "Bearer empty-key" => (StatusCode::OK, Json(json!({"choices": []}))),
            _ => (
                StatusCode::UNAUTHORIZED,
                Json(json!({"error": {"message": "Incorrect API key provided"}})),
            ),
        }
    }

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let router = Router::new().route("/v1/chat/completions", post(complete));
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}/v1/chat/completions")
}

#[tokio::test]
async fn test_chat_proxy() {
    let provider = spawn_provider().await;
    let app = TestApp::with_config(|config| {
        config.chat_api_url = provider;
        config.chat_model = "gpt-4o".into();
        config.chat_max_tokens = 8000;
    })
    .await;
    let mut alice = app.logged_in("alice", "pw").await;
    let chat = json!({"messages": [{"role": "user", "content": "hi"}]});

    let res = alice.post_json("/api/openai/chat", chat.clone()).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.code(), 8101);

    alice
        .post_json("/api/openai/set-key", json!({"api_key": "good-key"}))
        .await;
    let res = alice.post_json("/api/openai/chat", chat.clone()).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.json()["message"]["role"], "assistant");
    assert_eq!(res.json()["message"]["content"], "\"gpt-4o\"|8000|\"hi\"");

    alice
        .post_json("/api/openai/set-key", json!({"api_key": "wrong-key"}))
        .await;
    let res = alice.post_json("/api/openai/chat", chat.clone()).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.json()["message"], "Incorrect API key provided");

    alice
        .post_json("/api/openai/set-key", json!({"api_key": "empty-key"}))
        .await;
    let res = alice.post_json("/api/openai/chat", chat).await;
    assert_eq!(res.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(res.code(), 8103);

    let res = app
        .client()
        .post_json("/api/openai/chat", json!({"messages": []}))
        .await;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_chat_provider_unreachable() {
    let app = TestApp::with_config(|config| {
        config.chat_api_url = "http://127.0.0.1:9/v1/chat/completions".into();
    })
    .await;
    let mut alice = app.logged_in("alice", "pw").await;
    alice
        .post_json("/api/openai/set-key", json!({"api_key": "good-key"}))
        .await;

    let res = alice
        .post_json(
            "/api/openai/chat",
            json!({"messages": [{"role": "user", "content": [{"type": "text", "text": "hi"}]}]}),
        )
        .await;
    assert_eq!(res.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(res.code(), 8103);
}
