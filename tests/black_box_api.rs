use std::sync::Arc;

use hello_auth::app::{build_router, build_state};
use hello_auth::config::Config;
use hello_auth::services::session::{PoolStats, SessionPool};
use reqwest::StatusCode;
use reqwest::header::WWW_AUTHENTICATE;
use serde_json::{Value, json};

struct TestServer {
    base_url: String,
    sessions: Arc<SessionPool>,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        // Same router as prod, default config, ephemeral port.
        let config = Config::from_lookup(|_| None).unwrap();
        let state = build_state(&config);
        let sessions = state.sessions.clone();
        let app = build_router(state, &config);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url,
            sessions,
            handle,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn login(srv: &TestServer, username: &str, password: &str) -> reqwest::Response {
    reqwest::Client::new()
        .post(srv.url("/api/v1/token"))
        .form(&[("username", username), ("password", password)])
        .send()
        .await
        .unwrap()
}

async fn me(srv: &TestServer, token: Option<&str>) -> reqwest::Response {
    let mut req = reqwest::Client::new().get(srv.url("/api/v1/users/me"));
    if let Some(token) = token {
        req = req.bearer_auth(token);
    }
    req.send().await.unwrap()
}

#[tokio::test]
async fn health_is_public() {
    let srv = TestServer::spawn().await;

    let res = reqwest::get(srv.url("/health")).await.unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.headers().contains_key("x-request-id"));
    assert_eq!(res.headers()["x-content-type-options"], "nosniff");
    let body: Value = res.json().await.unwrap();
    assert_eq!(body, json!({"status": "ok"}));
}

#[tokio::test]
async fn login_returns_username_as_bearer_token() {
    let srv = TestServer::spawn().await;

    let res = login(&srv, "johndoe", "secret").await;

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers()["cache-control"], "no-store");
    let body: Value = res.json().await.unwrap();
    assert_eq!(
        body,
        json!({"access_token": "johndoe", "token_type": "bearer"})
    );
}

#[tokio::test]
async fn login_failures_look_identical() {
    let srv = TestServer::spawn().await;

    let wrong = login(&srv, "johndoe", "wrong").await;
    let unknown = login(&srv, "nouser", "x").await;

    assert_eq!(wrong.status(), StatusCode::BAD_REQUEST);
    assert_eq!(unknown.status(), StatusCode::BAD_REQUEST);

    let wrong: Value = wrong.json().await.unwrap();
    let unknown: Value = unknown.json().await.unwrap();
    assert_eq!(wrong, unknown);
    assert_eq!(wrong["error"]["code"], "INVALID_CREDENTIALS");
    assert_eq!(wrong["error"]["message"], "Incorrect username or password");
}

#[tokio::test]
async fn login_requires_both_form_fields() {
    let srv = TestServer::spawn().await;

    let res = reqwest::Client::new()
        .post(srv.url("/api/v1/token"))
        .form(&[("username", "johndoe")])
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"]["code"], "INVALID_FORM");
}

#[tokio::test]
async fn whitespace_username_is_an_ordinary_credential_failure() {
    let srv = TestServer::spawn().await;

    let res = login(&srv, "   ", "secret").await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"]["code"], "INVALID_CREDENTIALS");
}

#[tokio::test]
async fn users_me_requires_bearer_token() {
    let srv = TestServer::spawn().await;

    let res = me(&srv, None).await;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(res.headers()[WWW_AUTHENTICATE], "Bearer");
}

#[tokio::test]
async fn users_me_rejects_unknown_token() {
    let srv = TestServer::spawn().await;

    let res = me(&srv, Some("nouser")).await;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(res.headers()[WWW_AUTHENTICATE], "Bearer");
    let body: Value = res.json().await.unwrap();
    assert_eq!(
        body["error"]["message"],
        "Invalid authentication credentials"
    );
}

#[tokio::test]
async fn users_me_rejects_disabled_user() {
    let srv = TestServer::spawn().await;

    let res = me(&srv, Some("alice")).await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"]["code"], "INACTIVE_USER");
    assert_eq!(body["error"]["message"], "Inactive user");
}

#[tokio::test]
async fn token_from_login_resolves_to_active_user() {
    let srv = TestServer::spawn().await;

    let grant: Value = login(&srv, "johndoe", "secret").await.json().await.unwrap();
    let token = grant["access_token"].as_str().unwrap();

    let res = me(&srv, Some(token)).await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(
        body,
        json!({
            "username": "johndoe",
            "full_name": "John Doe",
            "email": "johndoe@example.com",
            "disabled": false
        })
    );
}

#[tokio::test]
async fn oauth2_echoes_presented_token_without_resolving_it() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .get(srv.url("/api/v1/oauth2"))
        .bearer_auth("anything-goes")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body, json!({"token": "anything-goes"}));

    let res = client.get(srv.url("/api/v1/oauth2")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn scoped_failure_is_reported_as_not_found_and_session_released() {
    let srv = TestServer::spawn().await;

    let res = reqwest::get(srv.url("/api/v1/sessions/lookup")).await.unwrap();

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: Value = res.json().await.unwrap();
    assert_eq!(
        body,
        json!({"error": {"code": "NOT_FOUND", "message": "down"}})
    );
    assert_eq!(
        srv.sessions.stats(),
        PoolStats {
            open: 0,
            acquired: 1,
            released: 1
        }
    );
}

#[tokio::test]
async fn unexpected_scoped_failure_is_internal_and_session_released() {
    let srv = TestServer::spawn().await;

    let res = reqwest::get(srv.url("/api/v1/sessions/broken")).await.unwrap();

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"]["code"], "INTERNAL_SERVER_ERROR");
    // the underlying failure text stays in the logs
    assert!(
        !body["error"]["message"]
            .as_str()
            .unwrap()
            .contains("connection")
    );
    assert_eq!(
        srv.sessions.stats(),
        PoolStats {
            open: 0,
            acquired: 1,
            released: 1
        }
    );
}

#[tokio::test]
async fn session_extractor_releases_after_handler() {
    let srv = TestServer::spawn().await;

    for expected_id in 1..=3u64 {
        let res = reqwest::get(srv.url("/api/v1/sessions/status"))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);

        let body: Value = res.json().await.unwrap();
        assert_eq!(body["session_id"], expected_id);
        // only this request's session is open while the handler runs
        assert_eq!(body["open"], 1);
    }

    assert_eq!(
        srv.sessions.stats(),
        PoolStats {
            open: 0,
            acquired: 3,
            released: 3
        }
    );
}

#[tokio::test]
async fn items_use_common_query_params() {
    let srv = TestServer::spawn().await;

    let body: Value = reqwest::get(srv.url("/api/v1/items"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["items"].as_array().unwrap().len(), 3);
    assert!(body.get("q").is_none());

    let body: Value = reqwest::get(srv.url("/api/v1/items?q=ba&skip=1&limit=1"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body, json!({"q": "ba", "items": [{"item_name": "Bar"}]}));

    let res = reqwest::get(srv.url("/api/v1/items?skip=abc"))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn item_lookup_and_custom_errors() {
    let srv = TestServer::spawn().await;

    let res = reqwest::get(srv.url("/api/v1/items/foo")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body, json!({"item": "The Foo Wrestlers"}));

    let res = reqwest::get(srv.url("/api/v1/items/bar")).await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"]["message"], "Item not found");

    let res = reqwest::get(srv.url("/api/v1/unicorns/yolo")).await.unwrap();
    assert_eq!(res.status(), StatusCode::IM_A_TEAPOT);
    let body: Value = res.json().await.unwrap();
    assert_eq!(
        body["error"]["message"],
        "Oops! yolo did something. There goes a rainbow..."
    );

    let res = reqwest::get(srv.url("/api/v1/unicorns/rainbow")).await.unwrap();
    let body: Value = res.json().await.unwrap();
    assert_eq!(body, json!({"unicorn_name": "rainbow"}));
}

#[tokio::test]
async fn custom_error_refuses_three() {
    let srv = TestServer::spawn().await;

    let res = reqwest::get(srv.url("/api/v1/items_custom_error/3"))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::IM_A_TEAPOT);
    let body: Value = res.json().await.unwrap();
    assert_eq!(
        body,
        json!({"error": {"code": "TEAPOT", "message": "Nope! I don't like 3."}})
    );

    let res = reqwest::get(srv.url("/api/v1/items_custom_error/4"))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body, json!({"item_id": 4}));

    let res = reqwest::get(srv.url("/api/v1/items_custom_error/three"))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"]["code"], "INVALID_PATH");
}

#[tokio::test]
async fn sub_dependency_prefers_query_then_cookie() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let body: Value = client
        .get(srv.url("/api/v1/sub_depends_items?q=fresh"))
        .header("cookie", "last_query=stale")
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body, json!({"q_or_cookie": "fresh"}));

    let body: Value = client
        .get(srv.url("/api/v1/sub_depends_items"))
        .header("cookie", "last_query=stale")
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body, json!({"q_or_cookie": "stale"}));

    let body: Value = client
        .get(srv.url("/api/v1/sub_depends_items"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body, json!({"q_or_cookie": null}));
}
